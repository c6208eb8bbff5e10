//! ML-DSA (FIPS 204) signature adapters over `pqcrypto-mldsa`

use crate::copy_artifact;
use pqcbench_core::{Algorithm, OpResult, OperationError, SignatureLengths, SignatureScheme};
use pqcrypto_traits::sign::{DetachedSignature as _, PublicKey as _, SecretKey as _};

macro_rules! pqclean_signature {
    ($scheme:ident, $module:ident, $name:literal, $variant:literal) => {
        #[doc = concat!("PQClean ", $name, " detached signatures")]
        pub struct $scheme;

        impl $scheme {
            pub const NAME: &'static str = $name;

            pub fn lengths() -> SignatureLengths {
                use pqcrypto_mldsa::$module;
                SignatureLengths {
                    public_key: $module::public_key_bytes(),
                    secret_key: $module::secret_key_bytes(),
                    signature: $module::signature_bytes(),
                }
            }

            pub fn algorithm() -> Algorithm {
                Algorithm::signature($name, $variant, Self::lengths(), $scheme)
            }
        }

        impl SignatureScheme for $scheme {
            fn keygen(&self, pk: &mut [u8], sk: &mut [u8]) -> OpResult {
                use pqcrypto_mldsa::$module;
                let (public, secret) = $module::keypair();
                copy_artifact(pk, public.as_bytes(), "public key")?;
                copy_artifact(sk, secret.as_bytes(), "secret key")
            }

            fn sign(
                &self,
                sig: &mut [u8],
                msg: &[u8],
                sk: &[u8],
            ) -> Result<usize, OperationError> {
                use pqcrypto_mldsa::$module;
                let secret = $module::SecretKey::from_bytes(sk)
                    .map_err(|_| OperationError::Malformed("secret key"))?;
                let signature = $module::detached_sign(msg, &secret);
                let bytes = signature.as_bytes();
                copy_artifact(sig, bytes, "signature")?;
                Ok(bytes.len())
            }

            fn verify(&self, msg: &[u8], sig: &[u8], pk: &[u8]) -> OpResult {
                use pqcrypto_mldsa::$module;
                let signature = $module::DetachedSignature::from_bytes(sig)
                    .map_err(|_| OperationError::Malformed("signature"))?;
                let public = $module::PublicKey::from_bytes(pk)
                    .map_err(|_| OperationError::Malformed("public key"))?;
                $module::verify_detached_signature(&signature, msg, &public)
                    .map_err(|_| OperationError::VerificationFailed)
            }
        }
    };
}

pqclean_signature!(MlDsa44, mldsa44, "mldsa44", "44");
pqclean_signature!(MlDsa65, mldsa65, "mldsa65", "65");
pqclean_signature!(MlDsa87, mldsa87, "mldsa87", "87");

#[cfg(test)]
mod tests {
    use super::*;

    fn keypair(lengths: SignatureLengths) -> (Vec<u8>, Vec<u8>) {
        let mut pk = vec![0u8; lengths.public_key];
        let mut sk = vec![0u8; lengths.secret_key];
        MlDsa44.keygen(&mut pk, &mut sk).unwrap();
        (pk, sk)
    }

    #[test]
    fn test_mldsa44_lengths() {
        let lengths = MlDsa44::lengths();
        assert_eq!(lengths.public_key, 1312);
        assert_eq!(lengths.secret_key, 2560);
        assert_eq!(lengths.signature, 2420);
    }

    #[test]
    fn test_sign_then_verify() {
        let lengths = MlDsa44::lengths();
        let (pk, sk) = keypair(lengths);
        let mut sig = vec![0u8; lengths.signature];
        let msg = b"Test message for signing";

        let len = MlDsa44.sign(&mut sig, msg, &sk).unwrap();
        assert!(len <= lengths.signature);
        MlDsa44.verify(msg, &sig[..len], &pk).unwrap();
    }

    #[test]
    fn test_tampered_message_fails_verification() {
        let lengths = MlDsa44::lengths();
        let (pk, sk) = keypair(lengths);
        let mut sig = vec![0u8; lengths.signature];

        let len = MlDsa44.sign(&mut sig, b"original", &sk).unwrap();
        let err = MlDsa44.verify(b"tampered", &sig[..len], &pk).unwrap_err();
        assert!(matches!(err, OperationError::VerificationFailed));
    }

    #[test]
    fn test_short_signature_buffer_is_malformed() {
        let lengths = MlDsa44::lengths();
        let (_, sk) = keypair(lengths);
        let mut sig = vec![0u8; 8];
        let err = MlDsa44.sign(&mut sig, b"msg", &sk).unwrap_err();
        assert!(matches!(err, OperationError::Malformed("signature")));
    }
}
