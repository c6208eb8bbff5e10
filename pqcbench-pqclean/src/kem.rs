//! ML-KEM (FIPS 203) adapters over `pqcrypto-mlkem`

use crate::copy_artifact;
use pqcbench_core::{Algorithm, KemLengths, KemScheme, OpResult, OperationError};
use pqcrypto_traits::kem::{Ciphertext as _, PublicKey as _, SecretKey as _, SharedSecret as _};

macro_rules! pqclean_kem {
    ($scheme:ident, $module:ident, $name:literal, $variant:literal) => {
        #[doc = concat!("PQClean ", $name, " key encapsulation")]
        pub struct $scheme;

        impl $scheme {
            pub const NAME: &'static str = $name;

            pub fn lengths() -> KemLengths {
                use pqcrypto_mlkem::$module;
                KemLengths {
                    public_key: $module::public_key_bytes(),
                    secret_key: $module::secret_key_bytes(),
                    ciphertext: $module::ciphertext_bytes(),
                    shared_secret: $module::shared_secret_bytes(),
                }
            }

            pub fn algorithm() -> Algorithm {
                Algorithm::kem($name, $variant, Self::lengths(), $scheme)
            }
        }

        impl KemScheme for $scheme {
            fn keygen(&self, pk: &mut [u8], sk: &mut [u8]) -> OpResult {
                use pqcrypto_mlkem::$module;
                let (public, secret) = $module::keypair();
                copy_artifact(pk, public.as_bytes(), "public key")?;
                copy_artifact(sk, secret.as_bytes(), "secret key")
            }

            fn encaps(&self, ct: &mut [u8], ss: &mut [u8], pk: &[u8]) -> OpResult {
                use pqcrypto_mlkem::$module;
                let public = $module::PublicKey::from_bytes(pk)
                    .map_err(|_| OperationError::Malformed("public key"))?;
                let (shared, ciphertext) = $module::encapsulate(&public);
                copy_artifact(ct, ciphertext.as_bytes(), "ciphertext")?;
                copy_artifact(ss, shared.as_bytes(), "shared secret")
            }

            fn decaps(&self, ss: &mut [u8], ct: &[u8], sk: &[u8]) -> OpResult {
                use pqcrypto_mlkem::$module;
                let ciphertext = $module::Ciphertext::from_bytes(ct)
                    .map_err(|_| OperationError::Malformed("ciphertext"))?;
                let secret = $module::SecretKey::from_bytes(sk)
                    .map_err(|_| OperationError::Malformed("secret key"))?;
                let shared = $module::decapsulate(&ciphertext, &secret);
                copy_artifact(ss, shared.as_bytes(), "shared secret")
            }
        }
    };
}

pqclean_kem!(MlKem512, mlkem512, "mlkem512", "512");
pqclean_kem!(MlKem768, mlkem768, "mlkem768", "768");
pqclean_kem!(MlKem1024, mlkem1024, "mlkem1024", "1024");
