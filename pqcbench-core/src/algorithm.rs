//! Algorithm Capability Contract
//!
//! An [`Algorithm`] is either a KEM or a signature scheme, and each variant
//! carries only the entry points that apply to it. A KEM therefore cannot
//! expose `sign`, and a signature scheme cannot expose `encaps`.
//!
//! Backends that describe their primitives at runtime (function tables,
//! plugin adapters) fill in an [`AlgorithmDescriptor`] instead. The
//! descriptor is checked by [`validate`] and converted into an `Algorithm`
//! with `TryFrom`; a descriptor that mixes KEM and signature entry points,
//! lacks a mandatory one, or declares a zero length never reaches the engine.

use crate::error::{BenchError, OperationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Result of a primitive call that produces no value
pub type OpResult = std::result::Result<(), OperationError>;

/// Family of a cryptographic primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmKind {
    /// Key-encapsulation mechanism
    Kem,
    /// Digital signature scheme
    Signature,
}

impl AlgorithmKind {
    /// Operations benchmarked for this kind, in evaluation order
    pub fn operations(self) -> &'static [Operation] {
        match self {
            AlgorithmKind::Kem => &[Operation::Keygen, Operation::Encaps, Operation::Decaps],
            AlgorithmKind::Signature => &[Operation::Keygen, Operation::Sign, Operation::Verify],
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmKind::Kem => f.write_str("KEM"),
            AlgorithmKind::Signature => f.write_str("Signature"),
        }
    }
}

impl FromStr for AlgorithmKind {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "kem" => Ok(AlgorithmKind::Kem),
            "sig" | "signature" => Ok(AlgorithmKind::Signature),
            other => Err(BenchError::InvalidParam(format!(
                "unknown algorithm kind: {other}"
            ))),
        }
    }
}

/// A benchmarkable operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Key-pair generation
    Keygen,
    /// KEM encapsulation
    Encaps,
    /// KEM decapsulation
    Decaps,
    /// Signature generation
    Sign,
    /// Signature verification
    Verify,
}

impl Operation {
    /// Canonical lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Keygen => "keygen",
            Operation::Encaps => "encaps",
            Operation::Decaps => "decaps",
            Operation::Sign => "sign",
            Operation::Verify => "verify",
        }
    }

    /// Whether this operation exists for the given kind
    pub fn applies_to(self, kind: AlgorithmKind) -> bool {
        kind.operations().contains(&self)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "keygen" => Ok(Operation::Keygen),
            "encaps" => Ok(Operation::Encaps),
            "decaps" => Ok(Operation::Decaps),
            "sign" => Ok(Operation::Sign),
            "verify" => Ok(Operation::Verify),
            other => Err(BenchError::InvalidParam(format!("unknown operation: {other}"))),
        }
    }
}

/// Artifact lengths of a KEM, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KemLengths {
    /// Public key length
    pub public_key: usize,
    /// Secret key length
    pub secret_key: usize,
    /// Ciphertext length
    pub ciphertext: usize,
    /// Shared secret length
    pub shared_secret: usize,
}

/// Artifact lengths of a signature scheme, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureLengths {
    /// Public key length
    pub public_key: usize,
    /// Secret key length
    pub secret_key: usize,
    /// Maximum signature length
    pub signature: usize,
}

/// Entry points of a key-encapsulation mechanism.
///
/// Output buffers are sized from the algorithm's declared [`KemLengths`].
pub trait KemScheme {
    /// Generate a key pair into `pk` and `sk`
    fn keygen(&self, pk: &mut [u8], sk: &mut [u8]) -> OpResult;

    /// Encapsulate against `pk`, writing the ciphertext and shared secret
    fn encaps(&self, ct: &mut [u8], ss: &mut [u8], pk: &[u8]) -> OpResult;

    /// Recover the shared secret from `ct` with `sk`
    fn decaps(&self, ss: &mut [u8], ct: &[u8], sk: &[u8]) -> OpResult;
}

/// Entry points of a signature scheme
pub trait SignatureScheme {
    /// Generate a key pair into `pk` and `sk`
    fn keygen(&self, pk: &mut [u8], sk: &mut [u8]) -> OpResult;

    /// Sign `msg` with `sk` into `sig`, returning the signature length
    fn sign(&self, sig: &mut [u8], msg: &[u8], sk: &[u8]) -> std::result::Result<usize, OperationError>;

    /// Verify `sig` over `msg` against `pk`
    fn verify(&self, msg: &[u8], sig: &[u8], pk: &[u8]) -> OpResult;
}

/// Identity shared by both algorithm kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmInfo {
    /// Name, unique within a provider (e.g. "mlkem768")
    pub name: String,
    /// Variant tag (e.g. "768")
    pub variant: String,
}

/// A KEM with its lengths and entry points
pub struct KemAlgorithm {
    /// Name and variant
    pub info: AlgorithmInfo,
    /// Declared artifact lengths
    pub lengths: KemLengths,
    /// Entry points
    pub scheme: Box<dyn KemScheme>,
}

/// A signature scheme with its lengths and entry points
pub struct SignatureAlgorithm {
    /// Name and variant
    pub info: AlgorithmInfo,
    /// Declared artifact lengths
    pub lengths: SignatureLengths,
    /// Entry points
    pub scheme: Box<dyn SignatureScheme>,
}

/// A benchmarkable cryptographic primitive
pub enum Algorithm {
    /// Key-encapsulation mechanism
    Kem(KemAlgorithm),
    /// Digital signature scheme
    Signature(SignatureAlgorithm),
}

impl Algorithm {
    /// Build a KEM algorithm
    pub fn kem(
        name: impl Into<String>,
        variant: impl Into<String>,
        lengths: KemLengths,
        scheme: impl KemScheme + 'static,
    ) -> Self {
        Algorithm::Kem(KemAlgorithm {
            info: AlgorithmInfo {
                name: name.into(),
                variant: variant.into(),
            },
            lengths,
            scheme: Box::new(scheme),
        })
    }

    /// Build a signature algorithm
    pub fn signature(
        name: impl Into<String>,
        variant: impl Into<String>,
        lengths: SignatureLengths,
        scheme: impl SignatureScheme + 'static,
    ) -> Self {
        Algorithm::Signature(SignatureAlgorithm {
            info: AlgorithmInfo {
                name: name.into(),
                variant: variant.into(),
            },
            lengths,
            scheme: Box::new(scheme),
        })
    }

    /// Name and variant of either kind
    pub fn info(&self) -> &AlgorithmInfo {
        match self {
            Algorithm::Kem(kem) => &kem.info,
            Algorithm::Signature(sig) => &sig.info,
        }
    }

    /// Algorithm name
    pub fn name(&self) -> &str {
        &self.info().name
    }

    /// Variant tag
    pub fn variant(&self) -> &str {
        &self.info().variant
    }

    /// KEM or signature
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Algorithm::Kem(_) => AlgorithmKind::Kem,
            Algorithm::Signature(_) => AlgorithmKind::Signature,
        }
    }

    /// Operations benchmarked for this algorithm, in evaluation order
    pub fn operations(&self) -> &'static [Operation] {
        self.kind().operations()
    }

    /// Byte lengths of every artifact; kind-specific lengths of the other kind are zero
    pub fn sizes(&self) -> ArtifactSizes {
        match self {
            Algorithm::Kem(kem) => ArtifactSizes {
                algorithm: kem.info.name.clone(),
                variant: kem.info.variant.clone(),
                kind: AlgorithmKind::Kem,
                public_key: kem.lengths.public_key,
                secret_key: kem.lengths.secret_key,
                ciphertext: kem.lengths.ciphertext,
                shared_secret: kem.lengths.shared_secret,
                signature: 0,
            },
            Algorithm::Signature(sig) => ArtifactSizes {
                algorithm: sig.info.name.clone(),
                variant: sig.info.variant.clone(),
                kind: AlgorithmKind::Signature,
                public_key: sig.lengths.public_key,
                secret_key: sig.lengths.secret_key,
                ciphertext: 0,
                shared_secret: 0,
                signature: sig.lengths.signature,
            },
        }
    }

    /// Structural check of identity and declared lengths.
    ///
    /// Kind exclusivity holds by construction for this type; what remains is
    /// a non-empty identity and a non-zero length for every artifact.
    pub fn validate(&self) -> Result<()> {
        check_identity(self.name(), self.variant())?;
        let sizes = self.sizes();
        require_len(sizes.public_key, "public key")?;
        require_len(sizes.secret_key, "secret key")?;
        match self {
            Algorithm::Kem(_) => {
                require_len(sizes.ciphertext, "ciphertext")?;
                require_len(sizes.shared_secret, "shared secret")
            }
            Algorithm::Signature(_) => require_len(sizes.signature, "signature"),
        }
    }
}

impl fmt::Debug for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Kem(kem) => f
                .debug_struct("Kem")
                .field("info", &kem.info)
                .field("lengths", &kem.lengths)
                .finish_non_exhaustive(),
            Algorithm::Signature(sig) => f
                .debug_struct("Signature")
                .field("info", &sig.info)
                .field("lengths", &sig.lengths)
                .finish_non_exhaustive(),
        }
    }
}

/// Byte sizes of every artifact an algorithm produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSizes {
    /// Algorithm name
    pub algorithm: String,
    /// Variant tag
    pub variant: String,
    /// KEM or signature
    pub kind: AlgorithmKind,
    /// Public key bytes
    pub public_key: usize,
    /// Secret key bytes
    pub secret_key: usize,
    /// Ciphertext bytes, zero for signatures
    pub ciphertext: usize,
    /// Shared secret bytes, zero for signatures
    pub shared_secret: usize,
    /// Maximum signature bytes, zero for KEMs
    pub signature: usize,
}

fn check_identity(name: &str, variant: &str) -> Result<()> {
    if name.is_empty() {
        return Err(BenchError::NullInput("algorithm name"));
    }
    if variant.is_empty() {
        return Err(BenchError::NullInput("algorithm variant"));
    }
    Ok(())
}

fn require_len(len: usize, what: &str) -> Result<()> {
    if len == 0 {
        return Err(BenchError::InvalidParam(format!("{what} length must be non-zero")));
    }
    Ok(())
}

fn forbid(present: bool, what: &str, kind: AlgorithmKind) -> Result<()> {
    if present {
        return Err(BenchError::InvalidParam(format!(
            "{kind} algorithm must not expose {what}"
        )));
    }
    Ok(())
}

// ─── Runtime descriptor ──────────────────────────────────────────────────────

/// Key generation entry point: `(pk, sk)`
pub type KeygenFn = Box<dyn Fn(&mut [u8], &mut [u8]) -> OpResult>;
/// Encapsulation entry point: `(ct, ss, pk)`
pub type EncapsFn = Box<dyn Fn(&mut [u8], &mut [u8], &[u8]) -> OpResult>;
/// Decapsulation entry point: `(ss, ct, sk)`
pub type DecapsFn = Box<dyn Fn(&mut [u8], &[u8], &[u8]) -> OpResult>;
/// Signing entry point: `(sig, msg, sk)`, returns the signature length
pub type SignFn = Box<dyn Fn(&mut [u8], &[u8], &[u8]) -> std::result::Result<usize, OperationError>>;
/// Verification entry point: `(msg, sig, pk)`
pub type VerifyFn = Box<dyn Fn(&[u8], &[u8], &[u8]) -> OpResult>;

/// Capability record filled in by backends that describe primitives at runtime
#[derive(Default)]
pub struct AlgorithmDescriptor {
    /// Algorithm name, must be non-empty
    pub name: String,
    /// Variant tag, must be non-empty
    pub variant: String,
    /// Declared kind; inferred from the entry points when absent
    pub kind: Option<AlgorithmKind>,
    /// Public key length
    pub public_key_len: usize,
    /// Secret key length
    pub secret_key_len: usize,
    /// Ciphertext length (KEM only)
    pub ciphertext_len: usize,
    /// Shared secret length (KEM only)
    pub shared_secret_len: usize,
    /// Maximum signature length (signature only)
    pub signature_len: usize,
    /// Key generation, required for both kinds
    pub keygen: Option<KeygenFn>,
    /// Encapsulation (KEM only)
    pub encaps: Option<EncapsFn>,
    /// Decapsulation (KEM only)
    pub decaps: Option<DecapsFn>,
    /// Signing (signature only)
    pub sign: Option<SignFn>,
    /// Verification (signature only)
    pub verify: Option<VerifyFn>,
}

impl fmt::Debug for AlgorithmDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmDescriptor")
            .field("name", &self.name)
            .field("variant", &self.variant)
            .field("kind", &self.kind)
            .field("public_key_len", &self.public_key_len)
            .field("secret_key_len", &self.secret_key_len)
            .field("ciphertext_len", &self.ciphertext_len)
            .field("shared_secret_len", &self.shared_secret_len)
            .field("signature_len", &self.signature_len)
            .field("keygen", &self.keygen.is_some())
            .field("encaps", &self.encaps.is_some())
            .field("decaps", &self.decaps.is_some())
            .field("sign", &self.sign.is_some())
            .field("verify", &self.verify.is_some())
            .finish()
    }
}

/// Validate a runtime capability record.
///
/// Rejects a missing identity, a missing kind, a missing mandatory entry
/// point, an entry point or length belonging to the other kind, and a zero
/// length where the kind requires one. Never partially succeeds.
pub fn validate(desc: &AlgorithmDescriptor) -> Result<()> {
    check_identity(&desc.name, &desc.variant)?;

    let has_kem_ops = desc.encaps.is_some() || desc.decaps.is_some();
    let has_sig_ops = desc.sign.is_some() || desc.verify.is_some();

    let kind = match desc.kind {
        Some(kind) => kind,
        None if has_kem_ops && has_sig_ops => {
            return Err(BenchError::InvalidParam(
                "algorithm exposes both KEM and signature entry points".to_string(),
            ));
        }
        None => {
            return Err(BenchError::InvalidParam("algorithm kind not set".to_string()));
        }
    };

    if desc.keygen.is_none() {
        return Err(BenchError::InvalidParam("keygen entry point is required".to_string()));
    }
    require_len(desc.public_key_len, "public key")?;
    require_len(desc.secret_key_len, "secret key")?;

    match kind {
        AlgorithmKind::Kem => {
            if desc.encaps.is_none() || desc.decaps.is_none() {
                return Err(BenchError::InvalidParam(
                    "KEM requires encaps and decaps entry points".to_string(),
                ));
            }
            forbid(has_sig_ops, "sign/verify", kind)?;
            forbid(desc.signature_len != 0, "a signature length", kind)?;
            require_len(desc.ciphertext_len, "ciphertext")?;
            require_len(desc.shared_secret_len, "shared secret")?;
        }
        AlgorithmKind::Signature => {
            if desc.sign.is_none() || desc.verify.is_none() {
                return Err(BenchError::InvalidParam(
                    "signature scheme requires sign and verify entry points".to_string(),
                ));
            }
            forbid(has_kem_ops, "encaps/decaps", kind)?;
            forbid(
                desc.ciphertext_len != 0 || desc.shared_secret_len != 0,
                "ciphertext or shared secret lengths",
                kind,
            )?;
            require_len(desc.signature_len, "signature")?;
        }
    }

    Ok(())
}

struct DescriptorKem {
    keygen: KeygenFn,
    encaps: EncapsFn,
    decaps: DecapsFn,
}

impl KemScheme for DescriptorKem {
    fn keygen(&self, pk: &mut [u8], sk: &mut [u8]) -> OpResult {
        (self.keygen)(pk, sk)
    }

    fn encaps(&self, ct: &mut [u8], ss: &mut [u8], pk: &[u8]) -> OpResult {
        (self.encaps)(ct, ss, pk)
    }

    fn decaps(&self, ss: &mut [u8], ct: &[u8], sk: &[u8]) -> OpResult {
        (self.decaps)(ss, ct, sk)
    }
}

struct DescriptorSignature {
    keygen: KeygenFn,
    sign: SignFn,
    verify: VerifyFn,
}

impl SignatureScheme for DescriptorSignature {
    fn keygen(&self, pk: &mut [u8], sk: &mut [u8]) -> OpResult {
        (self.keygen)(pk, sk)
    }

    fn sign(&self, sig: &mut [u8], msg: &[u8], sk: &[u8]) -> std::result::Result<usize, OperationError> {
        (self.sign)(sig, msg, sk)
    }

    fn verify(&self, msg: &[u8], sig: &[u8], pk: &[u8]) -> OpResult {
        (self.verify)(msg, sig, pk)
    }
}

impl TryFrom<AlgorithmDescriptor> for Algorithm {
    type Error = BenchError;

    fn try_from(desc: AlgorithmDescriptor) -> Result<Self> {
        validate(&desc)?;

        let info = AlgorithmInfo {
            name: desc.name,
            variant: desc.variant,
        };

        // validate() guarantees the kind and the entry points for it
        match (desc.kind, desc.keygen, desc.encaps, desc.decaps, desc.sign, desc.verify) {
            (Some(AlgorithmKind::Kem), Some(keygen), Some(encaps), Some(decaps), None, None) => {
                Ok(Algorithm::Kem(KemAlgorithm {
                    info,
                    lengths: KemLengths {
                        public_key: desc.public_key_len,
                        secret_key: desc.secret_key_len,
                        ciphertext: desc.ciphertext_len,
                        shared_secret: desc.shared_secret_len,
                    },
                    scheme: Box::new(DescriptorKem {
                        keygen,
                        encaps,
                        decaps,
                    }),
                }))
            }
            (Some(AlgorithmKind::Signature), Some(keygen), None, None, Some(sign), Some(verify)) => {
                Ok(Algorithm::Signature(SignatureAlgorithm {
                    info,
                    lengths: SignatureLengths {
                        public_key: desc.public_key_len,
                        secret_key: desc.secret_key_len,
                        signature: desc.signature_len,
                    },
                    scheme: Box::new(DescriptorSignature {
                        keygen,
                        sign,
                        verify,
                    }),
                }))
            }
            _ => Err(BenchError::InvalidState(format!(
                "descriptor for {} passed validation with inconsistent entry points",
                info.name
            ))),
        }
    }
}
