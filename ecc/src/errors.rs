//! Error types for key handling, signing and signature parsing.

use curve::CurveError;
use thiserror::Error;

/// Errors that can occur while constructing keys or producing and parsing signatures.
///
/// Verification never returns one of these: a signature that does not verify is
/// reported as `false`. Only structurally invalid input, or a computation that
/// cannot complete, is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EcError {
    /// The secret is zero, not less than the group order, or not 32 bytes.
    #[error("invalid private key")]
    InvalidPrivateKey,

    #[error("invalid public key: {0}")]
    InvalidPublicKey(&'static str),

    /// A tweak is not less than the group order.
    #[error("invalid tweak")]
    InvalidTweak,

    /// An operation produced the point at infinity where a key was expected.
    #[error("result is the point at infinity")]
    PointAtInfinity,

    /// A nonce is zero or not less than the group order.
    #[error("invalid nonce")]
    InvalidNonce,

    /// Signing produced `r = 0` or `s = 0`. No other nonce is tried.
    #[error("signature element is zero")]
    ZeroSignatureElement,

    #[error("invalid DER signature: {0}")]
    InvalidDer(&'static str),

    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A signature element does not fit in its fixed-width encoding.
    #[error("signature element too large to encode")]
    ElementTooLarge,

    #[error("invalid compact signature flag {0}")]
    InvalidCompactFlag(u8),

    #[error("invalid recovery id {0}")]
    InvalidRecoveryId(u8),

    /// No public key could be reconstructed that verifies the signature.
    #[error("public key recovery failed")]
    RecoveryFailed,

    /// None of the four recovery ids reproduces the signer's public key.
    #[error("unable to determine recovery parameter")]
    RecoveryParamNotFound,

    /// The native backend only implements secp256k1; the portable backend
    /// needs a field prime and group order of at most 256 bits.
    #[error("unsupported curve for this backend")]
    UnsupportedCurve,

    #[error(transparent)]
    Curve(#[from] CurveError),
}
