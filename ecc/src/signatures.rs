//! Backend-agnostic signature values.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::constants::{COMPACT_FLAG_BASE, COMPACT_FLAG_COMPRESSED};
use crate::errors::EcError;
use crate::serializer::{CompactSignatureSerializer, DerSignatureSerializer, SchnorrSignatureSerializer};

/// An ECDSA signature `(r, s)`.
///
/// Construction does not range-check the elements; `verify` rejects any `r` or
/// `s` outside `[1, n-1]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    pub r: BigUint,
    pub s: BigUint,
}

impl Signature {
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Signature { r, s }
    }

    /// DER encoding, as used in transaction scripts.
    ///
    /// Fails when an element is too wide for a short-form DER length.
    pub fn to_der(&self) -> Result<Vec<u8>, EcError> {
        DerSignatureSerializer::serialize(self)
    }

    pub fn from_der(bytes: &[u8]) -> Result<Self, EcError> {
        DerSignatureSerializer::parse(bytes)
    }
}

/// An ECDSA signature carrying the data needed to recover the signer's key.
///
/// Bit 0 of the recovery id is the parity of `R.y`; bit 1 is set when `R.x`
/// was at least the group order before reduction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CompactSignatureRepr")]
pub struct CompactSignature {
    r: BigUint,
    s: BigUint,
    recovery_id: u8,
    compressed: bool,
}

impl CompactSignature {
    pub fn new(r: BigUint, s: BigUint, recovery_id: u8, compressed: bool) -> Result<Self, EcError> {
        if recovery_id > 3 {
            return Err(EcError::InvalidRecoveryId(recovery_id));
        }
        Ok(CompactSignature {
            r,
            s,
            recovery_id,
            compressed,
        })
    }

    pub fn r(&self) -> &BigUint {
        &self.r
    }

    pub fn s(&self) -> &BigUint {
        &self.s
    }

    pub fn recovery_id(&self) -> u8 {
        self.recovery_id
    }

    /// Whether the recovered key should be compressed.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// `27 + recovery_id`, plus 4 for a compressed key.
    pub fn flag(&self) -> u8 {
        let compressed = if self.compressed { COMPACT_FLAG_COMPRESSED } else { 0 };
        COMPACT_FLAG_BASE + self.recovery_id + compressed
    }

    /// The plain `(r, s)` pair.
    pub fn signature(&self) -> Signature {
        Signature::new(self.r.clone(), self.s.clone())
    }

    /// Fails when `r` or `s` does not fit in 32 bytes.
    pub fn to_bytes(&self) -> Result<[u8; 65], EcError> {
        CompactSignatureSerializer::serialize(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EcError> {
        CompactSignatureSerializer::parse(bytes)
    }
}

/// Unchecked wire form; deserialization goes through [`CompactSignature::new`].
#[derive(Serialize, Deserialize)]
struct CompactSignatureRepr {
    r: BigUint,
    s: BigUint,
    recovery_id: u8,
    compressed: bool,
}

impl TryFrom<CompactSignatureRepr> for CompactSignature {
    type Error = EcError;

    fn try_from(repr: CompactSignatureRepr) -> Result<Self, Self::Error> {
        CompactSignature::new(repr.r, repr.s, repr.recovery_id, repr.compressed)
    }
}

impl From<CompactSignature> for Signature {
    fn from(sig: CompactSignature) -> Self {
        Signature::new(sig.r, sig.s)
    }
}

/// A Schnorr signature: the x-coordinate of the nonce point and a scalar.
///
/// `r` only has to be a field element; it is never decoded as a point.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchnorrSignature {
    pub r: BigUint,
    pub s: BigUint,
}

impl SchnorrSignature {
    pub fn new(r: BigUint, s: BigUint) -> Self {
        SchnorrSignature { r, s }
    }

    /// Fails when `r` or `s` does not fit in 32 bytes.
    pub fn to_bytes(&self) -> Result<[u8; 64], EcError> {
        SchnorrSignatureSerializer::serialize(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EcError> {
        SchnorrSignatureSerializer::parse(bytes)
    }
}

/// Right-aligned 32-byte big-endian encoding of a value that may be too wide.
pub(crate) fn checked_bytes32(value: &BigUint) -> Result<[u8; 32], EcError> {
    curve::to_fixed_bytes::<32>(value).ok_or(EcError::ElementTooLarge)
}

/// Right-aligned 32-byte big-endian encoding of a value already reduced below
/// a modulus of at most 256 bits.
pub(crate) fn to_bytes32(value: &BigUint) -> [u8; 32] {
    debug_assert!(value.bits() <= 256, "value wider than 256 bits");
    let bytes = value.to_bytes_be();
    let tail = &bytes[bytes.len().saturating_sub(32)..];
    let mut out = [0u8; 32];
    out[32 - tail.len()..].copy_from_slice(tail);
    out
}
