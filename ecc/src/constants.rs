//! Sizes, prefixes and hash tags used by the key and signature encodings.

/// Size of a raw private key in bytes.
pub const SECRET_KEY_SIZE: usize = 32;

/// Size of a message hash accepted by sign, verify and recover.
pub const MESSAGE_SIZE: usize = 32;

/// Size of a compressed public key: prefix byte plus x-coordinate.
pub const COMPRESSED_PUBLIC_KEY_SIZE: usize = 33;

/// Size of an uncompressed (or hybrid) public key: prefix byte plus x and y.
pub const UNCOMPRESSED_PUBLIC_KEY_SIZE: usize = 65;

/// Size of an x-only public key.
pub const XONLY_PUBLIC_KEY_SIZE: usize = 32;

/// Size of a compact recoverable signature: flag byte, `r` and `s`.
pub const COMPACT_SIGNATURE_SIZE: usize = 65;

/// Size of a raw Schnorr signature: `r` then `s`.
pub const SCHNORR_SIGNATURE_SIZE: usize = 64;

pub const KEY_COMPRESSED_EVEN: u8 = 0x02;
pub const KEY_COMPRESSED_ODD: u8 = 0x03;
pub const KEY_UNCOMPRESSED: u8 = 0x04;
pub const KEY_HYBRID_EVEN: u8 = 0x06;
pub const KEY_HYBRID_ODD: u8 = 0x07;

/// Lowest compact signature flag byte.
pub const COMPACT_FLAG_BASE: u8 = 27;

/// Added to the compact flag when the signer's key is compressed.
pub const COMPACT_FLAG_COMPRESSED: u8 = 4;

pub(crate) const SCHNORR_NONCE_TAG: &str = "BIPSchnorrDerive";
pub(crate) const SCHNORR_CHALLENGE_TAG: &str = "BIPSchnorr";
pub(crate) const TAP_TWEAK_TAG: &str = "TapTweak";
