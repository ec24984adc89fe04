//! Tagged SHA-256 and the Schnorr / Taproot hashes built on it.

use sha2::{Digest, Sha256};

use crate::constants::{SCHNORR_CHALLENGE_TAG, SCHNORR_NONCE_TAG, TAP_TWEAK_TAG};

/// `SHA256(SHA256(tag) || SHA256(tag) || parts...)`.
pub fn tagged_sha256(tag: &str, parts: &[&[u8]]) -> [u8; 32] {
    let tag_hash = Sha256::digest(tag.as_bytes());
    let mut hasher = Sha256::new();
    hasher.update(tag_hash);
    hasher.update(tag_hash);
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Tweak committing an internal x-only key to an optional script tree root.
pub fn taproot_tweak(internal_key: &[u8; 32], merkle_root: Option<&[u8; 32]>) -> [u8; 32] {
    match merkle_root {
        Some(root) => tagged_sha256(TAP_TWEAK_TAG, &[internal_key, root]),
        None => tagged_sha256(TAP_TWEAK_TAG, &[internal_key]),
    }
}

/// Deterministic Schnorr nonce preimage hash over the signing secret and message.
pub(crate) fn schnorr_nonce(secret: &[u8; 32], msg: &[u8; 32]) -> [u8; 32] {
    tagged_sha256(SCHNORR_NONCE_TAG, &[secret, msg])
}

/// Schnorr challenge over `R.x || P.x || msg`.
pub(crate) fn schnorr_challenge(r_x: &[u8; 32], p_x: &[u8; 32], msg: &[u8; 32]) -> [u8; 32] {
    tagged_sha256(SCHNORR_CHALLENGE_TAG, &[r_x, p_x, msg])
}
