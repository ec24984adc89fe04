//! Nonce sources for ECDSA signing.
//!
//! Signing without an explicit source uses [`Rfc6979`], which makes signatures
//! a pure function of `(key, message)`. Any [`NonceSource`] may be passed
//! instead; its output must be a scalar in `[1, n-1]` or signing fails with
//! [`EcError::InvalidNonce`](crate::EcError::InvalidNonce).

use hmac::{Hmac, Mac};
use num_bigint::BigUint;
use num_traits::Zero;
use rand::Rng;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::signatures::to_bytes32;

type HmacSha256 = Hmac<Sha256>;

/// Supplies 32-byte big-endian nonces to the signer.
pub trait NonceSource {
    fn next_nonce(&mut self) -> [u8; 32];
}

/// HMAC-SHA256 deterministic random bit generator (NIST SP 800-90A).
pub struct HmacDrbg {
    k: [u8; 32],
    v: [u8; 32],
}

impl HmacDrbg {
    pub fn new(entropy: &[u8], nonce: &[u8], personalization: &[u8]) -> Self {
        let mut drbg = HmacDrbg {
            k: [0x00; 32],
            v: [0x01; 32],
        };
        drbg.update(&[entropy, nonce, personalization]);
        drbg
    }

    /// Fill `out` with output bytes, then advance the state.
    pub fn generate(&mut self, out: &mut [u8]) {
        for chunk in out.chunks_mut(32) {
            self.v = hmac(&self.k, &[&self.v]);
            chunk.copy_from_slice(&self.v[..chunk.len()]);
        }
        self.update(&[]);
    }

    pub fn reseed(&mut self, entropy: &[u8], additional: &[u8]) {
        self.update(&[entropy, additional]);
    }

    fn update(&mut self, provided: &[&[u8]]) {
        let has_data = provided.iter().any(|p| !p.is_empty());

        self.k = hmac(&self.k, &Self::with_separator(&self.v, 0x00, provided));
        self.v = hmac(&self.k, &[&self.v]);

        if !has_data {
            return;
        }

        self.k = hmac(&self.k, &Self::with_separator(&self.v, 0x01, provided));
        self.v = hmac(&self.k, &[&self.v]);
    }

    fn with_separator<'a>(v: &'a [u8; 32], separator: u8, provided: &[&'a [u8]]) -> Vec<&'a [u8]> {
        let separator: &'static [u8] = match separator {
            0x00 => &[0x00],
            _ => &[0x01],
        };
        let mut parts: Vec<&[u8]> = Vec::with_capacity(provided.len() + 2);
        parts.push(v);
        parts.push(separator);
        parts.extend_from_slice(provided);
        parts
    }
}

impl Drop for HmacDrbg {
    fn drop(&mut self) {
        self.k.zeroize();
        self.v.zeroize();
    }
}

fn hmac(key: &[u8; 32], parts: &[&[u8]]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    for part in parts {
        mac.update(part);
    }
    mac.finalize().into_bytes().into()
}

/// Deterministic nonces per RFC 6979 with HMAC-SHA256.
pub struct Rfc6979 {
    drbg: HmacDrbg,
    order: BigUint,
}

impl Rfc6979 {
    /// Seed with `int2octets(secret) || bits2octets(message)` for a 256-bit `order`.
    pub fn new(secret: &[u8; 32], message: &[u8; 32], order: &BigUint) -> Self {
        let h = BigUint::from_bytes_be(message) % order;
        let mut h_bytes = to_bytes32(&h);
        let drbg = HmacDrbg::new(secret, &h_bytes, &[]);
        h_bytes.zeroize();
        Rfc6979 {
            drbg,
            order: order.clone(),
        }
    }
}

impl NonceSource for Rfc6979 {
    fn next_nonce(&mut self) -> [u8; 32] {
        loop {
            let mut candidate = [0u8; 32];
            self.drbg.generate(&mut candidate);
            let k = BigUint::from_bytes_be(&candidate);
            if !k.is_zero() && k < self.order {
                return candidate;
            }
        }
    }
}

/// Fresh random nonces from a caller-supplied RNG.
pub struct RandomNonce<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomNonce<R> {
    pub fn new(rng: R) -> Self {
        RandomNonce { rng }
    }
}

impl<R: Rng> NonceSource for RandomNonce<R> {
    fn next_nonce(&mut self) -> [u8; 32] {
        let mut nonce = [0u8; 32];
        self.rng.fill(&mut nonce[..]);
        nonce
    }
}

/// A single caller-chosen nonce, returned on every call.
pub struct FixedNonce(pub [u8; 32]);

impl NonceSource for FixedNonce {
    fn next_nonce(&mut self) -> [u8; 32] {
        self.0
    }
}

impl Drop for FixedNonce {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}
