//! The backend abstraction.
//!
//! [`EcAdapter`] is the single entry point for key construction, signing,
//! verification and recovery. A backend implements the arithmetic-heavy
//! required methods; validation, parsing and recovery-id search are shared as
//! provided methods so every backend enforces the same rules.

use core::fmt;

use curve::{Affine, Curve, RandomScalar};
use num_bigint::BigUint;
use num_traits::Zero;
use rand::Rng;
use tracing::trace;
use zeroize::Zeroizing;

use crate::constants::{SECRET_KEY_SIZE, XONLY_PUBLIC_KEY_SIZE};
use crate::errors::EcError;
use crate::keys::{PrivateKey, PublicKey, XOnlyPublicKey};
use crate::nonce::NonceSource;
use crate::serializer::PublicKeySerializer;
use crate::signatures::{CompactSignature, SchnorrSignature, Signature, to_bytes32};

/// Elliptic-curve operations over one curve context.
///
/// Implementations are cheap to clone and share their context, so keys can
/// carry the adapter that created them.
pub trait EcAdapter: Clone + fmt::Debug + Send + Sync + Sized {
    /// The curve parameters this adapter was constructed with.
    fn curve(&self) -> &Curve;

    /// `d * G` for a secret already known to be in `[1, n-1]`.
    fn derive_public_point(&self, secret: &[u8; 32]) -> Affine;

    /// Decode a SEC1 point (`0x02`/`0x03` compressed or `0x04` uncompressed).
    fn decode_point(&self, encoded: &[u8]) -> Result<Affine, EcError>;

    /// The point with x-coordinate `x` and a square `y`.
    fn lift_x(&self, x: &BigUint) -> Result<Affine, EcError>;

    fn has_square_y(&self, point: &Affine) -> bool;

    fn secret_tweak_add(&self, secret: &[u8; 32], tweak: &[u8; 32]) -> Result<[u8; 32], EcError>;

    fn secret_tweak_mul(&self, secret: &[u8; 32], tweak: &[u8; 32]) -> Result<[u8; 32], EcError>;

    fn point_tweak_add(&self, point: &Affine, tweak: &[u8; 32]) -> Result<Affine, EcError>;

    fn point_tweak_mul(&self, point: &Affine, tweak: &[u8; 32]) -> Result<Affine, EcError>;

    /// ECDSA with low-S normalization. RFC 6979 nonces unless `nonce` is given.
    fn sign(
        &self,
        msg: &[u8; 32],
        key: &PrivateKey<Self>,
        nonce: Option<&mut dyn NonceSource>,
    ) -> Result<Signature, EcError>;

    fn verify(&self, msg: &[u8; 32], key: &PublicKey<Self>, signature: &Signature) -> bool;

    /// Reconstruct the signer's key. The candidate must verify the signature.
    fn recover(&self, msg: &[u8; 32], signature: &CompactSignature) -> Result<PublicKey<Self>, EcError>;

    fn sign_schnorr(&self, msg: &[u8; 32], key: &PrivateKey<Self>) -> Result<SchnorrSignature, EcError>;

    fn verify_schnorr(&self, msg: &[u8; 32], key: &XOnlyPublicKey<Self>, signature: &SchnorrSignature) -> bool;

    /// The group order `n`.
    fn order(&self) -> &BigUint {
        self.curve().n()
    }

    /// True for exactly 32 bytes encoding a value in `[1, n-1]`.
    fn validate_private_key(&self, secret: &[u8]) -> bool {
        if secret.len() != SECRET_KEY_SIZE {
            return false;
        }
        let value = BigUint::from_bytes_be(secret);
        !value.is_zero() && &value < self.order()
    }

    /// True when `element` is in `[1, n-1]`, or in `[1, n/2]` when `half` is set.
    fn validate_signature_element(&self, element: &BigUint, half: bool) -> bool {
        if element.is_zero() {
            return false;
        }
        if half {
            element <= self.curve().half_order()
        } else {
            element < self.order()
        }
    }

    fn private_key(&self, secret: &[u8], compressed: bool) -> Result<PrivateKey<Self>, EcError> {
        if !self.validate_private_key(secret) {
            return Err(EcError::InvalidPrivateKey);
        }
        let mut bytes = Zeroizing::new([0u8; 32]);
        bytes.copy_from_slice(secret);
        Ok(PrivateKey::from_validated(self.clone(), bytes, compressed))
    }

    fn private_key_from_scalar(&self, scalar: &BigUint, compressed: bool) -> Result<PrivateKey<Self>, EcError> {
        if scalar.bits() > 256 {
            return Err(EcError::InvalidPrivateKey);
        }
        let bytes = Zeroizing::new(to_bytes32(scalar));
        self.private_key(&bytes[..], compressed)
    }

    fn random_private_key<R: Rng + ?Sized>(&self, rng: &mut R, compressed: bool) -> PrivateKey<Self> {
        loop {
            let scalar = self.curve().random_scalar(rng);
            if let Ok(key) = self.private_key_from_scalar(&scalar, compressed) {
                return key;
            }
        }
    }

    /// Wrap a point as a public key. Rejects infinity and off-curve points.
    fn public_key(&self, point: Affine, compressed: bool) -> Result<PublicKey<Self>, EcError> {
        if point.is_infinity() {
            return Err(EcError::PointAtInfinity);
        }
        if !self.curve().is_on_curve(&point) {
            return Err(EcError::InvalidPublicKey("point is not on the curve"));
        }
        Ok(PublicKey::from_parts(self.clone(), point, compressed, None))
    }

    /// Parse a 33-byte compressed or 65-byte uncompressed/hybrid key.
    fn public_key_from_buffer(&self, bytes: &[u8]) -> Result<PublicKey<Self>, EcError> {
        PublicKeySerializer::new(self.clone()).parse(bytes)
    }

    fn xonly_public_key_from_buffer(&self, bytes: &[u8]) -> Result<XOnlyPublicKey<Self>, EcError> {
        if bytes.len() != XONLY_PUBLIC_KEY_SIZE {
            return Err(EcError::InvalidLength {
                expected: XONLY_PUBLIC_KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let x = BigUint::from_bytes_be(bytes);
        let point = self
            .lift_x(&x)
            .map_err(|_| EcError::InvalidPublicKey("x-coordinate is not on the curve"))?;
        Ok(XOnlyPublicKey::from_parts(self.clone(), point, true))
    }

    fn sign_compact(
        &self,
        msg: &[u8; 32],
        key: &PrivateKey<Self>,
        nonce: Option<&mut dyn NonceSource>,
    ) -> Result<CompactSignature, EcError> {
        let signature = self.sign(msg, key, nonce)?;
        let recovery_id = self.calc_pub_key_recovery_param(msg, &signature, key.public_key())?;
        CompactSignature::new(signature.r, signature.s, recovery_id, key.is_compressed())
    }

    /// Find the recovery id that reproduces `key`, trying `0..4` in order.
    fn calc_pub_key_recovery_param(
        &self,
        msg: &[u8; 32],
        signature: &Signature,
        key: &PublicKey<Self>,
    ) -> Result<u8, EcError> {
        for recovery_id in 0..4u8 {
            let candidate = CompactSignature::new(
                signature.r.clone(),
                signature.s.clone(),
                recovery_id,
                key.is_compressed(),
            )?;
            match self.recover(msg, &candidate) {
                Ok(recovered) if recovered.point() == key.point() => return Ok(recovery_id),
                _ => trace!(recovery_id, "recovery id candidate does not match"),
            }
        }
        Err(EcError::RecoveryParamNotFound)
    }
}
