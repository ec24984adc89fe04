//! Backend delegating point and scalar arithmetic to `k256`.

mod convert;
mod ecdsa;
mod schnorr;

use std::sync::Arc;

use curve::{Affine, Curve, CurveError};
use k256::{AffinePoint, ProjectivePoint, Scalar};
use num_bigint::BigUint;
use tracing::debug;

use crate::adapter::EcAdapter;
use crate::constants::SECRET_KEY_SIZE;
use crate::errors::EcError;
use crate::keys::{PrivateKey, PublicKey, XOnlyPublicKey};
use crate::nonce::NonceSource;
use crate::signatures::{CompactSignature, SchnorrSignature, Signature, to_bytes32};

use convert::{decode, from_native, nonzero_scalar, reduce_bytes, scalar_from_bytes, to_native};

/// Backend backed by the constant-time `k256` implementation of secp256k1.
///
/// Only secp256k1 is supported; the curve handle is shared by every key the
/// adapter creates and released when the last clone is dropped.
#[derive(Clone, Debug)]
pub struct NativeAdapter {
    curve: Arc<Curve>,
}

impl NativeAdapter {
    pub fn new(curve: Arc<Curve>) -> Result<Self, EcError> {
        if !curve.is_secp256k1() {
            return Err(EcError::UnsupportedCurve);
        }
        debug!(backend = "native", "ec adapter created");
        Ok(NativeAdapter { curve })
    }

    fn tweak_scalar(tweak: &[u8; 32]) -> Result<Scalar, EcError> {
        scalar_from_bytes(tweak).ok_or(EcError::InvalidTweak)
    }

    fn native_point(point: &Affine) -> Result<AffinePoint, EcError> {
        to_native(point).ok_or(EcError::InvalidPublicKey("point is not on the curve"))
    }

    fn nonzero_point(point: ProjectivePoint) -> Result<Affine, EcError> {
        if point == ProjectivePoint::IDENTITY {
            return Err(EcError::PointAtInfinity);
        }
        Ok(from_native(&point.to_affine()))
    }
}

impl EcAdapter for NativeAdapter {
    fn curve(&self) -> &Curve {
        &self.curve
    }

    fn derive_public_point(&self, secret: &[u8; 32]) -> Affine {
        from_native(&(ProjectivePoint::GENERATOR * reduce_bytes(secret)).to_affine())
    }

    fn decode_point(&self, encoded: &[u8]) -> Result<Affine, EcError> {
        if !matches!(encoded.first(), Some(0x02..=0x04)) {
            return Err(EcError::InvalidPublicKey("malformed point encoding"));
        }
        let point = decode(encoded).ok_or(EcError::InvalidPublicKey("point is not on the curve"))?;
        Ok(from_native(&point))
    }

    fn lift_x(&self, x: &BigUint) -> Result<Affine, EcError> {
        if x >= self.curve.p() {
            return Err(CurveError::CoordinateOutOfRange.into());
        }
        let mut encoded = [0x02u8; 33];
        encoded[1..].copy_from_slice(&to_bytes32(x));
        let point = decode(&encoded).ok_or(CurveError::NotOnCurve)?;
        let point = if convert::has_square_y(&point) {
            point
        } else {
            (-ProjectivePoint::from(point)).to_affine()
        };
        Ok(from_native(&point))
    }

    fn has_square_y(&self, point: &Affine) -> bool {
        to_native(point).is_some_and(|p| convert::has_square_y(&p))
    }

    fn secret_tweak_add(&self, secret: &[u8; 32], tweak: &[u8; 32]) -> Result<[u8; 32], EcError> {
        let t = Self::tweak_scalar(tweak)?;
        Ok((reduce_bytes(secret) + t).to_bytes().into())
    }

    fn secret_tweak_mul(&self, secret: &[u8; 32], tweak: &[u8; 32]) -> Result<[u8; 32], EcError> {
        let t = Self::tweak_scalar(tweak)?;
        Ok((reduce_bytes(secret) * t).to_bytes().into())
    }

    fn point_tweak_add(&self, point: &Affine, tweak: &[u8; 32]) -> Result<Affine, EcError> {
        let t = Self::tweak_scalar(tweak)?;
        let q = Self::native_point(point)?;
        Self::nonzero_point(ProjectivePoint::from(q) + ProjectivePoint::GENERATOR * t)
    }

    fn point_tweak_mul(&self, point: &Affine, tweak: &[u8; 32]) -> Result<Affine, EcError> {
        let t = Self::tweak_scalar(tweak)?;
        let q = Self::native_point(point)?;
        Self::nonzero_point(ProjectivePoint::from(q) * t)
    }

    /// Strict parse through `k256`; values at or above the order are rejected.
    fn validate_private_key(&self, secret: &[u8]) -> bool {
        let Ok(bytes) = <&[u8; SECRET_KEY_SIZE]>::try_from(secret) else {
            return false;
        };
        nonzero_scalar(bytes).is_some()
    }

    fn sign(
        &self,
        msg: &[u8; 32],
        key: &PrivateKey<Self>,
        nonce: Option<&mut dyn NonceSource>,
    ) -> Result<Signature, EcError> {
        ecdsa::sign(self, msg, key, nonce).map(|(signature, _)| signature)
    }

    /// The recovery id falls out of the nonce point directly, no search needed.
    fn sign_compact(
        &self,
        msg: &[u8; 32],
        key: &PrivateKey<Self>,
        nonce: Option<&mut dyn NonceSource>,
    ) -> Result<CompactSignature, EcError> {
        let (signature, recovery_id) = ecdsa::sign(self, msg, key, nonce)?;
        CompactSignature::new(signature.r, signature.s, recovery_id, key.is_compressed())
    }

    fn verify(&self, msg: &[u8; 32], key: &PublicKey<Self>, signature: &Signature) -> bool {
        ecdsa::verify(msg, key.point(), signature)
    }

    fn recover(&self, msg: &[u8; 32], signature: &CompactSignature) -> Result<PublicKey<Self>, EcError> {
        ecdsa::recover(self, msg, signature)
    }

    fn sign_schnorr(&self, msg: &[u8; 32], key: &PrivateKey<Self>) -> Result<SchnorrSignature, EcError> {
        schnorr::sign(msg, key)
    }

    fn verify_schnorr(&self, msg: &[u8; 32], key: &XOnlyPublicKey<Self>, signature: &SchnorrSignature) -> bool {
        schnorr::verify(&self.curve, msg, key.point(), signature)
    }
}
