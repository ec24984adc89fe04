//! Software backend on top of the `curve` crate's big-integer arithmetic.

mod ecdsa;
mod schnorr;

use std::sync::Arc;

use curve::{Affine, Curve};
use num_bigint::BigUint;
use tracing::debug;

use crate::adapter::EcAdapter;
use crate::errors::EcError;
use crate::keys::{PrivateKey, PublicKey, XOnlyPublicKey};
use crate::nonce::NonceSource;
use crate::signatures::{CompactSignature, SchnorrSignature, Signature, to_bytes32};

const MAX_CURVE_BITS: u64 = 256;

/// Backend that performs all point arithmetic in software.
///
/// Works with any curve descriptor whose field prime and group order fit in
/// 256 bits, since keys, tweaks and nonces are 32-byte values.
#[derive(Clone, Debug)]
pub struct PortableAdapter {
    curve: Arc<Curve>,
}

impl PortableAdapter {
    pub fn new(curve: Arc<Curve>) -> Result<Self, EcError> {
        if curve.p().bits() > MAX_CURVE_BITS || curve.n().bits() > MAX_CURVE_BITS {
            return Err(EcError::UnsupportedCurve);
        }
        debug!(backend = "portable", secp256k1 = curve.is_secp256k1(), "ec adapter created");
        Ok(PortableAdapter { curve })
    }

    /// Tweak as an integer, rejected when not below the group order.
    fn tweak_scalar(&self, tweak: &[u8; 32]) -> Result<BigUint, EcError> {
        let t = BigUint::from_bytes_be(tweak);
        if &t >= self.curve.n() {
            return Err(EcError::InvalidTweak);
        }
        Ok(t)
    }

    fn nonzero_point(point: Affine) -> Result<Affine, EcError> {
        if point.is_infinity() {
            return Err(EcError::PointAtInfinity);
        }
        Ok(point)
    }
}

impl EcAdapter for PortableAdapter {
    fn curve(&self) -> &Curve {
        &self.curve
    }

    fn derive_public_point(&self, secret: &[u8; 32]) -> Affine {
        self.curve.mul_generator(&BigUint::from_bytes_be(secret))
    }

    fn decode_point(&self, encoded: &[u8]) -> Result<Affine, EcError> {
        let size = self.curve.field_size();
        match encoded.first() {
            Some(0x02 | 0x03) if encoded.len() == 1 + size => {
                let x = BigUint::from_bytes_be(&encoded[1..]);
                let y = self
                    .curve
                    .recover_y(&x, encoded[0] == 0x03)
                    .map_err(|_| EcError::InvalidPublicKey("x-coordinate is not on the curve"))?;
                Ok(Affine::new(x, y))
            }
            Some(0x04) if encoded.len() == 1 + 2 * size => {
                let x = BigUint::from_bytes_be(&encoded[1..1 + size]);
                let y = BigUint::from_bytes_be(&encoded[1 + size..]);
                self.curve
                    .point(x, y)
                    .map_err(|_| EcError::InvalidPublicKey("point is not on the curve"))
            }
            _ => Err(EcError::InvalidPublicKey("malformed point encoding")),
        }
    }

    fn lift_x(&self, x: &BigUint) -> Result<Affine, EcError> {
        Ok(self.curve.lift_x(x)?)
    }

    fn has_square_y(&self, point: &Affine) -> bool {
        self.curve.has_square_y(point)
    }

    fn secret_tweak_add(&self, secret: &[u8; 32], tweak: &[u8; 32]) -> Result<[u8; 32], EcError> {
        let t = self.tweak_scalar(tweak)?;
        let d = BigUint::from_bytes_be(secret);
        Ok(to_bytes32(&self.curve.order().add(&d, &t)))
    }

    fn secret_tweak_mul(&self, secret: &[u8; 32], tweak: &[u8; 32]) -> Result<[u8; 32], EcError> {
        let t = self.tweak_scalar(tweak)?;
        let d = BigUint::from_bytes_be(secret);
        Ok(to_bytes32(&self.curve.order().mul(&d, &t)))
    }

    fn point_tweak_add(&self, point: &Affine, tweak: &[u8; 32]) -> Result<Affine, EcError> {
        let t = self.tweak_scalar(tweak)?;
        let offset = self.curve.mul_generator(&t);
        Self::nonzero_point(self.curve.add(point, &offset))
    }

    fn point_tweak_mul(&self, point: &Affine, tweak: &[u8; 32]) -> Result<Affine, EcError> {
        let t = self.tweak_scalar(tweak)?;
        Self::nonzero_point(self.curve.mul(point, &t))
    }

    fn sign(
        &self,
        msg: &[u8; 32],
        key: &PrivateKey<Self>,
        nonce: Option<&mut dyn NonceSource>,
    ) -> Result<Signature, EcError> {
        ecdsa::sign(self, msg, key, nonce)
    }

    fn verify(&self, msg: &[u8; 32], key: &PublicKey<Self>, signature: &Signature) -> bool {
        ecdsa::verify(self, msg, key.point(), signature)
    }

    fn recover(&self, msg: &[u8; 32], signature: &CompactSignature) -> Result<PublicKey<Self>, EcError> {
        ecdsa::recover(self, msg, signature)
    }

    fn sign_schnorr(&self, msg: &[u8; 32], key: &PrivateKey<Self>) -> Result<SchnorrSignature, EcError> {
        schnorr::sign(&self.curve, msg, key)
    }

    fn verify_schnorr(&self, msg: &[u8; 32], key: &XOnlyPublicKey<Self>, signature: &SchnorrSignature) -> bool {
        schnorr::verify(&self.curve, msg, key.point(), signature)
    }
}
