use curve::{Affine, Curve};
use num_traits::Zero;
use subtle::ConstantTimeEq;

use super::PortableAdapter;
use crate::errors::EcError;
use crate::hash::{schnorr_challenge, schnorr_nonce};
use crate::keys::PrivateKey;
use crate::signatures::{SchnorrSignature, to_bytes32};

pub(super) fn sign(
    curve: &Curve,
    msg: &[u8; 32],
    key: &PrivateKey<PortableAdapter>,
) -> Result<SchnorrSignature, EcError> {
    let order = curve.order();
    let public = key.public_key().point();

    let d = if curve.has_square_y(public) {
        key.scalar()
    } else {
        order.neg(&key.scalar())
    };

    let k0 = order.reduce_bytes(&schnorr_nonce(&to_bytes32(&d), msg));
    if k0.is_zero() {
        return Err(EcError::InvalidNonce);
    }

    let big_r = curve.mul_generator(&k0);
    let k = if curve.has_square_y(&big_r) { k0 } else { order.neg(&k0) };

    let r_x = to_bytes32(&big_r.x);
    let e = order.reduce_bytes(&schnorr_challenge(&r_x, &to_bytes32(&public.x), msg));
    let s = order.add(&k, &order.mul(&e, &d));

    Ok(SchnorrSignature::new(big_r.x, s))
}

pub(super) fn verify(curve: &Curve, msg: &[u8; 32], public: &Affine, signature: &SchnorrSignature) -> bool {
    if &signature.r >= curve.p() || &signature.s >= curve.n() {
        return false;
    }
    if !curve.has_square_y(public) {
        return false;
    }
    let order = curve.order();

    let r_x = to_bytes32(&signature.r);
    let e = order.reduce_bytes(&schnorr_challenge(&r_x, &to_bytes32(&public.x), msg));

    // R = sG - eP
    let big_r = curve.double_scalar_mul_basepoint(&signature.s, &order.neg(&e), public);
    if big_r.is_infinity() || !curve.has_square_y(&big_r) {
        return false;
    }
    to_bytes32(&big_r.x)[..].ct_eq(&r_x[..]).into()
}
