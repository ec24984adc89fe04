use curve::{Affine, Curve};
use k256::ProjectivePoint;
use k256::elliptic_curve::point::AffineCoordinates;
use num_bigint::BigUint;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::NativeAdapter;
use super::convert::{has_square_y, nonzero_scalar, reduce_bytes, scalar_from_int, scalar_to_int, to_native};
use crate::errors::EcError;
use crate::hash::{schnorr_challenge, schnorr_nonce};
use crate::keys::PrivateKey;
use crate::signatures::{SchnorrSignature, to_bytes32};

pub(super) fn sign(msg: &[u8; 32], key: &PrivateKey<NativeAdapter>) -> Result<SchnorrSignature, EcError> {
    let d0 = nonzero_scalar(key.secret_bytes()).ok_or(EcError::InvalidPrivateKey)?;
    let public = (ProjectivePoint::GENERATOR * d0).to_affine();
    let d = if has_square_y(&public) { d0 } else { -d0 };

    let d_bytes: Zeroizing<[u8; 32]> = Zeroizing::new(d.to_bytes().into());
    let k0 = reduce_bytes(&schnorr_nonce(&d_bytes, msg));
    if bool::from(k0.is_zero()) {
        return Err(EcError::InvalidNonce);
    }

    let big_r = (ProjectivePoint::GENERATOR * k0).to_affine();
    let k = if has_square_y(&big_r) { k0 } else { -k0 };

    let r_x: [u8; 32] = big_r.x().into();
    let p_x: [u8; 32] = public.x().into();
    let e = reduce_bytes(&schnorr_challenge(&r_x, &p_x, msg));
    let s = k + e * d;

    Ok(SchnorrSignature::new(BigUint::from_bytes_be(&r_x), scalar_to_int(&s)))
}

pub(super) fn verify(curve: &Curve, msg: &[u8; 32], public: &Affine, signature: &SchnorrSignature) -> bool {
    if &signature.r >= curve.p() {
        return false;
    }
    let Some(s) = scalar_from_int(&signature.s) else {
        return false;
    };
    let Some(p) = to_native(public) else {
        return false;
    };
    if !has_square_y(&p) {
        return false;
    }

    let r_x = to_bytes32(&signature.r);
    let p_x: [u8; 32] = p.x().into();
    let e = reduce_bytes(&schnorr_challenge(&r_x, &p_x, msg));

    let big_r = ProjectivePoint::GENERATOR * s - ProjectivePoint::from(p) * e;
    if big_r == ProjectivePoint::IDENTITY {
        return false;
    }
    let big_r = big_r.to_affine();
    if !has_square_y(&big_r) {
        return false;
    }
    let x: [u8; 32] = big_r.x().into();
    x[..].ct_eq(&r_x[..]).into()
}
