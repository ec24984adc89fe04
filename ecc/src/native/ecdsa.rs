use curve::Affine;
use k256::elliptic_curve::point::AffineCoordinates;
use k256::elliptic_curve::scalar::IsHigh;
use k256::{ProjectivePoint, Scalar};

use super::NativeAdapter;
use super::convert::{
    decode, from_native, nonzero_scalar, reduce_bytes, scalar_from_bytes, scalar_from_int, scalar_to_int, to_native,
};
use crate::adapter::EcAdapter;
use crate::errors::EcError;
use crate::keys::{PrivateKey, PublicKey};
use crate::nonce::{NonceSource, Rfc6979};
use crate::signatures::{CompactSignature, Signature, to_bytes32};

/// Sign and report the recovery id of the nonce point.
///
/// Bit 0 of the id is the parity of `R.y`, bit 1 is set when `R.x` overflowed
/// the order. Negating `s` for low-S flips the parity bit.
pub(super) fn sign(
    adapter: &NativeAdapter,
    msg: &[u8; 32],
    key: &PrivateKey<NativeAdapter>,
    nonce: Option<&mut dyn NonceSource>,
) -> Result<(Signature, u8), EcError> {
    let d = nonzero_scalar(key.secret_bytes()).ok_or(EcError::InvalidPrivateKey)?;

    let k_bytes = match nonce {
        Some(source) => source.next_nonce(),
        None => Rfc6979::new(key.secret_bytes(), msg, adapter.order()).next_nonce(),
    };
    let k = nonzero_scalar(&k_bytes).ok_or(EcError::InvalidNonce)?;
    let z = reduce_bytes(msg);

    let big_r = (ProjectivePoint::GENERATOR * k).to_affine();
    let r_x: [u8; 32] = big_r.x().into();
    let r = reduce_bytes(&r_x);
    if bool::from(r.is_zero()) {
        return Err(EcError::ZeroSignatureElement);
    }

    let k_inv = Option::<Scalar>::from(k.invert()).ok_or(EcError::InvalidNonce)?;
    let mut s = k_inv * (z + r * d);
    if bool::from(s.is_zero()) {
        return Err(EcError::ZeroSignatureElement);
    }

    let mut recovery_id = u8::from(bool::from(big_r.y_is_odd()));
    if scalar_from_bytes(&r_x).is_none() {
        recovery_id |= 2;
    }
    if bool::from(s.is_high()) {
        s = -s;
        recovery_id ^= 1;
    }

    Ok((Signature::new(scalar_to_int(&r), scalar_to_int(&s)), recovery_id))
}

pub(super) fn verify(msg: &[u8; 32], point: &Affine, signature: &Signature) -> bool {
    let (Some(r), Some(s)) = (scalar_from_int(&signature.r), scalar_from_int(&signature.s)) else {
        return false;
    };
    if bool::from(r.is_zero() | s.is_zero()) {
        return false;
    }
    let Some(q) = to_native(point) else {
        return false;
    };
    let Some(c) = Option::<Scalar>::from(s.invert()) else {
        return false;
    };

    let z = reduce_bytes(msg);
    let candidate = ProjectivePoint::GENERATOR * (z * c) + ProjectivePoint::from(q) * (r * c);
    if candidate == ProjectivePoint::IDENTITY {
        return false;
    }
    let x: [u8; 32] = candidate.to_affine().x().into();
    reduce_bytes(&x) == r
}

pub(super) fn recover(
    adapter: &NativeAdapter,
    msg: &[u8; 32],
    signature: &CompactSignature,
) -> Result<PublicKey<NativeAdapter>, EcError> {
    let r = scalar_from_int(signature.r())
        .filter(|r| !bool::from(r.is_zero()))
        .ok_or(EcError::RecoveryFailed)?;
    let s = scalar_from_int(signature.s())
        .filter(|s| !bool::from(s.is_zero()))
        .ok_or(EcError::RecoveryFailed)?;

    let recovery_id = signature.recovery_id();
    let x = if recovery_id & 2 != 0 {
        signature.r() + adapter.order()
    } else {
        signature.r().clone()
    };
    if &x >= adapter.curve().p() {
        return Err(EcError::RecoveryFailed);
    }

    let mut encoded = [0u8; 33];
    encoded[0] = if recovery_id & 1 != 0 { 0x03 } else { 0x02 };
    encoded[1..].copy_from_slice(&to_bytes32(&x));
    let big_r = decode(&encoded).ok_or(EcError::RecoveryFailed)?;

    // Q = r^-1 (sR - zG)
    let r_inv = Option::<Scalar>::from(r.invert()).ok_or(EcError::RecoveryFailed)?;
    let z = reduce_bytes(msg);
    let q = (ProjectivePoint::from(big_r) * s - ProjectivePoint::GENERATOR * z) * r_inv;
    if q == ProjectivePoint::IDENTITY {
        return Err(EcError::RecoveryFailed);
    }

    let key = adapter
        .public_key(from_native(&q.to_affine()), signature.is_compressed())
        .map_err(|_| EcError::RecoveryFailed)?;
    if !verify(msg, key.point(), &signature.signature()) {
        return Err(EcError::RecoveryFailed);
    }
    Ok(key)
}
