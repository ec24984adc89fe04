use curve::Affine;
use num_bigint::BigUint;
use num_traits::Zero;

use super::PortableAdapter;
use crate::adapter::EcAdapter;
use crate::errors::EcError;
use crate::keys::{PrivateKey, PublicKey};
use crate::nonce::{NonceSource, Rfc6979};
use crate::signatures::{CompactSignature, Signature};

pub(super) fn sign(
    adapter: &PortableAdapter,
    msg: &[u8; 32],
    key: &PrivateKey<PortableAdapter>,
    nonce: Option<&mut dyn NonceSource>,
) -> Result<Signature, EcError> {
    let curve = adapter.curve();
    let order = curve.order();
    let n = curve.n();

    let k_bytes = match nonce {
        Some(source) => source.next_nonce(),
        None => Rfc6979::new(key.secret_bytes(), msg, n).next_nonce(),
    };
    let k = BigUint::from_bytes_be(&k_bytes);
    if k.is_zero() || &k >= n {
        return Err(EcError::InvalidNonce);
    }

    let z = order.reduce_bytes(msg);
    let d = key.scalar();

    let big_r = curve.mul_generator(&k);
    let r = order.reduce(&big_r.x);
    if r.is_zero() {
        return Err(EcError::ZeroSignatureElement);
    }

    let k_inv = order.inverse(&k).ok_or(EcError::InvalidNonce)?;
    let mut s = order.mul(&k_inv, &order.add(&z, &order.mul(&r, &d)));
    if s.is_zero() {
        return Err(EcError::ZeroSignatureElement);
    }
    if !adapter.validate_signature_element(&s, true) {
        s = order.neg(&s);
    }

    Ok(Signature::new(r, s))
}

pub(super) fn verify(adapter: &PortableAdapter, msg: &[u8; 32], point: &Affine, signature: &Signature) -> bool {
    if !adapter.validate_signature_element(&signature.r, false)
        || !adapter.validate_signature_element(&signature.s, false)
        || point.is_infinity()
    {
        return false;
    }
    let curve = adapter.curve();
    let order = curve.order();

    let z = order.reduce_bytes(msg);
    let Some(c) = order.inverse(&signature.s) else {
        return false;
    };
    let u1 = order.mul(&z, &c);
    let u2 = order.mul(&signature.r, &c);

    let candidate = curve.double_scalar_mul_basepoint(&u1, &u2, point);
    !candidate.is_infinity() && order.reduce(&candidate.x) == signature.r
}

pub(super) fn recover(
    adapter: &PortableAdapter,
    msg: &[u8; 32],
    signature: &CompactSignature,
) -> Result<PublicKey<PortableAdapter>, EcError> {
    let r = signature.r();
    let s = signature.s();
    if !adapter.validate_signature_element(r, false) || !adapter.validate_signature_element(s, false) {
        return Err(EcError::RecoveryFailed);
    }

    let curve = adapter.curve();
    let order = curve.order();
    let recovery_id = signature.recovery_id();
    let is_y_odd = recovery_id & 1 != 0;
    let is_second_key = recovery_id & 2 != 0;

    let x = if is_second_key { r + curve.n() } else { r.clone() };
    let y = curve.recover_y(&x, is_y_odd).map_err(|_| EcError::RecoveryFailed)?;
    let big_r = Affine::new(x, y);

    // Q = r^-1 (sR - zG)
    let r_inv = order.inverse(r).ok_or(EcError::RecoveryFailed)?;
    let minus_z = order.neg(&order.reduce_bytes(msg));
    let a = order.mul(&r_inv, &minus_z);
    let b = order.mul(&r_inv, s);
    let q = curve.double_scalar_mul_basepoint(&a, &b, &big_r);

    let key = adapter
        .public_key(q, signature.is_compressed())
        .map_err(|_| EcError::RecoveryFailed)?;
    if !adapter.verify(msg, &key, &signature.signature()) {
        return Err(EcError::RecoveryFailed);
    }
    Ok(key)
}
