//! Conversions between the crate's value types and `k256` handles.

use curve::Affine;
use k256::elliptic_curve::bigint::U256;
use k256::elliptic_curve::group::ff::PrimeField;
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::{AffinePoint, EncodedPoint, FieldBytes, FieldElement, Scalar};
use num_bigint::BigUint;

use crate::signatures::to_bytes32;

/// Strict parse: `None` unless the bytes encode a value below the order.
pub(super) fn scalar_from_bytes(bytes: &[u8; 32]) -> Option<Scalar> {
    Option::from(Scalar::from_repr(FieldBytes::from(*bytes)))
}

pub(super) fn nonzero_scalar(bytes: &[u8; 32]) -> Option<Scalar> {
    scalar_from_bytes(bytes).filter(|s| !bool::from(s.is_zero()))
}

pub(super) fn scalar_from_int(value: &BigUint) -> Option<Scalar> {
    if value.bits() > 256 {
        return None;
    }
    scalar_from_bytes(&to_bytes32(value))
}

/// Interpret 32 bytes as an integer and reduce it modulo the order.
pub(super) fn reduce_bytes(bytes: &[u8; 32]) -> Scalar {
    <Scalar as Reduce<U256>>::reduce_bytes(&FieldBytes::from(*bytes))
}

pub(super) fn scalar_to_int(scalar: &Scalar) -> BigUint {
    BigUint::from_bytes_be(&scalar.to_bytes())
}

/// `None` for infinity or a point that is not on secp256k1.
pub(super) fn to_native(point: &Affine) -> Option<AffinePoint> {
    if point.is_infinity() || point.x.bits() > 256 || point.y.bits() > 256 {
        return None;
    }
    let x = FieldBytes::from(to_bytes32(&point.x));
    let y = FieldBytes::from(to_bytes32(&point.y));
    let encoded = EncodedPoint::from_affine_coordinates(&x, &y, false);
    Option::from(AffinePoint::from_encoded_point(&encoded))
}

pub(super) fn from_native(point: &AffinePoint) -> Affine {
    let encoded = point.to_encoded_point(false);
    match (encoded.x(), encoded.y()) {
        (Some(x), Some(y)) => Affine::new(BigUint::from_bytes_be(x), BigUint::from_bytes_be(y)),
        _ => Affine::identity(),
    }
}

/// Decode SEC1 bytes; the identity encoding is rejected.
pub(super) fn decode(encoded: &[u8]) -> Option<AffinePoint> {
    let encoded = EncodedPoint::from_bytes(encoded).ok()?;
    if encoded.is_identity() {
        return None;
    }
    Option::from(AffinePoint::from_encoded_point(&encoded))
}

pub(super) fn has_square_y(point: &AffinePoint) -> bool {
    let encoded = point.to_encoded_point(false);
    let Some(y) = encoded.y() else {
        return false;
    };
    let y: Option<FieldElement> = FieldElement::from_bytes(y).into();
    y.is_some_and(|y| y.sqrt().is_some().into())
}
