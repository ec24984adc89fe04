use num_bigint::BigUint;

use crate::{Affine, Curve, Group, Projective};

/// Compute a * G + b * P with one shared doubling chain (Shamir's trick).
pub fn double_scalar_mul_basepoint(curve: &Curve, a: &BigUint, b: &BigUint, point: &Affine) -> Affine {
    let a = curve.order().reduce(a);
    let b = curve.order().reduce(b);

    let g = curve.generator_point();
    let p = Projective::from_affine(point);
    let g_plus_p = curve.add_points(&g, &p);

    let bits = a.bits().max(b.bits());
    let mut result = curve.identity();

    for i in (0..bits).rev() {
        result = curve.double_point(&result);
        match (a.bit(i), b.bit(i)) {
            (true, true) => result = curve.add_points(&result, &g_plus_p),
            (true, false) => result = curve.add_points(&result, &g),
            (false, true) => result = curve.add_points(&result, &p),
            (false, false) => {}
        }
    }

    result.to_affine(curve)
}

impl Curve {
    /// `a * G + b * P`.
    pub fn double_scalar_mul_basepoint(&self, a: &BigUint, b: &BigUint, point: &Affine) -> Affine {
        double_scalar_mul_basepoint(self, a, b, point)
    }
}
