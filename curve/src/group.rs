use num_bigint::BigUint;

use crate::{Curve, Projective};

/// Group law over a curve's points, with scalar multiplication built on top.
///
/// The curve parameters live in `self`, so points are plain data.
pub trait Group {
    type Point: Clone;

    fn identity(&self) -> Self::Point;
    fn is_identity(&self, point: &Self::Point) -> bool;
    fn generator_point(&self) -> Self::Point;
    fn add_points(&self, lhs: &Self::Point, rhs: &Self::Point) -> Self::Point;
    fn double_point(&self, point: &Self::Point) -> Self::Point;
    fn negate_point(&self, point: &Self::Point) -> Self::Point;

    /// Number of ladder steps for a scalar multiplication.
    fn scalar_bits(&self) -> u64;

    /// Montgomery ladder: one add and one double per bit, for a fixed bit count.
    fn scalar_mul(&self, point: &Self::Point, scalar: &BigUint) -> Self::Point {
        let bits = self.scalar_bits().max(scalar.bits());
        let mut r0 = self.identity();
        let mut r1 = point.clone();

        for i in (0..bits).rev() {
            if scalar.bit(i) {
                r0 = self.add_points(&r0, &r1);
                r1 = self.double_point(&r1);
            } else {
                r1 = self.add_points(&r0, &r1);
                r0 = self.double_point(&r0);
            }
        }

        r0
    }

    fn mul_u64(&self, point: &Self::Point, n: u64) -> Self::Point {
        if n == 0 {
            return self.identity();
        }
        if n == 1 {
            return point.clone();
        }

        let mut result = self.identity();
        let mut temp = point.clone();
        let mut bits = n;

        while bits > 0 {
            if bits & 1 == 1 {
                result = self.add_points(&result, &temp);
            }
            temp = self.double_point(&temp);
            bits >>= 1;
        }

        result
    }
}

impl Group for Curve {
    type Point = Projective;

    #[inline]
    fn identity(&self) -> Projective {
        Projective::identity()
    }

    #[inline]
    fn is_identity(&self, point: &Projective) -> bool {
        point.is_infinity()
    }

    #[inline]
    fn generator_point(&self) -> Projective {
        Projective::from_affine(self.generator())
    }

    #[inline]
    fn add_points(&self, lhs: &Projective, rhs: &Projective) -> Projective {
        lhs.add(rhs, self)
    }

    #[inline]
    fn double_point(&self, point: &Projective) -> Projective {
        point.double(self)
    }

    #[inline]
    fn negate_point(&self, point: &Projective) -> Projective {
        point.negate(self)
    }

    #[inline]
    fn scalar_bits(&self) -> u64 {
        self.order().bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Affine;

    #[test]
    fn test_ladder_matches_repeated_addition() {
        let curve = Curve::secp256k1();
        let g = curve.generator_point();
        for n in [0u64, 1, 2, 3, 7, 42, 1000] {
            let ladder = curve.scalar_mul(&g, &BigUint::from(n));
            let naive = curve.mul_u64(&g, n);
            assert_eq!(
                ladder.to_affine(&curve),
                naive.to_affine(&curve),
                "n = {n}"
            );
        }
    }

    #[test]
    fn test_identity() {
        let curve = Curve::secp256k1();
        let id = curve.identity();
        assert!(curve.is_identity(&id));
        assert_eq!(id.to_affine(&curve), Affine::identity());

        let g = curve.generator_point();
        assert_eq!(curve.add_points(&g, &id), g);
        assert_eq!(curve.add_points(&id, &g), g);
        assert!(curve.is_identity(&curve.add_points(&g, &curve.negate_point(&g))));
    }
}
