use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::Curve;

/// Affine point on the elliptic curve.
/// Represents a point in affine coordinates (x, y) or the point at infinity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Affine {
    /// The x-coordinate, reduced modulo `p`.
    pub x: BigUint,
    /// The y-coordinate, reduced modulo `p`.
    pub y: BigUint,
    /// Whether this point is the point at infinity (identity element)
    pub infinity: bool,
}

impl Affine {
    /// Create a new affine point. The coordinates are not checked.
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Affine {
            x,
            y,
            infinity: false,
        }
    }

    /// The point at infinity (identity element)
    pub fn identity() -> Self {
        Affine {
            x: BigUint::zero(),
            y: BigUint::zero(),
            infinity: true,
        }
    }

    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.infinity
    }

    /// Whether `y` is odd. False for infinity.
    #[inline]
    pub fn is_y_odd(&self) -> bool {
        !self.infinity && self.y.bit(0)
    }

    /// Check if a point is on the curve: y^2 = x^3 + a*x + b.
    pub fn is_on_curve(&self, curve: &Curve) -> bool {
        if self.infinity {
            return true;
        }
        let f = curve.field();
        f.is_canonical(&self.x) && f.is_canonical(&self.y) && f.square(&self.y) == curve.rhs(&self.x)
    }

    /// Point doubling: 2*P.
    pub fn double(&self, curve: &Curve) -> Self {
        if self.infinity || self.y.is_zero() {
            return Self::identity();
        }
        let f = curve.field();

        // λ = (3x^2 + a) / (2y)
        let x2 = f.square(&self.x);
        let numerator = f.add(&f.add(&f.add(&x2, &x2), &x2), curve.a());
        let denominator = f.add(&self.y, &self.y);
        let lambda = match f.inverse(&denominator) {
            Some(inv) => f.mul(&numerator, &inv),
            None => return Self::identity(),
        };

        let x_r = f.sub(&f.sub(&f.square(&lambda), &self.x), &self.x);
        let y_r = f.sub(&f.mul(&lambda, &f.sub(&self.x, &x_r)), &self.y);
        Affine::new(x_r, y_r)
    }

    /// Point addition, handling the identity and the doubling case.
    pub fn add(&self, other: &Self, curve: &Curve) -> Self {
        if self.infinity {
            return other.clone();
        }
        if other.infinity {
            return self.clone();
        }
        if self.x == other.x {
            if self.y == other.y {
                return self.double(curve);
            }
            return Self::identity();
        }
        let f = curve.field();

        // λ = (y2 - y1) / (x2 - x1)
        let numerator = f.sub(&other.y, &self.y);
        let denominator = f.sub(&other.x, &self.x);
        let lambda = match f.inverse(&denominator) {
            Some(inv) => f.mul(&numerator, &inv),
            None => return Self::identity(),
        };

        let x_r = f.sub(&f.sub(&f.square(&lambda), &self.x), &other.x);
        let y_r = f.sub(&f.mul(&lambda, &f.sub(&self.x, &x_r)), &self.y);
        Affine::new(x_r, y_r)
    }

    pub fn negate(&self, curve: &Curve) -> Self {
        if self.infinity {
            return self.clone();
        }
        Affine::new(self.x.clone(), curve.field().neg(&self.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Group;

    fn curve() -> Curve {
        Curve::secp256k1()
    }

    fn small_multiple(curve: &Curve, k: u64) -> Affine {
        curve.mul_generator(&BigUint::from(k))
    }

    #[test]
    fn test_infinity() {
        let curve = curve();
        let inf = Affine::identity();
        assert!(inf.is_infinity());
        assert!(inf.is_on_curve(&curve));
        assert!(!inf.is_y_odd());
    }

    #[test]
    fn test_generator_on_curve() {
        let curve = curve();
        let g = curve.generator();
        assert!(g.is_on_curve(&curve), "Generator point is not on the curve");
        assert!(!g.is_infinity());
        assert!(!g.is_y_odd());
    }

    #[test]
    fn test_point_addition_with_infinity() {
        let curve = curve();
        let g = curve.generator().clone();
        let inf = Affine::identity();

        assert_eq!(g.add(&inf, &curve), g);
        assert_eq!(inf.add(&g, &curve), g);
        assert_eq!(inf.add(&inf, &curve), inf);
    }

    #[test]
    fn test_point_doubling() {
        let curve = curve();
        let g = curve.generator();
        let g2 = g.double(&curve);

        assert!(g2.is_on_curve(&curve), "Doubled point is not on the curve");
        assert_eq!(g.add(g, &curve), g2);
    }

    #[test]
    fn test_point_negation() {
        let curve = curve();
        let g = curve.generator();
        let neg_g = g.negate(&curve);

        assert!(neg_g.is_on_curve(&curve));
        assert!(neg_g.is_y_odd());
        assert_eq!(g.add(&neg_g, &curve), Affine::identity());
    }

    #[test]
    fn test_scalar_multiplication() {
        let curve = curve();
        let g = curve.generator();
        let result = small_multiple(&curve, 5);

        // 5*G = G + G + G + G + G
        let mut expected = g.clone();
        for _ in 0..4 {
            expected = expected.add(g, &curve);
        }
        assert_eq!(result, expected);
        assert!(result.is_on_curve(&curve));
    }

    #[test]
    fn test_scalar_mul_zero_and_order() {
        let curve = curve();
        assert_eq!(curve.mul_generator(&BigUint::zero()), Affine::identity());
        assert_eq!(curve.mul_generator(curve.n()), Affine::identity());
    }

    #[test]
    fn test_scalar_mul_one() {
        let curve = curve();
        assert_eq!(small_multiple(&curve, 1), *curve.generator());
    }

    #[test]
    fn test_associativity() {
        let curve = curve();
        let a = small_multiple(&curve, 3);
        let b = small_multiple(&curve, 5);
        let c = small_multiple(&curve, 11);

        assert_eq!(
            a.add(&b, &curve).add(&c, &curve),
            a.add(&b.add(&c, &curve), &curve)
        );
        assert_eq!(a.add(&b, &curve), small_multiple(&curve, 8));
    }

    #[test]
    fn test_group_properties() {
        let curve = curve();
        let g = curve.generator();

        let triple = g.add(g, &curve).add(g, &curve);
        assert_eq!(triple, curve.mul_u64(&g.into(), 3).to_affine(&curve));

        let h = small_multiple(&curve, 5);
        assert_eq!(h.add(&h.negate(&curve), &curve), Affine::identity());
    }
}
