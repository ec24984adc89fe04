use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::{Affine, Curve};

/// Point in Jacobian coordinates (X:Y:Z) where (x,y) = (X/Z^2, Y/Z^3).
/// The point at infinity is represented with Z = 0.
///
/// Formulas are the general-`a` Jacobian ones, so no field inversion happens
/// until [`Projective::to_affine`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projective {
    pub x: BigUint,
    pub y: BigUint,
    pub z: BigUint,
}

impl Projective {
    pub fn new(x: BigUint, y: BigUint, z: BigUint) -> Self {
        Projective { x, y, z }
    }

    /// The point at infinity: (1:1:0)
    pub fn identity() -> Self {
        Projective {
            x: BigUint::one(),
            y: BigUint::one(),
            z: BigUint::zero(),
        }
    }

    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    pub fn from_affine(point: &Affine) -> Self {
        if point.is_infinity() {
            return Self::identity();
        }
        Projective::new(point.x.clone(), point.y.clone(), BigUint::one())
    }

    pub fn to_affine(&self, curve: &Curve) -> Affine {
        if self.is_infinity() {
            return Affine::identity();
        }
        let f = curve.field();
        let z_inv = match f.inverse(&self.z) {
            Some(inv) => inv,
            None => return Affine::identity(),
        };
        let z_inv2 = f.square(&z_inv);
        let z_inv3 = f.mul(&z_inv2, &z_inv);
        Affine::new(f.mul(&self.x, &z_inv2), f.mul(&self.y, &z_inv3))
    }

    pub fn double(&self, curve: &Curve) -> Self {
        if self.is_infinity() || self.y.is_zero() {
            return Self::identity();
        }
        let f = curve.field();

        let y2 = f.square(&self.y);
        // S = 4*X*Y^2
        let s = f.mul(&f.mul(&BigUint::from(4u8), &self.x), &y2);
        // M = 3*X^2 + a*Z^4
        let x2 = f.square(&self.x);
        let mut m = f.add(&f.add(&x2, &x2), &x2);
        if !curve.a().is_zero() {
            let z4 = f.square(&f.square(&self.z));
            m = f.add(&m, &f.mul(curve.a(), &z4));
        }

        let x3 = f.sub(&f.square(&m), &f.add(&s, &s));
        let y4_8 = f.mul(&BigUint::from(8u8), &f.square(&y2));
        let y3 = f.sub(&f.mul(&m, &f.sub(&s, &x3)), &y4_8);
        let z3 = f.mul(&f.add(&self.y, &self.y), &self.z);

        Projective::new(x3, y3, z3)
    }

    pub fn add(&self, other: &Self, curve: &Curve) -> Self {
        if self.is_infinity() {
            return other.clone();
        }
        if other.is_infinity() {
            return self.clone();
        }
        let f = curve.field();

        let z1z1 = f.square(&self.z);
        let z2z2 = f.square(&other.z);
        let u1 = f.mul(&self.x, &z2z2);
        let u2 = f.mul(&other.x, &z1z1);
        let s1 = f.mul(&f.mul(&self.y, &other.z), &z2z2);
        let s2 = f.mul(&f.mul(&other.y, &self.z), &z1z1);

        if u1 == u2 {
            if s1 == s2 {
                return self.double(curve);
            }
            return Self::identity();
        }

        let h = f.sub(&u2, &u1);
        let r = f.sub(&s2, &s1);
        let h2 = f.square(&h);
        let h3 = f.mul(&h2, &h);
        let u1h2 = f.mul(&u1, &h2);

        let x3 = f.sub(&f.sub(&f.square(&r), &h3), &f.add(&u1h2, &u1h2));
        let y3 = f.sub(&f.mul(&r, &f.sub(&u1h2, &x3)), &f.mul(&s1, &h3));
        let z3 = f.mul(&f.mul(&h, &self.z), &other.z);

        Projective::new(x3, y3, z3)
    }

    /// Mixed addition with an affine point.
    pub fn add_affine(&self, other: &Affine, curve: &Curve) -> Self {
        self.add(&Projective::from_affine(other), curve)
    }

    pub fn negate(&self, curve: &Curve) -> Self {
        if self.is_infinity() {
            return self.clone();
        }
        Projective::new(self.x.clone(), curve.field().neg(&self.y), self.z.clone())
    }
}

impl From<&Affine> for Projective {
    fn from(point: &Affine) -> Self {
        Projective::from_affine(point)
    }
}

impl From<Affine> for Projective {
    fn from(point: Affine) -> Self {
        Projective::from_affine(&point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_affine() {
        let curve = Curve::secp256k1();
        let g = curve.generator();
        let p = Projective::from_affine(g);
        assert_eq!(p.to_affine(&curve), *g);
        assert_eq!(Projective::identity().to_affine(&curve), Affine::identity());
    }

    #[test]
    fn test_double_matches_affine() {
        let curve = Curve::secp256k1();
        let g = curve.generator();
        let p = Projective::from_affine(g).double(&curve);
        assert_eq!(p.to_affine(&curve), g.double(&curve));
    }

    #[test]
    fn test_add_matches_affine() {
        let curve = Curve::secp256k1();
        let g = curve.generator();
        let g2 = g.double(&curve);

        let p = Projective::from_affine(g).double(&curve);
        let sum = p.add_affine(g, &curve);
        assert_eq!(sum.to_affine(&curve), g2.add(g, &curve));

        // Same point in two different Jacobian representations takes the doubling branch.
        let q = Projective::from_affine(&g2);
        assert_eq!(p.add(&q, &curve).to_affine(&curve), g2.double(&curve));
    }

    #[test]
    fn test_add_inverse_is_identity() {
        let curve = Curve::secp256k1();
        let p = Projective::from_affine(curve.generator()).double(&curve);
        assert!(p.add(&p.negate(&curve), &curve).is_infinity());
    }
}
