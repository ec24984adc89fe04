//! Curve descriptor: `y^2 = x^3 + ax + b` over `GF(p)` with a generator of prime order `n`.
//!
//! A `Curve` is built once and shared (usually behind an `Arc`) by everything
//! that needs the parameters. It carries no mutable state.

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::{Affine, CurveError, Group, ModularArithmetic};

const FIELD_PRIME: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xfe, 0xff, 0xff, 0xfc, 0x2f,
];
const GROUP_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b,
    0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];
const GENERATOR_X: [u8; 32] = [
    0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac,
    0x55, 0xa0, 0x62, 0x95, 0xce, 0x87, 0x0b, 0x07,
    0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9,
    0x59, 0xf2, 0x81, 0x5b, 0x16, 0xf8, 0x17, 0x98,
];
const GENERATOR_Y: [u8; 32] = [
    0x48, 0x3a, 0xda, 0x77, 0x26, 0xa3, 0xc4, 0x65,
    0x5d, 0xa4, 0xfb, 0xfc, 0x0e, 0x11, 0x08, 0xa8,
    0xfd, 0x17, 0xb4, 0x48, 0xa6, 0x85, 0x54, 0x19,
    0x9c, 0x47, 0xd0, 0x8f, 0xfb, 0x10, 0xd4, 0xb8,
];

/// Parameters of a short Weierstrass curve and its prime-order subgroup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curve {
    field: ModularArithmetic,
    order: ModularArithmetic,
    a: BigUint,
    b: BigUint,
    generator: Affine,
    half_order: BigUint,
}

impl Curve {
    /// The secp256k1 curve: `y^2 = x^3 + 7`.
    pub fn secp256k1() -> Self {
        Curve::from_parts(
            BigUint::from_bytes_be(&FIELD_PRIME),
            BigUint::zero(),
            BigUint::from(7u8),
            BigUint::from_bytes_be(&GROUP_ORDER),
            Affine::new(
                BigUint::from_bytes_be(&GENERATOR_X),
                BigUint::from_bytes_be(&GENERATOR_Y),
            ),
        )
    }

    /// Build a curve from raw parameters.
    ///
    /// `p` must be an odd number of at least 3 and `n` at least 2. The
    /// generator must lie on the curve and satisfy `n * G = O`.
    pub fn new(
        p: BigUint,
        a: BigUint,
        b: BigUint,
        n: BigUint,
        gx: BigUint,
        gy: BigUint,
    ) -> Result<Self, CurveError> {
        if p < BigUint::from(3u8) || !p.bit(0) || n < BigUint::from(2u8) {
            return Err(CurveError::InvalidModulus);
        }
        if a >= p || b >= p || gx >= p || gy >= p {
            return Err(CurveError::CoordinateOutOfRange);
        }

        let curve = Curve::from_parts(p, a, b, n, Affine::new(gx, gy));
        if !curve.is_on_curve(&curve.generator) {
            return Err(CurveError::InvalidGenerator);
        }
        let multiple = curve.scalar_mul(&curve.generator_point(), curve.order.modulus());
        if !curve.is_identity(&multiple) {
            return Err(CurveError::InvalidGenerator);
        }

        Ok(curve)
    }

    fn from_parts(p: BigUint, a: BigUint, b: BigUint, n: BigUint, generator: Affine) -> Self {
        let half_order = &n >> 1;
        Curve {
            field: ModularArithmetic::new(p),
            order: ModularArithmetic::new(n),
            a,
            b,
            generator,
            half_order,
        }
    }

    /// Whether these are the secp256k1 parameters.
    pub fn is_secp256k1(&self) -> bool {
        *self == Curve::secp256k1()
    }

    /// Arithmetic modulo the field prime `p`.
    #[inline]
    pub fn field(&self) -> &ModularArithmetic {
        &self.field
    }

    /// Arithmetic modulo the group order `n`.
    #[inline]
    pub fn order(&self) -> &ModularArithmetic {
        &self.order
    }

    #[inline]
    pub fn p(&self) -> &BigUint {
        self.field.modulus()
    }

    #[inline]
    pub fn n(&self) -> &BigUint {
        self.order.modulus()
    }

    #[inline]
    pub fn a(&self) -> &BigUint {
        &self.a
    }

    #[inline]
    pub fn b(&self) -> &BigUint {
        &self.b
    }

    #[inline]
    pub fn generator(&self) -> &Affine {
        &self.generator
    }

    /// `n >> 1`, the largest `s` accepted by the low-S rule.
    #[inline]
    pub fn half_order(&self) -> &BigUint {
        &self.half_order
    }

    /// Byte length of a serialized field element.
    pub fn field_size(&self) -> usize {
        self.field.bits().div_ceil(8) as usize
    }

    /// Right-hand side of the curve equation, `x^3 + ax + b`.
    pub fn rhs(&self, x: &BigUint) -> BigUint {
        let f = &self.field;
        let x3 = f.mul(&f.square(x), x);
        let ax = f.mul(&self.a, x);
        f.add(&f.add(&x3, &ax), &self.b)
    }

    pub fn is_on_curve(&self, point: &Affine) -> bool {
        point.is_on_curve(self)
    }

    /// On-curve checked constructor.
    pub fn point(&self, x: BigUint, y: BigUint) -> Result<Affine, CurveError> {
        if !self.field.is_canonical(&x) || !self.field.is_canonical(&y) {
            return Err(CurveError::CoordinateOutOfRange);
        }
        let point = Affine::new(x, y);
        if !self.is_on_curve(&point) {
            return Err(CurveError::NotOnCurve);
        }
        Ok(point)
    }

    /// The `y` coordinate for `x` with the requested parity.
    pub fn recover_y(&self, x: &BigUint, odd: bool) -> Result<BigUint, CurveError> {
        if !self.field.is_canonical(x) {
            return Err(CurveError::CoordinateOutOfRange);
        }
        let y = self
            .field
            .sqrt(&self.rhs(x))
            .ok_or(CurveError::NotOnCurve)?;
        if y.bit(0) == odd {
            Ok(y)
        } else {
            Ok(self.field.neg(&y))
        }
    }

    /// The point with x-coordinate `x` whose `y` is a quadratic residue.
    pub fn lift_x(&self, x: &BigUint) -> Result<Affine, CurveError> {
        if !self.field.is_canonical(x) {
            return Err(CurveError::CoordinateOutOfRange);
        }
        let y = self
            .field
            .sqrt(&self.rhs(x))
            .ok_or(CurveError::NotOnCurve)?;
        let y = if self.field.is_square(&y) {
            y
        } else {
            self.field.neg(&y)
        };
        Ok(Affine::new(x.clone(), y))
    }

    /// Whether the point's `y` is a quadratic residue. False for infinity.
    pub fn has_square_y(&self, point: &Affine) -> bool {
        !point.is_infinity() && self.field.is_square(&point.y)
    }

    pub fn add(&self, lhs: &Affine, rhs: &Affine) -> Affine {
        lhs.add(rhs, self)
    }

    pub fn negate(&self, point: &Affine) -> Affine {
        point.negate(self)
    }

    /// `k * P`, with `k` reduced modulo the group order first.
    pub fn mul(&self, point: &Affine, k: &BigUint) -> Affine {
        let k = self.order.reduce(k);
        self.scalar_mul(&point.into(), &k).to_affine(self)
    }

    /// `k * G`.
    pub fn mul_generator(&self, k: &BigUint) -> Affine {
        self.mul(&self.generator, k)
    }
}
