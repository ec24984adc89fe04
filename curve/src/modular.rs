//! Modular arithmetic over an arbitrary odd prime modulus.
//!
//! Values are plain `BigUint`s; every operation reduces its result into
//! `[0, modulus)`. Inputs are expected to be reduced already unless the
//! method says otherwise.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

/// Arithmetic in the ring of integers modulo a prime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModularArithmetic {
    modulus: BigUint,
}

impl ModularArithmetic {
    pub fn new(modulus: BigUint) -> Self {
        ModularArithmetic { modulus }
    }

    #[inline]
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Number of bits needed to represent the modulus.
    #[inline]
    pub fn bits(&self) -> u64 {
        self.modulus.bits()
    }

    /// Reduce an arbitrary integer into the canonical range.
    #[inline]
    pub fn reduce(&self, a: &BigUint) -> BigUint {
        a % &self.modulus
    }

    /// Interpret big-endian bytes as an integer and reduce it.
    pub fn reduce_bytes(&self, bytes: &[u8]) -> BigUint {
        self.reduce(&BigUint::from_bytes_be(bytes))
    }

    /// True when `a` is already in `[0, modulus)`.
    #[inline]
    pub fn is_canonical(&self, a: &BigUint) -> bool {
        a < &self.modulus
    }

    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let sum = a + b;
        if sum >= self.modulus {
            sum - &self.modulus
        } else {
            sum
        }
    }

    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        if a >= b {
            a - b
        } else {
            &self.modulus - (b - a)
        }
    }

    pub fn neg(&self, a: &BigUint) -> BigUint {
        if a.is_zero() {
            BigUint::zero()
        } else {
            &self.modulus - a
        }
    }

    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    #[inline]
    pub fn square(&self, a: &BigUint) -> BigUint {
        self.mul(a, a)
    }

    pub fn pow(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        base.modpow(exponent, &self.modulus)
    }

    /// Multiplicative inverse via Fermat's little theorem. `None` for zero.
    pub fn inverse(&self, a: &BigUint) -> Option<BigUint> {
        let a = self.reduce(a);
        if a.is_zero() {
            return None;
        }
        let exponent = &self.modulus - BigUint::from(2u8);
        Some(self.pow(&a, &exponent))
    }

    /// Jacobi symbol `(a / modulus)`: 1, -1, or 0 when `a ≡ 0`.
    pub fn jacobi(&self, a: &BigUint) -> i8 {
        let mut a = self.reduce(a);
        let mut n = self.modulus.clone();
        let mut result = 1i8;

        while !a.is_zero() {
            let twos = a.trailing_zeros().unwrap_or(0);
            a >>= twos;
            if twos % 2 == 1 {
                let n_mod_8 = (&n % 8u8).to_u8_lossy();
                if n_mod_8 == 3 || n_mod_8 == 5 {
                    result = -result;
                }
            }

            core::mem::swap(&mut a, &mut n);
            if (&a % 4u8).to_u8_lossy() == 3 && (&n % 4u8).to_u8_lossy() == 3 {
                result = -result;
            }
            a %= &n;
        }

        if n.is_one() {
            result
        } else {
            0
        }
    }

    /// Whether `a` is a non-zero quadratic residue.
    #[inline]
    pub fn is_square(&self, a: &BigUint) -> bool {
        self.jacobi(a) == 1
    }

    /// A square root of `a`, or `None` if `a` is not a quadratic residue.
    ///
    /// Uses the `(p + 1) / 4` exponent when `p ≡ 3 (mod 4)` and falls back to
    /// Tonelli-Shanks otherwise. The returned root is checked by squaring.
    pub fn sqrt(&self, a: &BigUint) -> Option<BigUint> {
        let a = self.reduce(a);
        if a.is_zero() {
            return Some(a);
        }

        let root = if (&self.modulus % 4u8).to_u8_lossy() == 3 {
            let exponent = (&self.modulus + BigUint::one()) >> 2;
            self.pow(&a, &exponent)
        } else {
            self.tonelli_shanks(&a)?
        };

        if self.square(&root) == a {
            Some(root)
        } else {
            None
        }
    }

    fn tonelli_shanks(&self, a: &BigUint) -> Option<BigUint> {
        if self.jacobi(a) != 1 {
            return None;
        }

        let one = BigUint::one();
        let p_minus_one = &self.modulus - &one;
        let s = p_minus_one.trailing_zeros().unwrap_or(0);
        let q = &p_minus_one >> s;

        let mut z = BigUint::from(2u8);
        while self.jacobi(&z) != -1 {
            z += 1u8;
        }

        let mut m = s;
        let mut c = self.pow(&z, &q);
        let mut t = self.pow(a, &q);
        let mut r = self.pow(a, &((&q + &one) >> 1));

        while !t.is_one() {
            let mut i = 0u64;
            let mut t2i = t.clone();
            while !t2i.is_one() {
                t2i = self.square(&t2i);
                i += 1;
                if i == m {
                    return None;
                }
            }

            let mut b = c.clone();
            for _ in 0..(m - i - 1) {
                b = self.square(&b);
            }
            m = i;
            c = self.square(&b);
            t = self.mul(&t, &c);
            r = self.mul(&r, &b);
        }

        Some(r)
    }
}

trait ToU8Lossy {
    fn to_u8_lossy(&self) -> u8;
}

impl ToU8Lossy for BigUint {
    fn to_u8_lossy(&self) -> u8 {
        self.to_bytes_le().first().copied().unwrap_or(0)
    }
}

/// Encode `value` as exactly `N` big-endian bytes, or `None` if it does not fit.
pub fn to_fixed_bytes<const N: usize>(value: &BigUint) -> Option<[u8; N]> {
    let bytes = value.to_bytes_be();
    if value.is_zero() {
        return Some([0u8; N]);
    }
    if bytes.len() > N {
        return None;
    }
    let mut out = [0u8; N];
    out[N - bytes.len()..].copy_from_slice(&bytes);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(p: u32) -> ModularArithmetic {
        ModularArithmetic::new(BigUint::from(p))
    }

    #[test]
    fn test_add_sub_wrap() {
        let m = small(13);
        let a = BigUint::from(9u8);
        let b = BigUint::from(7u8);
        assert_eq!(m.add(&a, &b), BigUint::from(3u8));
        assert_eq!(m.sub(&b, &a), BigUint::from(11u8));
        assert_eq!(m.neg(&BigUint::zero()), BigUint::zero());
        assert_eq!(m.neg(&a), BigUint::from(4u8));
    }

    #[test]
    fn test_inverse() {
        let m = small(97);
        for v in 1u32..97 {
            let a = BigUint::from(v);
            let inv = m.inverse(&a).expect("non-zero is invertible");
            assert!(m.mul(&a, &inv).is_one());
        }
        assert!(m.inverse(&BigUint::zero()).is_none());
    }

    #[test]
    fn test_jacobi_matches_euler_criterion() {
        for p in [7u32, 13, 17, 97, 101] {
            let m = small(p);
            let exponent = BigUint::from((p - 1) / 2);
            for v in 1..p {
                let a = BigUint::from(v);
                let euler = m.pow(&a, &exponent);
                let expected = if euler.is_one() { 1 } else { -1 };
                assert_eq!(m.jacobi(&a), expected, "p={p} a={v}");
            }
            assert_eq!(m.jacobi(&BigUint::zero()), 0);
        }
    }

    #[test]
    fn test_sqrt_three_mod_four() {
        let m = small(103);
        for v in 1u32..103 {
            let a = BigUint::from(v);
            match m.sqrt(&a) {
                Some(root) => assert_eq!(m.square(&root), a),
                None => assert_eq!(m.jacobi(&a), -1),
            }
        }
    }

    #[test]
    fn test_sqrt_tonelli_shanks() {
        // 97 ≡ 1 (mod 4) exercises the general path.
        let m = small(97);
        for v in 1u32..97 {
            let a = BigUint::from(v);
            match m.sqrt(&a) {
                Some(root) => assert_eq!(m.square(&root), a),
                None => assert_eq!(m.jacobi(&a), -1),
            }
        }
    }

    #[test]
    fn test_to_fixed_bytes() {
        let v = BigUint::from(0x0102u16);
        assert_eq!(to_fixed_bytes::<4>(&v), Some([0, 0, 1, 2]));
        assert_eq!(to_fixed_bytes::<1>(&v), None);
        assert_eq!(to_fixed_bytes::<2>(&BigUint::zero()), Some([0, 0]));
    }

    fn secp256k1_field() -> ModularArithmetic {
        crate::Curve::secp256k1().field().clone()
    }

    proptest::proptest! {
        #[test]
        fn prop_inverse_and_sqrt(bytes in proptest::prelude::any::<[u8; 32]>()) {
            let m = secp256k1_field();
            let a = m.reduce_bytes(&bytes);
            if let Some(inv) = m.inverse(&a) {
                proptest::prop_assert_eq!(m.mul(&a, &inv), BigUint::one());
            }
            let square = m.square(&a);
            let root = m.sqrt(&square);
            proptest::prop_assert!(root.is_some());
            proptest::prop_assert_eq!(m.square(&root.unwrap()), square);
        }
    }
}
