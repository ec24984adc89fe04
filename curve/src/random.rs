use num_bigint::BigUint;
use num_traits::Zero;
use rand::Rng;

use crate::{Curve, ModularArithmetic};

/// Helper trait for sampling uniform non-zero residues.
pub trait RandomScalar {
    /// A uniform value in `[1, modulus - 1]`.
    fn random_scalar<R: Rng + ?Sized>(&self, rng: &mut R) -> BigUint;
}

impl RandomScalar for ModularArithmetic {
    fn random_scalar<R: Rng + ?Sized>(&self, rng: &mut R) -> BigUint {
        let len = self.bits().div_ceil(8) as usize;
        let excess = (len as u64) * 8 - self.bits();
        let mut buf = vec![0u8; len];
        loop {
            rng.fill(&mut buf[..]);
            if let Some(top) = buf.first_mut() {
                *top &= 0xff >> excess;
            }
            let candidate = BigUint::from_bytes_be(&buf);
            if !candidate.is_zero() && self.is_canonical(&candidate) {
                return candidate;
            }
        }
    }
}

impl RandomScalar for Curve {
    #[inline]
    fn random_scalar<R: Rng + ?Sized>(&self, rng: &mut R) -> BigUint {
        self.order().random_scalar(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_scalar_in_range() {
        let curve = Curve::secp256k1();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..32 {
            let k = curve.random_scalar(&mut rng);
            assert!(!k.is_zero());
            assert!(&k < curve.n());
        }
    }

    #[test]
    fn test_small_modulus_covers_range() {
        let m = ModularArithmetic::new(BigUint::from(11u8));
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 11];
        for _ in 0..500 {
            let v = m.random_scalar(&mut rng);
            let idx = v.to_u32_digits().first().copied().unwrap_or(0) as usize;
            seen[idx] = true;
        }
        assert!(!seen[0]);
        assert!(seen[1..].iter().all(|s| *s));
    }
}
