//! Portable elliptic curve arithmetic over prime fields, built on `num-bigint`.
//!
//! This crate provides a curve descriptor with the secp256k1 parameters,
//! affine and Jacobian points, a Montgomery-ladder scalar multiplication, and
//! helpers for modular arithmetic and random sampling. A [`Curve`] is the only
//! context object; it is immutable and meant to be shared behind an `Arc`.

mod affine;
mod error;
mod group;
mod modular;
mod msm;
mod params;
mod projective;
mod random;

pub use affine::Affine;
pub use error::CurveError;
pub use group::Group;
pub use modular::{to_fixed_bytes, ModularArithmetic};
pub use msm::double_scalar_mul_basepoint;
pub use params::Curve;
pub use projective::Projective;
pub use random::RandomScalar;

pub use num_bigint::BigUint;
