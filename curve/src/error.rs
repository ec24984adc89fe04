use thiserror::Error;

/// Errors raised by curve arithmetic and point construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CurveError {
    /// The coordinates do not satisfy `y^2 = x^3 + ax + b`, or no `y` exists for `x`.
    #[error("point is not on the curve")]
    NotOnCurve,

    /// A coordinate is not reduced modulo the field prime.
    #[error("coordinate is out of the field range")]
    CoordinateOutOfRange,

    /// The field prime is not an odd number above 2, or the group order is below 2.
    #[error("invalid field prime or group order")]
    InvalidModulus,

    #[error("value has no modular inverse")]
    NotInvertible,

    /// The generator is off the curve or does not have the declared order.
    #[error("invalid curve generator")]
    InvalidGenerator,
}
