use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum PolynomialError {
    #[error("a polynomial needs at least one coefficient")]
    EmptyCoefficients,

    #[error(
        "divisor's leading coefficient {leading_coefficient:e} is not finite \
         or within tolerance {tolerance:e} of zero"
    )]
    DivisionByZero {
        leading_coefficient: f64,
        tolerance: f64,
    },

    #[error("the derivative of a constant polynomial is undefined")]
    InvalidDegree,

    #[error("cannot count roots of a polynomial with {length} coefficient(s); need at least 2")]
    DegenerateInput { length: usize },

    #[error("tolerance must be finite and non-negative, but got {0}")]
    InvalidTolerance(f64),

    #[error(
        "Sturm sequence is numerically inconsistent: \
         {at_zero} sign change(s) at 0 but {at_infinity} at infinity"
    )]
    InconsistentSignChanges { at_zero: usize, at_infinity: usize },
}
