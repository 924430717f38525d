//! Counting real roots with [Sturm's theorem][sturm].
//!
//! The Sturm sequence of a polynomial `p` is `p, p', -rem(p, p'), …`, where
//! every term is the negated remainder of the division of the two preceding
//! terms. For a square-free `p`, the number of distinct real roots in `(a, b]`
//! is `V(a) - V(b)`, with `V(x)` the number of sign changes in the sequence
//! evaluated at `x`, zeros ignored.
//!
//! Only the interval `(0, ∞)` is supported. Its endpoints need no
//! evaluation: the sign at `0` is the sign of the constant term, and the sign
//! at `∞` is the sign of the leading coefficient.
//!
//! [sturm]: https://en.wikipedia.org/wiki/Sturm%27s_theorem

use std::ops::Deref;

use tracing::debug;
use tracing::trace;

use crate::config::Tolerance;
use crate::error::PolynomialError;
use crate::math::polynomial::Polynomial;

/// The full, materialized Sturm sequence of a polynomial.
#[derive(Debug, Clone, PartialEq)]
pub struct SturmSequence {
    polynomials: Vec<Polynomial>,
}

impl SturmSequence {
    /// Terminates once a term of degree 0 is reached, or after
    /// `polynomial.degree()` division steps, whichever comes first.
    ///
    /// # Errors
    ///
    /// - [`PolynomialError::InvalidDegree`] if `polynomial` is constant.
    /// - [`PolynomialError::DivisionByZero`] if some term has a
    ///   [negligible](Tolerance::is_negligible) or non-finite leading
    ///   coefficient.
    pub fn new(polynomial: &Polynomial, tolerance: Tolerance) -> Result<Self, PolynomialError> {
        let mut recursion = SturmRecursion::new(polynomial, tolerance)?;
        let mut polynomials = vec![recursion.previous.clone(), recursion.current.clone()];
        while let Some(term) = recursion.next_term()? {
            polynomials.push(term.clone());
        }

        Ok(Self { polynomials })
    }

    pub fn into_polynomials(self) -> Vec<Polynomial> {
        self.polynomials
    }

    /// `V(0)`
    pub fn sign_changes_at_zero(&self) -> usize {
        let mut tally = SignChangeTally::default();
        for polynomial in &self.polynomials {
            tally.record(polynomial.constant_term());
        }
        tally.sign_changes
    }

    /// `V(∞)`
    pub fn sign_changes_at_infinity(&self) -> usize {
        let mut tally = SignChangeTally::default();
        for polynomial in &self.polynomials {
            tally.record(polynomial.leading_coefficient());
        }
        tally.sign_changes
    }

    /// The number of distinct real roots in `(0, ∞)` of the sequence's first
    /// polynomial.
    pub fn count_positive_roots(&self) -> Result<usize, PolynomialError> {
        positive_root_count(self.sign_changes_at_zero(), self.sign_changes_at_infinity())
    }
}

impl Deref for SturmSequence {
    type Target = [Polynomial];

    fn deref(&self) -> &Self::Target {
        &self.polynomials
    }
}

/// Produces the Sturm sequence one term at a time, holding on to only the two
/// most recent terms.
#[derive(Debug)]
struct SturmRecursion {
    previous: Polynomial,
    current: Polynomial,
    remaining_steps: usize,
    tolerance: Tolerance,
}

impl SturmRecursion {
    fn new(polynomial: &Polynomial, tolerance: Tolerance) -> Result<Self, PolynomialError> {
        let derivative = polynomial.derivative()?;

        Ok(Self {
            previous: polynomial.clone(),
            current: derivative,
            remaining_steps: polynomial.degree(),
            tolerance,
        })
    }

    fn next_term(&mut self) -> Result<Option<&Polynomial>, PolynomialError> {
        if self.remaining_steps == 0 {
            return Ok(None);
        }

        let next = -self.previous.remainder(&self.current, self.tolerance)?;
        self.previous = std::mem::replace(&mut self.current, next);
        self.remaining_steps = match self.current.degree() {
            0 => 0,
            _ => self.remaining_steps - 1,
        };

        Ok(Some(&self.current))
    }
}

#[derive(Debug, Default, Copy, Clone)]
struct SignChangeTally {
    /// 0 until the first non-zero sign is recorded.
    last_sign: i8,
    sign_changes: usize,
}

impl SignChangeTally {
    fn record(&mut self, value: f64) {
        let sign = sign(value);
        if sign == 0 {
            return;
        }
        if self.last_sign != 0 && self.last_sign != sign {
            self.sign_changes += 1;
        }
        self.last_sign = sign;
    }
}

/// -1, 0, or 1. NaN has sign 0.
fn sign(x: f64) -> i8 {
    i8::from(x > 0.0) - i8::from(x < 0.0)
}

fn positive_root_count(at_zero: usize, at_infinity: usize) -> Result<usize, PolynomialError> {
    at_zero
        .checked_sub(at_infinity)
        .ok_or(PolynomialError::InconsistentSignChanges {
            at_zero,
            at_infinity,
        })
}

/// See [`SturmSequence::new`].
pub fn build_sturm_sequence(
    polynomial: &Polynomial,
    tolerance: Tolerance,
) -> Result<SturmSequence, PolynomialError> {
    SturmSequence::new(polynomial, tolerance)
}

/// The number of distinct real roots of `polynomial` in `(0, ∞)`.
///
/// The Sturm sequence is never materialized: the sign changes at `0` and at
/// `∞` are tallied while the sequence is being computed.
///
/// The polynomial must not have repeated roots. This is not checked; for
/// polynomials with repeated roots, the result is meaningless.
///
/// # Errors
///
/// - [`PolynomialError::DegenerateInput`] if `polynomial` is constant.
/// - [`PolynomialError::DivisionByZero`] if some term of the Sturm sequence
///   has a [negligible](Tolerance::is_negligible) or non-finite leading
///   coefficient. This
///   includes the polynomial itself having a negligible leading coefficient.
/// - [`PolynomialError::InconsistentSignChanges`] if round-off makes the
///   sequence contradict Sturm's theorem.
///
/// # Examples
///
/// ```
/// # use sturm_roots::prelude::*;
/// // (x - 1)(x - 2)
/// let p = Polynomial::new(vec![1.0, -3.0, 2.0]).unwrap();
/// assert_eq!(Ok(2), count_positive_roots(&p, Tolerance::default()));
///
/// // x^2 + 1
/// let p = Polynomial::new(vec![1.0, 0.0, 1.0]).unwrap();
/// assert_eq!(Ok(0), count_positive_roots(&p, Tolerance::default()));
/// ```
pub fn count_positive_roots(
    polynomial: &Polynomial,
    tolerance: Tolerance,
) -> Result<usize, PolynomialError> {
    if polynomial.degree() == 0 {
        let length = polynomial.coefficients().len();
        return Err(PolynomialError::DegenerateInput { length });
    }

    let mut at_zero = SignChangeTally::default();
    let mut at_infinity = SignChangeTally::default();
    let mut record = |term: &Polynomial| {
        at_zero.record(term.constant_term());
        at_infinity.record(term.leading_coefficient());
    };

    let mut recursion = SturmRecursion::new(polynomial, tolerance)?;
    record(&recursion.previous);
    record(&recursion.current);

    let mut step = 0;
    while let Some(term) = recursion.next_term()? {
        step += 1;
        trace!(step, num_coefficients = term.coefficients().len(), "Sturm term");
        record(term);
    }

    let (at_zero, at_infinity) = (at_zero.sign_changes, at_infinity.sign_changes);
    debug!(
        degree = polynomial.degree(),
        steps = step,
        at_zero,
        at_infinity,
        "tallied Sturm sign changes"
    );

    positive_root_count(at_zero, at_infinity)
}

impl Polynomial {
    /// See [`SturmSequence::new`].
    pub fn sturm_sequence(&self, tolerance: Tolerance) -> Result<SturmSequence, PolynomialError> {
        SturmSequence::new(self, tolerance)
    }

    /// See [`count_positive_roots`](fn@count_positive_roots).
    pub fn count_positive_roots(&self, tolerance: Tolerance) -> Result<usize, PolynomialError> {
        count_positive_roots(self, tolerance)
    }
}
