use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Add;
use std::ops::Mul;
use std::ops::Neg;
use std::ops::Sub;

use arbitrary::Arbitrary;
use arbitrary::Unstructured;
use itertools::EitherOrBoth;
use itertools::Itertools;
use num_traits::One;
use num_traits::Zero;
use rayon::prelude::*;
use serde::Deserialize;
use serde::Serialize;

use crate::config::Tolerance;
use crate::error::PolynomialError;

/// A univariate polynomial with real coefficients, in dense monomial form.
///
/// The coefficients are stored in order of _decreasing_ degree: the leading
/// coefficient is the first element, the constant term is the last one. A
/// polynomial always has at least one coefficient.
///
/// Leading zeros are never stripped implicitly. The [degree](Self::degree) of
/// a polynomial is its number of coefficients minus one, whatever their
/// values.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Debug for Polynomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Polynomial")
            .field("coefficients", &self.coefficients)
            .finish()
    }
}

impl Display for Polynomial {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let degree = self.degree();
        let mut is_first_term = true;
        for (i, &coeff) in self.coefficients.iter().enumerate() {
            if coeff == 0.0 {
                continue;
            }

            let is_negative = coeff.is_sign_negative();
            match (is_first_term, is_negative) {
                (true, true) => write!(f, "-")?,
                (true, false) => (),
                (false, true) => write!(f, " - ")?,
                (false, false) => write!(f, " + ")?,
            }
            is_first_term = false;

            let pow = degree - i;
            let magnitude = coeff.abs();
            if magnitude != 1.0 || pow == 0 {
                write!(f, "{magnitude}")?;
            }
            match pow {
                0 => (),
                1 => write!(f, "x")?,
                _ => write!(f, "x^{pow}")?,
            }
        }

        if is_first_term {
            write!(f, "0")?;
        }

        Ok(())
    }
}

impl<'a> Arbitrary<'a> for Polynomial {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let leading_coefficient = f64::arbitrary(u)?;
        let lower_terms = Vec::<f64>::arbitrary(u)?;
        let coefficients = std::iter::once(leading_coefficient)
            .chain(lower_terms)
            .collect();

        Ok(Self { coefficients })
    }
}

impl Zero for Polynomial {
    fn zero() -> Self {
        Self::from_constant(0.0)
    }

    fn is_zero(&self) -> bool {
        self.coefficients.iter().all(|&c| c == 0.0)
    }
}

impl One for Polynomial {
    fn one() -> Self {
        Self::from_constant(1.0)
    }

    fn is_one(&self) -> bool {
        let (&constant_term, higher_terms) = self.split_constant_term();
        constant_term == 1.0 && higher_terms.iter().all(|&c| c == 0.0)
    }
}

impl Polynomial {
    /// # Errors
    ///
    /// Returns [`PolynomialError::EmptyCoefficients`] if no coefficients are
    /// given.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sturm_roots::prelude::*;
    /// // x^2 - 3x + 2
    /// let p = Polynomial::new(vec![1.0, -3.0, 2.0]).unwrap();
    /// assert_eq!(2, p.degree());
    /// assert!(Polynomial::new(vec![]).is_err());
    /// ```
    pub fn new(coefficients: Vec<f64>) -> Result<Self, PolynomialError> {
        if coefficients.is_empty() {
            return Err(PolynomialError::EmptyCoefficients);
        }

        Ok(Self { coefficients })
    }

    pub fn from_constant(constant: f64) -> Self {
        Self {
            coefficients: vec![constant],
        }
    }

    /// The coefficients, leading coefficient first.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn into_coefficients(self) -> Vec<f64> {
        self.coefficients
    }

    /// The nominal degree, _i.e._, the number of coefficients minus one. Leading
    /// zeros are counted.
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// The coefficient of the term of highest nominal degree. Its sign is the
    /// sign of the polynomial as `x` tends to positive infinity, provided it
    /// is non-zero.
    pub fn leading_coefficient(&self) -> f64 {
        self.coefficients[0]
    }

    /// The sign of the constant term is the sign of the polynomial at `x = 0`.
    pub fn constant_term(&self) -> f64 {
        *self.split_constant_term().0
    }

    fn split_constant_term(&self) -> (&f64, &[f64]) {
        let last = self.degree();
        (&self.coefficients[last], &self.coefficients[..last])
    }

    /// Horner evaluation. Overflow and NaN propagate.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
    }

    pub fn batch_evaluate(&self, domain: &[f64]) -> Vec<f64> {
        domain.iter().map(|&x| self.evaluate(x)).collect()
    }

    pub fn par_batch_evaluate(&self, domain: &[f64]) -> Vec<f64> {
        domain.par_iter().map(|&x| self.evaluate(x)).collect()
    }

    /// Coefficient-wise comparison after padding the shorter polynomial with
    /// leading zeros.
    pub fn approx_eq(&self, other: &Self, tolerance: Tolerance) -> bool {
        self.coefficients
            .iter()
            .rev()
            .zip_longest(other.coefficients.iter().rev())
            .all(|pair| match pair {
                EitherOrBoth::Both(&l, &r) => tolerance.is_negligible(l - r),
                EitherOrBoth::Left(&c) | EitherOrBoth::Right(&c) => tolerance.is_negligible(c),
            })
    }

    #[must_use]
    pub fn scalar_mul(&self, scalar: f64) -> Self {
        let coefficients = self.coefficients.iter().map(|&c| c * scalar).collect();
        Self { coefficients }
    }

    /// Schoolbook multiplication. The product has `self.degree() + other.degree()`
    /// as its nominal degree, even if the leading coefficients multiply to zero.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        let mut product = vec![0.0; self.coefficients.len() + other.coefficients.len() - 1];
        for (i, &lhs) in self.coefficients.iter().enumerate() {
            for (j, &rhs) in other.coefficients.iter().enumerate() {
                product[i + j] += lhs * rhs;
            }
        }

        Self {
            coefficients: product,
        }
    }

    /// Divide `self` by `divisor` through repeated elimination of the leading
    /// term. Returns the quotient and the remainder.
    ///
    /// The quotient has `max(self.degree() - divisor.degree(), 0)` as its
    /// nominal degree. The remainder is stripped of all leading coefficients
    /// that are [negligible](Tolerance::is_negligible) under `tolerance`, but
    /// always keeps at least its constant term.
    ///
    /// # Errors
    ///
    /// Returns [`PolynomialError::DivisionByZero`] if the leading coefficient
    /// of the divisor is negligible or not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sturm_roots::prelude::*;
    /// let dividend = Polynomial::new(vec![1.0, -3.0, 2.0]).unwrap();
    /// let divisor = Polynomial::new(vec![1.0, -1.0]).unwrap();
    /// let (quotient, remainder) = dividend.divide(&divisor, Tolerance::default()).unwrap();
    /// assert_eq!([1.0, -2.0], quotient.coefficients());
    /// assert_eq!([0.0], remainder.coefficients());
    /// ```
    pub fn divide(
        &self,
        divisor: &Self,
        tolerance: Tolerance,
    ) -> Result<(Self, Self), PolynomialError> {
        let divisor_lc = divisor.leading_coefficient();
        if !divisor_lc.is_finite() || tolerance.is_negligible(divisor_lc) {
            return Err(PolynomialError::DivisionByZero {
                leading_coefficient: divisor_lc,
                tolerance: tolerance.value(),
            });
        }
        let divisor_lc_inv = divisor_lc.recip();

        let num_steps = (self.coefficients.len() + 1).saturating_sub(divisor.coefficients.len());
        let mut quotient = vec![0.0; num_steps.max(1)];
        let mut remainder = self.coefficients.clone();
        for k in 0..num_steps {
            let quotient_coeff = divisor_lc_inv * remainder[k];
            quotient[k] = quotient_coeff;

            // the eliminated term is zero by construction, not up to round-off,
            // unless the quotient coefficient underflowed
            if quotient_coeff != 0.0 {
                remainder[k] = 0.0;
            }
            let lower_terms = remainder[k + 1..].iter_mut();
            for (r, &d) in lower_terms.zip(&divisor.coefficients[1..]) {
                *r -= quotient_coeff * d;
            }
        }

        let quotient = Self {
            coefficients: quotient,
        };
        let remainder = Self::strip_negligible_leading_terms(remainder, tolerance);

        Ok((quotient, remainder))
    }

    /// The remainder of [division](Self::divide).
    pub fn remainder(&self, divisor: &Self, tolerance: Tolerance) -> Result<Self, PolynomialError> {
        let (_, remainder) = self.divide(divisor, tolerance)?;
        Ok(remainder)
    }

    // never strips the constant term, leaving at least one coefficient
    fn strip_negligible_leading_terms(mut coefficients: Vec<f64>, tolerance: Tolerance) -> Self {
        let last = coefficients.len() - 1;
        let start = coefficients[..last]
            .iter()
            .position(|&c| !tolerance.is_negligible(c))
            .unwrap_or(last);
        coefficients.drain(..start);

        Self { coefficients }
    }

    /// The formal derivative. Its nominal degree is one less than that of
    /// `self`.
    ///
    /// # Errors
    ///
    /// Returns [`PolynomialError::InvalidDegree`] for polynomials of degree 0,
    /// since the derivative would have no coefficients.
    pub fn derivative(&self) -> Result<Self, PolynomialError> {
        let degree = self.degree();
        if degree == 0 {
            return Err(PolynomialError::InvalidDegree);
        }

        let coefficients = self.coefficients[..degree]
            .iter()
            .zip((1..=degree).rev())
            .map(|(&c, pow)| c * pow as f64)
            .collect();

        Ok(Self { coefficients })
    }
}

impl TryFrom<Vec<f64>> for Polynomial {
    type Error = PolynomialError;

    fn try_from(coefficients: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(coefficients)
    }
}

impl TryFrom<&[f64]> for Polynomial {
    type Error = PolynomialError;

    fn try_from(coefficients: &[f64]) -> Result<Self, Self::Error> {
        Self::new(coefficients.to_vec())
    }
}

impl<const N: usize> TryFrom<[f64; N]> for Polynomial {
    type Error = PolynomialError;

    fn try_from(coefficients: [f64; N]) -> Result<Self, Self::Error> {
        Self::new(coefficients.to_vec())
    }
}

impl From<Polynomial> for Vec<f64> {
    fn from(polynomial: Polynomial) -> Self {
        polynomial.coefficients
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    /// Aligns the constant terms. Cancelling leading terms are kept.
    fn add(self, other: Self) -> Polynomial {
        let mut summed: Vec<f64> = self
            .coefficients
            .iter()
            .rev()
            .zip_longest(other.coefficients.iter().rev())
            .map(|pair| match pair {
                EitherOrBoth::Both(&l, &r) => l + r,
                EitherOrBoth::Left(&c) | EitherOrBoth::Right(&c) => c,
            })
            .collect();
        summed.reverse();

        Polynomial {
            coefficients: summed,
        }
    }
}

impl Add for Polynomial {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        &self + &other
    }
}

impl Sub for Polynomial {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + (-other)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, other: Self) -> Polynomial {
        self.multiply(other)
    }
}

impl Mul for Polynomial {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        self.multiply(&other)
    }
}

impl Mul<f64> for Polynomial {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        self.scalar_mul(scalar)
    }
}

impl Neg for Polynomial {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        for c in &mut self.coefficients {
            *c = -*c;
        }
        self
    }
}
