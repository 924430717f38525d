#![deny(clippy::shadow_unrelated)]
//! Dense polynomial algebra over `f64` coefficients, and counting of positive
//! real roots with Sturm sequences.
//!
//! Polynomials store their coefficients leading coefficient first. See
//! [`Polynomial`](math::polynomial::Polynomial) for the representation and
//! [`count_positive_roots`](math::sturm::count_positive_roots) for the root
//! counter.

pub mod config;
pub mod error;
pub mod math;
pub mod prelude;
