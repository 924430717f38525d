pub use crate::config::Tolerance;
pub use crate::error::PolynomialError;
pub use crate::math::polynomial::Polynomial;
pub use crate::math::sturm::SturmSequence;
pub use crate::math::sturm::build_sturm_sequence;
pub use crate::math::sturm::count_positive_roots;
