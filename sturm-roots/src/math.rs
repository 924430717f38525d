pub mod polynomial;
pub mod sturm;
