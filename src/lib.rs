mod problem;
pub use crate::problem::Problem;

mod fraction;
pub use crate::fraction::Fraction;
