//! Concrete distribution variants.

mod chi_square;
mod exponential;
mod gamma;
mod normal;
mod student_t;

pub use chi_square::ChiSquare;
pub use exponential::Exponential;
pub use gamma::Gamma;
pub use normal::Normal;
pub use student_t::StudentT;
