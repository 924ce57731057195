//! distkit special functions.
//!
//! Everything the distribution layer needs below the CDF: error-function
//! inverses, regularized incomplete gamma and beta functions, log-domain
//! gamma/beta, and sample statistics.

pub mod math;

pub use math::beta::*;
pub use math::descriptive;
pub use math::erf::*;
pub use math::gamma::*;
pub use math::stable::*;
