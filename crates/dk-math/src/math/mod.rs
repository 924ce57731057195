//! Core math modules.

pub mod beta;
pub mod descriptive;
pub mod erf;
pub mod gamma;
pub mod stable;
