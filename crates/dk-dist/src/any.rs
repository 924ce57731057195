//! Closed set of the supported distributions behind one type.

use dk_common::{Estimate, Result};
use dk_config::SolverConfig;
use serde::Serialize;

use crate::variants::{ChiSquare, Exponential, Gamma, Normal, StudentT};
use crate::{Distribution, Support};

/// Any of the supported distributions, dispatched with a `match`.
///
/// Serializes with a `family` tag, e.g.
/// `{"family":"normal","mu":0.0,"sigma":1.0}`. There is no `Deserialize`:
/// parameters only enter through the validating constructors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum AnyDistribution {
    Normal(Normal),
    Exponential(Exponential),
    Gamma(Gamma),
    ChiSquare(ChiSquare),
    StudentT(StudentT),
}

impl AnyDistribution {
    /// Every family with its default parameters, in a fixed order.
    pub fn defaults() -> [AnyDistribution; 5] {
        [
            Normal::default().into(),
            Exponential::default().into(),
            Gamma::default().into(),
            ChiSquare::default().into(),
            StudentT::default().into(),
        ]
    }

    fn inner(&self) -> &dyn Distribution {
        match self {
            AnyDistribution::Normal(d) => d,
            AnyDistribution::Exponential(d) => d,
            AnyDistribution::Gamma(d) => d,
            AnyDistribution::ChiSquare(d) => d,
            AnyDistribution::StudentT(d) => d,
        }
    }
}

impl Distribution for AnyDistribution {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn support(&self) -> Support {
        self.inner().support()
    }

    fn location(&self) -> f64 {
        self.inner().location()
    }

    fn scale(&self) -> f64 {
        self.inner().scale()
    }

    fn pdf(&self, x: f64) -> f64 {
        self.inner().pdf(x)
    }

    fn cdf(&self, x: f64) -> f64 {
        self.inner().cdf(x)
    }

    fn sf(&self, x: f64) -> f64 {
        self.inner().sf(x)
    }

    fn log_pdf(&self, x: f64) -> f64 {
        self.inner().log_pdf(x)
    }

    fn log_cdf(&self, x: f64) -> f64 {
        self.inner().log_cdf(x)
    }

    fn log_sf(&self, x: f64) -> f64 {
        self.inner().log_sf(x)
    }

    fn ppf_with(&self, q: f64, config: &SolverConfig) -> Result<Estimate> {
        self.inner().ppf_with(q, config)
    }

    fn isf(&self, q: f64) -> Result<f64> {
        self.inner().isf(q)
    }

    fn mean(&self) -> f64 {
        self.inner().mean()
    }

    fn variance(&self) -> f64 {
        self.inner().variance()
    }

    fn std_dev(&self) -> f64 {
        self.inner().std_dev()
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for AnyDistribution {
                fn from(d: $variant) -> Self {
                    AnyDistribution::$variant(d)
                }
            }
        )*
    };
}

impl_from_variant!(Normal, Exponential, Gamma, ChiSquare, StudentT);
