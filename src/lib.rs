pub mod catalog;
pub mod comparison_functions;
pub mod crater_functions;
pub mod energy_functions;
pub mod error;
pub mod impact;
pub mod neo_functions;
pub mod request;
pub mod unit_functions;

#[cfg(feature = "python")]
pub mod impact_bindings;
#[cfg(feature = "python")]
pub mod neo_bindings;

#[cfg(test)]
mod proptest_impact;

#[cfg(all(feature = "python", not(target_env = "msvc")))]
use tikv_jemallocator::Jemalloc;

#[cfg(all(feature = "python", not(target_env = "msvc")))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

pub use catalog::{HistoricalEvent, MaterialDensity, HISTORICAL_EVENTS};
pub use comparison_functions::{compare_explosion, ComparisonResult, Severity};
pub use error::{ImpactError, ImpactResult};
pub use impact::{estimate_batch, estimate_impact, sweep_densities, ImpactEstimate, ImpactParameters};
pub use request::{ImpactRequest, ImpactResponse};

/// Energy of one megaton of TNT (J).
pub const MT_TNT_JOULES: f64 = 4.184e15;
/// Density of the target surface, average crystalline rock (kg/m³).
pub const TARGET_DENSITY: f64 = 2700.0;
/// Surface gravity of the Earth (m/s²).
pub const GRAVITY: f64 = 9.81;
/// Final crater diameter (km) at which simple craters give way to complex ones.
pub const SIMPLE_COMPLEX_TRANSITION_KM: f64 = 3.2;
/// Radius (km) of the ~5 psi overpressure ring for a 1 Mt surface burst.
pub const SHOCKWAVE_COEFFICIENT_KM: f64 = 6.4;

/// Rounds `value` to `places` decimal places.
#[inline]
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

pub(crate) fn serialize_rounded<S: serde::Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 2))
}

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
#[pyo3(name = "_impactmaker")]
mod impactmaker {
    use super::*;

    #[pymodule]
    mod impact_bindings {
        #[pymodule_export]
        use crate::impact_bindings::{
            compare_explosion,
            densities,
            estimate_batch,
            estimate_impact,
            evaluate_request,
            init_logging,
            sweep_densities,
        };
    }

    #[pymodule]
    mod neo_bindings {
        #[pymodule_export]
        use crate::neo_bindings::{assess_feed, summarize_feed};
    }
}
