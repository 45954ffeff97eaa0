use indexmap::IndexMap;
use itertools::Itertools;
use ndarray::{Array1, ArrayView1};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::Serialize;

use crate::catalog::MaterialDensity;
use crate::comparison_functions::{compare_explosion, ComparisonResult};
use crate::crater_functions::{crater_scaling, shockwave_radius_km, CraterRegime};
use crate::energy_functions::kinetic_energy;
use crate::error::{require_positive, ImpactError, ImpactResult};
use crate::serialize_rounded;
use crate::unit_functions::normalize;

/// Observable parameters of an impactor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactParameters {
    pub diameter_km: f64,
    pub velocity_kms: f64,
    pub density_kg_m3: f64,
    /// Angle from the horizontal (degrees), in (0, 90].
    pub impact_angle_deg: f64,
}

impl ImpactParameters {
    pub fn new(diameter_km: f64, velocity_kms: f64, density_kg_m3: f64, impact_angle_deg: f64) -> Self {
        Self {
            diameter_km,
            velocity_kms,
            density_kg_m3,
            impact_angle_deg,
        }
    }

    /// The same impactor with a different bulk density.
    pub fn with_density(self, density_kg_m3: f64) -> Self {
        Self {
            density_kg_m3,
            ..self
        }
    }
}

/// Estimated consequences of a single impact.
///
/// Serializes to the flat record handed to the HTTP layer: energy, crater and shockwave radii are
/// rounded to two decimals, and the intermediate quantities are left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactEstimate {
    #[serde(serialize_with = "serialize_rounded")]
    pub energy_megatons: f64,
    pub density_kg_m3: f64,
    #[serde(serialize_with = "serialize_rounded")]
    pub crater_radius_km: f64,
    #[serde(serialize_with = "serialize_rounded")]
    pub shockwave_radius_km: f64,
    pub comparison: ComparisonResult,
    #[serde(skip)]
    pub mass_kg: f64,
    #[serde(skip)]
    pub energy_joules: f64,
    #[serde(skip)]
    pub transient_crater_diameter_km: f64,
    #[serde(skip)]
    pub regime: CraterRegime,
}

/// Runs the full estimation pipeline for one impactor.
///
/// Inputs are converted to SI, the kinetic energy is computed, crater and shockwave sizes are
/// scaled from it, and the energy is placed against the historical record.
///
/// # Errors
///
/// Returns `ImpactError::Validation` for out-of-domain parameters and
/// `ImpactError::Computation` if any derived quantity is not finite. No partial estimate is ever
/// returned.
pub fn estimate_impact(params: &ImpactParameters) -> ImpactResult<ImpactEstimate> {
    let density_kg_m3 = require_positive("density_kg_m3", params.density_kg_m3)?;
    let impact = normalize(params.diameter_km, params.velocity_kms, params.impact_angle_deg)?;
    tracing::debug!(?impact, density_kg_m3, "normalized impactor");

    let energy = kinetic_energy(impact.radius_m, impact.velocity_ms, density_kg_m3)?;
    let crater = crater_scaling(&impact, density_kg_m3)?;
    tracing::debug!(
        energy_megatons = energy.energy_megatons,
        transient_diameter_km = crater.transient_diameter_km,
        regime = ?crater.regime,
        "scaled crater"
    );
    let shockwave_radius_km = shockwave_radius_km(energy.energy_megatons)?;
    let comparison = compare_explosion(energy.energy_megatons)?;

    Ok(ImpactEstimate {
        energy_megatons: energy.energy_megatons,
        density_kg_m3,
        crater_radius_km: crater.crater_radius_km,
        shockwave_radius_km,
        comparison,
        mass_kg: energy.mass_kg,
        energy_joules: energy.energy_joules,
        transient_crater_diameter_km: crater.transient_diameter_km,
        regime: crater.regime,
    })
}

/// Estimates the same impactor once per composition class.
///
/// The density of `params` is ignored and replaced by each entry of `MaterialDensity::ALL`.
///
/// # Returns
///
/// * Estimates keyed by class code (`"C"`, `"S"`, `"M"`), in that order.
pub fn sweep_densities(params: &ImpactParameters) -> ImpactResult<IndexMap<&'static str, ImpactEstimate>> {
    MaterialDensity::ALL
        .iter()
        .map(|&class| {
            let estimate = estimate_impact(&params.with_density(class.kg_m3()))?;
            tracing::trace!(class = class.code(), energy_megatons = estimate.energy_megatons, "swept density");
            Ok((class.code(), estimate))
        })
        .collect()
}

/// Column-wise results of a batch estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactBatch {
    pub energy_megatons: Array1<f64>,
    pub crater_radius_km: Array1<f64>,
    pub shockwave_radius_km: Array1<f64>,
}

/// Estimates many impactors of one density in parallel.
///
/// # Arguments
///
/// * `diameters_km` - 1D array of impactor diameters (km).
/// * `velocities_kms` - 1D array of impact velocities (km/s).
/// * `angles_deg` - 1D array of impact angles from the horizontal (degrees).
/// * `density_kg_m3` - Bulk density shared by every impactor (kg/m³).
///
/// # Returns
///
/// * Energy (Mt), crater radius (km) and shockwave radius (km) for every element.
///
/// # Errors
///
/// Returns `ImpactError::Validation` if the arrays differ in length. Any invalid element fails
/// the whole batch.
pub fn estimate_batch(
    diameters_km: ArrayView1<'_, f64>,
    velocities_kms: ArrayView1<'_, f64>,
    angles_deg: ArrayView1<'_, f64>,
    density_kg_m3: f64,
) -> ImpactResult<ImpactBatch> {
    let n = diameters_km.len();
    if velocities_kms.len() != n || angles_deg.len() != n {
        return Err(ImpactError::validation("input arrays must have the same length"));
    }
    require_positive("density_kg_m3", density_kg_m3)?;

    let rows: Vec<(f64, f64, f64)> = (0..n)
        .into_par_iter()
        .map(|i| {
            let impact = normalize(diameters_km[i], velocities_kms[i], angles_deg[i])
                .map_err(|e| match e {
                    ImpactError::Validation(msg) => ImpactError::validation(format!("element {i}: {msg}")),
                    other => other,
                })?;
            let energy = kinetic_energy(impact.radius_m, impact.velocity_ms, density_kg_m3)?;
            let crater = crater_scaling(&impact, density_kg_m3)?;
            let shockwave = shockwave_radius_km(energy.energy_megatons)?;
            Ok((energy.energy_megatons, crater.crater_radius_km, shockwave))
        })
        .collect::<ImpactResult<Vec<_>>>()?;

    let (energy, crater, shockwave): (Vec<f64>, Vec<f64>, Vec<f64>) = rows.into_iter().multiunzip();
    tracing::debug!(n, density_kg_m3, "estimated impact batch");
    Ok(ImpactBatch {
        energy_megatons: Array1::from_vec(energy),
        crater_radius_km: Array1::from_vec(crater),
        shockwave_radius_km: Array1::from_vec(shockwave),
    })
}
