use std::f64::consts::PI;

use crate::error::{require_finite, require_positive, ImpactError, ImpactResult};
use crate::MT_TNT_JOULES;

/// Mass and kinetic energy of a spherical impactor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KineticEnergy {
    pub mass_kg: f64,
    pub energy_joules: f64,
    pub energy_megatons: f64,
}

/// Computes the mass and kinetic energy of a homogeneous spherical impactor.
///
/// # Arguments
///
/// * `radius_m` - Impactor radius (m).
/// * `velocity_ms` - Impact velocity (m/s).
/// * `density_kg_m3` - Bulk density of the impactor (kg/m³).
///
/// # Returns
///
/// * The mass (kg), the kinetic energy (J) and the same energy in megatons of TNT.
///
/// # Errors
///
/// Returns `ImpactError::Validation` for non-positive inputs, and `ImpactError::Computation` if
/// the energy overflows or underflows to zero.
pub fn kinetic_energy(
    radius_m: f64,
    velocity_ms: f64,
    density_kg_m3: f64,
) -> ImpactResult<KineticEnergy> {
    require_positive("radius_m", radius_m)?;
    require_positive("velocity_ms", velocity_ms)?;
    require_positive("density_kg_m3", density_kg_m3)?;

    let volume_m3 = (4.0 / 3.0) * PI * radius_m.powi(3);
    let mass_kg = volume_m3 * density_kg_m3;
    let energy_joules = require_finite("energy_joules", 0.5 * mass_kg * velocity_ms.powi(2))?;
    let energy_megatons = joules_to_megatons(energy_joules);
    if energy_megatons <= 0.0 {
        return Err(ImpactError::computation(format!(
            "impactor energy underflows to zero (radius {radius_m} m)"
        )));
    }
    Ok(KineticEnergy {
        mass_kg,
        energy_joules,
        energy_megatons,
    })
}

/// Converts joules to megatons of TNT.
#[inline]
pub fn joules_to_megatons(energy_joules: f64) -> f64 {
    energy_joules / MT_TNT_JOULES
}
