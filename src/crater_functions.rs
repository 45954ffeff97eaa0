use serde::Serialize;

use crate::error::{require_finite, require_positive, ImpactError, ImpactResult};
use crate::unit_functions::NormalizedImpact;
use crate::{GRAVITY, SHOCKWAVE_COEFFICIENT_KM, SIMPLE_COMPLEX_TRANSITION_KM, TARGET_DENSITY};

const TRANSIENT_COEFFICIENT: f64 = 1.161;
const SIMPLE_RIM_FACTOR: f64 = 1.25; // Final/transient diameter ratio for simple craters.
const COMPLEX_COEFFICIENT: f64 = 1.17;
const COMPLEX_EXPONENT: f64 = 1.13;

/// Collapse regime of the final crater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CraterRegime {
    Simple,
    Complex,
}

/// Transient and final crater dimensions (km).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CraterScaling {
    pub transient_diameter_km: f64,
    pub crater_diameter_km: f64,
    pub crater_radius_km: f64,
    pub regime: CraterRegime,
}

/// Computes the transient crater diameter using the Collins et al. (2005) scaling law.
///
/// The target is crystalline rock with a density of `TARGET_DENSITY`.
///
/// Collins, G.S., Melosh, H.J., Marcus, R.A., 2005. Earth Impact Effects Program: A Web-based
/// computer program for calculating the regional environmental consequences of a meteoroid
/// impact on Earth. Meteoritics & Planetary Science 40, 817-840.
/// https://doi.org/10.1111/j.1945-5100.2005.tb00157.x
///
/// # Arguments
///
/// * `impact` - Impactor geometry and kinematics in SI units.
/// * `density_kg_m3` - Impactor bulk density (kg/m³).
///
/// # Returns
///
/// * Transient crater diameter (m).
pub fn transient_diameter_m(impact: &NormalizedImpact, density_kg_m3: f64) -> ImpactResult<f64> {
    require_positive("density_kg_m3", density_kg_m3)?;
    let d_tc = TRANSIENT_COEFFICIENT
        * (density_kg_m3 / TARGET_DENSITY).cbrt()
        * impact.diameter_m.powf(0.78)
        * impact.velocity_ms.powf(0.44)
        * GRAVITY.powf(-0.22)
        * impact.sin_theta.cbrt();
    require_finite("transient crater diameter", d_tc)
}

/// Converts a transient crater diameter into the final crater diameter.
///
/// Transient cavities smaller than `SIMPLE_COMPLEX_TRANSITION_KM / 1.25` form simple craters,
/// a linear scale-up of the cavity. Larger cavities collapse into complex craters.
///
/// # Arguments
///
/// * `transient_diameter_km` - Transient crater diameter (km).
///
/// # Returns
///
/// * The final crater diameter (km) and the regime it was computed in.
pub fn final_crater_diameter(transient_diameter_km: f64) -> (f64, CraterRegime) {
    if transient_diameter_km < SIMPLE_COMPLEX_TRANSITION_KM / SIMPLE_RIM_FACTOR {
        (SIMPLE_RIM_FACTOR * transient_diameter_km, CraterRegime::Simple)
    } else {
        (
            COMPLEX_COEFFICIENT
                * transient_diameter_km.powf(COMPLEX_EXPONENT)
                * SIMPLE_COMPLEX_TRANSITION_KM.powf(-0.13),
            CraterRegime::Complex,
        )
    }
}

/// Computes the transient and final crater dimensions for an impact.
pub fn crater_scaling(impact: &NormalizedImpact, density_kg_m3: f64) -> ImpactResult<CraterScaling> {
    let transient_diameter_km = transient_diameter_m(impact, density_kg_m3)? / 1000.0;
    let (crater_diameter_km, regime) = final_crater_diameter(transient_diameter_km);
    let crater_diameter_km = require_finite("crater diameter", crater_diameter_km)?;
    Ok(CraterScaling {
        transient_diameter_km,
        crater_diameter_km,
        crater_radius_km: crater_diameter_km / 2.0,
        regime,
    })
}

/// Radius (km) of the ~5 psi overpressure ring for a surface burst of the given yield.
///
/// Uses the nuclear surface-burst approximation R ≈ 6.4 E^(1/3) km (Glasstone and Dolan, 1977),
/// which gives ~6.4 km for a 1 Mt yield. Zero energy gives a zero radius.
///
/// # Errors
///
/// Returns `ImpactError::Validation` for a negative or non-finite energy.
pub fn shockwave_radius_km(energy_megatons: f64) -> ImpactResult<f64> {
    if !energy_megatons.is_finite() || energy_megatons < 0.0 {
        return Err(ImpactError::validation(format!(
            "energy_megatons must be finite and non-negative, got {energy_megatons}"
        )));
    }
    if energy_megatons > 0.0 {
        Ok(SHOCKWAVE_COEFFICIENT_KM * energy_megatons.cbrt())
    } else {
        Ok(0.0)
    }
}
