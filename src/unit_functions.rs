use crate::error::{require_positive, ImpactError, ImpactResult};

/// Impactor geometry and kinematics converted to SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedImpact {
    pub diameter_m: f64,
    pub radius_m: f64,
    pub velocity_ms: f64,
    /// Impact angle measured from the horizontal (radians).
    pub theta_rad: f64,
    pub sin_theta: f64,
}

/// Converts kilometre-based impactor inputs into SI units.
///
/// # Arguments
///
/// * `diameter_km` - Impactor diameter (km).
/// * `velocity_kms` - Entry velocity (km/s).
/// * `impact_angle_deg` - Angle from the horizontal (degrees), 90 is a vertical impact.
///
/// # Errors
///
/// Returns `ImpactError::Validation` if the diameter or velocity is not strictly positive, or if
/// the angle lies outside (0, 90]. A zero angle is a grazing impact with no vertical component
/// and is rejected rather than clamped.
pub fn normalize(
    diameter_km: f64,
    velocity_kms: f64,
    impact_angle_deg: f64,
) -> ImpactResult<NormalizedImpact> {
    require_positive("diameter_km", diameter_km)?;
    require_positive("velocity_kms", velocity_kms)?;
    validate_angle(impact_angle_deg)?;

    let diameter_m = diameter_km * 1000.0;
    let theta_rad = impact_angle_deg.to_radians();
    Ok(NormalizedImpact {
        diameter_m,
        radius_m: diameter_m / 2.0,
        velocity_ms: velocity_kms * 1000.0,
        theta_rad,
        sin_theta: theta_rad.sin(),
    })
}

#[inline]
fn validate_angle(impact_angle_deg: f64) -> ImpactResult<()> {
    if impact_angle_deg.is_finite() && impact_angle_deg > 0.0 && impact_angle_deg <= 90.0 {
        Ok(())
    } else {
        Err(ImpactError::validation(format!(
            "impact_angle_deg must lie in (0, 90], got {impact_angle_deg}"
        )))
    }
}
