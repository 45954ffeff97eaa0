use std::fmt;

use serde::Serialize;

use crate::catalog::{HistoricalEvent, HISTORICAL_EVENTS};
use crate::error::{require_finite, require_positive, ImpactError, ImpactResult};
use crate::serialize_rounded;

/// Qualitative reach of an explosion, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Local,
    Regional,
    Continental,
    Global,
    Planetary,
}

impl Severity {
    /// Lower energy bound (Mt) of each band above `Local`, ascending.
    const THRESHOLDS: [(f64, Severity); 4] = [
        (0.1, Severity::Regional),
        (10.0, Severity::Continental),
        (1000.0, Severity::Global),
        (1e6, Severity::Planetary),
    ];

    /// Band containing `energy_megatons`. Bands are half-open, `[lower, upper)`.
    pub fn from_energy(energy_megatons: f64) -> Self {
        Self::THRESHOLDS
            .iter()
            .take_while(|(lower, _)| energy_megatons >= *lower)
            .last()
            .map_or(Severity::Local, |&(_, severity)| severity)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Local => "local",
            Severity::Regional => "regional",
            Severity::Continental => "continental",
            Severity::Global => "global",
            Severity::Planetary => "planetary",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an energy release compares with the historical record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub closest_event: String,
    #[serde(serialize_with = "serialize_rounded")]
    pub ratio: f64,
    pub severity: Severity,
    pub category: String,
    pub summary: String,
}

/// Finds the entry of [`HISTORICAL_EVENTS`] nearest to `energy_megatons` on a log10 scale.
pub fn closest_event(energy_megatons: f64) -> ImpactResult<&'static HistoricalEvent> {
    closest_in(&HISTORICAL_EVENTS, energy_megatons)
}

/// Finds the entry of `catalog` nearest to `energy_megatons` on a log10 scale.
///
/// Energies span many orders of magnitude, so a linear distance would always favour the largest
/// entry. Ties go to the entry listed first.
///
/// # Errors
///
/// Returns `ImpactError::Computation` if `catalog` is empty.
pub fn closest_in(
    catalog: &[HistoricalEvent],
    energy_megatons: f64,
) -> ImpactResult<&HistoricalEvent> {
    let log_energy = energy_megatons.log10();
    catalog
        .iter()
        .min_by(|a, b| {
            let da = (log_energy - a.energy_megatons.log10()).abs();
            let db = (log_energy - b.energy_megatons.log10()).abs();
            da.total_cmp(&db)
        })
        .ok_or_else(|| ImpactError::computation("historical event catalog is empty"))
}

/// Compares an impact energy with historical explosions.
///
/// # Arguments
///
/// * `energy_megatons` - Energy release in megatons of TNT.
///
/// # Returns
///
/// * The closest historical event, the energy ratio to it, the severity band and a one-line
///   summary.
///
/// # Errors
///
/// Returns `ImpactError::Validation` if `energy_megatons` is not strictly positive, since its
/// logarithm is undefined.
pub fn compare_explosion(energy_megatons: f64) -> ImpactResult<ComparisonResult> {
    require_positive("energy_megatons", energy_megatons)?;
    let closest = closest_event(energy_megatons)?;
    let ratio = require_finite("energy ratio", energy_megatons / closest.energy_megatons)?;
    let severity = Severity::from_energy(energy_megatons);
    tracing::debug!(
        energy_megatons,
        closest = closest.name,
        ratio,
        %severity,
        "classified explosion"
    );

    Ok(ComparisonResult {
        closest_event: closest.name.to_string(),
        ratio,
        severity,
        category: closest.category.to_string(),
        summary: format!(
            "≈ {:.1}× the energy of {} ({} Mt TNT)",
            ratio, closest.name, closest.energy_text
        ),
    })
}
