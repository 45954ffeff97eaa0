//! Summaries of near-Earth objects from a NASA NeoWs `feed` response.
//!
//! The body must already have been fetched; nothing here touches the network.

use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;

use crate::catalog::MaterialDensity;
use crate::error::ImpactResult;
use crate::impact::{sweep_densities, ImpactEstimate, ImpactParameters};

/// Close-approach summary of a single near-Earth object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeoSummary {
    pub name: String,
    pub id: String,
    /// Upper bound of the estimated diameter (km).
    pub diameter_km: f64,
    pub velocity_kms: f64,
    pub miss_distance_km: f64,
    pub date: String,
}

impl NeoSummary {
    /// Impactor parameters for this object striking at `impact_angle_deg`.
    ///
    /// The density is a stony placeholder; density sweeps replace it.
    pub fn parameters(&self, impact_angle_deg: f64) -> ImpactParameters {
        ImpactParameters::new(
            self.diameter_km,
            self.velocity_kms,
            MaterialDensity::Stony.kg_m3(),
            impact_angle_deg,
        )
    }

    fn from_feed_entry(date: &str, entry: &Value) -> Option<Self> {
        let approach = entry.get("close_approach_data")?.get(0)?;
        Some(Self {
            name: entry.get("name")?.as_str()?.to_string(),
            id: entry.get("id")?.as_str()?.to_string(),
            diameter_km: entry
                .pointer("/estimated_diameter/kilometers/estimated_diameter_max")?
                .as_f64()?,
            velocity_kms: number_field(approach.pointer("/relative_velocity/kilometers_per_second")?)?,
            miss_distance_km: number_field(approach.pointer("/miss_distance/kilometers")?)?,
            date: date.to_string(),
        })
    }
}

/// NeoWs encodes most quantities as strings; plain numbers are accepted too.
fn number_field(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        other => other.as_f64(),
    }
}

/// Extracts one summary per object in a NeoWs feed body, nearest miss first.
///
/// Objects missing any required field, or carrying an unparsable number, are skipped.
///
/// # Errors
///
/// Returns `ImpactError::Parse` if `body` is not valid JSON.
pub fn summarize_feed(body: &str) -> ImpactResult<Vec<NeoSummary>> {
    let feed: Value = serde_json::from_str(body)?;
    let Some(by_date) = feed.get("near_earth_objects").and_then(Value::as_object) else {
        tracing::debug!("feed has no near_earth_objects");
        return Ok(Vec::new());
    };

    let summaries = by_date
        .iter()
        .flat_map(|(date, entries)| {
            entries
                .as_array()
                .map(|entries| entries.iter().map(move |entry| (date, entry)))
                .into_iter()
                .flatten()
        })
        .filter_map(|(date, entry)| {
            let summary = NeoSummary::from_feed_entry(date, entry);
            if summary.is_none() {
                tracing::warn!(
                    date = date.as_str(),
                    id = entry.get("id").and_then(|v| v.as_str()).unwrap_or("?"),
                    "skipping malformed feed entry"
                );
            }
            summary
        })
        .sorted_by(|a, b| a.miss_distance_km.total_cmp(&b.miss_distance_km))
        .collect_vec();
    tracing::debug!(count = summaries.len(), "summarized feed");
    Ok(summaries)
}

/// A near-Earth object together with its estimated consequences per composition class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeoAssessment {
    #[serde(flatten)]
    pub neo: NeoSummary,
    pub impact: IndexMap<&'static str, ImpactEstimate>,
}

/// Summarizes a feed and estimates each object across every composition class.
pub fn assess_feed(body: &str, impact_angle_deg: f64) -> ImpactResult<Vec<NeoAssessment>> {
    summarize_feed(body)?
        .into_iter()
        .map(|neo| {
            let impact = sweep_densities(&neo.parameters(impact_angle_deg))?;
            Ok(NeoAssessment { neo, impact })
        })
        .collect()
}
