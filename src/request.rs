//! JSON contract between the estimation engine and the HTTP layer.
//!
//! A request body looks like
//!
//! ```json
//! { "diameter_km": 0.34, "velocity_kms": 12.6, "angle": 30, "density": "S" }
//! ```
//!
//! Every field is optional. Without `density` the impactor is estimated once per composition
//! class and the response is keyed by class code.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::MaterialDensity;
use crate::error::ImpactResult;
use crate::impact::{estimate_impact, sweep_densities, ImpactEstimate, ImpactParameters};

pub const DEFAULT_DIAMETER_KM: f64 = 1.0;
pub const DEFAULT_VELOCITY_KMS: f64 = 20.0;
pub const DEFAULT_IMPACT_ANGLE_DEG: f64 = 45.0;

/// Impactor density requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DensityChoice {
    Class(MaterialDensity),
    KgM3(f64),
}

impl DensityChoice {
    pub fn kg_m3(self) -> f64 {
        match self {
            DensityChoice::Class(class) => class.kg_m3(),
            DensityChoice::KgM3(value) => value,
        }
    }
}

/// Parsed request body.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactRequest {
    pub diameter_km: f64,
    pub velocity_kms: f64,
    pub impact_angle_deg: f64,
    pub density: Option<DensityChoice>,
}

impl Default for ImpactRequest {
    fn default() -> Self {
        Self {
            diameter_km: DEFAULT_DIAMETER_KM,
            velocity_kms: DEFAULT_VELOCITY_KMS,
            impact_angle_deg: DEFAULT_IMPACT_ANGLE_DEG,
            density: None,
        }
    }
}

/// `density` as it appears on the wire. Class codes are resolved after decoding so that an
/// unknown code is reported as a validation error rather than malformed JSON.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireDensity {
    Code(String),
    KgM3(f64),
}

impl WireDensity {
    fn resolve(self) -> ImpactResult<DensityChoice> {
        match self {
            WireDensity::Code(code) => Ok(DensityChoice::Class(code.parse()?)),
            WireDensity::KgM3(value) => Ok(DensityChoice::KgM3(value)),
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct WireRequest {
    diameter_km: f64,
    velocity_kms: f64,
    #[serde(alias = "angle")]
    impact_angle_deg: f64,
    density: Option<WireDensity>,
}

impl Default for WireRequest {
    fn default() -> Self {
        Self {
            diameter_km: DEFAULT_DIAMETER_KM,
            velocity_kms: DEFAULT_VELOCITY_KMS,
            impact_angle_deg: DEFAULT_IMPACT_ANGLE_DEG,
            density: None,
        }
    }
}

impl ImpactRequest {
    /// Decodes a request body.
    ///
    /// # Errors
    ///
    /// Returns `ImpactError::Parse` if `body` is not a JSON object of the expected shape, and
    /// `ImpactError::Validation` for an unknown density class.
    pub fn from_json(body: &str) -> ImpactResult<Self> {
        let wire: WireRequest = serde_json::from_str(body)?;
        Ok(Self {
            diameter_km: wire.diameter_km,
            velocity_kms: wire.velocity_kms,
            impact_angle_deg: wire.impact_angle_deg,
            density: wire.density.map(WireDensity::resolve).transpose()?,
        })
    }

    /// Impactor parameters for this request. Without an explicit density the stony class is
    /// used as a placeholder; sweeps replace it.
    pub fn parameters(&self) -> ImpactParameters {
        ImpactParameters::new(
            self.diameter_km,
            self.velocity_kms,
            self.density
                .map_or(MaterialDensity::Stony.kg_m3(), DensityChoice::kg_m3),
            self.impact_angle_deg,
        )
    }

    pub fn evaluate(&self) -> ImpactResult<ImpactResponse> {
        let params = self.parameters();
        match self.density {
            Some(_) => Ok(ImpactResponse::Single(estimate_impact(&params)?)),
            None => Ok(ImpactResponse::Sweep(sweep_densities(&params)?)),
        }
    }
}

/// Result handed back to the HTTP layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ImpactResponse {
    Single(ImpactEstimate),
    Sweep(IndexMap<&'static str, ImpactEstimate>),
}

impl ImpactResponse {
    pub fn to_json(&self) -> ImpactResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Parses a request body, evaluates it and serializes the response.
pub fn evaluate_json(body: &str) -> ImpactResult<String> {
    ImpactRequest::from_json(body)?.evaluate()?.to_json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImpactError;

    #[test]
    fn test_empty_body_uses_defaults() {
        let request = ImpactRequest::from_json("{}").unwrap();
        assert_eq!(request, ImpactRequest::default());
        assert_eq!(request.diameter_km, 1.0);
        assert_eq!(request.velocity_kms, 20.0);
        assert_eq!(request.impact_angle_deg, 45.0);
    }

    #[test]
    fn test_angle_alias() {
        let request = ImpactRequest::from_json(r#"{"angle": 30}"#).unwrap();
        assert_eq!(request.impact_angle_deg, 30.0);
        let request = ImpactRequest::from_json(r#"{"impact_angle_deg": 60}"#).unwrap();
        assert_eq!(request.impact_angle_deg, 60.0);
    }

    #[test]
    fn test_density_choice() {
        let by_class = ImpactRequest::from_json(r#"{"density": "M"}"#).unwrap();
        assert_eq!(by_class.density, Some(DensityChoice::Class(MaterialDensity::Metallic)));
        assert_eq!(by_class.parameters().density_kg_m3, 6000.0);

        let by_value = ImpactRequest::from_json(r#"{"density": 2200}"#).unwrap();
        assert_eq!(by_value.density, Some(DensityChoice::KgM3(2200.0)));
        assert_eq!(by_value.parameters().density_kg_m3, 2200.0);

        let lowercase = ImpactRequest::from_json(r#"{"density": "s"}"#).unwrap();
        assert_eq!(lowercase.density, Some(DensityChoice::Class(MaterialDensity::Stony)));
        let by_name = ImpactRequest::from_json(r#"{"density": "carbonaceous"}"#).unwrap();
        assert_eq!(by_name.density, Some(DensityChoice::Class(MaterialDensity::Carbonaceous)));
    }

    #[test]
    fn test_unknown_density_class_is_a_validation_error() {
        assert!(matches!(
            ImpactRequest::from_json(r#"{"density": "Q"}"#),
            Err(ImpactError::Validation(_))
        ));
        assert!(matches!(
            evaluate_json(r#"{"diameter_km": 0.5, "density": "Q"}"#),
            Err(ImpactError::Validation(_))
        ));
        assert!(matches!(
            ImpactRequest::from_json(r#"{"density": true}"#),
            Err(ImpactError::Parse(_))
        ));
    }

    #[test]
    fn test_sweep_response_is_keyed_by_class() {
        let response = ImpactRequest::default().evaluate().unwrap();
        let ImpactResponse::Sweep(map) = &response else {
            panic!("expected a sweep, got {response:?}");
        };
        assert_eq!(map.len(), 3);

        let json: serde_json::Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 3);
        assert_eq!(json["S"]["energy_megatons"], 75_085.87);
        assert_eq!(json["S"]["comparison"]["closest_event"], "Krakatoa (1883)");
    }

    #[test]
    fn test_single_response() {
        let request = ImpactRequest::from_json(r#"{"diameter_km": 0.1, "density": "S"}"#).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&request.evaluate().unwrap().to_json().unwrap()).unwrap();
        assert_eq!(json["energy_megatons"], 75.09);
        assert_eq!(json["crater_radius_km"], 1.15);
        assert_eq!(json["shockwave_radius_km"], 27.0);
        assert_eq!(json["comparison"]["severity"], "continental");
        assert_eq!(json["comparison"]["closest_event"], "Tsar Bomba (USSR, 1961)");
    }

    #[test]
    fn test_invalid_request_propagates() {
        assert!(matches!(
            evaluate_json(r#"{"diameter_km": 0}"#),
            Err(ImpactError::Validation(_))
        ));
        assert!(matches!(evaluate_json("not json"), Err(ImpactError::Parse(_))));
    }
}
