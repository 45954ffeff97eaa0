//! Read-only reference tables: impactor composition classes and historical explosive events.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ImpactError;

/// Bulk composition class of an impactor.
///
/// Serialized as its class code; decoding goes through [`FromStr`], so full names and lowercase
/// codes are accepted as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum MaterialDensity {
    /// Porous, friable carbonaceous bodies.
    #[serde(rename = "C")]
    Carbonaceous,
    /// Silicate bodies.
    #[serde(rename = "S")]
    Stony,
    /// Nickel-iron bodies.
    #[serde(rename = "M")]
    Metallic,
}

impl MaterialDensity {
    /// Every class, in sweep order.
    pub const ALL: [MaterialDensity; 3] = [
        MaterialDensity::Carbonaceous,
        MaterialDensity::Stony,
        MaterialDensity::Metallic,
    ];

    #[inline]
    pub fn kg_m3(self) -> f64 {
        match self {
            MaterialDensity::Carbonaceous => 1500.0,
            MaterialDensity::Stony => 3000.0,
            MaterialDensity::Metallic => 6000.0,
        }
    }

    /// Short class code used as the key of sweep results.
    #[inline]
    pub fn code(self) -> &'static str {
        match self {
            MaterialDensity::Carbonaceous => "C",
            MaterialDensity::Stony => "S",
            MaterialDensity::Metallic => "M",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MaterialDensity::Carbonaceous => "Carbonaceous",
            MaterialDensity::Stony => "Stony",
            MaterialDensity::Metallic => "Metallic",
        }
    }
}

impl fmt::Display for MaterialDensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for MaterialDensity {
    type Err = ImpactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "carbonaceous" => Ok(MaterialDensity::Carbonaceous),
            "s" | "stony" => Ok(MaterialDensity::Stony),
            "m" | "metallic" => Ok(MaterialDensity::Metallic),
            other => Err(ImpactError::validation(format!(
                "unknown density class '{other}' (expected C, S or M)"
            ))),
        }
    }
}

impl TryFrom<String> for MaterialDensity {
    type Error = ImpactError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Origin of a reference explosion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Nuclear,
    Meteor,
    Volcanic,
    Asteroid,
}

/// A historical explosive event with a known energy release.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoricalEvent {
    pub name: &'static str,
    pub energy_megatons: f64,
    /// `energy_megatons` as written in event summaries.
    #[serde(skip)]
    pub energy_text: &'static str,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub category: &'static str,
}

/// Reference events (NASA, USGS, Impact Effects Program), ascending by energy.
///
/// Never empty, and every energy is strictly positive so it can be compared on a log scale.
pub static HISTORICAL_EVENTS: [HistoricalEvent; 7] = [
    HistoricalEvent {
        name: "Hiroshima Bomb",
        energy_megatons: 0.015,
        energy_text: "0.015",
        event_type: EventType::Nuclear,
        category: "local devastation",
    },
    HistoricalEvent {
        name: "Chelyabinsk Event (2013)",
        energy_megatons: 0.5,
        energy_text: "0.5",
        event_type: EventType::Meteor,
        category: "city damage",
    },
    HistoricalEvent {
        name: "Tunguska Event (1908)",
        energy_megatons: 15.0,
        energy_text: "15",
        event_type: EventType::Meteor,
        category: "regional devastation",
    },
    HistoricalEvent {
        name: "Mount St. Helens (1980)",
        energy_megatons: 24.0,
        energy_text: "24",
        event_type: EventType::Volcanic,
        category: "regional",
    },
    HistoricalEvent {
        name: "Tsar Bomba (USSR, 1961)",
        energy_megatons: 50.0,
        energy_text: "50",
        event_type: EventType::Nuclear,
        category: "regional destruction",
    },
    HistoricalEvent {
        name: "Krakatoa (1883)",
        energy_megatons: 200.0,
        energy_text: "200",
        event_type: EventType::Volcanic,
        category: "continental",
    },
    HistoricalEvent {
        name: "Chicxulub Event (KT extinction)",
        energy_megatons: 1e8,
        energy_text: "100000000.0",
        event_type: EventType::Asteroid,
        category: "global extinction",
    },
];
