//! End-to-end checks of the JSON contract used by the HTTP layer.

use approx::assert_relative_eq;
use impactmaker::neo_functions::{assess_feed, summarize_feed};
use impactmaker::request::{evaluate_json, ImpactRequest, ImpactResponse};
use impactmaker::{estimate_impact, ImpactError, ImpactParameters, MaterialDensity, Severity};
use serde_json::Value;

#[test]
fn default_request_sweeps_every_class() {
    let body = evaluate_json("{}").unwrap();
    let json: Value = serde_json::from_str(&body).unwrap();

    for class in MaterialDensity::ALL {
        let record = &json[class.code()];
        assert_eq!(record["density_kg_m3"], class.kg_m3());
        assert!(record["energy_megatons"].as_f64().unwrap() > 0.0);
        assert!(record["comparison"]["summary"].as_str().unwrap().starts_with('≈'));
    }

    let stony = &json["S"];
    assert_eq!(stony["energy_megatons"], 75_085.87);
    assert_eq!(stony["crater_radius_km"], 7.61);
    assert_eq!(stony["shockwave_radius_km"], 270.0);
    assert_eq!(stony["comparison"]["closest_event"], "Krakatoa (1883)");
    assert_eq!(stony["comparison"]["severity"], "global");
    assert_eq!(stony["comparison"]["ratio"], 375.43);
    assert_eq!(stony["comparison"]["category"], "continental");
}

#[test]
fn sweep_keys_keep_class_order() {
    let body = evaluate_json(r#"{"diameter_km": 0.05}"#).unwrap();
    let c = body.find("\"C\"").unwrap();
    let s = body.find("\"S\"").unwrap();
    let m = body.find("\"M\"").unwrap();
    assert!(c < s && s < m);
}

#[test]
fn explicit_density_returns_single_record() {
    let request = ImpactRequest::from_json(r#"{"diameter_km": 10, "velocity_kms": 20, "angle": 45, "density": 3000}"#)
        .unwrap();
    let ImpactResponse::Single(estimate) = request.evaluate().unwrap() else {
        panic!("expected a single estimate");
    };
    assert_eq!(estimate.comparison.closest_event, "Chicxulub Event (KT extinction)");
    assert_eq!(estimate.comparison.severity, Severity::Planetary);
    assert_relative_eq!(estimate.crater_radius_km, 57.92, epsilon = 0.005);
}

#[test]
fn rejected_inputs_surface_as_validation_errors() {
    for body in [
        r#"{"diameter_km": 0}"#,
        r#"{"velocity_kms": -5}"#,
        r#"{"angle": 0}"#,
        r#"{"angle": 91}"#,
        r#"{"density": -1}"#,
        r#"{"density": "Q"}"#,
    ] {
        assert!(
            matches!(evaluate_json(body), Err(ImpactError::Validation(_))),
            "{body} should be rejected"
        );
    }
}

#[test]
fn engine_is_safe_to_share_across_threads() {
    let params = ImpactParameters::new(0.34, 12.6, 3000.0, 30.0);
    let expected = estimate_impact(&params).unwrap();
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(move || estimate_impact(&params).unwrap()))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn neo_feed_round_trip() {
    let feed = r#"{
        "near_earth_objects": {
            "2025-10-04": [
                {
                    "id": "2099942",
                    "name": "99942 Apophis (2004 MN4)",
                    "estimated_diameter": {"kilometers": {"estimated_diameter_max": 0.37}},
                    "close_approach_data": [{
                        "relative_velocity": {"kilometers_per_second": "7.42"},
                        "miss_distance": {"kilometers": "38012"}
                    }]
                }
            ]
        }
    }"#;

    let neos = summarize_feed(feed).unwrap();
    assert_eq!(neos.len(), 1);
    assert_eq!(neos[0].name, "99942 Apophis (2004 MN4)");

    let assessed = assess_feed(feed, 45.0).unwrap();
    let stony = &assessed[0].impact["S"];
    let direct = estimate_impact(&neos[0].parameters(45.0)).unwrap();
    assert_eq!(stony, &direct);
    assert_eq!(stony.comparison.severity, Severity::Continental);
}
