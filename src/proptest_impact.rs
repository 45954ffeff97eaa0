//! Property-based tests for the estimation pipeline using proptest.

use proptest::prelude::*;

use crate::catalog::{MaterialDensity, HISTORICAL_EVENTS};
use crate::comparison_functions::{compare_explosion, Severity};
use crate::crater_functions::CraterRegime;
use crate::impact::{estimate_impact, ImpactParameters};

fn density() -> impl Strategy<Value = f64> {
    prop::sample::select(MaterialDensity::ALL.to_vec()).prop_map(MaterialDensity::kg_m3)
}

/// Lower and upper energy bound (Mt) of each severity band.
const BANDS: [(f64, f64, Severity); 5] = [
    (1e-6, 0.1, Severity::Local),
    (0.1, 10.0, Severity::Regional),
    (10.0, 1000.0, Severity::Continental),
    (1000.0, 1e6, Severity::Global),
    (1e6, 1e12, Severity::Planetary),
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Energy grows strictly with diameter. Crater radius grows strictly with diameter as long as
    /// both impactors collapse in the same regime.
    #[test]
    fn prop_monotonic_in_diameter(
        diameter_km in 0.001f64..20.0,
        growth in 1.001f64..3.0,
        velocity_kms in 5.0f64..70.0,
        density_kg_m3 in density(),
        angle in 5.0f64..=90.0,
    ) {
        let small = estimate_impact(&ImpactParameters::new(diameter_km, velocity_kms, density_kg_m3, angle)).unwrap();
        let large = estimate_impact(&ImpactParameters::new(diameter_km * growth, velocity_kms, density_kg_m3, angle)).unwrap();
        prop_assert!(large.energy_megatons > small.energy_megatons);
        prop_assert!(large.shockwave_radius_km > small.shockwave_radius_km);
        if small.regime == large.regime {
            prop_assert!(
                large.crater_radius_km > small.crater_radius_km,
                "crater shrank from {} to {} km ({:?})",
                small.crater_radius_km, large.crater_radius_km, small.regime
            );
        }
    }

    /// Complex craters are always larger than the transient cavity that formed them.
    #[test]
    fn prop_complex_crater_exceeds_transient(
        diameter_km in 0.3f64..20.0,
        velocity_kms in 11.0f64..70.0,
        density_kg_m3 in density(),
    ) {
        let estimate = estimate_impact(&ImpactParameters::new(diameter_km, velocity_kms, density_kg_m3, 45.0)).unwrap();
        if estimate.regime == CraterRegime::Complex {
            prop_assert!(2.0 * estimate.crater_radius_km > estimate.transient_crater_diameter_km);
        }
    }

    /// Every energy within a band is classified into that band.
    #[test]
    fn prop_severity_constant_within_band(
        band in 0usize..BANDS.len(),
        a in 0.0f64..1.0,
        b in 0.0f64..1.0,
    ) {
        let (lower, upper, expected) = BANDS[band];
        let (log_lower, log_upper) = (lower.log10(), upper.log10());
        let e1 = 10f64.powf(log_lower + a * (log_upper - log_lower)).clamp(lower, upper);
        let e2 = 10f64.powf(log_lower + b * (log_upper - log_lower)).clamp(lower, upper);
        prop_assume!(e1 < upper && e2 < upper);
        let s1 = compare_explosion(e1).unwrap().severity;
        let s2 = compare_explosion(e2).unwrap().severity;
        prop_assert_eq!(s1, s2);
        prop_assert_eq!(s1, expected);
    }

    /// Identical inputs give identical outputs.
    #[test]
    fn prop_deterministic(
        diameter_km in 0.001f64..50.0,
        velocity_kms in 1.0f64..72.0,
        density_kg_m3 in 500.0f64..8000.0,
        angle in 1.0f64..=90.0,
    ) {
        let params = ImpactParameters::new(diameter_km, velocity_kms, density_kg_m3, angle);
        let first = estimate_impact(&params).unwrap();
        let second = estimate_impact(&params).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    /// The closest event is never further away on a log scale than any other catalog entry.
    #[test]
    fn prop_closest_event_minimizes_log_distance(log_energy in -4.0f64..10.0) {
        let energy = 10f64.powf(log_energy);
        let result = compare_explosion(energy).unwrap();
        let closest = HISTORICAL_EVENTS
            .iter()
            .find(|e| e.name == result.closest_event)
            .unwrap();
        let best = (log_energy - closest.energy_megatons.log10()).abs();
        for event in HISTORICAL_EVENTS.iter() {
            prop_assert!(best <= (log_energy - event.energy_megatons.log10()).abs() + 1e-12);
        }
        prop_assert!((result.ratio - energy / closest.energy_megatons).abs() <= 1e-12 * result.ratio);
    }

    /// Out-of-domain angles are rejected rather than clamped.
    #[test]
    fn prop_rejects_angles_outside_domain(angle in prop_oneof![-180.0f64..=0.0, 90.0001f64..360.0]) {
        let params = ImpactParameters::new(1.0, 20.0, 3000.0, angle);
        prop_assert!(estimate_impact(&params).is_err());
    }
}
