use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::catalog::MaterialDensity;
use crate::comparison_functions::ComparisonResult;
use crate::impact::{ImpactEstimate, ImpactParameters};
use crate::request::{DEFAULT_DIAMETER_KM, DEFAULT_IMPACT_ANGLE_DEG, DEFAULT_VELOCITY_KMS};
use crate::round_to;

pub(crate) fn comparison_to_dict<'py>(
    py: Python<'py>,
    comparison: &ComparisonResult,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("closest_event", &comparison.closest_event)?;
    dict.set_item("ratio", round_to(comparison.ratio, 2))?;
    dict.set_item("severity", comparison.severity.as_str())?;
    dict.set_item("category", &comparison.category)?;
    dict.set_item("summary", &comparison.summary)?;
    Ok(dict)
}

pub(crate) fn estimate_to_dict<'py>(
    py: Python<'py>,
    estimate: &ImpactEstimate,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("energy_megatons", round_to(estimate.energy_megatons, 2))?;
    dict.set_item("density_kg_m3", estimate.density_kg_m3)?;
    dict.set_item("crater_radius_km", round_to(estimate.crater_radius_km, 2))?;
    dict.set_item("shockwave_radius_km", round_to(estimate.shockwave_radius_km, 2))?;
    dict.set_item("comparison", comparison_to_dict(py, &estimate.comparison)?)?;
    Ok(dict)
}

/// Estimates the consequences of a single impact.
///
/// # Arguments
///
/// * `py` - Python GIL token.
/// * `diameter_km` - Impactor diameter (km).
/// * `velocity_kms` - Entry velocity (km/s).
/// * `density_kg_m3` - Impactor bulk density (kg/m³).
/// * `impact_angle_deg` - Angle from the horizontal (degrees), in (0, 90].
///
/// # Returns
///
/// * A dict with rounded energy, crater and shockwave figures and a historical comparison.
///
/// # Errors
///
/// Returns a `PyValueError` for out-of-domain inputs.
#[pyfunction]
#[pyo3(signature = (diameter_km, velocity_kms, density_kg_m3, impact_angle_deg=DEFAULT_IMPACT_ANGLE_DEG))]
pub fn estimate_impact<'py>(
    py: Python<'py>,
    diameter_km: f64,
    velocity_kms: f64,
    density_kg_m3: f64,
    impact_angle_deg: f64,
) -> PyResult<Bound<'py, PyDict>> {
    let params = ImpactParameters::new(diameter_km, velocity_kms, density_kg_m3, impact_angle_deg);
    let estimate = crate::impact::estimate_impact(&params)?;
    estimate_to_dict(py, &estimate)
}

/// Estimates one impactor for every composition class.
///
/// # Returns
///
/// * A dict keyed by class code (`"C"`, `"S"`, `"M"`).
#[pyfunction]
#[pyo3(signature = (
    diameter_km=DEFAULT_DIAMETER_KM,
    velocity_kms=DEFAULT_VELOCITY_KMS,
    impact_angle_deg=DEFAULT_IMPACT_ANGLE_DEG
))]
pub fn sweep_densities<'py>(
    py: Python<'py>,
    diameter_km: f64,
    velocity_kms: f64,
    impact_angle_deg: f64,
) -> PyResult<Bound<'py, PyDict>> {
    let params = ImpactParameters::new(
        diameter_km,
        velocity_kms,
        MaterialDensity::Stony.kg_m3(),
        impact_angle_deg,
    );
    let sweep = crate::impact::sweep_densities(&params)?;
    let dict = PyDict::new(py);
    for (code, estimate) in &sweep {
        dict.set_item(*code, estimate_to_dict(py, estimate)?)?;
    }
    Ok(dict)
}

/// Compares an energy release (Mt TNT) with historical explosions.
#[pyfunction]
pub fn compare_explosion<'py>(py: Python<'py>, energy_megatons: f64) -> PyResult<Bound<'py, PyDict>> {
    let comparison = crate::comparison_functions::compare_explosion(energy_megatons)?;
    comparison_to_dict(py, &comparison)
}

/// Evaluates a JSON request body and returns the JSON response body.
#[pyfunction]
pub fn evaluate_request(body: &str) -> PyResult<String> {
    Ok(crate::request::evaluate_json(body)?)
}

/// Estimates many impactors of one density.
///
/// The work runs in parallel with the GIL released.
///
/// # Arguments
///
/// * `py` - Python GIL token.
/// * `diameters_km` - 1D array of impactor diameters (km).
/// * `velocities_kms` - 1D array of velocities (km/s).
/// * `angles_deg` - 1D array of impact angles (degrees).
/// * `density_kg_m3` - Shared impactor density (kg/m³).
///
/// # Returns
///
/// * A tuple of NumPy arrays `(energy_megatons, crater_radius_km, shockwave_radius_km)`.
///
/// # Errors
///
/// Returns a `PyValueError` if the arrays differ in length or any element is out of domain.
#[pyfunction]
pub fn estimate_batch<'py>(
    py: Python<'py>,
    diameters_km: PyReadonlyArray1<'py, f64>,
    velocities_kms: PyReadonlyArray1<'py, f64>,
    angles_deg: PyReadonlyArray1<'py, f64>,
    density_kg_m3: f64,
) -> PyResult<(
    Bound<'py, PyArray1<f64>>,
    Bound<'py, PyArray1<f64>>,
    Bound<'py, PyArray1<f64>>,
)> {
    let diameters_km = diameters_km.as_array();
    let velocities_kms = velocities_kms.as_array();
    let angles_deg = angles_deg.as_array();
    let batch = py.allow_threads(|| {
        crate::impact::estimate_batch(diameters_km, velocities_kms, angles_deg, density_kg_m3)
    })?;
    Ok((
        batch.energy_megatons.into_pyarray(py),
        batch.crater_radius_km.into_pyarray(py),
        batch.shockwave_radius_km.into_pyarray(py),
    ))
}

/// Bulk density (kg/m³) of every composition class, keyed by class code.
#[pyfunction]
pub fn densities(py: Python<'_>) -> PyResult<Bound<'_, PyDict>> {
    let dict = PyDict::new(py);
    for class in MaterialDensity::ALL {
        dict.set_item(class.code(), class.kg_m3())?;
    }
    Ok(dict)
}

/// Installs a `tracing` subscriber that writes engine logs to stderr.
///
/// `RUST_LOG` takes precedence over `filter` when set.
///
/// # Returns
///
/// * `False` if a subscriber was already installed.
#[pyfunction]
#[pyo3(signature = (filter="info"))]
pub fn init_logging(filter: &str) -> PyResult<bool> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(env_filter) => env_filter,
        Err(_) => EnvFilter::try_new(filter)
            .map_err(|e| PyValueError::new_err(format!("invalid log filter '{filter}': {e}")))?,
    };
    Ok(tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .try_init()
        .is_ok())
}
