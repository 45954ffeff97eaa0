use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::impact_bindings::estimate_to_dict;
use crate::neo_functions::NeoSummary;
use crate::request::DEFAULT_IMPACT_ANGLE_DEG;

fn summary_to_dict<'py>(py: Python<'py>, neo: &NeoSummary) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("name", &neo.name)?;
    dict.set_item("id", &neo.id)?;
    dict.set_item("diameter_km", neo.diameter_km)?;
    dict.set_item("velocity_kms", neo.velocity_kms)?;
    dict.set_item("miss_distance_km", neo.miss_distance_km)?;
    dict.set_item("date", &neo.date)?;
    Ok(dict)
}

/// Summarizes a NASA NeoWs feed body, nearest miss first.
///
/// Malformed objects are skipped.
///
/// # Errors
///
/// Returns a `PyValueError` if `body` is not JSON.
#[pyfunction]
pub fn summarize_feed<'py>(py: Python<'py>, body: &str) -> PyResult<Bound<'py, PyList>> {
    let summaries = crate::neo_functions::summarize_feed(body)?;
    let list = PyList::empty(py);
    for neo in &summaries {
        list.append(summary_to_dict(py, neo)?)?;
    }
    Ok(list)
}

/// Summarizes a feed and estimates every object across all composition classes.
///
/// Each entry is the object summary with an extra `impact` dict keyed by class code.
#[pyfunction]
#[pyo3(signature = (body, impact_angle_deg=DEFAULT_IMPACT_ANGLE_DEG))]
pub fn assess_feed<'py>(
    py: Python<'py>,
    body: &str,
    impact_angle_deg: f64,
) -> PyResult<Bound<'py, PyList>> {
    let assessments = crate::neo_functions::assess_feed(body, impact_angle_deg)?;
    let list = PyList::empty(py);
    for assessment in &assessments {
        let dict = summary_to_dict(py, &assessment.neo)?;
        let impact = PyDict::new(py);
        for (code, estimate) in &assessment.impact {
            impact.set_item(*code, estimate_to_dict(py, estimate)?)?;
        }
        dict.set_item("impact", impact)?;
        list.append(dict)?;
    }
    Ok(list)
}
