use thiserror::Error;

/// Errors raised by the impact estimation engine.
///
/// Every error is raised where it is detected and handed back to the caller unchanged. The
/// engine never retries and never returns a partially computed estimate.
#[derive(Error, Debug)]
pub enum ImpactError {
    /// An input lies outside the physical domain of the model.
    #[error("validation error: {0}")]
    Validation(String),

    /// A computed quantity is numerically undefined.
    #[error("computation error: {0}")]
    Computation(String),

    /// A JSON body at the boundary could not be decoded.
    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ImpactResult<T> = Result<T, ImpactError>;

impl ImpactError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ImpactError::Validation(msg.into())
    }

    pub fn computation(msg: impl Into<String>) -> Self {
        ImpactError::Computation(msg.into())
    }
}

/// Requires `value` to be finite and strictly positive.
pub(crate) fn require_positive(name: &str, value: f64) -> ImpactResult<f64> {
    if !value.is_finite() {
        return Err(ImpactError::validation(format!("{name} must be finite, got {value}")));
    }
    if value <= 0.0 {
        return Err(ImpactError::validation(format!("{name} must be positive, got {value}")));
    }
    Ok(value)
}

/// Requires a computed quantity to be finite.
pub(crate) fn require_finite(name: &str, value: f64) -> ImpactResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ImpactError::computation(format!("{name} is not finite ({value})")))
    }
}

#[cfg(feature = "python")]
impl From<ImpactError> for pyo3::PyErr {
    fn from(err: ImpactError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
