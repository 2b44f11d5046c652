use crate::marker::MarkerId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DotmapError {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
    #[error("parameter '{param}' must be finite")]
    NonFinite { param: &'static str },
    #[error("parameter '{param}' out of range")]
    OutOfRange { param: &'static str, min: f64, max: f64, got: f64 },
    #[error("unknown color '{0}'")]
    UnknownColor(String),
    #[error("invalid marker id '{0}'")]
    UnknownMarker(MarkerId),
    #[error("marker '{0}' cannot be removed")]
    NotRemovable(MarkerId),
    #[error("location was already resolved")]
    AlreadyResolved,
    #[error("map is still waiting for a location")]
    NotReady,
}

impl DotmapError {
    /// Stable code used in JS error envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            DotmapError::InvalidConfig(_) => "invalid_config",
            DotmapError::NonFinite { .. } => "non_finite",
            DotmapError::OutOfRange { .. } => "out_of_range",
            DotmapError::UnknownColor(_) => "unknown_color",
            DotmapError::UnknownMarker(_) => "invalid_id",
            DotmapError::NotRemovable(_) => "not_removable",
            DotmapError::AlreadyResolved => "already_resolved",
            DotmapError::NotReady => "not_ready",
        }
    }
}

pub(crate) fn finite(param: &'static str, v: f64) -> Result<f64, DotmapError> {
    if v.is_finite() { Ok(v) } else { Err(DotmapError::NonFinite { param }) }
}

pub(crate) fn in_range(param: &'static str, v: f64, min: f64, max: f64) -> Result<f64, DotmapError> {
    let v = finite(param, v)?;
    if v < min || v > max {
        return Err(DotmapError::OutOfRange { param, min, max, got: v });
    }
    Ok(v)
}
