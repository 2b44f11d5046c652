use crate::config::MapConfig;
use crate::geo::LatLng;
use crate::marker::{Marker, MarkerId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options for the one-shot position request.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoOptions {
    pub enable_high_accuracy: bool,
    pub timeout_ms: u32,
    pub maximum_age_ms: u32,
}

impl Default for GeoOptions {
    fn default() -> Self { GeoOptions { enable_high_accuracy: true, timeout_ms: 10_000, maximum_age_ms: 0 } }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionErrorCode {
    PermissionDenied = 1,
    PositionUnavailable = 2,
    Timeout = 3,
}

impl PositionErrorCode {
    /// Unknown codes are reported as unavailable.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => PositionErrorCode::PermissionDenied,
            3 => PositionErrorCode::Timeout,
            _ => PositionErrorCode::PositionUnavailable,
        }
    }
}

/// What the position request produced.
#[derive(Clone, Debug, PartialEq)]
pub enum LocationOutcome {
    Located { lat: f64, lng: f64, accuracy: f64 },
    Failed { code: PositionErrorCode, message: String },
    Unsupported,
}

impl LocationOutcome {
    pub fn failure(&self) -> Option<LocationFailure> {
        match self {
            LocationOutcome::Located { lat, lng, .. } if lat.is_finite() && lng.is_finite() => None,
            LocationOutcome::Located { .. } => Some(LocationFailure::Failed {
                code: PositionErrorCode::PositionUnavailable,
                message: "position is not finite".into(),
            }),
            LocationOutcome::Failed { code, message } => Some(LocationFailure::Failed { code: *code, message: message.clone() }),
            LocationOutcome::Unsupported => Some(LocationFailure::Unsupported),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum LocationFailure {
    #[error("{message} ({code:?})")]
    Failed { code: PositionErrorCode, message: String },
    #[error("geolocation capability is absent")]
    Unsupported,
}

/// Center, error text and user marker derived from an outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub center: LatLng,
    pub error: Option<String>,
    pub marker: Marker,
}

impl Resolution {
    pub fn from_outcome(outcome: &LocationOutcome, config: &MapConfig) -> Self {
        let fallback = |error: &str| Resolution {
            center: config.default_center,
            error: Some(error.to_string()),
            marker: Marker::user(MarkerId::DEFAULT, config.default_center),
        };
        match *outcome {
            LocationOutcome::Located { lat, lng, .. } if lat.is_finite() && lng.is_finite() => {
                let center = LatLng::new(lat, lng);
                Resolution { center, error: None, marker: Marker::user(MarkerId::USER, center) }
            }
            LocationOutcome::Unsupported => fallback(&config.messages.unsupported),
            _ => fallback(&config.messages.location_failed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_places_user_marker() {
        let r = Resolution::from_outcome(
            &LocationOutcome::Located { lat: 40.0, lng: -70.0, accuracy: 12.0 },
            &MapConfig::default(),
        );
        assert_eq!(r.center, LatLng::new(40.0, -70.0));
        assert!(r.error.is_none());
        assert_eq!(r.marker.id.as_str(), "user");
        assert!(r.marker.is_user && !r.marker.draggable);
    }

    #[test]
    fn every_failure_code_falls_back() {
        for code in [1u16, 2, 3, 99] {
            let r = Resolution::from_outcome(
                &LocationOutcome::Failed { code: PositionErrorCode::from_code(code), message: "x".into() },
                &MapConfig::default(),
            );
            assert_eq!(r.center, LatLng::new(51.505, -0.09));
            assert_eq!(r.marker.id.as_str(), "default");
            assert_eq!(r.error.as_deref(), Some("Unable to retrieve your location. Using default location."));
        }
    }

    #[test]
    fn unsupported_has_its_own_message() {
        let r = Resolution::from_outcome(&LocationOutcome::Unsupported, &MapConfig::default());
        assert_eq!(r.error.as_deref(), Some("Geolocation is not supported by your browser."));
        assert_eq!(r.marker.position, LatLng::new(51.505, -0.09));
    }

    #[test]
    fn nan_position_is_a_failure() {
        let o = LocationOutcome::Located { lat: f64::NAN, lng: 0.0, accuracy: 0.0 };
        assert!(matches!(o.failure(), Some(LocationFailure::Failed { code: PositionErrorCode::PositionUnavailable, .. })));
        assert_eq!(Resolution::from_outcome(&o, &MapConfig::default()).marker.id.as_str(), "default");
    }
}
