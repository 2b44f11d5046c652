use crate::error::{finite, DotmapError};
use serde::{Deserialize, Serialize};

/// Geographic coordinate in degrees. Range is not enforced.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self { LatLng { lat, lng } }

    pub fn checked(lat: f64, lng: f64) -> Result<Self, DotmapError> {
        Ok(LatLng { lat: finite("lat", lat)?, lng: finite("lng", lng)? })
    }

    pub fn is_finite(&self) -> bool { self.lat.is_finite() && self.lng.is_finite() }

    /// `[lat, lng]` with 4 decimals, as shown in dot popups.
    pub fn label(&self) -> String { format!("[{:.4}, {:.4}]", self.lat, self.lng) }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self { LatLng { lat, lng } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_rounds_to_four_places() {
        assert_eq!(LatLng::new(51.505, -0.09).label(), "[51.5050, -0.0900]");
        assert_eq!(LatLng::new(10.123456, 20.0).label(), "[10.1235, 20.0000]");
    }

    #[test]
    fn checked_rejects_non_finite() {
        assert!(LatLng::checked(f64::NAN, 0.0).is_err());
        assert!(LatLng::checked(0.0, f64::INFINITY).is_err());
        assert_eq!(LatLng::checked(95.0, 200.0).unwrap(), LatLng::new(95.0, 200.0));
    }
}
