use crate::error::{finite, in_range, DotmapError};
use crate::geo::LatLng;
use crate::location::GeoOptions;
use crate::view::DotStyle;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CENTER: LatLng = LatLng::new(51.505, -0.09);
pub const DEFAULT_ZOOM: f64 = 13.0;
pub const MAX_ZOOM: f64 = 22.0;
pub const TILE_URL: &str = "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png";
pub const ATTRIBUTION: &str = "&copy; <a href=\"https://carto.com/attributions\">CARTO</a> | &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a>";

/// Leaflet icon definition for the user marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IconSpec {
    pub icon_url: String,
    pub icon_size: [i32; 2],
    pub icon_anchor: [i32; 2],
    pub popup_anchor: [i32; 2],
    pub shadow_url: String,
    pub shadow_size: [i32; 2],
}

impl Default for IconSpec {
    fn default() -> Self {
        IconSpec {
            icon_url: "https://unpkg.com/leaflet@1.9.4/dist/images/marker-icon-2x.png".into(),
            icon_size: [25, 41],
            icon_anchor: [12, 41],
            popup_anchor: [1, -34],
            shadow_url: "https://unpkg.com/leaflet@1.9.4/dist/images/marker-shadow.png".into(),
            shadow_size: [41, 41],
        }
    }
}

/// User-facing strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub location_failed: String,
    pub unsupported: String,
    pub greeting: String,
    pub hint: String,
    pub loading: String,
}

impl Default for Messages {
    fn default() -> Self {
        Messages {
            location_failed: "Unable to retrieve your location. Using default location.".into(),
            unsupported: "Geolocation is not supported by your browser.".into(),
            greeting: "Your current location.".into(),
            hint: "Explore the map to learn Leaflet!".into(),
            loading: "Loading your location...".into(),
        }
    }
}

/// Session-wide settings, fixed once the map is created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub default_center: LatLng,
    pub zoom: f64,
    pub tile_url: String,
    pub attribution: String,
    pub geolocation: GeoOptions,
    pub dot: DotStyle,
    pub user_icon: IconSpec,
    pub messages: Messages,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            default_center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            tile_url: TILE_URL.into(),
            attribution: ATTRIBUTION.into(),
            geolocation: GeoOptions::default(),
            dot: DotStyle::default(),
            user_icon: IconSpec::default(),
            messages: Messages::default(),
        }
    }
}

impl MapConfig {
    pub fn from_json(s: &str) -> Result<Self, DotmapError> {
        let cfg: MapConfig = serde_json::from_str(s)?;
        cfg.validate()
    }

    pub fn from_value(v: serde_json::Value) -> Result<Self, DotmapError> {
        let cfg: MapConfig = serde_json::from_value(v)?;
        cfg.validate()
    }

    pub fn validate(self) -> Result<Self, DotmapError> {
        finite("default_center.lat", self.default_center.lat)?;
        finite("default_center.lng", self.default_center.lng)?;
        in_range("zoom", self.zoom, 0.0, MAX_ZOOM)?;
        in_range("geolocation.timeout_ms", self.geolocation.timeout_ms as f64, 1.0, f64::MAX)?;
        in_range("dot.radius", self.dot.radius, f64::MIN_POSITIVE, f64::MAX)?;
        in_range("dot.fill_opacity", self.dot.fill_opacity, 0.0, 1.0)?;
        Ok(self)
    }
}
