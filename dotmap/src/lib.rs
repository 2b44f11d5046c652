pub mod app;
pub mod config;
pub mod error;
pub mod geo;
pub mod location;
pub mod marker;
pub mod palette;
pub mod view;
mod json;

pub use app::{Action, AppState, Dispatch, MapApp, Phase};
pub use config::{IconSpec, MapConfig, Messages};
pub use error::DotmapError;
pub use geo::LatLng;
pub use location::{GeoOptions, LocationFailure, LocationOutcome, PositionErrorCode, Resolution};
pub use marker::{Clock, Marker, MarkerId, MarkerStore, SequenceClock};
pub use palette::{ColorPalette, DotColor, PALETTE};
pub use view::{
    ColorButton, DotPopup, DotStyle, MarkerView, RemoveControl, Scene, Sidebar, TileSource,
    UserPopup, View,
};
