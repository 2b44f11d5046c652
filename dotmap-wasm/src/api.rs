use crate::interop::{config_from_js, log_geolocation_error, to_js};
use crate::MarkerBoard;
use dotmap::{Action, DotColor, LatLng, LocationOutcome, MarkerId, PositionErrorCode, PALETTE};
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;
use crate::error;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// The fixed dot colors, in sidebar order.
#[wasm_bindgen]
pub fn palette() -> JsValue { to_js(&PALETTE) }

impl Default for MarkerBoard {
    fn default() -> Self { MarkerBoard::new() }
}

#[wasm_bindgen]
impl MarkerBoard {
    #[wasm_bindgen(constructor)]
    pub fn new() -> MarkerBoard {
        crate::MarkerBoard::rs_new(dotmap::MapConfig::default())
    }
    /// Throws on an invalid config object.
    pub fn with_config(config: JsValue) -> Result<MarkerBoard, JsValue> {
        config_from_js(config)
            .map(MarkerBoard::rs_new)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
    pub fn with_config_res(config: JsValue) -> JsValue {
        match config_from_js(config) {
            Ok(cfg) => error::ok(MarkerBoard::rs_new(cfg).into()),
            Err(e) => error::from_core(&e),
        }
    }
    pub fn revision(&self) -> u64 {
        self.rs_revision()
    }
    pub fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }

    // Location
    pub fn resolve_located(&mut self, lat: f64, lng: f64, accuracy: f64) -> bool {
        self.inner.dispatch(Action::LocationResolved(LocationOutcome::Located { lat, lng, accuracy })).changed
    }
    pub fn resolve_located_res(&mut self, lat: f64, lng: f64, accuracy: f64) -> JsValue {
        if !lat.is_finite() {
            return error::non_finite("lat");
        }
        if !lng.is_finite() {
            return error::non_finite("lng");
        }
        self.strict(Action::LocationResolved(LocationOutcome::Located { lat, lng, accuracy }))
    }
    /// `code` follows GeolocationPositionError (1 denied, 2 unavailable, 3 timeout).
    pub fn resolve_failed(&mut self, code: u16, message: String) -> bool {
        let outcome = LocationOutcome::Failed { code: PositionErrorCode::from_code(code), message: message.clone() };
        let changed = self.inner.dispatch(Action::LocationResolved(outcome)).changed;
        if changed {
            log_geolocation_error(&message);
        }
        changed
    }
    pub fn resolve_unsupported(&mut self) -> bool {
        self.inner.dispatch(Action::LocationResolved(LocationOutcome::Unsupported)).changed
    }
    pub fn location_error(&self) -> Option<String> {
        self.inner.state().location_error.clone()
    }
    pub fn center(&self) -> JsValue {
        to_js(&self.inner.state().center)
    }

    // Markers
    /// Returns the new marker id, or undefined if the click was ignored.
    pub fn click(&mut self, lat: f64, lng: f64) -> Option<String> {
        self.inner.dispatch(Action::MapClick(LatLng::new(lat, lng))).created.map(|id| id.to_string())
    }
    pub fn click_res(&mut self, lat: f64, lng: f64) -> JsValue {
        match self.inner.try_dispatch(Action::MapClick(LatLng::new(lat, lng))) {
            Ok(d) => match d.created {
                Some(id) => error::ok(JsValue::from_str(id.as_str())),
                None => error::ok(JsValue::NULL),
            },
            Err(e) => error::from_core(&e),
        }
    }
    pub fn drag_end(&mut self, id: &str, lat: f64, lng: f64) -> bool {
        let id = MarkerId::from(id);
        self.inner.dispatch(Action::DragEnd { id, position: LatLng::new(lat, lng) }).changed
    }
    pub fn drag_end_res(&mut self, id: &str, lat: f64, lng: f64) -> JsValue {
        self.strict(Action::DragEnd { id: MarkerId::from(id), position: LatLng::new(lat, lng) })
    }
    /// Removes a dot. The user marker is never removed.
    pub fn remove_dot(&mut self, id: &str) -> bool {
        self.inner.dispatch(Action::RemoveDot { id: MarkerId::from(id) }).changed
    }
    pub fn remove_dot_res(&mut self, id: &str) -> JsValue {
        self.strict(Action::RemoveDot { id: MarkerId::from(id) })
    }
    pub fn marker_count(&self) -> u32 {
        self.inner.markers().len() as u32
    }
    pub fn get_marker(&self, id: &str) -> JsValue {
        match self.inner.markers().get(&MarkerId::from(id)) {
            Some(m) => to_js(m),
            None => JsValue::NULL,
        }
    }
    pub fn get_marker_res(&self, id: &str) -> JsValue {
        match self.inner.markers().get(&MarkerId::from(id)) {
            Some(m) => error::ok(to_js(m)),
            None => error::invalid_id("marker", id),
        }
    }
    pub fn marker_ids(&self) -> Vec<String> {
        self.inner.markers().iter().map(|m| m.id.to_string()).collect()
    }

    // Colors
    pub fn select_color(&mut self, name: &str) -> bool {
        match DotColor::by_name(name) {
            Some(c) => {
                self.inner.dispatch(Action::SelectColor(c));
                true
            }
            None => false,
        }
    }
    pub fn select_color_res(&mut self, name: &str) -> JsValue {
        match DotColor::by_name(name) {
            Some(c) => self.strict(Action::SelectColor(c)),
            None => error::from_core(&dotmap::DotmapError::UnknownColor(name.to_string())),
        }
    }
    pub fn selected_color(&self) -> JsValue {
        to_js(&self.inner.selected_color())
    }

    // Views
    /// `{ phase: "loading", text }` or `{ phase: "ready", center, zoom, markers, ... }`.
    pub fn scene(&self) -> JsValue {
        to_js(&self.inner.view())
    }
    pub fn sidebar(&self) -> JsValue {
        to_js(&self.inner.sidebar())
    }
    pub fn to_json(&self) -> JsValue {
        to_js(&self.inner.to_json())
    }
}

impl MarkerBoard {
    fn strict(&mut self, action: Action) -> JsValue {
        match self.inner.try_dispatch(action) {
            Ok(d) => error::ok(JsValue::from_bool(d.changed)),
            Err(e) => error::from_core(&e),
        }
    }
}
