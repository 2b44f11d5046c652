use serde::Serialize;
use wasm_bindgen::JsValue;

/// Plain objects instead of ES maps, so JSON.stringify works on the result.
pub fn to_js<T: Serialize + ?Sized>(v: &T) -> JsValue {
    v.serialize(&serde_wasm_bindgen::Serializer::json_compatible()).unwrap_or(JsValue::NULL)
}

pub fn config_from_js(v: JsValue) -> Result<dotmap::MapConfig, dotmap::DotmapError> {
    if v.is_undefined() || v.is_null() {
        return Ok(dotmap::MapConfig::default());
    }
    let json: serde_json::Value = serde_wasm_bindgen::from_value(v)
        .map_err(|e| dotmap::DotmapError::InvalidConfig(serde::de::Error::custom(e.to_string())))?;
    dotmap::MapConfig::from_value(json)
}

/// Marker ids stamped with `Date.now()`.
pub struct JsClock;

impl dotmap::Clock for JsClock {
    fn now_ms(&self) -> u64 { js_sys::Date::now() as u64 }
}

pub fn log_geolocation_error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(&format!("Geolocation error: {}", message)));
}
