use dotmap::LatLng;
use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

pub use dotmap_wasm::interop::{config_from_js, log_geolocation_error, to_js, JsClock};

pub fn new_obj() -> Object { Object::new() }

pub fn set_kv(obj: &Object, key: &str, val: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), val);
}

pub fn get_f64(obj: &JsValue, key: &str) -> Option<f64> {
    Reflect::get(obj, &JsValue::from_str(key)).ok()?.as_f64()
}

pub fn get_str(obj: &JsValue, key: &str) -> Option<String> {
    Reflect::get(obj, &JsValue::from_str(key)).ok()?.as_string()
}

/// `[lat, lng]`, accepted by every Leaflet call taking a LatLng.
pub fn latlng_to_js(p: LatLng) -> JsValue {
    Array::of2(&JsValue::from_f64(p.lat), &JsValue::from_f64(p.lng)).into()
}

/// Reads `{ lat, lng }` from a Leaflet LatLng or plain object.
pub fn latlng_from_js(v: &JsValue) -> Option<LatLng> {
    LatLng::checked(get_f64(v, "lat")?, get_f64(v, "lng")?).ok()
}

pub fn pair(a: i32, b: i32) -> JsValue {
    Array::of2(&JsValue::from(a), &JsValue::from(b)).into()
}
