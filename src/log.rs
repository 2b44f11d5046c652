use wasm_bindgen::JsValue;

pub fn info(msg: &str) { web_sys::console::log_1(&JsValue::from_str(msg)); }
pub fn warn(msg: &str) { web_sys::console::warn_1(&JsValue::from_str(msg)); }
pub fn error(msg: &str) { web_sys::console::error_1(&JsValue::from_str(msg)); }
