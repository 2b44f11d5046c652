use dotmap::DotmapError;
use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;

fn set_kv(obj: &Object, k: &str, v: &JsValue) { let _ = Reflect::set(obj, &JsValue::from_str(k), v); }

fn new_obj() -> Object { Object::new() }

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn invalid_id(kind: &str, id: &str) -> JsValue {
    let d = new_obj();
    set_kv(&d, "kind", &JsValue::from_str(kind));
    set_kv(&d, "id", &JsValue::from_str(id));
    err("invalid_id", format!("invalid {} id", kind), Some(d.into()))
}

/// Envelope for a core error, with the offending value under `data`.
pub fn from_core(e: &DotmapError) -> JsValue {
    match e {
        DotmapError::NonFinite { param } => non_finite(param),
        DotmapError::UnknownMarker(id) => invalid_id("marker", id.as_str()),
        DotmapError::NotRemovable(id) => {
            let d = new_obj(); set_kv(&d, "id", &JsValue::from_str(id.as_str()));
            err(e.code(), e.to_string(), Some(d.into()))
        }
        DotmapError::UnknownColor(name) => {
            let d = new_obj(); set_kv(&d, "name", &JsValue::from_str(name));
            err(e.code(), e.to_string(), Some(d.into()))
        }
        DotmapError::OutOfRange { param, min, max, got } => {
            let d = new_obj();
            set_kv(&d, "param", &JsValue::from_str(param));
            set_kv(&d, "min", &JsValue::from_f64(*min));
            set_kv(&d, "max", &JsValue::from_f64(*max));
            set_kv(&d, "got", &JsValue::from_f64(*got));
            err(e.code(), e.to_string(), Some(d.into()))
        }
        DotmapError::InvalidConfig(_) | DotmapError::AlreadyResolved | DotmapError::NotReady => {
            err(e.code(), e.to_string(), None)
        }
    }
}
