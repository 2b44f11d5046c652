use crate::interop::{get_f64, get_str};
use dotmap::{GeoOptions, LocationOutcome, PositionErrorCode};
use js_sys::{Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::PositionOptions;

/// One-shot position request. Never retried; the browser's timeout
/// turns a hang into a `Failed` outcome.
pub async fn locate(opts: &GeoOptions) -> LocationOutcome {
    let Some(window) = web_sys::window() else { return LocationOutcome::Unsupported };
    let navigator = window.navigator();
    if !Reflect::has(&navigator, &JsValue::from_str("geolocation")).unwrap_or(false) {
        return LocationOutcome::Unsupported;
    }
    let Ok(geolocation) = navigator.geolocation() else { return LocationOutcome::Unsupported };

    let options = PositionOptions::new();
    options.set_enable_high_accuracy(opts.enable_high_accuracy);
    options.set_timeout(opts.timeout_ms);
    options.set_maximum_age(opts.maximum_age_ms);

    let promise = Promise::new(&mut |resolve, reject| {
        if let Err(e) =
            geolocation.get_current_position_with_error_callback_and_options(&resolve, Some(&reject), &options)
        {
            let _ = reject.call1(&JsValue::UNDEFINED, &e);
        }
    });
    match JsFuture::from(promise).await {
        Ok(position) => from_position(&position),
        Err(err) => from_error(&err),
    }
}

fn from_position(position: &JsValue) -> LocationOutcome {
    let coords = Reflect::get(position, &JsValue::from_str("coords")).unwrap_or(JsValue::UNDEFINED);
    match (get_f64(&coords, "latitude"), get_f64(&coords, "longitude")) {
        (Some(lat), Some(lng)) => LocationOutcome::Located {
            lat,
            lng,
            accuracy: get_f64(&coords, "accuracy").unwrap_or(f64::NAN),
        },
        _ => LocationOutcome::Failed {
            code: PositionErrorCode::PositionUnavailable,
            message: "position has no coordinates".into(),
        },
    }
}

fn from_error(err: &JsValue) -> LocationOutcome {
    let code = get_f64(err, "code").map_or(PositionErrorCode::PositionUnavailable, |c| {
        PositionErrorCode::from_code(c as u16)
    });
    let message = get_str(err, "message").unwrap_or_else(|| format!("{:?}", err));
    LocationOutcome::Failed { code, message }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn position_error_maps_code_and_message() {
        let err = js_sys::JSON::parse(r#"{"code": 1, "message": "User denied Geolocation"}"#).unwrap();
        assert_eq!(
            from_error(&err),
            LocationOutcome::Failed {
                code: PositionErrorCode::PermissionDenied,
                message: "User denied Geolocation".into(),
            }
        );
        let timeout = js_sys::JSON::parse(r#"{"code": 3, "message": "Timeout expired"}"#).unwrap();
        assert!(matches!(from_error(&timeout), LocationOutcome::Failed { code: PositionErrorCode::Timeout, .. }));
    }

    #[wasm_bindgen_test]
    fn position_reads_coords() {
        let pos = js_sys::JSON::parse(r#"{"coords": {"latitude": 48.85, "longitude": 2.35, "accuracy": 30}}"#).unwrap();
        assert_eq!(from_position(&pos), LocationOutcome::Located { lat: 48.85, lng: 2.35, accuracy: 30.0 });
        let empty = js_sys::JSON::parse("{}").unwrap();
        assert!(matches!(from_position(&empty), LocationOutcome::Failed { .. }));
    }
}
