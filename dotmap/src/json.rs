use crate::app::{MapApp, Phase};
use crate::geo::LatLng;
use crate::marker::Marker;
use serde::Serialize;
use serde_json::Value;

pub fn to_json_impl(app: &MapApp) -> Value {
    #[derive(Serialize)]
    struct Snapshot<'a> {
        version: u32,
        phase: &'static str,
        center: LatLng,
        location_error: Option<&'a str>,
        selected_color: &'static str,
        markers: &'a [Marker],
    }
    let state = app.state();
    let snap = Snapshot {
        version: 1,
        phase: match app.phase() {
            Phase::Loading => "loading",
            Phase::Ready => "ready",
        },
        center: state.center,
        location_error: state.location_error.as_deref(),
        selected_color: state.selected_color().name,
        markers: state.markers.as_slice(),
    };
    serde_json::to_value(&snap).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use crate::{Action, LatLng, LocationOutcome, MapApp};
    use serde_json::json;

    #[test]
    fn snapshot_lists_markers_in_order() {
        let mut app = MapApp::default();
        assert_eq!(app.to_json()["phase"], "loading");
        app.dispatch(Action::LocationResolved(LocationOutcome::Unsupported));
        app.dispatch(Action::MapClick(LatLng::new(1.0, 2.0)));
        let v = app.to_json();
        assert_eq!(v["phase"], "ready");
        assert_eq!(v["location_error"], "Geolocation is not supported by your browser.");
        assert_eq!(v["markers"][0]["id"], "default");
        assert!(v["markers"][0].get("color").is_none());
        assert_eq!(v["markers"][1]["position"], json!({"lat": 1.0, "lng": 2.0}));
        assert_eq!(v["markers"][1]["color"]["name"], "Red");
        assert_eq!(v["selected_color"], "Red");
    }
}
