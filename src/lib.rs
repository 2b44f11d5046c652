//! Browser map widget: centers on the device location, drops colored
//! dots on click, and lets the user drag or remove them.
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub mod dom;
pub mod geo;
mod interop;
pub mod leaflet;
mod log;
mod widget;

use dotmap::{Action, DotColor, MapApp};
use dotmap_wasm::set_panic_hook;
use widget::{dispatch, Inner, Shared};

#[wasm_bindgen]
pub struct MapWidget {
    shared: Shared,
}

/// Mounts the widget into the element with id `container_id` and starts
/// the location request. `config` may be undefined or a partial config.
#[wasm_bindgen]
pub fn mount(container_id: &str, config: JsValue) -> Result<MapWidget, JsValue> {
    set_panic_hook();
    let config = interop::config_from_js(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let doc = dom::document()?;
    let container = doc
        .get_element_by_id(container_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id '{}'", container_id)))?
        .dyn_into::<web_sys::HtmlElement>()?;
    let geo_opts = config.geolocation;
    let app = MapApp::with_clock(config, Box::new(interop::JsClock));
    let shared: Shared = Rc::new(RefCell::new(Inner::new(app, doc, container)));
    let me = Rc::downgrade(&shared);
    shared.borrow_mut().render(&me)?;

    spawn_local(async move {
        let outcome = geo::locate(&geo_opts).await;
        match outcome.failure() {
            Some(dotmap::LocationFailure::Unsupported) => log::warn("Geolocation is not supported"),
            Some(dotmap::LocationFailure::Failed { message, .. }) => interop::log_geolocation_error(&message),
            None => {}
        }
        dispatch(&me, Action::LocationResolved(outcome));
    });
    Ok(MapWidget { shared })
}

#[wasm_bindgen]
impl MapWidget {
    pub fn is_ready(&self) -> bool {
        self.shared.borrow().app.is_ready()
    }
    /// Snapshot of the session state, for debugging.
    pub fn markers(&self) -> JsValue {
        interop::to_js(&self.shared.borrow().app.to_json())
    }
    pub fn select_color(&self, name: &str) -> bool {
        match DotColor::by_name(name) {
            Some(color) => {
                dispatch(&Rc::downgrade(&self.shared), Action::SelectColor(color));
                true
            }
            None => false,
        }
    }
    /// Removes the map and sidebar. State is discarded.
    pub fn unmount(&self) {
        self.shared.borrow_mut().teardown();
    }
}
