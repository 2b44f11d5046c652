//! Bindings for the parts of Leaflet (global `L`) the widget drives.
use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    pub type Map;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    pub fn map(el: &HtmlElement, options: &JsValue) -> Result<Map, JsValue>;
    #[wasm_bindgen(method, js_name = setView)]
    pub fn set_view(this: &Map, center: &JsValue, zoom: f64) -> Map;
    #[wasm_bindgen(method)]
    pub fn on(this: &Map, event: &str, handler: &Function) -> Map;
    #[wasm_bindgen(method)]
    pub fn remove(this: &Map) -> Map;

    #[derive(Debug, Clone)]
    pub type TileLayer;

    #[wasm_bindgen(catch, js_namespace = L, js_name = tileLayer)]
    pub fn tile_layer(url: &str, options: &JsValue) -> Result<TileLayer, JsValue>;
    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &TileLayer, map: &Map) -> TileLayer;

    #[derive(Debug, Clone)]
    pub type Marker;

    #[wasm_bindgen(catch, js_namespace = L, js_name = marker)]
    pub fn marker(latlng: &JsValue, options: &JsValue) -> Result<Marker, JsValue>;
    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Marker, map: &Map) -> Marker;
    #[wasm_bindgen(method)]
    pub fn on(this: &Marker, event: &str, handler: &Function) -> Marker;
    #[wasm_bindgen(method)]
    pub fn remove(this: &Marker) -> Marker;
    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &Marker, content: &HtmlElement) -> Marker;
    #[wasm_bindgen(method, js_name = setLatLng)]
    pub fn set_lat_lng(this: &Marker, latlng: &JsValue) -> Marker;
    #[wasm_bindgen(method, js_name = getLatLng)]
    pub fn get_lat_lng(this: &Marker) -> JsValue;
    #[wasm_bindgen(method, js_name = getElement)]
    pub fn get_element(this: &Marker) -> Option<HtmlElement>;

    #[wasm_bindgen(catch, js_namespace = L, js_name = icon)]
    pub fn icon(options: &JsValue) -> Result<JsValue, JsValue>;
    #[wasm_bindgen(catch, js_namespace = L, js_name = divIcon)]
    pub fn div_icon(options: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["L", "DomEvent"], js_name = disableClickPropagation)]
    pub fn disable_click_propagation(el: &HtmlElement);
}
