use crate::dom::{self, DotPopupDom, SidebarDom};
use crate::interop::{latlng_from_js, latlng_to_js, new_obj, pair, set_kv, to_js};
use crate::{leaflet, log};
use dotmap::{Action, Dispatch, DotColor, IconSpec, LatLng, MapApp, MarkerId, MarkerView, Scene, View};
use js_sys::Reflect;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, Node};

pub(crate) type Shared = Rc<RefCell<Inner>>;
type Handler = Closure<dyn FnMut(Event)>;
type LeafletHandler = Closure<dyn FnMut(JsValue)>;

/// One rendered marker and the listeners bound to it.
struct MarkerLayer {
    layer: leaflet::Marker,
    position: LatLng,
    popup: Option<DotPopupDom>,
    _drag: LeafletHandler,
    _remove: Option<Handler>,
}

struct Surface {
    map: leaflet::Map,
    element: HtmlElement,
    sidebar: SidebarDom,
    seen_center: u64,
    _click: LeafletHandler,
    _pick: Handler,
}

pub(crate) struct Inner {
    pub(crate) app: MapApp,
    doc: Document,
    container: HtmlElement,
    placeholder: Option<HtmlElement>,
    surface: Option<Surface>,
    layers: HashMap<MarkerId, MarkerLayer>,
    // Layers removed while one of their own handlers was running.
    retired: Vec<MarkerLayer>,
    closed: bool,
}

impl Inner {
    pub(crate) fn new(app: MapApp, doc: Document, container: HtmlElement) -> Self {
        Inner { app, doc, container, placeholder: None, surface: None, layers: HashMap::new(), retired: Vec::new(), closed: false }
    }

    /// Brings the DOM and the Leaflet layers in line with the current view.
    pub(crate) fn render(&mut self, me: &Weak<RefCell<Inner>>) -> Result<(), JsValue> {
        self.retired.clear();
        if self.closed {
            return Ok(());
        }
        match self.app.view() {
            View::Loading { text } => {
                if self.placeholder.is_none() {
                    let el = dom::loading(&self.doc, &text)?;
                    self.container.append_child(&el)?;
                    self.placeholder = Some(el);
                }
                Ok(())
            }
            View::Ready(scene) => {
                if let Some(el) = self.placeholder.take() {
                    el.remove();
                }
                if self.surface.is_none() {
                    self.surface = Some(self.mount_surface(&scene, me)?);
                }
                self.sync_view(&scene);
                self.sync_markers(&scene, me)?;
                if let Some(s) = &self.surface {
                    s.sidebar.update(&self.app.sidebar())?;
                }
                Ok(())
            }
        }
    }

    fn mount_surface(&self, scene: &Scene, me: &Weak<RefCell<Inner>>) -> Result<Surface, JsValue> {
        let pick = {
            let me = me.clone();
            Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
                let name = ev
                    .current_target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.get_attribute("data-color"));
                if let Some(color) = name.as_deref().and_then(DotColor::by_name) {
                    dispatch(&me, Action::SelectColor(color));
                }
            })
        };
        let element = dom::html(&self.doc, "div")?;
        element.set_attribute("style", "height:100%;width:100%;")?;
        let opts = new_obj();
        set_kv(&opts, "center", &latlng_to_js(self.app.config().default_center));
        set_kv(&opts, "zoom", &JsValue::from_f64(scene.zoom));
        self.container.append_child(&element)?;
        let map = match leaflet::map(&element, &opts) {
            Ok(map) => map,
            Err(e) => {
                element.remove();
                return Err(e);
            }
        };
        // A half-built surface is taken down again so the next render starts clean.
        let sidebar = match self.finish_surface(scene, &map, &element, &pick) {
            Ok(sidebar) => sidebar,
            Err(e) => {
                map.remove();
                element.remove();
                return Err(e);
            }
        };

        let click = {
            let me = me.clone();
            Closure::<dyn FnMut(JsValue)>::new(move |ev: JsValue| {
                let latlng = Reflect::get(&ev, &JsValue::from_str("latlng")).unwrap_or(JsValue::UNDEFINED);
                if let Some(p) = latlng_from_js(&latlng) {
                    dispatch(&me, Action::MapClick(p));
                }
            })
        };
        map.on("click", click.as_ref().unchecked_ref());
        log::info("map ready");
        // Revision 0 is the center the map was created on.
        Ok(Surface { map, element, sidebar, seen_center: 0, _click: click, _pick: pick })
    }

    fn finish_surface(&self, scene: &Scene, map: &leaflet::Map, element: &HtmlElement, pick: &Handler) -> Result<SidebarDom, JsValue> {
        let tile_opts = new_obj();
        set_kv(&tile_opts, "attribution", &JsValue::from_str(&scene.tile.attribution));
        leaflet::tile_layer(&scene.tile.url, &tile_opts)?.add_to(map);
        let sidebar = SidebarDom::build(&self.doc, &self.app.sidebar(), pick.as_ref().unchecked_ref())?;
        let anchor: &Node = element;
        self.container.insert_before(&sidebar.root, Some(anchor))?;
        Ok(sidebar)
    }

    fn sync_view(&mut self, scene: &Scene) {
        if let Some(s) = self.surface.as_mut() {
            if s.seen_center != scene.center_revision {
                s.map.set_view(&latlng_to_js(scene.center), scene.zoom);
                s.seen_center = scene.center_revision;
            }
        }
    }

    fn sync_markers(&mut self, scene: &Scene, me: &Weak<RefCell<Inner>>) -> Result<(), JsValue> {
        let Some(map) = self.surface.as_ref().map(|s| s.map.clone()) else { return Ok(()) };
        let live: Vec<&MarkerId> = scene.markers.iter().map(MarkerView::id).collect();
        let gone: Vec<MarkerId> = self.layers.keys().filter(|id| !live.contains(id)).cloned().collect();
        for id in gone {
            if let Some(l) = self.layers.remove(&id) {
                l.layer.remove();
                self.retired.push(l);
            }
        }
        for view in &scene.markers {
            match self.layers.get_mut(view.id()) {
                Some(l) => {
                    if l.position != view.position() {
                        l.layer.set_lat_lng(&latlng_to_js(view.position()));
                        l.position = view.position();
                    }
                    if let (Some(dom), MarkerView::Dot { popup, .. }) = (&l.popup, view) {
                        dom.set_text(&popup.text);
                    }
                }
                None => {
                    let l = self.build_layer(view, &scene.user_icon, me)?;
                    l.layer.add_to(&map);
                    if let (Some(el), MarkerView::Dot { aria_label, .. }) = (l.layer.get_element(), view) {
                        el.set_attribute("aria-label", aria_label)?;
                    }
                    self.layers.insert(view.id().clone(), l);
                }
            }
        }
        Ok(())
    }

    fn build_layer(&self, view: &MarkerView, icon: &IconSpec, me: &Weak<RefCell<Inner>>) -> Result<MarkerLayer, JsValue> {
        let opts = new_obj();
        set_kv(&opts, "draggable", &JsValue::from_bool(view.draggable()));
        let (popup_el, popup, remove) = match view {
            MarkerView::User { popup, aria_label, .. } => {
                set_kv(&opts, "icon", &leaflet::icon(&to_js(icon))?);
                set_kv(&opts, "alt", &JsValue::from_str(aria_label));
                (dom::user_popup(&self.doc, popup)?, None, None)
            }
            MarkerView::Dot { id, color, style, popup, .. } => {
                let size = (2.0 * (style.radius + style.weight)).round() as i32;
                let icon_opts = new_obj();
                set_kv(&icon_opts, "className", &JsValue::from_str("dotmap-dot"));
                let html = dom::dot_html(color.fill_color, color.border_color, style.radius, style.weight, style.fill_opacity);
                set_kv(&icon_opts, "html", &JsValue::from_str(&html));
                set_kv(&icon_opts, "iconSize", &pair(size, size));
                set_kv(&icon_opts, "iconAnchor", &pair(size / 2, size / 2));
                set_kv(&opts, "icon", &leaflet::div_icon(&icon_opts)?);
                let dom = DotPopupDom::build(&self.doc, popup)?;
                let remove = match &dom.remove {
                    Some(button) => {
                        let me = me.clone();
                        let id = id.clone();
                        let h = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
                            let out = dispatch(&me, Action::RemoveDot { id: id.clone() });
                            if out.consumed {
                                ev.stop_propagation();
                            }
                        });
                        button.add_event_listener_with_callback("click", h.as_ref().unchecked_ref())?;
                        Some(h)
                    }
                    None => None,
                };
                leaflet::disable_click_propagation(&dom.root);
                (dom.root.clone(), Some(dom), remove)
            }
        };
        let layer = leaflet::marker(&latlng_to_js(view.position()), &opts)?;
        layer.bind_popup(&popup_el);

        let drag = {
            let me = me.clone();
            let id = view.id().clone();
            Closure::<dyn FnMut(JsValue)>::new(move |ev: JsValue| {
                let target: leaflet::Marker = Reflect::get(&ev, &JsValue::from_str("target"))
                    .unwrap_or(JsValue::UNDEFINED)
                    .unchecked_into();
                if let Some(position) = latlng_from_js(&target.get_lat_lng()) {
                    dispatch(&me, Action::DragEnd { id: id.clone(), position });
                }
            })
        };
        layer.on("dragend", drag.as_ref().unchecked_ref());
        Ok(MarkerLayer { layer, position: view.position(), popup, _drag: drag, _remove: remove })
    }

    /// Safe to call more than once.
    pub(crate) fn teardown(&mut self) {
        self.closed = true;
        for (_, l) in self.layers.drain() {
            l.layer.remove();
        }
        self.retired.clear();
        if let Some(s) = self.surface.take() {
            s.map.remove();
            s.element.remove();
            s.sidebar.root.remove();
        }
        if let Some(el) = self.placeholder.take() {
            el.remove();
        }
    }
}

// Leaflet and the DOM keep calling our closures until they are detached.
impl Drop for Inner {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Routes one event into the app and re-renders on change. Events that
/// arrive while a render is in progress are dropped.
pub(crate) fn dispatch(me: &Weak<RefCell<Inner>>, action: Action) -> Dispatch {
    let Some(shared) = me.upgrade() else { return Dispatch::default() };
    let Ok(mut inner) = shared.try_borrow_mut() else {
        log::warn("dotmap: event dropped during render");
        return Dispatch::default();
    };
    let out = inner.app.dispatch(action);
    if out.changed {
        if let Err(e) = inner.render(me) {
            log::error(&format!("dotmap: render failed: {:?}", e));
        }
    }
    out
}
