use dotmap::{DotPopup, Sidebar, UserPopup};
use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

const SIDEBAR_STYLE: &str = "position:absolute;top:20%;left:10px;background-color:#333;padding:10px;\
border-radius:8px;z-index:1000;color:#fff;font-family:Arial, sans-serif;";
const TITLE_STYLE: &str = "margin:0 0 10px 0;font-size:16px;";
const LOADING_STYLE: &str = "text-align:center;padding:20px;color:#fff;";
const REMOVE_STYLE: &str = "margin-top:5px;padding:5px;cursor:pointer;";

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn html(doc: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    doc.create_element(tag)?.dyn_into::<HtmlElement>().map_err(JsValue::from)
}

pub fn loading(doc: &Document, text: &str) -> Result<HtmlElement, JsValue> {
    let el = html(doc, "div")?;
    el.set_attribute("style", LOADING_STYLE)?;
    el.set_text_content(Some(text));
    Ok(el)
}

fn button_style(border: &str, pressed: bool) -> String {
    format!(
        "display:block;width:100%;padding:8px;margin:5px 0;background-color:{};color:#fff;\
border:2px solid {};border-radius:4px;cursor:pointer;font-size:14px;text-align:left;",
        if pressed { "#555" } else { "#444" },
        border
    )
}

/// Color picker panel. Buttons keep their DOM nodes; `update` only
/// restyles them.
pub struct SidebarDom {
    pub root: HtmlElement,
    buttons: Vec<HtmlElement>,
}

impl SidebarDom {
    /// `on_pick` is attached to every button and reads the color from
    /// the button's `data-color` attribute.
    pub fn build(doc: &Document, model: &Sidebar, on_pick: &Function) -> Result<SidebarDom, JsValue> {
        let root = html(doc, "div")?;
        root.set_attribute("style", SIDEBAR_STYLE)?;
        root.set_attribute("role", "region")?;
        root.set_attribute("aria-label", model.aria_label)?;
        let title = html(doc, "h3")?;
        title.set_attribute("style", TITLE_STYLE)?;
        title.set_text_content(Some(model.title));
        root.append_child(&title)?;
        let mut buttons = Vec::with_capacity(model.buttons.len());
        for b in &model.buttons {
            let el = html(doc, "button")?;
            el.set_attribute("type", "button")?;
            el.set_attribute("data-color", b.name)?;
            el.set_text_content(Some(b.name));
            el.add_event_listener_with_callback("click", on_pick)?;
            root.append_child(&el)?;
            buttons.push(el);
        }
        let dom = SidebarDom { root, buttons };
        dom.update(model)?;
        Ok(dom)
    }

    pub fn update(&self, model: &Sidebar) -> Result<(), JsValue> {
        for (el, b) in self.buttons.iter().zip(&model.buttons) {
            el.set_attribute("style", &button_style(b.border_color, b.pressed))?;
            el.set_attribute("aria-pressed", if b.pressed { "true" } else { "false" })?;
        }
        Ok(())
    }

    pub fn button(&self, name: &str) -> Option<&HtmlElement> {
        self.buttons.iter().find(|b| b.get_attribute("data-color").as_deref() == Some(name))
    }
}

pub fn user_popup(doc: &Document, popup: &UserPopup) -> Result<HtmlElement, JsValue> {
    let root = html(doc, "div")?;
    root.append_with_str_1(&popup.message)?;
    let br = doc.create_element("br")?;
    root.append_child(&br)?;
    root.append_with_str_1(&popup.hint)?;
    Ok(root)
}

/// Dot popup: coordinate text plus the optional remove button. The
/// text span is returned so it can be refreshed after a drag.
pub struct DotPopupDom {
    pub root: HtmlElement,
    pub text: Element,
    pub remove: Option<HtmlElement>,
}

impl DotPopupDom {
    pub fn build(doc: &Document, popup: &DotPopup) -> Result<DotPopupDom, JsValue> {
        let root = html(doc, "div")?;
        let text = doc.create_element("span")?;
        text.set_text_content(Some(&popup.text));
        root.append_child(&text)?;
        let br = doc.create_element("br")?;
        root.append_child(&br)?;
        let remove = match &popup.remove {
            Some(control) => {
                let b = html(doc, "button")?;
                b.set_attribute("type", "button")?;
                b.set_attribute("style", REMOVE_STYLE)?;
                b.set_attribute("aria-label", &control.aria_label)?;
                b.set_text_content(Some(control.label));
                root.append_child(&b)?;
                Some(b)
            }
            None => None,
        };
        Ok(DotPopupDom { root, text, remove })
    }

    pub fn set_text(&self, text: &str) { self.text.set_text_content(Some(text)); }
}

/// Circle drawn by a div icon, since Leaflet circle markers cannot be dragged.
pub fn dot_html(fill: &str, border: &str, radius: f64, weight: f64, opacity: f64) -> String {
    let d = radius * 2.0;
    format!(
        "<span style=\"display:block;box-sizing:content-box;width:{d}px;height:{d}px;border:{weight}px solid {border};\
border-radius:50%;\"><span style=\"display:block;width:100%;height:100%;border-radius:50%;\
background-color:{fill};opacity:{opacity};\"></span></span>"
    )
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use dotmap::{Action, LatLng, LocationOutcome, MapApp, MarkerView, PALETTE};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn sidebar_marks_pressed_button() {
        let doc = document().unwrap();
        let mut app = MapApp::default();
        let noop = Function::new_no_args("");
        let dom = SidebarDom::build(&doc, &app.sidebar(), &noop).unwrap();
        assert_eq!(dom.root.get_attribute("aria-label").as_deref(), Some("Color selection sidebar"));
        assert_eq!(dom.button("Red").unwrap().get_attribute("aria-pressed").as_deref(), Some("true"));
        app.dispatch(Action::SelectColor(PALETTE[1]));
        dom.update(&app.sidebar()).unwrap();
        assert_eq!(dom.button("Red").unwrap().get_attribute("aria-pressed").as_deref(), Some("false"));
        assert_eq!(dom.button("Blue").unwrap().get_attribute("aria-pressed").as_deref(), Some("true"));
        assert!(dom.button("Blue").unwrap().get_attribute("style").unwrap().contains("#0000cc"));
    }

    #[wasm_bindgen_test]
    fn dot_popup_has_remove_button() {
        let doc = document().unwrap();
        let mut app = MapApp::default();
        app.dispatch(Action::LocationResolved(LocationOutcome::Unsupported));
        app.dispatch(Action::MapClick(LatLng::new(1.0, 2.0)));
        let scene = app.scene().unwrap();
        let MarkerView::Dot { popup, .. } = &scene.markers[1] else { panic!("expected dot") };
        let dom = DotPopupDom::build(&doc, popup).unwrap();
        assert_eq!(dom.text.text_content().as_deref(), Some("Custom Red dot at [1.0000, 2.0000]"));
        let remove = dom.remove.unwrap();
        assert_eq!(remove.text_content().as_deref(), Some("Remove Dot"));
        assert_eq!(remove.get_attribute("aria-label").as_deref(), Some("Remove Red dot"));
    }

    #[wasm_bindgen_test]
    fn user_popup_text() {
        let doc = document().unwrap();
        let popup = UserPopup { message: "Your current location.".into(), hint: "Explore the map to learn Leaflet!".into() };
        let el = user_popup(&doc, &popup).unwrap();
        assert_eq!(el.text_content().as_deref(), Some("Your current location.Explore the map to learn Leaflet!"));
    }
}
