//! Pointer-following region label.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

pub const TOOLTIP_OFFSET_X: f64 = 14.0;
pub const TOOLTIP_OFFSET_Y: f64 = -28.0;

/// Floating label that tracks the pointer over region shapes. Lives on
/// `<body>` so map repaints never move it.
pub struct Tooltip {
    node: Element,
}

impl Tooltip {
    pub fn create(document: &Document) -> Result<Self, JsValue> {
        let node = document.create_element("div")?;
        node.set_class_name("map-tooltip");
        if let Some(styled) = node.dyn_ref::<HtmlElement>() {
            let style = styled.style();
            style.set_property("position", "absolute").ok();
            style.set_property("pointer-events", "none").ok();
            style.set_property("opacity", "0").ok();
            style.set_property("z-index", "50").ok();
        }
        if let Some(body) = document.body() {
            body.append_child(&node)?;
        }
        Ok(Self { node })
    }

    /// Moves the label next to the pointer (page coordinates) and shows it.
    pub fn show(&self, label: &str, page_x: f64, page_y: f64) {
        self.node.set_text_content(Some(label));
        if let Some(styled) = self.node.dyn_ref::<HtmlElement>() {
            let style = styled.style();
            style
                .set_property("left", &format!("{}px", page_x + TOOLTIP_OFFSET_X))
                .ok();
            style
                .set_property("top", &format!("{}px", page_y + TOOLTIP_OFFSET_Y))
                .ok();
            style.set_property("opacity", "1").ok();
        }
    }

    pub fn hide(&self) {
        if let Some(styled) = self.node.dyn_ref::<HtmlElement>() {
            styled.style().set_property("opacity", "0").ok();
        }
    }

    pub fn remove(&self) {
        self.node.remove();
    }
}
