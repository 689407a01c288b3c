//! Marker detail card.
//!
//! The card opens in two phases. `begin_open` writes content while the
//! node is still invisible; one frame later the session measures it and
//! applies a placement; the frame after that `reveal` fades it in. The
//! card is measurable the whole time because it is hidden with opacity,
//! never `display: none`.

use mapwonder_core::{Marker, PopupPlacement, SurfaceSize};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

pub struct PopupHost {
    document: Document,
    node: Element,
}

impl PopupHost {
    pub fn create(document: &Document) -> Result<Self, JsValue> {
        let node = document.create_element("div")?;
        node.set_class_name("map-popup");
        if let Some(styled) = node.dyn_ref::<HtmlElement>() {
            let style = styled.style();
            style.set_property("position", "absolute").ok();
            style.set_property("left", "0px").ok();
            style.set_property("top", "0px").ok();
            style.set_property("max-width", "320px").ok();
            style.set_property("opacity", "0").ok();
            style.set_property("transform", "translateY(4px)").ok();
            style
                .set_property("transition", "opacity 0.18s ease, transform 0.18s ease")
                .ok();
            style.set_property("z-index", "40").ok();
        }
        if let Some(body) = document.body() {
            body.append_child(&node)?;
        }
        Ok(Self {
            document: document.clone(),
            node,
        })
    }

    /// First phase: hide the card, park it at the origin and write the
    /// marker content, image first so it leads the card.
    pub fn begin_open(&self, marker: &Marker) -> Result<(), JsValue> {
        self.node.class_list().remove_1("open").ok();
        self.node.set_inner_html("");

        if let Some(url) = &marker.image_url {
            let image = self.document.create_element("img")?;
            image.set_attribute("src", url)?;
            image.set_attribute("alt", &marker.title)?;
            if let Some(styled) = image.dyn_ref::<HtmlElement>() {
                let style = styled.style();
                style.set_property("opacity", "0").ok();
                style.set_property("transform", "translateY(6px)").ok();
                style
                    .set_property("transition", "opacity 0.25s ease, transform 0.25s ease")
                    .ok();
                // Fade the image in once it has pixels; a broken URL just
                // leaves the card text-only.
                let loaded = styled.clone();
                let reveal = Closure::once_into_js(move |_: web_sys::Event| {
                    let style = loaded.style();
                    style.set_property("opacity", "1").ok();
                    style.set_property("transform", "translateY(0)").ok();
                });
                styled.set_onload(Some(reveal.unchecked_ref()));
            }
            self.node.append_child(&image)?;
        }

        let title = self.document.create_element("strong")?;
        title.set_text_content(Some(&marker.title));
        self.node.append_child(&title)?;

        if let Some(text) = &marker.description {
            let body = self.document.create_element("p")?;
            body.set_text_content(Some(text));
            self.node.append_child(&body)?;
        }

        if let Some(styled) = self.node.dyn_ref::<HtmlElement>() {
            let style = styled.style();
            style.set_property("position", "absolute").ok();
            style.set_property("left", "0px").ok();
            style.set_property("top", "0px").ok();
            style.set_property("right", "auto").ok();
            style.set_property("bottom", "auto").ok();
        }
        Ok(())
    }

    /// On-screen size of the (still hidden) card.
    pub fn measured_size(&self) -> SurfaceSize {
        let rect = self.node.get_bounding_client_rect();
        SurfaceSize::new(rect.width(), rect.height())
    }

    pub fn apply_placement(&self, placement: PopupPlacement) {
        let styled = match self.node.dyn_ref::<HtmlElement>() {
            Some(styled) => styled,
            None => return,
        };
        let style = styled.style();
        match placement {
            PopupPlacement::Anchored { x, y } => {
                style.set_property("position", "absolute").ok();
                style.set_property("left", &format!("{x}px")).ok();
                style.set_property("top", &format!("{y}px")).ok();
                style.set_property("right", "auto").ok();
                style.set_property("bottom", "auto").ok();
            }
            PopupPlacement::BottomSheet => {
                style.set_property("position", "fixed").ok();
                style.set_property("left", "12px").ok();
                style.set_property("right", "12px").ok();
                style.set_property("bottom", "5%").ok();
                style.set_property("top", "auto").ok();
                style.set_property("max-width", "none").ok();
            }
        }
    }

    /// Second phase: fade the placed card in.
    pub fn reveal(&self) {
        self.node.class_list().add_1("open").ok();
        if let Some(styled) = self.node.dyn_ref::<HtmlElement>() {
            let style = styled.style();
            style.set_property("opacity", "1").ok();
            style.set_property("transform", "translateY(0)").ok();
        }
    }

    pub fn close(&self) {
        self.node.class_list().remove_1("open").ok();
        if let Some(styled) = self.node.dyn_ref::<HtmlElement>() {
            let style = styled.style();
            style.set_property("opacity", "0").ok();
            style.set_property("transform", "translateY(4px)").ok();
        }
    }

    pub fn remove(&self) {
        self.node.remove();
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use mapwonder_core::LogicalPoint;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn sample_marker() -> Marker {
        Marker::new(LogicalPoint::new(1.0, 2.0), "Kumphawapi Hospital")
            .with_description("District referral hospital")
    }

    #[wasm_bindgen_test]
    fn begin_open_writes_content_while_hidden() {
        let document = web_sys::window().unwrap().document().unwrap();
        let host = PopupHost::create(&document).unwrap();

        host.begin_open(&sample_marker()).unwrap();

        let node = document.query_selector(".map-popup").unwrap().unwrap();
        assert!(!node.class_list().contains("open"));
        let text = node.text_content().unwrap();
        assert!(text.contains("Kumphawapi Hospital"));
        assert!(text.contains("District referral hospital"));

        let size = host.measured_size();
        assert!(size.width > 0.0 && size.height > 0.0);

        host.remove();
    }

    #[wasm_bindgen_test]
    fn placement_translates_into_inline_styles() {
        let document = web_sys::window().unwrap().document().unwrap();
        let host = PopupHost::create(&document).unwrap();
        host.begin_open(&sample_marker()).unwrap();

        host.apply_placement(PopupPlacement::Anchored { x: 120.0, y: 48.0 });
        let node = document.query_selector(".map-popup").unwrap().unwrap();
        let style = node.dyn_ref::<HtmlElement>().unwrap().style();
        assert_eq!(style.get_property_value("left").unwrap(), "120px");
        assert_eq!(style.get_property_value("top").unwrap(), "48px");

        host.apply_placement(PopupPlacement::BottomSheet);
        assert_eq!(style.get_property_value("position").unwrap(), "fixed");
        assert_eq!(style.get_property_value("bottom").unwrap(), "5%");

        host.remove();
    }

    #[wasm_bindgen_test]
    fn reveal_and_close_toggle_the_open_class() {
        let document = web_sys::window().unwrap().document().unwrap();
        let host = PopupHost::create(&document).unwrap();
        host.begin_open(&sample_marker()).unwrap();

        host.reveal();
        let node = document.query_selector(".map-popup").unwrap().unwrap();
        assert!(node.class_list().contains("open"));

        host.close();
        assert!(!node.class_list().contains("open"));

        host.remove();
        assert!(document.query_selector(".map-popup").unwrap().is_none());
    }
}
