//! Live wiring for one mounted map document.
//!
//! [`MapSession::attach`] takes the container that already holds the
//! fetched SVG markup and wires everything interactive: viewport
//! zoom/pan, region hover, marker popups and search activation. The
//! session is reference-counted; every event callback holds a weak
//! handle, so once the last strong handle drops the listeners detach,
//! the floating nodes disappear and stale animation frames become no-ops.

mod dom;
mod listeners;
mod popup;
mod tooltip;

pub(crate) use dom::next_frame;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use mapwonder_core::{
    classify_wheel, hover_fill, marker_scale, place_popup, wheel_zoom, InteractionModel, Marker,
    MarkerVisual, PanController, PopupPhase, RegionActivation, SavedStroke, ScreenPoint,
    SurfaceSize, Viewport, WheelAction, WheelInput, ZoomDirection,
};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, MouseEvent, SvgElement, WheelEvent};

use crate::config::MapConfig;
use listeners::ListenerRegistry;
use popup::PopupHost;
use tooltip::Tooltip;

const MARKER_FILL_IDLE: &str = "rgba(215, 38, 61, 0.65)";
const MARKER_STROKE_IDLE: &str = "rgb(200, 0, 0)";
const MARKER_FILL_HOVER: &str = "rgba(255, 0, 0, 0.55)";
const MARKER_STROKE_HOVER: &str = "rgb(255, 0, 0)";
const MARKER_FILL_ACTIVE: &str = "rgba(255, 0, 0, 0.65)";
const MARKER_STROKE_ACTIVE: &str = "rgb(255, 50, 50)";

const ACTIVE_REGION_CLASS: &str = "region--active";

/// Some documents report zero geometry on the first frame after
/// injection; a late second rescale catches them.
const LATE_RESCALE_DELAY_MS: u32 = 100;

/// Searchable region entry: element id plus human-readable label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionItem {
    pub id: String,
    pub name: String,
}

pub struct MapSession {
    document: Document,
    svg: Element,
    /// `None` when the document had no usable extent; zoom, pan and
    /// marker rescale stay off while hover, popup and search keep
    /// working.
    viewport: RefCell<Option<Viewport>>,
    pan: RefCell<PanController>,
    interaction: RefCell<InteractionModel>,
    activation: RefCell<RegionActivation>,
    markers: Vec<Marker>,
    marker_nodes: Vec<Element>,
    regions: Vec<Element>,
    region_items: Vec<RegionItem>,
    tooltip: Tooltip,
    popup: PopupHost,
    popup_anchor: Cell<ScreenPoint>,
    listeners: RefCell<ListenerRegistry>,
}

impl MapSession {
    /// Wires up the SVG document inside `container`. The container must
    /// already hold the inline markup.
    pub fn attach(container: &Element, config: &MapConfig) -> Result<Rc<Self>, JsValue> {
        let document = container
            .owner_document()
            .ok_or_else(|| JsValue::from_str("map container is detached"))?;
        let svg = container
            .query_selector("svg")?
            .ok_or_else(|| JsValue::from_str("map markup has no <svg> root"))?;

        dom::hide_text_labels(&svg);

        let extent = dom::resolve_extent(&svg);
        let viewport = extent.map(Viewport::new);
        if viewport.is_none() {
            log::warn!("document has no usable extent; zoom and pan disabled");
        }

        let regions = dom::discover_regions(&svg);
        if regions.is_empty() {
            log::warn!("document has no interactive regions; hover and search stay empty");
        } else {
            log::debug!("discovered {} interactive regions", regions.len());
        }
        dom::apply_palette(&svg, &regions, &config.palette, extent);

        let region_items = regions
            .iter()
            .map(|region| RegionItem {
                id: region.id(),
                name: dom::region_display_name(region),
            })
            .collect();

        let markers: Vec<Marker> = config.hotspots.iter().map(|h| h.to_marker()).collect();
        let layer = dom::ensure_marker_layer(&document, &svg)?;
        let mut marker_nodes = Vec::with_capacity(markers.len());
        for marker in &markers {
            marker_nodes.push(dom::create_marker_node(&document, &layer, marker.position)?);
        }

        let tooltip = Tooltip::create(&document)?;
        let popup = PopupHost::create(&document)?;

        let session = Rc::new(MapSession {
            document,
            svg,
            viewport: RefCell::new(viewport),
            pan: RefCell::new(PanController::new()),
            interaction: RefCell::new(InteractionModel::new(markers.len())),
            activation: RefCell::new(RegionActivation::new()),
            markers,
            marker_nodes,
            regions,
            region_items,
            tooltip,
            popup,
            popup_anchor: Cell::new(ScreenPoint::new(0.0, 0.0)),
            listeners: RefCell::new(ListenerRegistry::new()),
        });

        for index in 0..session.marker_nodes.len() {
            session.paint_marker(index);
        }
        dom::set_drag_visuals(&session.svg, false);
        session.install_listeners()?;

        session.schedule_marker_rescale();
        let weak = Rc::downgrade(&session);
        Timeout::new(LATE_RESCALE_DELAY_MS, move || {
            if let Some(session) = weak.upgrade() {
                session.rescale_markers();
            }
        })
        .forget();

        Ok(session)
    }

    /// Regions available to search, in document order.
    pub fn region_items(&self) -> Vec<RegionItem> {
        self.region_items.clone()
    }

    // ========== Listener wiring ==========

    fn install_listeners(self: &Rc<Self>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let mut listeners = self.listeners.borrow_mut();

        // Wheel routing hooks the window capture phase so it wins against
        // page scroll handlers; the handler ignores events away from the map.
        let weak = Rc::downgrade(self);
        let on_wheel = Closure::wrap(Box::new(move |event: WheelEvent| {
            if let Some(session) = weak.upgrade() {
                session.handle_wheel(event);
            }
        }) as Box<dyn FnMut(WheelEvent)>);
        listeners.add_captured_nonpassive(&window, "wheel", on_wheel)?;

        let weak = Rc::downgrade(self);
        let on_down = Closure::wrap(Box::new(move |event: MouseEvent| {
            if let Some(session) = weak.upgrade() {
                session.handle_mouse_down(event);
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        listeners.add(&self.svg, "mousedown", on_down)?;

        // Move and up live on the window so drags survive leaving the map.
        let weak = Rc::downgrade(self);
        let on_move = Closure::wrap(Box::new(move |event: MouseEvent| {
            if let Some(session) = weak.upgrade() {
                session.handle_mouse_move(event);
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        listeners.add(&window, "mousemove", on_move)?;

        let weak = Rc::downgrade(self);
        let on_up = Closure::wrap(Box::new(move |_event: MouseEvent| {
            if let Some(session) = weak.upgrade() {
                session.handle_mouse_up();
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        listeners.add(&window, "mouseup", on_up)?;

        let weak = Rc::downgrade(self);
        let on_background = Closure::wrap(Box::new(move |event: MouseEvent| {
            if let Some(session) = weak.upgrade() {
                session.handle_background_click(event);
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        listeners.add(&self.svg, "click", on_background)?;

        // WebKit fires gesture events for trackpad pinch; swallow them so
        // the page never zooms underneath the map.
        for name in ["gesturestart", "gesturechange", "gestureend"] {
            let prevent = Closure::wrap(Box::new(move |event: web_sys::Event| {
                event.prevent_default();
            }) as Box<dyn FnMut(web_sys::Event)>);
            listeners.add_nonpassive(&self.svg, name, prevent)?;
        }

        for index in 0..self.marker_nodes.len() {
            let node = self.marker_nodes[index].clone();

            let weak = Rc::downgrade(self);
            let enter = Closure::wrap(Box::new(move |event: MouseEvent| {
                if let Some(session) = weak.upgrade() {
                    session.handle_marker_enter(index, &event);
                }
            }) as Box<dyn FnMut(MouseEvent)>);
            listeners.add(&node, "mouseenter", enter)?;

            let weak = Rc::downgrade(self);
            let leave = Closure::wrap(Box::new(move |_event: MouseEvent| {
                if let Some(session) = weak.upgrade() {
                    session.handle_marker_leave(index);
                }
            }) as Box<dyn FnMut(MouseEvent)>);
            listeners.add(&node, "mouseleave", leave)?;

            let weak = Rc::downgrade(self);
            let click = Closure::wrap(Box::new(move |event: MouseEvent| {
                event.stop_propagation();
                if let Some(session) = weak.upgrade() {
                    session.handle_marker_click(index, &event);
                }
            }) as Box<dyn FnMut(MouseEvent)>);
            listeners.add(&node, "click", click)?;
        }

        for region in &self.regions {
            let weak = Rc::downgrade(self);
            let target = region.clone();
            let enter = Closure::wrap(Box::new(move |event: MouseEvent| {
                if let Some(session) = weak.upgrade() {
                    session.handle_region_enter(&target, &event);
                }
            }) as Box<dyn FnMut(MouseEvent)>);
            listeners.add(region, "mouseenter", enter)?;

            let weak = Rc::downgrade(self);
            let target = region.clone();
            let moved = Closure::wrap(Box::new(move |event: MouseEvent| {
                if let Some(session) = weak.upgrade() {
                    session.handle_region_move(&target, &event);
                }
            }) as Box<dyn FnMut(MouseEvent)>);
            listeners.add(region, "mousemove", moved)?;

            let weak = Rc::downgrade(self);
            let target = region.clone();
            let leave = Closure::wrap(Box::new(move |_event: MouseEvent| {
                if let Some(session) = weak.upgrade() {
                    session.handle_region_leave(&target);
                }
            }) as Box<dyn FnMut(MouseEvent)>);
            listeners.add(region, "mouseleave", leave)?;
        }

        Ok(())
    }

    // ========== Wheel: zoom and scroll routing ==========

    fn handle_wheel(self: &Rc<Self>, event: WheelEvent) {
        if !self.pointer_over_surface(&event) {
            return;
        }
        let input = WheelInput {
            delta_x: event.delta_x(),
            delta_y: event.delta_y(),
            zoom_modifier: event.ctrl_key() || event.meta_key(),
        };
        match classify_wheel(input) {
            WheelAction::Zoom(direction) => {
                event.prevent_default();
                event.stop_propagation();
                self.zoom_at_pointer(&event, direction);
            }
            WheelAction::RedirectScroll { delta_y } => {
                event.prevent_default();
                event.stop_propagation();
                if let Some(window) = web_sys::window() {
                    window.scroll_by_with_x_and_y(0.0, delta_y);
                }
            }
            WheelAction::PassThrough => {}
        }
    }

    fn zoom_at_pointer(self: &Rc<Self>, event: &WheelEvent, direction: ZoomDirection) {
        let bounds = self.svg.get_bounding_client_rect();
        let surface = SurfaceSize::new(bounds.width(), bounds.height());
        let pointer = ScreenPoint::new(
            event.client_x() as f64 - bounds.left(),
            event.client_y() as f64 - bounds.top(),
        );
        let applied = {
            let mut viewport = self.viewport.borrow_mut();
            match viewport.as_mut() {
                Some(viewport) => wheel_zoom(viewport, surface, pointer, direction),
                None => None,
            }
        };
        if let Some(rect) = applied {
            dom::write_view_box(&self.svg, rect);
            self.schedule_marker_rescale();
        }
    }

    fn pointer_over_surface(&self, event: &WheelEvent) -> bool {
        let bounds = self.svg.get_bounding_client_rect();
        let x = event.client_x() as f64;
        let y = event.client_y() as f64;
        x >= bounds.left() && x <= bounds.right() && y >= bounds.top() && y <= bounds.bottom()
    }

    // ========== Pan ==========

    fn handle_mouse_down(&self, event: MouseEvent) {
        if event.button() != 0 {
            return;
        }
        if let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) {
            if target.closest(".hotspot").ok().flatten().is_some() {
                return;
            }
        }
        let current = match *self.viewport.borrow() {
            Some(ref viewport) => viewport.rect(),
            None => return,
        };
        let pointer = ScreenPoint::new(event.client_x() as f64, event.client_y() as f64);
        self.pan.borrow_mut().begin(pointer, current);
        dom::set_drag_visuals(&self.svg, true);
        event.prevent_default();
    }

    fn handle_mouse_move(self: &Rc<Self>, event: MouseEvent) {
        if !self.pan.borrow().is_dragging() {
            return;
        }
        let bounds = self.svg.get_bounding_client_rect();
        let surface = SurfaceSize::new(bounds.width(), bounds.height());
        let pointer = ScreenPoint::new(event.client_x() as f64, event.client_y() as f64);
        let applied = {
            let mut viewport = self.viewport.borrow_mut();
            match viewport.as_mut() {
                Some(viewport) => self.pan.borrow_mut().move_to(viewport, surface, pointer),
                None => None,
            }
        };
        if let Some(rect) = applied {
            dom::write_view_box(&self.svg, rect);
            self.schedule_marker_rescale();
        }
    }

    fn handle_mouse_up(&self) {
        let was_dragging = self.pan.borrow().is_dragging();
        self.pan.borrow_mut().end();
        if was_dragging {
            dom::set_drag_visuals(&self.svg, false);
        }
    }

    // ========== Markers and popup ==========

    fn handle_marker_enter(self: &Rc<Self>, index: usize, event: &MouseEvent) {
        self.interaction.borrow_mut().hover_enter(index);
        self.paint_marker(index);
        self.open_popup(index, event);
    }

    fn handle_marker_leave(&self, index: usize) {
        self.interaction.borrow_mut().hover_leave(index);
        self.paint_marker(index);
        self.dismiss_popup();
    }

    fn handle_marker_click(self: &Rc<Self>, index: usize, event: &MouseEvent) {
        self.open_popup(index, event);
    }

    fn handle_background_click(&self, event: MouseEvent) {
        if let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) {
            if target.closest(".hotspot").ok().flatten().is_some() {
                return;
            }
        }
        self.dismiss_popup();
    }

    /// Two-phase open. The request is dropped whole while a previous
    /// open is still in flight, so a burst of enter events produces one
    /// content write and one placement.
    fn open_popup(self: &Rc<Self>, index: usize, event: &MouseEvent) {
        let previous = {
            let mut interaction = self.interaction.borrow_mut();
            let previous = interaction.active();
            if !interaction.request_open(index) {
                return;
            }
            previous
        };
        if let Some(previous) = previous {
            if previous != index {
                self.paint_marker(previous);
            }
        }
        self.paint_marker(index);

        if let Err(error) = self.popup.begin_open(&self.markers[index]) {
            log::warn!("failed to stage popup content: {error:?}");
        }
        self.popup_anchor
            .set(ScreenPoint::new(event.page_x() as f64, event.page_y() as f64));

        // Frame one measures and places the hidden card; frame two
        // reveals it, so the placement never flashes.
        let weak = Rc::downgrade(self);
        dom::request_frame(move || {
            if let Some(session) = weak.upgrade() {
                session.position_popup();
                let weak = Rc::downgrade(&session);
                dom::request_frame(move || {
                    if let Some(session) = weak.upgrade() {
                        session.reveal_popup();
                    }
                });
            }
        });
    }

    fn position_popup(&self) {
        let window = match web_sys::window() {
            Some(window) => window,
            None => return,
        };
        let inner_width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let inner_height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let placement = place_popup(
            self.popup_anchor.get(),
            self.popup.measured_size(),
            SurfaceSize::new(inner_width, inner_height),
        );
        self.popup.apply_placement(placement);
    }

    fn reveal_popup(&self) {
        let mut interaction = self.interaction.borrow_mut();
        if interaction.popup_phase() != PopupPhase::Opening {
            return;
        }
        interaction.commit_open();
        drop(interaction);
        self.popup.reveal();
    }

    /// Hides the popup and demotes the active marker. Idempotent.
    fn dismiss_popup(&self) {
        self.popup.close();
        if let Some(previous) = self.interaction.borrow_mut().dismiss() {
            self.paint_marker(previous);
        }
    }

    fn paint_marker(&self, index: usize) {
        let visual = self.interaction.borrow().visual(index);
        let (fill, stroke) = match visual {
            MarkerVisual::Idle => (MARKER_FILL_IDLE, MARKER_STROKE_IDLE),
            MarkerVisual::Hovered => (MARKER_FILL_HOVER, MARKER_STROKE_HOVER),
            MarkerVisual::Active => (MARKER_FILL_ACTIVE, MARKER_STROKE_ACTIVE),
        };
        if let Some(node) = self.marker_nodes.get(index) {
            if let Some(styled) = node.dyn_ref::<SvgElement>() {
                let style = styled.style();
                style.set_property("fill", fill).ok();
                style.set_property("stroke", stroke).ok();
            }
        }
    }

    // ========== Region hover ==========

    fn handle_region_enter(&self, region: &Element, event: &MouseEvent) {
        if let Some(base) = region.get_attribute("data-base-fill") {
            if let Some(darkened) = hover_fill(&base) {
                region.set_attribute("fill", &darkened).ok();
            }
        }
        self.tooltip.show(
            &dom::region_display_name(region),
            event.page_x() as f64,
            event.page_y() as f64,
        );
    }

    fn handle_region_move(&self, region: &Element, event: &MouseEvent) {
        self.tooltip.show(
            &dom::region_display_name(region),
            event.page_x() as f64,
            event.page_y() as f64,
        );
    }

    fn handle_region_leave(&self, region: &Element) {
        if let Some(base) = region.get_attribute("data-base-fill") {
            region.set_attribute("fill", &base).ok();
        }
        self.tooltip.hide();
    }

    // ========== Search activation ==========

    /// Outlines the region with `id`: its own stroke is saved and
    /// suppressed, and an accent-styled clone is layered just below the
    /// markers. A second call moves the highlight.
    pub fn activate_region(&self, id: &str) {
        self.clear_active_region();

        let target = match self.document.get_element_by_id(id) {
            Some(target) => target,
            None => {
                log::warn!("cannot activate unknown region {id:?}");
                return;
            }
        };

        let saved = SavedStroke {
            stroke: target.get_attribute("stroke"),
            stroke_width: target.get_attribute("stroke-width"),
        };
        let _ = self.activation.borrow_mut().activate(id, saved);
        target.set_attribute("stroke", "none").ok();
        target.set_attribute("stroke-width", "0").ok();
        target.class_list().add_1(ACTIVE_REGION_CLASS).ok();

        let layer = match dom::ensure_outline_layer(&self.document, &self.svg) {
            Ok(layer) => layer,
            Err(error) => {
                log::warn!("cannot create outline layer: {error:?}");
                return;
            }
        };
        layer.set_inner_html("");
        if let Ok(clone) = target.clone_node_with_deep(true) {
            if let Ok(clone) = clone.dyn_into::<Element>() {
                clone.remove_attribute("id").ok();
                dom::style_outline_clone(&clone);
                layer.append_child(&clone).ok();
            }
        }
    }

    /// Restores the activated region exactly as it was, including
    /// attribute absence, and empties the outline layer. Idempotent.
    pub fn clear_active_region(&self) {
        if let Some((id, saved)) = self.activation.borrow_mut().clear() {
            if let Some(region) = self.document.get_element_by_id(&id) {
                match saved.stroke {
                    Some(value) => {
                        region.set_attribute("stroke", &value).ok();
                    }
                    None => {
                        region.remove_attribute("stroke").ok();
                    }
                }
                match saved.stroke_width {
                    Some(value) => {
                        region.set_attribute("stroke-width", &value).ok();
                    }
                    None => {
                        region.remove_attribute("stroke-width").ok();
                    }
                }
                region.class_list().remove_1(ACTIVE_REGION_CLASS).ok();
            }
        }
        if let Some(layer) = self
            .svg
            .query_selector(&format!("#{}", dom::OUTLINE_LAYER_ID))
            .ok()
            .flatten()
        {
            layer.set_inner_html("");
        }
        self.tooltip.hide();
        self.dismiss_popup();
    }

    // ========== Marker overlay scale ==========

    fn schedule_marker_rescale(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        dom::request_frame(move || {
            if let Some(session) = weak.upgrade() {
                session.rescale_markers();
            }
        });
    }

    /// Writes the zoom-compensated radius and stroke so markers keep a
    /// near-constant on-screen size.
    fn rescale_markers(&self) {
        let scale = {
            let viewport = self.viewport.borrow();
            let viewport = match viewport.as_ref() {
                Some(viewport) => viewport,
                None => return,
            };
            let bounds = self.svg.get_bounding_client_rect();
            match marker_scale(
                viewport.full_extent().width,
                viewport.rect().width,
                bounds.width(),
            ) {
                Some(scale) => scale,
                None => return,
            }
        };
        let radius = scale.radius_units.to_string();
        let stroke_width = format!("{}px", scale.stroke_px);
        for node in &self.marker_nodes {
            node.set_attribute("r", &radius).ok();
            if let Some(styled) = node.dyn_ref::<SvgElement>() {
                let style = styled.style();
                style.set_property("stroke-width", &stroke_width).ok();
                style.set_property("vector-effect", "non-scaling-stroke").ok();
            }
        }
    }
}

impl Drop for MapSession {
    fn drop(&mut self) {
        // The listener registry detaches everything it owns on its own
        // drop; only the floating nodes need explicit removal.
        self.tooltip.remove();
        self.popup.remove();
        log::debug!("map session detached");
    }
}
