//! DOM plumbing for a mounted map document.
//!
//! Everything here touches the inline SVG directly: extent resolution,
//! region discovery, palette painting, marker nodes and the accent
//! outline layer. The functions are deliberately free of session state
//! so they stay testable against synthetic markup.

use mapwonder_core::{
    geo_fill, index_fill, parse_geo_view_box, parse_view_box, ColorConfig, GeoBounds,
    LogicalPoint, LogicalRect, ACTIVE_OUTLINE_STROKE, ACTIVE_OUTLINE_WIDTH,
};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, SvgElement, SvgGraphicsElement};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Shapes that count as hoverable regions. Blank-id elements are
/// dropped after the query.
pub const REGION_SELECTOR: &str =
    r#".state, [id^="TH-"], [id^="VN-"], [id^="MY-"], path[id]"#;

/// Group that holds the marker circles, appended last so markers sit on
/// top of every region shape.
pub const MARKER_LAYER_ID: &str = "hotspots-layer";

/// Group for the accent outline clone of the activated region. Inserted
/// just below the marker layer.
pub const OUTLINE_LAYER_ID: &str = "active-region-layer";

/// Geographic bounds attribute some map exports carry:
/// `min_lon max_lat max_lon min_lat`.
pub const GEO_VIEW_BOX_ATTR: &str = "mapsvg:geoViewBox";

/// Class carried by the surface while a drag is live, as a stylesheet
/// hook next to the cursor swap.
pub const SURFACE_DRAG_CLASS: &str = "map-interaction-active";

/// Drag feedback on the surface: grabbing cursor and the drag class
/// while a pan is live, grab cursor otherwise.
pub fn set_drag_visuals(svg: &Element, dragging: bool) {
    let classes = svg.class_list();
    if dragging {
        classes.add_1(SURFACE_DRAG_CLASS).ok();
    } else {
        classes.remove_1(SURFACE_DRAG_CLASS).ok();
    }
    if let Some(styled) = svg.dyn_ref::<SvgElement>() {
        let cursor = if dragging { "grabbing" } else { "grab" };
        styled.style().set_property("cursor", cursor).ok();
    }
}

/// One-shot animation frame callback.
pub fn request_frame(callback: impl FnOnce() + 'static) {
    let closure = Closure::once_into_js(callback);
    if let Some(window) = web_sys::window() {
        window
            .request_animation_frame(closure.unchecked_ref())
            .expect("should schedule animation frame");
    }
}

/// Resolves on the next animation frame. Freshly injected markup has no
/// layout yet; awaiting one frame before measuring keeps bounding-box
/// extent resolution from reading zero geometry.
pub async fn next_frame() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window.request_animation_frame(&resolve);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

/// Document extent for the mounted SVG.
///
/// Resolution order: explicit `viewBox`, then `width`/`height`
/// attributes, then the rendered geometry. Synthesized extents are
/// written back as a `viewBox` so later reads and writes are uniform.
/// `None` means the document has no usable extent and zoom/pan must
/// stay disabled.
pub fn resolve_extent(svg: &Element) -> Option<LogicalRect> {
    if let Some(raw) = svg.get_attribute("viewBox") {
        if let Ok(rect) = parse_view_box(&raw) {
            return Some(rect);
        }
        log::warn!("ignoring malformed viewBox attribute {raw:?}");
    }

    if let (Some(width), Some(height)) = (
        dimension_attribute(svg, "width"),
        dimension_attribute(svg, "height"),
    ) {
        if width > 0.0 && height > 0.0 {
            let rect = LogicalRect::new(0.0, 0.0, width, height);
            write_view_box(svg, rect);
            return Some(rect);
        }
    }

    let bbox = svg.dyn_ref::<SvgGraphicsElement>()?.get_b_box().ok()?;
    let rect = LogicalRect::new(
        bbox.x() as f64,
        bbox.y() as f64,
        bbox.width() as f64,
        bbox.height() as f64,
    );
    if rect.width > 0.0 && rect.height > 0.0 {
        write_view_box(svg, rect);
        Some(rect)
    } else {
        None
    }
}

/// Leading numeric prefix of a dimension attribute, so `"800px"` and
/// `"800"` both read as 800.
fn dimension_attribute(svg: &Element, name: &str) -> Option<f64> {
    let raw = svg.get_attribute(name)?;
    let numeric: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
        .collect();
    numeric.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn write_view_box(svg: &Element, rect: LogicalRect) {
    let value = format!("{} {} {} {}", rect.x, rect.y, rect.width, rect.height);
    svg.set_attribute("viewBox", &value).ok();
}

/// Geographic bounds of the document, when the export carries them.
pub fn geo_bounds(svg: &Element) -> Option<GeoBounds> {
    let raw = svg.get_attribute(GEO_VIEW_BOX_ATTR)?;
    match parse_geo_view_box(&raw) {
        Ok(bounds) => Some(bounds),
        Err(error) => {
            log::warn!("ignoring malformed {GEO_VIEW_BOX_ATTR}: {error}");
            None
        }
    }
}

/// All hoverable region shapes, in document order, keeping only
/// elements with a non-blank id.
pub fn discover_regions(svg: &Element) -> Vec<Element> {
    let nodes = match svg.query_selector_all(REGION_SELECTOR) {
        Ok(nodes) => nodes,
        Err(_) => return Vec::new(),
    };
    let mut regions = Vec::new();
    for index in 0..nodes.length() {
        if let Some(element) = nodes.item(index).and_then(|node| node.dyn_into::<Element>().ok()) {
            if element.id().trim().is_empty() {
                continue;
            }
            regions.push(element);
        }
    }
    regions
}

/// Human-readable label for a region, used by the tooltip and search.
pub fn region_display_name(region: &Element) -> String {
    for candidate in [region.get_attribute("data-name"), region.get_attribute("title")] {
        if let Some(name) = candidate {
            let name = name.trim();
            if !name.is_empty() {
                return name.to_string();
            }
        }
    }
    let id = region.id();
    let id = id.trim();
    if id.is_empty() {
        "Region".to_string()
    } else {
        id.to_string()
    }
}

/// Paints every region with its base fill and remembers that fill in a
/// data attribute so hover restores are exact.
///
/// With geographic bounds present the fill follows a north-south
/// lightness gradient; otherwise (or for any shape whose geometry query
/// fails) it falls back to the document-order gradient.
pub fn apply_palette(
    svg: &Element,
    regions: &[Element],
    palette: &ColorConfig,
    extent: Option<LogicalRect>,
) {
    let bounds = geo_bounds(svg);
    let count = regions.len();
    for (index, region) in regions.iter().enumerate() {
        let geo = bounds
            .as_ref()
            .and_then(|bounds| geo_region_fill(region, palette, index, bounds, extent));
        let fill = geo
            .unwrap_or_else(|| index_fill(palette, index, count))
            .to_css();
        region.set_attribute("fill", &fill).ok();
        region.set_attribute("data-base-fill", &fill).ok();
        if region.get_attribute("stroke").is_none() {
            region.set_attribute("stroke", "#fff").ok();
            region.set_attribute("stroke-width", "0.4").ok();
        }
    }
}

fn geo_region_fill(
    region: &Element,
    palette: &ColorConfig,
    index: usize,
    bounds: &GeoBounds,
    extent: Option<LogicalRect>,
) -> Option<mapwonder_core::Hsl> {
    let extent = extent?;
    let bbox = region.dyn_ref::<SvgGraphicsElement>()?.get_b_box().ok()?;
    let center_y = bbox.y() as f64 + bbox.height() as f64 / 2.0;
    let latitude = bounds.latitude_at(center_y, extent.height);
    Some(geo_fill(palette, index, latitude, bounds))
}

/// Hides embedded text labels; the tooltip replaces them.
pub fn hide_text_labels(svg: &Element) {
    if let Ok(nodes) = svg.query_selector_all("text") {
        for index in 0..nodes.length() {
            if let Some(element) = nodes.item(index).and_then(|node| node.dyn_into::<Element>().ok())
            {
                element.set_attribute("display", "none").ok();
            }
        }
    }
}

/// The marker group, created on first use and appended after all region
/// shapes.
pub fn ensure_marker_layer(document: &Document, svg: &Element) -> Result<Element, JsValue> {
    if let Some(layer) = svg.query_selector(&format!("#{MARKER_LAYER_ID}"))? {
        return Ok(layer);
    }
    let layer = document.create_element_ns(Some(SVG_NS), "g")?;
    layer.set_attribute("id", MARKER_LAYER_ID)?;
    svg.append_child(&layer)?;
    Ok(layer)
}

/// A marker circle at `position`, in document units. Paint and radius
/// are applied afterwards by the session.
pub fn create_marker_node(
    document: &Document,
    layer: &Element,
    position: LogicalPoint,
) -> Result<Element, JsValue> {
    let circle = document.create_element_ns(Some(SVG_NS), "circle")?;
    circle.set_attribute("class", "hotspot")?;
    circle.set_attribute("cx", &position.x.to_string())?;
    circle.set_attribute("cy", &position.y.to_string())?;
    circle.set_attribute("r", "6")?;
    if let Some(styled) = circle.dyn_ref::<SvgElement>() {
        let style = styled.style();
        style.set_property("cursor", "pointer").ok();
        style.set_property("vector-effect", "non-scaling-stroke").ok();
    }
    layer.append_child(&circle)?;
    Ok(circle)
}

/// The outline group, inserted just below the marker layer so the
/// accent trace never covers markers.
pub fn ensure_outline_layer(document: &Document, svg: &Element) -> Result<Element, JsValue> {
    if let Some(layer) = svg.query_selector(&format!("#{OUTLINE_LAYER_ID}"))? {
        return Ok(layer);
    }
    let layer = document.create_element_ns(Some(SVG_NS), "g")?;
    layer.set_attribute("id", OUTLINE_LAYER_ID)?;
    match svg.query_selector(&format!("#{MARKER_LAYER_ID}"))? {
        Some(markers) => {
            svg.insert_before(&layer, Some(&markers))?;
        }
        None => {
            svg.append_child(&layer)?;
        }
    }
    Ok(layer)
}

/// Restyles an activated region's clone into the accent outline: no
/// fill, constant-width stroke, transparent to the pointer. Applied to
/// the clone root and every descendant so grouped shapes trace fully.
pub fn style_outline_clone(clone: &Element) {
    apply_outline_style(clone);
    if let Ok(nodes) = clone.query_selector_all("*") {
        for index in 0..nodes.length() {
            if let Some(element) = nodes.item(index).and_then(|node| node.dyn_into::<Element>().ok())
            {
                apply_outline_style(&element);
            }
        }
    }
}

fn apply_outline_style(element: &Element) {
    element.set_attribute("fill", "none").ok();
    element.set_attribute("stroke", ACTIVE_OUTLINE_STROKE).ok();
    element.set_attribute("stroke-width", ACTIVE_OUTLINE_WIDTH).ok();
    element.set_attribute("vector-effect", "non-scaling-stroke").ok();
    if let Some(styled) = element.dyn_ref::<SvgElement>() {
        let style = styled.style();
        style.set_property("pointer-events", "none").ok();
        style
            .set_property("filter", "drop-shadow(0 0 3px rgba(10, 132, 255, 0.8))")
            .ok();
    }
}
