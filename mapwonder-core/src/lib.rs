pub mod color;
pub mod extent;
pub mod interaction;
pub mod marker;
pub mod overlay;
pub mod pan;
pub mod popup;
pub mod rect;
pub mod region;
pub mod viewport;
pub mod wheel;
pub mod zoom;

pub use color::{geo_fill, index_fill, ColorConfig, Hsl};
pub use extent::{parse_geo_view_box, parse_view_box, ExtentError, GeoBounds};
pub use interaction::{InteractionModel, MarkerVisual, PopupPhase};
pub use marker::Marker;
pub use overlay::{marker_scale, OverlayScale};
pub use pan::{PanController, PanState};
pub use popup::{place_popup, PopupPlacement};
pub use rect::{LogicalPoint, LogicalRect, ScreenPoint, SurfaceSize};
pub use region::{
    hover_fill, RegionActivation, SavedStroke, ACTIVE_OUTLINE_STROKE, ACTIVE_OUTLINE_WIDTH,
};
pub use viewport::Viewport;
pub use wheel::{classify_wheel, WheelAction, WheelInput};
pub use zoom::{wheel_zoom, ZoomDirection};
