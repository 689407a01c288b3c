use crate::rect::LogicalPoint;
use serde::{Deserialize, Serialize};

/// One hotspot marker from a map's catalog entry.
///
/// Markers are identified by their index in the catalog order; the
/// record itself only carries position and popup content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Position in document units.
    pub position: LogicalPoint,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Marker {
    pub fn new(position: LogicalPoint, title: impl Into<String>) -> Self {
        Self {
            position,
            title: title.into(),
            description: None,
            image_url: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}
