use crate::rect::LogicalRect;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a declared extent could not be used. Callers treat any of these
/// as "no extent declared" and fall through to the next resolution step
/// (size attributes, bounding box, degraded mode).
#[derive(Debug, Error, PartialEq)]
pub enum ExtentError {
    #[error("extent needs exactly 4 numbers, got {0}")]
    WrongArity(usize),
    #[error("extent component {0:?} is not a finite number")]
    NotFinite(String),
    #[error("extent size {width}x{height} is not positive")]
    EmptySize { width: f64, height: f64 },
}

/// Parse a `viewBox`-style extent: four finite numbers separated by
/// whitespace and/or commas, with positive width and height.
pub fn parse_view_box(attr: &str) -> Result<LogicalRect, ExtentError> {
    let values = parse_quad(attr)?;
    let [x, y, width, height] = values;
    if width <= 0.0 || height <= 0.0 {
        return Err(ExtentError::EmptySize { width, height });
    }
    Ok(LogicalRect::new(x, y, width, height))
}

/// Geographic extent of the document. The `mapsvg:geoViewBox` attribute
/// carries min-longitude, max-latitude, max-longitude, min-latitude
/// (west, north, east, south).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
    pub min_lat: f64,
}

impl GeoBounds {
    /// North-to-south extent in degrees. Degenerate declarations fall
    /// back to 1 so downstream gradients stay finite.
    pub fn lat_span(&self) -> f64 {
        let span = self.max_lat - self.min_lat;
        if span != 0.0 && span.is_finite() {
            span
        } else {
            1.0
        }
    }

    /// Latitude at document row `y`, for a document `doc_height` tall.
    pub fn latitude_at(&self, y: f64, doc_height: f64) -> f64 {
        self.max_lat - y * (self.lat_span() / doc_height)
    }
}

/// Parse `mapsvg:geoViewBox`. Same token rules as [`parse_view_box`]
/// minus the size requirement: latitude/longitude spans are validated by
/// use, not sign.
pub fn parse_geo_view_box(attr: &str) -> Result<GeoBounds, ExtentError> {
    let [min_lon, max_lat, max_lon, min_lat] = parse_quad(attr)?;
    Ok(GeoBounds {
        min_lon,
        max_lat,
        max_lon,
        min_lat,
    })
}

fn parse_quad(attr: &str) -> Result<[f64; 4], ExtentError> {
    let tokens: Vec<&str> = attr
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.len() != 4 {
        return Err(ExtentError::WrongArity(tokens.len()));
    }

    let mut values = [0.0f64; 4];
    for (slot, token) in values.iter_mut().zip(&tokens) {
        let parsed: f64 = token
            .parse()
            .map_err(|_| ExtentError::NotFinite(token.to_string()))?;
        if !parsed.is_finite() {
            return Err(ExtentError::NotFinite(token.to_string()));
        }
        *slot = parsed;
    }
    Ok(values)
}
