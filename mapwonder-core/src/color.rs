//! Region fill palette.
//!
//! Each region gets a deterministic HSL fill at load time. The fill is
//! cached on the element (`data-base-fill`) and is the anchor for hover
//! styling: hover paints a darkened variant, leave restores the cached
//! string byte-for-byte. Everything here is plain math so the palette is
//! reproducible across loads.

use crate::extent::GeoBounds;
use serde::{Deserialize, Serialize};

/// Color in HSL space: hue in degrees, saturation and lightness in
/// percent. Components are stored as produced, without normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Parse the `hsl(H, S%, L%)` form this module emits. Returns `None`
    /// for anything else (other color syntaxes are not base fills we
    /// assigned, so hover styling skips them).
    pub fn parse(css: &str) -> Option<Self> {
        let inner = css.trim().strip_prefix("hsl(")?.strip_suffix(')')?;
        let mut parts = inner.split(',');
        let hue = parts.next()?.trim().parse::<f64>().ok()?;
        let saturation = parts.next()?.trim().strip_suffix('%')?.trim().parse::<f64>().ok()?;
        let lightness = parts.next()?.trim().strip_suffix('%')?.trim().parse::<f64>().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self {
            hue,
            saturation,
            lightness,
        })
    }

    /// Copy with lightness lowered by `amount` points, floored at 0.
    pub fn darkened(&self, amount: f64) -> Self {
        Self {
            lightness: (self.lightness - amount).max(0.0),
            ..*self
        }
    }

    pub fn to_css(&self) -> String {
        format!("hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

/// Palette configuration for a map's regions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorConfig {
    /// Hue the whole palette sits around, in degrees.
    pub base_hue: f64,
    /// Saturation in percent.
    pub saturation: f64,
    /// Lightness range endpoints in percent. Gradients run from
    /// `min_lightness` (darkest fills) to `max_lightness`.
    pub min_lightness: f64,
    pub max_lightness: f64,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            base_hue: 175.0,
            saturation: 50.0,
            min_lightness: 75.0,
            max_lightness: 85.0,
        }
    }
}

/// Per-index jitter, decorrelated across channels so neighboring regions
/// in document order do not get near-identical fills.
fn jitter(index: usize) -> (f64, f64, f64) {
    let hue_j = ((index * 97) % 21) as f64 - 10.0;
    let sat_j = ((index * 67) % 11) as f64 - 5.0;
    let light_j = ((index * 53) % 5) as f64 - 2.0;
    (hue_j, sat_j, light_j)
}

/// Fill for region `index` of `count` on the document-order gradient.
/// Lightness walks from `min_lightness` to `max_lightness`; a single
/// region sits at the dark end.
pub fn index_fill(config: &ColorConfig, index: usize, count: usize) -> Hsl {
    let t = if count > 1 {
        index as f64 / (count - 1) as f64
    } else {
        0.0
    };
    let (hue_j, sat_j, light_j) = jitter(index);

    let hue = config.base_hue + hue_j;
    let saturation = (config.saturation + sat_j).round().clamp(20.0, 80.0);
    let lightness =
        (config.min_lightness + (config.max_lightness - config.min_lightness) * t + light_j)
            .round();
    Hsl::new(hue, saturation, lightness)
}

/// Fill for a region on the geographic gradient: northern regions score
/// high and sit at `min_lightness`. `latitude` is the latitude of the
/// region's bounding-box center row (see [`GeoBounds::latitude_at`]);
/// the 1.35 exponent stretches contrast toward the south.
pub fn geo_fill(config: &ColorConfig, index: usize, latitude: f64, bounds: &GeoBounds) -> Hsl {
    let score = ((latitude - bounds.min_lat) / bounds.lat_span())
        .clamp(0.0, 1.0)
        .powf(1.35);
    let hue_j = ((index * 37) % 9) as f64 - 4.0;

    let lightness =
        (config.max_lightness - score * (config.max_lightness - config.min_lightness)).round();
    Hsl::new(config.base_hue + hue_j, config.saturation, lightness)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // Hsl parse / format tests
    // ============================================================================

    #[test]
    fn parses_canonical_form() {
        let hsl = Hsl::parse("hsl(175, 50%, 78%)").unwrap();
        assert_eq!(hsl, Hsl::new(175.0, 50.0, 78.0));
    }

    #[test]
    fn parses_without_spaces() {
        let hsl = Hsl::parse("hsl(175,50%,78%)").unwrap();
        assert_eq!(hsl, Hsl::new(175.0, 50.0, 78.0));
    }

    #[test]
    fn parses_decimal_components() {
        let hsl = Hsl::parse("hsl(175, 47.5%, 80.25%)").unwrap();
        assert_eq!(hsl.saturation, 47.5);
        assert_eq!(hsl.lightness, 80.25);
    }

    #[test]
    fn rejects_other_color_syntaxes() {
        assert_eq!(Hsl::parse("rgb(10, 20, 30)"), None);
        assert_eq!(Hsl::parse("#aabbcc"), None);
        assert_eq!(Hsl::parse("hsl(175, 50, 78)"), None);
        assert_eq!(Hsl::parse("hsl(175, 50%, 78%, 0.5)"), None);
        assert_eq!(Hsl::parse(""), None);
    }

    #[test]
    fn css_output_round_trips_through_parse() {
        let original = "hsl(165, 45%, 73%)";
        let parsed = Hsl::parse(original).unwrap();
        assert_eq!(parsed.to_css(), original);
    }

    #[test]
    fn darkened_lowers_lightness_with_floor_at_zero() {
        let base = Hsl::new(175.0, 50.0, 78.0);
        assert_eq!(base.darkened(10.0).lightness, 68.0);
        assert_eq!(Hsl::new(175.0, 50.0, 6.0).darkened(10.0).lightness, 0.0);
    }

    // ============================================================================
    // index gradient tests
    // ============================================================================

    #[test]
    fn single_region_sits_at_the_dark_end() {
        let fill = index_fill(&ColorConfig::default(), 0, 1);
        // Index 0 jitter: hue -10, sat -5, light -2.
        assert_eq!(fill, Hsl::new(165.0, 45.0, 73.0));
    }

    #[test]
    fn last_region_sits_near_the_light_end() {
        let config = ColorConfig::default();
        let fill = index_fill(&config, 10, 11);
        assert!((fill.lightness - config.max_lightness).abs() <= 2.0);
    }

    #[test]
    fn fills_are_deterministic() {
        let config = ColorConfig::default();
        assert_eq!(index_fill(&config, 7, 77), index_fill(&config, 7, 77));
    }

    #[test]
    fn saturation_stays_in_display_range() {
        let config = ColorConfig {
            saturation: 78.0,
            ..ColorConfig::default()
        };
        for index in 0..77 {
            let fill = index_fill(&config, index, 77);
            assert!((20.0..=80.0).contains(&fill.saturation), "index {index}: {fill:?}");
        }
    }

    #[test]
    fn lightness_stays_near_the_configured_band() {
        let config = ColorConfig::default();
        for index in 0..77 {
            let fill = index_fill(&config, index, 77);
            assert!(fill.lightness >= config.min_lightness - 2.0);
            assert!(fill.lightness <= config.max_lightness + 2.0);
        }
    }

    #[test]
    fn emitted_fill_round_trips_for_hover_restore() {
        let config = ColorConfig::default();
        for index in 0..20 {
            let css = index_fill(&config, index, 20).to_css();
            let reparsed = Hsl::parse(&css).expect("emitted fill must reparse");
            assert_eq!(reparsed.to_css(), css);
        }
    }

    // ============================================================================
    // geo gradient tests
    // ============================================================================

    fn thailand_bounds() -> GeoBounds {
        GeoBounds {
            min_lon: 97.344728,
            max_lat: 20.463430,
            max_lon: 105.640023,
            min_lat: 5.614417,
        }
    }

    #[test]
    fn northern_latitude_maps_to_min_lightness() {
        let config = ColorConfig::default();
        let bounds = thailand_bounds();
        let fill = geo_fill(&config, 0, bounds.max_lat, &bounds);
        assert_eq!(fill.lightness, config.min_lightness);
    }

    #[test]
    fn southern_latitude_maps_to_max_lightness() {
        let config = ColorConfig::default();
        let bounds = thailand_bounds();
        let fill = geo_fill(&config, 0, bounds.min_lat, &bounds);
        assert_eq!(fill.lightness, config.max_lightness);
    }

    #[test]
    fn out_of_bounds_latitudes_clamp() {
        let config = ColorConfig::default();
        let bounds = thailand_bounds();
        assert_eq!(
            geo_fill(&config, 0, 89.0, &bounds).lightness,
            config.min_lightness
        );
        assert_eq!(
            geo_fill(&config, 0, -30.0, &bounds).lightness,
            config.max_lightness
        );
    }

    #[test]
    fn geo_mode_keeps_saturation_unjittered() {
        let config = ColorConfig::default();
        let bounds = thailand_bounds();
        for index in 0..10 {
            let fill = geo_fill(&config, index, 13.7, &bounds);
            assert_eq!(fill.saturation, config.saturation);
        }
    }

    #[test]
    fn geo_hue_jitter_stays_within_four_degrees() {
        let config = ColorConfig::default();
        let bounds = thailand_bounds();
        for index in 0..40 {
            let fill = geo_fill(&config, index, 13.7, &bounds);
            assert!((fill.hue - config.base_hue).abs() <= 4.0);
        }
    }
}
