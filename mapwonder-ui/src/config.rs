//! Map catalog.
//!
//! Defines available map documents with their palettes and hotspot
//! markers. The hash route selects one entry; everything else the app
//! shows is derived from the fetched SVG itself.

use mapwonder_core::{ColorConfig, LogicalPoint, Marker};

/// A point of interest pinned onto a map document, in document units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HotspotConfig {
    /// Horizontal position in the document coordinate space.
    pub x: f64,
    /// Vertical position in the document coordinate space.
    pub y: f64,
    /// Popup heading.
    pub title: &'static str,
    /// Optional popup body text.
    pub description: Option<&'static str>,
    /// Optional popup image, served from the site root.
    pub image_url: Option<&'static str>,
}

impl HotspotConfig {
    pub fn to_marker(&self) -> Marker {
        let mut marker = Marker::new(LogicalPoint::new(self.x, self.y), self.title);
        if let Some(description) = self.description {
            marker = marker.with_description(description);
        }
        if let Some(image_url) = self.image_url {
            marker = marker.with_image_url(image_url);
        }
        marker
    }
}

/// Configuration for one map document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapConfig {
    /// Unique identifier, also the URL hash that opens this map.
    pub slug: &'static str,
    /// Human-readable name for headers and the landing card.
    pub title: &'static str,
    /// One-line description shown under the title.
    pub tagline: &'static str,
    /// Where the inline SVG document is fetched from.
    pub svg_url: &'static str,
    /// Optional logo shown next to the title in the map header.
    pub logo_url: Option<&'static str>,
    /// Alt text for the logo; falls back to the map title.
    pub logo_alt: Option<&'static str>,
    /// Landing card image; the map document itself when absent.
    pub thumb_url: Option<&'static str>,
    /// Region palette for this document.
    pub palette: ColorConfig,
    /// Markers layered on top of the document.
    pub hotspots: &'static [HotspotConfig],
}

impl MapConfig {
    /// Image for the landing card; the map document doubles as its own
    /// thumbnail when no dedicated one exists.
    pub fn thumbnail(&self) -> &'static str {
        self.thumb_url.unwrap_or(self.svg_url)
    }
}

/// Deployment sites across Thailand. Coordinates were projected from
/// hospital lat/lon into the document's viewBox space.
static THAILAND_HOTSPOTS: &[HotspotConfig] = &[
    HotspotConfig {
        x: 382.5,
        y: 231.4,
        title: "Kumphawapi Hospital",
        description: Some("District referral hospital in Udon Thani province, live since 2023."),
        image_url: Some("/photos/kumphawapi.svg"),
    },
    HotspotConfig {
        x: 331.4,
        y: 300.6,
        title: "Kaeng Khro Hospital",
        description: Some("Community hospital in Chaiyaphum province running the full ward suite."),
        image_url: Some("/photos/kaeng-khro.svg"),
    },
    HotspotConfig {
        x: 215.3,
        y: 464.6,
        title: "King Chulalongkorn Memorial Hospital",
        description: Some("Tertiary teaching hospital in central Bangkok."),
        image_url: None,
    },
    HotspotConfig {
        x: 223.5,
        y: 467.0,
        title: "Blessing Hospital",
        description: Some("Private hospital east of Bangkok, pilot site for the logistics module."),
        image_url: None,
    },
    HotspotConfig {
        x: 121.5,
        y: 865.5,
        title: "Khlong Thom Hospital",
        description: Some("Coastal district hospital in Krabi province."),
        image_url: None,
    },
];

static VIETNAM_HOTSPOTS: &[HotspotConfig] = &[
    HotspotConfig {
        x: 206.0,
        y: 132.0,
        title: "Bach Mai Hospital",
        description: Some("Flagship site in Hanoi, onboarding started in 2024."),
        image_url: None,
    },
    HotspotConfig {
        x: 258.0,
        y: 792.0,
        title: "Cho Ray Hospital",
        description: Some("Largest general hospital in Ho Chi Minh City."),
        image_url: None,
    },
];

/// Registry of available map documents.
pub static MAP_CATALOG: &[MapConfig] = &[
    MapConfig {
        slug: "thailand",
        title: "Thailand",
        tagline: "Hospital deployments across Thai provinces",
        svg_url: "/maps/thailand.svg",
        logo_url: Some("/logos/thailand-moph.svg"),
        logo_alt: Some("Ministry of Public Health"),
        thumb_url: None,
        palette: ColorConfig {
            base_hue: 175.0,
            saturation: 50.0,
            min_lightness: 75.0,
            max_lightness: 85.0,
        },
        hotspots: THAILAND_HOTSPOTS,
    },
    MapConfig {
        slug: "vietnam",
        title: "Vietnam",
        tagline: "Partner hospitals in the Vietnam rollout",
        svg_url: "/maps/vietnam.svg",
        logo_url: None,
        logo_alt: None,
        thumb_url: None,
        palette: ColorConfig {
            base_hue: 145.0,
            saturation: 45.0,
            min_lightness: 70.0,
            max_lightness: 84.0,
        },
        hotspots: VIETNAM_HOTSPOTS,
    },
    MapConfig {
        slug: "malaysia",
        title: "Malaysia",
        tagline: "Evaluation region, no live sites yet",
        svg_url: "/maps/malaysia.svg",
        logo_url: None,
        logo_alt: None,
        thumb_url: None,
        palette: ColorConfig {
            base_hue: 35.0,
            saturation: 55.0,
            min_lightness: 72.0,
            max_lightness: 86.0,
        },
        hotspots: &[],
    },
];

/// Look up a map configuration by slug.
pub fn get_map(slug: &str) -> Option<&'static MapConfig> {
    MAP_CATALOG.iter().find(|config| config.slug == slug)
}
