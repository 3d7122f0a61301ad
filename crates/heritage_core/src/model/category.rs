//! Display category taxonomy.
//!
//! Categories are a closed set of tags. Concrete rendering (SVG path, image
//! asset) is a renderer-side lookup keyed by [`Category`]; core never carries
//! markup.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Icon category resolved for one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Underground city or other subterranean structure.
    Underground,
    /// Church, chapel, monastery.
    Religious,
    /// Castle, fortress.
    Fortification,
    /// Museum, library, school.
    Museum,
    /// Mound, tumulus, archaeological site.
    Mound,
    /// Bath, fountain, cistern.
    WaterFeature,
    Mosque,
    /// Caravanserai, inn.
    Lodging,
    ClockTower,
    /// Generic fallback for unrecognised or empty type lists.
    PointOfInterest,
    /// User-contributed landmark.
    Landmark,
}

impl Category {
    /// Stable snake_case tag used by renderers as lookup key.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Underground => "underground",
            Self::Religious => "religious",
            Self::Fortification => "fortification",
            Self::Museum => "museum",
            Self::Mound => "mound",
            Self::WaterFeature => "water_feature",
            Self::Mosque => "mosque",
            Self::Lodging => "lodging",
            Self::ClockTower => "clock_tower",
            Self::PointOfInterest => "point_of_interest",
            Self::Landmark => "landmark",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Hex color (`#rrggbb`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color(pub &'static str);

impl Color {
    pub fn hex(self) -> &'static str {
        self.0
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Classifier output: icon shape plus color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CategoryStyle {
    pub category: Category,
    pub color: Color,
}
