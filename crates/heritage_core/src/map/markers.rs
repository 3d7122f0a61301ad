//! Marker set and cluster badge computation.
//!
//! # Invariants
//! - `compute_markers` is pure: the same visible list yields the same set,
//!   and a new set always replaces the previous one.
//! - Cluster color: UNESCO majority (>= 50%) first, then landmark majority,
//!   then neutral. Designation outranks provenance.

use crate::catalog::classify::{
    classify_site, HERITAGE_ACCENT, LANDMARK_ACCENT, NEUTRAL_CLUSTER_COLOR,
};
use crate::model::category::{CategoryStyle, Color};
use crate::model::site::{Coords, Site, SiteId};
use serde::Serialize;

/// Padding ratio applied to marker bounds when framing the map.
pub const BOUNDS_PAD_RATIO: f64 = 0.2;

/// One map marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub site_id: SiteId,
    pub coords: Coords,
    pub style: CategoryStyle,
    pub is_unesco: bool,
    pub is_user_generated: bool,
}

/// Lat/lon bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south_west: Coords,
    pub north_east: Coords,
}

impl Bounds {
    fn around(points: impl IntoIterator<Item = Coords>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Self {
            south_west: first,
            north_east: first,
        };
        for point in points {
            bounds.south_west.lat = bounds.south_west.lat.min(point.lat);
            bounds.south_west.lon = bounds.south_west.lon.min(point.lon);
            bounds.north_east.lat = bounds.north_east.lat.max(point.lat);
            bounds.north_east.lon = bounds.north_east.lon.max(point.lon);
        }
        Some(bounds)
    }

    /// Extends each side by `ratio` of the box's span.
    pub fn pad(self, ratio: f64) -> Self {
        let lat_pad = (self.north_east.lat - self.south_west.lat) * ratio;
        let lon_pad = (self.north_east.lon - self.south_west.lon) * ratio;
        Self {
            south_west: Coords::new(self.south_west.lat - lat_pad, self.south_west.lon - lon_pad),
            north_east: Coords::new(self.north_east.lat + lat_pad, self.north_east.lon + lon_pad),
        }
    }

    pub fn contains(&self, point: Coords) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&point.lat)
            && (self.south_west.lon..=self.north_east.lon).contains(&point.lon)
    }
}

/// Marker layer for one visible list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSet {
    pub markers: Vec<Marker>,
    /// Padded framing box; `None` when there are no markers.
    pub bounds: Option<Bounds>,
}

impl MarkerSet {
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, site_id: &str) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.site_id == site_id)
    }
}

/// Cluster badge derived from its member markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClusterBadge {
    pub count: usize,
    pub color: Color,
}

/// Builds the marker set for the visible sites, one marker per site.
pub fn compute_markers<'a>(visible: impl IntoIterator<Item = &'a Site>) -> MarkerSet {
    let markers = visible
        .into_iter()
        .map(|site| Marker {
            site_id: site.id.clone(),
            coords: site.coords(),
            style: classify_site(site),
            is_unesco: site.is_unesco,
            is_user_generated: site.is_user_generated,
        })
        .collect::<Vec<_>>();
    let bounds = Bounds::around(markers.iter().map(|marker| marker.coords))
        .map(|bounds| bounds.pad(BOUNDS_PAD_RATIO));

    MarkerSet { markers, bounds }
}

/// Picks the badge color for one cluster by majority rule.
pub fn cluster_badge<'a>(members: impl IntoIterator<Item = &'a Marker>) -> ClusterBadge {
    let (count, unesco, landmarks) =
        members
            .into_iter()
            .fold((0usize, 0usize, 0usize), |(count, unesco, landmarks), marker| {
                (
                    count + 1,
                    unesco + usize::from(marker.is_unesco),
                    landmarks + usize::from(marker.is_user_generated),
                )
            });

    let color = if count == 0 {
        NEUTRAL_CLUSTER_COLOR
    } else if unesco * 2 >= count {
        HERITAGE_ACCENT
    } else if landmarks * 2 >= count {
        LANDMARK_ACCENT
    } else {
        NEUTRAL_CLUSTER_COLOR
    };

    ClusterBadge { count, color }
}
