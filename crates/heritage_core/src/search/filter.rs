//! Catalog filter engine.
//!
//! # Responsibility
//! - Evaluate text, category and UNESCO predicates in one pass.
//! - Order the visible subset by distance when a user position is known.
//!
//! # Invariants
//! - The visible set is exactly the conjunction of the individual predicates.
//! - Evaluation is deterministic: no hidden state feeds the result.
//! - Without a position (or with the sort override) insertion order is kept.
//! - Category matching for type labels is case-insensitive exact equality.

use crate::geo::haversine_km;
use crate::model::site::{Coords, Site};
use log::debug;

/// Default radius for the NEARBY category.
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 10.0;

/// Selected category chip.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    MyLandmarks,
    Nearby,
    /// One type label, matched exactly (case-insensitive) against `Site::types`.
    Type(String),
}

impl CategoryFilter {
    /// Parses a chip value. `ALL`, `MY LANDMARKS` and `NEARBY` are reserved
    /// (case-insensitive); blank input means `All`.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.to_uppercase().as_str() {
            "" | "ALL" => Self::All,
            "MY LANDMARKS" => Self::MyLandmarks,
            "NEARBY" => Self::Nearby,
            _ => Self::Type(trimmed.to_string()),
        }
    }
}

/// Filter state supplied by the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterQuery {
    pub text: String,
    pub category: CategoryFilter,
    pub unesco_only: bool,
    /// Known user position; `None` when unknown or unavailable.
    pub position: Option<Coords>,
    pub nearby_radius_km: f64,
    /// Keep insertion order even when a position is known.
    pub keep_insertion_order: bool,
}

impl Default for FilterQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            category: CategoryFilter::All,
            unesco_only: false,
            position: None,
            nearby_radius_km: DEFAULT_NEARBY_RADIUS_KM,
            keep_insertion_order: false,
        }
    }
}

impl FilterQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_unesco_only(mut self, unesco_only: bool) -> Self {
        self.unesco_only = unesco_only;
        self
    }

    pub fn with_position(mut self, position: Option<Coords>) -> Self {
        self.position = position;
        self
    }
}

/// One visible entry with its distance from the user, when known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleSite<'a> {
    pub site: &'a Site,
    pub distance_km: Option<f64>,
}

/// Filter result.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome<'a> {
    pub sites: Vec<VisibleSite<'a>>,
    /// NEARBY was selected without a known position and was not applied.
    pub nearby_skipped: bool,
}

impl<'a> FilterOutcome<'a> {
    pub fn ids(&self) -> Vec<&'a str> {
        self.sites.iter().map(|entry| entry.site.id.as_str()).collect()
    }

    pub fn site_refs(&self) -> Vec<&'a Site> {
        self.sites.iter().map(|entry| entry.site).collect()
    }
}

/// Case-insensitive substring match on name, admin or description.
pub fn matches_text(site: &Site, text: &str) -> bool {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let contains = |value: &str| value.to_lowercase().contains(&needle);
    contains(&site.name)
        || site.admin.as_deref().is_some_and(contains)
        || site.description.as_deref().is_some_and(contains)
}

/// Category predicate.
///
/// NEARBY without a position passes every site; callers learn about it via
/// [`FilterOutcome::nearby_skipped`].
pub fn matches_category(
    site: &Site,
    category: &CategoryFilter,
    position: Option<Coords>,
    radius_km: f64,
) -> bool {
    match category {
        CategoryFilter::All => true,
        CategoryFilter::MyLandmarks => site.is_user_generated,
        CategoryFilter::Nearby => match position {
            Some(origin) => haversine_km(origin, site.coords()) <= radius_km,
            None => true,
        },
        CategoryFilter::Type(label) => site.has_type(label),
    }
}

pub fn matches_unesco(site: &Site, unesco_only: bool) -> bool {
    !unesco_only || site.is_unesco
}

/// Produces the ordered visible subset for `query`.
pub fn filter_sites<'a>(sites: &'a [Site], query: &FilterQuery) -> FilterOutcome<'a> {
    let mut visible = sites
        .iter()
        .filter(|site| {
            matches_text(site, &query.text)
                && matches_category(site, &query.category, query.position, query.nearby_radius_km)
                && matches_unesco(site, query.unesco_only)
        })
        .map(|site| VisibleSite {
            site,
            distance_km: query
                .position
                .map(|origin| haversine_km(origin, site.coords())),
        })
        .collect::<Vec<_>>();

    if query.position.is_some() && !query.keep_insertion_order {
        // Stable sort keeps insertion order for equal distances.
        visible.sort_by(|a, b| {
            let a = a.distance_km.unwrap_or(f64::INFINITY);
            let b = b.distance_km.unwrap_or(f64::INFINITY);
            a.total_cmp(&b)
        });
    }

    let nearby_skipped = query.category == CategoryFilter::Nearby && query.position.is_none();
    debug!(
        "event=filter_apply module=search status=ok total={} visible={} nearby_skipped={}",
        sites.len(),
        visible.len(),
        nearby_skipped
    );

    FilterOutcome {
        sites: visible,
        nearby_skipped,
    }
}
