//! Canonical heritage site model.
//!
//! # Responsibility
//! - Define the deduplicated site entity shared by filter, classifier and
//!   map projections.
//! - Provide the identity-key derivation used to merge raw features.
//!
//! # Invariants
//! - `id` is unique within one catalog snapshot.
//! - `types` never contains duplicate labels.
//! - `coords` is fixed at creation; there is no setter. Moving a landmark
//!   means deleting and recreating it.
//! - `description` is only populated for user-generated sites.

use serde::{Deserialize, Serialize};

/// Stable site identifier.
///
/// Upstream sites use `<token>@<lat>,<lon>`; user landmarks use
/// `user_<epoch_ms>`.
pub type SiteId = String;

/// Prefix shared by all user landmark ids.
pub const USER_SITE_ID_PREFIX: &str = "user_";

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub lat: f64,
    pub lon: f64,
}

impl Coords {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns whether both components are finite and inside WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Archive portal an external identifier points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchivePortal {
    /// Turkish cultural inventory (`kulturenvanteri.com`).
    KulturEnvanteri,
    /// Ministry culture portal.
    CulturePortal,
}

/// One resolved archive-portal link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveLink {
    pub portal: ArchivePortal,
    pub url: String,
}

/// External reference targets exposed to renderers. Reachability is never checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLinks {
    /// Primary reference page (wiki entity). `None` for user landmarks.
    pub primary: Option<String>,
    /// Zero or more archive links, at most one per portal.
    pub archives: Vec<ArchiveLink>,
}

impl ExternalLinks {
    /// Adds an archive link unless the portal already has one.
    pub(crate) fn add_archive(&mut self, link: ArchiveLink) {
        if self.archives.iter().all(|known| known.portal != link.portal) {
            self.archives.push(link);
        }
    }

    pub fn archive(&self, portal: ArchivePortal) -> Option<&str> {
        self.archives
            .iter()
            .find(|link| link.portal == portal)
            .map(|link| link.url.as_str())
    }
}

/// Canonical, deduplicated heritage location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    /// Distinct type labels in first-seen order.
    pub types: Vec<String>,
    coords: Coords,
    /// Image file name (last path segment of the source URL).
    pub image: Option<String>,
    pub admin: Option<String>,
    pub is_unesco: bool,
    pub is_user_generated: bool,
    pub description: Option<String>,
    pub external_links: ExternalLinks,
}

impl Site {
    /// Creates an upstream site with no type labels yet.
    pub(crate) fn upstream(id: SiteId, name: String, coords: Coords) -> Self {
        Self {
            id,
            name,
            types: Vec::new(),
            coords,
            image: None,
            admin: None,
            is_unesco: false,
            is_user_generated: false,
            description: None,
            external_links: ExternalLinks::default(),
        }
    }

    /// Creates a user landmark.
    ///
    /// # Invariants
    /// - `is_user_generated` is `true`, `is_unesco` is `false`.
    /// - `types` starts empty; the classifier does not look at it for landmarks.
    pub fn user_landmark(
        created_at_ms: i64,
        name: impl Into<String>,
        coords: Coords,
        description: Option<String>,
    ) -> Self {
        Self {
            id: user_site_id(created_at_ms),
            name: name.into(),
            types: Vec::new(),
            coords,
            image: None,
            admin: None,
            is_unesco: false,
            is_user_generated: true,
            description,
            external_links: ExternalLinks::default(),
        }
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    /// Appends `label` when it is non-blank and not yet present.
    ///
    /// Returns whether the label was added.
    pub(crate) fn push_type(&mut self, label: &str) -> bool {
        if label.trim().is_empty() || self.types.iter().any(|known| known == label) {
            return false;
        }
        self.types.push(label.to_string());
        true
    }

    /// Case-insensitive exact membership test over `types`.
    pub fn has_type(&self, label: &str) -> bool {
        let wanted = label.trim().to_lowercase();
        self.types
            .iter()
            .any(|known| known.trim().to_lowercase() == wanted)
    }
}

/// Derives the identity key for an upstream record.
///
/// Float formatting uses the shortest round-trip representation, so equal
/// coordinates always produce the same key.
pub fn upstream_site_id(token: &str, coords: Coords) -> SiteId {
    // `+ 0.0` folds -0.0 into 0.0, which would otherwise format differently.
    format!("{}@{},{}", token.trim(), coords.lat + 0.0, coords.lon + 0.0)
}

pub fn user_site_id(created_at_ms: i64) -> SiteId {
    format!("{USER_SITE_ID_PREFIX}{created_at_ms}")
}
