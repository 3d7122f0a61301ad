//! Heritage catalog engine.
//!
//! Turns duplicate-laden upstream feature records into canonical sites,
//! classifies them, answers filter queries and projects the visible subset
//! onto a map marker layer. User landmarks are merged into the same model.

pub mod catalog;
pub mod config;
pub mod db;
pub mod geo;
pub mod ingest;
pub mod logging;
pub mod map;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use catalog::classify::{classify, classify_site, primary_type_label};
pub use catalog::Catalog;
pub use config::CatalogConfig;
pub use geo::haversine_km;
pub use geo::position::{PositionError, PositionFix, PositionTicket, PositionTracker};
pub use ingest::{load_dataset_file, parse_dataset, DatasetError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use map::markers::{cluster_badge, compute_markers, ClusterBadge, Marker, MarkerSet};
pub use model::category::{Category, CategoryStyle, Color};
pub use model::feature::RawFeature;
pub use model::site::{Coords, ExternalLinks, Site, SiteId};
pub use repo::landmark_repo::{
    LandmarkRepository, SqliteLandmarkRepository, StoreError, StoreResult,
};
pub use search::filter::{filter_sites, CategoryFilter, FilterOutcome, FilterQuery, VisibleSite};
pub use service::explorer_service::ExplorerService;
pub use service::landmark_service::{LandmarkError, LandmarkService, NewLandmark};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
