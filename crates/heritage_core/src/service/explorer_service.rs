//! Explorer facade tying dataset, landmarks, filters and markers together.
//!
//! # Responsibility
//! - Hold the static raw dataset and the landmark service.
//! - Rebuild the immutable catalog snapshot whenever landmarks change.
//! - Answer list and marker queries against the current snapshot.
//!
//! # Invariants
//! - The snapshot is replaced, never mutated in place.
//! - Only the latest position request can change the known position.

use crate::catalog::Catalog;
use crate::config::CatalogConfig;
use crate::geo::position::{PositionError, PositionFix, PositionTicket, PositionTracker};
use crate::map::markers::{compute_markers, MarkerSet};
use crate::model::feature::RawFeature;
use crate::model::site::{Coords, Site};
use crate::repo::landmark_repo::LandmarkRepository;
use crate::search::filter::{filter_sites, CategoryFilter, FilterOutcome, FilterQuery};
use crate::service::landmark_service::{LandmarkError, LandmarkService, NewLandmark};
use std::sync::Arc;

/// Use-case facade for list and map consumers.
pub struct ExplorerService<R: LandmarkRepository> {
    config: CatalogConfig,
    features: Vec<RawFeature>,
    landmarks: LandmarkService<R>,
    catalog: Arc<Catalog>,
    position: PositionTracker,
}

impl<R: LandmarkRepository> ExplorerService<R> {
    /// Opens the landmark store once and builds the first snapshot.
    pub fn new(config: CatalogConfig, features: Vec<RawFeature>, repo: R) -> Self {
        let landmarks = LandmarkService::open(repo);
        let catalog = Arc::new(Catalog::build(&features, landmarks.sites(), &config.links));
        Self {
            config,
            features,
            landmarks,
            catalog,
            position: PositionTracker::new(),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Current snapshot.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Shared handle to the current snapshot; stays valid after rebuilds.
    pub fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn landmarks(&self) -> &[Site] {
        self.landmarks.sites()
    }

    pub fn add_landmark(&mut self, request: NewLandmark) -> Result<Site, LandmarkError> {
        let site = self.landmarks.add_landmark(request)?;
        self.rebuild();
        Ok(site)
    }

    pub fn add_landmark_at(
        &mut self,
        request: NewLandmark,
        created_at_ms: i64,
    ) -> Result<Site, LandmarkError> {
        let site = self.landmarks.add_landmark_at(request, created_at_ms)?;
        self.rebuild();
        Ok(site)
    }

    pub fn remove_landmark(&mut self, id: &str) -> Result<Site, LandmarkError> {
        let site = self.landmarks.remove_landmark(id)?;
        self.rebuild();
        Ok(site)
    }

    pub fn begin_position_request(&mut self) -> PositionTicket {
        self.position.begin_request()
    }

    /// Returns whether the outcome was applied (its ticket was the latest).
    pub fn complete_position_request(
        &mut self,
        ticket: PositionTicket,
        outcome: Result<Coords, PositionError>,
    ) -> bool {
        self.position.complete(ticket, outcome)
    }

    pub fn position(&self) -> PositionFix {
        self.position.fix()
    }

    /// Query prefilled with the known position and configured radius.
    pub fn query(
        &self,
        text: impl Into<String>,
        category: CategoryFilter,
        unesco_only: bool,
    ) -> FilterQuery {
        FilterQuery {
            text: text.into(),
            category,
            unesco_only,
            position: self.position.fix().coords(),
            nearby_radius_km: self.config.nearby_radius_km,
            keep_insertion_order: false,
        }
    }

    pub fn visible(&self, query: &FilterQuery) -> FilterOutcome<'_> {
        filter_sites(self.catalog.sites(), query)
    }

    /// Marker layer for the sites visible under `query`.
    pub fn markers(&self, query: &FilterQuery) -> MarkerSet {
        compute_markers(self.visible(query).site_refs())
    }

    fn rebuild(&mut self) {
        self.catalog = Arc::new(Catalog::build(
            &self.features,
            self.landmarks.sites(),
            &self.config.links,
        ));
    }
}
