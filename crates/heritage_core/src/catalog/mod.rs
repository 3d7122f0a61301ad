//! Canonical catalog construction.
//!
//! # Responsibility
//! - Normalize raw features, aggregate them into sites and classify sites.
//! - Expose an immutable [`Catalog`] snapshot to filter and map layers.
//!
//! # Invariants
//! - A snapshot is never mutated; input changes produce a new snapshot.
//! - Site ids are unique inside one snapshot.

pub mod aggregate;
pub mod classify;
pub mod normalize;

use crate::config::LinkTemplates;
use crate::model::feature::RawFeature;
use crate::model::site::Site;
use log::info;
use std::collections::{BTreeSet, HashMap};
use std::time::Instant;

/// Immutable catalog snapshot: user landmarks first, then upstream sites.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    sites: Vec<Site>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a fresh snapshot from the raw dataset and current user landmarks.
    ///
    /// # Side effects
    /// - Emits one `catalog_build` log event.
    pub fn build(features: &[RawFeature], user_sites: &[Site], links: &LinkTemplates) -> Self {
        let started_at = Instant::now();
        let sites = aggregate::aggregate_sites(features, user_sites, links);
        let catalog = Self::from_sites(sites);
        info!(
            "event=catalog_build module=catalog status=ok features={} sites={} user_sites={} duration_ms={}",
            features.len(),
            catalog.len(),
            catalog.sites.iter().filter(|site| site.is_user_generated).count(),
            started_at.elapsed().as_millis()
        );
        catalog
    }

    fn from_sites(sites: Vec<Site>) -> Self {
        let index = sites
            .iter()
            .enumerate()
            .map(|(slot, site)| (site.id.clone(), slot))
            .collect();
        Self { sites, index }
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn get(&self, id: &str) -> Option<&Site> {
        self.index.get(id).map(|&slot| &self.sites[slot])
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Sorted distinct type labels across all sites, for category chips.
    pub fn type_labels(&self) -> Vec<String> {
        self.sites
            .iter()
            .flat_map(|site| site.types.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
