//! Site aggregation over raw features.
//!
//! # Responsibility
//! - Merge fragments sharing an identity key into one canonical [`Site`].
//! - Prepend user landmarks ahead of upstream sites.
//!
//! # Invariants
//! - Pure: every call builds a fresh accumulator; nothing is cached.
//! - `types` keeps first-seen order and never holds duplicates.
//! - `is_unesco` only ever flips from `false` to `true` during a merge.
//! - Upstream sites keep first-seen order; user sites keep caller order.
//!
//! Permuting the input may change the order of `types` inside one site and
//! which fragment seeds `name`; ids, type sets and `is_unesco` do not change.

use super::normalize::{normalize_feature, SiteFragment};
use crate::config::LinkTemplates;
use crate::model::feature::RawFeature;
use crate::model::site::{Site, SiteId};
use log::warn;
use std::collections::{HashMap, HashSet};

/// Ordered build-time accumulator from identity key to site.
#[derive(Default)]
struct SiteAccumulator {
    order: Vec<Site>,
    index: HashMap<SiteId, usize>,
}

impl SiteAccumulator {
    fn absorb(&mut self, fragment: SiteFragment) {
        let slot = match self.index.get(&fragment.id) {
            Some(&slot) => slot,
            None => {
                let slot = self.order.len();
                self.index.insert(fragment.id.clone(), slot);
                self.order.push(Site::upstream(
                    fragment.id.clone(),
                    fragment.name.clone(),
                    fragment.coords,
                ));
                slot
            }
        };

        let site = &mut self.order[slot];
        if let Some(label) = fragment.type_label.as_deref() {
            site.push_type(label);
        }
        if fragment.is_unesco() {
            site.is_unesco = true;
        }
        if site.image.is_none() {
            site.image = fragment.image;
        }
        fill_label(&mut site.admin, fragment.admin_label);
        if site.external_links.primary.is_none() {
            site.external_links.primary = fragment.links.primary;
        }
        for archive in fragment.links.archives {
            site.external_links.add_archive(archive);
        }
    }

    fn freeze(self) -> Vec<Site> {
        self.order
    }
}

// Unspecified is filled by anything; explicitly empty only by a non-empty value.
fn fill_label(slot: &mut Option<String>, incoming: Option<String>) {
    let Some(incoming) = incoming else {
        return;
    };
    let replace = match slot.as_deref() {
        None => true,
        Some(current) => current.trim().is_empty() && !incoming.trim().is_empty(),
    };
    if replace {
        *slot = Some(incoming);
    }
}

/// Builds the canonical site collection.
///
/// `user_sites` are emitted first, unchanged and in the given order
/// (most-recent-first by convention). Duplicate user ids keep the first entry.
pub fn aggregate_sites(
    features: &[RawFeature],
    user_sites: &[Site],
    links: &LinkTemplates,
) -> Vec<Site> {
    let mut accumulator = SiteAccumulator::default();
    for feature in features {
        accumulator.absorb(normalize_feature(feature, links));
    }
    let upstream = accumulator.freeze();

    let mut seen = HashSet::with_capacity(user_sites.len());
    let mut sites = Vec::with_capacity(user_sites.len() + upstream.len());
    for site in user_sites {
        if !seen.insert(site.id.as_str()) {
            warn!(
                "event=catalog_build module=catalog status=skipped reason=duplicate_user_site id={}",
                site.id
            );
            continue;
        }
        sites.push(site.clone());
    }
    sites.extend(upstream);
    sites
}
