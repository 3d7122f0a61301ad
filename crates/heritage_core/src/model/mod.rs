//! Heritage catalog domain model.
//!
//! # Responsibility
//! - Define raw input records, canonical sites and the display taxonomy.
//!
//! # Invariants
//! - Every site is identified by a stable `SiteId`.
//! - Site coordinates are immutable after creation.

pub mod category;
pub mod feature;
pub mod site;
