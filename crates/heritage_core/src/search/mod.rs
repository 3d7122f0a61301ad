//! Catalog query entry points.
//!
//! # Responsibility
//! - Compose text, category and designation predicates over a snapshot.
//! - Keep result shaping (ordering, distance annotation) inside core.

pub mod filter;
