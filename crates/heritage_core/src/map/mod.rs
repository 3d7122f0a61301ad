//! Map marker projection.
//!
//! # Responsibility
//! - Compute the marker layer from the visible site list.
//! - Aggregate externally formed clusters into badge colors.
//!
//! # See also
//! - `search::filter` for how the visible list is produced.

pub mod markers;
