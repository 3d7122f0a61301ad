//! Spherical-earth geometry helpers.
//!
//! # Responsibility
//! - Great-circle distance for proximity sorting and radius filters.
//! - Track user position requests so only the latest outcome is applied.
//!
//! # Invariants
//! - `haversine_km(a, a) == 0` and `haversine_km(a, b) == haversine_km(b, a)`
//!   up to floating-point rounding.

pub mod position;

use crate::model::site::Coords;

/// Mean Earth radius used by the spherical approximation.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance in kilometers.
pub fn haversine_km(a: Coords, b: Coords) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Clamp guards sqrt(1 - h) against h drifting above 1.
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}
