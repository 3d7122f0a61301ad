//! User position request tracking.
//!
//! Position acquisition is external and may be slow or denied. Callers take a
//! ticket before each request and hand the outcome back with that ticket; a
//! result for a superseded ticket is discarded.

use crate::model::site::Coords;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why a position could not be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionError {
    /// User or platform refused access.
    Denied,
    /// No positioning capability.
    Unsupported,
    Timeout,
}

impl Display for PositionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Denied => write!(f, "position access denied"),
            Self::Unsupported => write!(f, "positioning unsupported"),
            Self::Timeout => write!(f, "position request timed out"),
        }
    }
}

impl Error for PositionError {}

/// Current knowledge about the user's position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PositionFix {
    /// Never requested.
    #[default]
    Unknown,
    Available(Coords),
    /// Last request failed; NEARBY filtering no-ops.
    Unavailable(PositionError),
}

impl PositionFix {
    pub fn coords(&self) -> Option<Coords> {
        match self {
            Self::Available(coords) => Some(*coords),
            Self::Unknown | Self::Unavailable(_) => None,
        }
    }
}

/// Opaque handle for one position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PositionTicket(u64);

/// Applies only the most recently requested position outcome.
#[derive(Debug, Default)]
pub struct PositionTracker {
    latest_ticket: u64,
    fix: PositionFix,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding every earlier ticket.
    pub fn begin_request(&mut self) -> PositionTicket {
        self.latest_ticket += 1;
        PositionTicket(self.latest_ticket)
    }

    /// Applies an outcome if `ticket` is still the latest.
    ///
    /// Returns whether the outcome was applied.
    pub fn complete(
        &mut self,
        ticket: PositionTicket,
        outcome: Result<Coords, PositionError>,
    ) -> bool {
        if ticket.0 != self.latest_ticket {
            info!(
                "event=position_update module=geo status=discarded ticket={} latest={}",
                ticket.0, self.latest_ticket
            );
            return false;
        }

        self.fix = match outcome {
            Ok(coords) if coords.is_valid() => {
                info!("event=position_update module=geo status=ok ticket={}", ticket.0);
                PositionFix::Available(coords)
            }
            Ok(_) => {
                warn!(
                    "event=position_update module=geo status=error ticket={} error_code=invalid_coords",
                    ticket.0
                );
                PositionFix::Unavailable(PositionError::Unsupported)
            }
            Err(err) => {
                warn!(
                    "event=position_update module=geo status=unavailable ticket={} error={}",
                    ticket.0, err
                );
                PositionFix::Unavailable(err)
            }
        };
        true
    }

    pub fn fix(&self) -> PositionFix {
        self.fix
    }
}

#[cfg(test)]
mod tests {
    use super::{PositionError, PositionFix, PositionTracker};
    use crate::model::site::Coords;

    #[test]
    fn stale_ticket_is_discarded() {
        let mut tracker = PositionTracker::new();
        let first = tracker.begin_request();
        let second = tracker.begin_request();

        assert!(tracker.complete(second, Ok(Coords::new(38.62, 34.72))));
        assert!(!tracker.complete(first, Ok(Coords::new(0.0, 0.0))));
        assert_eq!(tracker.fix(), PositionFix::Available(Coords::new(38.62, 34.72)));
    }

    #[test]
    fn failure_is_reported_as_unavailable() {
        let mut tracker = PositionTracker::new();
        let ticket = tracker.begin_request();
        assert!(tracker.complete(ticket, Err(PositionError::Denied)));
        assert_eq!(tracker.fix(), PositionFix::Unavailable(PositionError::Denied));
        assert_eq!(tracker.fix().coords(), None);
    }
}
