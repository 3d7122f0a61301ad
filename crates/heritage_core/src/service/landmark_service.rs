//! User landmark use-case service.
//!
//! # Responsibility
//! - Own the in-memory landmark list (most-recent-first).
//! - Validate and apply add/remove, writing the full list through on change.
//!
//! # Invariants
//! - The store is read when the service is opened. After a failed read it is
//!   read again before the first write, and never otherwise.
//! - A failed read degrades to "no user landmarks"; it is never fatal.
//! - A degraded service never overwrites stored data it could not read: the
//!   raw payload is backed up first, and the write is refused if that fails.
//! - A failed write leaves the in-memory list unchanged.
//! - Landmark ids are `user_<epoch_ms>` and unique within the list.

use crate::model::site::{user_site_id, Coords, Site, SiteId};
use crate::repo::landmark_repo::{LandmarkRepository, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Errors from landmark use-cases.
#[derive(Debug)]
pub enum LandmarkError {
    /// Name is blank after trim.
    InvalidName,
    /// Coordinates are non-finite or outside WGS84 bounds.
    InvalidCoords(Coords),
    NotFound(SiteId),
    Store(StoreError),
}

impl Display for LandmarkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(f, "landmark name must not be blank"),
            Self::InvalidCoords(coords) => {
                write!(f, "invalid landmark coordinates ({}, {})", coords.lat, coords.lon)
            }
            Self::NotFound(id) => write!(f, "landmark not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LandmarkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for LandmarkError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Request model for creating a landmark.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLandmark {
    pub name: String,
    pub coords: Coords,
    pub description: Option<String>,
}

impl NewLandmark {
    pub fn new(name: impl Into<String>, coords: Coords) -> Self {
        Self {
            name: name.into(),
            coords,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Landmark service facade over a repository implementation.
pub struct LandmarkService<R: LandmarkRepository> {
    repo: R,
    sites: Vec<Site>,
    /// Startup read failed and the stored payload is not yet secured.
    degraded: bool,
}

impl<R: LandmarkRepository> LandmarkService<R> {
    /// Opens the service and performs the single startup read.
    pub fn open(repo: R) -> Self {
        let (sites, degraded) = match repo.load_landmarks() {
            Ok(sites) => {
                info!(
                    "event=landmark_store_load module=service status=ok count={}",
                    sites.len()
                );
                (sites, false)
            }
            Err(err) => {
                warn!(
                    "event=landmark_store_load module=service status=degraded error={}",
                    err
                );
                (Vec::new(), true)
            }
        };
        Self {
            repo,
            sites,
            degraded,
        }
    }

    /// Whether the startup read failed and no write has happened since.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Current landmarks, most-recent-first.
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn get(&self, id: &str) -> Option<&Site> {
        self.sites.iter().find(|site| site.id == id)
    }

    /// Adds a landmark stamped with the current wall-clock time.
    pub fn add_landmark(&mut self, request: NewLandmark) -> Result<Site, LandmarkError> {
        self.add_landmark_at(request, now_epoch_ms())
    }

    /// Adds a landmark stamped with `created_at_ms`.
    ///
    /// # Contract
    /// - Name is trimmed; blank description becomes `None`.
    /// - On id collision the timestamp is bumped until the id is free.
    /// - The new landmark is placed first.
    pub fn add_landmark_at(
        &mut self,
        request: NewLandmark,
        created_at_ms: i64,
    ) -> Result<Site, LandmarkError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(LandmarkError::InvalidName);
        }
        if !request.coords.is_valid() {
            return Err(LandmarkError::InvalidCoords(request.coords));
        }
        let description = request
            .description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        self.recover(created_at_ms)?;

        let mut stamp = created_at_ms;
        while self.get(&user_site_id(stamp)).is_some() {
            stamp += 1;
        }

        let site = Site::user_landmark(stamp, name, request.coords, description);
        let mut next = Vec::with_capacity(self.sites.len() + 1);
        next.push(site.clone());
        next.extend(self.sites.iter().cloned());
        self.persist(next)?;

        info!(
            "event=landmark_add module=service status=ok id={} count={}",
            site.id,
            self.sites.len()
        );
        Ok(site)
    }

    /// Removes one landmark by id and returns it.
    pub fn remove_landmark(&mut self, id: &str) -> Result<Site, LandmarkError> {
        self.recover(now_epoch_ms())?;

        let Some(slot) = self.sites.iter().position(|site| site.id == id) else {
            return Err(LandmarkError::NotFound(id.to_string()));
        };

        let mut next = self.sites.clone();
        let removed = next.remove(slot);
        self.persist(next)?;

        info!(
            "event=landmark_remove module=service status=ok id={} count={}",
            removed.id,
            self.sites.len()
        );
        Ok(removed)
    }

    // Runs before any write from a degraded state. A successful re-read adopts
    // the stored list; otherwise the unreadable payload is copied aside.
    fn recover(&mut self, now_ms: i64) -> Result<(), LandmarkError> {
        if !self.degraded {
            return Ok(());
        }

        match self.repo.load_landmarks() {
            Ok(sites) => {
                info!(
                    "event=landmark_store_load module=service status=recovered count={}",
                    sites.len()
                );
                self.sites = sites;
            }
            Err(load_err) => {
                let backup = self.repo.backup_landmarks(now_ms).map_err(|err| {
                    warn!(
                        "event=landmark_store_backup module=service status=error error={}",
                        err
                    );
                    err
                })?;
                warn!(
                    "event=landmark_store_backup module=service status=ok backup={} error={}",
                    backup.as_deref().unwrap_or("none"),
                    load_err
                );
            }
        }

        self.degraded = false;
        Ok(())
    }

    fn persist(&mut self, next: Vec<Site>) -> Result<(), LandmarkError> {
        if let Err(err) = self.repo.save_landmarks(&next) {
            warn!(
                "event=landmark_store_save module=service status=error error={}",
                err
            );
            return Err(err.into());
        }
        self.sites = next;
        Ok(())
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
}
