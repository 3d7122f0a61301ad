//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and pure catalog functions into use-case
//!   level APIs.
//! - Keep list/map renderers decoupled from storage details.

pub mod explorer_service;
pub mod landmark_service;
