//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Aggregate per-author statistics from store snapshots.

pub mod quote_service;
pub mod stats;
