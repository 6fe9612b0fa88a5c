// crates/gmw-site-config/src/lib.rs
// ============================================================================
// Module: GMW Site Config Library
// Description: Canonical config model, loading, and validation.
// Purpose: Single source of truth for gmw-site.toml semantics.
// Dependencies: gmw-site-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! `gmw-site-config` defines the configuration model for the GMW site
//! backend: HTTP bind address and limits, CORS origins, audit logging, and
//! the store backend. Validation is strict and fails closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
