// crates/gmw-site-store-sqlite/src/lib.rs
// ============================================================================
// Module: GMW Site SQLite Store
// Description: Durable SiteStore backend using SQLite.
// Purpose: Provide production persistence for the GMW site entities.
// Dependencies: gmw-site-core, rusqlite
// ============================================================================

//! ## Overview
//! This crate provides a SQLite-backed [`gmw_site_core::SiteStore`] with one
//! table per entity. Every operation runs in its own transaction on a single
//! mutex-guarded connection.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::SqliteSiteStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
