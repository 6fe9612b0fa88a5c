// crates/gmw-site-core/src/lib.rs
// ============================================================================
// Module: GMW Site Core Library
// Description: Public API surface for the GMW site backend core.
// Purpose: Expose entity types, validation, store interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The core crate defines the five site entities (contact forms, blog posts,
//! service inquiries, newsletter subscriptions, company statistics), the
//! schema/validation layer that guards every write, and the [`SiteStore`]
//! persistence interface. It is backend-agnostic: relational storage lives in
//! `gmw-site-store-sqlite` and transport lives in `gmw-site-rpc`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::SiteStore;
pub use interfaces::StoreError;
pub use runtime::InMemorySiteStore;
pub use runtime::SeedSummary;
pub use runtime::SharedSiteStore;
pub use runtime::sample_blog_posts;
pub use runtime::sample_company_stats;
pub use runtime::seed_sample_data;
