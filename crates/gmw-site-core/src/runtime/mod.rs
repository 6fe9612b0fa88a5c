// crates/gmw-site-core/src/runtime/mod.rs
// ============================================================================
// Module: GMW Site Runtime
// Description: In-memory store, shared store wrapper, and sample content.
// Purpose: Provide runtime helpers shared by every store backend and host.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules hold the pieces that operate on a [`crate::SiteStore`]
//! without depending on any particular backend.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod seed;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use seed::SeedSummary;
pub use seed::sample_blog_posts;
pub use seed::sample_company_stats;
pub use seed::seed_sample_data;
pub use store::InMemorySiteStore;
pub use store::SharedSiteStore;
