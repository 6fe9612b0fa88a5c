// crates/gmw-site-core/src/core/mod.rs
// ============================================================================
// Module: GMW Site Core Types
// Description: Canonical entity records, inputs, and validation rules.
// Purpose: Provide stable, serializable types for every persisted entity.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Core types define the persisted entity records, the creation and update
//! inputs accepted from callers, and the rules that validate them. These types
//! are the canonical source of truth for the RPC surface.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod model;
pub mod time;
pub mod update;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use model::BlogPost;
pub use model::CompanyStats;
pub use model::ContactForm;
pub use model::CreateBlogPostInput;
pub use model::CreateCompanyStatsInput;
pub use model::CreateContactFormInput;
pub use model::CreateNewsletterSubscriptionInput;
pub use model::CreateServiceInquiryInput;
pub use model::NewsletterSubscription;
pub use model::RecordId;
pub use model::ServiceInquiry;
pub use model::ServiceType;
pub use model::UpdateBlogPostInput;
pub use time::Timestamp;
pub use time::TimestampError;
pub use update::BlogPostPatch;
pub use update::FieldUpdate;
pub use update::derive_published_at;
pub use update::initial_published_at;
pub use validation::Validate;
pub use validation::ValidationError;
pub use validation::is_valid_email;
