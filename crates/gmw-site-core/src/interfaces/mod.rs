// crates/gmw-site-core/src/interfaces/mod.rs
// ============================================================================
// Module: GMW Site Interfaces
// Description: Backend-agnostic persistence interface for site entities.
// Purpose: Define the contract implemented by every site store backend.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! [`SiteStore`] is the single seam between operation handlers and storage.
//! Inputs reaching a store are already validated; stores assign ids, stamp
//! the supplied `now` into timestamps, and return full persisted rows.
//! Absence is reported as `None`, never as an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::BlogPost;
use crate::core::BlogPostPatch;
use crate::core::CompanyStats;
use crate::core::ContactForm;
use crate::core::CreateBlogPostInput;
use crate::core::CreateCompanyStatsInput;
use crate::core::CreateContactFormInput;
use crate::core::CreateNewsletterSubscriptionInput;
use crate::core::CreateServiceInquiryInput;
use crate::core::NewsletterSubscription;
use crate::core::ServiceInquiry;
use crate::core::Timestamp;

// ============================================================================
// SECTION: Store Errors
// ============================================================================

/// Site store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("site store io error: {0}")]
    Io(String),
    /// Store data is corrupted or fails integrity checks.
    #[error("site store corruption: {0}")]
    Corrupt(String),
    /// Store schema version is incompatible.
    #[error("site store version mismatch: {0}")]
    VersionMismatch(String),
    /// Store data is invalid.
    #[error("site store invalid data: {0}")]
    Invalid(String),
    /// Store reported an error.
    #[error("site store error: {0}")]
    Store(String),
}

// ============================================================================
// SECTION: Site Store
// ============================================================================

/// Persistence for the five site entities.
///
/// # Invariants
/// - Every operation is atomic; a failed call leaves no partial write.
/// - Lists order by `created_at` descending with ties broken by id
///   descending, except company stats which order by `display_order`
///   ascending with ties broken by id ascending.
pub trait SiteStore {
    /// Inserts a contact form submission.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the insert fails.
    fn create_contact_form(
        &self,
        input: &CreateContactFormInput,
        now: Timestamp,
    ) -> Result<ContactForm, StoreError>;

    /// Lists contact forms, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the scan fails.
    fn list_contact_forms(&self) -> Result<Vec<ContactForm>, StoreError>;

    /// Inserts a blog post, stamping `published_at` when published.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the insert fails.
    fn create_blog_post(
        &self,
        input: &CreateBlogPostInput,
        now: Timestamp,
    ) -> Result<BlogPost, StoreError>;

    /// Lists blog posts, newest first, optionally filtered by `published`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the scan fails.
    fn list_blog_posts(&self, published: Option<bool>) -> Result<Vec<BlogPost>, StoreError>;

    /// Returns the blog post with an exact slug match, lowest id first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, StoreError>;

    /// Applies a partial update; returns `None` when the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the read-modify-write fails.
    fn update_blog_post(
        &self,
        patch: &BlogPostPatch,
        now: Timestamp,
    ) -> Result<Option<BlogPost>, StoreError>;

    /// Inserts a service inquiry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the insert fails.
    fn create_service_inquiry(
        &self,
        input: &CreateServiceInquiryInput,
        now: Timestamp,
    ) -> Result<ServiceInquiry, StoreError>;

    /// Lists service inquiries, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the scan fails.
    fn list_service_inquiries(&self) -> Result<Vec<ServiceInquiry>, StoreError>;

    /// Inserts a newsletter subscription with `subscribed = true`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the insert fails.
    fn create_newsletter_subscription(
        &self,
        input: &CreateNewsletterSubscriptionInput,
        now: Timestamp,
    ) -> Result<NewsletterSubscription, StoreError>;

    /// Lists newsletter subscriptions, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the scan fails.
    fn list_newsletter_subscriptions(&self) -> Result<Vec<NewsletterSubscription>, StoreError>;

    /// Inserts a company statistic.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the insert fails.
    fn create_company_stats(
        &self,
        input: &CreateCompanyStatsInput,
        now: Timestamp,
    ) -> Result<CompanyStats, StoreError>;

    /// Lists company statistics by display order, optionally active only.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the scan fails.
    fn list_company_stats(&self, active_only: bool) -> Result<Vec<CompanyStats>, StoreError>;
}
