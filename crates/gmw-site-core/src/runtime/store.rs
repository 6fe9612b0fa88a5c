// crates/gmw-site-core/src/runtime/store.rs
// ============================================================================
// Module: GMW Site In-Memory Store
// Description: Mutex-guarded in-memory site store and shared store wrapper.
// Purpose: Provide a dependency-free store with the same semantics as SQLite.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! [`InMemorySiteStore`] keeps every table in one mutex-guarded struct so each
//! call observes and mutates a consistent snapshot. It backs tests and the
//! `store.type = "memory"` configuration. Data is lost when the process exits.
//!
//! [`SharedSiteStore`] wraps any backend in a clonable `Arc` trait object for
//! handlers that move store calls onto blocking worker threads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Reverse;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

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
use crate::core::RecordId;
use crate::core::ServiceInquiry;
use crate::core::Timestamp;
use crate::core::initial_published_at;
use crate::interfaces::SiteStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// Table contents guarded together by one mutex.
#[derive(Debug, Default)]
struct MemoryTables {
    /// Contact form rows in insertion order.
    contact_forms: Vec<ContactForm>,
    /// Blog post rows in insertion order.
    blog_posts: Vec<BlogPost>,
    /// Service inquiry rows in insertion order.
    service_inquiries: Vec<ServiceInquiry>,
    /// Newsletter subscription rows in insertion order.
    newsletter_subscriptions: Vec<NewsletterSubscription>,
    /// Company statistic rows in insertion order.
    company_stats: Vec<CompanyStats>,
}

/// Returns the next id for a table, mirroring autoincrement semantics.
fn next_id(len: usize) -> Result<RecordId, StoreError> {
    RecordId::try_from(len)
        .ok()
        .and_then(|len| len.checked_add(1))
        .ok_or_else(|| StoreError::Invalid("in-memory id space exhausted".to_string()))
}

/// In-memory site store for tests and ephemeral deployments.
#[derive(Debug, Default, Clone)]
pub struct InMemorySiteStore {
    /// Tables protected by a mutex.
    tables: Arc<Mutex<MemoryTables>>,
}

impl InMemorySiteStore {
    /// Creates a new, empty in-memory site store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the tables.
    fn lock(&self) -> Result<MutexGuard<'_, MemoryTables>, StoreError> {
        self.tables.lock().map_err(|_| StoreError::Store("site store mutex poisoned".to_string()))
    }
}

impl SiteStore for InMemorySiteStore {
    fn create_contact_form(
        &self,
        input: &CreateContactFormInput,
        now: Timestamp,
    ) -> Result<ContactForm, StoreError> {
        let mut guard = self.lock()?;
        let record = ContactForm {
            id: next_id(guard.contact_forms.len())?,
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            company: input.company.clone(),
            subject: input.subject.clone(),
            message: input.message.clone(),
            created_at: now,
        };
        guard.contact_forms.push(record.clone());
        drop(guard);
        Ok(record)
    }

    fn list_contact_forms(&self) -> Result<Vec<ContactForm>, StoreError> {
        let mut rows = self.lock()?.contact_forms.clone();
        rows.sort_by_key(|row| Reverse((row.created_at, row.id)));
        Ok(rows)
    }

    fn create_blog_post(
        &self,
        input: &CreateBlogPostInput,
        now: Timestamp,
    ) -> Result<BlogPost, StoreError> {
        let mut guard = self.lock()?;
        let record = BlogPost {
            id: next_id(guard.blog_posts.len())?,
            title: input.title.clone(),
            slug: input.slug.clone(),
            excerpt: input.excerpt.clone(),
            content: input.content.clone(),
            author: input.author.clone(),
            category: input.category.clone(),
            tags: input.tags.clone(),
            featured_image: input.featured_image.clone(),
            published: input.published,
            published_at: initial_published_at(input.published, now),
            created_at: now,
            updated_at: now,
        };
        guard.blog_posts.push(record.clone());
        drop(guard);
        Ok(record)
    }

    fn list_blog_posts(&self, published: Option<bool>) -> Result<Vec<BlogPost>, StoreError> {
        let mut rows: Vec<BlogPost> = self
            .lock()?
            .blog_posts
            .iter()
            .filter(|post| published.is_none_or(|flag| post.published == flag))
            .cloned()
            .collect();
        rows.sort_by_key(|row| Reverse((row.created_at, row.id)));
        Ok(rows)
    }

    fn blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, StoreError> {
        let guard = self.lock()?;
        let found =
            guard.blog_posts.iter().filter(|post| post.slug == slug).min_by_key(|post| post.id);
        Ok(found.cloned())
    }

    fn update_blog_post(
        &self,
        patch: &BlogPostPatch,
        now: Timestamp,
    ) -> Result<Option<BlogPost>, StoreError> {
        let mut guard = self.lock()?;
        let Some(post) = guard.blog_posts.iter_mut().find(|post| post.id == patch.id) else {
            return Ok(None);
        };
        patch.apply_to(post, now);
        let updated = post.clone();
        drop(guard);
        Ok(Some(updated))
    }

    fn create_service_inquiry(
        &self,
        input: &CreateServiceInquiryInput,
        now: Timestamp,
    ) -> Result<ServiceInquiry, StoreError> {
        let mut guard = self.lock()?;
        let record = ServiceInquiry {
            id: next_id(guard.service_inquiries.len())?,
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            company: input.company.clone(),
            service_type: input.service_type,
            budget_range: input.budget_range.clone(),
            project_timeline: input.project_timeline.clone(),
            description: input.description.clone(),
            created_at: now,
        };
        guard.service_inquiries.push(record.clone());
        drop(guard);
        Ok(record)
    }

    fn list_service_inquiries(&self) -> Result<Vec<ServiceInquiry>, StoreError> {
        let mut rows = self.lock()?.service_inquiries.clone();
        rows.sort_by_key(|row| Reverse((row.created_at, row.id)));
        Ok(rows)
    }

    fn create_newsletter_subscription(
        &self,
        input: &CreateNewsletterSubscriptionInput,
        now: Timestamp,
    ) -> Result<NewsletterSubscription, StoreError> {
        let mut guard = self.lock()?;
        let record = NewsletterSubscription {
            id: next_id(guard.newsletter_subscriptions.len())?,
            email: input.email.clone(),
            name: input.name.clone(),
            subscribed: true,
            created_at: now,
            updated_at: now,
        };
        guard.newsletter_subscriptions.push(record.clone());
        drop(guard);
        Ok(record)
    }

    fn list_newsletter_subscriptions(&self) -> Result<Vec<NewsletterSubscription>, StoreError> {
        let mut rows = self.lock()?.newsletter_subscriptions.clone();
        rows.sort_by_key(|row| Reverse((row.created_at, row.id)));
        Ok(rows)
    }

    fn create_company_stats(
        &self,
        input: &CreateCompanyStatsInput,
        now: Timestamp,
    ) -> Result<CompanyStats, StoreError> {
        let mut guard = self.lock()?;
        let record = CompanyStats {
            id: next_id(guard.company_stats.len())?,
            metric_name: input.metric_name.clone(),
            metric_value: input.metric_value.clone(),
            display_order: input.display_order,
            active: input.active,
            created_at: now,
            updated_at: now,
        };
        guard.company_stats.push(record.clone());
        drop(guard);
        Ok(record)
    }

    fn list_company_stats(&self, active_only: bool) -> Result<Vec<CompanyStats>, StoreError> {
        let mut rows: Vec<CompanyStats> = self
            .lock()?
            .company_stats
            .iter()
            .filter(|stat| !active_only || stat.active)
            .cloned()
            .collect();
        rows.sort_by_key(|row| (row.display_order, row.id));
        Ok(rows)
    }
}

// ============================================================================
// SECTION: Shared Store
// ============================================================================

/// Shared site store backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedSiteStore {
    /// Inner store implementation.
    inner: Arc<dyn SiteStore + Send + Sync>,
}

impl SharedSiteStore {
    /// Wraps a site store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl SiteStore + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }
}

impl SiteStore for SharedSiteStore {
    fn create_contact_form(
        &self,
        input: &CreateContactFormInput,
        now: Timestamp,
    ) -> Result<ContactForm, StoreError> {
        self.inner.create_contact_form(input, now)
    }

    fn list_contact_forms(&self) -> Result<Vec<ContactForm>, StoreError> {
        self.inner.list_contact_forms()
    }

    fn create_blog_post(
        &self,
        input: &CreateBlogPostInput,
        now: Timestamp,
    ) -> Result<BlogPost, StoreError> {
        self.inner.create_blog_post(input, now)
    }

    fn list_blog_posts(&self, published: Option<bool>) -> Result<Vec<BlogPost>, StoreError> {
        self.inner.list_blog_posts(published)
    }

    fn blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, StoreError> {
        self.inner.blog_post_by_slug(slug)
    }

    fn update_blog_post(
        &self,
        patch: &BlogPostPatch,
        now: Timestamp,
    ) -> Result<Option<BlogPost>, StoreError> {
        self.inner.update_blog_post(patch, now)
    }

    fn create_service_inquiry(
        &self,
        input: &CreateServiceInquiryInput,
        now: Timestamp,
    ) -> Result<ServiceInquiry, StoreError> {
        self.inner.create_service_inquiry(input, now)
    }

    fn list_service_inquiries(&self) -> Result<Vec<ServiceInquiry>, StoreError> {
        self.inner.list_service_inquiries()
    }

    fn create_newsletter_subscription(
        &self,
        input: &CreateNewsletterSubscriptionInput,
        now: Timestamp,
    ) -> Result<NewsletterSubscription, StoreError> {
        self.inner.create_newsletter_subscription(input, now)
    }

    fn list_newsletter_subscriptions(&self) -> Result<Vec<NewsletterSubscription>, StoreError> {
        self.inner.list_newsletter_subscriptions()
    }

    fn create_company_stats(
        &self,
        input: &CreateCompanyStatsInput,
        now: Timestamp,
    ) -> Result<CompanyStats, StoreError> {
        self.inner.create_company_stats(input, now)
    }

    fn list_company_stats(&self, active_only: bool) -> Result<Vec<CompanyStats>, StoreError> {
        self.inner.list_company_stats(active_only)
    }
}
