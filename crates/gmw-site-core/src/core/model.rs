// crates/gmw-site-core/src/core/model.rs
// ============================================================================
// Module: GMW Site Entity Model
// Description: Persisted entity records and caller-supplied creation inputs.
// Purpose: Define the five site entities and their wire shapes.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Five independent entities back the site: contact forms, blog posts,
//! service inquiries, newsletter subscriptions, and company statistics. None
//! of them reference each other. Records carry server-assigned ids and
//! timestamps; inputs carry only what a caller may supply.
//!
//! Nullable input fields default to `None` when the key is omitted. Fields
//! with a documented default (`published`, `active`) default accordingly.
//! Unknown keys are ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::time::Timestamp;
use crate::core::update::FieldUpdate;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Server-assigned record identifier. Always positive once persisted.
pub type RecordId = i64;

// ============================================================================
// SECTION: Service Types
// ============================================================================

/// Service lines a prospect can inquire about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    /// Artificial intelligence and machine learning.
    AiMl,
    /// Blockchain and tokenization.
    Blockchain,
    /// Internet of things.
    Iot,
    /// Data analytics.
    DataAnalytics,
    /// Risk planning.
    RiskPlanning,
    /// Growth strategy.
    GrowthStrategy,
}

impl ServiceType {
    /// Returns the canonical wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AiMl => "ai_ml",
            Self::Blockchain => "blockchain",
            Self::Iot => "iot",
            Self::DataAnalytics => "data_analytics",
            Self::RiskPlanning => "risk_planning",
            Self::GrowthStrategy => "growth_strategy",
        }
    }

    /// Returns every service type in declaration order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::AiMl,
            Self::Blockchain,
            Self::Iot,
            Self::DataAnalytics,
            Self::RiskPlanning,
            Self::GrowthStrategy,
        ]
    }

    /// Parses a wire label.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|service| service.as_str() == label)
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Contact Forms
// ============================================================================

/// Persisted contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    /// Record identifier.
    pub id: RecordId,
    /// Sender name.
    pub name: String,
    /// Sender email address.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional company name.
    pub company: Option<String>,
    /// Message subject.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Submission time.
    pub created_at: Timestamp,
}

/// Caller input for a contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateContactFormInput {
    /// Sender name.
    pub name: String,
    /// Sender email address.
    pub email: String,
    /// Optional phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Optional company name.
    #[serde(default)]
    pub company: Option<String>,
    /// Message subject.
    pub subject: String,
    /// Message body.
    pub message: String,
}

// ============================================================================
// SECTION: Blog Posts
// ============================================================================

/// Persisted blog post.
///
/// # Invariants
/// - `published_at` is set exactly when `published` is true.
/// - `tags` holds a serialized list (a JSON array string) verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    /// Record identifier.
    pub id: RecordId,
    /// Post title.
    pub title: String,
    /// URL slug used for lookups.
    pub slug: String,
    /// Optional summary.
    pub excerpt: Option<String>,
    /// Post body.
    pub content: String,
    /// Author display name.
    pub author: String,
    /// Category label.
    pub category: String,
    /// Optional serialized tag list.
    pub tags: Option<String>,
    /// Optional featured image URL.
    pub featured_image: Option<String>,
    /// Publication flag.
    pub published: bool,
    /// Time the post was published.
    pub published_at: Option<Timestamp>,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last modification time.
    pub updated_at: Timestamp,
}

/// Caller input for creating a blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBlogPostInput {
    /// Post title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Optional summary.
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Post body.
    pub content: String,
    /// Author display name.
    pub author: String,
    /// Category label.
    pub category: String,
    /// Optional serialized tag list.
    #[serde(default)]
    pub tags: Option<String>,
    /// Optional featured image URL.
    #[serde(default)]
    pub featured_image: Option<String>,
    /// Publication flag; drafts by default.
    #[serde(default)]
    pub published: bool,
}

/// Caller input for a partial blog post update.
///
/// Every field except `id` distinguishes "absent" from "null". Validation
/// into a [`crate::BlogPostPatch`] rejects nulls on non-nullable fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateBlogPostInput {
    /// Identifier of the post to update.
    pub id: RecordId,
    /// New title.
    #[serde(default)]
    pub title: FieldUpdate<String>,
    /// New slug.
    #[serde(default)]
    pub slug: FieldUpdate<String>,
    /// New or cleared summary.
    #[serde(default)]
    pub excerpt: FieldUpdate<String>,
    /// New body.
    #[serde(default)]
    pub content: FieldUpdate<String>,
    /// New author.
    #[serde(default)]
    pub author: FieldUpdate<String>,
    /// New category.
    #[serde(default)]
    pub category: FieldUpdate<String>,
    /// New or cleared tag list.
    #[serde(default)]
    pub tags: FieldUpdate<String>,
    /// New or cleared featured image.
    #[serde(default)]
    pub featured_image: FieldUpdate<String>,
    /// New publication flag.
    #[serde(default)]
    pub published: FieldUpdate<bool>,
}

// ============================================================================
// SECTION: Service Inquiries
// ============================================================================

/// Persisted service inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInquiry {
    /// Record identifier.
    pub id: RecordId,
    /// Prospect name.
    pub name: String,
    /// Prospect email address.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional company name.
    pub company: Option<String>,
    /// Requested service line.
    pub service_type: ServiceType,
    /// Optional budget range.
    pub budget_range: Option<String>,
    /// Optional project timeline.
    pub project_timeline: Option<String>,
    /// Project description.
    pub description: String,
    /// Submission time.
    pub created_at: Timestamp,
}

/// Caller input for a service inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateServiceInquiryInput {
    /// Prospect name.
    pub name: String,
    /// Prospect email address.
    pub email: String,
    /// Optional phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Optional company name.
    #[serde(default)]
    pub company: Option<String>,
    /// Requested service line.
    pub service_type: ServiceType,
    /// Optional budget range.
    #[serde(default)]
    pub budget_range: Option<String>,
    /// Optional project timeline.
    #[serde(default)]
    pub project_timeline: Option<String>,
    /// Project description.
    pub description: String,
}

// ============================================================================
// SECTION: Newsletter Subscriptions
// ============================================================================

/// Persisted newsletter subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterSubscription {
    /// Record identifier.
    pub id: RecordId,
    /// Subscriber email address.
    pub email: String,
    /// Optional subscriber name.
    pub name: Option<String>,
    /// Subscription flag; true on creation.
    pub subscribed: bool,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last modification time.
    pub updated_at: Timestamp,
}

/// Caller input for a newsletter subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNewsletterSubscriptionInput {
    /// Subscriber email address.
    pub email: String,
    /// Optional subscriber name.
    #[serde(default)]
    pub name: Option<String>,
}

// ============================================================================
// SECTION: Company Statistics
// ============================================================================

/// Persisted homepage metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyStats {
    /// Record identifier.
    pub id: RecordId,
    /// Metric label.
    pub metric_name: String,
    /// Display value, free-form (for example `"150+"`).
    pub metric_value: String,
    /// Presentation order, ascending.
    pub display_order: i64,
    /// Whether the metric is shown.
    pub active: bool,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last modification time.
    pub updated_at: Timestamp,
}

/// Caller input for a homepage metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCompanyStatsInput {
    /// Metric label.
    pub metric_name: String,
    /// Display value.
    pub metric_value: String,
    /// Presentation order; must be non-negative.
    pub display_order: i64,
    /// Whether the metric is shown; active by default.
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Default for [`CreateCompanyStatsInput::active`].
const fn default_active() -> bool {
    true
}

// ============================================================================
// SECTION: Tests
// ============================================================================
