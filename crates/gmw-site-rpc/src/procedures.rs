// crates/gmw-site-rpc/src/procedures.rs
// ============================================================================
// Module: Procedure Registry
// Description: Canonical procedure names and their query/mutation kinds.
// Purpose: Give the router and the facade one source of procedure identity.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every remote procedure has a stable camelCase wire name and a declared
//! kind. Queries never write to the store; mutations always do.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Procedure Kind
// ============================================================================

/// Declared kind of a procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcedureKind {
    /// Read-only procedure.
    Query,
    /// Procedure that writes to the store.
    Mutation,
}

impl ProcedureKind {
    /// Returns a stable label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
        }
    }
}

// ============================================================================
// SECTION: Procedure Name
// ============================================================================

/// Canonical procedure names for the site RPC surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProcedureName {
    /// Liveness probe.
    Healthcheck,
    /// Submit a contact form.
    CreateContactForm,
    /// List contact forms, newest first.
    GetContactForms,
    /// Create a blog post.
    CreateBlogPost,
    /// List blog posts, optionally filtered by publication state.
    GetBlogPosts,
    /// Fetch one blog post by slug.
    GetBlogPostBySlug,
    /// Partially update a blog post.
    UpdateBlogPost,
    /// Submit a service inquiry.
    CreateServiceInquiry,
    /// List service inquiries, newest first.
    GetServiceInquiries,
    /// Subscribe to the newsletter.
    CreateNewsletterSubscription,
    /// List newsletter subscriptions, newest first.
    GetNewsletterSubscriptions,
    /// Create a company statistic.
    CreateCompanyStats,
    /// List company statistics by display order.
    GetCompanyStats,
    /// Insert the fixed sample blog posts and company statistics.
    SeedSampleData,
}

impl ProcedureName {
    /// Returns the wire name for the procedure.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthcheck => "healthcheck",
            Self::CreateContactForm => "createContactForm",
            Self::GetContactForms => "getContactForms",
            Self::CreateBlogPost => "createBlogPost",
            Self::GetBlogPosts => "getBlogPosts",
            Self::GetBlogPostBySlug => "getBlogPostBySlug",
            Self::UpdateBlogPost => "updateBlogPost",
            Self::CreateServiceInquiry => "createServiceInquiry",
            Self::GetServiceInquiries => "getServiceInquiries",
            Self::CreateNewsletterSubscription => "createNewsletterSubscription",
            Self::GetNewsletterSubscriptions => "getNewsletterSubscriptions",
            Self::CreateCompanyStats => "createCompanyStats",
            Self::GetCompanyStats => "getCompanyStats",
            Self::SeedSampleData => "seedSampleData",
        }
    }

    /// Returns the declared kind of the procedure.
    #[must_use]
    pub const fn kind(self) -> ProcedureKind {
        match self {
            Self::Healthcheck
            | Self::GetContactForms
            | Self::GetBlogPosts
            | Self::GetBlogPostBySlug
            | Self::GetServiceInquiries
            | Self::GetNewsletterSubscriptions
            | Self::GetCompanyStats => ProcedureKind::Query,
            Self::CreateContactForm
            | Self::CreateBlogPost
            | Self::UpdateBlogPost
            | Self::CreateServiceInquiry
            | Self::CreateNewsletterSubscription
            | Self::CreateCompanyStats
            | Self::SeedSampleData => ProcedureKind::Mutation,
        }
    }

    /// Returns all procedure names in canonical order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Healthcheck,
            Self::CreateContactForm,
            Self::GetContactForms,
            Self::CreateBlogPost,
            Self::GetBlogPosts,
            Self::GetBlogPostBySlug,
            Self::UpdateBlogPost,
            Self::CreateServiceInquiry,
            Self::GetServiceInquiries,
            Self::CreateNewsletterSubscription,
            Self::GetNewsletterSubscriptions,
            Self::CreateCompanyStats,
            Self::GetCompanyStats,
            Self::SeedSampleData,
        ]
    }

    /// Parses a wire name. Matching is exact and case-sensitive.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|procedure| procedure.as_str() == name)
    }
}

impl std::fmt::Display for ProcedureName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Definitions
// ============================================================================

/// Procedure listing entry returned by `procedures/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcedureDefinition {
    /// Procedure wire name.
    pub name: ProcedureName,
    /// Declared kind.
    pub kind: ProcedureKind,
}

/// Returns the definition of every procedure in canonical order.
#[must_use]
pub fn procedure_definitions() -> Vec<ProcedureDefinition> {
    ProcedureName::all()
        .iter()
        .map(|name| ProcedureDefinition {
            name: *name,
            kind: name.kind(),
        })
        .collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
