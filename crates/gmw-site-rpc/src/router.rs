// crates/gmw-site-rpc/src/router.rs
// ============================================================================
// Module: Procedure Router
// Description: Operation handlers for the site RPC procedures.
// Purpose: Decode, validate, and dispatch procedure calls to the site store.
// Dependencies: gmw-site-core, serde_json, tokio
// ============================================================================

//! ## Overview
//! The procedure router is a thin pass-through: it decodes the procedure
//! input, runs schema validation, stamps the current time, and performs one
//! store call on Tokio's blocking pool. Absence is returned as JSON `null`,
//! never as an error.
//!
//! ## Invariants
//! - No store call happens before its input passes validation.
//! - Store failures propagate unchanged as [`RpcError::Persistence`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use gmw_site_core::CreateBlogPostInput;
use gmw_site_core::CreateCompanyStatsInput;
use gmw_site_core::CreateContactFormInput;
use gmw_site_core::CreateNewsletterSubscriptionInput;
use gmw_site_core::CreateServiceInquiryInput;
use gmw_site_core::SharedSiteStore;
use gmw_site_core::SiteStore;
use gmw_site_core::StoreError;
use gmw_site_core::Timestamp;
use gmw_site_core::UpdateBlogPostInput;
use gmw_site_core::Validate;
use gmw_site_core::ValidationError;
use gmw_site_core::seed_sample_data;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::procedures::ProcedureName;

// ============================================================================
// SECTION: Procedure Inputs and Outputs
// ============================================================================

/// Input for `getBlogPosts`.
#[derive(Debug, Default, Deserialize)]
struct GetBlogPostsInput {
    /// Publication filter; absent returns every post.
    #[serde(default)]
    published: Option<bool>,
}

/// Input for `getBlogPostBySlug`.
#[derive(Debug, Deserialize)]
struct GetBlogPostBySlugInput {
    /// Exact, case-sensitive slug.
    slug: String,
}

/// Input for `getCompanyStats`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetCompanyStatsInput {
    /// Restrict to active rows when true.
    #[serde(default)]
    active_only: Option<bool>,
}

/// Output of `healthcheck`.
#[derive(Debug, Serialize)]
struct HealthStatus {
    /// Always `"ok"`.
    status: &'static str,
    /// Server time of the probe.
    timestamp: Timestamp,
}

/// Output of `seedSampleData`.
#[derive(Debug, Serialize)]
struct SeedResult {
    /// Always true when the seed completes.
    success: bool,
    /// Counts of the seeded rows.
    message: String,
}

// ============================================================================
// SECTION: Procedure Router
// ============================================================================

/// Procedure router for site RPC requests.
#[derive(Clone)]
pub struct ProcedureRouter {
    /// Store backing every procedure.
    store: SharedSiteStore,
}

impl ProcedureRouter {
    /// Creates a router over the given store.
    #[must_use]
    pub const fn new(store: SharedSiteStore) -> Self {
        Self {
            store,
        }
    }

    /// Handles a procedure call by wire name with a JSON payload.
    ///
    /// `Value::Null` means no input and is equivalent to an empty object.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError`] when the name is unknown, the input is invalid,
    /// or the store call fails.
    pub async fn handle_call(&self, name: &str, payload: Value) -> Result<Value, RpcError> {
        let procedure = ProcedureName::parse(name).ok_or(RpcError::UnknownProcedure)?;
        self.dispatch(procedure, payload).await
    }

    /// Dispatches a resolved procedure.
    ///
    /// Procedures without input ignore the payload.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError`] when the input is invalid or the store call fails.
    pub async fn dispatch(
        &self,
        procedure: ProcedureName,
        payload: Value,
    ) -> Result<Value, RpcError> {
        match procedure {
            ProcedureName::Healthcheck => to_json(&HealthStatus {
                status: "ok",
                timestamp: Timestamp::now(),
            }),
            ProcedureName::CreateContactForm => {
                let input = decode_valid::<CreateContactFormInput>(payload)?;
                let created = self
                    .run_blocking(procedure, move |store, now| {
                        store.create_contact_form(&input, now)
                    })
                    .await?;
                to_json(&created)
            }
            ProcedureName::GetContactForms => {
                let rows =
                    self.run_blocking(procedure, |store, _| store.list_contact_forms()).await?;
                to_json(&rows)
            }
            ProcedureName::CreateBlogPost => {
                let input = decode_valid::<CreateBlogPostInput>(payload)?;
                let created = self
                    .run_blocking(procedure, move |store, now| store.create_blog_post(&input, now))
                    .await?;
                to_json(&created)
            }
            ProcedureName::GetBlogPosts => {
                let input = decode::<GetBlogPostsInput>(payload)?;
                let rows = self
                    .run_blocking(procedure, move |store, _| store.list_blog_posts(input.published))
                    .await?;
                to_json(&rows)
            }
            ProcedureName::GetBlogPostBySlug => {
                let input = decode::<GetBlogPostBySlugInput>(payload)?;
                let post = self
                    .run_blocking(procedure, move |store, _| store.blog_post_by_slug(&input.slug))
                    .await?;
                to_json(&post)
            }
            ProcedureName::UpdateBlogPost => {
                let patch = decode::<UpdateBlogPostInput>(payload)?.into_patch()?;
                let updated = self
                    .run_blocking(procedure, move |store, now| store.update_blog_post(&patch, now))
                    .await?;
                to_json(&updated)
            }
            ProcedureName::CreateServiceInquiry => {
                let input = decode_valid::<CreateServiceInquiryInput>(payload)?;
                let created = self
                    .run_blocking(procedure, move |store, now| {
                        store.create_service_inquiry(&input, now)
                    })
                    .await?;
                to_json(&created)
            }
            ProcedureName::GetServiceInquiries => {
                let rows =
                    self.run_blocking(procedure, |store, _| store.list_service_inquiries()).await?;
                to_json(&rows)
            }
            ProcedureName::CreateNewsletterSubscription => {
                let input = decode_valid::<CreateNewsletterSubscriptionInput>(payload)?;
                let created = self
                    .run_blocking(procedure, move |store, now| {
                        store.create_newsletter_subscription(&input, now)
                    })
                    .await?;
                to_json(&created)
            }
            ProcedureName::GetNewsletterSubscriptions => {
                let rows = self
                    .run_blocking(procedure, |store, _| store.list_newsletter_subscriptions())
                    .await?;
                to_json(&rows)
            }
            ProcedureName::CreateCompanyStats => {
                let input = decode_valid::<CreateCompanyStatsInput>(payload)?;
                let created = self
                    .run_blocking(procedure, move |store, now| {
                        store.create_company_stats(&input, now)
                    })
                    .await?;
                to_json(&created)
            }
            ProcedureName::GetCompanyStats => {
                let input = decode::<GetCompanyStatsInput>(payload)?;
                let active_only = input.active_only.unwrap_or(false);
                let rows = self
                    .run_blocking(procedure, move |store, _| store.list_company_stats(active_only))
                    .await?;
                to_json(&rows)
            }
            ProcedureName::SeedSampleData => {
                let summary = self
                    .run_blocking(procedure, |store, now| seed_sample_data(store, now))
                    .await?;
                to_json(&SeedResult {
                    success: true,
                    message: summary.message(),
                })
            }
        }
    }

    /// Runs one store operation on the blocking pool, stamping `now` there.
    async fn run_blocking<T, F>(&self, procedure: ProcedureName, op: F) -> Result<T, RpcError>
    where
        T: Send + 'static,
        F: FnOnce(&SharedSiteStore, Timestamp) -> Result<T, StoreError> + Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || op(&store, Timestamp::now()))
            .await
            .map_err(|err| RpcError::Internal(format!("{procedure} join failed: {err}")))?
            .map_err(RpcError::Persistence)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Procedure routing errors.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Procedure name not recognized.
    #[error("unknown procedure")]
    UnknownProcedure,
    /// Input failed decoding or validation.
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] ValidationError),
    /// Store call failed.
    #[error(transparent)]
    Persistence(#[from] StoreError),
    /// Result serialization failed.
    #[error("serialization failure")]
    Serialization,
    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RpcError {
    /// Returns a stable label for audit logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnknownProcedure => "unknown_procedure",
            Self::InvalidParams(_) => "invalid_params",
            Self::Persistence(_) => "persistence",
            Self::Serialization => "serialization",
            Self::Internal(_) => "internal",
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Decodes a procedure payload, treating `null` as an empty object.
fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, RpcError> {
    let payload = if payload.is_null() { Value::Object(Map::new()) } else { payload };
    serde_json::from_value(payload)
        .map_err(|err| RpcError::InvalidParams(ValidationError::Malformed(err.to_string())))
}

/// Decodes a creation payload and runs its schema validation.
fn decode_valid<T: DeserializeOwned + Validate>(payload: Value) -> Result<T, RpcError> {
    let input = decode::<T>(payload)?;
    input.validate()?;
    Ok(input)
}

/// Serializes a procedure result.
fn to_json<T: Serialize>(value: &T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|_| RpcError::Serialization)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
