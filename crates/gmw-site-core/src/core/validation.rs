// crates/gmw-site-core/src/core/validation.rs
// ============================================================================
// Module: GMW Site Input Validation
// Description: Field-level constraints for every creation input.
// Purpose: Reject malformed input before any persistence attempt.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Each creation input implements [`Validate`]. Checks run in field
//! declaration order and stop at the first failure, which is reported with
//! the offending field name and a human-readable message.
//!
//! String lengths count Unicode scalar values. Values are never trimmed or
//! normalized; validation only accepts or rejects.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::model::CreateBlogPostInput;
use crate::core::model::CreateCompanyStatsInput;
use crate::core::model::CreateContactFormInput;
use crate::core::model::CreateNewsletterSubscriptionInput;
use crate::core::model::CreateServiceInquiryInput;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Minimum length of contact messages and inquiry descriptions.
pub const MIN_LONG_TEXT_CHARS: usize = 10;

/// Minimum length of a top-level domain label.
const MIN_TLD_CHARS: usize = 2;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Input rejected before persistence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A decoded field violates its constraint.
    #[error("{field}: {message}")]
    Field {
        /// Offending field name.
        field: &'static str,
        /// Human-readable reason.
        message: String,
    },
    /// The payload does not match the input shape at all.
    #[error("malformed input: {0}")]
    Malformed(String),
}

impl ValidationError {
    /// Builds a field-level validation error.
    #[must_use]
    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        Self::Field { field, message: message.into() }
    }

    /// Returns the offending field name when known.
    #[must_use]
    pub const fn field_name(&self) -> Option<&'static str> {
        match self {
            Self::Field { field, .. } => Some(*field),
            Self::Malformed(_) => None,
        }
    }

    /// Returns the human-readable reason.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Field { message, .. } | Self::Malformed(message) => message,
        }
    }
}

// ============================================================================
// SECTION: Validate Trait
// ============================================================================

/// Constraint check for a decoded input.
pub trait Validate {
    /// Validates the input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] describing the first violated constraint.
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for CreateContactFormInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_min_chars("name", &self.name, 1, "Name is required")?;
        require_email("email", &self.email)?;
        require_min_chars("subject", &self.subject, 1, "Subject is required")?;
        require_min_chars(
            "message",
            &self.message,
            MIN_LONG_TEXT_CHARS,
            "Message must be at least 10 characters",
        )
    }
}

impl Validate for CreateBlogPostInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_min_chars("title", &self.title, 1, "Title is required")?;
        require_min_chars("slug", &self.slug, 1, "Slug is required")?;
        require_min_chars("content", &self.content, 1, "Content is required")?;
        require_min_chars("author", &self.author, 1, "Author is required")?;
        require_min_chars("category", &self.category, 1, "Category is required")
    }
}

impl Validate for CreateServiceInquiryInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_min_chars("name", &self.name, 1, "Name is required")?;
        require_email("email", &self.email)?;
        require_min_chars(
            "description",
            &self.description,
            MIN_LONG_TEXT_CHARS,
            "Description must be at least 10 characters",
        )
    }
}

impl Validate for CreateNewsletterSubscriptionInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_email("email", &self.email)
    }
}

impl Validate for CreateCompanyStatsInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_min_chars("metric_name", &self.metric_name, 1, "Metric name is required")?;
        require_min_chars("metric_value", &self.metric_value, 1, "Metric value is required")?;
        if self.display_order < 0 {
            return Err(ValidationError::field(
                "display_order",
                "Display order must be a non-negative integer",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Field Checks
// ============================================================================

/// Rejects strings shorter than `min` Unicode scalar values.
pub(crate) fn require_min_chars(
    field: &'static str,
    value: &str,
    min: usize,
    message: &str,
) -> Result<(), ValidationError> {
    if value.chars().count() < min {
        return Err(ValidationError::field(field, message));
    }
    Ok(())
}

/// Rejects strings that are not well-formed email addresses.
fn require_email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err(ValidationError::field(field, "Valid email is required"))
    }
}

/// Returns true when `value` is a well-formed `local@domain` address.
///
/// The local part allows ASCII alphanumerics and `_ ' + - .`, may not start
/// with or contain consecutive dots, and may not end with `.` or `'`. The
/// domain needs at least two dot-separated labels of alphanumerics and
/// hyphens (no leading hyphen) and an alphabetic top-level label of two or
/// more characters.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }
    is_valid_local_part(local) && is_valid_domain(domain)
}

/// Checks the part of an address before `@`.
fn is_valid_local_part(local: &str) -> bool {
    if local.is_empty() || local.starts_with('.') || local.contains("..") {
        return false;
    }
    let allowed = |ch: char| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '\'' | '+' | '-' | '.');
    if !local.chars().all(allowed) {
        return false;
    }
    local.chars().last().is_some_and(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '+' | '-'))
}

/// Checks the part of an address after `@`.
fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        label.chars().next().is_some_and(|ch| ch.is_ascii_alphanumeric())
            && label.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
    });
    let tld_ok = labels.last().is_some_and(|tld| {
        tld.chars().count() >= MIN_TLD_CHARS && tld.chars().all(|ch| ch.is_ascii_alphabetic())
    });
    labels_ok && tld_ok
}

// ============================================================================
// SECTION: Tests
// ============================================================================
