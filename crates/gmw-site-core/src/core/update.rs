// crates/gmw-site-core/src/core/update.rs
// ============================================================================
// Module: GMW Site Partial Updates
// Description: Three-state field updates and the blog publish rule.
// Purpose: Apply validated partial updates to blog posts deterministically.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Partial updates distinguish an absent key (leave the field alone), an
//! explicit `null` (clear a nullable field), and a value (set it). The publish
//! rule derives `published_at` from the old and new publication state and is
//! exposed as the pure function [`derive_published_at`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Deserializer;

use crate::core::model::BlogPost;
use crate::core::model::RecordId;
use crate::core::model::UpdateBlogPostInput;
use crate::core::time::Timestamp;
use crate::core::validation::ValidationError;
use crate::core::validation::require_min_chars;

// ============================================================================
// SECTION: Field Updates
// ============================================================================

/// Three-state update for a single field.
///
/// Deserializes `null` as [`FieldUpdate::Clear`] and any value as
/// [`FieldUpdate::Set`]; pair with `#[serde(default)]` so an absent key yields
/// [`FieldUpdate::Unchanged`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Leave the stored value as is.
    Unchanged,
    /// Clear the stored value.
    Clear,
    /// Replace the stored value.
    Set(T),
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        Self::Unchanged
    }
}

impl<T> FieldUpdate<T> {
    /// Applies the update to a nullable slot.
    pub fn apply(self, slot: &mut Option<T>) {
        match self {
            Self::Unchanged => {}
            Self::Clear => *slot = None,
            Self::Set(value) => *slot = Some(value),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(|value| value.map_or(Self::Clear, Self::Set))
    }
}

// ============================================================================
// SECTION: Publish Rule
// ============================================================================

/// Returns `published_at` for a newly created post.
#[must_use]
pub const fn initial_published_at(published: bool, now: Timestamp) -> Option<Timestamp> {
    if published { Some(now) } else { None }
}

/// Derives `published_at` after an update.
///
/// - `Some(true)` keeps an existing publish time and stamps `now` when unset.
/// - `Some(false)` clears it unconditionally.
/// - `None` (publication flag untouched) keeps the stored value.
#[must_use]
pub const fn derive_published_at(
    old_published: bool,
    old_published_at: Option<Timestamp>,
    new_published: Option<bool>,
    now: Timestamp,
) -> Option<Timestamp> {
    match new_published {
        Some(true) => match old_published_at {
            Some(at) if old_published => Some(at),
            _ => Some(now),
        },
        Some(false) => None,
        None => old_published_at,
    }
}

// ============================================================================
// SECTION: Blog Post Patch
// ============================================================================

/// Validated partial update for a blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPostPatch {
    /// Identifier of the post to update.
    pub id: RecordId,
    /// New title.
    pub title: Option<String>,
    /// New slug.
    pub slug: Option<String>,
    /// Summary update.
    pub excerpt: FieldUpdate<String>,
    /// New body.
    pub content: Option<String>,
    /// New author.
    pub author: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// Tag list update.
    pub tags: FieldUpdate<String>,
    /// Featured image update.
    pub featured_image: FieldUpdate<String>,
    /// New publication flag.
    pub published: Option<bool>,
}

impl BlogPostPatch {
    /// Applies the patch to a stored post, refreshing `updated_at` and
    /// deriving `published_at` from the publish rule.
    pub fn apply_to(&self, post: &mut BlogPost, now: Timestamp) {
        if let Some(title) = &self.title {
            post.title.clone_from(title);
        }
        if let Some(slug) = &self.slug {
            post.slug.clone_from(slug);
        }
        if let Some(content) = &self.content {
            post.content.clone_from(content);
        }
        if let Some(author) = &self.author {
            post.author.clone_from(author);
        }
        if let Some(category) = &self.category {
            post.category.clone_from(category);
        }
        self.excerpt.clone().apply(&mut post.excerpt);
        self.tags.clone().apply(&mut post.tags);
        self.featured_image.clone().apply(&mut post.featured_image);
        post.published_at =
            derive_published_at(post.published, post.published_at, self.published, now);
        if let Some(published) = self.published {
            post.published = published;
        }
        post.updated_at = now;
    }
}

impl UpdateBlogPostInput {
    /// Validates the update and converts it into a [`BlogPostPatch`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when `id` is not positive, a non-nullable
    /// field is set to `null`, or a supplied string is empty.
    pub fn into_patch(self) -> Result<BlogPostPatch, ValidationError> {
        if self.id <= 0 {
            return Err(ValidationError::field("id", "Id must be a positive integer"));
        }
        Ok(BlogPostPatch {
            id: self.id,
            title: required_text("title", self.title, "Title is required")?,
            slug: required_text("slug", self.slug, "Slug is required")?,
            excerpt: self.excerpt,
            content: required_text("content", self.content, "Content is required")?,
            author: required_text("author", self.author, "Author is required")?,
            category: required_text("category", self.category, "Category is required")?,
            tags: self.tags,
            featured_image: self.featured_image,
            published: match self.published {
                FieldUpdate::Unchanged => None,
                FieldUpdate::Clear => {
                    return Err(ValidationError::field("published", "Published cannot be null"));
                }
                FieldUpdate::Set(value) => Some(value),
            },
        })
    }
}

/// Resolves an update to a non-nullable text field.
fn required_text(
    field: &'static str,
    update: FieldUpdate<String>,
    message: &str,
) -> Result<Option<String>, ValidationError> {
    match update {
        FieldUpdate::Unchanged => Ok(None),
        FieldUpdate::Clear => {
            Err(ValidationError::field(field, format!("{message}; null is not allowed")))
        }
        FieldUpdate::Set(value) => {
            require_min_chars(field, &value, 1, message)?;
            Ok(Some(value))
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
