// crates/gmw-site-core/tests/memory_store.rs
// ============================================================================
// Module: In-Memory Site Store Tests
// Description: Behavioral coverage for the in-memory site store.
// Purpose: Pin ordering, filtering, lookup, update, and seeding semantics.
// ============================================================================

//! In-memory site store tests.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use gmw_site_core::CreateBlogPostInput;
use gmw_site_core::CreateCompanyStatsInput;
use gmw_site_core::CreateNewsletterSubscriptionInput;
use gmw_site_core::InMemorySiteStore;
use gmw_site_core::SharedSiteStore;
use gmw_site_core::SiteStore;
use gmw_site_core::Timestamp;
use gmw_site_core::UpdateBlogPostInput;
use gmw_site_core::seed_sample_data;
use serde_json::json;

fn at(millis: i64) -> Timestamp {
    Timestamp::from_unix_millis(millis)
}

fn post(slug: &str, published: bool) -> CreateBlogPostInput {
    CreateBlogPostInput {
        title: format!("Title {slug}"),
        slug: slug.to_string(),
        excerpt: None,
        content: "Body".to_string(),
        author: "Author".to_string(),
        category: "News".to_string(),
        tags: None,
        featured_image: None,
        published,
    }
}

fn stat(name: &str, order: i64, active: bool) -> CreateCompanyStatsInput {
    CreateCompanyStatsInput {
        metric_name: name.to_string(),
        metric_value: "1".to_string(),
        display_order: order,
        active,
    }
}

#[test]
fn blog_posts_list_newest_first_with_filter() {
    let store = InMemorySiteStore::new();
    store.create_blog_post(&post("old", true), at(10)).unwrap();
    store.create_blog_post(&post("draft", false), at(20)).unwrap();
    store.create_blog_post(&post("new", true), at(30)).unwrap();

    let all: Vec<String> =
        store.list_blog_posts(None).unwrap().into_iter().map(|post| post.slug).collect();
    assert_eq!(all, vec!["new", "draft", "old"]);

    let published: Vec<String> =
        store.list_blog_posts(Some(true)).unwrap().into_iter().map(|post| post.slug).collect();
    assert_eq!(published, vec!["new", "old"]);

    let drafts = store.list_blog_posts(Some(false)).unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].published_at, None);
}

#[test]
fn equal_timestamps_break_ties_by_id_descending() {
    let store = InMemorySiteStore::new();
    for email in ["a@example.com", "b@example.com", "c@example.com"] {
        let input = CreateNewsletterSubscriptionInput {
            email: email.to_string(),
            name: None,
        };
        store.create_newsletter_subscription(&input, at(5)).unwrap();
    }
    let ids: Vec<i64> =
        store.list_newsletter_subscriptions().unwrap().into_iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[test]
fn company_stats_order_ascending_and_filter_active() {
    let store = InMemorySiteStore::new();
    store.create_company_stats(&stat("third", 3, true), at(1)).unwrap();
    store.create_company_stats(&stat("hidden", 1, false), at(1)).unwrap();
    store.create_company_stats(&stat("second", 2, true), at(1)).unwrap();

    let all: Vec<String> =
        store.list_company_stats(false).unwrap().into_iter().map(|row| row.metric_name).collect();
    assert_eq!(all, vec!["hidden", "second", "third"]);

    let active: Vec<String> =
        store.list_company_stats(true).unwrap().into_iter().map(|row| row.metric_name).collect();
    assert_eq!(active, vec!["second", "third"]);
}

#[test]
fn slug_lookup_is_exact_and_prefers_lowest_id() {
    let store = InMemorySiteStore::new();
    let first = store.create_blog_post(&post("dup", true), at(1)).unwrap();
    store.create_blog_post(&post("dup", false), at(2)).unwrap();

    assert_eq!(store.blog_post_by_slug("dup").unwrap().map(|post| post.id), Some(first.id));
    assert!(store.blog_post_by_slug("DUP").unwrap().is_none());
    assert!(store.blog_post_by_slug("missing").unwrap().is_none());
}

#[test]
fn update_toggles_publication_and_refreshes_updated_at() {
    let store = InMemorySiteStore::new();
    let created = store.create_blog_post(&post("t", false), at(100)).unwrap();

    let publish: UpdateBlogPostInput =
        serde_json::from_value(json!({ "id": created.id, "published": true })).unwrap();
    let published = store.update_blog_post(&publish.into_patch().unwrap(), at(200)).unwrap().unwrap();
    assert!(published.published);
    assert_eq!(published.published_at, Some(at(200)));
    assert_eq!(published.updated_at, at(200));
    assert_eq!(published.created_at, at(100));

    let retitle: UpdateBlogPostInput = serde_json::from_value(
        json!({ "id": created.id, "title": "New", "published": true, "excerpt": "Short" }),
    )
    .unwrap();
    let retitled = store.update_blog_post(&retitle.into_patch().unwrap(), at(300)).unwrap().unwrap();
    assert_eq!(retitled.title, "New");
    assert_eq!(retitled.excerpt.as_deref(), Some("Short"));
    assert_eq!(retitled.published_at, Some(at(200)));

    let unpublish: UpdateBlogPostInput =
        serde_json::from_value(json!({ "id": created.id, "published": false, "excerpt": null }))
            .unwrap();
    let hidden = store.update_blog_post(&unpublish.into_patch().unwrap(), at(400)).unwrap().unwrap();
    assert!(!hidden.published);
    assert_eq!(hidden.published_at, None);
    assert_eq!(hidden.excerpt, None);
    assert_eq!(hidden.updated_at, at(400));
}

#[test]
fn update_of_missing_post_creates_nothing() {
    let store = InMemorySiteStore::new();
    let patch: UpdateBlogPostInput =
        serde_json::from_value(json!({ "id": 42, "title": "Ghost" })).unwrap();
    assert!(store.update_blog_post(&patch.into_patch().unwrap(), at(1)).unwrap().is_none());
    assert!(store.list_blog_posts(None).unwrap().is_empty());
}

#[test]
fn seeding_twice_doubles_row_counts() {
    let store = SharedSiteStore::from_store(InMemorySiteStore::new());
    let summary = seed_sample_data(&store, at(1)).unwrap();
    assert_eq!((summary.blog_posts, summary.company_stats), (5, 6));
    assert!(summary.message().contains("seeded successfully"));

    seed_sample_data(&store, at(2)).unwrap();
    assert_eq!(store.list_blog_posts(Some(true)).unwrap().len(), 10);
    assert_eq!(store.list_company_stats(true).unwrap().len(), 12);
}
