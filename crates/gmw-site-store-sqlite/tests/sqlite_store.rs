// crates/gmw-site-store-sqlite/tests/sqlite_store.rs
// ============================================================================
// Module: SQLite Store Tests
// Description: Validate SQLite SiteStore behavior.
// Purpose: Ensure durable persistence, ordering, and fail-closed opening.
// Dependencies: gmw-site-store-sqlite, gmw-site-core, rusqlite, serde_json, tempfile
// ============================================================================

//! ## Overview
//! Conformance tests for the SQLite-backed site store: persistence across
//! instances, list ordering and filters, slug lookup, partial updates with
//! the publish rule, seeding, and rejection of unusable databases.

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

// ============================================================================
// SECTION: Imports
// ============================================================================

use gmw_site_core::CreateBlogPostInput;
use gmw_site_core::CreateCompanyStatsInput;
use gmw_site_core::CreateContactFormInput;
use gmw_site_core::CreateServiceInquiryInput;
use gmw_site_core::ServiceType;
use gmw_site_core::SiteStore;
use gmw_site_core::StoreError;
use gmw_site_core::Timestamp;
use gmw_site_core::UpdateBlogPostInput;
use gmw_site_core::seed_sample_data;
use gmw_site_store_sqlite::SqliteSiteStore;
use gmw_site_store_sqlite::SqliteStoreConfig;
use gmw_site_store_sqlite::SqliteStoreError;
use gmw_site_store_sqlite::SqliteStoreMode;
use gmw_site_store_sqlite::SqliteSyncMode;
use serde_json::json;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn store_for(path: &std::path::Path) -> SqliteSiteStore {
    let config = SqliteStoreConfig {
        path: path.to_path_buf(),
        busy_timeout_ms: 1_000,
        journal_mode: SqliteStoreMode::Wal,
        sync_mode: SqliteSyncMode::Full,
    };
    SqliteSiteStore::new(&config).expect("store init")
}

fn at(millis: i64) -> Timestamp {
    Timestamp::from_unix_millis(millis)
}

fn post(slug: &str, published: bool) -> CreateBlogPostInput {
    CreateBlogPostInput {
        title: "T".to_string(),
        slug: slug.to_string(),
        excerpt: None,
        content: "C".to_string(),
        author: "A".to_string(),
        category: "Cat".to_string(),
        tags: Some(r#"["rust","sqlite"]"#.to_string()),
        featured_image: None,
        published,
    }
}

fn patch(value: serde_json::Value) -> gmw_site_core::BlogPostPatch {
    serde_json::from_value::<UpdateBlogPostInput>(value).unwrap().into_patch().unwrap()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn sqlite_store_contact_form_roundtrip_preserves_text() {
    let temp = TempDir::new().unwrap();
    let store = store_for(&temp.path().join("site.sqlite"));
    let input = CreateContactFormInput {
        name: "Zoë O'Brien-Müller".to_string(),
        email: "zoe@example.com".to_string(),
        phone: Some("+254 700 000 000".to_string()),
        company: None,
        subject: "Quote \"AI\" & <IoT>".to_string(),
        message: "Habari! Tunahitaji msaada 🚀 with our ERP rollout.".to_string(),
    };
    let created = store.create_contact_form(&input, at(1_000)).unwrap();
    assert!(created.id > 0);

    let listed = store.list_contact_forms().unwrap();
    assert_eq!(listed, vec![created]);
    assert_eq!(listed[0].name, input.name);
    assert_eq!(listed[0].message, input.message);
    assert_eq!(listed[0].company, None);
}

#[test]
fn sqlite_store_persists_across_instances() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("site.sqlite");
    let created = {
        let store = store_for(&path);
        store.create_blog_post(&post("kept", true), at(5)).unwrap()
    };
    let store = store_for(&path);
    assert_eq!(store.blog_post_by_slug("kept").unwrap(), Some(created));
}

#[test]
fn sqlite_store_lists_blog_posts_newest_first_with_filter() {
    let temp = TempDir::new().unwrap();
    let store = store_for(&temp.path().join("site.sqlite"));
    store.create_blog_post(&post("a", true), at(1)).unwrap();
    store.create_blog_post(&post("b", false), at(2)).unwrap();
    store.create_blog_post(&post("c", true), at(2)).unwrap();

    let slugs = |rows: Vec<gmw_site_core::BlogPost>| -> Vec<String> {
        rows.into_iter().map(|row| row.slug).collect()
    };
    assert_eq!(slugs(store.list_blog_posts(None).unwrap()), vec!["c", "b", "a"]);
    assert_eq!(slugs(store.list_blog_posts(Some(true)).unwrap()), vec!["c", "a"]);
    assert_eq!(slugs(store.list_blog_posts(Some(false)).unwrap()), vec!["b"]);
}

#[test]
fn sqlite_store_slug_lookup_is_case_sensitive_and_lowest_id() {
    let temp = TempDir::new().unwrap();
    let store = store_for(&temp.path().join("site.sqlite"));
    let first = store.create_blog_post(&post("Same", true), at(1)).unwrap();
    store.create_blog_post(&post("Same", false), at(2)).unwrap();

    assert_eq!(store.blog_post_by_slug("Same").unwrap().map(|row| row.id), Some(first.id));
    assert!(store.blog_post_by_slug("same").unwrap().is_none());
}

#[test]
fn sqlite_store_update_applies_publish_rule() {
    let temp = TempDir::new().unwrap();
    let store = store_for(&temp.path().join("site.sqlite"));
    let created = store.create_blog_post(&post("t", false), at(10)).unwrap();
    assert_eq!(created.published_at, None);

    let published =
        store.update_blog_post(&patch(json!({ "id": created.id, "published": true })), at(20));
    let published = published.unwrap().unwrap();
    assert_eq!(published.published_at, Some(at(20)));

    let edited = store
        .update_blog_post(
            &patch(json!({ "id": created.id, "published": true, "content": "New body", "tags": null })),
            at(30),
        )
        .unwrap()
        .unwrap();
    assert_eq!(edited.published_at, Some(at(20)));
    assert_eq!(edited.content, "New body");
    assert_eq!(edited.tags, None);
    assert_eq!(edited.updated_at, at(30));

    let hidden = store
        .update_blog_post(&patch(json!({ "id": created.id, "published": false })), at(40))
        .unwrap()
        .unwrap();
    assert_eq!(hidden.published_at, None);
    assert_eq!(store.blog_post_by_slug("t").unwrap(), Some(hidden));
}

#[test]
fn sqlite_store_update_missing_id_returns_none() {
    let temp = TempDir::new().unwrap();
    let store = store_for(&temp.path().join("site.sqlite"));
    let result = store.update_blog_post(&patch(json!({ "id": 99, "title": "x" })), at(1)).unwrap();
    assert!(result.is_none());
    assert!(store.list_blog_posts(None).unwrap().is_empty());
}

#[test]
fn sqlite_store_service_inquiry_round_trips_enum() {
    let temp = TempDir::new().unwrap();
    let store = store_for(&temp.path().join("site.sqlite"));
    for service in ServiceType::all() {
        let input = CreateServiceInquiryInput {
            name: "Prospect".to_string(),
            email: "p@example.com".to_string(),
            phone: None,
            company: Some("Acme".to_string()),
            service_type: *service,
            budget_range: Some("$10k-$50k".to_string()),
            project_timeline: None,
            description: "We need a data platform.".to_string(),
        };
        store.create_service_inquiry(&input, at(1)).unwrap();
    }
    let listed = store.list_service_inquiries().unwrap();
    let services: Vec<ServiceType> = listed.iter().rev().map(|row| row.service_type).collect();
    assert_eq!(services, ServiceType::all().to_vec());
}

#[test]
fn sqlite_store_company_stats_ordering_and_active_filter() {
    let temp = TempDir::new().unwrap();
    let store = store_for(&temp.path().join("site.sqlite"));
    for (name, order, active) in [("b", 2, true), ("z", 0, false), ("a", 2, true), ("c", 1, true)]
    {
        let input = CreateCompanyStatsInput {
            metric_name: name.to_string(),
            metric_value: "1".to_string(),
            display_order: order,
            active,
        };
        store.create_company_stats(&input, at(1)).unwrap();
    }
    let names = |active_only| -> Vec<String> {
        store.list_company_stats(active_only).unwrap().into_iter().map(|row| row.metric_name).collect()
    };
    assert_eq!(names(false), vec!["z", "c", "b", "a"]);
    assert_eq!(names(true), vec!["c", "b", "a"]);
}

#[test]
fn sqlite_store_seeding_is_not_idempotent() {
    let temp = TempDir::new().unwrap();
    let store = store_for(&temp.path().join("site.sqlite"));
    seed_sample_data(&store, at(1)).unwrap();
    seed_sample_data(&store, at(2)).unwrap();
    assert_eq!(store.list_blog_posts(None).unwrap().len(), 10);
    assert_eq!(store.list_company_stats(false).unwrap().len(), 12);
}

#[test]
fn sqlite_store_rejects_version_mismatch() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("site.sqlite");
    let _store = store_for(&path);

    let connection = rusqlite::Connection::open(&path).unwrap();
    connection.execute("UPDATE store_meta SET version = 999", rusqlite::params![]).unwrap();

    let result = SqliteSiteStore::new(&SqliteStoreConfig::at_path(path));
    assert!(matches!(result, Err(SqliteStoreError::VersionMismatch(_))));
}

#[test]
fn sqlite_store_reports_unknown_service_type_as_corruption() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("site.sqlite");
    let store = store_for(&path);

    let connection = rusqlite::Connection::open(&path).unwrap();
    connection.execute_batch("PRAGMA ignore_check_constraints = ON;").unwrap();
    connection
        .execute(
            "INSERT INTO service_inquiries (name, email, service_type, description, created_at) \
             VALUES ('n', 'n@example.com', 'consulting', 'long description', 1)",
            rusqlite::params![],
        )
        .unwrap();
    drop(connection);

    match store.list_service_inquiries() {
        Err(StoreError::Corrupt(message)) => {
            assert!(message.contains("unknown service_type: consulting"), "{message}");
        }
        other => panic!("expected corruption, got {other:?}"),
    }
}

#[test]
fn sqlite_store_creates_missing_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("data").join("site.sqlite");
    let _store = store_for(&path);
    assert!(path.exists());
}

#[test]
fn sqlite_store_rejects_directory_path() {
    let temp = TempDir::new().unwrap();
    let result = SqliteSiteStore::new(&SqliteStoreConfig::at_path(temp.path()));
    assert!(matches!(result, Err(SqliteStoreError::Invalid(_))));
}

#[test]
fn sqlite_store_rejects_overlong_path_component() {
    let temp = TempDir::new().unwrap();
    let result = SqliteSiteStore::new(&SqliteStoreConfig::at_path(temp.path().join("x".repeat(300))));
    assert!(matches!(result, Err(SqliteStoreError::Invalid(_))));
}

#[test]
fn sqlite_store_allows_concurrent_writes() {
    let temp = TempDir::new().unwrap();
    let store = std::sync::Arc::new(store_for(&temp.path().join("site.sqlite")));
    let mut handles = Vec::new();
    for index in 0 .. 10 {
        let store = std::sync::Arc::clone(&store);
        handles.push(std::thread::spawn(move || {
            store.create_blog_post(&post(&format!("post-{index}"), index % 2 == 0), at(index)).unwrap();
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
    let ids: Vec<i64> = store.list_blog_posts(None).unwrap().into_iter().map(|row| row.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (1 ..= 10).collect::<Vec<i64>>());
}
