// crates/gmw-site-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Site Store
// Description: Durable SiteStore backed by SQLite.
// Purpose: Persist site entities in relational tables with per-call transactions.
// Dependencies: gmw-site-core, rusqlite, serde, thiserror
// ============================================================================

//! ## Overview
//! This module implements [`SiteStore`] on `SQLite`. Each entity maps to one
//! table with an autoincrement id, timestamps stored as unix milliseconds and
//! booleans stored as `0`/`1`. A `store_meta` table pins the schema version;
//! opening a database written by an unknown version fails closed.
//!
//! All calls share one connection behind a mutex and run inside a single
//! transaction, so a blog post update reads and writes the row atomically.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use gmw_site_core::BlogPost;
use gmw_site_core::BlogPostPatch;
use gmw_site_core::CompanyStats;
use gmw_site_core::ContactForm;
use gmw_site_core::CreateBlogPostInput;
use gmw_site_core::CreateCompanyStatsInput;
use gmw_site_core::CreateContactFormInput;
use gmw_site_core::CreateNewsletterSubscriptionInput;
use gmw_site_core::CreateServiceInquiryInput;
use gmw_site_core::NewsletterSubscription;
use gmw_site_core::RecordId;
use gmw_site_core::ServiceInquiry;
use gmw_site_core::ServiceType;
use gmw_site_core::SiteStore;
use gmw_site_core::StoreError;
use gmw_site_core::Timestamp;
use gmw_site_core::initial_published_at;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::Params;
use rusqlite::Row;
use rusqlite::Transaction;
use rusqlite::params;
use rusqlite::types::Type;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

/// Tables and indexes created on first open.
const SCHEMA_SQL: &str = "
    CREATE TABLE IF NOT EXISTS contact_forms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        phone TEXT,
        company TEXT,
        subject TEXT NOT NULL,
        message TEXT NOT NULL,
        created_at INTEGER NOT NULL
    );
    CREATE TABLE IF NOT EXISTS blog_posts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        slug TEXT NOT NULL,
        excerpt TEXT,
        content TEXT NOT NULL,
        author TEXT NOT NULL,
        category TEXT NOT NULL,
        tags TEXT,
        featured_image TEXT,
        published INTEGER NOT NULL DEFAULT 0 CHECK (published IN (0, 1)),
        published_at INTEGER,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_blog_posts_slug ON blog_posts (slug);
    CREATE TABLE IF NOT EXISTS service_inquiries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        phone TEXT,
        company TEXT,
        service_type TEXT NOT NULL CHECK (service_type IN (
            'ai_ml', 'blockchain', 'iot', 'data_analytics', 'risk_planning', 'growth_strategy'
        )),
        budget_range TEXT,
        project_timeline TEXT,
        description TEXT NOT NULL,
        created_at INTEGER NOT NULL
    );
    CREATE TABLE IF NOT EXISTS newsletter_subscriptions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL,
        name TEXT,
        subscribed INTEGER NOT NULL DEFAULT 1 CHECK (subscribed IN (0, 1)),
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    );
    CREATE TABLE IF NOT EXISTS company_stats (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        metric_name TEXT NOT NULL,
        metric_value TEXT NOT NULL,
        display_order INTEGER NOT NULL CHECK (display_order >= 0),
        active INTEGER NOT NULL DEFAULT 1 CHECK (active IN (0, 1)),
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    );";

/// Column list for contact form selects.
const CONTACT_FORM_COLUMNS: &str =
    "id, name, email, phone, company, subject, message, created_at";
/// Column list for blog post selects.
const BLOG_POST_COLUMNS: &str = "id, title, slug, excerpt, content, author, category, tags, \
                                 featured_image, published, published_at, created_at, updated_at";
/// Column list for service inquiry selects.
const SERVICE_INQUIRY_COLUMNS: &str = "id, name, email, phone, company, service_type, \
                                       budget_range, project_timeline, description, created_at";
/// Column list for newsletter subscription selects.
const NEWSLETTER_COLUMNS: &str = "id, email, name, subscribed, created_at, updated_at";
/// Column list for company statistic selects.
const COMPANY_STATS_COLUMNS: &str =
    "id, metric_name, metric_value, display_order, active, created_at, updated_at";

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` site store.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl SqliteStoreConfig {
    /// Creates a config for `path` with default tuning.
    #[must_use]
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Stored data violates an entity invariant.
    #[error("sqlite store corruption: {0}")]
    Corrupt(String),
    /// Store schema version mismatch.
    #[error("sqlite store version mismatch: {0}")]
    VersionMismatch(String),
    /// Invalid store configuration or data.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message) => Self::Io(message),
            SqliteStoreError::Db(message) => Self::Store(message),
            SqliteStoreError::Corrupt(message) => Self::Corrupt(message),
            SqliteStoreError::VersionMismatch(message) => Self::VersionMismatch(message),
            SqliteStoreError::Invalid(message) => Self::Invalid(message),
        }
    }
}

/// Maps an engine error into a store error.
///
/// Column conversion failures mean a stored value no longer decodes into
/// its entity type and are reported as corruption.
#[allow(clippy::needless_pass_by_value, reason = "Used directly as a map_err adapter.")]
fn db_err(err: rusqlite::Error) -> SqliteStoreError {
    match err {
        rusqlite::Error::FromSqlConversionFailure(_, _, source) => {
            SqliteStoreError::Corrupt(source.to_string())
        }
        other => SqliteStoreError::Db(other.to_string()),
    }
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed site store.
#[derive(Clone)]
pub struct SqliteSiteStore {
    /// Shared `SQLite` connection guarded by a mutex.
    connection: Arc<Mutex<Connection>>,
}

impl SqliteSiteStore {
    /// Opens an `SQLite`-backed site store, creating the schema if needed.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the path is unusable, the database
    /// cannot be opened, or its schema version is unsupported.
    pub fn new(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;
        let mut connection = open_connection(config)?;
        initialize_schema(&mut connection)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Runs `op` inside one transaction, committing only on success.
    fn with_transaction<T>(
        &self,
        op: impl FnOnce(&Transaction<'_>) -> Result<T, SqliteStoreError>,
    ) -> Result<T, SqliteStoreError> {
        let mut guard = self
            .connection
            .lock()
            .map_err(|_| SqliteStoreError::Db("mutex poisoned".to_string()))?;
        let tx = guard.transaction().map_err(db_err)?;
        let value = op(&tx)?;
        tx.commit().map_err(db_err)?;
        drop(guard);
        Ok(value)
    }
}

impl SiteStore for SqliteSiteStore {
    fn create_contact_form(
        &self,
        input: &CreateContactFormInput,
        now: Timestamp,
    ) -> Result<ContactForm, StoreError> {
        let id = self.with_transaction(|tx| {
            tx.execute(
                "INSERT INTO contact_forms (name, email, phone, company, subject, message, \
                 created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    input.name,
                    input.email,
                    input.phone,
                    input.company,
                    input.subject,
                    input.message,
                    now.as_unix_millis()
                ],
            )
            .map_err(db_err)?;
            Ok(tx.last_insert_rowid())
        })?;
        Ok(ContactForm {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            company: input.company.clone(),
            subject: input.subject.clone(),
            message: input.message.clone(),
            created_at: now,
        })
    }

    fn list_contact_forms(&self) -> Result<Vec<ContactForm>, StoreError> {
        let sql = format!(
            "SELECT {CONTACT_FORM_COLUMNS} FROM contact_forms ORDER BY created_at DESC, id DESC"
        );
        Ok(self.with_transaction(|tx| query_rows(tx, &sql, [], contact_form_from_row))?)
    }

    fn create_blog_post(
        &self,
        input: &CreateBlogPostInput,
        now: Timestamp,
    ) -> Result<BlogPost, StoreError> {
        let published_at = initial_published_at(input.published, now);
        let id = self.with_transaction(|tx| {
            tx.execute(
                "INSERT INTO blog_posts (title, slug, excerpt, content, author, category, tags, \
                 featured_image, published, published_at, created_at, updated_at) VALUES (?1, \
                 ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
                params![
                    input.title,
                    input.slug,
                    input.excerpt,
                    input.content,
                    input.author,
                    input.category,
                    input.tags,
                    input.featured_image,
                    input.published,
                    published_at.map(Timestamp::as_unix_millis),
                    now.as_unix_millis()
                ],
            )
            .map_err(db_err)?;
            Ok(tx.last_insert_rowid())
        })?;
        Ok(BlogPost {
            id,
            title: input.title.clone(),
            slug: input.slug.clone(),
            excerpt: input.excerpt.clone(),
            content: input.content.clone(),
            author: input.author.clone(),
            category: input.category.clone(),
            tags: input.tags.clone(),
            featured_image: input.featured_image.clone(),
            published: input.published,
            published_at,
            created_at: now,
            updated_at: now,
        })
    }

    fn list_blog_posts(&self, published: Option<bool>) -> Result<Vec<BlogPost>, StoreError> {
        let sql = format!(
            "SELECT {BLOG_POST_COLUMNS} FROM blog_posts WHERE (?1 IS NULL OR published = ?1) \
             ORDER BY created_at DESC, id DESC"
        );
        Ok(self.with_transaction(|tx| {
            query_rows(tx, &sql, params![published], blog_post_from_row)
        })?)
    }

    fn blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, StoreError> {
        let sql = format!(
            "SELECT {BLOG_POST_COLUMNS} FROM blog_posts WHERE slug = ?1 ORDER BY id ASC LIMIT 1"
        );
        Ok(self.with_transaction(|tx| {
            tx.query_row(&sql, params![slug], blog_post_from_row).optional().map_err(db_err)
        })?)
    }

    fn update_blog_post(
        &self,
        patch: &BlogPostPatch,
        now: Timestamp,
    ) -> Result<Option<BlogPost>, StoreError> {
        let select = format!("SELECT {BLOG_POST_COLUMNS} FROM blog_posts WHERE id = ?1");
        Ok(self.with_transaction(|tx| {
            let Some(mut post) = tx
                .query_row(&select, params![patch.id], blog_post_from_row)
                .optional()
                .map_err(db_err)?
            else {
                return Ok(None);
            };
            patch.apply_to(&mut post, now);
            tx.execute(
                "UPDATE blog_posts SET title = ?1, slug = ?2, excerpt = ?3, content = ?4, author \
                 = ?5, category = ?6, tags = ?7, featured_image = ?8, published = ?9, \
                 published_at = ?10, updated_at = ?11 WHERE id = ?12",
                params![
                    post.title,
                    post.slug,
                    post.excerpt,
                    post.content,
                    post.author,
                    post.category,
                    post.tags,
                    post.featured_image,
                    post.published,
                    post.published_at.map(Timestamp::as_unix_millis),
                    post.updated_at.as_unix_millis(),
                    post.id
                ],
            )
            .map_err(db_err)?;
            Ok(Some(post))
        })?)
    }

    fn create_service_inquiry(
        &self,
        input: &CreateServiceInquiryInput,
        now: Timestamp,
    ) -> Result<ServiceInquiry, StoreError> {
        let id = self.with_transaction(|tx| {
            tx.execute(
                "INSERT INTO service_inquiries (name, email, phone, company, service_type, \
                 budget_range, project_timeline, description, created_at) VALUES (?1, ?2, ?3, \
                 ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    input.name,
                    input.email,
                    input.phone,
                    input.company,
                    input.service_type.as_str(),
                    input.budget_range,
                    input.project_timeline,
                    input.description,
                    now.as_unix_millis()
                ],
            )
            .map_err(db_err)?;
            Ok(tx.last_insert_rowid())
        })?;
        Ok(ServiceInquiry {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            company: input.company.clone(),
            service_type: input.service_type,
            budget_range: input.budget_range.clone(),
            project_timeline: input.project_timeline.clone(),
            description: input.description.clone(),
            created_at: now,
        })
    }

    fn list_service_inquiries(&self) -> Result<Vec<ServiceInquiry>, StoreError> {
        let sql = format!(
            "SELECT {SERVICE_INQUIRY_COLUMNS} FROM service_inquiries ORDER BY created_at DESC, \
             id DESC"
        );
        Ok(self.with_transaction(|tx| query_rows(tx, &sql, [], service_inquiry_from_row))?)
    }

    fn create_newsletter_subscription(
        &self,
        input: &CreateNewsletterSubscriptionInput,
        now: Timestamp,
    ) -> Result<NewsletterSubscription, StoreError> {
        let id = self.with_transaction(|tx| {
            tx.execute(
                "INSERT INTO newsletter_subscriptions (email, name, subscribed, created_at, \
                 updated_at) VALUES (?1, ?2, 1, ?3, ?3)",
                params![input.email, input.name, now.as_unix_millis()],
            )
            .map_err(db_err)?;
            Ok(tx.last_insert_rowid())
        })?;
        Ok(NewsletterSubscription {
            id,
            email: input.email.clone(),
            name: input.name.clone(),
            subscribed: true,
            created_at: now,
            updated_at: now,
        })
    }

    fn list_newsletter_subscriptions(&self) -> Result<Vec<NewsletterSubscription>, StoreError> {
        let sql = format!(
            "SELECT {NEWSLETTER_COLUMNS} FROM newsletter_subscriptions ORDER BY created_at DESC, \
             id DESC"
        );
        Ok(self.with_transaction(|tx| query_rows(tx, &sql, [], newsletter_from_row))?)
    }

    fn create_company_stats(
        &self,
        input: &CreateCompanyStatsInput,
        now: Timestamp,
    ) -> Result<CompanyStats, StoreError> {
        let id = self.with_transaction(|tx| {
            tx.execute(
                "INSERT INTO company_stats (metric_name, metric_value, display_order, active, \
                 created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                params![
                    input.metric_name,
                    input.metric_value,
                    input.display_order,
                    input.active,
                    now.as_unix_millis()
                ],
            )
            .map_err(db_err)?;
            Ok(tx.last_insert_rowid())
        })?;
        Ok(CompanyStats {
            id,
            metric_name: input.metric_name.clone(),
            metric_value: input.metric_value.clone(),
            display_order: input.display_order,
            active: input.active,
            created_at: now,
            updated_at: now,
        })
    }

    fn list_company_stats(&self, active_only: bool) -> Result<Vec<CompanyStats>, StoreError> {
        let sql = format!(
            "SELECT {COMPANY_STATS_COLUMNS} FROM company_stats WHERE (?1 = 0 OR active = 1) \
             ORDER BY display_order ASC, id ASC"
        );
        Ok(self.with_transaction(|tx| {
            query_rows(tx, &sql, params![active_only], company_stats_from_row)
        })?)
    }
}

// ============================================================================
// SECTION: Row Mapping
// ============================================================================

/// Runs a select and maps every row.
fn query_rows<T>(
    tx: &Transaction<'_>,
    sql: &str,
    params: impl Params,
    map: fn(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<Vec<T>, SqliteStoreError> {
    let mut statement = tx.prepare(sql).map_err(db_err)?;
    let rows = statement.query_map(params, map).map_err(db_err)?;
    let collected = rows.collect::<rusqlite::Result<Vec<T>>>().map_err(db_err)?;
    Ok(collected)
}

/// Reads a millisecond timestamp column.
fn timestamp_at(row: &Row<'_>, index: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, i64>(index).map(Timestamp::from_unix_millis)
}

/// Reads a nullable millisecond timestamp column.
fn optional_timestamp_at(row: &Row<'_>, index: usize) -> rusqlite::Result<Option<Timestamp>> {
    Ok(row.get::<_, Option<i64>>(index)?.map(Timestamp::from_unix_millis))
}

/// Reads a service type label column.
fn service_type_at(row: &Row<'_>, index: usize) -> rusqlite::Result<ServiceType> {
    let label: String = row.get(index)?;
    ServiceType::parse(&label).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            Type::Text,
            format!("unknown service_type: {label}").into(),
        )
    })
}

/// Maps a `contact_forms` row.
fn contact_form_from_row(row: &Row<'_>) -> rusqlite::Result<ContactForm> {
    Ok(ContactForm {
        id: row.get::<_, RecordId>(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        company: row.get(4)?,
        subject: row.get(5)?,
        message: row.get(6)?,
        created_at: timestamp_at(row, 7)?,
    })
}

/// Maps a `blog_posts` row.
fn blog_post_from_row(row: &Row<'_>) -> rusqlite::Result<BlogPost> {
    Ok(BlogPost {
        id: row.get(0)?,
        title: row.get(1)?,
        slug: row.get(2)?,
        excerpt: row.get(3)?,
        content: row.get(4)?,
        author: row.get(5)?,
        category: row.get(6)?,
        tags: row.get(7)?,
        featured_image: row.get(8)?,
        published: row.get(9)?,
        published_at: optional_timestamp_at(row, 10)?,
        created_at: timestamp_at(row, 11)?,
        updated_at: timestamp_at(row, 12)?,
    })
}

/// Maps a `service_inquiries` row.
fn service_inquiry_from_row(row: &Row<'_>) -> rusqlite::Result<ServiceInquiry> {
    Ok(ServiceInquiry {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        company: row.get(4)?,
        service_type: service_type_at(row, 5)?,
        budget_range: row.get(6)?,
        project_timeline: row.get(7)?,
        description: row.get(8)?,
        created_at: timestamp_at(row, 9)?,
    })
}

/// Maps a `newsletter_subscriptions` row.
fn newsletter_from_row(row: &Row<'_>) -> rusqlite::Result<NewsletterSubscription> {
    Ok(NewsletterSubscription {
        id: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
        subscribed: row.get(3)?,
        created_at: timestamp_at(row, 4)?,
        updated_at: timestamp_at(row, 5)?,
    })
}

/// Maps a `company_stats` row.
fn company_stats_from_row(row: &Row<'_>) -> rusqlite::Result<CompanyStats> {
    Ok(CompanyStats {
        id: row.get(0)?,
        metric_name: row.get(1)?,
        metric_value: row.get(2)?,
        display_order: row.get(3)?,
        active: row.get(4)?,
        created_at: timestamp_at(row, 5)?,
        updated_at: timestamp_at(row, 6)?,
    })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Ensures the parent directory for the store exists.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    let Some(parent) = path.parent() else {
        return Err(SqliteStoreError::Io("store path missing parent directory".to_string()));
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|err| SqliteStoreError::Io(err.to_string()))
}

/// Validates store paths for safety limits.
fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    let path_string = path.display().to_string();
    if path_string.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteStoreError::Invalid("store path exceeds length limit".to_string()));
    }
    for component in path.components() {
        let name = component.as_os_str().to_string_lossy();
        if name.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SqliteStoreError::Invalid(
                "store path contains an overlong component".to_string(),
            ));
        }
    }
    if path.exists() && path.is_dir() {
        return Err(SqliteStoreError::Invalid(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

/// Opens an `SQLite` connection with the configured pragmas.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection = Connection::open_with_flags(&config.path, flags).map_err(db_err)?;
    apply_pragmas(&connection, config)?;
    Ok(connection)
}

/// Applies `SQLite` pragmas required for durability.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteStoreConfig,
) -> Result<(), SqliteStoreError> {
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))
        .map_err(db_err)?;
    connection
        .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))
        .map_err(db_err)?;
    connection
        .busy_timeout(std::time::Duration::from_millis(config.busy_timeout_ms))
        .map_err(db_err)?;
    Ok(())
}

/// Initializes the `SQLite` schema or validates the existing version.
fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteStoreError> {
    let tx = connection.transaction().map_err(db_err)?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")
        .map_err(db_err)?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()
        .map_err(db_err)?;
    match version {
        None => {
            tx.execute("INSERT INTO store_meta (version) VALUES (?1)", params![SCHEMA_VERSION])
                .map_err(db_err)?;
            tx.execute_batch(SCHEMA_SQL).map_err(db_err)?;
        }
        Some(value) if value == SCHEMA_VERSION => {}
        Some(value) => {
            return Err(SqliteStoreError::VersionMismatch(format!(
                "unsupported schema version: {value}"
            )));
        }
    }
    tx.commit().map_err(db_err)?;
    Ok(())
}
