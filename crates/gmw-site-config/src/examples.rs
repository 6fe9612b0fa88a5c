// crates/gmw-site-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example `gmw-site.toml`. Every value matches the built-in
//! default, so loading the example and loading nothing are equivalent.

/// Returns a canonical example `gmw-site.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[server]
bind = "127.0.0.1:2022"
max_body_bytes = 1048576

[server.cors]
allowed_origins = ["*"]

[server.audit]
enabled = true
# path = "logs/rpc-audit.jsonl"

[store]
type = "sqlite"
path = "data/gmw-site.sqlite"
busy_timeout_ms = 5000
journal_mode = "wal"
sync_mode = "full"
"#,
    )
}
