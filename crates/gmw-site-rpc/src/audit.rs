// crates/gmw-site-rpc/src/audit.rs
// ============================================================================
// Module: RPC Audit Logging
// Description: Structured audit events for RPC request handling.
// Purpose: Emit one JSON line per request without a logging framework.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every request handled by the facade produces one [`RpcAuditEvent`] with
//! the procedure, outcome, error classification, and payload sizes. Request
//! and response bodies are never logged. Sinks write JSON lines to stderr or
//! an append-only file, or discard events.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::procedures::ProcedureKind;
use crate::procedures::ProcedureName;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Request outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RpcOutcome {
    /// Successful request.
    Ok,
    /// Failed request.
    Error,
}

/// RPC audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct RpcAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// JSON-RPC request identifier when the envelope parsed.
    pub request_id: Option<String>,
    /// Peer IP address when available.
    pub peer_ip: Option<String>,
    /// Resolved procedure; `None` for envelope errors and unknown methods.
    pub procedure: Option<ProcedureName>,
    /// Declared kind of the resolved procedure.
    pub kind: Option<ProcedureKind>,
    /// Request outcome.
    pub outcome: RpcOutcome,
    /// JSON-RPC error code when present.
    pub error_code: Option<i64>,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
}

/// Inputs required to construct an audit event.
pub struct RpcAuditEventParams {
    /// JSON-RPC request identifier when the envelope parsed.
    pub request_id: Option<String>,
    /// Peer IP address if known.
    pub peer_ip: Option<String>,
    /// Resolved procedure.
    pub procedure: Option<ProcedureName>,
    /// JSON-RPC error code when present.
    pub error_code: Option<i64>,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
}

impl RpcAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    ///
    /// The outcome is derived from the presence of an error code.
    #[must_use]
    pub fn new(params: RpcAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        let outcome = if params.error_code.is_some() { RpcOutcome::Error } else { RpcOutcome::Ok };
        Self {
            event: "rpc_request",
            timestamp_ms,
            request_id: params.request_id,
            peer_ip: params.peer_ip,
            procedure: params.procedure,
            kind: params.procedure.map(ProcedureName::kind),
            outcome,
            error_code: params.error_code,
            error_kind: params.error_kind,
            request_bytes: params.request_bytes,
            response_bytes: params.response_bytes,
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for RPC request events.
pub trait RpcAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &RpcAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct RpcStderrAuditSink;

impl RpcAuditSink for RpcStderrAuditSink {
    fn record(&self, event: &RpcAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct RpcFileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl RpcFileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl RpcAuditSink for RpcFileAuditSink {
    fn record(&self, event: &RpcAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct RpcNoopAuditSink;

impl RpcAuditSink for RpcNoopAuditSink {
    fn record(&self, _event: &RpcAuditEvent) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================
