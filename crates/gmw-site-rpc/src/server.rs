// crates/gmw-site-rpc/src/server.rs
// ============================================================================
// Module: RPC Server
// Description: JSON-RPC 2.0 HTTP facade for the site procedures.
// Purpose: Serve `POST /rpc` with body limits, CORS, and audit logging.
// Dependencies: gmw-site-config, gmw-site-store-sqlite, axum, tokio, tower-http
// ============================================================================

//! ## Overview
//! The server accepts JSON-RPC 2.0 envelopes on `POST /rpc`. The `method`
//! names a procedure and `params` carries its input; absent or `null` params
//! mean no input. Every call routes through [`crate::router::ProcedureRouter`]
//! and every request emits one audit event. Request bodies are untrusted and
//! size-limited before parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::ConnectInfo;
use axum::extract::DefaultBodyLimit;
use axum::extract::State;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::routing::post;
use gmw_site_config::CorsConfig;
use gmw_site_config::ServerAuditConfig;
use gmw_site_config::SiteConfig;
use gmw_site_config::StoreConfig;
use gmw_site_config::StoreType;
use gmw_site_core::InMemorySiteStore;
use gmw_site_core::SharedSiteStore;
use gmw_site_store_sqlite::SqliteSiteStore;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors;
use tower_http::cors::AllowOrigin;
use tower_http::cors::CorsLayer;

use crate::audit::RpcAuditEvent;
use crate::audit::RpcAuditEventParams;
use crate::audit::RpcAuditSink;
use crate::audit::RpcFileAuditSink;
use crate::audit::RpcNoopAuditSink;
use crate::audit::RpcStderrAuditSink;
use crate::procedures::ProcedureDefinition;
use crate::procedures::ProcedureName;
use crate::procedures::procedure_definitions;
use crate::router::ProcedureRouter;
use crate::router::RpcError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Supported JSON-RPC protocol version.
const JSONRPC_VERSION: &str = "2.0";
/// Method name for the procedure listing.
const PROCEDURES_LIST_METHOD: &str = "procedures/list";

// ============================================================================
// SECTION: Site Server
// ============================================================================

/// Site RPC server instance.
pub struct SiteServer {
    /// Server configuration.
    config: SiteConfig,
    /// Procedure router for request dispatch.
    router: ProcedureRouter,
    /// Audit sink for request events.
    audit: Arc<dyn RpcAuditSink>,
}

impl SiteServer {
    /// Builds a new server from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the configuration is invalid or the store
    /// or audit sink cannot be opened.
    pub fn from_config(config: SiteConfig) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let store = build_site_store(&config.store)?;
        let audit = build_audit_sink(&config.server.audit)?;
        Ok(Self {
            config,
            router: ProcedureRouter::new(store),
            audit,
        })
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit_sink(mut self, audit: Arc<dyn RpcAuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Builds the HTTP application without binding a socket.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] when a CORS origin is not a valid
    /// header value.
    pub fn into_app(self) -> Result<Router, ServerError> {
        let cors = cors_layer(&self.config.server.cors)?;
        let max_body_bytes = self.config.server.max_body_bytes;
        let state = Arc::new(self.into_state());
        Ok(Router::new()
            .route("/rpc", post(handle_http))
            .with_state(state)
            .layer(DefaultBodyLimit::max(max_body_bytes.saturating_add(1)))
            .layer(cors))
    }

    /// Consumes the server into the shared request state.
    fn into_state(self) -> ServerState {
        ServerState {
            router: self.router,
            max_body_bytes: self.config.server.max_body_bytes,
            audit: self.audit,
        }
    }

    /// Binds the configured address and serves until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let addr =
            self.config.server.bind_addr().map_err(|err| ServerError::Config(err.to_string()))?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|err| ServerError::Transport(format!("http bind failed: {err}")))?;
        self.serve_with_shutdown(listener, shutdown_signal()).await
    }

    /// Serves on an already bound listener until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the application cannot be built or the
    /// server fails.
    pub async fn serve_with_shutdown<F>(
        self,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.into_app()?;
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|err| ServerError::Transport(format!("http server failed: {err}")))
    }
}

/// Builds the site store from store configuration.
///
/// # Errors
///
/// Returns [`ServerError::Init`] when the `SQLite` store cannot be opened.
pub fn build_site_store(config: &StoreConfig) -> Result<SharedSiteStore, ServerError> {
    let store = match config.store_type {
        StoreType::Memory => SharedSiteStore::from_store(InMemorySiteStore::new()),
        StoreType::Sqlite => {
            let sqlite_config = config.sqlite_config().ok_or_else(|| {
                ServerError::Config("sqlite store requires configuration".to_string())
            })?;
            let store = SqliteSiteStore::new(&sqlite_config)
                .map_err(|err| ServerError::Init(err.to_string()))?;
            SharedSiteStore::from_store(store)
        }
    };
    Ok(store)
}

/// Builds the audit sink from audit configuration.
fn build_audit_sink(config: &ServerAuditConfig) -> Result<Arc<dyn RpcAuditSink>, ServerError> {
    if !config.enabled {
        return Ok(Arc::new(RpcNoopAuditSink));
    }
    match &config.path {
        Some(path) => {
            let sink = RpcFileAuditSink::new(Path::new(path))
                .map_err(|err| ServerError::Init(format!("audit log open failed: {err}")))?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(RpcStderrAuditSink)),
    }
}

/// Builds the CORS layer; `"*"` allows any origin.
fn cors_layer(config: &CorsConfig) -> Result<CorsLayer, ServerError> {
    let layer = CorsLayer::new().allow_methods([Method::POST]).allow_headers([CONTENT_TYPE]);
    if config.allows_any_origin() {
        return Ok(layer.allow_origin(cors::Any));
    }
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| ServerError::Config(format!("invalid cors origin: {origin}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

/// Resolves on Ctrl-C; never resolves when the signal cannot be installed.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

// ============================================================================
// SECTION: HTTP Transport
// ============================================================================

/// Shared server state for HTTP handlers.
struct ServerState {
    /// Procedure router for request dispatch.
    router: ProcedureRouter,
    /// Maximum allowed request body size.
    max_body_bytes: usize,
    /// Audit sink for request events.
    audit: Arc<dyn RpcAuditSink>,
}

/// Handles HTTP JSON-RPC requests.
async fn handle_http(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    bytes: Bytes,
) -> impl IntoResponse {
    let (status, response) = parse_request(&state, Some(peer), &bytes).await;
    (status, axum::Json(response))
}

// ============================================================================
// SECTION: JSON-RPC Handling
// ============================================================================

/// Incoming JSON-RPC request payload.
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    /// JSON-RPC protocol version.
    jsonrpc: String,
    /// Request identifier.
    #[serde(default)]
    id: Value,
    /// Procedure name.
    method: String,
    /// Optional procedure input.
    #[serde(default)]
    params: Option<Value>,
}

/// JSON-RPC response envelope.
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    /// JSON-RPC protocol version.
    jsonrpc: &'static str,
    /// Request identifier.
    id: Value,
    /// Successful result payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    /// Error payload when the request fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC error payload.
#[derive(Debug, Serialize)]
struct JsonRpcError {
    /// Error code.
    code: i64,
    /// Human-readable error message.
    message: String,
    /// Structured detail for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

/// Procedure list response payload.
#[derive(Debug, Serialize)]
struct ProcedureListResult {
    /// Registered procedures.
    procedures: Vec<ProcedureDefinition>,
}

/// Handled request plus the metadata needed for auditing.
struct RpcExchange {
    /// HTTP status for the response.
    status: StatusCode,
    /// Response envelope.
    response: JsonRpcResponse,
    /// Request identifier when the envelope parsed.
    request_id: Option<String>,
    /// Resolved procedure.
    procedure: Option<ProcedureName>,
    /// Normalized error kind label.
    error_kind: Option<&'static str>,
}

impl RpcExchange {
    /// Builds a successful exchange.
    fn success(id: Value, procedure: Option<ProcedureName>, result: Value) -> Self {
        Self {
            status: StatusCode::OK,
            request_id: audit_request_id(&id),
            response: JsonRpcResponse {
                jsonrpc: JSONRPC_VERSION,
                id,
                result: Some(result),
                error: None,
            },
            procedure,
            error_kind: None,
        }
    }

    /// Builds a failed exchange that never reached a procedure.
    fn rejected(
        status: StatusCode,
        id: Value,
        code: i64,
        message: &str,
        error_kind: &'static str,
    ) -> Self {
        Self {
            status,
            request_id: audit_request_id(&id),
            response: JsonRpcResponse {
                jsonrpc: JSONRPC_VERSION,
                id,
                result: None,
                error: Some(JsonRpcError {
                    code,
                    message: message.to_string(),
                    data: None,
                }),
            },
            procedure: None,
            error_kind: Some(error_kind),
        }
    }
}

/// Renders a request id for the audit log; a null id is recorded as absent.
fn audit_request_id(id: &Value) -> Option<String> {
    if id.is_null() { None } else { Some(id.to_string()) }
}

/// Parses, dispatches, and audits a JSON-RPC request payload.
async fn parse_request(
    state: &ServerState,
    peer: Option<SocketAddr>,
    bytes: &Bytes,
) -> (StatusCode, JsonRpcResponse) {
    let exchange = if bytes.len() > state.max_body_bytes {
        RpcExchange::rejected(
            StatusCode::PAYLOAD_TOO_LARGE,
            Value::Null,
            -32070,
            "request body too large",
            "body_too_large",
        )
    } else {
        match serde_json::from_slice::<JsonRpcRequest>(bytes.as_ref()) {
            Ok(request) => handle_request(&state.router, request).await,
            Err(_) => RpcExchange::rejected(
                StatusCode::BAD_REQUEST,
                Value::Null,
                -32600,
                "invalid json-rpc request",
                "invalid_request",
            ),
        }
    };
    let response_bytes = serde_json::to_vec(&exchange.response).map_or(0, |payload| payload.len());
    state.audit.record(&RpcAuditEvent::new(RpcAuditEventParams {
        request_id: exchange.request_id,
        peer_ip: peer.map(|addr| addr.ip().to_string()),
        procedure: exchange.procedure,
        error_code: exchange.response.error.as_ref().map(|error| error.code),
        error_kind: exchange.error_kind,
        request_bytes: bytes.len(),
        response_bytes,
    }));
    (exchange.status, exchange.response)
}

/// Dispatches a parsed JSON-RPC request to the procedure router.
async fn handle_request(router: &ProcedureRouter, request: JsonRpcRequest) -> RpcExchange {
    if request.jsonrpc != JSONRPC_VERSION {
        return RpcExchange::rejected(
            StatusCode::BAD_REQUEST,
            request.id,
            -32600,
            "invalid json-rpc version",
            "invalid_request",
        );
    }
    if request.method == PROCEDURES_LIST_METHOD {
        let listing = ProcedureListResult {
            procedures: procedure_definitions(),
        };
        return match serde_json::to_value(listing) {
            Ok(value) => RpcExchange::success(request.id, None, value),
            Err(_) => jsonrpc_error(request.id, None, &RpcError::Serialization),
        };
    }
    let procedure = ProcedureName::parse(&request.method);
    let params = request.params.unwrap_or(Value::Null);
    match router.handle_call(&request.method, params).await {
        Ok(value) => RpcExchange::success(request.id, procedure, value),
        Err(err) => jsonrpc_error(request.id, procedure, &err),
    }
}

/// Builds a JSON-RPC error response for a procedure failure.
fn jsonrpc_error(id: Value, procedure: Option<ProcedureName>, error: &RpcError) -> RpcExchange {
    let (status, code, message, data) = match error {
        RpcError::UnknownProcedure => {
            (StatusCode::BAD_REQUEST, -32601, "method not found".to_string(), None)
        }
        RpcError::InvalidParams(validation) => (
            StatusCode::BAD_REQUEST,
            -32602,
            validation.message().to_string(),
            Some(json!({
                "field": validation.field_name(),
                "message": validation.message(),
            })),
        ),
        RpcError::Persistence(err) => (StatusCode::OK, -32050, err.to_string(), None),
        RpcError::Internal(message) => (StatusCode::OK, -32050, message.clone(), None),
        RpcError::Serialization => {
            (StatusCode::OK, -32060, "serialization failed".to_string(), None)
        }
    };
    RpcExchange {
        status,
        request_id: audit_request_id(&id),
        response: JsonRpcResponse {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data,
            }),
        },
        procedure,
        error_kind: Some(error.kind()),
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Site server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
