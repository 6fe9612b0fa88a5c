// crates/gmw-site-rpc/src/lib.rs
// ============================================================================
// Module: GMW Site RPC
// Description: JSON-RPC 2.0 facade for the GMW site backend.
// Purpose: Expose site procedures over HTTP with validation and audit logging.
// Dependencies: gmw-site-core, gmw-site-config, axum, tokio
// ============================================================================

//! ## Overview
//! The RPC crate maps every site operation to a named procedure, decodes and
//! validates procedure input, runs the store call on a blocking worker, and
//! serves the result as a JSON-RPC 2.0 response over `POST /rpc`. All
//! procedure handlers are thin wrappers over [`gmw_site_core::SiteStore`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod procedures;
pub mod router;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::RpcAuditEvent;
pub use audit::RpcAuditSink;
pub use audit::RpcFileAuditSink;
pub use audit::RpcNoopAuditSink;
pub use audit::RpcOutcome;
pub use audit::RpcStderrAuditSink;
pub use procedures::ProcedureDefinition;
pub use procedures::ProcedureKind;
pub use procedures::ProcedureName;
pub use router::ProcedureRouter;
pub use router::RpcError;
pub use server::ServerError;
pub use server::SiteServer;
pub use server::build_site_store;
