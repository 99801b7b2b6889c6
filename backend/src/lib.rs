//! Criminal record management service.
//!
//! A small HTTP/JSON service: criminal records persisted to a single JSON
//! snapshot file, in-memory credentials with salted digests, rule-table
//! "predictors", and simulated biometric scans.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
