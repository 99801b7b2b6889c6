//! Domain types and rule-based prediction logic.
//!
//! Everything here is transport and storage agnostic: record and credential
//! models, the threshold classifier, and the error taxonomy the inbound
//! adapters map onto HTTP.

pub mod classifier;
pub mod credentials;
pub mod error;
pub mod record;

pub use self::error::{Error, ErrorCode};
