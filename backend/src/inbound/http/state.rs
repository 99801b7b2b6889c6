//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this bundle via `actix_web::web::Data`. The stores
//! are owned by the composition root and shared by reference — no handler
//! ever constructs its own persistence.

use std::sync::Arc;

use crate::outbound::persistence::{CredentialStore, PhotoStore, SnapshotRecordStore};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub records: Arc<SnapshotRecordStore>,
    pub credentials: Arc<CredentialStore>,
    pub photos: Arc<PhotoStore>,
}

impl HttpState {
    /// Bundle the three stores for handler injection.
    pub fn new(
        records: Arc<SnapshotRecordStore>,
        credentials: Arc<CredentialStore>,
        photos: Arc<PhotoStore>,
    ) -> Self {
        Self {
            records,
            credentials,
            photos,
        }
    }
}
