//! Persistence adapters: snapshot file store, credential map, photo
//! directory.

mod atomic_io;
pub mod credentials;
pub mod photos;
pub mod snapshot;

pub use credentials::{mint_access_token, CredentialStore};
pub use photos::PhotoStore;
pub use snapshot::{SnapshotRecordStore, StoreError, StoreStats};
