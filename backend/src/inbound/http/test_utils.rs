//! Shared fixtures for HTTP handler tests.

use std::sync::Arc;

use actix_web::web;

use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{CredentialStore, PhotoStore, SnapshotRecordStore};

/// Handler state backed by a scratch directory that lives as long as the
/// context value.
pub(crate) struct TestContext {
    pub state: web::Data<HttpState>,
    _scratch: tempfile::TempDir,
}

pub(crate) fn test_state() -> TestContext {
    let scratch = tempfile::tempdir().expect("create temp dir");
    let records = SnapshotRecordStore::open(scratch.path().join("criminals.json"))
        .expect("open record store");
    let photos = PhotoStore::open(scratch.path().join("uploads")).expect("open photo store");
    let state = HttpState::new(
        Arc::new(records),
        Arc::new(CredentialStore::new()),
        Arc::new(photos),
    );
    TestContext {
        state: web::Data::new(state),
        _scratch: scratch,
    }
}

pub(crate) fn bearer() -> (&'static str, &'static str) {
    ("Authorization", "Bearer test-token")
}

/// Hand-rolled multipart/form-data body for exercising the create endpoint.
pub(crate) struct MultipartBuilder {
    boundary: &'static str,
    body: Vec<u8>,
}

impl MultipartBuilder {
    pub(crate) fn new() -> Self {
        Self {
            boundary: "record-test-boundary",
            body: Vec::new(),
        }
    }

    pub(crate) fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self
    }

    pub(crate) fn file(
        mut self,
        name: &str,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub(crate) fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.body,
        )
    }
}
