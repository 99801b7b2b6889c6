//! Credential primitives for registration and login.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to the credential
//! store.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

/// Account role derived at registration time.
///
/// Supplying a special code at registration yields `Admin`; everybody else
/// is an `Investigator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Investigator,
}

/// A stored account: salted password digest plus role metadata.
///
/// Credentials live in process memory only; the snapshot file holds criminal
/// records, never accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    /// Hex SHA-256 of `password || salt`. Unstretched; not a hardened
    /// scheme.
    pub password_hash: String,
    pub salt: String,
    pub role: Role,
    pub special_code: Option<String>,
}

/// Domain error returned when submitted credential values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated username/password/special-code triple submitted by a client.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty but keeps caller-provided whitespace to avoid
///   surprising credential comparisons.
/// - a blank special code normalises to `None`, so an empty form field never
///   triggers the secondary check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedCredentials {
    username: String,
    password: Zeroizing<String>,
    special_code: Option<String>,
}

impl SubmittedCredentials {
    /// Construct credentials from raw request inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        special_code: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        let special_code = special_code
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_owned);

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
            special_code,
        })
    }

    /// Username suitable for account lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password exactly as the caller provided it.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Secondary shared secret, when one was submitted.
    pub fn special_code(&self) -> Option<&str> {
        self.special_code.as_deref()
    }
}
