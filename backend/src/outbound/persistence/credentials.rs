//! In-memory credential store with salted SHA-256 verification.
//!
//! Accounts exist only for the lifetime of the process: two are seeded at
//! startup and the rest arrive via registration. The digest is a single
//! unstretched SHA-256 over `password || salt`; do not mistake it for
//! hardened password storage.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use sha2::{Digest, Sha256};

use crate::domain::credentials::{Credential, Role, SubmittedCredentials};
use crate::domain::Error;

/// Process-wide username → credential map.
#[derive(Debug, Default)]
pub struct CredentialStore {
    users: Mutex<HashMap<String, Credential>>,
}

impl CredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new account.
    ///
    /// The role is derived from the submission: a special code makes the
    /// account an admin, otherwise it is an investigator. Fails with
    /// `Conflict` when the username is taken.
    pub fn register(&self, submission: SubmittedCredentials) -> Result<Credential, Error> {
        let mut users = self.lock();
        if users.contains_key(submission.username()) {
            return Err(Error::conflict("username already exists"));
        }

        let salt = generate_salt();
        let password_hash = hash_password(submission.password(), &salt);
        let role = if submission.special_code().is_some() {
            Role::Admin
        } else {
            Role::Investigator
        };
        let credential = Credential {
            username: submission.username().to_owned(),
            password_hash,
            salt,
            role,
            special_code: submission.special_code().map(str::to_owned),
        };
        users.insert(credential.username.clone(), credential.clone());
        Ok(credential)
    }

    /// Verify a login submission against the stored credential.
    ///
    /// Unknown usernames and digest mismatches collapse into one uniform
    /// `Unauthorized`. The special code is only compared when the caller
    /// supplied one, so accounts holding a code can still log in without it.
    pub fn verify(&self, submission: &SubmittedCredentials) -> Result<Credential, Error> {
        let users = self.lock();
        let Some(stored) = users.get(submission.username()) else {
            return Err(Error::unauthorized("invalid credentials"));
        };
        if hash_password(submission.password(), &stored.salt) != stored.password_hash {
            return Err(Error::unauthorized("invalid credentials"));
        }
        if let Some(code) = submission.special_code() {
            if stored.special_code.as_deref() != Some(code) {
                return Err(Error::unauthorized("invalid special code"));
            }
        }
        Ok(stored.clone())
    }

    /// Number of registered accounts.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no accounts exist.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Credential>> {
        match self.users.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Mint a bearer token for a fresh login.
///
/// The token is a digest of the username plus a random nonce. Nothing ever
/// validates it beyond presence — see the inbound bearer gate.
pub fn mint_access_token(username: &str) -> String {
    let nonce: [u8; 8] = rand::random();
    let mut hasher = Sha256::new();
    hasher.update(username.as_bytes());
    hasher.update(hex::encode(nonce).as_bytes());
    hex::encode(hasher.finalize())
}

fn generate_salt() -> String {
    let bytes: [u8; 16] = rand::random();
    hex::encode(bytes)
}

fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn submission(username: &str, password: &str, code: Option<&str>) -> SubmittedCredentials {
        SubmittedCredentials::try_from_parts(username, password, code)
            .expect("valid submission shape")
    }

    #[test]
    fn register_then_verify_succeeds() {
        let store = CredentialStore::new();
        store
            .register(submission("investigator1", "secure123", None))
            .expect("register");
        let credential = store
            .verify(&submission("investigator1", "secure123", None))
            .expect("verify");
        assert_eq!(credential.role, Role::Investigator);
    }

    #[test]
    fn duplicate_username_conflicts() {
        let store = CredentialStore::new();
        store.register(submission("admin", "pw", None)).expect("first register");
        let err = store
            .register(submission("admin", "other", None))
            .expect_err("duplicate must fail");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[case(Some("CIS-ADMIN-2024"), Role::Admin)]
    #[case(None, Role::Investigator)]
    fn role_follows_special_code(#[case] code: Option<&str>, #[case] expected: Role) {
        let store = CredentialStore::new();
        let credential = store.register(submission("user", "pw", code)).expect("register");
        assert_eq!(credential.role, expected);
    }

    #[test]
    fn wrong_password_is_unauthorized() {
        let store = CredentialStore::new();
        store.register(submission("admin", "admin2024", None)).expect("register");
        let err = store
            .verify(&submission("admin", "wrong", None))
            .expect_err("wrong password must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn unknown_username_is_unauthorized() {
        let store = CredentialStore::new();
        let err = store
            .verify(&submission("ghost", "pw", None))
            .expect_err("unknown user must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn mismatched_special_code_is_unauthorized() {
        let store = CredentialStore::new();
        store
            .register(submission("admin", "admin2024", Some("CIS-ADMIN-2024")))
            .expect("register");
        let err = store
            .verify(&submission("admin", "admin2024", Some("WRONG-CODE")))
            .expect_err("wrong code must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn omitted_special_code_still_verifies() {
        let store = CredentialStore::new();
        store
            .register(submission("admin", "admin2024", Some("CIS-ADMIN-2024")))
            .expect("register");
        store
            .verify(&submission("admin", "admin2024", None))
            .expect("login without code succeeds");
    }

    #[test]
    fn salts_differ_between_accounts() {
        let store = CredentialStore::new();
        let first = store.register(submission("a", "same-password", None)).expect("a");
        let second = store.register(submission("b", "same-password", None)).expect("b");
        assert_ne!(first.salt, second.salt);
        assert_ne!(first.password_hash, second.password_hash);
    }

    #[test]
    fn access_tokens_are_hex_digests_and_unique() {
        let first = mint_access_token("admin");
        let second = mint_access_token("admin");
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }
}
