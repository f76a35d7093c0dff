//! Token issuance: exchange verified credentials for an opaque bearer token.
//!
//! Credential verification and token persistence are collaborators
//! ([`Authenticator`], [`TokenStore`]); this module only wires them together.

use chrono::{DateTime, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use bizauth_core::{DomainError, DomainResult, UserId};

use crate::User;

/// Random bytes behind a token key (hex-encoded to 40 characters).
const TOKEN_KEY_BYTES: usize = 20;

/// Opaque bearer token key.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenKey(String);

impl TokenKey {
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_KEY_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    pub fn from_string(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keys are credentials; keep them out of debug logs.
impl core::fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("TokenKey(..)")
    }
}

/// A live token. At most one exists per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub key: TokenKey,
    pub user_id: UserId,
    pub created: DateTime<Utc>,
}

/// External credential verifier.
pub trait Authenticator: Send + Sync {
    /// `Ok(None)` for any credential mismatch. `Err` only for store failures.
    fn authenticate(&self, email: &str, password: &str) -> DomainResult<Option<User>>;
}

/// Token persistence.
pub trait TokenStore: Send + Sync {
    /// Return the user's token, creating it if none exists.
    ///
    /// Must be atomic: concurrent calls for one user yield the same token.
    /// The flag reports whether this call created it.
    fn get_or_create(&self, user_id: UserId) -> DomainResult<(Token, bool)>;

    fn find(&self, key: &str) -> DomainResult<Option<Token>>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unable to authenticate with provided credentials")]
pub struct AuthenticationError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    #[error(transparent)]
    Store(#[from] DomainError),
}

/// Issued token plus the principal attributes echoed to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedToken {
    pub token: TokenKey,
    pub user_id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub is_employee: bool,
    pub is_business_owner: bool,
}

/// Exchange credentials for the user's token (idempotent per user).
pub fn issue_token<A, T>(
    authenticator: &A,
    tokens: &T,
    email: &str,
    password: &str,
) -> Result<IssuedToken, TokenError>
where
    A: Authenticator + ?Sized,
    T: TokenStore + ?Sized,
{
    let Some(user) = authenticator.authenticate(email, password)? else {
        tracing::warn!("token request rejected: invalid credentials");
        return Err(AuthenticationError.into());
    };

    let (token, created) = tokens.get_or_create(user.id)?;
    tracing::info!(user_id = %user.id, created, "token issued");

    Ok(IssuedToken {
        token: token.key,
        user_id: user.id,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        is_employee: user.is_employee,
        is_business_owner: user.is_business_owner,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::testing::user;

    struct StaticAuthenticator {
        user: User,
        password: &'static str,
    }

    impl Authenticator for StaticAuthenticator {
        fn authenticate(&self, email: &str, password: &str) -> DomainResult<Option<User>> {
            Ok((email == self.user.email && password == self.password).then(|| self.user.clone()))
        }
    }

    struct FailingAuthenticator;

    impl Authenticator for FailingAuthenticator {
        fn authenticate(&self, _email: &str, _password: &str) -> DomainResult<Option<User>> {
            Err(DomainError::invariant("credential store unavailable"))
        }
    }

    #[derive(Default)]
    struct MapTokens(Mutex<HashMap<UserId, Token>>);

    impl TokenStore for MapTokens {
        fn get_or_create(&self, user_id: UserId) -> DomainResult<(Token, bool)> {
            let mut map = self.0.lock().unwrap();
            let mut created = false;
            let token = map
                .entry(user_id)
                .or_insert_with(|| {
                    created = true;
                    Token {
                        key: TokenKey::generate(),
                        user_id,
                        created: Utc::now(),
                    }
                })
                .clone();
            Ok((token, created))
        }

        fn find(&self, key: &str) -> DomainResult<Option<Token>> {
            let map = self.0.lock().unwrap();
            Ok(map.values().find(|t| t.key.as_str() == key).cloned())
        }
    }

    fn owner() -> StaticAuthenticator {
        StaticAuthenticator {
            user: User {
                is_business_owner: true,
                last_name: Some("Owner".into()),
                ..user("owner@acme.test", "Olive")
            },
            password: "s3cret",
        }
    }

    #[test]
    fn generated_keys_are_forty_hex_chars() {
        let key = TokenKey::generate();
        assert_eq!(key.as_str().len(), 40);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(key, TokenKey::generate());
        assert_eq!(format!("{key:?}"), "TokenKey(..)");
    }

    #[test]
    fn issuance_echoes_principal_attributes() {
        let auth = owner();
        let tokens = MapTokens::default();

        let issued = issue_token(&auth, &tokens, "owner@acme.test", "s3cret").unwrap();
        assert_eq!(issued.user_id, auth.user.id);
        assert_eq!(issued.email, "owner@acme.test");
        assert_eq!(issued.first_name, "Olive");
        assert_eq!(issued.last_name.as_deref(), Some("Owner"));
        assert!(issued.is_business_owner);
        assert!(!issued.is_employee);

        let stored = tokens.find(issued.token.as_str()).unwrap().unwrap();
        assert_eq!(stored.user_id, auth.user.id);
    }

    #[test]
    fn issuance_is_idempotent() {
        let auth = owner();
        let tokens = MapTokens::default();

        let first = issue_token(&auth, &tokens, "owner@acme.test", "s3cret").unwrap();
        let second = issue_token(&auth, &tokens, "owner@acme.test", "s3cret").unwrap();
        assert_eq!(first.token, second.token);
    }

    #[test]
    fn wrong_password_and_unknown_email_look_the_same() {
        let auth = owner();
        let tokens = MapTokens::default();

        let wrong_password = issue_token(&auth, &tokens, "owner@acme.test", "nope").unwrap_err();
        let unknown_email = issue_token(&auth, &tokens, "who@acme.test", "s3cret").unwrap_err();

        assert_eq!(wrong_password, TokenError::Authentication(AuthenticationError));
        assert_eq!(wrong_password, unknown_email);
        assert_eq!(
            wrong_password.to_string(),
            "unable to authenticate with provided credentials"
        );
    }

    #[test]
    fn store_errors_propagate_unchanged() {
        let tokens = MapTokens::default();
        let err = issue_token(&FailingAuthenticator, &tokens, "a@b.c", "x").unwrap_err();
        assert_eq!(
            err,
            TokenError::Store(DomainError::invariant("credential store unavailable"))
        );
    }
}
