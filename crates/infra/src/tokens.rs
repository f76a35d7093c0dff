//! In-memory token store with atomic get-or-create.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use bizauth_auth::{Token, TokenKey, TokenStore};
use bizauth_core::{DomainError, DomainResult, UserId};

#[derive(Debug, Default)]
struct TokenTables {
    by_user: HashMap<UserId, Token>,
    by_key: HashMap<String, UserId>,
}

/// Tokens live until the process exits; there is no rotation.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    inner: RwLock<TokenTables>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live tokens (one per user that ever logged in).
    pub fn token_count(&self) -> DomainResult<usize> {
        self.inner
            .read()
            .map(|t| t.by_user.len())
            .map_err(|_| DomainError::invariant("token store lock poisoned"))
    }
}

impl TokenStore for InMemoryTokenStore {
    fn get_or_create(&self, user_id: UserId) -> DomainResult<(Token, bool)> {
        // Check and insert under one write lock.
        let mut tables = self
            .inner
            .write()
            .map_err(|_| DomainError::invariant("token store lock poisoned"))?;

        if let Some(existing) = tables.by_user.get(&user_id) {
            return Ok((existing.clone(), false));
        }

        let key = loop {
            let candidate = TokenKey::generate();
            if !tables.by_key.contains_key(candidate.as_str()) {
                break candidate;
            }
        };

        let token = Token {
            key,
            user_id,
            created: Utc::now(),
        };
        tables
            .by_key
            .insert(token.key.as_str().to_string(), user_id);
        tables.by_user.insert(user_id, token.clone());

        Ok((token, true))
    }

    fn find(&self, key: &str) -> DomainResult<Option<Token>> {
        let tables = self
            .inner
            .read()
            .map_err(|_| DomainError::invariant("token store lock poisoned"))?;

        Ok(tables
            .by_key
            .get(key)
            .and_then(|user_id| tables.by_user.get(user_id))
            .cloned())
    }
}
