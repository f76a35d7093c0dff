//! Account creation: validation, uniqueness, password storage.

use std::sync::Arc;

use chrono::Utc;

use bizauth_auth::{AccountKind, NewUser, User};
use bizauth_core::DomainResult;

use crate::credentials::CredentialStore;
use crate::directory::InMemoryDirectory;

/// Creates accounts in the directory and their credentials alongside.
#[derive(Debug, Clone)]
pub struct Registrar {
    directory: Arc<InMemoryDirectory>,
    credentials: Arc<CredentialStore>,
}

impl Registrar {
    pub fn new(directory: Arc<InMemoryDirectory>, credentials: Arc<CredentialStore>) -> Self {
        Self {
            directory,
            credentials,
        }
    }

    /// Self-service sign-up.
    pub fn create_user(&self, input: NewUser) -> DomainResult<User> {
        self.create(input, AccountKind::Regular)
    }

    /// Operator bootstrap; staff and superuser flags are forced on.
    pub fn create_superuser(&self, input: NewUser) -> DomainResult<User> {
        self.create(input, AccountKind::Superuser)
    }

    fn create(&self, input: NewUser, kind: AccountKind) -> DomainResult<User> {
        let registration = input.register(kind, Utc::now())?;

        // Hash first; a rejected user row leaves no credential behind and a
        // failed hash leaves no user row.
        let pending = self.credentials.stage(registration.password.as_deref())?;
        let user = self.directory.save_user(registration.user)?;
        pending.commit(user.id);

        tracing::info!(user_id = %user.id, kind = ?kind, "user registered");
        Ok(user)
    }
}
