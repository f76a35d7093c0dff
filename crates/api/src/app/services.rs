use std::sync::Arc;

use bizauth_auth::NewUser;
use bizauth_core::DomainResult;
use bizauth_infra::{
    CredentialStore, InMemoryDirectory, InMemoryTokenStore, PasswordAuthenticator, Registrar,
};

use crate::config::SuperuserSeed;

/// Everything the handlers need, shared behind one `Arc`.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub directory: Arc<InMemoryDirectory>,
    pub credentials: Arc<CredentialStore>,
    pub tokens: Arc<InMemoryTokenStore>,
    pub registrar: Registrar,
    pub authenticator: PasswordAuthenticator,
}

impl AppServices {
    pub fn in_memory() -> Self {
        let directory = Arc::new(InMemoryDirectory::new());
        let credentials = Arc::new(CredentialStore::new());

        Self {
            registrar: Registrar::new(directory.clone(), credentials.clone()),
            authenticator: PasswordAuthenticator::new(directory.clone(), credentials.clone()),
            tokens: Arc::new(InMemoryTokenStore::new()),
            directory,
            credentials,
        }
    }

    /// Create the configured superuser unless the email is already taken.
    pub fn bootstrap_superuser(&self, seed: &SuperuserSeed) -> DomainResult<()> {
        if self.directory.user_by_email(&seed.email)?.is_some() {
            tracing::info!(email = %seed.email, "superuser already present");
            return Ok(());
        }

        self.registrar.create_superuser(NewUser {
            email: seed.email.clone(),
            first_name: seed.first_name.clone(),
            phone: seed.phone.clone(),
            password: seed.password.clone(),
            ..Default::default()
        })?;
        Ok(())
    }
}

impl Default for AppServices {
    fn default() -> Self {
        Self::in_memory()
    }
}
