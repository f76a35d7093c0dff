//! Password credentials (argon2) and the directory-backed authenticator.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockWriteGuard};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;

use bizauth_auth::{Authenticator, User};
use bizauth_core::{DomainError, DomainResult, UserId};

use crate::directory::InMemoryDirectory;

#[derive(Debug, Clone)]
enum Credential {
    Hashed(String),
    /// Set when an account is created without a password; never verifies.
    Unusable,
}

pub fn hash_password(password: &str) -> DomainResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DomainError::invariant(format!("password hashing failed: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Password hashes keyed by user.
#[derive(Debug, Default)]
pub struct CredentialStore {
    inner: RwLock<HashMap<UserId, Credential>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the hash of `password`, or an unusable password for `None`.
    pub fn set_password(&self, user_id: UserId, password: Option<&str>) -> DomainResult<()> {
        self.stage(password)?.commit(user_id);
        Ok(())
    }

    /// Hash `password` and reserve the store for writing.
    ///
    /// Everything that can fail happens here; [`PendingCredential::commit`]
    /// cannot. Dropping the pending value writes nothing.
    pub fn stage(&self, password: Option<&str>) -> DomainResult<PendingCredential<'_>> {
        let credential = match password {
            Some(p) => Credential::Hashed(hash_password(p)?),
            None => Credential::Unusable,
        };
        let map = self
            .inner
            .write()
            .map_err(|_| DomainError::invariant("credential lock poisoned"))?;

        Ok(PendingCredential { map, credential })
    }

    pub fn has_usable_password(&self, user_id: UserId) -> DomainResult<bool> {
        let map = self.lock_read()?;
        Ok(matches!(map.get(&user_id), Some(Credential::Hashed(_))))
    }

    pub fn check_password(&self, user_id: UserId, password: &str) -> DomainResult<bool> {
        let map = self.lock_read()?;
        Ok(match map.get(&user_id) {
            Some(Credential::Hashed(hash)) => verify_password(password, hash),
            Some(Credential::Unusable) | None => false,
        })
    }

    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = self.inner.write();
            panic!("poison credential lock");
        }));
    }

    fn lock_read(
        &self,
    ) -> DomainResult<std::sync::RwLockReadGuard<'_, HashMap<UserId, Credential>>> {
        self.inner
            .read()
            .map_err(|_| DomainError::invariant("credential lock poisoned"))
    }
}

/// A computed credential holding the store's write lock until committed.
pub struct PendingCredential<'a> {
    map: RwLockWriteGuard<'a, HashMap<UserId, Credential>>,
    credential: Credential,
}

impl PendingCredential<'_> {
    pub fn commit(mut self, user_id: UserId) {
        self.map.insert(user_id, self.credential);
    }
}

/// Email + password authenticator over the directory.
///
/// Unknown email, wrong password, unusable password and inactive account all
/// yield `Ok(None)`. A successful check stamps `last_login`.
#[derive(Debug, Clone)]
pub struct PasswordAuthenticator {
    directory: Arc<InMemoryDirectory>,
    credentials: Arc<CredentialStore>,
}

impl PasswordAuthenticator {
    pub fn new(directory: Arc<InMemoryDirectory>, credentials: Arc<CredentialStore>) -> Self {
        Self {
            directory,
            credentials,
        }
    }
}

impl Authenticator for PasswordAuthenticator {
    fn authenticate(&self, email: &str, password: &str) -> DomainResult<Option<User>> {
        let Some(mut user) = self.directory.user_by_email(email)? else {
            return Ok(None);
        };

        if !user.is_active || !self.credentials.check_password(user.id, password)? {
            return Ok(None);
        }

        let now = Utc::now();
        self.directory.record_login(user.id, now)?;
        user.last_login = Some(now);

        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::user;

    fn setup() -> (PasswordAuthenticator, Arc<InMemoryDirectory>, Arc<CredentialStore>, UserId) {
        let directory = Arc::new(InMemoryDirectory::new());
        let credentials = Arc::new(CredentialStore::new());
        let saved = directory.save_user(user("kim@acme.test", "+1")).unwrap();
        credentials.set_password(saved.id, Some("hunter2")).unwrap();

        let auth = PasswordAuthenticator::new(directory.clone(), credentials.clone());
        (auth, directory, credentials, saved.id)
    }

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("battery staple", &hash));
        assert!(!verify_password("correct horse", "not-a-hash"));
    }

    #[test]
    fn authenticates_and_stamps_last_login() {
        let (auth, directory, _, id) = setup();

        let user = auth.authenticate("kim@ACME.test", "hunter2").unwrap().unwrap();
        assert_eq!(user.id, id);
        assert!(user.last_login.is_some());
        assert_eq!(directory.user(id).unwrap().last_login, user.last_login);
    }

    #[test]
    fn rejects_wrong_password_and_unknown_email() {
        let (auth, _, _, _) = setup();
        assert!(auth.authenticate("kim@acme.test", "hunter3").unwrap().is_none());
        assert!(auth.authenticate("nobody@acme.test", "hunter2").unwrap().is_none());
    }

    #[test]
    fn rejects_inactive_user() {
        let (auth, directory, _, id) = setup();
        let mut user = directory.user(id).unwrap();
        user.is_active = false;
        directory.save_user(user).unwrap();

        assert!(auth.authenticate("kim@acme.test", "hunter2").unwrap().is_none());
    }

    #[test]
    fn unusable_password_never_authenticates() {
        let (auth, _, credentials, id) = setup();
        credentials.set_password(id, None).unwrap();

        assert!(!credentials.has_usable_password(id).unwrap());
        assert!(auth.authenticate("kim@acme.test", "").unwrap().is_none());
        assert!(auth.authenticate("kim@acme.test", "hunter2").unwrap().is_none());
    }
}
