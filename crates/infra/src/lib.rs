//! Infrastructure layer: the relational directory, credentials, tokens, and
//! the services that combine them with the pure `bizauth-auth` core.

pub mod credentials;
pub mod directory;
pub mod principals;
pub mod registration;
pub mod tokens;

#[cfg(test)]
pub(crate) mod testing;

pub use credentials::{CredentialStore, PasswordAuthenticator};
pub use directory::InMemoryDirectory;
pub use principals::{authenticate_token, resolve_principal};
pub use registration::Registrar;
pub use tokens::InMemoryTokenStore;
