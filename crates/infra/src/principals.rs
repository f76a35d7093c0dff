//! Resolve principals from persisted state.

use bizauth_auth::{Principal, TokenStore};
use bizauth_core::{DomainResult, UserId};

use crate::directory::InMemoryDirectory;

/// Load a user together with the business they own and their employee record.
pub fn resolve_principal(directory: &InMemoryDirectory, user_id: UserId) -> DomainResult<Principal> {
    let user = directory.user(user_id)?;
    let business = directory.business_owned_by(user_id)?;
    let employee = directory.employee_for_user(user_id)?;

    Ok(Principal {
        user,
        business,
        employee,
    })
}

/// Resolve a bearer token key to its principal.
///
/// Unknown keys and inactive accounts both resolve to `None`.
pub fn authenticate_token<T>(
    directory: &InMemoryDirectory,
    tokens: &T,
    key: &str,
) -> DomainResult<Option<Principal>>
where
    T: TokenStore + ?Sized,
{
    let Some(token) = tokens.find(key)? else {
        return Ok(None);
    };

    let principal = resolve_principal(directory, token.user_id)?;
    if !principal.user.is_active {
        tracing::warn!(user_id = %token.user_id, "token presented for inactive user");
        return Ok(None);
    }

    Ok(Some(principal))
}
