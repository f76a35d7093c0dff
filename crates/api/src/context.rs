use bizauth_auth::Principal;

/// Principal context for a request (resolved from the bearer token).
///
/// Handlers receive this explicitly as an extension; nothing looks the
/// principal up from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal: Principal,
}

impl PrincipalContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }
}
