//! Environment-driven configuration for the API binary.

/// Superuser created at start-up when configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuperuserSeed {
    pub email: String,
    pub first_name: String,
    pub phone: String,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub superuser: Option<SuperuserSeed>,
}

impl ApiConfig {
    pub const DEFAULT_BIND_ADDR: &'static str = "0.0.0.0:8080";

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| Self::DEFAULT_BIND_ADDR.to_string());

        let superuser = match (
            get("SUPERUSER_EMAIL"),
            get("SUPERUSER_FIRST_NAME"),
            get("SUPERUSER_PHONE"),
        ) {
            (Some(email), Some(first_name), Some(phone)) => Some(SuperuserSeed {
                email,
                first_name,
                phone,
                password: get("SUPERUSER_PASSWORD"),
            }),
            _ => None,
        };

        Self {
            bind_addr,
            superuser,
        }
    }
}
