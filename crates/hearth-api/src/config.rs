use hearth_types::models::UserId;
use tracing::warn;

/// Per-process settings for the router. Read once by the host; the router
/// itself never touches the environment.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Connection string for the store. `None` makes every request fail with 500.
    pub database_url: Option<String>,
    /// Identity every request acts as.
    pub principal: UserId,
}

impl Config {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: Some(database_url.into()),
            principal: UserId::DEFAULT,
        }
    }

    pub fn with_principal(mut self, principal: UserId) -> Self {
        self.principal = principal;
        self
    }

    /// `DATABASE_URL` and `HEARTH_USER_ID` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());

        let principal = match lookup("HEARTH_USER_ID") {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(id) => UserId(id),
                Err(e) => {
                    warn!("Ignoring HEARTH_USER_ID '{}': {}", raw, e);
                    UserId::DEFAULT
                }
            },
            None => UserId::DEFAULT,
        };

        Self {
            database_url,
            principal,
        }
    }
}
