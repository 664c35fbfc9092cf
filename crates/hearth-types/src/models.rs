use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity on whose behalf a request runs. There is no authentication:
/// the host configures a single principal for every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    pub const DEFAULT: UserId = UserId(1);
}

impl Default for UserId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
