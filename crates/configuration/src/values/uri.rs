use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Secret;

/// Variable read for the connection uri when none is configured.
pub const DEFAULT_CONNECTION_URI_VARIABLE: &str = "RESERVATIONS_DATABASE_URL";

/// Connection string for a MySQL or SQLite database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct ConnectionUri(pub Secret);

impl Default for ConnectionUri {
    fn default() -> Self {
        Self(Secret::FromEnvironment {
            variable: crate::environment::Variable::new(DEFAULT_CONNECTION_URI_VARIABLE),
        })
    }
}

impl From<String> for ConnectionUri {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<&str> for ConnectionUri {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}
