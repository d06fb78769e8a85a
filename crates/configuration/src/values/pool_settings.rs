use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Settings for the connection pool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PoolSettings {
    /// upper bound on open connections
    #[serde(default = "max_connection_default")]
    pub max_connections: u32,
    /// seconds to wait for a free connection before failing a query
    #[serde(default = "pool_timeout_default")]
    pub pool_timeout: u64,
    /// seconds after which an unused connection is closed
    #[serde(default = "idle_timeout_default")]
    pub idle_timeout: Option<u64>,
    /// seconds after which any connection is recycled
    #[serde(default = "connection_lifetime_default")]
    pub connection_lifetime: Option<u64>,
}

impl PoolSettings {
    pub fn is_default(&self) -> bool {
        self == &PoolSettings::default()
    }
}

impl Default for PoolSettings {
    fn default() -> PoolSettings {
        PoolSettings {
            max_connections: max_connection_default(),
            pool_timeout: pool_timeout_default(),
            idle_timeout: idle_timeout_default(),
            connection_lifetime: connection_lifetime_default(),
        }
    }
}

// for serde default //
fn max_connection_default() -> u32 {
    10
}
fn pool_timeout_default() -> u64 {
    30
}
fn idle_timeout_default() -> Option<u64> {
    Some(180)
}
fn connection_lifetime_default() -> Option<u64> {
    Some(600)
}
