//! Configuration for the reservation queries.

use crate::values::PoolSettings;

/// The 'Configuration' type collects all the information necessary to serve queries at runtime.
///
/// Values of this type are produced from a 'ParsedConfiguration' using
/// 'make_runtime_configuration', once every secret has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Qualifier for every table name, if the tables live outside the default schema.
    pub schema: Option<String>,
    pub default_results_per_page: u32,
    pub pool_settings: PoolSettings,
    pub connection_uri: String,
}
