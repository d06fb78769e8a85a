//! Turn a parsed configuration into the runtime configuration.

use crate::configuration::Configuration;
use crate::environment::Environment;
use crate::error::MakeRuntimeConfigurationError;
use crate::version1::ParsedConfiguration;

/// Resolve secrets and check the values of a parsed configuration.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
    environment: impl Environment,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    let connection_uri = parsed_config.connection_uri.0.resolve(environment)?;

    if parsed_config.pagination.default_results_per_page == 0 {
        return Err(MakeRuntimeConfigurationError::InvalidValue {
            field: "pagination.defaultResultsPerPage",
            message: "must be at least 1".to_string(),
        });
    }
    if parsed_config.pool_settings.max_connections == 0 {
        return Err(MakeRuntimeConfigurationError::InvalidValue {
            field: "poolSettings.maxConnections",
            message: "must be at least 1".to_string(),
        });
    }

    Ok(Configuration {
        schema: parsed_config.schema.filter(|schema| !schema.trim().is_empty()),
        default_results_per_page: parsed_config.pagination.default_results_per_page,
        pool_settings: parsed_config.pool_settings,
        connection_uri,
    })
}
