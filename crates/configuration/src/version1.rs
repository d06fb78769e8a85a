//! The on-disk configuration format.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{ParseConfigurationError, WriteParsedConfigurationError};
use crate::values::{ConnectionUri, PaginationSettings, PoolSettings};

const CURRENT_VERSION: u32 = 1;
pub const CONFIGURATION_FILENAME: &str = "configuration.json";
const CONFIGURATION_JSONSCHEMA_FILENAME: &str = "schema.json";

/// The configuration as stored in `configuration.json`. Secrets are still
/// unresolved; see 'make_runtime_configuration'.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConfiguration {
    // format version, checked on parse
    pub version: u32,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default)]
    #[serde(skip_serializing_if = "PaginationSettings::is_default")]
    pub pagination: PaginationSettings,
    #[serde(default)]
    #[serde(skip_serializing_if = "PoolSettings::is_default")]
    pub pool_settings: PoolSettings,
    #[serde(default)]
    pub connection_uri: ConnectionUri,
}

impl ParsedConfiguration {
    pub fn initial() -> Self {
        ParsedConfiguration {
            version: CURRENT_VERSION,
            schema: None,
            pagination: PaginationSettings::default(),
            pool_settings: PoolSettings::default(),
            connection_uri: ConnectionUri::default(),
        }
    }
}

/// Parse the configuration format from a directory. A directory without a
/// configuration file yields the initial configuration.
pub async fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);

    let configuration_file_contents = match fs::read_to_string(&configuration_file).await {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(
                path = %configuration_file.display(),
                "no configuration file, using defaults"
            );
            return Ok(ParsedConfiguration::initial());
        }
        Err(err) => {
            return Err(ParseConfigurationError::IoErrorButStringified(format!(
                "{}: {}",
                &configuration_file.display(),
                err
            )))
        }
    };

    let parsed_config: ParsedConfiguration = serde_json::from_str(&configuration_file_contents)
        .map_err(|error| ParseConfigurationError::ParseError {
            file_path: configuration_file.clone(),
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        })?;

    if parsed_config.version != CURRENT_VERSION {
        return Err(ParseConfigurationError::UnsupportedVersion(
            parsed_config.version,
            CURRENT_VERSION,
        ));
    }

    Ok(parsed_config)
}

/// Write the parsed configuration and its JSON schema into a directory on disk.
pub async fn write_parsed_configuration(
    parsed_config: ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    let configuration_file = out_dir.as_ref().to_owned().join(CONFIGURATION_FILENAME);
    fs::create_dir_all(out_dir.as_ref()).await?;

    // create the configuration file
    fs::write(
        configuration_file,
        serde_json::to_string_pretty(&parsed_config)
            .map_err(|e| WriteParsedConfigurationError::IoError(e.into()))?
            + "\n",
    )
    .await?;

    // create the jsonschema file
    let configuration_jsonschema_file_path = out_dir
        .as_ref()
        .to_owned()
        .join(CONFIGURATION_JSONSCHEMA_FILENAME);

    let output = schemars::schema_for!(ParsedConfiguration);
    fs::write(
        &configuration_jsonschema_file_path,
        serde_json::to_string_pretty(&output)
            .map_err(|e| WriteParsedConfigurationError::IoError(e.into()))?
            + "\n",
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::Secret;

    #[tokio::test]
    async fn missing_file_yields_the_initial_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let parsed = parse_configuration(dir.path()).await.unwrap();
        similar_asserts::assert_eq!(parsed, ParsedConfiguration::initial());
    }

    #[tokio::test]
    async fn written_configuration_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let parsed = ParsedConfiguration {
            schema: Some("spartanhotel".to_string()),
            connection_uri: ConnectionUri::from("mysql://localhost/spartanhotel"),
            ..ParsedConfiguration::initial()
        };
        write_parsed_configuration(parsed.clone(), dir.path())
            .await
            .unwrap();
        assert!(dir.path().join(CONFIGURATION_JSONSCHEMA_FILENAME).exists());
        similar_asserts::assert_eq!(parse_configuration(dir.path()).await.unwrap(), parsed);
    }

    #[tokio::test]
    async fn omitted_settings_take_their_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIGURATION_FILENAME),
            r#"{ "version": 1, "poolSettings": { "maxConnections": 4 }, "connectionUri": { "variable": "DB_URL" } }"#,
        )
        .await
        .unwrap();

        let parsed = parse_configuration(dir.path()).await.unwrap();
        assert_eq!(parsed.pool_settings.max_connections, 4);
        assert_eq!(parsed.pool_settings.pool_timeout, 30);
        assert_eq!(parsed.pagination.default_results_per_page, 10);
        assert_eq!(
            parsed.connection_uri,
            ConnectionUri(Secret::FromEnvironment {
                variable: crate::environment::Variable::new("DB_URL")
            })
        );
    }

    #[tokio::test]
    async fn other_versions_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIGURATION_FILENAME), r#"{ "version": 2 }"#)
            .await
            .unwrap();
        assert!(matches!(
            parse_configuration(dir.path()).await,
            Err(ParseConfigurationError::UnsupportedVersion(2, 1))
        ));
    }
}
