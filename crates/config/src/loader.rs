use crate::{ConfigError, ConverterConfig, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
pub const CONFIG_FILES: &[&str] = &[
    ".api2postmanrc.yml",
    ".api2postmanrc.yaml",
    ".api2postmanrc.json",
    ".api2postmanrc",
    "api2postman.config.yml",
    "api2postman.config.yaml",
    "api2postman.config.json",
];

/// Find a config file by walking up the directory tree from the given start directory.
/// Returns the path to the config file if found.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load a converter config from the specified path.
/// Automatically detects the format based on file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<ConverterConfig> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::info!(empty = config.is_empty(), "Config loaded successfully");
    Ok(config)
}

/// Load a converter config from a string.
/// The path is used for error messages and format detection.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<ConverterConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");

    tracing::debug!(extension, file_name, "Detecting config format");

    let config = match extension {
        "yml" | "yaml" => parse_yaml(contents, path)?,
        "json" => parse_json(contents, path)?,
        "" if file_name == ".api2postmanrc" => {
            tracing::trace!("Trying YAML then JSON for .api2postmanrc");
            parse_yaml(contents, path).or_else(|_| parse_json(contents, path))?
        }
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    config.validate().map_err(|message| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    })?;

    Ok(config)
}

/// Parse YAML configuration. An empty file is an empty config.
fn parse_yaml(contents: &str, path: &Path) -> Result<ConverterConfig> {
    if contents.trim().is_empty() {
        return Ok(ConverterConfig::default());
    }
    serde_yaml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

/// Parse JSON configuration
fn parse_json(contents: &str, path: &Path) -> Result<ConverterConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(suffix).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_yaml() {
        let file = write_temp(
            ".yml",
            "graphql:\n  endpoint: https://api.example.com/graphql\n  output: gql.json\n",
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.graphql.output.as_deref(), Some("gql.json"));
        assert_eq!(config.raml.output, None);
    }

    #[test]
    fn test_load_json() {
        let file = write_temp(
            ".json",
            r#"{"raml": {"baseUri": "https://api.example.com/v2", "collectionName": "V2"}}"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.raml.collection_name.as_deref(), Some("V2"));
    }

    #[test]
    fn test_load_empty_yaml() {
        let file = write_temp(".yaml", "");
        assert!(load_config(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_rc_file_without_extension() {
        let temp_dir = tempfile::tempdir().unwrap();
        let yaml_rc = temp_dir.path().join(".api2postmanrc");
        fs::write(&yaml_rc, "raml:\n  output: from-yaml.json\n").unwrap();
        let config = load_config(&yaml_rc).unwrap();
        assert_eq!(config.raml.output.as_deref(), Some("from-yaml.json"));

        fs::write(&yaml_rc, r#"{"raml": {"output": "from-json.json"}}"#).unwrap();
        let config = load_config(&yaml_rc).unwrap();
        assert_eq!(config.raml.output.as_deref(), Some("from-json.json"));
    }

    #[test]
    fn test_unsupported_format() {
        let result = load_config_from_str("[graphql]", Path::new("api2postman.toml"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_validation_error_names_path_and_key() {
        let file = write_temp(".yml", "graphql:\n  endpoint: localhost/graphql\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        let message = err.to_string();
        assert!(message.contains(&file.path().display().to_string()));
        assert!(message.contains("graphql.endpoint"));
    }

    #[test]
    fn test_malformed_yaml() {
        let file = write_temp(".yml", "graphql: [unclosed\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("YAML parse error"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = load_config(&temp_dir.path().join("missing.yml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(".api2postmanrc.yml");
        fs::write(&config_path, "graphql: {}").unwrap();

        let found = find_config(temp_dir.path()).unwrap();
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("api2postman.config.json");
        fs::write(&config_path, "{}").unwrap();

        let sub_dir = temp_dir.path().join("schemas").join("v1");
        fs::create_dir_all(&sub_dir).unwrap();

        let found = find_config(&sub_dir).unwrap();
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_config_file_priority() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(".api2postmanrc.yml"), "raml: {}").unwrap();
        fs::write(temp_dir.path().join("api2postman.config.json"), "{}").unwrap();

        let found = find_config(temp_dir.path()).unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), ".api2postmanrc.yml");
    }
}
