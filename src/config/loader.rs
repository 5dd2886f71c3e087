//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::{AppConfig, SecretKey};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the signing key.
pub const SECRET_KEY_VAR: &str = "SECRET_KEY";
/// Overrides `listener.bind_address`.
pub const BIND_ADDRESS_VAR: &str = "API_BIND_ADDRESS";
/// Overrides `storage.database_url`.
pub const DATABASE_URL_VAR: &str = "API_DATABASE_URL";
/// Overrides `files.base_dir`.
pub const FILES_BASE_DIR_VAR: &str = "API_FILES_BASE_DIR";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Deserialize a TOML string without validating it.
fn deserialize_config(content: &str) -> Result<AppConfig, ConfigError> {
    toml::from_str(content).map_err(ConfigError::Parse)
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    deserialize_config(&content)
}

/// Parse and validate configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config = deserialize_config(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Build the startup configuration: file (or defaults), then environment
/// overrides, then validation of the merged result.
pub fn load_startup_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    merge_startup_config(path, |key| std::env::var(key).ok())
}

fn merge_startup_config<F>(path: Option<&Path>, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = match path {
        Some(path) => read_config(path)?,
        None => AppConfig::default(),
    };
    let config = apply_env_overrides(config, lookup);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables.
///
/// Empty values are ignored.
pub fn apply_env_overrides<F>(mut config: AppConfig, lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(key) = read(SECRET_KEY_VAR) {
        config.secret_key = SecretKey::new(key);
    }
    if let Some(addr) = read(BIND_ADDRESS_VAR) {
        config.listener.bind_address = addr;
    }
    if let Some(url) = read(DATABASE_URL_VAR) {
        config.storage.database_url = url;
    }
    if let Some(dir) = read(FILES_BASE_DIR_VAR) {
        config.files.base_dir = PathBuf::from(dir);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_partial_file_fills_defaults() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:8000"

            [files]
            base_dir = "/srv/data"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:8000");
        assert_eq!(config.files.base_dir, PathBuf::from("/srv/data"));
        assert_eq!(config.timeouts.request_secs, 30);
        assert!(config.secret_key.is_placeholder());
    }

    #[test]
    fn test_secret_key_is_not_read_from_file() {
        let config = parse_config("secret_key = \"from-file\"\n");
        // Unknown keys are ignored, the placeholder stays.
        assert!(config.unwrap().secret_key.is_placeholder());
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        let err = parse_config("[timeouts]\nrequest_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
        assert!(err.to_string().contains("timeouts.request_secs"));
    }

    #[test]
    fn test_parse_rejects_malformed_toml() {
        assert!(matches!(parse_config("[listener"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (SECRET_KEY_VAR, "s3cr3t"),
            (DATABASE_URL_VAR, "sqlite://other.db"),
            (FILES_BASE_DIR_VAR, ""),
        ]);
        let config = apply_env_overrides(AppConfig::default(), |k| {
            env.get(k).map(|v| v.to_string())
        });

        assert_eq!(config.secret_key.expose(), "s3cr3t");
        assert_eq!(config.storage.database_url, "sqlite://other.db");
        // Empty override leaves the default in place.
        assert_eq!(config.files.base_dir, PathBuf::from("/app/data"));
    }

    #[test]
    fn test_env_override_replaces_invalid_file_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.toml");
        fs::write(&path, "[listener]\nbind_address = \"${PORT}\"\n").unwrap();

        let config = merge_startup_config(Some(&path), |k| {
            (k == BIND_ADDRESS_VAR).then(|| "127.0.0.1:8080".to_string())
        })
        .unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");

        // Without the override the merged result still fails validation.
        let err = merge_startup_config(Some(&path), |_| None).unwrap_err();
        assert!(err.to_string().contains("listener.bind_address"));
    }

    #[test]
    fn test_secret_key_debug_is_redacted() {
        let config = apply_env_overrides(AppConfig::default(), |k| {
            (k == SECRET_KEY_VAR).then(|| "hunter2".to_string())
        });
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
