use crate::app::registry::CallContext;
use crate::core::crypto::{HashOptions, DEFAULT_ITERATIONS, DEFAULT_KEY_LENGTH, DEFAULT_SALT_LENGTH};
use crate::utils::error::{Result, UtilkitError};
use crate::utils::validation::{validate_one_of, validate_positive_number, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub const CONFIG_ENV_VAR: &str = "UTILKIT_CONFIG";

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var regex is valid"));

/// Optional settings file. Every section and field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtilkitConfig {
    pub output: OutputConfig,
    pub crypto: CryptoConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON results.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    pub iterations: u32,
    pub key_length: usize,
    pub salt_length: usize,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            key_length: DEFAULT_KEY_LENGTH,
            salt_length: DEFAULT_SALT_LENGTH,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

impl UtilkitConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| UtilkitError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| UtilkitError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Loads `explicit` if given, else the file named by `UTILKIT_CONFIG`,
    /// else the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => std::env::var_os(CONFIG_ENV_VAR)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        };

        match path {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                let config = Self::from_file(&path)?;
                config.validate()?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Replaces `${NAME}` with the environment variable's value; unknown
    /// variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn hash_options(&self) -> HashOptions {
        HashOptions {
            iterations: self.crypto.iterations,
            key_length: self.crypto.key_length,
            salt_length: self.crypto.salt_length,
        }
    }

    pub fn call_context(&self) -> CallContext {
        CallContext {
            hash_options: self.hash_options(),
        }
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.level.as_deref()
    }
}

impl Validate for UtilkitConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_number("crypto.iterations", self.crypto.iterations as usize, 1)?;
        validate_range("crypto.key_length", self.crypto.key_length, 1, 1024)?;
        validate_range("crypto.salt_length", self.crypto.salt_length, 1, 1024)?;

        if let Some(level) = &self.logging.level {
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_file_gives_defaults() {
        let config = UtilkitConfig::from_toml_str("").unwrap();
        assert_eq!(config, UtilkitConfig::default());
        assert!(config.output.pretty);
        assert_eq!(config.hash_options(), HashOptions::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_all_sections() {
        let toml_content = r#"
[output]
pretty = false

[crypto]
iterations = 1000
key_length = 32

[logging]
level = "debug"
"#;

        let config = UtilkitConfig::from_toml_str(toml_content).unwrap();
        assert!(!config.output.pretty);
        assert_eq!(config.crypto.iterations, 1000);
        assert_eq!(config.crypto.key_length, 32);
        assert_eq!(config.crypto.salt_length, DEFAULT_SALT_LENGTH);
        assert_eq!(config.log_level(), Some("debug"));
        assert_eq!(config.call_context().hash_options.iterations, 1000);
    }

    #[test]
    fn env_var_substitution() {
        std::env::set_var("UTILKIT_TEST_LOG_LEVEL", "trace");

        let toml_content = r#"
[logging]
level = "${UTILKIT_TEST_LOG_LEVEL}"
"#;

        let config = UtilkitConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.log_level(), Some("trace"));

        std::env::remove_var("UTILKIT_TEST_LOG_LEVEL");
    }

    #[test]
    fn unknown_variables_are_left_alone() {
        let config =
            UtilkitConfig::from_toml_str("[logging]\nlevel = \"${UTILKIT_SURELY_UNSET_VAR}\"\n")
                .unwrap();
        assert_eq!(config.log_level(), Some("${UTILKIT_SURELY_UNSET_VAR}"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_bad_values() {
        let config = UtilkitConfig::from_toml_str("[crypto]\niterations = 0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(UtilkitError::InvalidConfigValueError { .. })
        ));

        let config = UtilkitConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = UtilkitConfig::from_toml_str("[output\npretty = ").unwrap_err();
        assert!(matches!(err, UtilkitError::ConfigError { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[crypto]\nsalt_length = 8\n")
            .unwrap();

        let config = UtilkitConfig::load(Some(temp_file.path())).unwrap();
        assert_eq!(config.crypto.salt_length, 8);
    }
}
