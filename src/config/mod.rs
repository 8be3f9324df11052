pub mod toml_config;

pub use toml_config::UtilkitConfig;

#[cfg(feature = "cli")]
use crate::utils::error::{Result, UtilkitError};
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

/// Flags go before the function name; everything after it is passed to the
/// function untouched, including values that start with `-`.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "utilkit")]
#[command(about = "Run string, date, array, object, number and other helpers from a shell")]
#[command(version)]
pub struct CliConfig {
    /// Function to run, or `list` / `help [category]`
    pub function: Option<String>,

    /// Arguments for the function, in declaration order
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// TOML configuration file (falls back to $UTILKIT_CONFIG)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(long, help = "Print JSON results on a single line")]
    pub compact: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            if !path.is_file() {
                return Err(UtilkitError::ConfigError {
                    message: format!("config file not found: {}", path.display()),
                });
            }
        }
        if let Some(function) = &self.function {
            if function.trim().is_empty() {
                return Err(UtilkitError::invalid_input("function", "name is empty"));
            }
        }
        Ok(())
    }
}
