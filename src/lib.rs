pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::UtilkitConfig;

pub use app::{render, CallContext, Category, Dispatcher};
pub use crate::core::{array, color, crypto, date, fs, misc, number, object, string, url, validate};
pub use domain::{FileStats, Hsl, ParsedUrl, PasswordHash, Rgb};
pub use utils::error::{Result, UtilkitError};

/// Every helper function and value type in one glob import.
pub mod prelude {
    pub use crate::core::array::*;
    pub use crate::core::color::*;
    pub use crate::core::crypto::*;
    pub use crate::core::date::*;
    pub use crate::core::fs::*;
    pub use crate::core::misc::*;
    pub use crate::core::number::*;
    pub use crate::core::object::*;
    pub use crate::core::string::*;
    pub use crate::core::url::*;
    pub use crate::core::validate::*;
    pub use crate::domain::{FileStats, Hsl, ParsedUrl, PasswordHash, Rgb};
    pub use crate::utils::error::UtilkitError;
}
