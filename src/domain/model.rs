use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Hue in degrees `[0, 360)`, saturation and lightness in percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Components of an absolute URL, named after the WHATWG `URL` attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedUrl {
    pub href: String,
    /// Scheme including the trailing colon, e.g. `https:`.
    pub protocol: String,
    /// Hostname plus `:port` when a non-default port is present.
    pub host: String,
    pub hostname: String,
    pub port: Option<u16>,
    pub pathname: String,
    /// Query string including the leading `?`, empty when absent.
    pub search: String,
    /// Fragment including the leading `#`, empty when absent.
    pub hash: String,
    pub origin: String,
    pub query: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordHash {
    pub salt: String,
    pub hash: String,
    pub iterations: u32,
    pub key_length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    pub size: u64,
    pub is_file: bool,
    pub is_dir: bool,
    pub modified: Option<DateTime<Utc>>,
    pub created: Option<DateTime<Utc>>,
}
