//! Value objects returned by the helper categories. No behavior lives here.

pub mod model;

pub use model::{FileStats, Hsl, ParsedUrl, PasswordHash, Rgb};
