//! The helper functions themselves, one module per category. Everything here
//! is usable as a library without the command-line dispatcher.

pub mod array;
pub mod color;
pub mod crypto;
pub mod date;
pub mod fs;
pub mod misc;
pub mod number;
pub mod object;
pub mod string;
pub mod url;
pub mod validate;
