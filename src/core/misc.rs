//! Everything that does not fit another category: ids, JSON/CSV conversion,
//! the clipboard and sleeping.

use crate::utils::error::{Result, UtilkitError};
use rand::distributions::{Alphanumeric, Uniform};
use rand::Rng;
use serde_json::{Map, Value};
use std::time::Duration;

pub async fn sleep(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Places `text` on the system clipboard. `false` when no clipboard is
/// reachable or the crate was built without the `clipboard` feature.
#[cfg(feature = "clipboard")]
pub async fn copy_to_clipboard(text: &str) -> bool {
    let text = text.to_string();
    let result = tokio::task::spawn_blocking(move || {
        arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text))
    })
    .await;

    match result {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            tracing::debug!("Clipboard write failed: {}", e);
            false
        }
        Err(e) => {
            tracing::debug!("Clipboard task failed: {}", e);
            false
        }
    }
}

#[cfg(not(feature = "clipboard"))]
pub async fn copy_to_clipboard(_text: &str) -> bool {
    tracing::debug!("Clipboard support not compiled in");
    false
}

/// Random alphanumeric identifier of `len` characters.
pub fn generate_id(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Random string of `len` characters drawn from `charset`; an empty charset
/// gives an empty string.
pub fn random_string(len: usize, charset: &str) -> String {
    let chars: Vec<char> = charset.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    let dist = Uniform::from(0..chars.len());
    let mut rng = rand::thread_rng();
    (0..len).map(|_| chars[rng.sample(dist)]).collect()
}

pub fn type_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn parse_json(s: &str) -> Option<Value> {
    match serde_json::from_str(s) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("parse_json failed: {}", e);
            None
        }
    }
}

/// Converts CSV text with a header row into an array of objects whose values
/// are all strings.
pub fn csv_to_json(text: &str) -> Option<Value> {
    let parsed = (|| -> Result<Vec<Value>> {
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let headers = reader.headers()?.clone();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row: Map<String, Value> = headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.to_string(), Value::String(v.to_string())))
                .collect();
            rows.push(Value::Object(row));
        }
        Ok(rows)
    })();

    match parsed {
        Ok(rows) => Some(Value::Array(rows)),
        Err(e) => {
            tracing::debug!("csv_to_json failed: {}", e);
            None
        }
    }
}

fn csv_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Writes an array of objects as CSV. The header is the union of all keys in
/// first-seen order; missing cells are empty. `None` if any row is not an
/// object. No columns (no rows, or only empty objects) gives empty output.
pub fn json_to_csv(rows: &[Value]) -> Option<String> {
    let mut headers: Vec<String> = Vec::new();
    for row in rows {
        for key in row.as_object()?.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    if headers.is_empty() {
        return Some(String::new());
    }

    let written = (|| -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&headers)?;
        for row in rows {
            writer.write_record(headers.iter().map(|h| csv_cell(row.get(h))))?;
        }
        writer
            .into_inner()
            .map_err(|e| UtilkitError::IoError(e.into_error()))
    })();

    match written {
        Ok(bytes) => String::from_utf8(bytes).ok(),
        Err(e) => {
            tracing::debug!("json_to_csv failed: {}", e);
            None
        }
    }
}
