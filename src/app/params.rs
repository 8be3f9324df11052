//! Typed parameter declarations and the coercion of raw command-line text
//! into JSON values.

use crate::core::date::parse_date;
use crate::utils::error::{Result, UtilkitError};
use chrono::{DateTime, Utc};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Upper bound for generated lengths: padding, random output and ranges.
pub const MAX_LENGTH: usize = 1 << 20;

/// Upper bound for fraction digits in formatted numbers.
pub const MAX_DECIMALS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Number,
    Integer,
    Boolean,
    /// JSON when the text parses as JSON, otherwise the text itself.
    Any,
    Array,
    Object,
    Date,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Any => "json",
            Self::Array => "array",
            Self::Object => "object",
            Self::Date => "date",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
    /// Raw text coerced like a user argument when the argument is omitted.
    pub default: Option<&'static str>,
}

impl Param {
    pub fn required(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            default: None,
        }
    }

    pub fn optional(name: &'static str, kind: ParamKind, default: &'static str) -> Self {
        Self {
            name,
            kind,
            default: Some(default),
        }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    fn reject(&self, raw: &str) -> UtilkitError {
        UtilkitError::ArgumentError {
            param: self.name.to_string(),
            kind: self.kind.to_string(),
            value: raw.to_string(),
        }
    }

    /// Reads `raw` as this parameter's declared kind. A `string` parameter
    /// never reinterprets its text, so `"123"` stays a string.
    pub fn coerce(&self, raw: &str) -> Result<Value> {
        match self.kind {
            ParamKind::String => Ok(Value::String(raw.to_string())),
            ParamKind::Number => raw
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| self.reject(raw)),
            ParamKind::Integer => raw
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| self.reject(raw)),
            ParamKind::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "y" => Ok(Value::Bool(true)),
                "false" | "0" | "no" | "n" => Ok(Value::Bool(false)),
                _ => Err(self.reject(raw)),
            },
            ParamKind::Any => {
                Ok(serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())))
            }
            ParamKind::Array => match serde_json::from_str(raw) {
                Ok(Value::Array(items)) => Ok(Value::Array(items)),
                _ => Err(self.reject(raw)),
            },
            ParamKind::Object => match serde_json::from_str(raw) {
                Ok(Value::Object(map)) => Ok(Value::Object(map)),
                _ => Err(self.reject(raw)),
            },
            ParamKind::Date => {
                let parsed = if raw.trim().eq_ignore_ascii_case("now") {
                    Some(Utc::now())
                } else {
                    parse_date(raw)
                };
                parsed
                    .map(|d| Value::String(d.to_rfc3339()))
                    .ok_or_else(|| self.reject(raw))
            }
        }
    }
}

/// Coerced positional arguments, one per declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    function: &'static str,
    values: Vec<Value>,
}

impl Args {
    pub fn new(function: &'static str, values: Vec<Value>) -> Self {
        Self { function, values }
    }

    fn mismatch(&self, index: usize, expected: &str) -> UtilkitError {
        UtilkitError::ArgumentError {
            param: format!("{}#{}", self.function, index + 1),
            kind: expected.to_string(),
            value: self
                .values
                .get(index)
                .map(Value::to_string)
                .unwrap_or_else(|| "<missing>".to_string()),
        }
    }

    pub fn value(&self, index: usize) -> Result<&Value> {
        self.values.get(index).ok_or_else(|| self.mismatch(index, "any"))
    }

    pub fn str(&self, index: usize) -> Result<&str> {
        self.value(index)?
            .as_str()
            .ok_or_else(|| self.mismatch(index, "string"))
    }

    pub fn f64(&self, index: usize) -> Result<f64> {
        self.value(index)?
            .as_f64()
            .ok_or_else(|| self.mismatch(index, "number"))
    }

    pub fn i64(&self, index: usize) -> Result<i64> {
        self.value(index)?
            .as_i64()
            .ok_or_else(|| self.mismatch(index, "integer"))
    }

    pub fn u64(&self, index: usize) -> Result<u64> {
        self.value(index)?
            .as_u64()
            .ok_or_else(|| self.mismatch(index, "non-negative integer"))
    }

    pub fn usize(&self, index: usize) -> Result<usize> {
        usize::try_from(self.u64(index)?).map_err(|_| self.mismatch(index, "usize"))
    }

    /// A size argument no larger than `max`. Larger values are an input
    /// error, not an allocation attempt.
    pub fn bounded(&self, index: usize, max: usize) -> Result<usize> {
        let n = self.usize(index)?;
        if n > max {
            return Err(UtilkitError::invalid_input(
                format!("{}#{}", self.function, index + 1),
                format!("{} exceeds the limit of {}", n, max),
            ));
        }
        Ok(n)
    }

    pub fn u32(&self, index: usize) -> Result<u32> {
        u32::try_from(self.u64(index)?).map_err(|_| self.mismatch(index, "u32"))
    }

    pub fn u8(&self, index: usize) -> Result<u8> {
        u8::try_from(self.u64(index)?).map_err(|_| self.mismatch(index, "0-255"))
    }

    pub fn i32(&self, index: usize) -> Result<i32> {
        i32::try_from(self.i64(index)?).map_err(|_| self.mismatch(index, "i32"))
    }

    pub fn bool(&self, index: usize) -> Result<bool> {
        self.value(index)?
            .as_bool()
            .ok_or_else(|| self.mismatch(index, "boolean"))
    }

    pub fn array(&self, index: usize) -> Result<&Vec<Value>> {
        self.value(index)?
            .as_array()
            .ok_or_else(|| self.mismatch(index, "array"))
    }

    pub fn object(&self, index: usize) -> Result<&Map<String, Value>> {
        self.value(index)?
            .as_object()
            .ok_or_else(|| self.mismatch(index, "object"))
    }

    pub fn date(&self, index: usize) -> Result<DateTime<Utc>> {
        parse_date(self.str(index)?).ok_or_else(|| self.mismatch(index, "date"))
    }

    pub fn char(&self, index: usize) -> Result<char> {
        let s = self.str(index)?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(self.mismatch(index, "single character")),
        }
    }

    /// Array elements as strings; non-string elements use their JSON text.
    pub fn strings(&self, index: usize) -> Result<Vec<String>> {
        Ok(self
            .array(index)?
            .iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect())
    }

    /// Object entries as string pairs, for query parameters.
    pub fn pairs(&self, index: usize) -> Result<Vec<(String, String)>> {
        Ok(self
            .object(index)?
            .iter()
            .map(|(k, v)| {
                let value = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), value)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_params_keep_numeric_text() {
        let p = Param::required("s", ParamKind::String);
        assert_eq!(p.coerce("123").unwrap(), json!("123"));
    }

    #[test]
    fn numbers_and_integers() {
        let n = Param::required("n", ParamKind::Number);
        assert_eq!(n.coerce(" 1.5 ").unwrap(), json!(1.5));
        assert!(n.coerce("abc").is_err());
        assert!(n.coerce("NaN").is_err());

        let i = Param::required("i", ParamKind::Integer);
        assert_eq!(i.coerce("-4").unwrap(), json!(-4));
        assert!(i.coerce("4.5").is_err());
    }

    #[test]
    fn booleans() {
        let b = Param::required("b", ParamKind::Boolean);
        assert_eq!(b.coerce("YES").unwrap(), json!(true));
        assert_eq!(b.coerce("0").unwrap(), json!(false));
        assert!(b.coerce("maybe").is_err());
    }

    #[test]
    fn structured_kinds() {
        let any = Param::required("v", ParamKind::Any);
        assert_eq!(any.coerce("[1,2]").unwrap(), json!([1, 2]));
        assert_eq!(any.coerce("hello").unwrap(), json!("hello"));
        assert_eq!(any.coerce("42").unwrap(), json!(42));

        let arr = Param::required("a", ParamKind::Array);
        assert!(arr.coerce("{}").is_err());
        let obj = Param::required("o", ParamKind::Object);
        assert_eq!(obj.coerce(r#"{"a":1}"#).unwrap(), json!({"a": 1}));
        assert!(obj.coerce("[1]").is_err());
    }

    #[test]
    fn dates_are_normalized() {
        let d = Param::required("d", ParamKind::Date);
        assert_eq!(d.coerce("2024-01-02").unwrap(), json!("2024-01-02T00:00:00+00:00"));
        assert!(d.coerce("yesterday").is_err());
    }

    #[test]
    fn args_accessors() {
        let args = Args::new(
            "demo",
            vec![json!("x"), json!(3), json!(["a", 1]), json!({"k": 2})],
        );
        assert_eq!(args.char(0).unwrap(), 'x');
        assert_eq!(args.usize(1).unwrap(), 3);
        assert_eq!(args.strings(2).unwrap(), vec!["a".to_string(), "1".to_string()]);
        assert_eq!(args.pairs(3).unwrap(), vec![("k".to_string(), "2".to_string())]);
        assert!(args.str(1).is_err());
        assert!(args.value(9).is_err());
    }

    #[test]
    fn bounded_sizes() {
        let args = Args::new("demo", vec![json!(16), json!(u64::MAX), json!(-1)]);
        assert_eq!(args.bounded(0, 16).unwrap(), 16);

        let err = args.bounded(1, MAX_LENGTH).unwrap_err();
        assert!(matches!(err, UtilkitError::InvalidInput { ref field, .. } if field == "demo#2"));
        assert_eq!(err.exit_code(), 1);

        assert!(matches!(
            args.bounded(2, MAX_LENGTH),
            Err(UtilkitError::ArgumentError { .. })
        ));
    }
}
