//! The table of every function reachable from the command line, with its
//! category and typed parameter list.

use crate::app::params::{Args, Param, ParamKind, MAX_DECIMALS, MAX_LENGTH};
use crate::core::crypto::HashOptions;
use crate::core::{array, color, crypto, date, fs, misc, number, object, string, url, validate};
use crate::domain::model::{Hsl, PasswordHash, Rgb};
use crate::utils::error::Result;
use heck::ToLowerCamelCase;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::LazyLock;

use ParamKind::{Any, Array, Boolean, Date, Integer, Number, Object, String as Str};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    String,
    Date,
    Array,
    Object,
    Number,
    Color,
    Url,
    Crypto,
    Fs,
    Validation,
    Misc,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::String,
        Category::Date,
        Category::Array,
        Category::Object,
        Category::Number,
        Category::Color,
        Category::Url,
        Category::Crypto,
        Category::Fs,
        Category::Validation,
        Category::Misc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Date => "date",
            Self::Array => "array",
            Self::Object => "object",
            Self::Number => "number",
            Self::Color => "color",
            Self::Url => "url",
            Self::Crypto => "crypto",
            Self::Fs => "fs",
            Self::Validation => "validation",
            Self::Misc => "misc",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings a handler may read besides its arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallContext {
    pub hash_options: HashOptions,
}

pub type IoFuture = Pin<Box<dyn Future<Output = Value> + Send>>;
pub type PureFn = fn(&CallContext, &Args) -> Result<Value>;
/// Validates arguments synchronously, then hands back the I/O to await.
pub type IoFn = fn(&CallContext, &Args) -> Result<IoFuture>;

#[derive(Clone, Copy)]
pub enum Handler {
    Pure(PureFn),
    Io(IoFn),
    /// Single string argument, boolean answer.
    Predicate(fn(&str) -> bool),
}

pub struct FunctionSpec {
    pub name: &'static str,
    pub category: Category,
    pub summary: &'static str,
    pub params: Vec<Param>,
    pub handler: Handler,
}

impl FunctionSpec {
    pub fn required_count(&self) -> usize {
        self.params.iter().filter(|p| p.is_required()).count()
    }

    /// `name(a: string, b: integer = 2)`
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| match p.default {
                Some(default) => format!("{}: {} = {:?}", p.name, p.kind, default),
                None => format!("{}: {}", p.name, p.kind),
            })
            .collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

impl fmt::Debug for FunctionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionSpec")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

const ALPHANUMERIC: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

fn req(name: &'static str, kind: ParamKind) -> Param {
    Param::required(name, kind)
}

fn opt(name: &'static str, kind: ParamKind, default: &'static str) -> Param {
    Param::optional(name, kind, default)
}

fn pure(
    name: &'static str,
    category: Category,
    summary: &'static str,
    params: Vec<Param>,
    handler: PureFn,
) -> FunctionSpec {
    FunctionSpec {
        name,
        category,
        summary,
        params,
        handler: Handler::Pure(handler),
    }
}

fn io(
    name: &'static str,
    category: Category,
    summary: &'static str,
    params: Vec<Param>,
    handler: IoFn,
) -> FunctionSpec {
    FunctionSpec {
        name,
        category,
        summary,
        params,
        handler: Handler::Io(handler),
    }
}

fn predicate(name: &'static str, summary: &'static str, check: fn(&str) -> bool) -> FunctionSpec {
    FunctionSpec {
        name,
        category: Category::Validation,
        summary,
        params: vec![req("value", Str)],
        handler: Handler::Predicate(check),
    }
}

fn deferred<F>(future: F) -> Result<IoFuture>
where
    F: Future<Output = Value> + Send + 'static,
{
    Ok(Box::pin(future))
}

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

fn string_functions() -> Vec<FunctionSpec> {
    use Category::String as C;
    vec![
        pure(
            "capitalize",
            C,
            "Upper-case the first letter, lower-case the rest",
            vec![req("s", Str)],
            |_, a| Ok(json!(string::capitalize(a.str(0)?))),
        ),
        pure(
            "camelCase",
            C,
            "Convert to camelCase",
            vec![req("s", Str)],
            |_, a| Ok(json!(string::camel_case(a.str(0)?))),
        ),
        pure(
            "pascalCase",
            C,
            "Convert to PascalCase",
            vec![req("s", Str)],
            |_, a| Ok(json!(string::pascal_case(a.str(0)?))),
        ),
        pure(
            "snakeCase",
            C,
            "Convert to snake_case",
            vec![req("s", Str)],
            |_, a| Ok(json!(string::snake_case(a.str(0)?))),
        ),
        pure(
            "kebabCase",
            C,
            "Convert to kebab-case",
            vec![req("s", Str)],
            |_, a| Ok(json!(string::kebab_case(a.str(0)?))),
        ),
        pure(
            "titleCase",
            C,
            "Convert to Title Case",
            vec![req("s", Str)],
            |_, a| Ok(json!(string::title_case(a.str(0)?))),
        ),
        pure(
            "constantCase",
            C,
            "Convert to CONSTANT_CASE",
            vec![req("s", Str)],
            |_, a| Ok(json!(string::constant_case(a.str(0)?))),
        ),
        pure(
            "slugify",
            C,
            "Lowercase, hyphen-delimited, URL-safe form",
            vec![req("s", Str)],
            |_, a| Ok(json!(string::slugify(a.str(0)?))),
        ),
        pure(
            "truncate",
            C,
            "Cut to a maximum length, ending with a suffix",
            vec![req("s", Str), req("length", Integer), opt("suffix", Str, "...")],
            |_, a| Ok(json!(string::truncate(a.str(0)?, a.usize(1)?, a.str(2)?))),
        ),
        pure(
            "padStart",
            C,
            "Pad on the left up to a length",
            vec![req("s", Str), req("length", Integer), opt("fill", Str, " ")],
            |_, a| Ok(json!(string::pad_start(a.str(0)?, a.bounded(1, MAX_LENGTH)?, a.str(2)?))),
        ),
        pure(
            "padEnd",
            C,
            "Pad on the right up to a length",
            vec![req("s", Str), req("length", Integer), opt("fill", Str, " ")],
            |_, a| Ok(json!(string::pad_end(a.str(0)?, a.bounded(1, MAX_LENGTH)?, a.str(2)?))),
        ),
        pure(
            "reverse",
            C,
            "Reverse the characters",
            vec![req("s", Str)],
            |_, a| Ok(json!(string::reverse(a.str(0)?))),
        ),
        pure(
            "wordCount",
            C,
            "Count whitespace-separated words",
            vec![req("s", Str)],
            |_, a| Ok(json!(string::word_count(a.str(0)?))),
        ),
        pure(
            "stripHtml",
            C,
            "Remove HTML tags",
            vec![req("s", Str)],
            |_, a| Ok(json!(string::strip_html(a.str(0)?))),
        ),
        pure(
            "escapeHtml",
            C,
            "Escape HTML special characters",
            vec![req("s", Str)],
            |_, a| Ok(json!(string::escape_html(a.str(0)?))),
        ),
        pure(
            "unescapeHtml",
            C,
            "Decode HTML entities produced by escapeHtml",
            vec![req("s", Str)],
            |_, a| Ok(json!(string::unescape_html(a.str(0)?))),
        ),
        pure(
            "mask",
            C,
            "Hide all but the last characters",
            vec![req("s", Str), opt("visible", Integer, "4"), opt("char", Str, "*")],
            |_, a| Ok(json!(string::mask(a.str(0)?, a.usize(1)?, a.char(2)?))),
        ),
        pure(
            "isPalindrome",
            C,
            "Alphanumeric, case-insensitive palindrome check",
            vec![req("s", Str)],
            |_, a| Ok(json!(string::is_palindrome(a.str(0)?))),
        ),
        pure(
            "levenshteinDistance",
            C,
            "Edit distance between two strings",
            vec![req("a", Str), req("b", Str)],
            |_, a| Ok(json!(string::levenshtein_distance(a.str(0)?, a.str(1)?))),
        ),
        pure(
            "similarity",
            C,
            "Edit-distance similarity in [0, 1]",
            vec![req("a", Str), req("b", Str)],
            |_, a| Ok(json!(string::similarity(a.str(0)?, a.str(1)?))),
        ),
    ]
}

fn date_functions() -> Vec<FunctionSpec> {
    use Category::Date as C;
    vec![
        pure(
            "parseDate",
            C,
            "Normalize a date string to RFC 3339, or null",
            vec![req("s", Str)],
            |_, a| to_json(date::parse_date(a.str(0)?)),
        ),
        pure(
            "formatDate",
            C,
            "Format with YYYY/MM/DD/HH/mm/ss/SSS tokens",
            vec![req("date", Date), opt("pattern", Str, "YYYY-MM-DD")],
            |_, a| Ok(json!(date::format_date(&a.date(0)?, a.str(1)?))),
        ),
        pure(
            "addDays",
            C,
            "Add (or subtract) days",
            vec![req("date", Date), req("days", Integer)],
            |_, a| to_json(date::add_days(&a.date(0)?, a.i64(1)?)?),
        ),
        pure(
            "addHours",
            C,
            "Add (or subtract) hours",
            vec![req("date", Date), req("hours", Integer)],
            |_, a| to_json(date::add_hours(&a.date(0)?, a.i64(1)?)?),
        ),
        pure(
            "addMinutes",
            C,
            "Add (or subtract) minutes",
            vec![req("date", Date), req("minutes", Integer)],
            |_, a| to_json(date::add_minutes(&a.date(0)?, a.i64(1)?)?),
        ),
        pure(
            "addMonths",
            C,
            "Add calendar months, clamping the day",
            vec![req("date", Date), req("months", Integer)],
            |_, a| to_json(date::add_months(&a.date(0)?, a.i32(1)?)?),
        ),
        pure(
            "addYears",
            C,
            "Add calendar years, clamping the day",
            vec![req("date", Date), req("years", Integer)],
            |_, a| to_json(date::add_years(&a.date(0)?, a.i32(1)?)?),
        ),
        pure(
            "diffDays",
            C,
            "Whole days from the first date to the second",
            vec![req("from", Date), req("to", Date)],
            |_, a| Ok(json!(date::diff_days(&a.date(0)?, &a.date(1)?))),
        ),
        pure(
            "startOfDay",
            C,
            "Midnight of the same day",
            vec![req("date", Date)],
            |_, a| to_json(date::start_of_day(&a.date(0)?)),
        ),
        pure(
            "endOfDay",
            C,
            "Last millisecond of the same day",
            vec![req("date", Date)],
            |_, a| to_json(date::end_of_day(&a.date(0)?)),
        ),
        pure(
            "startOfWeek",
            C,
            "Midnight of the preceding Monday",
            vec![req("date", Date)],
            |_, a| to_json(date::start_of_week(&a.date(0)?)),
        ),
        pure(
            "startOfMonth",
            C,
            "Midnight of the first of the month",
            vec![req("date", Date)],
            |_, a| to_json(date::start_of_month(&a.date(0)?)),
        ),
        pure(
            "endOfMonth",
            C,
            "Last millisecond of the month",
            vec![req("date", Date)],
            |_, a| to_json(date::end_of_month(&a.date(0)?)),
        ),
        pure(
            "isWeekend",
            C,
            "Saturday or Sunday",
            vec![req("date", Date)],
            |_, a| Ok(json!(date::is_weekend(&a.date(0)?))),
        ),
        pure(
            "isLeapYear",
            C,
            "Gregorian leap year check",
            vec![req("year", Integer)],
            |_, a| Ok(json!(date::is_leap_year(a.i32(0)?))),
        ),
        pure(
            "daysInMonth",
            C,
            "Number of days in a month",
            vec![req("year", Integer), req("month", Integer)],
            |_, a| Ok(json!(date::days_in_month(a.i32(0)?, a.u32(1)?)?)),
        ),
        pure(
            "timeAgo",
            C,
            "Relative description such as \"3 days ago\"",
            vec![req("date", Date), opt("now", Date, "now")],
            |_, a| Ok(json!(date::time_ago(&a.date(0)?, &a.date(1)?))),
        ),
    ]
}

fn array_functions() -> Vec<FunctionSpec> {
    use Category::Array as C;
    vec![
        pure(
            "unique",
            C,
            "Distinct elements in first-seen order",
            vec![req("items", Array)],
            |_, a| Ok(json!(array::unique(a.array(0)?))),
        ),
        pure(
            "chunk",
            C,
            "Split into groups of a fixed size",
            vec![req("items", Array), req("size", Integer)],
            |_, a| Ok(json!(array::chunk(a.array(0)?, a.usize(1)?)?)),
        ),
        pure(
            "flatten",
            C,
            "Flatten nested arrays",
            vec![req("items", Array), opt("depth", Integer, "1")],
            |_, a| Ok(json!(array::flatten(a.array(0)?, a.usize(1)?))),
        ),
        pure(
            "compact",
            C,
            "Drop null, false, 0 and empty strings",
            vec![req("items", Array)],
            |_, a| Ok(json!(array::compact(a.array(0)?))),
        ),
        pure(
            "shuffle",
            C,
            "Random permutation",
            vec![req("items", Array)],
            |_, a| Ok(json!(array::shuffle(a.array(0)?))),
        ),
        pure(
            "sample",
            C,
            "Random element, or null when empty",
            vec![req("items", Array)],
            |_, a| Ok(json!(array::sample(a.array(0)?))),
        ),
        pure(
            "groupBy",
            C,
            "Group objects by a key",
            vec![req("items", Array), req("key", Str)],
            |_, a| Ok(Value::Object(array::group_by(a.array(0)?, a.str(1)?))),
        ),
        pure(
            "sortBy",
            C,
            "Stable sort of objects by a key",
            vec![req("items", Array), req("key", Str), opt("descending", Boolean, "false")],
            |_, a| Ok(json!(array::sort_by(a.array(0)?, a.str(1)?, a.bool(2)?))),
        ),
        pure(
            "intersection",
            C,
            "Elements present in both arrays",
            vec![req("a", Array), req("b", Array)],
            |_, a| Ok(json!(array::intersection(a.array(0)?, a.array(1)?))),
        ),
        pure(
            "difference",
            C,
            "Elements of the first array missing from the second",
            vec![req("a", Array), req("b", Array)],
            |_, a| Ok(json!(array::difference(a.array(0)?, a.array(1)?))),
        ),
        pure(
            "union",
            C,
            "Distinct elements of both arrays",
            vec![req("a", Array), req("b", Array)],
            |_, a| Ok(json!(array::union(a.array(0)?, a.array(1)?))),
        ),
        pure(
            "range",
            C,
            "Integers from start (inclusive) to end (exclusive)",
            vec![req("start", Integer), req("end", Integer), opt("step", Integer, "1")],
            |_, a| Ok(json!(array::range(a.i64(0)?, a.i64(1)?, a.i64(2)?)?)),
        ),
    ]
}

fn object_functions() -> Vec<FunctionSpec> {
    use Category::Object as C;
    vec![
        pure(
            "deepMerge",
            C,
            "Recursively merge two objects, right side wins",
            vec![req("left", Object), req("right", Object)],
            |_, a| Ok(object::deep_merge(a.value(0)?, a.value(1)?)),
        ),
        pure(
            "deepClone",
            C,
            "Structural copy of a value",
            vec![req("value", Any)],
            |_, a| Ok(object::deep_clone(a.value(0)?)),
        ),
        pure(
            "flattenObject",
            C,
            "Collapse nesting into separator-joined keys",
            vec![req("object", Any), opt("separator", Str, ".")],
            |_, a| Ok(Value::Object(object::flatten_object(a.value(0)?, a.str(1)?))),
        ),
        pure(
            "unflattenObject",
            C,
            "Rebuild nesting from separator-joined keys",
            vec![req("object", Object), opt("separator", Str, ".")],
            |_, a| Ok(object::unflatten_object(a.object(0)?, a.str(1)?)),
        ),
        pure(
            "getPath",
            C,
            "Value at a dot path, or null",
            vec![req("object", Any), req("path", Str)],
            |_, a| Ok(object::get_path(a.value(0)?, a.str(1)?).cloned().unwrap_or(Value::Null)),
        ),
        pure(
            "setPath",
            C,
            "Write a value at a dot path and return the object",
            vec![req("object", Any), req("path", Str), req("value", Any)],
            |_, a| {
                let mut target = a.value(0)?.clone();
                object::set_path(&mut target, a.str(1)?, a.value(2)?.clone());
                Ok(target)
            },
        ),
        pure(
            "pick",
            C,
            "Keep only the listed keys",
            vec![req("object", Object), req("keys", Array)],
            |_, a| Ok(Value::Object(object::pick(a.object(0)?, &a.strings(1)?))),
        ),
        pure(
            "omit",
            C,
            "Drop the listed keys",
            vec![req("object", Object), req("keys", Array)],
            |_, a| Ok(Value::Object(object::omit(a.object(0)?, &a.strings(1)?))),
        ),
        pure(
            "isEmpty",
            C,
            "null, empty string, array or object",
            vec![req("value", Any)],
            |_, a| Ok(json!(object::is_empty(a.value(0)?))),
        ),
        pure(
            "deepEqual",
            C,
            "Structural equality",
            vec![req("a", Any), req("b", Any)],
            |_, a| Ok(json!(object::deep_equal(a.value(0)?, a.value(1)?))),
        ),
    ]
}

fn number_functions() -> Vec<FunctionSpec> {
    use Category::Number as C;
    vec![
        pure(
            "bytes",
            C,
            "Human readable byte size",
            vec![req("bytes", Number), opt("decimals", Integer, "2")],
            |_, a| Ok(json!(number::bytes(a.f64(0)?, a.bounded(1, MAX_DECIMALS)?)?)),
        ),
        pure(
            "formatNumber",
            C,
            "Thousands separators and fixed decimals",
            vec![req("n", Number), opt("decimals", Integer, "2")],
            |_, a| Ok(json!(number::format_number(a.f64(0)?, a.bounded(1, MAX_DECIMALS)?)?)),
        ),
        pure(
            "formatCurrency",
            C,
            "Amount with a currency symbol",
            vec![req("amount", Number), opt("currency", Str, "USD")],
            |_, a| Ok(json!(number::format_currency(a.f64(0)?, a.str(1)?)?)),
        ),
        pure(
            "percentage",
            C,
            "Value as a percentage of a total",
            vec![req("value", Number), req("total", Number), opt("decimals", Integer, "2")],
            |_, a| Ok(json!(number::percentage(a.f64(0)?, a.f64(1)?, a.u32(2)?)?)),
        ),
        pure(
            "clamp",
            C,
            "Limit a number to a range",
            vec![req("n", Number), req("min", Number), req("max", Number)],
            |_, a| Ok(json!(number::clamp(a.f64(0)?, a.f64(1)?, a.f64(2)?)?)),
        ),
        pure(
            "roundTo",
            C,
            "Round half away from zero",
            vec![req("n", Number), opt("decimals", Integer, "0")],
            |_, a| Ok(json!(number::round_to(a.f64(0)?, a.u32(1)?)?)),
        ),
        pure(
            "randomInt",
            C,
            "Uniform integer in [min, max]",
            vec![req("min", Integer), req("max", Integer)],
            |_, a| Ok(json!(number::random_int(a.i64(0)?, a.i64(1)?)?)),
        ),
        pure(
            "ordinal",
            C,
            "1st, 2nd, 3rd...",
            vec![req("n", Integer)],
            |_, a| Ok(json!(number::ordinal(a.i64(0)?))),
        ),
        pure(
            "toRoman",
            C,
            "Roman numeral for 1-3999",
            vec![req("n", Integer)],
            |_, a| Ok(json!(number::to_roman(a.u32(0)?)?)),
        ),
        pure(
            "isPrime",
            C,
            "Primality by trial division",
            vec![req("n", Integer)],
            |_, a| Ok(json!(a.u64(0).map(number::is_prime).unwrap_or(false))),
        ),
    ]
}

fn color_functions() -> Vec<FunctionSpec> {
    use Category::Color as C;
    vec![
        pure(
            "hexToRgb",
            C,
            "Parse a 3 or 6 digit hex color",
            vec![req("hex", Str)],
            |_, a| to_json(color::hex_to_rgb(a.str(0)?)),
        ),
        pure(
            "rgbToHex",
            C,
            "Render channels as #rrggbb",
            vec![req("r", Integer), req("g", Integer), req("b", Integer)],
            |_, a| Ok(json!(color::rgb_to_hex(Rgb::new(a.u8(0)?, a.u8(1)?, a.u8(2)?)))),
        ),
        pure(
            "rgbToHsl",
            C,
            "Convert RGB channels to HSL",
            vec![req("r", Integer), req("g", Integer), req("b", Integer)],
            |_, a| to_json(color::rgb_to_hsl(Rgb::new(a.u8(0)?, a.u8(1)?, a.u8(2)?))),
        ),
        pure(
            "hslToRgb",
            C,
            "Convert HSL (degrees, percent, percent) to RGB",
            vec![req("h", Number), req("s", Number), req("l", Number)],
            |_, a| to_json(color::hsl_to_rgb(Hsl { h: a.f64(0)?, s: a.f64(1)?, l: a.f64(2)? })),
        ),
        pure(
            "lighten",
            C,
            "Raise HSL lightness by a number of points",
            vec![req("hex", Str), req("percent", Number)],
            |_, a| to_json(color::lighten(a.str(0)?, a.f64(1)?)),
        ),
        pure(
            "darken",
            C,
            "Lower HSL lightness by a number of points",
            vec![req("hex", Str), req("percent", Number)],
            |_, a| to_json(color::darken(a.str(0)?, a.f64(1)?)),
        ),
        pure(
            "contrastColor",
            C,
            "Black or white text for a background",
            vec![req("hex", Str)],
            |_, a| to_json(color::contrast_color(a.str(0)?)),
        ),
        pure(
            "normalizeHex",
            C,
            "Canonical #rrggbb form, or null",
            vec![req("hex", Str)],
            |_, a| to_json(color::normalize_hex(a.str(0)?)),
        ),
        pure(
            "randomColor",
            C,
            "Random #rrggbb color",
            vec![],
            |_, _| Ok(json!(color::random_color())),
        ),
    ]
}

fn url_functions() -> Vec<FunctionSpec> {
    use Category::Url as C;
    vec![
        pure(
            "parseUrl",
            C,
            "Split a URL into its components, or null",
            vec![req("url", Str)],
            |_, a| to_json(url::parse_url(a.str(0)?)),
        ),
        pure(
            "queryParams",
            C,
            "Decoded query parameters, or null",
            vec![req("url", Str)],
            |_, a| to_json(url::query_params(a.str(0)?)),
        ),
        pure(
            "buildQueryString",
            C,
            "Form-encode an object of parameters",
            vec![req("params", Object)],
            |_, a| Ok(json!(url::build_query_string(&a.pairs(0)?))),
        ),
        pure(
            "addQueryParams",
            C,
            "Set query parameters on a URL",
            vec![req("url", Str), req("params", Object)],
            |_, a| to_json(url::add_query_params(a.str(0)?, &a.pairs(1)?)),
        ),
        pure(
            "removeQueryParam",
            C,
            "Drop a query parameter from a URL",
            vec![req("url", Str), req("key", Str)],
            |_, a| to_json(url::remove_query_param(a.str(0)?, a.str(1)?)),
        ),
        pure(
            "domain",
            C,
            "Hostname without www.",
            vec![req("url", Str)],
            |_, a| to_json(url::domain(a.str(0)?)),
        ),
        pure(
            "isAbsoluteUrl",
            C,
            "Whether the text parses as an absolute URL",
            vec![req("url", Str)],
            |_, a| Ok(json!(url::is_absolute_url(a.str(0)?))),
        ),
        pure(
            "joinUrl",
            C,
            "Resolve a path against a base URL",
            vec![req("base", Str), req("path", Str)],
            |_, a| to_json(url::join_url(a.str(0)?, a.str(1)?)),
        ),
    ]
}

fn crypto_functions() -> Vec<FunctionSpec> {
    use Category::Crypto as C;
    vec![
        pure(
            "md5",
            C,
            "MD5 hex digest",
            vec![req("s", Str)],
            |_, a| Ok(json!(crypto::md5_hex(a.str(0)?))),
        ),
        pure(
            "sha256",
            C,
            "SHA-256 hex digest",
            vec![req("s", Str)],
            |_, a| Ok(json!(crypto::sha256_hex(a.str(0)?))),
        ),
        pure(
            "sha512",
            C,
            "SHA-512 hex digest",
            vec![req("s", Str)],
            |_, a| Ok(json!(crypto::sha512_hex(a.str(0)?))),
        ),
        pure(
            "hmacSha256",
            C,
            "HMAC-SHA256 hex digest",
            vec![req("key", Str), req("message", Str)],
            |_, a| Ok(json!(crypto::hmac_sha256_hex(a.str(0)?, a.str(1)?)?)),
        ),
        pure(
            "base64Encode",
            C,
            "Standard base64 of UTF-8 text",
            vec![req("s", Str)],
            |_, a| Ok(json!(crypto::base64_encode(a.str(0)?))),
        ),
        pure(
            "base64Decode",
            C,
            "Decode base64 to text, or null",
            vec![req("s", Str)],
            |_, a| to_json(crypto::base64_decode(a.str(0)?)),
        ),
        pure(
            "randomBytes",
            C,
            "Hex encoded random bytes",
            vec![opt("length", Integer, "16")],
            |_, a| Ok(json!(crypto::random_bytes_hex(a.bounded(0, MAX_LENGTH)?))),
        ),
        pure(
            "randomToken",
            C,
            "URL-safe random token",
            vec![opt("length", Integer, "32")],
            |_, a| Ok(json!(crypto::random_token(a.bounded(0, MAX_LENGTH)?))),
        ),
        pure("uuid", C, "Random version 4 UUID", vec![], |_, _| Ok(json!(crypto::uuid_v4()))),
        pure(
            "hashPassword",
            C,
            "PBKDF2-SHA512 hash record with a random salt",
            vec![req("password", Str)],
            |ctx, a| to_json(crypto::hash_password(a.str(0)?, ctx.hash_options)?),
        ),
        pure(
            "verifyPassword",
            C,
            "Check a password against a hash record",
            vec![req("password", Str), req("record", Object)],
            |_, a| {
                let password = a.str(0)?;
                let verified = serde_json::from_value::<PasswordHash>(a.value(1)?.clone())
                    .map(|record| crypto::verify_password(password, &record))
                    .unwrap_or(false);
                Ok(json!(verified))
            },
        ),
    ]
}

fn fs_functions() -> Vec<FunctionSpec> {
    use Category::Fs as C;
    vec![
        io(
            "readFile",
            C,
            "File contents as text, or null",
            vec![req("path", Str)],
            |_, a| {
                let path = a.str(0)?.to_string();
                deferred(async move { json!(fs::read_file(path).await) })
            },
        ),
        io(
            "writeFile",
            C,
            "Write text, creating parent directories",
            vec![req("path", Str), req("content", Str)],
            |_, a| {
                let (path, content) = (a.str(0)?.to_string(), a.str(1)?.to_string());
                deferred(async move { json!(fs::write_file(path, &content).await) })
            },
        ),
        io(
            "appendFile",
            C,
            "Append text, creating the file if needed",
            vec![req("path", Str), req("content", Str)],
            |_, a| {
                let (path, content) = (a.str(0)?.to_string(), a.str(1)?.to_string());
                deferred(async move { json!(fs::append_file(path, &content).await) })
            },
        ),
        io(
            "readJson",
            C,
            "Parsed JSON file, or null",
            vec![req("path", Str)],
            |_, a| {
                let path = a.str(0)?.to_string();
                deferred(async move { fs::read_json(path).await.unwrap_or(Value::Null) })
            },
        ),
        io(
            "writeJson",
            C,
            "Serialize a value to a JSON file",
            vec![req("path", Str), req("value", Any), opt("pretty", Boolean, "true")],
            |_, a| {
                let (path, value) = (a.str(0)?.to_string(), a.value(1)?.clone());
                let pretty = a.bool(2)?;
                deferred(async move { json!(fs::write_json(path, &value, pretty).await) })
            },
        ),
        io(
            "fileExists",
            C,
            "Whether a path exists",
            vec![req("path", Str)],
            |_, a| {
                let path = a.str(0)?.to_string();
                deferred(async move { json!(fs::file_exists(path).await) })
            },
        ),
        io(
            "ensureDir",
            C,
            "Create a directory and its parents",
            vec![req("path", Str)],
            |_, a| {
                let path = a.str(0)?.to_string();
                deferred(async move { json!(fs::ensure_dir(path).await) })
            },
        ),
        io(
            "listDir",
            C,
            "Sorted entry names, or null",
            vec![req("path", Str)],
            |_, a| {
                let path = a.str(0)?.to_string();
                deferred(async move { json!(fs::list_dir(path).await) })
            },
        ),
        io(
            "fileSize",
            C,
            "Size in bytes, or null",
            vec![req("path", Str)],
            |_, a| {
                let path = a.str(0)?.to_string();
                deferred(async move { json!(fs::file_size(path).await) })
            },
        ),
        io(
            "fileStats",
            C,
            "Size, type and timestamps, or null",
            vec![req("path", Str)],
            |_, a| {
                let path = a.str(0)?.to_string();
                deferred(async move { json!(fs::file_stats(path).await) })
            },
        ),
        io(
            "deleteFile",
            C,
            "Remove a file",
            vec![req("path", Str)],
            |_, a| {
                let path = a.str(0)?.to_string();
                deferred(async move { json!(fs::delete_file(path).await) })
            },
        ),
        io(
            "copyFile",
            C,
            "Copy a file, creating destination directories",
            vec![req("from", Str), req("to", Str)],
            |_, a| {
                let (from, to) = (a.str(0)?.to_string(), a.str(1)?.to_string());
                deferred(async move { json!(fs::copy_file(from, to).await) })
            },
        ),
    ]
}

fn validation_functions() -> Vec<FunctionSpec> {
    vec![
        predicate("isEmail", "Looks like an email address", validate::is_email),
        predicate("isUrl", "Absolute http(s) URL with a host", validate::is_url),
        predicate("isPhone", "7-15 digit phone number", validate::is_phone),
        predicate("isHexColor", "3 or 6 digit hex color", validate::is_hex_color),
        predicate("isIpv4", "Dotted-quad IPv4 address", validate::is_ipv4),
        predicate("isIpv6", "IPv6 address", validate::is_ipv6),
        predicate("isUuid", "Hyphenated UUID", validate::is_uuid),
        predicate("isCreditCard", "Card number passing the Luhn check", validate::is_credit_card),
        predicate(
            "isStrongPassword",
            "8+ chars with upper, lower, digit and symbol",
            validate::is_strong_password,
        ),
        predicate("isJson", "Parses as JSON", validate::is_json),
        predicate("isAlphanumeric", "Only ASCII letters and digits", validate::is_alphanumeric),
        predicate("isPostalCode", "US ZIP or ZIP+4", validate::is_postal_code),
    ]
}

fn misc_functions() -> Vec<FunctionSpec> {
    use Category::Misc as C;
    vec![
        io(
            "sleep",
            C,
            "Wait for a number of milliseconds",
            vec![req("ms", Integer)],
            |_, a| {
                let ms = a.u64(0)?;
                deferred(async move {
                    misc::sleep(ms).await;
                    json!(ms)
                })
            },
        ),
        io(
            "copyToClipboard",
            C,
            "Put text on the system clipboard",
            vec![req("text", Str)],
            |_, a| {
                let text = a.str(0)?.to_string();
                deferred(async move { json!(misc::copy_to_clipboard(&text).await) })
            },
        ),
        pure(
            "generateId",
            C,
            "Random alphanumeric id",
            vec![opt("length", Integer, "16")],
            |_, a| Ok(json!(misc::generate_id(a.bounded(0, MAX_LENGTH)?))),
        ),
        pure(
            "randomString",
            C,
            "Random string from a character set",
            vec![
                req("length", Integer),
                opt("charset", Str, ALPHANUMERIC),
            ],
            |_, a| Ok(json!(misc::random_string(a.bounded(0, MAX_LENGTH)?, a.str(1)?))),
        ),
        pure(
            "typeOf",
            C,
            "JSON type name of a value",
            vec![req("value", Any)],
            |_, a| Ok(json!(misc::type_of(a.value(0)?))),
        ),
        pure(
            "parseJson",
            C,
            "Parse JSON text, or null",
            vec![req("text", Str)],
            |_, a| Ok(misc::parse_json(a.str(0)?).unwrap_or(Value::Null)),
        ),
        pure(
            "csvToJson",
            C,
            "CSV with a header row to an array of objects",
            vec![req("text", Str)],
            |_, a| Ok(misc::csv_to_json(a.str(0)?).unwrap_or(Value::Null)),
        ),
        pure(
            "jsonToCsv",
            C,
            "Array of objects to CSV text",
            vec![req("rows", Array)],
            |_, a| to_json(misc::json_to_csv(a.array(0)?)),
        ),
    ]
}

static REGISTRY: LazyLock<Vec<FunctionSpec>> = LazyLock::new(|| {
    [
        string_functions(),
        date_functions(),
        array_functions(),
        object_functions(),
        number_functions(),
        color_functions(),
        url_functions(),
        crypto_functions(),
        fs_functions(),
        validation_functions(),
        misc_functions(),
    ]
    .into_iter()
    .flatten()
    .collect()
});

pub fn functions() -> &'static [FunctionSpec] {
    &REGISTRY
}

/// Finds a function by its camelCase name; snake_case and kebab-case
/// spellings resolve to the same entry.
pub fn find(name: &str) -> Option<&'static FunctionSpec> {
    let exact = functions().iter().find(|f| f.name == name);
    exact.or_else(|| {
        let normalized = name.trim().to_lower_camel_case();
        functions().iter().find(|f| f.name == normalized)
    })
}

pub fn in_category(category: Category) -> impl Iterator<Item = &'static FunctionSpec> {
    functions().iter().filter(move |f| f.category == category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let mut seen = HashSet::new();
        for f in functions() {
            assert!(seen.insert(f.name), "duplicate function name {}", f.name);
        }
    }

    #[test]
    fn every_category_has_functions() {
        for category in Category::ALL {
            assert!(in_category(category).count() > 0, "{} is empty", category);
        }
    }

    #[test]
    fn optional_params_come_last_and_defaults_coerce() {
        for f in functions() {
            let first_optional = f.params.iter().position(|p| !p.is_required());
            if let Some(pos) = first_optional {
                assert!(f.params[pos..].iter().all(|p| !p.is_required()), "{}", f.name);
            }
            for p in &f.params {
                if let Some(default) = p.default {
                    assert!(p.coerce(default).is_ok(), "{}.{} default", f.name, p.name);
                }
            }
        }
    }

    #[test]
    fn lookup_accepts_other_spellings() {
        assert_eq!(find("levenshteinDistance").unwrap().name, "levenshteinDistance");
        assert_eq!(find("levenshtein_distance").unwrap().name, "levenshteinDistance");
        assert_eq!(find("levenshtein-distance").unwrap().name, "levenshteinDistance");
        assert!(find("doesNotExist").is_none());
    }

    #[test]
    fn signatures_show_defaults() {
        let truncate = find("truncate").unwrap();
        assert_eq!(
            truncate.signature(),
            "truncate(s: string, length: integer, suffix: string = \"...\")"
        );
        assert_eq!(truncate.required_count(), 2);
    }

    #[test]
    fn category_names_parse() {
        assert_eq!(Category::parse("Crypto"), Some(Category::Crypto));
        assert_eq!(Category::parse("nope"), None);
    }
}
