//! String transforms: case conversion, padding, slugs, HTML escaping and
//! edit distance.

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToTitleCase,
    ToUpperCamelCase,
};
use regex::Regex;
use std::sync::LazyLock;

static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("html tag regex is valid"));

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

pub fn camel_case(s: &str) -> String {
    s.to_lower_camel_case()
}

pub fn pascal_case(s: &str) -> String {
    s.to_upper_camel_case()
}

pub fn snake_case(s: &str) -> String {
    s.to_snake_case()
}

pub fn kebab_case(s: &str) -> String {
    s.to_kebab_case()
}

pub fn title_case(s: &str) -> String {
    s.to_title_case()
}

pub fn constant_case(s: &str) -> String {
    s.to_shouty_snake_case()
}

/// Lowercase, hyphen-delimited, URL-safe form of `s`.
///
/// ASCII letters and digits are kept, whitespace, `_` and `-` collapse into a
/// single `-`, everything else is dropped. The output never starts or ends
/// with `-`, so applying `slugify` twice gives the same result as once.
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_was_dash = false;

    for ch in s.trim().chars() {
        let normalized = match ch {
            'a'..='z' | '0'..='9' => Some(ch),
            'A'..='Z' => Some(ch.to_ascii_lowercase()),
            _ if ch.is_whitespace() || ch == '_' || ch == '-' => Some('-'),
            _ => None,
        };

        if let Some(c) = normalized {
            if c == '-' {
                if out.is_empty() || prev_was_dash {
                    continue;
                }
                out.push('-');
                prev_was_dash = true;
            } else {
                out.push(c);
                prev_was_dash = false;
            }
        }
    }

    while out.ends_with('-') {
        out.pop();
    }

    out
}

/// Shortens `s` to at most `max_len` characters, ending with `suffix` when cut.
pub fn truncate(s: &str, max_len: usize, suffix: &str) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let keep = max_len.saturating_sub(suffix.chars().count());
    let mut out: String = s.chars().take(keep).collect();
    out.push_str(suffix);
    out
}

fn padding(current: usize, target: usize, fill: &str) -> Option<String> {
    if fill.is_empty() || current >= target {
        return None;
    }
    Some(fill.chars().cycle().take(target - current).collect())
}

pub fn pad_start(s: &str, target_len: usize, fill: &str) -> String {
    match padding(s.chars().count(), target_len, fill) {
        Some(pad) => pad + s,
        None => s.to_string(),
    }
}

pub fn pad_end(s: &str, target_len: usize, fill: &str) -> String {
    match padding(s.chars().count(), target_len, fill) {
        Some(pad) => s.to_string() + &pad,
        None => s.to_string(),
    }
}

pub fn reverse(s: &str) -> String {
    s.chars().rev().collect()
}

pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

pub fn strip_html(s: &str) -> String {
    HTML_TAG_RE.replace_all(s, "").into_owned()
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn unescape_html(s: &str) -> String {
    // &amp; last so "&amp;lt;" decodes to "&lt;" and not "<"
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Replaces all but the last `visible` characters with `mask_char`.
pub fn mask(s: &str, visible: usize, mask_char: char) -> String {
    let total = s.chars().count();
    if total <= visible {
        return s.to_string();
    }
    let hidden = total - visible;
    std::iter::repeat(mask_char)
        .take(hidden)
        .chain(s.chars().skip(hidden))
        .collect()
}

/// Case-insensitive check that ignores anything that is not alphanumeric.
pub fn is_palindrome(s: &str) -> bool {
    let cleaned: Vec<char> = s
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    cleaned.iter().eq(cleaned.iter().rev())
}

/// Minimum number of single-character insertions, deletions or substitutions
/// turning `a` into `b`.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b_len {
        matrix[0][j] = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}

/// `(max_len - distance) / max_len`, in `[0, 1]`. Two empty strings are
/// identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein_distance(a, b);
    (max_len - distance) as f64 / max_len as f64
}
