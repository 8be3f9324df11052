//! Format predicates for common kinds of user input.

use regex::Regex;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;
use url::Url;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{7,15}$").expect("phone regex is valid"));

static HEX_COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex color regex is valid")
});

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-8][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("uuid regex is valid")
});

static POSTAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("postal code regex is valid"));

pub fn is_email(s: &str) -> bool {
    EMAIL_RE.is_match(s.trim())
}

/// An absolute `http` or `https` URL with a host.
pub fn is_url(s: &str) -> bool {
    match Url::parse(s.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

/// 7 to 15 digits with an optional leading `+`; spaces, dashes, dots and
/// parentheses are ignored.
pub fn is_phone(s: &str) -> bool {
    let stripped: String = s
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();
    PHONE_RE.is_match(&stripped)
}

pub fn is_hex_color(s: &str) -> bool {
    HEX_COLOR_RE.is_match(s.trim())
}

pub fn is_ipv4(s: &str) -> bool {
    s.trim().parse::<Ipv4Addr>().is_ok()
}

pub fn is_ipv6(s: &str) -> bool {
    s.trim().parse::<Ipv6Addr>().is_ok()
}

/// Hyphenated RFC 4122 UUID, any case.
pub fn is_uuid(s: &str) -> bool {
    UUID_RE.is_match(s.trim())
}

/// 13 to 19 digits passing the Luhn checksum. Spaces and dashes are ignored.
pub fn is_credit_card(s: &str) -> bool {
    let digits: Vec<u32> = match s
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<u32>>>()
    {
        Some(digits) => digits,
        None => return false,
    };
    if !(13..=19).contains(&digits.len()) {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                *d
            }
        })
        .sum();
    sum % 10 == 0
}

/// At least 8 characters with a lowercase letter, an uppercase letter, a
/// digit and a symbol.
pub fn is_strong_password(s: &str) -> bool {
    s.chars().count() >= 8
        && s.chars().any(|c| c.is_lowercase())
        && s.chars().any(|c| c.is_uppercase())
        && s.chars().any(|c| c.is_ascii_digit())
        && s.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace())
}

pub fn is_json(s: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(s).is_ok()
}

pub fn is_alphanumeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())
}

/// US ZIP code, `12345` or `12345-6789`.
pub fn is_postal_code(s: &str) -> bool {
    POSTAL_CODE_RE.is_match(s.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails() {
        assert!(is_email("test@example.com"));
        assert!(is_email("first.last+tag@sub.example.co.uk"));
        assert!(!is_email("invalid-email"));
        assert!(!is_email("a@b"));
        assert!(!is_email("sp ace@example.com"));
    }

    #[test]
    fn urls() {
        assert!(is_url("https://example.com/path?q=1"));
        assert!(is_url("http://localhost:8080"));
        assert!(!is_url("ftp://example.com"));
        assert!(!is_url("example.com"));
        assert!(!is_url(""));
    }

    #[test]
    fn phones() {
        assert!(is_phone("+1 (555) 123-4567"));
        assert!(is_phone("555.123.4567"));
        assert!(!is_phone("12345"));
        assert!(!is_phone("555-CALL-NOW"));
    }

    #[test]
    fn colors_and_addresses() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("A1B2C3"));
        assert!(!is_hex_color("#abcd"));
        assert!(is_ipv4("192.168.0.1"));
        assert!(!is_ipv4("256.1.1.1"));
        assert!(is_ipv6("::1"));
        assert!(is_ipv6("2001:db8::ff00:42:8329"));
        assert!(!is_ipv6("192.168.0.1"));
    }

    #[test]
    fn uuids() {
        assert!(is_uuid("123e4567-e89b-42d3-a456-426614174000"));
        assert!(is_uuid(&crate::core::crypto::uuid_v4()));
        assert!(!is_uuid("123e4567e89b42d3a456426614174000"));
    }

    #[test]
    fn credit_cards() {
        assert!(is_credit_card("4111 1111 1111 1111"));
        assert!(is_credit_card("5500-0000-0000-0004"));
        assert!(!is_credit_card("4111 1111 1111 1112"));
        assert!(!is_credit_card("4111"));
        assert!(!is_credit_card("4111-abcd-1111-1111"));
    }

    #[test]
    fn passwords_and_misc() {
        assert!(is_strong_password("Str0ng!pass"));
        assert!(!is_strong_password("weakpass"));
        assert!(!is_strong_password("NoDigits!!"));
        assert!(is_json(r#"{"a": [1, 2]}"#));
        assert!(!is_json("{a: 1}"));
        assert!(is_alphanumeric("abc123"));
        assert!(!is_alphanumeric("abc 123"));
        assert!(!is_alphanumeric(""));
        assert!(is_postal_code("12345"));
        assert!(is_postal_code("12345-6789"));
        assert!(!is_postal_code("1234"));
    }
}
