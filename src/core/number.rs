//! Number formatting and small arithmetic helpers. Every `f64` argument must
//! be finite.

use crate::utils::error::{Result, UtilkitError};
use crate::utils::validation::require_finite;
use rand::Rng;

const BYTE_UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Drops trailing zeros (and a dangling dot) from a fixed-point rendering.
fn trim_fraction(mut s: String) -> String {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}

/// Human readable byte size in base 1024: `bytes(1048576.0, 2) == "1 MB"`.
pub fn bytes(n: f64, decimals: usize) -> Result<String> {
    require_finite("bytes", n)?;
    if n == 0.0 {
        return Ok("0 Bytes".to_string());
    }

    let mut value = n.abs();
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let sign = if n < 0.0 { "-" } else { "" };
    let rendered = trim_fraction(format!("{:.*}", decimals, value));
    Ok(format!("{}{} {}", sign, rendered, BYTE_UNITS[unit]))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1234567.891` with 2 decimals renders as `1,234,567.89`.
pub fn format_number(n: f64, decimals: usize) -> Result<String> {
    require_finite("number", n)?;
    let fixed = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::new();
    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    if n < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    Ok(out)
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" | "CNY" => Some("¥"),
        "INR" => Some("₹"),
        _ => None,
    }
}

/// Formats an amount with the currency's symbol, or the upper-cased code
/// followed by a space when no symbol is known.
pub fn format_currency(amount: f64, code: &str) -> Result<String> {
    require_finite("amount", amount)?;
    let code = code.trim().to_ascii_uppercase();
    let decimals = if code == "JPY" { 0 } else { 2 };
    let formatted = format_number(amount.abs(), decimals)?;
    let prefix = match currency_symbol(&code) {
        Some(symbol) => symbol.to_string(),
        None => format!("{} ", code),
    };
    let sign = if amount < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    Ok(format!("{}{}{}", sign, prefix, formatted))
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(n: f64, decimals: u32) -> Result<f64> {
    require_finite("number", n)?;
    let factor = 10f64.powi(decimals.min(15) as i32);
    Ok((n * factor).round() / factor)
}

/// `value` as a percentage of `total`; a zero total gives 0.
pub fn percentage(value: f64, total: f64, decimals: u32) -> Result<f64> {
    require_finite("value", value)?;
    require_finite("total", total)?;
    if total == 0.0 {
        return Ok(0.0);
    }
    round_to(value / total * 100.0, decimals)
}

pub fn clamp(n: f64, min: f64, max: f64) -> Result<f64> {
    require_finite("number", n)?;
    require_finite("min", min)?;
    require_finite("max", max)?;
    if min > max {
        return Err(UtilkitError::invalid_input(
            "min",
            format!("min ({}) is greater than max ({})", min, max),
        ));
    }
    Ok(n.clamp(min, max))
}

/// Uniform integer in `[min, max]`.
pub fn random_int(min: i64, max: i64) -> Result<i64> {
    if min > max {
        return Err(UtilkitError::invalid_input(
            "min",
            format!("min ({}) is greater than max ({})", min, max),
        ));
    }
    Ok(rand::thread_rng().gen_range(min..=max))
}

pub fn ordinal(n: i64) -> String {
    let last_two = (n % 100).abs();
    let suffix = if (11..=13).contains(&last_two) {
        "th"
    } else {
        match last_two % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{}{}", n, suffix)
}

const ROMAN_NUMERALS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

pub fn to_roman(n: u32) -> Result<String> {
    if !(1..=3999).contains(&n) {
        return Err(UtilkitError::invalid_input(
            "number",
            format!("roman numerals cover 1-3999, got {}", n),
        ));
    }
    let mut remaining = n;
    let mut out = String::new();
    for (value, numeral) in ROMAN_NUMERALS {
        while remaining >= value {
            out.push_str(numeral);
            remaining -= value;
        }
    }
    Ok(out)
}

pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut divisor = 3u64;
    while divisor.saturating_mul(divisor) <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}
