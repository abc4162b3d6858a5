//! Best-effort coercion of raw form values into an [`InputSet`].
//!
//! Nothing here fails: a field that cannot be read becomes its zero default.
//! Text is read the way a browser number input is read, by taking the longest
//! numeric prefix (`"300abc"` is 300, `"3e2"` is 300, `"10.7"` panels is 10).
//! Arrays, objects and other unexpected JSON count as unreadable.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::models::estimate::{FieldValue, InputSet, Location, RawInput};

pub const MAX_NO_SUN_DAYS: u8 = 31;

pub fn normalize(raw: &RawInput) -> InputSet {
    InputSet {
        monthly_bill_amount: raw.monthly_bill_amount.as_ref().map_or(Decimal::ZERO, currency),
        panel_count: raw.panel_count.as_ref().map_or(0, count),
        no_sun_days_per_month: raw
            .no_sun_days_per_month
            .as_ref()
            .map_or(0, |v| count(v).min(MAX_NO_SUN_DAYS as u32) as u8),
        daytime_only_usage: raw.daytime_only_usage.as_ref().is_some_and(flag),
        location: raw.location.as_ref().and_then(location),
    }
}

fn currency(value: &FieldValue) -> Decimal {
    let parsed = match value {
        FieldValue::Number(n) => Decimal::from_f64(*n)
            .or_else(|| (n.is_finite() && *n > 0.0).then_some(Decimal::MAX)),
        FieldValue::Text(s) => leading_decimal(s),
        FieldValue::Flag(_) | FieldValue::Other(_) => None,
    };
    match parsed {
        Some(d) if d.is_sign_positive() => d,
        _ => Decimal::ZERO,
    }
}

fn count(value: &FieldValue) -> u32 {
    match value {
        // `as` saturates at u32::MAX
        FieldValue::Number(n) if *n > 0.0 => n.trunc() as u32,
        FieldValue::Number(_) => 0,
        FieldValue::Text(s) => leading_count(s),
        FieldValue::Flag(_) | FieldValue::Other(_) => 0,
    }
}

fn flag(value: &FieldValue) -> bool {
    match value {
        FieldValue::Flag(b) => *b,
        FieldValue::Number(n) => *n == 1.0,
        FieldValue::Text(s) => {
            let s = s.trim();
            ["true", "on", "yes", "1"].iter().any(|t| s.eq_ignore_ascii_case(t))
        }
        FieldValue::Other(_) => false,
    }
}

fn location(value: &FieldValue) -> Option<Location> {
    match value {
        FieldValue::Text(s) => Location::from_tag(s),
        _ => None,
    }
}

/// Splits an optional sign off `s` and returns `(negative, rest)`.
fn split_sign(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

fn digit_run(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Reads `[sign] digits [. digits] [e|E [sign] digits]` off the front of `s`.
/// Values too large for a `Decimal` saturate at `Decimal::MAX`.
fn leading_decimal(s: &str) -> Option<Decimal> {
    let (negative, rest) = split_sign(s.trim());
    let int_len = digit_run(rest);
    let mut end = int_len;
    if rest[int_len..].starts_with('.') {
        end += 1 + digit_run(&rest[int_len + 1..]);
    }
    let number = &rest[..end];
    if !number.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    let mantissa = number.trim_end_matches('.');
    let mantissa = if mantissa.starts_with('.') {
        Decimal::from_str(&format!("0{}", mantissa))
    } else {
        Decimal::from_str(mantissa)
    }
    // a 29-digit integer part is the only way past the Decimal range
    .unwrap_or(if int_len > 28 { Decimal::MAX } else { Decimal::ZERO });

    let parsed = match exponent(&rest[end..]) {
        Some(exp) => scale_by_power_of_ten(mantissa, exp),
        None => mantissa,
    };
    Some(if negative { -parsed } else { parsed })
}

/// Exponent suffix `e|E [sign] digits`; `None` when no digits follow.
fn exponent(s: &str) -> Option<i32> {
    let rest = s.strip_prefix(['e', 'E'])?;
    let (negative, digits) = split_sign(rest);
    let digits = &digits[..digit_run(digits)];
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.parse::<i32>().unwrap_or(i32::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

// A Decimal holds at most 29 significant digits, so 64 steps either way
// always reach saturation or zero.
const MAX_EXPONENT_STEPS: u32 = 64;

fn scale_by_power_of_ten(mut value: Decimal, exp: i32) -> Decimal {
    let ten = Decimal::from(10);
    for _ in 0..exp.unsigned_abs().min(MAX_EXPONENT_STEPS) {
        value = if exp > 0 {
            match value.checked_mul(ten) {
                Some(v) => v,
                None => return Decimal::MAX,
            }
        } else {
            value.checked_div(ten).unwrap_or(Decimal::ZERO)
        };
    }
    value
}

fn leading_count(s: &str) -> u32 {
    let (negative, rest) = split_sign(s.trim());
    let digits = &rest[..digit_run(rest)];
    if negative || digits.is_empty() {
        return 0;
    }
    digits.parse::<u64>().map_or(u32::MAX, |n| n.min(u32::MAX as u64) as u32)
}
