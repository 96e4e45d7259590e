//! Lenient integer parsing for textual setters
//!
//! Values typed on a console or read from a config file are accepted the
//! way a microcontroller `toInt()` would: the leading integer is used and
//! anything unparseable counts as zero.

/// Parse the leading decimal integer of `s`
///
/// Leading whitespace and a single `+`/`-` sign are accepted. Parsing stops
/// at the first non-digit. Returns 0 if no digits are found. Values outside
/// the `i32` range saturate.
pub fn parse_leading_int(s: &str) -> i32 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i32 = 0;
    for byte in digits.bytes() {
        if !byte.is_ascii_digit() {
            break;
        }
        let digit = (byte - b'0') as i32;
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

/// Parse the leading integer of `s` as a non-negative quantity
///
/// Negative numbers are treated as zero.
pub fn parse_leading_u32(s: &str) -> u32 {
    parse_leading_int(s).max(0) as u32
}
