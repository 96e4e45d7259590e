//! Minimal TOML reader for the heartbeat configuration
//!
//! Handles only the subset needed for `heartbeat.toml`. It does NOT support
//! the full TOML spec and needs no allocator.
//!
//! Supported:
//! - `[heartbeat]` and `[heartbeat.timing]` section headers
//! - `key = value` pairs (string, integer, boolean)
//! - Basic (`"..."`) and literal (`'...'`) strings without escapes
//! - Decimal integers with `_` digit separators
//! - Comments (`# ...`), including trailing comments
//!
//! ```toml
//! [heartbeat]
//! pin = "gpio5"      # "!gpio5" selects active-low
//! reverse = false
//! blocked = false
//! enabled = true
//! period_s = 15
//! pulse_ms = 10
//!
//! [heartbeat.timing]
//! default_period_ms = 15000
//! default_pulse_ms = 10
//! ```

use super::types::{HeartbeatConfig, Polarity, Timing};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Invalid value type or out-of-range value
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// Key not recognized in its section
    UnknownKey,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Heartbeat,
    Timing,
}

/// Parse TOML text into a heartbeat config
///
/// Keys that are not present keep their [`HeartbeatConfig::default`] value.
/// `pin = "!gpioN"` and `reverse = true` both select active-low polarity.
pub fn parse_config(input: &str) -> Result<HeartbeatConfig, ParseError> {
    let mut config = HeartbeatConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(section, key, value, &mut config)?;
    }

    // Re-resolve in case a default was set to zero
    config.timing = Timing::new(config.timing.period_ms, config.timing.pulse_ms);
    Ok(config)
}

/// Parse a section header line like "[heartbeat]"
fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let header = line
        .strip_prefix('[')
        .and_then(|l| l.split('#').next())
        .map(str::trim)
        .and_then(|l| l.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?;

    match header.trim() {
        "heartbeat" => Ok(Section::Heartbeat),
        "heartbeat.timing" => Ok(Section::Timing),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    let value = strip_comment(value);

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Cut a trailing `# comment` that is not inside a string
fn strip_comment(value: &str) -> &str {
    let mut quote = None;
    for (i, c) in value.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, '#') => return value[..i].trim(),
            _ => {}
        }
    }
    value
}

/// Parse a string value (removes `"` or `'` quotes)
fn parse_string(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse a non-negative decimal integer, allowing `_` between digits
fn parse_int<T: TryFrom<u64>>(value: &str) -> Result<T, ParseError> {
    let digits = parse_string(value);
    let digits = digits.strip_prefix('+').unwrap_or(digits);

    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
    {
        return Err(ParseError::InvalidValue);
    }

    let mut number: u64 = 0;
    for c in digits.chars().filter(|&c| c != '_') {
        let digit = c.to_digit(10).ok_or(ParseError::InvalidValue)?;
        number = number
            .checked_mul(10)
            .and_then(|n| n.checked_add(u64::from(digit)))
            .ok_or(ParseError::InvalidValue)?;
    }

    T::try_from(number).map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a pin like `5`, `"gpio5"` or `"!gpio5"`
///
/// Returns the GPIO number and whether the pin is inverted (active-low).
pub fn parse_pin(value: &str) -> Result<(u8, bool), ParseError> {
    let value = parse_string(value).trim();

    let (value, inverted) = match value.strip_prefix('!') {
        Some(rest) => (rest, true),
        None => (value, false),
    };
    let number = value.strip_prefix("gpio").unwrap_or(value);

    let pin = number.parse().map_err(|_| ParseError::InvalidPin)?;
    Ok((pin, inverted))
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut HeartbeatConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Heartbeat, "pin") => {
            let (pin, inverted) = parse_pin(value)?;
            config.pin = pin;
            if inverted {
                config.polarity = Polarity::ActiveLow;
            }
        }
        (Section::Heartbeat, "reverse") => {
            if parse_bool(value)? {
                config.polarity = Polarity::ActiveLow;
            }
        }
        (Section::Heartbeat, "blocked") => config.blocked = parse_bool(value)?,
        (Section::Heartbeat, "enabled") => config.enabled = parse_bool(value)?,
        (Section::Heartbeat, "period_s") => {
            let seconds: u32 = parse_int(value)?;
            config.period_ms = seconds.checked_mul(1000).ok_or(ParseError::InvalidValue)?;
        }
        (Section::Heartbeat, "period_ms") => config.period_ms = parse_int(value)?,
        (Section::Heartbeat, "pulse_ms") => config.pulse_ms = parse_int(value)?,
        (Section::Timing, "default_period_ms") => config.timing.period_ms = parse_int(value)?,
        (Section::Timing, "default_pulse_ms") => config.timing.pulse_ms = parse_int(value)?,
        (Section::Root, _) => return Err(ParseError::InvalidSection),
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}
