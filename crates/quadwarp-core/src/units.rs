//! Unit conversion utilities
//!
//! Converts SVG length strings ("297mm", "8.5in", "600") into document user
//! units using the fixed conversion table of the 90 dpi SVG user unit.

use crate::error::UnitError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length unit accepted in document length attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Inches (90 user units)
    In,
    /// Points (1.25 user units)
    Pt,
    /// Pixels (1 user unit)
    Px,
    /// Millimeters
    Mm,
    /// Centimeters
    Cm,
    /// Picas (15 user units)
    Pc,
    /// Bare number, already in user units
    User,
}

impl LengthUnit {
    /// Every unit with a textual suffix
    pub const SUFFIXED: [LengthUnit; 6] = [
        LengthUnit::In,
        LengthUnit::Pt,
        LengthUnit::Px,
        LengthUnit::Mm,
        LengthUnit::Cm,
        LengthUnit::Pc,
    ];

    /// User units per one of this unit
    pub fn factor(self) -> f64 {
        match self {
            Self::In => 90.0,
            Self::Pt => 1.25,
            Self::Px | Self::User => 1.0,
            Self::Mm => 3.5433070866,
            Self::Cm => 35.433070866,
            Self::Pc => 15.0,
        }
    }

    /// Suffix as written in SVG ("" for user units)
    pub fn suffix(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Pt => "pt",
            Self::Px => "px",
            Self::Mm => "mm",
            Self::Cm => "cm",
            Self::Pc => "pc",
            Self::User => "",
        }
    }
}

impl Default for LengthUnit {
    fn default() -> Self {
        Self::User
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::User),
            "in" => Ok(Self::In),
            "pt" => Ok(Self::Pt),
            "px" => Ok(Self::Px),
            "mm" => Ok(Self::Mm),
            "cm" => Ok(Self::Cm),
            "pc" => Ok(Self::Pc),
            _ => Err(format!("Unknown length unit: {}", s)),
        }
    }
}

/// A parsed length: magnitude plus unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    /// Convert to document user units
    pub fn to_user_units(&self) -> f64 {
        self.value * self.unit.factor()
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

impl FromStr for Length {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_length(s)
    }
}

/// Split a leading float literal off `input`.
///
/// Accepts `[-+]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][-+]?[0-9]+)?` and returns
/// the value together with the unconsumed remainder. Shared with the path
/// data lexer, which uses the same number grammar.
pub fn split_number(input: &str) -> Option<(f64, &str)> {
    let bytes = input.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = pos - int_start;

    let mut frac_digits = 0;
    if pos < bytes.len() && bytes[pos] == b'.' {
        let dot = pos;
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
            frac_digits += 1;
        }
        if int_digits == 0 && frac_digits == 0 {
            pos = dot;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Exponent only counts when digits follow it
    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && matches!(bytes[exp], b'+' | b'-') {
            exp += 1;
        }
        let exp_digits_start = exp;
        while exp < bytes.len() && bytes[exp].is_ascii_digit() {
            exp += 1;
        }
        if exp > exp_digits_start {
            pos = exp;
        }
    }

    let value = input[..pos].parse::<f64>().ok()?;
    Some((value, &input[pos..]))
}

/// Parse a length string such as `"210mm"` or `"1052.36"`
///
/// * `input` - String to parse; surrounding whitespace is ignored
pub fn parse_length(input: &str) -> Result<Length, UnitError> {
    let trimmed = input.trim();
    let (value, rest) = split_number(trimmed).ok_or_else(|| UnitError::InvalidNumber {
        input: input.to_string(),
    })?;

    let suffix = rest.trim();
    let unit = suffix
        .parse::<LengthUnit>()
        .map_err(|_| UnitError::UnknownUnit {
            input: input.to_string(),
            unit: suffix.to_string(),
        })?;

    Ok(Length::new(value, unit))
}

/// Convert a length string to user units, falling back instead of failing
///
/// A string with no leading number yields `0.0`; an unknown unit suffix is
/// treated as user units. Both fallbacks are logged at warn level. Prefer
/// [`parse_length`] where the caller can handle the error.
pub fn unittouu(input: &str) -> f64 {
    match parse_length(input) {
        Ok(length) => length.to_user_units(),
        Err(UnitError::InvalidNumber { .. }) => {
            tracing::warn!(input, "length has no leading number, using 0");
            0.0
        }
        Err(UnitError::UnknownUnit { ref unit, .. }) => {
            tracing::warn!(input, unit = %unit, "unknown length unit, using user units");
            split_number(input.trim()).map(|(v, _)| v).unwrap_or(0.0)
        }
    }
}
