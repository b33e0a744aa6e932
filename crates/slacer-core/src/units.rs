//! Unit conversion utilities
//!
//! Lengths are stored in millimeters. A field's unit only records how the
//! value is shown to the user, so conversion happens at the UI boundary:
//! [`to_display`] on the way out, [`to_canonical`] on the way in.

use crate::error::UnitError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Display unit of a length measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    /// Millimeters (canonical)
    #[serde(rename = "mm")]
    Millimeter,
    /// Inches
    #[serde(rename = "in")]
    Inch,
}

impl Default for LengthUnit {
    fn default() -> Self {
        Self::Millimeter
    }
}

impl LengthUnit {
    /// Short label used in settings and on radio inputs ("mm" or "in")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Inch => "in",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LengthUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" => Ok(Self::Millimeter),
            "in" | "inch" | "inches" => Ok(Self::Inch),
            _ => Err(UnitError::UnknownUnit {
                unit: s.to_string(),
            }),
        }
    }
}

fn ensure_finite(value: f64) -> Result<f64, UnitError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(UnitError::InvalidNumber {
            input: value.to_string(),
        })
    }
}

/// Convert a canonical millimeter value to the given display unit
pub fn to_display(value_mm: f64, unit: LengthUnit) -> Result<f64, UnitError> {
    let value_mm = ensure_finite(value_mm)?;
    Ok(match unit {
        LengthUnit::Millimeter => value_mm,
        LengthUnit::Inch => value_mm / MM_PER_INCH,
    })
}

/// Convert a value expressed in `unit` back to canonical millimeters
pub fn to_canonical(value: f64, unit: LengthUnit) -> Result<f64, UnitError> {
    let value = ensure_finite(value)?;
    Ok(match unit {
        LengthUnit::Millimeter => value,
        LengthUnit::Inch => value * MM_PER_INCH,
    })
}

/// Parse user input as a plain finite number
pub fn parse_number(input: &str) -> Result<f64, UnitError> {
    let trimmed = input.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| UnitError::InvalidNumber {
            input: input.to_string(),
        })
}

/// Parse user input typed in `unit` into canonical millimeters
pub fn parse_display(input: &str, unit: LengthUnit) -> Result<f64, UnitError> {
    to_canonical(parse_number(input)?, unit)
}

/// Format a millimeter value for display in `unit`, 3 decimal places
pub fn format_length(value_mm: f64, unit: LengthUnit) -> String {
    match to_display(value_mm, unit) {
        Ok(v) => format!("{:.3}", v),
        Err(_) => String::from("-"),
    }
}
