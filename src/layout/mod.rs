//! Field layouts, per CGGTTS revision.
//!
//! CGGTTS is a positional format: the registry describes where each field
//! lives, how it converts and whether a given [Version] defines it.
//! Tables are static and may be consulted from any thread.
mod header;
mod track;

pub use header::{header_layout, HeaderColumn, HeaderField};
pub use track::{track_layout, track_presence, TrackColumn, TrackField, TrackLayout};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Semantic type of a field
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FieldType {
    /// Signed or unsigned integer
    Integer,
    /// Integer with a number of implied decimals
    FixedPoint { decimals: u8 },
    /// Real number with explicit decimal point
    Real,
    /// Short enumerated code
    Code,
    /// Free text
    Text,
    /// YYYY-MM-DD date
    Date,
    /// Hexadecimal value
    Hexadecimal,
    /// Delay list: `value ns (CONST CODE)`, comma separated
    Delay,
}

impl FieldType {
    /// Converts a raw integer, applying the implied decimals of [FieldType::FixedPoint].
    pub fn scale(&self, raw: i64) -> f64 {
        match self {
            Self::FixedPoint { decimals } => raw as f64 / 10.0_f64.powi(*decimals as i32),
            _ => raw as f64,
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Integer => f.write_str("integer"),
            Self::FixedPoint { decimals } => {
                write!(f, "fixed point number ({} implied decimal)", decimals)
            },
            Self::Real => f.write_str("real number"),
            Self::Code => f.write_str("code"),
            Self::Text => f.write_str("text"),
            Self::Date => f.write_str("YYYY-MM-DD date"),
            Self::Hexadecimal => f.write_str("hexadecimal value"),
            Self::Delay => f.write_str("delay in ns"),
        }
    }
}

/// Presence rule of a field, for a given [Version]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Presence {
    Mandatory,
    Optional,
    /// Not defined by this revision: never read
    Absent,
}

/// Semantic range of a numerical field
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Bounds {
    Unbounded,
    /// x >= 0
    NonNegative,
    /// x > 0
    Positive,
    /// min <= x <= max
    Closed(f64, f64),
    /// min <= x < max
    HalfOpen(f64, f64),
}

impl Bounds {
    pub fn contains(&self, value: f64) -> bool {
        match self {
            Self::Unbounded => true,
            Self::NonNegative => value >= 0.0,
            Self::Positive => value > 0.0,
            Self::Closed(min, max) => value >= *min && value <= *max,
            Self::HalfOpen(min, max) => value >= *min && value < *max,
        }
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Unbounded => f.write_str("any value"),
            Self::NonNegative => f.write_str("value >= 0"),
            Self::Positive => f.write_str("value > 0"),
            Self::Closed(min, max) => write!(f, "value within [{}, {}]", min, max),
            Self::HalfOpen(min, max) => write!(f, "value within [{}, {})", min, max),
        }
    }
}
