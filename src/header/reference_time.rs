use hifitime::TimeScale;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reference Time System
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReferenceTime {
    /// TAI: Temps Atomic International
    TAI,
    /// UTC: Universal Coordinate Time
    UTC,
    /// UTC(k) laboratory local copy
    UTCk(String),
    /// Custom Reference time system
    Custom(String),
}

impl Default for ReferenceTime {
    fn default() -> Self {
        Self::UTC
    }
}

impl std::str::FromStr for ReferenceTime {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("TAI") {
            Ok(Self::TAI)
        } else if s.eq_ignore_ascii_case("UTC") {
            Ok(Self::UTC)
        } else if s.starts_with("UTC(") && s.ends_with(')') {
            let len = s.len();
            let utc_k = s[4..len - 1].trim();
            Ok(Self::UTCk(utc_k.to_string()))
        } else {
            Ok(Self::Custom(s.to_string()))
        }
    }
}

impl ReferenceTime {
    /// Returns the [TimeScale] this reference realizes, when it is a known one.
    /// UTC(k) is a local realization of UTC.
    pub fn timescale(&self) -> Option<TimeScale> {
        match self {
            Self::TAI => Some(TimeScale::TAI),
            Self::UTC | Self::UTCk(_) => Some(TimeScale::UTC),
            Self::Custom(_) => None,
        }
    }
}

impl std::fmt::Display for ReferenceTime {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::TAI => fmt.write_str("TAI"),
            Self::UTC => fmt.write_str("UTC"),
            Self::UTCk(lab) => write!(fmt, "UTC({})", lab),
            Self::Custom(s) => fmt.write_str(s),
        }
    }
}
