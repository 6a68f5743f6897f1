//! Measurement system delays
use gnss_rs::prelude::Constellation;
use std::str::FromStr;
use strum_macros::{Display, EnumString};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Carrier / modulation code a delay applies to
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Code {
    C1,
    C2,
    P1,
    P2,
    L1C,
    L2C,
    L5,
    E1,
    E5,
    E5a,
    E5b,
    E6,
    B1,
    B1C,
    B2,
    B2a,
    B2b,
    B3,
}

/// Delay kind and value, in nanoseconds
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Delay {
    /// Internal delay (INT DLY): receiver and antenna, excluding cable
    Internal(f64),
    /// System delay (SYS DLY): everything but the reference delay
    System(f64),
    /// Total delay (TOT DLY)
    Total(f64),
}

impl Delay {
    /// Value in nanoseconds
    pub fn value(&self) -> f64 {
        match self {
            Self::Internal(v) | Self::System(v) | Self::Total(v) => *v,
        }
    }

    /// Value in seconds
    pub fn value_seconds(&self) -> f64 {
        self.value() * 1.0E-9
    }
}

/// Frequency dependent [Delay]. Historical revisions do not specify
/// the constellation and code.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CarrierDelay {
    pub constellation: Option<Constellation>,
    pub code: Option<Code>,
    pub delay: Delay,
}

/// Complete description of the measurement system delays.
/// Values are in nanoseconds, absent values are never defaulted.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SystemDelay {
    /// Antenna cable delay (CAB DLY)
    pub cable_delay: Option<f64>,
    /// Local reference delay (REF DLY)
    pub reference_delay: Option<f64>,
    /// Frequency dependent delays (INT, SYS or TOT DLY)
    pub delays: Vec<CarrierDelay>,
    /// Calibration process identifier (CAL_ID)
    pub calibration_id: Option<String>,
}

impl SystemDelay {
    /// Iterates over all [Delay::Internal] values.
    pub fn internal_delays(&self) -> impl Iterator<Item = &CarrierDelay> + '_ {
        self.delays
            .iter()
            .filter(|d| matches!(d.delay, Delay::Internal(_)))
    }

    /// Returns the total delay (in ns) for this code.
    /// Use `None` for uncoded (historical) delays.
    /// Returns None if the delay description is not complete for this code.
    pub fn total_delay(&self, code: Option<Code>) -> Option<f64> {
        let carrier = self.delays.iter().find(|d| d.code == code)?;
        self.total(carrier)
    }

    /// Returns all total delays, per code.
    pub fn total_delays(&self) -> Vec<(Option<Code>, f64)> {
        self.delays
            .iter()
            .filter_map(|d| Some((d.code, self.total(d)?)))
            .collect()
    }

    fn total(&self, carrier: &CarrierDelay) -> Option<f64> {
        match carrier.delay {
            Delay::Internal(v) => Some(v + self.cable_delay? + self.reference_delay?),
            Delay::System(v) => Some(v + self.reference_delay?),
            Delay::Total(v) => Some(v),
        }
    }
}

/// Identifies a constellation from the three letter codes used in delay descriptions.
fn parse_constellation(code: &str) -> Option<Constellation> {
    match code.to_ascii_uppercase().as_str() {
        "GPS" => Some(Constellation::GPS),
        "GLO" => Some(Constellation::Glonass),
        "GAL" => Some(Constellation::Galileo),
        "BDS" => Some(Constellation::BeiDou),
        "QZS" | "QZSS" => Some(Constellation::QZSS),
        "IRN" | "NAV" => Some(Constellation::IRNSS),
        "SBA" | "SBAS" => Some(Constellation::SBAS),
        _ => None,
    }
}

/// Parses a single delay value, like `237.0 ns`.
pub(crate) fn parse_delay_value(content: &str) -> Option<f64> {
    let content = content.trim();
    let content = content.strip_suffix("ns").unwrap_or(content);
    f64::from_str(content.trim()).ok()
}

/// Parses a delay list, like `34.6 ns (GAL E1), 25.6 ns (GAL E5a)`.
pub(crate) fn parse_carrier_delays(
    content: &str,
    delay: fn(f64) -> Delay,
) -> Option<Vec<CarrierDelay>> {
    let mut delays = Vec::with_capacity(4);

    for item in content.split(',') {
        let item = item.trim();

        let (value, rem) = match item.split_once("ns") {
            Some((value, rem)) => (value, rem.trim()),
            None => (item, ""),
        };

        let value = f64::from_str(value.trim()).ok()?;

        let (constellation, code) = if rem.is_empty() {
            (None, None)
        } else {
            let inner = rem.strip_prefix('(')?.strip_suffix(')')?;
            let mut tokens = inner.split_ascii_whitespace();
            match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(code), None, None) => (None, Some(Code::from_str(code).ok()?)),
                (Some(constellation), Some(code), None) => (
                    Some(parse_constellation(constellation)?),
                    Some(Code::from_str(code).ok()?),
                ),
                _ => return None,
            }
        };

        delays.push(CarrierDelay {
            constellation,
            code,
            delay: delay(value),
        });
    }

    Some(delays)
}
