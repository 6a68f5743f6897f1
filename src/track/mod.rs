//! CGGTTS tracks: one satellite pass per body line
mod parsing;

use crate::prelude::{Duration, Epoch, SV};
use strum_macros::{Display, EnumString};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Describes whether this common view is based on a unique
/// satellite vehicle, or a combination of SVs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CommonViewClass {
    /// Single satellite, single channel
    #[strum(serialize = "99")]
    SingleChannel,
    /// Combination of satellites, or multi channel
    #[strum(serialize = "FF")]
    MultiChannel,
}

/// Single or dual frequency tracks. Dual frequency tracks
/// carry measured ionospheric terms.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrackType {
    #[default]
    SingleFrequency,
    DualFrequency,
}

/// Track measurements. Time offsets are in nanoseconds,
/// their derivatives in picoseconds per second.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackData {
    /// Satellite onboard clock offset to local clock (ns)
    pub refsv: f64,
    /// REFSV derivative (ps/s)
    pub srsv: f64,
    /// Satellite onboard clock offset to GNSS timescale (ns)
    pub refsys: f64,
    /// REFSYS derivative (ps/s)
    pub srsys: f64,
    /// DSG: REFSYS root mean square (ns)
    pub dsg: f64,
    /// Issue of Ephemeris
    pub ioe: u16,
    /// MDTR: modeled troposphere delay (ns)
    pub mdtr: f64,
    /// SMDT: MDTR derivative (ps/s)
    pub smdt: f64,
    /// MDIO: modeled ionosphere delay (ns)
    pub mdio: f64,
    /// SMDI: MDIO derivative (ps/s)
    pub smdi: f64,
}

/// Measured ionospheric terms, from dual frequency receivers
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IonosphericData {
    /// MSIO: measured ionosphere delay (ns)
    pub msio: f64,
    /// SMSI: MSIO derivative (ps/s)
    pub smsi: f64,
    /// ISG: MSIO root mean square (ns)
    pub isg: f64,
}

/// CGGTTS track. Read-only, built by [Track::parse].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Track {
    sv: SV,
    class: CommonViewClass,
    epoch: Epoch,
    duration: Duration,
    elevation_deg: f64,
    azimuth_deg: f64,
    data: TrackData,
    iono: Option<IonosphericData>,
    fdma_channel: Option<u8>,
    hc: Option<u8>,
    frc: Option<String>,
}

impl Track {
    /// Satellite vehicle. PRN 99 stands for a combination of satellites.
    pub fn sv(&self) -> SV {
        self.sv
    }

    pub fn class(&self) -> CommonViewClass {
        self.class
    }

    /// Tracking start time (UTC)
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Tracking duration
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// [Epoch] at midtrack
    pub fn midtrack(&self) -> Epoch {
        self.epoch + Duration::from_seconds(self.duration.to_seconds() / 2.0)
    }

    /// Elevation at midtrack, in degrees
    pub fn elevation_deg(&self) -> f64 {
        self.elevation_deg
    }

    /// Azimuth at midtrack, in degrees
    pub fn azimuth_deg(&self) -> f64 {
        self.azimuth_deg
    }

    pub fn data(&self) -> &TrackData {
        &self.data
    }

    /// Measured ionospheric terms, dual frequency tracks only
    pub fn iono(&self) -> Option<&IonosphericData> {
        self.iono.as_ref()
    }

    pub fn has_ionospheric_data(&self) -> bool {
        self.iono.is_some()
    }

    pub fn track_type(&self) -> TrackType {
        if self.iono.is_some() {
            TrackType::DualFrequency
        } else {
            TrackType::SingleFrequency
        }
    }

    /// Glonass FDMA channel (FR). 0 for other constellations,
    /// None for revisions that do not define it.
    pub fn frequency_channel(&self) -> Option<u8> {
        self.fdma_channel
    }

    /// Receiver hardware channel (HC)
    pub fn hardware_channel(&self) -> Option<u8> {
        self.hc
    }

    /// Carrier code (FRC), like `L1C`
    pub fn carrier_code(&self) -> Option<&str> {
        self.frc.as_deref()
    }

    /// True if this track combines several satellites (PRN 99)
    pub fn is_combination(&self) -> bool {
        self.sv.prn == 99
    }
}
