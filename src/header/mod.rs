mod delay;
mod parsing;
mod reference_time;

pub use delay::{CarrierDelay, Code, Delay, SystemDelay};
pub use parsing::Lines;
pub use reference_time::ReferenceTime;

use crate::prelude::{Epoch, TrackType, Version};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Antenna phase center coordinates, in meters (ECEF)
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// GNSS receiver or ionospheric measurement system description
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hardware {
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
    pub year: Option<u16>,
    pub release: String,
}

impl std::fmt::Display for Hardware {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {} {}", self.manufacturer, self.model, self.serial_number)?;
        if let Some(year) = self.year {
            write!(f, " {}", year)?;
        }
        if !self.release.is_empty() {
            write!(f, " {}", self.release)?;
        }
        Ok(())
    }
}

/// CGGTTS file header. Read-only, built by [Header::parse].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Header {
    pub(crate) version: Version,
    pub(crate) track_type: TrackType,
    pub(crate) revision_date: Epoch,
    pub(crate) receiver: Hardware,
    pub(crate) nb_channels: u16,
    pub(crate) ims_hardware: Option<Hardware>,
    pub(crate) station: String,
    pub(crate) apc_coordinates: Coordinates,
    pub(crate) reference_frame: String,
    pub(crate) comments: Option<String>,
    pub(crate) delay: SystemDelay,
    pub(crate) reference_time: ReferenceTime,
}

impl Header {
    /// CGGTTS revision
    pub fn version(&self) -> Version {
        self.version
    }

    /// [TrackType] announced by the column titles.
    pub fn track_type(&self) -> TrackType {
        self.track_type
    }

    /// Revision date (REV DATE)
    pub fn revision_date(&self) -> Epoch {
        self.revision_date
    }

    /// GNSS receiver (RCVR)
    pub fn receiver(&self) -> &Hardware {
        &self.receiver
    }

    /// Number of receiver channels (CH)
    pub fn nb_channels(&self) -> u16 {
        self.nb_channels
    }

    /// Ionospheric Measurement System (IMS), if any
    pub fn ims_hardware(&self) -> Option<&Hardware> {
        self.ims_hardware.as_ref()
    }

    /// Station / laboratory (LAB)
    pub fn station(&self) -> &str {
        &self.station
    }

    /// Antenna phase center coordinates (X, Y, Z)
    pub fn apc_coordinates(&self) -> Coordinates {
        self.apc_coordinates
    }

    /// Reference frame (FRAME)
    pub fn reference_frame(&self) -> &str {
        &self.reference_frame
    }

    /// Comments, if any
    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }

    /// Measurement system delays
    pub fn delay(&self) -> &SystemDelay {
        &self.delay
    }

    /// Reference time (REF)
    pub fn reference_time(&self) -> &ReferenceTime {
        &self.reference_time
    }
}
