use crate::{
    layout::{Bounds, FieldType, Presence},
    prelude::{TrackType, Version},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Track (body line) fields
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrackField {
    Satellite,
    Class,
    Mjd,
    StartTime,
    Duration,
    Elevation,
    Azimuth,
    Refsv,
    Srsv,
    Refsys,
    Srsys,
    Dsg,
    Ioe,
    Mdtr,
    Smdt,
    Mdio,
    Smdi,
    Msio,
    Smsi,
    Isg,
    FrequencyChannel,
    HardwareChannel,
    CarrierCode,
    Checksum,
}

impl TrackField {
    /// Column title, as found in the header
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Satellite => "SAT",
            Self::Class => "CL",
            Self::Mjd => "MJD",
            Self::StartTime => "STTIME",
            Self::Duration => "TRKL",
            Self::Elevation => "ELV",
            Self::Azimuth => "AZTH",
            Self::Refsv => "REFSV",
            Self::Srsv => "SRSV",
            Self::Refsys => "REFSYS",
            Self::Srsys => "SRSYS",
            Self::Dsg => "DSG",
            Self::Ioe => "IOE",
            Self::Mdtr => "MDTR",
            Self::Smdt => "SMDT",
            Self::Mdio => "MDIO",
            Self::Smdi => "SMDI",
            Self::Msio => "MSIO",
            Self::Smsi => "SMSI",
            Self::Isg => "ISG",
            Self::FrequencyChannel => "FR",
            Self::HardwareChannel => "HC",
            Self::CarrierCode => "FRC",
            Self::Checksum => "CK",
        }
    }

    /// Readable name, used in error reports
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Satellite => "satellite",
            Self::Class => "common view class",
            Self::Mjd => "mjd",
            Self::StartTime => "start time",
            Self::Duration => "duration",
            Self::Elevation => "elevation",
            Self::Azimuth => "azimuth",
            Self::Refsv => "refsv",
            Self::Srsv => "srsv",
            Self::Refsys => "refsys",
            Self::Srsys => "srsys",
            Self::Dsg => "dsg",
            Self::Ioe => "ioe",
            Self::Mdtr => "mdtr",
            Self::Smdt => "smdt",
            Self::Mdio => "mdio",
            Self::Smdi => "smdi",
            Self::Msio => "msio",
            Self::Smsi => "smsi",
            Self::Isg => "isg",
            Self::FrequencyChannel => "frequency channel",
            Self::HardwareChannel => "hardware channel",
            Self::CarrierCode => "carrier code",
            Self::Checksum => "checksum",
        }
    }

    /// Measured ionospheric terms, only found in dual frequency tracks
    pub const fn is_ionospheric(&self) -> bool {
        matches!(self, Self::Msio | Self::Smsi | Self::Isg)
    }
}

/// Track column specifications. Offsets are byte offsets, `end` is exclusive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TrackColumn {
    pub field: TrackField,
    pub start: usize,
    pub end: usize,
    pub field_type: FieldType,
    pub bounds: Bounds,
}

impl TrackColumn {
    const fn new(
        field: TrackField,
        start: usize,
        width: usize,
        field_type: FieldType,
        bounds: Bounds,
    ) -> Self {
        Self {
            field,
            start,
            end: start + width,
            field_type,
            bounds,
        }
    }

    /// Returns this column's content. The line must have been
    /// verified against [TrackLayout::line_length] beforehand.
    pub fn extract<'a>(&self, line: &'a str) -> Option<&'a str> {
        line.get(self.start..self.end)
    }
}

/// Complete layout of a track line
#[derive(Debug, Clone, PartialEq)]
pub struct TrackLayout {
    pub columns: &'static [TrackColumn],
}

impl TrackLayout {
    /// Returns specifications for this field, if defined by this layout.
    pub fn column(&self, field: TrackField) -> Option<&TrackColumn> {
        self.columns.iter().find(|column| column.field == field)
    }

    /// Presence rule of this field, within this layout
    pub fn presence(&self, field: TrackField) -> Presence {
        if self.column(field).is_some() {
            Presence::Mandatory
        } else {
            Presence::Absent
        }
    }

    /// Expected line length
    pub fn line_length(&self) -> usize {
        self.columns.last().map(|column| column.end).unwrap_or(0)
    }

    /// Number of bytes protected by the checksum: everything preceding the CK column.
    pub fn checksum_span(&self) -> usize {
        self.column(TrackField::Checksum)
            .map(|column| column.start)
            .unwrap_or(0)
    }
}

use Bounds::*;
use FieldType::*;
use TrackField::*;

const FIXED: FieldType = FixedPoint { decimals: 1 };

const fn fixed(field: TrackField, start: usize, width: usize, bounds: Bounds) -> TrackColumn {
    TrackColumn::new(field, start, width, FIXED, bounds)
}

// Columns up to SMDI are shared by all revisions
const V1_SINGLE: [TrackColumn; 18] = [
    TrackColumn::new(Satellite, 0, 3, Code, Unbounded),
    TrackColumn::new(Class, 4, 2, Code, Unbounded),
    TrackColumn::new(Mjd, 7, 5, Integer, NonNegative),
    TrackColumn::new(StartTime, 13, 6, Text, Unbounded),
    TrackColumn::new(Duration, 20, 4, Integer, Positive),
    fixed(Elevation, 25, 3, Closed(0.0, 90.0)),
    fixed(Azimuth, 29, 4, HalfOpen(0.0, 360.0)),
    fixed(Refsv, 34, 11, Unbounded),
    fixed(Srsv, 46, 6, Unbounded),
    fixed(Refsys, 53, 11, Unbounded),
    fixed(Srsys, 65, 6, Unbounded),
    fixed(Dsg, 72, 4, NonNegative),
    TrackColumn::new(Ioe, 77, 3, Integer, NonNegative),
    fixed(Mdtr, 81, 4, Unbounded),
    fixed(Smdt, 86, 4, Unbounded),
    fixed(Mdio, 91, 4, Unbounded),
    fixed(Smdi, 96, 4, Unbounded),
    TrackColumn::new(Checksum, 101, 2, Hexadecimal, Unbounded),
];

const V1_DUAL: [TrackColumn; 21] = [
    TrackColumn::new(Satellite, 0, 3, Code, Unbounded),
    TrackColumn::new(Class, 4, 2, Code, Unbounded),
    TrackColumn::new(Mjd, 7, 5, Integer, NonNegative),
    TrackColumn::new(StartTime, 13, 6, Text, Unbounded),
    TrackColumn::new(Duration, 20, 4, Integer, Positive),
    fixed(Elevation, 25, 3, Closed(0.0, 90.0)),
    fixed(Azimuth, 29, 4, HalfOpen(0.0, 360.0)),
    fixed(Refsv, 34, 11, Unbounded),
    fixed(Srsv, 46, 6, Unbounded),
    fixed(Refsys, 53, 11, Unbounded),
    fixed(Srsys, 65, 6, Unbounded),
    fixed(Dsg, 72, 4, NonNegative),
    TrackColumn::new(Ioe, 77, 3, Integer, NonNegative),
    fixed(Mdtr, 81, 4, Unbounded),
    fixed(Smdt, 86, 4, Unbounded),
    fixed(Mdio, 91, 4, Unbounded),
    fixed(Smdi, 96, 4, Unbounded),
    fixed(Msio, 101, 4, Unbounded),
    fixed(Smsi, 106, 4, Unbounded),
    fixed(Isg, 111, 3, NonNegative),
    TrackColumn::new(Checksum, 115, 2, Hexadecimal, Unbounded),
];

const V2_SINGLE: [TrackColumn; 20] = [
    TrackColumn::new(Satellite, 0, 3, Code, Unbounded),
    TrackColumn::new(Class, 4, 2, Code, Unbounded),
    TrackColumn::new(Mjd, 7, 5, Integer, NonNegative),
    TrackColumn::new(StartTime, 13, 6, Text, Unbounded),
    TrackColumn::new(Duration, 20, 4, Integer, Positive),
    fixed(Elevation, 25, 3, Closed(0.0, 90.0)),
    fixed(Azimuth, 29, 4, HalfOpen(0.0, 360.0)),
    fixed(Refsv, 34, 11, Unbounded),
    fixed(Srsv, 46, 6, Unbounded),
    fixed(Refsys, 53, 11, Unbounded),
    fixed(Srsys, 65, 6, Unbounded),
    fixed(Dsg, 72, 4, NonNegative),
    TrackColumn::new(Ioe, 77, 3, Integer, NonNegative),
    fixed(Mdtr, 81, 4, Unbounded),
    fixed(Smdt, 86, 4, Unbounded),
    fixed(Mdio, 91, 4, Unbounded),
    fixed(Smdi, 96, 4, Unbounded),
    TrackColumn::new(FrequencyChannel, 101, 2, Integer, NonNegative),
    TrackColumn::new(HardwareChannel, 104, 2, Integer, NonNegative),
    TrackColumn::new(Checksum, 107, 2, Hexadecimal, Unbounded),
];

const V2_DUAL: [TrackColumn; 23] = [
    TrackColumn::new(Satellite, 0, 3, Code, Unbounded),
    TrackColumn::new(Class, 4, 2, Code, Unbounded),
    TrackColumn::new(Mjd, 7, 5, Integer, NonNegative),
    TrackColumn::new(StartTime, 13, 6, Text, Unbounded),
    TrackColumn::new(Duration, 20, 4, Integer, Positive),
    fixed(Elevation, 25, 3, Closed(0.0, 90.0)),
    fixed(Azimuth, 29, 4, HalfOpen(0.0, 360.0)),
    fixed(Refsv, 34, 11, Unbounded),
    fixed(Srsv, 46, 6, Unbounded),
    fixed(Refsys, 53, 11, Unbounded),
    fixed(Srsys, 65, 6, Unbounded),
    fixed(Dsg, 72, 4, NonNegative),
    TrackColumn::new(Ioe, 77, 3, Integer, NonNegative),
    fixed(Mdtr, 81, 4, Unbounded),
    fixed(Smdt, 86, 4, Unbounded),
    fixed(Mdio, 91, 4, Unbounded),
    fixed(Smdi, 96, 4, Unbounded),
    fixed(Msio, 101, 4, Unbounded),
    fixed(Smsi, 106, 4, Unbounded),
    fixed(Isg, 111, 3, NonNegative),
    TrackColumn::new(FrequencyChannel, 115, 2, Integer, NonNegative),
    TrackColumn::new(HardwareChannel, 118, 2, Integer, NonNegative),
    TrackColumn::new(Checksum, 121, 2, Hexadecimal, Unbounded),
];

const V2E_SINGLE: [TrackColumn; 21] = [
    TrackColumn::new(Satellite, 0, 3, Code, Unbounded),
    TrackColumn::new(Class, 4, 2, Code, Unbounded),
    TrackColumn::new(Mjd, 7, 5, Integer, NonNegative),
    TrackColumn::new(StartTime, 13, 6, Text, Unbounded),
    TrackColumn::new(Duration, 20, 4, Integer, Positive),
    fixed(Elevation, 25, 3, Closed(0.0, 90.0)),
    fixed(Azimuth, 29, 4, HalfOpen(0.0, 360.0)),
    fixed(Refsv, 34, 11, Unbounded),
    fixed(Srsv, 46, 6, Unbounded),
    fixed(Refsys, 53, 11, Unbounded),
    fixed(Srsys, 65, 6, Unbounded),
    fixed(Dsg, 72, 4, NonNegative),
    TrackColumn::new(Ioe, 77, 3, Integer, NonNegative),
    fixed(Mdtr, 81, 4, Unbounded),
    fixed(Smdt, 86, 4, Unbounded),
    fixed(Mdio, 91, 4, Unbounded),
    fixed(Smdi, 96, 4, Unbounded),
    TrackColumn::new(FrequencyChannel, 101, 2, Integer, NonNegative),
    TrackColumn::new(HardwareChannel, 104, 2, Integer, NonNegative),
    TrackColumn::new(CarrierCode, 107, 3, Text, Unbounded),
    TrackColumn::new(Checksum, 111, 2, Hexadecimal, Unbounded),
];

const V2E_DUAL: [TrackColumn; 24] = [
    TrackColumn::new(Satellite, 0, 3, Code, Unbounded),
    TrackColumn::new(Class, 4, 2, Code, Unbounded),
    TrackColumn::new(Mjd, 7, 5, Integer, NonNegative),
    TrackColumn::new(StartTime, 13, 6, Text, Unbounded),
    TrackColumn::new(Duration, 20, 4, Integer, Positive),
    fixed(Elevation, 25, 3, Closed(0.0, 90.0)),
    fixed(Azimuth, 29, 4, HalfOpen(0.0, 360.0)),
    fixed(Refsv, 34, 11, Unbounded),
    fixed(Srsv, 46, 6, Unbounded),
    fixed(Refsys, 53, 11, Unbounded),
    fixed(Srsys, 65, 6, Unbounded),
    fixed(Dsg, 72, 4, NonNegative),
    TrackColumn::new(Ioe, 77, 3, Integer, NonNegative),
    fixed(Mdtr, 81, 4, Unbounded),
    fixed(Smdt, 86, 4, Unbounded),
    fixed(Mdio, 91, 4, Unbounded),
    fixed(Smdi, 96, 4, Unbounded),
    fixed(Msio, 101, 4, Unbounded),
    fixed(Smsi, 106, 4, Unbounded),
    fixed(Isg, 111, 3, NonNegative),
    TrackColumn::new(FrequencyChannel, 115, 2, Integer, NonNegative),
    TrackColumn::new(HardwareChannel, 118, 2, Integer, NonNegative),
    TrackColumn::new(CarrierCode, 121, 3, Text, Unbounded),
    TrackColumn::new(Checksum, 125, 2, Hexadecimal, Unbounded),
];

static LAYOUTS: [TrackLayout; 6] = [
    TrackLayout {
        columns: &V1_SINGLE,
    },
    TrackLayout { columns: &V1_DUAL },
    TrackLayout {
        columns: &V2_SINGLE,
    },
    TrackLayout { columns: &V2_DUAL },
    TrackLayout {
        columns: &V2E_SINGLE,
    },
    TrackLayout {
        columns: &V2E_DUAL,
    },
];

/// Returns the track layout for this [Version] and [TrackType].
pub fn track_layout(version: Version, track_type: TrackType) -> &'static TrackLayout {
    let index = match version {
        Version::Version1 => 0,
        Version::Version2 => 2,
        Version::Version2E => 4,
    };
    match track_type {
        TrackType::SingleFrequency => &LAYOUTS[index],
        TrackType::DualFrequency => &LAYOUTS[index + 1],
    }
}

/// Presence rule of a track field, for this [Version].
/// Ionospheric terms are optional, because they depend on the [TrackType].
pub fn track_presence(version: Version, field: TrackField) -> Presence {
    let single = track_layout(version, TrackType::SingleFrequency).presence(field);
    let dual = track_layout(version, TrackType::DualFrequency).presence(field);
    match (single, dual) {
        (Presence::Mandatory, Presence::Mandatory) => Presence::Mandatory,
        (Presence::Absent, Presence::Absent) => Presence::Absent,
        _ => Presence::Optional,
    }
}
