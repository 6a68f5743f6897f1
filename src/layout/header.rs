use crate::{
    layout::{FieldType, Presence},
    prelude::Version,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Header fields. Each header line is `LABEL = value`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HeaderField {
    RevisionDate,
    Receiver,
    NbChannels,
    Ims,
    Station,
    X,
    Y,
    Z,
    ReferenceFrame,
    Comments,
    InternalDelay,
    CableDelay,
    ReferenceDelay,
    SystemDelay,
    TotalDelay,
    CalibrationId,
    ReferenceTime,
    Checksum,
}

impl HeaderField {
    /// Line label, as found in the file
    pub const fn label(&self) -> &'static str {
        match self {
            Self::RevisionDate => "REV DATE",
            Self::Receiver => "RCVR",
            Self::NbChannels => "CH",
            Self::Ims => "IMS",
            Self::Station => "LAB",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::ReferenceFrame => "FRAME",
            Self::Comments => "COMMENTS",
            Self::InternalDelay => "INT DLY",
            Self::CableDelay => "CAB DLY",
            Self::ReferenceDelay => "REF DLY",
            Self::SystemDelay => "SYS DLY",
            Self::TotalDelay => "TOT DLY",
            Self::CalibrationId => "CAL_ID",
            Self::ReferenceTime => "REF",
            Self::Checksum => "CKSUM",
        }
    }
}

/// Header line specifications
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HeaderColumn {
    pub field: HeaderField,
    pub field_type: FieldType,
    pub presence: Presence,
}

impl HeaderColumn {
    const fn new(field: HeaderField, field_type: FieldType, presence: Presence) -> Self {
        Self {
            field,
            field_type,
            presence,
        }
    }

    pub const fn label(&self) -> &'static str {
        self.field.label()
    }

    /// Offset of the value, within the line.
    pub const fn value_offset(&self) -> usize {
        self.field.label().len() + " = ".len()
    }

    /// Returns the value portion of this line, if this line describes this field.
    pub fn extract<'a>(&self, line: &'a str) -> Option<&'a str> {
        let label = self.label();
        let rem = line.strip_prefix(label)?;
        if rem.starts_with(" = ") {
            Some(&line[self.value_offset()..])
        } else {
            None
        }
    }
}

use FieldType::*;
use HeaderField::*;
use Presence::*;

const V1_HEADER: [HeaderColumn; 18] = [
    HeaderColumn::new(RevisionDate, Date, Mandatory),
    HeaderColumn::new(Receiver, Text, Mandatory),
    HeaderColumn::new(NbChannels, Integer, Mandatory),
    HeaderColumn::new(Ims, Text, Optional),
    HeaderColumn::new(Station, Text, Mandatory),
    HeaderColumn::new(X, Real, Mandatory),
    HeaderColumn::new(Y, Real, Mandatory),
    HeaderColumn::new(Z, Real, Mandatory),
    HeaderColumn::new(ReferenceFrame, Text, Mandatory),
    HeaderColumn::new(Comments, Text, Mandatory),
    HeaderColumn::new(InternalDelay, Delay, Mandatory),
    HeaderColumn::new(CableDelay, Delay, Mandatory),
    HeaderColumn::new(ReferenceDelay, Delay, Mandatory),
    HeaderColumn::new(SystemDelay, Delay, Absent),
    HeaderColumn::new(TotalDelay, Delay, Absent),
    HeaderColumn::new(CalibrationId, Text, Absent),
    HeaderColumn::new(ReferenceTime, Code, Mandatory),
    HeaderColumn::new(Checksum, Hexadecimal, Mandatory),
];

// Identical to V1 as far as the header is concerned
const V2_HEADER: [HeaderColumn; 18] = V1_HEADER;

// Delays are either INT+CAB+REF, SYS+REF or TOT (checked once the header is complete)
const V2E_HEADER: [HeaderColumn; 18] = [
    HeaderColumn::new(RevisionDate, Date, Mandatory),
    HeaderColumn::new(Receiver, Text, Mandatory),
    HeaderColumn::new(NbChannels, Integer, Mandatory),
    HeaderColumn::new(Ims, Text, Optional),
    HeaderColumn::new(Station, Text, Mandatory),
    HeaderColumn::new(X, Real, Mandatory),
    HeaderColumn::new(Y, Real, Mandatory),
    HeaderColumn::new(Z, Real, Mandatory),
    HeaderColumn::new(ReferenceFrame, Text, Mandatory),
    HeaderColumn::new(Comments, Text, Mandatory),
    HeaderColumn::new(InternalDelay, Delay, Optional),
    HeaderColumn::new(CableDelay, Delay, Optional),
    HeaderColumn::new(ReferenceDelay, Delay, Optional),
    HeaderColumn::new(SystemDelay, Delay, Optional),
    HeaderColumn::new(TotalDelay, Delay, Optional),
    HeaderColumn::new(CalibrationId, Text, Optional),
    HeaderColumn::new(ReferenceTime, Code, Mandatory),
    HeaderColumn::new(Checksum, Hexadecimal, Mandatory),
];

/// Returns the header layout for this [Version].
pub fn header_layout(version: Version) -> &'static [HeaderColumn] {
    match version {
        Version::Version1 => &V1_HEADER,
        Version::Version2 => &V2_HEADER,
        Version::Version2E => &V2E_HEADER,
    }
}

#[cfg(test)]
mod test {
    use super::{header_layout, HeaderField};
    use crate::{layout::Presence, prelude::Version};

    fn presence(version: Version, field: HeaderField) -> Presence {
        header_layout(version)
            .iter()
            .find(|column| column.field == field)
            .map(|column| column.presence)
            .unwrap()
    }

    #[test]
    fn header_presence() {
        for version in [Version::Version1, Version::Version2, Version::Version2E] {
            assert_eq!(
                presence(version, HeaderField::Station),
                Presence::Mandatory
            );
            assert_eq!(presence(version, HeaderField::Ims), Presence::Optional);
            assert_eq!(
                presence(version, HeaderField::Checksum),
                Presence::Mandatory
            );
        }
        assert_eq!(
            presence(Version::Version1, HeaderField::TotalDelay),
            Presence::Absent
        );
        assert_eq!(
            presence(Version::Version1, HeaderField::InternalDelay),
            Presence::Mandatory
        );
        assert_eq!(
            presence(Version::Version2E, HeaderField::TotalDelay),
            Presence::Optional
        );
        assert_eq!(
            presence(Version::Version2E, HeaderField::CalibrationId),
            Presence::Optional
        );
    }

    #[test]
    fn value_extraction() {
        let layout = header_layout(Version::Version2E);

        let lab = layout
            .iter()
            .find(|column| column.field == HeaderField::Station)
            .unwrap();
        assert_eq!(lab.value_offset(), 6);
        assert_eq!(lab.extract("LAB = SY82"), Some("SY82"));
        assert_eq!(lab.extract("LABEL = SY82"), None);

        let reftime = layout
            .iter()
            .find(|column| column.field == HeaderField::ReferenceTime)
            .unwrap();
        assert_eq!(reftime.extract("REF = UTC(OP)"), Some("UTC(OP)"));
        assert_eq!(reftime.extract("REF DLY = 149.6 ns"), None);
    }
}
