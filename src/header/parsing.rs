use crate::{
    checksum::{self, Checksum},
    errors::ParsingError,
    header::{
        delay::{parse_carrier_delays, parse_delay_value},
        Coordinates, Delay, Hardware, SystemDelay,
    },
    layout::{header_layout, HeaderColumn, HeaderField, Presence},
    prelude::{Epoch, Header, ReferenceTime, TrackType, Version},
};

use itertools::Itertools;
use log::debug;
use scan_fmt::scan_fmt;

use std::{collections::HashSet, str::FromStr};

/// Format tags, first line of the file
const FORMAT_TAGS: [&str; 2] = [
    "CGGTTS GENERIC DATA FORMAT VERSION",
    "GGTTS GPS DATA FORMAT VERSION",
];

/// Lines of CGGTTS content, with their 1-based line number.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Lines<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            inner: content.lines().enumerate(),
        }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = (usize, &'a str);
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(i, line)| (i + 1, line))
    }
}

fn parse_header_version(line: &str) -> Result<Version, ParsingError> {
    let format_error = || ParsingError::header(1, "version", "CGGTTS format tag", line);

    let (tag, version) = line.split_once('=').ok_or_else(format_error)?;

    let tag = tag.split_ascii_whitespace().join(" ");
    if !FORMAT_TAGS.contains(&tag.as_str()) {
        return Err(format_error());
    }

    let version = version.trim();
    let parsed = Version::from_str(version)
        .map_err(|_| ParsingError::VersionUnsupported(version.to_string()))?;

    // historical tag only describes 01 files
    if tag.eq(FORMAT_TAGS[1]) && parsed != Version::Version1 {
        return Err(ParsingError::header(
            1,
            "version",
            "01 for GGTTS GPS DATA FORMAT",
            version,
        ));
    }

    Ok(parsed)
}

fn parse_header_date(s: &str) -> Option<Epoch> {
    Epoch::from_format_str(s.trim(), "%Y-%m-%d").ok()
}

fn parse_hardware(s: &str) -> Option<Hardware> {
    let mut hw = Hardware::default();

    for (i, item) in s.split_ascii_whitespace().enumerate() {
        match i {
            0 => hw.manufacturer = item.to_string(),
            1 => hw.model = item.to_string(),
            2 => hw.serial_number = item.to_string(),
            3 => hw.year = Some(item.parse::<u16>().ok()?),
            4 => hw.release = item.to_string(),
            _ => {
                hw.release.push(' ');
                hw.release.push_str(item);
            },
        }
    }

    Some(hw)
}

fn parse_coordinate(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_suffix('m').unwrap_or(s);
    s.trim().parse::<f64>().ok()
}

fn parse_calibration_id(s: &str) -> Option<String> {
    let s = s.trim();
    let s = s.strip_prefix('=').unwrap_or(s).trim();
    if s.is_empty() || s.eq("NA") {
        None
    } else {
        Some(s.to_string())
    }
}

/// Header fields, collected line after line.
struct HeaderBuilder {
    version: Version,
    found: HashSet<HeaderField>,
    revision_date: Option<Epoch>,
    receiver: Option<Hardware>,
    nb_channels: Option<u16>,
    ims_hardware: Option<Hardware>,
    station: Option<String>,
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
    reference_frame: Option<String>,
    comments: Option<String>,
    delay: SystemDelay,
    reference_time: Option<ReferenceTime>,
}

impl HeaderBuilder {
    fn new(version: Version) -> Self {
        Self {
            version,
            found: HashSet::with_capacity(16),
            revision_date: None,
            receiver: None,
            nb_channels: None,
            ims_hardware: None,
            station: None,
            x: None,
            y: None,
            z: None,
            reference_frame: None,
            comments: None,
            delay: SystemDelay::default(),
            reference_time: None,
        }
    }

    fn supports(&self, field: HeaderField) -> bool {
        header_layout(self.version)
            .iter()
            .any(|column| column.field == field && column.presence != Presence::Absent)
    }

    /// Converts and stores this field value.
    fn field(
        &mut self,
        column: &HeaderColumn,
        value: &str,
        line: usize,
    ) -> Result<(), ParsingError> {
        let field = column.field;

        if value.trim().is_empty() {
            if column.presence == Presence::Mandatory {
                return Err(ParsingError::header(
                    line,
                    field.label(),
                    column.field_type,
                    value,
                ));
            }
            // blank optional field: not present
            return Ok(());
        }

        let invalid = || ParsingError::header(line, field.label(), column.field_type, value.trim());

        if self.found.contains(&field) {
            match field {
                HeaderField::InternalDelay
                | HeaderField::SystemDelay
                | HeaderField::TotalDelay
                | HeaderField::CalibrationId => {
                    debug!("line {}: {} redefined", line, field.label());
                },
                _ => {
                    return Err(ParsingError::header(
                        line,
                        field.label(),
                        "single definition",
                        value.trim(),
                    ));
                },
            }
        }

        match field {
            HeaderField::RevisionDate => {
                self.revision_date = Some(parse_header_date(value).ok_or_else(invalid)?);
            },
            HeaderField::Receiver => {
                self.receiver = Some(parse_hardware(value).ok_or_else(invalid)?);
            },
            HeaderField::NbChannels => {
                self.nb_channels = Some(value.trim().parse::<u16>().map_err(|_| invalid())?);
            },
            HeaderField::Ims => {
                // 99999: no IMS
                if value.trim() != "99999" {
                    self.ims_hardware = Some(parse_hardware(value).ok_or_else(invalid)?);
                }
            },
            HeaderField::Station => {
                self.station = Some(value.trim().to_string());
            },
            HeaderField::X => {
                self.x = Some(parse_coordinate(value).ok_or_else(invalid)?);
            },
            HeaderField::Y => {
                self.y = Some(parse_coordinate(value).ok_or_else(invalid)?);
            },
            HeaderField::Z => {
                self.z = Some(parse_coordinate(value).ok_or_else(invalid)?);
            },
            HeaderField::ReferenceFrame => {
                self.reference_frame = Some(value.trim().to_string());
            },
            HeaderField::Comments => {
                let comments = value.trim();
                if !comments.eq("NO COMMENTS") {
                    self.comments = Some(comments.to_string());
                }
            },
            HeaderField::InternalDelay | HeaderField::SystemDelay | HeaderField::TotalDelay => {
                let kind: fn(f64) -> Delay = match field {
                    HeaderField::InternalDelay => Delay::Internal,
                    HeaderField::SystemDelay => Delay::System,
                    _ => Delay::Total,
                };

                let mut content = value;

                if self.supports(HeaderField::CalibrationId) {
                    if let Some((delays, cal_id)) = value.split_once("CAL_ID") {
                        content = delays;
                        self.delay.calibration_id = parse_calibration_id(cal_id);
                        self.found.insert(HeaderField::CalibrationId);
                    }
                }

                let delays = parse_carrier_delays(content, kind).ok_or_else(invalid)?;
                self.delay.delays.extend(delays);
            },
            HeaderField::CableDelay => {
                self.delay.cable_delay = Some(parse_delay_value(value).ok_or_else(invalid)?);
            },
            HeaderField::ReferenceDelay => {
                self.delay.reference_delay = Some(parse_delay_value(value).ok_or_else(invalid)?);
            },
            HeaderField::CalibrationId => {
                self.delay.calibration_id = parse_calibration_id(value);
            },
            HeaderField::ReferenceTime => {
                self.reference_time = match ReferenceTime::from_str(value) {
                    Ok(reference_time) => Some(reference_time),
                    Err(never) => match never {},
                };
            },
            HeaderField::Checksum => {},
        }

        self.found.insert(field);
        Ok(())
    }

    /// Verifies the delay description of 2E headers:
    /// either INT+CAB+REF, SYS+REF or TOT.
    fn validate_delays(&self, line: usize) -> Result<(), ParsingError> {
        let has = |field: HeaderField| self.found.contains(&field);

        let specs = [
            HeaderField::InternalDelay,
            HeaderField::SystemDelay,
            HeaderField::TotalDelay,
        ]
        .into_iter()
        .filter(|field| has(*field))
        .collect::<Vec<_>>();

        let required: &[HeaderField] = match specs.as_slice() {
            [HeaderField::InternalDelay] => &[HeaderField::CableDelay, HeaderField::ReferenceDelay],
            [HeaderField::SystemDelay] => &[HeaderField::ReferenceDelay],
            [HeaderField::TotalDelay] => &[],
            _ => {
                return Err(ParsingError::header(
                    line,
                    "delay",
                    "one of INT DLY, SYS DLY or TOT DLY",
                    specs.iter().map(|field| field.label()).join(", "),
                ));
            },
        };

        for field in required {
            if !has(*field) {
                return Err(ParsingError::header(
                    line,
                    field.label(),
                    format!("{} along {}", field.label(), specs[0].label()),
                    "missing",
                ));
            }
        }

        Ok(())
    }

    fn build(self, track_type: TrackType, line: usize) -> Result<Header, ParsingError> {
        for column in header_layout(self.version) {
            if column.presence == Presence::Mandatory
                && column.field != HeaderField::Checksum
                && !self.found.contains(&column.field)
            {
                return Err(ParsingError::header(
                    line,
                    column.label(),
                    "mandatory field",
                    "missing",
                ));
            }
        }

        if self.version == Version::Version2E {
            self.validate_delays(line)?;
        }

        let missing = |field: HeaderField| {
            ParsingError::header(line, field.label(), "mandatory field", "missing")
        };

        Ok(Header {
            version: self.version,
            track_type,
            revision_date: self
                .revision_date
                .ok_or_else(|| missing(HeaderField::RevisionDate))?,
            receiver: self
                .receiver
                .ok_or_else(|| missing(HeaderField::Receiver))?,
            nb_channels: self
                .nb_channels
                .ok_or_else(|| missing(HeaderField::NbChannels))?,
            ims_hardware: self.ims_hardware,
            station: self.station.ok_or_else(|| missing(HeaderField::Station))?,
            apc_coordinates: Coordinates {
                x: self.x.ok_or_else(|| missing(HeaderField::X))?,
                y: self.y.ok_or_else(|| missing(HeaderField::Y))?,
                z: self.z.ok_or_else(|| missing(HeaderField::Z))?,
            },
            reference_frame: self
                .reference_frame
                .ok_or_else(|| missing(HeaderField::ReferenceFrame))?,
            comments: self.comments,
            delay: self.delay,
            reference_time: self
                .reference_time
                .ok_or_else(|| missing(HeaderField::ReferenceTime))?,
        })
    }
}

impl Header {
    /// Parses the [Header] block from CGGTTS content.
    /// Returns the [Header] and the remaining (body) [Lines].
    /// The [Version] is resolved from the first line, and selects the
    /// field layout for the remainder of the file.
    pub fn parse(content: &str) -> Result<(Self, Lines<'_>), ParsingError> {
        const CKSUM_PATTERN: &str = "CKSUM = ";

        let mut lines = Lines::new(content);
        let mut crc = Checksum::default();

        // VERSION must come first
        let (_, first_line) = lines
            .next()
            .ok_or_else(|| ParsingError::header(1, "version", "CGGTTS format tag", ""))?;

        let version = parse_header_version(first_line)?;
        crc.update(first_line);

        let layout = header_layout(version);
        let mut builder = HeaderBuilder::new(version);

        let mut last_line = 1;
        let mut cksum_line = None;

        for (line_number, line) in lines.by_ref() {
            last_line = line_number;
            let content = line.trim_start();

            let matched = layout
                .iter()
                .find_map(|column| column.extract(content).map(|value| (column, value)));

            match matched {
                Some((column, value)) if column.field == HeaderField::Checksum => {
                    // CRC covers up to the CKSUM pattern, included
                    let offset = line.len() - content.len() + CKSUM_PATTERN.len();
                    crc.update(&line[..offset]);

                    // the whole value must be hexadecimal
                    let declared = scan_fmt!(content, "CKSUM = {x}", String)
                        .filter(|hex| hex.as_str() == value.trim())
                        .and_then(|hex| checksum::parse_declared(&hex))
                        .ok_or_else(|| {
                            ParsingError::header(
                                line_number,
                                column.label(),
                                column.field_type,
                                value.trim(),
                            )
                        })?;

                    let computed = crc.value();
                    if computed != declared {
                        return Err(ParsingError::ChecksumMismatch {
                            line: line_number,
                            computed,
                            declared,
                        });
                    }

                    // CKSUM concludes the header fields
                    cksum_line = Some(line_number);
                    break;
                },
                Some((column, _)) if column.presence == Presence::Absent => {
                    crc.update(line);
                    debug!(
                        "line {}: {} is not defined in CGGTTS {}",
                        line_number,
                        column.label(),
                        version
                    );
                },
                Some((column, value)) => {
                    crc.update(line);
                    builder.field(column, value, line_number)?;
                },
                None => {
                    crc.update(line);
                    if !content.is_empty() {
                        debug!("line {}: unknown header line \"{}\"", line_number, line);
                    }
                },
            }
        }

        let cksum_line = cksum_line.ok_or_else(|| {
            ParsingError::header(last_line, "CKSUM", "CKSUM line", "end of file")
        })?;

        // blank line(s), then the column titles
        let (titles_line, titles) = lines
            .by_ref()
            .find(|(_, line)| !line.trim().is_empty())
            .ok_or_else(|| {
                ParsingError::header(cksum_line, "column titles", "column titles", "end of file")
            })?;

        match titles.split_ascii_whitespace().next() {
            Some("SAT") | Some("PRN") => {},
            _ => {
                return Err(ParsingError::header(
                    titles_line,
                    "column titles",
                    "SAT (or PRN) CL MJD STTIME..",
                    titles,
                ));
            },
        }

        let track_type = if titles.split_ascii_whitespace().any(|title| title == "MSIO") {
            TrackType::DualFrequency
        } else {
            TrackType::SingleFrequency
        };

        let (units_line, units) = lines.next().ok_or_else(|| {
            ParsingError::header(titles_line, "column units", "column units", "end of file")
        })?;

        if !units.contains("hhmmss") {
            return Err(ParsingError::header(
                units_line,
                "column units",
                "hhmmss s .1dg ..",
                units.trim(),
            ));
        }

        let header = builder.build(track_type, cksum_line)?;

        debug!(
            "{} - CGGTTS {} ({:?}) header parsed",
            header.station, header.version, header.track_type
        );

        Ok((header, lines))
    }
}
