use crate::{
    checksum,
    errors::ParsingError,
    layout::{track_layout, TrackField, TrackLayout},
    prelude::{
        CommonViewClass, Constellation, Duration, Epoch, IonosphericData, Track, TrackData,
        TrackType, Version, SV,
    },
};

use std::str::FromStr;

/// Combined solution, accepted for any constellation
const COMBINED_PRN: u8 = 99;

/// Valid PRN range, per constellation
fn prn_range(constellation: Constellation) -> (u8, u8) {
    match constellation {
        Constellation::Glonass => (1, 27),
        Constellation::Galileo => (1, 36),
        Constellation::BeiDou => (1, 63),
        Constellation::QZSS => (1, 10),
        Constellation::IRNSS => (1, 14),
        Constellation::SBAS => (20, 58),
        _ => (1, 32),
    }
}

/// Parses the SAT column. A bare number is a GPS PRN, 01 and 02 files only.
fn parse_sv(content: &str, version: Version) -> Option<SV> {
    let content = content.trim();

    let (constellation, prn) = match content.chars().next()? {
        c if c.is_ascii_digit() => {
            if version == Version::Version2E {
                return None;
            }
            (Constellation::GPS, content)
        },
        c => {
            let constellation = match c {
                'G' => Constellation::GPS,
                'R' => Constellation::Glonass,
                'E' => Constellation::Galileo,
                'C' => Constellation::BeiDou,
                'J' => Constellation::QZSS,
                'I' => Constellation::IRNSS,
                'S' => Constellation::SBAS,
                _ => return None,
            };
            (constellation, content[1..].trim_start())
        },
    };

    let prn = prn.parse::<u8>().ok()?;
    let (min, max) = prn_range(constellation);

    if prn == COMBINED_PRN || (prn >= min && prn <= max) {
        Some(SV::new(constellation, prn))
    } else {
        None
    }
}

/// Parses the STTIME (hhmmss) column, into seconds of day.
fn parse_start_time(content: &str) -> Option<u32> {
    if content.len() != 6 || !content.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hh = content[0..2].parse::<u32>().ok()?;
    let mm = content[2..4].parse::<u32>().ok()?;
    let ss = content[4..6].parse::<u32>().ok()?;

    if hh < 24 && mm < 60 && ss < 60 {
        Some(hh * 3600 + mm * 60 + ss)
    } else {
        None
    }
}

/// Column extraction and conversion, for one line
struct Columns<'a> {
    layout: &'static TrackLayout,
    line: &'a str,
    line_number: usize,
}

impl<'a> Columns<'a> {
    fn raw(&self, field: TrackField) -> Result<&'a str, ParsingError> {
        self.layout
            .column(field)
            .and_then(|column| column.extract(self.line))
            .ok_or_else(|| {
                ParsingError::track(self.line_number, field.name(), field.label(), self.line)
            })
    }

    /// Integer or fixed point column, scaled then verified against the column bounds.
    fn number(&self, field: TrackField) -> Result<f64, ParsingError> {
        let raw = self.raw(field)?.trim();

        let column = self.layout.column(field).ok_or_else(|| {
            ParsingError::track(self.line_number, field.name(), field.label(), raw)
        })?;

        let value = raw.parse::<i64>().map_err(|_| {
            ParsingError::track(self.line_number, field.name(), column.field_type, raw)
        })?;

        let value = column.field_type.scale(value);

        if !column.bounds.contains(value) {
            return Err(ParsingError::track(
                self.line_number,
                field.name(),
                column.bounds,
                value,
            ));
        }

        Ok(value)
    }

    /// Column that only some layouts define
    fn optional_number(&self, field: TrackField) -> Result<Option<f64>, ParsingError> {
        if self.layout.column(field).is_some() {
            Ok(Some(self.number(field)?))
        } else {
            Ok(None)
        }
    }
}

impl Track {
    /// Parses a [Track] from a body line, following the layout of this
    /// [Version] and [TrackType]. The line checksum is verified before
    /// any field is converted. `line_number` is only used in error reports.
    pub fn parse(
        line: &str,
        version: Version,
        track_type: TrackType,
        line_number: usize,
    ) -> Result<Self, ParsingError> {
        let layout = track_layout(version, track_type);
        let line = line.trim_end();

        if line.len() != layout.line_length() {
            return Err(ParsingError::track(
                line_number,
                "line length",
                format!("{} characters", layout.line_length()),
                format!("{} characters", line.len()),
            ));
        }

        let columns = Columns {
            layout,
            line,
            line_number,
        };

        let ck = columns.raw(TrackField::Checksum)?;
        let declared = checksum::parse_declared(ck).ok_or_else(|| {
            ParsingError::track(line_number, "checksum", "hexadecimal value", ck)
        })?;

        let span = line.get(..layout.checksum_span()).ok_or_else(|| {
            ParsingError::track(line_number, "checksum", "ASCII content", line)
        })?;

        let computed = checksum::checksum(span);
        if computed != declared {
            return Err(ParsingError::ChecksumMismatch {
                line: line_number,
                computed,
                declared,
            });
        }

        let sat = columns.raw(TrackField::Satellite)?;
        let sv = parse_sv(sat, version).ok_or_else(|| {
            ParsingError::track(line_number, "satellite", "valid PRN (like G01)", sat.trim())
        })?;

        let cl = columns.raw(TrackField::Class)?;
        let class = CommonViewClass::from_str(cl.trim()).map_err(|_| {
            ParsingError::track(line_number, "common view class", "99 or FF", cl.trim())
        })?;

        let mjd = columns.number(TrackField::Mjd)?;

        let sttime = columns.raw(TrackField::StartTime)?;
        let seconds_of_day = parse_start_time(sttime).ok_or_else(|| {
            ParsingError::track(line_number, "start time", "hhmmss", sttime)
        })?;

        let epoch = Epoch::from_mjd_utc(mjd) + Duration::from_seconds(seconds_of_day as f64);
        let duration = Duration::from_seconds(columns.number(TrackField::Duration)?);

        let elevation_deg = columns.number(TrackField::Elevation)?;
        let azimuth_deg = columns.number(TrackField::Azimuth)?;

        let data = TrackData {
            refsv: columns.number(TrackField::Refsv)?,
            srsv: columns.number(TrackField::Srsv)?,
            refsys: columns.number(TrackField::Refsys)?,
            srsys: columns.number(TrackField::Srsys)?,
            dsg: columns.number(TrackField::Dsg)?,
            ioe: columns.number(TrackField::Ioe)? as u16,
            mdtr: columns.number(TrackField::Mdtr)?,
            smdt: columns.number(TrackField::Smdt)?,
            mdio: columns.number(TrackField::Mdio)?,
            smdi: columns.number(TrackField::Smdi)?,
        };

        let iono = match track_type {
            TrackType::DualFrequency => Some(IonosphericData {
                msio: columns.number(TrackField::Msio)?,
                smsi: columns.number(TrackField::Smsi)?,
                isg: columns.number(TrackField::Isg)?,
            }),
            TrackType::SingleFrequency => None,
        };

        let fdma_channel = columns
            .optional_number(TrackField::FrequencyChannel)?
            .map(|fr| fr as u8);

        let hc = columns
            .optional_number(TrackField::HardwareChannel)?
            .map(|hc| hc as u8);

        let frc = match layout.column(TrackField::CarrierCode) {
            Some(_) => {
                let frc = columns.raw(TrackField::CarrierCode)?.trim();
                if frc.is_empty() {
                    return Err(ParsingError::track(
                        line_number,
                        "carrier code",
                        "carrier code (like L1C)",
                        frc,
                    ));
                }
                Some(frc.to_string())
            },
            None => None,
        };

        Ok(Self {
            sv,
            class,
            epoch,
            duration,
            elevation_deg,
            azimuth_deg,
            data,
            iono,
            fdma_channel,
            hc,
            frc,
        })
    }
}
