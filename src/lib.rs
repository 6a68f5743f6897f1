//! CGGTTS data parsing and validation.
//!
//! CGGTTS is the fixed-column ASCII format used to exchange GNSS common-view
//! time transfer measurements between laboratories. This crate reads the
//! three revisions (01, 02 and 2E), verifies every checksum and range
//! constraint, and exposes the result as a read-only [CGGTTS] document.
//!
//! ```
//! use cggtts_parser::prelude::*;
//!
//! let cggtts = CGGTTS::from_file("data/CGGTTS/GZSY8259.568")
//!     .unwrap();
//!
//! assert_eq!(cggtts.version(), Version::Version2E);
//! assert_eq!(cggtts.station(), "SY82");
//! assert_eq!(cggtts.len(), 6);
//!
//! for track in cggtts.tracks() {
//!     let _ = (track.sv(), track.epoch(), track.data().refsys);
//! }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod checksum;
pub mod errors;
pub mod header;
pub mod layout;
pub mod track;
pub mod version;

#[cfg(test)]
mod tests;

use itertools::Itertools;
use log::{debug, warn};

use std::{fs::File, io::Read, path::Path, str::FromStr};

pub mod prelude {
    pub use crate::{
        errors::{Error, ParsingError},
        header::{
            CarrierDelay, Code, Coordinates, Delay, Hardware, Header, ReferenceTime, SystemDelay,
        },
        track::{CommonViewClass, IonosphericData, Track, TrackData, TrackType},
        version::Version,
        CGGTTS,
    };
    // pub re-export
    pub use gnss_rs::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale};
}

use prelude::{
    Coordinates, Epoch, Error, Header, ParsingError, ReferenceTime, SystemDelay, Track, TrackType,
    Version, SV,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// CGGTTS document: one [Header] and its [Track]s, in file order.
/// Read-only once parsed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CGGTTS {
    header: Header,
    tracks: Vec<Track>,
}

impl CGGTTS {
    fn parse(content: &str, lenient: bool) -> Result<(Self, Vec<ParsingError>), ParsingError> {
        let (header, lines) = Header::parse(content)?;

        let mut tracks = Vec::with_capacity(64);
        let mut errors = Vec::new();

        for (line_number, line) in lines {
            if line.trim().is_empty() {
                continue;
            }

            match Track::parse(line, header.version(), header.track_type(), line_number) {
                Ok(track) => tracks.push(track),
                Err(e) => {
                    if lenient {
                        warn!("{}", e);
                        errors.push(e);
                    } else {
                        return Err(e);
                    }
                },
            }
        }

        debug!(
            "{} - CGGTTS {}: {} tracks ({} rejected)",
            header.station(),
            header.version(),
            tracks.len(),
            errors.len()
        );

        Ok((Self { header, tracks }, errors))
    }

    /// Parses CGGTTS content, tolerating invalid tracks.
    /// Invalid tracks are left out and their errors returned, in line order.
    /// Any header error still aborts the process.
    pub fn parse_lenient(content: &str) -> Result<(Self, Vec<ParsingError>), ParsingError> {
        Self::parse(content, true)
    }

    /// Parses CGGTTS from any [Read]able. Content must be valid UTF-8.
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(Self::from_str(&content)?)
    }

    /// Parses CGGTTS from a local file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut fd = File::open(path)?;
        Self::from_reader(&mut fd)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn version(&self) -> Version {
        self.header.version()
    }

    /// Station / laboratory name
    pub fn station(&self) -> &str {
        self.header.station()
    }

    pub fn apc_coordinates(&self) -> Coordinates {
        self.header.apc_coordinates()
    }

    pub fn delay(&self) -> &SystemDelay {
        self.header.delay()
    }

    pub fn reference_time(&self) -> &ReferenceTime {
        self.header.reference_time()
    }

    pub fn track_type(&self) -> TrackType {
        self.header.track_type()
    }

    /// True if tracks carry measured ionospheric terms
    pub fn is_dual_frequency(&self) -> bool {
        self.track_type() == TrackType::DualFrequency
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Iterates over all [Track]s, in file order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> + '_ {
        self.tracks.iter()
    }

    /// Returns i-th [Track], in file order.
    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Returns the list of [SV] that were tracked, without duplicates.
    pub fn satellites(&self) -> Vec<SV> {
        self.tracks
            .iter()
            .map(|trk| trk.sv())
            .unique()
            .sorted()
            .collect()
    }

    /// Iterates over [Track]s of this [SV].
    pub fn sv_tracks(&self, sv: SV) -> impl Iterator<Item = &Track> + '_ {
        self.tracks.iter().filter(move |trk| trk.sv() == sv)
    }

    /// Earliest tracking start [Epoch]
    pub fn first_epoch(&self) -> Option<Epoch> {
        self.tracks.iter().map(|trk| trk.epoch()).min()
    }

    /// Latest tracking start [Epoch]
    pub fn last_epoch(&self) -> Option<Epoch> {
        self.tracks.iter().map(|trk| trk.epoch()).max()
    }
}

impl FromStr for CGGTTS {
    type Err = ParsingError;

    /// Parses CGGTTS content. The first invalid line aborts the process.
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let (cggtts, _) = Self::parse(content, false)?;
        Ok(cggtts)
    }
}
