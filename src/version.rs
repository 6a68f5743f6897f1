//! CGGTTS revisions
use strum_macros::{Display, EnumString};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// CGGTTS format revision. Selects the header and track layouts
/// for the remainder of the file.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Version {
    /// Historical GGTTS (GPS only) format
    #[strum(to_string = "01", serialize = "1")]
    Version1,
    /// CGGTTS 02, introduces GLONASS channels
    #[strum(to_string = "02", serialize = "2")]
    Version2,
    /// CGGTTS 2E, multi constellation and carrier codes
    #[default]
    #[strum(to_string = "2E")]
    Version2E,
}
