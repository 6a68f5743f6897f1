use thiserror::Error;

/// Errors that may rise when parsing CGGTTS content.
/// Line numbers are 1-based and count from the very first line of the file.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParsingError {
    /// First line declares a revision we do not support
    #[error("non supported CGGTTS version \"{0}\"")]
    VersionUnsupported(String),
    /// Missing, blank or invalid header field, or truncated header block
    #[error("line {line}: invalid {field}: expecting {expected}, found \"{found}\"")]
    HeaderFormat {
        line: usize,
        field: &'static str,
        expected: String,
        found: String,
    },
    /// Track field that does not convert, violates its range,
    /// or line that does not match the resolved layout.
    #[error("line {line}: invalid {field}: expecting {expected}, found \"{found}\"")]
    TrackFormat {
        line: usize,
        field: &'static str,
        expected: String,
        found: String,
    },
    /// Computed checksum disagrees with the declared one
    #[error("line {line}: checksum mismatch (computed {computed:02X}, declared {declared:02X})")]
    ChecksumMismatch {
        line: usize,
        computed: u8,
        declared: u8,
    },
}

impl ParsingError {
    /// Line number (1-based) this error relates to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::VersionUnsupported(_) => Some(1),
            Self::HeaderFormat { line, .. }
            | Self::TrackFormat { line, .. }
            | Self::ChecksumMismatch { line, .. } => Some(*line),
        }
    }

    /// Name of the faulty field, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::HeaderFormat { field, .. } | Self::TrackFormat { field, .. } => Some(field),
            Self::ChecksumMismatch { .. } => Some("checksum"),
            Self::VersionUnsupported(_) => Some("version"),
        }
    }

    pub(crate) fn header(
        line: usize,
        field: &'static str,
        expected: impl ToString,
        found: impl ToString,
    ) -> Self {
        Self::HeaderFormat {
            line,
            field,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub(crate) fn track(
        line: usize,
        field: &'static str,
        expected: impl ToString,
        found: impl ToString,
    ) -> Self {
        Self::TrackFormat {
            line,
            field,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

/// Errors that may rise when reading CGGTTS from a file or any [std::io::Read]able.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing error: {0}")]
    Parsing(#[from] ParsingError),
}

#[cfg(test)]
mod test {
    use super::ParsingError;

    #[test]
    fn error_location() {
        let error = ParsingError::track(12, "azimuth", "value within [0, 360)", "400.0");
        assert_eq!(error.line(), Some(12));
        assert_eq!(error.field(), Some("azimuth"));
        assert_eq!(
            error.to_string(),
            "line 12: invalid azimuth: expecting value within [0, 360), found \"400.0\""
        );

        let error = ParsingError::ChecksumMismatch {
            line: 20,
            computed: 0xD3,
            declared: 0x0A,
        };
        assert_eq!(error.line(), Some(20));
        assert_eq!(
            error.to_string(),
            "line 20: checksum mismatch (computed D3, declared 0A)"
        );
    }
}
