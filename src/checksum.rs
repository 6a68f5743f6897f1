//! CGGTTS checksum: sum of all bytes, modulo 256.
//!
//! The same calculation protects the header block
//! (from the first byte up to and including `CKSUM = `)
//! and every track line (every byte preceding the CK column).
//!
//! ```
//! use cggtts_parser::checksum::{checksum, verify};
//!
//! let line = "G99 99 59568 001000 0780 099 0099 +9999999999 +99999       +1536   +181   26 999 9999 +999 9999 +999 00 00 L1C ";
//! assert_eq!(checksum(line), 0xD3);
//! assert!(verify(line, 0xD3));
//! ```

/// Calculates the checksum of this content.
pub fn checksum(content: &str) -> u8 {
    content
        .bytes()
        .fold(0u8, |ck, byte| ck.wrapping_add(byte))
}

/// True if this content matches the declared checksum.
pub fn verify(content: &str, declared: u8) -> bool {
    checksum(content) == declared
}

/// Parses a declared (hexadecimal) checksum field.
pub fn parse_declared(field: &str) -> Option<u8> {
    let field = field.trim();
    if field.is_empty() || field.len() > 2 {
        return None;
    }
    u8::from_str_radix(field, 16).ok()
}

/// Running checksum, for content that is processed line by line.
#[derive(Debug, Default, Copy, Clone)]
pub(crate) struct Checksum(u8);

impl Checksum {
    /// Accumulates this content. Line terminators never contribute.
    pub fn update(&mut self, content: &str) {
        for byte in content.bytes() {
            if byte != b'\r' && byte != b'\n' {
                self.0 = self.0.wrapping_add(byte);
            }
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}
