// Copyright 2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! Human-readable hex rendering of buffer contents, for debugging only.

use crate::constants::DUMP_BYTES_PER_LINE;
use pretty_hex::{config_hex, HexConfig};
use std::fmt::{self, Display, Formatter};

/// Renders a byte slice as a labeled hex and ASCII dump.
///
/// ```
/// use packet_stream::HexDump;
/// let text = HexDump::new("Stream Total : ", b"AB\x00").to_string();
/// assert!(text.starts_with("Stream Total : 3 bytes\n"));
/// assert!(text.contains("41 42 00"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HexDump<'a> {
    label: &'a str,
    bytes: &'a [u8],
}

impl<'a> HexDump<'a> {
    pub fn new(label: &'a str, bytes: &'a [u8]) -> Self {
        Self { label, bytes }
    }

    /// Number of bytes being rendered.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Display for HexDump<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}{} bytes", self.label, self.bytes.len())?;
        if self.bytes.is_empty() {
            return Ok(());
        }
        let cfg = HexConfig {
            title: false,
            width: DUMP_BYTES_PER_LINE,
            ..HexConfig::default()
        };
        writeln!(f, "{}", config_hex(&self.bytes, cfg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn empty() {
        let dump = HexDump::new("x: ", &[]);
        assert!(dump.is_empty());
        assert_eq!(dump.to_string(), "x: 0 bytes\n");
    }

    #[test]
    fn wraps_lines() {
        let data = hex!("00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f 48 69");
        let dump = HexDump::new("", &data);
        assert_eq!(dump.len(), 18);
        let text = dump.to_string();
        let lines: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "18 bytes");
        assert!(lines[1].contains("0c 0d 0e 0f"));
        assert!(lines[2].contains("48 69"));
        assert!(lines[2].contains("Hi"));
    }
}
