//! Source-file splits parsing.
//!
//! A splits file groups address ranges under source files:
//!
//! ```text
//! Source/Game/Player.cpp:
//!     .text  start:0x80220548  end:0x80221AF0
//! ```
//!
//! A `Something.cpp:` line establishes the current file; each `.text`
//! line under it contributes one range. Anything else is ignored.

use std::fs;
use std::path::Path;

use crate::report::sanitize_field;
use crate::Result;

/// One source file's `.text` address range, half-open.
#[derive(Debug, Clone)]
pub struct FileRange {
    pub file: String,
    pub start: u64,
    pub end: u64,
}

/// Address-range to source-file classification.
#[derive(Debug, Default)]
pub struct SplitMapping {
    ranges: Vec<FileRange>,
}

impl SplitMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses splits text. Ranges appearing before any file header are
    /// dropped with a warning.
    pub fn parse(text: &str) -> Self {
        let mut mapping = Self::new();
        let mut current_file: Option<String> = None;

        for (number, line) in text.lines().enumerate() {
            let trimmed = line.trim();

            if let Some(index) = trimmed.rfind(".cpp:") {
                current_file = Some(sanitize_field(&trimmed[..index + 4]));
                continue;
            }

            if let Some((start, end)) = parse_text_range(trimmed) {
                match &current_file {
                    Some(file) => mapping.ranges.push(FileRange {
                        file: file.clone(),
                        start,
                        end,
                    }),
                    None => {
                        log::warn!("splits line {}: range before any file header", number + 1)
                    }
                }
            }
        }

        mapping
    }

    /// Reads and parses a splits file.
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    /// Returns the source file whose range contains `address`.
    pub fn file_for_address(&self, address: u64) -> Option<&str> {
        self.ranges
            .iter()
            .find(|range| address >= range.start && address < range.end)
            .map(|range| range.file.as_str())
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Parses a `.text start:0xA end:0xB` line into its two addresses.
fn parse_text_range(line: &str) -> Option<(u64, u64)> {
    let rest = line.strip_prefix(".text")?;

    let mut start = None;
    let mut end = None;
    for token in rest.split_whitespace() {
        if let Some(value) = token.strip_prefix("start:0x") {
            start = u64::from_str_radix(value, 16).ok();
        } else if let Some(value) = token.strip_prefix("end:0x") {
            end = u64::from_str_radix(value, 16).ok();
        }
    }

    Some((start?, end?))
}
