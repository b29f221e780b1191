//! Per-address call-count aggregation.
//!
//! Counts arrive once per presented frame for each executing function.
//! Addresses that run hot enough to swamp the trace are marked and
//! dropped from further recording, mirroring the collector's runaway
//! cutoff, so the report stays dominated by functions worth looking at.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Cumulative call count past which an address is marked hot.
pub const HOT_TOTAL_THRESHOLD: u64 = 1_000_000;

/// Single-frame call count past which an address is marked hot.
pub const HOT_FRAME_THRESHOLD: u64 = 1_000;

/// Per-address, per-frame call counts.
#[derive(Debug, Default)]
pub struct HeatMap {
    samples: BTreeMap<u64, BTreeMap<u64, u64>>,
    totals: BTreeMap<u64, u64>,
    hot: BTreeSet<u64>,
}

impl HeatMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `count` calls at `address` during `frame`. Returns false
    /// when the address has been marked hot and the sample was dropped;
    /// callers can use that to stop tracing the address altogether.
    pub fn record(&mut self, address: u64, frame: u64, count: u64) -> bool {
        if count == 0 {
            return true;
        }
        if self.hot.contains(&address) {
            return false;
        }

        *self
            .samples
            .entry(address)
            .or_default()
            .entry(frame)
            .or_default() += count;

        let total = self.totals.entry(address).or_default();
        *total += count;

        if *total > HOT_TOTAL_THRESHOLD || count > HOT_FRAME_THRESHOLD {
            self.hot.insert(address);
        }

        true
    }

    /// Total calls recorded for an address.
    pub fn total(&self, address: u64) -> u64 {
        self.totals.get(&address).copied().unwrap_or(0)
    }

    /// Number of distinct frames in which the address was seen.
    pub fn frame_count(&self, address: u64) -> usize {
        self.samples.get(&address).map_or(0, BTreeMap::len)
    }

    pub fn is_hot(&self, address: u64) -> bool {
        self.hot.contains(&address)
    }

    pub fn hot_count(&self) -> usize {
        self.hot.len()
    }

    /// Sampled addresses in ascending order.
    pub fn addresses(&self) -> impl Iterator<Item = u64> + '_ {
        self.samples.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Parses a heat dump: one `address frame count` record per line,
    /// whitespace-separated, address in hex (`0x` optional), frame and
    /// count in decimal. Blank lines and `#` comments are allowed; any
    /// other malformed line is an error, since the dump is
    /// machine-generated.
    pub fn parse(text: &str) -> Result<Self> {
        let mut heat = Self::new();

        for (number, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut fields = trimmed.split_whitespace();
            let address = fields.next();
            let frame = fields.next();
            let count = fields.next();

            let (Some(address), Some(frame), Some(count)) = (address, frame, count) else {
                return Err(Error::InvalidRecord {
                    line: number + 1,
                    message: "expected `address frame count`".into(),
                });
            };
            if fields.next().is_some() {
                return Err(Error::InvalidRecord {
                    line: number + 1,
                    message: "trailing fields after `address frame count`".into(),
                });
            }

            let address = parse_hex(address).ok_or_else(|| Error::InvalidRecord {
                line: number + 1,
                message: format!("bad address {:?}", address),
            })?;
            let frame: u64 = frame.parse().map_err(|_| Error::InvalidRecord {
                line: number + 1,
                message: format!("bad frame {:?}", frame),
            })?;
            let count: u64 = count.parse().map_err(|_| Error::InvalidRecord {
                line: number + 1,
                message: format!("bad count {:?}", count),
            })?;

            heat.record(address, frame, count);
        }

        Ok(heat)
    }

    /// Reads and parses a heat dump file.
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }
}

fn parse_hex(token: &str) -> Option<u64> {
    let token = token.strip_prefix("0x").unwrap_or(token);
    u64::from_str_radix(token, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accumulates() {
        let mut heat = HeatMap::new();
        heat.record(0x8000, 1, 10);
        heat.record(0x8000, 2, 5);
        heat.record(0x8000, 2, 5);
        assert_eq!(heat.total(0x8000), 20);
        assert_eq!(heat.frame_count(0x8000), 2);
    }

    #[test]
    fn test_zero_count_ignored() {
        let mut heat = HeatMap::new();
        assert!(heat.record(0x8000, 1, 0));
        assert!(heat.is_empty());
    }

    #[test]
    fn test_frame_spike_marks_hot() {
        let mut heat = HeatMap::new();
        heat.record(0x8000, 1, HOT_FRAME_THRESHOLD + 1);
        assert!(heat.is_hot(0x8000));
        assert!(!heat.record(0x8000, 2, 1));
        // The tipping sample itself stays recorded.
        assert_eq!(heat.total(0x8000), HOT_FRAME_THRESHOLD + 1);
    }

    #[test]
    fn test_cumulative_total_marks_hot() {
        let mut heat = HeatMap::new();
        for frame in 0..1001 {
            heat.record(0x8000, frame, 1000);
        }
        assert!(heat.is_hot(0x8000));
        assert_eq!(heat.hot_count(), 1);
    }

    #[test]
    fn test_parse_records() {
        let heat = HeatMap::parse("# comment\n0x8000 1 10\n8000 2 4\n\n9000 1 7\n").unwrap();
        assert_eq!(heat.total(0x8000), 14);
        assert_eq!(heat.total(0x9000), 7);
        assert_eq!(heat.len(), 2);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(HeatMap::parse("8000 1\n").is_err());
        assert!(HeatMap::parse("8000 1 2 3\n").is_err());
        assert!(HeatMap::parse("xyzzy 1 2\n").is_err());
        assert!(HeatMap::parse("8000 one 2\n").is_err());
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = HeatMap::parse("8000 1 1\nbroken\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
