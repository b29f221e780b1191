//! # mwsym-report
//!
//! Aggregation and reporting around per-function call counts collected
//! from a running CodeWarrior-built binary. This crate parses the text
//! artifacts involved — a linker symbol map, a splits file mapping address
//! ranges to source files, and a dump of per-frame call counts — and
//! produces a ranked, region-bucketed report with demangled names.
//!
//! Symbol names pass through [`mwsym_demangle::demangle_or_original`], so
//! generated symbols with no decodable name fall back to their raw form.

pub mod error;
pub mod heat;
pub mod report;
pub mod splits;
pub mod symbol_map;

pub use error::{Error, Result};
pub use heat::{HeatMap, HOT_FRAME_THRESHOLD, HOT_TOTAL_THRESHOLD};
pub use report::{Entry, Region, RegionTable, Report};
pub use splits::{FileRange, SplitMapping};
pub use symbol_map::{MapSymbol, SymbolMap};
