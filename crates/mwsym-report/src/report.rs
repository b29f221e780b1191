//! Ranked function report assembly and output.
//!
//! Entries are bucketed into caller-defined address regions, ranked by
//! total call count, and written either as a column-aligned TSV or as
//! JSON.

use std::collections::HashMap;
use std::io::{self, Write};

use mwsym_demangle::demangle_or_original;
use serde::Serialize;

use crate::heat::HeatMap;
use crate::splits::SplitMapping;
use crate::symbol_map::SymbolMap;

const ADDR_W: usize = 12;
const NAME_W: usize = 99;
const FRAMES_W: usize = 10;
const HEAT_W: usize = 14;
const FILE_W: usize = 45;

/// Names longer than this are cut down with a `...` suffix.
const NAME_TRUNCATE_WIDTH: usize = 97;

/// An address region with a display title. Regions partition the report
/// into tables; an address belongs to the first region that contains it.
#[derive(Debug, Clone, Serialize)]
pub struct Region {
    pub title: String,
    pub begin: u64,
    pub end: u64,
}

impl Region {
    pub fn new(title: impl Into<String>, begin: u64, end: u64) -> Self {
        Self {
            title: title.into(),
            begin,
            end,
        }
    }

    /// A single region spanning the whole address space.
    pub fn everything() -> Self {
        Self::new("All", 0, u64::MAX)
    }

    pub fn contains(&self, address: u64) -> bool {
        address >= self.begin && address < self.end
    }
}

/// One reported function.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub address: u64,
    /// Demangled name (or the raw symbol when nothing decoded).
    pub name: String,
    /// Classifying source file, or `<unknown>`.
    pub file: String,
    /// Distinct frames the function executed in.
    pub frames: usize,
    /// Total recorded calls.
    pub total_heat: u64,
}

/// One region's ranked entries.
#[derive(Debug, Serialize)]
pub struct RegionTable {
    pub title: String,
    pub entries: Vec<Entry>,
}

/// A complete report.
#[derive(Debug, Serialize)]
pub struct Report {
    pub regions: Vec<RegionTable>,
}

impl Report {
    /// Builds a report from collected heat, a symbol map, and an optional
    /// splits mapping. Addresses with no symbol are dropped; names are
    /// demangled with raw-symbol fallback; entries sort by total heat
    /// descending, ties by name.
    pub fn build(
        regions: &[Region],
        heat: &HeatMap,
        map: &SymbolMap,
        splits: Option<&SplitMapping>,
    ) -> Self {
        let mut tables: Vec<RegionTable> = regions
            .iter()
            .map(|region| RegionTable {
                title: region.title.clone(),
                entries: Vec::new(),
            })
            .collect();

        for address in heat.addresses() {
            let Some(symbol) = map.symbol_at(address) else {
                continue;
            };

            let name = demangle_or_original(&symbol.name);
            let file = splits
                .and_then(|mapping| mapping.file_for_address(address))
                .unwrap_or("<unknown>");

            let Some(position) = regions.iter().position(|region| region.contains(address))
            else {
                continue;
            };

            tables[position].entries.push(Entry {
                address,
                name: sanitize_field(&name),
                file: sanitize_field(file),
                frames: heat.frame_count(address),
                total_heat: heat.total(address),
            });
        }

        for table in &mut tables {
            table.entries.sort_by(|a, b| {
                b.total_heat
                    .cmp(&a.total_heat)
                    .then_with(|| a.name.cmp(&b.name))
            });
        }

        Self { regions: tables }
    }

    /// Writes the column-aligned TSV form. Regions with no entries are
    /// omitted.
    pub fn write_tsv<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for table in &self.regions {
            if table.entries.is_empty() {
                continue;
            }

            writeln!(writer)?;
            writeln!(
                writer,
                "{} - {} total functions",
                table.title,
                table.entries.len()
            )?;
            writeln!(writer, "{}", "=".repeat(80))?;

            writeln!(
                writer,
                "{:<aw$} {:<nw$} {:>fw$} {:>hw$} {:<lw$}",
                "addr",
                "func_name",
                "n_frames",
                "total_heat",
                "file",
                aw = ADDR_W,
                nw = NAME_W,
                fw = FRAMES_W,
                hw = HEAT_W,
                lw = FILE_W,
            )?;
            writeln!(
                writer,
                "{}",
                "-".repeat(ADDR_W + 1 + NAME_W + 1 + FRAMES_W + 1 + HEAT_W + 1 + FILE_W)
            )?;

            for entry in &table.entries {
                writeln!(
                    writer,
                    "0x{:08X}   {:<nw$} {:>fw$} {:>hw$} {:<lw$}",
                    entry.address,
                    truncate_name(&entry.name),
                    entry.frames,
                    entry.total_heat,
                    entry.file,
                    nw = NAME_W,
                    fw = FRAMES_W,
                    hw = HEAT_W,
                    lw = FILE_W,
                )?;
            }

            let mut per_file: HashMap<&str, (usize, u64)> = HashMap::new();
            for entry in &table.entries {
                let stats = per_file.entry(entry.file.as_str()).or_default();
                stats.0 += 1;
                stats.1 += entry.total_heat;
            }

            let mut files: Vec<_> = per_file.into_iter().collect();
            files.sort_by(|a, b| b.1 .1.cmp(&a.1 .1).then_with(|| a.0.cmp(b.0)));

            writeln!(writer)?;
            writeln!(
                writer,
                "-- File priority (by total_heat) -- file count: {}",
                files.len()
            )?;
            for (file, (funcs, heat)) in &files {
                writeln!(
                    writer,
                    "{:<lw$} funcs:{:>5}  heat:{:>10}",
                    file,
                    funcs,
                    heat,
                    lw = FILE_W,
                )?;
            }
        }

        Ok(())
    }

    /// The JSON form of the whole report.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Drops control characters that would break TSV rows or terminal output.
pub fn sanitize_field(field: &str) -> String {
    field.chars().filter(|c| !c.is_control()).collect()
}

/// Cuts a long name down to the column width, marking the cut with `...`.
pub fn truncate_name(name: &str) -> String {
    if name.chars().count() <= NAME_TRUNCATE_WIDTH {
        return name.to_string();
    }

    let mut truncated: String = name.chars().take(NAME_TRUNCATE_WIDTH - 3).collect();
    truncated.push_str("...");
    truncated
}
