//! The `report` subcommand.

use anyhow::{bail, Context, Result};
use mwsym_report::{HeatMap, Region, Report, SplitMapping, SymbolMap};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Builds and writes the ranked function-heat report.
pub fn handle_report_command(
    map_path: &Path,
    heat_path: &Path,
    splits_path: Option<&Path>,
    region_specs: &[String],
    json: bool,
    output: Option<&Path>,
) -> Result<()> {
    let map = SymbolMap::from_path(map_path)
        .with_context(|| format!("Failed to read map: {}", map_path.display()))?;

    let heat = HeatMap::from_path(heat_path)
        .with_context(|| format!("Failed to read heat dump: {}", heat_path.display()))?;

    let splits = match splits_path {
        Some(path) => Some(
            SplitMapping::from_path(path)
                .with_context(|| format!("Failed to read splits: {}", path.display()))?,
        ),
        None => None,
    };

    let regions = if region_specs.is_empty() {
        vec![Region::everything()]
    } else {
        region_specs
            .iter()
            .map(|spec| parse_region(spec))
            .collect::<Result<Vec<_>>>()?
    };

    log::info!(
        "{} symbols, {} sampled addresses ({} hot), {} regions",
        map.len(),
        heat.len(),
        heat.hot_count(),
        regions.len()
    );

    let report = Report::build(&regions, &heat, &map, splits.as_ref());

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output: {}", path.display())
        })?)),
        None => Box::new(io::stdout()),
    };

    if json {
        let text = report.to_json().context("Failed to serialize report")?;
        writeln!(writer, "{}", text)?;
    } else {
        report.write_tsv(&mut writer)?;
    }

    Ok(())
}

/// Parses a `TITLE:START:END` region spec with hex addresses.
fn parse_region(spec: &str) -> Result<Region> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 3 {
        bail!("region must be TITLE:START:END, got '{}'", spec);
    }

    let begin = parse_hex(parts[1])
        .with_context(|| format!("bad region start address '{}'", parts[1]))?;
    let end =
        parse_hex(parts[2]).with_context(|| format!("bad region end address '{}'", parts[2]))?;
    if begin >= end {
        bail!("region '{}' is empty or inverted", spec);
    }

    Ok(Region::new(parts[0], begin, end))
}

fn parse_hex(s: &str) -> Result<u64> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    Ok(u64::from_str_radix(s, 16)?)
}
