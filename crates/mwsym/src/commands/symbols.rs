//! The `symbols` subcommand.

use anyhow::{Context, Result};
use mwsym_demangle::demangle_or_original;
use mwsym_report::SymbolMap;
use std::path::Path;

/// Lists a map file's symbols in address order with demangled names.
pub fn handle_symbols_command(map_path: &Path, show_raw: bool) -> Result<()> {
    let map = SymbolMap::from_path(map_path)
        .with_context(|| format!("Failed to read map: {}", map_path.display()))?;

    println!("{:<12} {:<10} {}", "Address", "Size", "Name");
    println!("{}", "-".repeat(70));

    for symbol in map.iter() {
        let demangled = demangle_or_original(&symbol.name);
        if show_raw {
            println!(
                "{:#010x}   {:<10} {:<60} {}",
                symbol.address, symbol.size, demangled, symbol.name
            );
        } else {
            println!("{:#010x}   {:<10} {}", symbol.address, symbol.size, demangled);
        }
    }

    log::info!("{} symbols listed", map.len());
    Ok(())
}
