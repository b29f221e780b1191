//! Linker symbol map parsing and address lookup.
//!
//! CodeWarrior map files list one symbol per line as whitespace-separated
//! columns: starting address and size in hex, optionally a virtual address
//! and alignment column, then the (mangled) name. Section banners and
//! column headers are interleaved with the data; anything that does not
//! parse as a symbol line is skipped.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::Result;

/// One symbol from a map file.
#[derive(Debug, Clone)]
pub struct MapSymbol {
    /// Starting address.
    pub address: u64,
    /// Size in bytes (0 if the map did not record one).
    pub size: u64,
    /// Raw (mangled) name as it appears in the map.
    pub name: String,
}

/// An address-ordered symbol table loaded from a map file.
#[derive(Debug, Default)]
pub struct SymbolMap {
    symbols: BTreeMap<u64, MapSymbol>,
}

impl SymbolMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses map text. Lines that are not symbol records (section
    /// banners, column headers, blanks) are skipped; a later record for
    /// the same address replaces an earlier one.
    pub fn parse(text: &str) -> Self {
        let mut map = Self::new();

        for (number, line) in text.lines().enumerate() {
            match parse_symbol_line(line) {
                Some(symbol) => {
                    map.symbols.insert(symbol.address, symbol);
                }
                None => {
                    if !line.trim().is_empty() {
                        log::debug!("skipping map line {}: {:?}", number + 1, line.trim());
                    }
                }
            }
        }

        map
    }

    /// Reads and parses a map file.
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    /// Exact-address lookup.
    pub fn get(&self, address: u64) -> Option<&MapSymbol> {
        self.symbols.get(&address)
    }

    /// Finds the symbol whose extent contains `address`. A symbol with
    /// size 0 only matches its own starting address.
    pub fn symbol_at(&self, address: u64) -> Option<&MapSymbol> {
        let (_, symbol) = self.symbols.range(..=address).next_back()?;
        let end = symbol.address.saturating_add(symbol.size);
        if address == symbol.address || address < end {
            Some(symbol)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in address order.
    pub fn iter(&self) -> impl Iterator<Item = &MapSymbol> {
        self.symbols.values()
    }
}

fn parse_symbol_line(line: &str) -> Option<MapSymbol> {
    let mut parts = line.split_whitespace();

    let address = u64::from_str_radix(parts.next()?, 16).ok()?;
    let size = u64::from_str_radix(parts.next()?, 16).ok()?;

    // Up to two more numeric columns (virtual address, alignment) may sit
    // before the name.
    let mut rest: Vec<&str> = parts.collect();
    let mut skipped = 0;
    while rest.len() > 1 && skipped < 2 && rest[0].chars().all(|c| c.is_ascii_hexdigit()) {
        rest.remove(0);
        skipped += 1;
    }

    if rest.is_empty() {
        return None;
    }

    Some(MapSymbol {
        address,
        size,
        name: rest.join(" "),
    })
}
