//! The `demangle` subcommand.

use anyhow::Result;
use mwsym_demangle::demangle_or_original;
use std::io::{self, BufRead};

/// Demangles the given symbols, or stdin lines when none were given.
pub fn handle_demangle_command(symbols: &[String], verbose: bool) -> Result<()> {
    if symbols.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            let symbol = line.trim();
            if symbol.is_empty() {
                continue;
            }
            print_one(symbol, verbose);
        }
    } else {
        for symbol in symbols {
            print_one(symbol, verbose);
        }
    }

    Ok(())
}

fn print_one(symbol: &str, verbose: bool) {
    let demangled = demangle_or_original(symbol);
    if verbose {
        println!("{} -> {}", symbol, demangled);
    } else {
        println!("{}", demangled);
    }
}
