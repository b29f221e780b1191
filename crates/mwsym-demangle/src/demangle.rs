//! Whole-symbol demangling: base-name extraction and signature assembly.

use crate::cursor::Cursor;
use crate::decode::{demangle_template, demangle_type};

/// Finds where the base identifier ends: the position of the rightmost
/// `__` separator at or after the current position, or the end of input
/// when there is none. The rightmost occurrence wins so that identifiers
/// like `__ct` (with their own leading underscores) keep their encoding
/// suffix intact; an identifier that legitimately contains `__` will
/// mis-split, which matches the toolchain's own ambiguity.
fn scan_name_end(input: &Cursor) -> usize {
    let mut end = input.len();

    let mut index = input.position();
    while index + 1 < input.len() {
        if input.at(index) == '_' && input.at(index + 1) == '_' {
            end = index;
        }
        index += 1;
    }

    end
}

/// Copies the base identifier up to the `__` separator, expanding any
/// embedded template-argument list, and steps the cursor past the
/// separator when one was found.
fn demangle_name(input: &mut Cursor) -> String {
    let mut output = String::new();
    let end = scan_name_end(input);

    while input.position() < end {
        let c = input.read();
        if c == '<' {
            demangle_template(input, &mut output, 0);
        } else {
            output.push(c);
        }
    }

    if end < input.len() {
        input.set_position(input.position() + 2);
    }

    output
}

/// Demangles one CodeWarrior linker symbol into a readable signature.
///
/// The encoded layout after the base name is an optional enclosing scope
/// (any type production that is not the parameter marker), an optional
/// `C` const qualifier, and an `F` introducing the parameter list, which
/// runs to the end of input — the convention omits return types from
/// overload-distinguishing signatures, so there is no terminator.
///
/// Never fails: malformed or truncated input degrades to partial or empty
/// fields. Symbols that carry no decodable name at all (the toolchain's
/// generated static-initializer symbols, `__sinit_*`) come out as the
/// empty string; see [`demangle_or_original`].
pub fn demangle(symbol: &str) -> String {
    let mut input = Cursor::new(symbol);
    let mut output = String::new();

    let name = demangle_name(&mut input);
    let mut scope = String::new();
    let mut constant = false;

    if !input.at_end() && input.peek() != 'F' {
        demangle_type(&mut input, &mut output, 0);
        scope = std::mem::take(&mut output);
    }

    if input.peek() == 'C' {
        input.read();
        constant = true;
    }

    let mut params = String::new();
    if input.peek() == 'F' {
        input.read();
        while !input.at_end() {
            if !output.is_empty() {
                output.push_str(", ");
            }
            demangle_type(&mut input, &mut output, 0);
        }
        params = std::mem::take(&mut output);
    }

    if !scope.is_empty() {
        output.push_str(&scope);
        output.push_str("::");
    }

    output.push_str(&name);

    if !params.is_empty() {
        output.push('(');
        output.push_str(&params);
        output.push(')');
    }

    if constant {
        output.push_str(" const");
    }

    output
}

/// Demangles a symbol, substituting the raw input when decoding produced
/// no usable name. An empty result is the degenerate output of symbols
/// with nothing before their `__` separator and no recognizable encoding
/// after it — static-initializer symbols being the common case — and is
/// never a useful display name.
pub fn demangle_or_original(symbol: &str) -> String {
    let demangled = demangle(symbol);
    if demangled.is_empty() {
        symbol.to_string()
    } else {
        demangled
    }
}
