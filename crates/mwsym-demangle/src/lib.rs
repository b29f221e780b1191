//! # mwsym-demangle
//!
//! Demangler for linker symbols produced by the Metrowerks CodeWarrior
//! toolchain for embedded PowerPC targets.
//!
//! CodeWarrior encodes overload and scope information into flat symbol
//! names with single-letter type codes, for example:
//!
//! - `GetLength__9RangeListCFv` → `RangeList::GetLength(void) const`
//! - `insert__Q24util4ListFPv` → `util::List::insert(void *)`
//!
//! Decoding is strictly best-effort: truncated or unrecognized input
//! produces whatever partial signature was assembled, never an error.
//! Callers that need a displayable name for arbitrary symbols should use
//! [`demangle_or_original`], which falls back to the raw symbol when no
//! name could be decoded.

pub mod component;
pub mod cursor;
mod decode;
mod demangle;
mod render;

pub use component::Component;
pub use cursor::Cursor;
pub use demangle::{demangle, demangle_or_original};
pub use render::render_components;
