//! Interface for reading the symbol tables of ELF files.
//!
//! All reads are bounds checked views into the file buffer; nothing is copied.

mod util;
pub use util::StringTable;

pub mod elf;
