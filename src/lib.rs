//! # `elfconf`
//!
//! A library for changing the initial value of a symbol in an ELF file.
//!
//! The file is read into memory and its `.symtab` and `.strtab` sections are
//! used to find the named symbol. The symbol's address is translated to a file
//! offset using the header of the section that contains it, and the low-order
//! bytes of the new value are written to the file at that offset. Nothing else
//! in the file is changed.
//!
//! Both 32-bit and 64-bit files are supported. Values are read and written in
//! the byte order of the host.
//!
//! Use [`patch`] to do all of this in one call, or [`ElfImage`] to separate
//! the lookup from the write.
//!
//! # Example
//! ```no_run
//! use elfconf::{patch, PatchRequest};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let value = PatchRequest::parse_value("0x2a")?;
//!   let location = patch(&PatchRequest::new("path/to/a.out", "counter", value))?;
//!   println!("Wrote {} bytes at {:#x}", location.size, location.offset);
//!   Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

#[macro_use]
pub mod pod;

pub mod endian;

pub mod elf;

mod error;
pub use error::{Error, ErrorKind, Result};

pub mod read;
pub use read::elf::{locate, ElfClass, SymbolLocation};

pub mod write;

mod image;
pub use image::ElfImage;

mod patcher;
pub use patcher::{patch, PatchRequest};
