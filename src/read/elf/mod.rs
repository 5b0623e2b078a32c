//! Support for locating symbols in ELF files.
//!
//! Defines traits to abstract over the difference between ELF32/ELF64,
//! and implements the symbol lookup in terms of these traits. The
//! [`ElfTables`] enum selects the layout at run time from the file's class.

use crate::elf;
use crate::error::Result;

mod file;
pub use file::*;

mod section;
pub use section::*;

mod symbol;
pub use symbol::*;

/// The symbol tables of a 32-bit ELF file.
pub type SymbolTables32<'data> = SymbolTables<'data, elf::FileHeader32>;
/// The symbol tables of a 64-bit ELF file.
pub type SymbolTables64<'data> = SymbolTables<'data, elf::FileHeader64>;

/// The symbol tables of an ELF file of either class.
#[derive(Debug, Clone, Copy)]
pub enum ElfTables<'data> {
    /// The tables of an `ELFCLASS32` file.
    ThirtyTwoBit(SymbolTables32<'data>),
    /// The tables of an `ELFCLASS64` file.
    SixtyFourBit(SymbolTables64<'data>),
}

impl<'data> ElfTables<'data> {
    /// The class of the file the tables were read from.
    pub fn class(&self) -> ElfClass {
        match self {
            ElfTables::ThirtyTwoBit(_) => ElfClass::ThirtyTwoBit,
            ElfTables::SixtyFourBit(_) => ElfClass::SixtyFourBit,
        }
    }

    /// Resolve a symbol by name and compute the location of its storage.
    pub fn locate_symbol(&self, name: &[u8]) -> Result<SymbolLocation> {
        match self {
            ElfTables::ThirtyTwoBit(tables) => symbol_location(tables, name),
            ElfTables::SixtyFourBit(tables) => symbol_location(tables, name),
        }
    }
}

/// Walk the section headers using the layout for `class`.
pub fn locate_tables(data: &[u8], class: ElfClass) -> Result<ElfTables<'_>> {
    Ok(match class {
        ElfClass::ThirtyTwoBit => ElfTables::ThirtyTwoBit(SymbolTables::parse(data)?),
        ElfClass::SixtyFourBit => ElfTables::SixtyFourBit(SymbolTables::parse(data)?),
    })
}

/// The location of a symbol's storage within the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolLocation {
    /// The class of the file.
    pub class: ElfClass,
    /// The index of the symbol in `.symtab`.
    pub index: u64,
    /// The file offset of the symbol's storage.
    pub offset: u64,
    /// The size in bytes of the symbol's storage.
    pub size: u64,
}

fn symbol_location<Elf: FileHeader>(
    tables: &SymbolTables<'_, Elf>,
    name: &[u8],
) -> Result<SymbolLocation> {
    let symbol = resolve(tables, name)?;
    let offset = translate(tables, &symbol)?;
    Ok(SymbolLocation {
        class: Elf::CLASS,
        index: symbol.index(),
        offset,
        size: symbol.size(),
    })
}

/// Classify the file, walk its sections and locate the named symbol.
///
/// This is the read-only part of a patch. The data is not modified.
pub fn locate(data: &[u8], name: &[u8]) -> Result<SymbolLocation> {
    let class = classify(data)?;
    locate_tables(data, class)?.locate_symbol(name)
}
