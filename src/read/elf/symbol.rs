use core::fmt::Debug;

use crate::elf;
use crate::error::{Error, ReadError, Result};
use crate::pod::Pod;

use super::{FileHeader, SymbolTables};

/// A symbol table entry that matched a requested name.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSymbol<'data, Elf: FileHeader> {
    index: u64,
    name: &'data [u8],
    symbol: &'data Elf::Sym,
}

impl<'data, Elf: FileHeader> ResolvedSymbol<'data, Elf> {
    /// The index of the entry in the symbol table.
    #[inline]
    pub fn index(&self) -> u64 {
        self.index
    }

    /// The name that was used to find the entry.
    #[inline]
    pub fn name(&self) -> &'data [u8] {
        self.name
    }

    /// The symbol table entry.
    #[inline]
    pub fn symbol(&self) -> &'data Elf::Sym {
        self.symbol
    }

    /// The size in bytes of the symbol's storage.
    #[inline]
    pub fn size(&self) -> u64 {
        self.symbol.st_size().into()
    }
}

/// Find the first symbol table entry with exactly the given name.
///
/// Entries are scanned in index order. The comparison is byte for byte, so
/// there is no demangling or prefix matching.
pub fn resolve<'data, Elf: FileHeader>(
    tables: &SymbolTables<'data, Elf>,
    name: &[u8],
) -> Result<ResolvedSymbol<'data, Elf>> {
    let strings = tables.strings();
    for index in 0..tables.symbol_count() {
        let symbol = tables.symbol(index)?;
        let symbol_name = strings
            .get(symbol.st_name())
            .ok()
            .read_error("Invalid ELF symbol name offset")?;
        if symbol_name == name {
            return Ok(ResolvedSymbol {
                index,
                name: symbol_name,
                symbol,
            });
        }
    }
    Err(Error::symbol_not_found(name))
}

/// A trait for generic access to `Sym32` and `Sym64`.
#[allow(missing_docs)]
pub trait Sym: Debug + Pod {
    type Word: Into<u64> + Copy;

    fn st_name(&self) -> u32;
    fn st_shndx(&self) -> u16;
    fn st_value(&self) -> Self::Word;
    fn st_size(&self) -> Self::Word;

    /// Return true if the symbol is undefined.
    #[inline]
    fn is_undefined(&self) -> bool {
        self.st_shndx() == elf::SHN_UNDEF
    }
}

impl Sym for elf::Sym32 {
    type Word = u32;

    #[inline]
    fn st_name(&self) -> u32 {
        self.st_name.get()
    }

    #[inline]
    fn st_shndx(&self) -> u16 {
        self.st_shndx.get()
    }

    #[inline]
    fn st_value(&self) -> Self::Word {
        self.st_value.get()
    }

    #[inline]
    fn st_size(&self) -> Self::Word {
        self.st_size.get()
    }
}

impl Sym for elf::Sym64 {
    type Word = u64;

    #[inline]
    fn st_name(&self) -> u32 {
        self.st_name.get()
    }

    #[inline]
    fn st_shndx(&self) -> u16 {
        self.st_shndx.get()
    }

    #[inline]
    fn st_value(&self) -> Self::Word {
        self.st_value.get()
    }

    #[inline]
    fn st_size(&self) -> Self::Word {
        self.st_size.get()
    }
}
