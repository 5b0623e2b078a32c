use core::fmt::Debug;
use core::marker::PhantomData;
use core::mem;

#[cfg(feature = "logging")]
use log::debug;

use crate::elf;
use crate::error::{Error, ReadError, Result};
use crate::pod::{Bytes, Pod};
use crate::read::StringTable;

use super::{FileHeader, ResolvedSymbol, Sym};

/// The section header table of an ELF file.
///
/// Every access is bounds checked against both the section count and the
/// file data.
#[derive(Debug, Clone, Copy)]
pub struct SectionTable<'data, Elf: FileHeader> {
    data: Bytes<'data>,
    offset: u64,
    count: usize,
    marker: PhantomData<Elf>,
}

impl<'data, Elf: FileHeader> SectionTable<'data, Elf> {
    /// Parse the section header table location from the file header.
    pub fn parse(header: &Elf, data: &'data [u8]) -> Result<Self> {
        let count = header.shnum(data)?;
        if count != 0
            && usize::from(header.e_shentsize()) != mem::size_of::<Elf::SectionHeader>()
        {
            return Err(Error::malformed("Invalid ELF section header entry size"));
        }
        Ok(SectionTable {
            data: Bytes(data),
            offset: header.e_shoff().into(),
            count,
            marker: PhantomData,
        })
    }

    /// The number of section headers.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Return the section header at the given index.
    pub fn section(&self, index: usize) -> Result<&'data Elf::SectionHeader> {
        if index >= self.count {
            return Err(Error::malformed("Invalid ELF section index"));
        }
        (index as u64)
            .checked_mul(mem::size_of::<Elf::SectionHeader>() as u64)
            .and_then(|offset| offset.checked_add(self.offset))
            .and_then(|offset| self.data.read_at(offset))
            .read_error("Invalid ELF section header offset or size")
    }

    /// Return the string table at the given section index.
    pub fn strings(&self, index: usize) -> Result<StringTable<'data>> {
        let section = self.section(index)?;
        section.data(self.data.0).map(StringTable::new)
    }
}

/// The tables found by walking the section headers.
///
/// This is all the state needed to resolve a symbol and translate its address.
#[derive(Debug, Clone, Copy)]
pub struct SymbolTables<'data, Elf: FileHeader> {
    pub(super) sections: SectionTable<'data, Elf>,
    pub(super) shstrndx: usize,
    pub(super) shstrtab_offset: u64,
    pub(super) symtab_offset: u64,
    pub(super) symtab_entsize: u64,
    pub(super) symtab_count: u64,
    pub(super) strtab_offset: u64,
    pub(super) strings: StringTable<'data>,
}

impl<'data, Elf: FileHeader> SymbolTables<'data, Elf> {
    /// Walk the section header table and find the `.symtab` and `.strtab` sections.
    ///
    /// The first section of each kind in header order is used.
    /// Returns `ErrorKind::SectionNotFound` if either section is missing, which is
    /// the case for stripped files.
    pub fn parse(data: &'data [u8]) -> Result<Self> {
        let header = Elf::parse(data)?;
        let sections = SectionTable::<Elf>::parse(header, data)?;

        let (shstrndx, section_names) = match header.shstrndx(data)? {
            Some(index) => (index, Some(sections.strings(index)?)),
            None => (usize::from(elf::SHN_UNDEF), None),
        };
        let shstrtab_offset: u64 = match section_names {
            Some(_) => sections.section(shstrndx)?.sh_offset().into(),
            None => 0,
        };

        let mut symtab = None;
        let mut strtab = None;
        for index in 0..sections.count() {
            let section = sections.section(index)?;
            let sh_type = section.sh_type();
            if sh_type != elf::SHT_SYMTAB && sh_type != elf::SHT_STRTAB {
                continue;
            }
            let Some(section_names) = section_names else {
                continue;
            };
            let name = section_names
                .get(section.sh_name())
                .ok()
                .read_error("Invalid ELF section name offset")?;

            if sh_type == elf::SHT_SYMTAB && name == elf::SYMTAB_NAME && symtab.is_none() {
                let entsize: u64 = section.sh_entsize().into();
                if entsize == 0 {
                    return Err(Error::malformed("Invalid ELF symbol table entry size"));
                }
                if entsize < mem::size_of::<Elf::Sym>() as u64 {
                    return Err(Error::malformed("ELF symbol table entry size is too small"));
                }
                let offset: u64 = section.sh_offset().into();
                let count = section.entry_count()?;
                // Check the extent now so that entry reads can't overflow.
                Bytes(data)
                    .read_bytes_at(offset, count * entsize)
                    .read_error("Invalid ELF symbol table offset or size")?;
                #[cfg(feature = "logging")]
                debug!("Found .symtab at section {} with {} symbols", index, count);
                symtab = Some((offset, entsize, count));
            } else if sh_type == elf::SHT_STRTAB
                && index != shstrndx
                && name == elf::STRTAB_NAME
                && strtab.is_none()
            {
                let offset: u64 = section.sh_offset().into();
                let strings = section.data(data)?;
                #[cfg(feature = "logging")]
                debug!("Found .strtab at section {}", index);
                strtab = Some((offset, StringTable::new(strings)));
            }
        }

        let (symtab_offset, symtab_entsize, symtab_count) =
            symtab.ok_or_else(|| Error::section_not_found(".symtab"))?;
        let (strtab_offset, strings) = strtab.ok_or_else(|| Error::section_not_found(".strtab"))?;
        Ok(SymbolTables {
            sections,
            shstrndx,
            shstrtab_offset,
            symtab_offset,
            symtab_entsize,
            symtab_count,
            strtab_offset,
            strings,
        })
    }

    /// The section header table.
    #[inline]
    pub fn sections(&self) -> &SectionTable<'data, Elf> {
        &self.sections
    }

    /// The index of the section header string table.
    #[inline]
    pub fn shstrndx(&self) -> usize {
        self.shstrndx
    }

    /// The file offset of the section header string table.
    #[inline]
    pub fn shstrtab_offset(&self) -> u64 {
        self.shstrtab_offset
    }

    /// The file offset of the `.symtab` section.
    #[inline]
    pub fn symtab_offset(&self) -> u64 {
        self.symtab_offset
    }

    /// The number of entries in the `.symtab` section.
    #[inline]
    pub fn symbol_count(&self) -> u64 {
        self.symtab_count
    }

    /// The file offset of the `.strtab` section.
    #[inline]
    pub fn strtab_offset(&self) -> u64 {
        self.strtab_offset
    }

    /// The symbol string table.
    #[inline]
    pub fn strings(&self) -> StringTable<'data> {
        self.strings
    }

    /// Return the symbol table entry at the given index.
    pub fn symbol(&self, index: u64) -> Result<&'data Elf::Sym> {
        if index >= self.symtab_count {
            return Err(Error::malformed("Invalid ELF symbol index"));
        }
        // The table extent was checked when it was found.
        let offset = self.symtab_offset + index * self.symtab_entsize;
        self.sections
            .data
            .read_at(offset)
            .read_error("Invalid ELF symbol offset or size")
    }
}

/// Compute the file offset of the storage for a resolved symbol.
///
/// The offset is `st_value - sh_addr + sh_offset` of the owning section. The
/// symbol's address is assumed to lie within that section.
pub fn translate<'data, Elf: FileHeader>(
    tables: &SymbolTables<'data, Elf>,
    symbol: &ResolvedSymbol<'data, Elf>,
) -> Result<u64> {
    let sym = symbol.symbol();
    if sym.is_undefined() {
        return Err(Error::undefined_symbol(symbol.name()));
    }
    let shndx = sym.st_shndx();
    if shndx >= elf::SHN_LORESERVE {
        // SHN_ABS, SHN_COMMON and SHN_XINDEX have no owning section header.
        return Err(Error::malformed("Unsupported ELF symbol section index"));
    }
    let section = tables.sections.section(shndx.into())?;
    if section.sh_type() == elf::SHT_NOBITS {
        #[cfg(feature = "logging")]
        debug!(
            "Symbol {} is in a section with no file data",
            String::from_utf8_lossy(symbol.name())
        );
    }
    let value: u64 = sym.st_value().into();
    let address: u64 = section.sh_addr().into();
    let offset: u64 = section.sh_offset().into();
    Ok(value.wrapping_sub(address).wrapping_add(offset))
}

/// A trait for generic access to `SectionHeader32` and `SectionHeader64`.
#[allow(missing_docs)]
pub trait SectionHeader: Debug + Pod {
    type Word: Into<u64> + Copy;

    fn sh_name(&self) -> u32;
    fn sh_type(&self) -> u32;
    fn sh_addr(&self) -> Self::Word;
    fn sh_offset(&self) -> Self::Word;
    fn sh_size(&self) -> Self::Word;
    fn sh_link(&self) -> u32;
    fn sh_entsize(&self) -> Self::Word;

    /// Return the section data.
    ///
    /// Returns `Ok(&[])` if the section has no data.
    /// Returns `Err` for invalid values.
    fn data<'data>(&self, data: &'data [u8]) -> Result<&'data [u8]> {
        if self.sh_type() == elf::SHT_NOBITS {
            return Ok(&[]);
        }
        Bytes(data)
            .read_bytes_at(self.sh_offset().into(), self.sh_size().into())
            .map(|bytes| bytes.0)
            .read_error("Invalid ELF section size or offset")
    }

    /// Return the number of table entries in the section.
    ///
    /// Returns `Err` if the entry size is zero.
    fn entry_count(&self) -> Result<u64> {
        let entsize: u64 = self.sh_entsize().into();
        if entsize == 0 {
            return Err(Error::malformed("Invalid ELF section entry size"));
        }
        let size: u64 = self.sh_size().into();
        Ok(size / entsize)
    }
}

impl SectionHeader for elf::SectionHeader32 {
    type Word = u32;

    #[inline]
    fn sh_name(&self) -> u32 {
        self.sh_name.get()
    }

    #[inline]
    fn sh_type(&self) -> u32 {
        self.sh_type.get()
    }

    #[inline]
    fn sh_addr(&self) -> Self::Word {
        self.sh_addr.get()
    }

    #[inline]
    fn sh_offset(&self) -> Self::Word {
        self.sh_offset.get()
    }

    #[inline]
    fn sh_size(&self) -> Self::Word {
        self.sh_size.get()
    }

    #[inline]
    fn sh_link(&self) -> u32 {
        self.sh_link.get()
    }

    #[inline]
    fn sh_entsize(&self) -> Self::Word {
        self.sh_entsize.get()
    }
}

impl SectionHeader for elf::SectionHeader64 {
    type Word = u64;

    #[inline]
    fn sh_name(&self) -> u32 {
        self.sh_name.get()
    }

    #[inline]
    fn sh_type(&self) -> u32 {
        self.sh_type.get()
    }

    #[inline]
    fn sh_addr(&self) -> Self::Word {
        self.sh_addr.get()
    }

    #[inline]
    fn sh_offset(&self) -> Self::Word {
        self.sh_offset.get()
    }

    #[inline]
    fn sh_size(&self) -> Self::Word {
        self.sh_size.get()
    }

    #[inline]
    fn sh_link(&self) -> u32 {
        self.sh_link.get()
    }

    #[inline]
    fn sh_entsize(&self) -> Self::Word {
        self.sh_entsize.get()
    }
}
