use core::fmt::Debug;
use core::mem;

#[cfg(feature = "logging")]
use log::warn;

use crate::elf;
use crate::endian::NATIVE_DATA;
use crate::error::{Error, ReadError, Result};
use crate::pod::{Bytes, Pod};

use super::{SectionHeader, Sym};

/// The word size of an ELF file, as given by `EI_CLASS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElfClass {
    /// `ELFCLASS32`.
    ThirtyTwoBit,
    /// `ELFCLASS64`.
    SixtyFourBit,
}

/// Check the ELF magic and return the class of the file.
///
/// Byte order, ABI and machine are not validated.
pub fn classify(data: &[u8]) -> Result<ElfClass> {
    if !data.starts_with(&elf::ELFMAG) {
        return Err(Error::not_elf());
    }
    let ident = Bytes(data)
        .read_at::<elf::Ident>(0)
        .read_error("Invalid ELF identification size")?;
    let class = match ident.class {
        elf::ELFCLASS32 => ElfClass::ThirtyTwoBit,
        elf::ELFCLASS64 => ElfClass::SixtyFourBit,
        other => return Err(Error::unsupported_class(other)),
    };
    if ident.data != NATIVE_DATA {
        #[cfg(feature = "logging")]
        warn!(
            "ELF data encoding {} differs from the host, values are read in host byte order",
            ident.data
        );
    }
    Ok(class)
}

/// A trait for generic access to `FileHeader32` and `FileHeader64`.
#[allow(missing_docs)]
pub trait FileHeader: Debug + Pod {
    // Ideally this would be a `u64: From<Word>`, but can't express that.
    type Word: Into<u64> + Copy;
    type SectionHeader: SectionHeader<Word = Self::Word>;
    type Sym: Sym<Word = Self::Word>;

    /// The class that selects this header layout.
    const CLASS: ElfClass;

    fn e_ident(&self) -> &elf::Ident;
    fn e_shoff(&self) -> Self::Word;
    fn e_shentsize(&self) -> u16;
    fn e_shnum(&self) -> u16;
    fn e_shstrndx(&self) -> u16;

    // Provided methods.

    /// Read the file header at the start of `data`.
    fn parse(data: &[u8]) -> Result<&Self> {
        let header = Bytes(data)
            .read_at::<Self>(0)
            .read_error("Invalid ELF header size")?;
        if header.e_ident().magic != elf::ELFMAG {
            return Err(Error::not_elf());
        }
        if header.e_ident().class != class_value(Self::CLASS) {
            return Err(Error::unsupported_class(header.e_ident().class));
        }
        Ok(header)
    }

    /// Section 0 is a special case because getting the section headers normally
    /// requires `shnum`, but `shnum` may be in the first section header.
    fn section_0<'data>(&self, data: &'data [u8]) -> Result<Option<&'data Self::SectionHeader>> {
        let shoff: u64 = self.e_shoff().into();
        if shoff == 0 {
            // No section headers is ok.
            return Ok(None);
        }
        if usize::from(self.e_shentsize()) != mem::size_of::<Self::SectionHeader>() {
            return Err(Error::malformed("Invalid ELF section header entry size"));
        }
        Bytes(data)
            .read_at(shoff)
            .read_error("Invalid ELF section header offset or size")
            .map(Some)
    }

    /// Return the number of section headers. Handles extended values.
    fn shnum(&self, data: &[u8]) -> Result<usize> {
        let e_shnum = self.e_shnum();
        if e_shnum > 0 {
            return Ok(e_shnum.into());
        }
        match self.section_0(data)? {
            Some(section_0) => {
                let size: u64 = section_0.sh_size().into();
                size.try_into()
                    .ok()
                    .read_error("Invalid ELF extended section count")
            }
            None => Ok(0),
        }
    }

    /// Return the section header string table index. Handles extended values.
    ///
    /// Returns `None` if there is no section header string table.
    fn shstrndx(&self, data: &[u8]) -> Result<Option<usize>> {
        let e_shstrndx = self.e_shstrndx();
        let index = if e_shstrndx == elf::SHN_XINDEX {
            match self.section_0(data)? {
                Some(section_0) => section_0.sh_link() as usize,
                None => return Err(Error::malformed("Missing ELF section header 0")),
            }
        } else {
            e_shstrndx.into()
        };
        Ok(if index != 0 { Some(index) } else { None })
    }
}

fn class_value(class: ElfClass) -> u8 {
    match class {
        ElfClass::ThirtyTwoBit => elf::ELFCLASS32,
        ElfClass::SixtyFourBit => elf::ELFCLASS64,
    }
}

impl FileHeader for elf::FileHeader32 {
    type Word = u32;
    type SectionHeader = elf::SectionHeader32;
    type Sym = elf::Sym32;

    const CLASS: ElfClass = ElfClass::ThirtyTwoBit;

    #[inline]
    fn e_ident(&self) -> &elf::Ident {
        &self.e_ident
    }

    #[inline]
    fn e_shoff(&self) -> Self::Word {
        self.e_shoff.get()
    }

    #[inline]
    fn e_shentsize(&self) -> u16 {
        self.e_shentsize.get()
    }

    #[inline]
    fn e_shnum(&self) -> u16 {
        self.e_shnum.get()
    }

    #[inline]
    fn e_shstrndx(&self) -> u16 {
        self.e_shstrndx.get()
    }
}

impl FileHeader for elf::FileHeader64 {
    type Word = u64;
    type SectionHeader = elf::SectionHeader64;
    type Sym = elf::Sym64;

    const CLASS: ElfClass = ElfClass::SixtyFourBit;

    #[inline]
    fn e_ident(&self) -> &elf::Ident {
        &self.e_ident
    }

    #[inline]
    fn e_shoff(&self) -> Self::Word {
        self.e_shoff.get()
    }

    #[inline]
    fn e_shentsize(&self) -> u16 {
        self.e_shentsize.get()
    }

    #[inline]
    fn e_shnum(&self) -> u16 {
        self.e_shnum.get()
    }

    #[inline]
    fn e_shstrndx(&self) -> u16 {
        self.e_shstrndx.get()
    }
}
