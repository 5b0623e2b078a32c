//! ELF definitions.
//!
//! These definitions are independent of read support, although we do implement
//! some traits useful for it.
//!
//! This module is the equivalent of the parts of /usr/include/elf.h that are
//! needed to find and patch symbols. Fields use host byte order.

use crate::endian::{U16, U32, U64};
use crate::pod::Pod;

/// The header at the start of every 32-bit ELF file.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct FileHeader32 {
    /// Magic number and other information.
    pub e_ident: Ident,
    /// Object file type. One of the `ET_*` constants.
    pub e_type: U16,
    /// Architecture. One of the `EM_*` constants.
    pub e_machine: U16,
    /// Object file version. Must be `EV_CURRENT`.
    pub e_version: U32,
    /// Entry point virtual address.
    pub e_entry: U32,
    /// Program header table file offset.
    pub e_phoff: U32,
    /// Section header table file offset.
    pub e_shoff: U32,
    /// Processor-specific flags.
    pub e_flags: U32,
    /// Size in bytes of this header.
    pub e_ehsize: U16,
    /// Program header table entry size.
    pub e_phentsize: U16,
    /// Program header table entry count.
    pub e_phnum: U16,
    /// Section header table entry size.
    pub e_shentsize: U16,
    /// Section header table entry count.
    ///
    /// If zero, the real count is in `sh_size` of section 0.
    pub e_shnum: U16,
    /// Section header string table index.
    ///
    /// If `SHN_XINDEX`, the real index is in `sh_link` of section 0.
    pub e_shstrndx: U16,
}

/// The header at the start of every 64-bit ELF file.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct FileHeader64 {
    /// Magic number and other information.
    pub e_ident: Ident,
    /// Object file type. One of the `ET_*` constants.
    pub e_type: U16,
    /// Architecture. One of the `EM_*` constants.
    pub e_machine: U16,
    /// Object file version. Must be `EV_CURRENT`.
    pub e_version: U32,
    /// Entry point virtual address.
    pub e_entry: U64,
    /// Program header table file offset.
    pub e_phoff: U64,
    /// Section header table file offset.
    pub e_shoff: U64,
    /// Processor-specific flags.
    pub e_flags: U32,
    /// Size in bytes of this header.
    pub e_ehsize: U16,
    /// Program header table entry size.
    pub e_phentsize: U16,
    /// Program header table entry count.
    pub e_phnum: U16,
    /// Section header table entry size.
    pub e_shentsize: U16,
    /// Section header table entry count.
    ///
    /// If zero, the real count is in `sh_size` of section 0.
    pub e_shnum: U16,
    /// Section header string table index.
    ///
    /// If `SHN_XINDEX`, the real index is in `sh_link` of section 0.
    pub e_shstrndx: U16,
}

/// Magic number and other information.
///
/// Contained in the file header.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct Ident {
    /// Magic number. Must be `ELFMAG`.
    pub magic: [u8; 4],
    /// File class. One of the `ELFCLASS*` constants.
    pub class: u8,
    /// Data encoding. One of the `ELFDATA*` constants.
    pub data: u8,
    /// ELF version. Must be `EV_CURRENT`.
    pub version: u8,
    /// OS ABI identification. One of the `ELFOSABI*` constants.
    pub os_abi: u8,
    /// ABI version.
    pub abi_version: u8,
    /// Padding bytes.
    pub padding: [u8; 7],
}

/// File identification bytes 0-3.
pub const ELFMAG: [u8; 4] = [0x7f, b'E', b'L', b'F'];

// Values for `Ident::class`.
/// 32-bit object.
pub const ELFCLASS32: u8 = 1;
/// 64-bit object.
pub const ELFCLASS64: u8 = 2;

// Values for `Ident::data`.
/// 2's complement, little endian.
pub const ELFDATA2LSB: u8 = 1;
/// 2's complement, big endian.
pub const ELFDATA2MSB: u8 = 2;

/// Section header.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct SectionHeader32 {
    /// Section name.
    ///
    /// This is an offset into the section header string table.
    pub sh_name: U32,
    /// Section type. One of the `SHT_*` constants.
    pub sh_type: U32,
    /// Section flags. A combination of the `SHF_*` constants.
    pub sh_flags: U32,
    /// Section virtual address at execution.
    pub sh_addr: U32,
    /// Section file offset.
    pub sh_offset: U32,
    /// Section size in bytes.
    pub sh_size: U32,
    /// Link to another section.
    pub sh_link: U32,
    /// Additional section information.
    pub sh_info: U32,
    /// Section alignment.
    pub sh_addralign: U32,
    /// Entry size if the section holds a table.
    pub sh_entsize: U32,
}

/// Section header.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct SectionHeader64 {
    /// Section name.
    ///
    /// This is an offset into the section header string table.
    pub sh_name: U32,
    /// Section type. One of the `SHT_*` constants.
    pub sh_type: U32,
    /// Section flags. A combination of the `SHF_*` constants.
    pub sh_flags: U64,
    /// Section virtual address at execution.
    pub sh_addr: U64,
    /// Section file offset.
    pub sh_offset: U64,
    /// Section size in bytes.
    pub sh_size: U64,
    /// Link to another section.
    pub sh_link: U32,
    /// Additional section information.
    pub sh_info: U32,
    /// Section alignment.
    pub sh_addralign: U64,
    /// Entry size if the section holds a table.
    pub sh_entsize: U64,
}

// Special values for section indices.
/// Undefined section.
pub const SHN_UNDEF: u16 = 0;
/// Start of reserved section indices.
pub const SHN_LORESERVE: u16 = 0xff00;
/// Associated symbol is absolute.
pub const SHN_ABS: u16 = 0xfff1;
/// Section index is in the `SHT_SYMTAB_SHNDX` section.
pub const SHN_XINDEX: u16 = 0xffff;

// Values for `SectionHeader*::sh_type`.
/// Symbol table.
pub const SHT_SYMTAB: u32 = 2;
/// String table.
pub const SHT_STRTAB: u32 = 3;
/// Program space with no data (bss).
pub const SHT_NOBITS: u32 = 8;

/// Symbol table entry.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct Sym32 {
    /// Symbol name.
    ///
    /// This is an offset into the symbol string table.
    pub st_name: U32,
    /// Symbol value.
    pub st_value: U32,
    /// Symbol size.
    pub st_size: U32,
    /// Symbol type and binding.
    pub st_info: u8,
    /// Symbol visibility.
    pub st_other: u8,
    /// Section index or one of the `SHN_*` values.
    pub st_shndx: U16,
}

/// Symbol table entry.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct Sym64 {
    /// Symbol name.
    ///
    /// This is an offset into the symbol string table.
    pub st_name: U32,
    /// Symbol type and binding.
    pub st_info: u8,
    /// Symbol visibility.
    pub st_other: u8,
    /// Section index or one of the `SHN_*` values.
    pub st_shndx: U16,
    /// Symbol value.
    pub st_value: U64,
    /// Symbol size.
    pub st_size: U64,
}

/// Name of the section holding the symbol table.
pub const SYMTAB_NAME: &[u8] = b".symtab";
/// Name of the section holding the symbol names.
pub const STRTAB_NAME: &[u8] = b".strtab";

unsafe_impl_pod!(
    Ident,
    FileHeader32,
    FileHeader64,
    SectionHeader32,
    SectionHeader64,
    Sym32,
    Sym64,
);
