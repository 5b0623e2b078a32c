use elfconf::elf::SHN_ABS;
use elfconf::read::elf::{classify, locate_tables, ElfTables};
use elfconf::{locate, ElfClass, ErrorKind};

use crate::common::{object_file, object_offset, Class, ElfBuilder, TestSymbol};

const CLASSES: [Class; 2] = [Class::Elf32, Class::Elf64];

fn elf_class(class: Class) -> ElfClass {
    match class {
        Class::Elf32 => ElfClass::ThirtyTwoBit,
        Class::Elf64 => ElfClass::SixtyFourBit,
    }
}

#[test]
fn known_symbols() {
    for class in CLASSES {
        let data = ElfBuilder::new(class).build();
        assert_eq!(classify(&data).unwrap(), elf_class(class));

        let location = locate(&data, b"counter").unwrap();
        assert_eq!(location.class, elf_class(class));
        assert_eq!(location.index, 1);
        assert_eq!(location.offset, 0x2040);
        assert_eq!(location.size, 4);

        let location = locate(&data, b"limit").unwrap();
        assert_eq!(location.index, 2);
        assert_eq!(location.offset, 0x2048);
        assert_eq!(location.size, 8);

        let location = locate(&data, b"empty").unwrap();
        assert_eq!(location.offset, 0x2058);
        assert_eq!(location.size, 0);
    }
}

#[test]
fn translate_offset() {
    for class in CLASSES {
        let mut builder = ElfBuilder::new(class);
        builder.data_address = 0x1000;
        builder.data_offset = 0x100;
        builder.symbols = vec![TestSymbol::data("value", 0x1010, 2)];
        let data = builder.build();
        let location = locate(&data, b"value").unwrap();
        assert_eq!(location.offset, 0x110);
        assert_eq!(location.size, 2);
    }
}

#[test]
fn object_symbols() {
    for class in CLASSES {
        let data = object_file(class);
        for name in ["counter", "limit", "flag"] {
            let location = locate(&data, name.as_bytes()).unwrap();
            let (offset, size) = object_offset(&data, name);
            assert_eq!((location.offset, location.size), (offset, size), "{}", name);
        }
        assert_eq!(
            locate(&data, b"external").unwrap_err().kind(),
            ErrorKind::UndefinedSymbol
        );
    }
}

#[test]
fn symbol_not_found() {
    for class in CLASSES {
        let data = ElfBuilder::new(class).build();
        for name in [&b"missing"[..], b"count", b"counter2", b"COUNTER", b".data"] {
            let error = locate(&data, name).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::SymbolNotFound);
        }
    }
}

#[test]
fn undefined_symbol() {
    for class in CLASSES {
        let data = ElfBuilder::new(class).build();
        let error = locate(&data, b"external").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UndefinedSymbol);
        assert_eq!(
            error.to_string(),
            "Symbol 'external' is not defined in this file"
        );

        // The null symbol has an empty name.
        let error = locate(&data, b"").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UndefinedSymbol);
    }
}

#[test]
fn first_match() {
    for class in CLASSES {
        let mut builder = ElfBuilder::new(class);
        builder.symbols = vec![
            TestSymbol::data("dup", 0x40_2040, 4),
            TestSymbol::data("dup", 0x40_2048, 8),
        ];
        let data = builder.build();
        let location = locate(&data, b"dup").unwrap();
        assert_eq!(location.index, 1);
        assert_eq!(location.offset, 0x2040);
        assert_eq!(location.size, 4);
    }
}

#[test]
fn not_an_elf_file() {
    let mut data = ElfBuilder::new(Class::Elf64).build();
    data[0] = b'M';
    assert_eq!(locate(&data, b"counter").unwrap_err().kind(), ErrorKind::NotAnElfFile);
    assert_eq!(locate(b"#!/bin/sh\n", b"counter").unwrap_err().kind(), ErrorKind::NotAnElfFile);
    assert_eq!(locate(b"\x7fEL", b"counter").unwrap_err().kind(), ErrorKind::NotAnElfFile);
    assert_eq!(locate(&[], b"counter").unwrap_err().kind(), ErrorKind::NotAnElfFile);
}

#[test]
fn unsupported_class() {
    let mut data = ElfBuilder::new(Class::Elf64).build();
    for class in [0, 3, 0xff] {
        data[4] = class;
        assert_eq!(
            locate(&data, b"counter").unwrap_err().kind(),
            ErrorKind::UnsupportedClass
        );
    }
}

#[test]
fn stripped() {
    for class in CLASSES {
        let mut builder = ElfBuilder::new(class);
        builder.stripped = true;
        let data = builder.build();
        let error = locate(&data, b"counter").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::SectionNotFound);
        assert_eq!(error.to_string(), "Missing .symtab section");
    }
}

#[test]
fn symbol_entry_size() {
    for class in CLASSES {
        for entsize in [0, 1, class.sym_size() as u64 - 1] {
            let mut builder = ElfBuilder::new(class);
            builder.symtab_entsize = Some(entsize);
            let data = builder.build();
            assert_eq!(
                locate(&data, b"counter").unwrap_err().kind(),
                ErrorKind::MalformedSectionTable,
                "{}",
                entsize
            );
        }

        // A larger entry size is used as the stride.
        let mut builder = ElfBuilder::new(class);
        builder.symtab_entsize = Some(32);
        let data = builder.build();
        let location = locate(&data, b"flag").unwrap();
        assert_eq!(location.index, 3);
        assert_eq!(location.offset, 0x2050);
    }
}

#[test]
fn reserved_section_index() {
    for class in CLASSES {
        let mut builder = ElfBuilder::new(class);
        builder.symbols = vec![
            TestSymbol {
                name: "absolute",
                value: 0x40_2040,
                size: 4,
                shndx: SHN_ABS,
            },
            TestSymbol {
                name: "dangling",
                value: 0x40_2040,
                size: 4,
                shndx: 9,
            },
        ];
        let data = builder.build();
        for name in [&b"absolute"[..], b"dangling"] {
            assert_eq!(
                locate(&data, name).unwrap_err().kind(),
                ErrorKind::MalformedSectionTable
            );
        }
    }
}

#[test]
fn truncated() {
    for class in CLASSES {
        let data = ElfBuilder::new(class).build();
        // The section headers are at the end of the file.
        let error = locate(&data[..data.len() - 1], b"counter").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedSectionTable);
        // The file ends inside the symbol table.
        let builder = ElfBuilder::new(class);
        let error = locate(&data[..builder.symtab_offset() as usize + 8], b"counter").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedSectionTable);
        // Only the header remains.
        let error = locate(&data[..40], b"counter").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedSectionTable);
    }
}

#[test]
fn tables() {
    let builder = ElfBuilder::new(Class::Elf64);
    let data = builder.build();
    let tables = locate_tables(&data, ElfClass::SixtyFourBit).unwrap();
    assert_eq!(tables.class(), ElfClass::SixtyFourBit);
    let ElfTables::SixtyFourBit(tables) = tables else {
        panic!("wrong class");
    };
    assert_eq!(tables.sections().count(), 5);
    assert_eq!(tables.shstrndx(), 4);
    assert_eq!(tables.symtab_offset(), builder.symtab_offset());
    // The null symbol and five others.
    assert_eq!(tables.symbol_count(), 6);
    assert_eq!(
        tables.strtab_offset(),
        builder.symtab_offset() + 6 * Class::Elf64.sym_size() as u64
    );
    assert_eq!(tables.strings().get(1), Ok(&b"counter"[..]));
    assert!(tables.symbol(6).is_err());

    let tables = locate_tables(&data, ElfClass::ThirtyTwoBit).unwrap_err();
    assert_eq!(tables.kind(), ErrorKind::UnsupportedClass);
}
