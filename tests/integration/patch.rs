use std::io;

use elfconf::write::value_bytes;
use elfconf::{patch, ElfImage, ErrorKind, PatchRequest};

use crate::common::{contents, object_file, object_offset, temp_file, Class, ElfBuilder};

const CLASSES: [Class; 2] = [Class::Elf32, Class::Elf64];

#[test]
fn patch_counter() {
    let original = ElfBuilder::new(Class::Elf64).build();
    let file = temp_file(&original);

    let location = patch(&PatchRequest::new(file.path(), "counter", 0x2a)).unwrap();
    assert_eq!(location.offset, 0x2040);
    assert_eq!(location.size, 4);

    let patched = contents(&file);
    assert_eq!(patched.len(), original.len());
    assert_eq!(&patched[0x2040..0x2044], &0x2a_u32.to_ne_bytes());
    assert_eq!(&patched[..0x2040], &original[..0x2040]);
    assert_eq!(&patched[0x2044..], &original[0x2044..]);
}

#[test]
fn round_trip() {
    for class in CLASSES {
        let original = ElfBuilder::new(class).build();
        for (name, value) in [
            ("counter", 0x1234_5678_9abc_def0),
            ("limit", u64::MAX - 1),
            ("flag", 0x1ff),
        ] {
            let file = temp_file(&original);
            let location = patch(&PatchRequest::new(file.path(), name, value)).unwrap();

            let image = ElfImage::load(file.path()).unwrap();
            let offset = location.offset as usize;
            let size = location.size as usize;
            assert_eq!(
                &image.data()[offset..offset + size],
                &value_bytes(value, location.size)[..],
                "{}",
                name
            );
            assert_eq!(image.locate(name.as_bytes()).unwrap(), location);
        }
    }
}

#[test]
fn idempotent() {
    for class in CLASSES {
        let original = object_file(class);
        let (offset, size) = object_offset(&original, "counter");
        assert_eq!(size, 4);
        let offset = offset as usize;
        let mut current = [0; 4];
        current.copy_from_slice(&original[offset..offset + 4]);
        let value = u32::from_ne_bytes(current).into();

        let file = temp_file(&original);
        patch(&PatchRequest::new(file.path(), "counter", value)).unwrap();
        assert_eq!(contents(&file), original);
        patch(&PatchRequest::new(file.path(), "counter", value)).unwrap();
        assert_eq!(contents(&file), original);
    }
}

#[test]
fn object_round_trip() {
    use object::{Object, ObjectSection, ObjectSymbol};

    for class in CLASSES {
        let file = temp_file(&object_file(class));
        patch(&PatchRequest::new(file.path(), "limit", 0x0102_0304_0506_0708)).unwrap();

        let data = contents(&file);
        let object = object::File::parse(&*data).unwrap();
        let symbol = object.symbol_by_name("limit").unwrap();
        let section = object
            .section_by_index(symbol.section_index().unwrap())
            .unwrap();
        let start = (symbol.address() - section.address()) as usize;
        let contents = section.data().unwrap();
        assert_eq!(
            &contents[start..start + 8],
            &0x0102_0304_0506_0708_u64.to_ne_bytes()
        );
        // The neighbouring symbol is unchanged.
        let symbol = object.symbol_by_name("counter").unwrap();
        let start = (symbol.address() - section.address()) as usize;
        assert_eq!(&contents[start..start + 4], &[1, 2, 3, 4]);
    }
}

#[test]
fn zero_size() {
    let original = ElfBuilder::new(Class::Elf64).build();
    let file = temp_file(&original);
    let location = patch(&PatchRequest::new(file.path(), "empty", u64::MAX)).unwrap();
    assert_eq!(location.size, 0);
    assert_eq!(contents(&file), original);
}

#[test]
fn failures_leave_file_unchanged() {
    for class in CLASSES {
        let original = ElfBuilder::new(class).build();
        let file = temp_file(&original);
        for (name, kind) in [
            ("external", ErrorKind::UndefinedSymbol),
            ("missing", ErrorKind::SymbolNotFound),
        ] {
            let error = patch(&PatchRequest::new(file.path(), name, 1)).unwrap_err();
            assert_eq!(error.kind(), kind);
            assert_eq!(contents(&file), original);
        }

        let mut builder = ElfBuilder::new(class);
        builder.stripped = true;
        let stripped = builder.build();
        let file = temp_file(&stripped);
        let error = patch(&PatchRequest::new(file.path(), "counter", 1)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::SectionNotFound);
        assert_eq!(contents(&file), stripped);
    }

    let text = b"not an object file\n";
    let file = temp_file(text);
    let error = patch(&PatchRequest::new(file.path(), "counter", 1)).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotAnElfFile);
    assert_eq!(contents(&file), text);
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.out");
    let error = patch(&PatchRequest::new(&path, "counter", 1)).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Io(io::ErrorKind::NotFound));
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn image() {
    let original = ElfBuilder::new(Class::Elf32).build();
    let file = temp_file(&original);

    let mut image = ElfImage::load(file.path()).unwrap();
    assert_eq!(image.data(), &original[..]);
    let location = image.locate(b"limit").unwrap();
    image
        .write_value(location.offset, location.size, 0x55)
        .unwrap();
    // The buffer keeps the contents at load time.
    assert_eq!(image.data(), &original[..]);
    drop(image);

    let patched = contents(&file);
    assert_eq!(&patched[0x2048..0x2050], &0x55_u64.to_ne_bytes());
}
