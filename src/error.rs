use std::{error, fmt, io};

/// An error that occurred while locating or patching a symbol.
#[derive(Debug)]
pub struct Error {
    inner: ErrorInner,
}

#[derive(Debug)]
enum ErrorInner {
    Argument(String),
    Io(io::Error),
    OutOfMemory(u64),
    NotAnElfFile,
    UnsupportedClass(u8),
    SectionNotFound(&'static str),
    MalformedSectionTable(&'static str),
    SymbolNotFound(String),
    UndefinedSymbol(String),
    ShortWrite { offset: u64, size: u64 },
}

/// The kind of error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An input value was missing or malformed.
    Argument,
    /// An I/O error occurred while opening, reading, seeking or writing the file.
    Io(io::ErrorKind),
    /// The buffer for the file contents could not be allocated.
    OutOfMemory,
    /// The file does not start with the ELF magic.
    NotAnElfFile,
    /// The ELF class is neither 32-bit nor 64-bit.
    UnsupportedClass,
    /// The file has no `.symtab` or no `.strtab` section.
    ///
    /// This is the normal result for stripped files.
    SectionNotFound,
    /// A header, table or index lies outside the file or is otherwise invalid.
    MalformedSectionTable,
    /// No symbol table entry has the requested name.
    SymbolNotFound,
    /// The symbol is not defined in this file, so it has no storage to patch.
    UndefinedSymbol,
    /// Fewer bytes were written than the symbol occupies.
    ShortWrite,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            ErrorInner::Argument(e) => e.fmt(f),
            ErrorInner::Io(e) => e.fmt(f),
            ErrorInner::OutOfMemory(size) => {
                write!(f, "Failed to allocate {} bytes for the file contents", size)
            }
            ErrorInner::NotAnElfFile => f.write_str("Not an ELF file"),
            ErrorInner::UnsupportedClass(class) => write!(f, "Unsupported ELF class {}", class),
            ErrorInner::SectionNotFound(name) => write!(f, "Missing {} section", name),
            ErrorInner::MalformedSectionTable(e) => f.write_str(e),
            ErrorInner::SymbolNotFound(name) => write!(f, "Symbol '{}' not found", name),
            ErrorInner::UndefinedSymbol(name) => {
                write!(f, "Symbol '{}' is not defined in this file", name)
            }
            ErrorInner::ShortWrite { offset, size } => write!(
                f,
                "Short write of {} bytes at offset {:#x}",
                size, offset
            ),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.inner {
            ErrorInner::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> ErrorKind {
        match &self.inner {
            ErrorInner::Argument(_) => ErrorKind::Argument,
            ErrorInner::Io(e) => ErrorKind::Io(e.kind()),
            ErrorInner::OutOfMemory(_) => ErrorKind::OutOfMemory,
            ErrorInner::NotAnElfFile => ErrorKind::NotAnElfFile,
            ErrorInner::UnsupportedClass(_) => ErrorKind::UnsupportedClass,
            ErrorInner::SectionNotFound(_) => ErrorKind::SectionNotFound,
            ErrorInner::MalformedSectionTable(_) => ErrorKind::MalformedSectionTable,
            ErrorInner::SymbolNotFound(_) => ErrorKind::SymbolNotFound,
            ErrorInner::UndefinedSymbol(_) => ErrorKind::UndefinedSymbol,
            ErrorInner::ShortWrite { .. } => ErrorKind::ShortWrite,
        }
    }

    pub(crate) fn argument(message: impl Into<String>) -> Self {
        Self {
            inner: ErrorInner::Argument(message.into()),
        }
    }

    pub(crate) fn io(error: io::Error) -> Self {
        Self {
            inner: ErrorInner::Io(error),
        }
    }

    pub(crate) fn out_of_memory(size: u64) -> Self {
        Self {
            inner: ErrorInner::OutOfMemory(size),
        }
    }

    pub(crate) fn not_elf() -> Self {
        Self {
            inner: ErrorInner::NotAnElfFile,
        }
    }

    pub(crate) fn unsupported_class(class: u8) -> Self {
        Self {
            inner: ErrorInner::UnsupportedClass(class),
        }
    }

    pub(crate) fn section_not_found(name: &'static str) -> Self {
        Self {
            inner: ErrorInner::SectionNotFound(name),
        }
    }

    pub(crate) fn malformed(message: &'static str) -> Self {
        Self {
            inner: ErrorInner::MalformedSectionTable(message),
        }
    }

    pub(crate) fn symbol_not_found(name: &[u8]) -> Self {
        Self {
            inner: ErrorInner::SymbolNotFound(String::from_utf8_lossy(name).into_owned()),
        }
    }

    pub(crate) fn undefined_symbol(name: &[u8]) -> Self {
        Self {
            inner: ErrorInner::UndefinedSymbol(String::from_utf8_lossy(name).into_owned()),
        }
    }

    pub(crate) fn short_write(offset: u64, size: u64) -> Self {
        Self {
            inner: ErrorInner::ShortWrite { offset, size },
        }
    }
}

/// The `Result` type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Convert an `Option` from a bounds checked read into a malformed file error.
pub(crate) trait ReadError<T> {
    fn read_error(self, message: &'static str) -> Result<T>;
}

impl<T> ReadError<T> for Option<T> {
    #[inline]
    fn read_error(self, message: &'static str) -> Result<T> {
        self.ok_or_else(|| Error::malformed(message))
    }
}
