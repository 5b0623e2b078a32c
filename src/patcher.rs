use std::path::PathBuf;

#[cfg(feature = "logging")]
use log::info;

use crate::error::{Error, Result};
use crate::image::ElfImage;
use crate::read::elf::SymbolLocation;

/// A request to overwrite the value of a symbol in an ELF file.
///
/// This is used as an argument to [`patch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchRequest {
    path: PathBuf,
    symbol: String,
    value: u64,
}

impl PatchRequest {
    /// Create a request to set `symbol` in the file at `path` to `value`.
    pub fn new(path: impl Into<PathBuf>, symbol: impl Into<String>, value: u64) -> Self {
        PatchRequest {
            path: path.into(),
            symbol: symbol.into(),
            value,
        }
    }

    /// The file to patch.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// The exact name of the symbol to patch.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The value to write.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Parse an unsigned integer literal.
    ///
    /// Accepts decimal, hexadecimal with a `0x` or `0X` prefix, and octal with
    /// a leading `0`. Returns `ErrorKind::Argument` for anything else,
    /// including values that do not fit in a `u64`.
    pub fn parse_value(s: &str) -> Result<u64> {
        let (digits, radix) = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            (hex, 16)
        } else if s.len() > 1 && s.starts_with('0') {
            (&s[1..], 8)
        } else {
            (s, 10)
        };
        if digits.is_empty() || !digits.bytes().all(|b| (b as char).is_digit(radix)) {
            return Err(Error::argument(format!("Invalid value: `{}`", s)));
        }
        u64::from_str_radix(digits, radix)
            .map_err(|_| Error::argument(format!("Value out of range: `{}`", s)))
    }
}

/// Overwrite the storage of a symbol in an ELF file with a new value.
///
/// The file is loaded, the symbol is resolved and its file offset computed,
/// then the low-order bytes of the value are written in place. Each step fails
/// fast; the file is only modified if every earlier step succeeded.
pub fn patch(request: &PatchRequest) -> Result<SymbolLocation> {
    let mut image = ElfImage::load(&request.path)?;
    let location = image.locate(request.symbol.as_bytes())?;
    #[cfg(feature = "logging")]
    info!(
        "Writing {:#x} to symbol {} at offset {:#x} ({} bytes)",
        request.value, request.symbol, location.offset, location.size
    );
    image.write_value(location.offset, location.size, request.value)?;
    Ok(location)
}
