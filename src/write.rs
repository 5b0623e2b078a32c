//! Overwriting a symbol's storage in place.

use std::io::{self, Seek, SeekFrom, Write};

#[cfg(feature = "logging")]
use log::warn;

use crate::error::{Error, Result};

/// The widest value that can be written.
pub const VALUE_SIZE: u64 = 8;

/// Return the bytes written for a `size` byte slot holding `value`.
///
/// These are the low-order bytes of `value` in host byte order. At most
/// `VALUE_SIZE` bytes are returned; any further bytes of a wider slot are not
/// part of the value.
pub fn value_bytes(value: u64, size: u64) -> Vec<u8> {
    let bytes = value.to_ne_bytes();
    let count = size.min(VALUE_SIZE) as usize;
    if cfg!(target_endian = "big") {
        bytes[bytes.len() - count..].to_vec()
    } else {
        bytes[..count].to_vec()
    }
}

/// Overwrite the `size` byte slot at `offset` with `value`.
///
/// A zero size is a no-op. If `size` is larger than `VALUE_SIZE`, only the
/// first `VALUE_SIZE` bytes of the slot are written and the rest are left
/// unchanged.
///
/// Returns `ErrorKind::ShortWrite` if the writer stops accepting bytes, or
/// fails after part of the value was written (for example when the disk is
/// full).
pub fn write_value<W: Write + Seek>(w: &mut W, offset: u64, size: u64, value: u64) -> Result<()> {
    if size == 0 {
        return Ok(());
    }
    if size > VALUE_SIZE {
        #[cfg(feature = "logging")]
        warn!(
            "Symbol size {} is wider than the value, only {} bytes are written",
            size, VALUE_SIZE
        );
    }
    let bytes = value_bytes(value, size);
    w.seek(SeekFrom::Start(offset)).map_err(Error::io)?;
    let mut written = 0;
    while written < bytes.len() {
        match w.write(&bytes[written..]) {
            Ok(0) => return Err(Error::short_write(offset, bytes.len() as u64)),
            Ok(n) => written += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            // Part of the slot has already been overwritten.
            Err(_) if written > 0 => return Err(Error::short_write(offset, bytes.len() as u64)),
            Err(e) => return Err(Error::io(e)),
        }
    }
    w.flush().map_err(Error::io)
}
