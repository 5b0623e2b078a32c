use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

#[cfg(feature = "logging")]
use log::debug;

use crate::error::{Error, Result};
use crate::read::elf::{self, SymbolLocation};
use crate::write;

/// An ELF file loaded into memory, with the file kept open for patching.
///
/// The buffer holds the whole file as it was when loaded. Dropping the image
/// closes the file.
#[derive(Debug)]
pub struct ElfImage {
    file: File,
    data: Vec<u8>,
}

impl ElfImage {
    /// Open the file for reading and writing and read all of it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(Error::io)?;
        let size = file.seek(SeekFrom::End(0)).map_err(Error::io)?;
        file.seek(SeekFrom::Start(0)).map_err(Error::io)?;

        let len = usize::try_from(size).map_err(|_| Error::out_of_memory(size))?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| Error::out_of_memory(size))?;
        data.resize(len, 0);
        file.read_exact(&mut data).map_err(Error::io)?;

        #[cfg(feature = "logging")]
        debug!("Loaded {} bytes from '{}'", len, path.display());
        Ok(ElfImage { file, data })
    }

    /// The contents of the file at load time.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Resolve a symbol by name and compute the location of its storage.
    ///
    /// This only reads the in-memory copy.
    pub fn locate(&self, name: &[u8]) -> Result<SymbolLocation> {
        elf::locate(&self.data, name)
    }

    /// Overwrite `size` bytes of the file at `offset` with `value`.
    ///
    /// Only the file is written. The in-memory copy keeps the contents at
    /// load time.
    pub fn write_value(&mut self, offset: u64, size: u64, value: u64) -> Result<()> {
        write::write_value(&mut self.file, offset, size, value)
    }
}
