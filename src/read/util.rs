use crate::pod::Bytes;

/// A table of zero-terminated strings.
///
/// This is used by most file formats for strings such as section names and symbol names.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringTable<'data> {
    data: Bytes<'data>,
}

impl<'data> StringTable<'data> {
    /// Interpret the given data as a string table.
    pub fn new(data: &'data [u8]) -> Self {
        StringTable { data: Bytes(data) }
    }

    /// Get the string at the given offset, without the terminating null.
    ///
    /// Returns an error if the offset is outside the table or the string is
    /// not terminated before the end of the table.
    pub fn get(&self, offset: u32) -> Result<&'data [u8], ()> {
        let data = self.data.0.get(offset as usize..).ok_or(())?;
        let end = memchr::memchr(b'\0', data).ok_or(())?;
        Ok(&data[..end])
    }
}
