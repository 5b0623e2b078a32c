//! Bounds checked views of file format structures in a byte buffer.
//!
//! This module should be replaced once rust provides safe transmutes.

use core::{fmt, mem};

use crate::endian::{U16, U32, U64};

/// A trait for types that can safely be converted from byte slices.
///
/// A type that is `Pod` must:
/// - be `#[repr(C)]` or `#[repr(transparent)]`
/// - have no invalid byte values
/// - have no padding
pub unsafe trait Pod: Copy + 'static {}

#[inline]
pub(crate) fn from_bytes<T: Pod>(data: &[u8]) -> Option<(&T, &[u8])> {
    let ptr = data.as_ptr();
    if (ptr as usize) % mem::align_of::<T>() != 0 {
        return None;
    }
    let size = mem::size_of::<T>();
    let tail = data.get(size..)?;
    // Safety:
    // The alignment and size are checked by this function.
    // The Pod trait ensures the type is valid to cast from bytes.
    let val = unsafe { &*ptr.cast() };
    Some((val, tail))
}

/// A newtype for byte slices.
///
/// It has these important features:
/// - no methods that can panic, such as `Index`
/// - convenience methods for `Pod` types
/// - a useful `Debug` implementation
#[derive(Default, Clone, Copy, PartialEq, Eq)]
pub struct Bytes<'data>(pub &'data [u8]);

impl<'data> fmt::Debug for Bytes<'data> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_list_bytes(self.0, fmt)
    }
}

impl<'data> Bytes<'data> {
    /// Skip over the given number of bytes.
    ///
    /// Returns `None` and empties the slice if there are too few bytes.
    #[inline]
    pub fn skip(&mut self, offset: usize) -> Option<()> {
        match self.0.get(offset..) {
            Some(tail) => {
                self.0 = tail;
                Some(())
            }
            None => {
                self.0 = &[];
                None
            }
        }
    }

    /// Return the given number of bytes from the start of the slice, and
    /// advance past them.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Option<Bytes<'data>> {
        match (self.0.get(..count), self.0.get(count..)) {
            (Some(head), Some(tail)) => {
                self.0 = tail;
                Some(Bytes(head))
            }
            _ => {
                self.0 = &[];
                None
            }
        }
    }

    /// Return `count` bytes starting at `offset`, or `None` if any of them
    /// lie outside the slice.
    #[inline]
    pub fn read_bytes_at(mut self, offset: u64, count: u64) -> Option<Bytes<'data>> {
        self.skip(offset.try_into().ok()?)?;
        self.read_bytes(count.try_into().ok()?)
    }

    /// Return a reference to a `Pod` struct at the start of the slice, and
    /// advance past it.
    #[inline]
    pub fn read<T: Pod>(&mut self) -> Option<&'data T> {
        match from_bytes(self.0) {
            Some((value, tail)) => {
                self.0 = tail;
                Some(value)
            }
            None => {
                self.0 = &[];
                None
            }
        }
    }

    /// Return a reference to a `T` at `offset`, or `None` if the value does
    /// not fit within the slice.
    #[inline]
    pub fn read_at<T: Pod>(mut self, offset: u64) -> Option<&'data T> {
        self.skip(offset.try_into().ok()?)?;
        self.read()
    }
}

// Only for Debug impl of `Bytes`.
fn debug_list_bytes(bytes: &[u8], fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut list = fmt.debug_list();
    list.entries(bytes.iter().take(8).copied().map(DebugByte));
    if bytes.len() > 8 {
        list.entry(&DebugLen(bytes.len()));
    }
    list.finish()
}

struct DebugByte(u8);

impl fmt::Debug for DebugByte {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "0x{:02x}", self.0)
    }
}

struct DebugLen(usize);

impl fmt::Debug for DebugLen {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "...; {}", self.0)
    }
}

macro_rules! unsafe_impl_pod {
    ($($struct_name:ident),+ $(,)?) => {
        $(
            unsafe impl Pod for $struct_name { }
        )+
    }
}

unsafe_impl_pod!(u8, U16, U32, U64);
