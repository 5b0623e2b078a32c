//! Unaligned integer fields for file format structures.
//!
//! Structures are read in place from the file buffer, which gives no
//! alignment guarantees, so every multi-byte field is stored as a byte array.
//! Values are always interpreted in the byte order of the host.

use core::fmt;

use crate::elf;

/// The byte order of the host, as an `EI_DATA` value.
#[cfg(target_endian = "little")]
pub const NATIVE_DATA: u8 = elf::ELFDATA2LSB;

/// The byte order of the host, as an `EI_DATA` value.
#[cfg(target_endian = "big")]
pub const NATIVE_DATA: u8 = elf::ELFDATA2MSB;

macro_rules! unaligned_int {
    ($($(#[$meta:meta])* $name:ident($int:ty, $size:expr);)+) => {
        $(
            $(#[$meta])*
            #[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
            #[repr(transparent)]
            pub struct $name([u8; $size]);

            impl $name {
                /// Return the value as a native integer.
                #[inline]
                pub fn get(self) -> $int {
                    <$int>::from_ne_bytes(self.0)
                }
            }

            impl fmt::Debug for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{:#x}", self.get())
                }
            }
        )+
    };
}

unaligned_int! {
    /// An unaligned `u16` value in host byte order.
    U16(u16, 2);
    /// An unaligned `u32` value in host byte order.
    U32(u32, 4);
    /// An unaligned `u64` value in host byte order.
    U64(u64, 8);
}
