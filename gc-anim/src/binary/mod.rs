//! Big-endian primitive I/O
//!
//! - `read` - Cursor-based readers for fixed-width values and value tables
//! - `write` - `Sink` abstraction, padding and reserve-then-patch writer

mod read;
mod write;


pub use read::{
    read_f32, read_f32_table, read_i8, read_i16, read_i16_table, read_u8, read_u16, read_u32,
    read_bytes, seek_to,
};
pub use write::{BinaryWriter, ForwardOnly, Reservation, Sink};

use crate::error::{AnimError, Result};

/// Filler written between 32-byte aligned blocks
///
/// Decoders never inspect it; it only has to match for byte-identical output.
pub const DEFAULT_FILLER: &[u8] = b"Blender J3D by PishPish; This is padding data to align stream";

/// Block alignment used by the J3D family
pub const BLOCK_ALIGN: u64 = 32;

/// Round `position` up to the next multiple of `multiple` (a power of two)
#[inline]
pub const fn align_up(position: u64, multiple: u64) -> u64 {
    (position + (multiple - 1)) & !(multiple - 1)
}

/// Narrow a length or offset to a 16-bit field
pub(crate) fn fit_u16(field: &'static str, value: usize) -> Result<u16> {
    u16::try_from(value).map_err(|_| AnimError::FieldOverflow {
        field,
        value: value as u64,
        bits: 16,
    })
}

/// Narrow a length or offset to a 32-bit field
pub(crate) fn fit_u32(field: &'static str, value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| AnimError::FieldOverflow {
        field,
        value: value as u64,
        bits: 32,
    })
}
