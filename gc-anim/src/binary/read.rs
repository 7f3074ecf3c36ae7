//! Helper functions for reading big-endian binary data

use std::io::{Cursor, Read};

use crate::error::{AnimError, Result};

fn read_array<const N: usize>(cursor: &mut Cursor<&[u8]>) -> Result<[u8; N]> {
    let offset = cursor.position();
    let mut buf = [0u8; N];
    cursor
        .read_exact(&mut buf)
        .map_err(|_| AnimError::TruncatedStream { offset, needed: N })?;
    Ok(buf)
}

/// Read a single unsigned byte
pub fn read_u8(cursor: &mut Cursor<&[u8]>) -> Result<u8> {
    Ok(read_array::<1>(cursor)?[0])
}

/// Read a single signed byte
pub fn read_i8(cursor: &mut Cursor<&[u8]>) -> Result<i8> {
    Ok(i8::from_be_bytes(read_array(cursor)?))
}

/// Read a 16-bit big-endian unsigned integer
pub fn read_u16(cursor: &mut Cursor<&[u8]>) -> Result<u16> {
    Ok(u16::from_be_bytes(read_array(cursor)?))
}

/// Read a 16-bit big-endian signed integer
pub fn read_i16(cursor: &mut Cursor<&[u8]>) -> Result<i16> {
    Ok(i16::from_be_bytes(read_array(cursor)?))
}

/// Read a 32-bit big-endian unsigned integer
pub fn read_u32(cursor: &mut Cursor<&[u8]>) -> Result<u32> {
    Ok(u32::from_be_bytes(read_array(cursor)?))
}

/// Read a 32-bit big-endian IEEE float
pub fn read_f32(cursor: &mut Cursor<&[u8]>) -> Result<f32> {
    Ok(f32::from_be_bytes(read_array(cursor)?))
}

/// Read `len` raw bytes
pub fn read_bytes<'a>(cursor: &mut Cursor<&'a [u8]>, len: usize) -> Result<&'a [u8]> {
    let offset = cursor.position();
    let data: &'a [u8] = *cursor.get_ref();
    let start = offset as usize;
    let end = start
        .checked_add(len)
        .filter(|&end| end <= data.len())
        .ok_or(AnimError::TruncatedStream {
            offset,
            needed: len,
        })?;
    cursor.set_position(end as u64);
    Ok(&data[start..end])
}

/// Move the cursor to an absolute offset
///
/// Seeking past the end is an error here rather than on the next read, so
/// the reported offset points at the bad table pointer.
pub fn seek_to(cursor: &mut Cursor<&[u8]>, offset: u64) -> Result<()> {
    if offset > cursor.get_ref().len() as u64 {
        return Err(AnimError::TruncatedStream { offset, needed: 0 });
    }
    cursor.set_position(offset);
    Ok(())
}

/// Fail early when `count` values of `size` bytes cannot fit after `offset`
///
/// Counts come straight from the file, so this runs before anything is
/// allocated for them.
fn check_table(cursor: &Cursor<&[u8]>, offset: u64, count: usize, size: usize) -> Result<()> {
    let len = cursor.get_ref().len() as u64;
    let needed = count.saturating_mul(size);
    if offset.saturating_add(needed as u64) > len {
        return Err(AnimError::TruncatedStream { offset, needed });
    }
    Ok(())
}

/// Read `count` f32 values starting at `offset`
pub fn read_f32_table(cursor: &mut Cursor<&[u8]>, offset: u64, count: usize) -> Result<Vec<f32>> {
    check_table(cursor, offset, count, 4)?;
    seek_to(cursor, offset)?;
    (0..count).map(|_| read_f32(cursor)).collect()
}

/// Read `count` i16 values starting at `offset`
pub fn read_i16_table(cursor: &mut Cursor<&[u8]>, offset: u64, count: usize) -> Result<Vec<i16>> {
    check_table(cursor, offset, count, 2)?;
    seek_to(cursor, offset)?;
    (0..count).map(|_| read_i16(cursor)).collect()
}
