//! Seekable sinks, padding and reserve-then-patch

use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, SeekFrom, Write};

use super::align_up;
use crate::error::{AnimError, Result};

/// A position-addressable output
///
/// Reserve-then-patch needs to jump back to a placeholder once the payload
/// length is known, so every encoder writes through this trait rather than a
/// bare `Write`.
pub trait Sink: Write {
    /// Absolute write position
    fn current_position(&mut self) -> Result<u64>;

    /// Move the write position to an absolute offset
    fn seek_to(&mut self, position: u64) -> Result<()>;
}

impl Sink for Cursor<Vec<u8>> {
    fn current_position(&mut self) -> Result<u64> {
        Ok(self.position())
    }

    fn seek_to(&mut self, position: u64) -> Result<()> {
        self.set_position(position);
        Ok(())
    }
}

impl Sink for Cursor<&mut Vec<u8>> {
    fn current_position(&mut self) -> Result<u64> {
        Ok(self.position())
    }

    fn seek_to(&mut self, position: u64) -> Result<()> {
        self.set_position(position);
        Ok(())
    }
}

impl Sink for File {
    fn current_position(&mut self) -> Result<u64> {
        Ok(self.stream_position()?)
    }

    fn seek_to(&mut self, position: u64) -> Result<()> {
        self.seek(SeekFrom::Start(position))?;
        Ok(())
    }
}

impl<W: Write + Seek> Sink for BufWriter<W> {
    fn current_position(&mut self) -> Result<u64> {
        Ok(self.stream_position()?)
    }

    fn seek_to(&mut self, position: u64) -> Result<()> {
        self.seek(SeekFrom::Start(position))?;
        Ok(())
    }
}

/// Adapter for outputs that can only be appended to (pipes, sockets)
///
/// Tracks the byte count so positions are still known, but any attempt to
/// move the write position fails with [`AnimError::UnseekableStream`].
#[derive(Debug)]
pub struct ForwardOnly<W> {
    inner: W,
    position: u64,
}

impl<W: Write> ForwardOnly<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, position: 0 }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for ForwardOnly<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.position += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

impl<W: Write> Sink for ForwardOnly<W> {
    fn current_position(&mut self) -> Result<u64> {
        Ok(self.position)
    }

    fn seek_to(&mut self, position: u64) -> Result<()> {
        if position == self.position {
            return Ok(());
        }
        Err(AnimError::UnseekableStream {
            position: self.position,
            target: position,
        })
    }
}

/// Placeholder written by [`BinaryWriter::reserve_u16`] / [`BinaryWriter::reserve_u32`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    pub position: u64,
}

/// Big-endian writer over a [`Sink`]
pub struct BinaryWriter<'a, S: Sink + ?Sized> {
    sink: &'a mut S,
    filler: &'a [u8],
}

impl<'a, S: Sink + ?Sized> BinaryWriter<'a, S> {
    /// Wrap `sink`, using `filler` for block padding
    pub fn new(sink: &'a mut S, filler: &'a [u8]) -> Self {
        Self { sink, filler }
    }

    pub fn position(&mut self) -> Result<u64> {
        self.sink.current_position()
    }

    pub fn seek(&mut self, position: u64) -> Result<()> {
        self.sink.seek_to(position)
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.sink.write_all(bytes)?;
        Ok(())
    }

    pub fn write_u8(&mut self, val: u8) -> Result<()> {
        self.write_bytes(&[val])
    }

    pub fn write_i8(&mut self, val: i8) -> Result<()> {
        self.write_bytes(&val.to_be_bytes())
    }

    pub fn write_u16(&mut self, val: u16) -> Result<()> {
        self.write_bytes(&val.to_be_bytes())
    }

    pub fn write_i16(&mut self, val: i16) -> Result<()> {
        self.write_bytes(&val.to_be_bytes())
    }

    pub fn write_u32(&mut self, val: u32) -> Result<()> {
        self.write_bytes(&val.to_be_bytes())
    }

    pub fn write_f32(&mut self, val: f32) -> Result<()> {
        self.write_bytes(&val.to_be_bytes())
    }

    pub fn write_f32_table(&mut self, data: &[f32]) -> Result<()> {
        data.iter().try_for_each(|&v| self.write_f32(v))
    }

    pub fn write_i16_table(&mut self, data: &[i16]) -> Result<()> {
        data.iter().try_for_each(|&v| self.write_i16(v))
    }

    /// Pad with filler bytes up to the next multiple of `multiple`
    ///
    /// Each run starts from the first filler byte. An empty filler pads with
    /// zeros.
    pub fn write_padding(&mut self, multiple: u64) -> Result<()> {
        let position = self.position()?;
        let len = (align_up(position, multiple) - position) as usize;
        if self.filler.is_empty() {
            return self.write_bytes(&vec![0u8; len]);
        }
        let padding: Vec<u8> = self.filler.iter().copied().cycle().take(len).collect();
        self.write_bytes(&padding)
    }

    /// Pad with zeros up to the next multiple of `multiple`
    pub fn write_zero_padding(&mut self, multiple: u64) -> Result<()> {
        let position = self.position()?;
        let len = (align_up(position, multiple) - position) as usize;
        self.write_bytes(&vec![0u8; len])
    }

    /// Write a zero u16 to be overwritten by [`Self::patch_u16`]
    pub fn reserve_u16(&mut self) -> Result<Reservation> {
        let position = self.position()?;
        self.write_u16(0)?;
        Ok(Reservation { position })
    }

    /// Write a zero u32 to be overwritten by [`Self::patch_u32`]
    pub fn reserve_u32(&mut self) -> Result<Reservation> {
        let position = self.position()?;
        self.write_u32(0)?;
        Ok(Reservation { position })
    }

    /// Overwrite a reserved u16; the caller repositions afterward
    pub fn patch_u16(&mut self, reservation: Reservation, val: u16) -> Result<()> {
        self.seek(reservation.position)?;
        self.write_u16(val)
    }

    /// Overwrite a reserved u32; the caller repositions afterward
    pub fn patch_u32(&mut self, reservation: Reservation, val: u32) -> Result<()> {
        self.seek(reservation.position)?;
        self.write_u32(val)
    }
}
