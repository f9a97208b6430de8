//! Bit-level extraction over packed payloads.
//!
//! AIS binary payloads pack fields at arbitrary bit boundaries, most
//! significant bit first. [`BitReader`] is a borrowed, read-only view that
//! extracts integers, flags, six-bit text and positions at any offset.

use alloc::{string::String, vec::Vec};

use serde::Serialize;
use thiserror::Error;

/// An error extracting a field from a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    /// The field extends past the end of the payload.
    #[error("Bit range [{offset}:+{width}] exceeds data length ({len} bits).")]
    OutOfBounds {
        offset: usize,
        width: usize,
        len: usize,
    },
    /// Integer fields are at most 32 bits wide.
    #[error("Field width {0} exceeds 32 bits.")]
    TooWide(usize),
    /// Six-bit text fields must span whole characters.
    #[error("String width must be a multiple of 6, got {0}.")]
    StringWidth(usize),
}

/// A longitude and latitude pair in decimal degrees.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
}

/// A read-only view over a payload, addressed in bits.
#[derive(Debug, Clone, Copy)]
pub struct BitReader<'a> {
    data: &'a [u8],
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// The underlying bytes.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Number of addressable bits, including any fill in the final byte.
    pub fn len_bits(&self) -> usize {
        self.data.len() * 8
    }

    fn check(&self, offset: usize, width: usize) -> Result<(), RangeError> {
        let len = self.len_bits();
        match offset.checked_add(width) {
            Some(end) if end <= len => Ok(()),
            _ => Err(RangeError::OutOfBounds { offset, width, len }),
        }
    }

    /// Extract an unsigned integer of `width` bits (at most 32).
    ///
    /// A zero-width field reads as 0 regardless of the offset.
    pub fn get_uint(&self, offset: usize, width: usize) -> Result<u32, RangeError> {
        if width == 0 {
            return Ok(0);
        }
        if width > 32 {
            Err(RangeError::TooWide(width))?;
        }
        self.check(offset, width)?;

        let first = offset / 8;
        let last = (offset + width - 1) / 8;

        // At most five bytes are spanned, so the window fits in a u64.
        let window = self.data[first..=last]
            .iter()
            .fold(0u64, |acc, b| (acc << 8) | u64::from(*b));

        let spanned = (last - first + 1) * 8;
        let shift = spanned - (offset % 8) - width;
        let mask = (1u64 << width) - 1;

        Ok(((window >> shift) & mask) as u32)
    }

    /// Extract a two's complement signed integer of `width` bits.
    pub fn get_int(&self, offset: usize, width: usize) -> Result<i32, RangeError> {
        let value = i64::from(self.get_uint(offset, width)?);

        if width > 0 && value & (1 << (width - 1)) != 0 {
            Ok((value - (1 << width)) as i32)
        } else {
            Ok(value as i32)
        }
    }

    /// Extract a single bit as a flag.
    pub fn get_bool(&self, offset: usize) -> Result<bool, RangeError> {
        Ok(self.get_uint(offset, 1)? == 1)
    }

    /// Extract six-bit AIS text spanning `width` bits.
    ///
    /// Trailing `@` and space characters are padding and are removed; inner
    /// spaces are kept.
    pub fn get_string(&self, offset: usize, width: usize) -> Result<String, RangeError> {
        if width % 6 != 0 {
            Err(RangeError::StringWidth(width))?;
        }

        let mut text = (0..width / 6)
            .map(|i| self.get_uint(offset + i * 6, 6).map(sixbit_char))
            .collect::<Result<String, _>>()?;

        let trimmed = text.trim_end_matches(['@', ' ']).len();
        text.truncate(trimmed);

        Ok(text)
    }

    /// Extract a standard position: 25-bit longitude then 24-bit latitude,
    /// in ten-thousandths of a minute.
    pub fn get_position(&self, offset: usize) -> Result<Position, RangeError> {
        Ok(Position {
            longitude: f64::from(self.get_int(offset, 25)?) / 60000.0,
            latitude: f64::from(self.get_int(offset + 25, 24)?) / 60000.0,
        })
    }

    /// Extract an extended position: 28-bit longitude then 27-bit latitude,
    /// in hundred-thousandths of a minute.
    pub fn get_position_28(&self, offset: usize) -> Result<Position, RangeError> {
        Ok(Position {
            longitude: f64::from(self.get_int(offset, 28)?) / 600000.0,
            latitude: f64::from(self.get_int(offset + 28, 27)?) / 600000.0,
        })
    }

    /// Copy an arbitrary bit range into bytes, left-aligned, zero filling the
    /// final byte.
    pub fn get_raw(&self, offset: usize, width: usize) -> Result<Vec<u8>, RangeError> {
        self.check(offset, width)?;

        let mut out = Vec::with_capacity(width.div_ceil(8));
        let mut i = 0;
        while i < width {
            let take = (width - i).min(8);
            let byte = self.get_uint(offset + i, take)? << (8 - take);
            out.push(byte as u8);
            i += take;
        }

        Ok(out)
    }

    /// Offsets of consecutive records of `stride` bits beginning at `start`,
    /// yielding only records that fit entirely within the payload.
    pub fn strides(&self, start: usize, stride: usize) -> Strides {
        Strides {
            next: start,
            stride,
            len: self.len_bits(),
        }
    }
}

/// Iterator over the offsets of fixed-size repeated records.
#[derive(Debug, Clone)]
pub struct Strides {
    next: usize,
    stride: usize,
    len: usize,
}

impl Iterator for Strides {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.stride == 0 || self.next + self.stride > self.len {
            return None;
        }
        let offset = self.next;
        self.next += self.stride;
        Some(offset)
    }
}

/// Map a six-bit value onto the AIS character set.
fn sixbit_char(value: u32) -> char {
    let code = if value < 32 { value + 64 } else { value };
    char::from(code as u8)
}
