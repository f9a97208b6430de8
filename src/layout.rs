//! Traits describing message layouts.
//!
//! A layout is decoded from a [`BitReader`] at a bit offset, publishing to
//! the [`FromBits`] trait. A designated area's set of layouts is selected by
//! functional ID through the [`FromFid`] trait.
//!
//! In most cases (when fields sit at fixed offsets) these traits can be
//! derived. See the [`FromBits`](macro@FromBits) and
//! [`FromFid`](macro@FromFid) macros for details.

use crate::bits::{BitReader, RangeError};

/// Derive [`FromBits`] for a struct holding the fields of one layout.
///
/// # Example
///
/// To extract a primitive, add the `bits(OFFSET, WIDTH)` attribute to a
/// field, where `OFFSET` is relative to the start of the record. Unsigned
/// and signed integer fields read unsigned and two's complement values,
/// `bool` fields read a single bit, and `String` fields read six-bit text.
///
/// ```
/// #[derive(Debug, FromBits)]
/// struct WaterLevel {
///     #[bits(0, 12)]
///     country: String,
///     #[bits(12, 11)]
///     gauge_id: u16,
///     #[bits(23, 14)]
///     level_cm: i32,
/// }
/// ```
///
/// To scale or convert a value, supply a handler closure. Its parameter must
/// be typed, selecting how the raw bits are read.
///
/// ```
/// #[derive(Debug, FromBits)]
/// struct AirDraught {
///     #[bits(0, 11, |v: u32| f64::from(v) / 10.0)]
///     air_draught_m: f64,
/// }
/// ```
///
/// Positions are read with `position(OFFSET)` for the standard 25/24-bit
/// form, or `position(OFFSET, extended)` for the 28/27-bit form. A field
/// with only an offset, `bits(OFFSET)`, is itself decoded through
/// [`FromBits`], allowing records to nest. Fields without an attribute are
/// filled with their default value.
///
/// For repeated records, declare the record's size with a `bits(width = N)`
/// attribute on the struct.
///
/// ```
/// #[derive(Debug, Default, FromBits)]
/// #[bits(width = 55)]
/// struct Waypoint {
///     #[position(0, extended)]
///     position: Position,
/// }
/// ```
pub use ais_binary_derive::FromBits;

/// Decode a record beginning at a bit offset.
///
/// See the [`FromBits`](macro@FromBits) derive macro for an automatic
/// implementation of this trait.
pub trait FromBits: Sized {
    /// Size of the record in bits, for records repeated at a fixed stride.
    const WIDTH: usize = 0;

    /// Decode the record beginning at `offset`.
    fn from_bits(bits: &BitReader<'_>, offset: usize) -> Result<Self, RangeError>;
}

/// Derive [`FromFid`] for an enumeration of the layouts in one designated
/// area.
///
/// Each variant wraps a single type implementing [`FromBits`], and carries a
/// `fid(N)` attribute naming its functional ID.
///
/// ```
/// #[derive(Debug, FromFid)]
/// enum International {
///     #[fid(15)]
///     AirDraught(AirDraught),
///     #[fid(16)]
///     PersonsOnBoard(PersonsOnBoard),
/// }
/// ```
pub use ais_binary_derive::FromFid;

/// Select and decode a layout by functional ID.
///
/// See the [`FromFid`](macro@FromFid) derive macro for an automatic
/// implementation of this trait.
pub trait FromFid: Sized {
    /// Functional IDs with a registered layout.
    const FIDS: &'static [u8];

    /// Decode the layout registered for `fid` from the start of the payload.
    ///
    /// Returns `None` if no layout is registered for `fid`.
    fn from_fid(fid: u8, bits: &BitReader<'_>) -> Option<Result<Self, RangeError>>;
}

impl FromBits for crate::bits::Position {
    fn from_bits(bits: &BitReader<'_>, offset: usize) -> Result<Self, RangeError> {
        bits.get_position(offset)
    }
}
