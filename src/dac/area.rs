//! Area notices shared between the international and regional layouts.
//!
//! A notice is a fixed header followed by a sequence of sub-areas, each a
//! fixed-size block tagged by a three-bit shape code. Sub-areas are read
//! until the payload no longer holds a whole block; a truncated trailing
//! block is dropped.

use alloc::{string::String, vec::Vec};

use serde::Serialize;

use crate::{BitReader, FromBits, Position, RangeError};

/// Header common to area notices: the notice's subject and validity window.
#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
#[bits(width = 55)]
pub struct AreaNoticeHeader {
    #[bits(0, 10)]
    pub link_id: u16,
    #[bits(10, 7)]
    pub notice_type: u8,
    #[bits(17, 4)]
    pub month: u8,
    #[bits(21, 5)]
    pub day: u8,
    #[bits(26, 5)]
    pub hour: u8,
    #[bits(31, 6)]
    pub minute: u8,
    #[bits(37, 18)]
    pub duration_min: u32,
}

/// One shape of an area notice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum SubArea {
    /// A circle, or a point when the radius is zero.
    Circle(Circle),
    Rectangle(Rectangle),
    Sector(Sector),
    /// Points continuing the preceding sub-area.
    Polyline(Polyline),
    /// Points closing the preceding sub-area.
    Polygon(Polyline),
    Text(AreaText),
    /// A shape code with no known layout; the block body is kept raw.
    Other(OtherArea),
}

#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
pub struct Circle {
    #[bits(3, 2)]
    pub scale_factor: u8,
    #[bits(5)]
    #[serde(flatten)]
    pub position: Position,
    #[bits(54, 3)]
    pub precision: u8,
    #[bits(57, 12)]
    pub radius_m: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
pub struct Rectangle {
    #[bits(3, 2)]
    pub scale_factor: u8,
    #[bits(5)]
    #[serde(flatten)]
    pub position: Position,
    #[bits(54, 3)]
    pub precision: u8,
    #[bits(57, 8)]
    pub e_dim_m: u8,
    #[bits(65, 8)]
    pub n_dim_m: u8,
    #[bits(73, 9)]
    pub orientation: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
pub struct Sector {
    #[bits(3, 2)]
    pub scale_factor: u8,
    #[bits(5)]
    #[serde(flatten)]
    pub position: Position,
    #[bits(54, 3)]
    pub precision: u8,
    #[bits(57, 12)]
    pub radius_m: u16,
    #[bits(69, 9)]
    pub left_bound: u16,
    #[bits(78, 9)]
    pub right_bound: u16,
}

/// A bearing and distance from the previous point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, FromBits)]
#[bits(width = 20)]
pub struct PolyPoint {
    #[bits(0, 10)]
    pub angle: u16,
    #[bits(10, 10)]
    pub distance: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub scale_factor: u8,
    /// All four point slots in order. A slot with zero distance is unused.
    pub points: [PolyPoint; 4],
}

impl FromBits for Polyline {
    fn from_bits(bits: &BitReader<'_>, offset: usize) -> Result<Self, RangeError> {
        let mut points = [PolyPoint::default(); 4];

        for (i, point) in points.iter_mut().enumerate() {
            *point = PolyPoint::from_bits(bits, offset + 5 + i * PolyPoint::WIDTH)?;
        }

        Ok(Polyline {
            scale_factor: bits.get_uint(offset + 3, 2)? as u8,
            points,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromBits)]
pub struct AreaText {
    #[bits(3, 84)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OtherArea {
    pub shape_code: u8,
    /// Hex of the block body following the shape code.
    pub raw: String,
}

impl SubArea {
    /// Decode one sub-area occupying the `stride` bits beginning at `offset`.
    pub fn decode(bits: &BitReader<'_>, offset: usize, stride: usize) -> Result<Self, RangeError> {
        let area = match bits.get_uint(offset, 3)? {
            0 => SubArea::Circle(Circle::from_bits(bits, offset)?),
            1 => SubArea::Rectangle(Rectangle::from_bits(bits, offset)?),
            2 => SubArea::Sector(Sector::from_bits(bits, offset)?),
            3 => SubArea::Polyline(Polyline::from_bits(bits, offset)?),
            4 => SubArea::Polygon(Polyline::from_bits(bits, offset)?),
            5 => SubArea::Text(AreaText::from_bits(bits, offset)?),
            shape_code => SubArea::Other(OtherArea {
                shape_code: shape_code as u8,
                raw: hex::encode(bits.get_raw(offset + 3, stride - 3)?),
            }),
        };

        Ok(area)
    }
}

/// Decode every whole sub-area of `stride` bits from `start` onward.
pub(crate) fn sub_areas(
    bits: &BitReader<'_>,
    start: usize,
    stride: usize,
) -> Result<Vec<SubArea>, RangeError> {
    bits.strides(start, stride)
        .map(|offset| SubArea::decode(bits, offset, stride))
        .collect()
}

/// Area notice (IMO 289): a header followed by 87-bit sub-areas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaNotice {
    #[serde(flatten)]
    pub header: AreaNoticeHeader,
    pub sub_areas: Vec<SubArea>,
}

impl FromBits for AreaNotice {
    fn from_bits(bits: &BitReader<'_>, offset: usize) -> Result<Self, RangeError> {
        Ok(AreaNotice {
            header: AreaNoticeHeader::from_bits(bits, offset)?,
            sub_areas: sub_areas(bits, offset + AreaNoticeHeader::WIDTH, 87)?,
        })
    }
}

/// Area notice (US): a version number, the common header, and 90-bit
/// sub-areas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsAreaNotice {
    pub version: u8,
    #[serde(flatten)]
    pub header: AreaNoticeHeader,
    pub sub_areas: Vec<SubArea>,
}

impl FromBits for UsAreaNotice {
    fn from_bits(bits: &BitReader<'_>, offset: usize) -> Result<Self, RangeError> {
        Ok(UsAreaNotice {
            version: bits.get_uint(offset, 6)? as u8,
            header: AreaNoticeHeader::from_bits(bits, offset + 6)?,
            sub_areas: sub_areas(bits, offset + 6 + AreaNoticeHeader::WIDTH, 90)?,
        })
    }
}
