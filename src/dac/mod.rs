//! Message layouts by designated area code.
//!
//! Each designated area (or family of areas sharing layouts) is a closed
//! enumeration with one variant per registered functional ID. Decoding
//! selects the enumeration by DAC, then the variant by FID.

pub mod area;
pub mod inland;
pub mod international;
pub mod regional;

use serde::Serialize;

pub use inland::Inland;
pub use international::International;
pub use regional::Regional;

use crate::{BitReader, DecodeError, FromFid};

/// A family of designated areas sharing one set of layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// DAC 1, IMO application-specific messages.
    International,
    /// DAC 200, European inland waterways.
    Inland,
    /// DAC 366 and 367 (US), and 316 (Canada), which follows the US
    /// layouts.
    Regional,
}

impl Region {
    /// The region publishing layouts under `dac`, if any.
    pub fn from_dac(dac: u16) -> Option<Self> {
        match dac {
            1 => Some(Region::International),
            200 => Some(Region::Inland),
            316 | 366 | 367 => Some(Region::Regional),
            _ => None,
        }
    }

    /// Functional IDs with a registered layout in this region.
    pub fn fids(self) -> &'static [u8] {
        match self {
            Region::International => International::FIDS,
            Region::Inland => Inland::FIDS,
            Region::Regional => Regional::FIDS,
        }
    }
}

/// A successfully decoded application-specific message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DecodedMessage {
    International(International),
    Inland(Inland),
    Regional(Regional),
}

impl DecodedMessage {
    pub fn region(&self) -> Region {
        match self {
            DecodedMessage::International(_) => Region::International,
            DecodedMessage::Inland(_) => Region::Inland,
            DecodedMessage::Regional(_) => Region::Regional,
        }
    }
}

/// Decode the application data of a binary message by DAC and FID.
///
/// `data` holds the payload following the DAC and FID, left-aligned.
pub fn decode(dac: u16, fid: u8, data: &[u8]) -> Result<DecodedMessage, DecodeError> {
    let region = Region::from_dac(dac).ok_or(DecodeError::UnknownDac(dac))?;
    let bits = BitReader::new(data);

    let message = match region {
        Region::International => DecodedMessage::International(select(dac, fid, &bits)?),
        Region::Inland => DecodedMessage::Inland(select(dac, fid, &bits)?),
        Region::Regional => DecodedMessage::Regional(select(dac, fid, &bits)?),
    };

    Ok(message)
}

fn select<T: FromFid>(dac: u16, fid: u8, bits: &BitReader<'_>) -> Result<T, DecodeError> {
    let message = T::from_fid(fid, bits).ok_or(DecodeError::UnknownFid { dac, fid })??;
    Ok(message)
}
