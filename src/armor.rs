//! Six-bit ASCII armor used to carry binary payloads in NMEA sentences.

use alloc::{string::String, vec, vec::Vec};

use thiserror::Error;

/// An error removing the armor from a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DearmorError {
    /// A character outside the armor alphabet.
    #[error("Invalid armor character {character:?} at position {position}.")]
    InvalidCharacter { character: char, position: usize },
    /// More pad bits than the sentence format or the payload allows.
    #[error("Impossible pad count {pad} for a payload of {bits} bits.")]
    ImpossiblePad { pad: u8, bits: usize },
}

/// Convert an armored payload to bytes, dropping `pad` trailing fill bits.
///
/// Bits are packed most significant first. If the remaining bit count is not
/// a multiple of eight, the final byte is left-aligned with zero fill.
pub fn dearmor(payload: &str, pad: u8) -> Result<Vec<u8>, DearmorError> {
    let bits = payload.len() * 6;

    if pad > 5 || usize::from(pad) > bits {
        Err(DearmorError::ImpossiblePad { pad, bits })?;
    }

    let len = bits - usize::from(pad);
    let mut out = vec![0u8; len.div_ceil(8)];

    for (position, character) in payload.chars().enumerate() {
        let value = unarmor_char(character)
            .ok_or(DearmorError::InvalidCharacter { character, position })?;

        for i in 0..6 {
            let bit = position * 6 + i;
            if bit >= len {
                break;
            }
            if value & (0x20 >> i) != 0 {
                out[bit / 8] |= 0x80 >> (bit % 8);
            }
        }
    }

    Ok(out)
}

/// Convert the first `bits` bits of `data` to an armored payload.
///
/// Returns the payload and the number of fill bits appended to complete the
/// final character.
pub fn armor(data: &[u8], bits: usize) -> (String, u8) {
    let bits = bits.min(data.len() * 8);
    let chars = bits.div_ceil(6);
    let pad = (chars * 6 - bits) as u8;

    let bit = |i: usize| i < bits && data[i / 8] & (0x80 >> (i % 8)) != 0;

    let payload = (0..chars)
        .map(|c| {
            let value = (0..6).fold(0u8, |acc, i| (acc << 1) | u8::from(bit(c * 6 + i)));
            armor_char(value)
        })
        .collect();

    (payload, pad)
}

/// Map an armor character to its six-bit value.
fn unarmor_char(c: char) -> Option<u8> {
    match c {
        '0'..='W' => Some(c as u8 - 48),
        '`'..='w' => Some(c as u8 - 56),
        _ => None,
    }
}

/// Map a six-bit value to its armor character.
fn armor_char(value: u8) -> char {
    let value = value & 0x3F;
    char::from(if value < 40 { value + 48 } else { value + 56 })
}
