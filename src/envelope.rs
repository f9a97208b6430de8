//! Headers of addressed (type 6) and broadcast (type 8) binary messages.
//!
//! A complete group of sentences, such as one released by the
//! [`FragmentReassembler`](crate::reassembly::FragmentReassembler), is
//! dearmored into the full message bits. The envelope names the sender, the
//! addressee of type 6 messages, and the DAC and FID selecting the layout of
//! the application data that follows.
//!
//! _Requires Cargo feature `reassembly`._

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use serde::Serialize;
use thiserror::Error;

use crate::{
    BitReader, DearmorError, DecodeResult, RangeError, armor::dearmor, decode_binary_payload,
};

/// An error reading a binary message envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// No sentences were supplied.
    #[error("No sentences.")]
    Empty,
    /// A sentence lacks the payload or fill bit fields.
    #[error("Sentence {index} has too few fields.")]
    TooFewFields { index: usize },
    /// The fill bit count of the final sentence is not a digit.
    #[error("Invalid fill bit count ({0:?}).")]
    InvalidPad(String),
    #[error(transparent)]
    Dearmor(#[from] DearmorError),
    /// The message is not a binary message.
    #[error("Message type {0} does not carry binary data.")]
    NotBinary(u8),
    /// The message ends inside its header.
    #[error(transparent)]
    Range(#[from] RangeError),
}

/// The header and application data of a binary message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinaryEnvelope {
    pub msg_type: u8,
    /// Sender.
    pub mmsi: u32,
    /// Addressee, for addressed messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<u32>,
    pub dac: u16,
    pub fid: u8,
    /// Application data, left-aligned.
    #[serde(serialize_with = "hex::serde::serialize")]
    pub data: Vec<u8>,
}

impl BinaryEnvelope {
    /// Read the envelope of a message from its sentences, in part order.
    pub fn from_sentences<S: AsRef<str>>(sentences: &[S]) -> Result<Self, EnvelopeError> {
        let Some(last) = sentences.last() else {
            return Err(EnvelopeError::Empty);
        };

        let mut payload = String::new();
        for (index, sentence) in sentences.iter().enumerate() {
            let field = sentence
                .as_ref()
                .split(',')
                .nth(5)
                .ok_or(EnvelopeError::TooFewFields { index })?;
            payload.push_str(field);
        }

        let pad_field = last
            .as_ref()
            .split(',')
            .nth(6)
            .ok_or(EnvelopeError::TooFewFields {
                index: sentences.len() - 1,
            })?;
        let pad_text = pad_field.split('*').next().unwrap_or_default().trim();
        let pad = match pad_text {
            "" => 0,
            text => text
                .parse::<u8>()
                .map_err(|_| EnvelopeError::InvalidPad(text.to_string()))?,
        };

        let bytes = dearmor(&payload, pad)?;
        let len = payload.len() * 6 - usize::from(pad);

        Self::from_bits(&BitReader::new(&bytes), len)
    }

    /// Read the envelope from dearmored message bits, of which the first
    /// `len` are significant.
    pub fn from_bits(bits: &BitReader<'_>, len: usize) -> Result<Self, EnvelopeError> {
        let msg_type = bits.get_uint(0, 6)? as u8;
        let mmsi = bits.get_uint(8, 30)?;

        let (destination, header) = match msg_type {
            8 => (None, 40),
            6 => (Some(bits.get_uint(40, 30)?), 72),
            _ => Err(EnvelopeError::NotBinary(msg_type))?,
        };

        let dac = bits.get_uint(header, 10)? as u16;
        let fid = bits.get_uint(header + 10, 6)? as u8;

        let start = header + 16;
        let data = bits.get_raw(start, len.saturating_sub(start))?;

        Ok(BinaryEnvelope {
            msg_type,
            mmsi,
            destination,
            dac,
            fid,
            data,
        })
    }

    /// Decode the application data.
    pub fn decode(&self) -> DecodeResult {
        decode_binary_payload(self.dac, self.fid, &self.data, 0)
    }
}
