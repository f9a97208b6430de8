//! The top-level payload decoder.
//!
//! [`decode_binary_payload`] accepts application data as bytes, hex text or
//! armored text, and never fails: every outcome, including malformed input,
//! is reported through a [`DecodeResult`].

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use serde::{Serialize, Serializer, ser::SerializeStruct};
use thiserror::Error;

use crate::{
    armor::{DearmorError, dearmor},
    bits::RangeError,
    dac::{self, DecodedMessage},
};

/// An error decoding an application-specific message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// No layouts are registered for the designated area code.
    #[error("Unknown DAC")]
    UnknownDac(u16),
    /// The designated area has no layout for the functional ID.
    #[error("Unknown FID")]
    UnknownFid { dac: u16, fid: u8 },
    /// No application data was supplied.
    #[error("Empty payload")]
    EmptyPayload,
    /// A field of the layout lies outside the payload.
    #[error(transparent)]
    BitRange(#[from] RangeError),
    /// The payload was text, but neither hex nor valid armor.
    #[error(transparent)]
    Dearmor(#[from] DearmorError),
}

impl DecodeError {
    /// A stable, snake case name for the kind of error.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::UnknownDac(_) => "unknown_dac",
            DecodeError::UnknownFid { .. } => "unknown_fid",
            DecodeError::EmptyPayload => "empty_payload",
            DecodeError::BitRange(_) => "bit_range",
            DecodeError::Dearmor(_) => "dearmor",
        }
    }
}

/// Application data, in any of the forms a host may hold it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload<'a> {
    /// Binary data, left-aligned.
    Bytes(&'a [u8]),
    /// Hex text, or failing that, six-bit armored text.
    Text(&'a str),
}

impl<'a> From<&'a [u8]> for Payload<'a> {
    fn from(data: &'a [u8]) -> Self {
        Payload::Bytes(data)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Payload<'a> {
    fn from(data: &'a [u8; N]) -> Self {
        Payload::Bytes(data)
    }
}

impl<'a> From<&'a Vec<u8>> for Payload<'a> {
    fn from(data: &'a Vec<u8>) -> Self {
        Payload::Bytes(data)
    }
}

impl<'a> From<&'a str> for Payload<'a> {
    fn from(text: &'a str) -> Self {
        Payload::Text(text)
    }
}

impl<'a> From<&'a String> for Payload<'a> {
    fn from(text: &'a String) -> Self {
        Payload::Text(text)
    }
}

/// The outcome of decoding one message, tagged with its DAC and FID.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodeResult {
    pub dac: u16,
    pub fid: u8,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Decoded(DecodedMessage),
    Failed(DecodeFailure),
}

/// A failed decode, with the payload preserved for later inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeFailure {
    pub error: DecodeError,
    /// Hex of the whole payload. Absent when the payload was empty.
    pub raw: Option<String>,
}

impl Serialize for DecodeFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.raw.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("DecodeFailure", len)?;

        state.serialize_field("kind", self.error.kind())?;
        state.serialize_field("error", &self.error.to_string())?;

        match &self.raw {
            Some(raw) => state.serialize_field("raw", raw)?,
            None => state.skip_field("raw")?,
        }

        state.end()
    }
}

impl DecodeResult {
    /// The decoded message, if decoding succeeded.
    pub fn message(&self) -> Option<&DecodedMessage> {
        match &self.outcome {
            Outcome::Decoded(message) => Some(message),
            Outcome::Failed(_) => None,
        }
    }

    /// The error, if decoding failed.
    pub fn error(&self) -> Option<&DecodeError> {
        match &self.outcome {
            Outcome::Decoded(_) => None,
            Outcome::Failed(failure) => Some(&failure.error),
        }
    }

    /// The hex of the payload, if decoding failed on a non-empty payload.
    pub fn raw(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Decoded(_) => None,
            Outcome::Failed(failure) => failure.raw.as_deref(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, Outcome::Decoded(_))
    }

    pub fn into_result(self) -> Result<DecodedMessage, DecodeFailure> {
        match self.outcome {
            Outcome::Decoded(message) => Ok(message),
            Outcome::Failed(failure) => Err(failure),
        }
    }

    /// Render as a flat JSON object.
    ///
    /// _Requires Cargo feature `json`._
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Value {
        // Every field is a number, string, sequence or map.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Decode the application data of a binary message.
///
/// Text is read as hex when it parses as hex, and as six-bit armor with
/// `pad` fill bits otherwise. `pad` is ignored for binary data.
pub fn decode_binary_payload<'a>(
    dac: u16,
    fid: u8,
    data: impl Into<Payload<'a>>,
    pad: u8,
) -> DecodeResult {
    let outcome = match decode_payload(dac, fid, data.into(), pad) {
        Ok(message) => Outcome::Decoded(message),
        Err(failure) => {
            tracing::debug!(dac, fid, error = %failure.error, "binary payload not decoded");
            Outcome::Failed(failure)
        }
    };

    DecodeResult { dac, fid, outcome }
}

fn decode_payload(
    dac: u16,
    fid: u8,
    payload: Payload<'_>,
    pad: u8,
) -> Result<DecodedMessage, DecodeFailure> {
    let owned;
    let data = match payload {
        Payload::Bytes(data) => data,
        Payload::Text(text) => {
            owned = match hex::decode(text) {
                Ok(data) => data,
                Err(_) => dearmor(text, pad).map_err(|error| DecodeFailure {
                    error: error.into(),
                    raw: None,
                })?,
            };
            &owned[..]
        }
    };

    if data.is_empty() {
        Err(DecodeFailure {
            error: DecodeError::EmptyPayload,
            raw: None,
        })?;
    }

    dac::decode(dac, fid, data).map_err(|error| DecodeFailure {
        error,
        raw: Some(hex::encode(data)),
    })
}
