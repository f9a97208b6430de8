#![no_std]

//! A decoder for the application data of AIS binary messages.
//!
//! Binary messages (types 6 and 8) carry a designated area code (DAC) and a
//! functional ID (FID) selecting the layout of their application data. This
//! crate decodes the layouts registered under the international (DAC 1),
//! European inland (DAC 200) and US regional (DAC 366, 367 and 316) areas
//! into typed structures.
//!
//! Most users should begin with [`decode_binary_payload`], which accepts
//! application data as bytes, hex or armored text and never fails. Messages
//! split across several sentences can be collected with the
//! [`FragmentReassembler`](reassembly::FragmentReassembler), and the DAC, FID
//! and data extracted with [`BinaryEnvelope`](envelope::BinaryEnvelope).
//!
//! Layouts are declared with the [`FromBits`](macro@FromBits) and
//! [`FromFid`](macro@FromFid) derive macros over a [`BitReader`], which may
//! also be used directly for layouts this crate does not know.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `json`: render results as [`serde_json`] values (default).
//! - `reassembly`: enable sentence reassembly and envelope reading
//!   (default, requires `std`).
//! - `std`: use the standard library (default). Without it, the decoder
//!   needs only `alloc`.
//!
//! ## Layout Departures
//!
//! Some stores hold output from earlier decoders that read these layouts
//! differently:
//!
//! - DAC 200 FID 10: ship type is read at bit 71, after length and beam,
//!   rather than overlapping the length at bit 48. Hazard, draught, loaded
//!   and the quality flags follow at 85, 88, 99 and 101 to 103, where
//!   earlier decoders read 88, 91, 102 and 104 to 106.
//! - DAC 1 FID 21 (AIS form): `air_pressure_hpa` is the raw value plus 800,
//!   where earlier decoders report the raw value.
//! - DAC 1 FID 31: `air_pressure_hpa` is the raw value plus 800, without the
//!   further division by 100 some earlier decoders apply.

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

extern crate self as ais_binary;

pub mod armor;
pub mod bits;
pub mod dac;
pub mod decode;
pub mod layout;

#[cfg(feature = "reassembly")]
pub mod envelope;
#[cfg(feature = "reassembly")]
pub mod reassembly;

pub use armor::{DearmorError, armor, dearmor};
pub use bits::{BitReader, Position, RangeError};
pub use dac::{DecodedMessage, Region};
pub use decode::{DecodeError, DecodeFailure, DecodeResult, Outcome, Payload, decode_binary_payload};
pub use layout::{FromBits, FromFid};
