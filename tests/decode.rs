#![cfg(feature = "json")]

use ais_binary::{
    DecodeError, DecodedMessage, Region, decode_binary_payload,
    dac::{International, international::PersonsOnBoard},
};
use proptest::prelude::*;
use serde_json::json;

#[test]
fn decode_persons_on_board() {
    let result = decode_binary_payload(1, 16, &[0x04, 0xB0], 0);

    assert!(result.is_ok());
    assert_eq!(result.message().map(DecodedMessage::region), Some(Region::International));
    assert_eq!(
        result.into_result(),
        Ok(DecodedMessage::International(International::PersonsOnBoard(
            PersonsOnBoard { persons: 150 }
        )))
    );
}

#[test]
fn decode_air_draught() {
    let air_draught = |data: &[u8]| {
        let json = decode_binary_payload(1, 15, data, 0).to_json();
        json["air_draught_m"].as_f64().unwrap()
    };

    assert_eq!(air_draught(&[0x2B, 0xC0]), 35.0);
    assert_eq!(air_draught(&[0x57, 0xC0]), 70.2);
}

#[test]
fn decode_hex_and_armored_text() {
    let expected = decode_binary_payload(1, 16, &[0x04, 0xB0], 0);

    assert_eq!(decode_binary_payload(1, 16, "04b0", 0), expected);
    assert_eq!(decode_binary_payload(1, 16, "04B0", 0), expected);
    assert_eq!(decode_binary_payload(1, 16, "1;0", 2), expected);
    assert_eq!(decode_binary_payload(1, 16, &String::from("1;0"), 2), expected);
}

#[test]
fn decode_unknown_dac() {
    let result = decode_binary_payload(999, 1, &[0xAB, 0xCD], 0);

    assert!(!result.is_ok());
    assert_eq!(result.error(), Some(&DecodeError::UnknownDac(999)));
    assert_eq!(result.raw(), Some("abcd"));
    assert_eq!(
        result.to_json(),
        json!({
            "dac": 999,
            "fid": 1,
            "kind": "unknown_dac",
            "error": "Unknown DAC",
            "raw": "abcd",
        })
    );
}

#[test]
fn decode_unknown_fid() {
    let result = decode_binary_payload(200, 99, &[0x01], 0);

    assert_eq!(result.error(), Some(&DecodeError::UnknownFid { dac: 200, fid: 99 }));
    assert_eq!(result.raw(), Some("01"));
    assert_eq!(result.to_json()["error"], "Unknown FID");
}

#[test]
fn decode_empty_payload() {
    for result in [
        decode_binary_payload(1, 16, b"", 0),
        decode_binary_payload(1, 16, "", 0),
    ] {
        assert_eq!(result.error(), Some(&DecodeError::EmptyPayload));
        assert_eq!(result.raw(), None);
        assert_eq!(
            result.to_json(),
            json!({
                "dac": 1,
                "fid": 16,
                "kind": "empty_payload",
                "error": "Empty payload",
            })
        );
    }
}

#[test]
fn decode_short_payload() {
    // Thirteen bits are needed.
    let result = decode_binary_payload(1, 16, &[0x04], 0);

    assert!(matches!(result.error(), Some(DecodeError::BitRange(_))));
    assert_eq!(result.raw(), Some("04"));
    assert_eq!(result.to_json()["kind"], "bit_range");
}

#[test]
fn decode_invalid_text() {
    let result = decode_binary_payload(1, 16, "zz!", 0);

    assert!(matches!(result.error(), Some(DecodeError::Dearmor(_))));
    assert_eq!(result.raw(), None);
    assert_eq!(result.to_json()["kind"], "dearmor");
}

#[test]
fn decode_success_json() {
    let result = decode_binary_payload(1, 16, &[0x04, 0xB0], 0);

    assert_eq!(
        result.to_json(),
        json!({
            "dac": 1,
            "fid": 16,
            "description": "Number of Persons on Board",
            "persons": 150,
        })
    );
}

#[test]
fn region_lookup() {
    assert_eq!(Region::from_dac(1), Some(Region::International));
    assert_eq!(Region::from_dac(200), Some(Region::Inland));
    assert_eq!(Region::from_dac(316), Some(Region::Regional));
    assert_eq!(Region::from_dac(366), Some(Region::Regional));
    assert_eq!(Region::from_dac(367), Some(Region::Regional));
    assert_eq!(Region::from_dac(2), None);

    assert_eq!(
        Region::International.fids(),
        &[11, 13, 15, 16, 17, 19, 21, 22, 24, 27, 29, 31][..]
    );
    assert_eq!(Region::Inland.fids(), &[10, 21, 22, 23, 24, 40, 55][..]);
    assert_eq!(Region::Regional.fids(), &[22, 33][..]);
}

#[test]
fn prop_decode_never_panics() {
    let layouts: Vec<(u16, u8)> = [1, 200, 316, 366, 367]
        .into_iter()
        .flat_map(|dac| {
            let region = Region::from_dac(dac).unwrap();
            region.fids().iter().map(move |&fid| (dac, fid))
        })
        .collect();

    proptest!(|(index in 0..layouts.len(), data in proptest::collection::vec(any::<u8>(), 0..64))| {
        let (dac, fid) = layouts[index];
        let result = decode_binary_payload(dac, fid, &data, 0);

        prop_assert_eq!(result.dac, dac);
        prop_assert_eq!(result.fid, fid);
        prop_assert!(result.is_ok() || result.error().is_some());
        prop_assert!(result.to_json().is_object());
    });
}
