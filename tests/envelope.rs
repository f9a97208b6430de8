#![cfg(all(feature = "reassembly", feature = "json"))]

use ais_binary::{
    BitReader,
    envelope::{BinaryEnvelope, EnvelopeError},
    reassembly::{FragmentReassembler, ReassemblyConfig},
};
use serde_json::json;

const BROADCAST: &str = "!AIVDM,1,1,,A,839Lg1h0D0Bh,3*0B";
const ADDRESSED: [&str; 2] = [
    "!AIVDM,2,1,7,B,63aDo84jCVd4,0*7D",
    "!AIVDM,2,2,7,B,<SL50j0H,0*26",
];

#[test]
fn broadcast_envelope() {
    let envelope = BinaryEnvelope::from_sentences(&[BROADCAST]).unwrap();

    assert_eq!(
        envelope,
        BinaryEnvelope {
            msg_type: 8,
            mmsi: 211234567,
            destination: None,
            dac: 1,
            fid: 16,
            data: vec![0x04, 0xB0],
        }
    );
    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({
            "msg_type": 8,
            "mmsi": 211234567,
            "dac": 1,
            "fid": 16,
            "data": "04b0",
        })
    );
    assert_eq!(envelope.decode().to_json()["persons"], 150);
}

#[test]
fn addressed_envelope() {
    let envelope = BinaryEnvelope::from_sentences(&ADDRESSED).unwrap();

    assert_eq!(envelope.msg_type, 6);
    assert_eq!(envelope.mmsi, 244660000);
    assert_eq!(envelope.destination, Some(211000001));
    assert_eq!((envelope.dac, envelope.fid), (200, 55));
    assert_eq!(envelope.data, vec![0x05, 0x03, 0x20, 0x18]);

    let json = envelope.decode().to_json();
    assert_eq!(json["description"], "Number of Persons on Board (Inland)");
    assert_eq!(json["crew"], 5);
    assert_eq!(json["passengers"], 100);
    assert_eq!(json["personnel"], 3);
}

#[test]
fn reassembled_envelope() {
    let mut reassembler = FragmentReassembler::new(ReassemblyConfig::default());

    assert_eq!(reassembler.add(ADDRESSED[1], 2, ()), Ok(None));
    let assembled = reassembler.add(ADDRESSED[0], 1, ()).unwrap().unwrap();

    let sentences: Vec<&str> = assembled.sentences().collect();
    let envelope = BinaryEnvelope::from_sentences(&sentences).unwrap();

    assert_eq!(envelope, BinaryEnvelope::from_sentences(&ADDRESSED).unwrap());
}

#[test]
fn position_report_is_not_binary() {
    let error = BinaryEnvelope::from_sentences(&["!AIVDM,1,1,,A,11mg=5@000000000000000000000,0*54"]);
    assert_eq!(error, Err(EnvelopeError::NotBinary(1)));
}

#[test]
fn malformed_sentences() {
    assert_eq!(
        BinaryEnvelope::from_sentences::<&str>(&[]),
        Err(EnvelopeError::Empty)
    );
    assert_eq!(
        BinaryEnvelope::from_sentences(&["!AIVDM,1,1"]),
        Err(EnvelopeError::TooFewFields { index: 0 })
    );
    assert_eq!(
        BinaryEnvelope::from_sentences(&["!AIVDM,1,1,,A,839Lg1h0D0Bh,x*0B"]),
        Err(EnvelopeError::InvalidPad("x".into()))
    );
    assert!(matches!(
        BinaryEnvelope::from_sentences(&["!AIVDM,1,1,,A,839L!,0*00"]),
        Err(EnvelopeError::Dearmor(_))
    ));
    // Ends inside the DAC.
    assert!(matches!(
        BinaryEnvelope::from_sentences(&["!AIVDM,1,1,,A,839Lg1h,0*00"]),
        Err(EnvelopeError::Range(_))
    ));
}

#[test]
fn envelope_from_bits_without_data() {
    // Type 8 header with DAC 1, FID 16 and no application data.
    let data = [0x20, 0x00, 0x00, 0x00, 0x00, 0x00, 0x50, 0x00];
    let envelope = BinaryEnvelope::from_bits(&BitReader::new(&data), 56).unwrap();

    assert_eq!((envelope.dac, envelope.fid), (1, 16));
    assert!(envelope.data.is_empty());
    assert_eq!(envelope.decode().to_json()["kind"], "empty_payload");
}
