#![allow(dead_code)]

use ais_binary::{BitReader, FromBits, FromFid, Position, RangeError};

#[derive(Debug, PartialEq, FromBits)]
struct GaugeReading {
    #[bits(0, 12)]
    country: String,
    #[bits(12, 11)]
    gauge_id: u16,
    #[bits(23, 14)]
    level_cm: i32,
    #[bits(37, 1)]
    rising: bool,
    #[bits(38, 10, |v: u32| f64::from(v) / 10.0)]
    flow_m3s: f64,
    station: Option<String>,
}

// "AT" in six-bit text, gauge 1234, level -57, rising, flow 51.2.
const GAUGE: [u8; 6] = [0x05, 0x49, 0xA5, 0xFE, 0x3E, 0x00];

#[test]
fn derive_primitives_and_handlers() {
    let bits = BitReader::new(&GAUGE);
    let reading = GaugeReading::from_bits(&bits, 0).unwrap();

    assert_eq!(
        reading,
        GaugeReading {
            country: "AT".into(),
            gauge_id: 1234,
            level_cm: -57,
            rising: true,
            flow_m3s: 51.2,
            station: None,
        }
    );
}

#[test]
fn derive_reads_past_end() {
    let bits = BitReader::new(&GAUGE[..4]);
    let error = GaugeReading::from_bits(&bits, 0).unwrap_err();

    assert!(matches!(error, RangeError::OutOfBounds { .. }));
}

#[derive(Debug, Default, Clone, Copy, PartialEq, FromBits)]
#[bits(width = 55)]
struct Mark {
    #[position(0, extended)]
    position: Position,
}

#[derive(Debug, PartialEq, FromBits)]
struct Beacon {
    #[bits(0, 4)]
    kind: u8,
    #[position(4)]
    position: Position,
    #[bits(53)]
    mark: Mark,
}

#[test]
fn derive_positions_and_nested_records() {
    assert_eq!(Mark::WIDTH, 55);
    assert_eq!(Beacon::WIDTH, 0);

    // Kind 9, standard position (1.5, -2.0), extended mark (0.0, 0.0).
    let mut data = [0u8; 14];
    let lon = (1.5f64 * 60000.0) as u32 & 0x1FF_FFFF;
    let lat = (-2.0f64 * 60000.0) as i32 as u32 & 0xFF_FFFF;
    let value: u128 = (9u128 << 108) | (u128::from(lon) << 83) | (u128::from(lat) << 59);
    data.copy_from_slice(&value.to_be_bytes()[2..]);

    let bits = BitReader::new(&data);
    let beacon = Beacon::from_bits(&bits, 0).unwrap();

    assert_eq!(beacon.kind, 9);
    assert_eq!(beacon.position, Position { longitude: 1.5, latitude: -2.0 });
    assert_eq!(beacon.mark, Mark::default());
}

#[derive(Debug, PartialEq, FromFid)]
enum Harbour {
    #[fid(1)]
    Gauge(GaugeReading),
    #[fid(7)]
    Mark(Mark),
}

#[test]
fn derive_fid_dispatch() {
    assert_eq!(Harbour::FIDS, &[1u8, 7][..]);

    let bits = BitReader::new(&GAUGE);

    let Some(Ok(Harbour::Gauge(reading))) = Harbour::from_fid(1, &bits) else {
        panic!("expected a gauge reading");
    };
    assert_eq!(reading.gauge_id, 1234);

    assert!(matches!(Harbour::from_fid(7, &bits), Some(Err(_))));
    assert!(Harbour::from_fid(2, &bits).is_none());
}
