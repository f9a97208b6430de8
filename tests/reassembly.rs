#![cfg(feature = "reassembly")]

use std::time::Duration;

use ais_binary::reassembly::{
    FragmentReassembler, MalformedSentence, ManualClock, ReassemblyConfig,
};

const PART_1: &str = "!AIVDM,2,1,7,B,63aDo84jCVd4,0*7D";
const PART_2: &str = "!AIVDM,2,2,7,B,<SL50j0H,0*26";
const SINGLE: &str = "!AIVDM,1,1,,A,839Lg1h0D0Bh,3*0B";

fn reassembler() -> (FragmentReassembler<u32, u64, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let reassembler = FragmentReassembler::with_clock(ReassemblyConfig::default(), clock.clone());
    (reassembler, clock)
}

#[test]
fn reassemble_in_order() {
    let (mut reassembler, _) = reassembler();

    assert_eq!(reassembler.add(PART_1, 1, 100), Ok(None));
    assert_eq!(reassembler.len(), 1);
    assert_eq!(reassembler.incomplete().collect::<Vec<_>>(), vec![&1]);

    let assembled = reassembler.add(PART_2, 2, 101).unwrap().unwrap();

    assert_eq!(assembled.sentences().collect::<Vec<_>>(), vec![PART_1, PART_2]);
    assert_eq!(assembled.identifiers().collect::<Vec<_>>(), vec![&1, &2]);
    assert_eq!(assembled.timestamp, 101);
    assert_eq!(assembled.fragments[0].timestamp, 100);
    assert!(reassembler.is_empty());
}

#[test]
fn reassemble_out_of_order() {
    let (mut reassembler, _) = reassembler();

    assert_eq!(reassembler.add(PART_2, 2, 100), Ok(None));
    let assembled = reassembler.add(PART_1, 1, 101).unwrap().unwrap();

    assert_eq!(assembled.sentences().collect::<Vec<_>>(), vec![PART_1, PART_2]);
    assert_eq!(assembled.identifiers().collect::<Vec<_>>(), vec![&1, &2]);
    assert!(reassembler.is_empty());
}

#[test]
fn single_part_is_never_buffered() {
    let (mut reassembler, _) = reassembler();

    let assembled = reassembler.add(SINGLE, 9, 100).unwrap().unwrap();

    assert_eq!(assembled.sentences().collect::<Vec<_>>(), vec![SINGLE]);
    assert_eq!(assembled.timestamp, 100);
    assert!(reassembler.is_empty());
}

#[test]
fn repeated_part_replaces_earlier() {
    let (mut reassembler, _) = reassembler();

    assert_eq!(reassembler.add(PART_1, 1, 100), Ok(None));
    assert_eq!(reassembler.add(PART_1, 2, 101), Ok(None));
    assert_eq!(reassembler.len(), 1);

    let assembled = reassembler.add(PART_2, 3, 102).unwrap().unwrap();
    assert_eq!(assembled.identifiers().collect::<Vec<_>>(), vec![&2, &3]);
}

#[test]
fn channels_and_sequences_are_kept_apart() {
    let (mut reassembler, _) = reassembler();

    let other_channel = PART_2.replace(",7,B,", ",7,A,");
    let other_sequence = PART_2.replace(",7,B,", ",8,B,");

    assert_eq!(reassembler.add(PART_1, 1, 100), Ok(None));
    assert_eq!(reassembler.add(&other_channel, 2, 101), Ok(None));
    assert_eq!(reassembler.add(&other_sequence, 3, 102), Ok(None));
    assert_eq!(reassembler.len(), 3);

    let mut incomplete: Vec<_> = reassembler.incomplete().copied().collect();
    incomplete.sort();
    assert_eq!(incomplete, vec![1, 2, 3]);
}

#[test]
fn sweep_evicts_after_timeout() {
    let (mut reassembler, clock) = reassembler();

    assert_eq!(reassembler.add(PART_1, 1, 100), Ok(None));

    clock.advance(Duration::from_secs(60));
    assert!(reassembler.sweep().is_empty());
    assert_eq!(reassembler.incomplete().collect::<Vec<_>>(), vec![&1]);

    clock.advance(Duration::from_millis(1));
    assert_eq!(reassembler.sweep(), vec![1]);
    assert!(reassembler.is_empty());

    // The second part now starts a new message.
    assert_eq!(reassembler.add(PART_2, 2, 200), Ok(None));
    assert_eq!(reassembler.incomplete().collect::<Vec<_>>(), vec![&2]);
}

#[test]
fn add_evicts_expired_messages() {
    let (mut reassembler, clock) = reassembler();
    let other_sequence = PART_1.replace(",7,B,", ",8,B,");

    assert_eq!(reassembler.add(PART_1, 1, 100), Ok(None));
    clock.advance(Duration::from_secs(61));
    assert_eq!(reassembler.add(&other_sequence, 2, 200), Ok(None));

    assert_eq!(reassembler.incomplete().collect::<Vec<_>>(), vec![&2]);
}

#[test]
fn add_completes_before_timeout() {
    let (mut reassembler, clock) = reassembler();

    assert_eq!(reassembler.add(PART_1, 1, 100), Ok(None));
    clock.advance(Duration::from_secs(59));

    let assembled = reassembler.add(PART_2, 2, 200).unwrap();
    assert!(assembled.is_some());
}

#[test]
fn custom_timeout() {
    let clock = ManualClock::new();
    let config = ReassemblyConfig {
        timeout: Duration::from_secs(5),
    };
    let mut reassembler = FragmentReassembler::with_clock(config, clock.clone());

    assert_eq!(reassembler.add(PART_1, 1u32, ()), Ok(None));
    clock.advance(Duration::from_secs(6));

    assert_eq!(reassembler.sweep(), vec![1]);
    assert_eq!(reassembler.config().timeout, Duration::from_secs(5));
}

#[test]
fn malformed_sentences() {
    let (mut reassembler, _) = reassembler();

    assert_eq!(
        reassembler.add("!AIVDM,2,1", 1, 100),
        Err(MalformedSentence::TooFewFields(3))
    );
    assert!(matches!(
        reassembler.add("!AIVDM,x,1,7,B,abc,0*00", 1, 100),
        Err(MalformedSentence::InvalidCounter { field: "part count", .. })
    ));
    assert!(matches!(
        reassembler.add("!AIVDM,2,,7,B,abc,0*00", 1, 100),
        Err(MalformedSentence::InvalidCounter { field: "part number", .. })
    ));
    assert_eq!(
        reassembler.add("!AIVDM,2,3,7,B,abc,0*00", 1, 100),
        Err(MalformedSentence::PartOutOfRange { part: 3, total: 2 })
    );
    assert_eq!(
        reassembler.add("!AIVDM,2,0,7,B,abc,0*00", 1, 100),
        Err(MalformedSentence::PartOutOfRange { part: 0, total: 2 })
    );
    assert!(reassembler.is_empty());
}

#[test]
fn config_from_json() {
    let config: ReassemblyConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, ReassemblyConfig::default());
    assert_eq!(config.timeout, Duration::from_secs(60));

    let config: ReassemblyConfig = serde_json::from_str(r#"{"timeout": 2.5}"#).unwrap();
    assert_eq!(config.timeout, Duration::from_millis(2500));

    assert!(serde_json::from_str::<ReassemblyConfig>(r#"{"timeout": -1}"#).is_err());
}
