use ais_binary::decode_binary_payload;
use csv::ReaderBuilder;
use serde_json::Value;

#[test]
fn decode_fixture_payloads() {
    const PATH: &str = "fixtures/payloads.csv";

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(PATH)
        .unwrap();

    let mut count = 0;

    for record in reader.records() {
        let record = record.unwrap();
        let dac: u16 = record[0].parse().unwrap();
        let fid: u8 = record[1].parse().unwrap();

        let result = decode_binary_payload(dac, fid, &record[2], 0);
        assert!(result.is_ok(), "{dac}/{fid}: {:?}", result.error());

        let validator = Validator::new(format!("{dac}/{fid}"), serde_json::to_value(&result).unwrap());
        validator.validate("/dac", &dac.to_string());
        validator.validate("/fid", &fid.to_string());

        let expected: Vec<&str> = record.iter().skip(3).collect();
        for pair in expected.chunks(2) {
            validator.validate(pair[0], pair[1]);
        }

        count += 1;
    }

    assert!(count > 0);
}

/// Checks fields of a rendered result, addressed by JSON pointer. A pointer
/// ending in `/#` checks the length of an array.
struct Validator {
    context: String,
    json: Value,
}

impl Validator {
    fn new(context: String, json: Value) -> Self {
        Self { context, json }
    }

    fn validate(&self, pointer: &str, expected: &str) {
        let context = &self.context;

        if let Some(array) = pointer.strip_suffix("/#") {
            let len = self.json.pointer(array).and_then(Value::as_array).map(Vec::len);
            assert_eq!(len, Some(expected.parse().unwrap()), "{context}: {pointer}");
            return;
        }

        let Some(actual) = self.json.pointer(pointer) else {
            panic!("{context}: missing {pointer} in {}", self.json);
        };

        match actual {
            Value::Number(number) => {
                let actual = number.as_f64().unwrap();
                let expected: f64 = expected.parse().unwrap();
                assert!(
                    (actual - expected).abs() < 1e-9,
                    "{context}: {pointer} is {actual}, expected {expected}"
                );
            }
            Value::String(actual) => assert_eq!(actual, expected, "{context}: {pointer}"),
            Value::Bool(actual) => assert_eq!(actual.to_string(), expected, "{context}: {pointer}"),
            other => panic!("{context}: {pointer} is {other}, expected {expected}"),
        }
    }
}
