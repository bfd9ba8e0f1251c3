#![no_main]

use definitions::{decode_record, encode_record, Domain};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, record)) = data.split_first() else {
        return;
    };
    let domain = Domain::ALL[usize::from(selector) % Domain::ALL.len()];

    if let Ok(properties) = decode_record(domain.schema(), 0, record) {
        let bytes = encode_record(domain.name(), 0, &properties).unwrap();
        assert_eq!(decode_record(domain.schema(), 0, &bytes).unwrap(), properties);
    }
});
