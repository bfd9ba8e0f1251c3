#![no_main]

use archive::{decode_archive, encode_archive, read_layout, CompressionMode, DecodeOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = read_layout(data);
    let _ = decode_archive(data, &DecodeOptions::literal());

    // Anything that decodes must survive a re-encode.
    if let Ok(archive) = decode_archive(data, &DecodeOptions::size_aware()) {
        let bytes = encode_archive(&archive, CompressionMode::None).unwrap();
        let again = decode_archive(&bytes, &DecodeOptions::size_aware()).unwrap();
        assert_eq!(again, archive);
    }
});
