//! Fuzz target: `LineDecoder::feed` + `decode_frame`
//!
//! Drives arbitrary byte sequences through the line decoder and the JSON
//! frame decoder and asserts that neither panics and that every yielded
//! line is bounded and newline-free.
//!
//! cargo fuzz run fuzz_line_decoder

#![no_main]

use align_chassis::wire::codec::{LineDecoder, MAX_LINE_LEN, decode_frame};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut decoder = LineDecoder::new();

    decoder.feed(data, |line| {
        assert!(!line.is_empty(), "decoder must not yield empty lines");
        assert!(line.len() < MAX_LINE_LEN, "line exceeds MAX_LINE_LEN");
        assert!(!line.contains(&b'\n'));
        let _ = decode_frame(line, "Passed");
    });

    // After a reset the decoder must accept bytes cleanly again.
    decoder.reset();
    assert_eq!(decoder.pending(), 0);
    decoder.feed(data, |_| {});
});
