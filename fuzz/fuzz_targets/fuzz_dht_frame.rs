//! Fuzz target: `dht::decode_frame`
//!
//! Feeds arbitrary 40-bit frames into the DHT22 decoder.  It must never
//! panic, and every accepted frame must decode to a plausible reading
//! that re-encodes to the same bytes.
//!
//! cargo fuzz run fuzz_dht_frame

#![no_main]

use dcmon::sensors::dht::{decode_frame, encode_frame};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|frame: [u8; 5]| {
    if let Ok(reading) = decode_frame(frame) {
        assert!((-40.0..=80.0).contains(&reading.temperature_c));
        assert!((0.0..=100.0).contains(&reading.humidity_pct));
        // -0.0 has two encodings; only the canonical one re-encodes.
        if frame[2..4] != [0x80, 0x00] {
            assert_eq!(encode_frame(reading), frame);
        }
    }
});
