#![no_main]

use datastream::prelude::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = StreamReader::new(data);
    while reader.remaining().unwrap_or(0) > 0 {
        let before = reader.tell().unwrap_or(0);
        let consumed = reader.read_uleb128_safe().is_ok()
            | reader.read_sleb128_safe().is_ok()
            | reader.read_uleb128p1_safe().is_ok();
        if !consumed || reader.tell().unwrap_or(before) == before {
            break;
        }
    }
});
