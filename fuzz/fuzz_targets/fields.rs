#![no_main]

use datastream::prelude::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };

    let mut stream = DuplexStream::new(rest);
    for kind in [
        FieldKind::Int8,
        FieldKind::UInt16,
        FieldKind::Int32,
        FieldKind::UInt64,
        FieldKind::Float32,
        FieldKind::Float64,
        FieldKind::Bool,
    ] {
        if selector & 1 == 1 {
            stream.set_byte_order(ByteOrder::Big);
        }
        if let Ok(value) = stream.read_field(kind) {
            let _ = stream.seek(std::io::SeekFrom::Current(-(kind.size() as i64)));
            let _ = stream.write_field(kind, value);
        }
    }
    let _ = stream.search(&rest[..rest.len().min(4)]);
    let _ = stream.rsearch(&rest[..rest.len().min(2)]);
});
