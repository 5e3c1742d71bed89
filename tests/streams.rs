//! End-to-end scenarios for the stream facades.

mod common;

use std::io::{Cursor, SeekFrom};

use common::init_test_logging;
use datastream::prelude::*;

/// Writes a small length-prefixed record layout and returns the produced bytes.
fn build_records(order: ByteOrder, names: &[&str]) -> Result<Vec<u8>> {
    let mut writer = StreamWriter::with_config(Vec::new(), StreamConfig::new(order));
    writer.write(b"REC\0")?;
    writer.write_u16(names.len() as u16)?;
    for (index, name) in names.iter().enumerate() {
        writer.write_uleb128(name.len() as u64)?;
        writer.write(name.as_bytes())?;
        writer.write_sleb128(-(index as i64))?;
        writer.write_f32(index as f32 * 0.5)?;
    }
    writer.into_bytes()
}

#[test]
fn record_layout_roundtrip() -> Result<()> {
    init_test_logging();
    let names = ["alpha", "", "gamma-delta"];
    let data = build_records(ByteOrder::Big, &names)?;

    let mut reader = StreamReader::with_config(data, StreamConfig::new(ByteOrder::Big));
    assert_eq!(reader.read_until(b"\0")?, b"REC\0");
    assert_eq!(reader.read_u16()?, 3);

    for (index, name) in names.iter().enumerate() {
        let len = reader.read_uleb128_safe()? as usize;
        assert_eq!(reader.read(len)?, name.as_bytes());
        assert_eq!(reader.read_sleb128_safe()?, -(index as i64));
        assert_eq!(reader.read_f32()?, index as f32 * 0.5);
    }
    assert_eq!(reader.remaining()?, 0);
    Ok(())
}

#[test]
fn byte_order_switch_mid_stream() -> Result<()> {
    let mut stream = DuplexStream::with_config(Vec::new(), StreamConfig::new(ByteOrder::Little));
    stream.write_u16(0x0102)?;
    stream.set_byte_order(ByteOrder::Network);
    stream.write_u16(0x0102)?;
    assert_eq!(stream.bytes()?, &[0x02, 0x01, 0x01, 0x02]);

    stream.seek(SeekFrom::Start(0))?;
    assert_eq!(stream.read_u16()?, 0x0201);
    stream.set_byte_order(ByteOrder::Little);
    assert_eq!(stream.read_u16()?, 0x0201);
    Ok(())
}

#[test]
fn peek_and_seekpeek_leave_cursor() -> Result<()> {
    let mut reader = StreamReader::new(vec![0x10, 0x20, 0x30, 0x40]);
    reader.seek(SeekFrom::Start(1))?;

    assert_eq!(reader.peek(2)?, &[0x20, 0x30]);
    assert_eq!(reader.seekpeek(3, 8)?, &[0x40]);
    assert_eq!(reader.seekpeek(9, 1)?, &[] as &[u8]);
    assert_eq!(reader.tell()?, 1);
    Ok(())
}

#[test]
fn seek_variants() -> Result<()> {
    let mut reader = StreamReader::new(vec![0u8; 8]);
    assert_eq!(reader.seek(SeekFrom::End(-2))?, 6);
    assert_eq!(reader.seek(SeekFrom::Current(-6))?, 0);
    assert!(matches!(
        reader.seek(SeekFrom::Current(-1)),
        Err(Error::InvalidOffset)
    ));
    assert_eq!(reader.tell()?, 0);

    assert_eq!(reader.seek_to(20)?, 20);
    assert_eq!(reader.remaining()?, 0);
    assert_eq!(reader.read(4)?, &[] as &[u8]);
    Ok(())
}

#[test]
fn search_and_rsearch() -> Result<()> {
    let mut reader = StreamReader::new(b"..ab..ab..".to_vec());
    assert_eq!(reader.search(b"ab")?, Some(2));
    assert_eq!(reader.rsearch(b"ab")?, Some(6));
    assert_eq!(reader.search(b"")?, None);

    reader.seek(SeekFrom::Start(3))?;
    assert_eq!(reader.search(b"ab")?, Some(6));
    reader.seek(SeekFrom::Start(7))?;
    assert_eq!(reader.rsearch(b"ab")?, None);
    assert_eq!(reader.search(b"zz")?, None);
    assert_eq!(reader.tell()?, 7);
    Ok(())
}

#[test]
fn rsearch_only_sees_aligned_candidates() -> Result<()> {
    // Candidates are 5, 3 and 1; the occurrence at 2 is skipped.
    let reader = StreamReader::new(b"xxabxxx".to_vec());
    assert_eq!(reader.rsearch(b"ab")?, None);
    assert_eq!(reader.search(b"ab")?, Some(2));
    Ok(())
}

#[test]
fn read_until_without_match_keeps_cursor() -> Result<()> {
    let mut reader = StreamReader::new(b"no newline here".to_vec());
    reader.seek(SeekFrom::Start(3))?;
    assert!(matches!(
        reader.read_until(b"\n"),
        Err(Error::DelimiterNotFound)
    ));
    assert_eq!(reader.tell()?, 3);
    Ok(())
}

#[test]
fn substreams_and_clones_are_independent() -> Result<()> {
    init_test_logging();
    let mut stream = DuplexStream::new(vec![0x00, 0x01, 0x02, 0x03, 0x04]);
    stream.seek(SeekFrom::Start(4))?;

    let mut sub = stream.substream(1, 100)?;
    assert_eq!(sub.size()?, 4);
    assert_eq!(sub.tell()?, 0);
    sub.write_u8(0xEE)?;

    let mut copy = stream.clone();
    assert_eq!(copy.tell()?, 0);
    copy.clear()?;

    assert_eq!(stream.bytes()?, &[0x00, 0x01, 0x02, 0x03, 0x04]);
    assert_eq!(stream.tell()?, 4);
    assert_eq!(sub.bytes()?, &[0xEE, 0x02, 0x03, 0x04]);
    assert_eq!(copy.size()?, 0);
    Ok(())
}

#[test]
fn format_descriptors() -> Result<()> {
    let mut writer = StreamWriter::with_config(Vec::new(), StreamConfig::new(ByteOrder::Little));
    writer.write_format("<q", -2)?;
    writer.write_format("!I", 7u32)?;
    writer.write_format("?", true)?;
    writer.write_format("d", 2.5)?;
    assert!(matches!(
        writer.write_format("?", 1),
        Err(Error::Format { .. })
    ));
    assert!(matches!(
        writer.write_format("B", 256),
        Err(Error::OutOfRange { .. })
    ));

    let mut reader = StreamReader::new(writer.into_bytes()?);
    assert_eq!(reader.read_format("q")?, Value::Int(-2));
    assert_eq!(reader.read_format(">L")?, Value::Int(7));
    assert_eq!(reader.read_format("?")?, Value::Bool(true));
    assert_eq!(reader.read_format("<d")?, Value::Float(2.5));
    assert_eq!(reader.remaining()?, 0);
    Ok(())
}

#[test]
fn from_reader_snapshots_container() -> Result<()> {
    let mut source = Cursor::new(vec![0xAA, 0xBB, 0xCC]);
    let mut writer = StreamWriter::from_reader(&mut source)?;
    writer.seek(SeekFrom::End(0))?;
    writer.write_u8(0xDD)?;

    assert_eq!(writer.bytes()?, &[0xAA, 0xBB, 0xCC, 0xDD]);
    assert_eq!(source.get_ref(), &vec![0xAA, 0xBB, 0xCC]);
    Ok(())
}

#[test]
fn limits_are_configurable() -> Result<()> {
    let data = vec![0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x01];
    let mut reader = StreamReader::new(data);

    assert_eq!(reader.read_sleb128_safe()?, 0);
    assert_eq!(reader.tell()?, 5);

    reader.seek(SeekFrom::Start(0))?;
    reader.set_limits(VarintLimits::wide());
    assert_eq!(reader.read_sleb128_safe()?, 1 << 49);
    assert_eq!(reader.remaining()?, 0);
    Ok(())
}

#[test]
fn capped_signed_varint_does_not_swallow_next_field() -> Result<()> {
    let mut stream = DuplexStream::default();
    assert_eq!(stream.write_sleb128_safe(1 << 40)?, 5);
    stream.write_u8(0x2A)?;
    assert_eq!(stream.bytes()?, &[0x80, 0x80, 0x80, 0x80, 0x00, 0x2A]);

    stream.seek(SeekFrom::Start(0))?;
    assert_eq!(stream.read_sleb128()?, 0);
    assert_eq!(stream.read_u8()?, 0x2A);
    assert_eq!(stream.remaining()?, 0);
    Ok(())
}

#[test]
fn detached_writer_lifecycle() -> Result<()> {
    let mut writer = StreamWriter::detached();
    assert!(matches!(writer.size(), Err(Error::Uninitialized)));
    assert!(matches!(writer.bytes(), Err(Error::Uninitialized)));
    assert!(matches!(writer.write_uleb128(1), Err(Error::Uninitialized)));

    writer.attach(vec![0x01]);
    writer.write_uleb128(0x7F)?;
    assert_eq!(Vec::<u8>::try_from(writer)?, vec![0x7F]);
    Ok(())
}
