//! The record stream shared by shards and result files.
//!
//! Records are JSON objects (`{"Key": .., "Value": ..}`) written back to
//! back. There is no length prefix and no record count: a reader keeps
//! decoding until the stream runs out, and a record cut short is an error
//! rather than the end of input.

use std::io::{self, Read, Write};

use serde_json::de::IoRead;
use serde_json::StreamDeserializer;

use crate::KeyValue;

/// Decodes [`KeyValue`]s from a byte stream until it is exhausted.
pub struct RecordReader<R: Read> {
    stream: StreamDeserializer<'static, IoRead<R>, KeyValue>,
}

impl<R: Read> RecordReader<R> {
    /// The reader should be buffered; records are decoded a byte at a time.
    pub fn new(reader: R) -> Self {
        Self {
            stream: serde_json::Deserializer::from_reader(reader).into_iter(),
        }
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = serde_json::Result<KeyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        self.stream.next()
    }
}

/// Encodes [`KeyValue`]s one per line.
pub struct RecordWriter<W: Write> {
    inner: W,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn write(&mut self, kv: &KeyValue) -> io::Result<()> {
        serde_json::to_writer(&mut self.inner, kv)?;
        self.inner.write_all(b"\n")
    }

    /// Flushes and hands back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Encodes `records` into a fresh buffer.
pub fn encode_records<'a>(records: impl IntoIterator<Item = &'a KeyValue>) -> Vec<u8> {
    let mut writer = RecordWriter::new(Vec::new());
    for kv in records {
        // Writing into a Vec cannot fail.
        let _ = writer.write(kv);
    }
    writer.inner
}

/// Decodes every record in `buf`.
pub fn decode_records(buf: &[u8]) -> serde_json::Result<Vec<KeyValue>> {
    RecordReader::new(buf).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_then_decode() {
        let records = vec![
            KeyValue::new("a", "1"),
            KeyValue::new("", ""),
            KeyValue::new("quote \" and \\ slash", "line\nbreak"),
            KeyValue::new("ünïcödé", "🦀"),
        ];
        let buf = encode_records(&records);
        assert_eq!(decode_records(&buf).unwrap(), records);
    }

    #[test]
    fn wire_format_uses_capitalised_fields() {
        let buf = encode_records(&[KeyValue::new("a", "1")]);
        assert_eq!(buf, b"{\"Key\":\"a\",\"Value\":\"1\"}\n");
    }

    #[test]
    fn empty_stream_has_no_records() {
        assert!(decode_records(b"").unwrap().is_empty());
        assert!(decode_records(b"  \n").unwrap().is_empty());
    }

    #[test]
    fn records_need_no_separator() {
        let buf = br#"{"Key":"a","Value":"1"}{"Key":"b","Value":"2"}"#;
        let records = decode_records(buf).unwrap();
        assert_eq!(records, vec![KeyValue::new("a", "1"), KeyValue::new("b", "2")]);
    }

    #[test]
    fn truncated_record_is_an_error() {
        let mut buf = encode_records(&[KeyValue::new("a", "1"), KeyValue::new("b", "2")]);
        buf.truncate(buf.len() - 5);
        let mut reader = RecordReader::new(&buf[..]);
        assert_eq!(reader.next().unwrap().unwrap(), KeyValue::new("a", "1"));
        assert!(reader.next().unwrap().is_err());
    }

    #[test]
    fn wrong_shape_is_an_error() {
        assert!(decode_records(br#"{"Key":"a"}"#).is_err());
        assert!(decode_records(br#"{"Key":1,"Value":"x"}"#).is_err());
        assert!(decode_records(b"not json").is_err());
    }
}
