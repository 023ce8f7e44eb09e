//! Length-prefixed log frame decoding
//!
//! Bazel writes its gRPC log as back-to-back frames, each a LEB128 varint
//! length followed by that many bytes of a serialized `LogEntry`. There is no
//! header, footer or checksum, so the reader can only detect damage at frame
//! boundaries and never resynchronizes after it.

use crate::error::{LogError, Result};
use crate::event::LogEvent;
use crate::proto::remote_logging::LogEntry;
use prost::Message;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::iter::FusedIterator;
use std::path::Path;

/// Longest valid encoding of a 64-bit varint
const MAX_VARINT_LEN: usize = 10;

/// Lazy iterator of [`LogEvent`]s over a framed log stream.
///
/// The prefix is read byte by byte, so wrap unbuffered sources in a
/// [`BufReader`] (as [`open`] does). After the first error the iterator
/// yields `None`.
#[derive(Debug)]
pub struct FramedLogReader<R> {
    inner: R,
    buf: Vec<u8>,
    index: usize,
    done: bool,
}

/// Open a log file for reading
pub fn open(path: impl AsRef<Path>) -> Result<FramedLogReader<BufReader<File>>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LogError::io_at(e, path))?;
    tracing::debug!(path = %path.display(), "Opened gRPC log");
    Ok(FramedLogReader::new(BufReader::new(file)))
}

impl<R: Read> FramedLogReader<R> {
    /// Create a reader over a byte stream positioned at a frame boundary
    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            index: 0,
            done: false,
        }
    }

    /// Number of frames successfully decoded so far
    pub const fn frames_read(&self) -> usize {
        self.index
    }

    /// Give back the underlying stream
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Decode the next frame, `None` at a clean end of stream
    fn read_event(&mut self) -> Result<Option<LogEvent>> {
        let Some(len) = self.read_length()? else {
            return Ok(None);
        };

        self.buf.clear();
        let available = (&mut self.inner)
            .take(len)
            .read_to_end(&mut self.buf)
            .map_err(LogError::io)? as u64;
        if available < len {
            return Err(LogError::truncated(self.index, len, available));
        }

        let entry = LogEntry::decode(self.buf.as_slice())
            .map_err(|e| LogError::corrupt(self.index, e))?;
        tracing::trace!(frame = self.index, len, method = %entry.method_name, "Decoded frame");

        self.index += 1;
        Ok(Some(LogEvent::from(entry)))
    }

    /// Read a varint length prefix.
    ///
    /// Zero bytes before end of stream is a clean end. A prefix cut short
    /// reports the prefix bytes it was waiting for.
    fn read_length(&mut self) -> Result<Option<u64>> {
        let mut value = 0u64;
        for i in 0..MAX_VARINT_LEN {
            let byte = match self.read_byte()? {
                Some(b) => b,
                None if i == 0 => return Ok(None),
                None => return Err(LogError::truncated(self.index, i as u64 + 1, i as u64)),
            };

            // The tenth byte may only carry the top bit of a u64
            if i == MAX_VARINT_LEN - 1 && byte > 1 {
                return Err(LogError::invalid_length_prefix(self.index));
            }

            value |= u64::from(byte & 0x7f) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(Some(value));
            }
        }
        Err(LogError::invalid_length_prefix(self.index))
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(LogError::io(e)),
            }
        }
    }
}

impl<R: Read> Iterator for FramedLogReader<R> {
    type Item = Result<LogEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                tracing::debug!(frame = self.index, error = %e, "Stopped reading log");
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> FusedIterator for FramedLogReader<R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventDetails;
    use crate::proto::remote_logging::{ReadDetails, RpcCallDetails, rpc_call_details};

    fn entry(method: &str) -> LogEntry {
        LogEntry {
            method_name: method.to_string(),
            ..Default::default()
        }
    }

    fn frames(entries: &[LogEntry]) -> Vec<u8> {
        entries
            .iter()
            .flat_map(Message::encode_length_delimited_to_vec)
            .collect()
    }

    #[test]
    fn test_decodes_in_order() {
        let bytes = frames(&[entry("a/A"), entry("b/B"), entry("c/C")]);
        let methods: Vec<String> = FramedLogReader::new(bytes.as_slice())
            .map(|e| e.unwrap().method_name)
            .collect();
        assert_eq!(methods, ["a/A", "b/B", "c/C"]);
    }

    #[test]
    fn test_empty_stream() {
        let mut reader = FramedLogReader::new(&[][..]);
        assert!(reader.next().is_none());
        assert_eq!(reader.frames_read(), 0);
    }

    #[test]
    fn test_zero_length_frame_is_default_event() {
        let events: Vec<_> = FramedLogReader::new(&[0u8][..]).collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].as_ref().unwrap(), &LogEvent::default());
    }

    #[test]
    fn test_truncated_body() {
        let mut bytes = frames(&[entry("a/A"), entry("b/Bee")]);
        bytes.truncate(bytes.len() - 2);

        let mut reader = FramedLogReader::new(bytes.as_slice());
        assert!(reader.next().unwrap().is_ok());
        let err = reader.next().unwrap().unwrap_err();
        let LogError::TruncatedFrame {
            index,
            expected,
            available,
        } = err
        else {
            panic!("expected TruncatedFrame, got {err:?}");
        };
        assert_eq!(index, 1);
        assert_eq!(available + 2, expected);
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_truncated_prefix() {
        // Continuation bit set, then end of stream
        let err = FramedLogReader::new(&[0x80u8][..])
            .next()
            .unwrap()
            .unwrap_err();
        assert!(matches!(
            err,
            LogError::TruncatedFrame {
                index: 0,
                expected: 2,
                available: 1
            }
        ));
    }

    #[test]
    fn test_overlong_prefix() {
        let bytes = [0xffu8; 11];
        let err = FramedLogReader::new(&bytes[..]).next().unwrap().unwrap_err();
        assert!(matches!(err, LogError::InvalidLengthPrefix { index: 0 }));
    }

    #[test]
    fn test_prefix_overflowing_u64() {
        let mut bytes = vec![0xffu8; 9];
        bytes.push(0x02);
        let err = FramedLogReader::new(bytes.as_slice())
            .next()
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, LogError::InvalidLengthPrefix { .. }));
    }

    #[test]
    fn test_corrupt_body_fuses_reader() {
        // One byte frame holding an invalid wire type
        let bytes = [1u8, 0x0f, 0x00];
        let mut reader = FramedLogReader::new(&bytes[..]);
        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(err, LogError::CorruptFrame { index: 0, .. }));
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_details_survive_framing() {
        let e = LogEntry {
            method_name: "google.bytestream.ByteStream/Read".to_string(),
            details: Some(RpcCallDetails {
                details: Some(rpc_call_details::Details::Read(ReadDetails {
                    request: None,
                    num_reads: 3,
                    bytes_read: 4096,
                })),
            }),
            ..Default::default()
        };
        let bytes = frames(&[e]);
        let event = FramedLogReader::new(bytes.as_slice())
            .next()
            .unwrap()
            .unwrap();
        let Some(EventDetails::Read(read)) = event.details else {
            panic!("expected Read details");
        };
        assert_eq!(read.response.num_reads, 3);
        assert_eq!(read.response.bytes_read, 4096);
    }

    #[test]
    fn test_buffer_is_reused() {
        let bytes = frames(&[entry(&"x".repeat(64)), entry("y")]);
        let mut reader = FramedLogReader::new(bytes.as_slice());
        reader.next().unwrap().unwrap();
        let capacity = reader.buf.capacity();
        reader.next().unwrap().unwrap();
        assert_eq!(reader.buf.capacity(), capacity);
    }

    #[test]
    fn test_open_missing_file() {
        let err = open("/nonexistent/grpc.log").unwrap_err();
        assert!(matches!(err, LogError::Io { path: Some(_), .. }));
    }
}
