use super::{RawEvent, WidthClass};
use crate::reader::{DataChunk, DecodeError, FormatError, ReadResult, Reader, ReaderError};

/// A lazy iterator over the records of a data chunk.
///
/// Yields `Err` at most once: after an error the cursor can't be trusted,
/// so the stream ends.
#[derive(Debug, Clone)]
pub struct EventStream<'slc> {
    reader: Reader<'slc>,
    consumed: usize,
    failed: bool,
}

impl<'slc> EventStream<'slc> {
    /// Stream the records of a data chunk
    pub const fn new(chunk: DataChunk<'slc>) -> Self {
        Self {
            reader: Reader::with_offset(chunk.bytes(), chunk.offset()),
            consumed: 0,
            failed: false,
        }
    }

    /// Total size of the records yielded so far
    pub const fn consumed(&self) -> usize {
        self.consumed
    }

    /// Absolute offset of the next record
    pub const fn buffer_position(&self) -> usize {
        self.reader.buffer_position()
    }

    fn read_event(&mut self) -> ReadResult<RawEvent<'slc>> {
        let offset = self.reader.buffer_position();
        let tag = self.reader.read_u8()?;
        let width = WidthClass::of(tag);

        let (prefix_len, len) = match width.fixed_len() {
            Some(len) => (0, len),
            None => {
                let prefix_start = self.reader.remaining();
                let declared = self.reader.read_vlq(tag)?;
                let prefix_len = prefix_start - self.reader.remaining();
                let available = self.reader.remaining();
                if declared as usize > available {
                    return Err(ReaderError::decode(
                        offset,
                        DecodeError::PayloadOverflow {
                            tag,
                            declared,
                            available,
                        },
                    ));
                }
                (prefix_len, declared as usize)
            }
        };

        let available = self.reader.remaining();
        if len > available {
            return Err(ReaderError::format(
                offset,
                FormatError::TruncatedRecord {
                    tag,
                    needed: len,
                    available,
                },
            ));
        }
        let payload = self.reader.read_slice(len)?;
        let event = RawEvent::new(offset, tag, prefix_len, payload);

        #[cfg(feature = "tracing")]
        tracing::trace!(offset, tag, size = event.size(), "record");

        Ok(event)
    }
}

impl<'slc> Iterator for EventStream<'slc> {
    type Item = ReadResult<RawEvent<'slc>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.is_empty() {
            return None;
        }
        match self.read_event() {
            Ok(event) => {
                self.consumed += event.size();
                Some(Ok(event))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl core::iter::FusedIterator for EventStream<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::ReaderErrorKind;
    use alloc::vec::Vec;
    use pretty_assertions::assert_eq;

    fn stream(bytes: &[u8]) -> EventStream<'_> {
        EventStream::new(DataChunk::new(bytes, 22))
    }

    #[test]
    fn splits_every_width_class() {
        let bytes = [
            0x00, 0x01, // byte
            0x40, 0x05, 0x00, // word
            0x9C, 0x20, 0xD6, 0x01, 0x00, // dword
            0xC1, 0x03, b'a', b'b', b'c', // variable
        ];
        let events = stream(&bytes).collect::<ReadResult<Vec<_>>>().unwrap();
        let tags = events.iter().map(RawEvent::tag).collect::<Vec<_>>();
        assert_eq!(tags, [0x00, 0x40, 0x9C, 0xC1]);
        let offsets = events.iter().map(RawEvent::offset).collect::<Vec<_>>();
        assert_eq!(offsets, [22, 24, 27, 32]);
        assert_eq!(events[3].payload(), b"abc");
        assert_eq!(events[3].size(), 5);
    }

    #[test]
    fn consumed_matches_chunk_length() {
        let mut bytes = alloc::vec![0xC0, 0x80, 0x01];
        bytes.extend(core::iter::repeat_n(b'x', 128));
        bytes.extend_from_slice(&[0x01, 0x00]);
        let mut stream = stream(&bytes);
        let sizes = stream
            .by_ref()
            .map(|e| e.unwrap().size())
            .collect::<Vec<_>>();
        assert_eq!(sizes, [131, 2]);
        assert_eq!(stream.consumed(), bytes.len());
    }

    #[test]
    fn payload_past_chunk_is_decode_error() {
        let bytes = [0x00, 0x00, 0xC2, 0x05, b'a', b'b'];
        let mut stream = stream(&bytes);
        assert!(stream.next().unwrap().is_ok());
        let err = stream.next().unwrap().unwrap_err();
        assert_eq!(err.position(), 24);
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::Decode(DecodeError::PayloadOverflow {
                tag: 0xC2,
                declared: 5,
                available: 2
            })
        ));
        assert!(stream.next().is_none());
    }

    #[test]
    fn partial_fixed_record_is_format_error() {
        let bytes = [0x00, 0x00, 0x80, 0x01, 0x02];
        let mut stream = stream(&bytes);
        stream.next().unwrap().unwrap();
        let err = stream.next().unwrap().unwrap_err();
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::Format(FormatError::TruncatedRecord {
                tag: 0x80,
                needed: 4,
                available: 2
            })
        ));
    }

    #[test]
    fn chunk_ending_inside_length_prefix() {
        let err = stream(&[0xD0, 0x80]).next().unwrap().unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn empty_chunk_has_no_records() {
        assert!(stream(&[]).next().is_none());
    }
}
