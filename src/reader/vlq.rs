use super::{DecodeError, FormatError, ReadResult, Reader, ReaderError};
use alloc::vec::Vec;

/// The most bytes a length prefix may span.
pub const VLQ_MAX_BYTES: usize = 4;

/// The largest value a length prefix can hold (2^28 - 1).
pub const VLQ_MAX: u32 = (1 << (7 * VLQ_MAX_BYTES)) - 1;

/// Decode a length prefix from the front of `bytes`.
///
/// Each byte contributes its low seven bits, least significant group
/// first. A set high bit means another byte follows.
///
/// Returns the value and the number of bytes it occupied, or `None` if
/// `bytes` ends before the prefix does.
pub fn decode_vlq(bytes: &[u8]) -> Result<Option<(u32, usize)>, DecodeError> {
    let mut value = 0u32;
    for (i, &byte) in bytes.iter().enumerate() {
        if i == VLQ_MAX_BYTES {
            return Err(DecodeError::VlqOverflow);
        }
        value |= ((byte & 0x7F) as u32) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(Some((value, i + 1)));
        }
    }
    if bytes.len() >= VLQ_MAX_BYTES {
        return Err(DecodeError::VlqOverflow);
    }
    Ok(None)
}

/// Encode `value` as a length prefix.
///
/// Project files are never written by this crate; this mirrors
/// [`decode_vlq`] for building test inputs.
pub fn encode_vlq(value: u32) -> Result<Vec<u8>, DecodeError> {
    if value > VLQ_MAX {
        return Err(DecodeError::VlqOutOfRange(value));
    }
    let mut out = Vec::with_capacity(VLQ_MAX_BYTES);
    let mut rest = value;
    loop {
        let byte = (rest & 0x7F) as u8;
        rest >>= 7;
        if rest == 0 {
            out.push(byte);
            return Ok(out);
        }
        out.push(byte | 0x80);
    }
}

impl Reader<'_> {
    /// Read a length prefix for the record `tag`.
    ///
    /// Running out of chunk inside the prefix is a truncated record.
    pub fn read_vlq(&mut self, tag: u8) -> ReadResult<u32> {
        let start = self.buffer_position();
        let data = self.data;
        let window = &data[self.position..];
        match decode_vlq(window) {
            Ok(Some((value, used))) => {
                self.position += used;
                Ok(value)
            }
            Ok(None) => Err(ReaderError::format(
                start,
                FormatError::TruncatedRecord {
                    tag,
                    needed: window.len() + 1,
                    available: window.len(),
                },
            )),
            Err(e) => Err(ReaderError::decode(start, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn boundary_values() {
        for (value, bytes) in [
            (0, &[0x00][..]),
            (127, &[0x7F][..]),
            (128, &[0x80, 0x01][..]),
            (16383, &[0xFF, 0x7F][..]),
            (16384, &[0x80, 0x80, 0x01][..]),
            (VLQ_MAX, &[0xFF, 0xFF, 0xFF, 0x7F][..]),
        ] {
            assert_eq!(encode_vlq(value).unwrap(), bytes);
            assert_eq!(decode_vlq(bytes).unwrap(), Some((value, bytes.len())));
        }
    }

    #[test]
    fn stops_at_first_terminal_byte() {
        assert_eq!(decode_vlq(&[0x05, 0xFF, 0xFF]).unwrap(), Some((5, 1)));
    }

    #[test]
    fn five_byte_prefix_overflows() {
        assert_eq!(
            decode_vlq(&[0x80, 0x80, 0x80, 0x80, 0x01]),
            Err(DecodeError::VlqOverflow)
        );
        assert_eq!(
            decode_vlq(&[0x80, 0x80, 0x80, 0x80]),
            Err(DecodeError::VlqOverflow)
        );
    }

    #[test]
    fn short_input_is_incomplete() {
        assert_eq!(decode_vlq(&[]).unwrap(), None);
        assert_eq!(decode_vlq(&[0x80, 0x80]).unwrap(), None);
    }

    #[test]
    fn too_large_to_encode() {
        assert_eq!(
            encode_vlq(VLQ_MAX + 1),
            Err(DecodeError::VlqOutOfRange(VLQ_MAX + 1))
        );
    }

    #[test]
    fn reader_reports_overflow_at_prefix_start() {
        let bytes = [0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x01];
        let mut reader = Reader::with_offset(&bytes, 30);
        reader.read_u8().unwrap();
        let err = reader.read_vlq(0xC0).unwrap_err();
        assert!(err.is_decode_error());
        assert_eq!(err.position(), 31);
    }

    proptest! {
        #[test]
        fn round_trips_below_2_pow_28(value in 0..=VLQ_MAX) {
            let bytes = encode_vlq(value).unwrap();
            prop_assert!(bytes.len() <= VLQ_MAX_BYTES);
            prop_assert_eq!(decode_vlq(&bytes).unwrap(), Some((value, bytes.len())));
        }
    }
}
