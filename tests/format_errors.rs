mod fixture;

use fixture::*;
use flpx::prelude::*;
use pretty_assertions::assert_eq;

fn parse_error(bytes: &[u8]) -> ReaderError {
    match flpx::parse(bytes) {
        Ok(project) => panic!("expected an error, got {project:?}"),
        Err(e) => e,
    }
}

fn format_error(error: &ReaderError) -> &FormatError {
    match error.error_kind() {
        ReaderErrorKind::Format(e) => e,
        kind => panic!("expected a format error, got {kind:?}"),
    }
}

fn decode_error(error: &ReaderError) -> &DecodeError {
    match error.error_kind() {
        ReaderErrorKind::Decode(e) => e,
        kind => panic!("expected a decode error, got {kind:?}"),
    }
}

#[test]
fn wrong_header_magic() {
    let mut bytes = demo_project().build();
    bytes[..4].copy_from_slice(b"RIFF");

    let error = parse_error(&bytes);
    assert!(error.is_format_error());
    assert_eq!(error.position(), 0);
    assert_eq!(
        format_error(&error),
        &FormatError::Magic {
            expected: *b"FLhd",
            found: *b"RIFF"
        }
    );
}

#[test]
fn wrong_data_magic() {
    let mut bytes = demo_project().build();
    bytes[14..18].copy_from_slice(b"FLdx");

    let error = parse_error(&bytes);
    assert!(error.is_format_error());
    assert_eq!(error.position(), 14);
}

#[test]
fn odd_header_length() {
    let mut bytes = demo_project().build();
    bytes[4] = 8;

    assert_eq!(
        format_error(&parse_error(&bytes)),
        &FormatError::HeaderLength(8)
    );
}

#[test]
fn file_too_short() {
    let error = parse_error(b"FLhd\x06\x00");
    assert!(error.is_out_of_bounds());
}

#[test]
fn data_chunk_longer_than_file() {
    let bytes = demo_project().build();
    let error = parse_error(&bytes[..bytes.len() - 1]);
    assert!(matches!(
        format_error(&error),
        FormatError::Truncated { .. }
    ));
}

#[test]
fn bytes_after_data_chunk() {
    let mut bytes = demo_project().build();
    bytes.extend_from_slice(&[0, 0]);
    assert_eq!(
        format_error(&parse_error(&bytes)),
        &FormatError::TrailingBytes(2)
    );
}

#[test]
fn payload_past_end_of_chunk() {
    let bytes = ProjectWriter::new(MODERN)
        .word(64, 0)
        .raw(&[203, 0x10, 0x41, 0x00])
        .build();

    let error = parse_error(&bytes);
    assert!(error.is_decode_error());
    assert_eq!(error.position(), 25);
    assert_eq!(
        decode_error(&error),
        &DecodeError::PayloadOverflow {
            tag: 203,
            declared: 16,
            available: 2
        }
    );
}

#[test]
fn length_prefix_too_long() {
    let bytes = ProjectWriter::new(MODERN)
        .raw(&[224, 0x80, 0x80, 0x80, 0x80, 0x01])
        .build();

    let error = parse_error(&bytes);
    assert_eq!(decode_error(&error), &DecodeError::VlqOverflow);
}

#[test]
fn cut_fixed_width_record() {
    let bytes = ProjectWriter::new(MODERN).raw(&[156, 0x00, 0xF4]).build();

    let error = parse_error(&bytes);
    assert_eq!(error.position(), 22);
    assert_eq!(
        format_error(&error),
        &FormatError::TruncatedRecord {
            tag: 156,
            needed: 4,
            available: 2
        }
    );
}
