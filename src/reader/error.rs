use thiserror::Error;

#[doc = r#"
A set of errors that can occur while reading a project file.

Every one of these ends the parse: once a chunk or record boundary is
wrong, nothing after it can be trusted.
"#]
#[derive(Debug, Error)]
#[error("Reading at Position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Error)]
pub enum ReaderErrorKind {
    /// The file is not a well formed project
    #[error("Format {0}")]
    Format(#[from] FormatError),
    /// A record could not be decoded
    #[error("Decoding {0}")]
    Decode(#[from] DecodeError),
    /// Reading out of bounds.
    #[error("Read out of bounds!")]
    OutOfBounds,
    /// The underlying source failed
    #[cfg(feature = "std")]
    #[error("I/O {0}")]
    Io(#[from] std::io::Error),
}

/// Chunk framing problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A chunk did not start with the expected four byte tag
    #[error("expected chunk {expected:?}, found {found:?}")]
    Magic {
        /// The tag that should be there
        expected: [u8; 4],
        /// The tag that was read
        found: [u8; 4],
    },
    /// The header chunk declared a size other than six bytes
    #[error("header chunk declares {0} bytes, expected 6")]
    HeaderLength(u32),
    /// The source ended before a chunk's declared length
    #[error("chunk declares {declared} bytes, only {available} remain")]
    Truncated {
        /// Declared chunk length
        declared: u32,
        /// Bytes left in the source
        available: usize,
    },
    /// Bytes follow the data chunk
    #[error("{0} bytes after the data chunk")]
    TrailingBytes(usize),
    /// The data chunk ends part way through a record
    #[error("record {tag} needs {needed} bytes, only {available} remain")]
    TruncatedRecord {
        /// The tag of the partial record
        tag: u8,
        /// Bytes the record still needed
        needed: usize,
        /// Bytes left in the chunk
        available: usize,
    },
}

/// Record decoding problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A length prefix kept its continuation bit set past four bytes
    #[error("length prefix is longer than 4 bytes")]
    VlqOverflow,
    /// A value too large for a four byte length prefix
    #[error("{0} does not fit in a 4 byte length prefix")]
    VlqOutOfRange(u32),
    /// A length prefix claims more than what is left of the data chunk
    #[error("record {tag} declares {declared} bytes, only {available} remain")]
    PayloadOverflow {
        /// The tag of the record
        tag: u8,
        /// Declared payload length
        declared: u32,
        /// Bytes left in the chunk
        available: usize,
    },
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }
    /// True if out of bounds or unexpected end of file
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::OutOfBounds)
    }
    /// True if the file is not a well formed project
    pub const fn is_format_error(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::Format(_))
    }
    /// True if a record could not be decoded
    pub const fn is_decode_error(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::Decode(_))
    }
    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }
    /// Returns the position where the read error occurred.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Create a new format error
    pub const fn format(position: usize, error: FormatError) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::Format(error),
        }
    }

    /// Create a new decode error
    pub const fn decode(position: usize, error: DecodeError) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::Decode(error),
        }
    }

    /// Create a new out of bounds error
    pub const fn oob(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::OutOfBounds,
        }
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;
