#![doc = r#"
Read FL Studio project files (`.flp`) into structures designed for humans.

An FLP file is two chunks: a fixed six byte header (`FLhd`) and a data chunk
(`FLdt`) holding a flat stream of tagged records. This crate frames the
chunks, splits the data chunk into [`RawEvent`](crate::event::RawEvent)s,
interprets each record through a static tag table and folds the result into
a [`Project`](crate::file::Project) with channels, patterns, a playlist and
a mixer.

```rust
# fn demo(bytes: &[u8]) -> Result<(), flpx::reader::ReaderError> {
let project = flpx::parse(bytes)?;

for channel in project.channels() {
    println!("{:?}: {:?}", channel.index(), channel.name());
}
for warning in project.diagnostics() {
    println!("{warning}");
}
# Ok(())
# }
```

Decoding never guesses: a framing or length problem aborts the parse with a
[`ReaderError`](crate::reader::ReaderError) carrying the byte offset, while
orphaned records and unknown tags are kept as
[`Diagnostic`](crate::file::Diagnostic)s on the returned project.
"#]
#![warn(missing_docs)]
#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod event;
pub mod file;
pub mod reader;

mod tempo;
pub use tempo::*;

use file::Project;
use reader::{ReadResult, Reader};

/// Parse a complete project from its bytes.
///
/// Same as [`Project::parse`].
pub fn parse(bytes: &[u8]) -> ReadResult<Project> {
    Project::parse(bytes)
}

/// Frame both chunks and hand back the header with a lazy stream over the
/// raw records of the data chunk.
///
/// Useful for tools that want to look at records the project model
/// doesn't keep.
pub fn events(bytes: &[u8]) -> ReadResult<(file::Header, event::EventStream<'_>)> {
    let mut reader = Reader::from_byte_slice(bytes);
    let header = reader.read_header_chunk()?;
    let data = reader.read_data_chunk()?;
    Ok((header, event::EventStream::new(data)))
}

/// Commonly used types
pub mod prelude {
    pub use crate::Tempo;
    pub use crate::event::{
        EventDecoder, EventId, EventInfo, EventRole, EventStream, EventValue, RawEvent, Target,
        TextEncoding, TypedEvent, ValueKind, WidthClass,
    };
    pub use crate::file::{
        Automation, Channel, ChannelKind, ContextError, Diagnostic, DiagnosticKind, Effect,
        Header, ItemRef, MixerSlot, Note, Pattern, PatternRecord, Playlist, PlaylistItem,
        PlaylistTrack, Project, UnknownAttributes, Version,
    };
    pub use crate::reader::{DecodeError, FormatError, ReadResult, ReaderError, ReaderErrorKind};
}
