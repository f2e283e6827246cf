#![allow(dead_code)]
//! Writes small project files for the integration tests.

use flpx::reader::encode_vlq;

/// Header format value that selects UTF-16 text
pub const MODERN: u16 = 11;
/// Header format value that selects single byte text
pub const LEGACY: u16 = 0;

/// Appends records to a data chunk, then frames the file.
#[derive(Clone)]
pub struct ProjectWriter {
    format: u16,
    channel_count: u16,
    ppq: u16,
    utf16: bool,
    records: Vec<u8>,
}

impl ProjectWriter {
    pub fn new(format: u16) -> Self {
        Self {
            format,
            channel_count: 0,
            ppq: 96,
            utf16: format >= MODERN,
            records: Vec::new(),
        }
    }

    pub fn channel_count(mut self, count: u16) -> Self {
        self.channel_count = count;
        self
    }

    pub fn byte(mut self, tag: u8, value: u8) -> Self {
        assert!(tag < 64);
        self.records.extend_from_slice(&[tag, value]);
        self
    }

    pub fn word(mut self, tag: u8, value: u16) -> Self {
        assert!((64..128).contains(&tag));
        self.records.push(tag);
        self.records.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn dword(mut self, tag: u8, value: u32) -> Self {
        assert!((128..192).contains(&tag));
        self.records.push(tag);
        self.records.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn data(mut self, tag: u8, payload: &[u8]) -> Self {
        assert!(tag >= 192);
        self.records.push(tag);
        self.records
            .extend(encode_vlq(payload.len() as u32).unwrap());
        self.records.extend_from_slice(payload);
        self
    }

    /// The version event; later text follows the encoding it selects
    pub fn version(mut self, version: &str) -> Self {
        let mut parts = version.split('.').map(|p| p.parse::<u16>().unwrap());
        let (major, minor) = (parts.next().unwrap(), parts.next().unwrap_or(0));
        self.utf16 = major > 11 || (major == 11 && minor >= 5);
        self.ascii(199, version)
    }

    /// Text in the current encoding, NUL terminated
    pub fn text(self, tag: u8, text: &str) -> Self {
        let payload = if self.utf16 {
            utf16(text)
        } else {
            let mut bytes = text.as_bytes().to_vec();
            bytes.push(0);
            bytes
        };
        self.data(tag, &payload)
    }

    /// Text that is always single byte, like the version string
    pub fn ascii(self, tag: u8, text: &str) -> Self {
        let mut bytes = text.as_bytes().to_vec();
        bytes.push(0);
        self.data(tag, &bytes)
    }

    /// Raw bytes appended to the data chunk as they are
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.records.extend_from_slice(bytes);
        self
    }

    pub fn records(&self) -> &[u8] {
        &self.records
    }

    pub fn build(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"FLhd");
        bytes.extend_from_slice(&6u32.to_le_bytes());
        bytes.extend_from_slice(&self.format.to_le_bytes());
        bytes.extend_from_slice(&self.channel_count.to_le_bytes());
        bytes.extend_from_slice(&self.ppq.to_le_bytes());
        bytes.extend_from_slice(b"FLdt");
        bytes.extend_from_slice(&(self.records.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&self.records);
        bytes
    }
}

pub fn utf16(text: &str) -> Vec<u8> {
    text.encode_utf16()
        .chain([0])
        .flat_map(u16::to_le_bytes)
        .collect()
}

/// One packed 24 byte note
pub fn note(position: u32, channel: u16, length: u32, key: u16, velocity: u8) -> Vec<u8> {
    let mut bytes = vec![0u8; 24];
    bytes[0..4].copy_from_slice(&position.to_le_bytes());
    bytes[6..8].copy_from_slice(&channel.to_le_bytes());
    bytes[8..12].copy_from_slice(&length.to_le_bytes());
    bytes[12..14].copy_from_slice(&key.to_le_bytes());
    bytes[16] = 120;
    bytes[20] = 64;
    bytes[21] = velocity;
    bytes
}

/// One packed 32 byte playlist item referencing a pattern
pub fn pattern_item(position: u32, pattern: u16, length: u32, lane: u16) -> Vec<u8> {
    let mut bytes = vec![0u8; 32];
    bytes[0..4].copy_from_slice(&position.to_le_bytes());
    bytes[4..6].copy_from_slice(&20480u16.to_le_bytes());
    bytes[6..8].copy_from_slice(&(20480 + pattern).to_le_bytes());
    bytes[8..12].copy_from_slice(&length.to_le_bytes());
    bytes[12..14].copy_from_slice(&(499 - lane).to_le_bytes());
    bytes
}

/// A small but complete FL Studio 20 project
pub fn demo_project() -> ProjectWriter {
    let notes = [note(0, 0, 48, 60, 100), note(96, 0, 48, 67, 90)].concat();
    let items = [pattern_item(0, 1, 384, 0), pattern_item(384, 1, 384, 1)].concat();

    ProjectWriter::new(LEGACY)
        .channel_count(2)
        .version("20.8.4.2576")
        .dword(156, 128_000)
        .text(194, "Demo song")
        .byte(17, 4)
        .byte(18, 4)
        .word(65, 1)
        .text(193, "Intro")
        .data(224, &notes)
        .word(64, 0)
        .byte(21, 0)
        .text(203, "Kick")
        .text(196, "%FLStudioFactoryData%/Kick.wav")
        .byte(22, 1)
        .word(64, 1)
        .byte(21, 4)
        .text(201, "3x Osc")
        .text(203, "Lead")
        .byte(0, 1)
        .word(99, 0)
        .text(241, "Arrangement")
        .data(233, &items)
        .data(236, &[0u8; 4])
        .text(204, "Master")
        .dword(147, u32::MAX)
        .data(236, &[0u8; 4])
        .text(204, "Drums")
        .text(201, "Fruity Limiter")
        .word(98, 0)
        .dword(147, 0)
}
