use crate::{BYTES_PER_BLOCK, MAX_READ_LEN};

/// Knobs for talking to a tag, the defaults suit NTAG21x tags on PC/SC readers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagOptions {
    /// Bytes requested per READ BINARY, a whole number of blocks up to 16
    read_chunk_len: u8,

    /// Major mapping version accepted in the capability container
    pub supported_major_version: u8,
}

impl Default for TagOptions {
    fn default() -> Self {
        Self {
            read_chunk_len: MAX_READ_LEN,
            supported_major_version: 1,
        }
    }
}

impl TagOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rounded down to whole blocks and kept within one to four blocks
    pub fn with_read_chunk_len(mut self, len: u8) -> Self {
        let block = BYTES_PER_BLOCK as u8;
        self.read_chunk_len = (len - len % block).clamp(block, MAX_READ_LEN);
        self
    }

    pub fn with_supported_major_version(mut self, major: u8) -> Self {
        self.supported_major_version = major;
        self
    }

    pub fn read_chunk_len(&self) -> u8 {
        self.read_chunk_len
    }

    pub fn blocks_per_read(&self) -> u8 {
        self.read_chunk_len / BYTES_PER_BLOCK as u8
    }
}
