//! Byte level access to the data area, block by block

use std::iter::FusedIterator;

use tracing::debug;

use crate::{
    BYTES_PER_BLOCK, DATA_AREA_START_BLOCK, apdu, capability::CapabilityContainer,
    error::Type2Error, options::TagOptions, transport::Exchange,
};

type Result<T, E = Type2Error> = std::result::Result<T, E>;

/// Lazily reads the data area, one READ BINARY per chunk as bytes are pulled
///
/// Yields exactly `data_area_len` bytes unless a read fails, in which case
/// the error is yielded once and the iterator ends. Only a new reader can
/// start over from block 4.
#[derive(Debug)]
pub struct DataAreaReader<'s, S> {
    session: &'s mut S,
    next_block: u16,
    remaining: usize,
    chunk_len: usize,
    buffered: std::vec::IntoIter<u8>,
    failed: bool,
}

impl<'s, S: Exchange> DataAreaReader<'s, S> {
    pub fn new(session: &'s mut S, container: &CapabilityContainer, options: &TagOptions) -> Self {
        Self {
            session,
            next_block: DATA_AREA_START_BLOCK,
            remaining: container.data_area_len(),
            chunk_len: options.read_chunk_len() as usize,
            buffered: Vec::new().into_iter(),
            failed: false,
        }
    }

    fn fill(&mut self) -> Result<()> {
        let len = self.remaining.min(self.chunk_len);
        let data = apdu::read_block(&mut *self.session, self.next_block, len as u8)?;

        self.next_block += (len / BYTES_PER_BLOCK) as u16;
        self.remaining -= len;
        self.buffered = data.into_iter();

        Ok(())
    }
}

impl<S: Exchange> Iterator for DataAreaReader<'_, S> {
    type Item = Result<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(byte) = self.buffered.next() {
            return Some(Ok(byte));
        }

        if self.failed || self.remaining == 0 {
            return None;
        }

        if let Err(error) = self.fill() {
            self.failed = true;
            return Some(Err(error));
        }

        self.buffered.next().map(Ok)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(self.buffered.len()));
        }

        let upper = self.buffered.len() + self.remaining;
        (0, Some(upper))
    }
}

impl<S: Exchange> FusedIterator for DataAreaReader<'_, S> {}

/// Write `bytes` from block 4 on, one block per UPDATE BINARY
///
/// A trailing partial block is padded with zeros.
pub fn write_data_area(session: &mut impl Exchange, bytes: &[u8]) -> Result<()> {
    debug!("writing {} bytes to the data area", bytes.len());

    for (block, chunk) in (DATA_AREA_START_BLOCK..).zip(bytes.chunks(BYTES_PER_BLOCK)) {
        let mut data = [0u8; BYTES_PER_BLOCK];
        data[..chunk.len()].copy_from_slice(chunk);

        apdu::write_block(session, block, data)?;
    }

    Ok(())
}

/// Zero every block of the data area the container declares
pub fn clear_data_area(session: &mut impl Exchange, container: &CapabilityContainer) -> Result<()> {
    let blocks = container.data_area_blocks();
    debug!("clearing {blocks} blocks of the data area");

    for block in DATA_AREA_START_BLOCK..DATA_AREA_START_BLOCK + blocks {
        apdu::write_block(session, block, [0; BYTES_PER_BLOCK])?;
    }

    Ok(())
}
