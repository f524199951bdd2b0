//! READ BINARY / UPDATE BINARY framing for PC/SC storage card access

use tracing::{trace, warn};

use crate::{
    BYTES_PER_BLOCK, MAX_READ_LEN,
    error::Type2Error,
    transport::{Exchange, TransportError},
};

type Result<T, E = Type2Error> = std::result::Result<T, E>;

/// Class byte for reader-handled (pseudo) APDUs
pub const CLA: u8 = 0xFF;

pub const INS_READ_BINARY: u8 = 0xB0;
pub const INS_UPDATE_BINARY: u8 = 0xD6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ReadBinary { block: u16, len: u8 },
    UpdateBinary { block: u16, data: [u8; BYTES_PER_BLOCK] },
}

impl Command {
    /// P1 carries the high byte of the block address, always 0 below block 256
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::ReadBinary { block, len } => {
                let [p1, p2] = block.to_be_bytes();
                vec![CLA, INS_READ_BINARY, p1, p2, *len]
            }

            Self::UpdateBinary { block, data } => {
                let [p1, p2] = block.to_be_bytes();
                let mut bytes = vec![CLA, INS_UPDATE_BINARY, p1, p2, BYTES_PER_BLOCK as u8];
                bytes.extend_from_slice(data);
                bytes
            }
        }
    }
}

fn send(session: &mut impl Exchange, command: &Command) -> Result<Vec<u8>> {
    let bytes = command.to_bytes();
    trace!("> {}", hex::encode(&bytes));

    let response = session.exchange(&bytes)?;
    trace!("< {} {}", hex::encode(&response.data), response.status);

    if !response.status.is_normal() {
        warn!("{command:?} failed with status {}", response.status);
        return Err(TransportError::Status(response.status).into());
    }

    Ok(response.data)
}

/// Read `len` bytes (at most 16) starting at `block`
pub fn read_block(session: &mut impl Exchange, block: u16, len: u8) -> Result<Vec<u8>> {
    if len == 0 || len > MAX_READ_LEN {
        return Err(TransportError::InvalidReadLength(len).into());
    }

    let mut data = send(session, &Command::ReadBinary { block, len })?;

    let expected = len as usize;
    if data.len() < expected {
        return Err(TransportError::ShortRead {
            expected,
            actual: data.len(),
        }
        .into());
    }

    if data.len() > expected {
        trace!("dropping {} extra bytes read at block {block}", data.len() - expected);
        data.truncate(expected);
    }

    Ok(data)
}

/// Write exactly one block
pub fn write_block(session: &mut impl Exchange, block: u16, data: [u8; BYTES_PER_BLOCK]) -> Result<()> {
    send(session, &Command::UpdateBinary { block, data })?;
    Ok(())
}
