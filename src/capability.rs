use tracing::debug;
use winnow::{
    ModalResult, Parser,
    binary::{
        be_u8,
        bits::{bits, take as take_bits},
    },
    error::{ContextError, ErrMode},
};

use crate::{
    BYTES_PER_BLOCK, CAPABILITY_CONTAINER_BLOCK,
    apdu,
    error::{ProtocolViolation, Type2Error},
    options::TagOptions,
    transport::{Exchange, TransportError},
};

type Result<T, E = Type2Error> = std::result::Result<T, E>;

/// Identifies a tag formatted for NDEF
pub const MAGIC_NUMBER: u8 = 0xE1;

/// Data area size in the container is counted in units of this many bytes
pub const DATA_AREA_SIZE_UNIT: usize = 8;

/// The 4 byte capability container stored in block 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapabilityContainer {
    pub magic_number: u8,
    pub major_version: u8,
    pub minor_version: u8,

    /// Size of the data area in units of 8 bytes
    pub data_area_size: u8,

    /// High nibble is read access, low nibble is write access, 0 grants access
    pub access_conditions: u8,
}

impl CapabilityContainer {
    /// Read block 3 and check the tag is one we can read
    pub fn read(session: &mut impl Exchange, options: &TagOptions) -> Result<Self> {
        let bytes = apdu::read_block(session, CAPABILITY_CONTAINER_BLOCK, BYTES_PER_BLOCK as u8)?;

        let mut input = bytes.as_slice();
        let container = parse_capability_container
            .parse_next(&mut input)
            .map_err(|_| TransportError::ShortRead {
                expected: BYTES_PER_BLOCK,
                actual: bytes.len(),
            })?;

        container.validate(options)?;
        debug!(
            "capability container ok, version {}.{}, data area {} bytes",
            container.major_version,
            container.minor_version,
            container.data_area_len()
        );

        Ok(container)
    }

    pub fn validate(&self, options: &TagOptions) -> Result<(), ProtocolViolation> {
        if self.magic_number != MAGIC_NUMBER {
            return Err(ProtocolViolation::BadMagicNumber(self.magic_number));
        }

        if self.major_version != options.supported_major_version {
            return Err(ProtocolViolation::UnsupportedVersion {
                major: self.major_version,
                minor: self.minor_version,
            });
        }

        if !self.is_readable() {
            return Err(ProtocolViolation::EncryptedReadRequired(self.access_conditions));
        }

        Ok(())
    }

    pub fn is_readable(&self) -> bool {
        self.access_conditions & 0xF0 == 0
    }

    pub fn is_writable(&self) -> bool {
        self.access_conditions & 0x0F == 0
    }

    /// Total bytes in the data area
    pub fn data_area_len(&self) -> usize {
        self.data_area_size as usize * DATA_AREA_SIZE_UNIT
    }

    pub fn data_area_blocks(&self) -> u16 {
        (self.data_area_len() / BYTES_PER_BLOCK) as u16
    }

    pub fn to_bytes(&self) -> [u8; BYTES_PER_BLOCK] {
        [
            self.magic_number,
            (self.major_version << 4) | (self.minor_version & 0x0F),
            self.data_area_size,
            self.access_conditions,
        ]
    }
}

fn parse_version(input: &mut &[u8]) -> ModalResult<(u8, u8)> {
    bits::<_, _, ErrMode<ContextError>, _, _>((take_bits(4_u8), take_bits(4_u8))).parse_next(input)
}

pub fn parse_capability_container(input: &mut &[u8]) -> ModalResult<CapabilityContainer> {
    let magic_number = be_u8.parse_next(input)?;
    let (major_version, minor_version) = parse_version(input)?;
    let data_area_size = be_u8.parse_next(input)?;
    let access_conditions = be_u8.parse_next(input)?;

    Ok(CapabilityContainer {
        magic_number,
        major_version,
        minor_version,
        data_area_size,
        access_conditions,
    })
}
