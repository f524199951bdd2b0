//! Read, write and erase the NDEF message on an NFC Forum Type 2 Tag through a
//! smart card reader

pub mod apdu;
pub mod block_stream;
pub mod capability;
pub mod error;
pub mod logging;
pub mod options;
pub mod tag;
pub mod transport;

#[cfg(feature = "pcsc")]
pub mod pcsc;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use capability::CapabilityContainer;
pub use error::{ProtocolViolation, Type2Error};
pub use options::TagOptions;
pub use tag::Type2Tag;
pub use transport::{Exchange, Response, StatusWord, Transport, TransportError};

pub use type2_tlv::{self as tlv, CapacityError, Tlv, TlvError, TlvTag};

/// Number of bytes per block of tag memory
pub const BYTES_PER_BLOCK: usize = type2_tlv::BLOCK_SIZE;

/// Block holding the capability container
pub const CAPABILITY_CONTAINER_BLOCK: u16 = 3;

/// First block of the data area, right after the capability container
pub const DATA_AREA_START_BLOCK: u16 = 4;

/// Most bytes a single READ BINARY may ask for (4 blocks)
pub const MAX_READ_LEN: u8 = 16;
