use type2_tlv::{CapacityError, TlvError};

use crate::transport::TransportError;

type Error = Type2Error;

/// Everything a tag operation can fail with, the operation is abandoned as a whole
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Type2Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("protocol violation: {0}")]
    ProtocolViolation(#[from] ProtocolViolation),

    #[error("capacity error: {0}")]
    Capacity(#[from] CapacityError),
}

/// The tag does not look or behave like a Type 2 Tag we can work with
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolViolation {
    #[error("bad magic number {0:#04x}, expected {expected:#04x}", expected = crate::capability::MAGIC_NUMBER)]
    BadMagicNumber(u8),

    #[error("unsupported version {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },

    #[error("encrypted read required, access conditions {0:#04x}")]
    EncryptedReadRequired(u8),

    #[error("tag is write protected, access conditions {0:#04x}")]
    WriteProtected(u8),

    #[error(transparent)]
    Tlv(#[from] TlvError),
}

impl From<TlvError> for Error {
    fn from(error: TlvError) -> Self {
        Self::ProtocolViolation(error.into())
    }
}
