use std::fmt;

use crate::TlvError;

/// Tag byte of a TLV record, as defined for Type 2 Tags
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TlvTag {
    /// Padding, no length or value
    Null,
    LockControl,
    MemoryControl,
    NdefMessage,
    Proprietary,
    /// End of the TLV area, no length or value
    Terminator,
    /// Any other tag, carries a length and value that are skipped
    Unknown(u8),
}

impl TlvTag {
    pub const NULL: u8 = 0x00;
    pub const LOCK_CONTROL: u8 = 0x01;
    pub const MEMORY_CONTROL: u8 = 0x02;
    pub const NDEF_MESSAGE: u8 = 0x03;
    pub const PROPRIETARY: u8 = 0xFD;
    pub const TERMINATOR: u8 = 0xFE;

    /// Only valid as the escape byte of a 3 byte length field
    pub const RESERVED: u8 = 0xFF;

    /// Whether a length field (and value) follows the tag byte
    pub fn has_length(self) -> bool {
        !matches!(self, Self::Null | Self::Terminator)
    }
}

impl TryFrom<u8> for TlvTag {
    type Error = TlvError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        let tag = match byte {
            Self::NULL => Self::Null,
            Self::LOCK_CONTROL => Self::LockControl,
            Self::MEMORY_CONTROL => Self::MemoryControl,
            Self::NDEF_MESSAGE => Self::NdefMessage,
            Self::PROPRIETARY => Self::Proprietary,
            Self::TERMINATOR => Self::Terminator,
            Self::RESERVED => return Err(TlvError::UnexpectedTagByte(byte)),
            other => Self::Unknown(other),
        };

        Ok(tag)
    }
}

impl From<TlvTag> for u8 {
    fn from(tag: TlvTag) -> Self {
        match tag {
            TlvTag::Null => TlvTag::NULL,
            TlvTag::LockControl => TlvTag::LOCK_CONTROL,
            TlvTag::MemoryControl => TlvTag::MEMORY_CONTROL,
            TlvTag::NdefMessage => TlvTag::NDEF_MESSAGE,
            TlvTag::Proprietary => TlvTag::PROPRIETARY,
            TlvTag::Terminator => TlvTag::TERMINATOR,
            TlvTag::Unknown(byte) => byte,
        }
    }
}

impl fmt::Display for TlvTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::LockControl => f.write_str("lock control"),
            Self::MemoryControl => f.write_str("memory control"),
            Self::NdefMessage => f.write_str("NDEF message"),
            Self::Proprietary => f.write_str("proprietary"),
            Self::Terminator => f.write_str("terminator"),
            Self::Unknown(byte) => write!(f, "unknown ({byte:#04x})"),
        }
    }
}
