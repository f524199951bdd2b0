//! TLV framing for the data area of an NFC Forum Type 2 Tag
//!
//! The data area is a series of `[tag][length][value]` records. Only the NDEF
//! message record is interpreted, everything else is carried as opaque bytes.

pub mod decode;
pub mod encode;
pub mod length;
pub mod tag;

pub use decode::{TlvStream, decode, decode_slice};
pub use encode::encode;
pub use length::LengthField;
pub use tag::TlvTag;

/// Number of bytes in one block of tag memory, encoded output is padded to this
pub const BLOCK_SIZE: usize = 4;

/// Largest value length a TLV length field can carry
pub const MAX_VALUE_LENGTH: usize = 0xFFFF;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TlvError {
    #[error("unexpected tag byte {0:#04x}")]
    UnexpectedTagByte(u8),

    #[error("no NDEF message TLV found")]
    NoNdefMessage,

    /// The data ran out in the middle of a record's length or value field
    #[error("data ended inside a {0} TLV")]
    Truncated(TlvTag),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CapacityError {
    #[error("message too long, {0} bytes does not fit in a TLV length field")]
    MessageTooLong(usize),

    #[error("message too long for card, needs {needed} bytes but the data area holds {available}")]
    TooLongForCard { needed: usize, available: usize },
}

/// A single TLV record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tlv {
    pub tag: TlvTag,
    pub value: Vec<u8>,
}

impl Tlv {
    pub fn new(tag: TlvTag, value: Vec<u8>) -> Self {
        Self { tag, value }
    }

    pub fn ndef_message(message: Vec<u8>) -> Self {
        Self::new(TlvTag::NdefMessage, message)
    }

    pub fn terminator() -> Self {
        Self::new(TlvTag::Terminator, Vec::new())
    }

    /// Serialize the record, NULL and TERMINATOR are a single tag byte
    pub fn to_bytes(&self) -> Result<Vec<u8>, CapacityError> {
        let mut bytes = Vec::with_capacity(self.value.len() + 4);
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) -> Result<(), CapacityError> {
        out.push(self.tag.into());

        if !self.tag.has_length() {
            return Ok(());
        }

        let length = LengthField::try_from_len(self.value.len())?;
        out.extend_from_slice(&length.to_bytes());
        out.extend_from_slice(&self.value);

        Ok(())
    }
}
