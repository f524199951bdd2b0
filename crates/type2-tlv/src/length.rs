use crate::{CapacityError, MAX_VALUE_LENGTH};

/// Escape byte announcing a 2 byte length
pub const LONG_LENGTH_ESCAPE: u8 = 0xFF;

/// Length field of a TLV record
///
/// One byte for lengths up to 0xFE, otherwise `0xFF` followed by the length as
/// a big endian u16.
// NOTE: big endian matches the NFC Forum layout, still worth checking against
// tags written by other stacks when long messages are involved
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LengthField {
    Short(u8),
    Long(u16),
}

impl LengthField {
    pub fn try_from_len(len: usize) -> Result<Self, CapacityError> {
        if len > MAX_VALUE_LENGTH {
            return Err(CapacityError::MessageTooLong(len));
        }

        if len < LONG_LENGTH_ESCAPE as usize {
            Ok(Self::Short(len as u8))
        } else {
            Ok(Self::Long(len as u16))
        }
    }

    pub fn len(self) -> usize {
        match self {
            Self::Short(len) => len as usize,
            Self::Long(len) => len as usize,
        }
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Number of bytes the field itself takes up
    pub fn encoded_len(self) -> usize {
        match self {
            Self::Short(_) => 1,
            Self::Long(_) => 3,
        }
    }

    pub fn to_bytes(self) -> Vec<u8> {
        match self {
            Self::Short(len) => vec![len],
            Self::Long(len) => {
                let [hi, lo] = len.to_be_bytes();
                vec![LONG_LENGTH_ESCAPE, hi, lo]
            }
        }
    }

    /// Read a length field, pulling one byte, or three for the escaped form
    pub(crate) fn read<E>(mut next_byte: impl FnMut() -> Result<u8, E>) -> Result<Self, E> {
        let first = next_byte()?;
        if first != LONG_LENGTH_ESCAPE {
            return Ok(Self::Short(first));
        }

        let hi = next_byte()?;
        let lo = next_byte()?;

        Ok(Self::Long(u16::from_be_bytes([hi, lo])))
    }
}
