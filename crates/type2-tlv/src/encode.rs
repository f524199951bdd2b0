use tracing::warn;

use crate::{BLOCK_SIZE, CapacityError, LengthField, Tlv, TlvTag};

/// Frame a message as an NDEF message TLV followed by a TERMINATOR
///
/// The output is zero padded to a whole number of blocks and must fit in
/// `capacity` bytes (the size of the tag's data area).
pub fn encode(message: &[u8], capacity: usize) -> Result<Vec<u8>, CapacityError> {
    let length = LengthField::try_from_len(message.len())?;

    let unpadded = 1 + length.encoded_len() + message.len() + 1;
    let padded = unpadded.next_multiple_of(BLOCK_SIZE);

    if padded > capacity {
        warn!("message needs {padded} bytes, data area only has {capacity}");
        return Err(CapacityError::TooLongForCard {
            needed: padded,
            available: capacity,
        });
    }

    let mut bytes = Vec::with_capacity(padded);
    bytes.push(TlvTag::NDEF_MESSAGE);
    bytes.extend_from_slice(&length.to_bytes());
    bytes.extend_from_slice(message);
    Tlv::terminator().write_to(&mut bytes)?;
    bytes.resize(padded, 0x00);

    Ok(bytes)
}
