use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::{LengthField, Tlv, TlvError, TlvTag};

/// Pulls TLV records out of a fallible byte source, one forward pass
///
/// NULL padding is skipped. The stream ends after yielding a TERMINATOR,
/// when the source runs dry between records, or after the first error.
/// Bytes past the last yielded record are never pulled from the source.
#[derive(Debug)]
pub struct TlvStream<I> {
    bytes: I,
    done: bool,
}

impl<I, E> TlvStream<I>
where
    I: Iterator<Item = Result<u8, E>>,
    E: From<TlvError>,
{
    pub fn new(bytes: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            bytes: bytes.into_iter(),
            done: false,
        }
    }

    fn next_byte(&mut self, tag: TlvTag) -> Result<u8, E> {
        match self.bytes.next() {
            Some(byte) => byte,
            None => Err(TlvError::Truncated(tag).into()),
        }
    }

    fn read_record(&mut self, tag: TlvTag) -> Result<Tlv, E> {
        let length = LengthField::read(|| self.next_byte(tag))?;
        let value = (0..length.len())
            .map(|_| self.next_byte(tag))
            .collect::<Result<Vec<u8>, E>>()?;

        Ok(Tlv::new(tag, value))
    }
}

impl<I, E> Iterator for TlvStream<I>
where
    I: Iterator<Item = Result<u8, E>>,
    E: From<TlvError>,
{
    type Item = Result<Tlv, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = loop {
            let byte = match self.bytes.next() {
                Some(Ok(byte)) => byte,
                Some(Err(error)) => break Err(error),
                None => {
                    self.done = true;
                    return None;
                }
            };

            let tag = match TlvTag::try_from(byte) {
                Ok(TlvTag::Null) => continue,
                Ok(tag) => tag,
                Err(error) => break Err(error.into()),
            };

            if tag == TlvTag::Terminator {
                break Ok(Tlv::terminator());
            }

            break self.read_record(tag);
        };

        if !matches!(&result, Ok(tlv) if tlv.tag != TlvTag::Terminator) {
            self.done = true;
        }

        Some(result)
    }
}

impl<I, E> FusedIterator for TlvStream<I>
where
    I: Iterator<Item = Result<u8, E>>,
    E: From<TlvError>,
{
}

/// Extract the value of the first NDEF message TLV
///
/// A TERMINATOR before any NDEF message TLV means the area holds no message
/// yet, that is an empty message and not an error. Running out of bytes first
/// is an error.
pub fn decode<I, E>(bytes: I) -> Result<Vec<u8>, E>
where
    I: IntoIterator<Item = Result<u8, E>>,
    E: From<TlvError>,
{
    for tlv in TlvStream::new(bytes) {
        let tlv = tlv?;
        match tlv.tag {
            TlvTag::NdefMessage => {
                debug!("found NDEF message TLV, {} bytes", tlv.value.len());
                return Ok(tlv.value);
            }

            TlvTag::Terminator => {
                debug!("reached terminator TLV without an NDEF message");
                return Ok(Vec::new());
            }

            other => trace!("skipping {other} TLV, {} bytes", tlv.value.len()),
        }
    }

    Err(TlvError::NoNdefMessage.into())
}

/// [`decode`] over an in-memory copy of the data area
pub fn decode_slice(bytes: &[u8]) -> Result<Vec<u8>, TlvError> {
    decode::<_, TlvError>(bytes.iter().copied().map(Ok))
}
