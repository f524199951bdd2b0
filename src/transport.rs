//! The boundary to the card reader
//!
//! A [`Transport`] hands out an exclusive [`Exchange`] session. Everything a
//! single tag operation sends goes through one session, and dropping the
//! session ends the exclusive scope again, whichever way the operation exits.

use derive_more::Display;

/// First status byte of a successful response
pub const SW1_NORMAL: u8 = 0x90;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("card returned status {0}")]
    Status(StatusWord),

    /// The reader could not complete the exchange, card removed, reader gone, etc
    #[error("exchange with the card failed: {0}")]
    Exchange(String),

    #[error("response of {0} bytes is too short to carry a status word")]
    MalformedResponse(usize),

    #[error("card returned {actual} bytes, expected {expected}")]
    ShortRead { expected: usize, actual: usize },

    #[error("read length {0} is outside 1..=16")]
    InvalidReadLength(u8),
}

type Result<T, E = TransportError> = std::result::Result<T, E>;

/// SW1 SW2 trailer of a response APDU
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0:02X}{_1:02X}")]
pub struct StatusWord(pub u8, pub u8);

impl StatusWord {
    pub const SUCCESS: Self = Self(SW1_NORMAL, 0x00);

    /// Only SW1 decides, SW2 is kept for diagnostics
    pub fn is_normal(self) -> bool {
        self.0 == SW1_NORMAL
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub data: Vec<u8>,
    pub status: StatusWord,
}

impl Response {
    pub fn new(data: Vec<u8>, status: StatusWord) -> Self {
        Self { data, status }
    }

    /// Split raw response bytes into data and the trailing status word
    pub fn from_raw(raw: &[u8]) -> Result<Self> {
        let Some((data, [sw1, sw2])) = raw.split_last_chunk::<2>() else {
            return Err(TransportError::MalformedResponse(raw.len()));
        };

        Ok(Self::new(data.to_vec(), StatusWord(*sw1, *sw2)))
    }
}

/// One command, one response, blocking until the card answers
pub trait Exchange {
    fn exchange(&mut self, command: &[u8]) -> Result<Response>;
}

/// A reader channel that can be held exclusively for a sequence of commands
pub trait Transport {
    /// Exclusive scope over the channel, ended when dropped
    type Session<'a>: Exchange
    where
        Self: 'a;

    fn begin(&mut self) -> Result<Self::Session<'_>>;
}
