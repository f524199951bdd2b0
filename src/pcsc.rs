//! [`Transport`] over a PC/SC connected card
//!
//! The exclusive scope is a PC/SC transaction, released with `LeaveCard`
//! when the session drops.

use tracing::trace;

use crate::transport::{Exchange, Response, Transport, TransportError};

type Result<T, E = TransportError> = std::result::Result<T, E>;

/// Session holding a PC/SC transaction on the card
pub struct PcscSession<'a>(pcsc::Transaction<'a>);

impl Exchange for PcscSession<'_> {
    fn exchange(&mut self, command: &[u8]) -> Result<Response> {
        let mut buffer = [0u8; pcsc::MAX_BUFFER_SIZE];
        let raw = self
            .0
            .transmit(command, &mut buffer)
            .map_err(|error| TransportError::Exchange(error.to_string()))?;

        Response::from_raw(raw)
    }
}

impl Transport for pcsc::Card {
    type Session<'a> = PcscSession<'a>;

    fn begin(&mut self) -> Result<Self::Session<'_>> {
        trace!("beginning PC/SC transaction");

        let transaction = self
            .transaction()
            .map_err(|error| TransportError::Exchange(error.to_string()))?;

        Ok(PcscSession(transaction))
    }
}
