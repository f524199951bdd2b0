use parking_lot::Mutex;
use tracing::{debug, info};

use crate::{
    block_stream::{self, DataAreaReader},
    capability::CapabilityContainer,
    error::{ProtocolViolation, Type2Error},
    options::TagOptions,
    transport::{Exchange, Transport},
};

use type2_tlv::{Tlv, TlvStream};

type Error = Type2Error;
type Result<T, E = Error> = std::result::Result<T, E>;

/// A Type 2 Tag reachable through one reader
///
/// Every operation holds the reader exclusively from the capability container
/// check to its last block read or write, and re-checks the container because
/// the tag on the reader may have changed since the previous call. Concurrent
/// calls on the same value wait for each other.
#[derive(Debug)]
pub struct Type2Tag<T> {
    transport: Mutex<T>,
    options: TagOptions,
}

impl<T: Transport> Type2Tag<T> {
    pub fn new(transport: T) -> Self {
        Self::with_options(transport, TagOptions::default())
    }

    pub fn with_options(transport: T, options: TagOptions) -> Self {
        Self {
            transport: Mutex::new(transport),
            options,
        }
    }

    pub fn options(&self) -> &TagOptions {
        &self.options
    }

    pub fn into_inner(self) -> T {
        self.transport.into_inner()
    }

    /// Read the NDEF message, empty if the tag holds none yet
    pub fn read_ndef_message(&self) -> Result<Vec<u8>> {
        let mut transport = self.transport.lock();
        let mut session = transport.begin()?;

        let container = CapabilityContainer::read(&mut session, &self.options)?;
        let bytes = DataAreaReader::new(&mut session, &container, &self.options);
        let message = type2_tlv::decode(bytes)?;

        debug!("read NDEF message of {} bytes", message.len());
        Ok(message)
    }

    /// Replace the tag's content with `message`
    ///
    /// Nothing is written when the message does not fit the data area.
    pub fn write_ndef_message(&self, message: &[u8]) -> Result<()> {
        let mut transport = self.transport.lock();
        let mut session = transport.begin()?;

        let container = writable_container(&mut session, &self.options)?;
        let bytes = type2_tlv::encode(message, container.data_area_len())?;
        block_stream::write_data_area(&mut session, &bytes)?;

        info!("wrote NDEF message of {} bytes", message.len());
        Ok(())
    }

    /// Zero the whole data area
    pub fn clear_card(&self) -> Result<()> {
        let mut transport = self.transport.lock();
        let mut session = transport.begin()?;

        let container = writable_container(&mut session, &self.options)?;
        block_stream::clear_data_area(&mut session, &container)?;

        info!("cleared {} byte data area", container.data_area_len());
        Ok(())
    }

    pub fn read_capability_container(&self) -> Result<CapabilityContainer> {
        let mut transport = self.transport.lock();
        let mut session = transport.begin()?;

        CapabilityContainer::read(&mut session, &self.options)
    }

    /// Every TLV in the data area up to and including the terminator
    pub fn read_tlvs(&self) -> Result<Vec<Tlv>> {
        let mut transport = self.transport.lock();
        let mut session = transport.begin()?;

        let container = CapabilityContainer::read(&mut session, &self.options)?;
        let bytes = DataAreaReader::new(&mut session, &container, &self.options);

        TlvStream::new(bytes).collect()
    }
}

fn writable_container(session: &mut impl Exchange, options: &TagOptions) -> Result<CapabilityContainer> {
    let container = CapabilityContainer::read(session, options)?;
    if !container.is_writable() {
        return Err(ProtocolViolation::WriteProtected(container.access_conditions).into());
    }

    Ok(container)
}
