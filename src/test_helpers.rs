//! In-memory tag and exchange doubles for tests

use std::collections::VecDeque;

use crate::{
    BYTES_PER_BLOCK, DATA_AREA_START_BLOCK,
    apdu::{CLA, INS_READ_BINARY, INS_UPDATE_BINARY},
    transport::{Exchange, Response, StatusWord, Transport, TransportError},
};

type Result<T, E = TransportError> = std::result::Result<T, E>;

/// Wrong parameters P1-P2, what readers answer for an address past the end
const OUT_OF_RANGE: StatusWord = StatusWord(0x6A, 0x82);

/// A Type 2 tag on a reader, answering READ BINARY and UPDATE BINARY from memory
#[derive(Debug, Clone)]
pub struct MockTag {
    /// Whole tag memory, block 0 on
    pub memory: Vec<u8>,

    /// Every command received, in order
    pub sent: Vec<Vec<u8>>,

    pub begins: usize,
    pub ends: usize,
    in_scope: bool,

    /// Fail the n-th exchange (1 based, counted over the tag's lifetime) with a status
    fail_at: Option<(usize, StatusWord)>,

    /// Card leaves the field after this many exchanges
    removed_after: Option<usize>,
}

impl MockTag {
    pub fn with_capability_container(cc: [u8; 4]) -> Self {
        let data_area_len = cc[2] as usize * 8;
        let mut memory = vec![0u8; DATA_AREA_START_BLOCK as usize * BYTES_PER_BLOCK + data_area_len];

        // serial number and lock bytes, never read by the protocol
        memory[..4].copy_from_slice(&[0x04, 0x5A, 0x21, 0xF7]);
        memory[12..16].copy_from_slice(&cc);

        Self {
            memory,
            sent: Vec::new(),
            begins: 0,
            ends: 0,
            in_scope: false,
            fail_at: None,
            removed_after: None,
        }
    }

    /// 144 byte data area, freshly formatted with an empty NDEF message
    pub fn ntag213() -> Self {
        let mut tag = Self::with_capability_container([0xE1, 0x10, 0x12, 0x00]);
        tag.data_area_mut()[..4].copy_from_slice(&[0x03, 0x00, 0xFE, 0x00]);
        tag
    }

    /// 872 byte data area
    pub fn ntag216() -> Self {
        let mut tag = Self::with_capability_container([0xE1, 0x10, 0x6D, 0x00]);
        tag.data_area_mut()[..4].copy_from_slice(&[0x03, 0x00, 0xFE, 0x00]);
        tag
    }

    pub fn data_area(&self) -> &[u8] {
        &self.memory[DATA_AREA_START_BLOCK as usize * BYTES_PER_BLOCK..]
    }

    pub fn data_area_mut(&mut self) -> &mut [u8] {
        &mut self.memory[DATA_AREA_START_BLOCK as usize * BYTES_PER_BLOCK..]
    }

    pub fn fill_data_area(&mut self, f: impl Fn(usize) -> u8) {
        for (i, byte) in self.data_area_mut().iter_mut().enumerate() {
            *byte = f(i);
        }
    }

    /// Put raw TLV bytes at the start of the data area
    pub fn load_data_area(&mut self, bytes: &[u8]) {
        self.data_area_mut()[..bytes.len()].copy_from_slice(bytes);
    }

    pub fn fail_exchange(&mut self, nth: usize, status: StatusWord) {
        self.fail_at = Some((nth, status));
    }

    pub fn remove_after(&mut self, exchanges: usize) {
        self.removed_after = Some(exchanges);
    }

    pub fn writes(&self) -> Vec<(u16, [u8; BYTES_PER_BLOCK])> {
        write_commands(&self.sent)
    }

    fn respond(&mut self, command: &[u8]) -> Result<Response> {
        self.sent.push(command.to_vec());
        let count = self.sent.len();

        if self.removed_after.is_some_and(|after| count > after) {
            return Err(TransportError::Exchange("card removed".to_string()));
        }

        if let Some((nth, status)) = self.fail_at {
            if nth == count {
                return Ok(Response::new(Vec::new(), status));
            }
        }

        match command {
            [CLA, INS_READ_BINARY, p1, p2, le] => {
                let start = u16::from_be_bytes([*p1, *p2]) as usize * BYTES_PER_BLOCK;
                let end = start + *le as usize;

                match self.memory.get(start..end) {
                    Some(data) => Ok(Response::new(data.to_vec(), StatusWord::SUCCESS)),
                    None => Ok(Response::new(Vec::new(), OUT_OF_RANGE)),
                }
            }

            [CLA, INS_UPDATE_BINARY, p1, p2, 0x04, data @ ..] if data.len() == BYTES_PER_BLOCK => {
                let start = u16::from_be_bytes([*p1, *p2]) as usize * BYTES_PER_BLOCK;

                match self.memory.get_mut(start..start + BYTES_PER_BLOCK) {
                    Some(block) => {
                        block.copy_from_slice(data);
                        Ok(Response::new(Vec::new(), StatusWord::SUCCESS))
                    }
                    None => Ok(Response::new(Vec::new(), OUT_OF_RANGE)),
                }
            }

            _ => Ok(Response::new(Vec::new(), StatusWord(0x6D, 0x00))),
        }
    }
}

#[derive(Debug)]
pub struct MockSession<'a> {
    tag: &'a mut MockTag,
}

impl Exchange for MockSession<'_> {
    fn exchange(&mut self, command: &[u8]) -> Result<Response> {
        assert!(self.tag.in_scope, "exchange outside of an exclusive scope");
        self.tag.respond(command)
    }
}

impl Drop for MockSession<'_> {
    fn drop(&mut self) {
        self.tag.in_scope = false;
        self.tag.ends += 1;
    }
}

impl Transport for MockTag {
    type Session<'a> = MockSession<'a>;

    fn begin(&mut self) -> Result<Self::Session<'_>> {
        assert!(!self.in_scope, "nested exclusive scope");
        self.in_scope = true;
        self.begins += 1;

        Ok(MockSession { tag: self })
    }
}

/// Replays canned responses in order and records what was sent
#[derive(Debug, Default)]
pub struct ScriptedExchange {
    responses: VecDeque<Response>,
    pub sent: Vec<Vec<u8>>,
}

impl ScriptedExchange {
    pub fn new(responses: impl IntoIterator<Item = Response>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
            sent: Vec::new(),
        }
    }
}

impl Exchange for ScriptedExchange {
    fn exchange(&mut self, command: &[u8]) -> Result<Response> {
        self.sent.push(command.to_vec());
        self.responses
            .pop_front()
            .ok_or_else(|| TransportError::Exchange("no more scripted responses".to_string()))
    }
}

/// (block, length) of every READ BINARY sent
pub fn read_commands(sent: &[Vec<u8>]) -> Vec<(u16, u8)> {
    sent.iter()
        .filter_map(|command| match command.as_slice() {
            [CLA, INS_READ_BINARY, p1, p2, le] => Some((u16::from_be_bytes([*p1, *p2]), *le)),
            _ => None,
        })
        .collect()
}

/// (block, data) of every UPDATE BINARY sent
pub fn write_commands(sent: &[Vec<u8>]) -> Vec<(u16, [u8; BYTES_PER_BLOCK])> {
    sent.iter()
        .filter_map(|command| match command.as_slice() {
            [CLA, INS_UPDATE_BINARY, p1, p2, 0x04, a, b, c, d] => {
                Some((u16::from_be_bytes([*p1, *p2]), [*a, *b, *c, *d]))
            }
            _ => None,
        })
        .collect()
}
