pub mod info;
pub mod players;
pub mod rules;

use std::net::SocketAddrV4;

use byteorder::{ByteOrder, LittleEndian};

use crate::errors::MalformedResponse;

/// Length of the fixed request envelope: magic + address + port + opcode.
/// The server echoes it verbatim at the front of every response.
pub const ENVELOPE_LEN: usize = 11;

/// Largest answer the reference server sends.
pub const MAX_RESPONSE_LEN: usize = 2048;

const PROTOCOL_MAGIC: &[u8; 4] = b"SAMP";

/// The four response shapes a server can be asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryType {
    /// Common information about the server (`i`).
    Info,
    /// The server rule list (`r`).
    Rules,
    /// Nick and score for every player (`c`).
    PlayerSummary,
    /// Id, nick, score and ping for every player (`d`).
    PlayerDetail,
}

impl QueryType {
    pub fn opcode(self) -> u8 {
        match self {
            QueryType::Info => b'i',
            QueryType::Rules => b'r',
            QueryType::PlayerSummary => b'c',
            QueryType::PlayerDetail => b'd',
        }
    }
}

/// Builds the 11-byte request datagram for one query against `endpoint`.
pub fn encode_request(endpoint: SocketAddrV4, query: QueryType) -> Vec<u8> {
    let mut out = Vec::with_capacity(ENVELOPE_LEN);
    out.extend_from_slice(PROTOCOL_MAGIC);
    out.extend_from_slice(&endpoint.ip().octets());
    out.extend_from_slice(&endpoint.port().to_le_bytes());
    out.push(query.opcode());
    out
}

/// Drops the echoed request envelope from the front of a response.
pub fn strip_envelope(response: &[u8]) -> Result<&[u8], MalformedResponse> {
    if response.len() < ENVELOPE_LEN {
        return Err(MalformedResponse::TruncatedEnvelope);
    }
    Ok(&response[ENVELOPE_LEN..])
}

/// Bounded cursor over a response body.
///
/// Every read checks the remaining length first, so a lying length prefix
/// fails with [`MalformedResponse::UnexpectedEof`] instead of running past
/// the buffer. Integers are little-endian on the wire.
pub(crate) struct PacketReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> PacketReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        PacketReader { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], MalformedResponse> {
        if len > self.remaining() {
            return Err(MalformedResponse::UnexpectedEof {
                needed: len,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, MalformedResponse> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_bool(&mut self) -> Result<bool, MalformedResponse> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> Result<u16, MalformedResponse> {
        Ok(LittleEndian::read_u16(self.read_bytes(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32, MalformedResponse> {
        Ok(LittleEndian::read_u32(self.read_bytes(4)?))
    }
}
