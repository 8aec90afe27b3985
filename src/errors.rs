use std::io;

use thiserror::Error;

/// Anything that can go wrong while talking to a server.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid server address {0:?}, expected an IPv4 literal")]
    AddressParse(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    MalformedResponse(#[from] MalformedResponse),

    #[error("session is closed")]
    SessionClosed,
}

/// Send/receive failure on the socket. Surfaced to the caller as-is, the
/// library never retries on its own.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("timed out waiting for the server")]
    TimedOut,

    #[error("server unreachable: {0}")]
    Unreachable(io::Error),

    #[error("i/o error: {0}")]
    Io(io::Error),
}

impl From<io::Error> for TransportError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            // a socket with a read timeout reports WouldBlock on unix and
            // TimedOut on windows
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => TransportError::TimedOut,
            // ICMP port unreachable comes back as a refused connection on a
            // connected UDP socket
            io::ErrorKind::ConnectionRefused | io::ErrorKind::ConnectionReset => {
                TransportError::Unreachable(err)
            }
            _ => TransportError::Io(err),
        }
    }
}

/// A response that does not follow the wire format.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedResponse {
    #[error("response is shorter than the 11-byte envelope")]
    TruncatedEnvelope,

    #[error("declared length needs {needed} more bytes but only {remaining} remain")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("rule {0:?} appears twice in one response")]
    DuplicateRule(String),
}
