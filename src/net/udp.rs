use std::{
    net::{Ipv4Addr, SocketAddrV4, UdpSocket},
    time::Duration,
};

use tracing::trace;

use crate::errors::TransportError;

/// One connected-mode datagram socket bound to a single remote endpoint.
///
/// The socket is released when the transport is dropped; the owning session
/// drops it on `close()` and on every exit path after that.
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    /// Opens a socket connected to `endpoint`. A zero timeout means no
    /// timeout at all.
    pub fn connect(
        endpoint: SocketAddrV4,
        send_timeout: Duration,
        recv_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
        socket.connect(endpoint)?;
        socket.set_write_timeout(timeout_opt(send_timeout))?;
        socket.set_read_timeout(timeout_opt(recv_timeout))?;
        Ok(UdpTransport { socket })
    }

    /// Transmits one datagram.
    pub fn send(&self, payload: &[u8]) -> Result<(), TransportError> {
        let sent = self.socket.send(payload)?;
        trace!("sent {sent} bytes");
        Ok(())
    }

    /// Blocks until one datagram arrives or the receive timeout elapses.
    pub fn recv(&self, buf: &mut [u8]) -> Result<usize, TransportError> {
        let received = self.socket.recv(buf)?;
        trace!("received {received} bytes");
        Ok(received)
    }
}

fn timeout_opt(timeout: Duration) -> Option<Duration> {
    if timeout.is_zero() { None } else { Some(timeout) }
}
