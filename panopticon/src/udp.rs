//! Transport layer for VISCA-over-IP camera control.
//!
//! This typically operates over UDP port 52381
//! ([DEFAULT_PORT][panopticon_protocol::DEFAULT_PORT]). Each message is one
//! datagram; fragmentation and reassembly are not handled.

use crate::{Error, Result};
use panopticon_protocol::ViscaPacket;
use std::{
    net::{Ipv4Addr, SocketAddrV4},
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{
    net::{ToSocketAddrs, UdpSocket},
    time::timeout,
};

/// Receive buffer length. Replies are never decoded, so this only needs to
/// cover the largest datagram a camera sends back.
const RECV_BUFFER_LENGTH: usize = 64;

/// One UDP socket bound for communication with a single camera.
///
/// Any number of [`send`][Self::send] calls may run concurrently, but at
/// most one [`recv_one`][Self::recv_one] may be outstanding at a time.
/// That is a caller contract, not something the channel enforces with
/// locking; the connection lifecycle is the only receiver.
pub struct ViscaUdpChannel {
    sock: Mutex<Option<Arc<UdpSocket>>>,
}

impl ViscaUdpChannel {
    pub fn new() -> Self {
        Self {
            sock: Mutex::new(None),
        }
    }

    /// Binds a fresh socket and connects it to `addr`, closing any
    /// previous socket first.
    pub async fn open<A: ToSocketAddrs>(&self, addr: A) -> Result {
        self.close();
        let sock = UdpSocket::bind(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0))
            .await
            .map_err(Error::Transport)?;
        sock.connect(addr).await.map_err(Error::Transport)?;
        *self.sock.lock().expect("socket lock poisoned") = Some(Arc::new(sock));
        Ok(())
    }

    fn socket(&self) -> Result<Arc<UdpSocket>> {
        self.sock
            .lock()
            .expect("socket lock poisoned")
            .clone()
            .ok_or(Error::ChannelUnavailable)
    }

    /// Sends one packet as a single datagram.
    pub async fn send(&self, packet: &ViscaPacket) -> Result {
        let sock = self.socket()?;
        let out = packet.to_bytes()?;
        sock.send(&out).await.map_err(Error::Send)?;
        Ok(())
    }

    /// Waits for a single inbound datagram and returns its length, or
    /// [Error::ResponseTimeout] if none arrives within `deadline`. The
    /// content is not interpreted.
    ///
    /// Dropping the returned future releases the receive slot; there is
    /// nothing further to deregister on either exit path.
    pub async fn recv_one(&self, deadline: Duration) -> Result<usize> {
        let sock = self.socket()?;
        let mut b = [0u8; RECV_BUFFER_LENGTH];
        let l = timeout(deadline, sock.recv(&mut b))
            .await
            .map_err(|_| Error::ResponseTimeout)?
            .map_err(Error::Transport)?;
        trace!("<<< {}", hex::encode(&b[..l]));
        Ok(l)
    }

    /// Releases the socket if present. Safe to call when already closed.
    pub fn close(&self) {
        self.sock.lock().expect("socket lock poisoned").take();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use panopticon_protocol::command::{Command, PanTiltHome};

    #[tokio::test]
    async fn closed_channel_is_unavailable() {
        let channel = ViscaUdpChannel::new();
        let pkt = ViscaPacket::command(1, PanTiltHome.to_payload());
        assert!(matches!(
            channel.send(&pkt).await,
            Err(Error::ChannelUnavailable)
        ));
        assert!(matches!(
            channel.recv_one(Duration::from_secs(1)).await,
            Err(Error::ChannelUnavailable)
        ));
        // Closing an already-closed channel is a no-op.
        channel.close();
        channel.close();
    }

    #[tokio::test]
    async fn open_send_close() {
        let remote = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = remote.local_addr().unwrap();

        let channel = ViscaUdpChannel::new();
        channel.open(addr).await.unwrap();
        // Reopening replaces the socket rather than leaking it.
        channel.open(addr).await.unwrap();

        let pkt = ViscaPacket::command(1, PanTiltHome.to_payload());
        channel.send(&pkt).await.unwrap();

        let mut b = [0u8; 64];
        let (l, _) = remote.recv_from(&mut b).await.unwrap();
        assert_eq!(pkt.to_bytes().unwrap(), b[..l]);

        channel.close();
        assert!(matches!(
            channel.send(&pkt).await,
            Err(Error::ChannelUnavailable)
        ));
    }

    #[tokio::test]
    async fn recv_times_out_when_nothing_answers() {
        let remote = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let channel = ViscaUdpChannel::new();
        channel.open(remote.local_addr().unwrap()).await.unwrap();
        assert!(matches!(
            channel.recv_one(Duration::from_millis(50)).await,
            Err(Error::ResponseTimeout)
        ));
    }
}
