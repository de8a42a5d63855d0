use std::io::Result;
use std::net::{Ipv4Addr, SocketAddrV4};

use socket2::*;

/// Attempt one blocking TCP connect to `addr:port`.
///
/// There is no timeout beyond the operating system's own connect timeout.
/// Every failure, including failing to open the socket, is reported as
/// `false`. The socket is closed before returning either way.
pub fn probe(addr: Ipv4Addr, port: u16) -> bool {
    match connect(addr, port) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("connect to {addr}:{port} failed: {e}");
            false
        }
    }
}

fn connect(addr: Ipv4Addr, port: u16) -> Result<()> {
    let sock = Socket::new(
        Domain::IPV4,
        Type::STREAM,
        Some(Protocol::TCP)
    )?;

    let target = SockAddr::from(
        SocketAddrV4::new(addr, port)
    );

    sock.connect(&target)
}
