use std::net::Ipv4Addr;

use thiserror::Error;

/// Returned when a string isn't four dot-separated octets in `0..=255`.
///
/// Deliberately carries no detail about which part was wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid IPv4 address")]
pub struct AddrParseError;

/// Parse a dotted-quad string into an address.
///
/// Unlike `Ipv4Addr::from_str`, each segment is accepted as any decimal
/// integer that fits an octet, so `"010.0.0.1"` is `10.0.0.1`.
pub fn parse_addr(s: &str) -> Result<Ipv4Addr, AddrParseError> {
    let mut octets = [0_u8; 4];
    let mut segments = s.split('.');

    for octet in octets.iter_mut() {
        *octet = segments
            .next()
            .ok_or(AddrParseError)?
            .parse::<u8>()
            .map_err(|_| AddrParseError)?;
    }

    if segments.next().is_some() {
        return Err(AddrParseError);
    }

    Ok(Ipv4Addr::from(octets))
}

/// Step an address forward by one, or `None` once the most significant
/// octet carries out.
///
/// The carry rule is not a plain base-256 rollover: an octet that passes
/// 255 has 255 subtracted, so it lands on 1 rather than 0
/// (`0.0.0.255` -> `0.0.1.1`). Scans rely on this exact sequence.
pub fn next_addr(addr: Ipv4Addr) -> Option<Ipv4Addr> {
    let mut octets = addr.octets();

    for i in (0..4).rev() {
        let mut octet = octets[i] as u16 + 1;
        let carry = octet > 255;

        if carry {
            octet -= 255;
        }

        octets[i] = octet as u8;

        if !carry {
            return Some(Ipv4Addr::from(octets));
        }
    }

    None
}
