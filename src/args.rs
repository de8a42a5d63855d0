use std::net::Ipv4Addr;

use clap::Parser;
use thiserror::Error;

use crate::addr::parse_addr;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// `<ip-from> [<ip-to>] <port>`
    #[arg(value_name = "TARGET")]
    pub targets: Vec<String>,
    /// Print diagnostics to stderr. Repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// The positional arguments didn't describe a scan.
///
/// Which argument was wrong is not reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid arguments")]
pub struct InvalidArguments;

/// An inclusive address range and the port to probe on each address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanRange {
    pub start: Ipv4Addr,
    pub end: Ipv4Addr,
    pub port: u16,
}

impl ScanRange {
    /// Build a range from `[ip, port]` (single address) or
    /// `[ip-from, ip-to, port]`.
    pub fn from_positional<S: AsRef<str>>(targets: &[S]) -> Result<Self, InvalidArguments> {
        let (start, end, port) = match targets {
            [ip, port] => {
                let ip = parse_addr(ip.as_ref());
                (ip, ip, port)
            }
            [from, to, port] => (parse_addr(from.as_ref()), parse_addr(to.as_ref()), port),
            _ => return Err(InvalidArguments),
        };

        let port = port.as_ref().parse::<u16>();

        match (start, end, port) {
            (Ok(start), Ok(end), Ok(port)) => Ok(Self { start, end, port }),
            _ => Err(InvalidArguments),
        }
    }
}

impl Arguments {
    pub fn scan_range(&self) -> Result<ScanRange, InvalidArguments> {
        ScanRange::from_positional(&self.targets)
    }

    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
