use std::io::Write;
use std::net::Ipv4Addr;
use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::{HumanCount, HumanDuration};

use crate::addr::next_addr;
use crate::args::ScanRange;

/// How a scan came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The end address was probed.
    Finished,
    /// The address space ran out before the end address came up.
    Overflowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub probed: u64,
    pub outcome: Outcome,
}

/// Probe every address from `range.start` up to and including `range.end`,
/// writing one line per address to `out`.
///
/// Stops after the end address, or once `next_addr` runs off the top of the
/// address space if the end is never hit.
pub fn scan<P, W>(range: &ScanRange, mut prober: P, mut out: W) -> Result<ScanSummary>
where
    P: FnMut(Ipv4Addr, u16) -> bool,
    W: Write,
{
    let ScanRange { start, end, port } = *range;

    tracing::info!("Scanning {start} to {end} on port {port}");

    let now = Instant::now();
    let mut current = start;
    let mut probed = 0_u64;

    let outcome = loop {
        let available = prober(current, port);
        probed += 1;

        tracing::debug!("{current}:{port} available: {available}");

        report(&mut out, current, port, available)
            .context("Failed to write scan result")?;

        if current == end {
            break Outcome::Finished;
        }

        match next_addr(current) {
            Some(next) => current = next,
            None => break Outcome::Overflowed,
        }
    };

    match outcome {
        Outcome::Finished => tracing::info!(
            "Done! Probed {} addresses (took {})",
            HumanCount(probed),
            HumanDuration(now.elapsed())
        ),
        Outcome::Overflowed => tracing::warn!(
            "Address space exhausted before reaching {end}; probed {} addresses (took {})",
            HumanCount(probed),
            HumanDuration(now.elapsed())
        ),
    }

    Ok(ScanSummary { probed, outcome })
}

// The casing difference between the two labels is part of the output format.
fn report(out: &mut impl Write, addr: Ipv4Addr, port: u16, available: bool) -> std::io::Result<()> {
    let label = if available { "AVAILABLE" } else { "unavailable" };

    writeln!(out, "{label} {addr}:{port}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: [u8; 4], end: [u8; 4], port: u16) -> ScanRange {
        ScanRange {
            start: Ipv4Addr::from(start),
            end: Ipv4Addr::from(end),
            port,
        }
    }

    fn run(range: &ScanRange, prober: impl FnMut(Ipv4Addr, u16) -> bool) -> (ScanSummary, Vec<String>) {
        let mut out = Vec::new();
        let summary = scan(range, prober, &mut out).unwrap();
        let lines = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect();

        (summary, lines)
    }

    #[test]
    fn single_address_prints_one_line() {
        let (summary, lines) = run(&range([10, 0, 0, 1], [10, 0, 0, 1], 8080), |_, _| false);

        assert_eq!(lines, ["unavailable 10.0.0.1:8080"]);
        assert_eq!(summary, ScanSummary { probed: 1, outcome: Outcome::Finished });
    }

    #[test]
    fn range_is_scanned_in_order_and_ends_on_last_address() {
        let mut seen = Vec::new();
        let (summary, lines) = run(&range([10, 0, 0, 1], [10, 0, 0, 3], 80), |addr, port| {
            assert_eq!(port, 80);
            seen.push(addr);
            addr == Ipv4Addr::new(10, 0, 0, 2)
        });

        assert_eq!(
            lines,
            [
                "unavailable 10.0.0.1:80",
                "AVAILABLE 10.0.0.2:80",
                "unavailable 10.0.0.3:80",
            ]
        );
        assert_eq!(seen.len(), 3);
        assert_eq!(summary.outcome, Outcome::Finished);
    }

    #[test]
    fn range_follows_the_carry_rule() {
        let (_, lines) = run(&range([10, 0, 0, 254], [10, 0, 1, 1], 22), |_, _| true);

        assert_eq!(
            lines,
            [
                "AVAILABLE 10.0.0.254:22",
                "AVAILABLE 10.0.0.255:22",
                "AVAILABLE 10.0.1.1:22",
            ]
        );
    }

    #[test]
    fn unreachable_end_stops_on_overflow() {
        let (summary, lines) = run(&range([255, 255, 255, 250], [0, 0, 0, 0], 80), |_, _| false);

        assert_eq!(lines.len(), 6);
        assert_eq!(lines.first().unwrap(), "unavailable 255.255.255.250:80");
        assert_eq!(lines.last().unwrap(), "unavailable 255.255.255.255:80");
        assert_eq!(summary, ScanSummary { probed: 6, outcome: Outcome::Overflowed });
    }

    #[test]
    fn end_skipped_by_carry_stops_on_overflow() {
        // x.x.x.0 is never produced by an increment, so this end is never hit.
        let (summary, lines) = run(&range([255, 255, 254, 254], [255, 255, 255, 0], 1), |_, _| false);

        assert_eq!(summary.outcome, Outcome::Overflowed);
        assert_eq!(lines[2], "unavailable 255.255.255.1:1");
        assert_eq!(lines.last().unwrap(), "unavailable 255.255.255.255:1");
    }

    #[test]
    fn write_failure_is_reported() {
        struct Closed;

        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::ErrorKind::BrokenPipe.into())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let result = scan(&range([10, 0, 0, 1], [10, 0, 0, 9], 80), |_, _| true, Closed);

        assert!(result.is_err());
    }
}
