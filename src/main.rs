mod addr;
mod args;
mod probe;
mod scan;

use std::io;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;

use crate::args::*;

fn main() -> Result<()> {
    let args = match Arguments::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => return usage(),
    };

    init_logging(&args);

    let Ok(range) = args.scan_range() else {
        return usage();
    };

    scan::scan(&range, probe::probe, io::stdout().lock())?;

    Ok(())
}

/// Bad input isn't treated as a failure: print usage and exit cleanly.
fn usage() -> Result<()> {
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| String::from("psc"));

    println!("Usage: {program} <ip-from> [<ip-to>] <port>");

    Ok(())
}

fn init_logging(args: &Arguments) {
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
