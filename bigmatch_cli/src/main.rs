//! Bigraph matcher CLI
//!
//! Reads `<pattern> <target> [all|equal|count]` requests from standard input
//! and answers each with BigraphER occurrence blocks, a count, or an
//! equality verdict, followed by a line `X`.

#[global_allocator]
/// Global allocator using jemalloc.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;
mod driver;
mod graph_file;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use args::Args;

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| -> Box<dyn std::error::Error> { e })?;

    let args = Args::parse();
    info!(?args, "Waiting for requests");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    match driver::run(stdin.lock(), &mut stdout, &args) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
