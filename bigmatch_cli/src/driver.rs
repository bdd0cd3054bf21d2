//! The batch loop: one request per input line, one answer block per request.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use bigmatch_subgraph::{VertexMapping, bigraph_equal, render_mapping, solve};
use thiserror::Error;
use tracing::{debug, warn};

use crate::args::Args;
use crate::graph_file::{GraphFileError, load_graph};

/// Line terminating every answer.
pub const END_OF_ANSWER: &str = "X";

/// Errors that end the batch.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    GraphFile(#[from] GraphFileError),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("malformed request on line {line}: '{text}'")]
    MalformedRequest { line: usize, text: String },
}

/// What a request asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Print the first occurrence.
    One,
    /// Print every occurrence.
    All,
    /// Print the number of occurrences.
    Count,
    /// Print whether the two graphs are the same bigraph.
    Equal,
}

impl Mode {
    fn parse(word: Option<&str>) -> Self {
        match word {
            Some("all") => Mode::All,
            Some("count") => Mode::Count,
            Some("equal") => Mode::Equal,
            _ => Mode::One,
        }
    }
}

/// One parsed input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub pattern: PathBuf,
    pub target: PathBuf,
    pub mode: Mode,
}

/// Parse `<pattern> <target> [mode]`. Blank lines yield `None`.
pub fn parse_request(line_no: usize, line: &str) -> Result<Option<Request>, DriverError> {
    let mut words = line.split_whitespace();
    let Some(pattern) = words.next() else {
        return Ok(None);
    };
    let Some(target) = words.next() else {
        return Err(DriverError::MalformedRequest {
            line: line_no,
            text: line.to_owned(),
        });
    };
    Ok(Some(Request {
        pattern: pattern.into(),
        target: target.into(),
        mode: Mode::parse(words.next()),
    }))
}

/// Answer every request read from `input`.
pub fn run<R: BufRead, W: Write>(input: R, output: &mut W, args: &Args) -> Result<(), DriverError> {
    for (i, line) in input.lines().enumerate() {
        let line = line?;
        let Some(request) = parse_request(i + 1, &line)? else {
            continue;
        };
        answer(&request, output, args)?;
        writeln!(output, "{END_OF_ANSWER}")?;
        output.flush()?;
    }
    Ok(())
}

fn answer<W: Write>(request: &Request, output: &mut W, args: &Args) -> Result<(), DriverError> {
    let pattern = load_graph(&request.pattern)?;
    let target = load_graph(&request.target)?;
    let config = args.to_config(request.mode);
    debug!(
        pattern = %request.pattern.display(),
        target = %request.target.display(),
        mode = ?request.mode,
        "Answering request"
    );

    let outcome = match request.mode {
        Mode::One => {
            let outcome = solve(&pattern, &target, &config, None);
            if outcome.found() {
                let block = render_mapping(&pattern, &target, &outcome.mapping, config.link_scheme);
                output.write_all(block.as_bytes())?;
            }
            outcome
        }
        Mode::All => {
            let mut written = Ok(());
            let mut print = |m: &VertexMapping| {
                let block = render_mapping(&pattern, &target, m, config.link_scheme);
                written = output.write_all(block.as_bytes());
                written.is_ok()
            };
            let outcome = solve(&pattern, &target, &config, Some(&mut print));
            written?;
            outcome
        }
        Mode::Count => {
            let outcome = solve(&pattern, &target, &config, None);
            writeln!(output, "{}", outcome.solution_count)?;
            outcome
        }
        Mode::Equal => {
            let (equal, outcome) = bigraph_equal(&pattern, &target, &config);
            writeln!(output, "{equal}")?;
            outcome
        }
    };

    if !outcome.completed {
        warn!(stop = %outcome.stop, "Search did not complete; the answer may be partial");
    }
    Ok(())
}
