//! Generate command implementation
//!
//! Writes a sequence of multipliers to stdout, one per line. The sequence
//! length comes from `--count` or, when absent, from the first token on stdin.

use std::io::{BufRead, BufWriter, Write};

use infra_config::SolverSettings;
use multgen_core::{Solve, Solver};
use tracing::{debug, info};

use crate::{CliError, Result};

/// Run the generate command
pub fn run<R: BufRead, W: Write>(
    settings: &SolverSettings,
    count: Option<u64>,
    input: R,
    output: W,
) -> Result<()> {
    let solver = Solver::new(settings.to_solver_config()?)?;
    info!(
        algorithm = %solver.strategy(),
        rtp = solver.config().rtp,
        fell_back = solver.fell_back(),
        "solver ready"
    );

    let count = match count {
        Some(count) => count,
        None => read_count(input)?,
    };

    debug!(count, "generating sequence");
    write_sequence(&solver, count, output)
}

/// Read the sequence length from the first whitespace-separated token
pub fn read_count<R: BufRead>(mut input: R) -> Result<u64> {
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(CliError::InvalidArgument(
                "expected a sequence length on stdin".to_string(),
            ));
        }
        if let Some(token) = line.split_whitespace().next() {
            return token.parse().map_err(|_| {
                CliError::InvalidArgument(format!("invalid sequence length {:?}", token))
            });
        }
    }
}

/// Write `count` draws from `solver`, one per line, through a buffered writer
pub fn write_sequence<S, W>(solver: &S, count: u64, output: W) -> Result<()>
where
    S: Solve + ?Sized,
    W: Write,
{
    let mut writer = BufWriter::new(output);
    for _ in 0..count {
        writeln!(writer, "{}", solver.solve())?;
    }
    writer.flush()?;
    Ok(())
}
