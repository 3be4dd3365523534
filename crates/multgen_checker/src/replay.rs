//! Replays an external multiplier stream through the simulator.
//!
//! The stream carries one decimal multiplier per line. The first malformed
//! line aborts the replay and the partial totals are dropped.

use std::io::BufRead;

use tracing::debug;

use crate::error::ReplayError;
use crate::simulation::{PayoutSimulator, SimulationConfig, SimulationReport};

/// Plays every multiplier read from `reader` and returns the final report.
///
/// Surrounding whitespace is ignored; blank lines, non-numeric text and
/// non-finite values are malformed.
///
/// # Errors
///
/// - `ReplayError::Simulation` if `config` is invalid
/// - `ReplayError::Io` if reading fails
/// - `ReplayError::Malformed` naming the first bad line
/// - `ReplayError::Empty` if the stream holds no lines
///
/// # Examples
///
/// ```rust
/// use multgen_checker::{replay, SimulationConfig};
///
/// let config = SimulationConfig::builder().stakes(2.0, 2.0).build().unwrap();
/// let report = replay("3\n1\n".as_bytes(), config).unwrap();
///
/// assert_eq!(report.rounds(), 2);
/// assert_eq!(report.rtps(), vec![0.5]);
/// ```
pub fn replay<R: BufRead>(
    reader: R,
    config: SimulationConfig,
) -> Result<SimulationReport, ReplayError> {
    let mut simulator = PayoutSimulator::new(config)?;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_multiplier(&line) {
            Some(multiplier) => simulator.observe(multiplier),
            None => {
                return Err(ReplayError::Malformed {
                    line: index + 1,
                    text: line,
                })
            }
        }
    }

    if simulator.rounds() == 0 {
        return Err(ReplayError::Empty);
    }

    debug!(rounds = simulator.rounds(), "replay finished");
    Ok(simulator.finish())
}

#[inline]
fn parse_multiplier(line: &str) -> Option<f64> {
    line.trim()
        .parse::<f64>()
        .ok()
        .filter(|multiplier| multiplier.is_finite())
}
