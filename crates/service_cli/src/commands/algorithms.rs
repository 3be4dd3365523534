//! Algorithms command implementation
//!
//! Lists every registered strategy with its convergence property.

use std::io::Write;

use multgen_core::catalog_help;

use crate::Result;

/// Run the algorithms command
pub fn run<W: Write>(mut output: W) -> Result<()> {
    output.write_all(catalog_help().as_bytes())?;
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use multgen_core::Strategy;

    #[test]
    fn test_lists_every_strategy() {
        let mut out = Vec::new();
        run(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        for strategy in Strategy::ALL {
            assert!(text.contains(strategy.name()), "missing {}", strategy);
        }
        assert!(text.contains("(default)"));
    }
}
