use anyhow::{bail, Context, Result};
use std::io::BufRead;
use std::path::PathBuf;

/// Where cumulative pulse counts come from.
///
/// Both variants deliver the same quantity: a monotonically non-decreasing
/// running total of pulses since the source's own baseline, sampled once
/// per tick.
#[derive(Debug)]
pub enum CounterSource {
    /// A file whose content is the current running total, re-read every
    /// tick (/proc- or /sys-style counter file).
    File(PathBuf),
    /// One running total per line on standard input, e.g. piped from a
    /// serial-port reader attached to the detector.
    Stdin,
}

impl CounterSource {
    /// "-" selects stdin; anything else is a file path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            CounterSource::Stdin
        } else {
            CounterSource::File(PathBuf::from(arg))
        }
    }

    /// Fetch the next cumulative total. Stdin EOF is an error: the stream
    /// ending means there is nothing left to monitor.
    pub fn read_cumulative(&mut self) -> Result<u64> {
        match self {
            CounterSource::File(path) => {
                let text = std::fs::read_to_string(&*path)
                    .with_context(|| format!("reading counter file {}", path.display()))?;
                parse_count(&text)
            }
            CounterSource::Stdin => {
                let mut line = String::new();
                let n = std::io::stdin().lock().read_line(&mut line)?;
                if n == 0 {
                    bail!("counter stream ended");
                }
                parse_count(&line)
            }
        }
    }
}

/// First whitespace-separated field, parsed as an unsigned integer.
fn parse_count(text: &str) -> Result<u64> {
    let field = text.split_whitespace().next().context("empty counter sample")?;
    field
        .parse::<u64>()
        .with_context(|| format!("invalid counter value {:?}", field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_integer_field() {
        assert_eq!(parse_count("1234\n").unwrap(), 1234);
        assert_eq!(parse_count("  42 extra fields").unwrap(), 42);
    }

    #[test]
    fn rejects_empty_and_non_numeric_samples() {
        assert!(parse_count("").is_err());
        assert!(parse_count("   \n").is_err());
        assert!(parse_count("abc").is_err());
        assert!(parse_count("-5").is_err());
    }

    #[test]
    fn file_source_rereads_current_total() {
        let path = std::env::temp_dir()
            .join(format!("geigermon-test-{}-source.txt", std::process::id()));
        std::fs::write(&path, "100\n").unwrap();

        let mut src = CounterSource::from_arg(path.to_str().unwrap());
        assert_eq!(src.read_cumulative().unwrap(), 100);

        std::fs::write(&path, "250\n").unwrap();
        assert_eq!(src.read_cumulative().unwrap(), 250);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut src = CounterSource::from_arg("/nonexistent/pulse-counter");
        assert!(src.read_cumulative().is_err());
    }

    #[test]
    fn dash_selects_stdin() {
        assert!(matches!(CounterSource::from_arg("-"), CounterSource::Stdin));
        assert!(matches!(CounterSource::from_arg("/tmp/x"), CounterSource::File(_)));
    }
}
