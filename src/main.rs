use std::{path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use scanc::{
    display_error,
    driver::{run, DriverConfig, DriverError, DEFAULT_INPUT, DEFAULT_OUTPUT},
};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, util::TryInitError, EnvFilter};

/// Scans a source file into one token record per line.
#[derive(Parser, Debug)]
#[command(name = "scanc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scans a source file into token records", long_about = None)]
struct Cli {
    /// Source file to scan
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Where to write the token records
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Also print the records to stdout
    #[arg(long)]
    print: bool,

    /// Enable verbose output
    #[arg(short, long, env = "SCANC_VERBOSE")]
    verbose: bool,

    /// Disable color output
    #[arg(long, env = "SCANC_NO_COLOR")]
    no_color: bool,
}

impl Cli {
    fn driver_config(&self) -> DriverConfig {
        DriverConfig {
            input: self.input.clone(),
            output: self.output.clone(),
            print: self.print,
        }
    }
}

fn init_logging(verbose: bool, no_color: bool) -> Result<(), TryInitError> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(error) = init_logging(cli.verbose, cli.no_color) {
        eprintln!("Error: failed to initialize logging: {}", error);
        return ExitCode::FAILURE;
    }

    let config = cli.driver_config();
    let start = Instant::now();

    match run(&config) {
        Ok(_) => {
            debug!("Tokenized in {:?}", start.elapsed());
            ExitCode::SUCCESS
        }
        Err(DriverError::Scan { error, input }) => {
            eprint!("{}", display_error(&error, &input));
            ExitCode::FAILURE
        }
        Err(DriverError::Input(error)) => {
            eprint!("{}", display_error(&error, b""));
            ExitCode::FAILURE
        }
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["scanc"]);
        assert_eq!(cli.driver_config(), DriverConfig::default());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_init_logging_reports_second_install() {
        let _ = init_logging(false, true);
        assert!(init_logging(false, true).is_err());
    }

    #[test]
    fn test_cli_parse_paths() {
        let cli = Cli::parse_from(["scanc", "prog.src", "-o", "prog.tokens", "--print"]);
        let config = cli.driver_config();
        assert_eq!(config.input, PathBuf::from("prog.src"));
        assert_eq!(config.output, PathBuf::from("prog.tokens"));
        assert!(config.print);
    }
}
