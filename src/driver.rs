//! Scan driver.
//!
//! Opens the input, pulls tokens from the lexer one at a time and streams
//! their records into the result file. On any failure the result file is
//! removed, whether it is partial output from this run or was left by an
//! earlier one.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use thiserror::Error as ThisError;
use tracing::{debug, info, warn};

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::Lexer,
    Position,
};

/// Input file used when none is given on the command line.
pub const DEFAULT_INPUT: &str = "front.in";
/// Result file used when none is given on the command line.
pub const DEFAULT_OUTPUT: &str = "front.out";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Also echo every record to stdout.
    pub print: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            print: false,
        }
    }
}

#[derive(ThisError, Debug)]
pub enum DriverError {
    /// The input could not be opened.
    #[error(transparent)]
    Input(Error),
    /// A lexical error, together with the bytes that were scanned so the
    /// diagnostic can be drawn against exactly that text.
    #[error("{error}")]
    Scan {
        #[source]
        error: Error,
        input: Vec<u8>,
    },
    #[error("failed to write {}: {source}", path.display())]
    Output { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, DriverError>;

fn output_error(path: &Path) -> impl FnOnce(io::Error) -> DriverError + '_ {
    move |source| DriverError::Output {
        path: path.to_path_buf(),
        source,
    }
}

/// Reads the whole input. A missing or unreadable file becomes an
/// `InputNotFound` error, reported before any scanning starts.
pub fn read_input(path: &Path) -> std::result::Result<Vec<u8>, Error> {
    fs::read(path).map_err(|err| {
        Error::new(
            ErrorImpl::InputNotFound {
                path: path.display().to_string(),
                reason: err.to_string(),
            },
            Position::null(),
        )
    })
}

/// Runs one scan and returns the number of records written.
pub fn run(config: &DriverConfig) -> Result<usize> {
    let source = match read_input(&config.input) {
        Ok(source) => source,
        Err(error) => {
            remove_output(&config.output);
            return Err(DriverError::Input(error));
        }
    };
    debug!(input = %config.input.display(), bytes = source.len(), "read input");

    let file = File::create(&config.output).map_err(output_error(&config.output))?;

    match write_records(&source, config, BufWriter::new(file)) {
        Ok(count) => {
            info!(records = count, output = %config.output.display(), "scan complete");
            Ok(count)
        }
        Err(err) => {
            remove_output(&config.output);
            Err(err)
        }
    }
}

fn write_records<W: Write>(
    source: &[u8],
    config: &DriverConfig,
    mut writer: W,
) -> Result<usize> {
    let lexer = Lexer::new(source, Some(config.input.display().to_string()));
    let stdout = io::stdout();
    let mut count = 0;

    for token in lexer {
        let token = token.map_err(|error| DriverError::Scan {
            error,
            input: source.to_vec(),
        })?;
        let Some(mut record) = token.record() else {
            continue;
        };
        record.push(b'\n');

        writer.write_all(&record).map_err(output_error(&config.output))?;
        if config.print {
            stdout
                .lock()
                .write_all(&record)
                .map_err(output_error(Path::new("<stdout>")))?;
        }
        count += 1;
    }

    writer.flush().map_err(output_error(&config.output))?;
    Ok(count)
}

fn remove_output(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!(output = %path.display(), "removed output"),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => warn!(output = %path.display(), error = %err, "failed to remove output"),
    }
}
