//! Glue shared by the command-line tools: argument parsing and exit codes

use std::path::Path;
use std::process;
use clap::error::ErrorKind;
use clap::Parser;
use crate::error::Error;

/// Exit status for malformed arguments
pub const USAGE_EXIT_CODE: i32 = 1;

/// Parse the process arguments, exiting with status 1 on a usage error
///
/// `--help` and `--version` keep clap's own output and status.
pub fn parse_args<P: Parser>() -> P {
    match P::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                process::exit(USAGE_EXIT_CODE);
            }
        },
    }
}

/// Fail with `FileNotFound` unless `path` is an existing file
pub fn require_input(path: &Path) -> Result<(), Error> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::FileNotFound(path.to_path_buf()))
    }
}

/// Exit status for an error coming out of a tool's run function
pub fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<Error>()
        .map(Error::exit_code)
        .unwrap_or(1)
}

/// Print `error` to stderr and exit with its status
pub fn exit_with_error(error: anyhow::Error) -> ! {
    match error.downcast_ref::<Error>() {
        Some(Error::FileNotFound(path)) => {
            eprintln!("Input file \"{}\" does not exist!", path.display());
        }
        _ => eprintln!("Error: {:#}", error),
    }
    process::exit(exit_code(&error))
}
