use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use fastreplace::{ReplaceError, Replacement};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "fastreplacestring")]
#[command(
    about = "Replace every occurrence of a literal byte string in a file, in place",
    long_about = None
)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// File to rewrite
    file: PathBuf,

    /// Literal bytes to search for (must not be empty)
    #[arg(allow_hyphen_values = true)]
    search: OsString,

    /// Literal bytes written in place of each occurrence
    #[arg(allow_hyphen_values = true)]
    replace: OsString,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("FASTREPLACE_LOG")
                .or_else(|_| tracing_subscriber::EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse_from(literal_args(std::env::args_os()));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let search = arg_bytes(cli.search)?;
    let replace = arg_bytes(cli.replace)?;

    let outcome = Replacement::new(cli.file, search, replace)?.apply()?;
    tracing::info!("{}", outcome);

    Ok(())
}

/// Put an escape marker in front of the user's arguments so every one of
/// them, including `-h`, `--version` and `--`, is taken as a positional value.
fn literal_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut args = args.into_iter();
    let mut literal: Vec<OsString> = args.next().into_iter().collect();
    literal.push(OsString::from("--"));
    literal.extend(args);
    literal
}

/// Raw bytes of a command-line argument.
#[cfg(unix)]
fn arg_bytes(arg: OsString) -> Result<Vec<u8>, ReplaceError> {
    use std::os::unix::ffi::OsStringExt;

    Ok(arg.into_vec())
}

/// Raw bytes of a command-line argument.
///
/// Outside Unix the OS string has no portable byte form, so it must be valid
/// Unicode.
#[cfg(not(unix))]
fn arg_bytes(arg: OsString) -> Result<Vec<u8>, ReplaceError> {
    arg.into_string().map(String::into_bytes).map_err(|arg| {
        ReplaceError::InvalidArgument(format!("{:?} is not valid Unicode", arg))
    })
}
