//! Command-line interface definition using clap.
//!
//! ```text
//! senta-bot <config-path>      start the bot
//! senta-bot help|-h|--help     print usage
//! senta-bot version|-v|--version
//! ```

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, Parser};

/// Senta - Telegram bot for managing remote processes
#[derive(Parser, Debug)]
#[command(name = "senta-bot")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Path to the JSON config file, or `help` / `version`
    pub target: Option<String>,

    /// Extra positional arguments are ignored
    #[arg(hide = true)]
    pub rest: Vec<String>,

    /// Print usage
    #[arg(short = 'h', long = "help")]
    pub help: bool,

    /// Print version information
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// More logging (--verbose, --verbose --verbose)
    #[arg(long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Usage,
    Version,
    Run { config: PathBuf, verbose: u8 },
    /// A flag nobody knows, e.g. `-x`.
    UnknownArgument(String),
    /// Any other command line error, already formatted by clap.
    Invalid(String),
}

impl Cli {
    pub fn invocation(self) -> Invocation {
        match self.target.as_deref() {
            _ if self.help => Invocation::Usage,
            _ if self.version => Invocation::Version,
            None | Some("help") => Invocation::Usage,
            Some("version") => Invocation::Version,
            Some(path) => Invocation::Run {
                config: PathBuf::from(path),
                verbose: self.verbose,
            },
        }
    }
}

/// Parse the full argument list, including the binary name.
pub fn parse_args<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args = args.into_iter().map(|a| normalize_single_dash(a.into()));

    match Cli::try_parse_from(args) {
        Ok(cli) => cli.invocation(),
        Err(e) if e.kind() == ErrorKind::UnknownArgument => {
            let arg = match e.get(ContextKind::InvalidArg) {
                Some(ContextValue::String(arg)) => arg.clone(),
                _ => String::from("?"),
            };
            Invocation::UnknownArgument(arg)
        }
        Err(e) => Invocation::Invalid(e.to_string()),
    }
}

/// Accept `-help` and `-version` as aliases of the long flags.
fn normalize_single_dash(arg: OsString) -> OsString {
    match arg.to_str() {
        Some("-help") => OsString::from("--help"),
        Some("-version") => OsString::from("--version"),
        _ => arg,
    }
}

/// Default tracing filter for a verbosity level.
///
/// `senta_bot` is the binary's own target, where startup and fatal errors
/// are logged.
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "senta_bot=info,senta_telegram=info,senta_client=info,senta_core=info,teloxide=warn",
        1 => "senta_bot=debug,senta_telegram=debug,senta_client=debug,senta_core=debug,teloxide=info",
        _ => "senta_bot=trace,senta_telegram=trace,senta_client=trace,senta_core=trace,teloxide=debug",
    }
}
