//! Purpose: `pyside2-config` CLI entry point.
//! Role: Binary crate root; parses flags, resolves facets, prints results.
//! Invariants: Facet output is one line per facet on stdout, in the flag-table
//! order when several are requested.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `core::error::to_exit_code`.
use std::io::{self, IsTerminal};

use clap::{Parser, error::ErrorKind as ClapErrorKind};
use serde_json::json;
use tracing_subscriber::EnvFilter;

mod command_dispatch;

use pyside2_config::core::config::ResolverConfig;
use pyside2_config::core::error::{Error, ErrorKind, to_exit_code};
use pyside2_config::core::probe::SystemProbe;

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<i32, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                return Ok(0);
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Run `pyside2-config --help` for the facet list."));
            }
        },
    };

    let config = ResolverConfig::from_host();
    command_dispatch::run_facets(&cli, &config, &SystemProbe)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn clap_error_summary(err: &clap::Error) -> String {
    err.to_string()
        .lines()
        .next()
        .unwrap_or("invalid arguments")
        .trim_start_matches("error: ")
        .to_string()
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("error: {err}");
        if let Some(hint) = err.hint() {
            eprintln!("hint: {hint}");
        }
        return;
    }

    let value = json!({
        "error": {
            "kind": format!("{:?}", err.kind()),
            "message": err.to_string(),
            "hint": err.hint(),
        }
    });
    eprintln!("{value}");
}

#[derive(Parser)]
#[command(
    name = "pyside2-config",
    version,
    about = "Determine include/link options of PySide2 and Python for qmake",
    after_help = r#"EXAMPLES
  $ pyside2-config --pyside2-include
  $ pyside2-config -a > pyside2.pri

ENVIRONMENT
  LLVM_INSTALL_DIR / CLANG_INSTALL_DIR  Toolchain prefix (checked in that
                                        order before `llvm-config --prefix`)
  PYSIDE2_CONFIG_PYTHON                 Interpreter executable override
  PYSIDE2_CONFIG_SEARCH_PATH            Module search path override"#
)]
pub struct Cli {
    /// Print Python include path
    #[arg(long)]
    python_include: bool,

    /// Print Python link flags
    #[arg(long)]
    python_link: bool,

    /// Print PySide2 location
    #[arg(long)]
    pyside2: bool,

    /// Print PySide2 include paths
    #[arg(long)]
    pyside2_include: bool,

    /// Print PySide2 link flags
    #[arg(long)]
    pyside2_link: bool,

    /// Print paths of PySide2 shared libraries (.so's, .dylib's, .dll's)
    #[arg(long)]
    pyside2_shared_libraries: bool,

    /// Print path to the clang bin directory
    #[arg(long)]
    clang_bin_dir: bool,

    /// Print all facets (the default when no facet flag is given)
    #[arg(short = 'a', long = "all")]
    all: bool,

    /// Emit the selected facets as a single JSON object
    #[arg(long)]
    json: bool,
}
