mod error;
mod native;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::{error, info};

use crate::error::{HostError, Result};
use crate::native::{LibraryPaths, NativeLibraries};

#[derive(Parser, Debug)]
#[command(name = "raptor-host")]
#[command(about = "Load the raptor native libraries and call their C exports")]
struct Cli {
    /// Directory holding both shared libraries (defaults to this executable's directory)
    #[arg(long, env = "RAPTOR_LIB_DIR")]
    lib_dir: Option<PathBuf>,

    /// Library name of the export shim, without platform prefix or extension
    #[arg(long, env = "RAPTOR_SHIM_LIB", default_value = "raptor_native")]
    shim: String,

    /// Library name of the companion library, loaded before the shim
    #[arg(long, env = "RAPTOR_COMPANION_LIB", default_value = "raptor_other")]
    companion: String,

    /// First operand for addNumbers, also the input to addOne
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    a: i32,

    /// Second operand for addNumbers
    #[arg(long, default_value_t = 15, allow_negative_numbers = true)]
    b: i32,

    /// Install a log subscriber inside the shim so its diagnostics are printed
    #[arg(long)]
    native_logs: bool,

    /// Skip the JSON report on stdout
    #[arg(long)]
    no_json: bool,
}

/// Everything the host observed, printed as JSON at the end of a run
#[derive(Debug, Serialize)]
struct HostReport {
    shim_version: String,
    add_numbers: Call<(i32, i32), i32>,
    add_one: Call<i32, i32>,
    message_length: usize,
    message: String,
}

#[derive(Debug, Serialize)]
struct Call<I, O> {
    input: I,
    output: O,
}

impl Cli {
    fn library_paths(&self) -> Result<LibraryPaths> {
        let dir = match &self.lib_dir {
            Some(dir) => dir.clone(),
            None => default_lib_dir()?,
        };
        Ok(LibraryPaths::in_dir(&dir, &self.companion, &self.shim))
    }
}

/// Cargo places cdylibs next to the binaries of the same profile
fn default_lib_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| HostError::InvalidArgument(format!("cannot locate executable: {}", e)))?;
    exe.parent().map(PathBuf::from).ok_or_else(|| {
        HostError::InvalidArgument(format!("{} has no parent directory", exe.display()))
    })
}

fn run(cli: &Cli) -> Result<HostReport> {
    let paths = cli.library_paths()?;

    // The companion must be loaded before the shim
    let libs = NativeLibraries::load(&paths)?;
    if cli.native_logs {
        libs.init_native_logging();
    }

    let shim_version = libs.shim_version()?;
    info!("raptor-native version: {}", shim_version);

    let sum = libs.add_numbers(cli.a, cli.b)?;
    info!("Result of addNumbers({}, {}): {}", cli.a, cli.b, sum);

    let incremented = libs.add_one(cli.a)?;
    info!("Result of addOne({}): {}", cli.a, incremented);

    let message_length = libs.message_length()?;
    info!("Result of getMessageLength(): {}", message_length);

    let message = libs.fill_string(message_length + 1)?;
    info!("Result of fillString(): {}", message);

    Ok(HostReport {
        shim_version,
        add_numbers: Call {
            input: (cli.a, cli.b),
            output: sum,
        },
        add_one: Call {
            input: cli.a,
            output: incremented,
        },
        message_length,
        message,
    })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "raptor_host=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let report = match run(&cli) {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if !cli.no_json {
        match serde_json::to_string_pretty(&report).map_err(HostError::from) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
