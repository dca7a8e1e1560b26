use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use campus_rms::console::Console;
use campus_rms::logger;
use campus_rms::service::ServiceRegistry;

/// Menu driven campus resource administration tool.
#[derive(Parser)]
#[command(name = "campus-rms", version, about)]
struct Cli {
    /// Directory holding the JSON collection files.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
}

fn main() -> ExitCode {
    logger::init();
    let cli = Cli::parse();

    let registry = match ServiceRegistry::open(&cli.data_dir) {
        Ok(registry) => registry,
        Err(e) => {
            log::error!("Failed to open data directory '{}': {}", cli.data_dir.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let console = Console::new(registry);
    if let Err(e) = console.run() {
        log::error!("Console session aborted: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
