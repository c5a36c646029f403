use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use modfetch::app::{exit_codes, AppContext};
use modfetch::cli::{commands, Cli};
use modfetch::config::{FileConfig, RunMode, Settings};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> modfetch::app::Result<()> {
    let cli = Cli::parse();
    let file_config = FileConfig::load()?;
    let settings = Settings::new(&cli, &file_config)?;

    if settings.mode == RunMode::Interactive {
        modfetch::tui::ensure_supported()?;
    }

    let ctx = AppContext::new(settings);
    commands::run(&ctx).await
}
