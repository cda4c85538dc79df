//! EVENTR terminal client
//!
//! Main application entry point

use std::process::ExitCode;
use anyhow::Context;
use clap::Parser;
use tracing::{debug, error, info};

use eventr::{
    cli::{self, Cli, Commands},
    config::Settings,
    handlers::public,
    utils::logging,
    AppContext, Page,
};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let mut settings = Settings::from_file(&cli.config).context("Failed to load configuration")?;
    cli.apply_overrides(&mut settings);
    settings.validate()?;

    // Initialize logging
    let _guard = logging::init_logging(&settings.logging)?;
    info!(version = eventr::VERSION, api = %settings.api.base_url, "Starting {}", eventr::info());

    let ctx = AppContext::new(settings)?;
    let command = cli.command.unwrap_or(Commands::Open { path: "/".to_string() });
    debug!(command = ?command, "Dispatching command");

    // Anything a handler did not turn into a toast replaces the whole screen
    let (page, code) = match cli::dispatch(&ctx, command).await {
        Ok(page) => {
            let code = match &page.toast {
                Some(toast) if toast.is_error() => ExitCode::FAILURE,
                _ => ExitCode::SUCCESS,
            };
            (page, code)
        }
        Err(e) => {
            error!(error = %e, severity = ?e.severity(), "Unhandled error");
            (Page::failure(), ExitCode::FAILURE)
        }
    };

    let session = ctx.session().unwrap_or_default();
    println!("{}\n", public::nav_bar(&session));
    print!("{}", page);

    Ok(code)
}
