//! Command-line console for the global settings section
//!
//! Lists and edits global settings, LDAP servers and hypervisor capabilities of a
//! management server. Output goes to stdout, logs and prompts to stderr.

mod commands;
mod config;
mod confirm;
mod render;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use commands::{Command, Console};
use config::{ConsoleConfig, Overrides};
use cosmic_settings_api::{HttpInvoker, ManagementClient};
use cosmic_settings_core::{
    localizer_for, Localizer, PanelService, SectionRegistry, ServiceContext,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "cosmic-settings", version, about = "Global settings console", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file (default: <config_dir>/cosmic-settings/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Management API endpoint
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Session key sent with every request
    #[arg(long, global = true)]
    session_key: Option<String>,

    /// Rows per page
    #[arg(long, global = true)]
    page_size: Option<u32>,

    /// Display language
    #[arg(long, global = true)]
    language: Option<String>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            endpoint: self.endpoint.clone(),
            session_key: self.session_key.clone(),
            page_size: self.page_size,
            language: self.language.clone(),
        }
    }
}

fn build_client(config: &ConsoleConfig) -> Result<ManagementClient> {
    let mut builder = HttpInvoker::builder(config.endpoint()?)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .request_timeout(Duration::from_secs(config.request_timeout_secs));
    if let Some(key) = &config.session_key {
        builder = builder.session_key(key.clone());
    }
    Ok(ManagementClient::new(Arc::new(builder.build()?)))
}

async fn run(cli: Cli) -> Result<String> {
    let config = ConsoleConfig::resolve(cli.config.as_deref(), &cli.overrides())?;
    tracing::debug!("Using {config:?}");

    let l10n: Arc<dyn Localizer> = Arc::from(localizer_for(&config.language));
    let client = build_client(&config)?;
    let registry = Arc::new(SectionRegistry::standard(&client)?);
    let ctx = Arc::new(ServiceContext::new(registry, config.page_size));
    let console = Console::new(PanelService::new(ctx), l10n);

    console.execute(cli.command).await
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr, stdout carries command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(output) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(output.as_bytes()) {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
