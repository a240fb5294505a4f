use std::sync::Arc;

use catalog_cli::{load_settings, run, AssumeYes, Cli, Command, ReqwestTransport, StackNavigator, StdinDialog};
use catalog_core::{ConfirmDialog, ProductApi};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings(&cli.config)?;
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
    debug!(base_url = %settings.base_url, "settings loaded");

    let api = Arc::new(ProductApi::new(&settings.base_url, ReqwestTransport::new()));
    let navigator = Arc::new(StackNavigator::new(cli.command.entry_stack()));
    let dialog: &dyn ConfirmDialog = match cli.command {
        Command::Delete { yes: true, .. } => &AssumeYes,
        _ => &StdinDialog,
    };

    let output = run(cli.command, api, navigator.clone(), dialog).await?;
    println!("{output}");
    debug!(screen = ?navigator.current(), "done");
    Ok(())
}
