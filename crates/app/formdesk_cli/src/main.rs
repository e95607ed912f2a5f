// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::{Cli, Commands};
use formdesk_api_client::ClientConfig;
use formdesk_core::catalog::new_form;

mod cli;
mod commands;
mod logging;
mod output;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    let _logger = match logging::init(args.verbose) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(args).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Cli) -> Result<()> {
    let ctx = commands::Context {
        config: client_config(&args),
        format: args.format,
    };

    match &args.command {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Commands::FieldTypes { name } => commands::field_types::handle(name.as_deref(), &ctx)?,
        Commands::FormId { title } => {
            println!("{}", new_form(title, "")?.form_id);
        }
        Commands::Forms { action } => commands::forms::handle(action, &ctx).await?,
        Commands::Steps { action } => commands::steps::handle(action, &ctx).await?,
        Commands::Leads { action } => commands::leads::handle(action, &ctx)?,
    }

    Ok(())
}

/// Environment (and `.env`) first, then command-line overrides.
fn client_config(args: &Cli) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(url) = &args.api_url {
        config.base_url = url.clone();
    }
    if let Some(token) = &args.token {
        config.token = Some(token.clone());
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout = std::time::Duration::from_secs(secs);
    }
    config
}
