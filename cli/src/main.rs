//! Bulk WAN BFD mode changer
//!
//! Matches WAN interfaces on circuit name and sets their BFD mode to
//! aggressive or non-aggressive, after confirmation.
//!
//! # Usage
//!
//! ```bash
//! cgx-set-wan-bfd --authtokenfile ../mytoken.txt -m "lte" -b non-aggressive
//! cgx-set-wan-bfd -m lte -b non-aggressive --lqm off --bwm off
//! ```
//!
//! Credentials are taken from, in order: `--authtoken`, `--authtokenfile`,
//! `X_AUTH_TOKEN`, `AUTH_TOKEN`, then an interactive login.

use cgx_wan_bfd::auth::{self, TerminalCredentials, TokenSource};
use cgx_wan_bfd::client::{ControllerClient, DEFAULT_CONTROLLER};
use cgx_wan_bfd::commands::{self, BfdUpdate};
use cgx_wan_bfd::config::Config;
use cgx_wan_bfd::model::{BfdMode, Toggle};
use cgx_wan_bfd::output::OutputFormat;
use cgx_wan_bfd::prompt;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cgx-set-wan-bfd")]
#[command(version)]
#[command(about = "Bulk WAN interface BFD mode changer", long_about = None)]
struct Cli {
    /// Auth token to use for controller authentication
    #[arg(long = "authtoken", short = 't', alias = "token", value_name = "TOKEN")]
    auth_token: Option<String>,

    /// File containing the auth token
    #[arg(long = "authtokenfile", short = 'f', value_name = "FILE")]
    auth_token_file: Option<PathBuf>,

    /// Text to match in circuit names (case insensitive)
    #[arg(long = "match", short = 'm', alias = "matchtext", value_name = "TEXT")]
    match_text: String,

    /// New BFD mode
    #[arg(long, short = 'b', alias = "bfd-mode", value_enum)]
    bfd: BfdMode,

    /// Link Quality Monitoring change
    #[arg(long, short = 'l', value_enum, default_value_t = Toggle::NoChange)]
    lqm: Toggle,

    /// Bandwidth Monitoring change
    #[arg(long, short = 'w', value_enum, default_value_t = Toggle::NoChange)]
    bwm: Toggle,

    /// Controller base URL
    #[arg(long, env = "CGX_CONTROLLER")]
    controller: Option<String>,

    /// Also match circuits on hub sites
    #[arg(long)]
    include_hubs: bool,

    /// Format of the match report
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(summary) if summary.has_failures() => std::process::exit(1),
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> cgx_wan_bfd::Result<commands::Summary> {
    let config = Config::load(cli.profile.as_deref())?;

    let controller = cli
        .controller
        .or_else(|| config.controller.clone())
        .unwrap_or_else(|| DEFAULT_CONTROLLER.to_string());
    let token_file = cli.auth_token_file.or_else(|| config.auth_token_file.clone());
    let format = match cli.format {
        Some(format) => format,
        None => config.format()?.unwrap_or_default(),
    };

    let mut client = ControllerClient::new(&controller)?;
    let source = TokenSource::from_env(cli.auth_token.as_deref(), token_file.as_deref());
    let session = auth::authenticate(&mut client, &source, &mut TerminalCredentials).await?;

    let req = BfdUpdate {
        pattern: cli.match_text,
        bfd: cli.bfd,
        lqm: cli.lqm,
        bwm: cli.bwm,
        include_hubs: cli.include_hubs || config.include_hubs.unwrap_or(false),
        format,
    };

    let mut confirm = prompt::for_stdin();
    let result = commands::run(&client, &req, confirm.as_mut(), &mut std::io::stdout()).await;

    if session.interactive {
        println!("Logging out");
        if let Err(e) = client.logout().await {
            tracing::warn!(error = %e, "logout failed");
        }
    }

    result
}
