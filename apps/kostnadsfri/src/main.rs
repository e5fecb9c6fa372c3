mod cli;
mod config;
mod credentials;
mod errors;
mod generator;
mod links;
mod page_api;
mod routes;
mod state;

use std::io::{self, Write};
use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Command};
use crate::config::{Config, ConfigError};
use crate::generator::{Delivery, PasswordSource};
use crate::links::LinkTargets;
use crate::page_api::PageApiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();
    let command = cli.command.take();
    let config = Config::from_env();

    // Logs go to stderr; stdout is reserved for generated links.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let links = LinkTargets::from_config(&config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Some(Command::Generate {
            company_name,
            details,
            output,
        }) => {
            let passwords =
                PasswordSource::resolve(&cli.password_args(output.password), &config)?;
            let client = page_client(&config, &links, output.dry_run)?;

            generator::run_generate(
                &mut out,
                &company_name,
                details.into_details(),
                output.expires_in_days,
                &passwords,
                &links,
                delivery(client.as_ref()),
            )
            .await?;
        }
        Some(Command::Batch { path, output }) => {
            let passwords =
                PasswordSource::resolve(&cli.password_args(output.password), &config)?;
            let client = page_client(&config, &links, output.dry_run)?;
            let file = std::fs::File::open(&path)
                .with_context(|| format!("Failed to open batch file {}", path.display()))?;

            generator::run_batch(
                file,
                &mut out,
                output.expires_in_days,
                &passwords,
                &links,
                delivery(client.as_ref()),
            )
            .await?;
        }
        Some(Command::Verify) => {
            let seed = config.resolve_seed(cli.seed.as_deref(), cli.insecure_test_seed)?;
            generator::run_verify(&mut out, &seed, &links, config.fixed_password.is_some())?;
        }
        Some(Command::Interactive { password }) => {
            interactive_session(&cli, password, &config, &links, &mut out).await?;
        }
        None => interactive_session(&cli, None, &config, &links, &mut out).await?,
        Some(Command::Serve) => serve(&cli, &config, links).await?,
    }

    out.flush()?;
    Ok(())
}

/// The API client is only built (and the API key only required) when pages
/// are actually created.
fn page_client(
    config: &Config,
    links: &LinkTargets,
    dry_run: bool,
) -> Result<Option<PageApiClient>> {
    if dry_run {
        return Ok(None);
    }
    let api_key = config.require_api_key()?;
    let client = PageApiClient::new(links.page_api_url(), api_key.to_string())?;
    Ok(Some(client))
}

fn delivery(client: Option<&PageApiClient>) -> Delivery<'_> {
    match client {
        Some(client) => Delivery::Create(client),
        None => Delivery::DryRun,
    }
}

async fn interactive_session<W: Write>(
    cli: &Cli,
    explicit: Option<String>,
    config: &Config,
    links: &LinkTargets,
    out: &mut W,
) -> Result<()> {
    // A missing seed is asked for at the prompt instead of failing.
    let passwords = match PasswordSource::resolve(&cli.password_args(explicit), config) {
        Ok(passwords) => Some(passwords),
        Err(ConfigError::MissingSeed) => None,
        Err(e) => return Err(e.into()),
    };

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let answered = generator::run_interactive(stdin, out, passwords, links).await?;
    info!("Interactive session ended after {answered} lookup(s)");
    Ok(())
}

async fn serve(cli: &Cli, config: &Config, links: LinkTargets) -> Result<()> {
    let seed = match config.resolve_seed(cli.seed.as_deref(), cli.insecure_test_seed) {
        Ok(seed) => {
            info!("Password seed loaded ({})", seed.masked());
            Some(seed)
        }
        Err(ConfigError::MissingSeed) => {
            tracing::warn!("No password seed configured; password routes will answer 503");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let state = AppState { seed, links };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port()?).parse()?;
    info!("Starting kostnadsfri v{} on {addr}", env!("CARGO_PKG_VERSION"));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
