//! `shoely`: terminal client for a shoe inventory REST service.
//!
//! Built on [ratatui](https://ratatui.rs) on top of `shoely-core`'s
//! [`ProductListController`](shoely_core::ProductListController). The list
//! screen refetches whenever it becomes visible; `a` / `e` open the add and
//! edit forms, `d` deletes after confirmation.
//!
//! Logs are written to a file (default `/tmp/shoely.log`) to avoid
//! corrupting the terminal UI.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod host;
mod screen;
mod screens;
mod theme;
mod tui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use shoely_config::{Config, Profile, profile_to_service_config};
use shoely_core::{HttpProductService, ServiceConfig, TlsVerification};

use crate::app::App;

/// Browse, add, edit and delete shoes in a remote inventory.
#[derive(Parser, Debug)]
#[command(name = "shoely", version, about)]
struct Cli {
    /// Service base URL (e.g., https://example.mockapi.io/api/v1)
    #[arg(short = 'u', long, env = "SHOELY_URL")]
    url: Option<String>,

    /// Config profile to use (defaults to the file's default_profile)
    #[arg(short = 'p', long, env = "SHOELY_PROFILE")]
    profile: Option<String>,

    /// Collection path under the base URL (defaults to "shoes")
    #[arg(short = 'r', long)]
    resource: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Accept invalid TLS certificates
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Save the connection flags as a named profile in the config file
    #[arg(long, value_name = "NAME", requires = "url")]
    save_profile: Option<String>,

    /// Log file path
    #[arg(long, default_value = "/tmp/shoely.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. Logging to stdout/stderr would corrupt the
/// TUI. The returned guard must live until exit so logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "shoely={log_level},shoely_core={log_level},shoely_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("."));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("shoely.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Priority: CLI flags > config profile. Fails when neither names a URL.
fn resolve_service_config(cli: &Cli) -> Result<ServiceConfig> {
    let cfg = shoely_config::load_config().unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable config file");
        Config::default()
    });

    let mut service = if let Some(url) = &cli.url {
        profile_to_service_config(&cli_profile(cli, url), &cfg.defaults)?
    } else {
        let (name, profile) = cfg.profile(cli.profile.as_deref()).wrap_err_with(|| {
            format!(
                "no service URL: pass --url or add a profile to {}",
                shoely_config::config_path().display()
            )
        })?;
        info!(profile = name, "using config profile");
        profile_to_service_config(profile, &cfg.defaults)?
    };

    if let Some(resource) = &cli.resource {
        service.resource = resource.trim_matches('/').to_owned();
    }
    if let Some(secs) = cli.timeout {
        service.timeout = Duration::from_secs(secs);
    }
    if cli.insecure {
        service.tls = TlsVerification::DangerAcceptInvalid;
    }

    Ok(service)
}

/// Profile described by the connection flags alone.
fn cli_profile(cli: &Cli, url: &str) -> Profile {
    let mut profile = Profile::new(url);
    if let Some(resource) = &cli.resource {
        profile.resource.clone_from(resource);
    }
    profile.timeout = cli.timeout;
    profile.insecure = cli.insecure.then_some(true);
    profile
}

/// Write the connection flags to the config file as profile `name`.
fn save_cli_profile(cli: &Cli, name: &str) -> Result<()> {
    let Some(url) = &cli.url else {
        return Ok(());
    };
    let mut cfg = shoely_config::load_config().wrap_err("cannot read the config file")?;
    cfg.set_profile(name, cli_profile(cli, url));
    shoely_config::save_config(&cfg).wrap_err("cannot write the config file")?;
    info!(profile = name, path = %shoely_config::config_path().display(), "saved profile");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let config = resolve_service_config(&cli)?;
    if let Some(name) = &cli.save_profile {
        save_cli_profile(&cli, name)?;
    }
    info!(url = %config.url, resource = %config.resource, "starting shoely");

    let label = format!("{}/{}", config.url.as_str().trim_end_matches('/'), config.resource);
    let service = HttpProductService::new(&config)?;
    let mut app = App::new(service, label);
    app.run().await?;

    Ok(())
}
