//! catalog - terminal client for the show catalog.
#![allow(clippy::future_not_send)]

/// Application configuration (TOML).
mod config;
/// Catalog view controller.
mod controller;
/// Terminal UI components.
mod tui;

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use catalog_api::{Authed, CatalogClient, FilterState, LocalCatalogApi};
use catalog_store::{SessionStore, open_store};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path, resolve_log_path};
use crate::controller::listing::{EMPTY_HINT, EMPTY_TITLE, ERROR_TITLE, ListingView, ShowCard};
use crate::controller::session::Session;
use crate::controller::{CatalogController, Navigation};
use crate::tui::{BrowseExit, run_browser};

/// Shown whenever a command needs a session and there is none.
const NOT_LOGGED_IN: &str = "Not logged in. Run `catalog login` first.";

/// CLI argument parser.
#[derive(Parser)]
#[command(name = "catalog", about, version)]
struct Cli {
    /// Override config/data directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Override the API base URL (e.g. "http://localhost:8000/api/").
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session token.
    Login(LoginArgs),
    /// Create an account and log it in.
    Register(RegisterArgs),
    /// Forget the stored session token.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// List the available filter values.
    Filters,
    /// List one page of shows.
    Shows(ShowsArgs),
    /// Show the details of one show.
    Show(ShowArgs),
    /// Browse the catalog via TUI.
    Browse,
    /// Show or update the configuration.
    Config(ConfigArgs),
    /// Generate shell completion scripts.
    Completions(CompletionsArgs),
}

/// Arguments for the `login` subcommand.
#[derive(clap::Args)]
struct LoginArgs {
    /// Account name.
    #[arg(long, required = true)]
    username: String,
    /// Password.
    #[arg(long, required = true)]
    password: String,
}

/// Arguments for the `register` subcommand.
#[derive(clap::Args)]
struct RegisterArgs {
    /// Account name.
    #[arg(long, required = true)]
    username: String,
    /// Contact e-mail.
    #[arg(long, required = true)]
    email: String,
    /// Password.
    #[arg(long, required = true)]
    password: String,
    /// Password again.
    #[arg(long, required = true)]
    confirm_password: String,
}

/// Arguments for the `shows` subcommand.
#[derive(clap::Args)]
struct ShowsArgs {
    /// Page number (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Search title, director, cast and description.
    #[arg(long)]
    search: Option<String>,
    /// Show type (e.g. "Movie", "TV Show").
    #[arg(long = "type")]
    kind: Option<String>,
    /// Category name.
    #[arg(long)]
    category: Option<String>,
    /// Rating name (e.g. "TV-MA").
    #[arg(long)]
    rating: Option<String>,
    /// Lowest release year.
    #[arg(long)]
    year_from: Option<i32>,
    /// Highest release year.
    #[arg(long)]
    year_to: Option<i32>,
    /// Production country.
    #[arg(long)]
    country: Option<String>,
}

impl ShowsArgs {
    fn filters(&self) -> FilterState {
        let text = |value: Option<&str>| value.map(String::from).unwrap_or_default();
        let year = |value: Option<i32>| value.map(|y| y.to_string()).unwrap_or_default();
        FilterState {
            search: text(self.search.as_deref()),
            kind: text(self.kind.as_deref()),
            category: text(self.category.as_deref()),
            rating: text(self.rating.as_deref()),
            year_from: year(self.year_from),
            year_to: year(self.year_to),
            country: text(self.country.as_deref()),
        }
    }
}

/// Arguments for the `show` subcommand.
#[derive(clap::Args)]
struct ShowArgs {
    /// Show database ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigArgs {
    /// New API base URL.
    #[arg(long)]
    base_url: Option<String>,
    /// New request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    shell: Shell,
}

/// Builds the controller from config, the session store and CLI overrides.
///
/// # Errors
///
/// Returns an error if config loading, client construction, or store
/// access fails.
fn build_controller(
    dir: Option<&PathBuf>,
    api_url: Option<&str>,
) -> Result<CatalogController<CatalogClient>> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    let base_url = config.api.resolve_base_url(api_url)?;

    let client = CatalogClient::builder()
        .base_url(base_url)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .timeout(config.api.timeout())
        .build()
        .context("failed to build API client")?;

    let conn = open_store(dir).context("failed to open session store")?;
    let session = Session::restore(SessionStore::new(conn)).context("failed to restore session")?;

    Ok(CatalogController::new(client, session))
}

/// Fails with the login hint unless the stored session is valid.
async fn ensure_authenticated<A: LocalCatalogApi>(ctl: &mut CatalogController<A>) -> Result<()> {
    if ctl.check_auth().await {
        Ok(())
    } else {
        bail!(NOT_LOGGED_IN)
    }
}

/// Unwraps an authenticated outcome, failing with the login hint on 401.
fn authed<T>(outcome: Authed<T>) -> Result<T> {
    match outcome {
        Authed::Ok(value) => Ok(value),
        Authed::Unauthenticated => bail!(NOT_LOGGED_IN),
    }
}

/// Runs the `login` subcommand.
///
/// # Errors
///
/// Returns the server message if the credentials are rejected.
#[instrument(skip_all)]
async fn run_login<A: LocalCatalogApi>(
    ctl: &mut CatalogController<A>,
    args: &LoginArgs,
) -> Result<()> {
    ctl.login(&args.username, &args.password).await?;
    Ok(())
}

/// Runs the `register` subcommand.
///
/// # Errors
///
/// Returns an error on password mismatch or a rejected registration.
#[instrument(skip_all)]
async fn run_register<A: LocalCatalogApi>(
    ctl: &mut CatalogController<A>,
    args: &RegisterArgs,
) -> Result<()> {
    let nav = ctl
        .register(
            &args.username,
            &args.email,
            &args.password,
            &args.confirm_password,
        )
        .await?;
    match nav {
        Navigation::Catalog => tracing::info!("Logged in as {}", args.username),
        Navigation::Login => {
            tracing::info!("Account created. Run `catalog login` to sign in.");
        }
    }
    Ok(())
}

/// Runs the `whoami` subcommand.
///
/// # Errors
///
/// Returns the login hint if there is no valid session.
#[instrument(skip_all)]
async fn run_whoami<A: LocalCatalogApi>(ctl: &mut CatalogController<A>) -> Result<()> {
    ensure_authenticated(ctl).await?;
    if let Some(user) = ctl.session().user() {
        match &user.email {
            Some(email) => tracing::info!("{} <{}>", user.username, email),
            None => tracing::info!("{}", user.username),
        }
    }
    Ok(())
}

/// Runs the `filters` subcommand.
///
/// # Errors
///
/// Returns the login hint if there is no valid session.
#[instrument(skip_all)]
async fn run_filters<A: LocalCatalogApi>(ctl: &mut CatalogController<A>) -> Result<()> {
    ensure_authenticated(ctl).await?;
    authed(ctl.load_filters().await)?;

    let options = ctl.options();
    if options.is_empty() {
        tracing::warn!("No filter options available");
        return Ok(());
    }
    tracing::info!("Types:      {}", options.types.join(", "));
    tracing::info!("Categories: {}", options.categories.join(", "));
    tracing::info!("Ratings:    {}", options.ratings.join(", "));
    match (options.years.first(), options.years.last()) {
        (Some(newest), Some(oldest)) => tracing::info!("Years:      {newest} - {oldest}"),
        _ => tracing::info!("Years:"),
    }
    tracing::info!("Countries:  {}", options.countries.join(", "));
    Ok(())
}

/// Runs the `shows` subcommand.
///
/// # Errors
///
/// Returns the login hint if there is no valid session, or the failure
/// message if the listing could not be loaded.
#[instrument(skip_all)]
async fn run_shows<A: LocalCatalogApi>(
    ctl: &mut CatalogController<A>,
    args: &ShowsArgs,
) -> Result<()> {
    ensure_authenticated(ctl).await?;
    ctl.set_filters(args.filters());
    authed(ctl.load_shows(args.page.max(1)).await)?;

    match ctl.listing() {
        ListingView::Rendered { shows, .. } => {
            tracing::info!("ID\tType\t\tTitle\t\t\tYear\tDuration\tRating\tCategories");
            for show in shows {
                let card = ShowCard::from_show(show);
                tracing::info!(
                    "{}\t{}\t\t{}\t\t\t{}\t{}\t\t{}\t{}",
                    show.id,
                    card.badge,
                    card.title,
                    card.year,
                    card.duration,
                    card.rating.as_deref().unwrap_or("-"),
                    card.categories.join(", "),
                );
            }
            if let Some(stats) = ctl.listing().stats() {
                tracing::info!("{stats}");
            }
            if let Some(strip) = ctl.pagination() {
                tracing::info!("{strip}  {}", strip.info());
            }
        }
        ListingView::Empty => {
            tracing::info!("{EMPTY_TITLE}");
            tracing::info!("{EMPTY_HINT}");
        }
        ListingView::Error { message } => bail!("{ERROR_TITLE}: {message}"),
        ListingView::Idle | ListingView::Loading { .. } => {}
    }
    Ok(())
}

/// Runs the `show` subcommand.
///
/// # Errors
///
/// Returns the login hint if there is no valid session, or the server
/// message (e.g. "Show not found") if the request fails.
#[instrument(skip_all)]
async fn run_show<A: LocalCatalogApi>(
    ctl: &mut CatalogController<A>,
    args: &ShowArgs,
) -> Result<()> {
    ensure_authenticated(ctl).await?;
    authed(ctl.open_show(args.id).await?)?;

    if let Some(detail) = ctl.detail() {
        tracing::info!("{}", detail.title);
        let meta: Vec<String> = detail
            .meta
            .iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect();
        tracing::info!("{}", meta.join("  "));
        for section in &detail.sections {
            tracing::info!("{}: {}", section.heading, section.body);
        }
    }
    Ok(())
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns the login hint if there is no valid session (or it expires
/// while browsing), or an error if the TUI fails.
#[instrument(skip_all)]
async fn run_browse<A: LocalCatalogApi>(ctl: &mut CatalogController<A>) -> Result<()> {
    ensure_authenticated(ctl).await?;
    match run_browser(ctl).await.context("catalog browser TUI failed")? {
        BrowseExit::Quit => Ok(()),
        BrowseExit::Unauthenticated => bail!(NOT_LOGGED_IN),
    }
}

/// Runs the `config` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be read, validated or written.
#[instrument(skip_all)]
fn run_config(args: &ConfigArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let mut config = AppConfig::load(&config_path).context("failed to load config")?;

    if args.base_url.is_some() || args.timeout_secs.is_some() {
        if let Some(base_url) = &args.base_url {
            config.api.resolve_base_url(Some(base_url))?;
            config.api.base_url.clone_from(base_url);
        }
        if let Some(timeout_secs) = args.timeout_secs {
            config.api.timeout_secs = timeout_secs;
        }
        config.save(&config_path).context("failed to save config")?;
        tracing::info!("Saved {}", config_path.display());
    }

    tracing::info!("base_url = {}", config.api.base_url);
    tracing::info!("timeout_secs = {}", config.api.timeout_secs);
    Ok(())
}

/// Opens the log file used while the TUI is active.
fn browse_log_writer(dir: Option<&PathBuf>) -> Result<BoxMakeWriter> {
    let path = resolve_log_path(dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BoxMakeWriter::new(Mutex::new(file)))
}

/// Installs the global tracing subscriber.
///
/// Logs go to stdout, or to `log_file` (without ANSI colours) when given.
fn init_tracing(log_file: Option<BoxMakeWriter>) {
    let ansi = log_file.is_none();
    let writer = log_file.unwrap_or_else(|| BoxMakeWriter::new(io::stdout));

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = if matches!(cli.command, Commands::Browse) {
        Some(browse_log_writer(cli.dir.as_ref())?)
    } else {
        None
    };
    init_tracing(log_file);

    let dir = cli.dir.as_ref();
    let api_url = cli.api_url.as_deref();
    match &cli.command {
        Commands::Config(args) => run_config(args, dir),
        Commands::Completions(args) => {
            clap_complete::generate(args.shell, &mut Cli::command(), "catalog", &mut io::stdout());
            Ok(())
        }
        command => {
            let mut ctl = build_controller(dir, api_url)?;
            match command {
                Commands::Login(args) => run_login(&mut ctl, args).await,
                Commands::Register(args) => run_register(&mut ctl, args).await,
                Commands::Logout => ctl.logout().map(|_| ()),
                Commands::Whoami => run_whoami(&mut ctl).await,
                Commands::Filters => run_filters(&mut ctl).await,
                Commands::Shows(args) => run_shows(&mut ctl, args).await,
                Commands::Show(args) => run_show(&mut ctl, args).await,
                Commands::Browse => run_browse(&mut ctl).await,
                Commands::Config(_) | Commands::Completions(_) => Ok(()),
            }
        }
    }
}
