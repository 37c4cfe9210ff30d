use std::{path::PathBuf, sync::Arc};

use {
    anyhow::Context as _,
    clap::{Parser, Subcommand},
    secrecy::ExposeSecret,
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use {
    rantcast_config::RantcastConfig,
    rantcast_corpus::{RantStore, Strategy, select},
    rantcast_cron::{BROADCAST_TZ, DEFAULT_EXPR, schedule},
};

#[derive(Parser)]
#[command(name = "rantcast", about = "Scheduled rant broadcasts for Discord")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file path (overrides discovery).
    #[arg(long, global = true, env = "RANTCAST_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and serve scheduled rants (default).
    Run,
    /// Validate config, corpus, and schedule without connecting.
    Check,
    /// Print a rant to stdout without connecting.
    Rant {
        /// Pick today's deterministic entry instead of a random one.
        #[arg(long)]
        today: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);
    let _ = dotenvy::dotenv();

    let config = match &cli.config {
        Some(path) => rantcast_config::load_config(path)?,
        None => rantcast_config::discover_and_load(),
    };

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(config).await,
        Commands::Check => check(&config),
        Commands::Rant { today } => rant(&config, today),
    }
}

fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}

async fn run(config: RantcastConfig) -> anyhow::Result<()> {
    let token = config.discord_token().context(
        "no Discord token: set discord.token in rantcast.toml \
         or the DISCORD_TOKEN environment variable",
    )?;
    let store = Arc::new(RantStore::load(&config.corpus.path)?);
    let expr = config.schedule.expr.as_deref().unwrap_or(DEFAULT_EXPR);

    info!(corpus = %config.corpus.path.display(), expr, "starting rantcast");
    rantcast_discord::run_bot(
        token.expose_secret(),
        config.discord.prefix.clone(),
        expr,
        store,
    )
    .await?;
    Ok(())
}

fn check(config: &RantcastConfig) -> anyhow::Result<()> {
    let store = RantStore::load(&config.corpus.path)?;
    println!(
        "corpus: {} entries from {}",
        store.len(),
        config.corpus.path.display()
    );

    let expr = config.schedule.expr.as_deref().unwrap_or(DEFAULT_EXPR);
    let parsed = schedule::validate_expr(expr)?;
    let now = chrono::Utc::now().with_timezone(&BROADCAST_TZ);
    match schedule::next_fire(&parsed, now) {
        Some(next) => println!("schedule: {expr} (next fire {})", next.to_rfc3339()),
        None => println!("schedule: {expr} (no future occurrence)"),
    }

    let today = select::pick_for_date(store.entries(), now.date_naive())?;
    println!(
        "today's pick: [{}] {} -- {}",
        today.date,
        today.category.label(),
        today.source
    );

    let token = if config.discord_token().is_some() {
        "configured"
    } else {
        "MISSING"
    };
    println!("token: {token}");
    Ok(())
}

fn rant(config: &RantcastConfig, today: bool) -> anyhow::Result<()> {
    let store = RantStore::load(&config.corpus.path)?;
    let strategy = if today {
        Strategy::DateIndexed
    } else {
        Strategy::Random
    };
    let entry = select::pick(store.entries(), strategy, BROADCAST_TZ)?;
    println!("{}", entry.text);
    println!(
        "-- {} ({}, {})",
        entry.source,
        entry.category.label(),
        entry.date
    );
    Ok(())
}
