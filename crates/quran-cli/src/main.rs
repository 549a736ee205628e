use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use quran_acquire::collect::{CHAPTER_COUNT, DEFAULT_DELAY_MS};
use quran_acquire::fetch::{DEFAULT_BASE_URL, DEFAULT_EDITION};
use quran_acquire::output::DEFAULT_OUTPUT_PATH;
use quran_acquire::{ApiClient, FetchConfig, PersistOutcome, RunConfig};

mod console;

use console::ConsoleProgress;

#[derive(Parser)]
#[command(name = "fetch-quran")]
#[command(about = "Download the Quran from the Al-Quran Cloud API into a passages JSON file")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// API base URL
    #[arg(long, env = "QURAN_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Translation edition identifier (e.g., "en.pickthall", "en.sahih")
    #[arg(long, env = "QURAN_EDITION", default_value = DEFAULT_EDITION)]
    edition: String,

    /// First chapter to fetch
    #[arg(long, env = "QURAN_FIRST_CHAPTER", default_value_t = 1,
          value_parser = clap::value_parser!(u32).range(1..=CHAPTER_COUNT as i64))]
    first_chapter: u32,

    /// Last chapter to fetch (inclusive)
    #[arg(long, env = "QURAN_LAST_CHAPTER", default_value_t = CHAPTER_COUNT,
          value_parser = clap::value_parser!(u32).range(1..=CHAPTER_COUNT as i64))]
    last_chapter: u32,

    /// Pause after each chapter request, in milliseconds
    #[arg(long, env = "QURAN_DELAY_MS", default_value_t = DEFAULT_DELAY_MS)]
    delay_ms: u64,

    /// Per-request timeout in seconds (no timeout if omitted)
    #[arg(long, env = "QURAN_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Accept invalid TLS certificates (for sandboxes that intercept TLS)
    #[arg(long, env = "QURAN_INSECURE")]
    insecure: bool,

    /// Output file path for the passages JSON
    #[arg(short, long, env = "QURAN_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "warn", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long)]
    utc: bool,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Cli {
    fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            base_url: self.base_url.clone(),
            edition: self.edition.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
            accept_invalid_certs: self.insecure,
        }
    }

    fn run_config(&self) -> RunConfig {
        RunConfig {
            first_chapter: self.first_chapter,
            last_chapter: self.last_chapter,
            delay: Duration::from_millis(self.delay_ms),
        }
    }
}

fn init_tracing(cli: &Cli) {
    // Keep hyper/rustls quiet unless explicitly asked for via RUST_LOG
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,hyper_util=info,rustls=info",
        LogLevel::Trace => "trace,hyper_util=info,rustls=info",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    // stderr, so the progress counter on stdout isn't interleaved mid-line
    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let fetch_config = cli.fetch_config();
    let run_config = cli.run_config();
    anyhow::ensure!(
        run_config.first_chapter <= run_config.last_chapter,
        "--first-chapter {} is after --last-chapter {}",
        run_config.first_chapter,
        run_config.last_chapter
    );

    tracing::info!(
        base_url = %fetch_config.base_url,
        edition = %fetch_config.edition,
        output = %cli.output.display(),
        "Downloading Quran"
    );
    println!("Downloading full Quran from Al-Quran Cloud API...\n");

    let client = ApiClient::new(&fetch_config)?;
    let mut progress = ConsoleProgress::default();
    let passages = quran_acquire::collect_passages(&client, &run_config, &mut progress).await;

    let outcome = quran_acquire::persist(&passages, &cli.output)?;
    match &outcome {
        PersistOutcome::Written { path, .. } => {
            println!("\nSaved {} passages to {}", passages.len(), path.display());
            println!("File size: {:.2} MB", outcome.size_mb());
        }
        PersistOutcome::Skipped => println!("No passages downloaded"),
    }

    Ok(())
}

/// Partial or total failure still exits 0; errors are only logged.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(&cli).await {
        tracing::error!("{e:#}");
    }

    Ok(())
}
