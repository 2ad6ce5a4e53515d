use capscore::load_dashboard;
use capscore_core::{config::Config, format::Separators};
use capscore_feeds::IngestError;
use capscore_tui as tui;
use clap::{Parser, ValueEnum};
use std::{io::IsTerminal, path::PathBuf, process::ExitCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "capscore", about = "Rank accounts by likes, capping viral outliers")]
struct Cli {
    /// Write debug logs to /tmp/capscore-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Print the ranking to stdout instead of starting the dashboard.
    #[arg(long)]
    headless: bool,

    /// Report format for --headless.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Include the per-post table in the text report.
    #[arg(long)]
    detail: bool,

    /// Source name to rank; repeat to rank several. Replaces the configured names.
    #[arg(long = "source", value_name = "NAME")]
    sources: Vec<String>,

    /// Read `{DIR}/{name}.json` instead of querying the spreadsheet.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Use this config file instead of ~/.config/capscore/config.toml.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if !cli.sources.is_empty() {
        config = config.with_sources(cli.sources.clone());
    }
    let seps = Separators::from(&config.format);

    let runtime = tokio::runtime::Runtime::new()?;
    let loaded = runtime.block_on(load_dashboard(&config, cli.data_dir.clone()));

    let expected = match loaded {
        Ok(dash) if cli.headless => {
            let report = match cli.format {
                OutputFormat::Text => tui::report::render_text(&dash, &seps, cli.detail),
                OutputFormat::Json => tui::report::render_json(&dash)?,
            };
            println!("{}", report.trim_end());
            return Ok(ExitCode::SUCCESS);
        }
        Ok(dash) => {
            tui::run(tui::Screen::Ranked(dash), seps)?;
            return Ok(ExitCode::SUCCESS);
        }
        Err(err) => match err.downcast::<IngestError>() {
            Ok(IngestError::EmptyResult { expected }) => expected,
            Err(err) => return Err(err),
        },
    };

    if cli.headless {
        tracing::error!(expected = ?expected, "no data found");
        eprint!("{}", tui::report::render_empty(&expected));
        return Ok(ExitCode::from(2));
    }
    tui::run(tui::Screen::Empty { expected }, seps)?;
    Ok(ExitCode::SUCCESS)
}

/// Headless runs log to stderr at `warn` so per-source failures are visible;
/// the dashboard only logs to a file, and only with `--debug`.
fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    if cli.headless {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .with_env_filter(
                EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .init();
    } else if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/capscore-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("capscore debug log started — tail -f /tmp/capscore-debug.log");
    }
    Ok(())
}
