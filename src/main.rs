//! terminal-folio CLI
//!
//! Interactive terminal portfolio, plus one-shot access to its commands.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Instant;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use terminal_folio::config::{ConfigError, SessionConfig};
use terminal_folio::content::PortfolioContent;
use terminal_folio::platform::{self, EnvironmentInfo};
use terminal_folio::report::{format_entry, format_themes};
use terminal_folio::session::{Session, SubmitOutcome};
use terminal_folio::tui::run::run;
use terminal_folio::tui::state::App;
use terminal_folio::types::OutputFormat;

/// Variable holding the tracing filter directive.
const LOG_ENV: &str = "FOLIO_LOG";

#[derive(Parser)]
#[command(name = "terminal-folio")]
#[command(about = "A terminal portfolio you can type commands into")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (default: <config dir>/terminal-folio/config.json if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Initial theme key
    #[arg(long, global = true)]
    theme: Option<String>,

    /// Delay between banner characters, in milliseconds
    #[arg(long, global = true)]
    char_interval_ms: Option<u64>,

    /// Pause after the banner before the shell appears, in milliseconds
    #[arg(long, global = true)]
    settle_ms: Option<u64>,

    /// Input lockout after each submission, in milliseconds
    #[arg(long, global = true)]
    cooldown_ms: Option<u64>,

    /// Start directly in the shell
    #[arg(long, global = true)]
    skip_boot: bool,

    /// Write logs to this file (filter with FOLIO_LOG, default "info")
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive session (default)
    Run,

    /// Run one command line and print its output
    Exec {
        /// The command line, e.g. `themes set dark`
        #[arg(required = true, num_args = 1..)]
        line: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// List the available themes
    Themes {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match try_main(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: &Cli) -> Result<(), AppError> {
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    let config = load_config(cli)?;

    match &cli.command {
        None | Some(Commands::Run) => cmd_run(&config),
        Some(Commands::Exec { line, format }) => cmd_exec(&config, &line.join(" "), (*format).into()),
        Some(Commands::Themes { format }) => cmd_themes(&config, (*format).into()),
    }
}

// ============================================================================
// SETUP
// ============================================================================

/// Route tracing output to `path`. The terminal itself belongs to the TUI.
fn init_logging(path: &Path) -> Result<(), AppError> {
    let file = File::create(path).map_err(|source| AppError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Config file values, overridden by any CLI flags.
fn load_config(cli: &Cli) -> Result<SessionConfig, AppError> {
    let mut config = SessionConfig::resolve(cli.config.as_deref())?;

    if let Some(theme) = &cli.theme {
        config.initial_theme = theme.clone();
    }
    if let Some(ms) = cli.char_interval_ms {
        config.char_interval_ms = ms;
    }
    if let Some(ms) = cli.settle_ms {
        config.settle_delay_ms = ms;
    }
    if let Some(ms) = cli.cooldown_ms {
        config.submit_cooldown_ms = ms;
    }
    if cli.skip_boot {
        config.skip_boot = true;
    }
    Ok(config)
}

fn build_session(config: &SessionConfig, env: EnvironmentInfo) -> Result<Session, AppError> {
    let content = PortfolioContent::new(config.profile.clone(), env);
    Ok(Session::new(config, Box::new(content), Instant::now())?)
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_run(config: &SessionConfig) -> Result<(), AppError> {
    let session = build_session(config, platform::detect())?;
    let app = App::new(session, config.profile.user.clone());
    run(app)?;
    Ok(())
}

fn cmd_exec(config: &SessionConfig, line: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = SessionConfig {
        skip_boot: true,
        ..config.clone()
    };
    let mut session = build_session(&config, platform::detect())?;

    if session.execute(line, Instant::now()) == SubmitOutcome::Appended {
        if let Some(entry) = session.transcript().last() {
            print!("{}", format_entry(entry, format));
        }
    }
    Ok(())
}

fn cmd_themes(config: &SessionConfig, format: OutputFormat) -> Result<(), AppError> {
    let themes = config.theme_store()?;
    print!("{}", format_themes(&themes, format));
    Ok(())
}
