//! Dashboard smoke checks (CLI).
//!
//! ```text
//! dashboard-smoke [--config FILE] [--format text|json] health [--url BASE]
//! dashboard-smoke [--config FILE] [--format text|json] ui [--url PAGE]
//! dashboard-smoke [--config FILE] [--format text|json] all
//! ```
//!
//! Exits 0 when every selected check passes, 1 otherwise.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use dashboard_smoke::config::loader::{apply_process_env, load_or_default};
use dashboard_smoke::config::validation::validate_config;
use dashboard_smoke::observability::init_logging;
use dashboard_smoke::{run_checks, CheckKind};

#[derive(Parser)]
#[command(name = "dashboard-smoke")]
#[command(about = "Liveness and login-page smoke checks for a Wazuh dashboard", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report format written to stdout.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the status API until it answers
    Health {
        /// Dashboard origin, e.g. https://localhost
        #[arg(long)]
        url: Option<String>,
    },
    /// Check that the login page renders
    Ui {
        /// Page to load (overrides WAZUH_URL)
        #[arg(long)]
        url: Option<String>,
    },
    /// Run both checks, health first
    All,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.observability) {
        eprintln!("Warning: logging not initialised: {}", e);
    }

    apply_process_env(&mut config);

    let kinds = match cli.command {
        Commands::Health { url } => {
            if let Some(url) = url {
                config.health.base_url = url;
            }
            vec![CheckKind::Health]
        }
        Commands::Ui { url } => {
            if let Some(url) = url {
                config.ui.url = url;
            }
            vec![CheckKind::Ui]
        }
        Commands::All => vec![CheckKind::Health, CheckKind::Ui],
    };

    if let Err(errors) = validate_config(&config) {
        for error in errors {
            eprintln!("Error: {}", error);
        }
        return ExitCode::FAILURE;
    }

    tracing::info!("dashboard-smoke v{} starting", env!("CARGO_PKG_VERSION"));

    let report = run_checks(&config, &kinds).await;

    match cli.format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: cannot serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
