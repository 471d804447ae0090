mod cli;
mod repl;
mod setup;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use vita_common::{ConfigError, VitaError};
use vita_config::VitaConfig;

const DEFAULT_LOG_DIRECTIVE: &str = "vita=info";

/// Load environment variables from a .env file (KEY=VALUE lines).
fn load_dotenv() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let candidates = [
        // Current directory
        std::path::PathBuf::from(".env"),
        // Workspace root, two levels up from crates/vita-app/
        manifest_dir.join("..").join("..").join(".env"),
    ];

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
            return;
        }
    }
}

/// Load the config file. Out-of-range values do not discard the file;
/// they are reported by [`report_invalid_values`] once logging is up.
fn load_config(args: &cli::Args) -> Result<VitaConfig, ConfigError> {
    match args.config {
        Some(ref path) => vita_config::toml_loader::load_from_path(path),
        None => vita_config::toml_loader::load_default(),
    }
}

fn report_invalid_values(config: &VitaConfig) {
    if let Err(e) = vita_config::validation::validate(config) {
        tracing::warn!("Keeping config as loaded despite invalid values: {e}");
    }
}

/// Initialize logging. The command-line level wins over `RUST_LOG`, which
/// wins over the config file. Logs go to stderr so replies stay clean on
/// stdout.
fn init_logging(cli_level: Option<&str>) {
    let filter = match cli_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn config_directive(config: &VitaConfig) -> String {
    format!("vita={}", config.logging.level.as_directive())
}

async fn run(mut config: VitaConfig, args: &cli::Args) -> vita_common::Result<()> {
    setup::apply_overrides(&mut config, args);

    let engine = setup::build_engine(&config).map_err(|e| VitaError::Ai(e.to_string()))?;
    repl::run(engine).await?;
    Ok(())
}

fn main() -> ExitCode {
    // Load .env file before anything else
    load_dotenv();

    let args = cli::parse();

    // Logging depends on the config's level, so load it first and report
    // the outcome once the subscriber is installed.
    let loaded = load_config(&args);
    let level = match (&args.log_level, &loaded) {
        (Some(level), _) => Some(level.clone()),
        (None, _) if std::env::var("RUST_LOG").is_ok() => None,
        (None, Ok(config)) => Some(config_directive(config)),
        (None, Err(_)) => None,
    };
    init_logging(level.as_deref());

    tracing::info!("Vita v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let config = match loaded {
        Ok(config) => {
            report_invalid_values(&config);
            config
        }
        Err(e) => {
            tracing::warn!("Config load failed, using defaults: {e}");
            VitaConfig::default()
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(config, &args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("vita: {e}");
            ExitCode::FAILURE
        }
    }
}
