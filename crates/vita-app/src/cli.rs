use std::path::PathBuf;

use clap::Parser;

/// Vita: a terminal health-information assistant.
#[derive(Parser, Debug)]
#[command(name = "vita", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error) or a full filter directive.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Model identifier override.
    #[arg(short, long)]
    pub model: Option<String>,

    /// Always request a single payload instead of a stream.
    #[arg(long)]
    pub no_stream: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_empty() {
        let args = Args::parse_from(["vita"]);
        assert!(args.config.is_none());
        assert!(args.model.is_none());
        assert!(!args.no_stream);
    }

    #[test]
    fn overrides_are_parsed() {
        let args = Args::parse_from([
            "vita",
            "--config",
            "/tmp/vita.toml",
            "--log-level",
            "debug",
            "-m",
            "meta/llama",
            "--no-stream",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/vita.toml")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.model.as_deref(), Some("meta/llama"));
        assert!(args.no_stream);
    }
}
