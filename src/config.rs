//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "pomodoro-timer")]
#[command(about = "A countdown timer service with pause, resume, stop and skip")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "8000")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Directory with the browser client, served for unmatched paths
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Minutes a session is kept after its last access (0 keeps them forever)
    #[arg(short, long, default_value = "60")]
    pub retention_minutes: u64,

    /// Seconds between sweeps for idle sessions
    #[arg(long, default_value = "30")]
    pub sweep_interval_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Retention for idle sessions, `None` when sweeping is disabled
    pub fn retention(&self) -> Option<Duration> {
        (self.retention_minutes > 0).then(|| Duration::from_secs(self.retention_minutes.saturating_mul(60)))
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["pomodoro-timer"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:8000");
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.retention(), Some(Duration::from_secs(3600)));
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "pomodoro-timer",
            "-p",
            "9000",
            "--host",
            "0.0.0.0",
            "--retention-minutes",
            "0",
            "--sweep-interval-secs",
            "0",
            "--static-dir",
            "frontend",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.address(), "0.0.0.0:9000");
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.retention(), None);
        assert_eq!(config.sweep_interval(), Duration::from_secs(1));
        assert_eq!(config.static_dir, Some(PathBuf::from("frontend")));
    }
}
