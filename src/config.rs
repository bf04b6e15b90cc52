//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomodoro-server")]
#[command(about = "A state-managed HTTP server driving a two-phase Pomodoro countdown")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20525")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Milliseconds between countdown ticks
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_millis: u64,

    /// Start the countdown as soon as the server is up
    #[arg(long)]
    pub autostart: bool,

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

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}
