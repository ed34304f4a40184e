//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::carousel::RetryPolicy;

/// In-memory user list with a terminal carousel front-end.
#[derive(Parser, Debug)]
#[command(name = "user-carousel", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the user list over HTTP.
    Serve(ServeArgs),

    /// Browse users interactively.
    Browse(BrowseArgs),
}

/// Arguments for the `serve` subcommand.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to listen on.
    #[arg(long, env = "USER_CAROUSEL_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Number of random users generated at startup.
    #[arg(long, env = "USER_CAROUSEL_SEED", default_value_t = 5)]
    pub seed: usize,
}

/// Arguments for the `browse` subcommand.
#[derive(Parser, Debug)]
pub struct BrowseArgs {
    /// Base URL of a running `serve` instance.
    #[arg(long, env = "USER_CAROUSEL_URL", default_value = "http://127.0.0.1:3000")]
    pub url: String,

    /// Use a store inside this process instead of a server.
    #[arg(long, default_value_t = false)]
    pub local: bool,

    /// Number of random users generated for `--local`.
    #[arg(long, env = "USER_CAROUSEL_SEED", default_value_t = 5)]
    pub seed: usize,

    /// Retries for a failed list fetch before the error is shown.
    #[arg(long, default_value_t = 3)]
    pub retries: u32,

    /// Delay before the first retry, in milliseconds. Doubles per attempt.
    #[arg(long, default_value_t = 1000)]
    pub retry_delay_ms: u64,
}

impl BrowseArgs {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.retries,
            base_delay: Duration::from_millis(self.retry_delay_ms),
            ..RetryPolicy::default()
        }
    }
}
