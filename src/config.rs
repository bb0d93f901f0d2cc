use std::net::SocketAddr;

use clap::Parser;

/// Command line configuration for the rule evaluation server.
#[derive(Parser, Debug, Clone)]
#[command(name = "ruleval", about = "HTTP service for sandboxed rule evaluation")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8000")]
    pub listen: SocketAddr,

    /// Evaluate each request against a fresh copy of the base environment
    /// instead of merging contexts into a shared one
    #[arg(long)]
    pub isolate_requests: bool,
}
