//! Start the agent: prepare the data directory, bootstrap the token, serve HTTP.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use nbagent_core::{AgentService, InitOptions};
use nbagent_server::http::server::{DEFAULT_MAX_BODY_BYTES, DEFAULT_PORT};
use nbagent_server::{run_server, ServerConfig};

/// Arguments for running the agent
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Bind to address
    #[arg(long, default_value = "0.0.0.0")]
    pub addr: IpAddr,

    /// Use custom port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory for data (default: platform user-data dir, e.g. ~/.local/share/nbagent)
    #[arg(long, env = "NBAGENT_DATA_DIR")]
    pub data: Option<PathBuf>,

    /// Generate a new random auth token
    #[arg(long)]
    pub reset_token: bool,

    /// Use a custom auth token
    #[arg(long, env = "NBAGENT_TOKEN", hide_env_values = true)]
    pub override_token: Option<String>,

    /// Allowed CORS origin (repeatable); any origin when omitted
    #[arg(long = "cors-origin")]
    pub cors_origins: Vec<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Largest accepted request body in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

impl ServeArgs {
    fn init_options(&self) -> InitOptions {
        InitOptions {
            data_dir: self.data.clone(),
            reset_token: self.reset_token,
            override_token: self.override_token.clone(),
        }
    }

    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.addr, self.port),
            cors_origins: self.cors_origins.clone(),
            request_timeout: Duration::from_secs(self.timeout),
            max_body_bytes: self.max_body_bytes,
        }
    }
}

/// Run the agent (blocks until shutdown)
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting nbagent {}", env!("CARGO_PKG_VERSION"));

    let options = args.init_options();
    let service = tokio::task::spawn_blocking(move || AgentService::init(options))
        .await
        .context("Initialization task failed")?
        .context("Failed to initialize data directory")?;

    run_server(Arc::new(service), args.server_config())
        .await
        .context("Server error")?;

    Ok(())
}
