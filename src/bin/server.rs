//! sqlcalc - Server binary

use sqlcalc::backend::{BackendConfig, MysqlBackend};
use sqlcalc::server::{Server, ServerConfig};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run() {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> sqlcalc::Result<()> {
    let backend_config = BackendConfig::from_env()?;
    let backend = MysqlBackend::connect(&backend_config)?;

    let mut server = Server::new(ServerConfig::new(), backend);
    server.start()
}
