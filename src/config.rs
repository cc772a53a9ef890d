use std::net::{IpAddr, SocketAddr};

use crate::error::AppError;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

/// Server configuration from environment variables. `AGENT_HOST` and
/// `AGENT_PORT` set the bind address; the database path override
/// (`STORE_SQLITE_PATH`) is handled by the store itself.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = std::env::var("AGENT_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let host: IpAddr = host
            .parse()
            .map_err(|e| AppError::Invalid(format!("Invalid AGENT_HOST: {e}")))?;

        let port = match std::env::var("AGENT_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| AppError::Invalid(format!("Invalid AGENT_PORT: {e}")))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self { host, port })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
