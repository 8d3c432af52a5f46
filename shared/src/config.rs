use anyhow::{Context, Result};

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            filename: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "database.db".into()),
        };
        let server = ServerConfig {
            port: match std::env::var("PORT") {
                Ok(port) => port.parse().context("PORT must be a valid port number")?,
                Err(_) => 5000,
            },
        };
        Ok(Self { database, server })
    }
}

pub struct DatabaseConfig {
    pub filename: String,
}

pub struct ServerConfig {
    pub port: u16,
}
