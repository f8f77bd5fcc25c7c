use std::env;

pub const DEFAULT_CART_MAX_ITEMS: usize = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Ceiling on distinct items per cart; adds beyond it fail.
    pub cart_max_items: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let cart_max_items = env::var("CART_MAX_ITEMS")
            .ok()
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_CART_MAX_ITEMS);
        Ok(Self {
            database_url,
            host,
            port,
            cart_max_items,
        })
    }
}
