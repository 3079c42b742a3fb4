//! Server configuration from environment variables.

/// Default valuation cadence: every 15 minutes.
const DEFAULT_VALUATION_INTERVAL_SECS: u64 = 15 * 60;

#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: String,
    pub db_path: String,
    /// Alpha Vantage API key. A missing key still boots the server; quote
    /// calls then fail as quote-unavailable until one is configured.
    pub alpha_vantage_api_key: String,
    pub valuation_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let listen_addr =
            std::env::var("ROBO_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string());
        let db_path =
            std::env::var("ROBO_DB_PATH").unwrap_or_else(|_| "data/roboadvisor.db".to_string());
        let alpha_vantage_api_key = std::env::var("ALPHA_VANTAGE_API_KEY").unwrap_or_default();
        let valuation_interval_secs = std::env::var("ROBO_VALUATION_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_VALUATION_INTERVAL_SECS);

        Self {
            listen_addr,
            db_path,
            alpha_vantage_api_key,
            valuation_interval_secs,
        }
    }
}
