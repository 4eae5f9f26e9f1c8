use anyhow::{Context, Result};
use figment::{providers::{Env, Format, Serialized, Toml}, Figment};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use validator::Validate;

use crate::simulation::{MeterConfig, SimulatorConfig};
use crate::telemetry::LogConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct Config {
    #[validate(nested)]
    pub server: ServerConfig,
    #[validate(nested)]
    pub simulation: SimulatorConfig,
    #[validate(nested)]
    pub meter: MeterConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 10,
            enable_cors: false,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

impl Config {
    /// Defaults, then `config/default.toml`, then `EDASH__*` environment variables
    pub fn load() -> Result<Self> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Toml::file("config/default.toml"))
                .merge(Env::prefixed("EDASH__").split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let cfg: Config = figment.extract().context("failed to load configuration")?;
        cfg.validate().context("invalid configuration")?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.simulation.random_seed, None);
        assert_eq!(cfg.meter.history_len, 50);
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let figment = Figment::from(Serialized::defaults(Config::default())).merge(Toml::string(
            r#"
            [server]
            port = 9000

            [simulation]
            random_seed = 42
            noise_fraction = 0.05
            "#,
        ));

        let cfg = Config::from_figment(figment).unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.simulation.random_seed, Some(42));
        assert_eq!(cfg.simulation.noise_fraction, 0.05);
        // untouched sections keep their defaults
        assert_eq!(cfg.meter.tariff_per_kwh, 7.5);
    }

    #[test]
    fn test_rejects_out_of_range_noise() {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::string("[simulation]\nnoise_fraction = 0.9\n"));

        assert!(Config::from_figment(figment).is_err());
    }

    #[test]
    fn test_rejects_all_zero_status_weights() {
        let figment = Figment::from(Serialized::defaults(Config::default())).merge(Toml::string(
            "[simulation.status_weights]\nonline = 0\nwarning = 0\noffline = 0\n",
        ));

        assert!(Config::from_figment(figment).is_err());
    }

    #[test]
    fn test_socket_addr() {
        let server = ServerConfig::default();
        assert_eq!(server.socket_addr().unwrap().port(), 8080);
    }
}
