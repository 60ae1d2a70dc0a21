use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;

use crate::error::{AppError, AppResult};

/// Ambient settings shared by every command. All of them have defaults;
/// `LOG_FILE` is read separately by [`log_file_from_env`].
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: String,
    pub database_url: String,
    pub output_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = var("PORT").unwrap_or_else(|| "3000".to_string());

        let database_url =
            var("DATABASE_URL").unwrap_or_else(|| "sqlite://movies.db?mode=rwc".to_string());

        let output_dir = var("OUTPUT_DIR").map(PathBuf::from).unwrap_or_else(|| "data".into());

        Ok(Self { host, port, database_url, output_dir })
    }

    /// Listen address for `serve`. Validated on use so other commands do not
    /// depend on HOST/PORT.
    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        let port: u16 = self.port.trim().parse().context("PORT")?;
        format!("{}:{port}", self.host).parse().context("HOST/PORT")
    }
}

/// Where the run log goes. Resolved on its own so logging can start before
/// the rest of the configuration is validated.
pub fn log_file_from_env() -> PathBuf {
    dotenvy::dotenv().ok();
    log_file_from(&|key: &str| std::env::var(key).ok())
}

fn log_file_from(var: &impl Fn(&str) -> Option<String>) -> PathBuf {
    var("LOG_FILE").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("logs/etl.log"))
}

/// Settings the extractor cannot run without.
#[derive(Clone, Debug)]
pub struct ExtractorConfig {
    pub api_key: String,
    pub base_url: String,
    pub titles: Vec<String>,
}

impl ExtractorConfig {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let api_key = required(&var, "API_KEY")?;
        let base_url = required(&var, "BASE_URL")?;
        let titles = var("TITLES")
            .ok_or_else(|| AppError::config("TITLES is not set"))
            .map(|raw| parse_titles(&raw))?;

        Ok(Self { api_key, base_url, titles })
    }
}

fn required(var: &impl Fn(&str) -> Option<String>, key: &str) -> AppResult<String> {
    match var(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(AppError::config(format!("{key} is not set"))),
    }
}

pub fn parse_titles(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|t| !t.is_empty()).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn extractor_config_requires_api_key() {
        let err = ExtractorConfig::from_vars(vars(&[
            ("BASE_URL", "http://www.omdbapi.com/"),
            ("TITLES", "Inception"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Configuration(ref m) if m.contains("API_KEY")));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let err = ExtractorConfig::from_vars(vars(&[
            ("API_KEY", "   "),
            ("BASE_URL", "http://www.omdbapi.com/"),
            ("TITLES", "Inception"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn extractor_config_requires_titles_variable() {
        let err = ExtractorConfig::from_vars(vars(&[
            ("API_KEY", "k"),
            ("BASE_URL", "http://www.omdbapi.com/"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Configuration(ref m) if m.contains("TITLES")));
    }

    #[test]
    fn titles_are_trimmed_and_blanks_dropped() {
        let cfg = ExtractorConfig::from_vars(vars(&[
            ("API_KEY", "k"),
            ("BASE_URL", "http://www.omdbapi.com/"),
            ("TITLES", " Inception , The Matrix,, ,Heat "),
        ]))
        .unwrap();
        assert_eq!(cfg.titles, vec!["Inception", "The Matrix", "Heat"]);
    }

    #[test]
    fn empty_titles_is_an_empty_list() {
        let cfg = ExtractorConfig::from_vars(vars(&[
            ("API_KEY", "k"),
            ("BASE_URL", "http://www.omdbapi.com/"),
            ("TITLES", ""),
        ]))
        .unwrap();
        assert!(cfg.titles.is_empty());
    }

    #[test]
    fn ambient_config_has_defaults() {
        let cfg = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(cfg.addr().unwrap().port(), 3000);
        assert_eq!(cfg.database_url, "sqlite://movies.db?mode=rwc");
        assert_eq!(cfg.output_dir, PathBuf::from("data"));
    }

    #[test]
    fn log_file_defaults_under_logs() {
        assert_eq!(log_file_from(&vars(&[])), PathBuf::from("logs/etl.log"));
        assert_eq!(log_file_from(&vars(&[("LOG_FILE", "/tmp/x.log")])), PathBuf::from("/tmp/x.log"));
    }

    #[test]
    fn bad_port_only_fails_the_listen_address() {
        let cfg = Config::from_vars(vars(&[("PORT", "http"), ("OUTPUT_DIR", "out")])).unwrap();
        assert_eq!(cfg.output_dir, PathBuf::from("out"));
        assert!(cfg.addr().is_err());
    }
}
