use log::{info, warn};
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

use crate::error::Error;

pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 300;

const CONFIG_PATH_VAR: &str = "SITEWATCH_CONFIG";
const WEBHOOK_URL_VAR: &str = "SLACK_WEBHOOK_URL";
const SITES_VAR: &str = "SITES_TO_MONITOR";
const INTERVAL_VAR: &str = "CHECK_INTERVAL_IN_SECONDS";

/// Validated monitor settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub webhook_url: String,
    pub targets: Vec<String>,
    pub check_interval_secs: u64,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    config: ConfigOptions,
    #[serde(default)]
    sites: SiteList,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigOptions {
    check_interval_secs: Option<u64>,
    webhook_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SiteList {
    urls: Option<Vec<String>>,
}

impl Config {
    /// Loads the configuration from the config file and the environment.
    ///
    /// The file is read from `$SITEWATCH_CONFIG`, falling back to
    /// `<config dir>/sitewatch/config.toml`. Anything the file leaves unset is
    /// taken from the environment (a `.env` file is honored).
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or if
    /// the resulting settings fail validation.
    pub fn load() -> Result<Config, Error> {
        let path = dotenvy::var(CONFIG_PATH_VAR)
            .ok()
            .map(PathBuf::from)
            .or_else(default_config_path);

        Self::load_from(path.as_deref(), |key| dotenvy::var(key).ok())
    }

    /// Loads the configuration from an explicit file path and environment lookup.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_from<F>(path: Option<&Path>, lookup: F) -> Result<Config, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match path {
            Some(path) => read_config_file(path)?,
            None => ConfigFile::default(),
        };

        let webhook_url = file
            .config
            .webhook_url
            .or_else(|| lookup(WEBHOOK_URL_VAR))
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| Error::Config(format!("{WEBHOOK_URL_VAR} is required")))?;
        validate_url(&webhook_url)?;

        let targets = match file.sites.urls {
            Some(urls) => urls,
            None => lookup(SITES_VAR)
                .map(|sites| sites.split(',').map(str::to_string).collect())
                .unwrap_or_default(),
        };
        let targets = normalize_targets(targets);
        if targets.is_empty() {
            return Err(Error::Config(format!("{SITES_VAR} is required")));
        }
        for target in &targets {
            validate_url(target)?;
        }

        let check_interval_secs = match file.config.check_interval_secs {
            Some(secs) => secs,
            None => match lookup(INTERVAL_VAR) {
                Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                    Error::Config(format!("{INTERVAL_VAR} must be a whole number, got {raw:?}"))
                })?,
                None => DEFAULT_CHECK_INTERVAL_SECS,
            },
        };
        if check_interval_secs == 0 {
            return Err(Error::Config(
                "check interval must be at least one second".to_string(),
            ));
        }

        Ok(Config {
            webhook_url,
            targets,
            check_interval_secs,
        })
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_secs.saturating_mul(1000))
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sitewatch").join("config.toml"))
}

fn read_config_file(path: &Path) -> Result<ConfigFile, Error> {
    match fs::read_to_string(path) {
        Ok(content) => {
            info!("Loaded configuration file {}", path.display());
            Ok(toml::from_str(&content)?)
        }
        // Env-only deployments have no file at all
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(e.into()),
    }
}

fn normalize_targets(raw: Vec<String>) -> Vec<String> {
    let mut targets: Vec<String> = Vec::with_capacity(raw.len());
    for target in raw {
        let target = target.trim();
        if target.is_empty() {
            continue;
        }
        if targets.iter().any(|known| known == target) {
            warn!("Ignoring duplicate target {target}");
            continue;
        }
        targets.push(target.to_string());
    }
    targets
}

fn validate_url(raw: &str) -> Result<(), Error> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(Error::Config(format!(
            "unsupported scheme {scheme:?} in {raw}, expected http or https"
        ))),
    }
}
