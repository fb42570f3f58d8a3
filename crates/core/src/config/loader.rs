use crate::config::types::{ConfigFile, LoggingConfig, Profile, ResolvedConfig};
use crate::rules::{RuleError, RuleSet};
use shellexpand::full;
use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("no profiles defined in config")]
    NoProfiles,

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("invalid rule in profile '{profile}': {source}")]
    InvalidRule {
        profile: String,
        #[source]
        source: RuleError,
    },

    #[error("home directory not available to expand '~'")]
    NoHome,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(
        config_path: Option<&Path>,
        profile_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let mut resolved = Self::load_str(&s, profile_override)
            .map_err(|e| match e {
                ConfigError::ParseError(_, err) => {
                    ConfigError::ParseError(path.display().to_string(), err)
                }
                other => other,
            })?;
        resolved.source = path;
        tracing::debug!(
            source = %resolved.source.display(),
            profile = %resolved.active_profile,
            rules = resolved.rules.len(),
            "config loaded"
        );
        Ok(resolved)
    }

    /// Resolve configuration from TOML text. `source` is left empty.
    pub fn load_str(
        toml_text: &str,
        profile_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let cf: ConfigFile = toml::from_str(toml_text)
            .map_err(|e| ConfigError::ParseError("<inline>".to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }
        if cf.profiles.is_empty() {
            return Err(ConfigError::NoProfiles);
        }

        let active = profile_override
            .map(ToOwned::to_owned)
            .or(cf.profile.clone())
            .unwrap_or_else(|| "default".to_string());

        let prof = cf
            .profiles
            .get(&active)
            .ok_or_else(|| ConfigError::ProfileNotFound(active.clone()))?;

        Self::resolve_profile(&active, prof, &cf.logging)
    }

    fn resolve_profile(
        active: &str,
        prof: &Profile,
        log_cfg: &LoggingConfig,
    ) -> Result<ResolvedConfig, ConfigError> {
        let rules = RuleSet::from_configs(&prof.rules).map_err(|source| {
            ConfigError::InvalidRule { profile: active.to_string(), source }
        })?;

        let logging = match &log_cfg.file {
            Some(file) => LoggingConfig {
                file: Some(expand_path(&file.to_string_lossy())?),
                ..log_cfg.clone()
            },
            None => log_cfg.clone(),
        };

        Ok(ResolvedConfig {
            source: PathBuf::new(),
            active_profile: active.to_string(),
            description: prof.description.clone(),
            rules,
            logging,
        })
    }
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("fieldcheck").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("fieldcheck").join("config.toml")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}
