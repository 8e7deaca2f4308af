//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use plugboard_auth::DeploymentMode;
use plugboard_catalog::StatusAnnotation;
use plugboard_observability::LogFormat;

/// Secret used when `JWT_SECRET` is unset. Never acceptable in production.
pub const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

impl ConfigError {
    fn invalid(var: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Base for absolute links in responses.
    pub public_url: String,
    pub jwt_secret: String,
    pub content_dir: PathBuf,
    pub plugin_dir: PathBuf,
    pub mu_plugin_dir: PathBuf,
    pub deployment: DeploymentMode,
    pub status_annotation: StatusAnnotation,
    pub log_format: LogFormat,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = match get("PLUGBOARD_BIND") {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("PLUGBOARD_BIND", format!("{e}")))?,
            None => SocketAddr::from(([0, 0, 0, 0], 8080)),
        };

        let public_url = get("PLUGBOARD_PUBLIC_URL")
            .unwrap_or_else(|| "http://localhost:8080".to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();
        if !(public_url.starts_with("http://") || public_url.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "PLUGBOARD_PUBLIC_URL",
                format!("expected an http(s) URL, got '{public_url}'"),
            ));
        }

        let content_dir = get("PLUGBOARD_CONTENT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./content"));
        let plugin_dir = get("PLUGBOARD_PLUGIN_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| content_dir.join("plugins"));
        let mu_plugin_dir = get("PLUGBOARD_MU_PLUGIN_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| content_dir.join("mu-plugins"));

        let deployment = match get("PLUGBOARD_MULTISITE") {
            Some(v) if parse_bool("PLUGBOARD_MULTISITE", &v)? => DeploymentMode::Network,
            _ => DeploymentMode::SingleSite,
        };

        let status_annotation = match get("PLUGBOARD_STATUS_ANNOTATION") {
            Some(v) => v.parse().map_err(|e: plugboard_core::DomainError| {
                ConfigError::invalid("PLUGBOARD_STATUS_ANNOTATION", e.to_string())
            })?,
            None => StatusAnnotation::default(),
        };

        let log_format = match get("PLUGBOARD_LOG_FORMAT") {
            Some(v) => v
                .parse()
                .map_err(|e: String| ConfigError::invalid("PLUGBOARD_LOG_FORMAT", e))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            public_url,
            jwt_secret: get("JWT_SECRET").unwrap_or_else(|| DEV_JWT_SECRET.to_string()),
            content_dir,
            plugin_dir,
            mu_plugin_dir,
            deployment,
            status_annotation,
            log_format,
        })
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::invalid(var, format!("expected a boolean, got '{other}'"))),
    }
}
