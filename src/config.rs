use axum::http::Uri;
use serde::{Deserialize, Serialize};
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Reading '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse failed")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid proxy prefix '{0}'")]
    InvalidPrefix(String),
    #[error("Invalid proxy target '{0}', expected http://host[:port]")]
    InvalidTarget(String),
}

/// Forwards requests under `prefix` to another origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyRule {
    pub prefix: String,
    pub target: String,
    #[serde(default = "default_change_origin")]
    pub change_origin: bool,
    /// Replaces the matched prefix before forwarding.
    #[serde(default)]
    pub rewrite: Option<String>,
}

fn default_change_origin() -> bool {
    true
}

impl ProxyRule {
    pub fn new(prefix: &str, target: &str) -> Self {
        Self {
            prefix: prefix.to_owned(),
            target: target.to_owned(),
            change_origin: true,
            rewrite: None,
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// Absolute backend URI for an incoming `path?query`.
    pub fn forward_uri(&self, path_and_query: &str) -> Result<Uri, ConfigError> {
        let path = match (&self.rewrite, path_and_query.strip_prefix(&self.prefix)) {
            (Some(replacement), Some(rest)) => format!("{}{}", replacement, rest),
            _ => path_and_query.to_owned(),
        };

        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{}", path)
        };

        format!("{}{}", self.target.trim_end_matches('/'), path)
            .parse()
            .map_err(|_| ConfigError::InvalidTarget(self.target.clone()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.prefix.starts_with('/') {
            return Err(ConfigError::InvalidPrefix(self.prefix.clone()));
        }

        let invalid = || ConfigError::InvalidTarget(self.target.clone());
        let uri: Uri = self.target.parse().map_err(|_| invalid())?;
        let plain_origin = matches!(uri.path(), "" | "/") && uri.query().is_none();
        if uri.scheme_str() != Some("http") || uri.authority().is_none() || !plain_origin {
            return Err(invalid());
        }

        Ok(())
    }
}

/// Where a production bundle is placed for the backend to serve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildLayout {
    pub output_dir: PathBuf,
    pub assets_dir: String,
}

impl Default for BuildLayout {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("../app/static/dist"),
            assets_dir: "static".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevConfig {
    pub listen: SocketAddr,
    /// Built application bundle, as produced by `trunk build`.
    pub dist: PathBuf,
    pub proxy: Vec<ProxyRule>,
    pub build: BuildLayout,
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 8080)),
            dist: PathBuf::from("web/dist"),
            proxy: vec![ProxyRule::new("/api", "http://localhost:5000")],
            build: BuildLayout::default(),
        }
    }
}

impl DevConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            debug!("config: defaults");
            return Ok(Self::default());
        };

        info!(path = %path.display(), "config: loading");

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;

        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: DevConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for rule in &self.proxy {
            rule.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
