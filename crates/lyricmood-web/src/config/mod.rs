//! Configuration loading for the web front-end.
//! Reads lyricmood.toml from the current directory or the path in the
//! LYRICMOOD_CONFIG env var, then applies LYRICMOOD_* overrides.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use lyricmood_model::bundle::{
    ArtifactPaths, DEFAULT_LABEL_ENCODER_FILE, DEFAULT_MODEL_FILE, DEFAULT_VECTORIZER_FILE,
};

pub const CONFIG_ENV: &str = "LYRICMOOD_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "lyricmood.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Verbose logging, and load failure reasons shown on the page.
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_host()       -> String { "127.0.0.1".to_string() }
fn default_port()       -> u16    { 5000 }
fn default_static_dir() -> String { concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
            static_dir: default_static_dir(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    #[serde(default = "default_artifact_dir")]
    pub dir: String,
    #[serde(default = "default_model_file")]
    pub model: String,
    #[serde(default = "default_vectorizer_file")]
    pub vectorizer: String,
    #[serde(default = "default_label_encoder_file")]
    pub label_encoder: String,
}

fn default_artifact_dir()       -> String { "artifacts".to_string() }
fn default_model_file()         -> String { DEFAULT_MODEL_FILE.to_string() }
fn default_vectorizer_file()    -> String { DEFAULT_VECTORIZER_FILE.to_string() }
fn default_label_encoder_file() -> String { DEFAULT_LABEL_ENCODER_FILE.to_string() }

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: default_artifact_dir(),
            model: default_model_file(),
            vectorizer: default_vectorizer_file(),
            label_encoder: default_label_encoder_file(),
        }
    }
}

impl ArtifactsConfig {
    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            dir: PathBuf::from(&self.dir),
            model: self.model.clone(),
            vectorizer: self.vectorizer.clone(),
            label_encoder: self.label_encoder.clone(),
        }
    }
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file at the given path; built-in defaults apply.
    Defaults(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults(path) => write!(f, "defaults ({} not found)", path.display()),
        }
    }
}

mod tests;

impl Config {
    /// Load configuration from lyricmood.toml and the process environment.
    /// Checks LYRICMOOD_CONFIG env var first, then current directory.
    pub fn load() -> anyhow::Result<(Self, ConfigSource)> {
        let path = std::env::var(CONFIG_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let (mut config, source) = Self::load_from(Path::new(&path))?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok((config, source))
    }

    /// Read a config file; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<(Self, ConfigSource)> {
        if !path.exists() {
            return Ok((Self::default(), ConfigSource::Defaults(path.to_path_buf())));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {}", path.display(), e))?;
        Ok((config, ConfigSource::File(path.to_path_buf())))
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply LYRICMOOD_HOST, LYRICMOOD_PORT, LYRICMOOD_DEBUG and
    /// LYRICMOOD_ARTIFACT_DIR on top of the file values.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(host) = lookup("LYRICMOOD_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("LYRICMOOD_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("LYRICMOOD_PORT={port:?}: {e}"))?;
        }
        if let Some(debug) = lookup("LYRICMOOD_DEBUG") {
            self.server.debug = parse_flag(&debug)
                .ok_or_else(|| anyhow::anyhow!("LYRICMOOD_DEBUG={debug:?}: expected true or false"))?;
        }
        if let Some(dir) = lookup("LYRICMOOD_ARTIFACT_DIR") {
            self.artifacts.dir = dir;
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
