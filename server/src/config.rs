use std::fmt;
use std::path::Path;

use anyhow::Context;
use serde::de::Error;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    pub site_base_url_path: String,
    pub auth_base_url: String,
    pub kratos_api_url: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

fn default_host() -> String {
    "::".to_owned()
}

fn default_login_path() -> String {
    "/auth/login".to_owned()
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AppOptions {
    /// Fail template renders that reference missing fields.
    #[serde(default = "default_strict_mode")]
    pub strict_mode: bool,
    #[serde(default)]
    pub images: ImagesConfig,
    #[serde(default)]
    pub server_actions: ServerActionsConfig,
}

fn default_strict_mode() -> bool {
    true
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            strict_mode: default_strict_mode(),
            images: Default::default(),
            server_actions: Default::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct ImagesConfig {
    /// Origins remote images may be loaded from. Always empty: no remote
    /// image origin is permitted.
    #[serde(default, deserialize_with = "no_remote_patterns")]
    pub remote_patterns: Vec<String>,
}

fn no_remote_patterns<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let patterns = Vec::<serde::de::IgnoredAny>::deserialize(deserializer)?;
    if !patterns.is_empty() {
        return Err(D::Error::custom(format!(
            "remote images are not permitted, got {} remote pattern(s)",
            patterns.len()
        )));
    }
    Ok(Vec::new())
}

#[derive(Clone, Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct ServerActionsConfig {
    #[serde(default)]
    pub body_size_limit: BodySize,
}

/// Size string such as "2mb" together with its value in bytes.
///
/// Whole numbers only, "1.5mb" is rejected. Units are b, kb, mb and gb in
/// multiples of 1024.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BodySize {
    text: String,
    bytes: usize,
}

impl BodySize {
    pub fn parse(s: &str) -> Result<Self, String> {
        let lower = s.trim().to_ascii_lowercase();
        let split = lower
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(lower.len());
        let (digits, unit) = lower.split_at(split);
        let value: usize = digits
            .parse()
            .map_err(|e| format!("Invalid size '{s}': {e}"))?;
        let multiplier: usize = match unit.trim() {
            "" | "b" => 1,
            "kb" => 1 << 10,
            "mb" => 1 << 20,
            "gb" => 1 << 30,
            u => return Err(format!("Invalid size unit '{u}' in '{s}'")),
        };
        let bytes = value
            .checked_mul(multiplier)
            .ok_or_else(|| format!("Size '{s}' is too large"))?;
        Ok(Self {
            text: s.to_owned(),
            bytes,
        })
    }

    pub fn bytes(&self) -> usize {
        self.bytes
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Default for BodySize {
    fn default() -> Self {
        Self {
            text: "2mb".to_owned(),
            bytes: 2 << 20,
        }
    }
}

impl fmt::Display for BodySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for BodySize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for BodySize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BodySize::parse(&s).map_err(D::Error::custom)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server_config: ServerConfig,
    #[serde(default)]
    pub app: AppOptions,
}

pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Config> {
    let path = path.as_ref();
    let config = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&config).context("Failed to parse config")
}

pub fn validate(cfg: &Config) -> Result<(), String> {
    if !cfg.app.images.remote_patterns.is_empty() {
        return Err("remote image patterns are not allowed".to_owned());
    }
    if cfg.app.server_actions.body_size_limit.bytes() == 0 {
        return Err("server_actions.body_size_limit must be positive".to_owned());
    }
    if !cfg.server_config.login_path.starts_with('/') {
        return Err(format!(
            "login_path must be an absolute path, got '{}'",
            cfg.server_config.login_path
        ));
    }
    Ok(())
}
