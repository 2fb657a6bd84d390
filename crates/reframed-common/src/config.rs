//! Application configuration.
//!
//! # Purpose
//! Holds the settings every other crate reads at construction time: logger
//! levels, which renderer is active, the page mount point, and the session
//! and login parameters used by the authorization layer.
//!
//! # Sources
//! Built-in defaults (the "null configuration") are overridden by
//! `REFRAMED_*` environment variables, which are in turn overridden by the
//! YAML file named in `REFRAMED_CONFIG`.
use crate::{Error, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::str::FromStr;

pub const DEFAULT_PAGE_ROOT: &str = "root";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_TOKEN_KEY: &str = "token";

/// Per-target logger levels keyed by tracing target, e.g.
/// `reframed_store -> debug`.
///
/// Targets are module paths, so a crate name covers all of its modules and
/// `reframed_store::dispatcher` narrows to one. An empty configuration leaves
/// every target at the default level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogConfiguration(BTreeMap<String, String>);

impl LogConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, target: impl Into<String>, level: impl Into<String>) -> Self {
        self.0.insert(target.into(), level.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render entries as `target=level` filter directives.
    pub fn directives(&self) -> impl Iterator<Item = String> + '_ {
        self.0
            .iter()
            .map(|(target, level)| format!("{target}={level}"))
    }
}

/// Which renderer the application mounts into the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererKind {
    /// Renders nothing. Used to exercise reducers without a UI.
    Null,
    #[default]
    Dom,
}

impl RendererKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RendererKind::Null => "null",
            RendererKind::Dom => "dom",
        }
    }

    pub fn produces_output(self) -> bool {
        matches!(self, RendererKind::Dom)
    }
}

impl std::fmt::Display for RendererKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RendererKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "null" => Ok(RendererKind::Null),
            // `react` is accepted for existing deployments.
            "dom" | "react" => Ok(RendererKind::Dom),
            other => Err(Error::Config(format!("unknown renderer: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub log_configuration: LogConfiguration,
    pub renderer: RendererKind,
    pub page_root: String,
    pub login_path: String,
    pub session_token_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_configuration: LogConfiguration::default(),
            renderer: RendererKind::Dom,
            page_root: DEFAULT_PAGE_ROOT.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            session_token_key: DEFAULT_TOKEN_KEY.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigOverride {
    log_configuration: Option<LogConfiguration>,
    renderer: Option<String>,
    page_root: Option<String>,
    login_path: Option<String>,
    session_token_key: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Ok(value) = std::env::var("REFRAMED_RENDERER") {
            config.renderer = value.parse().with_context(|| "parse REFRAMED_RENDERER")?;
        }
        if let Ok(value) = std::env::var("REFRAMED_PAGE_ROOT") {
            config.page_root = value;
        }
        if let Ok(value) = std::env::var("REFRAMED_LOGIN_PATH") {
            config.login_path = value;
        }
        if let Ok(value) = std::env::var("REFRAMED_TOKEN_KEY") {
            config.session_token_key = value;
        }
        Ok(config)
    }

    pub fn from_env_or_yaml() -> anyhow::Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("REFRAMED_CONFIG") {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read REFRAMED_CONFIG: {path}"))?;
            config.apply_yaml(&contents)?;
        }
        Ok(config)
    }

    /// Log the applied configuration. Call after logging is installed.
    pub fn announce(&self) {
        tracing::info!(
            renderer = %self.renderer,
            page_root = %self.page_root,
            login_path = %self.login_path,
            log_targets = self.log_configuration.0.len(),
            "set configuration"
        );
    }

    /// Layer a YAML document over the current values. Absent keys are kept.
    pub fn apply_yaml(&mut self, contents: &str) -> anyhow::Result<()> {
        let override_cfg: ConfigOverride =
            serde_yaml::from_str(contents).with_context(|| "parse config yaml")?;
        if let Some(value) = override_cfg.log_configuration {
            self.log_configuration = value;
        }
        if let Some(value) = override_cfg.renderer {
            self.renderer = value.parse().with_context(|| "parse renderer")?;
        }
        if let Some(value) = override_cfg.page_root {
            self.page_root = value;
        }
        if let Some(value) = override_cfg.login_path {
            self.login_path = value;
        }
        if let Some(value) = override_cfg.session_token_key {
            self.session_token_key = value;
        }
        Ok(())
    }
}
