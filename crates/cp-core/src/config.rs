use crate::error::{CoreError, Result};
use crate::palette::Palette;
use crate::validate::Limits;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub link: LinkConfig,
    pub game: GameConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Page that plays shared puzzles; links are built as `{base_url}?p=...`.
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Title shown for puzzles without a name.
    pub fallback_title: String,
    pub palette: Palette,
    pub limits: Limits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            link: LinkConfig {
                base_url: "http://localhost:8080/index.html".into(),
            },
            game: GameConfig {
                fallback_title: "Custom Puzzle".into(),
                palette: Palette::default(),
                limits: Limits::default(),
            },
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
            },
        }
    }
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.check()
    }

    /// Defaults overridden by `CP_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::default().apply_env(|key| std::env::var(key).ok())
    }

    /// Override fields from `CP_HOST`, `CP_PORT`, `CP_BASE_URL` and
    /// `CP_FALLBACK_TITLE` as returned by `lookup`.
    pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(host) = lookup("CP_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("CP_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| CoreError::InvalidConfig(format!("CP_PORT is not a port: {port:?}")))?;
        }
        if let Some(base_url) = lookup("CP_BASE_URL") {
            self.link.base_url = base_url;
        }
        if let Some(title) = lookup("CP_FALLBACK_TITLE") {
            self.game.fallback_title = title;
        }
        self.check()
    }

    fn check(self) -> Result<Self> {
        if self.game.palette.is_empty() {
            return Err(CoreError::InvalidConfig("palette has no colors".into()));
        }
        let limits = &self.game.limits;
        if limits.min_categories > limits.max_categories || limits.min_words > limits.max_words {
            return Err(CoreError::InvalidConfig("grid limits are inverted".into()));
        }
        if limits.max_categories > self.game.palette.len() {
            return Err(CoreError::InvalidConfig(format!(
                "palette has {} colors but up to {} categories are allowed",
                self.game.palette.len(),
                limits.max_categories
            )));
        }
        Ok(self)
    }
}
