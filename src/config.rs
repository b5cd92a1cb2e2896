use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Canvas;
use crate::foundation::error::{PodiumError, PodiumResult};
use crate::render::text::FontSet;

const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5_000;

/// Renderer configuration, usually read from a JSON file.
///
/// Every field has a default, so `{}` is a valid config (reference canvas, system fonts, no
/// watermark or badge, assets under the working directory, remote fetching on).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Output size.
    pub canvas: Canvas,
    /// Regular font file.
    pub font_regular: Option<PathBuf>,
    /// Bold font file; the regular font is reused when absent.
    pub font_bold: Option<PathBuf>,
    /// Watermark locator.
    pub watermark: String,
    /// Team badge locator.
    pub team_badge: String,
    /// Directory local locators are resolved against.
    pub assets_root: PathBuf,
    /// Per-request timeout for remote images.
    pub fetch_timeout_ms: u64,
    /// Whether `http(s)://` locators are fetched at all.
    pub allow_remote: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::REFERENCE,
            font_regular: None,
            font_bold: None,
            watermark: String::new(),
            team_badge: String::new(),
            assets_root: PathBuf::from("."),
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            allow_remote: true,
        }
    }
}

impl RenderConfig {
    /// Read a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> PodiumResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            PodiumError::config(format!("read config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_str(&text).map_err(|e| {
            PodiumError::config(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.canvas.validate()?;
        Ok(cfg)
    }

    /// Apply `PODIUM_*` overrides from the process environment.
    pub fn apply_env(self) -> PodiumResult<Self> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`:
    /// `PODIUM_FONT`, `PODIUM_FONT_BOLD`, `PODIUM_ASSETS_ROOT`, `PODIUM_FETCH_TIMEOUT_MS`.
    pub fn apply_env_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> PodiumResult<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_empty("PODIUM_FONT") {
            self.font_regular = Some(PathBuf::from(v));
        }
        if let Some(v) = non_empty("PODIUM_FONT_BOLD") {
            self.font_bold = Some(PathBuf::from(v));
        }
        if let Some(v) = non_empty("PODIUM_ASSETS_ROOT") {
            self.assets_root = PathBuf::from(v);
        }
        if let Some(v) = non_empty("PODIUM_FETCH_TIMEOUT_MS") {
            self.fetch_timeout_ms = v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&ms| ms > 0)
                .ok_or_else(|| {
                    PodiumError::config(format!(
                        "PODIUM_FETCH_TIMEOUT_MS must be a positive integer, got '{v}'"
                    ))
                })?;
        }
        Ok(self)
    }

    /// Remote fetch timeout.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Load the configured fonts, if a regular font is set.
    pub fn load_fonts(&self) -> PodiumResult<Option<FontSet>> {
        match &self.font_regular {
            Some(regular) => FontSet::load(regular, self.font_bold.as_deref()).map(Some),
            None => {
                if self.font_bold.is_some() {
                    return Err(PodiumError::config(
                        "font_bold is set but font_regular is missing",
                    ));
                }
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
