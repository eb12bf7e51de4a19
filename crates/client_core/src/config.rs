use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use shared::domain::Theme;

use crate::scroll::DEFAULT_SCROLL_THRESHOLD_PX;

pub const DEFAULT_SETTINGS_FILE: &str = "flightpath.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub screen_timeout_ms: u64,
    pub chrome_timeout_ms: u64,
    pub item_timeout_ms: u64,
    pub menu_timeout_ms: u64,
    pub scroll_threshold_px: f32,
    pub payment_delay_ms: u64,
    pub max_passengers: u8,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_timeout_ms: 600,
            chrome_timeout_ms: 400,
            item_timeout_ms: 400,
            menu_timeout_ms: 600,
            scroll_threshold_px: DEFAULT_SCROLL_THRESHOLD_PX,
            payment_delay_ms: 2000,
            max_passengers: 16,
            theme: Theme::Light,
        }
    }
}

/// Durations handed to the orchestrators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timings {
    pub screen: Duration,
    pub chrome: Duration,
    pub item: Duration,
    pub menu: Duration,
    pub scroll_threshold_px: f32,
}

impl Default for Timings {
    fn default() -> Self {
        Settings::default().timings()
    }
}

impl Settings {
    pub fn timings(&self) -> Timings {
        Timings {
            screen: Duration::from_millis(self.screen_timeout_ms),
            chrome: Duration::from_millis(self.chrome_timeout_ms),
            item: Duration::from_millis(self.item_timeout_ms),
            menu: Duration::from_millis(self.menu_timeout_ms),
            scroll_threshold_px: self.scroll_threshold_px,
        }
    }

    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }
}

/// Defaults, then the TOML file if present, then `APP__*` environment overrides.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));
    let mut settings = if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        parse_settings(&raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?
    } else {
        Settings::default()
    };
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    Ok(settings)
}

pub fn parse_settings(raw: &str) -> anyhow::Result<Settings> {
    Ok(toml::from_str::<Settings>(raw)?)
}

fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    fn parsed<T: std::str::FromStr>(raw: Option<String>) -> Option<T> {
        raw.and_then(|v| v.trim().parse().ok())
    }

    if let Some(v) = parsed(var("APP__SCREEN_TIMEOUT_MS")) {
        settings.screen_timeout_ms = v;
    }
    if let Some(v) = parsed(var("APP__CHROME_TIMEOUT_MS")) {
        settings.chrome_timeout_ms = v;
    }
    if let Some(v) = parsed(var("APP__ITEM_TIMEOUT_MS")) {
        settings.item_timeout_ms = v;
    }
    if let Some(v) = parsed(var("APP__MENU_TIMEOUT_MS")) {
        settings.menu_timeout_ms = v;
    }
    if let Some(v) = parsed(var("APP__SCROLL_THRESHOLD_PX")) {
        settings.scroll_threshold_px = v;
    }
    if let Some(v) = parsed(var("APP__PAYMENT_DELAY_MS")) {
        settings.payment_delay_ms = v;
    }
    if let Some(v) = parsed::<u8>(var("APP__MAX_PASSENGERS")) {
        settings.max_passengers = v.max(1);
    }
    if let Some(theme) = var("APP__THEME").as_deref().and_then(Theme::parse) {
        settings.theme = theme;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
