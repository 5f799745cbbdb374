use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use pi_engine::Pacing;
use pi_engine::sampler::DEFAULT_PREVIEW_POINTS;
use serde::Deserialize;

/// Settings loaded from an optional TOML file. Every key has a default.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub window: WindowSettings,
    pub animation: AnimationSettings,
    pub style: StyleSettings,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            title: "Monte Carlo \u{03c0}".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationSettings {
    pub tick_interval_ms: u64,
    pub idle_interval_ms: u64,
    pub drain_per_tick: usize,
    pub preview_points: usize,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        let pacing = Pacing::default();
        Self {
            tick_interval_ms: pacing.busy.as_millis() as u64,
            idle_interval_ms: pacing.idle.as_millis() as u64,
            drain_per_tick: pacing.drain_per_tick,
            preview_points: DEFAULT_PREVIEW_POINTS,
        }
    }
}

impl AnimationSettings {
    pub fn pacing(&self) -> Pacing {
        Pacing {
            busy: Duration::from_millis(self.tick_interval_ms),
            idle: Duration::from_millis(self.idle_interval_ms),
            drain_per_tick: self.drain_per_tick.max(1),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleSettings {
    pub point_radius: f32,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self { point_radius: 1.5 }
    }
}

impl Settings {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read settings from `path`, or use the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings = Self::from_toml(&text)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        tracing::info!(path = %path.display(), "settings loaded");
        Ok(settings)
    }
}
