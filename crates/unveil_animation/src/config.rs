//! Component configuration
//!
//! Every record deserializes with `#[serde(default)]`, so a TOML section only
//! needs the fields that differ from the stock component.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use unveil_core::error::{ensure_non_negative, ensure_positive, ensure_unit, Result};
use unveil_core::{RootMargin, UnveilError};

use crate::ambient::{AuroraConfig, GradientConfig, ParticleConfig};
use crate::counter::CountUpConfig;
use crate::descriptor::StyleProps;

/// Side a fade-in slides in from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
    None,
}

impl Direction {
    /// Starting offset for a slide of `distance` pixels
    pub fn offset(&self, distance: f32) -> StyleProps {
        match self {
            Direction::Up => StyleProps::default().with_y(distance),
            Direction::Down => StyleProps::default().with_y(-distance),
            Direction::Left => StyleProps::default().with_x(distance),
            Direction::Right => StyleProps::default().with_x(-distance),
            Direction::None => StyleProps::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeInConfig {
    pub delay: f32,
    pub duration: f32,
    pub direction: Direction,
    /// Slide distance in pixels
    pub distance: f32,
    pub threshold: f32,
    pub once: bool,
}

impl Default for FadeInConfig {
    fn default() -> Self {
        Self {
            delay: 0.0,
            duration: 0.6,
            direction: Direction::Up,
            distance: 40.0,
            threshold: 0.1,
            once: true,
        }
    }
}

impl FadeInConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("delay", self.delay)?;
        ensure_positive("duration", self.duration)?;
        ensure_unit("threshold", self.threshold)
    }
}

/// How text is split into animated segments
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimateBy {
    #[default]
    Words,
    Letters,
}

impl AnimateBy {
    /// Words split on single spaces; letters split per character
    pub fn split(&self, text: &str) -> Vec<String> {
        match self {
            AnimateBy::Words => text.split(' ').map(String::from).collect(),
            AnimateBy::Letters => text.chars().map(String::from).collect(),
        }
    }
}

/// Side blurred text rises from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Top,
    #[default]
    Bottom,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurTextConfig {
    /// Delay between segments, in seconds
    pub delay: f32,
    pub animate_by: AnimateBy,
    pub direction: TextDirection,
    pub threshold: f32,
    pub root_margin: RootMargin,
    /// Replaces the default `{blur 10, opacity 0, y ±20}`
    pub animation_from: Option<StyleProps>,
    /// Replaces the default `{blur 0, opacity 1, y 0}`
    pub animation_to: Option<StyleProps>,
}

impl Default for BlurTextConfig {
    fn default() -> Self {
        Self {
            delay: 0.05,
            animate_by: AnimateBy::Words,
            direction: TextDirection::Bottom,
            threshold: 0.1,
            root_margin: RootMargin::ZERO,
            animation_from: None,
            animation_to: None,
        }
    }
}

impl BlurTextConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("delay", self.delay)?;
        ensure_unit("threshold", self.threshold)
    }

    pub fn from_props(&self) -> StyleProps {
        self.animation_from.clone().unwrap_or_else(|| {
            let rise = match self.direction {
                TextDirection::Bottom => 20.0,
                TextDirection::Top => -20.0,
            };
            StyleProps::default()
                .with_filter("blur(10px)")
                .with_opacity(0.0)
                .with_y(rise)
        })
    }

    pub fn to_props(&self) -> StyleProps {
        self.animation_to.clone().unwrap_or_else(|| {
            StyleProps::default()
                .with_filter("blur(0px)")
                .with_opacity(1.0)
                .with_y(0.0)
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitTextConfig {
    /// Delay between words, in seconds
    pub delay: f32,
    pub duration: f32,
    pub threshold: f32,
    pub once: bool,
}

impl Default for SplitTextConfig {
    fn default() -> Self {
        Self {
            delay: 0.03,
            duration: 0.5,
            threshold: 0.1,
            once: true,
        }
    }
}

impl SplitTextConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("delay", self.delay)?;
        ensure_positive("duration", self.duration)?;
        ensure_unit("threshold", self.threshold)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaggeredGridConfig {
    pub stagger_delay: f32,
    pub duration: f32,
    pub threshold: f32,
    pub once: bool,
}

impl Default for StaggeredGridConfig {
    fn default() -> Self {
        Self {
            stagger_delay: 0.1,
            duration: 0.5,
            threshold: 0.1,
            once: true,
        }
    }
}

impl StaggeredGridConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("stagger_delay", self.stagger_delay)?;
        ensure_positive("duration", self.duration)?;
        ensure_unit("threshold", self.threshold)
    }
}

/// Page-wide component settings (`unveil.toml`)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnveilConfig {
    pub fade_in: FadeInConfig,
    pub blur_text: BlurTextConfig,
    pub split_text: SplitTextConfig,
    pub staggered_grid: StaggeredGridConfig,
    pub count_up: CountUpConfig,
    pub aurora: AuroraConfig,
    pub particles: ParticleConfig,
    pub gradient_text: GradientConfig,
}

impl UnveilConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: UnveilConfig =
            toml::from_str(content).map_err(|e| UnveilError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file, or from `unveil.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join("unveil.toml")
        } else {
            path.to_path_buf()
        };

        let content = fs::read_to_string(&config_path).map_err(|e| {
            UnveilError::Config(format!("failed to read {}: {e}", config_path.display()))
        })?;

        tracing::debug!(path = %config_path.display(), "loading config");
        Self::from_toml_str(&content)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| UnveilError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        self.fade_in.validate()?;
        self.blur_text.validate()?;
        self.split_text.validate()?;
        self.staggered_grid.validate()?;
        self.count_up.validate()?;
        self.aurora.validate()?;
        self.particles.validate()?;
        self.gradient_text.validate()
    }
}
