//! Ambient loops
//!
//! Decorative motion that is independent of visibility: drifting color blobs,
//! floating particles and sweeping gradients. Generators randomize layout once
//! at creation; every entity then loops its keyframe track forever.

use serde::{Deserialize, Serialize};
use unveil_core::error::{ensure_non_negative, ensure_positive, ensure_unit, Result};
use unveil_core::UnveilError;

use crate::descriptor::StyleProps;
use crate::easing::Easing;
use crate::keyframe::KeyframeTrack;
use crate::rng::LayoutRng;

/// Upper bound of the random phase delay, in seconds
pub const MAX_PHASE: f32 = 5.0;

fn default_palette() -> Vec<String> {
    ["#D76D77", "#7BE1A4", "#979BFF", "#ffca7b"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_gradient() -> Vec<String> {
    ["#D76D77", "#ffca7b", "#7BE1A4", "#979BFF", "#D76D77"]
        .into_iter()
        .map(String::from)
        .collect()
}

// ============================================================================
// Particles
// ============================================================================

/// Floating particle field options
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    pub color: String,
    /// Smallest particle diameter in pixels
    pub min_size: f32,
    /// Largest particle diameter in pixels
    pub max_size: f32,
    /// Base loop period in seconds
    pub speed: f32,
    /// Fixed seed for a reproducible layout; fresh every time when unset
    pub seed: Option<u64>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 30,
            color: "rgba(215, 109, 119, 0.3)".to_string(),
            min_size: 2.0,
            max_size: 6.0,
            speed: 20.0,
            seed: None,
        }
    }
}

impl ParticleConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("min_size", self.min_size)?;
        ensure_positive("max_size", self.max_size)?;
        if self.max_size < self.min_size {
            return Err(UnveilError::config(
                "max_size",
                format!("must be at least min_size ({})", self.min_size),
            ));
        }
        ensure_positive("speed", self.speed)
    }

    /// Range every generated period falls in
    pub fn period_range(&self) -> (f32, f32) {
        (self.speed, self.speed * 1.5)
    }
}

/// A single floating particle
#[derive(Clone, Debug, PartialEq)]
pub struct AmbientParticle {
    /// Horizontal position in percent of the container
    pub x: f32,
    /// Vertical position in percent of the container
    pub y: f32,
    /// Diameter in pixels
    pub size: f32,
    /// Loop period in seconds
    pub period: f32,
    /// Delay before the first loop, in seconds
    pub phase: f32,
    track: KeyframeTrack,
}

impl AmbientParticle {
    fn new(x: f32, y: f32, size: f32, period: f32, phase: f32) -> Self {
        let track = KeyframeTrack::evenly_spaced(
            period,
            [
                StyleProps::opacity(0.0).with_y(0.0),
                StyleProps::opacity(1.0).with_y(-100.0),
                StyleProps::opacity(0.0).with_y(0.0),
            ],
            Easing::EaseInOut,
        )
        .delay(phase);

        Self {
            x,
            y,
            size,
            period,
            phase,
            track,
        }
    }

    /// Vertical drift offset and opacity `t` seconds after mount
    pub fn sample(&self, t: f32) -> StyleProps {
        self.track.sample(t)
    }

    pub fn track(&self) -> &KeyframeTrack {
        &self.track
    }
}

/// Lay out a particle field.
///
/// Periods are uniform in `[speed, 1.5 * speed]`.
pub fn generate_particles(config: &ParticleConfig) -> Result<Vec<AmbientParticle>> {
    config.validate()?;

    let mut rng = LayoutRng::from_seed(config.seed);
    let (min_period, max_period) = config.period_range();

    let particles: Vec<AmbientParticle> = (0..config.count)
        .map(|_| {
            let x = rng.range(0.0, 100.0);
            let y = rng.range(0.0, 100.0);
            let size = rng.range(config.min_size, config.max_size);
            let period = rng.range(min_period, max_period);
            let phase = rng.range(0.0, MAX_PHASE);
            AmbientParticle::new(x, y, size, period, phase)
        })
        .collect();

    tracing::debug!(count = particles.len(), speed = config.speed, "particles generated");
    Ok(particles)
}

// ============================================================================
// Aurora blobs
// ============================================================================

/// Aurora background options
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuroraConfig {
    /// One blob per color
    pub colors: Vec<String>,
    /// Base loop period in seconds
    pub speed: f32,
    /// Blur radius in pixels
    pub blur: f32,
    pub opacity: f32,
    pub seed: Option<u64>,
}

impl Default for AuroraConfig {
    fn default() -> Self {
        Self {
            colors: default_palette(),
            speed: 10.0,
            blur: 100.0,
            opacity: 0.3,
            seed: None,
        }
    }
}

impl AuroraConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("speed", self.speed)?;
        ensure_non_negative("blur", self.blur)?;
        ensure_unit("opacity", self.opacity)
    }
}

/// A drifting radial color blob
#[derive(Clone, Debug, PartialEq)]
pub struct AmbientBlob {
    pub color: String,
    /// Loop period in seconds
    pub period: f32,
    pub blur: f32,
    pub opacity: f32,
    track: KeyframeTrack,
}

impl AmbientBlob {
    /// Offset (percent), scale, blur and opacity `t` seconds after mount
    pub fn sample(&self, t: f32) -> StyleProps {
        let mut props = self.track.sample(t);
        props.blur = Some(self.blur);
        props.opacity = Some(self.opacity);
        props
    }

    /// The three randomized `(x, y)` waypoints, in percent
    pub fn waypoints(&self) -> Vec<(f32, f32)> {
        self.track
            .waypoints()
            .iter()
            .map(|w| w.properties.resolved_translate())
            .collect()
    }

    pub fn track(&self) -> &KeyframeTrack {
        &self.track
    }
}

/// One blob per color; blob `i` loops every `speed + 2 * i` seconds
pub fn generate_blobs(config: &AuroraConfig) -> Result<Vec<AmbientBlob>> {
    config.validate()?;

    let mut rng = LayoutRng::from_seed(config.seed);

    let blobs: Vec<AmbientBlob> = config
        .colors
        .iter()
        .enumerate()
        .map(|(index, color)| {
            let period = config.speed + index as f32 * 2.0;
            let xs = [0; 3].map(|_| rng.range(0.0, 100.0));
            let ys = [0; 3].map(|_| rng.range(0.0, 100.0));
            let scales = [1.0, 1.2, 1.0];

            let frames = (0..3).map(|k| {
                StyleProps::default()
                    .with_x(xs[k])
                    .with_y(ys[k])
                    .with_scale(scales[k])
            });

            AmbientBlob {
                color: color.clone(),
                period,
                blur: config.blur,
                opacity: config.opacity,
                track: KeyframeTrack::evenly_spaced(period, frames, Easing::EaseInOut),
            }
        })
        .collect();

    tracing::debug!(count = blobs.len(), speed = config.speed, "aurora blobs generated");
    Ok(blobs)
}

// ============================================================================
// Gradient sweep
// ============================================================================

/// Animated gradient text options
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientConfig {
    pub colors: Vec<String>,
    /// Seconds for one full sweep and back
    pub animation_speed: f32,
    pub show_border: bool,
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            colors: default_gradient(),
            animation_speed: 8.0,
            show_border: false,
        }
    }
}

impl GradientConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("animation_speed", self.animation_speed)
    }
}

/// Background-position sweep across a horizontal gradient
#[derive(Clone, Debug, PartialEq)]
pub struct GradientSweep {
    colors: Vec<String>,
    show_border: bool,
    track: KeyframeTrack,
}

impl GradientSweep {
    pub fn new(config: &GradientConfig) -> Result<Self> {
        config.validate()?;

        let track = KeyframeTrack::evenly_spaced(
            config.animation_speed,
            [0.0, 100.0, 0.0].map(|p| StyleProps::default().with_background_position(p)),
            Easing::Linear,
        );

        Ok(Self {
            colors: config.colors.clone(),
            show_border: config.show_border,
            track,
        })
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn show_border(&self) -> bool {
        self.show_border
    }

    pub fn period(&self) -> f32 {
        self.track.period()
    }

    /// CSS `linear-gradient` the sweep moves across
    pub fn background_image(&self) -> String {
        format!("linear-gradient(90deg, {})", self.colors.join(", "))
    }

    /// Background position (percent) and color stops `t` seconds after mount
    pub fn sample(&self, t: f32) -> StyleProps {
        let mut props = self.track.sample(t);
        props.color_stops = Some(self.colors.clone());
        props
    }
}

// ============================================================================
// Running loops
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum AmbientKind {
    Particles(Vec<AmbientParticle>),
    Aurora(Vec<AmbientBlob>),
    Gradient(GradientSweep),
}

/// A mounted ambient effect and its clock
#[derive(Clone, Debug, PartialEq)]
pub struct AmbientLoop {
    kind: AmbientKind,
    elapsed: f32,
}

impl AmbientLoop {
    pub fn new(kind: AmbientKind) -> Self {
        Self { kind, elapsed: 0.0 }
    }

    pub fn particles(config: &ParticleConfig) -> Result<Self> {
        generate_particles(config).map(|p| Self::new(AmbientKind::Particles(p)))
    }

    pub fn aurora(config: &AuroraConfig) -> Result<Self> {
        generate_blobs(config).map(|b| Self::new(AmbientKind::Aurora(b)))
    }

    pub fn gradient(config: &GradientConfig) -> Result<Self> {
        GradientSweep::new(config).map(|g| Self::new(AmbientKind::Gradient(g)))
    }

    pub fn kind(&self) -> &AmbientKind {
        &self.kind
    }

    /// Seconds since mount
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Number of animated entities
    pub fn len(&self) -> usize {
        match &self.kind {
            AmbientKind::Particles(p) => p.len(),
            AmbientKind::Aurora(b) => b.len(),
            AmbientKind::Gradient(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn tick(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
    }

    /// Current styles of every entity, in generation order
    pub fn frames(&self) -> Vec<StyleProps> {
        let t = self.elapsed;
        match &self.kind {
            AmbientKind::Particles(p) => p.iter().map(|p| p.sample(t)).collect(),
            AmbientKind::Aurora(b) => b.iter().map(|b| b.sample(t)).collect(),
            AmbientKind::Gradient(g) => vec![g.sample(t)],
        }
    }
}
