//! Unveil Animation Engine
//!
//! Scroll reveals, springs, staggered groups, count-ups and ambient loops,
//! all advanced by an explicit per-frame `tick(dt)`.
//!
//! # Features
//!
//! - **Springs**: closed-form damped oscillators that preserve velocity when
//!   retargeted; `bounce = 0` never overshoots
//! - **Reveals**: visibility-triggered transitions with staggered children
//! - **Ambient loops**: randomized, perpetually repeating keyframe tracks
//! - **Presets**: fade-in, blur/split text, staggered grid, count-up, aurora,
//!   floating particles and gradient text
//!
//! # Example
//!
//! ```rust
//! use unveil_animation::{AnimationScheduler, CountUpConfig, Preset};
//!
//! let mut scheduler = AnimationScheduler::new();
//! let counter = scheduler.add_counter(Preset::count_up(&CountUpConfig::new(1000.0)).unwrap());
//!
//! scheduler.set_counter_intersection(counter, 1.0);
//! for _ in 0..120 {
//!     scheduler.tick(1.0 / 60.0);
//! }
//! assert_eq!(scheduler.counter_display(counter).as_deref(), Some("1000"));
//! ```

pub mod ambient;
pub mod config;
pub mod counter;
pub mod descriptor;
pub mod easing;
pub mod keyframe;
pub mod presets;
pub mod reveal;
pub mod rng;
pub mod scheduler;
pub mod spring;
pub mod stagger;
pub mod transition;
pub mod tween;

pub use ambient::{
    generate_blobs, generate_particles, AmbientBlob, AmbientKind, AmbientLoop, AmbientParticle,
    AuroraConfig, GradientConfig, GradientSweep, ParticleConfig,
};
pub use config::{
    AnimateBy, BlurTextConfig, Direction, FadeInConfig, SplitTextConfig, StaggeredGridConfig,
    TextDirection, UnveilConfig,
};
pub use counter::{CountUp, CountUpConfig, NumberFormat};
pub use descriptor::{StyleKey, StyleKeys, StyleProps};
pub use easing::Easing;
pub use keyframe::{KeyframeTrack, Waypoint};
pub use presets::Preset;
pub use reveal::{Reveal, RevealChild, RevealConfig};
pub use rng::LayoutRng;
pub use scheduler::{AmbientId, AnimationScheduler, CounterId, RevealId};
pub use spring::{Spring, SpringConfig};
pub use stagger::{schedule, Delays, StaggerGroup};
pub use transition::{Curve, TransitionSpec};
pub use tween::{interpolate, Tween};
pub use unveil_core::{ObserveOptions, Rect, RevealState, Result, RootMargin, UnveilError};
