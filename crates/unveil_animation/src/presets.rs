//! Ready-made components
//!
//! Each preset turns a component config into a running instance that can be
//! handed to the [`AnimationScheduler`](crate::AnimationScheduler).

use unveil_core::{ObserveOptions, Result};

use crate::ambient::{AmbientLoop, AuroraConfig, GradientConfig, ParticleConfig};
use crate::config::{BlurTextConfig, FadeInConfig, SplitTextConfig, StaggeredGridConfig};
use crate::counter::{CountUp, CountUpConfig};
use crate::descriptor::StyleProps;
use crate::easing::Easing;
use crate::reveal::{Reveal, RevealConfig};
use crate::spring::SpringConfig;
use crate::stagger::StaggerGroup;
use crate::transition::{Curve, TransitionSpec};

/// Delay before the first child of a spring-staggered group
const DELAY_CHILDREN: f32 = 0.1;

/// Duration of each blurred text segment
const BLUR_TEXT_DURATION: f32 = 0.5;

/// Opacity fade of the container around a spring-staggered group
const CONTAINER_FADE: TransitionSpec = TransitionSpec {
    duration: 0.3,
    delay: 0.0,
    curve: Curve::Ease {
        easing: Easing::EASE,
    },
};

/// Pre-built components
pub struct Preset;

impl Preset {
    // ========================================================================
    // Reveals
    // ========================================================================

    /// Fade in while sliding from `direction`
    pub fn fade_in(config: &FadeInConfig) -> Result<Reveal> {
        config.validate()?;

        let from = StyleProps::opacity(0.0).merged(&config.direction.offset(config.distance));
        let to = StyleProps::opacity(1.0).with_x(0.0).with_y(0.0);

        Reveal::new(
            RevealConfig::default()
                .observe(ObserveOptions::new(config.threshold).once(config.once))
                .from(from)
                .to(to)
                .transition(
                    TransitionSpec::ease(config.duration, Easing::EASE).with_delay(config.delay),
                ),
        )
    }

    /// Words or letters that sharpen out of a blur one after another.
    ///
    /// Always plays once.
    pub fn blur_text(text: &str, config: &BlurTextConfig) -> Result<Reveal> {
        config.validate()?;

        let reveal = RevealConfig::default()
            .observe(
                ObserveOptions::new(config.threshold)
                    .once(true)
                    .root_margin(config.root_margin),
            )
            .from(config.from_props())
            .to(config.to_props())
            .transition(TransitionSpec::ease(BLUR_TEXT_DURATION, Easing::EASE))
            .stagger(StaggerGroup::new(config.delay, 0.0)?);

        Reveal::with_labels(reveal, config.animate_by.split(text))
    }

    /// Words that flip up into place on a bouncy spring
    pub fn split_text(text: &str, config: &SplitTextConfig) -> Result<Reveal> {
        config.validate()?;

        let spring = SpringConfig::new(200.0, 12.0, 1.0);
        let reveal = RevealConfig::default()
            .observe(ObserveOptions::new(config.threshold).once(config.once))
            .from(StyleProps::opacity(0.0).with_y(20.0).with_rotate_x(-90.0))
            .to(StyleProps::opacity(1.0).with_y(0.0).with_rotate_x(0.0))
            .transition(TransitionSpec::spring(spring).with_duration(config.duration))
            .stagger(StaggerGroup::new(config.delay, DELAY_CHILDREN)?)
            .container_fade(CONTAINER_FADE);

        Reveal::with_labels(reveal, text.split(' '))
    }

    /// Grid items that rise and grow into place in order
    pub fn staggered_grid(item_count: usize, config: &StaggeredGridConfig) -> Result<Reveal> {
        config.validate()?;

        let spring = SpringConfig::new(100.0, 20.0, 1.0);
        let reveal = RevealConfig::default()
            .observe(ObserveOptions::new(config.threshold).once(config.once))
            .from(StyleProps::opacity(0.0).with_y(30.0).with_scale(0.95))
            .to(StyleProps::opacity(1.0).with_y(0.0).with_scale(1.0))
            .transition(TransitionSpec::spring(spring).with_duration(config.duration))
            .stagger(StaggerGroup::new(config.stagger_delay, DELAY_CHILDREN)?)
            .container_fade(CONTAINER_FADE);

        Reveal::with_children(reveal, item_count)
    }

    // ========================================================================
    // Numbers
    // ========================================================================

    pub fn count_up(config: &CountUpConfig) -> Result<CountUp> {
        CountUp::new(config.clone())
    }

    // ========================================================================
    // Ambient loops
    // ========================================================================

    pub fn aurora(config: &AuroraConfig) -> Result<AmbientLoop> {
        AmbientLoop::aurora(config)
    }

    pub fn floating_particles(config: &ParticleConfig) -> Result<AmbientLoop> {
        AmbientLoop::particles(config)
    }

    pub fn gradient_text(config: &GradientConfig) -> Result<AmbientLoop> {
        AmbientLoop::gradient(config)
    }
}
