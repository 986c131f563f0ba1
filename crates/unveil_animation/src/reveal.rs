//! Scroll-triggered reveals
//!
//! A [`Reveal`] owns one visibility observer, one reveal state machine and
//! one or more children. Each child animates the attributes shared by the
//! `from` and `to` descriptors through its own springs or tweens, starting
//! after its staggered delay.
//!
//! # Example
//!
//! ```rust
//! use unveil_animation::{Reveal, RevealConfig, StyleProps};
//!
//! let config = RevealConfig::default()
//!     .from(StyleProps::opacity(0.0).with_y(40.0))
//!     .to(StyleProps::opacity(1.0).with_y(0.0));
//! let mut reveal = Reveal::new(config).unwrap();
//!
//! reveal.set_intersection(0.8);
//! for _ in 0..120 {
//!     reveal.tick(1.0 / 60.0);
//! }
//! assert_eq!(reveal.frame(0).unwrap().opacity, Some(1.0));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use unveil_core::{
    ObserveOptions, Rect, Result, RevealEvent, RevealMachine, RevealState, VisibilityChange,
    VisibilityObserver,
};

use crate::descriptor::{StyleKey, StyleKeys, StyleProps};
use crate::easing::Easing;
use crate::spring::{Spring, SpringConfig};
use crate::stagger::StaggerGroup;
use crate::transition::{Curve, TransitionSpec};
use crate::tween::Tween;

/// Everything needed to build a [`Reveal`]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub observe: ObserveOptions,
    pub from: StyleProps,
    pub to: StyleProps,
    pub transition: TransitionSpec,
    /// Cascade children; `None` starts every child together
    pub stagger: Option<StaggerGroup>,
    /// Fade the whole group's opacity alongside its children
    pub container_fade: Option<TransitionSpec>,
}

impl RevealConfig {
    pub fn observe(mut self, observe: ObserveOptions) -> Self {
        self.observe = observe;
        self
    }

    pub fn from(mut self, from: StyleProps) -> Self {
        self.from = from;
        self
    }

    pub fn to(mut self, to: StyleProps) -> Self {
        self.to = to;
        self
    }

    pub fn transition(mut self, transition: TransitionSpec) -> Self {
        self.transition = transition;
        self
    }

    pub fn stagger(mut self, stagger: StaggerGroup) -> Self {
        self.stagger = Some(stagger);
        self
    }

    pub fn container_fade(mut self, transition: TransitionSpec) -> Self {
        self.container_fade = Some(transition);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.observe.validate()?;
        self.transition.validate()?;
        if let Some(stagger) = &self.stagger {
            stagger.validate()?;
        }
        if let Some(fade) = &self.container_fade {
            fade.validate()?;
        }
        Ok(())
    }
}

/// Which descriptor a leg is heading toward
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    From,
    To,
}

#[derive(Clone, Debug)]
enum Driver {
    Spring(Spring),
    Tween(Tween),
}

impl Driver {
    fn value(&self) -> f32 {
        match self {
            Driver::Spring(spring) => spring.value(),
            Driver::Tween(tween) => tween.value(),
        }
    }

    fn retarget(&mut self, target: f32, duration: f32) {
        match self {
            Driver::Spring(spring) => spring.set_target(target),
            Driver::Tween(tween) => {
                if tween.target() != target || !tween.is_finished() {
                    tween.retarget(target, duration);
                }
            }
        }
    }

    fn step(&mut self, dt: f32) {
        match self {
            Driver::Spring(spring) => spring.step(dt),
            Driver::Tween(tween) => tween.step(dt),
        }
    }

    fn is_settled(&self) -> bool {
        match self {
            Driver::Spring(spring) => spring.is_settled(),
            Driver::Tween(tween) => tween.is_finished(),
        }
    }
}

#[derive(Clone, Debug)]
struct Channel {
    key: StyleKey,
    driver: Driver,
}

/// One animated element of a reveal
#[derive(Clone, Debug)]
pub struct RevealChild {
    label: Option<String>,
    /// Start offset within an entering leg
    delay: f32,
    /// Leg-clock time at which the pending retarget fires
    pending: Option<f32>,
    channels: SmallVec<[Channel; 4]>,
}

impl RevealChild {
    /// Text segment or other caller-supplied tag
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Start offset within an entering leg, in seconds
    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Whether the child is still waiting for its delay to elapse
    pub fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }

    fn is_settled(&self) -> bool {
        self.pending.is_none() && self.channels.iter().all(|c| c.driver.is_settled())
    }

    fn step(&mut self, dt: f32) {
        for channel in self.channels.iter_mut() {
            channel.driver.step(dt);
        }
    }

    fn retarget(&mut self, target: &StyleProps, duration: f32) {
        for channel in self.channels.iter_mut() {
            if let Some(value) = target.get(channel.key) {
                channel.driver.retarget(value, duration);
            }
        }
    }
}

/// A scroll-triggered animation over one or more children
#[derive(Clone, Debug)]
pub struct Reveal {
    observer: VisibilityObserver,
    machine: RevealMachine,
    from: StyleProps,
    to: StyleProps,
    transition: TransitionSpec,
    keys: StyleKeys,
    children: Vec<RevealChild>,
    /// Group opacity, present when the container fades too
    container: Option<(Driver, f32)>,
    /// Seconds since the current leg started
    clock: f32,
}

impl Reveal {
    /// Single-child reveal
    pub fn new(config: RevealConfig) -> Result<Self> {
        Self::build(config, vec![None])
    }

    /// Reveal with `count` unlabeled children
    pub fn with_children(config: RevealConfig, count: usize) -> Result<Self> {
        Self::build(config, vec![None; count])
    }

    /// Reveal with one child per label, in order
    pub fn with_labels<I, S>(config: RevealConfig, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(config, labels.into_iter().map(|l| Some(l.into())).collect())
    }

    fn build(config: RevealConfig, labels: Vec<Option<String>>) -> Result<Self> {
        config.validate()?;

        let RevealConfig {
            observe,
            from,
            to,
            transition,
            stagger,
            container_fade,
        } = config;

        let observer = VisibilityObserver::new(observe)?;
        let machine = RevealMachine::new(observer.options().once);
        let spring = transition.spring_config()?;
        let keys = from.common_keys(&to);

        let children = labels
            .into_iter()
            .enumerate()
            .map(|(index, label)| {
                let stagger_delay = stagger.map_or(0.0, |s| s.delay_for_index(index));
                RevealChild {
                    label,
                    delay: transition.delay + stagger_delay,
                    pending: None,
                    channels: keys
                        .iter()
                        .map(|&key| {
                            let start = from.get(key).unwrap_or(0.0);
                            Channel {
                                key,
                                driver: initial_driver(&transition, spring, start),
                            }
                        })
                        .collect(),
                }
            })
            .collect();

        let container = match container_fade {
            Some(fade) => {
                let driver = initial_driver(&fade, fade.spring_config()?, 0.0);
                Some((driver, fade.duration))
            }
            None => None,
        };

        Ok(Self {
            observer,
            machine,
            from,
            to,
            transition,
            keys,
            children,
            container,
            clock: 0.0,
        })
    }

    pub fn state(&self) -> RevealState {
        self.machine.current_state()
    }

    pub fn machine(&self) -> &RevealMachine {
        &self.machine
    }

    pub fn observer(&self) -> &VisibilityObserver {
        &self.observer
    }

    pub fn is_visible(&self) -> bool {
        self.observer.is_visible()
    }

    pub fn children(&self) -> &[RevealChild] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Attributes that interpolate (present in both `from` and `to`)
    pub fn animated_keys(&self) -> &[StyleKey] {
        &self.keys
    }

    /// Whether further ticks can change any output
    pub fn is_animating(&self) -> bool {
        self.state().is_animating()
    }

    /// A `once` reveal that has finished; it needs no more ticks or ratios
    pub fn is_finished(&self) -> bool {
        self.machine.is_terminal()
    }

    /// Feed the current intersection ratio of the observed region
    pub fn set_intersection(&mut self, ratio: f32) -> Option<RevealState> {
        let change = self.observer.observe(ratio)?;
        self.apply(change)
    }

    /// Compute the intersection ratio from geometry and feed it
    pub fn observe_rect(&mut self, region: &Rect, viewport: &Rect) -> Option<RevealState> {
        let change = self.observer.observe_rect(region, viewport)?;
        self.apply(change)
    }

    fn apply(&mut self, change: VisibilityChange) -> Option<RevealState> {
        let (event, side) = match change {
            VisibilityChange::Entered => (RevealEvent::Show, Side::To),
            VisibilityChange::Exited => (RevealEvent::Hide, Side::From),
        };

        let state = self.machine.send(event)?;
        self.begin_leg(side);
        Some(state)
    }

    fn begin_leg(&mut self, side: Side) {
        self.clock = 0.0;

        if let Some((driver, duration)) = &mut self.container {
            let opacity = match side {
                Side::To => 1.0,
                Side::From => 0.0,
            };
            if self.keys.is_empty() {
                *driver = Driver::Tween(Tween::resting(opacity, Easing::Linear));
            } else {
                driver.retarget(opacity, *duration);
            }
        }

        if self.keys.is_empty() {
            let from_keys = self.from.keys();
            let to_keys = self.to.keys();
            tracing::debug!(
                from = ?from_keys.as_slice(),
                to = ?to_keys.as_slice(),
                "from/to share no animatable attributes, completing immediately"
            );
            self.machine.send(RevealEvent::Settled);
            return;
        }

        tracing::debug!(?side, children = self.children.len(), "reveal leg started");

        for child in self.children.iter_mut() {
            child.pending = Some(match side {
                Side::To => child.delay,
                Side::From => self.transition.delay,
            });
        }
        self.fire_due(side, 0.0);
    }

    /// Retarget children whose start time has arrived, stepping the part of
    /// `dt` before the start toward the old target and the rest toward the
    /// new one.
    fn fire_due(&mut self, side: Side, dt: f32) {
        let target = match side {
            Side::To => &self.to,
            Side::From => &self.from,
        };
        let duration = self.transition.duration;
        let tick_start = self.clock - dt;

        for child in self.children.iter_mut() {
            match child.pending {
                Some(start) if self.clock >= start => {
                    let before = (start - tick_start).clamp(0.0, dt);
                    child.step(before);
                    child.retarget(target, duration);
                    child.pending = None;
                    child.step(dt - before);
                }
                _ => child.step(dt),
            }
        }
    }

    /// Advance by `dt` seconds. Returns whether the reveal is still animating.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.is_animating() || dt.is_nan() || dt <= 0.0 {
            return self.is_animating();
        }

        let side = match self.state() {
            RevealState::Exiting => Side::From,
            _ => Side::To,
        };

        self.clock += dt;
        self.fire_due(side, dt);
        if let Some((driver, _)) = &mut self.container {
            driver.step(dt);
        }

        let container_settled = self.container.as_ref().map_or(true, |(d, _)| d.is_settled());
        if container_settled && self.children.iter().all(RevealChild::is_settled) {
            self.machine.send(RevealEvent::Settled);
        }
        self.is_animating()
    }

    /// Opacity of the group as a whole; always 1 without a container fade
    pub fn container_opacity(&self) -> f32 {
        self.container.as_ref().map_or(1.0, |(driver, _)| driver.value())
    }

    /// Current style values of a child
    pub fn frame(&self, index: usize) -> Option<StyleProps> {
        let child = self.children.get(index)?;

        let (current, other) = if self.state().is_shown() {
            (&self.to, &self.from)
        } else {
            (&self.from, &self.to)
        };

        let mut props = current.lerp(other, 0.0);
        for channel in &child.channels {
            props.set(channel.key, channel.driver.value());
        }
        Some(props)
    }

    /// Current style values of every child, in order
    pub fn frames(&self) -> impl Iterator<Item = StyleProps> + '_ {
        (0..self.children.len()).filter_map(|i| self.frame(i))
    }
}

fn initial_driver(transition: &TransitionSpec, spring: Option<SpringConfig>, value: f32) -> Driver {
    match (spring, transition.curve) {
        (Some(config), _) => Driver::Spring(Spring::new(config, value)),
        (None, Curve::Ease { easing }) => Driver::Tween(Tween::resting(value, easing)),
        (None, _) => Driver::Tween(Tween::resting(value, Easing::EASE)),
    }
}
