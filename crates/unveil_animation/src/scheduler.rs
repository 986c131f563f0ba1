//! Animation scheduler
//!
//! Owns every mounted reveal, counter and ambient loop and advances them each
//! frame. Removing an instance is teardown: later ticks or lookups with its
//! id are dropped.

use slotmap::{new_key_type, SlotMap};
use std::time::Instant;
use unveil_core::RevealState;

use crate::ambient::AmbientLoop;
use crate::counter::CountUp;
use crate::reveal::Reveal;

new_key_type! {
    pub struct RevealId;
    pub struct CounterId;
    pub struct AmbientId;
}

/// The animation scheduler that ticks all mounted instances
pub struct AnimationScheduler {
    reveals: SlotMap<RevealId, Reveal>,
    counters: SlotMap<CounterId, CountUp>,
    ambient: SlotMap<AmbientId, AmbientLoop>,
    last_frame: Instant,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            reveals: SlotMap::with_key(),
            counters: SlotMap::with_key(),
            ambient: SlotMap::with_key(),
            last_frame: Instant::now(),
        }
    }

    // =========================================================================
    // Reveals
    // =========================================================================

    pub fn add_reveal(&mut self, reveal: Reveal) -> RevealId {
        let id = self.reveals.insert(reveal);
        tracing::debug!(?id, "reveal mounted");
        id
    }

    pub fn get_reveal(&self, id: RevealId) -> Option<&Reveal> {
        self.reveals.get(id)
    }

    pub fn get_reveal_mut(&mut self, id: RevealId) -> Option<&mut Reveal> {
        self.reveals.get_mut(id)
    }

    pub fn remove_reveal(&mut self, id: RevealId) -> Option<Reveal> {
        let removed = self.reveals.remove(id);
        if removed.is_some() {
            tracing::debug!(?id, "reveal unmounted");
        }
        removed
    }

    /// Forward an intersection ratio to a mounted reveal
    pub fn set_reveal_intersection(&mut self, id: RevealId, ratio: f32) -> Option<RevealState> {
        match self.reveals.get_mut(id) {
            Some(reveal) => reveal.set_intersection(ratio),
            None => {
                tracing::trace!(?id, "intersection for unmounted reveal dropped");
                None
            }
        }
    }

    /// Advance one reveal. Returns whether it is still animating.
    pub fn tick_reveal(&mut self, id: RevealId, dt: f32) -> bool {
        match self.reveals.get_mut(id) {
            Some(reveal) => reveal.tick(dt),
            None => {
                tracing::trace!(?id, "tick for unmounted reveal dropped");
                false
            }
        }
    }

    // =========================================================================
    // Counters
    // =========================================================================

    pub fn add_counter(&mut self, counter: CountUp) -> CounterId {
        let id = self.counters.insert(counter);
        tracing::debug!(?id, "counter mounted");
        id
    }

    pub fn get_counter(&self, id: CounterId) -> Option<&CountUp> {
        self.counters.get(id)
    }

    pub fn get_counter_mut(&mut self, id: CounterId) -> Option<&mut CountUp> {
        self.counters.get_mut(id)
    }

    pub fn remove_counter(&mut self, id: CounterId) -> Option<CountUp> {
        let removed = self.counters.remove(id);
        if removed.is_some() {
            tracing::debug!(?id, "counter unmounted");
        }
        removed
    }

    pub fn set_counter_intersection(&mut self, id: CounterId, ratio: f32) -> bool {
        match self.counters.get_mut(id) {
            Some(counter) => counter.set_intersection(ratio),
            None => {
                tracing::trace!(?id, "intersection for unmounted counter dropped");
                false
            }
        }
    }

    /// Formatted value of a mounted counter
    pub fn counter_display(&self, id: CounterId) -> Option<String> {
        self.counters.get(id).map(CountUp::display)
    }

    // =========================================================================
    // Ambient loops
    // =========================================================================

    pub fn add_ambient(&mut self, ambient: AmbientLoop) -> AmbientId {
        let id = self.ambient.insert(ambient);
        tracing::debug!(?id, "ambient loop mounted");
        id
    }

    pub fn get_ambient(&self, id: AmbientId) -> Option<&AmbientLoop> {
        self.ambient.get(id)
    }

    pub fn remove_ambient(&mut self, id: AmbientId) -> Option<AmbientLoop> {
        let removed = self.ambient.remove(id);
        if removed.is_some() {
            tracing::debug!(?id, "ambient loop unmounted");
        }
        removed
    }

    // =========================================================================
    // Frame loop
    // =========================================================================

    /// Advance everything by `dt` seconds.
    ///
    /// Finished `once` reveals and settled counters are skipped; ambient loops
    /// always advance.
    pub fn tick(&mut self, dt: f32) {
        for (_, reveal) in self.reveals.iter_mut() {
            if reveal.is_animating() {
                reveal.tick(dt);
            }
        }

        for (_, counter) in self.counters.iter_mut() {
            if counter.is_animating() {
                counter.tick(dt);
            }
        }

        for (_, ambient) in self.ambient.iter_mut() {
            ambient.tick(dt);
        }
    }

    /// Advance by the wall-clock time since the previous frame
    pub fn tick_frame(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.tick(dt);
        dt
    }

    /// Whether any reveal or counter is still in flight.
    ///
    /// Ambient loops never finish and are not counted.
    pub fn has_active_animations(&self) -> bool {
        self.reveals.iter().any(|(_, r)| r.is_animating())
            || self.counters.iter().any(|(_, c)| c.is_animating())
    }

    pub fn reveals_iter(&self) -> impl Iterator<Item = (RevealId, &Reveal)> {
        self.reveals.iter()
    }

    pub fn counters_iter(&self) -> impl Iterator<Item = (CounterId, &CountUp)> {
        self.counters.iter()
    }

    pub fn ambient_iter(&self) -> impl Iterator<Item = (AmbientId, &AmbientLoop)> {
        self.ambient.iter()
    }

    pub fn reveal_count(&self) -> usize {
        self.reveals.len()
    }

    pub fn counter_count(&self) -> usize {
        self.counters.len()
    }

    pub fn ambient_count(&self) -> usize {
        self.ambient.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
