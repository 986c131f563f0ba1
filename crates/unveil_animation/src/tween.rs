//! Fixed-duration interpolation

use crate::easing::Easing;

/// Interpolate between `from` and `to` at `elapsed` seconds into a
/// `duration`-second transition.
///
/// Progress is clamped to `[0, 1]`; a zero duration jumps straight to `to`.
pub fn interpolate(from: f32, to: f32, duration: f32, elapsed: f32, easing: Easing) -> f32 {
    let progress = if duration > 0.0 {
        elapsed / duration
    } else {
        1.0
    };

    let eased = easing.apply(progress);
    if eased >= 1.0 {
        return to;
    }
    from + (to - from) * eased
}

/// A stateful eased transition that can be redirected mid-flight
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    /// A tween that has already finished at `value`
    pub fn resting(value: f32, easing: Easing) -> Self {
        Self::new(value, value, 0.0, easing)
    }

    pub fn value(&self) -> f32 {
        interpolate(self.from, self.to, self.duration, self.elapsed, self.easing)
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Linear progress through the transition (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn step(&mut self, dt: f32) {
        if dt.is_nan() || dt <= 0.0 {
            return;
        }
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    /// Head toward `to` starting from wherever the tween currently is.
    ///
    /// The new leg starts at the current value, so there is no jump; it
    /// runs for the full duration.
    pub fn retarget(&mut self, to: f32, duration: f32) {
        self.from = self.value();
        self.to = to;
        self.duration = duration.max(0.0);
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in [Easing::Linear, Easing::EASE, Easing::EaseInOut] {
            assert_eq!(interpolate(3.0, 9.0, 0.6, 0.0, easing), 3.0);
            assert_eq!(interpolate(3.0, 9.0, 0.6, 0.6, easing), 9.0);
            assert_eq!(interpolate(3.0, 9.0, 0.6, 10.0, easing), 9.0);
        }
    }

    #[test]
    fn test_zero_duration_jumps() {
        assert_eq!(interpolate(0.0, 1.0, 0.0, 0.0, Easing::Linear), 1.0);
        let tween = Tween::new(0.0, 1.0, 0.0, Easing::Linear);
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 1.0);
    }

    #[test]
    fn test_linear_midpoint() {
        assert_eq!(interpolate(0.0, 10.0, 2.0, 1.0, Easing::Linear), 5.0);
    }

    #[test]
    fn test_tween_steps_to_completion() {
        let mut tween = Tween::new(40.0, 0.0, 0.6, Easing::EASE);
        let mut prev = tween.value();
        while !tween.is_finished() {
            tween.step(1.0 / 60.0);
            let v = tween.value();
            assert!(v <= prev);
            prev = v;
        }
        assert_eq!(tween.value(), 0.0);
    }

    #[test]
    fn test_retarget_is_continuous() {
        let mut tween = Tween::new(0.0, 1.0, 1.0, Easing::EaseOut);
        tween.step(0.4);
        let before = tween.value();

        tween.retarget(0.0, 1.0);
        assert_eq!(tween.value(), before);
        assert!(!tween.is_finished());

        tween.step(1.0);
        assert_eq!(tween.value(), 0.0);
    }
}
