//! Keyframe tracks
//!
//! A track is a list of waypoints over a normalized `[0, 1]` timeline played
//! over `period` seconds and repeated forever. The delay only shifts where
//! the loop starts.
//!
//! # Example
//!
//! ```rust
//! use unveil_animation::{Easing, KeyframeTrack, StyleProps};
//!
//! let track = KeyframeTrack::new(2.0)
//!     .keyframe(0.0, StyleProps::opacity(0.0), Easing::Linear)
//!     .keyframe(0.5, StyleProps::opacity(1.0), Easing::Linear)
//!     .keyframe(1.0, StyleProps::opacity(0.0), Easing::Linear);
//!
//! assert_eq!(track.sample(0.5).opacity, Some(0.5));
//! assert_eq!(track.sample(2.5).opacity, Some(0.5));
//! ```

use crate::descriptor::StyleProps;
use crate::easing::Easing;

/// A waypoint with multiple animated properties
#[derive(Clone, Debug, PartialEq)]
pub struct Waypoint {
    /// Position on the track (0.0 to 1.0)
    pub time: f32,
    pub properties: StyleProps,
    /// Easing used on the segment that ends at this waypoint
    pub easing: Easing,
}

impl Waypoint {
    pub fn new(time: f32, properties: StyleProps, easing: Easing) -> Self {
        Self {
            time: time.clamp(0.0, 1.0),
            properties,
            easing,
        }
    }
}

/// Looping multi-waypoint animation over a fixed period
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeTrack {
    /// Length of one iteration in seconds
    period: f32,
    /// Sorted by time
    waypoints: Vec<Waypoint>,
    /// Seconds before the first iteration starts
    delay: f32,
}

impl KeyframeTrack {
    pub fn new(period: f32) -> Self {
        Self {
            period: period.max(0.0),
            waypoints: Vec::new(),
            delay: 0.0,
        }
    }

    /// Track whose values are spread evenly across the period, all segments
    /// sharing one easing
    pub fn evenly_spaced<I>(period: f32, values: I, easing: Easing) -> Self
    where
        I: IntoIterator<Item = StyleProps>,
    {
        let values: Vec<StyleProps> = values.into_iter().collect();
        let last = values.len().saturating_sub(1).max(1) as f32;

        values
            .into_iter()
            .enumerate()
            .fold(Self::new(period), |track, (i, props)| {
                track.keyframe(i as f32 / last, props, easing)
            })
    }

    /// Add a waypoint (builder pattern)
    pub fn keyframe(mut self, time: f32, properties: StyleProps, easing: Easing) -> Self {
        self.waypoints.push(Waypoint::new(time, properties, easing));
        self.waypoints.sort_by(|a, b| a.time.total_cmp(&b.time));
        self
    }

    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    pub fn delay_secs(&self) -> f32 {
        self.delay
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Properties `t` seconds after the track started.
    ///
    /// The first waypoint holds during the delay. After the delay the track
    /// satisfies `sample(t) == sample(t + period)`.
    pub fn sample(&self, t: f32) -> StyleProps {
        let (Some(first), Some(last)) = (self.waypoints.first(), self.waypoints.last()) else {
            return StyleProps::default();
        };

        let local = t - self.delay;
        if local.is_nan() || local < 0.0 {
            return first.properties.clone();
        }
        if self.period <= 0.0 {
            return last.properties.clone();
        }

        let progress = local.rem_euclid(self.period) / self.period;
        self.properties_at(progress)
    }

    /// Interpolated properties at a normalized position on the track
    pub fn properties_at(&self, progress: f32) -> StyleProps {
        let Some(first) = self.waypoints.first() else {
            return StyleProps::default();
        };

        let mut prev = first;
        let mut next = first;
        for waypoint in &self.waypoints {
            if waypoint.time <= progress {
                prev = waypoint;
            }
            if waypoint.time >= progress {
                next = waypoint;
                break;
            }
        }

        if (next.time - prev.time).abs() < f32::EPSILON {
            return prev.properties.clone();
        }

        let local = (progress - prev.time) / (next.time - prev.time);
        prev.properties.lerp(&next.properties, next.easing.apply(local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulse(period: f32) -> KeyframeTrack {
        KeyframeTrack::evenly_spaced(
            period,
            [
                StyleProps::opacity(0.0).with_y(0.0),
                StyleProps::opacity(1.0).with_y(-100.0),
                StyleProps::opacity(0.0).with_y(0.0),
            ],
            Easing::Linear,
        )
    }

    #[test]
    fn test_evenly_spaced_times() {
        let track = pulse(4.0);
        let times: Vec<f32> = track.waypoints().iter().map(|w| w.time).collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_sample_interpolates_segments() {
        let track = pulse(4.0);
        assert_eq!(track.sample(0.0).opacity, Some(0.0));
        assert_eq!(track.sample(1.0).opacity, Some(0.5));
        assert_eq!(track.sample(2.0).y, Some(-100.0));
        assert_eq!(track.sample(3.0).y, Some(-50.0));
    }

    #[test]
    fn test_infinite_track_is_periodic_after_delay() {
        let track = pulse(3.0).delay(1.25);

        assert_eq!(track.sample(0.5), track.waypoints()[0].properties);
        for i in 0..20 {
            let t = 1.25 + i as f32 * 0.37;
            let a = track.sample(t);
            let b = track.sample(t + 3.0 * 7.0);
            assert!((a.opacity.unwrap() - b.opacity.unwrap()).abs() < 1e-3);
            assert!((a.y.unwrap() - b.y.unwrap()).abs() < 1e-1);
        }
    }

    #[test]
    fn test_zero_period_holds_last_waypoint() {
        let track = KeyframeTrack::new(0.0)
            .keyframe(0.0, StyleProps::opacity(0.0), Easing::Linear)
            .keyframe(1.0, StyleProps::opacity(1.0), Easing::Linear);
        assert_eq!(track.sample(5.0).opacity, Some(1.0));
    }

    #[test]
    fn test_keyframes_sorted_on_insert() {
        let track = KeyframeTrack::new(1.0)
            .keyframe(1.0, StyleProps::opacity(1.0), Easing::Linear)
            .keyframe(0.0, StyleProps::opacity(0.0), Easing::Linear);
        assert_eq!(track.waypoints()[0].time, 0.0);
    }

    #[test]
    fn test_empty_track() {
        assert_eq!(KeyframeTrack::new(1.0).sample(0.3), StyleProps::default());
    }
}
