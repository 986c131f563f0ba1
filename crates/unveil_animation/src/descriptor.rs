//! Animation descriptors
//!
//! A descriptor is a sparse set of style attributes. Components declare a
//! `from` and a `to` descriptor; only the numeric attributes present in both
//! are interpolated.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Numeric style attributes the engine knows how to animate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleKey {
    Opacity,
    X,
    Y,
    Scale,
    Rotation,
    RotateX,
    /// `filter: blur(Npx)` radius
    Blur,
    /// Background position along the gradient axis, in percent
    BackgroundPosition,
}

impl StyleKey {
    pub const ALL: [StyleKey; 8] = [
        StyleKey::Opacity,
        StyleKey::X,
        StyleKey::Y,
        StyleKey::Scale,
        StyleKey::Rotation,
        StyleKey::RotateX,
        StyleKey::Blur,
        StyleKey::BackgroundPosition,
    ];
}

/// Key set shared between two descriptors
pub type StyleKeys = SmallVec<[StyleKey; 8]>;

/// Style attributes emitted to the renderer
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleProps {
    /// Opacity (0.0 to 1.0)
    pub opacity: Option<f32>,
    /// Translation X in pixels (or percent for ambient blobs)
    pub x: Option<f32>,
    /// Translation Y in pixels (or percent for ambient blobs)
    pub y: Option<f32>,
    /// Uniform scale factor
    pub scale: Option<f32>,
    /// Rotation in degrees (Z-axis)
    pub rotation: Option<f32>,
    /// Rotation in degrees around the X axis (3D flip)
    pub rotate_x: Option<f32>,
    /// Blur radius in pixels
    pub blur: Option<f32>,
    /// Background position in percent
    pub background_position: Option<f32>,
    /// Gradient color stops; carried through, never interpolated
    pub color_stops: Option<Vec<String>>,
}

impl StyleProps {
    /// Create properties with only opacity set
    pub fn opacity(value: f32) -> Self {
        Self {
            opacity: Some(value),
            ..Default::default()
        }
    }

    /// Builder: set opacity
    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    /// Builder: set X translation
    pub fn with_x(mut self, value: f32) -> Self {
        self.x = Some(value);
        self
    }

    /// Builder: set Y translation
    pub fn with_y(mut self, value: f32) -> Self {
        self.y = Some(value);
        self
    }

    /// Builder: set uniform scale
    pub fn with_scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    /// Builder: set rotation
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = Some(degrees);
        self
    }

    /// Builder: set X rotation (3D flip)
    pub fn with_rotate_x(mut self, degrees: f32) -> Self {
        self.rotate_x = Some(degrees);
        self
    }

    /// Builder: set blur radius
    pub fn with_blur(mut self, px: f32) -> Self {
        self.blur = Some(px);
        self
    }

    /// Builder: set background position
    pub fn with_background_position(mut self, percent: f32) -> Self {
        self.background_position = Some(percent);
        self
    }

    /// Builder: set gradient color stops
    pub fn with_color_stops<I, S>(mut self, stops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.color_stops = Some(stops.into_iter().map(Into::into).collect());
        self
    }

    /// Builder: set blur from a CSS filter string like `blur(10px)`.
    ///
    /// Strings that aren't a single blur function leave the blur unset.
    pub fn with_filter(mut self, filter: &str) -> Self {
        self.blur = parse_blur_filter(filter);
        self
    }

    pub fn get(&self, key: StyleKey) -> Option<f32> {
        match key {
            StyleKey::Opacity => self.opacity,
            StyleKey::X => self.x,
            StyleKey::Y => self.y,
            StyleKey::Scale => self.scale,
            StyleKey::Rotation => self.rotation,
            StyleKey::RotateX => self.rotate_x,
            StyleKey::Blur => self.blur,
            StyleKey::BackgroundPosition => self.background_position,
        }
    }

    pub fn set(&mut self, key: StyleKey, value: f32) {
        let slot = match key {
            StyleKey::Opacity => &mut self.opacity,
            StyleKey::X => &mut self.x,
            StyleKey::Y => &mut self.y,
            StyleKey::Scale => &mut self.scale,
            StyleKey::Rotation => &mut self.rotation,
            StyleKey::RotateX => &mut self.rotate_x,
            StyleKey::Blur => &mut self.blur,
            StyleKey::BackgroundPosition => &mut self.background_position,
        };
        *slot = Some(value);
    }

    /// Numeric keys that are set on this descriptor
    pub fn keys(&self) -> StyleKeys {
        StyleKey::ALL
            .into_iter()
            .filter(|key| self.get(*key).is_some())
            .collect()
    }

    /// Numeric keys set on both descriptors, the only ones that animate
    pub fn common_keys(&self, other: &Self) -> StyleKeys {
        StyleKey::ALL
            .into_iter()
            .filter(|key| self.get(*key).is_some() && other.get(*key).is_some())
            .collect()
    }

    /// Interpolate between two property sets.
    ///
    /// Keys present on only one side hold that side's value.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            opacity: lerp_opt(self.opacity, other.opacity, t),
            x: lerp_opt(self.x, other.x, t),
            y: lerp_opt(self.y, other.y, t),
            scale: lerp_opt(self.scale, other.scale, t),
            rotation: lerp_opt(self.rotation, other.rotation, t),
            rotate_x: lerp_opt(self.rotate_x, other.rotate_x, t),
            blur: lerp_opt(self.blur, other.blur, t),
            background_position: lerp_opt(self.background_position, other.background_position, t),
            color_stops: if t < 1.0 {
                self.color_stops.clone().or_else(|| other.color_stops.clone())
            } else {
                other.color_stops.clone().or_else(|| self.color_stops.clone())
            },
        }
    }

    /// Overlay the attributes set on `other` onto a copy of `self`
    pub fn merged(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for key in other.keys() {
            if let Some(value) = other.get(key) {
                out.set(key, value);
            }
        }
        if other.color_stops.is_some() {
            out.color_stops = other.color_stops.clone();
        }
        out
    }

    /// CSS filter string for the blur attribute, if set
    pub fn filter_css(&self) -> Option<String> {
        self.blur.map(|px| format!("blur({px}px)"))
    }

    /// Get the resolved opacity (defaults to 1.0 if not set)
    pub fn resolved_opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }

    /// Get the resolved translation (defaults to 0.0 if not set)
    pub fn resolved_translate(&self) -> (f32, f32) {
        (self.x.unwrap_or(0.0), self.y.unwrap_or(0.0))
    }
}

/// Helper to interpolate optional values
fn lerp_opt(a: Option<f32>, b: Option<f32>, t: f32) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// Parse `blur(10px)` into `10.0`
pub fn parse_blur_filter(filter: &str) -> Option<f32> {
    let inner = filter
        .trim()
        .strip_prefix("blur(")?
        .strip_suffix(')')?
        .trim();
    let number = inner.strip_suffix("px").unwrap_or(inner).trim();
    number.parse::<f32>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_keys() {
        let from = StyleProps::opacity(0.0).with_y(20.0).with_blur(10.0);
        let to = StyleProps::opacity(1.0).with_y(0.0).with_x(5.0);

        let keys = from.common_keys(&to);
        assert_eq!(keys.as_slice(), &[StyleKey::Opacity, StyleKey::Y]);
    }

    #[test]
    fn test_no_common_keys() {
        let from = StyleProps::opacity(0.0);
        let to = StyleProps::default().with_scale(1.0);
        assert!(from.common_keys(&to).is_empty());
    }

    #[test]
    fn test_lerp() {
        let from = StyleProps::opacity(0.0).with_y(40.0);
        let to = StyleProps::opacity(1.0).with_y(0.0).with_scale(1.0);

        let mid = from.lerp(&to, 0.5);
        assert_eq!(mid.opacity, Some(0.5));
        assert_eq!(mid.y, Some(20.0));
        assert_eq!(mid.scale, Some(1.0));
        assert_eq!(mid.x, None);
    }

    #[test]
    fn test_merged_overrides() {
        let base = StyleProps::opacity(0.0).with_y(5.0);
        let merged = base.merged(&StyleProps::default().with_y(40.0).with_x(1.0));
        assert_eq!(merged.opacity, Some(0.0));
        assert_eq!(merged.y, Some(40.0));
        assert_eq!(merged.x, Some(1.0));
    }

    #[test]
    fn test_color_stops_switch_at_completion() {
        let from = StyleProps::default().with_color_stops(["#000"]);
        let to = StyleProps::default().with_color_stops(["#fff"]);

        assert_eq!(from.lerp(&to, 0.5).color_stops, Some(vec!["#000".to_string()]));
        assert_eq!(from.lerp(&to, 1.0).color_stops, Some(vec!["#fff".to_string()]));
    }

    #[test]
    fn test_parse_blur_filter() {
        assert_eq!(parse_blur_filter("blur(10px)"), Some(10.0));
        assert_eq!(parse_blur_filter(" blur( 0px ) "), Some(0.0));
        assert_eq!(parse_blur_filter("blur(2.5)"), Some(2.5));
        assert_eq!(parse_blur_filter("brightness(2)"), None);
        assert_eq!(parse_blur_filter("blur(-1px)"), None);

        let props = StyleProps::default().with_filter("blur(10px)");
        assert_eq!(props.filter_css().as_deref(), Some("blur(10px)"));
    }

    #[test]
    fn test_set_and_get_roundtrip_every_key() {
        let mut props = StyleProps::default();
        for (i, key) in StyleKey::ALL.into_iter().enumerate() {
            props.set(key, i as f32);
        }
        assert_eq!(props.keys().len(), StyleKey::ALL.len());
        assert_eq!(props.get(StyleKey::Blur), Some(6.0));
    }
}
