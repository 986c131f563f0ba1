//! Viewport geometry
//!
//! The observer only needs a scalar intersection ratio per tick. Layout
//! layers that hold rectangles instead can compute that ratio here, with the
//! viewport test area grown or shrunk by a CSS-like root margin.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, UnveilError};

/// An axis-aligned rectangle in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Overlapping region, or `None` when the rectangles don't touch.
    ///
    /// Edge-adjacent rectangles produce a zero-area intersection rather than
    /// `None`, which lets zero-sized regions sitting on the viewport edge count
    /// as intersecting.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return None;
        }

        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Grow (positive margin) or shrink (negative margin) the rectangle
    pub fn expand(&self, margin: &RootMargin) -> Rect {
        let top = margin.top.resolve(self.height);
        let right = margin.right.resolve(self.width);
        let bottom = margin.bottom.resolve(self.height);
        let left = margin.left.resolve(self.width);

        Rect::new(
            self.x - left,
            self.y - top,
            (self.width + left + right).max(0.0),
            (self.height + top + bottom).max(0.0),
        )
    }
}

/// A single root margin component
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum MarginLength {
    /// Absolute pixels
    Px(f32),
    /// Percentage of the viewport dimension on the same axis
    Percent(f32),
}

impl MarginLength {
    pub fn resolve(&self, extent: f32) -> f32 {
        match self {
            MarginLength::Px(px) => *px,
            MarginLength::Percent(pct) => extent * pct / 100.0,
        }
    }
}

impl Default for MarginLength {
    fn default() -> Self {
        MarginLength::Px(0.0)
    }
}

impl fmt::Display for MarginLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarginLength::Px(v) => write!(f, "{v}px"),
            MarginLength::Percent(v) => write!(f, "{v}%"),
        }
    }
}

impl FromStr for MarginLength {
    type Err = UnveilError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (number, make): (&str, fn(f32) -> MarginLength) = if let Some(n) = s.strip_suffix("px")
        {
            (n, MarginLength::Px)
        } else if let Some(n) = s.strip_suffix('%') {
            (n, MarginLength::Percent)
        } else if s == "0" {
            (s, MarginLength::Px)
        } else {
            return Err(UnveilError::config(
                "root_margin",
                format!("`{s}` must be expressed in px or %"),
            ));
        };

        number
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .map(make)
            .ok_or_else(|| UnveilError::config("root_margin", format!("`{s}` is not a number")))
    }
}

/// Margin applied around the viewport before testing intersection.
///
/// Parsed from the CSS shorthand used by `IntersectionObserver`:
/// one to four components, `top right bottom left`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    pub top: MarginLength,
    pub right: MarginLength,
    pub bottom: MarginLength,
    pub left: MarginLength,
}

impl RootMargin {
    pub const ZERO: RootMargin = RootMargin::uniform(MarginLength::Px(0.0));

    pub const fn uniform(length: MarginLength) -> Self {
        Self {
            top: length,
            right: length,
            bottom: length,
            left: length,
        }
    }

    /// Parse a CSS margin shorthand such as `"0px"` or `"-10% 0px"`
    pub fn parse(s: &str) -> Result<Self> {
        let parts = s
            .split_whitespace()
            .map(str::parse::<MarginLength>)
            .collect::<Result<Vec<_>>>()?;

        let (top, right, bottom, left) = match parts.as_slice() {
            [all] => (*all, *all, *all, *all),
            [vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
            [top, horizontal, bottom] => (*top, *horizontal, *bottom, *horizontal),
            [top, right, bottom, left] => (*top, *right, *bottom, *left),
            _ => {
                return Err(UnveilError::config(
                    "root_margin",
                    format!("expected 1 to 4 components, got `{s}`"),
                ))
            }
        };

        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl FromStr for RootMargin {
    type Err = UnveilError;

    fn from_str(s: &str) -> Result<Self> {
        RootMargin::parse(s)
    }
}

impl TryFrom<String> for RootMargin {
    type Error = UnveilError;

    fn try_from(s: String) -> Result<Self> {
        RootMargin::parse(&s)
    }
}

impl From<RootMargin> for String {
    fn from(margin: RootMargin) -> String {
        margin.to_string()
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

/// Fraction of `region` visible inside `viewport` expanded by `margin`.
///
/// Zero-area regions report `1.0` when they touch the test area and `0.0`
/// otherwise.
pub fn intersection_ratio(region: &Rect, viewport: &Rect, margin: &RootMargin) -> f32 {
    let root = viewport.expand(margin);
    let Some(overlap) = region.intersection(&root) else {
        return 0.0;
    };

    let area = region.area();
    if area <= 0.0 {
        return 1.0;
    }

    (overlap.area() / area).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_component() {
        let margin = RootMargin::parse("0px").unwrap();
        assert_eq!(margin, RootMargin::ZERO);

        let margin = RootMargin::parse("10%").unwrap();
        assert_eq!(margin.left, MarginLength::Percent(10.0));
        assert_eq!(margin.bottom, MarginLength::Percent(10.0));
    }

    #[test]
    fn test_parse_shorthands() {
        let margin = RootMargin::parse("-10% 20px").unwrap();
        assert_eq!(margin.top, MarginLength::Percent(-10.0));
        assert_eq!(margin.right, MarginLength::Px(20.0));
        assert_eq!(margin.bottom, MarginLength::Percent(-10.0));
        assert_eq!(margin.left, MarginLength::Px(20.0));

        let margin = RootMargin::parse("1px 2px 3px 4px").unwrap();
        assert_eq!(margin.top, MarginLength::Px(1.0));
        assert_eq!(margin.right, MarginLength::Px(2.0));
        assert_eq!(margin.bottom, MarginLength::Px(3.0));
        assert_eq!(margin.left, MarginLength::Px(4.0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(RootMargin::parse("").is_err());
        assert!(RootMargin::parse("10em").is_err());
        assert!(RootMargin::parse("1px 2px 3px 4px 5px").is_err());
        assert!(RootMargin::parse("abcpx").is_err());
    }

    #[test]
    fn test_ratio_fully_inside() {
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
        let region = Rect::new(100.0, 100.0, 50.0, 50.0);
        assert_eq!(intersection_ratio(&region, &viewport, &RootMargin::ZERO), 1.0);
    }

    #[test]
    fn test_ratio_partially_below_fold() {
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
        let region = Rect::new(0.0, 550.0, 100.0, 100.0);
        let ratio = intersection_ratio(&region, &viewport, &RootMargin::ZERO);
        assert!((ratio - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_negative_margin_shrinks_viewport() {
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
        let region = Rect::new(0.0, 550.0, 100.0, 50.0);
        let margin = RootMargin::parse("0px 0px -100px 0px").unwrap();
        assert_eq!(intersection_ratio(&region, &viewport, &margin), 0.0);
    }

    #[test]
    fn test_percent_margin_grows_viewport() {
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
        // 10% of 600 = 60px extra below the fold
        let region = Rect::new(0.0, 610.0, 100.0, 40.0);
        let margin = RootMargin::parse("10%").unwrap();
        assert_eq!(intersection_ratio(&region, &viewport, &margin), 1.0);
    }

    #[test]
    fn test_zero_area_region() {
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
        let inside = Rect::new(10.0, 10.0, 0.0, 0.0);
        let outside = Rect::new(1000.0, 10.0, 0.0, 0.0);
        assert_eq!(intersection_ratio(&inside, &viewport, &RootMargin::ZERO), 1.0);
        assert_eq!(intersection_ratio(&outside, &viewport, &RootMargin::ZERO), 0.0);
    }
}
