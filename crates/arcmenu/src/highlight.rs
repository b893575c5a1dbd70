//! Visual treatment of the element a menu was opened from.
//!
//! The core only computes the numbers (scale, rotation, frame, corner radius);
//! snapshotting and animating the element is up to the presenter.

use crate::config::MenuConfig;
use crate::geometry::{Point, Rect};
use crate::menu::{ANIMATION_DURATION_MS, contextual_tilt};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

pub const SCALE_MULTIPLIER: f64 = 1.2;
pub const TILT_DEGREES: f64 = 5.0;
pub const CORNER_RADIUS: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, StrumDisplay)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Effect {
    Scale,
    #[strum(to_string = "contextual-rotation", serialize = "contextual")]
    ContextualRotation,
    #[strum(to_string = "custom-rotation", serialize = "custom")]
    CustomRotation,
}

impl Effect {
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown highlight effect '{0}'")]
pub struct ParseEffectError(String);

/// Combination of [`Effect`]s, written `none` or joined with `+`
/// (`scale+contextual-rotation`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, DeserializeFromStr, SerializeDisplay)]
pub struct EffectSet(u8);

impl EffectSet {
    pub const NONE: Self = Self(0);

    pub fn with(self, effect: Effect) -> Self {
        Self(self.0 | effect.bit())
    }

    pub fn contains(self, effect: Effect) -> bool {
        self.0 & effect.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Effect> {
        Effect::iter().filter(move |effect| self.contains(*effect))
    }

    pub fn scale_multiplier(self) -> f64 {
        if self.contains(Effect::Scale) {
            SCALE_MULTIPLIER
        } else {
            1.0
        }
    }

    /// Contextual rotation takes precedence over a custom angle.
    pub fn transform(
        self,
        view_center: Point,
        screen_center: Point,
        custom_angle: Option<f64>,
    ) -> HighlightTransform {
        let degrees = if self.contains(Effect::ContextualRotation) {
            contextual_tilt(view_center, screen_center).sign() * TILT_DEGREES
        } else if self.contains(Effect::CustomRotation) {
            custom_angle.unwrap_or(0.0)
        } else {
            0.0
        };

        HighlightTransform {
            scale: self.scale_multiplier(),
            rotation: degrees.to_radians(),
        }
    }
}

impl FromIterator<Effect> for EffectSet {
    fn from_iter<I: IntoIterator<Item = Effect>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

impl FromStr for EffectSet {
    type Err = ParseEffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("none") {
            return Ok(Self::NONE);
        }

        s.split(['+', ','])
            .map(str::trim)
            .map(|part| Effect::from_str(part).map_err(|_| ParseEffectError(part.to_string())))
            .collect()
    }
}

impl fmt::Display for EffectSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let parts: Vec<String> = self.iter().map(|effect| effect.to_string()).collect();
        f.write_str(&parts.join("+"))
    }
}

/// Scale factor and rotation (radians) to apply about the view's center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightTransform {
    pub scale: f64,
    pub rotation: f64,
}

impl HighlightTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        rotation: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighlightConfig {
    pub effect: EffectSet,
    pub animation_duration: Duration,
    /// Overrides the element's own corner radius when set.
    pub corner_radius: Option<f64>,
    pub corner_radius_multiplier: f64,
    pub hide_original: bool,
    /// Degrees, used by [`Effect::CustomRotation`].
    pub custom_rotation_angle: Option<f64>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            effect: EffectSet::NONE,
            animation_duration: Duration::from_millis(ANIMATION_DURATION_MS),
            corner_radius: Some(CORNER_RADIUS),
            corner_radius_multiplier: 1.0,
            hide_original: true,
            custom_rotation_angle: None,
        }
    }
}

impl HighlightConfig {
    pub fn with_scale() -> Self {
        Self {
            effect: EffectSet::NONE.with(Effect::Scale),
            corner_radius_multiplier: SCALE_MULTIPLIER,
            ..Self::default()
        }
    }

    /// Left half of the screen tilts left, right half tilts right.
    pub fn with_contextual_rotation() -> Self {
        Self {
            effect: EffectSet::NONE.with(Effect::ContextualRotation),
            ..Self::default()
        }
    }

    /// Positive angles tilt up, negative down.
    pub fn with_custom_rotation(angle: f64) -> Self {
        Self {
            effect: EffectSet::NONE.with(Effect::CustomRotation),
            custom_rotation_angle: Some(angle),
            ..Self::default()
        }
    }

    pub fn with_scale_and_rotation() -> Self {
        Self {
            effect: EffectSet::NONE
                .with(Effect::Scale)
                .with(Effect::ContextualRotation),
            corner_radius_multiplier: SCALE_MULTIPLIER,
            ..Self::default()
        }
    }

    pub fn from_config(config: &MenuConfig) -> Self {
        Self {
            effect: config.highlight,
            corner_radius_multiplier: config.highlight.scale_multiplier(),
            custom_rotation_angle: config.custom_rotation_angle,
            ..Self::default()
        }
    }

    pub fn transform(&self, view_center: Point, screen_center: Point) -> HighlightTransform {
        self.effect
            .transform(view_center, screen_center, self.custom_rotation_angle)
    }

    pub fn scaled_frame(&self, frame: Rect) -> Rect {
        frame.scaled_about_center(self.effect.scale_multiplier())
    }

    /// Corner radius for the highlighted copy of an element whose own corner
    /// radius is `view_corner_radius`.
    pub fn corner_radius_for(&self, view_corner_radius: f64) -> f64 {
        match self.corner_radius {
            Some(radius) => radius * self.corner_radius_multiplier,
            None if view_corner_radius > 0.0 => view_corner_radius * self.corner_radius_multiplier,
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN_CENTER: Point = Point { x: 400.0, y: 300.0 };

    #[test]
    fn test_effect_set_deserialization() {
        let cases = vec![
            ("\"none\"", EffectSet::NONE),
            ("\"\"", EffectSet::NONE),
            ("\"scale\"", EffectSet::NONE.with(Effect::Scale)),
            (
                "\"scale+contextual-rotation\"",
                HighlightConfig::with_scale_and_rotation().effect,
            ),
            (
                "\"Contextual + SCALE\"",
                HighlightConfig::with_scale_and_rotation().effect,
            ),
            ("\"custom\"", EffectSet::NONE.with(Effect::CustomRotation)),
        ];

        for (json, expected) in cases {
            let deserialized: EffectSet = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected, "{json}");
        }
    }

    #[test]
    fn test_effect_set_rejects_unknown_effect() {
        assert_eq!(
            "scale+wobble".parse::<EffectSet>(),
            Err(ParseEffectError("wobble".to_string()))
        );
    }

    #[test]
    fn test_effect_set_display() {
        assert_eq!(EffectSet::NONE.to_string(), "none");
        assert_eq!(
            HighlightConfig::with_scale_and_rotation().effect.to_string(),
            "scale+contextual-rotation"
        );
    }

    #[test]
    fn test_contextual_rotation_follows_screen_half() {
        let config = HighlightConfig::with_contextual_rotation();

        let left = config.transform(Point::new(100.0, 300.0), SCREEN_CENTER);
        let right = config.transform(Point::new(600.0, 300.0), SCREEN_CENTER);

        assert!((left.rotation + 5f64.to_radians()).abs() < 1e-12);
        assert!((right.rotation - 5f64.to_radians()).abs() < 1e-12);
        assert_eq!(left.scale, 1.0);
    }

    #[test]
    fn test_custom_rotation_uses_configured_angle() {
        let config = HighlightConfig::with_custom_rotation(-12.0);
        let transform = config.transform(Point::new(100.0, 300.0), SCREEN_CENTER);
        assert!((transform.rotation - (-12f64).to_radians()).abs() < 1e-12);

        let no_angle = EffectSet::NONE.with(Effect::CustomRotation);
        assert!(
            no_angle
                .transform(Point::default(), SCREEN_CENTER, None)
                .is_identity()
        );
    }

    #[test]
    fn test_scale_and_rotation_combine() {
        let config = HighlightConfig::with_scale_and_rotation();
        let transform = config.transform(Point::new(700.0, 10.0), SCREEN_CENTER);
        assert_eq!(transform.scale, SCALE_MULTIPLIER);
        assert!(transform.rotation > 0.0);
    }

    #[test]
    fn test_default_is_identity() {
        let config = HighlightConfig::default();
        assert!(config.transform(Point::new(1.0, 1.0), SCREEN_CENTER).is_identity());
        let frame = Rect::new(10.0, 10.0, 80.0, 40.0);
        assert_eq!(config.scaled_frame(frame), frame);
    }

    #[test]
    fn test_corner_radius_rules() {
        assert_eq!(HighlightConfig::with_scale().corner_radius_for(0.0), 8.0 * 1.2);

        let inherit = HighlightConfig {
            corner_radius: None,
            corner_radius_multiplier: 2.0,
            ..HighlightConfig::default()
        };
        assert_eq!(inherit.corner_radius_for(6.0), 12.0);
        assert_eq!(inherit.corner_radius_for(0.0), 0.0);
    }
}
