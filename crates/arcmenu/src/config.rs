use crate::highlight::{EffectSet, HighlightConfig};
use crate::menu::{
    ANGLE_STEP, ArcLayout, BUTTON_SIZE, LABEL_MARGIN, LEFT_BOUNDARY_RATIO, MENU_RADIUS,
    MIN_PRESS_DURATION_MS, Mode, TOP_BOUNDARY_RATIO,
};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Button diameter; half of it is also the hit radius.
    pub button_size: f64,
    pub menu_radius: f64,
    /// Radians between neighbouring buttons.
    pub angle_step: f64,
    pub left_boundary_ratio: f64,
    pub top_boundary_ratio: f64,
    /// Hold time that separates a long press from a tap.
    #[serde(rename = "min_press_duration_ms")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub min_press_duration: Duration,
    pub highlight: EffectSet,
    /// Degrees, for the `custom-rotation` effect.
    pub custom_rotation_angle: Option<f64>,
    pub label_margin: f64,
    pub mode: Mode,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            button_size: BUTTON_SIZE,
            menu_radius: MENU_RADIUS,
            angle_step: ANGLE_STEP,
            left_boundary_ratio: LEFT_BOUNDARY_RATIO,
            top_boundary_ratio: TOP_BOUNDARY_RATIO,
            min_press_duration: Duration::from_millis(MIN_PRESS_DURATION_MS),
            highlight: HighlightConfig::with_contextual_rotation().effect,
            custom_rotation_angle: None,
            label_margin: LABEL_MARGIN,
            mode: Mode::LongPress,
        }
    }
}

impl MenuConfig {
    pub fn layout(&self) -> ArcLayout {
        ArcLayout::from_config(self)
    }

    pub fn highlight_config(&self) -> HighlightConfig {
        HighlightConfig::from_config(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("button_size", self.button_size)?;
        positive("menu_radius", self.menu_radius)?;
        positive("angle_step", self.angle_step)?;
        ratio("left_boundary_ratio", self.left_boundary_ratio)?;
        ratio("top_boundary_ratio", self.top_boundary_ratio)?;
        if !(self.label_margin.is_finite() && self.label_margin >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "label_margin",
                reason: format!("must be zero or positive, got {}", self.label_margin),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be positive, got {value}"),
        })
    }
}

fn ratio(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 2.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be in (0, 2], got {value}"),
        })
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "arcmenu", "arcmenu").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<MenuConfig, ConfigError> {
    load_config_from(&get_config_path()?)
}

/// Reads `path` (if it exists) layered under `ARCMENU_*` environment variables.
pub fn load_config_from(path: &Path) -> Result<MenuConfig, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("ARCMENU"))
        .build()?;

    finish(s)
}

pub fn parse_config(toml: &str) -> Result<MenuConfig, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    finish(s)
}

fn finish(s: config::Config) -> Result<MenuConfig, ConfigError> {
    let config: MenuConfig = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn load_or_default() -> MenuConfig {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            MenuConfig::default()
        }
    }
}

pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::Effect;

    #[test]
    fn test_default_config_file_matches_defaults() {
        let parsed = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, MenuConfig::default());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), MenuConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = parse_config(
            r#"
            button_size = 44
            menu_radius = 90.5
            min_press_duration_ms = 350
            highlight = "scale+custom"
            custom_rotation_angle = -8.0
            mode = "tap"
            "#,
        )
        .unwrap();

        assert_eq!(config.button_size, 44.0);
        assert_eq!(config.menu_radius, 90.5);
        assert_eq!(config.min_press_duration, Duration::from_millis(350));
        assert!(config.highlight.contains(Effect::Scale));
        assert!(config.highlight.contains(Effect::CustomRotation));
        assert_eq!(config.mode, Mode::Tap);

        let layout = config.layout();
        assert_eq!(layout.button_radius, 22.0);
        assert_eq!(layout.angle_step, ANGLE_STEP);

        let highlight = config.highlight_config();
        assert_eq!(highlight.custom_rotation_angle, Some(-8.0));
        assert_eq!(highlight.corner_radius_multiplier, 1.2);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let cases = [
            "button_size = 0",
            "menu_radius = -10",
            "left_boundary_ratio = 3.0",
            "top_boundary_ratio = 0",
            "label_margin = -1",
        ];

        for toml in cases {
            assert!(
                matches!(parse_config(toml), Err(ConfigError::Invalid { .. })),
                "{toml}"
            );
        }
    }

    #[test]
    fn test_unknown_effect_is_a_config_error() {
        assert!(matches!(
            parse_config(r#"highlight = "sparkle""#),
            Err(ConfigError::Config(_))
        ));
    }

    #[test]
    fn test_file_layered_under_environment() {
        let dir = std::env::temp_dir().join(format!("arcmenu-config-{}", std::process::id()));
        fs_err::create_dir_all(&dir).unwrap();

        assert_eq!(
            load_config_from(&dir.join("missing.toml")).unwrap(),
            MenuConfig::default()
        );

        let path = dir.join("config.toml");
        fs_err::write(&path, "button_size = 44\nmenu_radius = 90\n").unwrap();

        // only this test touches ARCMENU_* variables
        unsafe { std::env::set_var("ARCMENU_BUTTON_SIZE", "64") };
        let loaded = load_config_from(&path);
        unsafe { std::env::remove_var("ARCMENU_BUTTON_SIZE") };
        fs_err::remove_dir_all(&dir).unwrap();

        let config = loaded.unwrap();
        assert_eq!(config.button_size, 64.0);
        assert_eq!(config.menu_radius, 90.0);
        assert_eq!(config.angle_step, ANGLE_STEP);
    }

    #[test]
    fn test_json_round_trip_keeps_milliseconds() {
        let json = serde_json::to_value(MenuConfig::default()).unwrap();
        assert_eq!(json["min_press_duration_ms"], 500);
        assert_eq!(json["highlight"], "contextual-rotation");
        assert_eq!(json["mode"], "long-press");
    }
}
