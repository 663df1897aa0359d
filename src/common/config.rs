use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout_engine::Axis;

/// Sizing limits and defaults used by resize operations.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(deny_unknown_fields)]
pub struct LayoutSettings {
    /// Smallest width a tiled container may be resized to.
    #[serde(default = "default_min_sane_width")]
    pub min_sane_width: i32,
    /// Smallest height a tiled container may be resized to.
    #[serde(default = "default_min_sane_height")]
    pub min_sane_height: i32,
    #[serde(default = "default_floating_minimum_width")]
    pub floating_minimum_width: i32,
    #[serde(default = "default_floating_minimum_height")]
    pub floating_minimum_height: i32,
    /// Zero leaves the width unbounded.
    #[serde(default)]
    pub floating_maximum_width: i32,
    /// Zero leaves the height unbounded.
    #[serde(default)]
    pub floating_maximum_height: i32,
    /// Fallback magnitude when a resize request carries no usable amount.
    #[serde(default = "default_resize_amount")]
    pub default_resize_amount: i32,
}

fn default_min_sane_width() -> i32 { 100 }
fn default_min_sane_height() -> i32 { 60 }
fn default_floating_minimum_width() -> i32 { 75 }
fn default_floating_minimum_height() -> i32 { 50 }
fn default_resize_amount() -> i32 { 10 }

impl Default for LayoutSettings {
    fn default() -> Self {
        LayoutSettings {
            min_sane_width: default_min_sane_width(),
            min_sane_height: default_min_sane_height(),
            floating_minimum_width: default_floating_minimum_width(),
            floating_minimum_height: default_floating_minimum_height(),
            floating_maximum_width: 0,
            floating_maximum_height: 0,
            default_resize_amount: default_resize_amount(),
        }
    }
}

impl LayoutSettings {
    pub fn min_sane(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Width => self.min_sane_width,
            Axis::Height => self.min_sane_height,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_sane_width <= 0 || self.min_sane_height <= 0 {
            return Err(ConfigError::NonPositiveSaneSize {
                width: self.min_sane_width,
                height: self.min_sane_height,
            });
        }
        if self.floating_minimum_width <= 0 || self.floating_minimum_height <= 0 {
            return Err(ConfigError::NonPositiveFloatingMinimum {
                width: self.floating_minimum_width,
                height: self.floating_minimum_height,
            });
        }
        if self.floating_maximum_width > 0 && self.floating_maximum_width < self.floating_minimum_width
        {
            return Err(ConfigError::InvertedFloatingBounds {
                axis: "width",
                minimum: self.floating_minimum_width,
                maximum: self.floating_maximum_width,
            });
        }
        if self.floating_maximum_height > 0
            && self.floating_maximum_height < self.floating_minimum_height
        {
            return Err(ConfigError::InvertedFloatingBounds {
                axis: "height",
                minimum: self.floating_minimum_height,
                maximum: self.floating_maximum_height,
            });
        }
        if self.default_resize_amount <= 0 {
            return Err(ConfigError::NonPositiveResizeAmount(self.default_resize_amount));
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("minimum sane size must be positive, got {width}x{height}")]
    NonPositiveSaneSize { width: i32, height: i32 },
    #[error("floating minimum size must be positive, got {width}x{height}")]
    NonPositiveFloatingMinimum { width: i32, height: i32 },
    #[error("floating maximum {axis} {maximum} is below the minimum {minimum}")]
    InvertedFloatingBounds { axis: &'static str, minimum: i32, maximum: i32 },
    #[error("default resize amount must be positive, got {0}")]
    NonPositiveResizeAmount(i32),
}

/// On-disk configuration.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutSettings,
}

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Config> {
        let buf = std::fs::read_to_string(path)?;
        Self::parse(&buf)
    }

    pub fn parse(buf: &str) -> anyhow::Result<Config> {
        let config: Config = toml::from_str(buf)?;
        config.layout.validate()?;
        Ok(config)
    }

    /// Save the current config to a file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let toml_string = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, toml_string.as_bytes())?;
        Ok(())
    }
}

pub fn config_file() -> PathBuf { dirs::home_dir().unwrap().join(".autotile.toml") }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.layout, LayoutSettings::default());
        assert_eq!(config.layout.min_sane_width, 100);
        assert_eq!(config.layout.min_sane_height, 60);
        assert_eq!(config.layout.default_resize_amount, 10);
    }

    #[test]
    fn partial_overrides_keep_remaining_defaults() {
        let config = Config::parse(
            "[layout]\nmin_sane_width = 50\nfloating_maximum_width = 1200\n",
        )
        .unwrap();
        assert_eq!(config.layout.min_sane_width, 50);
        assert_eq!(config.layout.min_sane_height, 60);
        assert_eq!(config.layout.floating_maximum_width, 1200);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(Config::parse("[layout]\nshadow_width = 2\n").is_err());
    }

    #[test]
    fn validation_rejects_non_positive_minimums() {
        assert!(Config::parse("[layout]\nmin_sane_width = 0\n").is_err());
        assert!(Config::parse("[layout]\nfloating_minimum_height = -1\n").is_err());
        assert!(Config::parse("[layout]\ndefault_resize_amount = 0\n").is_err());
    }

    #[test]
    fn validation_rejects_inverted_floating_bounds() {
        let settings = LayoutSettings {
            floating_maximum_width: 40,
            ..Default::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::InvertedFloatingBounds {
                axis: "width",
                minimum: 75,
                maximum: 40,
            })
        );
    }

    #[test]
    fn save_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autotile.toml");

        let config = Config {
            layout: LayoutSettings {
                min_sane_width: 80,
                floating_maximum_height: 900,
                ..Default::default()
            },
        };
        config.save(&path).unwrap();

        assert_eq!(Config::read(&path).unwrap(), config);
    }

    #[test]
    fn min_sane_selects_by_axis() {
        let settings = LayoutSettings::default();
        assert_eq!(settings.min_sane(Axis::Width), 100);
        assert_eq!(settings.min_sane(Axis::Height), 60);
    }
}
