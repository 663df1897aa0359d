use serde::{Deserialize, Serialize};

use crate::layout_engine::Axis;

/// Unit attached to a resize amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeUnit {
    /// Absolute pixels.
    Px,
    /// Percent of the focused window's current dimension.
    Ppt,
    /// Resolved per target: tiled windows treat the amount as percent,
    /// floating windows as pixels.
    #[default]
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeDirection {
    Grow,
    Shrink,
}

impl ResizeDirection {
    pub fn apply_sign(self, amount: i32) -> i32 {
        match self {
            ResizeDirection::Grow => amount,
            ResizeDirection::Shrink => -amount,
        }
    }
}

/// A resize magnitude as it appears in a command, e.g. `"400"`, `"400 px"`
/// or `"10 ppt"`. Full command parsing lives upstream; only the
/// amount-with-unit fragment is understood here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeAmount {
    pub value: i32,
    pub unit: ResizeUnit,
}

impl ResizeAmount {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let (number, unit) = if let Some(rest) = trimmed.strip_suffix("ppt") {
            (rest, ResizeUnit::Ppt)
        } else if let Some(rest) = trimmed.strip_suffix("px") {
            (rest, ResizeUnit::Px)
        } else {
            (trimmed, ResizeUnit::Default)
        };
        let value: i32 = number.trim().parse().ok()?;
        Some(ResizeAmount { value, unit })
    }
}

/// One axis of a `resize set` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSize {
    pub axis: Axis,
    pub value: i32,
    #[serde(default)]
    pub unit: ResizeUnit,
}

/// Resolve a signed amount to pixels against the focused window's current
/// dimension. Callers resolve focus before calling this.
pub(crate) fn resolve_pixels(value: i32, unit: ResizeUnit, current: i32, is_floating: bool) -> i32 {
    let use_ppt = match unit {
        ResizeUnit::Ppt => true,
        ResizeUnit::Px => false,
        ResizeUnit::Default => !is_floating,
    };
    if use_ppt {
        (value as f64 / 100.0 * current as f64).round() as i32
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_bare_and_suffixed_amounts() {
        assert_eq!(
            ResizeAmount::parse("400"),
            Some(ResizeAmount { value: 400, unit: ResizeUnit::Default })
        );
        assert_eq!(
            ResizeAmount::parse(" 400 px "),
            Some(ResizeAmount { value: 400, unit: ResizeUnit::Px })
        );
        assert_eq!(
            ResizeAmount::parse("10ppt"),
            Some(ResizeAmount { value: 10, unit: ResizeUnit::Ppt })
        );
        assert_eq!(
            ResizeAmount::parse("-25 px"),
            Some(ResizeAmount { value: -25, unit: ResizeUnit::Px })
        );
        assert_eq!(ResizeAmount::parse("wide"), None);
        assert_eq!(ResizeAmount::parse("px"), None);
    }

    #[test]
    fn default_unit_is_percent_for_tiled_only() {
        assert_eq!(resolve_pixels(10, ResizeUnit::Default, 500, false), 50);
        assert_eq!(resolve_pixels(10, ResizeUnit::Default, 500, true), 10);
    }

    #[test]
    fn explicit_units_override_the_target_default() {
        assert_eq!(resolve_pixels(10, ResizeUnit::Px, 500, false), 10);
        assert_eq!(resolve_pixels(10, ResizeUnit::Ppt, 500, true), 50);
    }

    #[test]
    fn percent_resolution_rounds_to_nearest_pixel() {
        assert_eq!(resolve_pixels(10, ResizeUnit::Ppt, 333, false), 33);
        assert_eq!(resolve_pixels(10, ResizeUnit::Ppt, 335, false), 34);
        assert_eq!(resolve_pixels(-10, ResizeUnit::Ppt, 500, false), -50);
    }

    #[test]
    fn shrink_negates_the_magnitude() {
        assert_eq!(ResizeDirection::Grow.apply_sign(10), 10);
        assert_eq!(ResizeDirection::Shrink.apply_sign(10), -10);
    }
}
