//! Tunables for a game instance.

use crate::error::{Error, Result};

pub const DEFAULT_WIDTH: f64 = 800.0;
pub const DEFAULT_HEIGHT: f64 = 600.0;
pub const DEFAULT_TARGET_TOTAL: u32 = 20;
pub const DEFAULT_DOT_RADIUS: f64 = 10.0;
pub const DEFAULT_DOT_SIZES: [f64; 4] = [5.0, 10.0, 15.0, 20.0];
/// Timer text refresh period while a round is running (10 Hz).
pub const DEFAULT_TIMER_REFRESH_MS: u32 = 100;
/// Slowest accepted timer refresh; also keeps the period inside `setInterval`'s `i32`.
pub const MAX_TIMER_REFRESH_MS: u32 = 60_000;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub width: f64,
    pub height: f64,
    pub target_total: u32,
    pub dot_radius: f64,
    pub dot_sizes: Vec<f64>,
    pub timer_refresh_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            target_total: DEFAULT_TARGET_TOTAL,
            dot_radius: DEFAULT_DOT_RADIUS,
            dot_sizes: DEFAULT_DOT_SIZES.to_vec(),
            timer_refresh_ms: DEFAULT_TIMER_REFRESH_MS,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(Error::OutOfRange {
                field: "width",
                value: self.width,
            });
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(Error::OutOfRange {
                field: "height",
                value: self.height,
            });
        }
        if self.target_total == 0 {
            return Err(Error::EmptyRound);
        }
        if !(1..=MAX_TIMER_REFRESH_MS).contains(&self.timer_refresh_ms) {
            return Err(Error::OutOfRange {
                field: "timer_refresh_ms",
                value: self.timer_refresh_ms as f64,
            });
        }
        self.check_radius(self.dot_radius)?;
        for &size in &self.dot_sizes {
            self.check_radius(size)?;
        }
        Ok(())
    }

    /// A radius is usable when it is positive and the whole dot fits the surface.
    pub fn check_radius(&self, radius: f64) -> Result<()> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(Error::InvalidDotSize(radius));
        }
        if 2.0 * radius > self.width || 2.0 * radius > self.height {
            return Err(Error::SurfaceTooSmall {
                width: self.width,
                height: self.height,
                radius,
            });
        }
        Ok(())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn defaults_are_valid() {
        let cfg = GameConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.target_total, 20);
        assert_eq!(cfg.dot_radius, 10.0);
    }

    #[test]
    fn zero_target_is_rejected() {
        let cfg = GameConfig {
            target_total: 0,
            ..GameConfig::default()
        };
        assert_matches!(cfg.validate(), Err(Error::EmptyRound));
    }

    #[test]
    fn timer_refresh_is_bounded() {
        for ms in [0, MAX_TIMER_REFRESH_MS + 1, u32::MAX] {
            let cfg = GameConfig {
                timer_refresh_ms: ms,
                ..GameConfig::default()
            };
            assert_matches!(
                cfg.validate(),
                Err(Error::OutOfRange { field: "timer_refresh_ms", .. })
            );
        }
        let cfg = GameConfig {
            timer_refresh_ms: MAX_TIMER_REFRESH_MS,
            ..GameConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn oversized_dot_is_rejected() {
        let cfg = GameConfig {
            width: 30.0,
            height: 30.0,
            dot_sizes: vec![5.0, 20.0],
            ..GameConfig::default()
        };
        assert_matches!(
            cfg.validate(),
            Err(Error::SurfaceTooSmall { radius, .. }) if radius == 20.0
        );
    }

    #[test]
    fn non_finite_dimensions_are_rejected() {
        let cfg = GameConfig {
            width: f64::NAN,
            ..GameConfig::default()
        };
        assert_matches!(cfg.validate(), Err(Error::OutOfRange { field: "width", .. }));
    }

    #[test]
    fn negative_radius_is_rejected() {
        let cfg = GameConfig::default();
        assert_matches!(cfg.check_radius(-3.0), Err(Error::InvalidDotSize(_)));
        assert_matches!(cfg.check_radius(0.0), Err(Error::InvalidDotSize(_)));
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let cfg = GameConfig::from_json(r#"{ "target_total": 5 }"#).unwrap();
        assert_eq!(cfg.target_total, 5);
        assert_eq!(cfg.width, DEFAULT_WIDTH);
        assert_matches!(
            GameConfig::from_json(r#"{ "target_total": 0 }"#),
            Err(Error::EmptyRound)
        );
    }
}
