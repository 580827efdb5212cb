//! Mouse sensitivity conversion borrowed from FPS conventions.
//!
//! The multiplier turns raw `movementX/Y` deltas into crosshair pixels. CS:GO
//! uses `dpi * sens * 0.005`; Valorant sensitivity is CS:GO sensitivity scaled
//! by 0.426 (the usual 1 / 3.18 conversion, rounded). Any other game leaves raw
//! motion untouched.

use std::fmt;

use crate::error::{Error, Result};

pub const SCALING_FACTOR: f64 = 0.005;
pub const VALORANT_RATIO: f64 = 0.426;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameProfile {
    Csgo,
    Valorant,
    Other,
}

impl From<&str> for GameProfile {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "csgo" => GameProfile::Csgo,
            "valorant" => GameProfile::Valorant,
            _ => GameProfile::Other,
        }
    }
}

impl fmt::Display for GameProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameProfile::Csgo => "csgo",
            GameProfile::Valorant => "valorant",
            GameProfile::Other => "other",
        })
    }
}

pub fn compute_sensitivity(game: GameProfile, dpi: f64, in_game_sensitivity: f64) -> f64 {
    match game {
        GameProfile::Csgo => dpi * in_game_sensitivity * SCALING_FACTOR,
        GameProfile::Valorant => dpi * in_game_sensitivity * SCALING_FACTOR * VALORANT_RATIO,
        GameProfile::Other => 1.0,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensitivityProfile {
    pub game: GameProfile,
    pub dpi: f64,
    pub in_game_sensitivity: f64,
}

impl SensitivityProfile {
    /// Build a profile from the raw settings-panel text.
    ///
    /// DPI and in-game sensitivity must parse as positive finite numbers, and
    /// so must the multiplier they produce. The `Other` profile ignores both
    /// fields, so they are not validated there.
    pub fn parse(game: &str, dpi: &str, in_game_sensitivity: &str) -> Result<Self> {
        let game = GameProfile::from(game);
        if game == GameProfile::Other {
            return Ok(Self {
                game,
                dpi: 0.0,
                in_game_sensitivity: 0.0,
            });
        }
        let profile = Self {
            game,
            dpi: parse_positive("dpi", dpi)?,
            in_game_sensitivity: parse_positive("sensitivity", in_game_sensitivity)?,
        };
        let value = profile.multiplier();
        if !value.is_finite() || value <= 0.0 {
            return Err(Error::OutOfRange {
                field: "sensitivity",
                value,
            });
        }
        Ok(profile)
    }

    pub fn multiplier(&self) -> f64 {
        compute_sensitivity(self.game, self.dpi, self.in_game_sensitivity)
    }
}

fn parse_positive(field: &'static str, text: &str) -> Result<f64> {
    let value: f64 = text.trim().parse().map_err(|_| Error::InvalidNumber {
        field,
        value: text.to_string(),
    })?;
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::OutOfRange { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn csgo_800_dpi_at_one() {
        let s = compute_sensitivity(GameProfile::Csgo, 800.0, 1.0);
        assert!((s - 4.0).abs() < 1e-12, "{s}");
    }

    #[test]
    fn valorant_is_scaled_down() {
        let s = compute_sensitivity(GameProfile::Valorant, 800.0, 1.0);
        assert!((s - 1.704).abs() < 1e-9, "{s}");
    }

    #[test]
    fn unknown_game_is_identity() {
        assert_eq!(compute_sensitivity(GameProfile::Other, 1600.0, 3.0), 1.0);
        assert_eq!(GameProfile::from("overwatch"), GameProfile::Other);
        assert_eq!(GameProfile::from(" CSGO "), GameProfile::Csgo);
        assert_eq!(GameProfile::from("Valorant"), GameProfile::Valorant);
    }

    #[test]
    fn parse_accepts_panel_text() {
        let p = SensitivityProfile::parse("csgo", " 400 ", "2.5").unwrap();
        assert_eq!(p.dpi, 400.0);
        assert_eq!(p.in_game_sensitivity, 2.5);
        assert!((p.multiplier() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn parse_rejects_garbage_and_non_positive() {
        assert_matches!(
            SensitivityProfile::parse("csgo", "", "1"),
            Err(Error::InvalidNumber { field: "dpi", .. })
        );
        assert_matches!(
            SensitivityProfile::parse("valorant", "800", "fast"),
            Err(Error::InvalidNumber { field: "sensitivity", .. })
        );
        assert_matches!(
            SensitivityProfile::parse("csgo", "-800", "1"),
            Err(Error::OutOfRange { field: "dpi", .. })
        );
        assert_matches!(
            SensitivityProfile::parse("csgo", "800", "0"),
            Err(Error::OutOfRange { field: "sensitivity", .. })
        );
        assert_matches!(
            SensitivityProfile::parse("csgo", "NaN", "1"),
            Err(Error::OutOfRange { field: "dpi", .. })
        );
        assert_matches!(
            SensitivityProfile::parse("csgo", "inf", "1"),
            Err(Error::OutOfRange { field: "dpi", .. })
        );
    }

    #[test]
    fn parse_rejects_overflowing_multiplier() {
        assert_matches!(
            SensitivityProfile::parse("csgo", "1e200", "1e200"),
            Err(Error::OutOfRange { field: "sensitivity", value }) if value.is_infinite()
        );
        // Underflow to zero would freeze the crosshair.
        assert_matches!(
            SensitivityProfile::parse("valorant", "1e-200", "1e-200"),
            Err(Error::OutOfRange { field: "sensitivity", .. })
        );
    }

    #[test]
    fn other_profile_skips_numeric_fields() {
        let p = SensitivityProfile::parse("other", "", "nope").unwrap();
        assert_eq!(p.game, GameProfile::Other);
        assert_eq!(p.multiplier(), 1.0);
    }
}
