//! Input-mode aware game controller.
//!
//! Turns browser events into session updates and answers with a list of
//! [`Effect`]s for the DOM adapter to carry out. Nothing in here touches the
//! DOM, so both input modes can be exercised natively.

use std::str::FromStr;

use rand::Rng;

use crate::config::GameConfig;
use crate::crosshair::Crosshair;
use crate::error::{Error, Result};
use crate::session::{ClickReport, Session, Shot};
use crate::spawner::{Bounds, Dot};
use crate::stats::StatsText;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// The OS cursor is the aim point; clicks land where the pointer is.
    DirectClick,
    /// Pointer lock with a simulated crosshair moved by relative motion.
    CapturedPointer,
}

impl FromStr for InputMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "click" | "direct" => Ok(InputMode::DirectClick),
            "crosshair" | "pointerlock" | "pointer-lock" => Ok(InputMode::CapturedPointer),
            other => Err(Error::UnknownMode(other.to_string())),
        }
    }
}

/// Work the DOM adapter must perform after a controller call.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Redraw,
    RefreshStats,
    StartTimer,
    StopTimer,
    RequestPointerCapture,
    ReleasePointerCapture,
    ShowResetControl(bool),
    HighlightDotSize(f64),
    Notify(String),
}

/// Which dot-size options carry the highlight after `selected` is chosen.
/// At most one entry is `true`, even when the page lists a size twice.
pub fn dot_size_highlight(options: &[f64], selected: f64) -> Vec<bool> {
    let chosen = options.iter().position(|&size| size == selected);
    (0..options.len()).map(|i| Some(i) == chosen).collect()
}

#[derive(Debug)]
pub struct Controller<R> {
    config: GameConfig,
    bounds: Bounds,
    mode: InputMode,
    session: Session,
    crosshair: Option<Crosshair>,
    sensitivity: f64,
    pointer_captured: bool,
    rng: R,
}

impl<R: Rng> Controller<R> {
    pub fn new(config: GameConfig, mode: InputMode, rng: R) -> Result<Self> {
        config.validate()?;
        let bounds = Bounds::new(config.width, config.height);
        let crosshair = match mode {
            InputMode::DirectClick => None,
            InputMode::CapturedPointer => Some(Crosshair::centered(bounds)),
        };
        Ok(Self {
            session: Session::new(config.target_total, config.dot_radius),
            config,
            bounds,
            mode,
            crosshair,
            sensitivity: 1.0,
            pointer_captured: false,
            rng,
        })
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
    pub fn session(&self) -> &Session {
        &self.session
    }
    pub fn dot(&self) -> Option<Dot> {
        self.session.dot()
    }
    pub fn crosshair(&self) -> Option<Crosshair> {
        self.crosshair
    }
    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }
    pub fn pointer_captured(&self) -> bool {
        self.pointer_captured
    }

    pub fn stats(&self, now: f64) -> StatsText {
        StatsText::of(&self.session, now)
    }

    pub fn start(&mut self, now: f64) -> Vec<Effect> {
        self.session.start(now, self.bounds, &mut self.rng);
        let mut effects = vec![
            Effect::Redraw,
            Effect::RefreshStats,
            Effect::StartTimer,
            Effect::ShowResetControl(true),
        ];
        if self.mode == InputMode::CapturedPointer {
            effects.push(Effect::RequestPointerCapture);
        }
        effects
    }

    pub fn reset(&mut self) -> Vec<Effect> {
        self.session.reset();
        log::info!("round reset");
        let mut effects = vec![Effect::StopTimer, Effect::Redraw, Effect::RefreshStats];
        if self.pointer_captured {
            effects.push(Effect::ReleasePointerCapture);
        }
        effects
    }

    /// A click on the surface at `(x, y)` in surface coordinates.
    ///
    /// The browser adapter passes `MouseEvent.offsetX/Y`, which web-sys exposes
    /// as whole pixels, so direct-click aim resolves to one pixel.
    ///
    /// With a captured pointer the DOM coordinate is meaningless; the
    /// crosshair position is the aim point instead.
    pub fn click(&mut self, x: f64, y: f64, now: f64) -> Vec<Effect> {
        let (ax, ay) = match self.crosshair {
            Some(c) => (c.x, c.y),
            None => (x, y),
        };
        let Some(ClickReport { shot, finished }) =
            self.session
                .register_click(ax, ay, now, self.bounds, &mut self.rng)
        else {
            return Vec::new();
        };
        log::debug!(
            "{} at ({ax:.1}, {ay:.1}), {}/{}",
            if shot == Shot::Hit { "hit" } else { "miss" },
            self.session.hits(),
            self.session.clicks()
        );

        let mut effects = vec![Effect::Redraw, Effect::RefreshStats];
        if finished {
            effects.push(Effect::StopTimer);
            if self.mode == InputMode::CapturedPointer {
                effects.push(Effect::ReleasePointerCapture);
            }
        }
        effects
    }

    /// Relative pointer motion; only moves the crosshair while captured.
    pub fn pointer_motion(&mut self, dx: f64, dy: f64) -> Vec<Effect> {
        if !self.pointer_captured {
            return Vec::new();
        }
        let Some(crosshair) = self.crosshair.as_mut() else {
            return Vec::new();
        };
        crosshair.apply_motion(dx, dy, self.sensitivity, self.bounds);
        vec![Effect::Redraw]
    }

    /// Pointer lock was granted or lost, for whatever reason.
    pub fn pointer_capture_changed(&mut self, captured: bool) -> Vec<Effect> {
        if self.mode != InputMode::CapturedPointer {
            return Vec::new();
        }
        self.pointer_captured = captured;
        log::debug!("pointer capture {}", if captured { "acquired" } else { "lost" });
        vec![Effect::ShowResetControl(!captured)]
    }

    /// Change the radius of subsequently spawned dots.
    pub fn select_dot_size(&mut self, radius: f64) -> Result<Vec<Effect>> {
        self.config.check_radius(radius)?;
        self.session.set_dot_radius(radius);
        Ok(vec![Effect::HighlightDotSize(radius)])
    }

    /// Apply the settings panel. A rejected input keeps the previous sensitivity.
    pub fn apply_settings(&mut self, game: &str, dpi: &str, in_game: &str) -> Vec<Effect> {
        match crate::sensitivity::SensitivityProfile::parse(game, dpi, in_game) {
            Ok(profile) => {
                self.sensitivity = profile.multiplier();
                log::info!("sensitivity {:.3} for {}", self.sensitivity, profile.game);
                vec![Effect::Notify(format!(
                    "Sensitivity applied: {:.2}",
                    self.sensitivity
                ))]
            }
            Err(err) => {
                log::warn!("settings rejected: {err}");
                vec![Effect::Notify(format!("Settings not applied: {err}"))]
            }
        }
    }
}
