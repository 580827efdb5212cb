//! Round bookkeeping: counters, phase, timing and hit detection.
//!
//! Pure state. Timestamps are `performance.now()` milliseconds passed in by the
//! caller so the whole lifecycle can be driven from tests.

use rand::Rng;

use crate::spawner::{Bounds, Dot, spawn_dot};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Active,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shot {
    Hit,
    Miss,
}

/// Result of a click that was counted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickReport {
    pub shot: Shot,
    /// True when this click completed the round.
    pub finished: bool,
}

#[derive(Clone, Debug)]
pub struct Session {
    phase: Phase,
    hits: u32,
    clicks: u32,
    target_total: u32,
    started_at: Option<f64>,
    finished_at: Option<f64>,
    dot_radius: f64,
    dot: Option<Dot>,
}

/// Seconds between two `performance.now()` readings, never negative.
pub fn elapsed_secs(now: f64, started_at: f64) -> f64 {
    ((now - started_at) / 1000.0).max(0.0)
}

/// Percentage of clicks that hit, 0 before the first click.
pub fn accuracy(hits: u32, clicks: u32) -> f64 {
    if clicks == 0 {
        0.0
    } else {
        hits as f64 / clicks as f64 * 100.0
    }
}

impl Session {
    pub fn new(target_total: u32, dot_radius: f64) -> Self {
        Self {
            phase: Phase::Idle,
            hits: 0,
            clicks: 0,
            target_total,
            started_at: None,
            finished_at: None,
            dot_radius,
            dot: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }
    pub fn hits(&self) -> u32 {
        self.hits
    }
    pub fn clicks(&self) -> u32 {
        self.clicks
    }
    pub fn target_total(&self) -> u32 {
        self.target_total
    }
    pub fn dot(&self) -> Option<Dot> {
        self.dot
    }
    pub fn dot_radius(&self) -> f64 {
        self.dot_radius
    }

    /// Applies to dots spawned after this call; the one on screen keeps its size.
    pub fn set_dot_radius(&mut self, radius: f64) {
        self.dot_radius = radius;
    }

    pub fn start<R: Rng>(&mut self, now: f64, bounds: Bounds, rng: &mut R) {
        self.hits = 0;
        self.clicks = 0;
        self.phase = Phase::Active;
        self.started_at = Some(now);
        self.finished_at = None;
        self.dot = Some(spawn_dot(rng, bounds, self.dot_radius));
        log::info!("round started: {} dots", self.target_total);
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.hits = 0;
        self.clicks = 0;
        self.started_at = None;
        self.finished_at = None;
        self.dot = None;
    }

    /// Count a click at `(x, y)`. Ignored unless a round is running.
    pub fn register_click<R: Rng>(
        &mut self,
        x: f64,
        y: f64,
        now: f64,
        bounds: Bounds,
        rng: &mut R,
    ) -> Option<ClickReport> {
        if !self.is_active() {
            return None;
        }
        let dot = self.dot?;
        self.clicks += 1;
        let shot = if dot.contains(x, y) {
            self.hits += 1;
            Shot::Hit
        } else {
            Shot::Miss
        };

        let finished = self.clicks >= self.target_total;
        if finished {
            self.finish(now);
        } else {
            self.dot = Some(spawn_dot(rng, bounds, self.dot_radius));
        }
        Some(ClickReport { shot, finished })
    }

    /// End the round and freeze the clock. The last dot stays on screen.
    pub fn finish(&mut self, now: f64) {
        if self.phase != Phase::Active {
            return;
        }
        self.phase = Phase::Finished;
        self.finished_at = Some(now);
        log::info!(
            "round finished: {}/{} hits in {:.1}s",
            self.hits,
            self.clicks,
            self.elapsed_secs(now)
        );
    }

    pub fn accuracy(&self) -> f64 {
        accuracy(self.hits, self.clicks)
    }

    /// Seconds since start; frozen once finished, 0 when idle.
    pub fn elapsed_secs(&self, now: f64) -> f64 {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => elapsed_secs(end, start),
            (Some(start), None) => elapsed_secs(now, start),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const B: Bounds = Bounds {
        width: 800.0,
        height: 600.0,
    };

    fn started(target: u32) -> (Session, StdRng) {
        let mut rng = StdRng::seed_from_u64(11);
        let mut s = Session::new(target, 10.0);
        s.start(1_000.0, B, &mut rng);
        (s, rng)
    }

    #[test]
    fn clicks_before_start_are_ignored() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut s = Session::new(20, 10.0);
        assert_eq!(s.register_click(1.0, 1.0, 0.0, B, &mut rng), None);
        assert_eq!(s.clicks(), 0);
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn center_hit_and_rim_plus_epsilon_miss() {
        let (mut s, mut rng) = started(20);
        let d = s.dot().unwrap();
        let r = s.register_click(d.x, d.y, 1_100.0, B, &mut rng).unwrap();
        assert_eq!(r.shot, Shot::Hit);

        let d = s.dot().unwrap();
        let r = s
            .register_click(d.x + d.radius + 1e-6, d.y, 1_200.0, B, &mut rng)
            .unwrap();
        assert_eq!(r.shot, Shot::Miss);
        assert_eq!((s.hits(), s.clicks()), (1, 2));
        assert!((s.accuracy() - 50.0).abs() < 1e-12);
    }

    #[test]
    fn each_click_spawns_a_new_dot_until_the_last() {
        let (mut s, mut rng) = started(3);
        let first = s.dot().unwrap();
        s.register_click(0.0, 0.0, 1_001.0, B, &mut rng);
        assert_ne!(s.dot().unwrap(), first);
        s.register_click(0.0, 0.0, 1_002.0, B, &mut rng);
        let last = s.dot().unwrap();
        let r = s.register_click(0.0, 0.0, 1_003.0, B, &mut rng).unwrap();
        assert!(r.finished);
        assert_eq!(s.dot(), Some(last));
        assert_eq!(s.phase(), Phase::Finished);
        assert_eq!(s.register_click(last.x, last.y, 1_004.0, B, &mut rng), None);
        assert_eq!(s.clicks(), 3);
    }

    #[test]
    fn elapsed_freezes_on_finish() {
        let (mut s, mut rng) = started(1);
        assert!((s.elapsed_secs(3_500.0) - 2.5).abs() < 1e-12);
        s.register_click(0.0, 0.0, 4_000.0, B, &mut rng);
        assert!((s.elapsed_secs(99_000.0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn radius_change_affects_next_dot_only() {
        let (mut s, mut rng) = started(5);
        s.set_dot_radius(20.0);
        assert_eq!(s.dot().unwrap().radius, 10.0);
        s.register_click(0.0, 0.0, 1_001.0, B, &mut rng);
        assert_eq!(s.dot().unwrap().radius, 20.0);
    }

    #[test]
    fn reset_zeroes_everything() {
        let (mut s, mut rng) = started(5);
        s.register_click(0.0, 0.0, 1_001.0, B, &mut rng);
        s.reset();
        assert_eq!((s.hits(), s.clicks()), (0, 0));
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.dot(), None);
        assert_eq!(s.elapsed_secs(5_000.0), 0.0);
    }

    #[test]
    fn accuracy_guards_zero_clicks() {
        assert_eq!(accuracy(0, 0), 0.0);
        assert_eq!(accuracy(3, 4), 75.0);
        assert_eq!(elapsed_secs(500.0, 1_000.0), 0.0);
    }
}
