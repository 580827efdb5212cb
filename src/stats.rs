//! Text shown in the timer / accuracy / counter overlays.

use crate::session::{Phase, Session};

pub const ZERO_TIMER: &str = "Time: 0.0s";
pub const ZERO_ACCURACY: &str = "Accuracy: 0%";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsText {
    pub timer: String,
    pub accuracy: String,
    pub counter: String,
}

pub fn format_timer(secs: f64) -> String {
    format!("Time: {secs:.1}s")
}

pub fn format_final_timer(secs: f64) -> String {
    format!("Game Over! Time: {secs:.1}s")
}

pub fn format_accuracy(percent: f64) -> String {
    format!("Accuracy: {percent:.2}%")
}

pub fn format_counter(hits: u32, total: u32) -> String {
    format!("Dots Hit: {hits} / {total}")
}

impl StatsText {
    pub fn zero_state(target_total: u32) -> Self {
        Self {
            timer: ZERO_TIMER.to_string(),
            accuracy: ZERO_ACCURACY.to_string(),
            counter: format_counter(0, target_total),
        }
    }

    pub fn of(session: &Session, now: f64) -> Self {
        let secs = session.elapsed_secs(now);
        let timer = match session.phase() {
            Phase::Idle => ZERO_TIMER.to_string(),
            Phase::Active => format_timer(secs),
            Phase::Finished => format_final_timer(secs),
        };
        let accuracy = if session.clicks() == 0 {
            ZERO_ACCURACY.to_string()
        } else {
            format_accuracy(session.accuracy())
        };
        Self {
            timer,
            accuracy,
            counter: format_counter(session.hits(), session.target_total()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_use_fixed_decimals() {
        assert_eq!(format_timer(3.14159), "Time: 3.1s");
        assert_eq!(format_final_timer(12.0), "Game Over! Time: 12.0s");
        assert_eq!(format_accuracy(50.0), "Accuracy: 50.00%");
        assert_eq!(format_accuracy(100.0 / 3.0), "Accuracy: 33.33%");
        assert_eq!(format_counter(7, 20), "Dots Hit: 7 / 20");
    }

    #[test]
    fn zero_state_strings() {
        let z = StatsText::zero_state(20);
        assert_eq!(z.timer, "Time: 0.0s");
        assert_eq!(z.accuracy, "Accuracy: 0%");
        assert_eq!(z.counter, "Dots Hit: 0 / 20");
    }

    #[test]
    fn idle_session_renders_zero_state() {
        let s = Session::new(15, 10.0);
        assert_eq!(StatsText::of(&s, 123_456.0), StatsText::zero_state(15));
    }
}
