use crate::spawner::Bounds;

/// Half-length of each crosshair line, in pixels.
pub const ARM_LENGTH: f64 = 15.0;
pub const LINE_WIDTH: f64 = 2.0;

/// Simulated cursor driven by relative pointer motion under pointer lock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crosshair {
    pub x: f64,
    pub y: f64,
}

impl Crosshair {
    pub fn centered(bounds: Bounds) -> Self {
        let (x, y) = bounds.center();
        Self { x, y }
    }

    /// Scale a raw delta by `sensitivity` and keep the result on the surface.
    /// An axis whose step is not finite stays where it is.
    pub fn apply_motion(&mut self, dx: f64, dy: f64, sensitivity: f64, bounds: Bounds) {
        self.x = step(self.x, dx * sensitivity, bounds.width);
        self.y = step(self.y, dy * sensitivity, bounds.height);
    }
}

fn step(pos: f64, delta: f64, extent: f64) -> f64 {
    let next = pos + delta;
    if next.is_finite() {
        next.clamp(0.0, extent)
    } else {
        pos
    }
}
