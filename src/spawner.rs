//! Random dot placement.

use rand::Rng;

/// Drawable area, origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// The click target. Keeps the radius it was spawned with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Dot {
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (x - self.x).hypot(y - self.y)
    }

    /// Inclusive: a point exactly on the rim counts.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.distance_to(x, y) <= self.radius
    }
}

/// Place a dot uniformly so that the whole circle stays inside `bounds`.
pub fn spawn_dot<R: Rng>(rng: &mut R, bounds: Bounds, radius: f64) -> Dot {
    Dot {
        x: axis(rng, bounds.width, radius),
        y: axis(rng, bounds.height, radius),
        radius,
    }
}

fn axis<R: Rng>(rng: &mut R, extent: f64, radius: f64) -> f64 {
    let hi = extent - radius;
    if hi <= radius {
        // Degenerate axis: the dot cannot move along it.
        return extent / 2.0;
    }
    rng.gen_range(radius..=hi)
}
