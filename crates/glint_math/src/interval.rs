/// A range of ray parameters or scalar values.
///
/// Ray queries use the open form (`surrounds`): a hit at exactly `min` or
/// `max` is rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// The same interval with its upper bound moved to `max`.
    ///
    /// Closest-hit searches narrow the interval this way after each
    /// accepted hit.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }

    /// Everything in front of a ray origin: (0, +inf).
    pub const FORWARD: Interval = Interval {
        min: 0.0,
        max: f32::INFINITY,
    };

    /// The unit range [0, 1], used for colour clamping.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };
}
