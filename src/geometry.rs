/// Plane geometry shared by movement, collision and particles.

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    /// Unit-length vector pointing at `angle` radians, scaled by `len`.
    pub fn from_angle(angle: f64, len: f64) -> Self {
        Vec2::new(angle.cos() * len, angle.sin() * len)
    }

    pub fn add(self, other: Vec2) -> Self {
        Vec2::new(self.x + other.x, self.y + other.y)
    }

    pub fn distance(self, other: Vec2) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// True when two circles overlap.  Touching exactly does not count.
pub fn circles_overlap(a: Vec2, ra: f64, b: Vec2, rb: f64) -> bool {
    a.distance(b) < ra + rb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(Vec2::new(0.0, 0.0).distance(Vec2::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn touching_circles_do_not_overlap() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        assert!(!circles_overlap(a, 5.0, b, 5.0));
        assert!(circles_overlap(a, 5.0, b, 5.01));
    }
}
