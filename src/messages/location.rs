//! Planar point and location types.

use serde::{Deserialize, Serialize};

/// A 2D point in graph units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point2D {
    /// Create a new point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point (avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// A pose on a named map: planar position plus heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Name of the map this location is on
    pub map_name: String,
    /// Planar position in graph units
    pub position: Point2D,
    /// Heading in radians
    pub yaw: f64,
}

impl Location {
    /// Create a new location.
    pub fn new(map_name: impl Into<String>, position: Point2D, yaw: f64) -> Self {
        Self {
            map_name: map_name.into(),
            position,
            yaw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert_relative_eq!(a.distance(&b), 5.0);
        assert_relative_eq!(a.distance_squared(&b), 25.0);
    }

    #[test]
    fn test_point_distance_to_self() {
        let p = Point2D::new(3.0, 4.0);
        assert_eq!(p.distance(&p), 0.0);
    }
}
