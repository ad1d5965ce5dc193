//! Affine coordinate transform between the manager and robot frames.
//!
//! Robots report and accept locations in their own frame; the manager
//! reasons in the navigation-graph frame. The transform is a uniform
//! scale, a rotation and a translation, stateless and shareable.

use crate::error::{FleetError, Result};
use crate::geometry::normalize_angle;
use crate::messages::{Location, Point2D};

/// Stateless manager-frame ⇄ robot-frame transform.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateTransformer {
    scale: f64,
    rotation: f64,
    translation: Point2D,
}

impl CoordinateTransformer {
    /// Create a transform with the given scale, rotation (radians) and
    /// translation. Scale must be positive.
    pub fn new(scale: f64, rotation: f64, translation: Point2D) -> Result<Self> {
        if scale <= 0.0 {
            return Err(FleetError::Config(format!(
                "transform scale must be positive, got {}",
                scale
            )));
        }
        Ok(Self {
            scale,
            rotation,
            translation,
        })
    }

    /// The identity transform: both frames coincide.
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            rotation: 0.0,
            translation: Point2D::new(0.0, 0.0),
        }
    }

    /// Map a location from the manager frame into the robot frame.
    pub fn forward(&self, location: &Location) -> Location {
        let (sin_r, cos_r) = self.rotation.sin_cos();
        let p = location.position;
        let position = Point2D::new(
            self.scale * (p.x * cos_r - p.y * sin_r) + self.translation.x,
            self.scale * (p.x * sin_r + p.y * cos_r) + self.translation.y,
        );
        Location {
            map_name: location.map_name.clone(),
            position,
            yaw: normalize_angle(location.yaw + self.rotation),
        }
    }

    /// Map a location from the robot frame back into the manager frame.
    pub fn backward(&self, location: &Location) -> Location {
        let (sin_r, cos_r) = self.rotation.sin_cos();
        let dx = (location.position.x - self.translation.x) / self.scale;
        let dy = (location.position.y - self.translation.y) / self.scale;
        let position = Point2D::new(dx * cos_r + dy * sin_r, -dx * sin_r + dy * cos_r);
        Location {
            map_name: location.map_name.clone(),
            position,
            yaw: normalize_angle(location.yaw - self.rotation),
        }
    }
}
