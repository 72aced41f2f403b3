use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Camera pose: world position plus heading/pitch/roll in radians.
///
/// Heading 0 faces +z and grows clockwise seen from above. Negative pitch
/// is nose-up.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub heading: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl Pose {
    /// Pose at `position` with level attitude facing +z.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Unit vector along the direction of flight.
    pub fn forward(&self) -> Vec3 {
        let (sin_h, cos_h) = self.heading.sin_cos();
        let (sin_p, cos_p) = self.pitch.sin_cos();
        Vec3::new(sin_h * cos_p, -sin_p, cos_h * cos_p)
    }
}

/// Floating ring marker. Decorative only; never mutated after generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub position: Vec3,
    pub radius: f32,
}

/// Pixel dimensions of the drawable surface, read fresh every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width * 0.5, self.height * 0.5)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_pose_faces_positive_z() {
        let p = Pose::at(Vec3::new(0.0, 80.0, 0.0));
        let f = p.forward();
        assert!(f.x.abs() < 1e-6);
        assert!(f.y.abs() < 1e-6);
        assert!((f.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn heading_quarter_turn_faces_positive_x() {
        let p = Pose {
            heading: std::f32::consts::FRAC_PI_2,
            ..Pose::default()
        };
        let f = p.forward();
        assert!((f.x - 1.0).abs() < 1e-6);
        assert!(f.z.abs() < 1e-6);
    }

    #[test]
    fn negative_pitch_points_up() {
        let p = Pose {
            pitch: -0.3,
            ..Pose::default()
        };
        assert!(p.forward().y > 0.0);
    }

    #[test]
    fn viewport_center() {
        let v = Viewport::new(800.0, 600.0);
        assert_eq!(v.center(), (400.0, 300.0));
    }
}
