use glam::{Vec2, Vec3};
use ringflight_common::{CameraConfig, Pose, Viewport};

/// A world point mapped onto the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    /// Screen position in pixels, origin top-left, y down.
    pub screen: Vec2,
    /// Pixels per world unit at this depth.
    pub scale: f32,
    /// Distance along the camera's forward axis.
    pub depth: f32,
}

/// Pinhole projector with a fixed focal length and a near-plane cutoff.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    focal_length: f32,
    near_plane: f32,
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}

impl Projector {
    pub fn new(camera: &CameraConfig) -> Self {
        Self {
            focal_length: camera.focal_length,
            near_plane: camera.near_plane,
        }
    }

    /// Camera-relative coordinates of `point`: x right, y up, z forward.
    ///
    /// Rotations undo the pose in a fixed order: heading, then pitch, then
    /// roll. The order matters; these do not commute.
    pub fn to_view(&self, point: Vec3, pose: &Pose) -> Vec3 {
        let d = point - pose.position;

        let (sin_h, cos_h) = pose.heading.sin_cos();
        let x1 = d.x * cos_h - d.z * sin_h;
        let z1 = d.x * sin_h + d.z * cos_h;
        let y1 = d.y;

        let (sin_p, cos_p) = pose.pitch.sin_cos();
        let y2 = y1 * cos_p + z1 * sin_p;
        let z2 = -y1 * sin_p + z1 * cos_p;

        let (sin_r, cos_r) = pose.roll.sin_cos();
        let x3 = x1 * cos_r + y2 * sin_r;
        let y3 = -x1 * sin_r + y2 * cos_r;

        Vec3::new(x3, y3, z2)
    }

    /// Project `point` for a camera at `pose` onto `viewport`.
    ///
    /// `None` when the point lies behind the camera, closer than the near
    /// plane, or has no defined depth (NaN). Callers skip such points; it is
    /// not an error.
    ///
    /// Screen y is `cy - (y / depth) * focal`: view y points up while screen
    /// y grows downward, so the sign is flipped relative to x.
    pub fn project(&self, point: Vec3, pose: &Pose, viewport: Viewport) -> Option<ProjectedPoint> {
        let view = self.to_view(point, pose);
        let depth = view.z;
        if !(depth >= self.near_plane) {
            return None;
        }
        let scale = self.focal_length / depth;
        let (cx, cy) = viewport.center();
        Some(ProjectedPoint {
            // View y is up; screen y is down.
            screen: Vec2::new(cx + view.x * scale, cy - view.y * scale),
            scale,
            depth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn forward_point_projects_to_center() {
        let projector = Projector::default();
        let poses = [
            Pose::at(Vec3::new(0.0, 80.0, 0.0)),
            Pose {
                position: Vec3::new(12.0, 50.0, -30.0),
                heading: 0.7,
                pitch: -0.3,
                roll: 0.4,
            },
            Pose {
                position: Vec3::new(-400.0, 20.0, 900.0),
                heading: -2.5,
                pitch: 0.2,
                roll: -1.1,
            },
        ];
        for pose in poses {
            let target = pose.position + pose.forward() * 100.0;
            let p = projector.project(target, &pose, VIEW).unwrap();
            assert!(close(p.screen.x, 400.0), "x = {}", p.screen.x);
            assert!(close(p.screen.y, 300.0), "y = {}", p.screen.y);
            assert!(close(p.depth, 100.0));
            assert!(close(p.scale, 4.2));
        }
    }

    #[test]
    fn behind_camera_is_absent() {
        let projector = Projector::default();
        let pose = Pose::at(Vec3::ZERO);
        assert!(projector.project(Vec3::new(0.0, 0.0, -10.0), &pose, VIEW).is_none());
    }

    #[test]
    fn nan_point_is_absent() {
        let projector = Projector::default();
        let pose = Pose::at(Vec3::ZERO);
        assert!(projector.project(Vec3::new(0.0, 0.0, f32::NAN), &pose, VIEW).is_none());
        assert!(projector.project(Vec3::splat(f32::NAN), &pose, VIEW).is_none());
    }

    #[test]
    fn near_plane_threshold() {
        let projector = Projector::default();
        let pose = Pose::at(Vec3::ZERO);
        assert!(projector.project(Vec3::new(0.0, 0.0, 1.9), &pose, VIEW).is_none());
        let p = projector.project(Vec3::new(0.0, 0.0, 2.0), &pose, VIEW).unwrap();
        assert_eq!(p.scale, 210.0);
    }

    #[test]
    fn pinhole_offsets() {
        let projector = Projector::default();
        let pose = Pose::at(Vec3::ZERO);
        let p = projector
            .project(Vec3::new(10.0, 5.0, 100.0), &pose, VIEW)
            .unwrap();
        assert!(close(p.screen.x, 400.0 + 0.1 * 420.0));
        // Above the camera draws above screen center.
        assert!(close(p.screen.y, 300.0 - 0.05 * 420.0));
    }

    #[test]
    fn ground_below_draws_below_center() {
        let projector = Projector::default();
        let pose = Pose::at(Vec3::new(0.0, 80.0, 0.0));
        let p = projector
            .project(Vec3::new(0.0, 20.0, 200.0), &pose, VIEW)
            .unwrap();
        assert!(p.screen.y > 300.0);
    }

    #[test]
    fn heading_turns_the_view() {
        let projector = Projector::default();
        // Facing +x: a point straight ahead on +x is centered,
        // and a point on +z is now behind-left and out of view.
        let pose = Pose {
            heading: std::f32::consts::FRAC_PI_2,
            ..Pose::default()
        };
        let ahead = projector
            .project(Vec3::new(50.0, 0.0, 0.0), &pose, VIEW)
            .unwrap();
        assert!(close(ahead.screen.x, 400.0));
        let side = projector.to_view(Vec3::new(0.0, 0.0, 50.0), &pose);
        assert!(close(side.z, 0.0));
        assert!(side.x < 0.0);
    }

    #[test]
    fn roll_preserves_depth() {
        let projector = Projector::default();
        let level = Pose::default();
        let rolled = Pose { roll: 0.9, ..level };
        let point = Vec3::new(7.0, -3.0, 40.0);
        let a = projector.to_view(point, &level);
        let b = projector.to_view(point, &rolled);
        assert!(close(a.z, b.z));
        assert!(close(a.truncate().length(), b.truncate().length()));
    }

    #[test]
    fn nose_up_moves_horizon_down() {
        let projector = Projector::default();
        let far = Vec3::new(0.0, 0.0, 1_000.0);
        let level = projector.project(far, &Pose::default(), VIEW).unwrap();
        let nose_up = Pose {
            pitch: -0.2,
            ..Pose::default()
        };
        let raised = projector.project(far, &nose_up, VIEW).unwrap();
        assert!(raised.screen.y > level.screen.y);
    }
}
