use glam::{Vec2, Vec3};
use ringflight_common::{MAX_GRID_EXTENT, Pose, Ring, SimConfig, Viewport, WorldConfig};
use ringflight_kernel::{Simulation, terrain};

use crate::projector::{ProjectedPoint, Projector};

/// 8-bit RGB color, independent of any GPU or UI crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Colors used by the scene.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub sky_top: Rgb,
    pub sky_horizon: Rgb,
    pub ground_horizon: Rgb,
    pub ground_bottom: Rgb,
    pub grid: Rgb,
    pub ring: Rgb,
    pub crosshair: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            sky_top: Rgb::new(18, 42, 92),
            sky_horizon: Rgb::new(132, 178, 222),
            ground_horizon: Rgb::new(58, 86, 54),
            ground_bottom: Rgb::new(18, 32, 20),
            grid: Rgb::new(150, 230, 160),
            ring: Rgb::new(255, 196, 64),
            crosshair: Rgb::new(255, 255, 255),
        }
    }
}

/// One drawing primitive in screen space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Full-surface gradient, sky above `horizon` and ground below, with a
    /// hard color change at the horizon line.
    Background {
        size: Vec2,
        horizon: f32,
        sky_top: Rgb,
        sky_horizon: Rgb,
        ground_horizon: Rgb,
        ground_bottom: Rgb,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgb,
        alpha: f32,
        width: f32,
    },
    Ring {
        center: Vec2,
        radius: f32,
        color: Rgb,
        alpha: f32,
        width: f32,
    },
    Crosshair {
        center: Vec2,
        size: f32,
        color: Rgb,
    },
}

/// Ordered back-to-front list of primitives for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    pub fn ring_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Ring { .. }))
            .count()
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

/// Linear depth fade, clamped into `[min, max]`.
pub fn depth_fade(depth: f32, fade_depth: f32, min: f32, max: f32) -> f32 {
    (1.0 - depth / fade_depth).clamp(min, max)
}

const GRID_ALPHA_MIN: f32 = 0.06;
const GRID_ALPHA_MAX: f32 = 0.85;
const RING_ALPHA_MIN: f32 = 0.15;
const RING_ALPHA_MAX: f32 = 1.0;
const RING_PULSE_AMPLITUDE: f32 = 0.08;
const RING_PULSE_RATE: f32 = 3.0;
const RING_PULSE_DEPTH_PHASE: f32 = 0.01;
const CROSSHAIR_SIZE: f32 = 10.0;

/// Builds the per-frame draw list: background, terrain grid, rings, crosshair.
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    projector: Projector,
    world: WorldConfig,
    palette: Palette,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new(&SimConfig::default())
    }
}

impl SceneBuilder {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            projector: Projector::new(&config.camera),
            world: config.world,
            palette: Palette::default(),
        }
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    /// Build the full frame for the simulation's current pose.
    pub fn build(&self, sim: &Simulation, viewport: Viewport) -> DrawList {
        let pose = sim.pose();
        let mut list = DrawList::new();
        self.push_background(&mut list, viewport);
        self.push_grid(&mut list, &pose, viewport);
        self.push_rings(&mut list, sim.rings(), &pose, sim.state().elapsed, viewport);
        self.push_crosshair(&mut list, viewport);
        tracing::trace!(
            lines = list.line_count(),
            rings = list.ring_count(),
            "scene built"
        );
        list
    }

    fn push_background(&self, list: &mut DrawList, viewport: Viewport) {
        list.push(DrawCommand::Background {
            size: Vec2::new(viewport.width, viewport.height),
            horizon: viewport.height * 0.5,
            sky_top: self.palette.sky_top,
            sky_horizon: self.palette.sky_horizon,
            ground_horizon: self.palette.ground_horizon,
            ground_bottom: self.palette.ground_bottom,
        });
    }

    /// Terrain lines on a square lattice centred under the camera, snapped to
    /// the grid spacing so the lattice stays fixed in the world as it scrolls.
    fn push_grid(&self, list: &mut DrawList, pose: &Pose, viewport: Viewport) {
        let spacing = self.world.grid_spacing;
        // Unvalidated configs are clamped rather than trusted.
        let extent = self.world.grid_extent.min(MAX_GRID_EXTENT) as usize;
        let side = 2 * extent + 1;
        let corner_x = (pose.position.x / spacing).round() * spacing - extent as f32 * spacing;
        let corner_z = (pose.position.z / spacing).round() * spacing - extent as f32 * spacing;

        let vertices: Vec<Option<ProjectedPoint>> = (0..side)
            .flat_map(|j| (0..side).map(move |i| (i, j)))
            .map(|(i, j)| {
                let x = corner_x + i as f32 * spacing;
                let z = corner_z + j as f32 * spacing;
                let point = Vec3::new(x, terrain::height(x, z), z);
                self.projector.project(point, pose, viewport)
            })
            .collect();
        let at = |i: usize, j: usize| vertices[j * side + i];

        for a in 0..side {
            for b in 0..side - 1 {
                // Along z, then along x.
                self.push_segment(list, at(a, b), at(a, b + 1));
                self.push_segment(list, at(b, a), at(b + 1, a));
            }
        }
    }

    fn push_segment(
        &self,
        list: &mut DrawList,
        from: Option<ProjectedPoint>,
        to: Option<ProjectedPoint>,
    ) {
        let (Some(from), Some(to)) = (from, to) else {
            return;
        };
        let depth = (from.depth + to.depth) * 0.5;
        list.push(DrawCommand::Line {
            from: from.screen,
            to: to.screen,
            color: self.palette.grid,
            alpha: depth_fade(depth, self.world.grid_fade_depth, GRID_ALPHA_MIN, GRID_ALPHA_MAX),
            width: 1.0,
        });
    }

    fn push_rings(
        &self,
        list: &mut DrawList,
        rings: &[Ring],
        pose: &Pose,
        time: f32,
        viewport: Viewport,
    ) {
        let mut visible: Vec<(&Ring, ProjectedPoint)> = rings
            .iter()
            .filter_map(|ring| {
                self.projector
                    .project(ring.position, pose, viewport)
                    .map(|p| (ring, p))
            })
            .collect();
        // Farthest first so near rings overdraw far ones.
        visible.sort_by(|a, b| b.1.depth.total_cmp(&a.1.depth));

        for (ring, p) in visible {
            list.push(DrawCommand::Ring {
                center: p.screen,
                radius: ring_radius(ring.radius, p, time),
                color: self.palette.ring,
                alpha: depth_fade(
                    p.depth,
                    self.world.ring_fade_depth,
                    RING_ALPHA_MIN,
                    RING_ALPHA_MAX,
                ),
                width: (p.scale * 1.5).clamp(1.0, 4.0),
            });
        }
    }

    fn push_crosshair(&self, list: &mut DrawList, viewport: Viewport) {
        let (cx, cy) = viewport.center();
        list.push(DrawCommand::Crosshair {
            center: Vec2::new(cx, cy),
            size: CROSSHAIR_SIZE,
            color: self.palette.crosshair,
        });
    }
}

/// On-screen ring radius with a slow pulse that varies with time and depth.
pub fn ring_radius(radius: f32, p: ProjectedPoint, time: f32) -> f32 {
    let pulse = 1.0
        + RING_PULSE_AMPLITUDE * (time * RING_PULSE_RATE + p.depth * RING_PULSE_DEPTH_PHASE).sin();
    radius * p.scale * pulse
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn fixed_back_to_front_order() {
        let sim = Simulation::default();
        let list = SceneBuilder::default().build(&sim, VIEW);
        let commands = list.commands();
        assert!(matches!(commands.first(), Some(DrawCommand::Background { .. })));
        assert!(matches!(commands.last(), Some(DrawCommand::Crosshair { .. })));

        let first_ring = commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Ring { .. }));
        let last_line = commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Line { .. }));
        if let (Some(ring), Some(line)) = (first_ring, last_line) {
            assert!(line < ring);
        }
    }

    #[test]
    fn start_pose_sees_grid_and_rings() {
        let sim = Simulation::default();
        let list = SceneBuilder::default().build(&sim, VIEW);
        assert!(list.line_count() > 0);
        assert!(list.ring_count() > 0);
    }

    #[test]
    fn points_behind_camera_are_skipped() {
        let mut sim = Simulation::default();
        // Turn around: the whole ring course is now behind.
        sim.state_mut().heading = std::f32::consts::PI;
        let list = SceneBuilder::default().build(&sim, VIEW);
        assert_eq!(list.ring_count(), 0);

        // Half the lattice is behind, so fewer than the full line count.
        let extent = WorldConfig::default().grid_extent as usize;
        let side = 2 * extent + 1;
        assert!(list.line_count() < 2 * side * (side - 1));
    }

    #[test]
    fn oversized_grid_extent_is_clamped() {
        let mut config = SimConfig::default();
        config.world.grid_extent = 2_000_000_000;
        let sim = Simulation::new(&config);
        let list = SceneBuilder::new(&config).build(&sim, VIEW);

        let side = 2 * MAX_GRID_EXTENT as usize + 1;
        assert!(list.line_count() > 0);
        assert!(list.line_count() <= 2 * side * (side - 1));
    }

    #[test]
    fn line_alpha_stays_in_visible_range() {
        let sim = Simulation::default();
        let list = SceneBuilder::default().build(&sim, VIEW);
        for command in &list {
            if let DrawCommand::Line { alpha, .. } = command {
                assert!((GRID_ALPHA_MIN..=GRID_ALPHA_MAX).contains(alpha));
            }
        }
    }

    #[test]
    fn rings_drawn_far_to_near() {
        let sim = Simulation::default();
        let list = SceneBuilder::default().build(&sim, VIEW);
        let alphas: Vec<f32> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Ring { alpha, .. } => Some(*alpha),
                _ => None,
            })
            .collect();
        // Alpha fades with depth, so far-to-near means non-decreasing alpha.
        for pair in alphas.windows(2) {
            assert!(pair[0] <= pair[1] + 1e-6);
        }
    }

    #[test]
    fn crosshair_ignores_pose() {
        let mut sim = Simulation::default();
        sim.state_mut().roll = 1.0;
        sim.state_mut().pitch = -0.5;
        let list = SceneBuilder::default().build(&sim, VIEW);
        assert_eq!(
            list.commands().last(),
            Some(&DrawCommand::Crosshair {
                center: Vec2::new(400.0, 300.0),
                size: CROSSHAIR_SIZE,
                color: Palette::default().crosshair,
            })
        );
    }

    #[test]
    fn background_splits_at_half_height() {
        let sim = Simulation::default();
        let list = SceneBuilder::default().build(&sim, Viewport::new(640.0, 480.0));
        match &list.commands()[0] {
            DrawCommand::Background { size, horizon, .. } => {
                assert_eq!(*size, Vec2::new(640.0, 480.0));
                assert_eq!(*horizon, 240.0);
            }
            other => panic!("expected background, got {other:?}"),
        }
    }

    #[test]
    fn depth_fade_clamps() {
        assert_eq!(depth_fade(0.0, 500.0, 0.1, 0.9), 0.9);
        assert_eq!(depth_fade(250.0, 500.0, 0.1, 0.9), 0.5);
        assert_eq!(depth_fade(10_000.0, 500.0, 0.1, 0.9), 0.1);
    }

    #[test]
    fn ring_radius_scales_and_pulses() {
        let p = ProjectedPoint {
            screen: Vec2::ZERO,
            scale: 4.2,
            depth: 100.0,
        };
        let base = 10.0 * 4.2;
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for i in 0..200 {
            let r = ring_radius(10.0, p, i as f32 * 0.05);
            min = min.min(r);
            max = max.max(r);
        }
        assert!(min >= base * (1.0 - RING_PULSE_AMPLITUDE) - 1e-3);
        assert!(max <= base * (1.0 + RING_PULSE_AMPLITUDE) + 1e-3);
        assert!(max - min > base * RING_PULSE_AMPLITUDE);
    }
}
