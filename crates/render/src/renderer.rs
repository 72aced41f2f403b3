use ringflight_common::Viewport;
use ringflight_kernel::Simulation;
use std::fmt::Write;

use crate::scene::{DrawList, SceneBuilder};

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads simulation state and a viewport, then produces output.
/// It never mutates the simulation.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame. `viewport` is read per call so resizes apply on the
    /// next frame.
    fn render(&self, sim: &Simulation, viewport: Viewport) -> Self::Output;
}

impl Renderer for SceneBuilder {
    type Output = DrawList;

    fn render(&self, sim: &Simulation, viewport: Viewport) -> DrawList {
        self.build(sim, viewport)
    }
}

/// Text renderer for headless runs and logs.
///
/// Builds the same draw list a windowed frontend would paint, then reports
/// the pose and what ended up on screen.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    scene: SceneBuilder,
}

impl DebugTextRenderer {
    pub fn new(scene: SceneBuilder) -> Self {
        Self { scene }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, sim: &Simulation, viewport: Viewport) -> String {
        let list = self.scene.build(sim, viewport);
        let s = sim.state();
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "=== Frame (t={:.2}s, {}x{}) ===",
            s.elapsed, viewport.width, viewport.height
        );
        let _ = writeln!(
            out,
            "Pose: pos=({:.1}, {:.1}, {:.1}) heading={:.3} pitch={:.3} roll={:.3}",
            s.position.x, s.position.y, s.position.z, s.heading, s.pitch, s.roll
        );
        let _ = writeln!(
            out,
            "Primitives: {} (grid lines: {}, rings: {}/{})",
            list.len(),
            list.line_count(),
            list.ring_count(),
            sim.rings().len()
        );

        let projector = self.scene.projector();
        let pose = sim.pose();
        for (i, ring) in sim.rings().iter().enumerate() {
            match projector.project(ring.position, &pose, viewport) {
                Some(p) => {
                    let _ = writeln!(
                        out,
                        "  ring {i:>2}: screen=({:.0}, {:.0}) depth={:.1} scale={:.3}",
                        p.screen.x, p.screen.y, p.depth, p.scale
                    );
                }
                None => {
                    let _ = writeln!(out, "  ring {i:>2}: behind camera");
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_renderer_reports_frame() {
        let sim = Simulation::default();
        let renderer = DebugTextRenderer::default();
        let output = renderer.render(&sim, Viewport::new(800.0, 600.0));

        assert!(output.contains("t=0.00s"));
        assert!(output.contains("800x600"));
        assert!(output.contains("pos=(0.0, 80.0, 0.0)"));
        assert!(output.contains("rings: "));
        assert_eq!(output.matches("  ring ").count(), 24);
    }

    #[test]
    fn debug_renderer_marks_hidden_rings() {
        let mut sim = Simulation::default();
        sim.state_mut().heading = std::f32::consts::PI;
        let output = DebugTextRenderer::default().render(&sim, Viewport::default());
        assert_eq!(output.matches("behind camera").count(), 24);
    }

    #[test]
    fn scene_builder_is_a_renderer() {
        let sim = Simulation::default();
        let list = SceneBuilder::default().render(&sim, Viewport::default());
        assert!(!list.is_empty());
    }

    #[test]
    fn rendering_does_not_mutate() {
        let sim = Simulation::default();
        let before = *sim.state();
        let _ = DebugTextRenderer::default().render(&sim, Viewport::default());
        assert_eq!(*sim.state(), before);
    }
}
