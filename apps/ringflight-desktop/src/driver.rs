use std::hash::Hash;
use std::time::Instant;

use ringflight_common::{SimConfig, Viewport};
use ringflight_hud::Telemetry;
use ringflight_input::{Action, InputTracker, KeyMap};
use ringflight_kernel::{FrameClock, Simulation};
use ringflight_render::{DrawList, Renderer, SceneBuilder};

/// Everything a frontend needs to present one frame.
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub draw_list: DrawList,
    pub telemetry: Telemetry,
}

/// Per-frame sequence: clock, then flight model, then scene, then HUD.
///
/// Key events may arrive at any time between frames; each frame reads the
/// latest control snapshot exactly once.
pub struct FrameDriver<K> {
    sim: Simulation,
    tracker: InputTracker<K>,
    clock: FrameClock,
    scene: SceneBuilder,
    frames: u64,
}

impl<K: Eq + Hash> FrameDriver<K> {
    pub fn new(config: &SimConfig, keys: KeyMap<K>) -> Self {
        Self {
            sim: Simulation::new(config),
            tracker: InputTracker::new(keys),
            clock: FrameClock::new(config.frame.max_dt),
            scene: SceneBuilder::new(config),
            frames: 0,
        }
    }

    /// Feed a key event. The reset key acts immediately, outside the frame.
    pub fn handle_key(&mut self, key: &K, pressed: bool) {
        if let Some(action) = self.tracker.handle_key(key, pressed) {
            tracing::debug!(?action, "input");
            if action == Action::Reset {
                self.sim.reset();
            }
        }
    }

    /// Key-up events are lost while unfocused, so drop everything held.
    pub fn focus_lost(&mut self) {
        self.tracker.release_all();
    }

    /// Run one frame at wall-clock time `now` on a surface of `viewport` size.
    pub fn frame(&mut self, now: Instant, viewport: Viewport) -> FrameOutput {
        let dt = self.clock.tick(now);
        let controls = self.tracker.snapshot();
        self.sim.advance(dt, controls);
        let draw_list = self.scene.render(&self.sim, viewport);
        let telemetry = Telemetry::from_state(self.sim.state());
        self.frames += 1;
        FrameOutput {
            draw_list,
            telemetry,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    #[cfg(test)]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
