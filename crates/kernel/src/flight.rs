use glam::Vec3;
use ringflight_common::{FlightTuning, InitialState, Pose};
use ringflight_input::{Control, ControlSet};
use serde::{Deserialize, Serialize};

use crate::terrain;

/// Mutable flight state. One instance lives for the whole session.
///
/// Heading accumulates without wrapping; pitch and roll decay toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub position: Vec3,
    pub speed: f32,
    /// Always within [0, 1].
    pub throttle: f32,
    pub pitch: f32,
    pub roll: f32,
    pub heading: f32,
    /// Seconds simulated since the last reset.
    pub elapsed: f32,
}

impl SimulationState {
    pub fn new(initial: &InitialState) -> Self {
        Self {
            position: initial.position,
            speed: initial.speed,
            throttle: initial.throttle,
            pitch: 0.0,
            roll: 0.0,
            heading: 0.0,
            elapsed: 0.0,
        }
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            heading: self.heading,
            pitch: self.pitch,
            roll: self.roll,
        }
    }

    pub fn altitude(&self) -> f32 {
        self.position.y
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(&InitialState::default())
    }
}

/// Arcade flight model: attitude from held controls, speed lagging behind a
/// throttle-driven target, and a terrain floor as the only collision.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlightModel {
    tuning: FlightTuning,
    initial: InitialState,
}

impl FlightModel {
    pub fn new(tuning: FlightTuning, initial: InitialState) -> Self {
        Self { tuning, initial }
    }

    /// Speed the lag converges to at the given throttle.
    pub fn target_speed(&self, throttle: f32) -> f32 {
        self.tuning.base_speed + throttle * self.tuning.speed_range
    }

    /// Lowest altitude allowed at `(x, z)`.
    pub fn floor(&self, x: f32, z: f32) -> f32 {
        terrain::height(x, z) + self.tuning.ground_clearance
    }

    /// Advance `state` by `dt` seconds with `controls` held.
    ///
    /// Returns true when the step ended in ground contact.
    pub fn advance(&self, state: &mut SimulationState, dt: f32, controls: ControlSet) -> bool {
        let t = &self.tuning;
        state.elapsed += dt;

        // Negative pitch is nose-up, so pitch-up subtracts.
        let turn = t.control_rate * dt;
        state.pitch += controls.axis(Control::PitchDown, Control::PitchUp) * turn;
        state.roll += controls.axis(Control::RollRight, Control::RollLeft) * turn;
        state.heading += controls.axis(Control::YawRight, Control::YawLeft) * turn;

        state.throttle += controls.axis(Control::ThrottleUp, Control::ThrottleDown)
            * t.throttle_rate
            * dt;
        state.throttle = state.throttle.clamp(0.0, 1.0);

        let target = self.target_speed(state.throttle);
        state.speed += (target - state.speed) * dt * t.speed_response;

        let climb = (-state.pitch).sin() * state.speed * t.climb_factor;
        state.position.y += (climb - t.gravity) * dt;
        state.position.x += state.heading.sin() * state.speed * dt;
        state.position.z += state.heading.cos() * state.speed * dt;

        let floor = self.floor(state.position.x, state.position.z);
        let contact = state.position.y < floor;
        if contact {
            state.position.y = floor;
            state.pitch *= t.ground_pitch_damping;
            state.speed *= t.ground_speed_damping;
        }

        // Per-step damping, deliberately not scaled by dt.
        state.roll *= t.roll_damping;
        state.pitch *= t.pitch_damping;

        contact
    }

    /// Restore the initial position, speed and throttle; zero attitude and time.
    pub fn reset(&self, state: &mut SimulationState) {
        *state = SimulationState::new(&self.initial);
    }
}
