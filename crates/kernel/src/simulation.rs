use ringflight_common::{Pose, Ring, SimConfig};
use ringflight_input::ControlSet;

use crate::flight::{FlightModel, SimulationState};
use crate::rings;

/// The authoritative simulation: flight state plus the static ring course.
///
/// All mutations go through [`advance`](Simulation::advance) and
/// [`reset`](Simulation::reset). Renderers and the HUD only read it.
#[derive(Debug, Clone)]
pub struct Simulation {
    model: FlightModel,
    state: SimulationState,
    rings: Vec<Ring>,
    ground_contacts: u64,
}

impl Simulation {
    pub fn new(config: &SimConfig) -> Self {
        let model = FlightModel::new(config.flight, config.initial);
        Self {
            model,
            state: SimulationState::new(&config.initial),
            rings: rings::generate(config.world.ring_count, config.world.ring_seed),
            ground_contacts: 0,
        }
    }

    /// Step the flight model by `dt` seconds using the given control snapshot.
    /// Returns true on ground contact.
    pub fn advance(&mut self, dt: f32, controls: ControlSet) -> bool {
        let contact = self.model.advance(&mut self.state, dt, controls);
        if contact {
            self.ground_contacts += 1;
            tracing::trace!(
                x = self.state.position.x,
                z = self.state.position.z,
                speed = self.state.speed,
                "ground contact"
            );
        }
        contact
    }

    /// Restore the initial flight state. The ring course is kept.
    pub fn reset(&mut self) {
        self.model.reset(&mut self.state);
        self.ground_contacts = 0;
        tracing::info!("simulation reset");
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct state access for scripted scenarios and tests.
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn pose(&self) -> Pose {
        self.state.pose()
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn model(&self) -> &FlightModel {
        &self.model
    }

    /// Steps that ended on the terrain floor since the last reset.
    pub fn ground_contacts(&self) -> u64 {
        self.ground_contacts
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(&SimConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use ringflight_input::Control;

    #[test]
    fn starts_at_initial_state() {
        let sim = Simulation::default();
        assert_eq!(sim.state().position, Vec3::new(0.0, 80.0, 0.0));
        assert_eq!(sim.rings().len(), 24);
        assert_eq!(sim.ground_contacts(), 0);
    }

    #[test]
    fn same_inputs_replay_identically() {
        let mut a = Simulation::default();
        let mut b = Simulation::default();
        let script = [
            ControlSet::empty(),
            [Control::PitchUp].into_iter().collect(),
            [Control::RollLeft, Control::ThrottleUp].into_iter().collect(),
            [Control::YawRight].into_iter().collect(),
        ];
        for i in 0..2_000 {
            let controls = script[i % script.len()];
            a.advance(1.0 / 60.0, controls);
            b.advance(1.0 / 60.0, controls);
        }
        assert_eq!(a.state(), b.state());
        assert_eq!(a.rings(), b.rings());
    }

    #[test]
    fn reset_keeps_rings_and_clears_contacts() {
        let mut sim = Simulation::default();
        let rings = sim.rings().to_vec();
        sim.state_mut().position.y = -100.0;
        assert!(sim.advance(1.0 / 60.0, ControlSet::empty()));
        assert_eq!(sim.ground_contacts(), 1);

        sim.reset();
        assert_eq!(sim.ground_contacts(), 0);
        assert_eq!(sim.state(), &SimulationState::default());
        assert_eq!(sim.rings(), rings.as_slice());
    }

    #[test]
    fn altitude_never_below_floor() {
        let mut sim = Simulation::default();
        let dive: ControlSet = [Control::PitchDown, Control::ThrottleUp]
            .into_iter()
            .collect();
        for _ in 0..3_000 {
            sim.advance(0.032, dive);
            let s = sim.state();
            assert!(s.position.y >= sim.model().floor(s.position.x, s.position.z));
        }
        assert!(sim.ground_contacts() > 0);
    }

    #[test]
    fn ring_count_follows_config() {
        let mut config = SimConfig::default();
        config.world.ring_count = 5;
        assert_eq!(Simulation::new(&config).rings().len(), 5);
    }
}
