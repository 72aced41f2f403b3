//! Simulation kernel: flight state, terrain height field, ring course and frame clock.
//!
//! # Invariants
//! - Throttle stays in [0, 1] after every step.
//! - Altitude never ends a step below terrain height plus ground clearance.
//! - Stepping is pure with respect to (state, dt, control snapshot).
//! - No process-wide state: everything lives in [`Simulation`].

pub mod clock;
pub mod flight;
pub mod rings;
pub mod simulation;
pub mod terrain;

pub use clock::{ClockState, FrameClock};
pub use flight::{FlightModel, SimulationState};
pub use simulation::Simulation;
