//! HUD: telemetry formatted from the flight state.
//!
//! # Invariants
//! - Formatting is read-only; nothing here mutates simulation state.
//! - Heading always displays within [0, 360).

mod telemetry;

pub use telemetry::{Telemetry, heading_degrees};
