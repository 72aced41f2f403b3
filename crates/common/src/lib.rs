//! Shared value types and configuration for the ringflight simulator.
//!
//! # Invariants
//! - Types here are plain data; no crate in the workspace hides state behind them.
//! - Every configuration field has a default, and loaded configs are validated.

mod config;
mod types;

pub use config::{
    CameraConfig, ConfigError, FlightTuning, FrameConfig, InitialState, MAX_GRID_EXTENT, SimConfig,
    WorldConfig,
};
pub use types::{Pose, Ring, Viewport};
