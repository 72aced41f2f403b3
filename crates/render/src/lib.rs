//! Rendering Adapter: camera projection and renderer-agnostic draw lists.
//!
//! # Invariants
//! - Renderers cannot mutate simulation state.
//! - A point that fails to project is skipped, never reported as an error.
//! - Draw lists are ordered back to front: background, grid, rings, crosshair.
//!
//! Frontends paint a [`DrawList`] with whatever 2D API they have; nothing in
//! this crate depends on a windowing or GPU library.

mod projector;
mod renderer;
mod scene;

pub use projector::{ProjectedPoint, Projector};
pub use renderer::{DebugTextRenderer, Renderer};
pub use scene::{DrawCommand, DrawList, Palette, Rgb, SceneBuilder, depth_fade, ring_radius};
