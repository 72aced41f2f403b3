//! Procedural terrain height field.
//!
//! The same function feeds the flight floor and the rendered grid, so what is
//! drawn is exactly what the aircraft bumps into.

/// Upper bound of [`height`] over the whole plane.
pub const MAX_HEIGHT: f32 = 18.0 + 9.0 + 8.0 + 5.0;

/// Terrain elevation at world `(x, z)`.
pub fn height(x: f32, z: f32) -> f32 {
    18.0 + 9.0 * (0.03 * x).sin() + 8.0 * (0.02 * z).cos() + 5.0 * (0.01 * (x + z)).sin()
}
