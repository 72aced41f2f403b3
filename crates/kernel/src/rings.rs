use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ringflight_common::Ring;

use crate::terrain;

/// Distance along +z to the first ring.
const FIRST_RING_Z: f32 = 160.0;
/// Nominal spacing between consecutive rings along +z.
const RING_SPACING: f32 = 110.0;
/// Minimum gap between a ring's lowest point and the terrain under its center.
const RING_GROUND_GAP: f32 = 12.0;

/// Lay out `count` rings along a weaving corridor ahead of the start point.
///
/// Each ring hovers above the terrain at its own (x, z), clear of the ground.
pub fn generate(count: usize, seed: u64) -> Vec<Ring> {
    let mut rng = StdRng::seed_from_u64(seed);
    let rings: Vec<Ring> = (0..count)
        .map(|i| {
            let t = i as f32;
            let radius = rng.gen_range(9.0..15.0);
            let x = (t * 0.55).sin() * 140.0 + rng.gen_range(-40.0..40.0);
            let z = FIRST_RING_Z + t * RING_SPACING + rng.gen_range(-20.0..20.0);
            let ground = terrain::height(x, z);
            let y = ground + radius + RING_GROUND_GAP + rng.gen_range(10.0..55.0);
            Ring {
                position: Vec3::new(x, y, z),
                radius,
            }
        })
        .collect();
    tracing::debug!("generated {} rings from seed {seed:#x}", rings.len());
    rings
}
