use ringflight_kernel::SimulationState;
use serde::Serialize;

/// Heading in degrees, wrapped into [0, 360).
pub fn heading_degrees(heading: f32) -> f32 {
    let deg = heading.to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if deg >= 360.0 { 0.0 } else { deg }
}

/// Display-ready readout of the flight state.
///
/// Pitch is sign-flipped so nose-up reads positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Telemetry {
    pub throttle_percent: f32,
    pub speed: f32,
    pub altitude: f32,
    pub pitch_degrees: f32,
    pub roll_degrees: f32,
    pub heading_degrees: f32,
}

impl Telemetry {
    pub fn from_state(state: &SimulationState) -> Self {
        Self {
            throttle_percent: state.throttle * 100.0,
            speed: state.speed,
            altitude: state.position.y,
            // Subtracting from zero keeps level flight from reading -0.0.
            pitch_degrees: 0.0 - state.pitch.to_degrees(),
            roll_degrees: state.roll.to_degrees(),
            heading_degrees: heading_degrees(state.heading),
        }
    }

    /// Label/value pairs in display order.
    pub fn fields(&self) -> [(&'static str, String); 6] {
        [
            ("THR", format!("{:.0}%", self.throttle_percent)),
            ("SPD", format!("{:.1}", self.speed)),
            ("ALT", format!("{:.1}", self.altitude)),
            ("PITCH", format!("{:.1}°", self.pitch_degrees)),
            ("ROLL", format!("{:.1}°", self.roll_degrees)),
            (
                "HDG",
                format!("{:03}°", self.heading_degrees.round() as u32 % 360),
            ),
        ]
    }
}

impl std::fmt::Display for Telemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (label, value)) in self.fields().iter().enumerate() {
            if i > 0 {
                f.write_str("  ")?;
            }
            write!(f, "{label} {value}")?;
        }
        Ok(())
    }
}
