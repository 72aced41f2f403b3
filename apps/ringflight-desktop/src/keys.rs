use ringflight_input::{Control, KeyMap};
use winit::keyboard::KeyCode;

/// Arrows pitch and roll, A/D yaw, W/S throttle, R resets.
pub fn default_key_map() -> KeyMap<KeyCode> {
    KeyMap::new()
        .bind(KeyCode::ArrowUp, Control::PitchUp)
        .bind(KeyCode::ArrowDown, Control::PitchDown)
        .bind(KeyCode::ArrowLeft, Control::RollLeft)
        .bind(KeyCode::ArrowRight, Control::RollRight)
        .bind(KeyCode::KeyA, Control::YawLeft)
        .bind(KeyCode::KeyD, Control::YawRight)
        .bind(KeyCode::KeyW, Control::ThrottleUp)
        .bind(KeyCode::KeyS, Control::ThrottleDown)
        .bind_reset(KeyCode::KeyR)
}

/// One-line key reference for the HUD.
pub const HELP: &str = "Arrows: pitch/roll  A/D: yaw  W/S: throttle  R: reset";
