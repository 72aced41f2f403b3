use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A continuous flight control, active for as long as its key is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Control {
    PitchUp,
    PitchDown,
    RollLeft,
    RollRight,
    YawLeft,
    YawRight,
    ThrottleUp,
    ThrottleDown,
}

impl Control {
    pub const ALL: [Control; 8] = [
        Control::PitchUp,
        Control::PitchDown,
        Control::RollLeft,
        Control::RollRight,
        Control::YawLeft,
        Control::YawRight,
        Control::ThrottleUp,
        Control::ThrottleDown,
    ];

    fn bit(self) -> u16 {
        1 << self as u16
    }

    pub fn name(self) -> &'static str {
        match self {
            Control::PitchUp => "pitch-up",
            Control::PitchDown => "pitch-down",
            Control::RollLeft => "roll-left",
            Control::RollRight => "roll-right",
            Control::YawLeft => "yaw-left",
            Control::YawRight => "yaw-right",
            Control::ThrottleUp => "throttle-up",
            Control::ThrottleDown => "throttle-down",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no [`Control`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown control `{0}`")]
pub struct UnknownControl(pub String);

impl FromStr for Control {
    type Err = UnknownControl;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Control::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownControl(s.to_string()))
    }
}

/// Snapshot of the controls held at one instant.
///
/// A bitset, so copying it into the update step is free and the snapshot can
/// never alias the tracker's live state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ControlSet(u16);

impl ControlSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns true if the control was newly inserted.
    pub fn insert(&mut self, control: Control) -> bool {
        let fresh = !self.contains(control);
        self.0 |= control.bit();
        fresh
    }

    /// Returns true if the control was present.
    pub fn remove(&mut self, control: Control) -> bool {
        let present = self.contains(control);
        self.0 &= !control.bit();
        present
    }

    pub fn contains(&self, control: Control) -> bool {
        self.0 & control.bit() != 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Active controls in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Control> + use<> {
        let set = *self;
        Control::ALL.into_iter().filter(move |c| set.contains(*c))
    }

    /// +1 when only `positive` is held, -1 when only `negative` is, 0 otherwise.
    pub fn axis(&self, positive: Control, negative: Control) -> f32 {
        let mut value = 0.0;
        if self.contains(positive) {
            value += 1.0;
        }
        if self.contains(negative) {
            value -= 1.0;
        }
        value
    }
}

impl FromIterator<Control> for ControlSet {
    fn from_iter<I: IntoIterator<Item = Control>>(iter: I) -> Self {
        let mut set = Self::empty();
        for control in iter {
            set.insert(control);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_remove() {
        let mut set = ControlSet::empty();
        assert!(set.insert(Control::PitchUp));
        assert!(!set.insert(Control::PitchUp));
        assert!(set.contains(Control::PitchUp));
        assert!(!set.contains(Control::PitchDown));
        assert_eq!(set.len(), 1);

        assert!(set.remove(Control::PitchUp));
        assert!(!set.remove(Control::PitchUp));
        assert!(set.is_empty());
    }

    #[test]
    fn controls_combine() {
        let set: ControlSet = [Control::PitchUp, Control::RollLeft, Control::ThrottleUp]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 3);
        let held: Vec<Control> = set.iter().collect();
        assert_eq!(
            held,
            vec![Control::PitchUp, Control::RollLeft, Control::ThrottleUp]
        );
    }

    #[test]
    fn opposing_controls_cancel_on_axis() {
        let set: ControlSet = [Control::YawLeft, Control::YawRight].into_iter().collect();
        assert_eq!(set.axis(Control::YawRight, Control::YawLeft), 0.0);

        let set: ControlSet = [Control::YawRight].into_iter().collect();
        assert_eq!(set.axis(Control::YawRight, Control::YawLeft), 1.0);
        assert_eq!(set.axis(Control::YawLeft, Control::YawRight), -1.0);
    }

    #[test]
    fn clear_empties_set() {
        let mut set: ControlSet = Control::ALL.into_iter().collect();
        assert_eq!(set.len(), 8);
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn parse_control_names() {
        for control in Control::ALL {
            assert_eq!(control.name().parse::<Control>().unwrap(), control);
        }
        assert!("barrel-roll".parse::<Control>().is_err());
    }
}
