use crate::control::Control;

/// What a key event meant once resolved through the key map.
///
/// Continuous controls are folded into the tracker's [`ControlSet`]; only
/// [`Action::Reset`] needs the caller to act immediately.
///
/// [`ControlSet`]: crate::ControlSet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A control became active.
    Engage(Control),
    /// A control was released.
    Release(Control),
    /// Restore the simulation to its initial state.
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engage_and_release_are_distinct() {
        assert_ne!(Action::Engage(Control::PitchUp), Action::Release(Control::PitchUp));
        assert_ne!(Action::Engage(Control::PitchUp), Action::Engage(Control::PitchDown));
        assert_ne!(Action::Release(Control::YawLeft), Action::Reset);
    }
}
