use std::collections::HashMap;
use std::hash::Hash;

use crate::action::Action;
use crate::control::{Control, ControlSet};

/// What a platform key is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Control(Control),
    /// Reserved key: triggers a reset and is never tracked as held.
    Reset,
}

/// Platform key to [`Binding`] table, generic over the platform key type.
#[derive(Debug, Clone)]
pub struct KeyMap<K> {
    bindings: HashMap<K, Binding>,
}

impl<K: Eq + Hash> Default for KeyMap<K> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> KeyMap<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to a control. Rebinding a key replaces the old binding.
    pub fn bind(mut self, key: K, control: Control) -> Self {
        self.bindings.insert(key, Binding::Control(control));
        self
    }

    pub fn bind_reset(mut self, key: K) -> Self {
        self.bindings.insert(key, Binding::Reset);
        self
    }

    pub fn get(&self, key: &K) -> Option<Binding> {
        self.bindings.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Tracks which controls are currently held.
///
/// Key events mutate the live set as they arrive; the frame loop takes one
/// [`snapshot`](InputTracker::snapshot) per tick and hands it to the update step.
#[derive(Debug, Clone)]
pub struct InputTracker<K> {
    keys: KeyMap<K>,
    active: ControlSet,
}

impl<K: Eq + Hash> InputTracker<K> {
    pub fn new(keys: KeyMap<K>) -> Self {
        Self {
            keys,
            active: ControlSet::empty(),
        }
    }

    /// Feed one key event. Returns the resolved action, or `None` for unbound
    /// keys and for presses/releases that don't change the active set.
    pub fn handle_key(&mut self, key: &K, pressed: bool) -> Option<Action> {
        match self.keys.get(key)? {
            Binding::Reset if pressed => Some(Action::Reset),
            Binding::Reset => None,
            Binding::Control(control) if pressed => {
                self.active.insert(control).then_some(Action::Engage(control))
            }
            Binding::Control(control) => {
                self.active.remove(control).then_some(Action::Release(control))
            }
        }
    }

    /// Drop every held control, e.g. when the window loses focus and key-up
    /// events can no longer be observed.
    pub fn release_all(&mut self) {
        if !self.active.is_empty() {
            tracing::debug!("releasing {} held controls", self.active.len());
        }
        self.active.clear();
    }

    /// The controls held right now, by value.
    pub fn snapshot(&self) -> ControlSet {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> InputTracker<&'static str> {
        InputTracker::new(
            KeyMap::new()
                .bind("ArrowUp", Control::PitchUp)
                .bind("ArrowDown", Control::PitchDown)
                .bind("ArrowLeft", Control::RollLeft)
                .bind("KeyW", Control::ThrottleUp)
                .bind_reset("KeyR"),
        )
    }

    #[test]
    fn press_and_release_toggle_membership() {
        let mut t = tracker();
        assert_eq!(
            t.handle_key(&"ArrowUp", true),
            Some(Action::Engage(Control::PitchUp))
        );
        assert!(t.snapshot().contains(Control::PitchUp));

        assert_eq!(
            t.handle_key(&"ArrowUp", false),
            Some(Action::Release(Control::PitchUp))
        );
        assert!(t.snapshot().is_empty());
    }

    #[test]
    fn repeated_press_is_idempotent() {
        let mut t = tracker();
        t.handle_key(&"KeyW", true);
        assert_eq!(t.handle_key(&"KeyW", true), None);
        assert_eq!(t.snapshot().len(), 1);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut t = tracker();
        assert_eq!(t.handle_key(&"ArrowDown", false), None);
    }

    #[test]
    fn reset_key_is_not_tracked() {
        let mut t = tracker();
        assert_eq!(t.handle_key(&"KeyR", true), Some(Action::Reset));
        assert!(t.snapshot().is_empty());
        assert_eq!(t.handle_key(&"KeyR", false), None);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut t = tracker();
        assert_eq!(t.handle_key(&"KeyQ", true), None);
        assert!(t.snapshot().is_empty());
    }

    #[test]
    fn simultaneous_controls_combine() {
        let mut t = tracker();
        t.handle_key(&"ArrowUp", true);
        t.handle_key(&"ArrowLeft", true);
        let snap = t.snapshot();
        assert!(snap.contains(Control::PitchUp));
        assert!(snap.contains(Control::RollLeft));
    }

    #[test]
    fn snapshot_is_detached_from_live_state() {
        let mut t = tracker();
        t.handle_key(&"ArrowUp", true);
        let snap = t.snapshot();
        t.handle_key(&"ArrowUp", false);
        assert!(snap.contains(Control::PitchUp));
        assert!(!t.snapshot().contains(Control::PitchUp));
    }

    #[test]
    fn release_all_clears() {
        let mut t = tracker();
        t.handle_key(&"ArrowUp", true);
        t.handle_key(&"KeyW", true);
        t.release_all();
        assert!(t.snapshot().is_empty());
    }

    #[test]
    fn rebinding_replaces() {
        let map = KeyMap::new()
            .bind("KeyA", Control::YawLeft)
            .bind("KeyA", Control::YawRight);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&"KeyA"), Some(Binding::Control(Control::YawRight)));
    }
}
