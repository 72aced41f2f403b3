//! Input Tracker: platform keys mapped to flight controls.
//!
//! # Invariants
//! - The simulation consumes [`ControlSet`] snapshots, never raw key events.
//! - The reserved reset key never enters the active control set.
//! - Key types are generic so no windowing crate leaks into this crate.

pub mod action;
pub mod control;
pub mod tracker;

pub use action::Action;
pub use control::{Control, ControlSet, UnknownControl};
pub use tracker::{Binding, InputTracker, KeyMap};
