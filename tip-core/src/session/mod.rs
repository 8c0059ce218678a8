//! Per-screen session state and the event handlers the UI shell calls.
//!
//! The shell owns one [`TipSession`] per screen and passes every keystroke,
//! slider move and clear press through it. Saving and restoring across a
//! screen rebuild goes through a [`StateBundle`] whose storage the shell
//! chooses.

mod bundle;
mod state;

pub use bundle::{BundleValue, MemoryBundle, StateBundle};
pub use state::{SessionError, SliderUpdate, TextUpdate, TipSession, keys};
