//! Ports (trait boundaries) between the learning core and its drivers.
//!
//! The session and command line depend on these traits; the agents in
//! [`crate::learning`] and the observers in [`crate::session`] implement them.

pub mod learner;
pub mod observer;

pub use learner::Learner;
pub use observer::Observer;
