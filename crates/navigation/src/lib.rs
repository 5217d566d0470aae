//! Globe camera navigation.
//!
//! [`NavigationMachine`] is the whole camera state machine as a plain value:
//! idle auto-rotation, interaction pause/resume, animated fly-to and reset.
//! It never reads a clock; every event carries the time it happened at.
//! [`NavigationController`] wraps one machine per globe view, resolves place
//! names through the gazetteer and logs what the machine reports.

pub mod animation;
pub mod config;
pub mod controller;
pub mod machine;

pub use animation::*;
pub use config::*;
pub use controller::*;
pub use machine::*;
