//! Keeps the globe and the travel chat in step.
//!
//! [`SyncOrchestrator`] turns globe clicks, city picks, user messages and
//! assistant replies into camera flights and conversation context. The chat
//! model sits behind the [`ChatCollaborator`] trait; nothing here blocks on it.

pub mod chat;
pub mod notice;
pub mod orchestrator;
pub mod prompt;

pub use chat::*;
pub use notice::*;
pub use orchestrator::*;
pub use prompt::*;
