//! Input handling: platform-agnostic events and keys, and the input
//! source capability the frame loop drains every iteration.

/// Platform-agnostic input events and key identifiers.
pub mod event;
/// The input source trait and a queue-backed implementation.
pub mod source;

pub use event::{InputEvent, Key};
pub use source::{InputSource, QueuedInput};
