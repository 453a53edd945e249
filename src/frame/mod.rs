//! The frame loop: timing, input dispatch and renderer hand-off.
//!
//! Each iteration measures the delta since the previous one, drains
//! pending input into the camera, applies held movement keys, lets the
//! camera advance, and passes a [`FrameParams`] snapshot to the
//! [`FrameRenderer`]. A quit event moves the loop to
//! [`LoopState::Stopped`], which is terminal.

/// Per-frame parameter bundle handed to renderers.
pub mod params;
/// The loop state machine and the renderer capability.
pub mod runner;
/// Monotonic clocks and frame timing.
pub mod timing;

pub use params::FrameParams;
pub use runner::{FrameLoop, FrameRenderer, LoopState};
pub use timing::{FixedStepClock, FrameClock, FrameTiming, SystemClock};
