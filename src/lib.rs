// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive compute-shader demos built on wgpu.
//!
//! A free-look [`camera::FlyCamera`] is driven by a [`frame::FrameLoop`]
//! that drains input, polls held movement keys and hands a
//! [`frame::FrameParams`] bundle to a pluggable [`frame::FrameRenderer`]
//! every iteration.
//!
//! # Key entry points
//!
//! - [`camera::FlyCamera`] - yaw/pitch/zoom camera with WASD-style movement
//! - [`frame::FrameLoop`] - the per-frame control loop
//! - [`renderer`] - GPU compute and CPU ray-tracing renderers
//! - [`options::Options`] - TOML-backed runtime configuration
//!
//! # Architecture
//!
//! The loop itself never touches the GPU or the window system. Input
//! arrives through the [`input::InputSource`] trait and pixels leave
//! through [`frame::FrameRenderer`], so the camera and loop are fully
//! testable headless. The `viewer` feature supplies a winit host that
//! adapts window events into an input source and picks a renderer at
//! startup.

pub mod camera;
pub mod error;
pub mod frame;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use error::DemoError;
pub use frame::{FrameLoop, FrameParams, FrameRenderer, LoopState};
pub use input::{InputEvent, InputSource, Key};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
