//! Standalone demo window backed by winit.
//!
//! Window events are translated into [`InputEvent`]s and queued; every
//! redraw drives one [`FrameLoop::tick`] against the renderer selected in
//! the options.
//!
//! ```no_run
//! # use shaderlab::{options::Options, Viewer};
//! Viewer::builder()
//!     .with_options(Options::default())
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    error::DemoError,
    frame::{FrameLoop, FrameRenderer, LoopState},
    gpu::render_context::RenderContext,
    input::{InputEvent, Key, QueuedInput},
    options::Options,
    renderer,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: Option<String>,
}

impl ViewerBuilder {
    /// Create a builder with default options and the options' window
    /// title.
    fn new() -> Self {
        Self {
            options: None,
            title: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title, overriding `[window] title`.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let options = self.options.unwrap_or_default();
        let title = self.title.unwrap_or_else(|| options.window.title.clone());
        Viewer { options, title }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window running one demo renderer.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed or the renderer fails.
    ///
    /// # Errors
    ///
    /// Returns the event-loop failure, or the first GPU setup or render
    /// error that stopped the demo.
    pub fn run(self) -> Result<(), DemoError> {
        let event_loop =
            EventLoop::new().map_err(|e| DemoError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            renderer: None,
            frames: FrameLoop::new(&self.options),
            input: QueuedInput::new(),
            options: self.options,
            title: self.title,
            error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| DemoError::Viewer(e.to_string()))?;

        app.error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    renderer: Option<Box<dyn FrameRenderer>>,
    frames: FrameLoop,
    input: QueuedInput,
    options: Options,
    title: String,
    /// First fatal error; returned from [`Viewer::run`].
    error: Option<DemoError>,
}

/// Compute the wgpu surface size from the window's inner size.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: DemoError) {
        log::error!("{error}");
        if self.error.is_none() {
            self.error = Some(error);
        }
        event_loop.exit();
    }

    fn request_redraw(&self) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    /// Re-seed the camera on the next pointer move. Moves still queued
    /// from before the gap are dropped so none of them becomes the seed.
    fn reset_pointer(&mut self) {
        self.input.discard_pointer_moves();
        self.frames.camera_mut().reset_pointer();
    }

    fn on_key(&mut self, key: Key, state: ElementState, repeat: bool) {
        match (state, repeat) {
            (ElementState::Pressed, false) => {
                self.input.push(InputEvent::KeyDown { key });
            }
            (ElementState::Pressed, true) => self.input.hold(key),
            (ElementState::Released, _) => self.input.release(key),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        match self.frames.tick(&mut self.input, renderer.as_mut()) {
            Ok(LoopState::Running) => self.request_redraw(),
            Ok(LoopState::Stopped) => event_loop.exit(),
            Err(e) => self.fail(event_loop, e),
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.options.window.width.max(1),
                self.options.window.height.max(1),
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(event_loop, DemoError::Viewer(e.to_string()));
                return;
            }
        };

        let (vp_w, vp_h) = viewport_size(window.inner_size());
        let context = match pollster::block_on(RenderContext::new(
            window.clone(),
            (vp_w, vp_h),
            self.options.window.vsync,
        )) {
            Ok(c) => c,
            Err(e) => {
                self.fail(event_loop, e.into());
                return;
            }
        };

        match renderer::build_renderer(context, &self.options) {
            Ok(r) => self.renderer = Some(r),
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        }

        log::info!(
            "{} renderer, kernel {}",
            self.options.renderer.kind,
            self.options.renderer.kernel
        );
        self.frames.resize(vp_w, vp_h);
        // Setup time is not part of the first frame.
        self.frames.restart_timing();
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                if self.renderer.is_none() {
                    event_loop.exit();
                    return;
                }
                // Handled by the loop on the next tick.
                self.input.push(InputEvent::Quit);
                self.request_redraw();
            }

            WindowEvent::Resized(size) => {
                let (vp_w, vp_h) = viewport_size(size);
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(vp_w, vp_h);
                }
                self.frames.resize(vp_w, vp_h);
            }

            WindowEvent::Focused(focused) => {
                if focused {
                    self.reset_pointer();
                } else {
                    self.input.release_all();
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            WindowEvent::CursorMoved { position, .. } => {
                self.input.push(InputEvent::PointerMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::CursorLeft { .. } => self.reset_pointer(),

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll_delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                self.input.push(InputEvent::Scroll {
                    delta: scroll_delta,
                });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                if let Some(key) = Key::from_key_code(code) {
                    self.on_key(key, event.state, event.repeat);
                }
            }

            _ => (),
        }
    }
}
