use glam::Vec2;

use super::params::FrameParams;
use super::timing::{FrameClock, FrameTiming, SystemClock};
use crate::camera::{FlyCamera, Movement};
use crate::error::DemoError;
use crate::input::{InputEvent, InputSource, Key};
use crate::options::{DisplayOptions, KeybindingOptions, Options};

/// Seconds between FPS log lines.
const FPS_LOG_INTERVAL: f32 = 5.0;

/// Produces and presents one frame.
///
/// GPU and CPU renderers both implement this; the loop treats the call as
/// a black box that has presented (or queued) the frame when it returns.
pub trait FrameRenderer {
    /// Render and present a frame.
    ///
    /// # Errors
    ///
    /// Any error is fatal for the loop; it is propagated unchanged.
    fn render(&mut self, params: &FrameParams) -> Result<(), DemoError>;

    /// The drawable area changed size (physical pixels).
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Frame loop lifecycle. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Frames are being produced.
    Running,
    /// A quit was observed or the renderer failed.
    Stopped,
}

/// The per-frame control loop.
///
/// Owns the camera, the timing state and the display flags; input and
/// rendering are supplied by the caller on every [`tick`](Self::tick).
///
/// ```
/// use shaderlab::frame::{FixedStepClock, FrameLoop, FrameParams, FrameRenderer};
/// use shaderlab::input::{InputEvent, QueuedInput};
/// use shaderlab::options::Options;
/// use shaderlab::DemoError;
///
/// struct Count(u32);
/// impl FrameRenderer for Count {
///     fn render(&mut self, _: &FrameParams) -> Result<(), DemoError> {
///         self.0 += 1;
///         Ok(())
///     }
/// }
///
/// let mut frames = FrameLoop::with_clock(&Options::default(), FixedStepClock::new(60, 1));
/// let mut input = QueuedInput::new();
/// let mut renderer = Count(0);
/// frames.tick(&mut input, &mut renderer)?;
/// input.push(InputEvent::Quit);
/// frames.run(&mut input, &mut renderer)?;
/// assert_eq!(renderer.0, 1);
/// # Ok::<(), DemoError>(())
/// ```
pub struct FrameLoop<C: FrameClock = SystemClock> {
    camera: FlyCamera,
    clock: C,
    timing: FrameTiming,
    display: DisplayOptions,
    keybindings: KeybindingOptions,
    /// Fixed `(key, movement)` polling table, in [`Movement::ALL`] order.
    movement: Vec<(Key, Movement)>,
    pointer: Option<Vec2>,
    state: LoopState,
    frame_index: u64,
}

impl FrameLoop<SystemClock> {
    /// Create a loop timed by the wall clock.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self::with_clock(options, SystemClock::new())
    }
}

impl<C: FrameClock> FrameLoop<C> {
    /// Create a loop timed by `clock`. The camera starts from the camera
    /// options and the window's initial aspect ratio.
    #[must_use]
    pub fn with_clock(options: &Options, clock: C) -> Self {
        let camera =
            FlyCamera::from_options(&options.camera, options.window.aspect());
        let timing = FrameTiming::new(&clock);
        Self {
            camera,
            clock,
            timing,
            display: options.display,
            movement: options.keybindings.movement_table(),
            keybindings: options.keybindings.clone(),
            pointer: None,
            state: LoopState::Running,
            frame_index: 0,
        }
    }

    /// Run one iteration: time, drain input, poll held keys, render.
    ///
    /// A quit event stops the loop immediately: later events in the same
    /// drain are dropped and the renderer is not called, but camera changes
    /// from events before the quit stay applied. Once stopped, further
    /// ticks do nothing.
    ///
    /// # Errors
    ///
    /// Propagates the renderer's error and stops the loop.
    pub fn tick<I, R>(
        &mut self,
        input: &mut I,
        renderer: &mut R,
    ) -> Result<LoopState, DemoError>
    where
        I: InputSource + ?Sized,
        R: FrameRenderer + ?Sized,
    {
        if self.state == LoopState::Stopped {
            return Ok(LoopState::Stopped);
        }

        let delta = self.timing.advance(&self.clock);

        for event in input.poll_events() {
            match event {
                InputEvent::Quit => {
                    log::info!("quit after {} frames", self.frame_index);
                    self.state = LoopState::Stopped;
                    return Ok(LoopState::Stopped);
                }
                InputEvent::PointerMoved { x, y } => {
                    self.camera.on_pointer_move(x, y);
                    self.pointer = Some(Vec2::new(x, y));
                }
                InputEvent::Scroll { delta } => self.camera.on_scroll(delta),
                InputEvent::KeyDown { key } => {
                    if let Some(toggle) = self.keybindings.toggle_for(key) {
                        self.display.toggle(toggle);
                        log::debug!("{toggle:?} toggled: {:?}", self.display);
                    }
                }
            }
        }

        for &(key, movement) in &self.movement {
            if input.is_key_held(key) {
                self.camera.on_keyboard(movement, delta);
            }
        }

        self.camera.on_render(delta);

        let params = FrameParams::capture(
            &self.camera,
            self.timing.elapsed(),
            delta,
            self.frame_index,
            self.pointer,
            self.display,
        );
        if let Err(e) = renderer.render(&params) {
            log::error!("renderer failed on frame {}: {e}", self.frame_index);
            self.state = LoopState::Stopped;
            return Err(e);
        }
        self.frame_index += 1;

        if self.timing.report_due(FPS_LOG_INTERVAL) {
            log::debug!(
                "{:.1} fps, speed {:.2}, fov {:.1}",
                self.timing.fps(),
                self.camera.movement_speed(),
                self.camera.fov()
            );
        }
        Ok(LoopState::Running)
    }

    /// Tick until the loop stops.
    ///
    /// # Errors
    ///
    /// Propagates the first renderer error.
    pub fn run<I, R>(
        &mut self,
        input: &mut I,
        renderer: &mut R,
    ) -> Result<(), DemoError>
    where
        I: InputSource + ?Sized,
        R: FrameRenderer + ?Sized,
    {
        while self.tick(input, renderer)? == LoopState::Running {}
        Ok(())
    }

    /// Track a new drawable size in the camera's aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.set_aspect(width as f32 / height as f32);
        }
    }

    /// Measure the next frame's delta, and all later elapsed time, from now.
    ///
    /// Hosts call this once their renderer is ready so window and device
    /// setup do not show up as one long first frame.
    pub fn restart_timing(&mut self) {
        self.timing = FrameTiming::new(&self.clock);
    }

    /// The camera, as of the last tick.
    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    /// Mutable camera access for hosts (e.g. pointer reset on focus).
    pub fn camera_mut(&mut self) -> &mut FlyCamera {
        &mut self.camera
    }

    /// Current overlay flags.
    pub fn display(&self) -> DisplayOptions {
        self.display
    }

    /// Timing state, including smoothed FPS.
    pub fn timing(&self) -> &FrameTiming {
        &self.timing
    }

    /// Lifecycle state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of frames handed to the renderer so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frame_index
    }
}
