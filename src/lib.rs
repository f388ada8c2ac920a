//! Circular gradient progress ring widget.
//!
//! The ring is drawn as many small overlapping stamped circles stepped by a
//! fixed angular increment, each tinted by interpolating between two gradient
//! endpoints, with an optional background track, a fading drop shadow at the
//! leading edge, and a decorative symbol riding the head. The per-frame
//! output is a plain paint-command list ([`Scene`]), so the core stays
//! testable and embeddable; a windowed runtime built on winit and pixels is
//! included for standalone use.

// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

mod color;
mod config;
mod raster;
mod scene;
mod symbol;

pub use color::{Appearance, Color, ColorResolver, Components, Environment, Srgb};
pub use config::{RingConfig, MIN_LINE_WIDTH};
pub use raster::{render_scene, Canvas};
pub use scene::{compose, PaintOp, Scene, STEP_DEGREES};
pub use symbol::Symbol;

// External crate imports
use pixels::{Pixels, SurfaceTexture};
use thiserror::Error;

// Standard library imports
use std::sync::mpsc::Receiver;
use std::time::Instant;

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Command enum for driving a displayed ring from another thread
#[derive(Debug, Clone)]
pub enum RingCommand {
    /// Ease the displayed progress toward a new target.
    SetProgress(f64),
    /// Jump straight to a progress value, skipping the easing.
    SnapProgress(f64),
    SetColors(Color, Color),
    SetPlaceholder(Option<Color>),
    SetShadowRadius(Option<f64>),
}

/// Errors surfaced by the windowed runtime. The rendering core itself
/// has no failure mode; degenerate frames simply draw nothing.
#[derive(Debug, Error)]
pub enum RingError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("pixel surface error: {0}")]
    Surface(#[from] pixels::Error),
}

/// Main ring struct - the primary public interface
#[derive(Debug, Clone)]
pub struct Ring {
    config: RingConfig,
    state: RingState,
}

#[derive(Debug, Clone)]
struct RingState {
    progress: f64,
    target: f64,
}

impl RingState {
    fn new() -> Self {
        Self {
            progress: 0.0,
            target: 0.0,
        }
    }

    fn set_target(&mut self, value: f64) {
        self.target = if value.is_finite() { value.max(0.0) } else { 0.0 };
    }

    fn snap(&mut self, value: f64) {
        self.set_target(value);
        self.progress = self.target;
    }

    fn update(&mut self, lerp_factor: f64) {
        self.progress += (self.target - self.progress) * lerp_factor.clamp(0.0, 1.0);
        if (self.target - self.progress).abs() < 1e-4 {
            self.progress = self.target;
        }
    }
}

impl Ring {
    pub fn new(config: RingConfig) -> Self {
        Self {
            config,
            state: RingState::new(),
        }
    }

    /// Sets the progress target; the displayed value eases toward it.
    /// `1.0` is one full lap; values beyond it wrap into overflow laps.
    pub fn set_progress(&mut self, value: f64) {
        self.state.set_target(value);
    }

    /// Sets progress without easing.
    pub fn snap_progress(&mut self, value: f64) {
        self.state.snap(value);
    }

    pub fn progress(&self) -> f64 {
        self.state.progress
    }

    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    /// Opens a window and redraws the ring until it is closed.
    pub fn show(&mut self) -> Result<(), RingError> {
        self.run_window(None)
    }

    /// Like [`show`](Self::show), but drains a command channel each frame.
    pub fn show_with_commands(&mut self, receiver: Receiver<RingCommand>) -> Result<(), RingError> {
        self.run_window(Some(receiver))
    }

    fn apply_commands(
        config: &mut RingConfig,
        state: &mut RingState,
        receiver: &Receiver<RingCommand>,
    ) {
        while let Ok(command) = receiver.try_recv() {
            match command {
                RingCommand::SetProgress(value) => state.set_target(value),
                RingCommand::SnapProgress(value) => state.snap(value),
                RingCommand::SetColors(start, end) => {
                    config.start_color = start;
                    config.end_color = end;
                }
                RingCommand::SetPlaceholder(color) => config.placeholder_color = color,
                RingCommand::SetShadowRadius(radius) => config.head_shadow_radius = radius,
            }
        }
    }

    fn run_window(&mut self, receiver: Option<Receiver<RingCommand>>) -> Result<(), RingError> {
        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                self.config.window_width as f64,
                self.config.window_height as f64,
            ))
            .build(&event_loop)?;

        let window = std::sync::Arc::new(window);

        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

        log::info!("ring window opened at {}x{}", fb_width, fb_height);

        let mut config = self.config.clone();
        let mut state = self.state.clone();
        let resolver = Srgb;
        let env = Environment::default();
        let background = config.background_color.unwrap_or(Color::new(0xff, 0xff, 0xff));

        let frame_duration =
            std::time::Duration::from_secs_f64(1.0 / self.config.max_framerate.max(1.0));
        let mut last_frame = Instant::now();

        let window_clone = window.clone();
        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        fb_width = new_size.width as usize;
                        fb_height = new_size.height as usize;
                        let _ = pixels.resize_buffer(new_size.width, new_size.height);
                        let _ = pixels.resize_surface(new_size.width, new_size.height);
                    }
                    WindowEvent::RedrawRequested => {
                        if let Some(ref receiver) = receiver {
                            Self::apply_commands(&mut config, &mut state, receiver);
                        }
                        state.update(config.progress_lerp_factor);

                        let frame = pixels.frame_mut();
                        let mut canvas = Canvas::new(frame, fb_width, fb_height);
                        canvas.clear(background);
                        let scene = compose(
                            fb_width as f64,
                            fb_height as f64,
                            &config,
                            state.progress,
                            &resolver,
                            &env,
                        );
                        render_scene(&mut canvas, &scene, &config);
                        let _ = pixels.render();
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_target_clamps_below_zero_and_non_finite() {
        let mut ring = Ring::new(RingConfig::builder().build());
        ring.snap_progress(-2.0);
        assert_eq!(ring.progress(), 0.0);
        ring.snap_progress(f64::INFINITY);
        assert_eq!(ring.progress(), 0.0);
        ring.snap_progress(1.25);
        assert_eq!(ring.progress(), 1.25);
    }

    #[test]
    fn eased_progress_converges_on_the_target() {
        let mut state = RingState::new();
        state.set_target(1.0);
        for _ in 0..200 {
            state.update(0.15);
        }
        assert_eq!(state.progress, 1.0);
    }

    #[test]
    fn commands_mutate_config_and_state() {
        let mut config = RingConfig::builder().build();
        let mut state = RingState::new();
        let (sender, receiver) = std::sync::mpsc::channel();
        sender
            .send(RingCommand::SetColors(
                Color::new(1, 2, 3),
                Color::new(4, 5, 6),
            ))
            .unwrap();
        sender.send(RingCommand::SnapProgress(0.5)).unwrap();
        sender
            .send(RingCommand::SetPlaceholder(Some(Color::new(7, 8, 9))))
            .unwrap();
        Ring::apply_commands(&mut config, &mut state, &receiver);
        assert_eq!(config.start_color, Color::new(1, 2, 3));
        assert_eq!(config.end_color, Color::new(4, 5, 6));
        assert_eq!(config.placeholder_color, Some(Color::new(7, 8, 9)));
        assert_eq!(state.progress, 0.5);
    }
}
