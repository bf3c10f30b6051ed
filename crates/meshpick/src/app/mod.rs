//! Application window and event loop management.

mod frame;
mod input;

use std::sync::Arc;
use std::time::Instant;

use winit::event_loop::EventLoop;
use winit::window::Window;

use meshpick_core::{Mesh, Options};
use meshpick_render::RenderEngine;
use meshpick_ui::{ControlTab, EguiIntegration};

use crate::error::{AppError, AppResult};
use crate::pointer::PointerInput;
use crate::session::Session;

/// Smoothed frames-per-second estimate.
#[derive(Debug, Clone, Copy, Default)]
struct FpsCounter {
    last: Option<Instant>,
    fps: f32,
}

impl FpsCounter {
    fn tick(&mut self, now: Instant) -> f32 {
        if let Some(last) = self.last {
            let dt = now.duration_since(last).as_secs_f32();
            if dt > 0.0 {
                let current = 1.0 / dt;
                self.fps = if self.fps <= 0.0 {
                    current
                } else {
                    self.fps * 0.9 + current * 0.1
                };
            }
        }
        self.last = Some(now);
        self.fps
    }
}

/// The viewer application state.
pub struct App {
    window: Option<Arc<Window>>,
    engine: Option<RenderEngine>,
    egui: Option<EguiIntegration>,
    session: Session,
    pointer: PointerInput,
    tab: ControlTab,
    fps: FpsCounter,
    close_requested: bool,
    // First fatal error; the loop exits once it is set.
    error: Option<AppError>,
}

impl App {
    /// Creates the application for `mesh`. The window opens when the event
    /// loop resumes.
    pub fn new(mesh: Mesh, options: Options) -> Self {
        Self {
            window: None,
            engine: None,
            egui: None,
            session: Session::new(mesh, options),
            pointer: PointerInput::new(),
            tab: ControlTab::default(),
            fps: FpsCounter::default(),
            close_requested: false,
            error: None,
        }
    }

    fn fail(&mut self, error: AppError) {
        log::error!("{error}");
        if self.error.is_none() {
            self.error = Some(error);
        }
        self.close_requested = true;
    }
}

/// Opens the viewer window and runs until it is closed.
pub fn run_app(mesh: Mesh, options: Options) -> AppResult<()> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(mesh, options);
    event_loop.run_app(&mut app)?;
    match app.error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
