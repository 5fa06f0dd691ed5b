//! # Application State Management
//!
//! The `winit` host around the engine:
//! - Window creation once the event loop resumes
//! - Keyboard events forwarded to the player
//! - Fixed-timestep ticking between events
//! - Player status shown in the window title
//!
//! No renderer is attached; the window exists to receive input.

pub mod clock;
pub mod config;

use std::sync::Arc;

use clock::TickClock;
use config::SimulationConfig;
use log::{error, info};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::engine_state::EngineState;

/// Title prefix of the application window.
pub const WINDOW_TITLE: &str = "Voxel Explorer";

/// The application's lifecycle container.
///
/// Holds the config until the event loop resumes, then the running state.
pub struct ApplicationState {
    /// Settings the engine will be built from
    pub config: SimulationConfig,

    /// The running application, once the window exists
    pub state: Option<InitializedApplicationState>,
}

/// Represents the fully initialized and running state of the application.
pub struct InitializedApplicationState {
    /// The simulation
    pub engine_state: EngineState,

    /// Handle to the application window
    pub window: Arc<Window>,

    /// Fixed-timestep accumulator
    pub clock: TickClock,

    /// Last text written to the window title
    pub last_status: String,
}

impl ApplicationState {
    /// Creates an application that will start the engine with `config`.
    pub fn new(config: SimulationConfig) -> Self {
        ApplicationState {
            config,
            state: None,
        }
    }
}

impl ApplicationHandler for ApplicationState {
    /// Creates the window and the engine on first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let attributes = Window::default_attributes().with_title(WINDOW_TITLE);
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                error!("Could not create window: {}", err);
                event_loop.exit();
                return;
            }
        };

        let engine_state = EngineState::new(self.config.engine_settings());
        info!("Window created, simulation running");

        self.state = Some(InitializedApplicationState {
            engine_state,
            window,
            clock: TickClock::new(web_time::Instant::now()),
            last_status: String::new(),
        });
    }

    /// Forwards keyboard input to the engine and handles exit requests.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key: PhysicalKey::Code(key),
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(app) = &mut self.state {
                    app.engine_state.handle_key(key, state);
                }
            }
            _ => (),
        }
    }

    /// Runs the simulation steps that are due, then sleeps until the next one.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(app) = &mut self.state else {
            return;
        };

        let ticks = app.clock.advance(web_time::Instant::now());
        for _ in 0..ticks {
            app.engine_state.tick();
        }
        app.engine_state.process_tasks();

        let status = app.engine_state.status_line();
        if status != app.last_status {
            app.window.set_title(&format!("{} {}", WINDOW_TITLE, status));
            app.last_status = status;
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(app.clock.next_tick_at()));
    }
}
