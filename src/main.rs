//! Flappy Speedrun entry point
//!
//! Sets up the window and GPU, then drives the session from the winit event
//! loop. `--headless` runs the same frame loop without a window.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use flappy_speedrun::platform::{KeyState, ManualClock, SystemClock};
use flappy_speedrun::renderer::{DrawRecorder, QuadRenderer};
use flappy_speedrun::session::{FrameOutcome, Session};
use flappy_speedrun::sim::autopilot;
use flappy_speedrun::{GravityMode, Settings, StartupError};

#[derive(Debug, Parser)]
#[command(version, about = "Falling-avatar obstacle runner")]
struct Cli {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for obstacle jitter
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    /// Cap a single frame's delta time (seconds)
    #[arg(long)]
    max_frame_dt: Option<f32>,
    /// Scale gravity by frame time instead of applying it once per frame
    #[arg(long)]
    time_scaled_gravity: bool,
    /// Present without waiting for vertical sync
    #[arg(long)]
    no_vsync: bool,
    /// Run without a window using the autopilot
    #[arg(long)]
    headless: bool,
    /// Headless: maximum frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u64,
    /// Headless: fixed frame time (seconds)
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,
}

impl Cli {
    fn settings(&self) -> Result<Settings, StartupError> {
        let mut settings = Settings::load_or_default(self.config.as_deref())?;
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(max_dt) = self.max_frame_dt {
            settings.max_frame_dt = Some(max_dt);
        }
        if self.time_scaled_gravity {
            settings.gravity = GravityMode::PerSecond;
        }
        if self.no_vsync {
            settings.vsync = false;
        }
        settings.validate()?;
        Ok(settings)
    }
}

/// Seed from settings, or from the wall clock when unset
fn session_seed(settings: &Settings) -> u64 {
    settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    })
}

/// Window, GPU and session, created once the event loop is live
struct Game {
    window: Arc<Window>,
    renderer: QuadRenderer,
    session: Session,
    clock: SystemClock,
    keys: KeyState,
}

impl Game {
    fn new(event_loop: &ActiveEventLoop, settings: &Settings) -> Result<Self> {
        let attributes = Window::default_attributes()
            .with_title(settings.title.clone())
            .with_inner_size(PhysicalSize::new(settings.width, settings.height));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("failed to create window")?,
        );
        let size = window.inner_size();
        log::info!("Window created: {}x{}", size.width, size.height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .map_err(StartupError::from)?;
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(StartupError::from)?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let renderer = pollster::block_on(QuadRenderer::new(
            surface,
            &adapter,
            size.width.max(1),
            size.height.max(1),
            settings.vsync,
        ))?;

        let clock = SystemClock::default();
        let session = Session::new(settings, session_seed(settings), &clock);

        Ok(Self {
            window,
            renderer,
            session,
            clock,
            keys: KeyState::default(),
        })
    }

    fn redraw(&mut self) -> FrameOutcome {
        let outcome = self.session.frame(&self.clock, &self.keys, &mut self.renderer);
        if outcome != FrameOutcome::Continue {
            return outcome;
        }
        if !self.renderer.can_present() {
            self.renderer.discard_frame();
            return FrameOutcome::Continue;
        }

        match self.renderer.render() {
            Ok(()) => FrameOutcome::Continue,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.renderer.reconfigure();
                FrameOutcome::Continue
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
                FrameOutcome::Quit
            }
            Err(e) => {
                log::warn!("Render error: {:?}", e);
                FrameOutcome::Continue
            }
        }
    }
}

struct App {
    settings: Settings,
    game: Option<Game>,
    outcome: Option<FrameOutcome>,
    startup_error: Option<anyhow::Error>,
}

impl App {
    fn new(settings: Settings) -> Self {
        Self {
            settings,
            game: None,
            outcome: None,
            startup_error: None,
        }
    }

    fn finish(&mut self, event_loop: &ActiveEventLoop, outcome: FrameOutcome) {
        self.outcome = Some(outcome);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.game.is_some() {
            return;
        }
        match Game::new(event_loop, &self.settings) {
            Ok(game) => self.game = Some(game),
            Err(err) => {
                self.startup_error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(game) = &self.game {
            game.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(game) = self.game.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                self.finish(event_loop, FrameOutcome::Quit);
            }

            WindowEvent::Focused(false) => game.keys.release_held(),

            WindowEvent::Resized(size) => {
                game.renderer.resize(size.width, size.height);
                log::debug!("Resized to {}x{}", size.width, size.height);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let pressed = event.state == ElementState::Pressed;
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Space) => game.keys.ascend = pressed,
                    PhysicalKey::Code(KeyCode::Escape) if pressed => game.keys.quit = true,
                    _ => {}
                }
            }

            WindowEvent::RedrawRequested => {
                let outcome = game.redraw();
                if outcome != FrameOutcome::Continue {
                    self.finish(event_loop, outcome);
                }
            }

            _ => {}
        }
    }
}

fn run_windowed(settings: Settings) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings);
    event_loop.run_app(&mut app).context("event loop error")?;

    if let Some(err) = app.startup_error {
        return Err(err);
    }
    if let Some(game) = &app.game {
        game.session.log_summary(app.outcome.unwrap_or(FrameOutcome::Quit));
    }
    Ok(())
}

/// Headless frame time must be a positive finite number of seconds
fn check_headless_dt(dt: f64) -> Result<()> {
    anyhow::ensure!(dt.is_finite() && dt > 0.0, "--dt must be a positive finite number, got {dt}");
    Ok(())
}

fn run_headless(settings: Settings, frames: u64, dt: f64) -> Result<()> {
    check_headless_dt(dt)?;

    let mut clock = ManualClock::default();
    let mut session = Session::new(&settings, session_seed(&settings), &clock);
    let mut recorder = DrawRecorder::default();

    let mut outcome = FrameOutcome::Quit;
    for _ in 0..frames {
        clock.advance(dt);
        recorder.begin_frame();
        let input = autopilot(&session.state);
        outcome = session.frame_with(&clock, false, &input, &mut recorder);
        if outcome != FrameOutcome::Continue {
            break;
        }
    }
    if outcome == FrameOutcome::Continue {
        outcome = FrameOutcome::Quit;
    }

    session.log_summary(outcome);
    log::info!("Headless run submitted {} quads", recorder.total_draws);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = cli.settings().context("failed to load settings")?;
    log::info!("Flappy Speedrun starting...");

    if cli.headless {
        run_headless(settings, cli.frames, cli.dt)
    } else {
        run_windowed(settings)
    }
}
