//! Aim Room: a first-person marksmanship trainer.
//!
//! One room, a handful of spherical targets, a hit-scan rifle, and a reset
//! panel on the floor. The window title doubles as the HUD.

mod audio;
mod config;
mod events;
mod hud;
mod player;
mod render;
mod reset_board;
mod room;
mod state;
mod targets;
mod update;
mod viewmodel;
mod weapons;

use anyhow::Result;
use engine_core::Time;
use input::InputState;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Fullscreen, Window, WindowId},
};

use audio::AudioCues;
use config::GameConfig;
use hud::HudState;
use render::FrameLog;
use state::Session;

/// Everything the running app owns.
pub(crate) struct GameState {
    pub window: Arc<Window>,
    pub time: Time,
    pub input: InputState,
    pub config: GameConfig,
    pub session: Session,
    pub hud: HudState,
    pub audio: AudioCues,
    pub frames: FrameLog,
    pub running: bool,
}

impl GameState {
    fn new(window: Arc<Window>, config: GameConfig) -> Self {
        let session = Session::new();
        log::info!(
            "Room {}x{}x{}, {} targets, sensitivity {:.1}, fov {}",
            session.room.width,
            session.room.depth,
            session.room.height,
            session.targets.len(),
            config.sensitivity(),
            config.fov(),
        );
        let mut frames = FrameLog::default();
        let size = window.inner_size();
        frames.set_aspect(size.width, size.height);
        Self {
            window,
            time: Time::new(),
            input: InputState::new(),
            config,
            session,
            hud: HudState::new(),
            audio: AudioCues::default(),
            frames,
            running: true,
        }
    }
}

/// Application handler for winit.
struct App {
    state: Option<GameState>,
}

impl App {
    fn new() -> Self {
        Self { state: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_none() {
            let config = GameConfig::load();
            let window_attrs = Window::default_attributes()
                .with_title("Aim Room")
                .with_inner_size(winit::dpi::LogicalSize::new(config.window_width, config.window_height))
                .with_fullscreen(config.fullscreen.then_some(Fullscreen::Borderless(None)));

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            window.request_redraw();
            self.state = Some(GameState::new(window, config));
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) || !state.running {
                log::info!(
                    "Session over: score {}, {}/{} since last reset, {} rounds fired, {} hit cues, {} targets replaced, {} frames",
                    state.hud.score(),
                    state.hud.hits(),
                    state.hud.shots(),
                    state.audio.gunshots,
                    state.audio.hit_sounds,
                    state.session.targets.respawned(),
                    state.frames.frames(),
                );
                event_loop.exit();
            }
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if let Some(state) = &mut self.state {
            state.handle_device_event(event);
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║                       AIM ROOM                       ║");
    println!("╠══════════════════════════════════════════════════════╣");
    println!("║  CONTROLS:                                           ║");
    println!("║    Click      - Start / capture mouse                ║");
    println!("║    WASD       - Move         │  Mouse  - Look        ║");
    println!("║    Left Click - Fire         │  R      - Reload      ║");
    println!("║    Escape     - Release mouse (menu)                 ║");
    println!("║    Shoot the RESET panel at your feet to clear stats ║");
    println!("╠══════════════════════════════════════════════════════╣");
    println!("║  MENU (mouse released):                              ║");
    println!("║    [ ] - Sensitivity         │  - = - Field of view  ║");
    println!("║    U   - Unlimited ammo      │  M   - Muzzle flash FX║");
    println!("╚══════════════════════════════════════════════════════╝");

    log::info!("Starting Aim Room");

    let event_loop = EventLoop::new()?;
    // Poll so ticks run back to back instead of waiting on input events.
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    Ok(())
}
