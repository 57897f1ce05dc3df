//! Window and device event handling for GameState.

use input::InputState;
use winit::event::{DeviceEvent, ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::CursorGrabMode;

use crate::config::{GameConfig, SENSITIVITY_STEP};
use crate::state::{ShotOutcome, Sinks};

const FOV_STEP: f32 = 5.0;
const FPS_LOG_INTERVAL: u64 = 600;

/// What a key event asks of the app once the input state has seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
    None,
    ReleasePointer,
    Settings(KeyCode),
}

/// Route one key event. Releases always reach the input state so nothing
/// sticks; presses and repeats only do while the pointer is locked.
pub(crate) fn route_key(input: &mut InputState, key: KeyCode, state: ElementState, repeat: bool) -> KeyAction {
    if !state.is_pressed() {
        input.process_keyboard(key, state);
        return KeyAction::None;
    }
    if key == KeyCode::Escape {
        return KeyAction::ReleasePointer;
    }
    if input.is_pointer_locked() {
        input.process_keyboard(key, state);
        return KeyAction::None;
    }
    if repeat {
        KeyAction::None
    } else {
        KeyAction::Settings(key)
    }
}

/// Apply a menu hotkey to the settings. Returns true if anything changed.
pub(crate) fn apply_settings_key(config: &mut GameConfig, key: KeyCode) -> bool {
    let before = config.clone();
    match key {
        KeyCode::BracketLeft => config.set_sensitivity(config.sensitivity() - SENSITIVITY_STEP),
        KeyCode::BracketRight => config.set_sensitivity(config.sensitivity() + SENSITIVITY_STEP),
        KeyCode::Minus => config.set_fov(config.fov() - FOV_STEP),
        KeyCode::Equal => config.set_fov(config.fov() + FOV_STEP),
        KeyCode::KeyU => config.unlimited_ammo = !config.unlimited_ammo,
        KeyCode::KeyM => config.muzzle_flash_fx = !config.muzzle_flash_fx,
        _ => return false,
    }
    *config != before
}

impl crate::GameState {
    /// Handle a window event. Returns true if the app should exit.
    pub(crate) fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                self.running = false;
                true
            }
            WindowEvent::Resized(size) => {
                self.frames.set_aspect(size.width, size.height);
                false
            }
            WindowEvent::Focused(false) => {
                self.release_pointer();
                false
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match route_key(&mut self.input, key, event.state, event.repeat) {
                        KeyAction::ReleasePointer => self.release_pointer(),
                        KeyAction::Settings(key) => {
                            if apply_settings_key(&mut self.config, key) {
                                log::info!(
                                    "Settings: sensitivity {:.1}, fov {}, unlimited ammo {}, muzzle fx {}",
                                    self.config.sensitivity(),
                                    self.config.fov(),
                                    self.config.unlimited_ammo,
                                    self.config.muzzle_flash_fx,
                                );
                                self.config.save();
                            }
                        }
                        KeyAction::None => {}
                    }
                }
                false
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if !state.is_pressed() || self.input.is_pointer_locked() {
                    self.input.process_mouse_button(button, state);
                } else if button == MouseButton::Left {
                    // The grabbing click does not fire.
                    self.grab_pointer();
                }
                false
            }
            WindowEvent::RedrawRequested => {
                self.time.update();
                let dt = self.time.delta_seconds();
                let mut sinks = Sinks {
                    hud: &mut self.hud,
                    audio: &mut self.audio,
                    render: &mut self.frames,
                };
                let outcome = self.session.tick(dt, &mut self.input, &self.config, &mut sinks);
                self.log_shot(outcome);
                if self.time.frame_count() % FPS_LOG_INTERVAL == 0 {
                    log::debug!("{:.0} fps, {} targets live", self.time.fps(), self.session.targets.live_count());
                }
                self.window.set_title(&self.title());
                self.window.request_redraw();
                false
            }
            _ => false,
        }
    }

    /// Handle device events (e.g. raw mouse motion).
    pub(crate) fn handle_device_event(&mut self, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.input.process_mouse_motion(delta);
        }
    }

    fn log_shot(&self, outcome: Option<ShotOutcome>) {
        match outcome {
            Some(ShotOutcome::Hit(id)) => {
                if let Some(target) = self.session.targets.get(id) {
                    log::debug!("Shot hit target at {:.2?}", target.position);
                }
            }
            Some(ShotOutcome::ResetBoard) => log::debug!("Shot hit the RESET panel"),
            Some(ShotOutcome::Miss) => log::debug!("Shot missed"),
            None => {}
        }
    }

    fn grab_pointer(&mut self) {
        let grabbed = self
            .window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
        match grabbed {
            Ok(()) => {
                self.window.set_cursor_visible(false);
                self.input.set_pointer_locked(true);
                self.hud.visible = true;
                log::info!("Pointer locked");
            }
            Err(e) => {
                log::warn!("Pointer lock denied: {}", e);
                self.input.set_pointer_locked(false);
            }
        }
    }

    /// Drop aim control: free the cursor and forget anything held down.
    fn release_pointer(&mut self) {
        if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
            log::warn!("Failed to release cursor: {}", e);
        }
        self.window.set_cursor_visible(true);
        self.input.set_pointer_locked(false);
        self.input.reset();
        if self.hud.visible {
            log::info!("Pointer released");
        }
        self.hud.visible = false;
    }

    fn title(&self) -> String {
        if self.hud.visible {
            format!("Aim Room | {}", self.hud.summary())
        } else {
            format!(
                "Aim Room | click to play | sens {:.1} [ ]  fov {} - =  unlimited {} U  fx {} M",
                self.config.sensitivity(),
                self.config.fov(),
                on_off(self.config.unlimited_ammo),
                on_off(self.config.muzzle_flash_fx),
            )
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
