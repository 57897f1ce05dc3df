//! HUD (Heads-Up Display): score, accuracy, ammo, reload prompt, and hit marker.

use engine_core::DecayingScalar;

/// How long the hit marker stays up, in seconds.
pub const HITMARKER_DURATION: f32 = 0.15;

/// Receiver for everything the simulation reports to the player.
/// All calls are fire-and-forget.
pub trait HudSink {
    fn record_shot(&mut self, hit: bool);
    fn update_ammo(&mut self, current: u32, reserve: u32);
    fn update_reload_msg(&mut self, is_reloading: bool, is_empty: bool);
    fn show_hitmarker(&mut self);
    fn reset_stats(&mut self);
    /// Advance HUD-owned timers.
    fn tick(&mut self, _dt: f32) {}
}

/// Prompt shown under the crosshair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadPrompt {
    None,
    Reloading,
    Empty,
}

impl ReloadPrompt {
    pub fn text(&self) -> Option<&'static str> {
        match self {
            ReloadPrompt::None => None,
            ReloadPrompt::Reloading => Some("RELOADING..."),
            ReloadPrompt::Empty => Some("RELOAD [R]"),
        }
    }
}

/// HUD state for the current session.
#[derive(Debug, Clone)]
pub struct HudState {
    pub visible: bool,
    score: u32,
    shots: u32,
    hits: u32,
    ammo: (u32, u32),
    prompt: ReloadPrompt,
    hitmarker: DecayingScalar,
}

impl Default for HudState {
    fn default() -> Self {
        Self::new()
    }
}

impl HudState {
    pub fn new() -> Self {
        Self {
            visible: false,
            score: 0,
            shots: 0,
            hits: 0,
            ammo: (0, 0),
            prompt: ReloadPrompt::None,
            hitmarker: DecayingScalar::timer(HITMARKER_DURATION),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn shots(&self) -> u32 {
        self.shots
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Whole-number hit percentage; 0 before the first shot.
    pub fn accuracy_percent(&self) -> u32 {
        if self.shots == 0 {
            return 0;
        }
        (self.hits as f32 / self.shots as f32 * 100.0).round() as u32
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn accuracy_text(&self) -> String {
        format!("{}/{} ({}%)", self.hits, self.shots, self.accuracy_percent())
    }

    pub fn ammo_text(&self) -> String {
        format!("{} / {}", self.ammo.0, self.ammo.1)
    }

    pub fn reload_prompt(&self) -> ReloadPrompt {
        self.prompt
    }

    pub fn hitmarker_visible(&self) -> bool {
        self.hitmarker.is_active()
    }

    /// One-line summary of the whole HUD.
    pub fn summary(&self) -> String {
        let mut line = format!("{} | {} | {}", self.score_text(), self.accuracy_text(), self.ammo_text());
        if let Some(prompt) = self.reload_prompt().text() {
            line.push_str(" | ");
            line.push_str(prompt);
        }
        if self.hitmarker_visible() {
            line.push_str(" | X");
        }
        line
    }
}

impl HudSink for HudState {
    fn record_shot(&mut self, hit: bool) {
        self.shots += 1;
        if hit {
            self.hits += 1;
            self.score += 1;
        }
    }

    fn update_ammo(&mut self, current: u32, reserve: u32) {
        self.ammo = (current, reserve);
    }

    fn update_reload_msg(&mut self, is_reloading: bool, is_empty: bool) {
        self.prompt = if is_reloading {
            ReloadPrompt::Reloading
        } else if is_empty {
            ReloadPrompt::Empty
        } else {
            ReloadPrompt::None
        };
    }

    fn show_hitmarker(&mut self) {
        self.hitmarker.trigger(1.0);
    }

    fn reset_stats(&mut self) {
        log::info!("Stats reset ({} hits / {} shots)", self.hits, self.shots);
        self.score = 0;
        self.shots = 0;
        self.hits = 0;
    }

    fn tick(&mut self, dt: f32) {
        self.hitmarker.update(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_rounds_to_whole_percent() {
        let mut hud = HudState::new();
        assert_eq!(hud.accuracy_text(), "0/0 (0%)");
        hud.record_shot(true);
        hud.record_shot(false);
        hud.record_shot(false);
        assert_eq!(hud.accuracy_percent(), 33);
        assert_eq!(hud.score_text(), "Score: 1");
        hud.record_shot(true);
        assert_eq!(hud.accuracy_text(), "2/4 (50%)");
    }

    #[test]
    fn reset_clears_counters() {
        let mut hud = HudState::new();
        hud.record_shot(true);
        hud.reset_stats();
        assert_eq!((hud.score(), hud.shots(), hud.hits()), (0, 0, 0));
        assert_eq!(hud.accuracy_text(), "0/0 (0%)");
    }

    #[test]
    fn reload_prompt_priorities() {
        let mut hud = HudState::new();
        hud.update_reload_msg(true, true);
        assert_eq!(hud.reload_prompt(), ReloadPrompt::Reloading);
        hud.update_reload_msg(false, true);
        assert_eq!(hud.reload_prompt().text(), Some("RELOAD [R]"));
        hud.update_reload_msg(false, false);
        assert_eq!(hud.reload_prompt(), ReloadPrompt::None);
    }

    #[test]
    fn hitmarker_expires() {
        let mut hud = HudState::new();
        hud.show_hitmarker();
        hud.tick(0.1);
        assert!(hud.hitmarker_visible());
        hud.tick(0.1);
        assert!(!hud.hitmarker_visible());
    }

    #[test]
    fn summary_lists_everything() {
        let mut hud = HudState::new();
        hud.update_ammo(0, 90);
        hud.update_reload_msg(false, true);
        hud.record_shot(true);
        hud.show_hitmarker();
        assert_eq!(hud.summary(), "Score: 1 | 1/1 (100%) | 0 / 90 | RELOAD [R] | X");
    }
}
