//! Sound cues emitted by the simulation.

/// Length of the gunshot noise burst, in seconds.
pub const GUNSHOT_DURATION: f32 = 0.08;
/// Length of the hit confirmation tone, in seconds.
pub const HIT_SOUND_DURATION: f32 = 0.12;
/// Pitch of the hit confirmation tone, in Hz.
pub const HIT_SOUND_FREQ: f32 = 800.0;

/// Receiver for sound cues. Fire-and-forget: the caller never waits.
pub trait AudioSink {
    fn play_gunshot(&mut self);
    fn play_hit_sound(&mut self);
}

/// Logs each cue and keeps a running count.
#[derive(Debug, Default, Clone)]
pub struct AudioCues {
    pub gunshots: u64,
    pub hit_sounds: u64,
}

impl AudioSink for AudioCues {
    fn play_gunshot(&mut self) {
        self.gunshots += 1;
        log::debug!("cue: gunshot ({:.2}s noise burst)", GUNSHOT_DURATION);
    }

    fn play_hit_sound(&mut self) {
        self.hit_sounds += 1;
        log::debug!("cue: hit ({} Hz, {:.2}s)", HIT_SOUND_FREQ, HIT_SOUND_DURATION);
    }
}
