//! Event-driven sound cues
//!
//! The audio system is a [`Notifier`]: it turns session events into cues and
//! hands them to a backend. Backend failures are logged and dropped so they
//! can never reach game logic.

use std::io::{self, Write};

use crate::sim::{GameEvent, Notifier};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Round started
    Start,
    /// Jump/flap
    Jump,
    /// Point scored
    Point,
    /// Level up
    LevelUp,
    /// Level cap reached
    Victory,
    /// Round lost
    GameOver,
}

impl Cue {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Started => Some(Cue::Start),
            GameEvent::Impulse => Some(Cue::Jump),
            GameEvent::Scored { .. } => Some(Cue::Point),
            GameEvent::LevelUp { .. } => Some(Cue::LevelUp),
            GameEvent::Completed { .. } => Some(Cue::Victory),
            GameEvent::Failed { .. } => Some(Cue::GameOver),
            GameEvent::Restarted => None,
        }
    }
}

/// Something that can play a cue
pub trait CueBackend {
    fn play(&mut self, cue: Cue, volume: f32) -> io::Result<()>;
}

/// Rings the terminal bell for the cues that matter; stays quiet for the
/// frequent ones (jumps, points)
#[derive(Debug)]
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> CueBackend for TerminalBell<W> {
    fn play(&mut self, cue: Cue, _volume: f32) -> io::Result<()> {
        let rings = match cue {
            Cue::LevelUp | Cue::GameOver => 1,
            Cue::Victory => 2,
            Cue::Start | Cue::Jump | Cue::Point => 0,
        };
        for _ in 0..rings {
            self.out.write_all(b"\x07")?;
        }
        if rings > 0 {
            self.out.flush()?;
        }
        Ok(())
    }
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager<B: CueBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<B: CueBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a cue. Failures are logged, never returned.
    pub fn play(&mut self, cue: Cue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        if let Err(e) = self.backend.play(cue, vol) {
            log::warn!("Failed to play {:?}: {}", cue, e);
        }
    }
}

impl<B: CueBackend> Notifier for AudioManager<B> {
    fn notify(&mut self, event: &GameEvent) {
        if let Some(cue) = Cue::for_event(event) {
            self.play(cue);
        }
    }
}
