//! Audio event seam
//!
//! The game only names the cues; whatever is behind the sink decides how
//! they sound. Sinks guarantee at most one cue plays at a time: starting a
//! new one stops whatever is still playing.

use std::io::{self, Write};

/// Named audio cues the game can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Collect,
    Death,
}

/// Receives audio cues from the game
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Rings the terminal bell for every cue
pub struct TerminalBell;

impl AudioSink for TerminalBell {
    fn play(&mut self, _effect: SoundEffect) {
        let mut out = io::stderr();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}

/// Swallows every cue; used with --mute
pub struct Muted;

impl AudioSink for Muted {
    fn play(&mut self, _effect: SoundEffect) {}
}
