//! Audible cues for chat events.
//!
//! The dispatcher decides whether sound is enabled; sinks just play.

use std::io::Write;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    MessageSent,
    MessageReceived,
    ImageAttached,
    ChatCleared,
}

pub trait CueSink: Send + Sync {
    fn play(&self, cue: Cue);
}

/// Rings the terminal bell on stderr, keeping stdout free for the transcript.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl CueSink for TerminalBell {
    fn play(&self, cue: Cue) {
        tracing::trace!("Playing cue {:?}", cue);
        let mut stderr = std::io::stderr();
        if let Err(e) = stderr.write_all(b"\x07").and_then(|_| stderr.flush()) {
            tracing::debug!("Could not ring terminal bell: {}", e);
        }
    }
}

/// Keeps every cue it is asked to play.
#[derive(Debug, Clone, Default)]
pub struct RecordingCues {
    played: Arc<Mutex<Vec<Cue>>>,
}

impl RecordingCues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<Cue> {
        self.played.lock().unwrap().clone()
    }
}

impl CueSink for RecordingCues {
    fn play(&self, cue: Cue) {
        self.played.lock().unwrap().push(cue);
    }
}
