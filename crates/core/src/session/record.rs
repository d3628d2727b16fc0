//! Move records and the commit signal

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::board::{Piece, Square};

/// A committed move, captured at commit time and kept for undo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub moved: Piece,
    pub captured: Option<Piece>,
}

impl MoveRecord {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Move log line, e.g. `wP e2->e4`
impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}->{}", self.moved, self.from, self.to)
    }
}

/// Sound the front end should play for a committed move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCue {
    Capture,
    Quiet,
}

/// Emitted once per committed move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCommitted {
    pub record: MoveRecord,
    pub cue: AudioCue,
}

impl From<MoveRecord> for MoveCommitted {
    fn from(record: MoveRecord) -> Self {
        let cue = if record.is_capture() {
            AudioCue::Capture
        } else {
            AudioCue::Quiet
        };
        MoveCommitted { record, cue }
    }
}
