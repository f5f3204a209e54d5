// Sound cues raised by the simulation.
//
// The core never plays audio itself; it queues fire-and-forget cues that the
// presentation layer drains once per frame.

/// A sound the presentation layer should play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// A hit connected (attacks, skills, clinch breaks)
    Hit,
    /// The match has a winner
    Success,
}

/// Queue for storing sound cues between frames
#[derive(Debug, Default)]
pub struct SoundCues {
    cues: Vec<SoundCue>,
}

impl SoundCues {
    pub fn new() -> Self {
        Self {
            cues: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }

    /// Take every cue raised since the last drain
    pub fn drain(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Drop everything without playing it
    pub fn clear(&mut self) {
        self.cues.clear();
    }
}
