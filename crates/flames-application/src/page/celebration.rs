use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Generation counter for the celebration timer.
///
/// Each celebration gets a new generation; a timer only clears the flag when
/// its generation is still current, so a stale timer never hides a newer
/// celebration.
#[derive(Debug)]
pub(crate) struct Celebration {
    generation: AtomicU64,
    duration: Duration,
}

impl Celebration {
    pub(crate) fn new(duration: Duration) -> Self {
        Self {
            generation: AtomicU64::new(0),
            duration,
        }
    }

    pub(crate) fn duration(&self) -> Duration {
        self.duration
    }

    /// Starts a new celebration and returns its generation.
    pub(crate) fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Invalidates any running timer.
    pub(crate) fn dismiss(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}
