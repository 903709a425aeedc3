//! Screen dispatch plumbing
//!
//! Controllers never tear themselves down. They return a [`ScreenChange`]
//! from `update` and the host swaps controllers after the call returns, so a
//! screen is never destroyed mid-update.

use crate::engine::{AudioSink, CollisionSource, Hud, Stage, TextPanel};
use crate::input::FrameInput;
use crate::session::Session;

/// Which screen the host should construct next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenChange {
    /// Book screen showing the named story section
    Book {
        section: String,
    },
    /// Arena screen for the session's current wave
    Arena,
}

impl ScreenChange {
    pub fn book(section: &str) -> Self {
        Self::Book {
            section: section.to_string(),
        }
    }
}

/// Everything a controller borrows for one update call
pub struct ScreenContext<'a> {
    pub input: FrameInput,
    pub session: &'a mut Session,
    pub stage: &'a mut dyn Stage,
    pub audio: &'a mut dyn AudioSink,
    pub text: &'a mut dyn TextPanel,
    pub hud: &'a mut dyn Hud,
    pub collisions: &'a dyn CollisionSource,
}

/// One screen controller, updated once per frame by the host
pub trait Screen {
    fn update(&mut self, ctx: &mut ScreenContext<'_>) -> Option<ScreenChange>;
}

/// Counts down a fade-out, then releases the pending screen change
#[derive(Debug)]
pub struct FadeTimer {
    ticks_left: u32,
    pending: Option<ScreenChange>,
}

impl FadeTimer {
    pub fn new(ticks: u32, change: ScreenChange) -> Self {
        Self {
            ticks_left: ticks,
            pending: Some(change),
        }
    }

    /// Advance one tick; yields the change exactly once, when time is up
    pub fn tick(&mut self) -> Option<ScreenChange> {
        if self.ticks_left > 0 {
            self.ticks_left -= 1;
            return None;
        }
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_timer_releases_once() {
        let mut fade = FadeTimer::new(3, ScreenChange::Arena);
        assert_eq!(fade.tick(), None);
        assert_eq!(fade.tick(), None);
        assert_eq!(fade.tick(), None);
        assert_eq!(fade.tick(), Some(ScreenChange::Arena));
        assert_eq!(fade.tick(), None);
    }

    #[test]
    fn test_zero_tick_fade_fires_immediately() {
        let mut fade = FadeTimer::new(0, ScreenChange::book("intro"));
        assert_eq!(fade.tick(), Some(ScreenChange::book("intro")));
    }
}
