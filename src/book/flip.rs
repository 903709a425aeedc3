//! Page-flip state machine
//!
//! A flip is two half-animations: the outgoing page squashes horizontally to
//! nothing (stage 0), then the incoming page grows from nothing to full width
//! (stage 1). This module is pure state; the controller maps the emitted
//! events onto engine draw-scale commands.

use crate::consts::{FLIP_SNAP_HIGH, FLIP_SNAP_LOW, FLIP_STEP};

#[inline]
pub fn ease_in(t: f32) -> f32 {
    t * t
}

#[inline]
pub fn flip(x: f32) -> f32 {
    1.0 - x
}

#[inline]
pub fn ease_out(t: f32) -> f32 {
    let inv = flip(t);
    flip(inv * inv)
}

/// Which way the page turns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipDirection {
    Right,
    Left,
}

/// Current half-animation
#[derive(Debug, Clone, Copy, PartialEq)]
enum FlipPhase {
    Idle,
    Outgoing { progress: f32 },
    Incoming { progress: f32 },
}

/// What the controller should do with the stage this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlipEvent {
    /// No flip running
    Idle,
    /// Set the outgoing page's horizontal scale
    Outgoing(f32),
    /// Outgoing page snapped to zero width; incoming page starts at zero
    OutgoingDone,
    /// Set the incoming page's horizontal scale
    Incoming(f32),
    /// Incoming page snapped to full width; flip finished
    IncomingDone,
}

/// Two-stage flip driver
#[derive(Debug)]
pub struct PageFlip {
    phase: FlipPhase,
    direction: Option<FlipDirection>,
}

impl Default for PageFlip {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFlip {
    pub fn new() -> Self {
        Self {
            phase: FlipPhase::Idle,
            direction: None,
        }
    }

    pub fn is_flipping(&self) -> bool {
        self.phase != FlipPhase::Idle
    }

    pub fn direction(&self) -> Option<FlipDirection> {
        self.direction
    }

    /// Start a flip from idle; ignored while one is already running
    pub fn begin(&mut self, direction: FlipDirection) {
        if self.is_flipping() {
            return;
        }
        self.phase = FlipPhase::Outgoing { progress: 0.0 };
        self.direction = Some(direction);
    }

    /// Advance the running stage by one tick
    pub fn tick(&mut self) -> FlipEvent {
        match self.phase {
            FlipPhase::Idle => FlipEvent::Idle,
            FlipPhase::Outgoing { progress } => {
                let scale = flip(ease_in(progress));
                if scale < FLIP_SNAP_LOW {
                    return self.finish_outgoing();
                }
                self.phase = FlipPhase::Outgoing {
                    progress: progress + FLIP_STEP,
                };
                FlipEvent::Outgoing(scale)
            }
            FlipPhase::Incoming { progress } => {
                let scale = ease_out(progress);
                if scale > FLIP_SNAP_HIGH {
                    return self.finish_incoming();
                }
                self.phase = FlipPhase::Incoming {
                    progress: progress + FLIP_STEP,
                };
                FlipEvent::Incoming(scale)
            }
        }
    }

    /// Skip the rest of the current stage. Completing stage 0 lands in
    /// stage 1, never past it.
    pub fn force_complete_stage(&mut self) -> FlipEvent {
        match self.phase {
            FlipPhase::Idle => FlipEvent::Idle,
            FlipPhase::Outgoing { .. } => self.finish_outgoing(),
            FlipPhase::Incoming { .. } => self.finish_incoming(),
        }
    }

    fn finish_outgoing(&mut self) -> FlipEvent {
        self.phase = FlipPhase::Incoming { progress: 0.0 };
        FlipEvent::OutgoingDone
    }

    fn finish_incoming(&mut self) -> FlipEvent {
        self.phase = FlipPhase::Idle;
        self.direction = None;
        FlipEvent::IncomingDone
    }
}
