//! Frame-based sprite animation: per-state frame tables and a sequencer.
//!
//! An [`Animator`] owns a table mapping a closed state tag (any
//! `Copy + Eq + Hash` type, typically a small enum) to an ordered sequence of
//! source rectangles. Each tick it accumulates elapsed time and advances the
//! frame index at a fixed per-frame duration. Looping is a per-sequence flag:
//! looping sets wrap, non-looping sets hold their final frame.
//!
//! Missing table entries are not an error: `update` does nothing for them and
//! [`Animator::current_frame`] returns [`SpriteRect::EMPTY`], so a state with
//! no art degrades to drawing nothing rather than failing mid-frame.

use serde::Deserialize;
use std::collections::HashMap;
use std::hash::Hash;

/// Default seconds per animation frame.
pub const DEFAULT_FRAME_TIME: f32 = 0.08;

/// A source rectangle inside a sprite sheet, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct SpriteRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl SpriteRect {
    /// Sentinel for "no frame": zero-sized at the origin.
    pub const EMPTY: SpriteRect = SpriteRect {
        x: 0,
        y: 0,
        w: 0,
        h: 0,
    };

    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }
}

/// An ordered frame sequence for one animation state.
#[derive(Debug, Clone)]
pub struct FrameSet {
    pub frames: Vec<SpriteRect>,
    pub looping: bool,
}

impl FrameSet {
    pub fn new(frames: Vec<SpriteRect>, looping: bool) -> Self {
        Self { frames, looping }
    }
}

/// The full state → frame-sequence mapping an [`Animator`] plays from.
pub type FrameTable<S> = HashMap<S, FrameSet>;

/// Sequences frames for one entity, driven by elapsed time.
///
/// The table is supplied at construction and never mutated; the animator only
/// tracks which state is active and how far into its sequence it is. Changing
/// state (via [`Animator::play`]) resets the frame index and intra-frame timer
/// on the next [`Animator::update`].
#[derive(Debug, Clone)]
pub struct Animator<S> {
    table: FrameTable<S>,
    state: S,
    prev_state: S,
    frame_index: usize,
    timer: f32,
    frame_time: f32,
}

impl<S: Copy + Eq + Hash> Animator<S> {
    pub fn new(table: FrameTable<S>, start: S) -> Self {
        Self {
            table,
            state: start,
            prev_state: start,
            frame_index: 0,
            timer: 0.0,
            frame_time: DEFAULT_FRAME_TIME,
        }
    }

    /// Same as [`Animator::new`] with a non-default per-frame duration.
    pub fn with_frame_time(table: FrameTable<S>, start: S, frame_time: f32) -> Self {
        let mut animator = Self::new(table, start);
        animator.frame_time = frame_time;
        animator
    }

    /// Select the state to sequence. Idempotent when the state is unchanged;
    /// the reset happens in the next `update`.
    pub fn play(&mut self, state: S) {
        self.state = state;
    }

    pub fn state(&self) -> S {
        self.state
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Advance the active sequence by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.state != self.prev_state {
            self.frame_index = 0;
            self.timer = 0.0;
            self.prev_state = self.state;
        }

        let Some(set) = self.table.get(&self.state) else {
            return;
        };
        if set.frames.is_empty() {
            return;
        }

        self.timer += dt;
        while self.timer >= self.frame_time {
            self.timer -= self.frame_time;
            self.frame_index += 1;
            if set.looping {
                self.frame_index %= set.frames.len();
            } else {
                self.frame_index = self.frame_index.min(set.frames.len() - 1);
            }
        }
    }

    /// The source rectangle to draw right now.
    ///
    /// Total: a state with no table entry (or an empty sequence) yields
    /// [`SpriteRect::EMPTY`].
    pub fn current_frame(&self) -> SpriteRect {
        match self.table.get(&self.state) {
            Some(set) if !set.frames.is_empty() => set.frames[self.frame_index % set.frames.len()],
            _ => SpriteRect::EMPTY,
        }
    }
}
