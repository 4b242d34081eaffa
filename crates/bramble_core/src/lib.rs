//! Engine-agnostic building blocks for the Bramble platformer.
//!
//! Nothing in this crate knows about tiles, players, or cameras: it provides
//! the frame-based animation sequencer, device-agnostic input state tracking,
//! and the fixed-timestep frame clock that `bramble_game` composes.

pub mod animation;
pub mod input;
pub mod time;
