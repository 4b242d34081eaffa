//! The kinematic player body: input intent, gravity, axis-separated tile
//! collision, locomotion state, and the animation feed.
//!
//! Conventions, used consistently everywhere:
//!
//! - Coordinates are screen-space pixels, y grows downward; gravity is a
//!   positive constant.
//! - The pivot is the hitbox's **bottom-center** ("foot"): the hitbox is a
//!   pure function of the pivot plus the `HIT_*` constants and is never
//!   stored. Foot pivot makes vertical snapping trivial (`position.y` *is*
//!   the hitbox bottom).
//! - Hitbox edges are half-open: `[left, right)` × `[top, bottom)`. Cross-axis
//!   sample lines are inset 1 px from the hitbox ends so a body flush against
//!   a surface on one axis does not read that surface as a hit on the other.
//!
//! Collision is resolved X-first then Y, each axis fully and independently.
//! This is the usual move-and-slide tradeoff: it can catch on convex corners
//! at exactly the wrong pixel, and that is accepted rather than patched with
//! divergent per-axis logic. The Y pass is swept across every tile row the
//! hitbox travels through during the step, so thin floors cannot be tunneled
//! through at high fall speeds; the X pass is point-sampled at the leading
//! edge, which is fine at horizontal speeds below one tile per tick.

use glam::Vec2;

use bramble_core::animation::{Animator, FrameTable, SpriteRect};
use bramble_core::input::{InputState, Key};

use crate::world::{TileWorld, WorldRect};

/// Visual sprite frame size in pixels.
pub const SPRITE_W: f32 = 32.0;
pub const SPRITE_H: f32 = 32.0;

/// Hitbox size in pixels; smaller than the sprite and centered on its feet.
pub const HIT_W: f32 = 14.0;
pub const HIT_H: f32 = 23.0;
const HIT_HALF_W: f32 = HIT_W / 2.0;

/// Locomotion states, in match order of the priority derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerState {
    Idle,
    Walk,
    Jump,
    Fall,
    Attack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// One tick's worth of input, captured before the body update reads it.
/// The simulation never polls a device; the host injects one of these.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub attack: bool,
}

impl InputSnapshot {
    /// Map tracked key state to a snapshot: movement is level-triggered,
    /// jump and attack are edge-triggered.
    pub fn capture(input: &InputState) -> Self {
        Self {
            move_left: input.is_held(Key::A) || input.is_held(Key::Left),
            move_right: input.is_held(Key::D) || input.is_held(Key::Right),
            jump: input.is_just_pressed(Key::Space)
                || input.is_just_pressed(Key::W)
                || input.is_just_pressed(Key::Up),
            attack: input.is_just_pressed(Key::X),
        }
    }

    /// Horizontal intent in {-1, 0, +1}; right wins when both are held.
    pub fn move_intent(&self) -> i32 {
        if self.move_right {
            1
        } else if self.move_left {
            -1
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PlayerConfig {
    /// Horizontal speed in px/s while intent is held.
    pub move_speed: f32,
    /// Upward launch speed in px/s on jump.
    pub jump_speed: f32,
    /// Downward acceleration in px/s^2.
    pub gravity: f32,
    /// |velocity.y| band around the jump apex that still reads as Jump.
    pub apex_threshold: f32,
    /// Seconds an attack holds the Attack state.
    pub attack_duration: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 150.0,
            jump_speed: 2000.0,
            gravity: 8000.0,
            apex_threshold: 5.0,
            attack_duration: 0.32,
        }
    }
}

pub struct Player {
    /// Foot pivot: bottom-center of the hitbox, world pixels.
    pub position: Vec2,
    pub velocity: Vec2,
    grounded: bool,
    facing: Facing,
    state: PlayerState,
    attack_timer: f32,
    animator: Animator<PlayerState>,
    pub config: PlayerConfig,
}

impl Player {
    pub fn new(start: Vec2, frames: FrameTable<PlayerState>) -> Self {
        Self {
            position: start,
            velocity: Vec2::ZERO,
            grounded: false,
            facing: Facing::Right,
            state: PlayerState::Idle,
            attack_timer: 0.0,
            animator: Animator::new(frames, PlayerState::Idle),
            config: PlayerConfig::default(),
        }
    }

    // Hitbox edges derived from the pivot; see the module doc for the
    // half-open convention.
    pub fn hit_left(&self) -> f32 {
        self.position.x - HIT_HALF_W
    }

    pub fn hit_right(&self) -> f32 {
        self.position.x + HIT_HALF_W
    }

    pub fn hit_top(&self) -> f32 {
        self.position.y - HIT_H
    }

    pub fn hit_bottom(&self) -> f32 {
        self.position.y
    }

    #[allow(dead_code)]
    pub fn hitbox(&self) -> WorldRect {
        WorldRect::new(self.hit_left(), self.hit_top(), HIT_W, HIT_H)
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_attacking(&self) -> bool {
        self.attack_timer > 0.0
    }

    /// Current animation frame for the render path.
    pub fn current_frame(&self) -> SpriteRect {
        self.animator.current_frame()
    }

    /// One simulation step. The internal order is load-bearing; see the
    /// numbered phases inline.
    pub fn update(&mut self, input: InputSnapshot, dt: f32, world: &TileWorld) {
        // Pre-move hitbox extents; the swept vertical pass scans from these.
        let prev_hit_bottom = self.hit_bottom();
        let prev_hit_top = self.hit_top();

        let move_intent = input.move_intent();

        // Attack timer runs down regardless of what else happens this tick;
        // a new trigger is ignored while one is active.
        if self.attack_timer > 0.0 {
            self.attack_timer = (self.attack_timer - dt).max(0.0);
        } else if input.attack {
            self.attack_timer = self.config.attack_duration;
        }

        // Horizontal: integrate, then resolve against the grid.
        self.velocity.x = move_intent as f32 * self.config.move_speed;
        self.position.x += self.velocity.x * dt;
        self.resolve_collisions_x(world);

        // Vertical: gravity, integrate, then the swept resolve. Grounded is
        // cleared here and only re-asserted by a downward hit.
        self.velocity.y += self.config.gravity * dt;
        self.position.y += self.velocity.y * dt;
        self.grounded = false;
        self.resolve_collisions_y(world, prev_hit_bottom, prev_hit_top);

        // Facing persists through idle and neutral airborne ticks.
        if move_intent > 0 {
            self.facing = Facing::Right;
        } else if move_intent < 0 {
            self.facing = Facing::Left;
        }

        // Jump fires before state derivation so the new velocity is what the
        // derivation sees (the tick reads as Jump, not a lingering Idle).
        if self.grounded && input.jump {
            self.velocity.y = -self.config.jump_speed;
            self.grounded = false;
        }

        self.state = self.derive_state(move_intent);

        self.animator.play(self.state);
        self.animator.update(dt);
    }

    /// Point-sampled horizontal resolution at the leading edge, using two
    /// sample rows inset 1 px inside the hitbox top and bottom.
    fn resolve_collisions_x(&mut self, world: &TileWorld) {
        let ts = world.tile_size() as f32;
        let row_top = ((self.hit_top() + 1.0) / ts).floor() as i32;
        let row_bottom = ((self.hit_bottom() - 1.0) / ts).floor() as i32;

        if self.velocity.x > 0.0 {
            let col = (self.hit_right() / ts).floor() as i32;
            if world.is_solid_at(col, row_top) || world.is_solid_at(col, row_bottom) {
                // Snap the hitbox's right edge flush to the tile's left edge.
                let tile_left = col as f32 * ts;
                self.position.x = tile_left - HIT_HALF_W;
                self.velocity.x = 0.0;
            }
        } else if self.velocity.x < 0.0 {
            let col = (self.hit_left() / ts).floor() as i32;
            if world.is_solid_at(col, row_top) || world.is_solid_at(col, row_bottom) {
                // Snap the hitbox's left edge flush to the tile's right edge.
                let tile_right = (col + 1) as f32 * ts;
                self.position.x = tile_right + HIT_HALF_W;
                self.velocity.x = 0.0;
            }
        }
    }

    /// Swept vertical resolution: scan every tile row between the pre-move
    /// and post-move hitbox edge in the direction of travel, and take the
    /// first solid row. Scanning the whole travel path is what prevents
    /// tunneling through a one-tile-thick floor at high fall speed.
    fn resolve_collisions_y(&mut self, world: &TileWorld, prev_hit_bottom: f32, prev_hit_top: f32) {
        let ts = world.tile_size() as f32;
        let col_left = ((self.hit_left() + 1.0) / ts).floor() as i32;
        let col_right = ((self.hit_right() - 1.0) / ts).floor() as i32;

        if self.velocity.y > 0.0 {
            let from = (prev_hit_bottom / ts).floor() as i32;
            let to = (self.hit_bottom() / ts).floor() as i32;
            for row in from..=to {
                if world.is_solid_at(col_left, row) || world.is_solid_at(col_right, row) {
                    // Foot pivot: the hitbox bottom *is* position.y.
                    self.position.y = row as f32 * ts;
                    self.velocity.y = 0.0;
                    self.grounded = true;
                    return;
                }
            }
        } else if self.velocity.y < 0.0 {
            let from = (prev_hit_top / ts).floor() as i32;
            let to = (self.hit_top() / ts).floor() as i32;
            for row in (to..=from).rev() {
                if world.is_solid_at(col_left, row) || world.is_solid_at(col_right, row) {
                    // Snap the hitbox top to the tile's bottom edge; a head
                    // bump never grounds the body.
                    self.position.y = (row + 1) as f32 * ts + HIT_H;
                    self.velocity.y = 0.0;
                    return;
                }
            }
        }
    }

    /// Highest priority wins: an active attack overrides locomotion, then
    /// airborne vertical velocity picks Jump/Fall (the near-zero apex band
    /// stays on Jump), then grounded intent picks Walk over Idle.
    fn derive_state(&self, move_intent: i32) -> PlayerState {
        if self.is_attacking() {
            return PlayerState::Attack;
        }
        if !self.grounded {
            if self.velocity.y > self.config.apex_threshold {
                PlayerState::Fall
            } else {
                PlayerState::Jump
            }
        } else if move_intent != 0 {
            PlayerState::Walk
        } else {
            PlayerState::Idle
        }
    }
}
