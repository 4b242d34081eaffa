//! Session: one world, one player, one camera, and the fixed per-tick order
//! that ties them together.
//!
//! The session is the single writer for everything it owns. External tile
//! edits go through [`Session::world_mut`] between ticks; nothing mutates
//! core state concurrently with a tick, so no locking exists anywhere in the
//! simulation.

use glam::Vec2;

use bramble_core::animation::FrameTable;

use crate::camera::Camera;
use crate::player::{InputSnapshot, Player, PlayerState};
use crate::render::{draw_player, draw_world, RenderSink, TileArt};
use crate::world::TileWorld;

pub struct Session {
    world: TileWorld,
    player: Player,
    camera: Camera,
    viewport: (u32, u32),
}

impl Session {
    /// Camera bounds default to the world's pixel bounds so the view never
    /// shows past the grid edge.
    pub fn new(
        world: TileWorld,
        spawn: Vec2,
        frames: FrameTable<PlayerState>,
        viewport: (u32, u32),
    ) -> Self {
        let player = Player::new(spawn, frames);
        let mut camera = Camera::new();
        camera.bounds = Some(world.pixel_bounds());
        Self {
            world,
            player,
            camera,
            viewport,
        }
    }

    /// One simulation step: the player reads the world and input and updates
    /// itself, then the camera follows the new player position. This order
    /// is fixed; the renderer only ever observes post-tick state.
    pub fn tick(&mut self, dt: f32, input: InputSnapshot) {
        self.player.update(input, dt, &self.world);
        self.camera.follow(
            self.player.position,
            self.viewport.0 as f32,
            self.viewport.1 as f32,
            dt,
        );
    }

    /// Emit the frame: view transform first, then tiles, then the player.
    pub fn render(&self, art: &TileArt, player_sheet: &str, sink: &mut dyn RenderSink) {
        sink.set_view_transform(self.camera.view_transform());
        draw_world(&self.world, art, sink);
        draw_player(&self.player, player_sheet, sink);
    }

    #[allow(dead_code)]
    pub fn world(&self) -> &TileWorld {
        &self.world
    }

    /// For serialized external tile edits between ticks.
    #[allow(dead_code)]
    pub fn world_mut(&mut self) -> &mut TileWorld {
        &mut self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    #[allow(dead_code)]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[allow(dead_code)]
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }
}
