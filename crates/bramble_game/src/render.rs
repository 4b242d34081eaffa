//! The render surface the core exposes to a backend.
//!
//! The core computes *what* to draw and *where*; a [`RenderSink`]
//! implementation owns pixels, textures, and draw submission. Texture
//! references are plain string keys resolved by the backend's own registry.

use glam::{Mat4, Vec2};
use std::collections::HashMap;

use bramble_core::animation::SpriteRect;

use crate::player::{Facing, Player, SPRITE_H, SPRITE_W};
use crate::world::{TileType, TileWorld, WorldRect};

/// Backend drawing interface. Called once per frame with the view transform,
/// then once per textured quad, in paint order.
pub trait RenderSink {
    fn set_view_transform(&mut self, view: Mat4);
    fn draw_quad(&mut self, texture_key: &str, src: SpriteRect, dest: WorldRect, flip_x: bool);
}

/// Externally supplied tile-type → texture-key lookup. Solid types with no
/// mapping are skipped at draw time rather than treated as an error.
#[derive(Debug, Default)]
pub struct TileArt {
    textures: HashMap<TileType, String>,
}

impl TileArt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tile: TileType, texture_key: impl Into<String>) {
        self.textures.insert(tile, texture_key.into());
    }

    pub fn texture_for(&self, tile: TileType) -> Option<&str> {
        self.textures.get(&tile).map(String::as_str)
    }
}

/// Emit one quad per non-empty tile, each filling its tile bounds.
pub fn draw_world(world: &TileWorld, art: &TileArt, sink: &mut dyn RenderSink) {
    let ts = world.tile_size();
    for (x, y, tile) in world.tiles() {
        if tile == TileType::Empty {
            continue;
        }
        let Some(texture) = art.texture_for(tile) else {
            continue;
        };
        sink.draw_quad(
            texture,
            SpriteRect::new(0, 0, ts, ts),
            world.tile_bounds(x, y),
            false,
        );
    }
}

/// Emit the player's current animation frame, bottom-centered on the foot
/// pivot and rounded to whole pixels. An empty frame draws nothing.
pub fn draw_player(player: &Player, sheet_key: &str, sink: &mut dyn RenderSink) {
    let src = player.current_frame();
    if src.is_empty() {
        return;
    }
    let draw_pos = Vec2::new(
        (player.position.x - SPRITE_W * 0.5).round(),
        (player.position.y - SPRITE_H).round(),
    );
    sink.draw_quad(
        sheet_key,
        src,
        WorldRect::new(draw_pos.x, draw_pos.y, SPRITE_W, SPRITE_H),
        player.facing() == Facing::Left,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::player_frame_table;
    use crate::world::TileWorld;

    #[derive(Default)]
    struct RecordingSink {
        view: Option<Mat4>,
        quads: Vec<(String, SpriteRect, WorldRect, bool)>,
    }

    impl RenderSink for RecordingSink {
        fn set_view_transform(&mut self, view: Mat4) {
            self.view = Some(view);
        }

        fn draw_quad(&mut self, texture_key: &str, src: SpriteRect, dest: WorldRect, flip_x: bool) {
            self.quads.push((texture_key.to_string(), src, dest, flip_x));
        }
    }

    fn art() -> TileArt {
        let mut art = TileArt::new();
        art.insert(TileType::Dirt, "tiles/dirt");
        art.insert(TileType::Stone, "tiles/stone");
        art
    }

    #[test]
    fn draw_world_emits_one_quad_per_mapped_tile() {
        let mut world = TileWorld::new(4, 4, 8).expect("valid world");
        world.set_tile(1, 1, TileType::Dirt);
        world.set_tile(2, 1, TileType::Stone);
        // Sand is solid but unmapped in this art set: skipped, not an error.
        world.set_tile(3, 1, TileType::Sand);

        let mut sink = RecordingSink::default();
        draw_world(&world, &art(), &mut sink);

        assert_eq!(sink.quads.len(), 2);
        assert_eq!(sink.quads[0].0, "tiles/dirt");
        assert_eq!(sink.quads[0].2, WorldRect::new(8.0, 8.0, 8.0, 8.0));
        assert_eq!(sink.quads[1].0, "tiles/stone");
    }

    #[test]
    fn draw_player_positions_sprite_on_foot_pivot() {
        let player = Player::new(glam::Vec2::new(40.3, 56.0), player_frame_table());
        let mut sink = RecordingSink::default();
        draw_player(&player, "sheets/player", &mut sink);

        assert_eq!(sink.quads.len(), 1);
        let (key, src, dest, flip) = &sink.quads[0];
        assert_eq!(key, "sheets/player");
        // Idle frame: row 1, column 0 of the 32x32 sheet.
        assert_eq!(*src, SpriteRect::new(0, 32, 32, 32));
        // 40.3 - 16 = 24.3, rounded to 24; 56 - 32 = 24.
        assert_eq!(*dest, WorldRect::new(24.0, 24.0, 32.0, 32.0));
        assert!(!flip);
    }

    #[test]
    fn draw_player_skips_empty_frame() {
        // A frame table with no entry for Idle yields the EMPTY sentinel.
        let player = Player::new(glam::Vec2::ZERO, bramble_core::animation::FrameTable::new());
        let mut sink = RecordingSink::default();
        draw_player(&player, "sheets/player", &mut sink);
        assert!(sink.quads.is_empty());
    }
}
