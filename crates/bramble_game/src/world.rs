//! The tile world: a dense grid of material tags plus the queries the
//! collision and render paths need.
//!
//! The grid is the single source of gameplay truth. It is owned exclusively
//! by the session and passed by reference into consumers; there is no global
//! world. Out-of-bounds reads deliberately degrade to [`TileType::Empty`]
//! (non-solid) so the body can simulate near the world edges without
//! special-casing, and out-of-bounds writes are no-ops.

use glam::Vec2;

/// Material tag for one grid cell. Solidity is a fixed static classification
/// of the tag, not per-cell state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileType {
    Empty,
    Dirt,
    Sand,
    Stone,
}

impl TileType {
    pub fn is_solid(self) -> bool {
        matches!(self, TileType::Dirt | TileType::Sand | TileType::Stone)
    }
}

/// An axis-aligned rectangle in world pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl WorldRect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Degenerate rects (no area) are ignored by consumers such as the
    /// camera bounds clamp.
    pub fn is_degenerate(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }
}

/// Dense tile grid with pixel-space conversion helpers.
#[derive(Debug)]
pub struct TileWorld {
    width: i32,
    height: i32,
    tile_size: i32,
    tiles: Vec<TileType>,
}

impl TileWorld {
    /// Construction is the only place dimensions are validated; every
    /// per-tile query afterwards is bounds-safe by policy instead.
    pub fn new(width: i32, height: i32, tile_size: i32) -> Result<Self, String> {
        if width <= 0 || height <= 0 {
            return Err(format!(
                "world validation failed: grid dimensions must be positive, got {width}x{height}"
            ));
        }
        if tile_size <= 0 {
            return Err(format!(
                "world validation failed: tile size must be positive, got {tile_size}"
            ));
        }
        Ok(Self {
            width,
            height,
            tile_size,
            tiles: vec![TileType::Empty; (width * height) as usize],
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Returns the stored tag, or `Empty` outside the grid. Never fails.
    pub fn get_tile(&self, x: i32, y: i32) -> TileType {
        if !self.in_bounds(x, y) {
            return TileType::Empty;
        }
        self.tiles[self.index(x, y)]
    }

    /// Overwrites one cell; out-of-bounds writes are dropped.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: TileType) {
        if !self.in_bounds(x, y) {
            return;
        }
        let i = self.index(x, y);
        self.tiles[i] = tile;
    }

    pub fn is_solid_at(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).is_solid()
    }

    /// Pixel-space rectangle covered by cell (x, y).
    pub fn tile_bounds(&self, x: i32, y: i32) -> WorldRect {
        let ts = self.tile_size as f32;
        WorldRect::new(x as f32 * ts, y as f32 * ts, ts, ts)
    }

    /// Component-wise floor division of a pixel position into a cell
    /// coordinate. Floor, not truncation: points left of or above the origin
    /// map to negative cells.
    #[allow(dead_code)]
    pub fn world_to_tile(&self, world: Vec2) -> (i32, i32) {
        let ts = self.tile_size as f32;
        ((world.x / ts).floor() as i32, (world.y / ts).floor() as i32)
    }

    /// Pixel-space rectangle of the entire grid.
    pub fn pixel_bounds(&self) -> WorldRect {
        let ts = self.tile_size as f32;
        WorldRect::new(0.0, 0.0, self.width as f32 * ts, self.height as f32 * ts)
    }

    /// All cells in row-major order, for the render walk.
    pub fn tiles(&self) -> impl Iterator<Item = (i32, i32, TileType)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| (x, y, self.tiles[self.index(x, y)]))
        })
    }

    /// Fixed test layout: a dirt ground row near the bottom, a stone
    /// platform above it, and stone walls on both sides.
    pub fn generate_test(&mut self) {
        for tile in self.tiles.iter_mut() {
            *tile = TileType::Empty;
        }

        let ground_y = self.height - 3;
        for x in 0..self.width {
            self.set_tile(x, ground_y, TileType::Dirt);
        }

        let platform_y = ground_y - 5;
        for x in 10..20.min(self.width) {
            self.set_tile(x, platform_y, TileType::Stone);
        }

        for y in 0..self.height {
            self.set_tile(0, y, TileType::Stone);
            self.set_tile(self.width - 1, y, TileType::Stone);
        }
    }
}
