//! Bramble platformer headless demo entry point.
//!
//! Runs the full simulation stack (world, player, camera, session) under the
//! fixed-timestep clock with a scripted input sequence, then renders one
//! frame into a draw-call-counting sink. There is no window: a real backend
//! would poll a device into [`InputState`], implement [`RenderSink`] on its
//! GPU pipeline, and otherwise drive the session exactly like this loop.

mod camera;
mod frames;
mod player;
mod render;
mod session;
mod world;

use glam::{Mat4, Vec2};

use bramble_core::animation::SpriteRect;
use bramble_core::input::{InputState, Key};
use bramble_core::time::FrameClock;

use player::InputSnapshot;
use render::{RenderSink, TileArt};
use session::Session;
use world::{TileType, TileWorld, WorldRect};

const WORLD_W: i32 = 40;
const WORLD_H: i32 = 24;
const TILE_SIZE: i32 = 16;
const VIEWPORT: (u32, u32) = (320, 180);
const DEMO_TICKS: u64 = 600;

/// Counts draw submissions instead of touching a GPU.
#[derive(Default)]
struct CountingSink {
    quads: usize,
}

impl RenderSink for CountingSink {
    fn set_view_transform(&mut self, _view: Mat4) {}

    fn draw_quad(&mut self, _texture_key: &str, _src: SpriteRect, _dest: WorldRect, _flip_x: bool) {
        self.quads += 1;
    }
}

/// Scripted stand-in for a device: walk right, hop, walk back.
fn script_keys(input: &mut InputState, tick: u64) {
    match tick {
        30 => input.key_down(Key::D),
        240 => input.key_down(Key::Space),
        241 => input.key_up(Key::Space),
        360 => {
            input.key_up(Key::D);
            input.key_down(Key::A);
        }
        540 => input.key_up(Key::A),
        _ => {}
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut world = TileWorld::new(WORLD_W, WORLD_H, TILE_SIZE).unwrap_or_else(|e| {
        log::error!("{e}");
        std::process::exit(1);
    });
    world.generate_test();

    // An optional CLI argument points at a JSON frame table; the built-in
    // sheet layout is the fallback.
    let frame_table = match std::env::args().nth(1) {
        Some(path) => frames::load_frame_table(std::path::Path::new(&path)).unwrap_or_else(|e| {
            log::error!("{e}");
            std::process::exit(1);
        }),
        None => frames::player_frame_table(),
    };

    let spawn = Vec2::new(8.0 * TILE_SIZE as f32, 4.0 * TILE_SIZE as f32);
    let mut session = Session::new(world, spawn, frame_table, VIEWPORT);

    let mut art = TileArt::new();
    art.insert(TileType::Dirt, "tiles/dirt");
    art.insert(TileType::Sand, "tiles/sand");
    art.insert(TileType::Stone, "tiles/stone");

    let mut input = InputState::new();
    let mut clock = FrameClock::default();

    log::info!(
        "starting demo: {}x{} world, {} fixed ticks at {:.4}s",
        WORLD_W,
        WORLD_H,
        DEMO_TICKS,
        clock.fixed_dt
    );

    while clock.tick_count < DEMO_TICKS {
        std::thread::sleep(std::time::Duration::from_millis(1));
        clock.begin_frame();
        while clock.tick_count < DEMO_TICKS && clock.tick() {
            script_keys(&mut input, clock.tick_count);
            let snapshot = InputSnapshot::capture(&input);
            session.tick(clock.fixed_dt, snapshot);
            input.end_frame();

            if clock.tick_count % 120 == 0 {
                let p = session.player();
                log::info!(
                    "tick {:4}: pos=({:6.1},{:6.1}) state={:?} grounded={}",
                    clock.tick_count,
                    p.position.x,
                    p.position.y,
                    p.state(),
                    p.is_grounded()
                );
            }
        }
    }

    let mut sink = CountingSink::default();
    session.render(&art, "sheets/player", &mut sink);
    log::info!(
        "demo done: {} quads in the final frame, ~{:.0} fps host loop",
        sink.quads,
        clock.smoothed_fps()
    );
}
