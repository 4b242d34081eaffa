//! Fixed-timestep frame clock.
//!
//! The host loop calls [`FrameClock::begin_frame`] once per rendered frame,
//! then drains `while clock.tick() { simulate(clock.fixed_dt) }`. Simulation
//! always advances in whole `fixed_dt` slices, so results are independent of
//! the render frame rate. A cap on per-frame accumulated time keeps a stall
//! (debugger pause, window drag) from queueing an unbounded burst of steps.

use std::time::Instant;

const FPS_SAMPLE_COUNT: usize = 30;

pub struct FrameClock {
    pub fixed_dt: f32,
    /// Upper bound on real time accepted per frame, in seconds.
    pub max_frame_dt: f32,
    accumulator: f32,
    last_instant: Instant,
    pub tick_count: u64,
    pub frame_count: u64,
    fps_samples: [f32; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
}

impl FrameClock {
    pub fn new(fixed_dt: f32) -> Self {
        Self {
            fixed_dt,
            max_frame_dt: 0.25,
            accumulator: 0.0,
            last_instant: Instant::now(),
            tick_count: 0,
            frame_count: 0,
            fps_samples: [fixed_dt; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
        }
    }

    /// Measure the real delta since the previous frame and feed the
    /// accumulator.
    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        let mut real_dt = now.duration_since(self.last_instant).as_secs_f32();
        self.last_instant = now;

        if real_dt > self.max_frame_dt {
            log::warn!(
                "frame took {:.1}ms, capping simulation debt at {:.0}ms",
                real_dt * 1000.0,
                self.max_frame_dt * 1000.0
            );
            real_dt = self.max_frame_dt;
        }

        self.accumulator += real_dt;
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
    }

    /// Consume one fixed step if enough time has accumulated.
    pub fn tick(&mut self) -> bool {
        if self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            self.tick_count += 1;
            true
        } else {
            false
        }
    }

    /// Rolling average frames-per-second over the last few frames.
    pub fn smoothed_fps(&self) -> f32 {
        let avg: f32 = self.fps_samples.iter().sum::<f32>() / FPS_SAMPLE_COUNT as f32;
        if avg > 0.0 {
            1.0 / avg
        } else {
            0.0
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}
