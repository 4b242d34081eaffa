//! Follow camera: centers a target in the zoomed viewport, optionally
//! clamped to world bounds and smoothed toward the desired position.
//!
//! Smoothing law (the one and only one used): frame-rate-independent
//! exponential decay. Each update the position moves toward the desired
//! position by the fraction `1 - exp(-smoothing * dt)`, where `smoothing` is
//! a decay rate in 1/seconds. A factor of zero (or below) disables smoothing
//! and snaps exactly in one call.

use glam::{Mat4, Vec2, Vec3};

use crate::world::WorldRect;

pub struct Camera {
    /// Top-left of the view in world pixels.
    pub position: Vec2,
    pub zoom: f32,
    /// Radians, about the screen z axis.
    pub rotation: f32,
    /// Round the view translation to whole pixels before composing.
    pub pixel_snap: bool,
    /// Exponential decay rate in 1/seconds; <= 0 snaps.
    pub follow_smoothing: f32,
    /// World rectangle the viewport must stay inside, if any.
    pub bounds: Option<WorldRect>,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
            rotation: 0.0,
            pixel_snap: true,
            follow_smoothing: 0.0,
            bounds: None,
        }
    }

    /// Move toward centering `target` in a `viewport_w` x `viewport_h`
    /// screen. The view covers `viewport / zoom` world pixels; when bounds
    /// are set (and non-degenerate) the desired position is clamped so the
    /// view stays inside them before any smoothing is applied.
    pub fn follow(&mut self, target: Vec2, viewport_w: f32, viewport_h: f32, dt: f32) {
        let view_w = viewport_w / self.zoom;
        let view_h = viewport_h / self.zoom;

        let mut desired = target - Vec2::new(view_w, view_h) * 0.5;

        if let Some(bounds) = self.bounds.filter(|b| !b.is_degenerate()) {
            // If the view is larger than the bounds the max ends up below the
            // min; pin to the bounds origin instead.
            let max_x = (bounds.right() - view_w).max(bounds.x);
            let max_y = (bounds.bottom() - view_h).max(bounds.y);
            desired.x = desired.x.clamp(bounds.x, max_x);
            desired.y = desired.y.clamp(bounds.y, max_y);
        }

        if self.follow_smoothing <= 0.0 {
            self.position = desired;
        } else {
            let blend = 1.0 - (-self.follow_smoothing * dt).exp();
            self.position = self.position.lerp(desired, blend);
        }
    }

    /// World-to-screen transform: translate by the negative (possibly
    /// pixel-snapped) position, then rotate, then scale by zoom, in that
    /// order as applied to world-space points.
    pub fn view_transform(&self) -> Mat4 {
        let mut p = self.position;
        if self.pixel_snap {
            p = p.round();
        }
        Mat4::from_scale(Vec3::new(self.zoom, self.zoom, 1.0))
            * Mat4::from_rotation_z(self.rotation)
            * Mat4::from_translation(Vec3::new(-p.x, -p.y, 0.0))
    }

    /// Apply the view transform to a world-space point.
    #[allow(dead_code)]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        self.view_transform()
            .transform_point3(Vec3::new(world.x, world.y, 0.0))
            .truncate()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
