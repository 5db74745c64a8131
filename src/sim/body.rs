//! The player's kinematic body
//!
//! The float `position` is the source of truth. The integer display rect is
//! always `floor(position)` with the body's size, and every method that moves
//! the body keeps the two in sync.

use glam::{IVec2, Vec2};

use super::rect::Rect;

#[derive(Debug, Clone)]
pub struct KinematicBody {
    position: Vec2,
    size: IVec2,
    rect: Rect,
    /// Velocity in pixels per frame
    pub velocity: Vec2,
    /// Resting on a solid surface this frame
    pub grounded: bool,
    pub spawn_position: Vec2,
}

impl KinematicBody {
    /// Create a body at rest at its spawn point
    pub fn new(spawn: Vec2, size: IVec2) -> Self {
        let mut body = Self {
            position: spawn,
            size,
            rect: Rect::new(0, 0, size.x, size.y),
            velocity: Vec2::ZERO,
            grounded: false,
            spawn_position: spawn,
        };
        body.sync_rect();
        body
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        self.size
    }

    /// Integer-snapped rect used for collision tests and drawing
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.sync_rect();
    }

    /// Advance along x only
    pub fn translate_x(&mut self, dx: f32) {
        self.position.x += dx;
        self.sync_rect();
    }

    /// Advance along y only
    pub fn translate_y(&mut self, dy: f32) {
        self.position.y += dy;
        self.sync_rect();
    }

    /// Adopt a clamped rect's x as the logical x (drops the fractional part)
    pub fn resync_x(&mut self, rect: Rect) {
        self.set_position(Vec2::new(rect.x as f32, self.position.y));
    }

    /// Adopt a clamped rect's y as the logical y
    pub fn resync_y(&mut self, rect: Rect) {
        self.set_position(Vec2::new(self.position.x, rect.y as f32));
    }

    /// Teleport back to spawn and cancel vertical motion
    pub fn respawn(&mut self) {
        self.set_position(self.spawn_position);
        self.velocity.y = 0.0;
    }

    fn sync_rect(&mut self) {
        self.rect = Rect::new(
            self.position.x.floor() as i32,
            self.position.y.floor() as i32,
            self.size.x,
            self.size.y,
        );
    }
}
