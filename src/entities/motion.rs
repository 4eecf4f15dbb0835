use std::ops::{Add, Mul, Sub};

/// A point or direction in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    pub fn normalized(self) -> Option<Vec2> {
        let length = self.length();
        if length == 0.0 || !length.is_finite() {
            return None;
        }
        Some(Vec2::new(self.x / length, self.y / length))
    }

    /// Unit vector pointing from `self` toward `target`.
    pub fn direction_to(self, target: Vec2) -> Option<Vec2> {
        (target - self).normalized()
    }

    /// Whether the point lies in `[0, width] x [0, height]`.
    pub fn within(self, width: f32, height: f32) -> bool {
        (0.0..=width).contains(&self.x) && (0.0..=height).contains(&self.y)
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Vec2::new(x, y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Frame cycle that advances one frame every `delay` ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub frame: usize,
    pub frame_count: u32,
    frame_delay: u32,
    frames: usize,
}

impl Animation {
    pub fn new(frames: usize, frame_delay: u32) -> Self {
        Self {
            frame: 0,
            frame_count: 0,
            frame_delay,
            frames: frames.max(1),
        }
    }

    pub fn tick(&mut self) {
        self.frame_count += 1;
        if self.frame_count >= self.frame_delay {
            self.frame_count = 0;
            self.frame = (self.frame + 1) % self.frames;
        }
    }

    pub fn reset(&mut self) {
        self.frame = 0;
        self.frame_count = 0;
    }
}
