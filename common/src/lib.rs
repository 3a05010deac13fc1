use bevy::prelude::*;
use rand::Rng;

pub mod math;

/// A line segment from `start` to `end`. `direction` is the unnormalized `end - start`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Ray2D {
    pub start: Vec2,
    pub end: Vec2,
    pub direction: Vec2,
}

impl Ray2D {
    pub fn new(position: Vec2, end: Vec2) -> Self {
        Self {
            start: position,
            end,
            direction: end - position,
        }
    }

    /// Point at fraction `t` of the segment, `0.0` being `start` and `1.0` being `end`.
    pub fn point_at(&self, t: f32) -> Vec2 {
        self.start + self.direction * t
    }

    pub fn bounds(&self) -> FRect {
        FRect::from_min_max(
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }
}

/// Describes a 2D-rectangle with {x,y} being the min corner of the rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct FRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_min_max(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Rect of the given size centered on `center`.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(
            center.x - size.x / 2.0,
            center.y - size.y / 2.0,
            size.x,
            size.y,
        )
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn intersects(&self, other: FRect) -> bool {
        other.left() <= self.right()
            && self.left() <= other.right()
            && other.bottom() <= self.top()
            && self.bottom() <= other.top()
    }

    /// Slab test against the segment described by `ray`. Returns the fraction along
    /// `ray.direction` of the first contact, `0.0` when the segment starts inside.
    /// Contacts past `ray.end` are rejected.
    pub fn ray_intersects(&self, ray: &Ray2D) -> Option<f32> {
        let mut distance = 0.0_f32;
        let mut max = 1.0_f32;

        let mut check_axis =
            |dir_axis: f32, start_axis: f32, self_axis: f32, self_size: f32| -> bool {
                if dir_axis.abs() < 1e-06 {
                    if start_axis < self_axis || start_axis > self_axis + self_size {
                        return false;
                    }
                } else {
                    let inv = 1.0 / dir_axis;
                    let mut near = (self_axis - start_axis) * inv;
                    let mut far = (self_axis + self_size - start_axis) * inv;
                    if near > far {
                        std::mem::swap(&mut near, &mut far);
                    }

                    distance = near.max(distance);
                    max = far.min(max);
                    if distance > max {
                        return false;
                    }
                }

                true
            };

        if !check_axis(ray.direction.x, ray.start.x, self.x, self.width)
            || !check_axis(ray.direction.y, ray.start.y, self.y, self.height)
        {
            return None;
        }

        Some(distance)
    }
}

/// Integer range used to randomize level layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct RangeInt {
    pub min: i32,
    pub max: i32,
}

impl RangeInt {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn random_inclusive(&self, rng: &mut impl Rng) -> i32 {
        rng.gen_range(self.min..=self.max)
    }

    /// Falls back to `min` for an empty range.
    pub fn random_exclusive(&self, rng: &mut impl Rng) -> i32 {
        if self.max <= self.min {
            return self.min;
        }
        rng.gen_range(self.min..self.max)
    }
}
