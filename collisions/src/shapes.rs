use bevy::{math::Vec2, reflect::Reflect};
use common::FRect;

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum ColliderShapeType {
    None,
    Circle { radius: f32 },
    Box { width: f32, height: f32 },
}

/// A collider shape placed in world space. `position` is the center of the shape.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ColliderShape {
    pub shape_type: ColliderShapeType,
    pub position: Vec2,
    pub bounds: FRect,
}

impl ColliderShape {
    pub fn new(shape_type: ColliderShapeType, position: Vec2) -> Self {
        let bounds = match shape_type {
            ColliderShapeType::None => FRect::new(position.x, position.y, 0.0, 0.0),
            ColliderShapeType::Circle { radius } => {
                FRect::from_center(position, Vec2::splat(radius * 2.0))
            }
            ColliderShapeType::Box { width, height } => {
                FRect::from_center(position, Vec2::new(width, height))
            }
        };

        Self {
            shape_type,
            position,
            bounds,
        }
    }
}

pub mod collisions {
    use super::{ColliderShape, ColliderShapeType};
    use crate::RaycastHit;
    use bevy::math::Vec2;
    use common::Ray2D;

    /// Casts the segment `start..end` against `shape`.
    pub fn line_to_shape(start: Vec2, end: Vec2, shape: &ColliderShape) -> Option<RaycastHit> {
        match shape.shape_type {
            ColliderShapeType::None => None,
            ColliderShapeType::Circle { .. } => line_to_circle(start, end, shape),
            ColliderShapeType::Box { .. } => line_to_box(start, end, shape),
        }
    }

    pub fn line_to_box(start: Vec2, end: Vec2, s: &ColliderShape) -> Option<RaycastHit> {
        let ray = Ray2D::new(start, end);
        let fraction = s.bounds.ray_intersects(&ray)?;

        let point = ray.point_at(fraction);
        let length = ray.direction.length();

        Some(RaycastHit {
            entity: None,
            fraction,
            distance: fraction * length,
            point,
            normal: box_normal(s, point, ray.direction),
        })
    }

    pub fn line_to_circle(start: Vec2, end: Vec2, s: &ColliderShape) -> Option<RaycastHit> {
        let ColliderShapeType::Circle { radius } = s.shape_type else {
            return None;
        };

        let length = start.distance(end);
        if length <= f32::EPSILON {
            return None;
        }

        let d = (end - start) / length;
        let m = start - s.position;
        let b = m.dot(d);
        let c = m.dot(m) - radius * radius;

        // start is outside the circle and pointing away from it
        if c > 0.0 && b > 0.0 {
            return None;
        }

        let discr = b * b - c;
        if discr < 0.0 {
            return None;
        }

        let distance = (-b - discr.sqrt()).max(0.0);
        if distance > length {
            return None;
        }

        let point = start + distance * d;
        let normal = match (point - s.position).try_normalize() {
            Some(normal) => normal,
            None => -d,
        };

        Some(RaycastHit {
            entity: None,
            fraction: distance / length,
            distance,
            point,
            normal,
        })
    }

    fn box_normal(s: &ColliderShape, point: Vec2, direction: Vec2) -> Vec2 {
        const EPS: f32 = 1e-4;
        let bounds = s.bounds;

        if (point.y - bounds.top()).abs() < EPS && direction.y < 0.0 {
            Vec2::Y
        } else if (point.y - bounds.bottom()).abs() < EPS && direction.y > 0.0 {
            Vec2::NEG_Y
        } else if (point.x - bounds.left()).abs() < EPS && direction.x > 0.0 {
            Vec2::NEG_X
        } else if (point.x - bounds.right()).abs() < EPS && direction.x < 0.0 {
            Vec2::X
        } else {
            // started inside the box
            -direction.normalize_or_zero()
        }
    }
}
