pub use super::RaycastHit;
pub use crate::colliders::Collider;
pub use crate::plugin::{CollisionPlugin, CollisionSet};
pub use crate::shapes::{ColliderShape, ColliderShapeType};
pub use crate::store::{ColliderStore, ALL_LAYERS};
