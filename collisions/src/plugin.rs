use super::{colliders::Collider, store::ColliderStore};
use bevy::prelude::*;

/// Systems keeping `ColliderStore` in sync with `Collider` components.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionSet {
    Sync,
}

pub struct CollisionPlugin;

impl Plugin for CollisionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ColliderStore>()
            .register_type::<Collider>()
            .add_systems(
                FixedUpdate,
                (remove_colliders, sync_colliders)
                    .chain()
                    .in_set(CollisionSet::Sync),
            );
    }
}

#[allow(clippy::type_complexity)]
fn sync_colliders(
    mut store: ResMut<ColliderStore>,
    colliders: Query<
        (Entity, &Collider, &Transform),
        Or<(Added<Collider>, Changed<Collider>, Changed<Transform>)>,
    >,
) {
    for (entity, collider, transform) in &colliders {
        store.register(entity, *collider, transform.translation.truncate());
    }
}

fn remove_colliders(mut store: ResMut<ColliderStore>, mut removed: RemovedComponents<Collider>) {
    for entity in removed.read() {
        if store.remove(entity).is_none() {
            warn!("collider of {:?} was never registered", entity);
        }
    }
}
