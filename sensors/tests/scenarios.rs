use bevy::prelude::*;
use collisions::prelude::*;
use sensors::prelude::*;

const OWNER: Entity = Entity::from_raw(1);

fn boxed(store: &mut ColliderStore, raw: u32, min: Vec2, max: Vec2) -> Entity {
    let entity = Entity::from_raw(raw);
    let size = max - min;
    store.register(
        entity,
        Collider::new(ColliderShapeType::Box {
            width: size.x,
            height: size.y,
        }),
        min + size / 2.0,
    );
    entity
}

/// Four probes along (0, 1)..(1, 1) casting down 0.15.
fn foot_sensor(required: RequiredHits) -> ProbeGroup {
    let config = ProbeGroupConfig::new(
        SurfaceId::Ground,
        ProbeDirection::Down,
        required,
        Segment::new(Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0)),
    );
    ProbeGroup::new(config).unwrap().with_owner(OWNER)
}

/// Ground with its top at y = 0.9 under probes 1 and 2 only.
fn partial_ground() -> (ColliderStore, Entity) {
    let mut store = ColliderStore::new(1);
    let ground = boxed(&mut store, 10, Vec2::new(0.2, 0.0), Vec2::new(0.8, 0.9));
    (store, ground)
}

#[test]
fn one_probe_policy_on_partial_ground() {
    let (store, ground) = partial_ground();
    let mut group = foot_sensor(RequiredHits::One);

    assert!(group.evaluate(&Transform::IDENTITY, &store));

    let pattern: Vec<bool> = group.last_casts().iter().map(ProbeCast::is_hit).collect();
    assert_eq!(pattern, vec![false, true, true, false]);
    assert_eq!(group.last_hits().len(), 2);
    for hit in group.last_hits() {
        assert_eq!(hit.entity, ground);
        assert!((hit.point.y - 0.9).abs() < 1e-4);
    }
    assert!(group.is_touching(ground));
}

#[test]
fn full_policy_on_partial_ground() {
    let (store, _) = partial_ground();
    let mut group = foot_sensor(RequiredHits::Full);

    assert!(!group.evaluate(&Transform::IDENTITY, &store));
    assert_eq!(group.last_hits().len(), 2);
}

#[test]
fn ground_out_of_reach() {
    let mut store = ColliderStore::new(1);
    boxed(&mut store, 10, Vec2::new(-1.0, 0.0), Vec2::new(2.0, 0.8));

    for required in [RequiredHits::One, RequiredHits::AnyHalf, RequiredHits::Full] {
        let mut group = foot_sensor(required);
        assert!(!group.evaluate(&Transform::IDENTITY, &store));
        assert!(group.last_hits().is_empty());
    }
}

#[test]
fn second_half_ledge_detection() {
    let mut store = ColliderStore::new(1);
    // a ledge only under the last probe at x = 1
    boxed(&mut store, 10, Vec2::new(0.9, 0.0), Vec2::new(1.5, 0.9));
    let mut group = foot_sensor(RequiredHits::SecondHalf);
    assert!(group.evaluate(&Transform::IDENTITY, &store));
    assert!(!foot_sensor(RequiredHits::FirstHalf).evaluate(&Transform::IDENTITY, &store));

    // another block under the first probe disqualifies the ledge
    boxed(&mut store, 11, Vec2::new(-0.5, 0.0), Vec2::new(0.1, 0.9));
    assert!(!group.evaluate(&Transform::IDENTITY, &store));
}

#[test]
fn masked_layers_are_ignored() {
    let mut store = ColliderStore::new(1);
    let entity = Entity::from_raw(10);
    store.register(
        entity,
        Collider::new(ColliderShapeType::Box {
            width: 3.0,
            height: 0.9,
        })
        .with_layer(1 << 4),
        Vec2::new(0.5, 0.45),
    );

    let config = ProbeGroupConfig::new(
        SurfaceId::Ground,
        ProbeDirection::Down,
        RequiredHits::One,
        Segment::new(Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0)),
    );
    let mut blind = ProbeGroup::new(config.clone().with_collision_mask(1 << 0)).unwrap();
    let mut seeing = ProbeGroup::new(config.with_collision_mask(1 << 4)).unwrap();

    assert!(!blind.evaluate(&Transform::IDENTITY, &store));
    assert!(seeing.evaluate(&Transform::IDENTITY, &store));
}

#[test]
fn aggregator_touching_ground_and_ceiling() {
    let mut store = ColliderStore::new(2);
    // a crate squeezed between the floor and ceiling probes of a 1x1 body at the origin
    let crate_box = boxed(&mut store, 20, Vec2::new(-2.0, -1.0), Vec2::new(2.0, -0.05));
    let lid = boxed(&mut store, 21, Vec2::new(-2.0, 1.05), Vec2::new(2.0, 2.0));

    let ground = ProbeGroupConfig::new(
        SurfaceId::Ground,
        ProbeDirection::Down,
        RequiredHits::Full,
        Segment::new(Vec2::new(-0.5, 0.0), Vec2::new(0.5, 0.0)),
    );
    let ceiling = ProbeGroupConfig::new(
        SurfaceId::Ceiling,
        ProbeDirection::Up,
        RequiredHits::One,
        Segment::new(Vec2::new(-0.5, 1.0), Vec2::new(0.5, 1.0)),
    );
    let mut aggregator = CollisionAggregator::from_configs(OWNER, [ground, ceiling]).unwrap();

    let states = aggregator.update_collisions(&Transform::IDENTITY, &store).unwrap();
    assert_eq!(states.len(), 2);
    assert!(states[&SurfaceId::Ground]);
    assert!(states[&SurfaceId::Ceiling]);

    let both = [SurfaceId::Ground, SurfaceId::Ceiling];
    assert_eq!(aggregator.is_touching_specific_many(crate_box, &both, false), Ok(false));
    assert_eq!(aggregator.is_touching_specific_many(crate_box, &both, true), Ok(true));
    assert_eq!(aggregator.is_touching_specific_many(lid, &both, true), Ok(true));

    // one collider spanning both probe rows
    store.remove(crate_box);
    store.remove(lid);
    let pillar = boxed(&mut store, 22, Vec2::new(-2.0, -1.0), Vec2::new(2.0, 2.0));
    store.update_position(pillar, Vec2::new(0.0, 0.5));
    aggregator.update_collisions(&Transform::IDENTITY, &store).unwrap();

    assert_eq!(aggregator.is_touching_specific_many(pillar, &both, false), Ok(true));
    assert_eq!(
        aggregator.last_collision_hits(SurfaceId::Ceiling).unwrap(),
        vec![pillar; 4]
    );
}
