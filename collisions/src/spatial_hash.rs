use bevy::{
    prelude::*,
    utils::{HashMap, HashSet},
};
use common::{math::floor_to_int, FRect};

pub type EntitySet = HashSet<Entity>;

/// Uniform grid broadphase. Every entity is stored in each cell its bounds overlap.
#[derive(Debug)]
pub struct SpatialHash {
    inverse_cell_size: f32,
    cell_map: IntIntMap,
}

impl SpatialHash {
    pub fn new(cell_size: i32) -> Self {
        let cell_size = cell_size.max(1);
        Self {
            inverse_cell_size: 1.0 / cell_size as f32,
            cell_map: IntIntMap::default(),
        }
    }

    pub fn register(&mut self, bounds: FRect, entity: Entity) {
        let (p1, p2) = self.cell_range(bounds);

        for x in p1.x..=p2.x {
            for y in p1.y..=p2.y {
                self.cell_map.get_or_insert(x, y).insert(entity);
            }
        }
    }

    pub fn remove(&mut self, bounds: FRect, entity: Entity) {
        let (p1, p2) = self.cell_range(bounds);

        for x in p1.x..=p2.x {
            for y in p1.y..=p2.y {
                if let Some(c) = self.cell_map.get_mut(x, y) {
                    c.remove(&entity);
                    if c.is_empty() {
                        self.cell_map.remove(x, y);
                    }
                } else {
                    error!(
                        "removing entity {:?} from cell ({}, {}) that it is not present in",
                        entity, x, y
                    );
                }
            }
        }
    }

    /// All entities sharing a cell with `bounds`.
    pub fn get_nearby_bounds(&self, bounds: FRect) -> EntitySet {
        let mut result = HashSet::new();
        let (p1, p2) = self.cell_range(bounds);

        for x in p1.x..=p2.x {
            for y in p1.y..=p2.y {
                if let Some(cell) = self.cell_map.get(x, y) {
                    result.extend(cell);
                }
            }
        }

        result
    }

    pub fn clear(&mut self) {
        self.cell_map.clear();
    }

    fn cell_range(&self, bounds: FRect) -> (IVec2, IVec2) {
        (
            self.cell_coords(bounds.left(), bounds.bottom()),
            self.cell_coords(bounds.right(), bounds.top()),
        )
    }

    fn cell_coords(&self, x: f32, y: f32) -> IVec2 {
        IVec2::new(
            floor_to_int(x * self.inverse_cell_size),
            floor_to_int(y * self.inverse_cell_size),
        )
    }
}

#[derive(Debug, Default)]
struct IntIntMap {
    store: HashMap<i64, EntitySet>,
}

fn get_key(x: i32, y: i32) -> i64 {
    let shl = (x as i64).overflowing_shl(32);
    shl.0 | ((y as u32) as i64)
}

impl IntIntMap {
    fn get(&self, x: i32, y: i32) -> Option<&EntitySet> {
        self.store.get(&get_key(x, y))
    }

    fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut EntitySet> {
        self.store.get_mut(&get_key(x, y))
    }

    fn get_or_insert(&mut self, x: i32, y: i32) -> &mut EntitySet {
        self.store.entry(get_key(x, y)).or_default()
    }

    fn remove(&mut self, x: i32, y: i32) {
        self.store.remove(&get_key(x, y));
    }

    fn clear(&mut self) {
        self.store.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_distinguish_negative_cells() {
        assert_ne!(get_key(-1, 0), get_key(0, -1));
        assert_ne!(get_key(1, -1), get_key(-1, 1));
    }

    #[test]
    fn finds_entities_spanning_several_cells() {
        let mut hash = SpatialHash::new(10);
        let wide = Entity::from_raw(1);
        hash.register(FRect::new(-15.0, 0.0, 40.0, 5.0), wide);

        assert!(hash
            .get_nearby_bounds(FRect::new(21.0, 1.0, 1.0, 1.0))
            .contains(&wide));
        assert!(hash
            .get_nearby_bounds(FRect::new(-14.0, 1.0, 1.0, 1.0))
            .contains(&wide));
        assert!(hash
            .get_nearby_bounds(FRect::new(50.0, 1.0, 1.0, 1.0))
            .is_empty());
    }

    #[test]
    fn removal_empties_cells() {
        let mut hash = SpatialHash::new(10);
        let e = Entity::from_raw(3);
        let bounds = FRect::new(0.0, 0.0, 5.0, 5.0);

        hash.register(bounds, e);
        hash.remove(bounds, e);

        assert!(hash.get_nearby_bounds(bounds).is_empty());
        assert!(hash.cell_map.store.is_empty());
    }
}
