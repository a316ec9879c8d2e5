/// Generational arena holding every live scenery object, enemy and bullet.
///
/// Handles stay valid until their entity is removed; a handle to a freed or
/// reused slot resolves to `None`, so stale collision results are harmless.

use crate::entities::{Entity, Groups};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

#[derive(Clone, Debug, Default)]
pub struct Arena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    /// Live handles in registration order.
    order: Vec<EntityId>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: Entity) -> EntityId {
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.generation += 1;
                slot.entity = Some(entity);
                EntityId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    entity: Some(entity),
                });
                EntityId {
                    index,
                    generation: 0,
                }
            }
        };
        self.order.push(id);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entity.as_ref())
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entity.as_mut())
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Drops the entity from every group at once. Returns it the first time,
    /// `None` for an already-removed handle.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?;
        let entity = slot.entity.take()?;
        self.free.push(id.index);
        self.order.retain(|live| *live != id);
        Some(entity)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Snapshot of live handles, oldest first.
    pub fn ids(&self) -> Vec<EntityId> {
        self.order.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.order
            .iter()
            .filter_map(move |id| self.get(*id).map(|entity| (*id, entity)))
    }

    /// Members of every group in `groups`, oldest first.
    pub fn in_groups(&self, groups: Groups) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.iter()
            .filter(move |(_, entity)| entity.groups.contains(groups))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Visual, VisualId};
    use crate::entities::EntityKind;
    use crate::geometry::Rect;

    fn dummy(kind: EntityKind, groups: Groups) -> Entity {
        let visual = Visual {
            id: VisualId(0),
            width: 10.0,
            height: 10.0,
        };
        Entity {
            kind,
            name: "dummy.png".to_string(),
            groups,
            priority: 0,
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            visual,
            base_visual: visual,
            angle: 0.0,
            scroll_speed: 1.0,
            spawn_groups: groups,
            replaced: false,
            combat: None,
            pursuit: None,
        }
    }

    #[test]
    fn stale_handle_does_not_resolve_after_reuse() {
        let mut arena = Arena::new();
        let first = arena.insert(dummy(EntityKind::Ground, Groups::LAYERS));
        assert!(arena.remove(first).is_some());
        assert!(arena.remove(first).is_none());

        let second = arena.insert(dummy(EntityKind::Bomb, Groups::LAYERS));
        assert!(!arena.contains(first));
        assert_eq!(arena.get(second).map(|e| e.kind), Some(EntityKind::Bomb));
    }

    #[test]
    fn registration_order_survives_removal() {
        let mut arena = Arena::new();
        let a = arena.insert(dummy(EntityKind::Landscape, Groups::LAYERS));
        let b = arena.insert(dummy(EntityKind::Mountain, Groups::LAYERS));
        let c = arena.insert(dummy(EntityKind::Ground, Groups::LAYERS | Groups::FLOOR));
        arena.remove(b);
        let d = arena.insert(dummy(EntityKind::Cactus, Groups::LAYERS | Groups::ENEMIES));
        assert_eq!(arena.ids(), vec![a, c, d]);
        let floor: Vec<_> = arena.in_groups(Groups::FLOOR).map(|(id, _)| id).collect();
        assert_eq!(floor, vec![c]);
    }
}
