//! GhostRoster: arena + index для идентичностей призраков
//!
//! `GhostId` = индекс слота. Уничтоженный призрак оставляет `None`
//! (tombstone), слот никогда не переиспользуется в пределах сессии.
//! Все cross-reference (avoidance targets, контакты): индексы,
//! валидируются через `is_live`/`get` при каждом разыменовании.

use bevy::prelude::*;

use crate::components::GhostId;

#[derive(Resource, Debug, Default, Clone)]
pub struct GhostRoster {
    slots: Vec<Option<Entity>>,
}

impl GhostRoster {
    /// Выделить следующий id и заспавнить под него entity.
    ///
    /// `spawn` получает id заранее, чтобы компонент `Ghost` знал свою идентичность.
    pub fn allocate(&mut self, spawn: impl FnOnce(GhostId) -> Entity) -> GhostId {
        let id = GhostId(self.slots.len());
        let entity = spawn(id);
        self.slots.push(Some(entity));
        id
    }

    pub fn get(&self, id: GhostId) -> Option<Entity> {
        self.slots.get(id.index()).copied().flatten()
    }

    pub fn is_live(&self, id: GhostId) -> bool {
        self.get(id).is_some()
    }

    /// Освободить слот. Возвращает entity, если слот был занят.
    pub fn release(&mut self, id: GhostId) -> Option<Entity> {
        self.slots.get_mut(id.index()).and_then(Option::take)
    }

    /// Живые призраки в порядке id
    pub fn live(&self) -> impl Iterator<Item = (GhostId, Entity)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|entity| (GhostId(index), entity)))
    }

    /// Всего выделено id (включая tombstones)
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}
