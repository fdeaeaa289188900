use std::collections::BTreeSet;

use super::{Health, Score, Species, Sprite, SpriteId, SpriteStatus};

/// Every sprite spawned on a map, plus the living
/// members of each faction.
#[derive(Debug, Clone, Default)]
pub struct Sprites {
    roster: Vec<Sprite>,
    elves: BTreeSet<SpriteId>,
    goblins: BTreeSet<SpriteId>,
}

impl Sprites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of living sprites.
    pub fn len(&self) -> usize {
        self.elves.len() + self.goblins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn spawn(&mut self, sprite: Sprite) -> SpriteId {
        let id = self.roster.len();
        let species = sprite.species();
        let alive = sprite.is_alive();
        self.roster.push(sprite);
        if alive {
            self.living_mut(species).insert(id);
        }
        id
    }

    pub fn get(&self, id: SpriteId) -> &Sprite {
        &self.roster[id]
    }

    pub(crate) fn get_mut(&mut self, id: SpriteId) -> &mut Sprite {
        &mut self.roster[id]
    }

    pub fn is_alive(&self, id: SpriteId) -> bool {
        self.roster.get(id).map_or(false, |s| s.is_alive())
    }

    pub fn living(&self, species: Species) -> &BTreeSet<SpriteId> {
        match species {
            Species::Elf => &self.elves,
            Species::Goblin => &self.goblins,
        }
    }

    fn living_mut(&mut self, species: Species) -> &mut BTreeSet<SpriteId> {
        match species {
            Species::Elf => &mut self.elves,
            Species::Goblin => &mut self.goblins,
        }
    }

    pub fn alive(&self, species: Species) -> usize {
        self.living(species).len()
    }

    /// Sprites of this species which have died since the map was built.
    pub fn casualties(&self, species: Species) -> usize {
        let spawned = self
            .roster
            .iter()
            .filter(|s| s.species() == species)
            .count();
        spawned - self.alive(species)
    }

    /// Living sprites, by id.
    pub fn iter(&self) -> impl Iterator<Item = (SpriteId, &Sprite)> {
        self.elves
            .iter()
            .chain(self.goblins.iter())
            .map(move |&id| (id, &self.roster[id]))
    }

    /// Living sprites, ordered by the reading order of their positions.
    pub fn in_reading_order(&self) -> Vec<SpriteId> {
        let mut ids: Vec<SpriteId> = self.iter().map(|(id, _)| id).collect();
        ids.sort_by_key(|&id| self.roster[id].position());
        ids
    }

    /// Apply damage to a sprite. The dead are dropped from
    /// their faction straight away.
    pub(crate) fn wound(&mut self, id: SpriteId, attack: Health) -> SpriteStatus {
        let status = self.roster[id].wound(attack);
        if let SpriteStatus::Dead(species) = status {
            self.living_mut(species).remove(&id);
        }
        status
    }

    pub fn set_attack(&mut self, species: Species, attack: Health) {
        for sprite in self.roster.iter_mut().filter(|s| s.species() == species) {
            sprite.arm(attack);
        }
    }

    pub fn score(&self) -> Score {
        self.iter().map(|(_, s)| Score::from(s.health())).sum()
    }
}
