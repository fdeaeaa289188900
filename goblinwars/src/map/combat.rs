use std::collections::BTreeSet;

use tracing::{debug, trace};

use super::{Cell, Map};
use crate::geometry::Point;
use crate::sprite::{Species, SpriteId, SpriteStatus};

impl Map {
    /// Living enemies standing next to this sprite, weakest first.
    /// Sprites with equal health are taken in reading order.
    pub fn enemies(&self, id: SpriteId) -> Vec<SpriteId> {
        let sprite = self.sprites.get(id);

        let mut enemies: Vec<SpriteId> = self
            .neighbors(sprite.position())
            .filter_map(|p| self.sprite_at(p))
            .filter(|(_, other)| sprite.is_enemy(other))
            .map(|(enemy, _)| enemy)
            .collect();

        enemies.sort_by_key(|&enemy| {
            let s = self.sprites.get(enemy);
            (s.health(), s.position())
        });
        enemies
    }

    /// Who should this sprite be attacking?
    pub fn target(&self, id: SpriteId) -> Option<SpriteId> {
        self.enemies(id).first().cloned()
    }

    /// The set of empty squares which are in range of
    /// an enemy of this species.
    pub fn target_points(&self, species: Species) -> BTreeSet<Point> {
        self.sprites
            .living(species.enemy())
            .iter()
            .flat_map(|&enemy| self.empty_neighbors(self.sprites.get(enemy).position()))
            .collect()
    }

    /// Hit the target with the aggressor's attack power. Corpses are
    /// cleared off the battlefield before this returns.
    pub(crate) fn attack(&mut self, aggressor: SpriteId, target: SpriteId) -> SpriteStatus {
        let power = self.sprites.get(aggressor).attack();
        let position = self.sprites.get(target).position();
        let status = self.sprites.wound(target, power);

        match status {
            SpriteStatus::Alive(health) => {
                trace!(%position, power, health, "attack");
            }
            SpriteStatus::Dead(species) => {
                debug!(%position, species = species.plural(), "casualty");
                self.set_cell(position, Cell::Empty);
            }
        }
        status
    }
}
