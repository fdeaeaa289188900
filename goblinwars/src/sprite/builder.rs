use std::collections::HashMap;

use super::{Health, Species, Sprite};
use crate::geometry::Point;

/// A stat builder, which provides default
/// stats for sprites based on the sprite's
/// species
#[derive(Debug, Clone)]
pub struct StatBuilder {
    default: Health,
    species: HashMap<Species, Health>,
}

impl StatBuilder {
    pub fn new(default: Health) -> Self {
        Self {
            default,
            species: HashMap::new(),
        }
    }

    pub fn for_species(mut self, species: Species, stat: Health) -> Self {
        self.species.insert(species, stat);
        self
    }

    pub fn get(&self, species: Species) -> Health {
        *self.species.get(&species).unwrap_or(&self.default)
    }
}

#[derive(Debug, Clone)]
pub struct SpriteBuilder {
    health: StatBuilder,
    attack: StatBuilder,
}

impl Default for SpriteBuilder {
    fn default() -> Self {
        Self::new(200, 3)
    }
}

impl SpriteBuilder {
    pub fn new(health: Health, attack: Health) -> Self {
        Self {
            health: StatBuilder::new(health),
            attack: StatBuilder::new(attack),
        }
    }

    pub fn with_health(mut self, species: Species, health: Health) -> Self {
        self.health = self.health.for_species(species, health);
        self
    }

    pub fn with_attack(mut self, species: Species, attack: Health) -> Self {
        self.attack = self.attack.for_species(species, attack);
        self
    }

    pub fn build(&self, species: Species, position: Point) -> Sprite {
        Sprite::new(
            species,
            position,
            self.health.get(species),
            self.attack.get(species),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let origin = Point::new(0, 0);
        let b = SpriteBuilder::default();
        assert_eq!(
            b.build(Species::Elf, origin),
            Sprite::new(Species::Elf, origin, 200, 3)
        );
        assert_eq!(
            b.build(Species::Goblin, origin),
            Sprite::new(Species::Goblin, origin, 200, 3)
        );

        let b = b
            .with_attack(Species::Elf, 6)
            .with_health(Species::Goblin, 100);
        assert_eq!(
            b.build(Species::Elf, origin),
            Sprite::new(Species::Elf, origin, 200, 6)
        );
        assert_eq!(
            b.build(Species::Goblin, origin),
            Sprite::new(Species::Goblin, origin, 100, 3)
        );
    }

    #[test]
    fn custom_defaults() {
        let b = SpriteBuilder::new(10, 1).with_attack(Species::Goblin, 2);
        assert_eq!(b.build(Species::Elf, Point::new(1, 1)).health(), 10);
        assert_eq!(b.build(Species::Elf, Point::new(1, 1)).attack(), 1);
        assert_eq!(b.build(Species::Goblin, Point::new(1, 1)).attack(), 2);
    }
}
