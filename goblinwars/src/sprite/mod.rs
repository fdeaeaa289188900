use std::fmt;
use std::str::FromStr;

use failure::Fail;

use crate::geometry::Point;

mod builder;
mod collection;

pub use self::builder::{SpriteBuilder, StatBuilder};
pub use self::collection::Sprites;

pub type Health = u32;

/// Sums and products of hit points, which can outgrow a single sprite's `Health`.
pub type Score = u64;

/// Index of a sprite in the roster of the map it was spawned on.
pub type SpriteId = usize;

#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum ParseSpeciesError {
    #[fail(display = "No characters to parse")]
    NoCharacters,

    #[fail(display = "Too many characters to parse: {}", _0)]
    TooManyCharacters(String),

    #[fail(display = "Unknown species: {}", _0)]
    UnknownSpecies(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Species {
    Elf,
    Goblin,
}

impl Species {
    pub fn is_enemy(self, other: Species) -> bool {
        self != other
    }

    pub fn enemy(self) -> Species {
        match self {
            Species::Elf => Species::Goblin,
            Species::Goblin => Species::Elf,
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Species::Elf => "Elves",
            Species::Goblin => "Goblins",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Species::Elf => write!(f, "E"),
            Species::Goblin => write!(f, "G"),
        }
    }
}

impl FromStr for Species {
    type Err = ParseSpeciesError;

    fn from_str(s: &str) -> Result<Self, ParseSpeciesError> {
        if s.is_empty() {
            return Err(ParseSpeciesError::NoCharacters);
        }
        if s.chars().count() != 1 {
            return Err(ParseSpeciesError::TooManyCharacters(s.to_string()));
        }

        match s {
            "E" => Ok(Species::Elf),
            "G" => Ok(Species::Goblin),
            _ => Err(ParseSpeciesError::UnknownSpecies(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteStatus {
    Alive(Health),
    Dead(Species),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    species: Species,
    position: Point,
    hit_points: Health,
    attack_power: Health,
}

impl Sprite {
    pub fn new(species: Species, position: Point, health: Health, attack: Health) -> Self {
        Self {
            species,
            position,
            hit_points: health,
            attack_power: attack,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub(crate) fn relocate(&mut self, position: Point) {
        self.position = position;
    }

    pub fn attack(&self) -> Health {
        self.attack_power
    }

    pub(crate) fn arm(&mut self, attack: Health) {
        self.attack_power = attack;
    }

    /// Hit points never drop below zero; a sprite at zero is dead.
    pub fn wound(&mut self, attack: Health) -> SpriteStatus {
        self.hit_points = self.hit_points.saturating_sub(attack);
        self.status()
    }

    pub fn status(&self) -> SpriteStatus {
        match self.hit_points {
            0 => SpriteStatus::Dead(self.species),
            h => SpriteStatus::Alive(h),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hit_points > 0
    }

    pub fn health(&self) -> Health {
        self.hit_points
    }

    pub fn is_enemy(&self, other: &Self) -> bool {
        self.species.is_enemy(other.species)
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn info(&self) -> SpriteInfo {
        SpriteInfo { sprite: self }
    }
}

pub struct SpriteInfo<'s> {
    sprite: &'s Sprite,
}

impl<'s> fmt::Display for SpriteInfo<'s> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.sprite.species, self.sprite.hit_points)
    }
}
