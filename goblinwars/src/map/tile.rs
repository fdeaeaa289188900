use std::fmt;
use std::str::FromStr;

use failure::Fail;

use crate::sprite::SpriteId;

#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum ParseTileError {
    #[fail(display = "No characters to parse")]
    NoCharacters,

    #[fail(display = "Unknown Tile: {}", _0)]
    UnknownTile(String),

    #[fail(display = "Too many characters to parse: {}", _0)]
    TooManyCharacters(String),
}

/// Static terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Wall,
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Tile::Empty => write!(f, "."),
            Tile::Wall => write!(f, "#"),
        }
    }
}

impl FromStr for Tile {
    type Err = ParseTileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseTileError::NoCharacters);
        }
        if s.chars().count() != 1 {
            return Err(ParseTileError::TooManyCharacters(s.to_string()));
        }

        match s {
            "." => Ok(Tile::Empty),
            "#" => Ok(Tile::Wall),
            _ => Err(ParseTileError::UnknownTile(s.to_string())),
        }
    }
}

/// Terrain plus occupancy for one square of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Empty,
    Occupied(SpriteId),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        match self {
            Cell::Empty => true,
            _ => false,
        }
    }

    pub fn is_passable(self) -> bool {
        self != Cell::Wall
    }

    pub fn sprite(self) -> Option<SpriteId> {
        match self {
            Cell::Occupied(id) => Some(id),
            _ => None,
        }
    }
}

impl From<Tile> for Cell {
    fn from(tile: Tile) -> Self {
        match tile {
            Tile::Empty => Cell::Empty,
            Tile::Wall => Cell::Wall,
        }
    }
}
