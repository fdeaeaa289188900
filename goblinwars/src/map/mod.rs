use std::convert::TryFrom;
use std::fmt;
use std::num::TryFromIntError;
use std::str::FromStr;

use failure::Fail;

mod combat;
mod pathfinding;
mod tile;

pub use self::pathfinding::{Pathfinder, SpritePath};
pub use self::tile::{Cell, ParseTileError, Tile};

use crate::geometry::{BoundingBox, Direction, Point, Position};
use crate::sprite::{
    Health, ParseSpeciesError, Score, Species, Sprite, SpriteBuilder, SpriteId, Sprites,
};

/// The battlefield: a fixed rectangle of cells, and the
/// sprites standing on them.
///
/// A cell is `Occupied` exactly when a living sprite stands
/// there. Every mutation in this module keeps that true.
#[derive(Debug, Clone)]
pub struct Map {
    bbox: BoundingBox,
    cells: Vec<Cell>,
    pub(crate) sprites: Sprites,
}

impl Map {
    /// A walled-in map of the given size, with no sprites.
    pub fn new(width: Position, height: Position) -> Self {
        let mut bbox = BoundingBox::empty();
        if width > 0 && height > 0 {
            bbox.include(Point::new(0, 0));
            bbox.include(Point::new(width - 1, height - 1));
        }
        let size = (bbox.width() * bbox.height()) as usize;
        Self {
            bbox,
            cells: vec![Cell::Wall; size],
            sprites: Sprites::new(),
        }
    }

    pub fn width(&self) -> Position {
        self.bbox.width()
    }

    pub fn height(&self) -> Position {
        self.bbox.height()
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    pub fn sprites(&self) -> &Sprites {
        &self.sprites
    }

    pub fn contains(&self, point: Point) -> bool {
        self.bbox.contains(point)
    }

    fn index(&self, point: Point) -> usize {
        assert!(
            self.contains(point),
            "{} is outside of the {}x{} map",
            point,
            self.width(),
            self.height()
        );
        let row = point.y - self.bbox.top();
        let column = point.x - self.bbox.left();
        (row * self.bbox.width() + column) as usize
    }

    pub fn cell(&self, point: Point) -> Cell {
        self.cells[self.index(point)]
    }

    pub(crate) fn set_cell(&mut self, point: Point, cell: Cell) {
        let index = self.index(point);
        self.cells[index] = cell;
    }

    pub fn sprite_at(&self, point: Point) -> Option<(SpriteId, &Sprite)> {
        self.cell(point)
            .sprite()
            .map(|id| (id, self.sprites.get(id)))
    }

    pub fn element(&self, point: Point) -> MapElement {
        match self.cell(point) {
            Cell::Wall => MapElement::Tile(Tile::Wall),
            Cell::Empty => MapElement::Tile(Tile::Empty),
            Cell::Occupied(id) => MapElement::Sprite(self.sprites.get(id).species()),
        }
    }

    /// In-bounds orthogonal neighbors which aren't walls.
    pub fn neighbors(&self, point: Point) -> impl Iterator<Item = Point> + '_ {
        point
            .adjacent()
            .filter(move |p| self.contains(*p) && self.cell(*p).is_passable())
    }

    /// Neighbors a sprite could step into right now.
    pub fn empty_neighbors(&self, point: Point) -> impl Iterator<Item = Point> + '_ {
        self.neighbors(point)
            .filter(move |p| self.cell(*p).is_empty())
    }

    pub(crate) fn spawn(&mut self, sprite: Sprite) -> SpriteId {
        let position = sprite.position();
        assert!(sprite.is_alive(), "Can't place a dead sprite at {}", position);
        assert!(
            self.cell(position).is_empty(),
            "Can't place a sprite on {:?} at {}",
            self.cell(position),
            position
        );
        let id = self.sprites.spawn(sprite);
        self.set_cell(position, Cell::Occupied(id));
        id
    }

    /// Move a sprite one square.
    pub(crate) fn step(&mut self, id: SpriteId, direction: Direction) -> Point {
        let origin = self.sprites.get(id).position();
        let destination = origin.step(direction);
        assert!(
            self.cell(destination).is_empty(),
            "Sprite at {} can't step into {:?} at {}",
            origin,
            self.cell(destination),
            destination
        );

        self.set_cell(origin, Cell::Empty);
        self.set_cell(destination, Cell::Occupied(id));
        self.sprites.get_mut(id).relocate(destination);
        destination
    }

    pub fn set_attack(&mut self, species: Species, attack: Health) {
        self.sprites.set_attack(species, attack);
    }

    /// Combat is over once either faction has nobody left standing.
    pub fn combat_ended(&self) -> bool {
        self.sprites.living(Species::Elf).is_empty()
            || self.sprites.living(Species::Goblin).is_empty()
    }

    /// The faction still standing, once its enemies are all gone.
    pub fn victorious(&self) -> Option<Species> {
        [Species::Elf, Species::Goblin]
            .iter()
            .cloned()
            .find(|&s| self.sprites.alive(s) > 0 && self.sprites.alive(s.enemy()) == 0)
    }

    pub fn alive(&self, species: Species) -> usize {
        self.sprites.alive(species)
    }

    pub fn score(&self) -> Score {
        self.sprites.score()
    }

    pub fn status(&self) -> MapStatusView {
        MapStatusView { map: self }
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in self.bbox.vertical() {
            for x in self.bbox.horizontal() {
                write!(f, "{}", self.element(Point::new(x, y)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Renders the map with the health of each row's sprites
/// listed to the right.
#[derive(Debug)]
pub struct MapStatusView<'m> {
    map: &'m Map,
}

impl<'m> fmt::Display for MapStatusView<'m> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut sprites = Vec::new();
        for y in self.map.bbox.vertical() {
            sprites.clear();
            for x in self.map.bbox.horizontal() {
                let point = Point::new(x, y);
                write!(f, "{}", self.map.element(point))?;
                if let Some((_, sprite)) = self.map.sprite_at(point) {
                    sprites.push(sprite.info().to_string());
                }
            }

            writeln!(f, "   {}", sprites.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum ParseMapError {
    #[fail(display = "Invalid Sprite: {}", _0)]
    InvalidSprite(ParseSpeciesError),

    #[fail(display = "Invalid Position: {}", _0)]
    InvalidPosition(TryFromIntError),

    #[fail(display = "Row {} is {} wide, expected {}", _0, _2, _1)]
    UnevenRow(usize, usize, usize),

    #[fail(display = "No rows to parse")]
    Empty,

    #[fail(display = "Sprite at {} would start with no hit points", _0)]
    Lifeless(Point),
}

impl From<TryFromIntError> for ParseMapError {
    fn from(error: TryFromIntError) -> Self {
        ParseMapError::InvalidPosition(error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapElement {
    Tile(Tile),
    Sprite(Species),
}

impl fmt::Display for MapElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MapElement::Tile(tile) => write!(f, "{}", tile),
            MapElement::Sprite(species) => write!(f, "{}", species),
        }
    }
}

impl FromStr for MapElement {
    type Err = ParseMapError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(tile) = s.parse::<Tile>() {
            return Ok(MapElement::Tile(tile));
        }
        s.parse::<Species>()
            .map(MapElement::Sprite)
            .map_err(ParseMapError::InvalidSprite)
    }
}

/// Parses maps, handing every sprite its starting stats.
#[derive(Debug, Clone, Default)]
pub struct MapBuilder {
    sprite: SpriteBuilder,
}

impl MapBuilder {
    pub fn new(sprite: SpriteBuilder) -> Self {
        Self { sprite }
    }

    pub fn build(&self, s: &str) -> Result<Map, ParseMapError> {
        let mut rows: Vec<Vec<MapElement>> = Vec::new();

        for line in s.lines().map(|l| l.trim()).filter(|l| !l.is_empty()) {
            let row = line
                .chars()
                .map(|c| c.to_string().parse::<MapElement>())
                .collect::<Result<Vec<_>, _>>()?;

            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(ParseMapError::UnevenRow(rows.len(), first.len(), row.len()));
                }
            }
            rows.push(row);
        }

        let width = rows.first().map(|r| r.len()).ok_or(ParseMapError::Empty)?;
        let mut map = Map::new(Position::try_from(width)?, Position::try_from(rows.len())?);

        for (y, row) in rows.into_iter().enumerate() {
            for (x, element) in row.into_iter().enumerate() {
                let point = Point::new(Position::try_from(x)?, Position::try_from(y)?);
                match element {
                    MapElement::Tile(tile) => map.set_cell(point, tile.into()),
                    MapElement::Sprite(species) => {
                        let sprite = self.sprite.build(species, point);
                        if !sprite.is_alive() {
                            return Err(ParseMapError::Lifeless(point));
                        }
                        map.set_cell(point, Cell::Empty);
                        map.spawn(sprite);
                    }
                }
            }
        }

        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::scenario::map_ascii_trim;

    macro_rules! example_map {
        ($n:expr) => {
            include_str!(concat!("../../scenarios/", $n, ".txt"))
        };
    }

    fn trim(s: &str) -> String {
        map_ascii_trim(s)
    }

    #[test]
    fn map() {
        let builder = MapBuilder::default();
        let raw_map = example_map!("simple");
        let example_map = builder.build(raw_map).unwrap();

        assert_eq!(trim(raw_map), trim(&example_map.to_string()));
        assert_eq!(example_map.sprites().len(), 7);
        assert_eq!(example_map.width(), 7);
        assert_eq!(example_map.height(), 5);
        assert_eq!(example_map.alive(Species::Elf), 4);
        assert_eq!(example_map.alive(Species::Goblin), 3);
    }

    #[test]
    fn status() {
        let map = MapBuilder::new(SpriteBuilder::default().with_health(Species::Goblin, 9))
            .build("#####\n#EG.#\n#...#\n#####")
            .unwrap();

        assert_eq!(
            trim(&map.status().to_string()),
            trim("#####\n#EG.#   E(200), G(9)\n#...#\n#####")
        );
    }

    #[test]
    fn parse_errors() {
        let builder = MapBuilder::default();

        assert_eq!(
            builder.build("####\n#E.G#\n####").unwrap_err(),
            ParseMapError::UnevenRow(1, 4, 5)
        );
        assert_eq!(
            builder.build("#X#").unwrap_err(),
            ParseMapError::InvalidSprite(ParseSpeciesError::UnknownSpecies("X".to_string()))
        );
        assert_eq!(builder.build("\n  \n").unwrap_err(), ParseMapError::Empty);

        let builder = MapBuilder::new(SpriteBuilder::default().with_health(Species::Goblin, 0));
        assert_eq!(
            builder.build("#E.G#").unwrap_err(),
            ParseMapError::Lifeless(Point::new(3, 0))
        );
        assert_eq!(builder.build("#E.E#").unwrap().alive(Species::Elf), 2);
    }

    #[test]
    #[should_panic]
    fn spawn_dead() {
        let mut map = MapBuilder::default().build("#..#").unwrap();
        let mut sprite = Sprite::new(Species::Goblin, Point::new(1, 0), 3, 3);
        sprite.wound(3);
        map.spawn(sprite);
    }

    #[test]
    fn cells() {
        let map = MapBuilder::default().build("#E.\n#.G").unwrap();

        assert_eq!(map.cell(Point::new(0, 0)), Cell::Wall);
        assert_eq!(map.cell(Point::new(2, 0)), Cell::Empty);
        match map.cell(Point::new(1, 0)) {
            Cell::Occupied(id) => {
                assert_eq!(map.sprites().get(id).species(), Species::Elf);
                assert_eq!(map.sprites().get(id).position(), Point::new(1, 0));
            }
            other => panic!("Expected an elf, got {:?}", other),
        }

        assert!(!map.contains(Point::new(3, 0)));
        assert!(!map.contains(Point::new(0, -1)));
    }

    #[test]
    #[should_panic]
    fn out_of_bounds() {
        let map = MapBuilder::default().build("#E.\n#.G").unwrap();
        map.cell(Point::new(3, 1));
    }

    #[test]
    fn neighbors() {
        let map = MapBuilder::default().build("E.#\n.G.\n#..").unwrap();

        // Corners have no neighbors beyond the edge of the map.
        assert_eq!(
            map.neighbors(Point::new(0, 0)).collect::<Vec<_>>(),
            vec![Point::new(1, 0), Point::new(0, 1)]
        );

        assert_eq!(
            map.neighbors(Point::new(1, 1)).collect::<Vec<_>>(),
            vec![
                Point::new(1, 0),
                Point::new(0, 1),
                Point::new(2, 1),
                Point::new(1, 2)
            ]
        );

        // The elf is in the way, and walls never count.
        assert_eq!(
            map.empty_neighbors(Point::new(1, 0)).collect::<Vec<_>>(),
            Vec::<Point>::new()
        );
        assert_eq!(
            map.empty_neighbors(Point::new(0, 1)).collect::<Vec<_>>(),
            Vec::<Point>::new()
        );
        assert_eq!(
            map.empty_neighbors(Point::new(2, 2)).collect::<Vec<_>>(),
            vec![Point::new(2, 1), Point::new(1, 2)]
        );
    }

    #[test]
    fn step() {
        let mut map = MapBuilder::default().build("#E.G#").unwrap();
        let (elf, _) = map.sprite_at(Point::new(1, 0)).unwrap();

        assert_eq!(map.step(elf, Direction::Right), Point::new(2, 0));
        assert_eq!(map.cell(Point::new(1, 0)), Cell::Empty);
        assert_eq!(map.cell(Point::new(2, 0)), Cell::Occupied(elf));
        assert_eq!(map.sprites().get(elf).position(), Point::new(2, 0));
        assert_eq!(trim(&map.to_string()), "#.EG#");
    }

    #[test]
    #[should_panic]
    fn step_into_sprite() {
        let mut map = MapBuilder::default().build("#EG#").unwrap();
        let (elf, _) = map.sprite_at(Point::new(1, 0)).unwrap();
        map.step(elf, Direction::Right);
    }

    #[test]
    fn combat_ended() {
        let map = MapBuilder::default().build("#E.G#").unwrap();
        assert!(!map.combat_ended());
        assert_eq!(map.victorious(), None);

        let map = MapBuilder::default().build("#E.E#").unwrap();
        assert!(map.combat_ended());
        assert_eq!(map.victorious(), Some(Species::Elf));

        let map = MapBuilder::default().build("#...#").unwrap();
        assert!(map.combat_ended());
        assert_eq!(map.victorious(), None);
    }
}
