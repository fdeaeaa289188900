use std::cmp;
use std::fmt;
use std::ops::RangeInclusive;

pub type Position = i32;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Left,
    Direction::Right,
    Direction::Down,
];

impl Direction {
    /// Enumerates all directions of movement in "reading order",
    /// i.e. such that the resulting points are in reading order
    /// from the current position.
    pub fn all() -> impl Iterator<Item = Self> {
        DIRECTIONS.iter().cloned()
    }
}

/// A grid coordinate. Points order themselves in reading order:
/// top-to-bottom, then left-to-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: Position,
    pub y: Position,
}

impl Point {
    pub fn new(x: Position, y: Position) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Left => Self::new(self.x - 1, self.y),
            Direction::Right => Self::new(self.x + 1, self.y),
            Direction::Up => Self::new(self.x, self.y - 1),
            Direction::Down => Self::new(self.x, self.y + 1),
        }
    }

    /// Orthogonal neighbors, in reading order.
    pub fn adjacent(self) -> impl Iterator<Item = Self> {
        Direction::all().map(move |d| self.step(d))
    }
}

impl cmp::Ord for Point {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl cmp::PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    left: Position,
    right: Position,
    top: Position,
    bottom: Position,
}

impl BoundingBox {
    pub fn empty() -> Self {
        Self {
            left: Position::max_value(),
            right: Position::min_value(),
            top: Position::max_value(),
            bottom: Position::min_value(),
        }
    }

    pub fn include(&mut self, point: Point) {
        self.left = cmp::min(self.left, point.x);
        self.right = cmp::max(self.right, point.x);
        self.top = cmp::min(self.top, point.y);
        self.bottom = cmp::max(self.bottom, point.y);
    }

    pub fn is_empty(&self) -> bool {
        self.left > self.right || self.top > self.bottom
    }

    pub fn contains(&self, point: Point) -> bool {
        (point.x >= self.left)
            && (point.x <= self.right)
            && (point.y >= self.top)
            && (point.y <= self.bottom)
    }

    pub fn vertical(&self) -> RangeInclusive<Position> {
        self.top..=self.bottom
    }

    pub fn horizontal(&self) -> RangeInclusive<Position> {
        self.left..=self.right
    }

    pub fn width(&self) -> Position {
        if self.is_empty() {
            0
        } else {
            self.right - self.left + 1
        }
    }

    pub fn height(&self) -> Position {
        if self.is_empty() {
            0
        } else {
            self.bottom - self.top + 1
        }
    }

    pub fn left(&self) -> Position {
        self.left
    }

    pub fn top(&self) -> Position {
        self.top
    }
}
