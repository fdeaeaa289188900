use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap, VecDeque};

use super::Map;
use crate::geometry::{Direction, Point, Position};
use crate::sprite::SpriteId;

/// Where a sprite is headed, and which way it steps to get there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpritePath {
    destination: Point,
    direction: Direction,
    distance: Position,
}

impl SpritePath {
    pub fn new(destination: Point, direction: Direction, distance: Position) -> Self {
        Self {
            destination,
            direction,
            distance,
        }
    }

    pub fn destination(&self) -> Point {
        self.destination
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn distance(&self) -> Position {
        self.distance
    }
}

/// Breadth-first routing over the empty squares of a map.
///
/// Routing happens in two passes. The first floods outward from
/// the sprite to find the nearest destination (ties go to the
/// destination first in reading order). The second floods back
/// from that destination to find which of the sprite's neighbors
/// sit on a shortest path (ties go to the neighbor first in
/// reading order). Discovery order never breaks a tie.
#[derive(Debug)]
pub struct Pathfinder<'m> {
    map: &'m Map,
}

impl<'m> Pathfinder<'m> {
    pub fn new(map: &'m Map) -> Self {
        Self { map }
    }

    /// Distance from the origin to every empty square reachable from it,
    /// going no further than `limit` steps.
    pub fn distances(&self, origin: Point, limit: Position) -> HashMap<Point, Position> {
        let mut distances = HashMap::new();
        distances.insert(origin, 0);

        let mut frontier = VecDeque::new();
        frontier.push_back((origin, 0));

        while let Some((point, distance)) = frontier.pop_front() {
            if distance >= limit {
                continue;
            }
            for neighbor in self.map.empty_neighbors(point) {
                if let Entry::Vacant(e) = distances.entry(neighbor) {
                    e.insert(distance + 1);
                    frontier.push_back((neighbor, distance + 1));
                }
            }
        }

        distances
    }

    /// The first step from `origin` towards the nearest of the destinations.
    pub fn route(&self, origin: Point, destinations: &BTreeSet<Point>) -> Option<SpritePath> {
        let outbound = self.distances(origin, Position::max_value());

        let (distance, destination) = destinations
            .iter()
            .filter_map(|p| outbound.get(p).map(|&d| (d, *p)))
            .min()?;

        if distance == 0 {
            return None;
        }

        let inbound = self.distances(destination, distance - 1);

        Direction::all()
            .map(|d| (origin.step(d), d))
            .filter(|(p, _)| inbound.get(p) == Some(&(distance - 1)))
            .min_by_key(|&(p, _)| p)
            .map(|(_, direction)| SpritePath::new(destination, direction, distance))
    }

    /// Find a path between the sprite and the nearest square in range
    /// of one of its enemies.
    ///
    /// Panics if the sprite is already in range of an enemy.
    pub fn find_path(&self, id: SpriteId) -> Option<SpritePath> {
        assert!(
            self.map.target(id).is_none(),
            "Sprite at {} is already in range of an enemy",
            self.map.sprites.get(id).position()
        );

        let sprite = self.map.sprites.get(id);
        let targets = self.map.target_points(sprite.species());
        self.route(sprite.position(), &targets)
    }
}
