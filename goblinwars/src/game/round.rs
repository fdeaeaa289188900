use std::collections::VecDeque;

use failure::{Error, Fail};
use tracing::trace;

use crate::map::{Map, Pathfinder, SpritePath};
use crate::sprite::{Species, SpriteId, SpriteStatus};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundOutcome {
    NoAction,
    CombatOnly,
    Casualty(Species),
    Movement,
    MidRoundVictory(Species),
    Victory(Species),
}

impl RoundOutcome {
    fn combat(self) -> Self {
        match self {
            RoundOutcome::NoAction => RoundOutcome::CombatOnly,
            others => others,
        }
    }

    fn movement(self) -> Self {
        match self {
            RoundOutcome::NoAction => RoundOutcome::Movement,
            RoundOutcome::CombatOnly => RoundOutcome::Movement,
            others => others,
        }
    }

    fn casualty(self, species: Species) -> Self {
        match self {
            RoundOutcome::CombatOnly => RoundOutcome::Casualty(species),
            RoundOutcome::NoAction => RoundOutcome::Casualty(species),
            RoundOutcome::Movement => RoundOutcome::Casualty(species),
            others => others,
        }
    }

    fn is_finished(self) -> bool {
        match self {
            RoundOutcome::CombatOnly => false,
            RoundOutcome::Movement => false,
            RoundOutcome::Casualty(_) => false,
            RoundOutcome::NoAction => false,
            _ => true,
        }
    }

    /// Did every sprite get its turn?
    pub fn is_complete(self) -> bool {
        match self {
            RoundOutcome::MidRoundVictory(_) => false,
            _ => true,
        }
    }
}

#[derive(Debug, Fail)]
pub enum RoundError {
    #[fail(display = "No moves remain on the map after {} rounds.", _0)]
    Stalemate(u32),

    #[fail(display = "Game interrupted: {}", _0)]
    Interrupted(Error),
}

/// One pass over every sprite that was alive when the round began,
/// in the reading order of where they stood at the time.
pub struct Round<'m> {
    map: &'m mut Map,
    queue: VecDeque<SpriteId>,
}

impl<'m> Round<'m> {
    pub fn new(map: &'m mut Map) -> Self {
        let queue = map.sprites.in_reading_order().into_iter().collect();
        Self { map, queue }
    }

    pub fn play(mut self) -> RoundOutcome {
        let mut outcome = RoundOutcome::NoAction;

        while (!self.queue.is_empty()) && (!outcome.is_finished()) {
            outcome = self.tick(outcome);
        }

        // Everyone had their turn, so the round counts even
        // if the last enemy fell during it.
        if !outcome.is_finished() {
            if let Some(victor) = self.map.victorious() {
                return RoundOutcome::Victory(victor);
            }
        }

        outcome
    }

    fn path(&self, id: SpriteId) -> Option<SpritePath> {
        if self.map.target(id).is_none() {
            Pathfinder::new(self.map).find_path(id)
        } else {
            None
        }
    }

    pub fn tick(&mut self, outcome: RoundOutcome) -> RoundOutcome {
        let mut outcome = outcome;

        let id = match self.queue.pop_front() {
            Some(id) => id,
            None => return outcome,
        };

        // Sprites killed earlier in the round don't get a turn.
        if !self.map.sprites.is_alive(id) {
            return outcome;
        }

        if let Some(victor) = self.map.victorious() {
            return RoundOutcome::MidRoundVictory(victor);
        }

        // First, the pathfinding phase
        if let Some(path) = self.path(id) {
            let from = self.map.sprites.get(id).position();
            let to = self.map.step(id, path.direction());
            trace!(
                %from,
                %to,
                destination = %path.destination(),
                distance = path.distance(),
                "move"
            );
            outcome = outcome.movement();
        }

        // Next, the attack phase. A blow that does no damage changes nothing.
        if let Some(target) = self.map.target(id) {
            let power = self.map.sprites.get(id).attack();
            outcome = match self.map.attack(id, target) {
                SpriteStatus::Alive(_) if power == 0 => outcome,
                SpriteStatus::Alive(_) => outcome.combat(),
                SpriteStatus::Dead(species) => outcome.casualty(species),
            };
        }

        outcome
    }
}
