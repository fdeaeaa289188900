use std::ops::RangeInclusive;

use failure::Fail;
use tracing::info;

use super::{Game, GameOutcome, RoundError};
use crate::map::Map;
use crate::sprite::{Health, Species};

/// Attack powers worth trying by default: anything stronger than
/// the usual 3, up to killing a fresh sprite in a single blow.
pub const ATTACK_RANGE: RangeInclusive<Health> = 4..=200;

#[derive(Debug, Fail)]
pub enum SearchError {
    #[fail(
        display = "{} lose someone at every attack power from {} to {}",
        _0, _1, _2
    )]
    Exhausted(&'static str, Health, Health),

    #[fail(display = "Attack power {} failed: {}", _0, _1)]
    Trial(Health, RoundError),
}

/// One complete game, played with a particular attack power.
#[derive(Debug, Clone)]
pub struct Trial {
    pub attack: Health,
    pub species: Species,
    pub outcome: GameOutcome,
    pub map: Map,
}

impl Trial {
    pub fn losses(&self) -> usize {
        self.outcome.losses(self.species)
    }

    pub fn is_flawless(&self) -> bool {
        self.losses() == 0
    }
}

/// Finds the smallest attack power that lets one species win
/// without a single death on their side.
///
/// Every trial starts from a fresh copy of the template map.
/// More attack power never costs more lives, so the range is
/// bisected rather than walked.
#[derive(Debug)]
pub struct AttackSearch<'m> {
    template: &'m Map,
    species: Species,
    attack: RangeInclusive<Health>,
}

impl<'m> AttackSearch<'m> {
    pub fn new(template: &'m Map, species: Species, attack: RangeInclusive<Health>) -> Self {
        Self {
            template,
            species,
            attack,
        }
    }

    pub fn trial(&self, attack: Health) -> Result<Trial, RoundError> {
        let mut map = self.template.clone();
        map.set_attack(self.species, attack);

        let mut game = Game::new(map);
        let outcome = game.run()?;

        info!(
            species = self.species.plural(),
            attack,
            losses = outcome.losses(self.species),
            score = outcome.score,
            "trial"
        );

        Ok(Trial {
            attack,
            species: self.species,
            outcome,
            map: game.into_map(),
        })
    }

    pub fn run(&self) -> Result<Trial, SearchError> {
        let (mut low, mut high) = (*self.attack.start(), *self.attack.end());
        let mut best = None;

        while low <= high {
            let attack = low + (high - low) / 2;
            let trial = self
                .trial(attack)
                .map_err(|e| SearchError::Trial(attack, e))?;

            if trial.is_flawless() {
                best = Some(trial);
                if attack == low {
                    break;
                }
                high = attack - 1;
            } else {
                match attack.checked_add(1) {
                    Some(next) => low = next,
                    None => break,
                }
            }
        }

        best.ok_or_else(|| {
            SearchError::Exhausted(
                self.species.plural(),
                *self.attack.start(),
                *self.attack.end(),
            )
        })
    }
}
