use std::fmt;

use failure::Error;
use tracing::{debug, trace};

use crate::map::Map;
use crate::sprite::{Score, Species};

pub mod round;
pub mod search;

pub use self::round::{Round, RoundError, RoundOutcome};

/// How a finished game came out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub victors: Option<Species>,
    pub rounds: u32,
    pub health: Score,
    pub score: Score,
    pub elves_lost: usize,
    pub goblins_lost: usize,
}

impl GameOutcome {
    pub fn tally(map: &Map, rounds: u32) -> Self {
        let health = map.score();
        Self {
            victors: map.victorious(),
            rounds,
            health,
            score: Score::from(rounds) * health,
            elves_lost: map.sprites().casualties(Species::Elf),
            goblins_lost: map.sprites().casualties(Species::Goblin),
        }
    }

    pub fn losses(&self, species: Species) -> usize {
        match species {
            Species::Elf => self.elves_lost,
            Species::Goblin => self.goblins_lost,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.victors {
            Some(victors) => write!(f, "{} win", victors.plural())?,
            None => write!(f, "Nobody wins")?,
        }
        write!(
            f,
            " after {} rounds for a total score of {}",
            self.rounds, self.score
        )
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    map: Map,
    rounds: u32,
}

impl Game {
    pub fn new(map: Map) -> Self {
        Self { map, rounds: 0 }
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn into_map(self) -> Map {
        self.map
    }

    /// Full rounds played so far.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn round(&mut self) -> Round {
        Round::new(&mut self.map)
    }

    pub fn run(&mut self) -> Result<GameOutcome, RoundError> {
        self.run_with(|_, _| Ok(()))
    }

    /// Play until one side is wiped out, calling `f` with the
    /// number of each round before it starts.
    pub fn run_with<F>(&mut self, mut f: F) -> Result<GameOutcome, RoundError>
    where
        F: FnMut(&Self, u32) -> Result<(), Error>,
    {
        while !self.map.combat_ended() {
            f(self, self.rounds + 1).map_err(RoundError::Interrupted)?;

            match self.round().play() {
                RoundOutcome::NoAction => return Err(RoundError::Stalemate(self.rounds)),
                RoundOutcome::MidRoundVictory(victors) => {
                    debug!(victors = victors.plural(), round = self.rounds + 1, "ended early");
                }
                outcome => {
                    self.rounds += 1;
                    trace!(round = self.rounds, ?outcome, "round");
                }
            }
        }

        let outcome = GameOutcome::tally(&self.map, self.rounds);
        debug!(%outcome, "finished");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::path::PathBuf;

    use crate::map::MapBuilder;
    use crate::scenario::map_ascii_trim;
    use crate::sprite::SpriteBuilder;

    fn combat_round(round: u32) -> Option<String> {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("scenarios")
            .join("combat")
            .join(format!("{}.txt", round));
        fs::read_to_string(path).ok()
    }

    #[test]
    fn combat() {
        let map = MapBuilder::default()
            .build(include_str!("../../scenarios/combat/initial.txt"))
            .unwrap();
        let mut game = Game::new(map);
        let mut checked = 0;

        let outcome = game
            .run_with(|game, round| {
                // The callback sees the map as it stood after the previous round.
                if let Some(expected) = combat_round(round - 1) {
                    assert_eq!(
                        map_ascii_trim(&game.map().status().to_string()),
                        map_ascii_trim(&expected),
                        "Map doesn't line up after round {}",
                        round - 1
                    );
                    checked += 1;
                }
                Ok(())
            })
            .unwrap();

        // The last elf falls at the very end of round 47, so no
        // 48th round ever starts.
        assert_eq!(checked, 9);
        assert_eq!(game.rounds(), 47);
        assert_eq!(
            map_ascii_trim(&game.map().status().to_string()),
            map_ascii_trim(&combat_round(47).unwrap())
        );
        assert_eq!(
            outcome,
            GameOutcome {
                victors: Some(Species::Goblin),
                rounds: 47,
                health: 590,
                score: 27730,
                elves_lost: 2,
                goblins_lost: 0,
            }
        );
        assert_eq!(
            outcome.to_string(),
            "Goblins win after 47 rounds for a total score of 27730"
        );
    }

    #[test]
    fn skirmish() {
        let raw_map = "#######
                       #E...G#
                       #.....#
                       #.....#
                       #.....#
                       #G...E#
                       #######";

        let play = || {
            let mut game = Game::new(MapBuilder::default().build(raw_map).unwrap());
            let outcome = game.run().unwrap();
            (outcome, game.into_map())
        };

        let (outcome, map) = play();
        assert!(outcome.rounds > 0);
        assert!(map.combat_ended());
        assert_eq!(outcome.victors, map.victorious());
        assert_eq!(outcome.health, map.score());
        assert_eq!(outcome.score, Score::from(outcome.rounds) * outcome.health);

        let victors = outcome.victors.unwrap();
        assert_eq!(outcome.losses(victors.enemy()), 2);
        assert_eq!(map.alive(victors) + outcome.losses(victors), 2);

        // Same map, same fight.
        let (again, again_map) = play();
        assert_eq!(again, outcome);
        assert_eq!(again_map.status().to_string(), map.status().to_string());
    }

    #[test]
    fn victory_mid_round() {
        let mut game = Game::new(
            MapBuilder::new(SpriteBuilder::default().with_health(Species::Goblin, 3))
                .build("#EGE#")
                .unwrap(),
        );

        let outcome = game.run().unwrap();
        assert_eq!(outcome.victors, Some(Species::Elf));
        assert_eq!(outcome.rounds, 0);
        assert_eq!(outcome.health, 400);
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn victory_last_turn() {
        let mut game = Game::new(
            MapBuilder::new(SpriteBuilder::default().with_health(Species::Goblin, 6))
                .build("#EGE#")
                .unwrap(),
        );

        let outcome = game.run().unwrap();
        assert_eq!(outcome.rounds, 1);
        assert_eq!(outcome.health, 397);
        assert_eq!(outcome.score, 397);
        assert_eq!(outcome.losses(Species::Goblin), 1);
        assert_eq!(outcome.losses(Species::Elf), 0);
    }

    #[test]
    fn already_over() {
        let mut game = Game::new(MapBuilder::default().build("#E.E#").unwrap());
        let outcome = game.run().unwrap();
        assert_eq!(outcome.rounds, 0);
        assert_eq!(outcome.victors, Some(Species::Elf));
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn nobody_wins() {
        let outcome = GameOutcome::tally(&MapBuilder::default().build("#...#").unwrap(), 0);
        assert_eq!(outcome.victors, None);
        assert_eq!(
            outcome.to_string(),
            "Nobody wins after 0 rounds for a total score of 0"
        );
    }

    #[test]
    fn huge_health() {
        // Neither the surviving hit points nor the score fit in a `Health`.
        let mut game = Game::new(
            MapBuilder::new(SpriteBuilder::new(4_000_000_000, 2_000_000_000))
                .build("#EGE#")
                .unwrap(),
        );

        let outcome = game.run().unwrap();
        assert_eq!(outcome.victors, Some(Species::Elf));
        assert_eq!(outcome.rounds, 1);
        assert_eq!(outcome.health, 6_000_000_000);
        assert_eq!(outcome.score, 6_000_000_000);
    }

    #[test]
    fn harmless() {
        let mut game = Game::new(
            MapBuilder::new(SpriteBuilder::new(200, 0))
                .build("#EG#")
                .unwrap(),
        );

        match game.run() {
            Err(RoundError::Stalemate(rounds)) => assert_eq!(rounds, 0),
            other => panic!("Expected a stalemate, got {:?}", other),
        }
    }

    #[test]
    fn stalemate() {
        let mut game = Game::new(MapBuilder::default().build("#E#G#").unwrap());
        match game.run() {
            Err(RoundError::Stalemate(rounds)) => assert_eq!(rounds, 0),
            other => panic!("Expected a stalemate, got {:?}", other),
        }
    }

    #[test]
    fn interrupted() {
        let mut game = Game::new(
            MapBuilder::default()
                .build(include_str!("../../scenarios/combat/initial.txt"))
                .unwrap(),
        );

        let result = game.run_with(|_, round| {
            if round > 3 {
                Err(failure::format_err!("Stopped at round {}", round))
            } else {
                Ok(())
            }
        });

        match result {
            Err(RoundError::Interrupted(e)) => assert_eq!(e.to_string(), "Stopped at round 4"),
            other => panic!("Expected an interruption, got {:?}", other),
        }
        assert_eq!(game.rounds(), 3);
    }
}
