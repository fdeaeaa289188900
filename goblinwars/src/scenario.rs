use std::num::ParseIntError;
use std::str::FromStr;

use failure::{format_err, Error, Fail};
use lazy_static::lazy_static;
use regex::Regex;

use crate::game::search::{AttackSearch, ATTACK_RANGE};
use crate::game::{Game, GameOutcome};
use crate::map::{Map, MapBuilder, ParseMapError};
use crate::sprite::{Health, Score, Species};

/// A worked example: a starting map, the map as it should look once
/// the fighting stops, and the numbers the fight should produce.
///
/// Scenarios with an attack power line are tuning problems. The
/// attack power is searched for, and the rest of the numbers describe
/// the flawless game it produces.
#[derive(Debug)]
pub struct Scenario {
    pub map: Map,
    outcome: String,
    rounds: u32,
    score: Score,
    health: Score,
    victor: Species,
    attack: Option<(Species, Health)>,
}

impl Scenario {
    pub fn attack(&self) -> Option<(Species, Health)> {
        self.attack
    }

    /// Play the scenario out, and complain about the first thing
    /// which doesn't match.
    pub fn check(&self) -> Result<GameOutcome, Error> {
        let (map, outcome) = match self.attack {
            None => {
                let mut game = Game::new(self.map.clone());
                let outcome = game.run()?;
                (game.into_map(), outcome)
            }
            Some((species, attack)) => {
                let trial = AttackSearch::new(&self.map, species, ATTACK_RANGE).run()?;
                if trial.attack != attack {
                    return Err(format_err!(
                        "Attack power doesn't match:\nGot: {} Expected: {}",
                        trial.attack,
                        attack
                    ));
                }
                (trial.map, trial.outcome)
            }
        };

        if map_ascii_trim(&map.status().to_string()) != map_ascii_trim(&self.outcome) {
            return Err(format_err!(
                "Outcome map doesn't match:\nGot:\n{}\nExpected:\n{}",
                map_ascii_trim(&map.status().to_string()),
                map_ascii_trim(&self.outcome)
            ));
        };

        if self.rounds != outcome.rounds {
            return Err(format_err!(
                "Rounds don't match:\nGot: {} Expected: {}",
                outcome.rounds,
                self.rounds
            ));
        }

        if Some(self.victor) != outcome.victors {
            return Err(format_err!(
                "Victor doesn't match:\nGot: {:?} Expected: {}",
                outcome.victors,
                self.victor.plural()
            ));
        }

        if self.health != outcome.health {
            return Err(format_err!(
                "Health doesn't match:\nGot: {} Expected: {}",
                outcome.health,
                self.health
            ));
        }

        if self.score != outcome.score {
            return Err(format_err!(
                "Score doesn't match:\nGot: {} Expected: {}",
                outcome.score,
                self.score
            ));
        }

        Ok(outcome)
    }
}

#[derive(Debug, Fail)]
pub enum ScenarioParseError {
    #[fail(display = "Invalid Map: {}", _0)]
    InvalidMap(ParseMapError),

    #[fail(display = "Invalid number: {}", _0)]
    InvalidNumber(ParseIntError),

    #[fail(display = "Invalid faction: {}", _0)]
    InvalidFaction(String),

    #[fail(display = "Missing Part: {}", _0)]
    MissingPart(String),

    #[fail(display = "Invalid Meta Line: {}", _0)]
    InvalidMeta(String),
}

impl From<ParseIntError> for ScenarioParseError {
    fn from(error: ParseIntError) -> Self {
        ScenarioParseError::InvalidNumber(error)
    }
}

fn faction(name: &str) -> Result<Species, ScenarioParseError> {
    match name {
        "Elves" => Ok(Species::Elf),
        "Goblins" => Ok(Species::Goblin),
        s => Err(ScenarioParseError::InvalidFaction(s.to_string())),
    }
}

impl FromStr for Scenario {
    type Err = ScenarioParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut map = Vec::new();
        let mut outcome = Vec::new();

        let mut lines = s.lines();

        for line in lines.by_ref() {
            lazy_static! {
                static ref RE: Regex = Regex::new(r"(#\S+)\s*(-->)?\s*(#.+)").unwrap();
            };

            let cap = match RE.captures(line) {
                None => {
                    break;
                }
                Some(cap) => cap,
            };

            map.push(cap[1].to_string());
            outcome.push(cap[3].to_string());
        }

        let map = map.join("\n");
        let outcome = outcome.join("\n");

        let mut rounds = None;
        let mut score = None;
        let mut health = None;
        let mut victor = None;
        let mut attack = None;

        for line in lines.map(|l| l.trim()).filter(|l| !l.is_empty()) {
            lazy_static! {
                static ref REROUNDS: Regex =
                    Regex::new(r"Combat ends after (\d+) full rounds").unwrap();
            };

            if let Some(cap) = REROUNDS.captures(line) {
                rounds = Some(cap[1].parse::<u32>()?);
                continue;
            };

            lazy_static! {
                static ref REVICTORY: Regex =
                    Regex::new(r"(\w+) win with (\d+) total hit points left").unwrap();
            };

            if let Some(cap) = REVICTORY.captures(line) {
                victor = Some(faction(&cap[1])?);
                health = Some(cap[2].parse::<Score>()?);
                continue;
            };

            lazy_static! {
                static ref REOUTCOME: Regex =
                    Regex::new(r"Outcome: ([\d]+) \* ([\d]+) = ([\d]+)").unwrap();
            };

            if let Some(cap) = REOUTCOME.captures(line) {
                rounds = Some(cap[1].parse::<u32>()?);
                health = Some(cap[2].parse::<Score>()?);
                score = Some(cap[3].parse::<Score>()?);
                continue;
            };

            lazy_static! {
                static ref REATTACK: Regex = Regex::new(r"(\w+) need (\d+) attack power").unwrap();
            };

            if let Some(cap) = REATTACK.captures(line) {
                attack = Some((faction(&cap[1])?, cap[2].parse::<Health>()?));
                continue;
            };

            return Err(ScenarioParseError::InvalidMeta(line.to_string()));
        }

        let rounds = rounds.ok_or_else(|| ScenarioParseError::MissingPart("rounds".to_owned()))?;
        let health = health.ok_or_else(|| ScenarioParseError::MissingPart("health".to_owned()))?;
        let score = score.ok_or_else(|| ScenarioParseError::MissingPart("score".to_owned()))?;
        let victor = victor.ok_or_else(|| ScenarioParseError::MissingPart("victor".to_owned()))?;

        let map: Map = MapBuilder::default()
            .build(&map)
            .map_err(ScenarioParseError::InvalidMap)?;

        Ok(Scenario {
            map,
            outcome,
            rounds,
            health,
            score,
            victor,
            attack,
        })
    }
}

/// Trim every line, and drop the blank ones, so maps can be
/// compared regardless of indentation or trailing padding.
pub fn map_ascii_trim(s: &str) -> String {
    let parts = s
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<&str>>();
    parts.join("\n")
}
