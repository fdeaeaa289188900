#[macro_use]
extern crate serde_derive;

use std::fs;

use docopt::Docopt;
use failure::{format_err, Error};
use tracing::info;
use tracing_subscriber::EnvFilter;

use goblinwars::map::{Map, MapBuilder};
use goblinwars::sprite::{Health, Species, SpriteBuilder};
use goblinwars::{AttackSearch, Game, Scenario};

const USAGE: &str = "
Elves and goblins, fighting it out in the caves.

Usage:
    bandits [options] <input>
    bandits check <scenario>...
    bandits (-h | --help)

Options:
    -h --help           Show this screen.
    --health=<hp>       Starting hit points for every sprite [default: 200].
    --attack=<ap>       Starting attack power for every sprite [default: 3].
    --tune=<species>    Side to find a flawless attack power for [default: elves].
    --min-attack=<ap>   Weakest attack power to try when tuning [default: 4].
    --max-attack=<ap>   Strongest attack power to try when tuning [default: 200].
    --show              Print the map before every round.
";

#[derive(Debug, Deserialize)]
struct Args {
    cmd_check: bool,
    arg_input: Option<String>,
    arg_scenario: Vec<String>,
    flag_health: Health,
    flag_attack: Health,
    flag_tune: String,
    flag_min_attack: Health,
    flag_max_attack: Health,
    flag_show: bool,
}

fn species(name: &str) -> Result<Species, Error> {
    match name.to_lowercase().as_str() {
        "elf" | "elves" => Ok(Species::Elf),
        "goblin" | "goblins" => Ok(Species::Goblin),
        _ => name
            .parse::<Species>()
            .map_err(|_| format_err!("Can't tune unknown species: {}", name)),
    }
}

fn battle(args: &Args, map: &Map) -> Result<(), Error> {
    let mut game = Game::new(map.clone());

    let outcome = if args.flag_show {
        game.run_with(|game, round| {
            println!("Round {}:\n{}", round, game.map().status());
            Ok(())
        })?
    } else {
        game.run()?
    };

    println!("{}", game.map().status());
    println!("{}", outcome);
    println!("Part 1: {}", outcome.score);

    let tune = species(&args.flag_tune)?;
    let search = AttackSearch::new(map, tune, args.flag_min_attack..=args.flag_max_attack);
    let trial = search.run()?;

    info!(attack = trial.attack, "tuned");
    println!(
        "{} need {} attack power. {}",
        tune.plural(),
        trial.attack,
        trial.outcome
    );
    println!("Part 2: {}", trial.outcome.score);

    Ok(())
}

fn check(paths: &[String]) -> Result<(), Error> {
    let mut failures = 0;

    for path in paths {
        let scenario: Scenario = fs::read_to_string(path)?.parse()?;
        match scenario.check() {
            Ok(outcome) => println!("{}: ok ({})", path, outcome),
            Err(e) => {
                println!("{}: FAILED\n{}", path, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(format_err!("{} of {} scenarios failed", failures, paths.len()));
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    let args: Args = Docopt::new(USAGE)
        .and_then(|dopt| dopt.deserialize())
        .unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if args.cmd_check {
        return check(&args.arg_scenario);
    }

    let input = args
        .arg_input
        .as_ref()
        .ok_or_else(|| format_err!("No input map given"))?;

    let builder = MapBuilder::new(SpriteBuilder::new(args.flag_health, args.flag_attack));
    let map = builder.build(&fs::read_to_string(input)?)?;

    info!(
        width = map.width(),
        height = map.height(),
        elves = map.alive(Species::Elf),
        goblins = map.alive(Species::Goblin),
        "loaded {}",
        input
    );

    battle(&args, &map)
}
