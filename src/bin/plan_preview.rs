use std::env;

use anyhow::{anyhow, bail, Context, Result};
use periodic_challenge::catalog::{Catalog, ElementLookup, CHALLENGE_DAYS};
use periodic_challenge::progress::QuizStats;
use periodic_challenge::quiz::{
    generate_daily_quiz, generate_daily_set, generate_final_quiz, generate_quick_quiz, Difficulty,
};
use periodic_challenge::storage::{Persistence, Workspace};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<()> {
    pretty_env_logger::init();
    let args = CliArgs::parse()?;
    let workspace = Workspace::discover()?;
    let config = workspace.load_config()?;

    if args.stats {
        let history = workspace.history_store(&config).quiz_history()?;
        let stats = QuizStats::from_history(&history);
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let catalog = Catalog::builtin()?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let difficulty = args.difficulty.unwrap_or(config.quiz.difficulty);

    let plan = match args.kind {
        PlanKind::Final => generate_final_quiz(&catalog.all_elements(), &mut rng),
        PlanKind::Quick => generate_quick_quiz(&catalog, difficulty, &mut rng),
        PlanKind::Curated => generate_daily_set(&catalog, args.day, &mut rng),
        PlanKind::Daily => generate_daily_quiz(&catalog, args.day, difficulty, &mut rng),
    };

    if plan.is_empty() {
        log::warn!("no questions could be generated for {:?}", plan.mode);
    }
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

enum PlanKind {
    Daily,
    Curated,
    Quick,
    Final,
}

struct CliArgs {
    kind: PlanKind,
    day: u8,
    seed: Option<u64>,
    difficulty: Option<Difficulty>,
    stats: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut kind = PlanKind::Daily;
        let mut day = 1;
        let mut seed = None;
        let mut difficulty = None;
        let mut stats = false;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--day" => {
                    let value = args.next().context("Expected a day number after --day")?;
                    day = value
                        .parse()
                        .with_context(|| format!("Invalid day '{value}'"))?;
                    if !(1..=CHALLENGE_DAYS).contains(&day) {
                        bail!("Day must be between 1 and {CHALLENGE_DAYS}");
                    }
                }
                "--seed" => {
                    let value = args.next().context("Expected a number after --seed")?;
                    seed = Some(
                        value
                            .parse()
                            .with_context(|| format!("Invalid seed '{value}'"))?,
                    );
                }
                "--difficulty" => {
                    let value = args
                        .next()
                        .context("Expected easy, medium or hard after --difficulty")?;
                    difficulty = Some(parse_difficulty(&value)?);
                }
                "--curated" => kind = PlanKind::Curated,
                "--quick" => kind = PlanKind::Quick,
                "--final" => kind = PlanKind::Final,
                "--stats" => stats = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => {
                    return Err(anyhow!(
                        "Unknown argument '{other}'. Run with --help for usage instructions."
                    ));
                }
            }
        }
        Ok(Self {
            kind,
            day,
            seed,
            difficulty,
            stats,
        })
    }
}

fn parse_difficulty(value: &str) -> Result<Difficulty> {
    match value {
        "easy" => Ok(Difficulty::Easy),
        "medium" => Ok(Difficulty::Medium),
        "hard" => Ok(Difficulty::Hard),
        other => bail!("Unknown difficulty '{other}'"),
    }
}

fn print_usage() {
    println!("Periodic Table Challenge plan preview");
    println!("Prints a generated quiz plan as JSON.");
    println!("Usage: cargo run --bin plan_preview -- [options]");
    println!("Options:");
    println!("  --day <1-7>            Challenge day to draw elements from (default: 1)");
    println!("  --curated              Use the hand-authored set for the day");
    println!("  --quick                Ten random elements from the whole catalog");
    println!("  --final                Final challenge over every element");
    println!("  --difficulty <level>   easy, medium or hard (default: from config.toml)");
    println!("  --seed <n>             Seed the generator for a reproducible plan");
    println!("  --stats                Print statistics over the stored quiz history");
    println!("Set RUST_LOG=debug to see generation details.");
}
