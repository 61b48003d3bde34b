use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Arg, ArgAction, Command};
use knapsack_ga::ga::GaRunner;
use knapsack_ga::io::{load_config, load_items};
use tracing::Level;

fn cli() -> Command {
    Command::new("knapsack-ga")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Solve a 0/1 knapsack instance with a genetic algorithm")
        .arg(
            Arg::new("items")
                .long("items")
                .value_name("FILE")
                .help("Item list, one `<weight> <value>` pair per line")
                .default_value("value_weight.txt")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Settings file with capacity, population_count and mutation_rate")
                .default_value("config.txt")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("generations")
                .long("generations")
                .value_name("N")
                .help("Number of generations (overrides the settings file)")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .help("Random seed (overrides the settings file)")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log every generation")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let start = Instant::now();

    let items_path = matches
        .get_one::<PathBuf>("items")
        .context("missing --items")?;
    let config_path = matches
        .get_one::<PathBuf>("config")
        .context("missing --config")?;

    let catalog = load_items(items_path)
        .with_context(|| format!("loading items from {}", items_path.display()))?;
    let mut config = load_config(config_path)
        .with_context(|| format!("loading settings from {}", config_path.display()))?;
    if let Some(&generations) = matches.get_one::<usize>("generations") {
        config.max_generations = generations;
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(seed);
    }

    let result = GaRunner::run(&catalog, &config)?;

    let elapsed = start.elapsed();

    let values: Vec<u64> = result.population.iter().map(|c| c.total_value()).collect();
    let weights: Vec<u64> = result.population.iter().map(|c| c.total_weight()).collect();

    println!("All Individuals total Values:");
    println!("{values:?}");
    println!("All Individuals total Weights:");
    println!("{weights:?}");
    println!();
    match &result.best {
        Some(best) => {
            println!("Best Individual Value: {}", best.total_value());
            println!("Best Individual Chromosome: {}", best.chromosome_string());
        }
        None => println!("Best Individual Value: none (empty population)"),
    }
    println!();
    println!("Time: {:.6}s", elapsed.as_secs_f64());

    Ok(())
}
