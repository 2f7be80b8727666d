//! `building-tour` command-line entry point.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use building_tour::{load_plan, Building, Config, Room};

/// Plan walking routes through a building described as a tree of rooms.
#[derive(Parser, Debug)]
#[command(name = "building-tour", version, about)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a JSON configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Refuse to plan routes for buildings with more rooms than this.
    #[arg(long, global = true)]
    max_rooms: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Route from a start room through every dead-end room.
    Route {
        /// CSV building plan.
        plan: PathBuf,
        #[arg(long)]
        start: String,
        /// Print the legs as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Path between two rooms.
    Path {
        plan: PathBuf,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Room and corridor counts, leaves, and the best connected rooms.
    Summary {
        plan: PathBuf,
        /// Number of rooms to list by corridor count.
        #[arg(long, default_value_t = 20)]
        top: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => Config::default(),
    }
    .with_max_rooms(cli.max_rooms);

    // -v wins over the config file, which wins over RUST_LOG
    let filter = match cli.verbose {
        0 => match &config.log_filter {
            Some(directive) => EnvFilter::new(directive),
            None => EnvFilter::from_default_env(),
        },
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Route { plan, start, json } => {
            let building = load(&plan)?;
            config.limits.check(&building)?;
            let route = building.shortest_path(&start)?;
            let legs = building.route_legs(&start)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&legs)?);
            } else {
                println!("Route from {}:", start);
                println!("{}", join(&route));
                println!("\nTotal distance: {}", building.path_distance(&route)?);
                println!("\nLegs:");
                for leg in &legs {
                    println!("{} -> {}: {}", leg.from, leg.to, leg.distance);
                }
            }
        }
        Commands::Path { plan, from, to } => {
            let building = load(&plan)?;
            let path = building.traversal(&from, &to)?;
            println!("{}", join(&path));
            println!("Distance: {}", building.path_distance(&path)?);
        }
        Commands::Summary { plan, top } => {
            let building = load(&plan)?;
            println!("Rooms: {}", building.number_of_rooms());
            println!("Corridors: {}", building.number_of_corridors());

            let first = building.rooms()[0].id();
            println!("\nLeaves by distance from {}:", first);
            for (room, distance) in building.leaves_from(first)? {
                println!("Room: {}, Distance: {}", room, distance);
            }

            println!("\nTop {} Rooms by Number of Corridors:", top);
            for (room, corridors) in building.degree_ranking().iter().take(top) {
                println!("Room: {}, Number of Corridors: {}", room, corridors);
            }
        }
    }

    Ok(())
}

fn load(plan: &Path) -> anyhow::Result<Building> {
    load_plan(plan).with_context(|| format!("loading building plan {}", plan.display()))
}

fn join(rooms: &[&Room]) -> String {
    rooms.iter().map(|r| r.id()).collect::<Vec<_>>().join(" -> ")
}
