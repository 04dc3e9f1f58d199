use std::{error::Error, fs::read_to_string, path::PathBuf};

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use carbon_footprint_engine::{
    ActivityInput, CalculatorSession, EmissionsEngine, EngineConfig, Field,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON engine config; defaults to $CARBON_ENGINE_CONFIG or built-ins.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON activity snapshot; a sample commuter profile is used when absent.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Eco-task id to mark completed; repeatable.
    #[arg(long = "complete")]
    completed: Vec<u32>,
}

fn main() -> Result<(), Box<dyn Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::load()?,
    };
    let engine = EmissionsEngine::new(config)?;
    let mut session = CalculatorSession::new(engine.config());

    match &args.input {
        Some(path) => {
            let snapshot: ActivityInput = serde_json::from_str(&read_to_string(path)?)?;
            session.replace_input(snapshot);
        }
        None => {
            info!("No input given, using sample profile");
            session.set_field(Field::Voiture, "800");
            session.set_field(Field::Avion, "1200");
            session.set_field(Field::TransportsCommun, "150");
            session.set_field(Field::Electricite, "350");
            session.set_field(Field::Chauffage, "600");
            session.set_field(Field::Viande, "40");
            session.set_field(Field::Legumes, "60");
        }
    }

    for id in &args.completed {
        if session.complete_task(*id).is_none() {
            warn!("Unknown eco-task id {id}, ignoring");
        }
    }

    let result = session.evaluate(&engine)?;

    println!("total_kg_co2,{:.2}", result.total);
    println!(
        "tier,{:?},{},{}",
        result.tier,
        result.message,
        result.tier.color()
    );
    println!(
        "progress,{:.2},{:.0},{}",
        result.progress.fill_ratio, result.progress.target, result.progress.exceeded
    );
    println!("reduction_kg_co2,{:.2}", session.tasks().reduction());
    for entry in &result.breakdown {
        println!("breakdown,{},{:.2},{}", entry.category, entry.value, entry.color);
    }

    Ok(())
}
