use std::{env::args, fs, process::ExitCode, sync::mpsc};

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use utils::{Pos, PosSet};
mod utils;

pub use world::{Cell, Grid, World};
pub mod world;

pub use sim::{LifeEngine, Sim, SimConfig, SimHandle};
mod sim;

pub use view::View;
mod view;

mod error;
mod pattern;

fn usage(program: &str) -> String {
    [
        "Just another implementation of Conway's Game of Life. Use simple txt files with \"O\"s for living cells and spaces for empty fields to create a start generation.".to_string(),
        "Some sample start generations are available in the samples/ directory.".to_string(),
        format!("Usage: {program} <path/to/start-generation.txt>"),
        format!("For example: {program} samples/glider.txt"),
    ]
    .join("\n")
}

/// the start generation path, or the usage text when the arguments don't fit.
fn path_arg(args: &[String]) -> Result<&str, String> {
    match args {
        [_, path] => Ok(path.as_str()),
        _ => {
            let program = args.first().map(String::as_str).unwrap_or("torus-life");
            Err(usage(program))
        }
    }
}

fn load(path: &str) -> anyhow::Result<Grid> {
    let content = fs::read_to_string(path).with_context(|| format!("could not read {path}"))?;
    let pattern = pattern::deserialize(&content);
    let grid = Grid::new(pattern.width, pattern.height, pattern.actives)
        .with_context(|| format!("{path} does not describe a valid start generation"))?;
    Ok(grid)
}

fn run(path: &str) -> anyhow::Result<Option<u64>> {
    let grid = load(path)?;
    let config = SimConfig::from_env();
    info!(path, ?config, "starting game");

    // one frame in flight, the simulation waits for a slow view
    let (sender, receiver) = mpsc::sync_channel(1);
    let simulation = Sim::spawn(LifeEngine::new(grid), config, sender);
    let view = View::spawn(receiver, simulation.handle());

    let ended = view.join();
    let generation = simulation.join();
    info!(generation, "game over");
    Ok(ended)
}

pub fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = args().collect();
    let path = match path_arg(&args) {
        Ok(path) => path,
        Err(usage) => {
            println!("{usage}");
            return ExitCode::FAILURE;
        }
    };

    match run(path) {
        Ok(Some(_)) => {
            println!("Game of Life has ended.");
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("[error] {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::WorldError, pos};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    fn sample(name: &str) -> String {
        format!("{}/samples/{name}", env!("CARGO_MANIFEST_DIR"))
    }

    #[test]
    fn test_usage_names_program() {
        let usage = usage("life");
        assert!(usage.contains("Usage: life <path/to/start-generation.txt>"));
        assert!(usage.contains("For example: life samples/glider.txt"));
    }

    #[test]
    fn test_path_arg() {
        assert_eq!(path_arg(&args(&["life", "samples/glider.txt"])), Ok("samples/glider.txt"));
        assert_eq!(path_arg(&args(&["life"])), Err(usage("life")));
        assert_eq!(path_arg(&args(&["life", "a.txt", "b.txt"])), Err(usage("life")));
        assert_eq!(path_arg(&[]), Err(usage("torus-life")));
    }

    #[test]
    fn test_load_missing_file() {
        let path = sample("does-not-exist.txt");
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("could not read"));
        assert!(err.downcast_ref::<std::io::Error>().is_some());
    }

    #[test]
    fn test_load_empty_file() {
        let path = std::env::temp_dir().join(format!("torus-life-empty-{}.txt", std::process::id()));
        fs::write(&path, "").unwrap();
        let result = load(path.to_str().unwrap());
        fs::remove_file(&path).unwrap();

        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<WorldError>(),
            Some(&WorldError::InvalidDimensions { width: 0, height: 1 })
        );
    }

    #[test]
    fn test_load_sample() {
        let grid = load(&sample("blinker.txt")).unwrap();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 5);
        assert_eq!(grid.actives(), vec![pos!(1, 2), pos!(2, 2), pos!(3, 2)]);
    }
}
