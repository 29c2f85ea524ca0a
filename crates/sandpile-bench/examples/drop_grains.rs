//! Drop grains one at a time onto the centre of a small pile.
//!
//! Demonstrates: build a grid → stabilize → add grains between runs →
//! print the settled grid and the per-step metrics.
//!
//! Run with `RUST_LOG=sandpile_engine=debug` to see each step.

use sandpile_core::Grid;
use sandpile_engine::{EngineConfig, Sandpile};
use sandpile_render::TextGrid;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .without_time()
        .init();

    println!("=== Sandpile Drop Grains Example ===\n");

    let grid = Grid::new(7, 7).unwrap();
    let mut pile = Sandpile::new(grid, EngineConfig::default().with_cutoff(2)).unwrap();

    let mut avalanches = Vec::new();
    for grain in 1..=64 {
        pile.grid_mut().add(3, 3, 1);
        let summary = pile.stabilize();
        if summary.steps > 0 {
            avalanches.push((grain, summary.steps));
        }
    }

    print!("{}", TextGrid(pile.grid()));
    println!("Grains on the grid: {}", pile.grid().mass());
    println!("Avalanches (grain, steps):");
    for (grain, steps) in &avalanches {
        println!("  {grain:>3}  {steps}");
    }

    let m = pile.last_metrics();
    println!(
        "\nLast step: {} partitions, {}us update, changed = {}",
        m.partitions, m.update_us, m.changed
    );
}
