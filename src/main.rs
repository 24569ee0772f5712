//! Headless demo driver (default binary).
//!
//! Builds an engine, clicks a few cells, resolves each cascade to rest,
//! and prints the resulting event stream as JSON lines followed by a
//! final snapshot. Useful for eyeballing the simulation without any
//! renderer attached.
//!
//! Usage: tile-blast [seed] [clicks]

use anyhow::{Context, Result};

use tile_blast::{GridConfig, GridEngine, GridEvent};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed: u32 = match args.first() {
        Some(raw) => raw.parse().context("invalid seed argument")?,
        None => 1,
    };
    let clicks: usize = match args.get(1) {
        Some(raw) => raw.parse().context("invalid click count argument")?,
        None => 8,
    };

    let config = GridConfig::default();
    let mut engine = GridEngine::new(config.clone(), seed)?;
    print_events(engine.drain_events())?;

    // Walk the visible area diagonally; invalid or matchless clicks are
    // simply ignored by the engine.
    let mut resolved = 0usize;
    let mut probe = 0i32;
    while resolved < clicks && probe < config.width * config.visible_height {
        let x = probe % config.width;
        let y = (probe / config.width) % config.visible_height;
        probe += 1;

        engine.handle_click(x, y);
        let mut events = engine.drain_events();
        if events.is_empty() {
            continue;
        }
        engine.run_to_rest();
        events.extend(engine.drain_events());
        print_events(events)?;
        resolved += 1;
    }

    let snapshot = engine.snapshot();
    println!("{}", serde_json::to_string(&snapshot)?);
    eprintln!(
        "seed {} resolved {} clicks, {} cells on the board",
        seed,
        resolved,
        engine.grid().non_empty_count()
    );
    Ok(())
}

fn print_events(events: Vec<GridEvent>) -> Result<()> {
    for event in events {
        println!("{}", serde_json::to_string(&event)?);
    }
    Ok(())
}
