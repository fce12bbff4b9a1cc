use std::time::Instant;

use mazewalk::{Maze, MazeConfig};

fn main() -> Result<(), mazewalk::MazeError> {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(10);

    let start = Instant::now();
    let mut unsolved = 0;
    for seed in 0..num_iters {
        let mut maze = Maze::new(MazeConfig::new(255, 255).with_seed(seed))?;
        if !maze.solve() {
            unsolved += 1;
        }
    }
    let elapsed = start.elapsed();
    println!(
        "{} mazes of 255x255 generated and solved in {:?} ({:?} each), {} unsolved",
        num_iters,
        elapsed,
        elapsed.checked_div(num_iters.max(1) as u32).unwrap_or_default(),
        unsolved
    );
    Ok(())
}
