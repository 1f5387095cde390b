//! Headless statistics run: drives a full mission to completion against many
//! freshly generated simulated mazes and reports iteration counts. No
//! rendering, so this is the one to reach for when only the numbers matter.

use micromouse_nav::mission::Mission;
use micromouse_nav::sim::{self, GenerationAlgorithm, SimulatedActuator, SimulatedPerception};

const N: usize = 9;
const CAP: usize = N * N;

fn run_one(seed: u64) -> u64 {
    let truth = sim::generate::<N>(GenerationAlgorithm::RecursiveBacktrack, Some(seed));
    let mut mission: Mission<N, CAP> = Mission::new();
    let mut actuator = SimulatedActuator;

    let mut iterations = 0u64;
    while !mission.is_finished() {
        let pose = mission.pose();
        let mut perception = SimulatedPerception::new(&truth, pose.coord, pose.heading);
        mission
            .iterate(&mut actuator, &mut perception)
            .expect("navigation invariant violated against a freshly generated simulated maze");
        iterations += 1;
    }
    iterations
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args();
    args.next(); // skip executable name
    let num_mazes = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(200);

    let mut total = 0u64;
    let mut min = u64::MAX;
    let mut max = 0u64;
    for seed in 0..num_mazes {
        let iterations = run_one(seed);
        total += iterations;
        min = min.min(iterations);
        max = max.max(iterations);
        tracing::debug!(seed, iterations, "survey: maze complete");
    }

    println!("mazes surveyed: {num_mazes}");
    println!("mean iterations to finish: {:.1}", total as f64 / num_mazes as f64);
    println!("min iterations: {min}");
    println!("max iterations: {max}");
}
