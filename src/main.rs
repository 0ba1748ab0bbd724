use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use ising2d::data::writer::append_measurement;
use ising2d::lattice::SpinLattice;
use ising2d::sampler::{sample, Schedule};

/// 2D Ising model Metropolis-Hastings simulation.
///
/// Equilibrates one lattice at one temperature and appends the estimated
/// per-site observables as one row of the result file. Sweep temperatures
/// by running it in a loop over --temperature with a shared --output, then
/// draw the figures with plot_observables.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Square lattice side length
    #[arg(long, default_value_t = 16)]
    length: usize,

    /// Nearest-neighbour coupling J
    #[arg(long, default_value_t = 1.0)]
    coupling: f64,

    /// Temperature in units of J / k_B
    #[arg(long)]
    temperature: f64,

    /// Number of attempted spin flips
    #[arg(long, default_value_t = 1_000_000)]
    steps: usize,

    /// Step index at which sampling begins
    #[arg(long, default_value_t = 500_000)]
    burn_in: usize,

    /// Sample at every step index divisible by this
    #[arg(long, default_value_t = 100)]
    sample_interval: usize,

    /// Result file to append to
    #[arg(long, default_value = "data.txt")]
    output: PathBuf,

    /// RNG seed; omit for OS entropy
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    ensure!(args.length >= 2, "lattice length must be at least 2");
    ensure!(args.temperature > 0.0, "temperature must be positive");

    let schedule = Schedule::new(args.steps, args.burn_in, args.sample_interval)
        .context("invalid sampling schedule")?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    info!(
        "L = {}, N = {}, J = {}, T = {}, steps = {}, burn-in = {}, interval = {}, samples = {}",
        args.length,
        args.length * args.length,
        args.coupling,
        args.temperature,
        args.steps,
        args.burn_in,
        args.sample_interval,
        schedule.planned_samples()
    );

    let mut lattice = SpinLattice::random(args.length, args.coupling, &mut rng);
    let measurement = sample(&mut lattice, args.temperature, &schedule, &mut rng);

    println!("E_per_spin = {:.10}", measurement.energy);
    println!("M_per_spin = {:.10}", measurement.magnetization);
    println!("C_per_spin = {:.10}", measurement.heat_capacity);
    println!("X_per_spin = {:.10}", measurement.susceptibility);
    println!("Time elapsed (in sec) = {:.10}", measurement.seconds);

    append_measurement(&args.output, &measurement)
        .with_context(|| format!("appending to {}", args.output.display()))?;
    Ok(())
}
