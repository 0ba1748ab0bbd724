use std::time::Instant;

use log::debug;
use rand::Rng;
use thiserror::Error;

use crate::data::model::Measurement;
use crate::lattice::SpinLattice;

// ---------------------------------------------------------------------------
// Schedule – when to sample along the Markov chain
// ---------------------------------------------------------------------------

/// Errors from sampling-schedule validation.
#[derive(Debug, Error)]
pub enum SampleError {
    /// The sampling interval was zero.
    #[error("sampling interval must be positive")]
    ZeroInterval,
    /// No step index satisfies the sampling condition.
    #[error("no samples: {steps} steps, sampling from step {burn_in} every {interval}")]
    NoSamples {
        steps: usize,
        burn_in: usize,
        interval: usize,
    },
}

/// Sampling schedule along the Markov chain.
///
/// One step is one attempted single-spin flip. Step `i` is sampled when
/// `i >= burn_in` and `i % interval == 0`; the interval counts absolute
/// step indices, not steps since the burn-in ended.
#[derive(Debug, Clone, Copy)]
pub struct Schedule {
    steps: usize,
    burn_in: usize,
    interval: usize,
}

impl Schedule {
    /// Validate and build a schedule. Rejects a zero interval and any
    /// combination that samples nothing, so the observable estimates are
    /// never a division by zero.
    pub fn new(steps: usize, burn_in: usize, interval: usize) -> Result<Self, SampleError> {
        if interval == 0 {
            return Err(SampleError::ZeroInterval);
        }
        let schedule = Schedule {
            steps,
            burn_in,
            interval,
        };
        if schedule.planned_samples() == 0 {
            return Err(SampleError::NoSamples {
                steps,
                burn_in,
                interval,
            });
        }
        Ok(schedule)
    }

    /// Whether step `step` is a sampling step.
    pub fn samples_at(&self, step: usize) -> bool {
        step >= self.burn_in && step % self.interval == 0
    }

    /// Number of sampling steps the schedule hits. At least 1 for any
    /// schedule built through [`Schedule::new`].
    pub fn planned_samples(&self) -> usize {
        // First multiple of the interval at or after the burn-in.
        let first = self.burn_in.div_ceil(self.interval) * self.interval;
        if first >= self.steps {
            0
        } else {
            (self.steps - 1 - first) / self.interval + 1
        }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn burn_in(&self) -> usize {
        self.burn_in
    }

    pub fn interval(&self) -> usize {
        self.interval
    }
}

// ---------------------------------------------------------------------------
// MomentAccumulator – running first and second moments
// ---------------------------------------------------------------------------

/// Running sums for the first two moments of a sampled series.
#[derive(Debug, Default, Clone, Copy)]
struct MomentAccumulator {
    count: usize,
    sum: f64,
    sum_sq: f64,
}

impl MomentAccumulator {
    fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_sq += value * value;
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }

    /// Population variance `<x^2> - <x>^2`.
    fn variance(&self) -> f64 {
        let mean = self.mean();
        self.sum_sq / self.count as f64 - mean * mean
    }
}

// ---------------------------------------------------------------------------
// Metropolis-Hastings loop
// ---------------------------------------------------------------------------

/// Run the Metropolis-Hastings chain on `lattice` at `temperature` and
/// estimate the four per-site observables.
///
/// Acceptance follows `min[1, exp(-dE/T)]`: a flip that lowers the energy
/// is always accepted, any other flip with probability `exp(-dE/T)`. A
/// rejected step contributes the unchanged running totals to the sample
/// sums. The magnetization estimate keeps its sign; plots take the
/// magnitude.
pub fn sample(
    lattice: &mut SpinLattice,
    temperature: f64,
    schedule: &Schedule,
    rng: &mut impl Rng,
) -> Measurement {
    let size = lattice.size();
    let n_sites = lattice.n_sites() as f64;

    let mut energy_total = lattice.total_energy();
    let mut magnetization_total = lattice.total_magnetization();

    let mut energy = MomentAccumulator::default();
    let mut magnetization = MomentAccumulator::default();

    let start = Instant::now();
    for step in 0..schedule.steps() {
        let row = rng.random_range(0..size);
        let col = rng.random_range(0..size);
        let (d_energy, d_magnetization) = lattice.flip_delta(row, col);

        // Accept with probability min[1, exp(-dE/T)]; the uniform is
        // drawn only for uphill moves.
        if d_energy < 0.0 || rng.random::<f64>() <= (-d_energy / temperature).exp() {
            lattice.flip(row, col);
            energy_total += d_energy;
            magnetization_total += d_magnetization;
        }

        if schedule.samples_at(step) {
            energy.push(energy_total);
            magnetization.push(magnetization_total);
        }
    }
    let seconds = start.elapsed().as_secs_f64();

    debug!(
        "took {} samples over {} steps in {seconds:.3} s",
        energy.count,
        schedule.steps()
    );

    Measurement {
        temperature,
        coupling: lattice.coupling(),
        energy: energy.mean() / n_sites,
        magnetization: magnetization.mean() / n_sites,
        heat_capacity: energy.variance() / (temperature * temperature * n_sites),
        susceptibility: magnetization.variance() / (temperature * n_sites),
        seconds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn schedule_rejects_degenerate_inputs() {
        assert!(matches!(
            Schedule::new(100, 0, 0),
            Err(SampleError::ZeroInterval)
        ));
        assert!(matches!(
            Schedule::new(10, 10, 1),
            Err(SampleError::NoSamples { .. })
        ));
        assert!(matches!(
            Schedule::new(10, 5, 20),
            Err(SampleError::NoSamples { .. })
        ));
        assert!(matches!(
            Schedule::new(0, 0, 1),
            Err(SampleError::NoSamples { .. })
        ));
    }

    #[test]
    fn planned_samples_counts_absolute_step_indices() {
        // Steps 0, 3, 6, 9.
        let schedule = Schedule::new(10, 0, 3).unwrap();
        assert_eq!(schedule.planned_samples(), 4);

        // Burn-in 4 pushes the first sample to step 6, then 9.
        let schedule = Schedule::new(10, 4, 3).unwrap();
        assert_eq!(schedule.planned_samples(), 2);
        assert!(!schedule.samples_at(3));
        assert!(schedule.samples_at(6));
        assert!(!schedule.samples_at(7));
        assert!(schedule.samples_at(9));
    }

    #[test]
    fn accumulator_computes_population_moments() {
        let mut acc = MomentAccumulator::default();
        for v in [1.0, 2.0, 3.0, 4.0] {
            acc.push(v);
        }
        assert_eq!(acc.count, 4);
        assert!((acc.mean() - 2.5).abs() < 1e-12);
        assert!((acc.variance() - 1.25).abs() < 1e-12);
    }

    #[test]
    fn cold_start_stays_ordered_well_below_critical() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut lattice = SpinLattice::aligned(16, 1.0);
        let schedule = Schedule::new(200_000, 100_000, 10).unwrap();

        let m = sample(&mut lattice, 1.0, &schedule, &mut rng);
        assert!(m.magnetization.abs() > 0.9);
        assert!(m.energy < -1.8);
        assert!(m.energy >= -2.0);
        assert!(m.heat_capacity >= 0.0);
        assert!(m.susceptibility >= 0.0);
    }

    #[test]
    fn hot_lattice_disorders() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut lattice = SpinLattice::aligned(16, 1.0);
        let schedule = Schedule::new(400_000, 200_000, 20).unwrap();

        let m = sample(&mut lattice, 100.0, &schedule, &mut rng);
        assert!(m.magnetization.abs() < 0.2);
        assert!(m.energy.abs() < 0.4);
    }

    #[test]
    fn seeded_runs_reproduce() {
        let schedule = Schedule::new(50_000, 10_000, 10).unwrap();

        let run = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut lattice = SpinLattice::random(8, 1.0, &mut rng);
            sample(&mut lattice, 2.5, &schedule, &mut rng)
        };

        let a = run(42);
        let b = run(42);
        assert_eq!(a.energy, b.energy);
        assert_eq!(a.magnetization, b.magnetization);
        assert_eq!(a.heat_capacity, b.heat_capacity);
        assert_eq!(a.susceptibility, b.susceptibility);
    }
}
