use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::errors::SimulationError;
use crate::stats::{RunningStats, SimulationStatistics};
use crate::trial::TrialResult;

type BoxedError = Box<dyn Error + Send + Sync + 'static>;

/// Sequential Monte Carlo driver.
///
/// Owns one ChaCha20 stream seeded once; every trial receives `&mut` access
/// to it, so a run is fully reproducible from its seed. Trial records are
/// reduced as they arrive and never retained.
#[derive(Debug, Clone)]
pub struct MonteCarlo {
    rng: ChaCha20Rng,
    seed: u64,
    progress_interval: Option<u64>,
    declared: Vec<String>,
}

impl MonteCarlo {
    /// `None` draws a fresh seed from the OS-seeded thread rng; the value
    /// used is reported in the statistics either way.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random::<u64>);
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            seed,
            progress_interval: None,
            declared: Vec::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The run's stream, for setup that must be reproducible too (e.g. reel
    /// strips drawn before the first trial).
    pub fn rng_mut(&mut self) -> &mut ChaCha20Rng {
        &mut self.rng
    }

    /// Emit a progress event every `n` trials (default: every tenth of the run).
    pub fn with_progress_interval(mut self, n: u64) -> Self {
        self.progress_interval = Some(n.max(1));
        self
    }

    /// Ensures `name` appears in the statistics even when no trial reports it.
    pub fn declare_field(mut self, name: impl Into<String>) -> Self {
        self.declared.push(name.into());
        self
    }

    pub fn run<F, E>(&mut self, trial: F, iterations: u64) -> Result<SimulationStatistics, SimulationError>
    where
        F: FnMut(&mut ChaCha20Rng) -> Result<TrialResult, E>,
        E: Into<BoxedError>,
    {
        let never = AtomicBool::new(false);
        self.run_until(trial, iterations, &never)
    }

    /// Like [`MonteCarlo::run`], but checks `stop` before every trial. When it
    /// is set the statistics cover the completed trials only and are marked
    /// `partial`.
    pub fn run_until<F, E>(
        &mut self,
        mut trial: F,
        iterations: u64,
        stop: &AtomicBool,
    ) -> Result<SimulationStatistics, SimulationError>
    where
        F: FnMut(&mut ChaCha20Rng) -> Result<TrialResult, E>,
        E: Into<BoxedError>,
    {
        if iterations == 0 {
            return Err(SimulationError::InvalidIterations(iterations));
        }
        debug!(seed = self.seed, iterations, "starting simulation");

        let interval = self
            .progress_interval
            .unwrap_or_else(|| (iterations / 10).max(1));
        let mut acc = Accumulator::new(&self.declared);
        let started = Instant::now();

        for i in 0..iterations {
            if stop.load(Ordering::Relaxed) {
                warn!(completed = i, requested = iterations, "simulation stopped early");
                break;
            }
            let record = trial(&mut self.rng).map_err(|e| {
                let source = e.into();
                error!(trial = i, error = %source, "trial failed");
                SimulationError::Failure { trial: i, source }
            })?;
            acc.record(&record);

            let done = i + 1;
            if done % interval == 0 && done < iterations {
                let elapsed = started.elapsed().as_secs_f64();
                let eta = elapsed / done as f64 * (iterations - done) as f64;
                info!(
                    completed = done,
                    total = iterations,
                    percent = done as f64 * 100.0 / iterations as f64,
                    eta_secs = eta,
                    "simulation progress"
                );
            }
        }

        Ok(acc.finish(iterations, self.seed, started.elapsed().as_secs_f64()))
    }
}

/// Runs `trial` `iterations` times on a fresh driver seeded with `seed`.
pub fn run_simulation<F, E>(
    trial: F,
    iterations: u64,
    seed: Option<u64>,
) -> Result<SimulationStatistics, SimulationError>
where
    F: FnMut(&mut ChaCha20Rng) -> Result<TrialResult, E>,
    E: Into<BoxedError>,
{
    MonteCarlo::new(seed).run(trial, iterations)
}

struct Accumulator {
    completed: u64,
    counts: BTreeMap<String, u64>,
    fields: BTreeMap<String, RunningStats>,
}

impl Accumulator {
    fn new(declared: &[String]) -> Self {
        let fields = declared
            .iter()
            .map(|name| (name.clone(), RunningStats::new()))
            .collect();
        Self {
            completed: 0,
            counts: BTreeMap::new(),
            fields,
        }
    }

    fn record(&mut self, r: &TrialResult) {
        *self.counts.entry(r.result.clone()).or_insert(0) += 1;

        // Known fields first: a missing value counts as zero.
        for (name, stats) in self.fields.iter_mut() {
            stats.push(r.get(name).unwrap_or(0.0));
        }
        for (name, &value) in &r.fields {
            if !self.fields.contains_key(name) {
                let mut stats = RunningStats::new();
                stats.push_zeros(self.completed);
                stats.push(value);
                self.fields.insert(name.clone(), stats);
            }
        }
        self.completed += 1;
    }

    fn finish(self, requested: u64, seed: u64, elapsed_secs: f64) -> SimulationStatistics {
        let n = self.completed;
        let percentages = self
            .counts
            .iter()
            .map(|(k, &c)| (k.clone(), c as f64 * 100.0 / n as f64))
            .collect();
        // Declared fields nobody reported still need `n` zeros.
        let fields = self
            .fields
            .into_iter()
            .map(|(k, mut s)| {
                s.push_zeros(n - s.count());
                (k, s.summary())
            })
            .collect();
        SimulationStatistics {
            iterations: n,
            requested,
            partial: n < requested,
            seed,
            counts: self.counts,
            percentages,
            fields,
            elapsed_secs,
            iterations_per_sec: if elapsed_secs > 0.0 {
                n as f64 / elapsed_secs
            } else {
                0.0
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn zero_iterations_is_rejected() {
        let r = run_simulation(|_| Ok::<_, String>(TrialResult::new("x")), 0, Some(1));
        assert!(matches!(r, Err(SimulationError::InvalidIterations(0))));
    }

    #[test]
    fn late_fields_are_back_filled_with_zeros() {
        let mut i = 0;
        let stats = run_simulation(
            |_| {
                i += 1;
                let r = TrialResult::new("x");
                Ok::<_, String>(if i > 2 { r.with("bonus", 4.0) } else { r })
            },
            4,
            Some(3),
        )
        .unwrap();
        let bonus = stats.field("bonus").unwrap();
        assert!((bonus.mean - 2.0).abs() < 1e-12);
        assert_eq!(bonus.min, 0.0);
    }

    #[test]
    fn declared_field_without_reports_is_zero() {
        let stats = MonteCarlo::new(Some(5))
            .declare_field("payout")
            .run(|_| Ok::<_, String>(TrialResult::new("lose")), 3)
            .unwrap();
        assert_eq!(stats.mean("payout"), Some(0.0));
    }

    #[test]
    fn same_seed_same_statistics() {
        let trial = |rng: &mut ChaCha20Rng| {
            let x: f64 = rng.random();
            Ok::<_, String>(TrialResult::new(if x < 0.5 { "low" } else { "high" }).with("x", x))
        };
        let a = run_simulation(trial, 200, Some(11)).unwrap();
        let b = run_simulation(trial, 200, Some(11)).unwrap();
        assert_eq!(a.counts, b.counts);
        assert_eq!(a.fields, b.fields);
    }

    #[test]
    fn random_seed_is_reported() {
        let mc = MonteCarlo::new(None);
        let seed = mc.seed();
        let stats = MonteCarlo::new(Some(seed))
            .run(|_| Ok::<_, String>(TrialResult::new("x")), 1)
            .unwrap();
        assert_eq!(stats.seed, seed);
    }
}
