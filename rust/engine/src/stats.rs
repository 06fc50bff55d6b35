use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Streaming accumulator for one numeric field (Welford).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    total: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, x: f64) {
        if self.count == 0 {
            self.min = x;
            self.max = x;
        } else {
            self.min = self.min.min(x);
            self.max = self.max.max(x);
        }
        self.count += 1;
        self.total += x;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Records `n` zero observations, used to back-fill a field first
    /// reported after some trials had already completed.
    pub fn push_zeros(&mut self, n: u64) {
        if n == 0 {
            return;
        }
        let zeros = RunningStats {
            count: n,
            mean: 0.0,
            m2: 0.0,
            total: 0.0,
            min: 0.0,
            max: 0.0,
        };
        self.merge(&zeros);
    }

    /// Count-weighted merge of two partial accumulators (Chan et al.).
    pub fn merge(&mut self, other: &RunningStats) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        let n_a = self.count as f64;
        let n_b = other.count as f64;
        let n = n_a + n_b;
        let delta = other.mean - self.mean;
        self.mean += delta * n_b / n;
        self.m2 += other.m2 + delta * delta * n_a * n_b / n;
        self.count += other.count;
        self.total += other.total;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample variance; zero with fewer than two observations.
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn std_error(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.std_dev() / (self.count as f64).sqrt()
        }
    }

    pub fn summary(&self) -> FieldSummary {
        FieldSummary {
            total: self.total,
            mean: self.mean,
            variance: self.variance(),
            std_dev: self.std_dev(),
            std_error: self.std_error(),
            min: self.min,
            max: self.max,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSummary {
    pub total: f64,
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub std_error: f64,
    pub min: f64,
    pub max: f64,
}

/// Aggregate over a completed (or early-stopped) run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStatistics {
    /// Trials actually completed
    pub iterations: u64,
    /// Trials asked for
    pub requested: u64,
    /// Set when the run stopped before `requested` trials
    pub partial: bool,
    pub seed: u64,
    pub counts: BTreeMap<String, u64>,
    pub percentages: BTreeMap<String, f64>,
    pub fields: BTreeMap<String, FieldSummary>,
    pub elapsed_secs: f64,
    pub iterations_per_sec: f64,
}

impl SimulationStatistics {
    pub fn count(&self, result: &str) -> u64 {
        self.counts.get(result).copied().unwrap_or(0)
    }

    pub fn percentage(&self, result: &str) -> f64 {
        self.percentages.get(result).copied().unwrap_or(0.0)
    }

    pub fn mean(&self, field: &str) -> Option<f64> {
        self.fields.get(field).map(|f| f.mean)
    }

    pub fn field(&self, field: &str) -> Option<&FieldSummary> {
        self.fields.get(field)
    }
}
