#[cfg(test)]
#[path = "../../tests/unit/solver/telemetry_test.rs"]
mod telemetry_test;

use crate::models::common::Cost;
use crate::utils::InfoLogger;

/// Per-generation search statistics.
#[derive(Clone, Debug)]
pub struct SearchStatistics {
    /// Generation number, zero based.
    pub generation: usize,
    /// Size of the feasible sub-population.
    pub feasible_size: usize,
    /// Size of the infeasible sub-population.
    pub infeasible_size: usize,
    /// Best registered cost in the feasible sub-population.
    pub best_feasible: Option<Cost>,
    /// Best registered cost in the infeasible sub-population.
    pub best_infeasible: Option<Cost>,
    /// Fraction of feasible offspring since the search started.
    pub feasible_fraction: f64,
    /// Current penalty values: loads, time warp, excess distance, excess duration.
    pub penalties: Vec<Cost>,
}

/// Specifies how search progress is reported.
#[derive(Clone)]
pub enum TelemetryMode {
    /// No progress reporting.
    None,
    /// Logs progress via the given logger every `log_every` generations.
    OnlyLogging {
        /// An information logger.
        logger: InfoLogger,
        /// Generation interval between log lines.
        log_every: usize,
    },
}

/// Collects per-generation statistics and optionally reports them through a logger.
pub struct Telemetry {
    mode: TelemetryMode,
    statistics: Vec<SearchStatistics>,
    num_feasible: usize,
}

impl Telemetry {
    /// Creates a new instance of `Telemetry`.
    pub fn new(mode: TelemetryMode) -> Self {
        Self { mode, statistics: vec![], num_feasible: 0 }
    }

    /// Registers a generation outcome.
    pub fn on_generation(&mut self, mut statistics: SearchStatistics, offspring_feasible: bool) {
        self.num_feasible += usize::from(offspring_feasible);
        statistics.feasible_fraction = self.num_feasible as f64 / (statistics.generation + 1) as f64;

        if let TelemetryMode::OnlyLogging { logger, log_every } = &self.mode {
            if *log_every > 0 && statistics.generation % *log_every == 0 {
                let best = match (statistics.best_feasible, statistics.best_infeasible) {
                    (Some(feasible), _) => format!("best feasible {feasible}"),
                    (None, Some(infeasible)) => format!("best infeasible {infeasible}"),
                    (None, None) => "no solutions".to_string(),
                };

                (logger)(&format!(
                    "generation {}, population {}/{}, feasible fraction {:.2}, {}, penalties {:?}",
                    statistics.generation,
                    statistics.feasible_size,
                    statistics.infeasible_size,
                    statistics.feasible_fraction,
                    best,
                    statistics.penalties,
                ));
            }
        }

        self.statistics.push(statistics);
    }

    /// Returns all collected statistics.
    pub fn statistics(&self) -> &[SearchStatistics] {
        &self.statistics
    }

    /// Extracts the collected statistics, leaving the telemetry empty.
    pub fn take_statistics(&mut self) -> Vec<SearchStatistics> {
        std::mem::take(&mut self.statistics)
    }
}
