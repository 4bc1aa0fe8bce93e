//! Iteration and time budget for one search call.
//!
//! The controller counts completed iterations against the iteration cap,
//! polls wall-clock time between iterations against the timeout, and
//! lowers the UCT exploration weight as the deadline approaches so late
//! iterations concentrate on moves that already look good.

use std::time::{Duration, Instant};

use tracing::trace;

use super::config::{DecayStep, MCTSConfig, SearchBudget};
use super::stats::StopReason;

/// Budget and exploration-weight controller.
#[derive(Clone, Debug)]
pub struct BudgetController {
    budget: SearchBudget,
    timeout: Duration,
    /// Decay steps sorted by `at_fraction`.
    schedule: Vec<DecayStep>,
    initial_weight: f64,
    weight: f64,
    next_step: usize,
    started: Instant,
    iterations: u32,
}

impl BudgetController {
    /// Create a controller from a validated config. The clock starts now.
    pub fn new(config: &MCTSConfig) -> Self {
        let mut schedule = config.decay_schedule.clone();
        schedule.sort_by(|a, b| a.at_fraction.total_cmp(&b.at_fraction));

        Self {
            budget: config.budget,
            timeout: config.budget.timeout(),
            schedule,
            initial_weight: config.exploration_constant,
            weight: config.exploration_constant,
            next_step: 0,
            started: Instant::now(),
            iterations: 0,
        }
    }

    /// Restart the clock and reset the exploration weight. The iteration
    /// count is kept.
    pub fn restart_clock(&mut self) {
        self.started = Instant::now();
        self.weight = self.initial_weight;
        self.next_step = 0;
    }

    /// Current UCT exploration weight.
    #[must_use]
    pub fn exploration_weight(&self) -> f64 {
        self.weight
    }

    /// Completed iterations.
    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Time since the clock was last started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Whether the iteration cap is already reached.
    #[must_use]
    pub fn cap_reached(&self) -> bool {
        self.iterations >= self.budget.max_iterations
    }

    /// Record one completed iteration. Returns why the search must stop,
    /// or `None` to keep going.
    pub fn record_iteration(&mut self) -> Option<StopReason> {
        let elapsed = self.elapsed();
        self.record_iteration_after(elapsed)
    }

    fn record_iteration_after(&mut self, elapsed: Duration) -> Option<StopReason> {
        self.iterations = self.iterations.saturating_add(1);
        self.apply_decay(elapsed);

        if elapsed > self.timeout {
            Some(StopReason::Timeout)
        } else if self.cap_reached() {
            Some(StopReason::IterationCap)
        } else {
            None
        }
    }

    fn apply_decay(&mut self, elapsed: Duration) {
        let elapsed_secs = elapsed.as_secs_f64();

        while let Some(step) = self.schedule.get(self.next_step) {
            if elapsed_secs < self.budget.timeout_secs * step.at_fraction {
                break;
            }
            self.weight *= step.factor;
            self.next_step += 1;
            trace!(
                weight = self.weight,
                at_fraction = step.at_fraction,
                elapsed_ms = elapsed.as_millis() as u64,
                "exploration weight decayed"
            );
        }
    }
}
