//! MCTS configuration parameters.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by configuration validation and parsing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("exploration constant must be finite and positive, got {0}")]
    InvalidExploration(f64),

    #[error("decay step fraction must be in (0, 1], got {0}")]
    InvalidDecayFraction(f64),

    #[error("decay step factor must be in (0, 1], got {0}")]
    InvalidDecayFactor(f64),

    #[error("arrow resample limit must be at least 1")]
    ZeroResampleLimit,

    #[error("iteration cap must be at least 1")]
    ZeroIterations,

    #[error("timeout must be finite and non-negative, got {0} seconds")]
    InvalidTimeout(f64),

    #[error("unknown difficulty level: {0:?}")]
    UnknownDifficulty(String),
}

/// Named strength levels, each mapping to an iteration cap and a timeout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    #[serde(rename = "god")]
    GodMode,
}

impl Difficulty {
    /// Iteration cap and wall-clock timeout for this level.
    #[must_use]
    pub fn budget(self) -> SearchBudget {
        match self {
            Difficulty::Easy => SearchBudget::new(1_000, 5.0),
            Difficulty::Normal => SearchBudget::new(10_000, 30.0),
            Difficulty::Hard => SearchBudget::new(100_000, 90.0),
            Difficulty::GodMode => SearchBudget::new(u32::MAX, 120.0),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            "god" | "godmode" | "god_mode" => Ok(Difficulty::GodMode),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::GodMode => "god",
        };
        f.write_str(name)
    }
}

/// Hard limits on one search call. Whichever is hit first ends the search.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchBudget {
    /// Maximum number of completed iterations.
    pub max_iterations: u32,

    /// Wall-clock limit in seconds, polled between iterations.
    pub timeout_secs: f64,
}

impl SearchBudget {
    #[must_use]
    pub const fn new(max_iterations: u32, timeout_secs: f64) -> Self {
        Self {
            max_iterations,
            timeout_secs,
        }
    }

    /// The timeout as a `Duration`. Call only on a validated budget.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_secs).unwrap_or(Duration::MAX)
    }

    /// Check both limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if !self.timeout_secs.is_finite() || self.timeout_secs < 0.0 {
            return Err(ConfigError::InvalidTimeout(self.timeout_secs));
        }
        Ok(())
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Difficulty::default().budget()
    }
}

/// One step of the exploration-decay schedule: once `at_fraction` of the
/// timeout has elapsed, the exploration weight is multiplied by `factor`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecayStep {
    pub at_fraction: f64,
    pub factor: f64,
}

impl DecayStep {
    #[must_use]
    pub const fn new(at_fraction: f64, factor: f64) -> Self {
        Self {
            at_fraction,
            factor,
        }
    }
}

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// Initial UCT exploration weight (default: 5.0).
    /// Reset to this value at the start of every search.
    pub exploration_constant: f64,

    /// Exploration decay steps, applied once each as the deadline nears.
    /// Default halves the weight at 50% and again at 75% of the timeout.
    pub decay_schedule: Vec<DecayStep>,

    /// Raw move count above which expansion groups moves by relocation.
    pub prune_threshold: usize,

    /// Arrow draws allowed per relocation before it is discarded.
    pub arrow_resample_limit: u32,

    /// Iteration cap and timeout.
    pub budget: SearchBudget,

    /// Seed for the search RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration_constant: 5.0,
            decay_schedule: vec![DecayStep::new(0.5, 0.5), DecayStep::new(0.75, 0.5)],
            prune_threshold: 350,
            arrow_resample_limit: 100,
            budget: SearchBudget::default(),
            seed: None,
        }
    }
}

impl MCTSConfig {
    /// Default parameters with the budget of a difficulty level.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self::default().with_budget(difficulty.budget())
    }

    /// Create a new config with custom exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Create a new config with a custom decay schedule.
    pub fn with_decay_schedule(mut self, steps: Vec<DecayStep>) -> Self {
        self.decay_schedule = steps;
        self
    }

    /// Create a new config with custom prune threshold.
    pub fn with_prune_threshold(mut self, threshold: usize) -> Self {
        self.prune_threshold = threshold;
        self
    }

    /// Create a new config with custom arrow resample limit.
    pub fn with_arrow_resample_limit(mut self, limit: u32) -> Self {
        self.arrow_resample_limit = limit;
        self
    }

    /// Create a new config with a custom budget.
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Create a new config with a custom iteration cap, keeping the timeout.
    pub fn with_max_iterations(mut self, iterations: u32) -> Self {
        self.budget.max_iterations = iterations;
        self
    }

    /// Create a new config with a custom timeout, keeping the iteration cap.
    pub fn with_timeout_secs(mut self, secs: f64) -> Self {
        self.budget.timeout_secs = secs;
        self
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = self.exploration_constant;
        if !c.is_finite() || c <= 0.0 {
            return Err(ConfigError::InvalidExploration(c));
        }
        for step in &self.decay_schedule {
            if !(step.at_fraction > 0.0 && step.at_fraction <= 1.0) {
                return Err(ConfigError::InvalidDecayFraction(step.at_fraction));
            }
            if !(step.factor > 0.0 && step.factor <= 1.0) {
                return Err(ConfigError::InvalidDecayFactor(step.factor));
            }
        }
        if self.arrow_resample_limit == 0 {
            return Err(ConfigError::ZeroResampleLimit);
        }
        self.budget.validate()
    }
}
