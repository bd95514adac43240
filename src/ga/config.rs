//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control a generation step. The
//! engine re-reads and re-validates it at the start of every step, so a
//! caller may tune it between steps.

use crate::error::GaError;

/// Expected number of crossover points per mating when no explicit
/// crossover rate is configured.
pub const DEFAULT_EXPECTED_CROSSOVERS: f64 = 3.0;

/// How crossover points are chosen for a mating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossoverPolicy {
    /// Walk every bit offset and cross there with probability
    /// `crossover_rate`.
    ///
    /// Each cross swaps the whole tail, so an even number of points cancels
    /// out over the overlapping suffix. With the default rate of
    /// `3 / bit_len` a mating sees about three points.
    #[default]
    PerBit,

    /// With probability `crossover_rate`, cross at exactly one offset drawn
    /// uniformly from `[0, bit_len)`.
    ///
    /// Strict one-point crossover.
    SinglePoint,
}

/// Configuration for the bit-level Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_bitga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 1000);
/// assert!((config.mutation_rate - 0.4).abs() < 1e-12);
/// assert!(config.crossover_rate.is_none());
/// // 3 expected crossover points on a 32-bit gene.
/// assert!((config.effective_crossover_rate(32) - 3.0 / 32.0).abs() < 1e-12);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_bitga::ga::{CrossoverPolicy, GaConfig};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_mutation_rate(0.1)
///     .with_crossover_policy(CrossoverPolicy::SinglePoint)
///     .with_crossover_rate(0.9)
///     .with_kill_probability(0.5)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of genes in every generation. Must be at least 2.
    pub population_size: usize,

    /// Probability that a gene receives a single random bit flip (0.0–1.0).
    ///
    /// At most one bit is flipped per mutation call.
    pub mutation_rate: f64,

    /// Crossover probability (0.0–1.0), interpreted by
    /// [`crossover_policy`](Self::crossover_policy).
    ///
    /// `None` derives the rate from the gene width:
    /// `expected_crossovers / bit_len`.
    pub crossover_rate: Option<f64>,

    /// Expected crossover points per mating when `crossover_rate` is `None`.
    pub expected_crossovers: f64,

    /// How crossover offsets are chosen.
    pub crossover_policy: CrossoverPolicy,

    /// Probability (0.0–1.0) that a gene with non-positive fitness is
    /// discarded instead of admitted.
    ///
    /// `1.0` always rejects invalid genes. `0.0` keeps them at zero weight,
    /// which dilutes selection pressure but preserves diversity.
    pub kill_probability: f64,

    /// Consecutive rejected candidates tolerated while filling a generation
    /// before the step fails with
    /// [`GaError::PopulationStarvation`].
    pub max_consecutive_rejections: usize,

    /// Redraws of the second parent tolerated before the step fails with
    /// [`GaError::SelectionStarvation`].
    pub max_parent_redraws: usize,

    /// Log progress at `info` level every this many generations
    /// (and on the first). `0` disables periodic reports.
    pub report_interval: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            mutation_rate: 0.4,
            crossover_rate: None,
            expected_crossovers: DEFAULT_EXPECTED_CROSSOVERS,
            crossover_policy: CrossoverPolicy::default(),
            kill_probability: 1.0,
            max_consecutive_rejections: 100_000,
            max_parent_redraws: 10_000,
            report_interval: 100,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets an explicit crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = Some(rate);
        self
    }

    /// Derives the crossover rate from the gene width, targeting `k`
    /// crossover points per mating.
    pub fn with_expected_crossovers(mut self, k: f64) -> Self {
        self.crossover_rate = None;
        self.expected_crossovers = k;
        self
    }

    /// Sets the crossover policy.
    pub fn with_crossover_policy(mut self, policy: CrossoverPolicy) -> Self {
        self.crossover_policy = policy;
        self
    }

    /// Sets the kill probability for invalid genes.
    pub fn with_kill_probability(mut self, p: f64) -> Self {
        self.kill_probability = p;
        self
    }

    /// Sets the rejection budget per generation slot.
    pub fn with_max_consecutive_rejections(mut self, n: usize) -> Self {
        self.max_consecutive_rejections = n;
        self
    }

    /// Sets the second-parent redraw budget.
    pub fn with_max_parent_redraws(mut self, n: usize) -> Self {
        self.max_parent_redraws = n;
        self
    }

    /// Sets the progress report interval (0 to disable).
    pub fn with_report_interval(mut self, n: usize) -> Self {
        self.report_interval = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Crossover rate for genes of `bit_len` bits.
    ///
    /// A derived rate is capped at 1.0.
    pub fn effective_crossover_rate(&self, bit_len: usize) -> f64 {
        match self.crossover_rate {
            Some(rate) => rate,
            None if bit_len == 0 => 0.0,
            None => (self.expected_crossovers / bit_len as f64).min(1.0),
        }
    }

    /// Preset for quick runs: small population.
    ///
    /// - Population: 100, Mutation: 0.4
    pub fn fast() -> Self {
        Self {
            population_size: 100,
            ..Self::default()
        }
    }

    /// Preset balancing diversity and generation cost.
    ///
    /// - Population: 500, Mutation: 0.4, Report interval: 100
    pub fn balanced() -> Self {
        Self {
            population_size: 500,
            ..Self::default()
        }
    }

    /// Preset for solution quality: large population, invalid genes kept
    /// half of the time for diversity.
    ///
    /// - Population: 2000, Mutation: 0.3, Kill probability: 0.5
    pub fn quality() -> Self {
        Self {
            population_size: 2000,
            mutation_rate: 0.3,
            kill_probability: 0.5,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns [`GaError::InvalidConfig`] describing the first bad parameter.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.population_size < 2 {
            return Err(invalid("population_size must be at least 2"));
        }
        check_probability("mutation_rate", self.mutation_rate)?;
        if let Some(rate) = self.crossover_rate {
            check_probability("crossover_rate", rate)?;
        }
        if !self.expected_crossovers.is_finite() || self.expected_crossovers < 0.0 {
            return Err(invalid("expected_crossovers must be a non-negative number"));
        }
        check_probability("kill_probability", self.kill_probability)?;
        if self.max_consecutive_rejections == 0 {
            return Err(invalid("max_consecutive_rejections must be at least 1"));
        }
        if self.max_parent_redraws == 0 {
            return Err(invalid("max_parent_redraws must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> GaError {
    GaError::InvalidConfig(msg.into())
}

fn check_probability(name: &str, value: f64) -> Result<(), GaError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GaError::InvalidConfig(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}
