//! Generational evolution engine.
//!
//! [`GaEngine`] is driven by the caller one generation at a time:
//! the first [`step`](GaEngine::step) seeds the population from the
//! problem's randomizer, every later step breeds a full replacement
//! generation (selection → crossover → mutation → evaluation → admission).
//! There is no terminal state; the caller decides when to stop.

use super::config::GaConfig;
use super::gene::Gene;
use super::operators::{admit, crossover, mutate};
use super::population::{Population, Scored};
use super::types::{sanitize_fitness, BitProblem};
use crate::error::GaError;
use crate::random::create_rng;
use log::{debug, info, warn};
use rand::rngs::StdRng;

/// Statistics for one completed generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    /// Generation number, starting at 1 for the seeded population.
    pub generation: usize,

    /// Best fitness evaluated during this generation (`0.0` if none was
    /// positive).
    pub best_fitness: f64,

    /// Mean fitness of the admitted members.
    pub mean_fitness: f64,

    /// Genes admitted into the new population.
    pub admitted: usize,

    /// Genes discarded by the admission policy.
    pub rejected: usize,

    /// Crossover points applied across all matings.
    pub crossovers: usize,

    /// Bit flips applied by mutation.
    pub mutations: usize,
}

/// Result of a multi-generation [`GaEngine::run`].
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best gene found so far, if any gene had positive fitness.
    pub best: Option<Gene>,

    /// Fitness of `best` (`0.0` when there is none).
    pub best_fitness: f64,

    /// Generation counter after the run.
    pub generations: usize,

    /// Global best fitness after each step of this run.
    pub fitness_history: Vec<f64>,
}

/// Highest-fitness gene seen so far. Starts at fitness `0`, so only valid
/// genes can ever be recorded.
#[derive(Debug, Clone, Default)]
struct Incumbent(Option<Scored>);

impl Incumbent {
    fn fitness(&self) -> f64 {
        self.0.as_ref().map_or(0.0, |s| s.fitness)
    }

    fn gene(&self) -> Option<&Gene> {
        self.0.as_ref().map(|s| &s.gene)
    }

    /// Records `gene` if it strictly beats the current holder.
    fn offer(&mut self, gene: &Gene, fitness: f64) -> bool {
        if fitness > self.fitness() {
            self.0 = Some(Scored {
                gene: gene.clone(),
                fitness,
            });
            true
        } else {
            false
        }
    }
}

/// Next-generation state under construction.
struct Round {
    generation: usize,
    target: usize,
    rejection_limit: usize,
    next: Population,
    best: Incumbent,
    rejected: usize,
    consecutive_rejections: usize,
    crossovers: usize,
    mutations: usize,
}

impl Round {
    fn new(generation: usize, config: &GaConfig) -> Self {
        Self {
            generation,
            target: config.population_size,
            rejection_limit: config.max_consecutive_rejections,
            next: Population::with_capacity(config.population_size),
            best: Incumbent::default(),
            rejected: 0,
            consecutive_rejections: 0,
            crossovers: 0,
            mutations: 0,
        }
    }

    fn is_full(&self) -> bool {
        self.next.len() >= self.target
    }

    /// Offers an evaluated gene to the trackers and, if `keep`, to the new
    /// population.
    fn offer(
        &mut self,
        gene: Gene,
        fitness: f64,
        keep: bool,
        incumbent: &mut Incumbent,
    ) -> Result<(), GaError> {
        self.best.offer(&gene, fitness);
        incumbent.offer(&gene, fitness);

        if keep {
            self.next.push(gene, fitness);
            self.consecutive_rejections = 0;
            return Ok(());
        }

        self.rejected += 1;
        self.consecutive_rejections += 1;
        if self.consecutive_rejections >= self.rejection_limit {
            return Err(GaError::PopulationStarvation {
                generation: self.generation,
                admitted: self.next.len(),
                target: self.target,
                attempts: self.consecutive_rejections,
            });
        }
        Ok(())
    }

    fn stats(&self) -> GenerationStats {
        GenerationStats {
            generation: self.generation,
            best_fitness: self.best.fitness(),
            mean_fitness: self.next.mean_fitness(),
            admitted: self.next.len(),
            rejected: self.rejected,
            crossovers: self.crossovers,
            mutations: self.mutations,
        }
    }
}

/// Caller-driven bit-level GA.
///
/// # Usage
///
/// ```ignore
/// let config = GaConfig::default().with_population_size(500).with_seed(42);
/// let mut engine = GaEngine::new(MyProblem, config)?;
/// for _ in 0..1000 {
///     engine.step()?;
/// }
/// println!("best: {} ({:?})", engine.best_fitness(), engine.best_description());
/// ```
pub struct GaEngine<P: BitProblem> {
    problem: P,
    config: GaConfig,
    rng: StdRng,
    population: Option<Population>,
    generation: usize,
    incumbent: Incumbent,
}

impl<P: BitProblem> GaEngine<P> {
    /// Binds `problem` to a new, uninitialized engine.
    ///
    /// Fails with [`GaError::InvalidConfig`] if the configuration is invalid
    /// or the problem declares a zero-width gene.
    pub fn new(problem: P, config: GaConfig) -> Result<Self, GaError> {
        config.validate()?;
        if problem.gene_width() == 0 {
            return Err(GaError::InvalidConfig(
                "gene width must be at least 1 byte".into(),
            ));
        }
        let rng = seeded_rng(&config);
        Ok(Self {
            problem,
            config,
            rng,
            population: None,
            generation: 0,
            incumbent: Incumbent::default(),
        })
    }

    /// Runs one generation.
    ///
    /// The configuration is validated first, so edits made through
    /// [`config_mut`](Self::config_mut) take effect here. On error the
    /// current population and generation counter are left unchanged.
    pub fn step(&mut self) -> Result<GenerationStats, GaError> {
        self.config.validate()?;
        let generation = self.generation + 1;
        let mut round = Round::new(generation, &self.config);

        let outcome = match &self.population {
            None => seed(
                &self.problem,
                &self.config,
                &mut self.rng,
                &mut self.incumbent,
                &mut round,
            ),
            Some(current) => breed(
                &self.problem,
                &self.config,
                &mut self.rng,
                current,
                &mut self.incumbent,
                &mut round,
            ),
        };
        if let Err(e) = outcome {
            warn!("generation {generation} aborted: {e}");
            return Err(e);
        }

        let stats = round.stats();
        self.report(&stats, &round.best);
        self.population = Some(round.next);
        self.generation = generation;
        self.problem
            .on_generation(generation, self.incumbent.fitness());
        Ok(stats)
    }

    /// Runs `generations` steps and collects the best-fitness history.
    pub fn run(&mut self, generations: usize) -> Result<GaResult, GaError> {
        let mut fitness_history = Vec::with_capacity(generations);
        for _ in 0..generations {
            self.step()?;
            fitness_history.push(self.incumbent.fitness());
        }
        Ok(GaResult {
            best: self.incumbent.gene().cloned(),
            best_fitness: self.incumbent.fitness(),
            generations: self.generation,
            fitness_history,
        })
    }

    /// Drops the population and the incumbent and restarts the generation
    /// counter.
    ///
    /// With a configured seed the RNG is reseeded, so the next run replays
    /// the previous one.
    pub fn reset(&mut self) {
        self.population = None;
        self.incumbent = Incumbent::default();
        self.generation = 0;
        if self.config.seed.is_some() {
            self.rng = seeded_rng(&self.config);
        }
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Best fitness seen across all generations, `0.0` before any valid
    /// gene. Never decreases until [`reset`](Self::reset).
    pub fn best_fitness(&self) -> f64 {
        self.incumbent.fitness()
    }

    pub fn best_gene(&self) -> Option<&Gene> {
        self.incumbent.gene()
    }

    /// Problem-specific rendering of the best gene.
    pub fn best_description(&self) -> Option<String> {
        self.incumbent.gene().map(|g| self.problem.describe(g))
    }

    /// Current population, `None` before the first step.
    pub fn population(&self) -> Option<&Population> {
        self.population.as_ref()
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Mutable access to the configuration, read at the next step.
    ///
    /// Changing `seed` here has no effect until [`reset`](Self::reset).
    pub fn config_mut(&mut self) -> &mut GaConfig {
        &mut self.config
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    fn report(&self, stats: &GenerationStats, best: &Incumbent) {
        debug!(
            "generation {}: best={:.6e} mean={:.6e} admitted={} rejected={} crossovers={} mutations={}",
            stats.generation,
            stats.best_fitness,
            stats.mean_fitness,
            stats.admitted,
            stats.rejected,
            stats.crossovers,
            stats.mutations,
        );

        let interval = self.config.report_interval;
        if interval == 0 || (stats.generation % interval != 0 && stats.generation != 1) {
            return;
        }
        info!(
            "generation {} - best fitness: {:.6e}",
            stats.generation, stats.best_fitness
        );
        if let Some(gene) = best.gene() {
            info!("{}", self.problem.describe(gene));
        }
    }
}

fn seeded_rng(config: &GaConfig) -> StdRng {
    create_rng(config.seed.unwrap_or_else(rand::random))
}

fn score<P: BitProblem>(problem: &P, gene: &Gene) -> f64 {
    sanitize_fitness(problem.evaluate(gene))
}

/// Fills the first generation from the problem's randomizer.
fn seed<P: BitProblem>(
    problem: &P,
    config: &GaConfig,
    rng: &mut StdRng,
    incumbent: &mut Incumbent,
    round: &mut Round,
) -> Result<(), GaError> {
    let width = problem.gene_width();
    while !round.is_full() {
        let mut gene = Gene::zeroed(width);
        problem.randomize(&mut gene, rng);
        if mutate(&mut gene, config.mutation_rate, rng).is_some() {
            round.mutations += 1;
        }

        let fitness = score(problem, &gene);
        let keep = admit(fitness, config.kill_probability, rng);
        round.offer(gene, fitness, keep, incumbent)?;
    }
    Ok(())
}

/// Breeds a full replacement for `current`.
///
/// Offspring come in pairs; once the new population is full the remaining
/// child of the last mating is dropped unevaluated.
fn breed<P: BitProblem>(
    problem: &P,
    config: &GaConfig,
    rng: &mut StdRng,
    current: &Population,
    incumbent: &mut Incumbent,
    round: &mut Round,
) -> Result<(), GaError> {
    let rate = config.effective_crossover_rate(problem.gene_width() * 8);
    while !round.is_full() {
        let (i, j) = current.choose_two_parents(rng, config.max_parent_redraws)?;
        let mut first = current.members()[i].gene.clone();
        let mut second = current.members()[j].gene.clone();
        round.crossovers += crossover(&mut first, &mut second, config.crossover_policy, rate, rng);

        for mut child in [first, second] {
            if round.is_full() {
                break;
            }
            if mutate(&mut child, config.mutation_rate, rng).is_some() {
                round.mutations += 1;
            }
            let fitness = score(problem, &child);
            let keep = admit(fitness, config.kill_probability, rng);
            round.offer(child, fitness, keep, incumbent)?;
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
