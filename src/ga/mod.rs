//! Bit-level Genetic Algorithm.
//!
//! A generic, encoding-agnostic GA over fixed-width binary genes. Users
//! define their problem by implementing [`BitProblem`], which specifies the
//! gene width and how to randomize, evaluate, and describe a gene. The
//! engine never interprets the bits it recombines.
//!
//! # Core Traits
//!
//! - [`BitProblem`]: Fitness plugin: width, evaluation, randomization
//!
//! # Key Types
//!
//! - [`Gene`]: Fixed-width blob with MSB-first bit addressing
//! - [`Population`]: Scored genes plus the cumulative-fitness wheel
//! - [`GaConfig`]: Rates, population size, admission policy, guards
//! - [`GaEngine`]: Caller-driven generational loop
//!
//! # Submodules
//!
//! - [`operators`]: Bit crossover, single-flip mutation, admission trial
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod engine;
mod gene;
pub mod operators;
mod population;
mod types;

pub use config::{CrossoverPolicy, GaConfig, DEFAULT_EXPECTED_CROSSOVERS};
pub use engine::{GaEngine, GaResult, GenerationStats};
pub use gene::Gene;
pub use population::{Population, Scored};
pub use types::BitProblem;
