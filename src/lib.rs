//! Bit-level genetic algorithm engine.
//!
//! Evolves a population of fixed-width binary genes toward higher fitness
//! under a user-supplied [`BitProblem`](ga::BitProblem):
//!
//! - **Genes**: opaque `N`-byte blobs with bit-indexed get/set/flip and
//!   one-point crossover at any bit offset.
//! - **Selection**: fitness-proportionate (roulette wheel) over a
//!   cumulative-fitness index.
//! - **Evolution**: caller-driven [`step`](ga::GaEngine::step) with
//!   single-flip mutation, an admission policy for invalid genes, and
//!   global-best tracking.
//! - **Problems**: sample encodings (point near a circle, two-machine task
//!   scheduling).
//!
//! # Architecture
//!
//! This crate sits at Layer 2 (Algorithms) in the U-Engine ecosystem. The
//! engine holds no domain concepts; everything problem-specific lives
//! behind the plugin trait.

pub mod error;
pub mod ga;
pub mod problems;
pub mod random;

pub use error::GaError;
