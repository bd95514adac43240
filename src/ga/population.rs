//! Population storage and roulette-wheel selection.
//!
//! A [`Population`] keeps its members next to a cumulative-fitness index.
//! Selecting a parent is a single binary search over that index.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1 (roulette wheel)

use super::gene::Gene;
use crate::error::GaError;
use rand::Rng;

/// A gene with its evaluated fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    pub gene: Gene,
    pub fitness: f64,
}

/// One generation of genes plus its cumulative-fitness wheel.
///
/// # Invariants
///
/// - `cumulative.len() == members.len()`
/// - `cumulative` is non-decreasing
/// - `cumulative.last()` is the total fitness mass
///
/// Members with non-positive fitness occupy a slot but add nothing to the
/// mass.
#[derive(Debug, Clone, Default)]
pub struct Population {
    members: Vec<Scored>,
    cumulative: Vec<f64>,
}

impl Population {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            members: Vec::with_capacity(n),
            cumulative: Vec::with_capacity(n),
        }
    }

    /// Appends a member and extends the wheel by `max(fitness, 0)`.
    ///
    /// The running total saturates at `f64::MAX`, so the mass stays finite
    /// for any finite fitness. Members appended after saturation add no
    /// weight.
    pub fn push(&mut self, gene: Gene, fitness: f64) {
        let weight = if fitness > 0.0 { fitness } else { 0.0 };
        let total = (self.total_mass() + weight).min(f64::MAX);
        self.members.push(Scored { gene, fitness });
        self.cumulative.push(total);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Scored] {
        &self.members
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    /// Sum of all positive fitness values.
    pub fn total_mass(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Member with the highest fitness, first one on ties.
    pub fn best(&self) -> Option<&Scored> {
        self.members.iter().fold(None, |best: Option<&Scored>, s| match best {
            Some(b) if b.fitness >= s.fitness => Some(b),
            _ => Some(s),
        })
    }

    /// Mean fitness over all members.
    pub fn mean_fitness(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        let n = self.members.len() as f64;
        self.members.iter().map(|s| s.fitness / n).sum()
    }

    /// Share of the wheel held by member `i`.
    fn weight(&self, i: usize) -> f64 {
        let below = if i == 0 { 0.0 } else { self.cumulative[i - 1] };
        self.cumulative[i] - below
    }

    /// First index whose cumulative fitness reaches `r`.
    ///
    /// Falls back to the last index when rounding leaves `r` above the
    /// total mass.
    ///
    /// # Panics
    /// Panics if the population is empty.
    pub fn roulette_index(&self, r: f64) -> usize {
        assert!(!self.is_empty(), "cannot select from empty population");
        let idx = self.cumulative.partition_point(|&c| c < r);
        idx.min(self.cumulative.len() - 1)
    }

    /// Draws one parent index, fitness-proportionately.
    ///
    /// When the mass is zero every member is equally likely.
    ///
    /// # Panics
    /// Panics if the population is empty.
    pub fn select<R: Rng>(&self, rng: &mut R) -> usize {
        assert!(!self.is_empty(), "cannot select from empty population");
        let mass = self.total_mass();
        if mass > 0.0 {
            self.roulette_index(rng.random_range(0.0..mass))
        } else {
            rng.random_range(0..self.len())
        }
    }

    /// Draws two distinct parent indices.
    ///
    /// The second draw is repeated until it differs from the first, at most
    /// `max_redraws` times. When the first parent holds the whole mass,
    /// redrawing could never succeed, so the second parent is drawn
    /// uniformly from the other members instead.
    pub fn choose_two_parents<R: Rng>(
        &self,
        rng: &mut R,
        max_redraws: usize,
    ) -> Result<(usize, usize), GaError> {
        if self.len() < 2 {
            return Err(GaError::InvalidConfig(format!(
                "distinct parents need at least 2 members, population has {}",
                self.len()
            )));
        }

        let first = self.select(rng);
        let mass = self.total_mass();
        if mass > 0.0 && self.weight(first) >= mass {
            let mut second = rng.random_range(0..self.len() - 1);
            if second >= first {
                second += 1;
            }
            return Ok((first, second));
        }

        for _ in 0..max_redraws.max(1) {
            let second = self.select(rng);
            if second != first {
                return Ok((first, second));
            }
        }
        Err(GaError::SelectionStarvation {
            redraws: max_redraws.max(1),
        })
    }
}
