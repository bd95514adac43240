//! Fitness plugin interface.
//!
//! [`BitProblem`] is the contract between the generic bit-level engine and a
//! concrete problem encoding. The engine only ever sees [`Gene`]s; the
//! problem decides what their bytes mean.

use super::gene::Gene;
use rand::Rng;

/// Defines a bit-encoded optimization problem.
///
/// The engine maximizes fitness. By convention:
///
/// - `fitness > 0` is a magnitude, larger is strictly better
/// - `fitness <= 0` marks an invalid gene
///
/// Non-finite fitness values are treated as invalid.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_bitga::ga::{BitProblem, Gene};
///
/// /// Maximize the number of set bits in a 4-byte gene.
/// struct OneMax;
///
/// impl BitProblem for OneMax {
///     fn gene_width(&self) -> usize { 4 }
///
///     fn evaluate(&self, gene: &Gene) -> f64 {
///         gene.as_bytes().iter().map(|b| b.count_ones()).sum::<u32>() as f64
///     }
///
///     fn randomize<R: Rng>(&self, gene: &mut Gene, rng: &mut R) {
///         rng.fill(gene.as_bytes_mut());
///     }
/// }
/// ```
pub trait BitProblem {
    /// Width of every gene, in bytes. Must be at least 1.
    fn gene_width(&self) -> usize;

    /// Scores a gene. Larger is better, non-positive means invalid.
    fn evaluate(&self, gene: &Gene) -> f64;

    /// Fills `gene` with a random, problem-appropriate value.
    ///
    /// The result need not be uniform over all bit patterns; it may respect
    /// domain constraints.
    fn randomize<R: Rng>(&self, gene: &mut Gene, rng: &mut R);

    /// Human-readable rendering for diagnostics.
    ///
    /// The default implementation prints the raw bytes in hex.
    fn describe(&self, gene: &Gene) -> String {
        gene.to_string()
    }

    /// Called at the end of each generation with the global best fitness.
    ///
    /// The default implementation is a no-op.
    fn on_generation(&self, _generation: usize, _best_fitness: f64) {}
}

/// Sanitizes a raw fitness value: non-finite results count as invalid.
pub(crate) fn sanitize_fitness(raw: f64) -> f64 {
    if raw.is_finite() {
        raw
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_fitness() {
        assert_eq!(sanitize_fitness(2.5), 2.5);
        assert_eq!(sanitize_fitness(-1.0), -1.0);
        assert_eq!(sanitize_fitness(f64::NAN), 0.0);
        assert_eq!(sanitize_fitness(f64::INFINITY), 0.0);
        assert_eq!(sanitize_fitness(f64::NEG_INFINITY), 0.0);
    }

    struct Fixed;

    impl BitProblem for Fixed {
        fn gene_width(&self) -> usize {
            2
        }
        fn evaluate(&self, _gene: &Gene) -> f64 {
            1.0
        }
        fn randomize<R: Rng>(&self, _gene: &mut Gene, _rng: &mut R) {}
    }

    #[test]
    fn test_default_describe_is_hex() {
        let gene = Gene::from_bytes(vec![0xBE, 0xEF]);
        assert_eq!(Fixed.describe(&gene), "beef");
    }
}
