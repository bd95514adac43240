//! Bit-level genetic operators.
//!
//! These operate on [`Gene`] pairs and are encoding-agnostic: any problem
//! that fits in a fixed-width blob can use them.
//!
//! # Crossover
//!
//! - [`crossover`] with [`CrossoverPolicy::PerBit`]: every offset is a
//!   crossover candidate
//! - [`crossover`] with [`CrossoverPolicy::SinglePoint`]: strict one-point
//!
//! # Mutation
//!
//! - [`mutate`]: at most one uniformly chosen bit flip per call
//!
//! # Admission
//!
//! - [`admit`]: survival trial for genes with non-positive fitness

use super::config::CrossoverPolicy;
use super::gene::Gene;
use rand::Rng;

/// Flips one random bit with probability `rate`.
///
/// Returns the flipped offset, or `None` when the trial failed.
///
/// # Complexity
/// O(1)
pub fn mutate<R: Rng>(gene: &mut Gene, rate: f64, rng: &mut R) -> Option<usize> {
    let bits = gene.bit_len();
    if bits == 0 || !rng.random_bool(rate) {
        return None;
    }
    let offset = rng.random_range(0..bits);
    gene.flip_bit(offset);
    Some(offset)
}

/// Recombines `a` and `b` in place.
///
/// Returns the number of crossover points applied.
///
/// # Complexity
/// O(bits · bytes) worst case for [`CrossoverPolicy::PerBit`],
/// O(bytes) for [`CrossoverPolicy::SinglePoint`]
///
/// # Panics
/// Panics if the genes have different widths.
pub fn crossover<R: Rng>(
    a: &mut Gene,
    b: &mut Gene,
    policy: CrossoverPolicy,
    rate: f64,
    rng: &mut R,
) -> usize {
    assert_eq!(a.width(), b.width(), "parents must have equal width");
    let bits = a.bit_len();
    if bits == 0 {
        return 0;
    }

    match policy {
        CrossoverPolicy::PerBit => {
            let mut points = 0;
            for offset in 0..bits {
                if rng.random_bool(rate) {
                    a.cross_at(offset, b);
                    points += 1;
                }
            }
            points
        }
        CrossoverPolicy::SinglePoint => {
            if rng.random_bool(rate) {
                a.cross_at(rng.random_range(0..bits), b);
                1
            } else {
                0
            }
        }
    }
}

/// Decides whether a gene with `fitness` survives into the population.
///
/// Positive fitness always survives. Non-positive fitness is killed with
/// probability `kill_probability`.
pub fn admit<R: Rng>(fitness: f64, kill_probability: f64, rng: &mut R) -> bool {
    fitness > 0.0 || !rng.random_bool(kill_probability)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn hamming(a: &Gene, b: &Gene) -> u32 {
        a.as_bytes()
            .iter()
            .zip(b.as_bytes())
            .map(|(x, y)| (x ^ y).count_ones())
            .sum()
    }

    // ---- Mutation ----

    #[test]
    fn test_mutate_rate_zero_never_flips() {
        let mut rng = create_rng(42);
        let original = Gene::from_bytes(vec![0x5A; 4]);
        let mut gene = original.clone();
        for _ in 0..1000 {
            assert_eq!(mutate(&mut gene, 0.0, &mut rng), None);
        }
        assert_eq!(gene, original);
    }

    #[test]
    fn test_mutate_rate_one_flips_exactly_one_bit() {
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let original = Gene::from_bytes(vec![0x00, 0xFF, 0x0F]);
            let mut gene = original.clone();
            let offset = mutate(&mut gene, 1.0, &mut rng).unwrap();
            assert!(offset < 24);
            assert_eq!(hamming(&gene, &original), 1);
            assert_ne!(gene.get_bit(offset), original.get_bit(offset));
        }
    }

    #[test]
    fn test_mutate_covers_all_offsets() {
        let mut rng = create_rng(9);
        let mut seen = [false; 16];
        let mut gene = Gene::zeroed(2);
        for _ in 0..2000 {
            if let Some(offset) = mutate(&mut gene, 1.0, &mut rng) {
                seen[offset] = true;
            }
        }
        assert!(seen.iter().all(|&s| s), "offsets seen: {seen:?}");
    }

    #[test]
    fn test_mutate_rate_is_respected() {
        let mut rng = create_rng(5);
        let mut gene = Gene::zeroed(8);
        let hits = (0..10000)
            .filter(|_| mutate(&mut gene, 0.25, &mut rng).is_some())
            .count();
        assert!(hits > 2200 && hits < 2800, "expected ~2500 flips, got {hits}");
    }

    // ---- Crossover ----

    #[test]
    fn test_crossover_rate_zero_is_identity() {
        let mut rng = create_rng(42);
        let (orig_a, orig_b) = (Gene::from_bytes(vec![0xAA; 4]), Gene::from_bytes(vec![0x55; 4]));
        for policy in [CrossoverPolicy::PerBit, CrossoverPolicy::SinglePoint] {
            let (mut a, mut b) = (orig_a.clone(), orig_b.clone());
            assert_eq!(crossover(&mut a, &mut b, policy, 0.0, &mut rng), 0);
            assert_eq!(a, orig_a);
            assert_eq!(b, orig_b);
        }
    }

    #[test]
    fn test_crossover_preserves_bit_multiset_per_locus() {
        // At every locus the pair keeps the same two alleles, only their
        // owners may change.
        let mut rng = create_rng(11);
        let (orig_a, orig_b) = (
            Gene::from_bytes(vec![0xF0, 0x0F, 0xAA, 0x3C]),
            Gene::from_bytes(vec![0x0F, 0xF0, 0x55, 0xC3]),
        );
        for policy in [CrossoverPolicy::PerBit, CrossoverPolicy::SinglePoint] {
            for _ in 0..100 {
                let (mut a, mut b) = (orig_a.clone(), orig_b.clone());
                crossover(&mut a, &mut b, policy, 0.3, &mut rng);
                for bit in 0..32 {
                    let mut before = [orig_a.get_bit(bit), orig_b.get_bit(bit)];
                    let mut after = [a.get_bit(bit), b.get_bit(bit)];
                    before.sort();
                    after.sort();
                    assert_eq!(before, after);
                }
            }
        }
    }

    #[test]
    fn test_single_point_crosses_once() {
        let mut rng = create_rng(3);
        for _ in 0..100 {
            let mut a = Gene::from_bytes(vec![0xFF; 3]);
            let mut b = Gene::zeroed(3);
            assert_eq!(
                crossover(&mut a, &mut b, CrossoverPolicy::SinglePoint, 1.0, &mut rng),
                1
            );
            // a becomes a run of ones followed by a run of zeros.
            let bits: Vec<bool> = (0..24).map(|i| a.get_bit(i)).collect();
            let switches = bits.windows(2).filter(|w| w[0] != w[1]).count();
            assert!(switches <= 1, "not a one-point splice: {bits:?}");
        }
    }

    #[test]
    fn test_per_bit_expected_points() {
        let mut rng = create_rng(17);
        let rate = 3.0 / 64.0;
        let trials = 2000;
        let total: usize = (0..trials)
            .map(|_| {
                let mut a = Gene::zeroed(8);
                let mut b = Gene::zeroed(8);
                crossover(&mut a, &mut b, CrossoverPolicy::PerBit, rate, &mut rng)
            })
            .sum();
        let mean = total as f64 / trials as f64;
        assert!((mean - 3.0).abs() < 0.3, "expected ~3 points, got {mean}");
    }

    // ---- Admission ----

    #[test]
    fn test_admit_positive_always() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            assert!(admit(1e-9, 1.0, &mut rng));
        }
    }

    #[test]
    fn test_admit_invalid_by_kill_probability() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            assert!(!admit(0.0, 1.0, &mut rng));
            assert!(!admit(-5.0, 1.0, &mut rng));
            assert!(admit(0.0, 0.0, &mut rng));
        }
        let kept = (0..10000).filter(|_| admit(-1.0, 0.75, &mut rng)).count();
        assert!(kept > 2200 && kept < 2800, "expected ~25% kept, got {kept}");
    }
}
