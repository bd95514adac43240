//! Find an integer point as close as possible to a circle centred at the
//! origin.

use crate::ga::{BitProblem, Gene};
use rand::Rng;

/// Gene layout: `x` as little-endian `i32` at byte 0, `y` at byte 4.
///
/// Fitness is `exp(-d² / spread)` where `d` is the distance from the point
/// to the circle, so a point exactly on the circle scores 1.0.
#[derive(Debug, Clone)]
pub struct PointOnCircle {
    pub radius: f64,
    pub spread: f64,
    /// Randomized coordinates are drawn from `[-half_range, half_range)`.
    pub half_range: i32,
}

impl Default for PointOnCircle {
    fn default() -> Self {
        Self {
            radius: 100.0,
            spread: 10_000.0,
            half_range: 500,
        }
    }
}

impl PointOnCircle {
    pub const WIDTH: usize = 8;

    pub fn point(gene: &Gene) -> (i32, i32) {
        (gene.read_i32(0), gene.read_i32(4))
    }

    pub fn encode(x: i32, y: i32) -> Gene {
        let mut gene = Gene::zeroed(Self::WIDTH);
        gene.write_i32(0, x);
        gene.write_i32(4, y);
        gene
    }
}

impl BitProblem for PointOnCircle {
    fn gene_width(&self) -> usize {
        Self::WIDTH
    }

    fn evaluate(&self, gene: &Gene) -> f64 {
        let (x, y) = Self::point(gene);
        let (x, y) = (x as f64, y as f64);
        let d = (x * x + y * y).sqrt() - self.radius;
        (-(d * d) / self.spread).exp()
    }

    fn randomize<R: Rng>(&self, gene: &mut Gene, rng: &mut R) {
        gene.write_i32(0, rng.random_range(-self.half_range..self.half_range));
        gene.write_i32(4, rng.random_range(-self.half_range..self.half_range));
    }

    fn describe(&self, gene: &Gene) -> String {
        let (x, y) = Self::point(gene);
        format!("X: {x}, Y: {y}")
    }
}
