//! Error types.

use thiserror::Error;

/// Errors raised by the bit-level GA.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GaError {
    /// A configuration parameter is out of range.
    ///
    /// Raised at setup or at the start of a step, never mid-generation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The admission policy rejected too many candidates in a row to fill
    /// the next generation.
    #[error(
        "population starvation in generation {generation}: {admitted}/{target} admitted \
         after {attempts} consecutive rejections"
    )]
    PopulationStarvation {
        generation: usize,
        admitted: usize,
        target: usize,
        attempts: usize,
    },

    /// Roulette selection kept returning the first parent, so no distinct
    /// second parent could be drawn.
    #[error("could not draw a distinct second parent after {redraws} redraws")]
    SelectionStarvation { redraws: usize },
}
