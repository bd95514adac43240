//! Sample problem encodings.
//!
//! Ready-made [`BitProblem`](crate::ga::BitProblem) implementations that
//! show how typed data is laid out inside a [`Gene`](crate::ga::Gene):
//!
//! - [`PointOnCircle`]: two `i32` coordinates, continuous-looking fitness
//! - [`TwoMachineSchedule`]: byte-per-slot timelines with invalid regions

mod circle;
mod scheduling;

pub use circle::PointOnCircle;
pub use scheduling::{Completion, TwoMachineSchedule, QUANTA};
