//! Two-machine task scheduling.
//!
//! Each machine has a timeline of [`QUANTA`] slots. A slot byte modulo
//! `jobs + 1` names what runs in that quantum: `0` is idle, `1..=jobs` is a
//! job. A schedule is valid when every job accumulates its duration before
//! the timeline ends and no job runs on both machines in the same quantum.

use crate::ga::{BitProblem, Gene};
use rand::Rng;

/// Slots per machine timeline.
pub const QUANTA: usize = 40;

const MAKESPAN_PENALTY: f64 = 50.0;
const REDUNDANCY_PENALTY: f64 = 10.0;
const PREEMPTION_PENALTY: f64 = 20.0;

/// Outcome of simulating a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub done: bool,
    /// Quanta elapsed until every job finished (or the timeline ended).
    /// `0` when a job ran on both machines at once.
    pub makespan: usize,
    /// Job changes on either machine between consecutive quanta.
    pub preemptions: usize,
    /// Quanta spent on jobs that were already finished.
    pub redundant: usize,
}

/// Gene layout: bytes `0..QUANTA` are machine 1, `QUANTA..2*QUANTA` are
/// machine 2.
#[derive(Debug, Clone)]
pub struct TwoMachineSchedule {
    pub durations: Vec<u32>,
}

impl Default for TwoMachineSchedule {
    fn default() -> Self {
        Self {
            durations: vec![4, 5, 6, 7, 5, 8],
        }
    }
}

impl TwoMachineSchedule {
    pub const WIDTH: usize = 2 * QUANTA;

    fn job_at(&self, slot: u8) -> usize {
        slot as usize % (self.durations.len() + 1)
    }

    /// Simulates both timelines until every job is done.
    pub fn simulate(&self, gene: &Gene) -> Completion {
        let bytes = gene.as_bytes();
        let (m1, m2) = bytes.split_at(QUANTA);
        let mut remaining: Vec<i64> = self.durations.iter().map(|&d| d as i64).collect();
        let mut status = Completion {
            done: false,
            makespan: 0,
            preemptions: 0,
            redundant: 0,
        };

        let mut last = (0, 0);
        let mut t = 0;
        while t < QUANTA && remaining.iter().any(|&r| r > 0) {
            let jobs = (self.job_at(m1[t]), self.job_at(m2[t]));
            if jobs.0 == jobs.1 && jobs.0 != 0 {
                // Same job on both machines.
                return status;
            }
            if t > 0 {
                status.preemptions += usize::from(jobs.0 != last.0) + usize::from(jobs.1 != last.1);
            }
            for job in [jobs.0, jobs.1] {
                if job > 0 {
                    remaining[job - 1] -= 1;
                }
            }
            last = jobs;
            t += 1;
        }

        status.done = remaining.iter().all(|&r| r <= 0);
        status.makespan = t;
        status.redundant = remaining.iter().filter(|&&r| r < 0).map(|&r| (-r) as usize).sum();
        status
    }
}

impl BitProblem for TwoMachineSchedule {
    fn gene_width(&self) -> usize {
        Self::WIDTH
    }

    fn evaluate(&self, gene: &Gene) -> f64 {
        let status = self.simulate(gene);
        if !status.done || status.makespan == 0 {
            return 0.0;
        }
        let penalty = MAKESPAN_PENALTY * status.makespan as f64
            + REDUNDANCY_PENALTY * status.redundant as f64
            + PREEMPTION_PENALTY * status.preemptions as f64;
        10.0 * (-penalty / 200.0).exp()
    }

    fn randomize<R: Rng>(&self, gene: &mut Gene, rng: &mut R) {
        rng.fill(gene.as_bytes_mut());
    }

    fn describe(&self, gene: &Gene) -> String {
        let status = self.simulate(gene);
        let bytes = gene.as_bytes();
        let line = |slots: &[u8]| {
            slots[..status.makespan]
                .iter()
                .map(|&s| self.job_at(s).to_string())
                .collect::<Vec<_>>()
                .join(" ")
        };
        format!(
            "Machine1: {}\nMachine2: {}",
            line(&bytes[..QUANTA]),
            line(&bytes[QUANTA..])
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{GaConfig, GaEngine};

    /// Builds a gene from two job timelines, padding with idle slots.
    fn schedule(m1: &[u8], m2: &[u8]) -> Gene {
        let mut gene = Gene::zeroed(TwoMachineSchedule::WIDTH);
        gene.as_bytes_mut()[..m1.len()].copy_from_slice(m1);
        gene.as_bytes_mut()[QUANTA..QUANTA + m2.len()].copy_from_slice(m2);
        gene
    }

    fn repeat(job: u8, n: usize) -> Vec<u8> {
        vec![job; n]
    }

    /// Machine 1: jobs 1, 2, 6 (4 + 5 + 8 = 17 quanta).
    /// Machine 2: jobs 3, 4, 5 (6 + 7 + 5 = 18 quanta).
    fn tight_schedule() -> Gene {
        let m1 = [repeat(1, 4), repeat(2, 5), repeat(6, 8), repeat(0, 1)].concat();
        let m2 = [repeat(3, 6), repeat(4, 7), repeat(5, 5)].concat();
        schedule(&m1, &m2)
    }

    #[test]
    fn test_simulate_valid_schedule() {
        let problem = TwoMachineSchedule::default();
        let status = problem.simulate(&tight_schedule());
        assert!(status.done);
        assert_eq!(status.makespan, 18);
        assert_eq!(status.redundant, 0);
        // m1 switches 1→2, 2→6, 6→0; m2 switches 3→4, 4→5.
        assert_eq!(status.preemptions, 5);

        let fitness = problem.evaluate(&tight_schedule());
        let expected = 10.0 * (-(50.0 * 18.0 + 20.0 * 5.0) / 200.0f64).exp();
        assert!((fitness - expected).abs() < 1e-12);
    }

    #[test]
    fn test_slot_values_wrap_modulo() {
        let problem = TwoMachineSchedule::default();
        // 8 % 7 == 1, 14 % 7 == 0.
        let gene = schedule(&[8, 8, 8, 8], &[14]);
        assert_eq!(problem.job_at(8), 1);
        assert_eq!(problem.job_at(14), 0);
        assert!(!problem.simulate(&gene).done);
    }

    #[test]
    fn test_same_job_on_both_machines_is_invalid() {
        let problem = TwoMachineSchedule::default();
        let gene = schedule(&[1, 1], &[2, 1]);
        let status = problem.simulate(&gene);
        assert!(!status.done);
        assert_eq!(status.makespan, 0);
        assert_eq!(problem.evaluate(&gene), 0.0);
        assert_eq!(problem.describe(&gene), "Machine1: \nMachine2: ");
    }

    #[test]
    fn test_unfinished_is_invalid() {
        let problem = TwoMachineSchedule::default();
        assert_eq!(problem.evaluate(&Gene::zeroed(TwoMachineSchedule::WIDTH)), 0.0);
    }

    #[test]
    fn test_redundant_work_is_penalized() {
        let problem = TwoMachineSchedule::default();
        // Job 1 runs a fifth quantum on machine 2 while job 5 is unfinished.
        let m1 = [repeat(1, 4), repeat(2, 5), repeat(6, 8)].concat();
        let m2 = [repeat(3, 6), repeat(4, 7), repeat(5, 4), repeat(1, 1), repeat(5, 1)].concat();
        let status = problem.simulate(&schedule(&m1, &m2));
        assert!(status.done);
        assert_eq!(status.redundant, 1);
        assert!(problem.evaluate(&schedule(&m1, &m2)) < problem.evaluate(&tight_schedule()));
    }

    #[test]
    fn test_describe_prints_up_to_makespan() {
        let problem = TwoMachineSchedule::default();
        let text = problem.describe(&tight_schedule());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Machine1: 1 1 1 1 2"));
        assert!(lines[1].starts_with("Machine2: 3 3 3 3 3 3 4"));
        assert_eq!(lines[1].split_whitespace().count(), 1 + 18);
    }

    #[test]
    fn test_engine_evolves_valid_schedules() {
        let config = GaConfig::default()
            .with_population_size(100)
            .with_report_interval(0)
            .with_seed(42);
        let mut engine = GaEngine::new(TwoMachineSchedule::default(), config).unwrap();
        let result = engine.run(30).unwrap();

        let pop = engine.population().unwrap();
        assert_eq!(pop.len(), 100);
        assert!(pop.members().iter().all(|s| s.fitness > 0.0));
        assert!(result.best_fitness > 0.0);
        for w in result.fitness_history.windows(2) {
            assert!(w[1] >= w[0]);
        }
        let best = result.best.unwrap();
        assert!(TwoMachineSchedule::default().simulate(&best).done);
    }
}
