use std::time::{Duration, Instant};
use crate::config::PolicyKind;
use crate::engine::{StepEngine, StepRecord};
use crate::summary::{Comparison, SimulationSummary};
use crate::Page;

/// The simulator runs a step engine over a reference string and collects its records.
///
/// It can be advanced one reference at a time, which is what interactive renderers use, or run
/// to the end in one go. A run can be aborted after any step; the summary always describes the
/// steps that were actually executed.
///
/// If the frame table can't be allocated the simulator starts out finished, with zero faults
#[derive(Debug)]
pub struct Simulator<'a> {
    engine: Option<StepEngine<'a>>,
    policy: PolicyKind,
    frames: usize,
    records: Vec<StepRecord>,
    aborted: bool,
    simulation_time: Duration,
}

impl<'a> Simulator<'a> {
    /// Creates a new simulator for one policy over one reference string
    ///
    /// # Arguments
    ///
    /// * `policy`: The replacement policy
    /// * `references`: The reference string
    /// * `frames`: The number of frames
    ///
    /// returns: Simulator
    pub fn new(policy: PolicyKind, references: &'a [Page], frames: usize) -> Self {
        Self {
            engine: StepEngine::try_new(policy, references, frames).ok(),
            policy,
            frames,
            records: Vec::with_capacity(references.len()),
            aborted: false,
            simulation_time: Duration::new(0, 0),
        }
    }

    /// Runs the next step, returning its record, or None if the run is over
    pub fn advance(&mut self) -> Option<&StepRecord> {
        if self.aborted {
            return None;
        }
        let start = Instant::now();
        let record = self.engine.as_mut()?.step()?;
        self.simulation_time += start.elapsed();
        self.records.push(record);
        self.records.last()
    }

    /// Stops the run. Later calls to [`Simulator::advance`] do nothing
    pub fn abort(&mut self) {
        if !self.is_finished() {
            self.aborted = true;
        }
    }

    /// Runs every remaining step and returns the summary
    pub fn run_to_end(&mut self) -> SimulationSummary {
        while self.advance().is_some() {}
        self.summary()
    }

    pub fn is_finished(&self) -> bool {
        self.aborted || self.engine.as_ref().map_or(true, |e| e.remaining() == 0)
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Records for every step executed so far, in order
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Consumes the simulator, keeping only its records
    pub fn into_records(self) -> Vec<StepRecord> {
        self.records
    }

    pub fn policy(&self) -> PolicyKind {
        self.policy
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// The number of references in the whole run, executed or not
    pub fn total_references(&self) -> usize {
        self.engine.as_ref().map_or(0, |e| e.references().len())
    }

    /// Statistics over the steps executed so far
    pub fn summary(&self) -> SimulationSummary {
        let faults = self.records.last().map_or(0, |r| r.faults);
        SimulationSummary::new(self.policy, self.frames, self.records.len(), faults, self.aborted)
    }

    /// Gets the wall-clock time spent inside the engine
    pub fn get_execution_time(&self) -> &Duration {
        &self.simulation_time
    }
}

/// Runs one policy to completion, returning every record and the summary
pub fn simulate(policy: PolicyKind, references: &[Page], frames: usize) -> (Vec<StepRecord>, SimulationSummary) {
    let mut simulator = Simulator::new(policy, references, frames);
    let summary = simulator.run_to_end();
    (simulator.into_records(), summary)
}

/// Runs each policy over the same input, each on its own fresh simulator
pub fn compare(references: &[Page], frames: usize, policies: &[PolicyKind]) -> Comparison {
    Comparison {
        summaries: policies
            .iter()
            .map(|&policy| Simulator::new(policy, references, frames).run_to_end())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFS: [Page; 12] = [1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5];

    #[test]
    fn advance_one_step_at_a_time() {
        let mut simulator = Simulator::new(PolicyKind::Fifo, &REFS, 3);
        assert_eq!(simulator.total_references(), 12);
        assert_eq!(simulator.advance().map(|r| r.page), Some(1));
        assert_eq!(simulator.advance().map(|r| r.page), Some(2));
        assert_eq!(simulator.records().len(), 2);
        assert!(!simulator.is_finished());
    }

    #[test]
    fn abort_keeps_partial_summary() {
        let mut simulator = Simulator::new(PolicyKind::LeastRecentlyUsed, &REFS, 3);
        for _ in 0..5 {
            simulator.advance();
        }
        simulator.abort();
        assert!(simulator.advance().is_none());
        assert!(simulator.is_finished());
        let summary = simulator.summary();
        assert!(summary.aborted);
        assert_eq!(summary.references, 5);
        // 1 2 3 4 1 are all faults with 3 frames
        assert_eq!(summary.faults, 5);
        assert_eq!(summary.hits, 0);
    }

    #[test]
    fn abort_after_finish_is_not_an_abort() {
        let mut simulator = Simulator::new(PolicyKind::Optimal, &REFS, 3);
        simulator.run_to_end();
        simulator.abort();
        assert!(!simulator.summary().aborted);
    }

    #[test]
    fn empty_run_summary() {
        let (records, summary) = simulate(PolicyKind::Fifo, &[], 3);
        assert!(records.is_empty());
        assert_eq!(summary.faults, 0);
        assert_eq!(summary.references, 0);
        assert_eq!(summary.hit_ratio, 1.0);
        assert_eq!(summary.fault_rate, 0.0);
    }

    #[test]
    fn zero_frames_summary() {
        let mut simulator = Simulator::new(PolicyKind::LeastRecentlyUsed, &REFS, 0);
        assert!(simulator.is_finished());
        assert_eq!(simulator.run_to_end().faults, 0);
    }

    #[test]
    fn compare_keeps_requested_order() {
        let comparison = compare(&REFS, 3, &[PolicyKind::Optimal, PolicyKind::Fifo]);
        let order: Vec<_> = comparison.summaries.iter().map(|s| s.policy).collect();
        assert_eq!(order, vec![PolicyKind::Optimal, PolicyKind::Fifo]);
        assert_eq!(comparison.best(), Some(PolicyKind::Optimal));
    }
}
