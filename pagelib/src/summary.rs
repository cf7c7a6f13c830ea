use serde::Serialize;
use crate::config::PolicyKind;

/// The statistics for one run. Can be serialised for output
///
/// Everything is computed from the steps actually executed, so an aborted run still reports
/// consistent numbers for the prefix it got through. With no steps at all the hit ratio is 1.0 and
/// the fault rate 0.0
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub policy: PolicyKind,
    pub frames: usize,
    pub references: usize,
    pub faults: u64,
    pub hits: u64,
    pub hit_ratio: f64,
    pub fault_rate: f64,
    pub aborted: bool,
}

impl SimulationSummary {
    pub fn new(policy: PolicyKind, frames: usize, references: usize, faults: u64, aborted: bool) -> Self {
        let hits = references as u64 - faults;
        let (hit_ratio, fault_rate) = if references == 0 {
            (1.0, 0.0)
        } else {
            (hits as f64 / references as f64, faults as f64 / references as f64)
        };
        Self {
            policy,
            frames,
            references,
            faults,
            hits,
            hit_ratio,
            fault_rate,
            aborted,
        }
    }
}

/// Summaries for several policies over the same reference string and frame count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub summaries: Vec<SimulationSummary>,
}

impl Comparison {
    /// The summary for a policy, if it was part of the comparison
    pub fn get(&self, policy: PolicyKind) -> Option<&SimulationSummary> {
        self.summaries.iter().find(|s| s.policy == policy)
    }

    /// The policy with the fewest faults, the first one listed wins ties
    pub fn best(&self) -> Option<PolicyKind> {
        self.summaries
            .iter()
            .reduce(|best, s| if s.faults < best.faults { s } else { best })
            .map(|s| s.policy)
    }
}
