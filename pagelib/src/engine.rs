use std::collections::TryReserveError;
use serde::Serialize;
use crate::config::PolicyKind;
use crate::frame_table::FrameTable;
use crate::replacement_policies::{GenericPolicy, ReplacementPolicy};
use crate::Page;

/// What happened on a single reference. Produced by the engine and handed straight to whoever is
/// driving it, the engine keeps no history of its own
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    /// Index of this reference in the reference string
    pub position: usize,
    pub page: Page,
    pub hit: bool,
    /// The slot the page was written to on a fault
    pub loaded_slot: Option<usize>,
    /// The slot whose page was displaced, None on hits and while filling empty frames
    pub evicted_slot: Option<usize>,
    pub evicted_page: Option<Page>,
    /// Frame contents after this step
    pub frames: Vec<Option<Page>>,
    /// Faults so far, including this step
    pub faults: u64,
}

impl StepRecord {
    /// The evicted slot as a signed index, -1 when nothing was evicted
    pub fn evicted_index(&self) -> i64 {
        self.evicted_slot.map_or(-1, |slot| slot as i64)
    }
}

/// Drives one reference at a time through a frame table and a replacement policy
///
/// A miss always prefers an empty frame. Only once the table is full is the policy asked for a
/// victim. Each engine owns its table and policy state, so two engines never see each other's
/// history.
///
/// The engine is also an [`Iterator`] over its step records. It is finite, and creating a fresh
/// engine over the same input restarts it
#[derive(Debug, Clone)]
pub struct StepEngine<'a> {
    references: &'a [Page],
    table: FrameTable,
    policy: GenericPolicy,
    position: usize,
    faults: u64,
}

impl<'a> StepEngine<'a> {
    /// Creates a new engine
    ///
    /// # Arguments
    ///
    /// * `kind`: The replacement policy to use
    /// * `references`: The reference string, the engine steps through it in order
    /// * `frames`: The number of frames. With 0 frames the engine performs no steps
    ///
    /// returns: StepEngine
    pub fn new(kind: PolicyKind, references: &'a [Page], frames: usize) -> Self {
        Self::with_table(kind, references, FrameTable::new(frames))
    }

    /// Like [`StepEngine::new`], but fails instead of aborting if the frame table can't be allocated
    pub fn try_new(kind: PolicyKind, references: &'a [Page], frames: usize) -> Result<Self, TryReserveError> {
        Ok(Self::with_table(kind, references, FrameTable::try_new(frames)?))
    }

    fn with_table(kind: PolicyKind, references: &'a [Page], table: FrameTable) -> Self {
        Self {
            references,
            policy: GenericPolicy::new(kind, table.len()),
            table,
            position: 0,
            faults: 0,
        }
    }

    /// Processes the next reference, returning None once the reference string is exhausted
    pub fn step(&mut self) -> Option<StepRecord> {
        if self.table.is_empty() {
            return None;
        }
        let position = self.position;
        let page = *self.references.get(position)?;
        self.position += 1;

        if let Some(slot) = self.table.lookup(page) {
            self.policy.update_on_hit(slot);
            return Some(self.record(position, page, None, None, None));
        }

        self.faults += 1;
        let (slot, evicted_slot) = match self.table.first_empty() {
            Some(slot) => (slot, None),
            None => {
                let victim = self.policy.get_victim(&self.table, self.references, position);
                (victim, Some(victim))
            }
        };
        let evicted_page = self.table.occupy(slot, page);
        self.policy.update_on_load(slot);
        Some(self.record(position, page, Some(slot), evicted_slot, evicted_page))
    }

    fn record(
        &self,
        position: usize,
        page: Page,
        loaded_slot: Option<usize>,
        evicted_slot: Option<usize>,
        evicted_page: Option<Page>,
    ) -> StepRecord {
        StepRecord {
            position,
            page,
            hit: loaded_slot.is_none(),
            loaded_slot,
            evicted_slot,
            evicted_page,
            frames: self.table.slots().to_vec(),
            faults: self.faults,
        }
    }

    /// Faults so far
    pub fn faults(&self) -> u64 {
        self.faults
    }

    /// The number of references processed so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// The number of steps left before the engine is exhausted
    pub fn remaining(&self) -> usize {
        if self.table.is_empty() {
            0
        } else {
            self.references.len() - self.position
        }
    }

    pub fn policy_kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    pub fn table(&self) -> &FrameTable {
        &self.table
    }

    pub fn references(&self) -> &'a [Page] {
        self.references
    }
}

impl Iterator for StepEngine<'_> {
    type Item = StepRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl ExactSizeIterator for StepEngine<'_> {}
