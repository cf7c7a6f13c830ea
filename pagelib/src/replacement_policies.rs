use crate::config::PolicyKind;
use crate::frame_table::FrameTable;
use crate::Page;

/// A generic trait for page replacement policies. Used by the step engine to pick victims.
///
/// Filling an empty frame is not an eviction, so [`get_victim`] is only called once every frame
/// is occupied. The engine reports every write with [`update_on_load`], whether or not it
/// displaced a page.
///
/// [`get_victim`]: ReplacementPolicy::get_victim
/// [`update_on_load`]: ReplacementPolicy::update_on_load
pub trait ReplacementPolicy {
    /// Updates the policy when a reference hits a resident page
    ///
    /// Not applicable for some policies, a default which does nothing is provided
    ///
    /// # Arguments
    ///
    /// * `slot`: The slot holding the page which was referenced
    ///
    /// returns: ()
    fn update_on_hit(&mut self, _slot: usize) {}

    /// Updates the policy after a page has been written into a slot on a fault
    ///
    /// # Arguments
    ///
    /// * `slot`: The slot which now holds the faulting page
    ///
    /// returns: ()
    fn update_on_load(&mut self, _slot: usize) {}

    /// Picks the slot to evict. The table is full when this is called.
    ///
    /// # Arguments
    ///
    /// * `frames`: The current frame table
    /// * `references`: The whole reference string, for policies which need to see the future
    /// * `position`: The index in `references` of the reference which faulted
    ///
    /// returns: usize, the slot to evict
    fn get_victim(&mut self, frames: &FrameTable, references: &[Page], position: usize) -> usize;
}

/// First in, first out. A cursor walks the frames in the order they were loaded.
#[derive(Debug, Clone)]
pub struct Fifo {
    cursor: usize,
    frames: usize,
}

impl Fifo {
    pub fn new(frames: usize) -> Self {
        Self {
            cursor: 0,
            frames,
        }
    }
}

impl ReplacementPolicy for Fifo {
    fn update_on_load(&mut self, _slot: usize) {
        self.cursor = (self.cursor + 1) % self.frames.max(1);
    }

    fn get_victim(&mut self, _frames: &FrameTable, _references: &[Page], _position: usize) -> usize {
        self.cursor
    }
}

/// Least Recently Used replacement policy
///
/// This implementation keeps track of when each slot was last used with a logical clock, which
/// ticks on every hit and every load. Timestamps only ever increase, so the smallest one belongs
/// to the stalest slot
#[derive(Debug, Clone)]
pub struct LeastRecentlyUsed {
    last_used_times: Vec<u64>,
    time: u64,
}

impl LeastRecentlyUsed {
    pub fn new(frames: usize) -> Self {
        Self {
            last_used_times: vec![0; frames],
            time: 0,
        }
    }

    fn touch(&mut self, slot: usize) {
        self.time += 1;
        self.last_used_times[slot] = self.time;
    }

    /// The logical time each slot was last used, 0 if never
    pub fn last_used_times(&self) -> &[u64] {
        &self.last_used_times
    }
}

impl ReplacementPolicy for LeastRecentlyUsed {
    fn update_on_hit(&mut self, slot: usize) {
        self.touch(slot);
    }

    fn update_on_load(&mut self, slot: usize) {
        self.touch(slot);
    }

    fn get_victim(&mut self, _frames: &FrameTable, _references: &[Page], _position: usize) -> usize {
        let mut index = 0;
        let mut min_value = u64::MAX;
        let mut min_index = 0;
        // Strictly less than, so ties go to the lowest slot
        while index < self.last_used_times.len() {
            if self.last_used_times[index] < min_value {
                min_value = self.last_used_times[index];
                min_index = index;
            }
            index += 1;
        }
        min_index
    }
}

/// Belady's optimal policy. Evicts the page whose next use is farthest in the future.
///
/// Needs the whole reference string, so it is only useful as a baseline for offline analysis.
/// There is no state, every decision scans the remaining references from scratch
#[derive(Debug, Clone, Default)]
pub struct Optimal;

impl Optimal {
    /// Finds the next index after `position` at which `page` is referenced
    fn next_use(page: Page, references: &[Page], position: usize) -> Option<usize> {
        references
            .get(position + 1..)?
            .iter()
            .position(|&p| p == page)
            .map(|offset| position + 1 + offset)
    }
}

impl ReplacementPolicy for Optimal {
    fn get_victim(&mut self, frames: &FrameTable, references: &[Page], position: usize) -> usize {
        let mut farthest: Option<(usize, usize)> = None;
        for slot in 0..frames.len() {
            let Some(page) = frames.page_at(slot) else {
                continue;
            };
            match Self::next_use(page, references, position) {
                // Never used again, nothing can beat this
                None => return slot,
                Some(next) => {
                    if farthest.map_or(true, |(_, best)| next > best) {
                        farthest = Some((slot, next));
                    }
                }
            }
        }
        farthest.map_or(0, |(slot, _)| slot)
    }
}

/// Enum for the 3 policies provided by the library
///
/// Branching explicitly on the concrete policy keeps the engine free of trait objects, and lets
/// each policy keep its own state shape
#[derive(Debug, Clone)]
pub enum GenericPolicy {
    Fifo(Fifo),
    LeastRecentlyUsed(LeastRecentlyUsed),
    Optimal(Optimal),
}

impl GenericPolicy {
    /// Creates fresh policy state for a run over `frames` frames
    pub fn new(kind: PolicyKind, frames: usize) -> Self {
        match kind {
            PolicyKind::Fifo => Fifo::new(frames).into(),
            PolicyKind::LeastRecentlyUsed => LeastRecentlyUsed::new(frames).into(),
            PolicyKind::Optimal => Optimal.into(),
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            GenericPolicy::Fifo(_) => PolicyKind::Fifo,
            GenericPolicy::LeastRecentlyUsed(_) => PolicyKind::LeastRecentlyUsed,
            GenericPolicy::Optimal(_) => PolicyKind::Optimal,
        }
    }
}

impl From<Fifo> for GenericPolicy {
    fn from(value: Fifo) -> Self {
        Self::Fifo(value)
    }
}

impl From<LeastRecentlyUsed> for GenericPolicy {
    fn from(value: LeastRecentlyUsed) -> Self {
        Self::LeastRecentlyUsed(value)
    }
}

impl From<Optimal> for GenericPolicy {
    fn from(value: Optimal) -> Self {
        Self::Optimal(value)
    }
}

impl ReplacementPolicy for GenericPolicy {
    fn update_on_hit(&mut self, slot: usize) {
        match self {
            GenericPolicy::Fifo(p) => p.update_on_hit(slot),
            GenericPolicy::LeastRecentlyUsed(p) => p.update_on_hit(slot),
            GenericPolicy::Optimal(p) => p.update_on_hit(slot),
        }
    }

    fn update_on_load(&mut self, slot: usize) {
        match self {
            GenericPolicy::Fifo(p) => p.update_on_load(slot),
            GenericPolicy::LeastRecentlyUsed(p) => p.update_on_load(slot),
            GenericPolicy::Optimal(p) => p.update_on_load(slot),
        }
    }

    fn get_victim(&mut self, frames: &FrameTable, references: &[Page], position: usize) -> usize {
        match self {
            GenericPolicy::Fifo(p) => p.get_victim(frames, references, position),
            GenericPolicy::LeastRecentlyUsed(p) => p.get_victim(frames, references, position),
            GenericPolicy::Optimal(p) => p.get_victim(frames, references, position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_table(pages: &[Page]) -> FrameTable {
        let mut table = FrameTable::new(pages.len());
        for (slot, &page) in pages.iter().enumerate() {
            table.occupy(slot, page);
        }
        table
    }

    #[test]
    fn fifo_cursor_wraps_in_load_order() {
        let table = full_table(&[1, 2, 3]);
        let mut fifo = Fifo::new(3);
        let mut victims = Vec::new();
        for _ in 0..3 {
            fifo.update_on_load(0);
        }
        for _ in 0..4 {
            let victim = fifo.get_victim(&table, &[], 0);
            victims.push(victim);
            fifo.update_on_load(victim);
        }
        assert_eq!(victims, vec![0, 1, 2, 0]);
    }

    #[test]
    fn fifo_ignores_hits() {
        let table = full_table(&[1, 2]);
        let mut fifo = Fifo::new(2);
        fifo.update_on_load(0);
        fifo.update_on_load(1);
        fifo.update_on_hit(0);
        fifo.update_on_hit(0);
        assert_eq!(fifo.get_victim(&table, &[], 0), 0);
    }

    #[test]
    fn lru_evicts_stalest_slot() {
        let table = full_table(&[1, 2, 3]);
        let mut lru = LeastRecentlyUsed::new(3);
        lru.update_on_load(0);
        lru.update_on_load(1);
        lru.update_on_load(2);
        lru.update_on_hit(0);
        assert_eq!(lru.get_victim(&table, &[], 0), 1);
        lru.update_on_hit(1);
        assert_eq!(lru.get_victim(&table, &[], 0), 2);
    }

    #[test]
    fn lru_ties_go_to_lowest_slot() {
        let table = full_table(&[1, 2]);
        let mut lru = LeastRecentlyUsed::new(2);
        assert_eq!(lru.get_victim(&table, &[], 0), 0);
    }

    #[test]
    fn optimal_prefers_page_never_used_again() {
        let table = full_table(&[1, 2, 3]);
        let refs = [1, 2, 3, 4, 3, 1];
        assert_eq!(Optimal.get_victim(&table, &refs, 3), 1);
    }

    #[test]
    fn optimal_picks_lowest_of_several_unused_pages() {
        let table = full_table(&[1, 2, 3]);
        let refs = [1, 2, 3, 4, 2];
        assert_eq!(Optimal.get_victim(&table, &refs, 3), 0);
    }

    #[test]
    fn optimal_picks_farthest_next_use() {
        let table = full_table(&[1, 2, 3]);
        let refs = [1, 2, 3, 4, 2, 1, 3];
        assert_eq!(Optimal.get_victim(&table, &refs, 3), 2);
    }

    #[test]
    fn optimal_only_looks_after_current_position() {
        let table = full_table(&[1, 2]);
        // Page 1 is at the current position but never after it
        let refs = [2, 1, 2];
        assert_eq!(Optimal.get_victim(&table, &refs, 1), 0);
    }

    #[test]
    fn optimal_at_end_of_string_evicts_first_slot() {
        let table = full_table(&[1, 2]);
        let refs = [1, 2, 3];
        assert_eq!(Optimal.get_victim(&table, &refs, 2), 0);
    }

    #[test]
    fn generic_policy_reports_kind() {
        assert_eq!(GenericPolicy::new(PolicyKind::Fifo, 2).kind(), PolicyKind::Fifo);
        assert_eq!(GenericPolicy::new(PolicyKind::LeastRecentlyUsed, 2).kind(), PolicyKind::LeastRecentlyUsed);
        assert_eq!(GenericPolicy::new(PolicyKind::Optimal, 2).kind(), PolicyKind::Optimal);
    }
}
