use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::collections::TryReserveError;
use crate::Page;

/// A fixed number of frames, each either empty or holding one resident page, together with an
/// index from page to frame
///
/// The index is what makes membership checks O(1), so every mutation goes through [`occupy`]
/// which keeps both sides in step. A page is resident in at most one slot at any time.
///
/// [`occupy`]: FrameTable::occupy
#[derive(Debug, Clone)]
pub struct FrameTable {
    slots: Vec<Option<Page>>,
    index: HashMap<Page, usize>,
}

impl FrameTable {
    /// Creates a table with `frames` empty slots
    ///
    /// # Arguments
    ///
    /// * `frames`: The number of slots, fixed for the lifetime of the table
    ///
    /// returns: FrameTable
    pub fn new(frames: usize) -> Self {
        Self {
            slots: vec![None; frames],
            index: HashMap::with_capacity(frames),
        }
    }

    /// Like [`FrameTable::new`], but reports allocation failure instead of aborting the process
    pub fn try_new(frames: usize) -> Result<Self, TryReserveError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(frames)?;
        slots.resize(frames, None);
        let mut index = HashMap::new();
        index.try_reserve(frames)?;
        Ok(Self { slots, index })
    }

    /// Gets the slot holding `page`, if it is resident
    pub fn lookup(&self, page: Page) -> Option<usize> {
        self.index.get(&page).copied()
    }

    /// Writes `page` into `slot`, returning the page that was there before
    ///
    /// The incumbent's mapping is dropped from the index before the new one is added. The caller
    /// must not pass a page which is already resident in a different slot.
    ///
    /// # Arguments
    ///
    /// * `slot`: The slot to write, must be less than [`FrameTable::len`]
    /// * `page`: The page being loaded
    ///
    /// returns: Option<Page>, the evicted page
    pub fn occupy(&mut self, slot: usize, page: Page) -> Option<Page> {
        debug_assert!(
            self.lookup(page).map_or(true, |s| s == slot),
            "page {page} is already resident in another slot"
        );
        let previous = self.slots[slot].replace(page);
        if let Some(old) = previous {
            // Only remove the mapping if it still points here
            if let Entry::Occupied(entry) = self.index.entry(old) {
                if *entry.get() == slot {
                    entry.remove();
                }
            }
        }
        self.index.insert(page, slot);
        previous
    }

    /// Gets the lowest numbered empty slot, or None if every slot is occupied
    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Gets the page in a slot
    pub fn page_at(&self, slot: usize) -> Option<Page> {
        self.slots.get(slot).copied().flatten()
    }

    /// The number of slots, occupied or not
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The number of occupied slots
    pub fn occupied(&self) -> usize {
        self.index.len()
    }

    pub fn is_full(&self) -> bool {
        self.occupied() == self.len()
    }

    /// A view of every slot in order, for snapshots and rendering
    pub fn slots(&self) -> &[Option<Page>] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_is_empty() {
        let table = FrameTable::new(3);
        assert_eq!(table.len(), 3);
        assert_eq!(table.occupied(), 0);
        assert_eq!(table.first_empty(), Some(0));
        assert_eq!(table.slots(), &[None, None, None]);
    }

    #[test]
    fn occupy_fills_lowest_empty_slot_first() {
        let mut table = FrameTable::new(3);
        assert_eq!(table.occupy(0, 7), None);
        assert_eq!(table.first_empty(), Some(1));
        assert_eq!(table.occupy(1, 9), None);
        assert_eq!(table.occupy(2, 4), None);
        assert_eq!(table.first_empty(), None);
        assert!(table.is_full());
    }

    #[test]
    fn occupy_replaces_stale_mapping() {
        let mut table = FrameTable::new(2);
        table.occupy(0, 1);
        table.occupy(1, 2);
        assert_eq!(table.occupy(0, 3), Some(1));
        assert_eq!(table.lookup(1), None);
        assert_eq!(table.lookup(3), Some(0));
        assert_eq!(table.lookup(2), Some(1));
        assert_eq!(table.occupied(), 2);
    }

    #[test]
    fn rewriting_the_same_page_keeps_it_resident() {
        let mut table = FrameTable::new(1);
        table.occupy(0, 5);
        assert_eq!(table.occupy(0, 5), Some(5));
        assert_eq!(table.lookup(5), Some(0));
        assert_eq!(table.occupied(), 1);
    }

    #[test]
    fn zero_frames_is_always_full() {
        let table = FrameTable::new(0);
        assert!(table.is_empty());
        assert!(table.is_full());
        assert_eq!(table.first_empty(), None);
    }

    #[test]
    fn try_new_matches_new() {
        let table = FrameTable::try_new(4).unwrap();
        assert_eq!(table.slots(), FrameTable::new(4).slots());
    }
}
