use crate::config::PolicyKind;
use crate::Page;

/// Reference string from Belady's anomaly, used throughout the textbook examples
pub const BELADY_REFERENCES: [Page; 12] = [1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5];

/// The classic Silberschatz reference string, truncated to 13 references
pub const SILBERSCHATZ_REFERENCES: [Page; 13] = [7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2];

/// A reference string with a known fault count for one policy
pub struct TextbookCase {
    pub name: &'static str,
    pub references: &'static [Page],
    pub frames: usize,
    pub policy: PolicyKind,
    pub expected_faults: u64,
}

/// Gets the cases used by the tests and benchmarks
pub fn textbook_cases() -> Vec<TextbookCase> {
    vec![
        TextbookCase { name: "belady-fifo-3", references: &BELADY_REFERENCES, frames: 3, policy: PolicyKind::Fifo, expected_faults: 9 },
        TextbookCase { name: "belady-fifo-4", references: &BELADY_REFERENCES, frames: 4, policy: PolicyKind::Fifo, expected_faults: 10 },
        TextbookCase { name: "belady-lru-3", references: &BELADY_REFERENCES, frames: 3, policy: PolicyKind::LeastRecentlyUsed, expected_faults: 10 },
        TextbookCase { name: "belady-lru-4", references: &BELADY_REFERENCES, frames: 4, policy: PolicyKind::LeastRecentlyUsed, expected_faults: 8 },
        TextbookCase { name: "belady-optimal-3", references: &BELADY_REFERENCES, frames: 3, policy: PolicyKind::Optimal, expected_faults: 7 },
        TextbookCase { name: "belady-optimal-4", references: &BELADY_REFERENCES, frames: 4, policy: PolicyKind::Optimal, expected_faults: 6 },
        TextbookCase { name: "silberschatz-fifo-3", references: &SILBERSCHATZ_REFERENCES, frames: 3, policy: PolicyKind::Fifo, expected_faults: 10 },
        TextbookCase { name: "silberschatz-lru-3", references: &SILBERSCHATZ_REFERENCES, frames: 3, policy: PolicyKind::LeastRecentlyUsed, expected_faults: 9 },
        TextbookCase { name: "silberschatz-optimal-3", references: &SILBERSCHATZ_REFERENCES, frames: 3, policy: PolicyKind::Optimal, expected_faults: 7 },
        TextbookCase { name: "silberschatz-fifo-4", references: &SILBERSCHATZ_REFERENCES, frames: 4, policy: PolicyKind::Fifo, expected_faults: 7 },
        TextbookCase { name: "silberschatz-lru-4", references: &SILBERSCHATZ_REFERENCES, frames: 4, policy: PolicyKind::LeastRecentlyUsed, expected_faults: 6 },
        TextbookCase { name: "silberschatz-optimal-4", references: &SILBERSCHATZ_REFERENCES, frames: 4, policy: PolicyKind::Optimal, expected_faults: 6 },
    ]
}
