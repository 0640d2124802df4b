//! Byte layout of a stored tree blob
//!
//! ```text
//! [u64 LE leaf count N]
//! [level L-1 entries][level L-2 entries] ... [level 0 entries]
//! ```
//!
//! Every entry is a 32-byte wire-oriented hash. The root (level L) is never
//! stored because it is the blob's name. Self-duplicated nodes are never
//! stored either, so level `i` holds exactly `ceil(N / 2^i)` entries and all
//! offsets follow from N.
//!
//! Nothing in here touches a file; the reader asks this module where to seek.

use crate::core::types::{level_sizes, HASH_SIZE};

/// Size of the leaf count header in bytes
pub const HEADER_SIZE: u64 = 8;

const ENTRY_SIZE: u64 = HASH_SIZE as u64;

/// Offsets for a blob holding a tree with a given leaf count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobLayout {
    leaf_count: u64,
    /// Entries per level, leaves first, root level last
    level_sizes: Vec<u64>,
    /// Entry index at which each stored level begins (levels 0..L)
    level_starts: Vec<u64>,
    /// Total stored entries
    stored_entries: u64,
    /// Header plus every stored entry, in bytes
    blob_len: u64,
}

/// Where the sibling of a path node lives at one level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiblingLocation {
    /// Absolute byte offset of the sibling entry
    pub offset: u64,
    /// The node is the unpaired last entry and acts as its own sibling
    pub self_duplicate: bool,
}

/// One level of a path walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    pub level: u32,
    /// Position of the path node within its level
    pub position: u64,
    /// Absolute byte offset of the path node
    pub node_offset: u64,
    /// The path node is a right child, so its sibling sits just before it
    pub is_right_child: bool,
    pub sibling: SiblingLocation,
}

impl BlobLayout {
    /// Layout for `leaf_count` leaves
    ///
    /// Returns `None` for zero leaves or when the blob size would not fit in
    /// a u64, which can only come from a damaged header.
    pub fn new(leaf_count: u64) -> Option<Self> {
        if leaf_count == 0 {
            return None;
        }

        let level_sizes = level_sizes(leaf_count);
        let height = level_sizes.len() - 1;

        // Levels are stored top-down, so level L-1 starts at entry 0
        let mut level_starts = vec![0u64; height];
        let mut cumulative = 0u64;
        for level in (0..height).rev() {
            level_starts[level] = cumulative;
            cumulative = cumulative.checked_add(level_sizes[level])?;
        }

        let blob_len = cumulative.checked_mul(ENTRY_SIZE)?.checked_add(HEADER_SIZE)?;

        Some(Self {
            leaf_count,
            level_sizes,
            level_starts,
            stored_entries: cumulative,
            blob_len,
        })
    }

    pub fn leaf_count(&self) -> u64 {
        self.leaf_count
    }

    /// Number of levels above the leaves
    pub fn height(&self) -> u32 {
        (self.level_sizes.len() - 1) as u32
    }

    pub fn level_sizes(&self) -> &[u64] {
        &self.level_sizes
    }

    /// Entries physically present in the body
    pub fn stored_entries(&self) -> u64 {
        self.stored_entries
    }

    /// Exact size of a well-formed blob
    pub fn blob_len(&self) -> u64 {
        self.blob_len
    }

    /// Byte offset of entry `position` within stored `level`
    pub fn entry_offset(&self, level: u32, position: u64) -> u64 {
        HEADER_SIZE + (self.level_starts[level as usize] + position) * ENTRY_SIZE
    }

    /// Sibling of leaf `index`'s ancestor at `level`
    ///
    /// `level` must be below the root and `index` less than the leaf count.
    pub fn sibling(&self, index: u64, level: u32) -> SiblingLocation {
        debug_assert!(index < self.leaf_count);
        debug_assert!(level < self.height());

        let position = index >> level;
        let size = self.level_sizes[level as usize];
        let (sibling_position, self_duplicate) = if position & 1 == 1 {
            (position - 1, false)
        } else if position + 1 < size {
            (position + 1, false)
        } else {
            (position, true)
        };

        SiblingLocation {
            offset: self.entry_offset(level, sibling_position),
            self_duplicate,
        }
    }

    /// Steps to read the path of leaf `index`, in file order (top level first)
    ///
    /// The side taken at each level comes from one bit of the index, tested
    /// with a mask that starts at bit `L-1` and moves right.
    pub fn steps(&self, index: u64) -> Vec<PathStep> {
        debug_assert!(index < self.leaf_count);

        let height = self.height();
        let mut steps = Vec::with_capacity(height as usize);
        if height == 0 {
            return steps;
        }

        let mut mask = 1u64 << (height - 1);
        let mut position = 0u64;
        for level in (0..height).rev() {
            let is_right_child = index & mask != 0;
            position = (position << 1) | u64::from(is_right_child);

            let size = self.level_sizes[level as usize];
            let (sibling_position, self_duplicate) = if is_right_child {
                (position - 1, false)
            } else if position + 1 < size {
                (position + 1, false)
            } else {
                (position, true)
            };

            steps.push(PathStep {
                level,
                position,
                node_offset: self.entry_offset(level, position),
                is_right_child,
                sibling: SiblingLocation {
                    offset: self.entry_offset(level, sibling_position),
                    self_duplicate,
                },
            });
            mask >>= 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_zero_leaves_has_no_layout() {
        assert!(BlobLayout::new(0).is_none());
    }

    #[test]
    fn test_huge_leaf_count_overflows() {
        assert!(BlobLayout::new(u64::MAX).is_none());
    }

    #[test]
    fn test_largest_representable_blob() {
        // 2^58 leaves need just under 2^64 bytes; 2^59 leaves do not fit
        let layout = BlobLayout::new(1 << 58).unwrap();
        assert_eq!(layout.stored_entries(), (1 << 59) - 2);
        assert_eq!(layout.blob_len(), u64::MAX - 55);
        assert!(BlobLayout::new(1 << 59).is_none());
    }

    #[test]
    fn test_single_leaf_stores_nothing() {
        let layout = BlobLayout::new(1).unwrap();
        assert_eq!(layout.height(), 0);
        assert_eq!(layout.stored_entries(), 0);
        assert_eq!(layout.blob_len(), HEADER_SIZE);
        assert!(layout.steps(0).is_empty());
    }

    #[test]
    fn test_three_leaves() {
        // Body: [ab, cc][a, b, c]
        let layout = BlobLayout::new(3).unwrap();
        assert_eq!(layout.height(), 2);
        assert_eq!(layout.stored_entries(), 5);
        assert_eq!(layout.blob_len(), 8 + 5 * 32);
        assert_eq!(layout.entry_offset(1, 0), 8);
        assert_eq!(layout.entry_offset(0, 0), 8 + 2 * 32);

        let steps = layout.steps(2);
        assert_eq!(steps.len(), 2);

        // Level 1: node is cc (position 1, right child), sibling ab
        assert_eq!(steps[0].level, 1);
        assert!(steps[0].is_right_child);
        assert_eq!(steps[0].sibling.offset, 8);
        assert!(!steps[0].sibling.self_duplicate);

        // Level 0: node is c, unpaired, sibling is itself
        assert_eq!(steps[1].level, 0);
        assert_eq!(steps[1].position, 2);
        assert!(steps[1].sibling.self_duplicate);
        assert_eq!(steps[1].sibling.offset, steps[1].node_offset);
        assert_eq!(steps[1].node_offset, 8 + 4 * 32);
    }

    #[test]
    fn test_steps_match_direct_location() {
        for n in 1..=130u64 {
            let layout = BlobLayout::new(n).unwrap();
            for index in 0..n {
                let steps = layout.steps(index);
                assert_eq!(steps.len() as u32, layout.height());
                for step in steps {
                    assert_eq!(step.position, index >> step.level);
                    assert_eq!(step.sibling, layout.sibling(index, step.level));
                }
            }
        }
    }

    #[test]
    fn test_offsets_stay_inside_blob() {
        for n in 1..=70u64 {
            let layout = BlobLayout::new(n).unwrap();
            for index in 0..n {
                for step in layout.steps(index) {
                    assert!(step.node_offset + 32 <= layout.blob_len());
                    assert!(step.sibling.offset >= HEADER_SIZE);
                    assert!(step.sibling.offset + 32 <= layout.blob_len());
                }
            }
        }
    }
}
