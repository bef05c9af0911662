//! Control-flow graph recovery.
//!
//! Basic blocks live in an arena indexed by [`BlockId`]; successor edges
//! are id lists, so merge points are shared and per-path state never has
//! to copy graph structure. Construction is a two-pass leader/terminator
//! partition over the decoded instruction stream.

mod builder;

pub use builder::build;

use crate::types::BlockSummary;

/// Index of a basic block within its [`Cfg`] arena.
pub type BlockId = usize;

/// A contiguous instruction range `[start, end]` with one entry and one
/// exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicBlock {
    /// Index of the first instruction (the leader).
    pub start: usize,
    /// Index of the last instruction, inclusive.
    pub end: usize,
    /// Successors in the arena. Empty for EXIT blocks; for a conditional
    /// jump, index 0 is the taken target and index 1 the fall-through.
    pub successors: Vec<BlockId>,
}

/// The recovered control-flow graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cfg {
    blocks: Vec<BasicBlock>,
}

impl Cfg {
    pub(crate) fn from_blocks(blocks: Vec<BasicBlock>) -> Self {
        Self { blocks }
    }

    /// The entry block, when the program is non-empty.
    pub fn entry(&self) -> Option<BlockId> {
        if self.blocks.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    /// Access a block by id.
    pub fn block(&self, id: BlockId) -> &BasicBlock {
        &self.blocks[id]
    }

    /// All blocks, ordered by start index.
    pub fn blocks(&self) -> &[BasicBlock] {
        &self.blocks
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True when the program had no instructions.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Serializable per-block summaries, successors given as start
    /// indices.
    pub fn summaries(&self) -> Vec<BlockSummary> {
        self.blocks
            .iter()
            .map(|b| BlockSummary {
                start: b.start,
                end: b.end,
                successors: b
                    .successors
                    .iter()
                    .map(|&id| self.blocks[id].start)
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cfg() {
        let cfg = Cfg::default();
        assert!(cfg.is_empty());
        assert_eq!(cfg.entry(), None);
    }

    #[test]
    fn test_summaries_use_start_indices() {
        let cfg = Cfg::from_blocks(vec![
            BasicBlock {
                start: 0,
                end: 1,
                successors: vec![1],
            },
            BasicBlock {
                start: 2,
                end: 2,
                successors: vec![],
            },
        ]);
        let summaries = cfg.summaries();
        assert_eq!(summaries[0].successors, vec![2]);
        assert_eq!(summaries[1].successors, Vec::<usize>::new());
    }
}
