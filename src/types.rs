//! Core types for the WCET analyzer.
//!
//! This module defines the tunable analysis options and the serializable
//! result types produced by a completed analysis.

use crate::isa::catalog;
use serde::{Deserialize, Serialize};

/// Assumed core clock, used to convert cycles into wall time.
pub const CLOCK_HZ: f64 = 6.67e8;

/// How the explorer treats a back-edge on the current path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopPolicy {
    /// Cut every back-edge after the first visit. The resulting bound is
    /// unsound for loops that iterate more than once.
    SinglePass,
    /// Allow each block up to the given number of visits on one path
    /// before cutting.
    Bounded(u32),
}

impl LoopPolicy {
    /// Maximum number of visits of one block on a single path.
    pub fn visit_limit(self) -> u32 {
        match self {
            LoopPolicy::SinglePass => 1,
            LoopPolicy::Bounded(n) => n.max(1),
        }
    }
}

impl Default for LoopPolicy {
    fn default() -> Self {
        LoopPolicy::SinglePass
    }
}

/// Tunable knobs of the analysis.
///
/// The defaults reproduce the reference cost model; none of the constants
/// are universal truths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerOptions {
    /// How many prior accesses the cache model inspects.
    pub cache_window: usize,
    /// Two addresses at most this many bytes apart are near.
    pub near_distance: u64,
    /// Cycle charge for an access with no proven-near predecessor.
    pub dram_penalty: u32,
    /// Cycle charge for a helper call with no modeled semantics.
    pub helper_default_cost: u32,
    /// Back-edge treatment.
    pub loop_policy: LoopPolicy,
}

impl AnalyzerOptions {
    /// Default options: window 5, near distance 4 bytes, DRAM 87 cycles,
    /// single-pass loops.
    pub fn new() -> Self {
        Self {
            cache_window: 5,
            near_distance: 4,
            dram_penalty: catalog::DRAM_PENALTY,
            helper_default_cost: catalog::HELPER_DEFAULT_COST,
            loop_policy: LoopPolicy::default(),
        }
    }

    /// A model without the cache: every access pays DRAM.
    pub fn no_cache() -> Self {
        Self {
            cache_window: 0,
            ..Self::new()
        }
    }

    /// Allow loops to be unrolled up to `bound` iterations per path.
    pub fn with_loop_bound(bound: u32) -> Self {
        Self {
            loop_policy: LoopPolicy::Bounded(bound),
            ..Self::new()
        }
    }
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// One basic block of the recovered CFG, in summary form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSummary {
    /// Index of the first instruction.
    pub start: usize,
    /// Index of the last instruction (inclusive).
    pub end: usize,
    /// Successor blocks, by starting instruction index.
    pub successors: Vec<usize>,
}

/// Exploration counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStats {
    /// Paths that reached a terminal block.
    pub completed: u64,
    /// Branch directions proven infeasible and skipped.
    pub pruned: u64,
    /// Back-edges cut on some path.
    pub back_edges: u64,
    /// Memory accesses promoted to a cache hit.
    pub cache_hits: u64,
    /// Solver verdicts of `unknown`, handled conservatively.
    pub solver_unknowns: u64,
}

/// Result of a completed analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Maximum cycle cost over all feasible, finite paths.
    pub upper_bound_cycles: u64,
    /// The bound converted to milliseconds at [`CLOCK_HZ`].
    pub upper_bound_ms: f64,
    /// Number of decoded instructions.
    pub instruction_count: usize,
    /// The recovered control-flow graph.
    pub blocks: Vec<BlockSummary>,
    /// Exploration counters.
    pub stats: PathStats,
}

impl AnalysisReport {
    /// Convert a cycle count to milliseconds at [`CLOCK_HZ`].
    pub fn cycles_to_ms(cycles: u64) -> f64 {
        cycles as f64 / CLOCK_HZ * 1e3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_options() {
        let opts = AnalyzerOptions::new();
        assert_eq!(opts.cache_window, 5);
        assert_eq!(opts.near_distance, 4);
        assert_eq!(opts.dram_penalty, 87);
        assert_eq!(opts.loop_policy.visit_limit(), 1);
    }

    #[test]
    fn test_loop_bound_preset() {
        let opts = AnalyzerOptions::with_loop_bound(3);
        assert_eq!(opts.loop_policy.visit_limit(), 3);
        // A zero bound still explores each block once.
        assert_eq!(LoopPolicy::Bounded(0).visit_limit(), 1);
    }

    #[test]
    fn test_cycles_to_ms() {
        let ms = AnalysisReport::cycles_to_ms(667_000_000);
        assert!((ms - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_report_serialization() {
        let report = AnalysisReport {
            upper_bound_cycles: 111,
            upper_bound_ms: AnalysisReport::cycles_to_ms(111),
            instruction_count: 3,
            blocks: vec![BlockSummary {
                start: 0,
                end: 2,
                successors: vec![],
            }],
            stats: PathStats::default(),
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"upper_bound_cycles\":111"));
    }
}
