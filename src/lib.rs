//! eBPF+ WCET Analyzer - Worst-Case Execution Time Upper Bounds
//!
//! This library estimates a worst-case runtime upper bound, in CPU
//! cycles, for programs expressed in an extended BPF-like byte-code.
//! It decodes a flat instruction stream, recovers a basic-block
//! control-flow graph, explores every feasible path under SMT-backed
//! path constraints, and prices each path with a per-opcode latency
//! catalog plus a bounded-window cache locality model.
//!
//! # Pipeline
//!
//! - **Decoder**: packed little-endian 8-byte words (16 for wide
//!   instructions) into structured [`isa::Instruction`] records
//! - **CFG builder**: two-pass leader/terminator partition into an
//!   arena of basic blocks
//! - **Symbolic executor**: exact bit-vector transfer functions for the
//!   integer ALU, real-valued floating point, lazy symbolic memory
//! - **Path explorer**: DFS with per-block solver frames and branch
//!   feasibility pruning
//! - **Cache model**: promotes an access to a hit when a windowed prior
//!   access is provably within the same line
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ebpf_wcet::analyze_file;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = analyze_file("path/to/program.bpf")?;
//!     println!("bound: {} cycles", report.upper_bound_cycles);
//!     println!("       {:.6} ms", report.upper_bound_ms);
//!     Ok(())
//! }
//! ```
//!
//! # Soundness
//!
//! Back-edges are cut after a configurable number of visits
//! ([`LoopPolicy`]); the default is a single pass, which makes the bound
//! unsound for loops that iterate more than once. Floating-point
//! comparisons are modeled over reals with no NaN and no rounding.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]

pub mod cache;
pub mod cfg;
pub mod error;
pub mod exec;
pub mod explorer;
pub mod formatter;
pub mod isa;
pub mod solver;
pub mod types;

pub use error::{AnalysisError, Result};
pub use explorer::Explorer;
pub use formatter::{HumanFormatter, JsonFormatter, ReportFormatter};
pub use types::{
    AnalysisReport, AnalyzerOptions, BlockSummary, LoopPolicy, PathStats, CLOCK_HZ,
};

use crate::exec::Executor;
use crate::solver::PathSolver;
use std::path::Path;
use z3::{Config, Context};

/// Analyze a byte-code file.
///
/// This is the primary entry point for file-based analysis. It reads
/// the file and runs the full pipeline with default options.
///
/// # Errors
///
/// Fails when the file cannot be read, when the stream is malformed, or
/// when an analyzed path reaches an unknown opcode.
pub fn analyze_file<P: AsRef<Path>>(path: P) -> Result<AnalysisReport> {
    let data = std::fs::read(path)?;
    analyze_bytes(&data)
}

/// Analyze a byte-code file with custom options.
pub fn analyze_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &AnalyzerOptions,
) -> Result<AnalysisReport> {
    let data = std::fs::read(path)?;
    analyze_bytes_with_options(&data, options)
}

/// Analyze raw byte-code with default options.
pub fn analyze_bytes(data: &[u8]) -> Result<AnalysisReport> {
    analyze_bytes_with_options(data, &AnalyzerOptions::new())
}

/// Analyze raw byte-code with custom options.
///
/// Decodes the stream, recovers the CFG, then explores every feasible
/// path under one shared solver. The returned report carries the upper
/// bound, the block listing and exploration counters.
pub fn analyze_bytes_with_options(
    data: &[u8],
    options: &AnalyzerOptions,
) -> Result<AnalysisReport> {
    let instructions = isa::decode_program(data)?;
    let graph = cfg::build(&instructions)?;

    let ctx = Context::new(&Config::new());
    let exec = Executor::new(&ctx);
    let path_solver = PathSolver::new(&ctx);
    let (bound, stats) =
        Explorer::new(&instructions, &graph, &exec, path_solver, options).explore()?;

    Ok(AnalysisReport {
        upper_bound_cycles: bound,
        upper_bound_ms: AnalysisReport::cycles_to_ms(bound),
        instruction_count: instructions.len(),
        blocks: graph.summaries(),
        stats,
    })
}

/// Get version information for this library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn program(words: &[[u8; 8]]) -> Vec<u8> {
        words.iter().flatten().copied().collect()
    }

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_empty_program_is_zero() {
        let report = analyze_bytes(&[]).unwrap();
        assert_eq!(report.upper_bound_cycles, 0);
        assert_eq!(report.instruction_count, 0);
        assert!(report.blocks.is_empty());
    }

    #[test]
    fn test_single_exit() {
        let report = analyze_bytes(&program(&[[0x95, 0, 0, 0, 0, 0, 0, 0]])).unwrap();
        assert_eq!(report.upper_bound_cycles, 2);
        assert_eq!(report.blocks.len(), 1);
    }

    #[test]
    fn test_two_instruction_straight_line() {
        let report = analyze_bytes(&program(&[
            [0xB7, 0x01, 0, 0, 0x07, 0, 0, 0], // MOV64_K R1, 7
            [0x95, 0, 0, 0, 0, 0, 0, 0],       // EXIT
        ]))
        .unwrap();
        assert_eq!(report.upper_bound_cycles, 6);
    }

    #[test]
    fn test_unreached_branch_is_pruned() {
        let report = analyze_bytes(&program(&[
            [0xB7, 0x01, 0, 0, 0x01, 0, 0, 0], // MOV64_K R1, 1
            [0xB7, 0x02, 0, 0, 0x02, 0, 0, 0], // MOV64_K R2, 2
            [0x1D, 0x21, 0x01, 0, 0, 0, 0, 0], // JEQ_X R1, R2, +1
            [0xB7, 0x03, 0, 0, 0x03, 0, 0, 0], // MOV64_K R3, 3
            [0x95, 0, 0, 0, 0, 0, 0, 0],       // EXIT
        ]))
        .unwrap();
        assert_eq!(report.upper_bound_cycles, 17);
        assert_eq!(report.stats.pruned, 1);
        assert_eq!(report.stats.completed, 1);
    }

    #[test]
    fn test_unconstrained_branch_keeps_mul() {
        // R1 and R2 enter as unconstrained symbols; the taken direction
        // skips a 14-cycle MUL64_K, so the bound comes from the
        // fall-through.
        let report = analyze_bytes(&program(&[
            [0x1D, 0x21, 0x01, 0, 0, 0, 0, 0], // JEQ_X R1, R2, +1
            [0x27, 0x03, 0, 0, 0x05, 0, 0, 0], // MUL64_K R3, 5
            [0x95, 0, 0, 0, 0, 0, 0, 0],       // EXIT
        ]))
        .unwrap();
        assert_eq!(report.stats.completed, 2);
        assert_eq!(report.upper_bound_cycles, 3 + 14 + 2);
    }

    #[test]
    fn test_load_pair_within_line() {
        let report = analyze_bytes(&program(&[
            [0x61, 0xA1, 0xF8, 0xFF, 0, 0, 0, 0], // LDX_W R1, [R10 - 8]
            [0x61, 0xA2, 0xF8, 0xFF, 0, 0, 0, 0], // LDX_W R2, [R10 - 8]
            [0x95, 0, 0, 0, 0, 0, 0, 0],          // EXIT
        ]))
        .unwrap();
        assert_eq!(report.upper_bound_cycles, 111);
        assert_eq!(report.stats.cache_hits, 1);
    }

    #[test]
    fn test_load_pair_far_apart() {
        let report = analyze_bytes(&program(&[
            [0x61, 0xA1, 0xF8, 0xFF, 0, 0, 0, 0], // LDX_W R1, [R10 - 8]
            [0x61, 0xA2, 0x94, 0xFF, 0, 0, 0, 0], // LDX_W R2, [R10 - 108]
            [0x95, 0, 0, 0, 0, 0, 0, 0],          // EXIT
        ]))
        .unwrap();
        assert_eq!(report.upper_bound_cycles, 198);
        assert_eq!(report.stats.cache_hits, 0);
    }

    #[test]
    fn test_back_edge_at_entry() {
        let report = analyze_bytes(&program(&[[0x05, 0, 0xFF, 0xFF, 0, 0, 0, 0]])).unwrap();
        assert_eq!(report.stats.back_edges, 1);
        assert_eq!(report.upper_bound_cycles, 2);
    }

    #[test]
    fn test_malformed_stream() {
        let err = analyze_bytes(&[0x95, 0, 0]).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedInstruction { .. }));
    }

    #[test]
    fn test_block_listing_shape() {
        let report = analyze_bytes(&program(&[
            [0x1D, 0x21, 0x01, 0, 0, 0, 0, 0], // JEQ_X R1, R2, +1
            [0xB7, 0x03, 0, 0, 0x03, 0, 0, 0], // MOV64_K R3, 3
            [0x95, 0, 0, 0, 0, 0, 0, 0],       // EXIT
        ]))
        .unwrap();
        let blocks = &report.blocks;
        assert_eq!(blocks.len(), 3);
        // Taken target before fall-through.
        assert_eq!(blocks[0].successors, vec![2, 1]);
        // Every jump target starts a block.
        assert!(blocks.iter().any(|b| b.start == 2));
    }
}
