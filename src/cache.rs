//! Bounded-window data-cache locality model.
//!
//! After a path completes, every cacheable access starts DRAM-priced.
//! An access is promoted to a hit when some access in the preceding
//! window is provably within the near distance: the solver must refute
//! `|a_i - a_j| > K` under the path constraints. A verdict of `unknown`
//! keeps the DRAM charge (conservative). Map-helper traffic is never
//! promoted and always pays DRAM.

use crate::exec::MemAccess;
use crate::solver::{ExprFactory, Feasibility, PathSolver};
use crate::types::{AnalyzerOptions, PathStats};
use tracing::{debug, warn};

/// Price the memory accesses of one completed path.
///
/// Mutates the `dram` field of promoted records and returns the total
/// DRAM penalty of the path.
pub fn apply<'ctx>(
    accesses: &mut [MemAccess<'ctx>],
    solver: &PathSolver<'ctx>,
    factory: &ExprFactory<'ctx>,
    opts: &AnalyzerOptions,
    stats: &mut PathStats,
) -> u64 {
    for i in 0..accesses.len() {
        if !accesses[i].kind.is_cacheable() {
            continue;
        }
        let window_start = i.saturating_sub(opts.cache_window);
        if scan_window(accesses, window_start, i, solver, factory, opts, stats) {
            accesses[i].dram = 0;
            stats.cache_hits += 1;
            debug!(index = accesses[i].index, "cache hit: near prior access");
        }
    }

    accesses.iter().map(|a| u64::from(a.dram)).sum()
}

/// Scan the window before access `i`, most recent first. Returns true
/// when a provably near access exists.
fn scan_window<'ctx>(
    accesses: &[MemAccess<'ctx>],
    window_start: usize,
    i: usize,
    solver: &PathSolver<'ctx>,
    factory: &ExprFactory<'ctx>,
    opts: &AnalyzerOptions,
    stats: &mut PathStats,
) -> bool {
    let addr = &accesses[i].addr;
    for j in (window_start..i).rev() {
        if !accesses[j].kind.is_cacheable() {
            continue;
        }
        let prior = &accesses[j].addr;

        // Syntactically identical addresses need no solver round-trip.
        if addr == prior {
            return true;
        }

        solver.push();
        let apart = factory
            .abs_diff(addr, prior)
            .bvugt(&factory.bv64(opts.near_distance as i64));
        solver.assert_(&apart);
        let verdict = solver.check();
        solver.pop();

        match verdict {
            Feasibility::Unsat => return true,
            Feasibility::Unknown => {
                stats.solver_unknowns += 1;
                warn!(
                    index = accesses[i].index,
                    prior = accesses[j].index,
                    "solver returned unknown on locality query; keeping DRAM charge"
                );
            }
            Feasibility::Sat => {}
        }
    }
    false
}
