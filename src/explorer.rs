//! Depth-first path exploration with feasibility pruning.
//!
//! One solver is shared by the whole exploration and used strictly under
//! stack discipline: a frame per block visit, plus a frame per branch
//! direction. Register state, memory and the per-path access list are
//! deep-copied at every fork; blocks and instructions are shared by
//! reference. Back-edges are cut after the visit limit of the loop
//! policy, which makes the exploration finite and the bound unsound for
//! loops that iterate further.

use crate::cache;
use crate::cfg::{BlockId, Cfg};
use crate::error::{AnalysisError, Result};
use crate::exec::{Executor, MemAccess, SymbolicState};
use crate::isa::catalog;
use crate::isa::insn::Instruction;
use crate::solver::{Feasibility, PathSolver};
use crate::types::{AnalyzerOptions, PathStats};
use std::collections::HashMap;
use tracing::{debug, warn};
use z3::ast::Bool;

/// DFS driver over a recovered CFG.
pub struct Explorer<'ctx, 'p> {
    instructions: &'p [Instruction],
    cfg: &'p Cfg,
    exec: &'p Executor<'ctx>,
    solver: PathSolver<'ctx>,
    opts: &'p AnalyzerOptions,
    visits: HashMap<BlockId, u32>,
    best: u64,
    stats: PathStats,
}

impl<'ctx, 'p> Explorer<'ctx, 'p> {
    /// Create an explorer over a decoded program and its CFG.
    pub fn new(
        instructions: &'p [Instruction],
        cfg: &'p Cfg,
        exec: &'p Executor<'ctx>,
        solver: PathSolver<'ctx>,
        opts: &'p AnalyzerOptions,
    ) -> Self {
        Self {
            instructions,
            cfg,
            exec,
            solver,
            opts,
            visits: HashMap::new(),
            best: 0,
            stats: PathStats::default(),
        }
    }

    /// Explore every feasible path and return the maximum cycle cost
    /// plus exploration counters.
    pub fn explore(mut self) -> Result<(u64, PathStats)> {
        let Some(entry) = self.cfg.entry() else {
            return Ok((0, self.stats));
        };
        let state = self.exec.initial_state();
        self.visit(entry, state, Vec::new(), 0)?;
        debug_assert!(self.visits.values().all(|&c| c == 0));
        Ok((self.best, self.stats))
    }

    fn visit(
        &mut self,
        id: BlockId,
        mut state: SymbolicState<'ctx>,
        mut accesses: Vec<MemAccess<'ctx>>,
        mut runtime: u64,
    ) -> Result<()> {
        let block = self.cfg.block(id);
        let (start, end) = (block.start, block.end);
        let successors = block.successors.clone();

        // Back-edge cut: the block has already been visited up to the
        // loop policy's limit on the current path. The partial path still
        // contributes its single-iteration cost to the bound.
        let count = self.visits.entry(id).or_insert(0);
        if *count >= self.opts.loop_policy.visit_limit() {
            warn!(start, end, "back-edge hit; skipping further iterations");
            self.stats.back_edges += 1;
            self.settle_path(runtime, &mut accesses);
            return Ok(());
        }
        *count += 1;

        debug!(start, end, "visiting block");
        self.solver.push();

        let mut branch_cond: Option<Bool<'ctx>> = None;
        for idx in start..=end {
            let insn = &self.instructions[idx];
            let info = catalog::lookup(insn).ok_or(AnalysisError::UnknownOpcode {
                index: idx,
                opcode: insn.opcode,
            })?;
            runtime += u64::from(info.latency.unwrap_or(0));

            let effect = self.exec.step(idx, insn, &mut state, self.opts)?;
            runtime += u64::from(effect.extra_cycles);
            if let Some(cond) = effect.branch {
                branch_cond = Some(cond);
            }
            if let Some(access) = effect.access {
                accesses.push(access);
            }
        }

        match successors.len() {
            0 => {
                self.stats.completed += 1;
                self.settle_path(runtime, &mut accesses);
            }
            1 => {
                // Unconditional control transfer; no new constraint.
                self.visit(successors[0], state, accesses, runtime)?;
            }
            2 => match branch_cond {
                Some(cond) => {
                    self.branch(successors[0], &cond, state.fork(), accesses.clone(), runtime)?;
                    self.branch(successors[1], &cond.not(), state, accesses, runtime)?;
                }
                None => {
                    warn!(start, end, "conditional block without a condition; exploring both");
                    self.visit(successors[0], state.fork(), accesses.clone(), runtime)?;
                    self.visit(successors[1], state, accesses, runtime)?;
                }
            },
            _ => unreachable!("a block has at most two successors"),
        }

        self.solver.pop();
        *self
            .visits
            .get_mut(&id)
            .expect("block was marked on-path above") -= 1;
        Ok(())
    }

    /// Take one direction of a conditional: assert its condition, prune
    /// on a refuted frame, otherwise recurse. `unknown` counts as
    /// feasible.
    fn branch(
        &mut self,
        target: BlockId,
        cond: &Bool<'ctx>,
        state: SymbolicState<'ctx>,
        accesses: Vec<MemAccess<'ctx>>,
        runtime: u64,
    ) -> Result<()> {
        self.solver.push();
        self.solver.assert_(cond);
        let verdict = self.solver.check();
        let result = match verdict {
            Feasibility::Unsat => {
                debug!(
                    target = self.cfg.block(target).start,
                    "pruned infeasible branch"
                );
                self.stats.pruned += 1;
                Ok(())
            }
            Feasibility::Sat | Feasibility::Unknown => {
                if verdict == Feasibility::Unknown {
                    self.stats.solver_unknowns += 1;
                    warn!("solver returned unknown on branch condition; exploring");
                }
                self.visit(target, state, accesses, runtime)
            }
        };
        self.solver.pop();
        result
    }

    /// A path ended (terminal block or back-edge cut): price its memory
    /// accesses and fold the total into the running maximum.
    fn settle_path(&mut self, runtime: u64, accesses: &mut [MemAccess<'ctx>]) {
        let dram = cache::apply(
            accesses,
            &self.solver,
            self.exec.factory(),
            self.opts,
            &mut self.stats,
        );
        let total = runtime + dram;
        debug!(base = runtime, dram, total, "path settled");
        if total > self.best {
            self.best = total;
        }
    }
}
