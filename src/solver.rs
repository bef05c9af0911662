//! SMT facade.
//!
//! The analyzer talks to the solver through this narrow surface: frame
//! management (`push`/`pop`), assertion, a three-valued `check`, and a
//! fresh-symbol factory. Everything else is expression construction on
//! `z3::ast` values. The solver is shared across the whole exploration
//! and is only ever used under stack discipline: every `push` is paired
//! with a `pop` on the same DFS return path.

use std::cell::Cell;
use z3::ast::{Bool, Real, BV};
use z3::{Context, SatResult, Solver};

/// Three-valued feasibility verdict of a `check` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feasibility {
    /// The current assertion stack is satisfiable.
    Sat,
    /// The current assertion stack is unsatisfiable.
    Unsat,
    /// The solver gave up; callers must treat this conservatively.
    Unknown,
}

/// Path-constraint solver handle.
pub struct PathSolver<'ctx> {
    inner: Solver<'ctx>,
}

impl<'ctx> PathSolver<'ctx> {
    /// Create a solver bound to `ctx`.
    pub fn new(ctx: &'ctx Context) -> Self {
        Self {
            inner: Solver::new(ctx),
        }
    }

    /// Open a new assertion frame.
    pub fn push(&self) {
        self.inner.push();
    }

    /// Discard the most recent assertion frame.
    pub fn pop(&self) {
        self.inner.pop(1);
    }

    /// Add a boolean constraint to the current frame.
    pub fn assert_(&self, cond: &Bool<'ctx>) {
        self.inner.assert(cond);
    }

    /// Decide the current assertion stack.
    pub fn check(&self) -> Feasibility {
        match self.inner.check() {
            SatResult::Sat => Feasibility::Sat,
            SatResult::Unsat => Feasibility::Unsat,
            SatResult::Unknown => Feasibility::Unknown,
        }
    }
}

/// Factory for SMT expressions and fresh symbols.
///
/// Fresh names carry a monotonically increasing counter so that every
/// havoc and every lazily materialized memory cell is a distinct symbol.
pub struct ExprFactory<'ctx> {
    ctx: &'ctx Context,
    counter: Cell<u64>,
}

impl<'ctx> ExprFactory<'ctx> {
    /// Create a factory bound to `ctx`.
    pub fn new(ctx: &'ctx Context) -> Self {
        Self {
            ctx,
            counter: Cell::new(0),
        }
    }

    /// The underlying solver context.
    pub fn ctx(&self) -> &'ctx Context {
        self.ctx
    }

    fn next_id(&self) -> u64 {
        let id = self.counter.get();
        self.counter.set(id + 1);
        id
    }

    /// A fresh, unconstrained 64-bit bit-vector.
    pub fn fresh_bv(&self, tag: &str) -> BV<'ctx> {
        BV::new_const(self.ctx, format!("{}!{}", tag, self.next_id()), 64)
    }

    /// A fresh, unconstrained real.
    pub fn fresh_real(&self, tag: &str) -> Real<'ctx> {
        Real::new_const(self.ctx, format!("{}!{}", tag, self.next_id()))
    }

    /// A 64-bit bit-vector constant.
    pub fn bv64(&self, value: i64) -> BV<'ctx> {
        BV::from_i64(self.ctx, value, 64)
    }

    /// A real constant from an integer.
    pub fn real(&self, value: i32) -> Real<'ctx> {
        Real::from_real(self.ctx, value, 1)
    }

    /// Absolute difference of two 64-bit addresses, as an unsigned
    /// bit-vector expression.
    pub fn abs_diff(&self, a: &BV<'ctx>, b: &BV<'ctx>) -> BV<'ctx> {
        a.bvult(b).ite(&b.bvsub(a), &a.bvsub(b))
    }
}
