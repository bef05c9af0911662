//! Symbolic execution of decoded instructions.
//!
//! The executor applies one instruction to a [`SymbolicState`], producing
//! an optional branch condition and an optional memory-access record. It
//! never talks to the solver directly; branch conditions and addresses
//! are handed back to the explorer, which owns assertion framing.

mod state;
mod step;

pub use state::{Slot, SymbolicState, REG_COUNT};
pub use step::Executor;

use z3::ast::{Bool, BV};

/// Category of a memory-access record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    /// Integer load.
    Load,
    /// Integer store.
    Store,
    /// Floating-point load.
    FpLoad,
    /// Floating-point store.
    FpStore,
    /// Map helper traffic; always DRAM-priced.
    Map,
}

impl AccessKind {
    /// Whether the cache model may promote this access to a hit.
    pub fn is_cacheable(self) -> bool {
        !matches!(self, AccessKind::Map)
    }
}

/// One memory access on the current path, in program order.
#[derive(Debug, Clone)]
pub struct MemAccess<'ctx> {
    /// Instruction index that produced the access.
    pub index: usize,
    /// Access category.
    pub kind: AccessKind,
    /// Symbolic effective address.
    pub addr: BV<'ctx>,
    /// Access width in bytes.
    pub size: u8,
    /// Pipeline latency already charged through the catalog.
    pub base_latency: u32,
    /// DRAM charge; the cache model may reduce this to zero.
    pub dram: u32,
}

/// Effects of executing one instruction.
#[derive(Debug, Clone, Default)]
pub struct StepEffect<'ctx> {
    /// Branch condition of a conditional jump.
    pub branch: Option<Bool<'ctx>>,
    /// Memory-access record, when the instruction touches memory.
    pub access: Option<MemAccess<'ctx>>,
    /// Flat cycles charged beyond the catalog latency (unmodeled
    /// helpers).
    pub extra_cycles: u32,
}
