//! Per-path symbolic machine state.

use crate::solver::ExprFactory;
use std::collections::HashMap;
use z3::ast::{Ast, Real, BV};

/// Number of general-purpose and floating-point register slots.
pub const REG_COUNT: usize = 11;

/// One symbolic memory cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<'ctx> {
    /// A 64-bit bit-vector value.
    Word(BV<'ctx>),
    /// A real value stored by a floating-point store.
    Float(Real<'ctx>),
}

/// Registers plus lazily populated symbolic memory.
///
/// Memory maps simplified address expressions to value expressions; no
/// aliasing resolution beyond syntactic equality is attempted. The state
/// is cloned wholesale at every fork; the underlying AST nodes are
/// immutable and shared.
#[derive(Debug, Clone)]
pub struct SymbolicState<'ctx> {
    gp: Vec<BV<'ctx>>,
    fp: Vec<Real<'ctx>>,
    memory: HashMap<BV<'ctx>, Slot<'ctx>>,
}

impl<'ctx> SymbolicState<'ctx> {
    /// Build the entry state: `R10` bound to the frame-pointer base, all
    /// other slots fresh symbols.
    pub fn entry(factory: &ExprFactory<'ctx>, frame_base: &BV<'ctx>) -> Self {
        let mut gp: Vec<BV<'ctx>> = (0..REG_COUNT)
            .map(|i| factory.fresh_bv(&format!("r{i}")))
            .collect();
        gp[10] = frame_base.clone();
        let fp = (0..REG_COUNT)
            .map(|i| factory.fresh_real(&format!("f{i}")))
            .collect();
        Self {
            gp,
            fp,
            memory: HashMap::new(),
        }
    }

    /// Read a general-purpose register.
    pub fn gp(&self, i: u8) -> &BV<'ctx> {
        &self.gp[usize::from(i)]
    }

    /// Write a general-purpose register.
    pub fn set_gp(&mut self, i: u8, value: BV<'ctx>) {
        self.gp[usize::from(i)] = value;
    }

    /// Read a floating-point register.
    pub fn fp(&self, i: u8) -> &Real<'ctx> {
        &self.fp[usize::from(i)]
    }

    /// Write a floating-point register.
    pub fn set_fp(&mut self, i: u8, value: Real<'ctx>) {
        self.fp[usize::from(i)] = value;
    }

    /// Load a word from `addr`, binding a fresh symbol on first read.
    /// A cell last written as a float reads back as a fresh word.
    pub fn load_word(&mut self, addr: &BV<'ctx>, factory: &ExprFactory<'ctx>) -> BV<'ctx> {
        let key = addr.simplify();
        match self
            .memory
            .entry(key)
            .or_insert_with(|| Slot::Word(factory.fresh_bv("mem")))
        {
            Slot::Word(w) => w.clone(),
            Slot::Float(_) => factory.fresh_bv("mem"),
        }
    }

    /// Load a float from `addr`, binding a fresh symbol on first read.
    pub fn load_float(&mut self, addr: &BV<'ctx>, factory: &ExprFactory<'ctx>) -> Real<'ctx> {
        let key = addr.simplify();
        match self
            .memory
            .entry(key)
            .or_insert_with(|| Slot::Float(factory.fresh_real("fmem")))
        {
            Slot::Float(r) => r.clone(),
            Slot::Word(_) => factory.fresh_real("fmem"),
        }
    }

    /// Store a word, overwriting the cell at the exact address key.
    pub fn store_word(&mut self, addr: &BV<'ctx>, value: BV<'ctx>) {
        self.memory.insert(addr.simplify(), Slot::Word(value));
    }

    /// Store a float, overwriting the cell at the exact address key.
    pub fn store_float(&mut self, addr: &BV<'ctx>, value: Real<'ctx>) {
        self.memory.insert(addr.simplify(), Slot::Float(value));
    }

    /// Deep copy for a DFS fork.
    pub fn fork(&self) -> Self {
        self.clone()
    }
}
