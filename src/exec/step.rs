//! Per-instruction transfer functions.
//!
//! Integer arithmetic is modeled exactly over 64-bit bit-vectors; the
//! 32-bit ALU class operates on the low half and zero-extends back.
//! Floating-point arithmetic is modeled over reals, with no NaN and no
//! rounding. Memory effects go through the lazy symbolic memory of the
//! state; the produced access records feed the cache model.

use crate::error::{AnalysisError, Result};
use crate::exec::{AccessKind, MemAccess, StepEffect, SymbolicState};
use crate::isa::insn::Instruction;
use crate::isa::{alu, atomic, call_src, catalog, class, helper, jmp, mode, size};
use crate::solver::ExprFactory;
use crate::types::AnalyzerOptions;
use z3::ast::{Ast, Bool, Real, BV};
use z3::Context;

/// Symbolic executor bound to one solver context.
pub struct Executor<'ctx> {
    factory: ExprFactory<'ctx>,
    frame_base: BV<'ctx>,
    packet_base: BV<'ctx>,
}

impl<'ctx> Executor<'ctx> {
    /// Create an executor and its distinguished base symbols.
    pub fn new(ctx: &'ctx Context) -> Self {
        let factory = ExprFactory::new(ctx);
        let frame_base = BV::new_const(ctx, "fp_base", 64);
        let packet_base = BV::new_const(ctx, "packet_base", 64);
        Self {
            factory,
            frame_base,
            packet_base,
        }
    }

    /// The expression factory shared with the explorer.
    pub fn factory(&self) -> &ExprFactory<'ctx> {
        &self.factory
    }

    /// Entry register state: `R10` bound to the frame-pointer base.
    pub fn initial_state(&self) -> SymbolicState<'ctx> {
        SymbolicState::entry(&self.factory, &self.frame_base)
    }

    /// Execute one instruction against `state`.
    pub fn step(
        &self,
        index: usize,
        insn: &Instruction,
        state: &mut SymbolicState<'ctx>,
        opts: &AnalyzerOptions,
    ) -> Result<StepEffect<'ctx>> {
        if insn.dst > 10 || insn.src > 10 {
            return Err(AnalysisError::UnknownOpcode {
                index,
                opcode: insn.opcode,
            });
        }

        match insn.class() {
            class::ALU | class::ALU64 => {
                if insn.is_fpu() {
                    self.fp_alu(index, insn, state)?;
                } else {
                    self.int_alu(index, insn, state)?;
                }
                Ok(StepEffect::default())
            }
            class::JMP | class::JMP32 => self.jump(index, insn, state, opts),
            class::LD | class::LDX => self.load(index, insn, state, opts),
            class::ST | class::STX => self.store(index, insn, state, opts),
            _ => unreachable!("class is a 3-bit field"),
        }
    }

    fn unknown(&self, index: usize, insn: &Instruction) -> AnalysisError {
        AnalysisError::UnknownOpcode {
            index,
            opcode: insn.opcode,
        }
    }

    /// Second operand of an ALU/JMP instruction, as a 64-bit vector.
    fn operand(&self, insn: &Instruction, state: &SymbolicState<'ctx>) -> BV<'ctx> {
        if insn.is_x() {
            state.gp(insn.src).clone()
        } else {
            self.factory.bv64(i64::from(insn.imm))
        }
    }

    /// Second operand of an FPU instruction, as a real.
    fn fp_operand(&self, insn: &Instruction, state: &SymbolicState<'ctx>) -> Real<'ctx> {
        if insn.is_x() {
            state.fp(insn.src).clone()
        } else {
            self.factory.real(insn.imm)
        }
    }

    fn int_alu(
        &self,
        index: usize,
        insn: &Instruction,
        state: &mut SymbolicState<'ctx>,
    ) -> Result<()> {
        let is64 = insn.class() == class::ALU64;
        let a = state.gp(insn.dst).clone();
        let b = self.operand(insn, state);
        let code = alu::of(insn.opcode);

        // MOV with an offset of 8/16/32 is the sign-extending move.
        if code == alu::MOV && matches!(insn.off, 8 | 16 | 32) {
            let width = insn.off as u32;
            let low = b.extract(width - 1, 0);
            let value = if is64 {
                low.sign_ext(64 - width)
            } else {
                widen32(&if width < 32 {
                    low.sign_ext(32 - width)
                } else {
                    low
                })
            };
            state.set_gp(insn.dst, value);
            return Ok(());
        }

        // END swaps at full register width in both ALU classes; the
        // immediate selects 16/32/64.
        if code == alu::END {
            let value = self.bswap(index, insn, &a)?;
            state.set_gp(insn.dst, value);
            return Ok(());
        }

        let value = if is64 {
            self.alu64_value(index, insn, code, &a, &b)?
        } else {
            let a32 = a.extract(31, 0);
            let b32 = b.extract(31, 0);
            widen32(&self.alu32_value(index, insn, code, &a32, &b32)?)
        };
        state.set_gp(insn.dst, value);
        Ok(())
    }

    fn alu64_value(
        &self,
        index: usize,
        insn: &Instruction,
        code: u8,
        a: &BV<'ctx>,
        b: &BV<'ctx>,
    ) -> Result<BV<'ctx>> {
        let signed = insn.off & 1 == 1;
        let zero = self.factory.bv64(0);
        let value = match code {
            alu::ADD => a.bvadd(b),
            alu::SUB => a.bvsub(b),
            alu::MUL => a.bvmul(b),
            alu::DIV => {
                let q = if signed { a.bvsdiv(b) } else { a.bvudiv(b) };
                b._eq(&zero).ite(&zero, &q)
            }
            alu::MOD => {
                let r = if signed { a.bvsrem(b) } else { a.bvurem(b) };
                b._eq(&zero).ite(a, &r)
            }
            alu::OR => a.bvor(b),
            alu::AND => a.bvand(b),
            alu::XOR => a.bvxor(b),
            alu::LSH => a.bvshl(&b.bvand(&self.factory.bv64(63))),
            alu::RSH => a.bvlshr(&b.bvand(&self.factory.bv64(63))),
            alu::ARSH => a.bvashr(&b.bvand(&self.factory.bv64(63))),
            alu::NEG => a.bvneg(),
            alu::MOV => b.clone(),
            _ => return Err(self.unknown(index, insn)),
        };
        Ok(value)
    }

    fn alu32_value(
        &self,
        index: usize,
        insn: &Instruction,
        code: u8,
        a: &BV<'ctx>,
        b: &BV<'ctx>,
    ) -> Result<BV<'ctx>> {
        let signed = insn.off & 1 == 1;
        let zero = BV::from_i64(self.factory.ctx(), 0, 32);
        let value = match code {
            alu::ADD => a.bvadd(b),
            alu::SUB => a.bvsub(b),
            alu::MUL => a.bvmul(b),
            alu::DIV => {
                let q = if signed { a.bvsdiv(b) } else { a.bvudiv(b) };
                b._eq(&zero).ite(&zero, &q)
            }
            alu::MOD => {
                let r = if signed { a.bvsrem(b) } else { a.bvurem(b) };
                b._eq(&zero).ite(a, &r)
            }
            alu::OR => a.bvor(b),
            alu::AND => a.bvand(b),
            alu::XOR => a.bvxor(b),
            alu::LSH => a.bvshl(&b.bvand(&BV::from_i64(self.factory.ctx(), 31, 32))),
            alu::RSH => a.bvlshr(&b.bvand(&BV::from_i64(self.factory.ctx(), 31, 32))),
            alu::ARSH => a.bvashr(&b.bvand(&BV::from_i64(self.factory.ctx(), 31, 32))),
            alu::NEG => a.bvneg(),
            alu::MOV => b.clone(),
            _ => return Err(self.unknown(index, insn)),
        };
        Ok(value)
    }

    /// Byte swap to the width requested by the immediate.
    fn bswap(&self, index: usize, insn: &Instruction, a: &BV<'ctx>) -> Result<BV<'ctx>> {
        let width = match insn.imm {
            16 => 16u32,
            32 => 32,
            64 => 64,
            _ => return Err(self.unknown(index, insn)),
        };
        let bytes = width / 8;
        let mut swapped: Option<BV<'ctx>> = None;
        for i in 0..bytes {
            let byte = a.extract(i * 8 + 7, i * 8);
            swapped = Some(match swapped {
                None => byte,
                Some(acc) => acc.concat(&byte),
            });
        }
        let swapped = swapped.expect("width is at least one byte");
        Ok(if width < 64 {
            swapped.zero_ext(64 - width)
        } else {
            swapped
        })
    }

    fn fp_alu(
        &self,
        index: usize,
        insn: &Instruction,
        state: &mut SymbolicState<'ctx>,
    ) -> Result<()> {
        let a = state.fp(insn.dst).clone();
        let b = self.fp_operand(insn, state);
        let zero = self.factory.real(0);
        let value = match alu::of(insn.opcode) {
            alu::ADD => &a + &b,
            alu::SUB => &a - &b,
            alu::MUL => &a * &b,
            alu::DIV => b._eq(&zero).ite(&zero, &(&a / &b)),
            alu::NEG => -&a,
            alu::MOV => b,
            _ => return Err(self.unknown(index, insn)),
        };
        state.set_fp(insn.dst, value);
        Ok(())
    }

    fn jump(
        &self,
        index: usize,
        insn: &Instruction,
        state: &mut SymbolicState<'ctx>,
        opts: &AnalyzerOptions,
    ) -> Result<StepEffect<'ctx>> {
        let code = jmp::of(insn.opcode);

        if code == jmp::EXIT || code == jmp::JA {
            return Ok(StepEffect::default());
        }
        if code == jmp::CALL {
            return self.call(index, insn, state, opts);
        }

        let cond = if insn.is_fpu() {
            self.fp_branch(index, insn, state)?
        } else {
            self.int_branch(index, insn, state)?
        };
        Ok(StepEffect {
            branch: Some(cond),
            ..StepEffect::default()
        })
    }

    fn int_branch(
        &self,
        index: usize,
        insn: &Instruction,
        state: &SymbolicState<'ctx>,
    ) -> Result<Bool<'ctx>> {
        let narrow = insn.class() == class::JMP32;
        let mut a = state.gp(insn.dst).clone();
        let mut b = self.operand(insn, state);
        if narrow {
            a = a.extract(31, 0);
            b = b.extract(31, 0);
        }
        let cond = match jmp::of(insn.opcode) {
            jmp::JEQ => a._eq(&b),
            jmp::JNE => a._eq(&b).not(),
            jmp::JGT => a.bvugt(&b),
            jmp::JGE => a.bvuge(&b),
            jmp::JLT => a.bvult(&b),
            jmp::JLE => a.bvule(&b),
            jmp::JSGT => a.bvsgt(&b),
            jmp::JSGE => a.bvsge(&b),
            jmp::JSLT => a.bvslt(&b),
            jmp::JSLE => a.bvsle(&b),
            jmp::JSET => {
                let zero = BV::from_i64(self.factory.ctx(), 0, a.get_size());
                a.bvand(&b)._eq(&zero).not()
            }
            _ => return Err(self.unknown(index, insn)),
        };
        Ok(cond)
    }

    /// Ordered and unordered comparisons collapse onto real-valued order.
    fn fp_branch(
        &self,
        index: usize,
        insn: &Instruction,
        state: &SymbolicState<'ctx>,
    ) -> Result<Bool<'ctx>> {
        let a = state.fp(insn.dst).clone();
        let b = self.fp_operand(insn, state);
        let cond = match jmp::of(insn.opcode) {
            jmp::JEQ => a._eq(&b),
            jmp::JNE => a._eq(&b).not(),
            jmp::JGT | jmp::JSGT => a.gt(&b),
            jmp::JGE | jmp::JSGE => a.ge(&b),
            jmp::JLT | jmp::JSLT => a.lt(&b),
            jmp::JLE | jmp::JSLE => a.le(&b),
            _ => return Err(self.unknown(index, insn)),
        };
        Ok(cond)
    }

    fn call(
        &self,
        index: usize,
        insn: &Instruction,
        state: &mut SymbolicState<'ctx>,
        opts: &AnalyzerOptions,
    ) -> Result<StepEffect<'ctx>> {
        // A local call transfers control without touching register state.
        if insn.src == call_src::LOCAL {
            return Ok(StepEffect::default());
        }

        let base_latency = catalog::lookup(insn)
            .and_then(|info| info.latency)
            .unwrap_or(0);

        match insn.imm {
            helper::MAP_LOOKUP_ELEM => {
                // The returned element pointer is itself the accessed
                // address.
                let ptr = self.factory.fresh_bv("map_ptr");
                state.set_gp(0, ptr.clone());
                Ok(StepEffect {
                    access: Some(MemAccess {
                        index,
                        kind: AccessKind::Map,
                        addr: ptr,
                        size: 8,
                        base_latency,
                        dram: opts.dram_penalty,
                    }),
                    ..StepEffect::default()
                })
            }
            helper::MAP_UPDATE_ELEM | helper::MAP_DELETE_ELEM => {
                state.set_gp(0, self.factory.fresh_bv("helper_ret"));
                Ok(StepEffect {
                    access: Some(MemAccess {
                        index,
                        kind: AccessKind::Map,
                        addr: self.factory.fresh_bv("map_elem"),
                        size: 8,
                        base_latency,
                        dram: opts.dram_penalty,
                    }),
                    ..StepEffect::default()
                })
            }
            _ => {
                state.set_gp(0, self.factory.fresh_bv("helper_ret"));
                Ok(StepEffect {
                    extra_cycles: opts.helper_default_cost,
                    ..StepEffect::default()
                })
            }
        }
    }

    /// Effective address of a non-packet memory access.
    fn mem_addr(&self, base: &BV<'ctx>, off: i16) -> BV<'ctx> {
        base.bvadd(&self.factory.bv64(i64::from(off)))
    }

    /// Effective address of a packet access (ABS/IND modes).
    fn packet_addr(&self, insn: &Instruction, state: &SymbolicState<'ctx>) -> BV<'ctx> {
        let offset = self.factory.bv64(i64::from(insn.imm));
        match mode::of(insn.opcode) {
            mode::ABS => self.packet_base.bvadd(&offset),
            _ => self.packet_base.bvadd(state.gp(insn.src)).bvadd(&offset),
        }
    }

    fn access(
        &self,
        index: usize,
        insn: &Instruction,
        kind: AccessKind,
        addr: BV<'ctx>,
        opts: &AnalyzerOptions,
    ) -> MemAccess<'ctx> {
        MemAccess {
            index,
            kind,
            addr: addr.simplify(),
            size: size::bytes(size::of(insn.opcode)),
            base_latency: catalog::lookup(insn)
                .and_then(|info| info.latency)
                .unwrap_or(0),
            dram: opts.dram_penalty,
        }
    }

    fn load(
        &self,
        index: usize,
        insn: &Instruction,
        state: &mut SymbolicState<'ctx>,
        opts: &AnalyzerOptions,
    ) -> Result<StepEffect<'ctx>> {
        let m = mode::of(insn.opcode);

        // Immediate loads carry their value in the instruction and do
        // not touch memory.
        if m == mode::IMM {
            state.set_gp(insn.dst, self.factory.bv64(insn.imm64()));
            return Ok(StepEffect::default());
        }

        let addr = match m {
            mode::ABS | mode::IND => self.packet_addr(insn, state),
            mode::MEM | mode::MEMSX | mode::FMEM => {
                self.mem_addr(&state.gp(insn.src).clone(), insn.off)
            }
            _ => return Err(self.unknown(index, insn)),
        };

        if m == mode::FMEM {
            let value = state.load_float(&addr, &self.factory);
            state.set_fp(insn.dst, value);
            let access = self.access(index, insn, AccessKind::FpLoad, addr, opts);
            return Ok(StepEffect {
                access: Some(access),
                ..StepEffect::default()
            });
        }

        let raw = state.load_word(&addr, &self.factory);
        let value = narrow_load(&raw, size::bits(size::of(insn.opcode)), m == mode::MEMSX);
        state.set_gp(insn.dst, value);
        let access = self.access(index, insn, AccessKind::Load, addr, opts);
        Ok(StepEffect {
            access: Some(access),
            ..StepEffect::default()
        })
    }

    fn store(
        &self,
        index: usize,
        insn: &Instruction,
        state: &mut SymbolicState<'ctx>,
        opts: &AnalyzerOptions,
    ) -> Result<StepEffect<'ctx>> {
        let m = mode::of(insn.opcode);
        let from_reg = insn.class() == class::STX;

        if m == mode::IMM {
            // Encodable but costless; no memory effect is defined.
            return Ok(StepEffect::default());
        }
        if m == mode::ATOMIC {
            if !from_reg {
                return Err(self.unknown(index, insn));
            }
            return self.atomic(index, insn, state);
        }

        let addr = match m {
            mode::ABS | mode::IND => self.packet_addr(insn, state),
            mode::MEM | mode::MEMSX | mode::FMEM => {
                self.mem_addr(&state.gp(insn.dst).clone(), insn.off)
            }
            _ => return Err(self.unknown(index, insn)),
        };

        if m == mode::FMEM {
            let value = if from_reg {
                state.fp(insn.src).clone()
            } else {
                self.factory.real(insn.imm)
            };
            state.store_float(&addr, value);
            let access = self.access(index, insn, AccessKind::FpStore, addr, opts);
            return Ok(StepEffect {
                access: Some(access),
                ..StepEffect::default()
            });
        }

        let value = if from_reg {
            state.gp(insn.src).clone()
        } else {
            self.factory.bv64(i64::from(insn.imm))
        };
        state.store_word(&addr, value);
        let access = self.access(index, insn, AccessKind::Store, addr, opts);
        Ok(StepEffect {
            access: Some(access),
            ..StepEffect::default()
        })
    }

    /// Atomic read-modify-write. Updates memory exactly; charged flat by
    /// the catalog, so no access record is produced.
    fn atomic(
        &self,
        index: usize,
        insn: &Instruction,
        state: &mut SymbolicState<'ctx>,
    ) -> Result<StepEffect<'ctx>> {
        let addr = self.mem_addr(&state.gp(insn.dst).clone(), insn.off);
        let old = state.load_word(&addr, &self.factory);
        let src_v = state.gp(insn.src).clone();

        let sub = (insn.imm & 0xFF) as u8;
        let fetch = sub & atomic::FETCH != 0 || sub == atomic::XCHG || sub == atomic::CMPXCHG;
        let new = match sub & atomic::OP_MASK {
            atomic::ADD => old.bvadd(&src_v),
            atomic::AND => old.bvand(&src_v),
            atomic::OR => old.bvor(&src_v),
            atomic::XOR => old.bvxor(&src_v),
            atomic::XCHG => src_v.clone(),
            atomic::CMPXCHG => {
                let expected = state.gp(0).clone();
                let new = old._eq(&expected).ite(&src_v, &old);
                state.set_gp(0, old.clone());
                new
            }
            _ => return Err(self.unknown(index, insn)),
        };
        state.store_word(&addr, new);

        if fetch && sub & atomic::OP_MASK != atomic::CMPXCHG {
            state.set_gp(insn.src, old);
        }
        Ok(StepEffect::default())
    }
}

/// Zero-extend a 32-bit result back to a 64-bit register value.
fn widen32<'ctx>(value: &BV<'ctx>) -> BV<'ctx> {
    value.zero_ext(32)
}

/// Re-extract a loaded 64-bit cell to the access width.
fn narrow_load<'ctx>(raw: &BV<'ctx>, bits: u32, sign: bool) -> BV<'ctx> {
    if bits == 64 {
        return raw.clone();
    }
    let low = raw.extract(bits - 1, 0);
    if sign {
        low.sign_ext(64 - bits)
    } else {
        low.zero_ext(64 - bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{Feasibility, PathSolver};
    use z3::{Config, Context};

    fn insn(word: u64) -> Instruction {
        Instruction::from_word(word)
    }

    struct Fixture<'ctx> {
        exec: Executor<'ctx>,
        solver: PathSolver<'ctx>,
        opts: AnalyzerOptions,
    }

    impl<'ctx> Fixture<'ctx> {
        fn new(ctx: &'ctx Context) -> Self {
            Self {
                exec: Executor::new(ctx),
                solver: PathSolver::new(ctx),
                opts: AnalyzerOptions::new(),
            }
        }

        fn run(
            &self,
            state: &mut SymbolicState<'ctx>,
            program: &[Instruction],
        ) -> Vec<StepEffect<'ctx>> {
            program
                .iter()
                .enumerate()
                .map(|(i, insn)| self.exec.step(i, insn, state, &self.opts).unwrap())
                .collect()
        }

        /// Prove `cond` must hold: its negation is unsatisfiable.
        fn prove(&self, cond: &Bool<'ctx>) -> bool {
            self.solver.push();
            self.solver.assert_(&cond.not());
            let verdict = self.solver.check() == Feasibility::Unsat;
            self.solver.pop();
            verdict
        }
    }

    #[test]
    fn test_mov_and_add() {
        let ctx = Context::new(&Config::new());
        let f = Fixture::new(&ctx);
        let mut state = f.exec.initial_state();

        // MOV64_K R1, 7; MOV64_K R2, 5; ADD64_X R1, R2
        let p = [
            insn(0x0000_0007_0000_01B7),
            insn(0x0000_0005_0000_02B7),
            insn(0x0000_0000_0000_210F),
        ];
        f.run(&mut state, &p);
        assert!(f.prove(&state.gp(1)._eq(&f.exec.factory().bv64(12))));
    }

    #[test]
    fn test_alu32_zero_extends() {
        let ctx = Context::new(&Config::new());
        let f = Fixture::new(&ctx);
        let mut state = f.exec.initial_state();

        // MOV64_K R1, -1; ADD_K R1, 1 (32-bit): low word wraps to zero
        // and the upper half is cleared.
        let p = [insn(0xFFFF_FFFF_0000_01B7), insn(0x0000_0001_0000_0104)];
        f.run(&mut state, &p);
        assert!(f.prove(&state.gp(1)._eq(&f.exec.factory().bv64(0))));
    }

    #[test]
    fn test_div_by_zero_yields_zero() {
        let ctx = Context::new(&Config::new());
        let f = Fixture::new(&ctx);
        let mut state = f.exec.initial_state();

        // MOV64_K R1, 9; MOV64_K R2, 0; DIV64_X R1, R2
        let p = [
            insn(0x0000_0009_0000_01B7),
            insn(0x0000_0000_0000_02B7),
            insn(0x0000_0000_0000_213F),
        ];
        f.run(&mut state, &p);
        assert!(f.prove(&state.gp(1)._eq(&f.exec.factory().bv64(0))));
    }

    #[test]
    fn test_mod_by_zero_keeps_dividend() {
        let ctx = Context::new(&Config::new());
        let f = Fixture::new(&ctx);
        let mut state = f.exec.initial_state();

        // MOV64_K R1, 9; MOV64_K R2, 0; MOD64_X R1, R2
        let p = [
            insn(0x0000_0009_0000_01B7),
            insn(0x0000_0000_0000_02B7),
            insn(0x0000_0000_0000_219F),
        ];
        f.run(&mut state, &p);
        assert!(f.prove(&state.gp(1)._eq(&f.exec.factory().bv64(9))));
    }

    #[test]
    fn test_shift_amount_is_masked() {
        let ctx = Context::new(&Config::new());
        let f = Fixture::new(&ctx);
        let mut state = f.exec.initial_state();

        // MOV64_K R1, 1; MOV64_K R2, 65; LSH64_X R1, R2: shifts by 1.
        let p = [
            insn(0x0000_0001_0000_01B7),
            insn(0x0000_0041_0000_02B7),
            insn(0x0000_0000_0000_216F),
        ];
        f.run(&mut state, &p);
        assert!(f.prove(&state.gp(1)._eq(&f.exec.factory().bv64(2))));
    }

    #[test]
    fn test_bswap16() {
        let ctx = Context::new(&Config::new());
        let f = Fixture::new(&ctx);
        let mut state = f.exec.initial_state();

        // MOV64_K R1, 0x1234; END R1, 16
        let p = [insn(0x0000_1234_0000_01B7), insn(0x0000_0010_0000_01D4)];
        f.run(&mut state, &p);
        assert!(f.prove(&state.gp(1)._eq(&f.exec.factory().bv64(0x3412))));
    }

    #[test]
    fn test_movsx_sign_extends() {
        let ctx = Context::new(&Config::new());
        let f = Fixture::new(&ctx);
        let mut state = f.exec.initial_state();

        // MOV64_K R2, 0x80; MOVSX64 R1, R2 from 8 bits: result is -128.
        let mut movsx = insn(0x0000_0000_0000_21BF);
        movsx.off = 8;
        let p = [insn(0x0000_0080_0000_02B7), movsx];
        f.run(&mut state, &p);
        assert!(f.prove(&state.gp(1)._eq(&f.exec.factory().bv64(-128))));
    }

    #[test]
    fn test_branch_condition_jeq() {
        let ctx = Context::new(&Config::new());
        let f = Fixture::new(&ctx);
        let mut state = f.exec.initial_state();

        // MOV64_K R1, 1; MOV64_K R2, 2; JEQ_X R1, R2, +1
        let p = [
            insn(0x0000_0001_0000_01B7),
            insn(0x0000_0002_0000_02B7),
            insn(0x0000_0000_0001_211D),
        ];
        let effects = f.run(&mut state, &p);
        let cond = effects[2].branch.clone().unwrap();
        // R1 == R2 is provably false here.
        assert!(f.prove(&cond.not()));
    }

    #[test]
    fn test_jset_condition() {
        let ctx = Context::new(&Config::new());
        let f = Fixture::new(&ctx);
        let mut state = f.exec.initial_state();

        // MOV64_K R1, 0b1010; JSET_K R1, 0b1000 must hold. The mask keeps
        // imm bit 1 clear so the FPU discriminator stays out of the way.
        let p = [insn(0x0000_000A_0000_01B7), insn(0x0000_0008_0001_0145)];
        let effects = f.run(&mut state, &p);
        let cond = effects[1].branch.clone().unwrap();
        assert!(f.prove(&cond));
    }

    #[test]
    fn test_load_store_roundtrip() {
        let ctx = Context::new(&Config::new());
        let f = Fixture::new(&ctx);
        let mut state = f.exec.initial_state();

        // MOV64_K R1, 42; STX_DW [R10 - 8], R1; LDX_DW R2, [R10 - 8]
        let p = [
            insn(0x0000_002A_0000_01B7),
            insn(0x0000_0000_FFF8_1A7B),
            insn(0x0000_0000_FFF8_A279),
        ];
        let effects = f.run(&mut state, &p);
        assert!(f.prove(&state.gp(2)._eq(&f.exec.factory().bv64(42))));

        let store = effects[1].access.as_ref().unwrap();
        let load = effects[2].access.as_ref().unwrap();
        assert_eq!(store.kind, AccessKind::Store);
        assert_eq!(load.kind, AccessKind::Load);
        assert_eq!(store.addr.simplify(), load.addr.simplify());
        assert_eq!(load.size, 8);
    }

    #[test]
    fn test_narrow_load_zero_extends() {
        let ctx = Context::new(&Config::new());
        let f = Fixture::new(&ctx);
        let mut state = f.exec.initial_state();

        // MOV64_K R1, -1; STX_DW [R10 - 8], R1; LDX_W R2, [R10 - 8]
        let p = [
            insn(0xFFFF_FFFF_0000_01B7),
            insn(0x0000_0000_FFF8_1A7B),
            insn(0x0000_0000_FFF8_A261),
        ];
        f.run(&mut state, &p);
        assert!(f.prove(&state.gp(2)._eq(&f.exec.factory().bv64(0xFFFF_FFFF))));
    }

    #[test]
    fn test_helper_map_lookup() {
        let ctx = Context::new(&Config::new());
        let f = Fixture::new(&ctx);
        let mut state = f.exec.initial_state();
        let before = state.gp(0).clone();

        // CALL helper 1
        let effects = f.run(&mut state, &[insn(0x0000_0001_0000_0085)]);
        let access = effects[0].access.as_ref().unwrap();
        assert_eq!(access.kind, AccessKind::Map);
        assert!(!access.kind.is_cacheable());
        assert_eq!(access.dram, f.opts.dram_penalty);
        // R0 now holds the returned element pointer.
        assert_ne!(state.gp(0), &before);
        assert_eq!(state.gp(0), &access.addr);
    }

    #[test]
    fn test_unmodeled_helper_flat_cost() {
        let ctx = Context::new(&Config::new());
        let f = Fixture::new(&ctx);
        let mut state = f.exec.initial_state();

        // CALL helper 7
        let effects = f.run(&mut state, &[insn(0x0000_0007_0000_0085)]);
        assert!(effects[0].access.is_none());
        assert_eq!(effects[0].extra_cycles, f.opts.helper_default_cost);
    }

    #[test]
    fn test_atomic_add() {
        let ctx = Context::new(&Config::new());
        let f = Fixture::new(&ctx);
        let mut state = f.exec.initial_state();

        // MOV64_K R1, 5; STX_DW [R10-8], R1; MOV64_K R2, 3;
        // ATOMIC_ADD_DW [R10-8], R2; LDX_DW R3, [R10-8]
        let mut atomic_add = insn(0x0000_0000_FFF8_2ADB);
        atomic_add.imm = i32::from(atomic::ADD);
        let p = [
            insn(0x0000_0005_0000_01B7),
            insn(0x0000_0000_FFF8_1A7B),
            insn(0x0000_0003_0000_02B7),
            atomic_add,
            insn(0x0000_0000_FFF8_A379),
        ];
        f.run(&mut state, &p);
        assert!(f.prove(&state.gp(3)._eq(&f.exec.factory().bv64(8))));
    }

    #[test]
    fn test_fpu_add() {
        let ctx = Context::new(&Config::new());
        let f = Fixture::new(&ctx);
        let mut state = f.exec.initial_state();

        // FMOV_K F1, 3 (off bit 1 set); FADD_K F1, 4
        let mut fmov = insn(0x0000_0003_0000_01B4);
        fmov.off = 0b10;
        let mut fadd = insn(0x0000_0004_0000_0104);
        fadd.off = 0b10;
        f.run(&mut state, &[fmov, fadd]);
        assert!(f.prove(&state.fp(1)._eq(&f.exec.factory().real(7))));
    }

    #[test]
    fn test_reserved_register_rejected() {
        let ctx = Context::new(&Config::new());
        let f = Fixture::new(&ctx);
        let mut state = f.exec.initial_state();

        // MOV64_K with dst = 12.
        let err = f
            .exec
            .step(0, &insn(0x0000_0001_0000_0CB7), &mut state, &f.opts)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownOpcode { index: 0, .. }));
    }
}
