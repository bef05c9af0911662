//! Opcode catalog: mnemonics and per-opcode latencies.
//!
//! Two static tables cover the instruction set: one for integer/general
//! operations and one for floating-point operations. The
//! [FPU discriminator](crate::isa::insn::Instruction::is_fpu) selects the
//! table. A latency of `None` marks an encodable but costless operation;
//! an instruction absent from its table is an unknown opcode and a hard
//! error when a path reaches it.
//!
//! Memory operations carry only their pipeline latency here. The DRAM
//! charge for an access that misses the locality check is accounted per
//! memory-access record by the cache model. Immediate loads are the
//! exception: they never produce an access record, so their table entry
//! keeps the DRAM term.

use crate::isa::{alu, atomic, class, jmp, mode, size};
use crate::isa::insn::Instruction;

/// Cycle charge for a memory access that cannot be proven near a prior
/// access.
pub const DRAM_PENALTY: u32 = 87;

/// Cycle charge for a helper call whose id has no modeled semantics.
pub const HELPER_DEFAULT_COST: u32 = 100;

/// Mnemonic and latency of one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpInfo {
    /// Canonical operation name.
    pub mnemonic: &'static str,
    /// Cycles charged when the instruction executes; `None` contributes
    /// zero to the base cost.
    pub latency: Option<u32>,
}

const fn op(mnemonic: &'static str, latency: u32) -> OpInfo {
    OpInfo {
        mnemonic,
        latency: Some(latency),
    }
}

const fn op_na(mnemonic: &'static str) -> OpInfo {
    OpInfo {
        mnemonic,
        latency: None,
    }
}

/// Look up an instruction in the catalog, steering through the FPU
/// discriminator. Returns `None` for an unknown opcode.
pub fn lookup(insn: &Instruction) -> Option<OpInfo> {
    if insn.is_fpu() {
        lookup_fpu(insn)
    } else {
        lookup_int(insn)
    }
}

/// Integer/general table.
pub fn lookup_int(insn: &Instruction) -> Option<OpInfo> {
    match insn.class() {
        class::ALU => alu_info(insn, false),
        class::ALU64 => alu_info(insn, true),
        class::JMP => jmp_info(insn, false),
        class::JMP32 => jmp_info(insn, true),
        class::LD => ld_info(insn),
        class::LDX => ldx_info(insn),
        class::ST => st_info(insn),
        class::STX => stx_info(insn),
        _ => unreachable!("class is a 3-bit field"),
    }
}

fn alu_info(insn: &Instruction, is64: bool) -> Option<OpInfo> {
    let x = insn.is_x();
    let info = match (alu::of(insn.opcode), is64, x) {
        (alu::ADD, false, false) => op("ADD_K", 5),
        (alu::ADD, false, true) => op("ADD_X", 1),
        (alu::SUB, false, false) => op("SUB_K", 5),
        (alu::SUB, false, true) => op("SUB_X", 1),
        (alu::MUL, false, false) => op("MUL_K", 14),
        (alu::MUL, false, true) => op("MUL_X", 10),
        (alu::DIV, false, false) => op("DIV_K", 38),
        (alu::DIV, false, true) => op("DIV_X", 34),
        (alu::MOD, false, false) => op("MOD_K", 38),
        (alu::MOD, false, true) => op("MOD_X", 34),
        (alu::OR, false, false) => op("OR_K", 5),
        (alu::OR, false, true) => op("OR_X", 1),
        (alu::AND, false, false) => op("AND_K", 5),
        (alu::AND, false, true) => op("AND_X", 1),
        (alu::LSH, false, false) => op("LSH_K", 1),
        (alu::LSH, false, true) => op("LSH_X", 1),
        (alu::RSH, false, false) => op("RSH_K", 1),
        (alu::RSH, false, true) => op("RSH_X", 1),
        (alu::NEG, false, false) => op("NEG_K", 0),
        (alu::NEG, false, true) => op("NEG_X", 0),
        (alu::XOR, false, false) => op("XOR_K", 5),
        (alu::XOR, false, true) => op("XOR_X", 1),
        (alu::MOV, false, false) => op("MOV_K", 4),
        (alu::MOV, false, true) => op("MOV_X", 4),
        (alu::ARSH, false, false) => op("ARSH_K", 1),
        (alu::ARSH, false, true) => op("ARSH_X", 1),
        (alu::END, false, false) => op_na("END"),

        (alu::ADD, true, false) => op("ADD64_K", 5),
        (alu::ADD, true, true) => op("ADD64_X", 1),
        (alu::SUB, true, false) => op("SUB64_K", 5),
        (alu::SUB, true, true) => op("SUB64_X", 1),
        (alu::MUL, true, false) => op("MUL64_K", 14),
        (alu::MUL, true, true) => op("MUL64_X", 10),
        (alu::DIV, true, false) => op("DIV64_K", 38),
        (alu::DIV, true, true) => op("DIV64_X", 34),
        (alu::MOD, true, false) => op("MOD64_K", 38),
        (alu::MOD, true, true) => op("MOD64_X", 34),
        (alu::OR, true, false) => op("OR64_K", 5),
        (alu::OR, true, true) => op("OR64_X", 1),
        (alu::AND, true, false) => op("AND64_K", 5),
        (alu::AND, true, true) => op("AND64_X", 1),
        (alu::LSH, true, false) => op("LSH64_K", 1),
        (alu::LSH, true, true) => op("LSH64_X", 1),
        (alu::RSH, true, false) => op("RSH64_K", 1),
        (alu::RSH, true, true) => op("RSH64_X", 1),
        (alu::NEG, true, false) => op("NEG64_K", 0),
        (alu::NEG, true, true) => op("NEG64_X", 0),
        (alu::XOR, true, false) => op("XOR64_K", 5),
        (alu::XOR, true, true) => op("XOR64_X", 1),
        (alu::MOV, true, false) => op("MOV64_K", 4),
        (alu::MOV, true, true) => op("MOV64_X", 4),
        (alu::ARSH, true, false) => op("ARSH64_K", 1),
        (alu::ARSH, true, true) => op("ARSH64_X", 1),
        (alu::END, true, false) => op_na("END64"),

        _ => return None,
    };
    Some(info)
}

fn jmp_info(insn: &Instruction, is32: bool) -> Option<OpInfo> {
    let x = insn.is_x();
    let info = match (jmp::of(insn.opcode), is32, x) {
        (jmp::JA, false, false) => op("JA", 2),
        (jmp::JEQ, false, false) => op("JEQ_K", 7),
        (jmp::JEQ, false, true) => op("JEQ_X", 3),
        (jmp::JGT, false, false) => op("JGT_K", 7),
        (jmp::JGT, false, true) => op("JGT_X", 3),
        (jmp::JGE, false, false) => op("JGE_K", 7),
        (jmp::JGE, false, true) => op("JGE_X", 3),
        (jmp::JNE, false, false) => op("JNE_K", 7),
        (jmp::JNE, false, true) => op("JNE_X", 3),
        (jmp::JSET, false, false) => op("JSET_K", 8),
        (jmp::JSET, false, true) => op("JSET_X", 4),
        (jmp::JSGT, false, false) => op("JSGT_K", 7),
        (jmp::JSGT, false, true) => op("JSGT_X", 3),
        (jmp::JSGE, false, false) => op("JSGE_K", 7),
        (jmp::JSGE, false, true) => op("JSGE_X", 3),
        (jmp::JLT, false, false) => op("JLT_K", 7),
        (jmp::JLT, false, true) => op("JLT_X", 3),
        (jmp::JLE, false, false) => op("JLE_K", 7),
        (jmp::JLE, false, true) => op("JLE_X", 3),
        (jmp::JSLT, false, false) => op("JSLT_K", 7),
        (jmp::JSLT, false, true) => op("JSLT_X", 3),
        (jmp::JSLE, false, false) => op("JSLE_K", 7),
        (jmp::JSLE, false, true) => op("JSLE_X", 3),
        (jmp::CALL, false, _) => op("CALL", 11),
        (jmp::EXIT, false, false) => op("EXIT", 2),

        (jmp::JA, true, false) => op("JA", 2),
        (jmp::JEQ, true, false) => op("JEQ32_K", 7),
        (jmp::JEQ, true, true) => op("JEQ32_X", 3),
        (jmp::JGT, true, false) => op("JGT32_K", 7),
        (jmp::JGT, true, true) => op("JGT32_X", 3),
        (jmp::JGE, true, false) => op("JGE32_K", 7),
        (jmp::JGE, true, true) => op("JGE32_X", 3),
        (jmp::JNE, true, false) => op("JNE32_K", 7),
        (jmp::JNE, true, true) => op("JNE32_X", 3),
        (jmp::JSET, true, false) => op("JSET32_K", 8),
        (jmp::JSET, true, true) => op("JSET32_X", 4),
        (jmp::JSGT, true, false) => op("JSGT32_K", 7),
        (jmp::JSGT, true, true) => op("JSGT32_X", 3),
        (jmp::JSGE, true, false) => op("JSGE32_K", 7),
        (jmp::JSGE, true, true) => op("JSGE32_X", 3),
        (jmp::JLT, true, false) => op("JLT32_K", 7),
        (jmp::JLT, true, true) => op("JLT32_X", 3),
        (jmp::JLE, true, false) => op("JLE32_K", 7),
        (jmp::JLE, true, true) => op("JLE32_X", 3),
        (jmp::JSLT, true, false) => op("JSLT32_K", 7),
        (jmp::JSLT, true, true) => op("JSLT32_X", 3),
        (jmp::JSLE, true, false) => op("JSLE32_K", 7),
        (jmp::JSLE, true, true) => op("JSLE32_X", 3),
        (jmp::CALL, true, _) => op("CALL", 11),

        _ => return None,
    };
    Some(info)
}

fn ld_info(insn: &Instruction) -> Option<OpInfo> {
    let info = match (insn.mode(), size::of(insn.opcode)) {
        // Immediate loads never produce an access record; keep the DRAM
        // term baked into the entry.
        (mode::IMM, size::W) => op("LD_IMM_W", 4 + DRAM_PENALTY),
        (mode::IMM, size::H) => op("LD_IMM_H", 4 + DRAM_PENALTY),
        (mode::IMM, size::B) => op("LD_IMM_B", 4 + DRAM_PENALTY),
        (mode::IMM, size::DW) => op("LDDW", 4 + DRAM_PENALTY),

        (mode::ABS, size::W) => op_na("LD_ABS_W"),
        (mode::ABS, size::H) => op_na("LD_ABS_H"),
        (mode::ABS, size::B) => op_na("LD_ABS_B"),
        (mode::ABS, size::DW) => op_na("LD_ABS_DW"),

        (mode::IND, size::W) => op_na("LD_IND_W"),
        (mode::IND, size::H) => op_na("LD_IND_H"),
        (mode::IND, size::B) => op_na("LD_IND_B"),
        (mode::IND, size::DW) => op_na("LD_IND_DW"),

        (mode::MEM, size::W) => op_na("LD_MEM_W"),
        (mode::MEM, size::H) => op_na("LD_MEM_H"),
        (mode::MEM, size::B) => op_na("LD_MEM_B"),
        (mode::MEM, size::DW) => op_na("LD_MEM_DW"),

        (mode::MEMSX, size::W) => op_na("LD_MEMSX_W"),
        (mode::MEMSX, size::H) => op_na("LD_MEMSX_H"),
        (mode::MEMSX, size::B) => op_na("LD_MEMSX_B"),
        (mode::MEMSX, size::DW) => op_na("LD_MEMSX_DW"),

        _ => return None,
    };
    Some(info)
}

fn ldx_info(insn: &Instruction) -> Option<OpInfo> {
    let info = match (insn.mode(), size::of(insn.opcode)) {
        (mode::IMM, size::W) => op_na("LDX_IMM_W"),
        (mode::IMM, size::H) => op_na("LDX_IMM_H"),
        (mode::IMM, size::B) => op_na("LDX_IMM_B"),
        (mode::IMM, size::DW) => op_na("LDX_IMM_DW"),

        (mode::ABS, size::W) => op_na("LDX_ABS_W"),
        (mode::ABS, size::H) => op_na("LDX_ABS_H"),
        (mode::ABS, size::B) => op_na("LDX_ABS_B"),
        (mode::ABS, size::DW) => op_na("LDX_ABS_DW"),

        (mode::IND, size::W) => op_na("LDX_IND_W"),
        (mode::IND, size::H) => op_na("LDX_IND_H"),
        (mode::IND, size::B) => op_na("LDX_IND_B"),
        (mode::IND, size::DW) => op_na("LDX_IND_DW"),

        (mode::MEM, size::W) => op("LDX_W", 11),
        (mode::MEM, size::H) => op("LDX_H", 11),
        (mode::MEM, size::B) => op("LDX_B", 11),
        (mode::MEM, size::DW) => op("LDX_DW", 11),

        (mode::MEMSX, size::W) => op("LDX_MEMSX_W", 11),
        (mode::MEMSX, size::H) => op("LDX_MEMSX_H", 11),
        (mode::MEMSX, size::B) => op("LDX_MEMSX_B", 11),
        (mode::MEMSX, size::DW) => op("LDX_MEMSX_DW", 11),

        _ => return None,
    };
    Some(info)
}

fn st_info(insn: &Instruction) -> Option<OpInfo> {
    let info = match (insn.mode(), size::of(insn.opcode)) {
        (mode::IMM, size::W) => op_na("ST_IMM_W"),
        (mode::IMM, size::H) => op_na("ST_IMM_H"),
        (mode::IMM, size::B) => op_na("ST_IMM_B"),
        (mode::IMM, size::DW) => op_na("ST_IMM_DW"),

        (mode::ABS, size::W) => op("ST_ABS_W", 0),
        (mode::ABS, size::H) => op("ST_ABS_H", 0),
        (mode::ABS, size::B) => op("ST_ABS_B", 0),
        (mode::ABS, size::DW) => op("ST_ABS_DW", 0),

        (mode::IND, size::W) => op("ST_IND_W", 0),
        (mode::IND, size::H) => op("ST_IND_H", 0),
        (mode::IND, size::B) => op("ST_IND_B", 0),
        (mode::IND, size::DW) => op("ST_IND_DW", 0),

        (mode::MEM, size::W) => op("ST_W", 11),
        (mode::MEM, size::H) => op("ST_H", 11),
        (mode::MEM, size::B) => op("ST_B", 11),
        (mode::MEM, size::DW) => op("ST_DW", 11),

        (mode::MEMSX, size::W) => op("ST_MEMSX_W", 11),
        (mode::MEMSX, size::H) => op("ST_MEMSX_H", 11),
        (mode::MEMSX, size::B) => op("ST_MEMSX_B", 11),
        (mode::MEMSX, size::DW) => op("ST_MEMSX_DW", 11),

        _ => return None,
    };
    Some(info)
}

fn stx_info(insn: &Instruction) -> Option<OpInfo> {
    if insn.mode() == mode::ATOMIC {
        return atomic_info(insn);
    }
    let info = match (insn.mode(), size::of(insn.opcode)) {
        (mode::IMM, size::W) => op_na("STX_IMM_W"),
        (mode::IMM, size::H) => op_na("STX_IMM_H"),
        (mode::IMM, size::B) => op_na("STX_IMM_B"),
        (mode::IMM, size::DW) => op_na("STX_IMM_DW"),

        (mode::ABS, size::W) => op_na("STX_ABS_W"),
        (mode::ABS, size::H) => op_na("STX_ABS_H"),
        (mode::ABS, size::B) => op_na("STX_ABS_B"),
        (mode::ABS, size::DW) => op_na("STX_ABS_DW"),

        (mode::IND, size::W) => op_na("STX_IND_W"),
        (mode::IND, size::H) => op_na("STX_IND_H"),
        (mode::IND, size::B) => op_na("STX_IND_B"),
        (mode::IND, size::DW) => op_na("STX_IND_DW"),

        (mode::MEM, size::W) => op("STX_W", 7),
        (mode::MEM, size::H) => op("STX_H", 7),
        (mode::MEM, size::B) => op("STX_B", 7),
        (mode::MEM, size::DW) => op("STX_DW", 7),

        (mode::MEMSX, size::W) => op("STX_MEMSX_W", 7),
        (mode::MEMSX, size::H) => op("STX_MEMSX_H", 7),
        (mode::MEMSX, size::B) => op("STX_MEMSX_B", 7),
        (mode::MEMSX, size::DW) => op("STX_MEMSX_DW", 7),

        _ => return None,
    };
    Some(info)
}

/// Atomic sub-opcode, selected by the low byte of the immediate.
fn atomic_info(insn: &Instruction) -> Option<OpInfo> {
    let sub = (insn.imm & 0xFF) as u8;
    let wide = match size::of(insn.opcode) {
        size::W => false,
        size::DW => true,
        _ => return None,
    };
    let info = match (sub, wide) {
        (atomic::ADD, false) => op("ATOMIC_ADD_W", 8),
        (sub, false) if sub == atomic::ADD | atomic::FETCH => op("ATOMIC_ADD_FETCH_W", 8),
        (atomic::AND, false) => op("ATOMIC_AND_W", 8),
        (sub, false) if sub == atomic::AND | atomic::FETCH => op("ATOMIC_AND_FETCH_W", 8),
        (atomic::OR, false) => op("ATOMIC_OR_W", 8),
        (sub, false) if sub == atomic::OR | atomic::FETCH => op("ATOMIC_OR_FETCH_W", 8),
        (atomic::XOR, false) => op("ATOMIC_XOR_W", 8),
        (sub, false) if sub == atomic::XOR | atomic::FETCH => op("ATOMIC_XOR_FETCH_W", 8),
        (atomic::XCHG, false) => op("ATOMIC_XCHG_W", 8),
        (atomic::CMPXCHG, false) => op("ATOMIC_CMPXCHG_W", 8),

        (atomic::ADD, true) => op("ATOMIC_ADD_DW", 8),
        (sub, true) if sub == atomic::ADD | atomic::FETCH => op("ATOMIC_ADD_FETCH_DW", 8),
        (atomic::AND, true) => op("ATOMIC_AND_DW", 8),
        (sub, true) if sub == atomic::AND | atomic::FETCH => op("ATOMIC_AND_FETCH_DW", 8),
        (atomic::OR, true) => op("ATOMIC_OR_DW", 8),
        (sub, true) if sub == atomic::OR | atomic::FETCH => op("ATOMIC_OR_FETCH_DW", 8),
        (atomic::XOR, true) => op("ATOMIC_XOR_DW", 8),
        (sub, true) if sub == atomic::XOR | atomic::FETCH => op("ATOMIC_XOR_FETCH_DW", 8),
        (atomic::XCHG, true) => op("ATOMIC_XCHG_DW", 8),
        (atomic::CMPXCHG, true) => op("ATOMIC_CMPXCHG_DW", 8),

        _ => return None,
    };
    Some(info)
}

/// Floating-point table. Covers FPU arithmetic, FPU compare jumps and
/// FMEM loads/stores.
pub fn lookup_fpu(insn: &Instruction) -> Option<OpInfo> {
    match insn.class() {
        class::ALU => fpu_alu_info(insn, false),
        class::ALU64 => fpu_alu_info(insn, true),
        class::JMP => fpu_jmp_info(insn, false),
        class::JMP32 => fpu_jmp_info(insn, true),
        class::LD | class::LDX if insn.mode() == mode::FMEM => {
            let info = match (insn.class(), size::of(insn.opcode)) {
                (class::LD, size::W) => op("FLD_W", 3),
                (class::LD, size::H) => op("FLD_H", 3),
                (class::LD, size::B) => op("FLD_B", 3),
                (class::LD, size::DW) => op("FLD_DW", 3),
                (class::LDX, size::W) => op("FLDX_W", 3),
                (class::LDX, size::H) => op("FLDX_H", 3),
                (class::LDX, size::B) => op("FLDX_B", 3),
                (class::LDX, size::DW) => op("FLDX_DW", 3),
                _ => return None,
            };
            Some(info)
        }
        class::ST | class::STX if insn.mode() == mode::FMEM => {
            let info = match (insn.class(), size::of(insn.opcode)) {
                (class::ST, size::W) => op("FST_W", 1),
                (class::ST, size::H) => op("FST_H", 1),
                (class::ST, size::B) => op("FST_B", 1),
                (class::ST, size::DW) => op("FST_DW", 1),
                (class::STX, size::W) => op("FSTX_W", 1),
                (class::STX, size::H) => op("FSTX_H", 1),
                (class::STX, size::B) => op("FSTX_B", 1),
                (class::STX, size::DW) => op("FSTX_DW", 1),
                _ => return None,
            };
            Some(info)
        }
        _ => None,
    }
}

fn fpu_alu_info(insn: &Instruction, is64: bool) -> Option<OpInfo> {
    let x = insn.is_x();
    let info = match (alu::of(insn.opcode), is64, x) {
        (alu::ADD, false, false) => op("FADD_K", 12),
        (alu::ADD, false, true) => op("FADD_X", 5),
        (alu::SUB, false, false) => op("FSUB_K", 12),
        (alu::SUB, false, true) => op("FSUB_X", 5),
        (alu::MUL, false, false) => op("FMUL_K", 12),
        (alu::MUL, false, true) => op("FMUL_X", 5),
        (alu::DIV, false, false) => op("FDIV_K", 27),
        (alu::DIV, false, true) => op("FDIV_X", 20),
        (alu::NEG, false, false) => op("FNEG_K", 3),
        (alu::NEG, false, true) => op("FNEG_X", 3),
        (alu::MOV, false, false) => op("FMOV_K", 7),
        (alu::MOV, false, true) => op("FMOV_X", 7),

        (alu::ADD, true, false) => op("FADD64_K", 14),
        (alu::ADD, true, true) => op("FADD64_X", 7),
        (alu::SUB, true, false) => op("FSUB64_K", 14),
        (alu::SUB, true, true) => op("FSUB64_X", 7),
        (alu::MUL, true, false) => op("FMUL64_K", 14),
        (alu::MUL, true, true) => op("FMUL64_X", 7),
        (alu::DIV, true, false) => op("FDIV64_K", 27),
        (alu::DIV, true, true) => op("FDIV64_X", 20),
        (alu::NEG, true, false) => op("FNEG64_K", 3),
        (alu::NEG, true, true) => op("FNEG64_X", 3),
        (alu::MOV, true, false) => op("FMOV64_K", 7),
        (alu::MOV, true, true) => op("FMOV64_X", 7),

        _ => return None,
    };
    Some(info)
}

fn fpu_jmp_info(insn: &Instruction, is32: bool) -> Option<OpInfo> {
    let x = insn.is_x();
    let info = match (jmp::of(insn.opcode), is32, x) {
        (jmp::JEQ, false, false) => op("JFEQ_K", 10),
        (jmp::JEQ, false, true) => op("JFEQ_X", 3),
        (jmp::JGT, false, false) => op("JFOGT_K", 10),
        (jmp::JGT, false, true) => op("JFOGT_X", 3),
        (jmp::JGE, false, false) => op("JFOGE_K", 10),
        (jmp::JGE, false, true) => op("JFOGE_X", 3),
        (jmp::JNE, false, false) => op("JFNE_K", 10),
        (jmp::JNE, false, true) => op("JFNE_X", 3),
        (jmp::JSGT, false, false) => op("JFUGT_K", 15),
        (jmp::JSGT, false, true) => op("JFUGT_X", 8),
        (jmp::JSGE, false, false) => op("JFUGE_K", 15),
        (jmp::JSGE, false, true) => op("JFUGE_X", 8),
        (jmp::JLT, false, false) => op("JFOLT_K", 10),
        (jmp::JLT, false, true) => op("JFOLT_X", 3),
        (jmp::JLE, false, false) => op("JFOLE_K", 10),
        (jmp::JLE, false, true) => op("JFOLE_X", 3),
        (jmp::JSLT, false, false) => op("JFULT_K", 15),
        (jmp::JSLT, false, true) => op("JFULT_X", 8),
        (jmp::JSLE, false, false) => op("JFULE_K", 15),
        (jmp::JSLE, false, true) => op("JFULE_X", 8),

        (jmp::JEQ, true, false) => op("JFEQ32_K", 10),
        (jmp::JEQ, true, true) => op("JFEQ32_X", 3),
        (jmp::JGT, true, false) => op("JFOGT32_K", 10),
        (jmp::JGT, true, true) => op("JFOGT32_X", 3),
        (jmp::JGE, true, false) => op("JFOGE32_K", 10),
        (jmp::JGE, true, true) => op("JFOGE32_X", 3),
        (jmp::JNE, true, false) => op("JFNE32_K", 10),
        (jmp::JNE, true, true) => op("JFNE32_X", 3),
        (jmp::JSGT, true, false) => op("JFUGT32_K", 15),
        (jmp::JSGT, true, true) => op("JFUGT32_X", 8),
        (jmp::JSGE, true, false) => op("JFUGE32_K", 15),
        (jmp::JSGE, true, true) => op("JFUGE32_X", 8),
        (jmp::JLT, true, false) => op("JFOLT32_K", 10),
        (jmp::JLT, true, true) => op("JFOLT32_X", 3),
        (jmp::JLE, true, false) => op("JFOLE32_K", 10),
        (jmp::JLE, true, true) => op("JFOLE32_X", 3),
        (jmp::JSLT, true, false) => op("JFULT32_K", 15),
        (jmp::JSLT, true, true) => op("JFULT32_X", 8),
        (jmp::JSLE, true, false) => op("JFULE32_K", 15),
        (jmp::JSLE, true, true) => op("JFULE32_X", 8),

        _ => return None,
    };
    Some(info)
}
