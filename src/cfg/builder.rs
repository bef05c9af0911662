//! Two-pass basic-block partition.
//!
//! Pass 1 collects leaders: index 0, every jump target, and the
//! instruction after every terminator. Pass 2 cuts blocks at leaders and
//! wires successors from each block's final instruction. Helper calls
//! (`CALL` with a helper convention in `src`) are ordinary instructions
//! and do not end a block.

use crate::cfg::{BasicBlock, BlockId, Cfg};
use crate::error::{AnalysisError, Result};
use crate::isa::insn::Instruction;
use crate::isa::{call_src, class, jmp};
use std::collections::{BTreeSet, HashMap};

/// Control transfer of a terminator instruction.
enum Transfer {
    Exit,
    Jump(usize),
    Call(usize),
    Branch(usize),
}

/// Build the CFG of a decoded program.
pub fn build(instructions: &[Instruction]) -> Result<Cfg> {
    let n = instructions.len();
    if n == 0 {
        return Ok(Cfg::default());
    }

    // Pass 1: leaders.
    let mut leaders = BTreeSet::new();
    leaders.insert(0usize);
    for (i, insn) in instructions.iter().enumerate() {
        if !insn.is_terminator() {
            continue;
        }
        if i + 1 < n {
            leaders.insert(i + 1);
        }
        match transfer(insn, i, n)? {
            Transfer::Exit => {}
            Transfer::Jump(t) | Transfer::Call(t) | Transfer::Branch(t) => {
                leaders.insert(t);
            }
        }
    }

    // Pass 2: cut blocks at leaders; a terminator always has a leader
    // right behind it, so the next leader bounds every block.
    let starts: Vec<usize> = leaders.into_iter().collect();
    let id_of: HashMap<usize, BlockId> =
        starts.iter().enumerate().map(|(id, &s)| (s, id)).collect();

    let mut blocks = Vec::with_capacity(starts.len());
    for (id, &start) in starts.iter().enumerate() {
        let end = match starts.get(id + 1) {
            Some(&next) => next - 1,
            None => n - 1,
        };
        let last = &instructions[end];

        let successors: Vec<BlockId> = if last.is_terminator() {
            match transfer(last, end, n)? {
                Transfer::Exit => vec![],
                Transfer::Jump(t) | Transfer::Call(t) => vec![id_of[&t]],
                Transfer::Branch(taken) => {
                    let fall = end + 1;
                    if fall >= n {
                        return Err(AnalysisError::UnreachableCfg {
                            index: end,
                            message: "conditional jump falls off the end of the program"
                                .into(),
                        });
                    }
                    vec![id_of[&taken], id_of[&fall]]
                }
            }
        } else if end + 1 < n {
            vec![id_of[&(end + 1)]]
        } else {
            vec![]
        };

        blocks.push(BasicBlock {
            start,
            end,
            successors,
        });
    }

    Ok(Cfg::from_blocks(blocks))
}

/// Classify a terminator and resolve its target index.
fn transfer(insn: &Instruction, index: usize, n: usize) -> Result<Transfer> {
    debug_assert!(insn.is_terminator());

    let target = |delta: i64| -> Result<usize> {
        let t = index as i64 + delta + 1;
        if t < 0 || t >= n as i64 {
            return Err(AnalysisError::UnreachableCfg {
                index,
                message: format!("jump target {t} is outside the program"),
            });
        }
        Ok(t as usize)
    };

    match jmp::of(insn.opcode) {
        jmp::EXIT if !insn.is_x() && insn.class() == class::JMP => Ok(Transfer::Exit),
        jmp::JA if !insn.is_x() => {
            // The JMP form takes an offset, the JMP32 form an immediate.
            let delta = if insn.class() == class::JMP {
                i64::from(insn.off)
            } else {
                i64::from(insn.imm)
            };
            Ok(Transfer::Jump(target(delta)?))
        }
        jmp::CALL if !insn.is_x() && insn.src == call_src::LOCAL => {
            Ok(Transfer::Call(target(i64::from(insn.imm))?))
        }
        jmp::JEQ | jmp::JGT | jmp::JGE | jmp::JSET | jmp::JNE | jmp::JSGT
        | jmp::JSGE | jmp::JLT | jmp::JLE | jmp::JSLT | jmp::JSLE => {
            Ok(Transfer::Branch(target(i64::from(insn.off))?))
        }
        _ => Err(AnalysisError::UnreachableCfg {
            index,
            message: format!("cannot wire jump opcode 0x{:02X}", insn.opcode),
        }),
    }
}
