//! Instruction decoding.
//!
//! Raw byte streams are parsed as packed little-endian 64-bit words into
//! [`Instruction`] records. A load/store-class instruction with mode IMM
//! is *wide*: it consumes a second word that supplies the upper half of a
//! 64-bit immediate plus a reserved field. A wide instruction occupies a
//! single index in the decoded program and carries its second word.

use crate::error::{AnalysisError, Result};
use crate::isa::{class, jmp, mask, mode, shift, src};
use byteorder::{ByteOrder, LittleEndian};
use std::fmt;

/// Payload of the second word of a wide (16-byte) instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidePayload {
    /// Reserved field, bits 32..63 of the second word.
    pub reserved: u32,
    /// Upper 32 bits of the 64-bit immediate, bits 0..31 of the second word.
    pub next_imm: i32,
}

/// A decoded eBPF+ instruction.
///
/// Fields are extracted with fixed shifts and masks; the offset and
/// immediate are sign-extended from their encoded widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Operation code byte.
    pub opcode: u8,
    /// Destination register index (0..10).
    pub dst: u8,
    /// Source register index (0..10).
    pub src: u8,
    /// Signed 16-bit offset.
    pub off: i16,
    /// Signed 32-bit immediate.
    pub imm: i32,
    /// Second word of a wide instruction, when present.
    pub wide: Option<WidePayload>,
}

impl Instruction {
    /// Decode a single 8-byte word.
    pub fn from_word(word: u64) -> Self {
        Self {
            opcode: (word >> shift::OPCODE & mask::OPCODE) as u8,
            dst: (word >> shift::DST & mask::REG) as u8,
            src: (word >> shift::SRC & mask::REG) as u8,
            off: (word >> shift::OFFSET & mask::OFFSET) as u16 as i16,
            imm: (word >> shift::IMM & mask::IMM) as u32 as i32,
            wide: None,
        }
    }

    /// Attach the second word of a wide instruction.
    pub fn widen(&mut self, word: u64) {
        self.wide = Some(WidePayload {
            reserved: (word >> shift::RESERVED & mask::IMM) as u32,
            next_imm: (word >> shift::NEXT_IMM & mask::IMM) as u32 as i32,
        });
    }

    /// Reassemble the primary 8-byte word, bit for bit.
    pub fn encode(&self) -> u64 {
        u64::from(self.opcode) << shift::OPCODE
            | u64::from(self.dst) << shift::DST
            | u64::from(self.src) << shift::SRC
            | u64::from(self.off as u16) << shift::OFFSET
            | u64::from(self.imm as u32) << shift::IMM
    }

    /// Instruction class (low 3 bits of the opcode).
    pub fn class(&self) -> u8 {
        class::of(self.opcode)
    }

    /// Memory mode bits, meaningful for load/store classes.
    pub fn mode(&self) -> u8 {
        mode::of(self.opcode)
    }

    /// Access size bits, meaningful for load/store classes.
    pub fn size(&self) -> u8 {
        crate::isa::size::of(self.opcode)
    }

    /// True for the LD/LDX/ST/STX classes.
    pub fn is_ld_st(&self) -> bool {
        matches!(self.class(), class::LD | class::LDX | class::ST | class::STX)
    }

    /// True for the ALU/ALU64/JMP/JMP32 classes.
    pub fn is_alu_jmp(&self) -> bool {
        matches!(
            self.class(),
            class::ALU | class::ALU64 | class::JMP | class::JMP32
        )
    }

    /// True for the JMP/JMP32 classes.
    pub fn is_jump_class(&self) -> bool {
        matches!(self.class(), class::JMP | class::JMP32)
    }

    /// True when the `src` register (X form) supplies the second operand.
    pub fn is_x(&self) -> bool {
        src::of(self.opcode) == src::X
    }

    /// A wide instruction is any load/store-class instruction with mode IMM.
    pub fn is_wide(&self) -> bool {
        self.is_ld_st() && self.mode() == mode::IMM
    }

    /// The 64-bit immediate of a wide instruction, or the sign-extended
    /// 32-bit immediate otherwise.
    pub fn imm64(&self) -> i64 {
        match self.wide {
            Some(w) => (i64::from(w.next_imm) << 32) | i64::from(self.imm as u32),
            None => i64::from(self.imm),
        }
    }

    /// True for a helper call: `CALL | K | JMP` (or JMP32) with the call
    /// convention carried in `src` naming a helper rather than a local
    /// function. Helper calls do not end a basic block.
    pub fn is_helper_call(&self) -> bool {
        self.is_jump_class()
            && jmp::of(self.opcode) == jmp::CALL
            && !self.is_x()
            && matches!(
                self.src,
                crate::isa::call_src::HELPER_STATIC | crate::isa::call_src::HELPER_BTF
            )
    }

    /// True when this instruction ends a basic block: any jump-class
    /// instruction except a helper call.
    pub fn is_terminator(&self) -> bool {
        self.is_jump_class() && !self.is_helper_call()
    }

    /// FPU discriminator: steers the instruction to the floating-point
    /// latency table and transfer functions.
    ///
    /// - ALU/ALU64: bit 1 of the offset.
    /// - JMP/JMP32, excluding CALL, EXIT and JA: bit 1 of the immediate.
    ///   JA is excluded because its JMP32 form carries the jump target in
    ///   the immediate.
    /// - Memory classes: mode FMEM.
    pub fn is_fpu(&self) -> bool {
        match self.class() {
            class::ALU | class::ALU64 => (self.off >> 1) & 1 == 1,
            class::JMP | class::JMP32 => {
                let code = jmp::of(self.opcode);
                if code == jmp::CALL || code == jmp::EXIT || code == jmp::JA {
                    return false;
                }
                (self.imm >> 1) & 1 == 1
            }
            _ => self.mode() == mode::FMEM,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.encode().to_le_bytes()))?;
        if let Some(w) = self.wide {
            let second =
                u64::from(w.reserved) << shift::RESERVED | u64::from(w.next_imm as u32);
            write!(f, " {}", hex::encode(second.to_le_bytes()))?;
        }
        Ok(())
    }
}

/// Decode a raw byte stream into a program.
///
/// The stream must be a whole number of 8-byte words, and every wide
/// instruction must be followed by its second word.
pub fn decode_program(data: &[u8]) -> Result<Vec<Instruction>> {
    let mut instructions = Vec::with_capacity(data.len() / 8);
    let mut offset = 0;

    while offset < data.len() {
        let remaining = data.len() - offset;
        if remaining < 8 {
            return Err(AnalysisError::MalformedInstruction {
                offset,
                expected: 8,
                actual: remaining,
            });
        }

        let word = LittleEndian::read_u64(&data[offset..offset + 8]);
        let mut insn = Instruction::from_word(word);
        offset += 8;

        if insn.is_wide() {
            let remaining = data.len() - offset;
            if remaining < 8 {
                return Err(AnalysisError::MalformedInstruction {
                    offset,
                    expected: 8,
                    actual: remaining,
                });
            }
            insn.widen(LittleEndian::read_u64(&data[offset..offset + 8]));
            offset += 8;
        }

        instructions.push(insn);
    }

    Ok(instructions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_exit() {
        let insns = decode_program(&[0x95, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(insns.len(), 1);
        assert_eq!(insns[0].opcode, 0x95);
        assert_eq!(insns[0].class(), class::JMP);
        assert!(insns[0].is_terminator());
    }

    #[test]
    fn test_decode_fields() {
        // MOV64_K R1, 7
        let insns = decode_program(&[0xB7, 0x01, 0, 0, 0x07, 0, 0, 0]).unwrap();
        let insn = insns[0];
        assert_eq!(insn.opcode, 0xB7);
        assert_eq!(insn.dst, 1);
        assert_eq!(insn.src, 0);
        assert_eq!(insn.imm, 7);
        assert_eq!(insn.off, 0);
    }

    #[test]
    fn test_sign_extension() {
        // LDX_W R1, [R10 - 8]: offset 0xFFF8 decodes as -8.
        let insns = decode_program(&[0x61, 0xA1, 0xF8, 0xFF, 0, 0, 0, 0]).unwrap();
        assert_eq!(insns[0].off, -8);
        assert_eq!(insns[0].dst, 1);
        assert_eq!(insns[0].src, 10);

        // Immediate 0xFFFFFFFF decodes as -1.
        let insns =
            decode_program(&[0xB7, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]).unwrap();
        assert_eq!(insns[0].imm, -1);
        assert_eq!(insns[0].imm64(), -1);
    }

    #[test]
    fn test_roundtrip() {
        let words: [u64; 4] = [
            0x0000_0007_0000_01B7, // MOV64_K R1, 7
            0x0000_0000_FFF8_A161, // LDX_W R1, [R10 - 8]
            0xFFFF_FFFF_0001_211D, // JEQ_X with offset
            0x0000_0000_0000_0095, // EXIT
        ];
        for word in words {
            assert_eq!(Instruction::from_word(word).encode(), word);
        }
    }

    #[test]
    fn test_wide_instruction() {
        // LDDW R2, 0x1_0000_0001: LD | DW | IMM followed by the second
        // word, whose low half carries the upper immediate.
        let mut data = vec![0x18, 0x02, 0, 0, 0x01, 0, 0, 0];
        data.extend_from_slice(&[0x01, 0, 0, 0, 0, 0, 0, 0]);
        let insns = decode_program(&data).unwrap();
        assert_eq!(insns.len(), 1);
        assert!(insns[0].is_wide());
        assert_eq!(insns[0].imm64(), 0x1_0000_0001);
    }

    #[test]
    fn test_truncated_word() {
        let err = decode_program(&[0x95, 0, 0]).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::MalformedInstruction {
                offset: 0,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_truncated_wide() {
        // A wide instruction with no second word.
        let err = decode_program(&[0x18, 0x02, 0, 0, 0x01, 0, 0, 0]).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::MalformedInstruction { offset: 8, .. }
        ));
    }

    #[test]
    fn test_helper_call_is_not_terminator() {
        // CALL helper id 1 (src = 0).
        let insns = decode_program(&[0x85, 0, 0, 0, 0x01, 0, 0, 0]).unwrap();
        assert!(insns[0].is_helper_call());
        assert!(!insns[0].is_terminator());

        // CALL with src = 1 is a local call, which does terminate.
        let insns = decode_program(&[0x85, 0x10, 0, 0, 0x02, 0, 0, 0]).unwrap();
        assert!(!insns[0].is_helper_call());
        assert!(insns[0].is_terminator());
    }

    #[test]
    fn test_fpu_discriminator() {
        // ADD64_X with offset bit 1 set is floating.
        let mut insn = Instruction::from_word(0x0F);
        insn.off = 0b10;
        assert!(insn.is_fpu());
        insn.off = 0;
        assert!(!insn.is_fpu());

        // JEQ_X with imm bit 1 set is floating.
        let mut jump = Instruction::from_word(0x1D);
        jump.imm = 0b10;
        assert!(jump.is_fpu());

        // EXIT ignores the immediate.
        let mut exit = Instruction::from_word(0x95);
        exit.imm = 0b10;
        assert!(!exit.is_fpu());

        // FMEM mode marks floating memory operations.
        let fldx = Instruction::from_word(0xA1); // LDX | W | FMEM
        assert!(fldx.is_fpu());
    }
}
