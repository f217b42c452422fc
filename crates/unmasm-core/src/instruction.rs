//! Decoded instruction records.

use crate::{Architecture, Expression};

/// A decoded instruction, as handed over by the decoder.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    /// Virtual address of this instruction.
    pub address: u64,
    /// Architecture the instruction was decoded for.
    pub arch: Architecture,
    /// Mnemonic string (e.g., "mov", "lea", "bl").
    pub mnemonic: String,
    /// Operand expression trees, in encoding order.
    pub operands: Vec<Expression>,
    /// Raw bytes of the instruction.
    pub bytes: Vec<u8>,
}

impl Instruction {
    /// Creates a new instruction without operands.
    pub fn new(
        address: u64,
        arch: Architecture,
        bytes: Vec<u8>,
        mnemonic: impl Into<String>,
    ) -> Self {
        Self {
            address,
            arch,
            mnemonic: mnemonic.into(),
            operands: Vec::new(),
            bytes,
        }
    }

    /// Adds an operand.
    pub fn with_operand(mut self, op: Expression) -> Self {
        self.operands.push(op);
        self
    }

    /// Sets operands.
    pub fn with_operands(mut self, ops: Vec<Expression>) -> Self {
        self.operands = ops;
        self
    }

    /// Returns true if this instruction belongs to the x86 family.
    pub fn is_x86(&self) -> bool {
        self.arch.is_x86()
    }

    /// Returns true for `lea`, whose memory operand is an address computation
    /// rather than an access.
    pub fn is_lea(&self) -> bool {
        self.is_x86() && self.mnemonic.eq_ignore_ascii_case("lea")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::x86;
    use crate::Register;

    #[test]
    fn test_builder_appends_operands() {
        let inst = Instruction::new(0x1000, Architecture::X86, vec![0x89, 0xd0], "mov")
            .with_operand(Expression::reg(Register::x86_gpr32(x86::RAX)))
            .with_operand(Expression::reg(Register::x86_gpr32(x86::RDX)));
        assert_eq!(inst.operands.len(), 2);
        assert_eq!(inst.bytes, vec![0x89, 0xd0]);
        assert!(inst.is_x86());
    }

    #[test]
    fn test_lea_detection() {
        assert!(Instruction::new(0, Architecture::X86_64, vec![], "lea").is_lea());
        assert!(Instruction::new(0, Architecture::X86, vec![], "LEA").is_lea());
        assert!(!Instruction::new(0, Architecture::X86, vec![], "mov").is_lea());
        assert!(!Instruction::new(0, Architecture::Arm64, vec![], "lea").is_lea());
    }
}
