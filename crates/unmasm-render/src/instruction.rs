//! Single-instruction listing lines.

use std::fmt::Write;

use unmasm_core::{Instruction, LabelMap, RegisterNamer, StandardNamer};

use crate::error::RenderError;
use crate::generic::{GenericUnparser, PlainUnparser};
use crate::masm::MasmUnparser;

/// Text emitted for a missing instruction.
pub const NULL_INSTRUCTION: &str = "NULL!";

/// Width of the mnemonic column.
const MNEMONIC_WIDTH: usize = 9;

/// Hex-encodes at most `max_bytes` of `bytes`, upper case, no separators.
///
/// A trailing `+` marks a truncated dump.
pub fn opcode_bytes(bytes: &[u8], max_bytes: usize) -> String {
    let shown = &bytes[..bytes.len().min(max_bytes)];
    let mut out = String::with_capacity(shown.len() * 2 + 1);
    for byte in shown {
        let _ = write!(out, "{:02X}", byte);
    }
    if bytes.len() > max_bytes {
        out.push('+');
    }
    out
}

/// Renders one instruction per line:
/// `<ADDR>: <mnemonic> <operands> ; BYTES: <HEX>`.
#[derive(Clone, Copy)]
pub struct InstructionRenderer<'a> {
    unparser: MasmUnparser<'a>,
    fallback: &'a dyn GenericUnparser,
    max_bytes: usize,
}

impl<'a> InstructionRenderer<'a> {
    /// Creates a renderer with standard register names and the plain fallback.
    pub fn new(labels: &'a LabelMap, max_bytes: usize) -> Self {
        Self::with_parts(
            MasmUnparser::with_namer(labels, &StandardNamer),
            &PlainUnparser,
            max_bytes,
        )
    }

    /// Creates a renderer from explicit collaborators.
    pub fn with_parts(
        unparser: MasmUnparser<'a>,
        fallback: &'a dyn GenericUnparser,
        max_bytes: usize,
    ) -> Self {
        Self {
            unparser,
            fallback,
            max_bytes,
        }
    }

    /// Renders `inst`, or [`NULL_INSTRUCTION`] when it is missing.
    pub fn render_opt(&self, inst: Option<&Instruction>) -> Result<String, RenderError> {
        match inst {
            Some(inst) => self.render(inst),
            None => Ok(NULL_INSTRUCTION.to_string()),
        }
    }

    /// Renders one instruction line, without a trailing newline.
    pub fn render(&self, inst: &Instruction) -> Result<String, RenderError> {
        let mut line = if inst.is_x86() {
            let operands = self
                .unparser
                .unparse_operands(inst)
                .map_err(|source| RenderError::Instruction {
                    address: inst.address,
                    source,
                })?;
            format!(
                "{:X}: {:<width$} {}",
                inst.address,
                inst.mnemonic,
                operands,
                width = MNEMONIC_WIDTH
            )
        } else {
            log::debug!(
                "{} instruction at {:#x} uses the generic unparser",
                inst.arch.name(),
                inst.address
            );
            let text = self
                .fallback
                .unparse_instruction(inst, self.namer(), self.unparser.labels());
            format!("0x{:08X} {}", inst.address, text)
        };

        if self.max_bytes > 0 {
            line.push_str(" ; BYTES: ");
            line.push_str(&opcode_bytes(&inst.bytes, self.max_bytes));
        }
        Ok(line)
    }

    fn namer(&self) -> &'a dyn RegisterNamer {
        self.unparser.namer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unmasm_core::register::x86;
    use unmasm_core::{Architecture, Expression, OperandType, Register, RegisterClass, Width};

    fn reg(id: u16) -> Expression {
        Expression::reg(Register::x86_gpr32(id))
    }

    fn indexed_mov() -> Instruction {
        let address = Expression::add(
            Expression::add(
                reg(x86::RAX),
                Expression::mul(reg(x86::RCX), Expression::int(Width::W8, 4)),
            ),
            Expression::signed(Width::W8, -8),
        );
        Instruction::new(0x401000, Architecture::X86, vec![0x89, 0x54, 0x88, 0xf8], "mov")
            .with_operand(Expression::mem(address, OperandType::Integer(32)))
            .with_operand(reg(x86::RDX))
    }

    #[test]
    fn test_opcode_bytes() {
        assert_eq!(opcode_bytes(&[0x89, 0xd0], 8), "89D0");
        assert_eq!(opcode_bytes(&[0x89, 0xd0], 2), "89D0");
        assert_eq!(opcode_bytes(&[0x89, 0xd0, 0x90], 2), "89D0+");
        assert_eq!(opcode_bytes(&[], 4), "");
    }

    #[test]
    fn test_indexed_mov_line() {
        let labels = LabelMap::new();
        let line = InstructionRenderer::new(&labels, 0).render(&indexed_mov()).unwrap();
        assert_eq!(line, "401000: mov       [eax+ecx*4-0x8], edx");
    }

    #[test]
    fn test_byte_dump_suffix() {
        let labels = LabelMap::new();
        let full = InstructionRenderer::new(&labels, 8).render(&indexed_mov()).unwrap();
        assert_eq!(full, "401000: mov       [eax+ecx*4-0x8], edx ; BYTES: 895488F8");

        let cut = InstructionRenderer::new(&labels, 3).render(&indexed_mov()).unwrap();
        assert!(cut.ends_with(" ; BYTES: 895488+"));
    }

    #[test]
    fn test_address_is_upper_case_hex() {
        let labels = LabelMap::new();
        let ret = Instruction::new(0xabcdef, Architecture::X86_64, vec![0xc3], "ret");
        let line = InstructionRenderer::new(&labels, 0).render(&ret).unwrap();
        assert_eq!(line, "ABCDEF: ret       ");
    }

    #[test]
    fn test_long_mnemonic_is_not_truncated() {
        let labels = LabelMap::new();
        let inst = Instruction::new(0x10, Architecture::X86, vec![0x0f, 0xae, 0xf0], "cmpxchg16b")
            .with_operand(reg(x86::RAX));
        let line = InstructionRenderer::new(&labels, 0).render(&inst).unwrap();
        assert_eq!(line, "10: cmpxchg16b eax");
    }

    #[test]
    fn test_label_operand() {
        let labels: LabelMap = [(0x402000u64, "sub_402000")].into_iter().collect();
        let call = Instruction::new(0x401005, Architecture::X86, vec![0xe8, 0, 0, 0, 0], "call")
            .with_operand(Expression::int(Width::W32, 0x402000));
        let line = InstructionRenderer::new(&labels, 0).render(&call).unwrap();
        assert_eq!(line, "401005: call      sub_402000");
    }

    #[test]
    fn test_non_x86_uses_fallback() {
        let labels = LabelMap::new();
        let x0 = Register::new(Architecture::Arm64, RegisterClass::General, 0, 64);
        let inst = Instruction::new(
            0x1000,
            Architecture::Arm64,
            vec![0x00, 0x04, 0x00, 0x91],
            "add",
        )
        .with_operand(Expression::reg(x0))
        .with_operand(Expression::reg(x0))
        .with_operand(Expression::int(Width::W64, 1));
        let line = InstructionRenderer::new(&labels, 2).render(&inst).unwrap();
        assert_eq!(line, "0x00001000 add x0, x0, 0x1 ; BYTES: 0004+");
    }

    #[test]
    fn test_unsupported_operand_names_instruction() {
        let labels = LabelMap::new();
        let inst = Instruction::new(0x401010, Architecture::X86, vec![0xd9, 0xe8], "fld")
            .with_operand(Expression::FloatValue { bits: 80, value: 1.0 });
        let err = InstructionRenderer::new(&labels, 0).render(&inst).unwrap_err();
        assert_eq!(err.address(), 0x401010);
        assert_eq!(
            err.to_string(),
            "instruction at 0x401010: unhandled expression kind FloatValue"
        );
    }

    #[test]
    fn test_missing_instruction() {
        let labels = LabelMap::new();
        let renderer = InstructionRenderer::new(&labels, 8);
        assert_eq!(renderer.render_opt(None).unwrap(), NULL_INSTRUCTION);
    }
}
