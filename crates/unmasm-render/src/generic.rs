//! Architecture-neutral fallback unparser.
//!
//! Used for instructions outside the x86 family. It accepts every expression
//! kind and never fails; its output is readable but not MASM.

use unmasm_core::{Expression, Instruction, LabelMap, RegisterNamer};

use crate::numeric::format_integer;

/// Renders a whole instruction (mnemonic and operands) as text.
pub trait GenericUnparser {
    /// Returns `<mnemonic> <operands>` for `inst`.
    fn unparse_instruction(
        &self,
        inst: &Instruction,
        namer: &dyn RegisterNamer,
        labels: &LabelMap,
    ) -> String;
}

/// Default fallback: plain infix text, `[...]` for memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainUnparser;

impl PlainUnparser {
    /// Renders one expression.
    pub fn unparse_expression(
        &self,
        expr: &Expression,
        namer: &dyn RegisterNamer,
        labels: &LabelMap,
    ) -> String {
        let sub = |e: &Expression| self.unparse_expression(e, namer, labels);
        match expr {
            Expression::Add(lhs, rhs) => format!("{} + {}", sub(lhs), sub(rhs)),
            Expression::Subtract(lhs, rhs) => format!("{} - {}", sub(lhs), sub(rhs)),
            Expression::Multiply(lhs, rhs) => format!("{} * {}", sub(lhs), sub(rhs)),
            Expression::MemoryReference(mem) => match &mem.segment {
                Some(segment) => format!("{}:[{}]", sub(segment), sub(&mem.address)),
                None => format!("[{}]", sub(&mem.address)),
            },
            Expression::DirectRegister(reg) => namer.register_name(reg).into_owned(),
            Expression::IndirectRegister { register, index } => {
                format!("{}[{}]", namer.register_name(register), index)
            }
            Expression::IntegerValue(value) => format_integer(value, labels),
            Expression::Negate(inner) => format!("-{}", sub(inner)),
            Expression::ShiftLeft(lhs, rhs) => format!("{}, lsl {}", sub(lhs), sub(rhs)),
            Expression::FloatValue { value, .. } => format!("{}", value),
            Expression::RegisterList(regs) => {
                let names: Vec<_> = regs.iter().map(|r| namer.register_name(r)).collect();
                format!("{{{}}}", names.join(", "))
            }
        }
    }
}

impl GenericUnparser for PlainUnparser {
    fn unparse_instruction(
        &self,
        inst: &Instruction,
        namer: &dyn RegisterNamer,
        labels: &LabelMap,
    ) -> String {
        if inst.operands.is_empty() {
            return inst.mnemonic.clone();
        }
        let operands: Vec<_> = inst
            .operands
            .iter()
            .map(|op| self.unparse_expression(op, namer, labels))
            .collect();
        format!("{} {}", inst.mnemonic, operands.join(", "))
    }
}
