//! MASM-style operand unparser for x86.

use unmasm_core::register::x86;
use unmasm_core::{
    Expression, Instruction, LabelMap, MemoryReference, Register, RegisterClass, RegisterNamer,
    StandardNamer,
};

use crate::address::IndexedAddress;
use crate::error::UnparseError;
use crate::numeric::format_integer;
use crate::ptr_type::ptr_keyword;

/// Text emitted for a missing operand.
pub const NULL_OPERAND: &str = "BOGUS:NULL";

/// Whether a memory operand's size must be spelled out.
///
/// MASM infers the access size from the other operand in practice, so the
/// size prefix is never emitted. Known limitation: a real ambiguity check
/// (e.g. `inc [eax]`) is not implemented.
const SIZE_IS_AMBIGUOUS: bool = false;

/// True for the one segment override common enough to always show: `fs`.
fn is_shown_segment(reg: &Register) -> bool {
    reg.arch.is_x86() && reg.class == RegisterClass::Segment && reg.id == x86::FS
}

/// Renders x86 operand expression trees as MASM text.
///
/// Holds only shared references; one unparser can serve any number of
/// instructions, from any number of threads.
#[derive(Clone, Copy)]
pub struct MasmUnparser<'a> {
    labels: &'a LabelMap,
    namer: &'a dyn RegisterNamer,
}

impl<'a> MasmUnparser<'a> {
    /// Creates an unparser using the standard register names.
    pub fn new(labels: &'a LabelMap) -> Self {
        Self::with_namer(labels, &StandardNamer)
    }

    /// Creates an unparser with a custom register namer.
    pub fn with_namer(labels: &'a LabelMap, namer: &'a dyn RegisterNamer) -> Self {
        Self { labels, namer }
    }

    /// Returns the label table.
    pub fn labels(&self) -> &'a LabelMap {
        self.labels
    }

    /// Returns the register namer.
    pub fn namer(&self) -> &'a dyn RegisterNamer {
        self.namer
    }

    /// Unparses one operand of `inst`.
    ///
    /// A missing operand yields [`NULL_OPERAND`] instead of an error so that
    /// debug dumps still show the rest of the instruction.
    pub fn unparse_operand(
        &self,
        inst: &Instruction,
        operand: Option<&Expression>,
    ) -> Result<String, UnparseError> {
        match operand {
            Some(expr) => self.unparse(expr, inst.is_lea()),
            None => Ok(NULL_OPERAND.to_string()),
        }
    }

    /// Unparses every operand of `inst` and joins them with `, `.
    pub fn unparse_operands(&self, inst: &Instruction) -> Result<String, UnparseError> {
        let lea = inst.is_lea();
        let operands = inst
            .operands
            .iter()
            .map(|op| self.unparse(op, lea))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(operands.join(", "))
    }

    /// Unparses an expression tree.
    ///
    /// In `lea` mode a top-level memory reference is an address computation
    /// and gets neither a size keyword nor a segment tag. Sub-expressions are
    /// always rendered outside `lea` mode.
    pub fn unparse(&self, expr: &Expression, lea: bool) -> Result<String, UnparseError> {
        let text = match expr {
            Expression::Add(lhs, rhs) => {
                let l = self.unparse(lhs, false)?;
                let r = self.unparse(rhs, false)?;
                if r.starts_with('-') {
                    l + &r
                } else {
                    format!("{}+{}", l, r)
                }
            }
            Expression::Subtract(lhs, rhs) => {
                format!("{}-{}", self.unparse(lhs, false)?, self.unparse(rhs, false)?)
            }
            Expression::Multiply(lhs, rhs) => {
                format!("{}*{}", self.unparse(lhs, false)?, self.unparse(rhs, false)?)
            }
            Expression::MemoryReference(mem) => self.unparse_memory(mem, lea)?,
            Expression::DirectRegister(reg) => self.namer.register_name(reg).into_owned(),
            // Register bank naming is not implemented; only the slot is shown.
            Expression::IndirectRegister { index, .. } => format!("({})", index),
            Expression::IntegerValue(value) => format_integer(value, self.labels),
            Expression::Negate(_)
            | Expression::ShiftLeft(..)
            | Expression::FloatValue { .. }
            | Expression::RegisterList(_) => {
                log::error!("unhandled expression kind {}", expr.kind_name());
                return Err(UnparseError::UnsupportedExpressionKind {
                    kind: expr.kind_name(),
                });
            }
        };
        Ok(text)
    }

    fn unparse_memory(&self, mem: &MemoryReference, lea: bool) -> Result<String, UnparseError> {
        if let Some(indexed) = IndexedAddress::match_address(&mem.address) {
            return Ok(indexed.render(self.namer));
        }

        let mut text = String::new();
        if !lea {
            if SIZE_IS_AMBIGUOUS {
                text.push_str(&ptr_keyword(&mem.ty));
                text.push_str(" ptr ");
            }
            // Other overrides are rare and not surfaced.
            if let Some(Expression::DirectRegister(segment)) = mem.segment.as_deref() {
                if is_shown_segment(segment) {
                    text.push_str(&self.namer.register_name(segment));
                    text.push(':');
                }
            }
        }
        text.push('[');
        text.push_str(&self.unparse(&mem.address, false)?);
        text.push(']');
        Ok(text)
    }
}
