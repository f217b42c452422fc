//! MASM pointer-size keywords for memory operand types.

use std::borrow::Cow;

use unmasm_core::OperandType;

/// Marker returned for types with no MASM keyword.
pub const BAD_TYPE: &str = "BAD_TYPE";

/// Returns the `<keyword> ptr` keyword for a memory operand type.
///
/// Types without a keyword yield [`BAD_TYPE`] and an error log record; the
/// listing keeps going.
pub fn ptr_keyword(ty: &OperandType) -> Cow<'static, str> {
    let keyword = match ty {
        OperandType::Integer(8) => "byte",
        OperandType::Integer(16) => "word",
        OperandType::Integer(32) => "dword",
        OperandType::Integer(64) => "qword",
        OperandType::Float(32) => "float",
        OperandType::Float(64) => "double",
        OperandType::Float(80) => "ldouble",
        OperandType::Vector { count: 2, element } if **element == OperandType::Integer(64) => {
            "dqword"
        }
        OperandType::Vector { count, element } => {
            return Cow::Owned(format!("V{}{}", count, ptr_keyword(element)));
        }
        _ => {
            log::error!("no pointer keyword for operand type {:?}", ty);
            BAD_TYPE
        }
    };
    Cow::Borrowed(keyword)
}
