//! Operand expression trees.
//!
//! An instruction operand is a tree of arithmetic combinators over registers,
//! literals, and memory references. Trees are built by the decoder and are
//! read-only from here on.

use crate::Register;

/// Declared width of an integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
}

impl Width {
    /// Returns the width in bits.
    pub fn bits(self) -> u32 {
        match self {
            Self::W8 => 8,
            Self::W16 => 16,
            Self::W32 => 32,
            Self::W64 => 64,
        }
    }

    /// Returns the mask covering every bit of this width.
    pub fn mask(self) -> u64 {
        match self {
            Self::W64 => u64::MAX,
            _ => (1u64 << self.bits()) - 1,
        }
    }

    /// Returns the mask of the sign bit.
    pub fn sign_bit(self) -> u64 {
        1u64 << (self.bits() - 1)
    }
}

/// An integer literal: the unsigned bit pattern of its declared width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "RawInteger")
)]
pub struct IntegerValue {
    width: Width,
    bits: u64,
}

impl IntegerValue {
    /// Creates a literal, truncating `bits` to `width`.
    pub fn new(width: Width, bits: u64) -> Self {
        Self {
            width,
            bits: bits & width.mask(),
        }
    }

    /// Creates a literal from a signed value, keeping its two's complement pattern.
    pub fn from_signed(width: Width, value: i64) -> Self {
        Self::new(width, value as u64)
    }

    /// Returns the declared width.
    pub fn width(&self) -> Width {
        self.width
    }

    /// Returns the raw bits, zero extended.
    pub fn unsigned(&self) -> u64 {
        self.bits
    }

    /// Returns the value sign extended from its declared width.
    pub fn signed(&self) -> i64 {
        let shift = 64 - self.width.bits();
        ((self.bits << shift) as i64) >> shift
    }

    /// Returns true if the sign bit of the declared width is set.
    pub fn is_negative(&self) -> bool {
        self.bits & self.width.sign_bit() != 0
    }
}

// Deserialized literals go through `IntegerValue::new` so the bits stay masked.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawInteger {
    width: Width,
    bits: u64,
}

#[cfg(feature = "serde")]
impl From<RawInteger> for IntegerValue {
    fn from(raw: RawInteger) -> Self {
        Self::new(raw.width, raw.bits)
    }
}

/// Declared type of a memory access.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperandType {
    /// Integer access of the given bit width.
    Integer(u16),
    /// IEEE / x87 floating point access of the given bit width.
    Float(u16),
    /// Packed vector of `count` elements.
    Vector {
        count: u16,
        element: Box<OperandType>,
    },
}

/// A memory operand: `segment:[address]` of a declared type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryReference {
    /// The address computation, typically an `Add` tree.
    pub address: Box<Expression>,
    /// Segment override, if the decoder recorded one.
    pub segment: Option<Box<Expression>>,
    /// Type of the accessed value.
    pub ty: OperandType,
}

/// An operand expression node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expression {
    /// `lhs + rhs`
    Add(Box<Expression>, Box<Expression>),
    /// `lhs - rhs`
    Subtract(Box<Expression>, Box<Expression>),
    /// `lhs * rhs`
    Multiply(Box<Expression>, Box<Expression>),
    /// Memory access.
    MemoryReference(MemoryReference),
    /// A register operand.
    DirectRegister(Register),
    /// A register bank slot selected at run time (e.g. the x87 stack).
    IndirectRegister { register: Register, index: u8 },
    /// Integer literal.
    IntegerValue(IntegerValue),
    /// `-expr`, produced by non-x86 front ends.
    Negate(Box<Expression>),
    /// `lhs << rhs`, the ARM shifted-register form.
    ShiftLeft(Box<Expression>, Box<Expression>),
    /// Floating point literal.
    FloatValue { bits: u16, value: f64 },
    /// Register list, as in ARM `push {r4, lr}`.
    RegisterList(Vec<Register>),
}

impl Expression {
    /// Creates `lhs + rhs`.
    pub fn add(lhs: Expression, rhs: Expression) -> Self {
        Self::Add(Box::new(lhs), Box::new(rhs))
    }

    /// Creates `lhs - rhs`.
    pub fn sub(lhs: Expression, rhs: Expression) -> Self {
        Self::Subtract(Box::new(lhs), Box::new(rhs))
    }

    /// Creates `lhs * rhs`.
    pub fn mul(lhs: Expression, rhs: Expression) -> Self {
        Self::Multiply(Box::new(lhs), Box::new(rhs))
    }

    /// Creates a register operand.
    pub fn reg(reg: Register) -> Self {
        Self::DirectRegister(reg)
    }

    /// Creates an integer literal.
    pub fn int(width: Width, bits: u64) -> Self {
        Self::IntegerValue(IntegerValue::new(width, bits))
    }

    /// Creates an integer literal from a signed value.
    pub fn signed(width: Width, value: i64) -> Self {
        Self::IntegerValue(IntegerValue::from_signed(width, value))
    }

    /// Creates a memory reference without a segment override.
    pub fn mem(address: Expression, ty: OperandType) -> Self {
        Self::MemoryReference(MemoryReference {
            address: Box::new(address),
            segment: None,
            ty,
        })
    }

    /// Creates a memory reference with a segment override.
    pub fn mem_seg(segment: Expression, address: Expression, ty: OperandType) -> Self {
        Self::MemoryReference(MemoryReference {
            address: Box::new(address),
            segment: Some(Box::new(segment)),
            ty,
        })
    }

    /// Returns the node kind name, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Add(..) => "Add",
            Self::Subtract(..) => "Subtract",
            Self::Multiply(..) => "Multiply",
            Self::MemoryReference(_) => "MemoryReference",
            Self::DirectRegister(_) => "DirectRegister",
            Self::IndirectRegister { .. } => "IndirectRegister",
            Self::IntegerValue(_) => "IntegerValue",
            Self::Negate(_) => "Negate",
            Self::ShiftLeft(..) => "ShiftLeft",
            Self::FloatValue { .. } => "FloatValue",
            Self::RegisterList(_) => "RegisterList",
        }
    }
}
