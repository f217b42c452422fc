//! # unmasm-render
//!
//! Turns decoded x86 operand trees into MASM-style text, and instructions and
//! functions into debugging listings.
//!
//! - [`MasmUnparser`] renders operand expressions, recognising the
//!   `[base+index*scale+disp]` shape through [`IndexedAddress`] and formatting
//!   literals with [`format_integer`].
//! - [`InstructionRenderer`] produces one line per instruction.
//! - [`FunctionRenderer`] walks a function's blocks in flow order.
//!
//! Every renderer borrows the [`LabelMap`](unmasm_core::LabelMap) it was given
//! and never mutates its inputs.

pub mod address;
pub mod error;
pub mod function;
pub mod generic;
pub mod instruction;
pub mod masm;
pub mod numeric;
pub mod options;
pub mod ptr_type;

pub use address::IndexedAddress;
pub use error::{RenderError, UnparseError};
pub use function::{FunctionRenderer, STATIC_DATA_MARKER};
pub use generic::{GenericUnparser, PlainUnparser};
pub use instruction::{opcode_bytes, InstructionRenderer, NULL_INSTRUCTION};
pub use masm::{MasmUnparser, NULL_OPERAND};
pub use numeric::{format_hex, format_integer};
pub use options::ListingOptions;
pub use ptr_type::{ptr_keyword, BAD_TYPE};
