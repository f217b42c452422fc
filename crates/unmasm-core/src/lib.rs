//! # unmasm-core
//!
//! Data model for the unmasm listing printer: operand expression trees,
//! registers, instructions, basic blocks, the control flow graph that orders
//! them, and the label table used for symbolic display.

pub mod arch;
pub mod basic_block;
pub mod cfg;
pub mod error;
pub mod expression;
pub mod instruction;
pub mod label;
pub mod register;

pub use arch::Architecture;
pub use basic_block::{BasicBlock, BasicBlockId, BlockReason, Statement};
pub use cfg::{ControlFlowGraph, FlowOrder};
pub use error::Error;
pub use expression::{Expression, IntegerValue, MemoryReference, OperandType, Width};
pub use instruction::Instruction;
pub use label::{parse_address, LabelMap};
pub use register::{Register, RegisterClass, RegisterNamer, StandardNamer};
