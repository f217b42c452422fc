//! Basic block representation.

use crate::Instruction;

/// Unique identifier for a basic block within a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasicBlockId(pub u32);

impl BasicBlockId {
    /// The entry block ID (always 0).
    pub const ENTRY: Self = Self(0);

    /// Creates a new basic block ID.
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for BasicBlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bb{}", self.0)
    }
}

/// Why the partitioner created a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockReason {
    /// First block of a function.
    EntryPoint,
    /// Target of a direct call.
    CallTarget,
    /// Target of a branch.
    JumpTarget,
    /// Reached by falling through the previous block.
    Fallthrough,
    /// Referenced from a jump table.
    JumpTable,
    /// Alignment or padding bytes.
    Padding,
    /// Discovered by a linear sweep only.
    Leftover,
}

impl BlockReason {
    /// Returns the display name of this reason.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EntryPoint => "entry point",
            Self::CallTarget => "call target",
            Self::JumpTarget => "jump target",
            Self::Fallthrough => "fallthrough",
            Self::JumpTable => "jump table",
            Self::Padding => "padding",
            Self::Leftover => "leftover",
        }
    }
}

/// One entry of a block's statement list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Statement {
    /// A decoded instruction.
    Instruction(Instruction),
    /// Raw bytes that were not decoded.
    Data { address: u64, bytes: Vec<u8> },
}

impl Statement {
    /// Returns the instruction, if this statement is one.
    pub fn as_instruction(&self) -> Option<&Instruction> {
        match self {
            Self::Instruction(inst) => Some(inst),
            Self::Data { .. } => None,
        }
    }

    /// Returns the address of the statement.
    pub fn address(&self) -> u64 {
        match self {
            Self::Instruction(inst) => inst.address,
            Self::Data { address, .. } => *address,
        }
    }
}

/// A basic block - a maximal sequence of straight-line code.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasicBlock {
    /// Unique identifier for this block.
    pub id: BasicBlockId,
    /// Start address (address of first statement).
    pub start: u64,
    /// Statements in address order.
    pub statements: Vec<Statement>,
    /// Reasons the block exists.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reasons: Vec<BlockReason>,
    /// True if the block holds static data rather than code.
    #[cfg_attr(feature = "serde", serde(default))]
    pub static_data: bool,
}

impl BasicBlock {
    /// Creates a new empty basic block.
    pub fn new(id: BasicBlockId, start: u64) -> Self {
        Self {
            id,
            start,
            statements: Vec::new(),
            reasons: Vec::new(),
            static_data: false,
        }
    }

    /// Adds a reason.
    pub fn with_reason(mut self, reason: BlockReason) -> Self {
        if !self.reasons.contains(&reason) {
            self.reasons.push(reason);
        }
        self
    }

    /// Marks the block as static data.
    pub fn with_static_data(mut self, static_data: bool) -> Self {
        self.static_data = static_data;
        self
    }

    /// Adds an instruction to this block.
    pub fn push_instruction(&mut self, inst: Instruction) {
        self.statements.push(Statement::Instruction(inst));
    }

    /// Adds an undecoded data statement.
    pub fn push_data(&mut self, address: u64, bytes: Vec<u8>) {
        self.statements.push(Statement::Data { address, bytes });
    }

    /// Returns true if this block is empty.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Returns the number of statements in this block.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Returns the reasons joined for display, or `none`.
    pub fn reason_string(&self) -> String {
        if self.reasons.is_empty() {
            return "none".to_string();
        }
        self.reasons
            .iter()
            .map(BlockReason::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
