//! Serialized function input.
//!
//! A function file is JSON:
//!
//! ```json
//! {
//!   "name": "sum_table",
//!   "entry": 0,
//!   "blocks": [ { "id": 0, "start": 4198400, "statements": [...] } ],
//!   "edges": [[0, 1]],
//!   "labels": { "0x402000": "sub_402000" }
//! }
//! ```
//!
//! `edges` and `labels` are optional. Without edges the blocks are listed
//! entry first, then in file order.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use unmasm_core::{BasicBlock, BasicBlockId, ControlFlowGraph, Instruction, LabelMap};

/// A function as stored on disk.
#[derive(Debug, Deserialize)]
pub struct FunctionFile {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Entry block ID.
    #[serde(default)]
    pub entry: u32,
    /// Blocks in any order.
    pub blocks: Vec<BasicBlock>,
    /// Control flow edges between block IDs.
    #[serde(default)]
    pub edges: Vec<(u32, u32)>,
    /// Labels shipped with the function.
    #[serde(default)]
    pub labels: LabelMap,
}

impl FunctionFile {
    /// Reads and parses a function file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read function file: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse function file: {}", path.display()))
    }

    /// Builds the control flow graph, validating every block and edge.
    ///
    /// Listings only hold instructions, so undecoded data is rejected here.
    pub fn to_cfg(&self) -> Result<ControlFlowGraph> {
        let entry = BasicBlockId::new(self.entry);
        let mut cfg = ControlFlowGraph::new(entry);
        for block in &self.blocks {
            if cfg.block(block.id).is_some() {
                bail!("duplicate block id {}", block.id);
            }
            for stmt in &block.statements {
                if stmt.as_instruction().is_none() {
                    bail!(
                        "block {} holds undecoded data at {:#x}",
                        block.id,
                        stmt.address()
                    );
                }
            }
            cfg.add_block(block.clone());
        }
        if !self.blocks.is_empty() && cfg.block(entry).is_none() {
            bail!("entry block {} is not defined", entry);
        }
        for &(from, to) in &self.edges {
            cfg.add_edge(BasicBlockId::new(from), BasicBlockId::new(to))
                .with_context(|| format!("bad edge bb{} -> bb{}", from, to))?;
        }
        Ok(cfg)
    }

    /// Finds the instruction at `address`.
    pub fn instruction_at(&self, address: u64) -> Option<&Instruction> {
        self.blocks
            .iter()
            .flat_map(|b| b.statements.iter())
            .filter_map(|s| s.as_instruction())
            .find(|inst| inst.address == address)
    }
}

/// Reads a label file: a JSON object of hex addresses to names.
pub fn load_labels(path: &Path) -> Result<LabelMap> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read label file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse label file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_BLOCKS: &str = r#"{
        "name": "f",
        "blocks": [
            {"id": 1, "start": 4096, "statements": []},
            {"id": 0, "start": 4097, "statements": [
                {"Instruction": {"address": 4097, "arch": "X86", "mnemonic": "ret",
                                 "operands": [], "bytes": [195]}}
            ]}
        ],
        "edges": [[0, 1]],
        "labels": {"0x1000": "tail"}
    }"#;

    #[test]
    fn test_parse_and_build_cfg() {
        let file: FunctionFile = serde_json::from_str(TWO_BLOCKS).unwrap();
        assert_eq!(file.name, "f");
        assert_eq!(file.labels.get(0x1000), Some("tail"));

        let cfg = file.to_cfg().unwrap();
        assert_eq!(cfg.num_blocks(), 2);
        assert_eq!(cfg.successors(BasicBlockId::new(0)), &[BasicBlockId::new(1)]);
        assert_eq!(file.instruction_at(4097).map(|i| i.mnemonic.as_str()), Some("ret"));
        assert!(file.instruction_at(4096).is_none());
    }

    #[test]
    fn test_rejects_bad_edges_and_duplicates() {
        let mut file: FunctionFile = serde_json::from_str(TWO_BLOCKS).unwrap();
        file.edges.push((0, 9));
        assert!(file.to_cfg().is_err());

        let mut file: FunctionFile = serde_json::from_str(TWO_BLOCKS).unwrap();
        let dup = file.blocks[0].clone();
        file.blocks.push(dup);
        assert!(file.to_cfg().is_err());
    }

    #[test]
    fn test_rejects_data_statements() {
        let mut file: FunctionFile = serde_json::from_str(TWO_BLOCKS).unwrap();
        file.blocks[0].push_data(0x1000, vec![0xcc, 0xcc]);
        let err = file.to_cfg().unwrap_err();
        assert_eq!(err.to_string(), "block bb1 holds undecoded data at 0x1000");
    }

    #[test]
    fn test_missing_entry_block() {
        let mut file: FunctionFile = serde_json::from_str(TWO_BLOCKS).unwrap();
        file.entry = 5;
        file.edges.clear();
        assert!(file.to_cfg().is_err());
    }
}
