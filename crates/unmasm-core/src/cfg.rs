//! Control flow graph and flow-order traversal.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::{BasicBlock, BasicBlockId, Error};

/// Anything that can hand out a function's blocks in flow order.
pub trait FlowOrder {
    /// Returns the blocks in the order a listing should present them.
    fn blocks_in_flow_order(&self) -> Vec<&BasicBlock>;
}

/// A control flow graph for a function.
#[derive(Debug, Clone)]
pub struct ControlFlowGraph {
    /// Entry block ID.
    pub entry: BasicBlockId,
    /// All basic blocks, in insertion order.
    blocks: IndexMap<BasicBlockId, BasicBlock>,
    /// Forward edges (block -> successors).
    successors: IndexMap<BasicBlockId, Vec<BasicBlockId>>,
}

impl ControlFlowGraph {
    /// Creates a new empty CFG with the given entry block.
    pub fn new(entry: BasicBlockId) -> Self {
        Self {
            entry,
            blocks: IndexMap::new(),
            successors: IndexMap::new(),
        }
    }

    /// Adds a basic block to the CFG.
    pub fn add_block(&mut self, block: BasicBlock) {
        let id = block.id;
        self.blocks.insert(id, block);
        self.successors.entry(id).or_default();
    }

    /// Adds an edge between two blocks already in the graph.
    pub fn add_edge(&mut self, from: BasicBlockId, to: BasicBlockId) -> Result<(), Error> {
        for id in [from, to] {
            if !self.blocks.contains_key(&id) {
                return Err(Error::InvalidBlockId(id));
            }
        }
        self.successors.entry(from).or_default().push(to);
        Ok(())
    }

    /// Returns a reference to a block by ID.
    pub fn block(&self, id: BasicBlockId) -> Option<&BasicBlock> {
        self.blocks.get(&id)
    }

    /// Returns the number of blocks.
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Returns the successors of a block.
    pub fn successors(&self, id: BasicBlockId) -> &[BasicBlockId] {
        self.successors
            .get(&id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Returns blocks in reverse post-order from the entry.
    ///
    /// Blocks unreachable from the entry follow, each group again in reverse
    /// post-order, seeded in insertion order.
    pub fn reverse_post_order(&self) -> Vec<BasicBlockId> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();

        fn dfs(
            cfg: &ControlFlowGraph,
            block: BasicBlockId,
            visited: &mut HashSet<BasicBlockId>,
            post_order: &mut Vec<BasicBlockId>,
        ) {
            if !visited.insert(block) {
                return;
            }
            for &succ in cfg.successors(block) {
                dfs(cfg, succ, visited, post_order);
            }
            post_order.push(block);
        }

        let roots = std::iter::once(self.entry).chain(self.blocks.keys().copied());
        for root in roots {
            if visited.contains(&root) || !self.blocks.contains_key(&root) {
                continue;
            }
            let mut post_order = Vec::new();
            dfs(self, root, &mut visited, &mut post_order);
            post_order.reverse();
            order.extend(post_order);
        }

        order
    }
}

impl FlowOrder for ControlFlowGraph {
    fn blocks_in_flow_order(&self) -> Vec<&BasicBlock> {
        self.reverse_post_order()
            .into_iter()
            .filter_map(|id| self.block(id))
            .collect()
    }
}

/// A slice of blocks is taken to be in flow order already.
impl FlowOrder for [BasicBlock] {
    fn blocks_in_flow_order(&self) -> Vec<&BasicBlock> {
        self.iter().collect()
    }
}

impl FlowOrder for Vec<BasicBlock> {
    fn blocks_in_flow_order(&self) -> Vec<&BasicBlock> {
        self.as_slice().blocks_in_flow_order()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_block(id: u32, start: u64) -> BasicBlock {
        BasicBlock::new(BasicBlockId::new(id), start)
    }

    fn link(cfg: &mut ControlFlowGraph, edges: &[(u32, u32)]) {
        for &(from, to) in edges {
            let (from, to) = (BasicBlockId::new(from), BasicBlockId::new(to));
            cfg.add_edge(from, to).unwrap();
        }
    }

    fn ids(blocks: &[&BasicBlock]) -> Vec<u32> {
        blocks.iter().map(|b| b.id.0).collect()
    }

    #[test]
    fn test_new_cfg_has_entry() {
        let cfg = ControlFlowGraph::new(BasicBlockId::ENTRY);
        assert_eq!(cfg.entry, BasicBlockId::ENTRY);
        assert_eq!(cfg.num_blocks(), 0);
        assert!(cfg.blocks_in_flow_order().is_empty());
    }

    #[test]
    fn test_add_edge_records_successor() {
        let mut cfg = ControlFlowGraph::new(BasicBlockId::ENTRY);
        cfg.add_block(make_block(0, 0x1000));
        cfg.add_block(make_block(1, 0x1010));

        let bb0 = BasicBlockId::new(0);
        let bb1 = BasicBlockId::new(1);
        cfg.add_edge(bb0, bb1).unwrap();

        assert_eq!(cfg.successors(bb0), &[bb1]);
        assert!(cfg.successors(bb1).is_empty());
    }

    #[test]
    fn test_add_edge_rejects_unknown_block() {
        let mut cfg = ControlFlowGraph::new(BasicBlockId::ENTRY);
        cfg.add_block(make_block(0, 0x1000));
        let missing = BasicBlockId::new(9);
        let err = cfg.add_edge(BasicBlockId::new(0), missing).unwrap_err();
        assert_eq!(err, Error::InvalidBlockId(missing));
    }

    #[test]
    fn test_flow_order_diamond() {
        // bb0 -> bb1, bb0 -> bb2, bb1 -> bb3, bb2 -> bb3; inserted out of order
        let mut cfg = ControlFlowGraph::new(BasicBlockId::ENTRY);
        cfg.add_block(make_block(3, 0x1030));
        cfg.add_block(make_block(1, 0x1010));
        cfg.add_block(make_block(0, 0x1000));
        cfg.add_block(make_block(2, 0x1020));
        link(&mut cfg, &[(0, 1), (0, 2), (1, 3), (2, 3)]);

        let order = cfg.blocks_in_flow_order();
        assert_eq!(ids(&order), vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_flow_order_keeps_unreachable_blocks() {
        let mut cfg = ControlFlowGraph::new(BasicBlockId::ENTRY);
        cfg.add_block(make_block(0, 0x1000));
        cfg.add_block(make_block(1, 0x1010));
        cfg.add_block(make_block(7, 0x1070));
        link(&mut cfg, &[(0, 1)]);

        let order = cfg.blocks_in_flow_order();
        assert_eq!(ids(&order), vec![0, 1, 7]);
    }

    #[test]
    fn test_flow_order_with_loop() {
        let mut cfg = ControlFlowGraph::new(BasicBlockId::ENTRY);
        for i in 0..3 {
            cfg.add_block(make_block(i, 0x1000 + u64::from(i) * 0x10));
        }
        link(&mut cfg, &[(0, 1), (1, 1), (1, 2)]);
        assert_eq!(ids(&cfg.blocks_in_flow_order()), vec![0, 1, 2]);
    }

    #[test]
    fn test_slice_is_already_ordered() {
        let blocks = vec![make_block(5, 0x2000), make_block(2, 0x1000)];
        assert_eq!(ids(&blocks.blocks_in_flow_order()), vec![5, 2]);
    }
}
