//! Whole-function listings.

use unmasm_core::{BasicBlock, FlowOrder, LabelMap};

use crate::error::RenderError;
use crate::instruction::InstructionRenderer;
use crate::options::ListingOptions;

/// Line emitted before a block that holds static data.
pub const STATIC_DATA_MARKER: &str = "; hey, this block is static data!";

/// Renders a function block by block, in flow order.
#[derive(Clone, Copy)]
pub struct FunctionRenderer<'a> {
    instructions: InstructionRenderer<'a>,
    options: ListingOptions,
}

impl<'a> FunctionRenderer<'a> {
    /// Creates a renderer with standard collaborators.
    pub fn new(labels: &'a LabelMap, options: ListingOptions) -> Self {
        Self {
            instructions: InstructionRenderer::new(labels, options.max_bytes),
            options,
        }
    }

    /// Renders every block of `function`.
    ///
    /// The first operand that cannot be unparsed aborts the listing.
    ///
    /// # Panics
    ///
    /// Panics if a block contains a statement that is not an instruction;
    /// the flow-order provider must only hand out code blocks.
    pub fn render<F: FlowOrder + ?Sized>(&self, function: &F) -> Result<String, RenderError> {
        let mut out = String::new();
        for block in function.blocks_in_flow_order() {
            self.render_block(block, &mut out)?;
        }
        Ok(out)
    }

    /// Appends the lines of one block to `out`.
    pub fn render_block(&self, block: &BasicBlock, out: &mut String) -> Result<(), RenderError> {
        if self.options.show_reasons {
            out.push_str("; block reason: ");
            out.push_str(&block.reason_string());
            out.push('\n');
        }
        if block.static_data {
            out.push_str(STATIC_DATA_MARKER);
            out.push('\n');
        }
        for stmt in &block.statements {
            let Some(inst) = stmt.as_instruction() else {
                panic!(
                    "block {} has a non-instruction statement at {:#x}",
                    block.id,
                    stmt.address()
                );
            };
            out.push_str(&self.instructions.render(inst)?);
            out.push('\n');
        }
        if self.options.block_lines {
            out.push('\n');
        }
        Ok(())
    }
}
