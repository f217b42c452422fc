#![no_main]

use libfuzzer_sys::fuzz_target;
use unmasm_core::{
    Architecture, Expression, Instruction, LabelMap, OperandType, Register, RegisterClass, Width,
};
use unmasm_render::{IndexedAddress, InstructionRenderer, MasmUnparser, UnparseError};

/// Builds an expression tree from a byte stream, consuming bytes as it goes.
struct TreeBuilder<'a> {
    data: &'a [u8],
    depth: usize,
}

impl<'a> TreeBuilder<'a> {
    fn byte(&mut self) -> u8 {
        match self.data.split_first() {
            Some((&b, rest)) => {
                self.data = rest;
                b
            }
            None => 0,
        }
    }

    fn u64(&mut self) -> u64 {
        (0..8).fold(0u64, |acc, _| (acc << 8) | u64::from(self.byte()))
    }

    fn register(&mut self) -> Register {
        let id = u16::from(self.byte() % 40);
        Register::new(Architecture::X86, RegisterClass::General, id, 32)
    }

    fn width(&mut self) -> Width {
        [Width::W8, Width::W16, Width::W32, Width::W64][usize::from(self.byte() % 4)]
    }

    fn expression(&mut self) -> Expression {
        // Limit nesting to keep recursion shallow
        if self.depth > 8 || self.data.is_empty() {
            return Expression::reg(self.register());
        }
        self.depth += 1;
        let expr = match self.byte() % 9 {
            0 => Expression::add(self.expression(), self.expression()),
            1 => Expression::sub(self.expression(), self.expression()),
            2 => Expression::mul(self.expression(), self.expression()),
            3 => {
                let address = self.expression();
                Expression::mem(address, OperandType::Integer(32))
            }
            4 => Expression::IndirectRegister {
                register: self.register(),
                index: self.byte() % 8,
            },
            5 => {
                let width = self.width();
                Expression::int(width, self.u64())
            }
            6 => Expression::Negate(Box::new(self.expression())),
            _ => Expression::reg(self.register()),
        };
        self.depth -= 1;
        expr
    }
}

fuzz_target!(|data: &[u8]| {
    let mut builder = TreeBuilder { data, depth: 0 };
    let expr = builder.expression();
    let labels: LabelMap = [(0x401000u64, "entry")].into_iter().collect();

    // Unparsing either succeeds or reports an unsupported kind; it never panics.
    let unparser = MasmUnparser::new(&labels);
    match unparser.unparse(&expr, false) {
        Ok(_) | Err(UnparseError::UnsupportedExpressionKind { .. }) => {}
    }

    if let Expression::MemoryReference(mem) = &expr {
        let _ = IndexedAddress::match_address(&mem.address);
    }

    let inst = Instruction::new(0x401000, Architecture::X86, data.to_vec(), "mov")
        .with_operand(expr);
    let _ = InstructionRenderer::new(&labels, 8).render(&inst);
});
