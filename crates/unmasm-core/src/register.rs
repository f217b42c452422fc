//! Register descriptors and their textual names.

use std::borrow::Cow;

use crate::Architecture;

/// Register class (general purpose, floating point, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegisterClass {
    /// General purpose register (eax, x0, a0, etc.)
    General,
    /// x87 stack slot (st(0)..st(7))
    FloatingPoint,
    /// Vector/SIMD register (xmm0, ymm0, v0, etc.)
    Vector,
    /// Segment register (cs, ds, etc.) - x86 specific
    Segment,
    /// Program counter / instruction pointer
    ProgramCounter,
    /// Flags / status register
    Flags,
}

/// A register descriptor as produced by the instruction decoder.
///
/// The `id` is architecture-specific; for x86 the constants live in [`x86`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Register {
    /// The architecture this register belongs to.
    pub arch: Architecture,
    /// The class of register.
    pub class: RegisterClass,
    /// Architecture-specific register ID.
    pub id: u16,
    /// Size of the register in bits.
    pub size: u16,
}

impl Register {
    /// Creates a new register.
    pub fn new(arch: Architecture, class: RegisterClass, id: u16, size: u16) -> Self {
        Self {
            arch,
            class,
            id,
            size,
        }
    }

    /// Creates a 32-bit x86 general purpose register.
    pub fn x86_gpr32(id: u16) -> Self {
        Self::new(Architecture::X86, RegisterClass::General, id, 32)
    }

    /// Creates an x86 segment register.
    pub fn x86_segment(id: u16) -> Self {
        Self::new(Architecture::X86, RegisterClass::Segment, id, 16)
    }

    /// Returns the canonical name for this register.
    pub fn name(&self) -> Cow<'static, str> {
        match self.arch {
            Architecture::X86_64 | Architecture::X86 => x86_reg_name(self.id, self.size),
            Architecture::Arm64 => arm64_reg_name(self.id, self.size),
            Architecture::RiscV64 | Architecture::RiscV32 => riscv_reg_name(self.id),
            _ => Cow::Borrowed("unknown"),
        }
    }
}

/// Maps a register descriptor to its mnemonic text.
///
/// The unparser never interprets register descriptors itself; everything goes
/// through a namer so callers can substitute their own tables.
pub trait RegisterNamer {
    /// Returns the display name of `reg`.
    fn register_name(&self, reg: &Register) -> Cow<'static, str>;
}

/// Table-driven namer backed by [`Register::name`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardNamer;

impl RegisterNamer for StandardNamer {
    fn register_name(&self, reg: &Register) -> Cow<'static, str> {
        reg.name()
    }
}

// x86/x86_64 register IDs
pub mod x86 {
    // General purpose registers, sized by `Register::size`
    pub const RAX: u16 = 0;
    pub const RCX: u16 = 1;
    pub const RDX: u16 = 2;
    pub const RBX: u16 = 3;
    pub const RSP: u16 = 4;
    pub const RBP: u16 = 5;
    pub const RSI: u16 = 6;
    pub const RDI: u16 = 7;
    pub const R8: u16 = 8;
    pub const R9: u16 = 9;
    pub const R10: u16 = 10;
    pub const R11: u16 = 11;
    pub const R12: u16 = 12;
    pub const R13: u16 = 13;
    pub const R14: u16 = 14;
    pub const R15: u16 = 15;

    pub const RIP: u16 = 16;
    pub const RFLAGS: u16 = 17;

    // Legacy high-byte registers
    pub const AH: u16 = 20;
    pub const CH: u16 = 21;
    pub const DH: u16 = 22;
    pub const BH: u16 = 23;

    // Segment registers
    pub const CS: u16 = 32;
    pub const DS: u16 = 33;
    pub const ES: u16 = 34;
    pub const FS: u16 = 35;
    pub const GS: u16 = 36;
    pub const SS: u16 = 37;

    // x87 stack, st(0)..st(7)
    pub const ST0: u16 = 48;

    // XMM0..XMM15 (128-bit) share IDs with YMM0..YMM15 (256-bit)
    pub const XMM0: u16 = 64;
}

const X86_GPR64: [&str; 16] = [
    "rax", "rcx", "rdx", "rbx", "rsp", "rbp", "rsi", "rdi", "r8", "r9", "r10", "r11", "r12",
    "r13", "r14", "r15",
];
const X86_GPR32: [&str; 8] = ["eax", "ecx", "edx", "ebx", "esp", "ebp", "esi", "edi"];
const X86_GPR16: [&str; 8] = ["ax", "cx", "dx", "bx", "sp", "bp", "si", "di"];
const X86_GPR8: [&str; 8] = ["al", "cl", "dl", "bl", "spl", "bpl", "sil", "dil"];
const X86_SEGMENT: [&str; 6] = ["cs", "ds", "es", "fs", "gs", "ss"];

fn x86_reg_name(id: u16, size: u16) -> Cow<'static, str> {
    let idx = id as usize;
    let name: &'static str = match (id, size) {
        (x86::RAX..=x86::R15, 64) => X86_GPR64[idx],
        (x86::RAX..=x86::RDI, 32) => X86_GPR32[idx],
        (x86::R8..=x86::R15, 32) => return Cow::Owned(format!("r{}d", id)),
        (x86::RAX..=x86::RDI, 16) => X86_GPR16[idx],
        (x86::R8..=x86::R15, 16) => return Cow::Owned(format!("r{}w", id)),
        (x86::RAX..=x86::RDI, 8) => X86_GPR8[idx],
        (x86::R8..=x86::R15, 8) => return Cow::Owned(format!("r{}b", id)),
        (x86::RIP, 64) => "rip",
        (x86::RIP, 32) => "eip",
        (x86::RIP, 16) => "ip",
        (x86::RFLAGS, 64) => "rflags",
        (x86::RFLAGS, 32) => "eflags",
        (x86::RFLAGS, 16) => "flags",
        (x86::AH, _) => "ah",
        (x86::CH, _) => "ch",
        (x86::DH, _) => "dh",
        (x86::BH, _) => "bh",
        (x86::CS..=x86::SS, _) => X86_SEGMENT[(id - x86::CS) as usize],
        (48..=55, _) => return Cow::Owned(format!("st({})", id - x86::ST0)),
        (64..=79, 128) => return Cow::Owned(format!("xmm{}", id - x86::XMM0)),
        (64..=79, 256) => return Cow::Owned(format!("ymm{}", id - x86::XMM0)),
        _ => "unknown",
    };
    Cow::Borrowed(name)
}

// ARM64 register IDs
pub mod arm64 {
    pub const SP: u16 = 31;
    pub const XZR: u16 = 32;
    pub const PC: u16 = 33;
    pub const V0: u16 = 64;
}

fn arm64_reg_name(id: u16, size: u16) -> Cow<'static, str> {
    let name: &'static str = match (id, size) {
        (0..=30, 64) => return Cow::Owned(format!("x{}", id)),
        (0..=30, 32) => return Cow::Owned(format!("w{}", id)),
        (arm64::SP, 64) => "sp",
        (arm64::SP, 32) => "wsp",
        (arm64::XZR, 64) => "xzr",
        (arm64::XZR, 32) => "wzr",
        (arm64::PC, _) => "pc",
        (64..=95, _) => {
            let prefix = match size {
                128 => "v",
                64 => "d",
                32 => "s",
                16 => "h",
                8 => "b",
                _ => return Cow::Borrowed("unknown"),
            };
            return Cow::Owned(format!("{}{}", prefix, id - arm64::V0));
        }
        _ => "unknown",
    };
    Cow::Borrowed(name)
}

const RISCV_ABI: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

fn riscv_reg_name(id: u16) -> Cow<'static, str> {
    match id {
        0..=31 => Cow::Borrowed(RISCV_ABI[id as usize]),
        32 => Cow::Borrowed("pc"),
        _ => Cow::Borrowed("unknown"),
    }
}
