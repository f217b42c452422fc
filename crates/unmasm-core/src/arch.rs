//! Architecture identification.

/// CPU architectures an instruction can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Architecture {
    /// x86-64 / AMD64
    X86_64,
    /// 32-bit x86
    X86,
    /// ARM 64-bit (AArch64)
    Arm64,
    /// ARM 32-bit
    Arm,
    /// RISC-V 64-bit
    RiscV64,
    /// RISC-V 32-bit
    RiscV32,
    /// Unknown architecture
    Unknown(u16),
}

impl Architecture {
    /// Returns true for the x86 family, the only one with a MASM unparser.
    pub fn is_x86(&self) -> bool {
        matches!(self, Self::X86 | Self::X86_64)
    }

    /// Returns the name of this architecture.
    pub fn name(&self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::X86 => "x86",
            Self::Arm64 => "arm64",
            Self::Arm => "arm",
            Self::RiscV64 => "riscv64",
            Self::RiscV32 => "riscv32",
            Self::Unknown(_) => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x86_family() {
        assert!(Architecture::X86.is_x86());
        assert!(Architecture::X86_64.is_x86());
        assert!(!Architecture::Arm64.is_x86());
        assert!(!Architecture::Unknown(3).is_x86());
    }

    #[test]
    fn test_names() {
        assert_eq!(Architecture::X86.name(), "x86");
        assert_eq!(Architecture::Arm64.name(), "arm64");
        assert_eq!(Architecture::Unknown(9).name(), "unknown");
    }
}
