//! # Addressing Modes
//!
//! This module defines the 15 addressing modes of the 65C02. Each mode
//! determines how many operand bytes follow the opcode and how the CPU turns
//! them into an effective address.

/// 65C02 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implied (including accumulator operands)
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative,
///   IndirectX, IndirectY, ZeroPageIndirect
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect,
///   AbsoluteIndexedIndirect, ZeroPageRelative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, or the accumulator for shifts and `INC A`/`DEC A`.
    ///
    /// Examples: CLC, RTS, ASL A
    Implied,

    /// 8-bit constant following the opcode.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address plus X, wrapping within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address plus Y, wrapping within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit displacement from the address after the operand.
    ///
    /// Example: BEQ label
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address plus X. +1 cycle on page crossing for reads.
    ///
    /// Example: LDA $1234,X
    AbsoluteX,

    /// 16-bit address plus Y. +1 cycle on page crossing for reads.
    ///
    /// Example: LDA $1234,Y
    AbsoluteY,

    /// Indirect jump through a 16-bit pointer (JMP only).
    ///
    /// Example: JMP ($FFFC)
    Indirect,

    /// Indirect jump through a 16-bit pointer offset by X (JMP only).
    ///
    /// Example: JMP ($1234,X)
    AbsoluteIndexedIndirect,

    /// Indexed indirect: (ZP + X) then dereference, both wrapping in zero page.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y. +1 cycle on page crossing.
    ///
    /// Example: LDA ($40),Y
    IndirectY,

    /// Zero page indirect without index.
    ///
    /// Example: LDA ($40)
    ZeroPageIndirect,

    /// Zero page test address followed by a branch displacement (BBRn/BBSn).
    ///
    /// Example: BBR3 $40,label
    ZeroPageRelative,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        use AddressingMode::*;
        match self {
            Implied => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | Relative | IndirectX | IndirectY
            | ZeroPageIndirect => 1,
            Absolute | AbsoluteX | AbsoluteY | Indirect | AbsoluteIndexedIndirect
            | ZeroPageRelative => 2,
        }
    }

    /// Short tag used in datasheets and trace output.
    pub const fn tag(self) -> &'static str {
        use AddressingMode::*;
        match self {
            Implied => "IMP",
            Immediate => "IMM",
            ZeroPage => "ZP0",
            ZeroPageX => "ZPX",
            ZeroPageY => "ZPY",
            Relative => "REL",
            Absolute => "ABS",
            AbsoluteX => "ABX",
            AbsoluteY => "ABY",
            Indirect => "IND",
            AbsoluteIndexedIndirect => "INDX",
            IndirectX => "IZX",
            IndirectY => "IZY",
            ZeroPageIndirect => "IZP",
            ZeroPageRelative => "ZPREL",
        }
    }
}
