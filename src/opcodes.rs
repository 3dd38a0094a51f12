//! # Opcode Metadata Table
//!
//! This module contains the complete 256-entry opcode metadata table that serves as the
//! single source of truth for all 65C02 instruction information.
//!
//! The table covers:
//! - **212 documented instructions** - WDC 65C02 opcodes, including the Rockwell
//!   bit instructions (`RMBn`, `SMBn`, `BBRn`, `BBSn`) and `WAI`/`STP`
//! - **44 reserved opcodes** - NOPs of 1-3 bytes and 1-8 cycles, never a decode error
//!
//! Each opcode entry includes:
//! - Mnemonic (instruction name)
//! - Operation (what the execute step does)
//! - Addressing mode
//! - Base cycle cost (excluding page-crossing, branch and decimal penalties)
//! - Instruction size in bytes
//! - Halt flag (`WAI`/`STP`)

use crate::addressing::AddressingMode;

/// The operation performed by an opcode, independent of its addressing mode.
///
/// Bit instructions carry the bit number they test or modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Adc,
    And,
    Asl,
    /// Branch if bit n of a zero page byte is reset.
    Bbr(u8),
    /// Branch if bit n of a zero page byte is set.
    Bbs(u8),
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Bra,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Phx,
    Phy,
    Pla,
    Plp,
    Plx,
    Ply,
    /// Reset bit n of a zero page byte.
    Rmb(u8),
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    /// Set bit n of a zero page byte.
    Smb(u8),
    Sta,
    Stp,
    Stx,
    Sty,
    Stz,
    Tax,
    Tay,
    Trb,
    Tsb,
    Tsx,
    Txa,
    Txs,
    Tya,
    Wai,
}

/// Metadata for a single 65C02 opcode.
///
/// This struct contains all static information about an instruction needed for
/// decoding, execution planning and disassembly.
///
/// # Fields
///
/// - `mnemonic`: Instruction name (e.g., "LDA", "RMB3"); reserved opcodes are "NOP"
/// - `operation`: The operation the execute step dispatches on
/// - `addressing_mode`: How the instruction interprets operand bytes
/// - `base_cycles`: Minimum cycle cost (penalties added dynamically)
/// - `size_bytes`: Total instruction size including opcode and operands (1-3 bytes)
/// - `halts`: True for `WAI` and `STP`, which stop fetching until an interrupt or reset
/// - `documented`: False for the reserved NOP encodings
///
/// # Examples
///
/// ```
/// use lib65c02::{decode, AddressingMode};
///
/// // Look up LDA immediate (opcode 0xA9)
/// let lda_imm = decode(0xA9);
/// assert_eq!(lda_imm.mnemonic, "LDA");
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes, 2);
/// assert!(!lda_imm.halts);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic.
    pub mnemonic: &'static str,

    /// Operation performed by the execute step.
    pub operation: Operation,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Base cycle cost (before page crossing, branch and decimal penalties).
    pub base_cycles: u8,

    /// Total instruction size in bytes (opcode + operands).
    pub size_bytes: u8,

    /// Whether the instruction halts fetching (`WAI`, `STP`).
    pub halts: bool,

    /// Whether this is a documented instruction rather than a reserved NOP.
    pub documented: bool,
}

impl OpcodeMetadata {
    /// Whether an indexed page crossing costs this instruction an extra cycle.
    ///
    /// Only reads pay it, plus the read-modify-write shifts in `abs,X` form.
    /// Stores, `INC`/`DEC` and `TRB`/`TSB` have the worst case in their base cost.
    pub const fn page_penalty(&self) -> bool {
        use Operation::*;
        match self.operation {
            Adc | And | Bit | Cmp | Cpx | Cpy | Eor | Lda | Ldx | Ldy | Ora | Sbc => true,
            Asl | Lsr | Rol | Ror => matches!(self.addressing_mode, AddressingMode::AbsoluteX),
            _ => false,
        }
    }

    /// Whether this is a branch whose timing depends on being taken.
    pub const fn is_branch(&self) -> bool {
        use Operation::*;
        matches!(
            self.operation,
            Bcc | Bcs | Beq | Bmi | Bne | Bpl | Bra | Bvc | Bvs | Bbr(_) | Bbs(_)
        )
    }
}

const fn op(
    mnemonic: &'static str,
    operation: Operation,
    addressing_mode: AddressingMode,
    base_cycles: u8,
) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic,
        operation,
        addressing_mode,
        base_cycles,
        size_bytes: 1 + addressing_mode.operand_bytes(),
        halts: matches!(operation, Operation::Wai | Operation::Stp),
        documented: true,
    }
}

const fn nop(addressing_mode: AddressingMode, base_cycles: u8) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic: "NOP",
        operation: Operation::Nop,
        addressing_mode,
        base_cycles,
        size_bytes: 1 + addressing_mode.operand_bytes(),
        halts: false,
        documented: false,
    }
}

use AddressingMode as M;
use Operation as O;

/// Complete 256-entry opcode metadata table indexed by opcode byte value.
///
/// # Organization
///
/// - Columns x7 and xF hold the Rockwell bit instructions: `RMB0`-`RMB7` (07-77),
///   `SMB0`-`SMB7` (87-F7), `BBR0`-`BBR7` (0F-7F) and `BBS0`-`BBS7` (8F-FF).
/// - Column x3 and column xB (except `WAI` at CB and `STP` at DB) are 1-byte,
///   1-cycle reserved NOPs.
/// - x2 opcodes without an `(zp)` instruction are 2-byte, 2-cycle NOPs; 44 and
///   54/D4/F4 are zero page NOPs; 5C is the 8-cycle absolute NOP; DC/FC are
///   4-cycle absolute NOPs.
///
/// # Examples
///
/// ```
/// use lib65c02::OPCODE_TABLE;
///
/// let brk = &OPCODE_TABLE[0x00];
/// assert_eq!(brk.mnemonic, "BRK");
/// assert_eq!(brk.base_cycles, 7);
///
/// let reserved = &OPCODE_TABLE[0x5C];
/// assert!(!reserved.documented);
/// assert_eq!(reserved.size_bytes, 3);
/// assert_eq!(reserved.base_cycles, 8);
/// ```
pub static OPCODE_TABLE: [OpcodeMetadata; 256] = [
    // 0x00
    op("BRK", O::Brk, M::Implied, 7),
    op("ORA", O::Ora, M::IndirectX, 6),
    nop(M::Immediate, 2),
    nop(M::Implied, 1),
    op("TSB", O::Tsb, M::ZeroPage, 5),
    op("ORA", O::Ora, M::ZeroPage, 3),
    op("ASL", O::Asl, M::ZeroPage, 5),
    op("RMB0", O::Rmb(0), M::ZeroPage, 5),
    op("PHP", O::Php, M::Implied, 3),
    op("ORA", O::Ora, M::Immediate, 2),
    op("ASL", O::Asl, M::Implied, 2),
    nop(M::Implied, 1),
    op("TSB", O::Tsb, M::Absolute, 6),
    op("ORA", O::Ora, M::Absolute, 4),
    op("ASL", O::Asl, M::Absolute, 6),
    op("BBR0", O::Bbr(0), M::ZeroPageRelative, 5),
    // 0x10
    op("BPL", O::Bpl, M::Relative, 2),
    op("ORA", O::Ora, M::IndirectY, 5),
    op("ORA", O::Ora, M::ZeroPageIndirect, 5),
    nop(M::Implied, 1),
    op("TRB", O::Trb, M::ZeroPage, 5),
    op("ORA", O::Ora, M::ZeroPageX, 4),
    op("ASL", O::Asl, M::ZeroPageX, 6),
    op("RMB1", O::Rmb(1), M::ZeroPage, 5),
    op("CLC", O::Clc, M::Implied, 2),
    op("ORA", O::Ora, M::AbsoluteY, 4),
    op("INC", O::Inc, M::Implied, 2),
    nop(M::Implied, 1),
    op("TRB", O::Trb, M::Absolute, 6),
    op("ORA", O::Ora, M::AbsoluteX, 4),
    op("ASL", O::Asl, M::AbsoluteX, 6),
    op("BBR1", O::Bbr(1), M::ZeroPageRelative, 5),
    // 0x20
    op("JSR", O::Jsr, M::Absolute, 6),
    op("AND", O::And, M::IndirectX, 6),
    nop(M::Immediate, 2),
    nop(M::Implied, 1),
    op("BIT", O::Bit, M::ZeroPage, 3),
    op("AND", O::And, M::ZeroPage, 3),
    op("ROL", O::Rol, M::ZeroPage, 5),
    op("RMB2", O::Rmb(2), M::ZeroPage, 5),
    op("PLP", O::Plp, M::Implied, 4),
    op("AND", O::And, M::Immediate, 2),
    op("ROL", O::Rol, M::Implied, 2),
    nop(M::Implied, 1),
    op("BIT", O::Bit, M::Absolute, 4),
    op("AND", O::And, M::Absolute, 4),
    op("ROL", O::Rol, M::Absolute, 6),
    op("BBR2", O::Bbr(2), M::ZeroPageRelative, 5),
    // 0x30
    op("BMI", O::Bmi, M::Relative, 2),
    op("AND", O::And, M::IndirectY, 5),
    op("AND", O::And, M::ZeroPageIndirect, 5),
    nop(M::Implied, 1),
    op("BIT", O::Bit, M::ZeroPageX, 4),
    op("AND", O::And, M::ZeroPageX, 4),
    op("ROL", O::Rol, M::ZeroPageX, 6),
    op("RMB3", O::Rmb(3), M::ZeroPage, 5),
    op("SEC", O::Sec, M::Implied, 2),
    op("AND", O::And, M::AbsoluteY, 4),
    op("DEC", O::Dec, M::Implied, 2),
    nop(M::Implied, 1),
    op("BIT", O::Bit, M::AbsoluteX, 4),
    op("AND", O::And, M::AbsoluteX, 4),
    op("ROL", O::Rol, M::AbsoluteX, 6),
    op("BBR3", O::Bbr(3), M::ZeroPageRelative, 5),
    // 0x40
    op("RTI", O::Rti, M::Implied, 6),
    op("EOR", O::Eor, M::IndirectX, 6),
    nop(M::Immediate, 2),
    nop(M::Implied, 1),
    nop(M::ZeroPage, 3),
    op("EOR", O::Eor, M::ZeroPage, 3),
    op("LSR", O::Lsr, M::ZeroPage, 5),
    op("RMB4", O::Rmb(4), M::ZeroPage, 5),
    op("PHA", O::Pha, M::Implied, 3),
    op("EOR", O::Eor, M::Immediate, 2),
    op("LSR", O::Lsr, M::Implied, 2),
    nop(M::Implied, 1),
    op("JMP", O::Jmp, M::Absolute, 3),
    op("EOR", O::Eor, M::Absolute, 4),
    op("LSR", O::Lsr, M::Absolute, 6),
    op("BBR4", O::Bbr(4), M::ZeroPageRelative, 5),
    // 0x50
    op("BVC", O::Bvc, M::Relative, 2),
    op("EOR", O::Eor, M::IndirectY, 5),
    op("EOR", O::Eor, M::ZeroPageIndirect, 5),
    nop(M::Implied, 1),
    nop(M::ZeroPageX, 4),
    op("EOR", O::Eor, M::ZeroPageX, 4),
    op("LSR", O::Lsr, M::ZeroPageX, 6),
    op("RMB5", O::Rmb(5), M::ZeroPage, 5),
    op("CLI", O::Cli, M::Implied, 2),
    op("EOR", O::Eor, M::AbsoluteY, 4),
    op("PHY", O::Phy, M::Implied, 3),
    nop(M::Implied, 1),
    nop(M::Absolute, 8),
    op("EOR", O::Eor, M::AbsoluteX, 4),
    op("LSR", O::Lsr, M::AbsoluteX, 6),
    op("BBR5", O::Bbr(5), M::ZeroPageRelative, 5),
    // 0x60
    op("RTS", O::Rts, M::Implied, 6),
    op("ADC", O::Adc, M::IndirectX, 6),
    nop(M::Immediate, 2),
    nop(M::Implied, 1),
    op("STZ", O::Stz, M::ZeroPage, 3),
    op("ADC", O::Adc, M::ZeroPage, 3),
    op("ROR", O::Ror, M::ZeroPage, 5),
    op("RMB6", O::Rmb(6), M::ZeroPage, 5),
    op("PLA", O::Pla, M::Implied, 4),
    op("ADC", O::Adc, M::Immediate, 2),
    op("ROR", O::Ror, M::Implied, 2),
    nop(M::Implied, 1),
    op("JMP", O::Jmp, M::Indirect, 6),
    op("ADC", O::Adc, M::Absolute, 4),
    op("ROR", O::Ror, M::Absolute, 6),
    op("BBR6", O::Bbr(6), M::ZeroPageRelative, 5),
    // 0x70
    op("BVS", O::Bvs, M::Relative, 2),
    op("ADC", O::Adc, M::IndirectY, 5),
    op("ADC", O::Adc, M::ZeroPageIndirect, 5),
    nop(M::Implied, 1),
    op("STZ", O::Stz, M::ZeroPageX, 4),
    op("ADC", O::Adc, M::ZeroPageX, 4),
    op("ROR", O::Ror, M::ZeroPageX, 6),
    op("RMB7", O::Rmb(7), M::ZeroPage, 5),
    op("SEI", O::Sei, M::Implied, 2),
    op("ADC", O::Adc, M::AbsoluteY, 4),
    op("PLY", O::Ply, M::Implied, 4),
    nop(M::Implied, 1),
    op("JMP", O::Jmp, M::AbsoluteIndexedIndirect, 6),
    op("ADC", O::Adc, M::AbsoluteX, 4),
    op("ROR", O::Ror, M::AbsoluteX, 6),
    op("BBR7", O::Bbr(7), M::ZeroPageRelative, 5),
    // 0x80
    op("BRA", O::Bra, M::Relative, 2),
    op("STA", O::Sta, M::IndirectX, 6),
    nop(M::Immediate, 2),
    nop(M::Implied, 1),
    op("STY", O::Sty, M::ZeroPage, 3),
    op("STA", O::Sta, M::ZeroPage, 3),
    op("STX", O::Stx, M::ZeroPage, 3),
    op("SMB0", O::Smb(0), M::ZeroPage, 5),
    op("DEY", O::Dey, M::Implied, 2),
    op("BIT", O::Bit, M::Immediate, 2),
    op("TXA", O::Txa, M::Implied, 2),
    nop(M::Implied, 1),
    op("STY", O::Sty, M::Absolute, 4),
    op("STA", O::Sta, M::Absolute, 4),
    op("STX", O::Stx, M::Absolute, 4),
    op("BBS0", O::Bbs(0), M::ZeroPageRelative, 5),
    // 0x90
    op("BCC", O::Bcc, M::Relative, 2),
    op("STA", O::Sta, M::IndirectY, 6),
    op("STA", O::Sta, M::ZeroPageIndirect, 5),
    nop(M::Implied, 1),
    op("STY", O::Sty, M::ZeroPageX, 4),
    op("STA", O::Sta, M::ZeroPageX, 4),
    op("STX", O::Stx, M::ZeroPageY, 4),
    op("SMB1", O::Smb(1), M::ZeroPage, 5),
    op("TYA", O::Tya, M::Implied, 2),
    op("STA", O::Sta, M::AbsoluteY, 5),
    op("TXS", O::Txs, M::Implied, 2),
    nop(M::Implied, 1),
    op("STZ", O::Stz, M::Absolute, 4),
    op("STA", O::Sta, M::AbsoluteX, 5),
    op("STZ", O::Stz, M::AbsoluteX, 5),
    op("BBS1", O::Bbs(1), M::ZeroPageRelative, 5),
    // 0xA0
    op("LDY", O::Ldy, M::Immediate, 2),
    op("LDA", O::Lda, M::IndirectX, 6),
    op("LDX", O::Ldx, M::Immediate, 2),
    nop(M::Implied, 1),
    op("LDY", O::Ldy, M::ZeroPage, 3),
    op("LDA", O::Lda, M::ZeroPage, 3),
    op("LDX", O::Ldx, M::ZeroPage, 3),
    op("SMB2", O::Smb(2), M::ZeroPage, 5),
    op("TAY", O::Tay, M::Implied, 2),
    op("LDA", O::Lda, M::Immediate, 2),
    op("TAX", O::Tax, M::Implied, 2),
    nop(M::Implied, 1),
    op("LDY", O::Ldy, M::Absolute, 4),
    op("LDA", O::Lda, M::Absolute, 4),
    op("LDX", O::Ldx, M::Absolute, 4),
    op("BBS2", O::Bbs(2), M::ZeroPageRelative, 5),
    // 0xB0
    op("BCS", O::Bcs, M::Relative, 2),
    op("LDA", O::Lda, M::IndirectY, 5),
    op("LDA", O::Lda, M::ZeroPageIndirect, 5),
    nop(M::Implied, 1),
    op("LDY", O::Ldy, M::ZeroPageX, 4),
    op("LDA", O::Lda, M::ZeroPageX, 4),
    op("LDX", O::Ldx, M::ZeroPageY, 4),
    op("SMB3", O::Smb(3), M::ZeroPage, 5),
    op("CLV", O::Clv, M::Implied, 2),
    op("LDA", O::Lda, M::AbsoluteY, 4),
    op("TSX", O::Tsx, M::Implied, 2),
    nop(M::Implied, 1),
    op("LDY", O::Ldy, M::AbsoluteX, 4),
    op("LDA", O::Lda, M::AbsoluteX, 4),
    op("LDX", O::Ldx, M::AbsoluteY, 4),
    op("BBS3", O::Bbs(3), M::ZeroPageRelative, 5),
    // 0xC0
    op("CPY", O::Cpy, M::Immediate, 2),
    op("CMP", O::Cmp, M::IndirectX, 6),
    nop(M::Immediate, 2),
    nop(M::Implied, 1),
    op("CPY", O::Cpy, M::ZeroPage, 3),
    op("CMP", O::Cmp, M::ZeroPage, 3),
    op("DEC", O::Dec, M::ZeroPage, 5),
    op("SMB4", O::Smb(4), M::ZeroPage, 5),
    op("INY", O::Iny, M::Implied, 2),
    op("CMP", O::Cmp, M::Immediate, 2),
    op("DEX", O::Dex, M::Implied, 2),
    op("WAI", O::Wai, M::Implied, 3),
    op("CPY", O::Cpy, M::Absolute, 4),
    op("CMP", O::Cmp, M::Absolute, 4),
    op("DEC", O::Dec, M::Absolute, 6),
    op("BBS4", O::Bbs(4), M::ZeroPageRelative, 5),
    // 0xD0
    op("BNE", O::Bne, M::Relative, 2),
    op("CMP", O::Cmp, M::IndirectY, 5),
    op("CMP", O::Cmp, M::ZeroPageIndirect, 5),
    nop(M::Implied, 1),
    nop(M::ZeroPageX, 4),
    op("CMP", O::Cmp, M::ZeroPageX, 4),
    op("DEC", O::Dec, M::ZeroPageX, 6),
    op("SMB5", O::Smb(5), M::ZeroPage, 5),
    op("CLD", O::Cld, M::Implied, 2),
    op("CMP", O::Cmp, M::AbsoluteY, 4),
    op("PHX", O::Phx, M::Implied, 3),
    op("STP", O::Stp, M::Implied, 3),
    nop(M::Absolute, 4),
    op("CMP", O::Cmp, M::AbsoluteX, 4),
    op("DEC", O::Dec, M::AbsoluteX, 7),
    op("BBS5", O::Bbs(5), M::ZeroPageRelative, 5),
    // 0xE0
    op("CPX", O::Cpx, M::Immediate, 2),
    op("SBC", O::Sbc, M::IndirectX, 6),
    nop(M::Immediate, 2),
    nop(M::Implied, 1),
    op("CPX", O::Cpx, M::ZeroPage, 3),
    op("SBC", O::Sbc, M::ZeroPage, 3),
    op("INC", O::Inc, M::ZeroPage, 5),
    op("SMB6", O::Smb(6), M::ZeroPage, 5),
    op("INX", O::Inx, M::Implied, 2),
    op("SBC", O::Sbc, M::Immediate, 2),
    op("NOP", O::Nop, M::Implied, 2),
    nop(M::Implied, 1),
    op("CPX", O::Cpx, M::Absolute, 4),
    op("SBC", O::Sbc, M::Absolute, 4),
    op("INC", O::Inc, M::Absolute, 6),
    op("BBS6", O::Bbs(6), M::ZeroPageRelative, 5),
    // 0xF0
    op("BEQ", O::Beq, M::Relative, 2),
    op("SBC", O::Sbc, M::IndirectY, 5),
    op("SBC", O::Sbc, M::ZeroPageIndirect, 5),
    nop(M::Implied, 1),
    nop(M::ZeroPageX, 4),
    op("SBC", O::Sbc, M::ZeroPageX, 4),
    op("INC", O::Inc, M::ZeroPageX, 6),
    op("SMB7", O::Smb(7), M::ZeroPage, 5),
    op("SED", O::Sed, M::Implied, 2),
    op("SBC", O::Sbc, M::AbsoluteY, 4),
    op("PLX", O::Plx, M::Implied, 4),
    nop(M::Implied, 1),
    nop(M::Absolute, 4),
    op("SBC", O::Sbc, M::AbsoluteX, 4),
    op("INC", O::Inc, M::AbsoluteX, 7),
    op("BBS7", O::Bbs(7), M::ZeroPageRelative, 5),
];

/// Look up the metadata for an opcode byte.
///
/// Total over all 256 values; reserved opcodes decode as NOP variants.
#[inline]
pub fn decode(opcode: u8) -> &'static OpcodeMetadata {
    &OPCODE_TABLE[opcode as usize]
}
