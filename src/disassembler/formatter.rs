//! Formatting functions for disassembled instructions
//!
//! Mnemonics are left-aligned in a four-character field followed by one
//! space and the operand, so columns line up for `BBR0`-style names.

use crate::addressing::AddressingMode;
use crate::disassembler::{DisassemblyOptions, Instruction};
use crate::opcodes::{decode, Operation};

/// Format a single instruction as assembly text
///
/// Reserved opcodes render as `???` followed by the opcode byte.
pub fn format_instruction(instr: &Instruction) -> String {
    if instr.mnemonic == ".byte" {
        return format!(".byte ${:02X}", instr.opcode);
    }
    if !instr.documented {
        return format!("{:<4} ${:02X}", "???", instr.opcode);
    }

    let operand = format_operand(instr);

    if operand.is_empty() {
        instr.mnemonic.to_string()
    } else {
        format!("{:<4} {}", instr.mnemonic, operand)
    }
}

/// Format a listing, one instruction per line: address, optional raw bytes, text.
pub fn format_listing(instructions: &[Instruction], options: DisassemblyOptions) -> String {
    let mut out = String::new();
    for instr in instructions {
        out.push_str(&format!("{:04X}  ", instr.address));
        if options.hex_dump {
            let mut raw = format!("{:02X}", instr.opcode);
            for byte in &instr.operand_bytes {
                raw.push_str(&format!(" {:02X}", byte));
            }
            out.push_str(&format!("{:<10}", raw));
        }
        out.push_str(&format_instruction(instr));
        out.push('\n');
    }
    out
}

/// Format the operand based on addressing mode
fn format_operand(instr: &Instruction) -> String {
    use AddressingMode::*;

    let byte = |i: usize| instr.operand_bytes.get(i).copied().unwrap_or(0);
    let word = || u16::from_le_bytes([byte(0), byte(1)]);
    let next = instr.address.wrapping_add(instr.size_bytes as u16);

    match instr.addressing_mode {
        Implied => {
            let accumulator = matches!(
                decode(instr.opcode).operation,
                Operation::Asl
                    | Operation::Lsr
                    | Operation::Rol
                    | Operation::Ror
                    | Operation::Inc
                    | Operation::Dec
            );
            if accumulator {
                "A".to_string()
            } else {
                String::new()
            }
        }
        Immediate => format!("#${:02X}", byte(0)),
        ZeroPage => format!("${:02X}", byte(0)),
        ZeroPageX => format!("${:02X},X", byte(0)),
        ZeroPageY => format!("${:02X},Y", byte(0)),
        Relative => {
            let target = next.wrapping_add_signed(byte(0) as i8 as i16);
            format!("${:02X} [${:04X}]", byte(0), target)
        }
        Absolute => format!("${:04X}", word()),
        AbsoluteX => format!("${:04X},X", word()),
        AbsoluteY => format!("${:04X},Y", word()),
        Indirect => format!("(${:04X})", word()),
        AbsoluteIndexedIndirect => format!("(${:04X},X)", word()),
        IndirectX => format!("(${:02X},X)", byte(0)),
        IndirectY => format!("(${:02X}),Y", byte(0)),
        ZeroPageIndirect => format!("(${:02X})", byte(0)),
        ZeroPageRelative => {
            let target = next.wrapping_add_signed(byte(1) as i8 as i16);
            format!("${:02X},${:02X} [${:04X}]", byte(0), byte(1), target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disassembler::decoder::decode_instruction;

    fn render(bytes: &[u8], address: u16) -> String {
        format_instruction(&decode_instruction(bytes, address).unwrap())
    }

    #[test]
    fn test_format_immediate() {
        assert_eq!(render(&[0xA9, 0x42], 0x8000), "LDA  #$42");
    }

    #[test]
    fn test_format_absolute() {
        assert_eq!(render(&[0x8D, 0x00, 0x80], 0x0000), "STA  $8000");
    }

    #[test]
    fn test_format_implied() {
        assert_eq!(render(&[0xEA], 0x1000), "NOP");
        assert_eq!(render(&[0xDB], 0x1000), "STP");
    }

    #[test]
    fn test_format_accumulator() {
        assert_eq!(render(&[0x0A], 0), "ASL  A");
        assert_eq!(render(&[0x1A], 0), "INC  A");
        assert_eq!(render(&[0x3A], 0), "DEC  A");
    }

    #[test]
    fn test_format_indirect_forms() {
        assert_eq!(render(&[0x6C, 0x34, 0x12], 0), "JMP  ($1234)");
        assert_eq!(render(&[0x7C, 0x34, 0x12], 0), "JMP  ($1234,X)");
        assert_eq!(render(&[0xA1, 0x20], 0), "LDA  ($20,X)");
        assert_eq!(render(&[0xB1, 0x20], 0), "LDA  ($20),Y");
        assert_eq!(render(&[0xB2, 0x20], 0), "LDA  ($20)");
    }

    #[test]
    fn test_format_relative_shows_target() {
        // BNE -3 from 0x8010: next is 0x8012
        assert_eq!(render(&[0xD0, 0xFD], 0x8010), "BNE  $FD [$800F]");
        assert_eq!(render(&[0x80, 0x10], 0x80F0), "BRA  $10 [$8102]");
    }

    #[test]
    fn test_format_zero_page_relative() {
        assert_eq!(render(&[0x8F, 0x12, 0x04], 0x0300), "BBS0 $12,$04 [$0307]");
    }

    #[test]
    fn test_format_reserved_opcode() {
        assert_eq!(render(&[0x03], 0x2000), "???  $03");
        assert_eq!(render(&[0x44, 0x00], 0x2000), "???  $44");
    }

    #[test]
    fn test_format_listing_with_hex_dump() {
        let instructions = crate::disassembler::disassemble(
            &[0xA9, 0x01, 0x60],
            DisassemblyOptions {
                start_address: 0xC000,
                hex_dump: true,
            },
        );
        let listing = format_listing(&instructions, DisassemblyOptions {
            start_address: 0xC000,
            hex_dump: true,
        });
        assert_eq!(listing, "C000  A9 01     LDA  #$01\nC002  60        RTS\n");
    }
}
