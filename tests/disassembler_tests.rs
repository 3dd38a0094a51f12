//! Disassembler integration tests.

use lib65c02::disassembler::formatter::{format_instruction, format_listing};
use lib65c02::{disassemble, AddressingMode, Disassembler, DisassemblyOptions, FlatMemory, MemoryBus};

fn text(bytes: &[u8], start_address: u16) -> Vec<String> {
    let options = DisassemblyOptions {
        start_address,
        hex_dump: false,
    };
    disassemble(bytes, options)
        .iter()
        .map(format_instruction)
        .collect()
}

#[test]
fn test_every_addressing_mode() {
    #[rustfmt::skip]
    let program = [
        0xEA,             // NOP
        0x0A,             // ASL A
        0xA9, 0x10,       // LDA #$10
        0xA5, 0x20,       // LDA $20
        0xB5, 0x20,       // LDA $20,X
        0xB6, 0x20,       // LDX $20,Y
        0xAD, 0x34, 0x12, // LDA $1234
        0xBD, 0x34, 0x12, // LDA $1234,X
        0xB9, 0x34, 0x12, // LDA $1234,Y
        0x6C, 0x34, 0x12, // JMP ($1234)
        0x7C, 0x34, 0x12, // JMP ($1234,X)
        0xA1, 0x20,       // LDA ($20,X)
        0xB1, 0x20,       // LDA ($20),Y
        0xB2, 0x20,       // LDA ($20)
    ];

    let lines = text(&program, 0x8000);
    assert_eq!(
        lines,
        [
            "NOP",
            "ASL  A",
            "LDA  #$10",
            "LDA  $20",
            "LDA  $20,X",
            "LDX  $20,Y",
            "LDA  $1234",
            "LDA  $1234,X",
            "LDA  $1234,Y",
            "JMP  ($1234)",
            "JMP  ($1234,X)",
            "LDA  ($20,X)",
            "LDA  ($20),Y",
            "LDA  ($20)",
        ]
    );
}

#[test]
fn test_branch_targets() {
    // BNE +5 at 0x8000 ; BRA -2 at 0x8002 ; BBS7 $10,-3 at 0x8004
    let lines = text(&[0xD0, 0x05, 0x80, 0xFE, 0xFF, 0x10, 0xFD], 0x8000);
    assert_eq!(
        lines,
        ["BNE  $05 [$8007]", "BRA  $FE [$8002]", "BBS7 $10,$FD [$8004]"]
    );
}

#[test]
fn test_cmos_mnemonics() {
    let lines = text(&[0x1A, 0x3A, 0x64, 0x10, 0x04, 0x10, 0x97, 0x10, 0xCB, 0xDB], 0);
    assert_eq!(
        lines,
        ["INC  A", "DEC  A", "STZ  $10", "TSB  $10", "SMB1 $10", "WAI", "STP"]
    );
}

#[test]
fn test_reserved_opcodes_render_as_unknown() {
    let instructions = disassemble(&[0x02, 0xFF, 0x03, 0x5C, 0x00, 0x00], DisassemblyOptions::default());
    assert_eq!(instructions.len(), 3);
    assert!(instructions.iter().all(|i| !i.documented));
    assert_eq!(instructions[0].size_bytes, 2);
    assert_eq!(instructions[1].size_bytes, 1);
    assert_eq!(instructions[2].size_bytes, 3);
    assert_eq!(format_instruction(&instructions[0]), "???  $02");
    assert_eq!(format_instruction(&instructions[2]), "???  $5C");
}

#[test]
fn test_instruction_metadata() {
    let instructions = disassemble(&[0xBD, 0x00, 0x20], DisassemblyOptions::default());
    let lda = &instructions[0];
    assert_eq!(lda.mnemonic, "LDA");
    assert_eq!(lda.addressing_mode, AddressingMode::AbsoluteX);
    assert_eq!(lda.operand_bytes, vec![0x00, 0x20]);
    assert_eq!(lda.base_cycles, 4);
    assert!(lda.documented);
}

#[test]
fn test_listing_with_hex_dump() {
    let options = DisassemblyOptions {
        start_address: 0xE000,
        hex_dump: true,
    };
    let instructions = disassemble(&[0xA9, 0x01, 0x8D, 0x00, 0x02, 0x60], options);
    let listing = format_listing(&instructions, options);
    assert_eq!(
        listing,
        "E000  A9 01     LDA  #$01\n\
         E002  8D 00 02  STA  $0200\n\
         E005  60        RTS\n"
    );
}

#[test]
fn test_listing_without_hex_dump() {
    let options = DisassemblyOptions {
        start_address: 0x0400,
        hex_dump: false,
    };
    let listing = format_listing(&disassemble(&[0xE8, 0x4C], options), options);
    assert_eq!(listing, "0400  INX\n0401  .byte $4C\n");
}

#[test]
fn test_cursor_walks_a_live_program() {
    let mut memory = FlatMemory::new();
    memory.load(0x0600, &[0xA2, 0x00, 0xE8, 0xD0, 0xFD, 0xDB]);

    let mut dis = Disassembler::new(0x0600);
    let lines: Vec<_> = (0..4).map(|_| dis.disassemble(&memory)).collect();
    assert_eq!(lines, ["LDX  #$00", "INX", "BNE  $FD [$0602]", "STP"]);
    assert_eq!(dis.address, 0x0606);

    // current() does not advance
    dis.address = 0x0602;
    assert_eq!(dis.current(&memory).mnemonic, "INX");
    assert_eq!(dis.address, 0x0602);
    assert_eq!(memory.open_bus(), 0x00);
}
