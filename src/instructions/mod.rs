//! # 65C02 Instruction Implementations
//!
//! Instruction semantics, organized by category. Each instruction is a
//! standalone function taking the CPU, the addressing mode and the resolved
//! operand. Operand bytes have already been consumed and cycle costs are
//! charged by the caller, so these functions only apply effects.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **bit_ops**: Single-bit and test-and-modify operations (RMB, SMB, TRB, TSB)
//! - **branches**: Branch instructions (BCC ... BVS, BRA, BBR, BBS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY, STZ)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP, WAI, STP)
//! - **stack**: Stack operations (PHA, PHP, PHX, PHY, PLA, PLP, PLX, PLY)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

pub(crate) mod alu;
pub(crate) mod bit_ops;
pub(crate) mod branches;
pub(crate) mod control;
pub(crate) mod flags;
pub(crate) mod inc_dec;
pub(crate) mod load_store;
pub(crate) mod shifts;
pub(crate) mod stack;
pub(crate) mod transfer;

use crate::cpu::{Cpu, Operand};
use crate::memory::MemoryBus;
use crate::opcodes::{OpcodeMetadata, Operation};

/// Applies the effects of one decoded instruction.
pub(crate) fn execute<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    metadata: &OpcodeMetadata,
    operand: Operand,
) {
    use Operation::*;

    let mode = metadata.addressing_mode;
    let operand = &operand;

    match metadata.operation {
        Adc => alu::execute_adc(cpu, mode, operand),
        Sbc => alu::execute_sbc(cpu, mode, operand),
        And => alu::execute_and(cpu, mode, operand),
        Ora => alu::execute_ora(cpu, mode, operand),
        Eor => alu::execute_eor(cpu, mode, operand),
        Cmp => alu::execute_cmp(cpu, mode, operand),
        Cpx => alu::execute_cpx(cpu, mode, operand),
        Cpy => alu::execute_cpy(cpu, mode, operand),
        Bit => alu::execute_bit(cpu, mode, operand),

        Asl => shifts::execute_asl(cpu, mode, operand),
        Lsr => shifts::execute_lsr(cpu, mode, operand),
        Rol => shifts::execute_rol(cpu, mode, operand),
        Ror => shifts::execute_ror(cpu, mode, operand),

        Lda => load_store::execute_lda(cpu, mode, operand),
        Ldx => load_store::execute_ldx(cpu, mode, operand),
        Ldy => load_store::execute_ldy(cpu, mode, operand),
        Sta => load_store::execute_sta(cpu, operand),
        Stx => load_store::execute_stx(cpu, operand),
        Sty => load_store::execute_sty(cpu, operand),
        Stz => load_store::execute_stz(cpu, operand),

        Inc => inc_dec::execute_inc(cpu, mode, operand),
        Dec => inc_dec::execute_dec(cpu, mode, operand),
        Inx => inc_dec::execute_inx(cpu),
        Iny => inc_dec::execute_iny(cpu),
        Dex => inc_dec::execute_dex(cpu),
        Dey => inc_dec::execute_dey(cpu),

        Bpl | Bmi | Bvc | Bvs | Bcc | Bcs | Bne | Beq | Bra | Bbr(_) | Bbs(_) => {
            branches::execute_branch(cpu, metadata.operation, operand)
        }

        Jmp => control::execute_jmp(cpu, operand),
        Jsr => control::execute_jsr(cpu, operand),
        Rts => control::execute_rts(cpu),
        Rti => control::execute_rti(cpu),
        Brk => control::execute_brk(cpu),
        Nop => control::execute_nop(),
        Wai => control::execute_wai(cpu),
        Stp => control::execute_stp(cpu),

        Pha => stack::execute_pha(cpu),
        Php => stack::execute_php(cpu),
        Phx => stack::execute_phx(cpu),
        Phy => stack::execute_phy(cpu),
        Pla => stack::execute_pla(cpu),
        Plp => stack::execute_plp(cpu),
        Plx => stack::execute_plx(cpu),
        Ply => stack::execute_ply(cpu),

        Clc => flags::execute_clc(cpu),
        Sec => flags::execute_sec(cpu),
        Cli => flags::execute_cli(cpu),
        Sei => flags::execute_sei(cpu),
        Cld => flags::execute_cld(cpu),
        Sed => flags::execute_sed(cpu),
        Clv => flags::execute_clv(cpu),

        Tax => transfer::execute_tax(cpu),
        Tay => transfer::execute_tay(cpu),
        Txa => transfer::execute_txa(cpu),
        Tya => transfer::execute_tya(cpu),
        Tsx => transfer::execute_tsx(cpu),
        Txs => transfer::execute_txs(cpu),

        Rmb(bit) => bit_ops::execute_rmb(cpu, bit, operand),
        Smb(bit) => bit_ops::execute_smb(cpu, bit, operand),
        Trb => bit_ops::execute_trb(cpu, operand),
        Tsb => bit_ops::execute_tsb(cpu, operand),
    }
}
