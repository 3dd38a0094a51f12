//! # Memory Map
//!
//! Fixed layout of the system bus. The top three address bits select an
//! 8 KiB slot:
//!
//! | Slot | Range         | Contents                     |
//! |------|---------------|------------------------------|
//! | 0    | 0x0000-0x1FFF | RAM                          |
//! | 1    | 0x2000-0x3FFF | Video RAM (128x64, 1 byte/px)|
//! | 2-6  | 0x4000-0xDFFF | I/O window (VIA at 0x6000)   |
//! | 7    | 0xE000-0xFFFF | ROM, including the vectors   |

/// Size of one address slot.
pub const SLOT_SIZE: usize = 0x2000;

/// Number of address bits below the slot index.
pub const SLOT_SHIFT: u32 = 13;

/// First RAM address.
pub const RAM_START: u16 = 0x0000;
/// Last RAM address.
pub const RAM_END: u16 = 0x1FFF;
/// RAM size in bytes.
pub const RAM_SIZE: usize = SLOT_SIZE;

/// First video RAM address.
pub const VRAM_START: u16 = 0x2000;
/// Last video RAM address.
pub const VRAM_END: u16 = 0x3FFF;
/// Video RAM size in bytes.
pub const VRAM_SIZE: usize = SLOT_SIZE;

/// First address of the I/O window.
pub const IO_START: u16 = 0x4000;
/// Last address of the I/O window.
pub const IO_END: u16 = 0xDFFF;

/// Default VIA base address.
pub const VIA_BASE: u16 = 0x6000;

/// First ROM address.
pub const ROM_START: u16 = 0xE000;
/// Last ROM address.
pub const ROM_END: u16 = 0xFFFF;
/// ROM size in bytes.
pub const ROM_SIZE: usize = SLOT_SIZE;

/// NMI vector (low byte; high byte follows).
pub const NMI_VECTOR: u16 = 0xFFFA;
/// Reset vector (low byte; high byte follows).
pub const RESET_VECTOR: u16 = 0xFFFC;
/// IRQ/BRK vector (low byte; high byte follows).
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Base of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;

/// What lives at an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Ram,
    VideoRam,
    Io,
    Rom,
}

/// Slot index of `addr`.
#[inline]
pub const fn slot(addr: u16) -> u16 {
    addr >> SLOT_SHIFT
}

/// Region of `addr`.
///
/// # Examples
///
/// ```
/// use lib65c02::memory_map::{region, Region};
///
/// assert_eq!(region(0x1FFF), Region::Ram);
/// assert_eq!(region(0x2000), Region::VideoRam);
/// assert_eq!(region(0x6000), Region::Io);
/// assert_eq!(region(0xFFFC), Region::Rom);
/// ```
#[inline]
pub const fn region(addr: u16) -> Region {
    match slot(addr) {
        0 => Region::Ram,
        1 => Region::VideoRam,
        7 => Region::Rom,
        _ => Region::Io,
    }
}
