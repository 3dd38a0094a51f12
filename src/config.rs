//! # System Configuration
//!
//! Power-on policy for a [`crate::System`]: the seed for undefined memory and
//! register content, how RAM and ROM are filled, and where the VIA is mapped.

use crate::devices::FillPolicy;
use crate::memory_map::VIA_BASE;

/// Default ROM fill byte (`NOP`).
pub const DEFAULT_ROM_FILL: u8 = 0xEA;

/// Construction options for [`crate::System`].
///
/// # Examples
///
/// ```
/// use lib65c02::{FillPolicy, SystemConfig};
///
/// let config = SystemConfig::default()
///     .with_seed(42)
///     .with_ram_fill(FillPolicy::Fixed(0x00));
///
/// assert_eq!(config.seed, 42);
/// assert_eq!(config.rom_fill, 0xEA);
/// assert_eq!(config.via_base, 0x6000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemConfig {
    /// Seed for the power-on generator (RAM content and registers).
    pub seed: u64,
    /// How RAM and video RAM are filled at power-on and hard reset.
    pub ram_fill: FillPolicy,
    /// Byte ROM is filled with before an image is loaded.
    pub rom_fill: u8,
    /// Base address of the VIA's 16 registers in the I/O window.
    pub via_base: u16,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            seed: 0x6502,
            ram_fill: FillPolicy::Random,
            rom_fill: DEFAULT_ROM_FILL,
            via_base: VIA_BASE,
        }
    }
}

impl SystemConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_ram_fill(mut self, ram_fill: FillPolicy) -> Self {
        self.ram_fill = ram_fill;
        self
    }

    pub fn with_rom_fill(mut self, rom_fill: u8) -> Self {
        self.rom_fill = rom_fill;
        self
    }

    pub fn with_via_base(mut self, via_base: u16) -> Self {
        self.via_base = via_base;
        self
    }
}
