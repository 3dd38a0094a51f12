//! # Processor Status Register
//!
//! The 65C02 status byte modelled as a `bitflags` value type.
//!
//! Bit layout (NV-BDIZC):
//! - Bit 7: N (Negative)
//! - Bit 6: V (Overflow)
//! - Bit 5: unused, always 1 when pushed
//! - Bit 4: B (Break), only meaningful in a pushed copy
//! - Bit 3: D (Decimal)
//! - Bit 2: I (Interrupt Disable)
//! - Bit 1: Z (Zero)
//! - Bit 0: C (Carry)
//!
//! Bits 4 and 5 are not real state. They are forced to 1 whenever the status
//! is pushed (`BRK`, `PHP`, hardware interrupts) and are discarded when a
//! status byte is pulled back by `PLP`/`RTI`.

use bitflags::bitflags;

bitflags! {
    /// 65C02 processor status flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        /// Carry (bit 0).
        const CARRY = 1 << 0;
        /// Zero (bit 1).
        const ZERO = 1 << 1;
        /// Interrupt disable (bit 2).
        const IRQ_DISABLE = 1 << 2;
        /// Decimal mode (bit 3).
        const DECIMAL = 1 << 3;
        /// Break (bit 4).
        const BREAK = 1 << 4;
        /// Unused (bit 5).
        const UNUSED = 1 << 5;
        /// Overflow (bit 6).
        const OVERFLOW = 1 << 6;
        /// Negative (bit 7).
        const NEGATIVE = 1 << 7;
    }
}

impl Status {
    /// The two bits that only exist in pushed copies.
    pub const RESERVED: Status = Status::BREAK.union(Status::UNUSED);

    /// Status after a reset: interrupts disabled, decimal mode off.
    pub const POWER_ON: Status = Status::IRQ_DISABLE.union(Status::UNUSED);

    /// Byte pushed to the stack, with Break and Unused forced to 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib65c02::Status;
    ///
    /// let live = Status::CARRY;
    /// assert_eq!(live.to_pushed(), 0b0011_0001);
    /// ```
    #[inline]
    pub const fn to_pushed(self) -> u8 {
        self.union(Self::RESERVED).bits()
    }

    /// Combine a pulled byte with the live register.
    ///
    /// Bits 4–5 of `pulled` are ignored; the live register keeps its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib65c02::Status;
    ///
    /// let live = Status::UNUSED;
    /// let restored = live.restore(0xFF);
    /// assert_eq!(restored.bits(), 0b1110_1111);
    /// ```
    #[inline]
    pub const fn restore(self, pulled: u8) -> Status {
        Status::from_bits_retain(pulled)
            .difference(Self::RESERVED)
            .union(self.intersection(Self::RESERVED))
    }

    /// Update Zero and Negative from an 8-bit result.
    #[inline]
    pub fn set_zn(&mut self, value: u8) {
        self.set(Status::ZERO, value == 0);
        self.set(Status::NEGATIVE, value & 0x80 != 0);
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::POWER_ON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_positions() {
        assert_eq!(Status::CARRY.bits(), 0x01);
        assert_eq!(Status::ZERO.bits(), 0x02);
        assert_eq!(Status::IRQ_DISABLE.bits(), 0x04);
        assert_eq!(Status::DECIMAL.bits(), 0x08);
        assert_eq!(Status::BREAK.bits(), 0x10);
        assert_eq!(Status::UNUSED.bits(), 0x20);
        assert_eq!(Status::OVERFLOW.bits(), 0x40);
        assert_eq!(Status::NEGATIVE.bits(), 0x80);
    }

    #[test]
    fn test_pushed_forces_reserved_bits() {
        assert_eq!(Status::empty().to_pushed(), 0x30);
        assert_eq!(Status::all().to_pushed(), 0xFF);
    }

    #[test]
    fn test_restore_ignores_reserved_bits() {
        // live has neither reserved bit; pulled has both
        let live = Status::empty();
        assert_eq!(live.restore(0x30), Status::empty());

        // live has both; pulled has neither
        let live = Status::RESERVED;
        assert_eq!(live.restore(0xC3).bits(), 0xF3);
    }

    #[test]
    fn test_set_zn() {
        let mut status = Status::empty();
        status.set_zn(0);
        assert!(status.contains(Status::ZERO));
        assert!(!status.contains(Status::NEGATIVE));

        status.set_zn(0x80);
        assert!(!status.contains(Status::ZERO));
        assert!(status.contains(Status::NEGATIVE));
    }
}
