//! # Bit-field helpers
//!
//! Small helpers for testing and modifying individual bits and bit masks in a
//! byte. Status flags, the `RMBn`/`SMBn`/`BBRn`/`BBSn` instructions and the VIA
//! register file all go through these.
//!
//! Bit numbers are 0 (least significant) to 7. Callers pass values from
//! decoded instructions or register layouts, so a bit number above 7 is a
//! programming error and is masked to the low three bits.

/// Returns true if bit `bit` of `value` is set.
///
/// # Examples
///
/// ```
/// use lib65c02::bits::test_bit;
///
/// assert!(test_bit(0b1000_0000, 7));
/// assert!(!test_bit(0b1000_0000, 6));
/// ```
#[inline]
pub const fn test_bit(value: u8, bit: u8) -> bool {
    value & (1 << (bit & 7)) != 0
}

/// Returns `value` with bit `bit` set.
#[inline]
pub const fn set_bit(value: u8, bit: u8) -> u8 {
    value | (1 << (bit & 7))
}

/// Returns `value` with bit `bit` cleared.
#[inline]
pub const fn clear_bit(value: u8, bit: u8) -> u8 {
    value & !(1 << (bit & 7))
}

/// Returns `value` with bit `bit` inverted.
#[inline]
pub const fn toggle_bit(value: u8, bit: u8) -> u8 {
    value ^ (1 << (bit & 7))
}

/// Returns `value` with bit `bit` set when `on` is true, cleared otherwise.
#[inline]
pub const fn assign_bit(value: u8, bit: u8, on: bool) -> u8 {
    if on {
        set_bit(value, bit)
    } else {
        clear_bit(value, bit)
    }
}

/// Returns true if any bit of `mask` is set in `value`.
#[inline]
pub const fn test_mask(value: u8, mask: u8) -> bool {
    value & mask != 0
}

/// Returns true if every bit of `mask` is set in `value`.
#[inline]
pub const fn test_mask_all(value: u8, mask: u8) -> bool {
    value & mask == mask
}

/// Returns `value` with every bit of `mask` set.
#[inline]
pub const fn set_mask(value: u8, mask: u8) -> u8 {
    value | mask
}

/// Returns `value` with every bit of `mask` cleared.
#[inline]
pub const fn clear_mask(value: u8, mask: u8) -> u8 {
    value & !mask
}

/// Returns `value` with every bit of `mask` inverted.
#[inline]
pub const fn toggle_mask(value: u8, mask: u8) -> u8 {
    value ^ mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_bit_helpers() {
        assert!(test_bit(0x01, 0));
        assert!(!test_bit(0x01, 1));
        assert_eq!(set_bit(0x00, 3), 0x08);
        assert_eq!(clear_bit(0xFF, 3), 0xF7);
        assert_eq!(toggle_bit(0x08, 3), 0x00);
        assert_eq!(toggle_bit(0x00, 3), 0x08);
    }

    #[test]
    fn test_assign_bit() {
        assert_eq!(assign_bit(0x00, 7, true), 0x80);
        assert_eq!(assign_bit(0x80, 7, false), 0x00);
        assert_eq!(assign_bit(0x81, 0, true), 0x81);
    }

    #[test]
    fn test_mask_helpers() {
        assert!(test_mask(0b0110_0000, 0b0100_0000));
        assert!(!test_mask(0b0010_0000, 0b0100_0000));
        assert!(test_mask_all(0b0111_0000, 0b0110_0000));
        assert!(!test_mask_all(0b0100_0000, 0b0110_0000));
        assert_eq!(set_mask(0x0F, 0xF0), 0xFF);
        assert_eq!(clear_mask(0xFF, 0x0F), 0xF0);
        assert_eq!(toggle_mask(0xAA, 0xFF), 0x55);
    }

    #[test]
    fn test_bit_number_is_masked() {
        // bit 8 wraps to bit 0
        assert_eq!(set_bit(0x00, 8), 0x01);
    }
}
