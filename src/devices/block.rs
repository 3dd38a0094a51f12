//! Memory block implementation.
//!
//! A contiguous run of RAM or ROM bytes with a fixed start address. The system
//! bus holds its RAM, video RAM and ROM as blocks; a block can also be mapped
//! into the I/O window as an ordinary [`Device`].

use std::any::Any;
use std::fs;
use std::path::Path;

use rand::RngCore;

use super::Device;
use crate::Result;

/// How a block is filled at power-on or hard reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPolicy {
    /// Undefined content drawn from the system's seeded generator.
    Random,
    /// Every byte set to the given value.
    Fixed(u8),
}

/// A contiguous block of RAM or ROM.
///
/// Address membership is computed from `start` and the length of the data.
/// Writes through [`MemoryBlock::write`] are discarded when the block is read-only;
/// loading an image bypasses that check.
///
/// # Examples
///
/// ```rust
/// use lib65c02::{Device, MemoryBlock};
///
/// let mut ram = MemoryBlock::ram(0x0000, 0x2000);
/// ram.write(0x42, 0xAA);
/// assert_eq!(ram.peek(0x42), 0xAA);
/// assert!(ram.contains(0x1FFF));
/// assert!(!ram.contains(0x2000));
///
/// let mut rom = MemoryBlock::rom(0xE000, 0x2000);
/// rom.write(0x00, 0xAA);
/// assert_eq!(rom.peek(0x00), 0x00);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryBlock {
    start: u16,
    read_only: bool,
    data: Vec<u8>,
}

impl MemoryBlock {
    /// Create a zero-filled block of `size` bytes starting at `start`.
    pub fn new(start: u16, size: usize, read_only: bool) -> Self {
        Self {
            start,
            read_only,
            data: vec![0; size],
        }
    }

    /// Writable block.
    pub fn ram(start: u16, size: usize) -> Self {
        Self::new(start, size, false)
    }

    /// Read-only block.
    pub fn rom(start: u16, size: usize) -> Self {
        Self::new(start, size, true)
    }

    /// First address of the block.
    pub fn start(&self) -> u16 {
        self.start
    }

    /// Number of bytes in the block.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the block has no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether CPU writes are discarded.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Whether `addr` falls inside the block.
    pub fn contains(&self, addr: u16) -> bool {
        addr >= self.start && ((addr - self.start) as usize) < self.data.len()
    }

    /// Byte at absolute address `addr`, if it belongs to the block.
    pub fn get(&self, addr: u16) -> Option<u8> {
        if self.contains(addr) {
            Some(self.data[(addr - self.start) as usize])
        } else {
            None
        }
    }

    /// Store to absolute address `addr`. Returns false if the write was discarded.
    pub fn set(&mut self, addr: u16, value: u8) -> bool {
        if self.read_only || !self.contains(addr) {
            return false;
        }
        self.data[(addr - self.start) as usize] = value;
        true
    }

    /// Set every byte to `value`.
    pub fn fill(&mut self, value: u8) {
        self.data.fill(value);
    }

    /// Overwrite every byte from `rng`.
    pub fn randomize<R: RngCore + ?Sized>(&mut self, rng: &mut R) {
        rng.fill_bytes(&mut self.data);
    }

    /// Apply a fill policy, drawing from `rng` when it is [`FillPolicy::Random`].
    pub fn apply_fill<R: RngCore + ?Sized>(&mut self, policy: FillPolicy, rng: &mut R) {
        match policy {
            FillPolicy::Random => self.randomize(rng),
            FillPolicy::Fixed(value) => self.fill(value),
        }
    }

    /// Copy up to `count` bytes of `bytes` into the block starting at block
    /// offset `offset`.
    ///
    /// The copy is truncated to what fits in the block and to what `bytes`
    /// holds. Returns the number of bytes copied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lib65c02::{Device, MemoryBlock};
    ///
    /// let mut rom = MemoryBlock::rom(0xFFF0, 16);
    /// let copied = rom.load_from_buffer(&[1, 2, 3, 4], 14, 4);
    /// assert_eq!(copied, 2);
    /// assert_eq!(rom.get(0xFFFF), Some(2));
    /// ```
    pub fn load_from_buffer(&mut self, bytes: &[u8], offset: usize, count: usize) -> usize {
        let requested = count.min(bytes.len());
        let room = self.data.len().saturating_sub(offset);
        let copied = requested.min(room);
        if copied < requested {
            log::warn!(
                "image truncated: {} of {} bytes fit in block at 0x{:04X}+0x{:X}",
                copied,
                requested,
                self.start,
                offset
            );
        }
        let start = offset.min(self.data.len());
        self.data[start..][..copied].copy_from_slice(&bytes[..copied]);
        copied
    }

    /// Read a file and copy its contents to the start of the block.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EmulatorError::Io`] if the file cannot be read.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        log::info!(
            "loading {} ({} bytes) at 0x{:04X}",
            path.display(),
            bytes.len(),
            self.start
        );
        Ok(self.load_from_buffer(&bytes, 0, bytes.len()))
    }

    /// Block content.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl Device for MemoryBlock {
    fn peek(&self, offset: u16) -> u8 {
        self.data.get(offset as usize).copied().unwrap_or(0)
    }

    fn write(&mut self, offset: u16, value: u8) {
        if self.read_only {
            return;
        }
        if let Some(byte) = self.data.get_mut(offset as usize) {
            *byte = value;
        }
    }

    fn size(&self) -> u16 {
        self.data.len().min(u16::MAX as usize) as u16
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
