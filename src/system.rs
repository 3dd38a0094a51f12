//! # System
//!
//! The complete machine: a 65C02 on a [`SystemBus`] with a VIA in the I/O
//! window and the video timing circuit, plus the seeded generator used for
//! power-on garbage.
//!
//! A front end typically loads a ROM image and then alternates
//! [`System::clock_until_next_frame`], reading [`System::video_ram`], and
//! [`System::frame_drawn`].

use std::path::Path;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::bus::SystemBus;
use crate::config::SystemConfig;
use crate::cpu::{Cpu, Registers};
use crate::devices::{DeviceHandle, Via};
use crate::disassembler::Disassembler;
use crate::memory::MemoryBus;
use crate::video::CYCLES_PER_FRAME;
use crate::Result;

/// A powered-on machine.
///
/// # Examples
///
/// ```
/// use lib65c02::{FillPolicy, System, SystemConfig};
///
/// let config = SystemConfig::default().with_ram_fill(FillPolicy::Fixed(0));
/// let mut system = System::new(config).unwrap();
///
/// // Reset vector -> 0xE000: INX ; BRA -3
/// let mut rom = vec![0xEA; 0x2000];
/// rom[..3].copy_from_slice(&[0xE8, 0x80, 0xFD]);
/// rom[0x1FFC] = 0x00;
/// rom[0x1FFD] = 0xE0;
/// system.load_rom(&rom, 0, rom.len());
/// system.reset();
///
/// system.clock_until_next_frame();
/// assert!(system.frame_ready());
/// system.frame_drawn();
/// assert_eq!(system.frames(), 1);
/// ```
pub struct System {
    cpu: Cpu<SystemBus>,
    via: DeviceHandle,
    rng: StdRng,
    config: SystemConfig,
}

impl System {
    /// Build and power on a machine.
    ///
    /// RAM and video RAM are filled per `config.ram_fill`, ROM with
    /// `config.rom_fill`, and A, X and Y get random power-on values before the
    /// reset sequence runs.
    ///
    /// # Errors
    ///
    /// `EmulatorError::Device` if `config.via_base` does not place the VIA in
    /// the I/O window.
    pub fn new(config: SystemConfig) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(config.seed);

        let mut bus = SystemBus::new();
        bus.ram_mut().apply_fill(config.ram_fill, &mut rng);
        bus.vram_mut().apply_fill(config.ram_fill, &mut rng);
        bus.rom_mut().fill(config.rom_fill);
        let via = bus.add_device(config.via_base, Box::new(Via::new()))?;

        let mut cpu = Cpu::new(bus);
        let mut registers = [0u8; 4];
        rng.fill_bytes(&mut registers);
        cpu.set_a(registers[0]);
        cpu.set_x(registers[1]);
        cpu.set_y(registers[2]);
        cpu.set_sp(registers[3]);

        let mut system = Self {
            cpu,
            via,
            rng,
            config,
        };
        system.reset();
        log::info!(
            "system powered on (seed=0x{:X}, via=0x{:04X})",
            config.seed,
            config.via_base
        );
        Ok(system)
    }

    /// Soft reset: peripherals, beam, interrupt latches and CPU registers.
    /// Memory is kept.
    pub fn reset(&mut self) {
        self.cpu.memory_mut().reset();
        self.cpu.reset();
    }

    /// Re-apply the RAM fill policy, then reset. ROM is kept.
    pub fn hard_reset(&mut self) {
        let policy = self.config.ram_fill;
        let bus = self.cpu.memory_mut();
        bus.ram_mut().apply_fill(policy, &mut self.rng);
        bus.vram_mut().apply_fill(policy, &mut self.rng);
        log::debug!("hard reset");
        self.reset();
    }

    /// Run for exactly `cycles` cycles, or one instruction if `cycles` is 0.
    pub fn clock(&mut self, cycles: u32) -> u32 {
        self.cpu.clock(cycles)
    }

    /// Run one instruction, interrupt entry or idle cycle.
    pub fn step(&mut self) -> u32 {
        self.cpu.step()
    }

    /// Run one video frame's worth of cycles.
    ///
    /// The beam crosses the start of vertical blank once per call, so a caller
    /// that acknowledges each frame with [`System::frame_drawn`] sees exactly
    /// one frame-ready edge and one NMI per call.
    pub fn clock_until_next_frame(&mut self) -> u32 {
        self.cpu.clock(CYCLES_PER_FRAME)
    }

    pub fn frame_ready(&self) -> bool {
        self.cpu.memory().video().frame_ready()
    }

    /// Acknowledge the ready frame so the next vblank raises NMI again.
    pub fn frame_drawn(&mut self) {
        self.cpu.memory_mut().video_mut().frame_drawn();
    }

    pub fn frames(&self) -> u64 {
        self.cpu.memory().video().frames()
    }

    /// Video RAM: 64 rows of 128 bytes.
    pub fn video_ram(&self) -> &[u8] {
        self.cpu.memory().vram().as_slice()
    }

    /// Copy up to `count` bytes of `bytes` into ROM starting at ROM offset
    /// `offset`. Returns the number of bytes copied.
    pub fn load_rom(&mut self, bytes: &[u8], offset: usize, count: usize) -> usize {
        self.cpu
            .memory_mut()
            .rom_mut()
            .load_from_buffer(bytes, offset, count)
    }

    /// Load a ROM image file at the start of ROM.
    ///
    /// # Errors
    ///
    /// `EmulatorError::Io` if the file cannot be read.
    pub fn load_rom_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        self.cpu.memory_mut().rom_mut().load_from_file(path)
    }

    /// Copy up to `count` bytes of `bytes` into RAM starting at RAM offset
    /// `offset`. Returns the number of bytes copied.
    pub fn load_ram(&mut self, bytes: &[u8], offset: usize, count: usize) -> usize {
        self.cpu
            .memory_mut()
            .ram_mut()
            .load_from_buffer(bytes, offset, count)
    }

    /// Read memory without side effects.
    pub fn peek(&self, addr: u16) -> u8 {
        self.cpu.memory().peek(addr)
    }

    /// Disassembly cursor starting at `address`; use it with [`System::bus`].
    pub fn disassembler(&self, address: u16) -> Disassembler {
        Disassembler::new(address)
    }

    /// Disassemble the instruction at PC.
    pub fn disassemble_pc(&self) -> String {
        Disassembler::new(self.cpu.pc()).disassemble(self.cpu.memory())
    }

    pub fn registers(&self) -> Registers {
        self.cpu.registers()
    }

    pub fn cpu(&self) -> &Cpu<SystemBus> {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu<SystemBus> {
        &mut self.cpu
    }

    pub fn bus(&self) -> &SystemBus {
        self.cpu.memory()
    }

    pub fn bus_mut(&mut self) -> &mut SystemBus {
        self.cpu.memory_mut()
    }

    pub fn via_handle(&self) -> DeviceHandle {
        self.via
    }

    pub fn via(&self) -> Option<&Via> {
        self.cpu.memory().device::<Via>(self.via)
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::FillPolicy;

    fn rom_with(program: &[u8], nmi_handler: &[u8]) -> Vec<u8> {
        let mut rom = vec![0xEA; 0x2000];
        rom[..program.len()].copy_from_slice(program);
        rom[0x1000..0x1000 + nmi_handler.len()].copy_from_slice(nmi_handler);
        // NMI -> 0xF000, RESET -> 0xE000, IRQ -> 0xF000
        rom[0x1FFA..].copy_from_slice(&[0x00, 0xF0, 0x00, 0xE0, 0x00, 0xF0]);
        rom
    }

    fn system_with(program: &[u8], nmi_handler: &[u8]) -> System {
        let config = SystemConfig::default().with_ram_fill(FillPolicy::Fixed(0));
        let mut system = System::new(config).unwrap();
        let rom = rom_with(program, nmi_handler);
        system.load_rom(&rom, 0, rom.len());
        system.reset();
        system
    }

    #[test]
    fn test_power_on_is_deterministic_for_a_seed() {
        let a = System::new(SystemConfig::default().with_seed(7)).unwrap();
        let b = System::new(SystemConfig::default().with_seed(7)).unwrap();
        assert_eq!(a.registers(), b.registers());
        assert_eq!(a.bus().ram().as_slice(), b.bus().ram().as_slice());
    }

    #[test]
    fn test_default_rom_is_nop_filled() {
        let system = System::new(SystemConfig::default()).unwrap();
        assert_eq!(system.peek(0xE000), 0xEA);
        assert_eq!(system.cpu().pc(), 0xEAEA);
        assert_eq!(system.cpu().sp(), 0xFD);
    }

    #[test]
    fn test_invalid_via_base_is_rejected() {
        let result = System::new(SystemConfig::default().with_via_base(0x1000));
        assert!(matches!(result, Err(crate::EmulatorError::Device(_))));
    }

    #[test]
    fn test_one_nmi_per_acknowledged_frame() {
        // Main loop: BRA -2. NMI: INC $10 ; RTI
        let mut system = system_with(&[0x80, 0xFE], &[0xE6, 0x10, 0x40]);

        for frame in 1..=3u8 {
            system.clock_until_next_frame();
            assert!(system.frame_ready());
            system.frame_drawn();
            // Let the handler run to completion
            system.clock(20);
            assert_eq!(system.peek(0x0010), frame);
        }
        assert_eq!(system.frames(), 3);
    }

    #[test]
    fn test_unacknowledged_frame_raises_no_more_nmi() {
        let mut system = system_with(&[0x80, 0xFE], &[0xE6, 0x10, 0x40]);
        system.clock_until_next_frame();
        system.clock_until_next_frame();
        system.clock_until_next_frame();
        assert_eq!(system.peek(0x0010), 1);
    }

    #[test]
    fn test_hard_reset_refills_ram_and_keeps_rom() {
        let mut system = system_with(&[0xA9, 0x01], &[]);
        system.load_ram(&[0xAA; 4], 0x10, 4);
        assert_eq!(system.peek(0x0012), 0xAA);

        system.hard_reset();
        assert_eq!(system.peek(0x0012), 0x00);
        assert_eq!(system.peek(0xE000), 0xA9);
        assert_eq!(system.cpu().pc(), 0xE000);
    }

    #[test]
    fn test_disassemble_pc() {
        let system = system_with(&[0xA9, 0x01], &[]);
        assert_eq!(system.disassemble_pc(), "LDA  #$01");
        let mut dis = system.disassembler(0xE002);
        assert_eq!(dis.disassemble(system.bus()), "NOP");
    }
}
