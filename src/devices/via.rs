//! VIA (6522) Versatile Interface Adapter emulation.
//!
//! The system maps one VIA into the I/O window. It provides:
//! - Two 8-bit port registers with data direction registers (storage only)
//! - Two 16-bit countdown timers with interrupt capability
//! - Shift, auxiliary and peripheral control registers
//! - Interrupt flag (IFR) and interrupt enable (IER) registers driving IRQ
//!
//! Timer 1 runs one-shot (ACR bit 6 clear) or free-run (ACR bit 6 set).
//! Timer 2 only counts in its one-shot mode (ACR bit 5 clear); pulse counting
//! on PB6 is not wired.

use std::any::Any;

use bitflags::bitflags;

use super::{Device, InterruptDevice};

/// Number of VIA registers.
pub const VIA_REGISTER_COUNT: u16 = 16;

/// Register offsets within the VIA.
pub mod reg {
    /// Output register B.
    pub const ORB: u16 = 0x0;
    /// Output register A.
    pub const ORA: u16 = 0x1;
    /// Data direction register B.
    pub const DDRB: u16 = 0x2;
    /// Data direction register A.
    pub const DDRA: u16 = 0x3;
    /// Timer 1 counter low (write: latch low).
    pub const T1C_L: u16 = 0x4;
    /// Timer 1 counter high (write: latch high, load and start).
    pub const T1C_H: u16 = 0x5;
    /// Timer 1 latch low.
    pub const T1L_L: u16 = 0x6;
    /// Timer 1 latch high.
    pub const T1L_H: u16 = 0x7;
    /// Timer 2 counter low (write: latch low).
    pub const T2C_L: u16 = 0x8;
    /// Timer 2 counter high (write: latch high, load and start).
    pub const T2C_H: u16 = 0x9;
    /// Shift register.
    pub const SR: u16 = 0xA;
    /// Auxiliary control register.
    pub const ACR: u16 = 0xB;
    /// Peripheral control register.
    pub const PCR: u16 = 0xC;
    /// Interrupt flag register.
    pub const IFR: u16 = 0xD;
    /// Interrupt enable register.
    pub const IER: u16 = 0xE;
    /// Output register A without handshake.
    pub const ORA_NH: u16 = 0xF;
}

/// ACR bit selecting Timer 1 free-run mode.
pub const ACR_T1_FREE_RUN: u8 = 0x40;

/// ACR bit selecting Timer 2 pulse counting (Timer 2 inert when set).
pub const ACR_T2_PULSE_COUNT: u8 = 0x20;

bitflags! {
    /// IFR / IER bit layout.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ViaInterrupts: u8 {
        const CA2 = 0x01;
        const CA1 = 0x02;
        const SHIFT = 0x04;
        const CB2 = 0x08;
        const CB1 = 0x10;
        const TIMER2 = 0x20;
        const TIMER1 = 0x40;
        /// IFR: any enabled flag set. IER: set/clear selector on write.
        const IRQ = 0x80;
    }
}

/// VIA timer state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViaTimer {
    /// Reload latch value.
    pub latch: u16,
    /// Current countdown value.
    pub counter: u16,
    /// Timer is counting.
    pub running: bool,
}

impl ViaTimer {
    /// Load the counter from the latch and start counting.
    pub fn start(&mut self) {
        self.counter = self.latch;
        self.running = true;
    }

    /// Clock the timer by `cycles`.
    ///
    /// The counter never wraps below zero. Returns true if it reached zero
    /// during this call. In free-run mode the counter reloads from the latch,
    /// carrying any overshoot into the new period; otherwise the timer stops.
    pub fn clock(&mut self, cycles: u32, free_run: bool) -> bool {
        if !self.running || cycles == 0 {
            return false;
        }

        let counter = self.counter as u32;
        if cycles < counter {
            self.counter = (counter - cycles) as u16;
            return false;
        }

        let overshoot = cycles - counter;
        let latch = self.latch as u32;
        if free_run && latch != 0 {
            self.counter = (latch - overshoot % latch) as u16;
        } else {
            self.counter = 0;
            self.running = free_run;
        }
        true
    }

    fn set_latch_low(&mut self, value: u8) {
        self.latch = (self.latch & 0xFF00) | value as u16;
    }

    fn set_latch_high(&mut self, value: u8) {
        self.latch = (self.latch & 0x00FF) | ((value as u16) << 8);
    }
}

/// 6522 Versatile Interface Adapter.
#[derive(Debug, Clone, Default)]
pub struct Via {
    orb: u8,
    ora: u8,
    ddrb: u8,
    ddra: u8,
    sr: u8,
    acr: u8,
    pcr: u8,

    /// Timer 1.
    pub timer1: ViaTimer,
    /// Timer 2.
    pub timer2: ViaTimer,

    /// Flag bits 0-6; bit 7 is computed on read.
    ifr: ViaInterrupts,
    /// Enable bits 0-6.
    ier: ViaInterrupts,
}

impl Via {
    /// Create a VIA in its power-on state: timers stopped, all interrupts disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock both timers by `cycles` system cycles.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lib65c02::{Device, Via};
    /// use lib65c02::devices::via::reg;
    ///
    /// let mut via = Via::new();
    /// via.write(reg::IER, 0xC0); // enable Timer 1
    /// via.write(reg::T1C_L, 10);
    /// via.write(reg::T1C_H, 0); // load and start, one-shot
    ///
    /// via.clock(9);
    /// assert!(!via.irq_active());
    /// via.clock(1);
    /// assert!(via.irq_active());
    /// ```
    pub fn clock(&mut self, cycles: u32) {
        if self.timer1.clock(cycles, self.t1_free_run()) {
            self.ifr.insert(ViaInterrupts::TIMER1);
        }
        if self.t2_counting() && self.timer2.clock(cycles, false) {
            self.ifr.insert(ViaInterrupts::TIMER2);
        }
    }

    /// Whether the VIA is driving IRQ: `(IFR & IER & 0x7F) != 0`.
    pub fn irq_active(&self) -> bool {
        !self
            .ifr
            .intersection(self.ier)
            .difference(ViaInterrupts::IRQ)
            .is_empty()
    }

    /// IFR as read by the CPU, with bit 7 reflecting the IRQ output.
    pub fn ifr(&self) -> u8 {
        let mut ifr = self.ifr.difference(ViaInterrupts::IRQ);
        ifr.set(ViaInterrupts::IRQ, self.irq_active());
        ifr.bits()
    }

    /// IER as read by the CPU (bit 7 always set).
    pub fn ier(&self) -> u8 {
        self.ier.union(ViaInterrupts::IRQ).bits()
    }

    /// Auxiliary control register.
    pub fn acr(&self) -> u8 {
        self.acr
    }

    /// Peripheral control register.
    pub fn pcr(&self) -> u8 {
        self.pcr
    }

    /// Cycles until the next timer expiry, if one happens within `max_cycles`.
    ///
    /// Considers running Timer 1 and, when it is counting, Timer 2.
    pub fn cycles_until_next_interrupt(&self, max_cycles: u32) -> Option<u32> {
        let t1 = self.timer1.running.then_some(self.timer1.counter as u32);
        let t2 = (self.timer2.running && self.t2_counting()).then_some(self.timer2.counter as u32);

        [t1, t2]
            .into_iter()
            .flatten()
            .min()
            .filter(|&cycles| cycles <= max_cycles)
    }

    /// All 16 registers as seen by `peek`, for debuggers.
    pub fn registers(&self) -> [u8; 16] {
        let mut regs = [0u8; 16];
        for (offset, slot) in regs.iter_mut().enumerate() {
            *slot = self.peek(offset as u16);
        }
        regs
    }

    fn t1_free_run(&self) -> bool {
        self.acr & ACR_T1_FREE_RUN != 0
    }

    fn t2_counting(&self) -> bool {
        self.acr & ACR_T2_PULSE_COUNT == 0
    }

    fn write_ifr(&mut self, value: u8) {
        if value & 0x80 != 0 {
            self.ifr = ViaInterrupts::empty();
        } else {
            self.ifr.remove(ViaInterrupts::from_bits_retain(value));
        }
    }

    fn write_ier(&mut self, value: u8) {
        let bits = ViaInterrupts::from_bits_retain(value & 0x7F);
        if value & 0x80 != 0 {
            self.ier.insert(bits);
        } else {
            self.ier.remove(bits);
        }
    }
}

impl Device for Via {
    fn read(&mut self, offset: u16) -> u8 {
        let value = self.peek(offset);
        // Reading a counter's low byte acknowledges that timer
        match offset & 0x0F {
            reg::T1C_L => self.ifr.remove(ViaInterrupts::TIMER1),
            reg::T2C_L => self.ifr.remove(ViaInterrupts::TIMER2),
            _ => {}
        }
        value
    }

    fn peek(&self, offset: u16) -> u8 {
        match offset & 0x0F {
            reg::ORB => self.orb,
            reg::ORA | reg::ORA_NH => self.ora,
            reg::DDRB => self.ddrb,
            reg::DDRA => self.ddra,
            reg::T1C_L => self.timer1.counter as u8,
            reg::T1C_H => (self.timer1.counter >> 8) as u8,
            reg::T1L_L => self.timer1.latch as u8,
            reg::T1L_H => (self.timer1.latch >> 8) as u8,
            reg::T2C_L => self.timer2.counter as u8,
            reg::T2C_H => (self.timer2.counter >> 8) as u8,
            reg::SR => self.sr,
            reg::ACR => self.acr,
            reg::PCR => self.pcr,
            reg::IFR => self.ifr(),
            reg::IER => self.ier(),
            _ => unreachable!("offset masked to 4 bits"),
        }
    }

    fn write(&mut self, offset: u16, value: u8) {
        match offset & 0x0F {
            reg::ORB => self.orb = value,
            reg::ORA | reg::ORA_NH => self.ora = value,
            reg::DDRB => self.ddrb = value,
            reg::DDRA => self.ddra = value,
            reg::T1C_L | reg::T1L_L => self.timer1.set_latch_low(value),
            reg::T1C_H => {
                self.timer1.set_latch_high(value);
                self.timer1.start();
                self.ifr.remove(ViaInterrupts::TIMER1);
            }
            reg::T1L_H => {
                self.timer1.set_latch_high(value);
                self.ifr.remove(ViaInterrupts::TIMER1);
            }
            reg::T2C_L => self.timer2.set_latch_low(value),
            reg::T2C_H => {
                self.timer2.set_latch_high(value);
                self.timer2.start();
                self.ifr.remove(ViaInterrupts::TIMER2);
            }
            reg::SR => self.sr = value,
            reg::ACR => self.acr = value,
            reg::PCR => self.pcr = value,
            reg::IFR => self.write_ifr(value),
            reg::IER => self.write_ier(value),
            _ => unreachable!("offset masked to 4 bits"),
        }
    }

    fn size(&self) -> u16 {
        VIA_REGISTER_COUNT
    }

    fn tick(&mut self, cycles: u32) {
        self.clock(cycles);
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_interrupt_device(&self) -> Option<&dyn InterruptDevice> {
        Some(self)
    }
}

impl InterruptDevice for Via {
    fn has_interrupt(&self) -> bool {
        self.irq_active()
    }

    fn cycles_until_interrupt(&self, max_cycles: u32) -> Option<u32> {
        self.cycles_until_next_interrupt(max_cycles)
    }
}
