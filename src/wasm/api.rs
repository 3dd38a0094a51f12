//! WASM API for the 65C02 system.
//!
//! Provides JavaScript-callable interfaces for frame stepping, state
//! inspection, ROM loading, video RAM access and disassembly. Rendering the
//! video RAM is left to the page.

use crate::disassembler::decoder::instruction_at;
use crate::disassembler::formatter::format_instruction;
use crate::{System, SystemConfig};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl From<crate::EmulatorError> for JsError {
    fn from(err: crate::EmulatorError) -> Self {
        JsError::new(&err.to_string())
    }
}

/// One disassembled instruction
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct DisassemblyLine {
    address: u16,
    bytes: Vec<u8>,
    text: String,
}

#[wasm_bindgen]
impl DisassemblyLine {
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> u16 {
        self.address
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Emulator65C02 {
    system: System,
}

#[wasm_bindgen]
impl Emulator65C02 {
    /// Power on a system whose undefined RAM and registers derive from `seed`
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> Result<Emulator65C02, JsError> {
        let config = SystemConfig::default().with_seed(seed as u64);
        Ok(Emulator65C02 {
            system: System::new(config)?,
        })
    }

    /// Copy a ROM image to the start of ROM (0xE000) and reset
    pub fn load_rom(&mut self, image: &[u8]) -> usize {
        let copied = self.system.load_rom(image, 0, image.len());
        self.system.reset();
        copied
    }

    pub fn reset(&mut self) {
        self.system.reset();
    }

    pub fn hard_reset(&mut self) {
        self.system.hard_reset();
    }

    /// Run one instruction and return its cycle cost
    pub fn step(&mut self) -> u32 {
        self.system.step()
    }

    /// Run exactly `cycles` cycles
    pub fn clock(&mut self, cycles: u32) -> u32 {
        self.system.clock(cycles)
    }

    /// Run one video frame
    pub fn clock_until_next_frame(&mut self) -> u32 {
        self.system.clock_until_next_frame()
    }

    #[wasm_bindgen(getter)]
    pub fn frame_ready(&self) -> bool {
        self.system.frame_ready()
    }

    pub fn frame_drawn(&mut self) {
        self.system.frame_drawn();
    }

    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> f64 {
        self.system.frames() as f64
    }

    /// Copy of video RAM (128x64, one byte per pixel)
    pub fn video_ram(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.system.video_ram())
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.system.cpu().a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.system.cpu().x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.system.cpu().y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.system.cpu().pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.system.cpu().sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.system.cpu().status().bits()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.system.cpu().cycles() as f64 // Convert u64 to f64 for JavaScript
    }

    #[wasm_bindgen(getter)]
    pub fn waiting(&self) -> bool {
        self.system.cpu().is_waiting()
    }

    #[wasm_bindgen(getter)]
    pub fn stopped(&self) -> bool {
        self.system.cpu().is_stopped()
    }

    #[wasm_bindgen(getter)]
    pub fn suspended(&self) -> bool {
        self.system.cpu().is_suspended()
    }

    /// Read a byte without side effects
    pub fn read_memory(&self, addr: u16) -> u8 {
        self.system.peek(addr)
    }

    /// Read a 256-byte page without side effects
    pub fn get_memory_page(&self, page: u8) -> Vec<u8> {
        let start = (page as u16) << 8;
        (0..256).map(|i| self.system.peek(start + i)).collect()
    }

    /// Disassemble `count` instructions starting at `start_addr`
    pub fn disassemble(&self, start_addr: u16, count: u32) -> Vec<JsValue> {
        let bus = self.system.bus();
        let mut address = start_addr;

        (0..count)
            .map(|_| {
                let instr = instruction_at(bus, address);
                address = address.wrapping_add(instr.size_bytes as u16);

                let mut bytes = vec![instr.opcode];
                bytes.extend_from_slice(&instr.operand_bytes);
                JsValue::from(DisassemblyLine {
                    address: instr.address,
                    bytes,
                    text: format_instruction(&instr),
                })
            })
            .collect()
    }

    /// Disassemble the instruction at PC
    pub fn disassemble_pc(&self) -> String {
        self.system.disassemble_pc()
    }
}
