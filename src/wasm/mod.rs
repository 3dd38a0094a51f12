//! WebAssembly bindings for the lib65c02 system.
//!
//! This module provides JavaScript-callable interfaces to the emulator,
//! enabling browser front ends to drive the machine frame by frame.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::Emulator65C02;
