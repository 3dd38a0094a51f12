//! # Video Timing
//!
//! Beam position and blanking/sync state for the system's 128x64 display.
//!
//! The circuit advances two pixels per system clock. A scanline is 160 pixels
//! (128 visible, then front porch, sync and back porch) and a frame is 144
//! scanlines (128 visible, then front porch, sync and back porch). Each visible
//! pixel row is shown on two consecutive scanlines, so video RAM holds 64 rows
//! of 128 bytes at 0x2000.
//!
//! Entering vertical blank is the only event: it sets the frame-ready flag and
//! asks for an NMI, unless the previous frame has not been acknowledged yet.

/// Pixels advanced per system clock cycle.
pub const PIXELS_PER_CYCLE: u32 = 2;

/// Visible pixels per scanline.
pub const H_VISIBLE: u32 = 128;
/// Horizontal front porch, in pixels.
pub const H_FRONT_PORCH: u32 = 8;
/// Horizontal sync width, in pixels.
pub const H_SYNC: u32 = 16;
/// Horizontal back porch, in pixels.
pub const H_BACK_PORCH: u32 = 8;
/// Total pixels per scanline.
pub const H_TOTAL: u32 = H_VISIBLE + H_FRONT_PORCH + H_SYNC + H_BACK_PORCH;

/// Visible scanlines per frame.
pub const V_VISIBLE: u32 = 128;
/// Vertical front porch, in scanlines.
pub const V_FRONT_PORCH: u32 = 2;
/// Vertical sync width, in scanlines.
pub const V_SYNC: u32 = 4;
/// Vertical back porch, in scanlines.
pub const V_BACK_PORCH: u32 = 10;
/// Total scanlines per frame.
pub const V_TOTAL: u32 = V_VISIBLE + V_FRONT_PORCH + V_SYNC + V_BACK_PORCH;

/// Addressable pixels per row of video RAM.
pub const SCREEN_WIDTH: u32 = H_VISIBLE;
/// Addressable rows of video RAM (each shown on two scanlines).
pub const SCREEN_HEIGHT: u32 = V_VISIBLE / 2;

/// System clock cycles per scanline.
pub const CYCLES_PER_SCANLINE: u32 = H_TOTAL / PIXELS_PER_CYCLE;
/// System clock cycles per frame.
pub const CYCLES_PER_FRAME: u32 = H_TOTAL * V_TOTAL / PIXELS_PER_CYCLE;

const PIXELS_PER_FRAME: u64 = (H_TOTAL * V_TOTAL) as u64;
const VBLANK_START: u64 = (V_VISIBLE * H_TOTAL) as u64;

/// Beam counters and the signals derived from them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoTiming {
    pixel_x: u32,
    scanline: u32,
    pixel_y: u32,

    hblank: bool,
    hsync: bool,
    vblank: bool,
    vsync: bool,
    visible: bool,

    frame_ready: bool,
    frames: u64,
}

impl VideoTiming {
    /// Beam at the top-left visible pixel, no frame pending.
    pub fn new() -> Self {
        let mut timing = Self::default();
        timing.update_signals();
        timing
    }

    /// Return to the top of the frame and forget any pending frame.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advance the beam by `cycles` system cycles.
    ///
    /// Returns true when vertical blank was entered during this call and the
    /// frame-ready flag was clear, meaning the caller should raise NMI.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib65c02::video::{VideoTiming, CYCLES_PER_FRAME};
    ///
    /// let mut video = VideoTiming::new();
    /// assert!(video.tick(CYCLES_PER_FRAME));
    /// assert!(video.frame_ready());
    ///
    /// // Not acknowledged: no second request
    /// assert!(!video.tick(CYCLES_PER_FRAME));
    ///
    /// video.frame_drawn();
    /// assert!(video.tick(CYCLES_PER_FRAME));
    /// ```
    pub fn tick(&mut self, cycles: u32) -> bool {
        let before = self.position();
        let after = before + cycles as u64 * PIXELS_PER_CYCLE as u64;

        // vblank starts once per frame at VBLANK_START; count starts in (before, after]
        let crossings = Self::vblank_index(after) - Self::vblank_index(before);

        let position = after % PIXELS_PER_FRAME;
        self.scanline = (position / H_TOTAL as u64) as u32;
        self.pixel_x = (position % H_TOTAL as u64) as u32;
        self.pixel_y = self.scanline / 2;
        self.update_signals();

        if crossings > 0 && !self.frame_ready {
            self.frame_ready = true;
            return true;
        }
        false
    }

    /// Cycles until the beam next enters vertical blank.
    pub fn cycles_until_vblank(&self) -> u32 {
        let position = self.position();
        let mut pixels = (VBLANK_START + PIXELS_PER_FRAME - position) % PIXELS_PER_FRAME;
        if pixels == 0 {
            pixels = PIXELS_PER_FRAME;
        }
        pixels.div_ceil(PIXELS_PER_CYCLE as u64) as u32
    }

    /// Acknowledge a ready frame: clears the flag and counts the frame.
    pub fn frame_drawn(&mut self) {
        if self.frame_ready {
            self.frame_ready = false;
            self.frames += 1;
        }
    }

    /// A frame finished and has not been acknowledged.
    pub fn frame_ready(&self) -> bool {
        self.frame_ready
    }

    /// Frames acknowledged through [`VideoTiming::frame_drawn`].
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Horizontal beam position in pixels (0..H_TOTAL).
    pub fn pixel_x(&self) -> u32 {
        self.pixel_x
    }

    /// Visible row being scanned (advances every second scanline).
    pub fn pixel_y(&self) -> u32 {
        self.pixel_y
    }

    /// Scanline (0..V_TOTAL).
    pub fn scanline(&self) -> u32 {
        self.scanline
    }

    /// In horizontal blank.
    pub fn hblank(&self) -> bool {
        self.hblank
    }

    /// In horizontal sync.
    pub fn hsync(&self) -> bool {
        self.hsync
    }

    /// In vertical blank.
    pub fn vblank(&self) -> bool {
        self.vblank
    }

    /// In vertical sync.
    pub fn vsync(&self) -> bool {
        self.vsync
    }

    /// Outside both blanking intervals.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Video RAM offset of the pixel under the beam, when it is visible.
    pub fn vram_offset(&self) -> Option<u16> {
        self.visible
            .then(|| (self.pixel_y * SCREEN_WIDTH + self.pixel_x) as u16)
    }

    fn position(&self) -> u64 {
        self.scanline as u64 * H_TOTAL as u64 + self.pixel_x as u64
    }

    /// Number of vblank starts at or before `position` (may be -1 before the first).
    fn vblank_index(position: u64) -> i64 {
        (position as i64 - VBLANK_START as i64).div_euclid(PIXELS_PER_FRAME as i64)
    }

    fn update_signals(&mut self) {
        let x = self.pixel_x;
        let line = self.scanline;

        self.hblank = x >= H_VISIBLE;
        self.hsync = (H_VISIBLE + H_FRONT_PORCH..H_VISIBLE + H_FRONT_PORCH + H_SYNC).contains(&x);
        self.vblank = line >= V_VISIBLE;
        self.vsync =
            (V_VISIBLE + V_FRONT_PORCH..V_VISIBLE + V_FRONT_PORCH + V_SYNC).contains(&line);
        self.visible = !self.hblank && !self.vblank;
    }
}
