// TMS9918A device model: port protocol, register file, VRAM address
// unit and frame timing.  Rendering lives in render.rs.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::palette::Rgb;

pub const VRAM_SIZE: usize = 0x4000;
pub const REGISTER_COUNT: usize = 8;
pub const FRAME_WIDTH: usize = 256;
pub const FRAME_HEIGHT: usize = 192;
pub const LINES_PER_FRAME: u16 = 262;
/// Status bit 7: frame flag, set when the beam enters vertical blank.
/// Bits 6..0 (5S, C, FS4..FS0) belong to the sprite system and read as
/// zero here.
pub const STATUS_VBLANK: u8 = 0x80;

/// The address latch is 14 bits; increments wrap 0x3FFF -> 0x0000.
const ADDR_MASK: u16 = 0x3FFF;
/// First line past the visible field; vblank starts here.
const VBLANK_LINE: u16 = FRAME_HEIGHT as u16;

// Command codes from the top two bits of the command word.
const CODE_VRAM_READ: u8 = 0;
const CODE_VRAM_WRITE: u8 = 1;

pub(crate) const TILE_SIZE: usize = 8;
pub(crate) const TILE_COLUMNS: usize = 32;
pub(crate) const TEXT_COLUMNS: usize = 40;
pub(crate) const TEXT_GLYPH_WIDTH: usize = 6;
pub(crate) const TEXT_LEFT_BORDER: usize = 8;

/// Which half of a two-byte control command the next write supplies.
#[derive(Clone, Copy, PartialEq, Eq, Debug, bincode::Encode, bincode::Decode)]
enum WritePhase {
    Low,
    High,
}

/// Screen mode selected by the M1/M2/M3 register bits.
///
/// `Undocumented` carries the raw (M3<<2)|(M2<<1)|M1 index for any bit
/// combination that does not name a documented mode.  Multicolor and
/// undocumented modes render as backdrop only.
#[derive(Clone, Copy, PartialEq, Eq, Debug, bincode::Encode, bincode::Decode)]
pub enum VideoMode {
    GraphicsI,
    GraphicsII,
    Text,
    Multicolor,
    Undocumented(u8),
}

#[derive(Clone, bincode::Encode, bincode::Decode)]
pub struct Vdp {
    vram: [u8; VRAM_SIZE],
    registers: [u8; REGISTER_COUNT],
    command_word: u16,
    address: u16,
    write_phase: WritePhase,
    read_buffer: u8,

    scanline: u16,
    in_vblank: bool,
    irq_pending: bool,
    frame_ready: bool,

    // Fields derived from the register file, refreshed on write.
    mode: VideoMode,
    display_enabled: bool,
    irq_enabled: bool,
    name_table_base: u16,
    color_table_base: u16,
    pattern_table_base: u16,
    text_color: u8,
    backdrop_color: u8,

    framebuffer: [Rgb; FRAME_WIDTH * FRAME_HEIGHT],
    line_buffer: [Rgb; FRAME_WIDTH],
}

impl Vdp {
    /// Power the chip on.  VRAM comes up with pseudo-random contents
    /// the way the real part does.  Set `TMS_VRAM_SEED` to make the
    /// fill reproducible without code changes.
    pub fn new() -> Self {
        match Self::env_vram_seed() {
            Some(seed) => Self::with_seed(seed),
            None => Self::from_rng(&mut rand::thread_rng()),
        }
    }

    /// Power on with a fixed VRAM fill, for deterministic tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(&mut StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: &mut dyn RngCore) -> Self {
        let mut vram = [0u8; VRAM_SIZE];
        rng.fill_bytes(&mut vram);
        Self {
            vram,
            registers: [0; REGISTER_COUNT],
            command_word: 0,
            address: 0,
            write_phase: WritePhase::Low,
            read_buffer: 0,
            scanline: 0,
            in_vblank: true, // power on inside vertical blank
            irq_pending: false,
            frame_ready: false,
            mode: VideoMode::GraphicsI,
            display_enabled: false,
            irq_enabled: false,
            name_table_base: 0,
            color_table_base: 0,
            pattern_table_base: 0,
            text_color: 0,
            backdrop_color: 0,
            framebuffer: [Rgb::BLACK; FRAME_WIDTH * FRAME_HEIGHT],
            line_buffer: [Rgb::BLACK; FRAME_WIDTH],
        }
    }

    /// Warm reset: registers, latches, timing and both pixel buffers go
    /// back to their power-on state.  VRAM contents survive.
    pub fn reset(&mut self) {
        self.registers.fill(0);
        self.command_word = 0;
        self.address = 0;
        self.write_phase = WritePhase::Low;
        self.read_buffer = 0;
        self.scanline = 0;
        self.in_vblank = true;
        self.irq_pending = false;
        self.frame_ready = false;
        self.mode = VideoMode::GraphicsI;
        self.display_enabled = false;
        self.irq_enabled = false;
        self.name_table_base = 0;
        self.color_table_base = 0;
        self.pattern_table_base = 0;
        self.text_color = 0;
        self.backdrop_color = 0;
        self.framebuffer.fill(Rgb::BLACK);
        self.line_buffer.fill(Rgb::BLACK);
    }

    /// Write to the control port.
    ///
    /// Commands are two bytes: data/address low first, then a byte whose
    /// top two bits select the operation (0 = VRAM read setup, 1 = VRAM
    /// write setup, 2/3 = register write).
    pub fn write_control(&mut self, data: u8) {
        match self.write_phase {
            WritePhase::Low => {
                self.command_word = (self.command_word & 0xFF00) | data as u16;
                self.address = self.command_word & ADDR_MASK;
                self.write_phase = WritePhase::High;
            }
            WritePhase::High => {
                self.command_word = (self.command_word & 0x00FF) | ((data as u16) << 8);
                self.address = self.command_word & ADDR_MASK;
                match (self.command_word >> 14) as u8 {
                    CODE_VRAM_READ => {
                        // Prime the read-ahead buffer so the first data
                        // read returns the byte at the setup address.
                        self.read_buffer = self.vram[self.address as usize];
                        self.increment_address();
                    }
                    CODE_VRAM_WRITE => {}
                    _ => {
                        let reg = ((self.command_word >> 8) & 0x07) as usize;
                        let value = (self.command_word & 0x00FF) as u8;
                        self.write_register(reg, value);
                    }
                }
                self.write_phase = WritePhase::Low;
            }
        }
    }

    /// Write to the data port: store at the address latch, mirror into
    /// the read-ahead buffer, increment.
    pub fn write_data(&mut self, data: u8) {
        self.write_phase = WritePhase::Low;
        self.vram[self.address as usize] = data;
        self.read_buffer = data;
        self.increment_address();
    }

    /// Read from the data port.  Returns the read-ahead buffer and
    /// refills it from the address latch, which gives the chip's
    /// one-byte-behind read behavior: after a read setup to A, the k-th
    /// read returns vram[A + k - 1].
    pub fn read_data(&mut self) -> u8 {
        self.write_phase = WritePhase::Low;
        let data = self.read_buffer;
        self.read_buffer = self.vram[self.address as usize];
        self.increment_address();
        data
    }

    /// Read the status port.  Clears the frame flag and the control
    /// write phase.  The interrupt request line is consumed separately,
    /// through [`Vdp::consume_interrupt`].
    pub fn read_status(&mut self) -> u8 {
        let status = if self.in_vblank { STATUS_VBLANK } else { 0 };
        self.in_vblank = false;
        self.write_phase = WritePhase::Low;
        status
    }

    /// Return and clear the interrupt request latch.  One-shot: a host
    /// forwards a `true` result to its CPU model as a single IRQ.
    pub fn consume_interrupt(&mut self) -> bool {
        let pending = self.irq_pending;
        self.irq_pending = false;
        pending
    }

    /// Advance the chip by one scanline.  262 calls make one frame.
    pub fn tick(&mut self) {
        if self.scanline == VBLANK_LINE {
            self.in_vblank = true;
            self.frame_ready = true;
            if self.irq_enabled {
                self.irq_pending = true;
            }
        }
        if self.scanline < VBLANK_LINE {
            self.render_scanline(self.scanline);
        }
        self.scanline += 1;
        if self.scanline == LINES_PER_FRAME {
            self.scanline = 0;
        }
    }

    /// Return and clear the frame latch.  Set once per frame, when the
    /// beam enters vertical blank; hosts poll it to know when the
    /// framebuffer holds a complete picture.
    pub fn take_frame_ready(&mut self) -> bool {
        let ready = self.frame_ready;
        self.frame_ready = false;
        ready
    }

    /// Borrow the current picture.  Row-major, origin top-left.
    pub fn framebuffer(&self) -> &[Rgb; FRAME_WIDTH * FRAME_HEIGHT] {
        &self.framebuffer
    }

    pub fn mode(&self) -> VideoMode {
        self.mode
    }

    /// Current value of the free-running scanline counter.
    pub fn scanline(&self) -> u16 {
        self.scanline
    }

    pub fn width(&self) -> usize {
        FRAME_WIDTH
    }

    pub fn height(&self) -> usize {
        FRAME_HEIGHT
    }

    pub fn scanlines_per_frame(&self) -> u16 {
        LINES_PER_FRAME
    }

    fn write_register(&mut self, reg: usize, value: u8) {
        if reg >= REGISTER_COUNT {
            return;
        }
        #[cfg(feature = "trace_hw")]
        eprintln!("  VDP R{} <= {:02X}", reg, value);
        self.registers[reg] = value;
        match reg {
            0 => self.refresh_mode(),
            1 => {
                self.display_enabled = value & 0x40 != 0;
                self.irq_enabled = value & 0x20 != 0;
                self.refresh_mode();
                // Enabling the frame interrupt while vblank is already
                // latched raises the request at once.
                if self.in_vblank && self.irq_enabled {
                    self.irq_pending = true;
                }
            }
            2 => self.name_table_base = ((value as u16) & 0x0F) << 10,
            3 => self.color_table_base = (value as u16) << 6,
            4 => self.pattern_table_base = ((value as u16) & 0x07) << 11,
            7 => {
                self.text_color = value >> 4;
                self.backdrop_color = value & 0x0F;
            }
            // Registers 5 and 6 hold the sprite attribute and pattern
            // table bases; stored, unused until sprites are implemented.
            _ => {}
        }
    }

    // Mode bits: M1 = R1 bit 4, M2 = R0 bit 1, M3 = R1 bit 3.
    fn refresh_mode(&mut self) {
        let m1 = self.registers[1] & 0x10 != 0;
        let m2 = self.registers[0] & 0x02 != 0;
        let m3 = self.registers[1] & 0x08 != 0;
        let mode = match (m1, m2, m3) {
            (false, false, false) => VideoMode::GraphicsI,
            (false, true, false) => VideoMode::GraphicsII,
            (true, false, false) => VideoMode::Text,
            (false, false, true) => VideoMode::Multicolor,
            _ => {
                let index = ((m3 as u8) << 2) | ((m2 as u8) << 1) | m1 as u8;
                VideoMode::Undocumented(index)
            }
        };
        #[cfg(feature = "trace_hw")]
        if mode != self.mode {
            eprintln!("  VDP mode -> {:?}", mode);
        }
        self.mode = mode;
    }

    fn increment_address(&mut self) {
        self.address = (self.address + 1) & ADDR_MASK;
    }
}

mod env;
mod render;
