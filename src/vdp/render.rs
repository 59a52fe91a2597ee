// Per-scanline background rendering.  Each visible line is produced
// into the line buffer and committed into the framebuffer row given by
// the caller; the line buffer is cleared to black after every commit.

use crate::palette::{color, Rgb};

use super::{
    Vdp, VideoMode, FRAME_HEIGHT, FRAME_WIDTH, TEXT_COLUMNS, TEXT_GLYPH_WIDTH, TEXT_LEFT_BORDER,
    TILE_COLUMNS, TILE_SIZE,
};

impl Vdp {
    pub(super) fn render_scanline(&mut self, line: u16) {
        if !self.display_enabled && !Self::env_force_display() {
            self.fill_backdrop();
            self.commit_line(line);
            return;
        }

        self.fill_backdrop();
        match self.mode {
            VideoMode::GraphicsI => self.render_graphics1(line),
            VideoMode::GraphicsII => self.render_graphics2(line),
            VideoMode::Text => self.render_text(line),
            // Multicolor is not implemented; undocumented combinations
            // have no defined layout.  Both show the backdrop.
            VideoMode::Multicolor | VideoMode::Undocumented(_) => {
                #[cfg(feature = "trace_hw")]
                if line == 0 {
                    eprintln!("  VDP unrenderable mode {:?}, showing backdrop", self.mode);
                }
            }
        }
        self.commit_line(line);
    }

    fn fill_backdrop(&mut self) {
        self.line_buffer.fill(color(self.backdrop_color));
    }

    /// 32x24 tiles of 8x8 pixels; one foreground/background color pair
    /// per group of eight consecutive pattern numbers.
    fn render_graphics1(&mut self, line: u16) {
        let row_base = (line as usize >> 3) * TILE_COLUMNS;
        let tile_row = (line & 7) as usize;
        let name_base = self.name_table_base as usize;
        let color_base = self.color_table_base as usize;
        let pattern_base = self.pattern_table_base as usize;

        for tile_col in 0..TILE_COLUMNS {
            let name = self.vram[name_base + row_base + tile_col] as usize;
            let pattern = self.vram[pattern_base + name * TILE_SIZE + tile_row];
            let color_pair = self.vram[color_base + name / 8];
            for pixel in 0..TILE_SIZE {
                let mut index = if pattern & (0x80 >> pixel) != 0 {
                    color_pair >> 4
                } else {
                    color_pair & 0x0F
                };
                if index == 0 {
                    index = self.backdrop_color;
                }
                self.set_pixel(tile_col * TILE_SIZE + pixel, color(index));
            }
        }
    }

    /// 40 columns of 6-pixel glyphs between 8-pixel side borders.  The
    /// whole screen uses the R7 text/backdrop color pair; only the left
    /// six bits of each pattern byte are shown.
    fn render_text(&mut self, line: u16) {
        let row_base = (line as usize >> 3) * TEXT_COLUMNS;
        let tile_row = (line & 7) as usize;
        let name_base = self.name_table_base as usize;
        let pattern_base = self.pattern_table_base as usize;
        let text_color = if self.text_color == 0 {
            self.backdrop_color
        } else {
            self.text_color
        };
        let foreground = color(text_color);
        let background = color(self.backdrop_color);

        for text_col in 0..TEXT_COLUMNS {
            let name = self.vram[name_base + row_base + text_col] as usize;
            let pattern = self.vram[pattern_base + name * TILE_SIZE + tile_row];
            for pixel in 0..TEXT_GLYPH_WIDTH {
                let rgb = if pattern & (0x80 >> pixel) != 0 {
                    foreground
                } else {
                    background
                };
                self.set_pixel(text_col * TEXT_GLYPH_WIDTH + TEXT_LEFT_BORDER + pixel, rgb);
            }
        }
    }

    /// Bitmap mode: the same 32x24 name grid as Graphics I, but the
    /// pattern and color tables grow to 6144 bytes, one 2048-byte bank
    /// per vertical third of the screen, and every pattern row carries
    /// its own color pair.
    ///
    /// R4 bit 2 picks the pattern table half and R4 bits 0..1 gate the
    /// upper bits of the character index; R3 bit 7 and bits 0..6 do the
    /// same for the color table.  Masked-out index bits fold the thirds
    /// onto each other, which some titles rely on.
    fn render_graphics2(&mut self, line: u16) {
        let row_base = (line as usize >> 3) * TILE_COLUMNS;
        let tile_row = (line & 7) as usize;
        let name_base = self.name_table_base as usize;
        let r3 = self.registers[3] as usize;
        let r4 = self.registers[4] as usize;
        let pattern_base = (r4 & 0x04) << 11;
        let pattern_mask = ((r4 & 0x03) << 8) | 0xFF;
        let color_base = (r3 & 0x80) << 6;
        let color_mask = ((r3 & 0x7F) << 3) | 0x07;
        // 256 characters per screen third.
        let segment = (line as usize >> 6) << 8;

        for tile_col in 0..TILE_COLUMNS {
            let name = self.vram[name_base + row_base + tile_col] as usize;
            let character = segment + name;
            let pattern =
                self.vram[pattern_base + (character & pattern_mask) * TILE_SIZE + tile_row];
            let color_pair =
                self.vram[color_base + (character & color_mask) * TILE_SIZE + tile_row];
            for pixel in 0..TILE_SIZE {
                let mut index = if pattern & (0x80 >> pixel) != 0 {
                    color_pair >> 4
                } else {
                    color_pair & 0x0F
                };
                if index == 0 {
                    index = self.backdrop_color;
                }
                self.set_pixel(tile_col * TILE_SIZE + pixel, color(index));
            }
        }
    }

    fn set_pixel(&mut self, x: usize, rgb: Rgb) {
        if x < FRAME_WIDTH {
            self.line_buffer[x] = rgb;
        }
    }

    /// Copy the line buffer into framebuffer row `line` and clear it
    /// for the next line.
    fn commit_line(&mut self, line: u16) {
        let line = line as usize;
        if line >= FRAME_HEIGHT {
            return;
        }
        let start = line * FRAME_WIDTH;
        self.framebuffer[start..start + FRAME_WIDTH].copy_from_slice(&self.line_buffer);
        self.line_buffer.fill(Rgb::BLACK);
    }
}
