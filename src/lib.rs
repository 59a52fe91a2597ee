// TMS9918A VDP core.
//
// The chip is driven through two byte ports (control and data) plus a
// status read, ticked once per scanline, and renders into a fixed
// 256x192 RGB framebuffer that hosts borrow for blitting.  Window
// creation, input and file I/O are host concerns; see demos/ for
// example hosts.

mod palette;
mod vdp;

pub use palette::{color, Rgb, PALETTE};
pub use vdp::{
    Vdp, VideoMode, FRAME_HEIGHT, FRAME_WIDTH, LINES_PER_FRAME, REGISTER_COUNT, STATUS_VBLANK,
    VRAM_SIZE,
};
