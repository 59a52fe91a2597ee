/// One framebuffer pixel.  Channels are laid out red, green, blue so a
/// `&[Rgb]` reinterprets directly as a 24-bit RGB surface.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, bincode::Encode, bincode::Decode)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const BLACK: Rgb = rgb(0, 0, 0);
}

const fn rgb(red: u8, green: u8, blue: u8) -> Rgb {
    Rgb { red, green, blue }
}

/// The fixed TMS9918A color set.  Entry 0 is the transparent slot; the
/// renderer substitutes the backdrop color before any pixel with it
/// reaches the framebuffer.
pub const PALETTE: [Rgb; 16] = [
    rgb(0, 0, 0),       // transparent
    rgb(0, 0, 0),       // black
    rgb(33, 200, 66),   // medium green
    rgb(94, 200, 120),  // light green
    rgb(84, 85, 237),   // dark blue
    rgb(125, 118, 252), // light blue
    rgb(212, 82, 77),   // dark red
    rgb(66, 235, 245),  // cyan
    rgb(252, 85, 84),   // medium red
    rgb(255, 121, 120), // light red
    rgb(212, 193, 84),  // dark yellow
    rgb(230, 206, 128), // light yellow
    rgb(33, 176, 59),   // dark green
    rgb(201, 91, 186),  // magenta
    rgb(204, 204, 204), // gray
    rgb(255, 255, 255), // white
];

/// Look up a palette entry.  Indices are masked to the low four bits.
#[inline]
pub fn color(index: u8) -> Rgb {
    PALETTE[(index & 0x0F) as usize]
}
