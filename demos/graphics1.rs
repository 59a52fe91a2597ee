/// Graphics I demo: program the tile tables through the byte ports,
/// run one frame and write it out as graphics1.ppm.
use std::error::Error;
use std::fs::File;
use std::io::Write;

use vdp9918::{Vdp, FRAME_HEIGHT, FRAME_WIDTH, LINES_PER_FRAME, VRAM_SIZE};

// 8x8 glyphs for the characters the demo prints.
const GLYPHS: [(u8, [u8; 8]); 4] = [
    (b'H', [0x88, 0x88, 0x88, 0xF8, 0x88, 0x88, 0x88, 0x00]),
    (b'E', [0xF8, 0x80, 0x80, 0xF0, 0x80, 0x80, 0xF8, 0x00]),
    (b'L', [0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0xF8, 0x00]),
    (b'O', [0x70, 0x88, 0x88, 0x88, 0x88, 0x88, 0x70, 0x00]),
];

fn write_register(vdp: &mut Vdp, reg: u8, value: u8) {
    vdp.write_control(value);
    vdp.write_control(0x80 | reg);
}

fn set_write_address(vdp: &mut Vdp, addr: u16) {
    vdp.write_control((addr & 0x00FF) as u8);
    vdp.write_control(((addr >> 8) as u8 & 0x3F) | 0x40);
}

fn run_frame(vdp: &mut Vdp) {
    for _ in 0..LINES_PER_FRAME {
        vdp.tick();
        // Service the frame interrupt the way a real host would.
        if vdp.consume_interrupt() {
            vdp.read_status();
        }
    }
}

fn write_ppm(path: &str, vdp: &Vdp) -> Result<(), Box<dyn Error>> {
    let mut file = File::create(path)?;
    writeln!(file, "P6\n{} {}\n255", FRAME_WIDTH, FRAME_HEIGHT)?;
    for pixel in vdp.framebuffer().iter() {
        file.write_all(&[pixel.red, pixel.green, pixel.blue])?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut vdp = Vdp::new();

    // Clear the random power-on VRAM.
    set_write_address(&mut vdp, 0x0000);
    for _ in 0..VRAM_SIZE {
        vdp.write_data(0x00);
    }

    // Patterns at 0x0800, names at 0x1400, colors at 0x2000.
    write_register(&mut vdp, 0, 0x00);
    write_register(&mut vdp, 4, 0x01);
    write_register(&mut vdp, 2, 0x05);
    write_register(&mut vdp, 3, 0x80);
    write_register(&mut vdp, 7, 0xF4);

    for (ch, rows) in GLYPHS {
        set_write_address(&mut vdp, 0x0800 + ch as u16 * 8);
        for row in rows {
            vdp.write_data(row);
        }
    }

    // White on dark blue for every pattern group.
    set_write_address(&mut vdp, 0x2000);
    for _ in 0..0x20 {
        vdp.write_data(0xF4);
    }

    // Print on the second tile row.
    set_write_address(&mut vdp, 0x1400 + 32);
    for ch in *b"HELLO" {
        vdp.write_data(ch);
    }

    // Display on, frame interrupt enabled.
    write_register(&mut vdp, 1, 0xE0);

    run_frame(&mut vdp);
    write_ppm("graphics1.ppm", &vdp)?;
    println!("wrote graphics1.ppm");
    Ok(())
}
