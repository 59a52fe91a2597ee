/// Graphics II demo: bitmap pixel plotting through the data port, one
/// frame to graphics2.ppm, then a full VRAM dump read back through the
/// data port into graphics2_vram.bin.
use std::error::Error;
use std::fs::File;
use std::io::Write;

use vdp9918::{Vdp, FRAME_HEIGHT, FRAME_WIDTH, LINES_PER_FRAME, VRAM_SIZE};

fn write_register(vdp: &mut Vdp, reg: u8, value: u8) {
    vdp.write_control(value);
    vdp.write_control(0x80 | reg);
}

fn set_write_address(vdp: &mut Vdp, addr: u16) {
    vdp.write_control((addr & 0x00FF) as u8);
    vdp.write_control(((addr >> 8) as u8 & 0x3F) | 0x40);
}

fn set_read_address(vdp: &mut Vdp, addr: u16) {
    vdp.write_control((addr & 0x00FF) as u8);
    vdp.write_control((addr >> 8) as u8 & 0x3F);
}

/// With the name table holding 0..255 per third and both index masks
/// wide open, the pattern table is a linear 256x192 bitmap: one byte
/// per 8-pixel span.
fn plot_pixel(vdp: &mut Vdp, x: u16, y: u16) {
    let addr = (x / 8) * 8 + (y / 8) * 256 + y % 8;
    set_read_address(vdp, addr);
    let row = vdp.read_data() | (0x80 >> (x % 8));
    set_write_address(vdp, addr);
    vdp.write_data(row);
}

fn run_frame(vdp: &mut Vdp) {
    for _ in 0..LINES_PER_FRAME {
        vdp.tick();
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

    set_write_address(&mut vdp, 0x0000);
    for _ in 0..VRAM_SIZE {
        vdp.write_data(0x00);
    }

    // Bitmap layout: patterns at 0x0000, colors at 0x2000, names at
    // 0x3800, full index masks in R3/R4.
    write_register(&mut vdp, 0, 0x02);
    write_register(&mut vdp, 2, 0x0E);
    write_register(&mut vdp, 3, 0xFF);
    write_register(&mut vdp, 4, 0x03);
    write_register(&mut vdp, 7, 0x04);

    // White on dark blue across the whole color table.
    set_write_address(&mut vdp, 0x2000);
    for _ in 0..0x1800 {
        vdp.write_data(0xF4);
    }

    // Identity name table, 0..255 repeated per screen third.
    set_write_address(&mut vdp, 0x3800);
    for i in 0..768u16 {
        vdp.write_data((i & 0xFF) as u8);
    }

    // A box with a cross through it, centered on the screen.
    for offset in 0..64 {
        plot_pixel(&mut vdp, 96 + offset, 64);
        plot_pixel(&mut vdp, 96 + offset, 127);
        plot_pixel(&mut vdp, 96, 64 + offset);
        plot_pixel(&mut vdp, 159, 64 + offset);
        plot_pixel(&mut vdp, 96 + offset, 64 + offset);
        plot_pixel(&mut vdp, 159 - offset, 64 + offset);
    }

    // Display on, frame interrupt enabled.
    write_register(&mut vdp, 1, 0xE0);

    run_frame(&mut vdp);
    write_ppm("graphics2.ppm", &vdp)?;
    println!("wrote graphics2.ppm");

    // Sequential dump of all 16 KiB through the data port.
    set_read_address(&mut vdp, 0x0000);
    let mut dump = Vec::with_capacity(VRAM_SIZE);
    for _ in 0..VRAM_SIZE {
        dump.push(vdp.read_data());
    }
    File::create("graphics2_vram.bin")?.write_all(&dump)?;
    println!("wrote graphics2_vram.bin");
    Ok(())
}
