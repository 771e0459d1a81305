//! Test fixtures: frame colors and PNG files on disk.

use std::path::{Path, PathBuf};

use median_cut::Rgba8;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const RED: Rgba8 = Rgba8::opaque(255, 0, 0);
pub const GREEN: Rgba8 = Rgba8::opaque(0, 255, 0);
pub const BLUE: Rgba8 = Rgba8::opaque(0, 0, 255);

/// Write an 8-bit RGBA PNG and return its path.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32, pixels: &[Rgba8]) -> PathBuf {
    assert_eq!(pixels.len(), (width * height) as usize, "fixture size mismatch");
    let path = dir.join(name);
    let data: Vec<u8> = pixels.iter().flat_map(|p| p.to_bytes()).collect();

    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&data).unwrap();
    }
    std::fs::write(&path, buf).unwrap();
    path
}

/// Write a single-color frame.
pub fn write_solid(dir: &Path, name: &str, width: u32, height: u32, color: Rgba8) -> PathBuf {
    let pixels = vec![color; (width * height) as usize];
    write_png(dir, name, width, height, &pixels)
}

/// Red, green and blue 2x2 frames, in that order.
pub fn write_rgb_frames(dir: &Path) -> Vec<PathBuf> {
    vec![
        write_solid(dir, "red.png", 2, 2, RED),
        write_solid(dir, "green.png", 2, 2, GREEN),
        write_solid(dir, "blue.png", 2, 2, BLUE),
    ]
}

/// A horizontal gradient with `shift` added to every red value.
pub fn gradient(width: u32, height: u32, shift: u8) -> Vec<Rgba8> {
    (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                Rgba8::opaque(
                    (x * 255 / width.max(1)) as u8 ^ shift,
                    (y * 255 / height.max(1)) as u8,
                    128,
                )
            })
        })
        .collect()
}

/// Seeded random opaque pixels drawn from a small set of channel levels.
pub fn noise(width: u32, height: u32, seed: u64) -> Vec<Rgba8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..width * height)
        .map(|_| {
            Rgba8::opaque(
                rng.gen_range(0..8u8) * 32,
                rng.gen_range(0..8u8) * 32,
                rng.gen_range(0..4u8) * 64,
            )
        })
        .collect()
}
