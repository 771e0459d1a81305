//! PNG readback helpers for tests.

use std::io::Cursor;

use median_cut::Rgba8;
use pretty_assertions::assert_eq;

/// One frame of a decoded indexed APNG.
#[derive(Debug)]
pub struct ReadFrame {
    pub indices: Vec<u8>,
    pub delay: (u16, u16),
    pub dispose_op: png::DisposeOp,
}

/// An indexed APNG read back with the png crate, without transformations.
#[derive(Debug)]
pub struct ReadAnimation {
    pub width: u32,
    pub height: u32,
    pub num_frames: u32,
    pub num_plays: u32,
    pub palette: Vec<Rgba8>,
    pub frames: Vec<ReadFrame>,
}

impl ReadAnimation {
    /// Colors of one frame resolved through the palette.
    pub fn colors(&self, frame: usize) -> Vec<Rgba8> {
        self.frames[frame]
            .indices
            .iter()
            .map(|&i| self.palette[i as usize])
            .collect()
    }
}

/// Decode an indexed (A)PNG, unpacking sub-byte rows into one index per pixel.
pub fn read_indexed_png(bytes: &[u8]) -> ReadAnimation {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info().unwrap();

    let info = reader.info();
    assert_eq!(info.color_type, png::ColorType::Indexed, "expected indexed PNG");
    let (width, height) = (info.width, info.height);
    let (num_frames, num_plays) = info
        .animation_control
        .map(|ac| (ac.num_frames, ac.num_plays))
        .unwrap_or((1, 0));

    let plte = info.palette.as_ref().expect("PLTE chunk").to_vec();
    let trns = info.trns.as_ref().map(|t| t.to_vec()).unwrap_or_default();
    let palette = plte
        .chunks_exact(3)
        .enumerate()
        .map(|(i, c)| Rgba8::new(c[0], c[1], c[2], trns.get(i).copied().unwrap_or(255)))
        .collect();

    let mut frames = Vec::new();
    let mut buf = vec![0; reader.output_buffer_size()];
    for _ in 0..num_frames {
        let output = reader.next_frame(&mut buf).unwrap();
        let bits = output.bit_depth as u8;
        let indices = unpack_rows(
            &buf[..output.buffer_size()],
            output.width as usize,
            output.line_size,
            bits,
        );
        let (delay, dispose_op) = reader
            .info()
            .frame_control
            .map(|fc| ((fc.delay_num, fc.delay_den), fc.dispose_op))
            .unwrap_or(((0, 0), png::DisposeOp::None));
        frames.push(ReadFrame {
            indices,
            delay,
            dispose_op,
        });
    }

    ReadAnimation {
        width,
        height,
        num_frames,
        num_plays,
        palette,
        frames,
    }
}

fn unpack_rows(data: &[u8], width: usize, line_size: usize, bits: u8) -> Vec<u8> {
    let mask = ((1u16 << bits) - 1) as u8;
    let per_byte = 8 / bits as usize;
    let mut indices = Vec::new();
    for row in data.chunks(line_size) {
        for x in 0..width {
            let byte = row[x / per_byte];
            let shift = 8 - bits as usize * (x % per_byte + 1);
            indices.push((byte >> shift) & mask);
        }
    }
    indices
}

/// Assert every pixel of `frame` resolves to `color`.
pub fn assert_solid(animation: &ReadAnimation, frame: usize, color: Rgba8) {
    let colors = animation.colors(frame);
    assert!(
        colors.iter().all(|&c| c == color),
        "frame {frame}: expected solid {color}, got {colors:?}"
    );
}
