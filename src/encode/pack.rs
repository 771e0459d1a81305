//! Indexed PNG row packing.

use median_cut::{IndexedFrame, Palette};

use crate::error::EncodeError;

/// Smallest PNG bit depth that can address `palette_len` entries.
pub fn bit_depth_for(palette_len: usize) -> (png::BitDepth, u8) {
    match palette_len {
        0..=2 => (png::BitDepth::One, 1),
        3..=4 => (png::BitDepth::Two, 2),
        5..=16 => (png::BitDepth::Four, 4),
        _ => (png::BitDepth::Eight, 8),
    }
}

/// Pack palette indices into N-bit PNG row data (1, 2, 4 or 8 bits per pixel).
///
/// Each row starts on a byte boundary; unused low bits of a row's last byte
/// are zero.
pub fn pack_indices(indices: &[u8], width: usize, bits: u8) -> Vec<u8> {
    if bits == 8 || width == 0 {
        return indices.to_vec();
    }
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = width.div_ceil(pixels_per_byte);
    let height = indices.len() / width;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in indices.chunks(width) {
        let mut byte = 0u8;
        for (i, &idx) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= (idx & mask) << shift;

            if (i % pixels_per_byte) == pixels_per_byte - 1 || i == row.len() - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
    }

    packed
}

/// Encode a single frame as a standalone indexed PNG.
pub fn encode_indexed_png(palette: &Palette, frame: &IndexedFrame) -> Result<Vec<u8>, EncodeError> {
    let (depth, bits) = bit_depth_for(palette.len());
    let packed = pack_indices(frame.indices(), frame.width(), bits);

    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, frame.width() as u32, frame.height() as u32);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(depth);
        encoder.set_palette(palette.to_rgb_bytes());
        if let Some(trns) = palette.to_alpha_bytes() {
            encoder.set_trns(trns);
        }
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&packed)?;
        writer.finish()?;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bit_depth_for_palette_sizes() {
        assert_eq!(bit_depth_for(1).1, 1);
        assert_eq!(bit_depth_for(2).1, 1);
        assert_eq!(bit_depth_for(3).1, 2);
        assert_eq!(bit_depth_for(4).1, 2);
        assert_eq!(bit_depth_for(5).1, 4);
        assert_eq!(bit_depth_for(16).1, 4);
        assert_eq!(bit_depth_for(17).1, 8);
        assert_eq!(bit_depth_for(256).1, 8);
    }

    #[test]
    fn test_pack_one_bit_pads_rows() {
        // 3 pixels per row: 1 0 1 -> 0b1010_0000
        let packed = pack_indices(&[1, 0, 1, 0, 1, 1], 3, 1);
        assert_eq!(packed, vec![0b1010_0000, 0b0110_0000]);
    }

    #[test]
    fn test_pack_two_bits() {
        let packed = pack_indices(&[3, 2, 1, 0, 3], 5, 2);
        assert_eq!(packed, vec![0b1110_0100, 0b1100_0000]);
    }

    #[test]
    fn test_pack_four_bits() {
        let packed = pack_indices(&[0xA, 0x5, 0xF], 3, 4);
        assert_eq!(packed, vec![0xA5, 0xF0]);
    }

    #[test]
    fn test_pack_eight_bits_is_copy() {
        let indices = [7, 200, 13, 0];
        assert_eq!(pack_indices(&indices, 2, 8), indices.to_vec());
    }
}
