//! Animated PNG output.

use std::io::Write;

use median_cut::{Disposal, IndexedFrame, Palette};

use super::pack::{bit_depth_for, pack_indices};
use super::{validate, FrameEncoder};
use crate::error::EncodeError;

/// Writes all frames into one indexed APNG.
///
/// The shared palette goes into a single PLTE (and tRNS when the palette has
/// a transparent entry). Every frame covers the full canvas and replaces it
/// (`BlendOp::Source`), so frame timing and disposal are the only per-frame
/// metadata.
pub struct ApngEncoder<W: Write> {
    writer: W,
    loops: u32,
}

impl<W: Write> ApngEncoder<W> {
    /// `loops` is the number of times the animation plays, 0 meaning forever.
    pub fn new(writer: W, loops: u32) -> Self {
        Self { writer, loops }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FrameEncoder for ApngEncoder<W> {
    fn encode(&mut self, palette: &Palette, frames: &[IndexedFrame]) -> Result<(), EncodeError> {
        let (width, height) = validate(palette, frames)?;
        let (depth, bits) = bit_depth_for(palette.len());

        let mut encoder = png::Encoder::new(&mut self.writer, width, height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(depth);
        encoder.set_palette(palette.to_rgb_bytes());
        if let Some(trns) = palette.to_alpha_bytes() {
            encoder.set_trns(trns);
        }
        encoder.set_animated(frames.len() as u32, self.loops)?;
        encoder.set_blend_op(png::BlendOp::Source)?;

        let mut writer = encoder.write_header()?;
        for frame in frames {
            let timing = frame.timing();
            let (numerator, denominator) = delay_fraction(timing.delay_ms);
            writer.set_frame_delay(numerator, denominator)?;
            writer.set_dispose_op(dispose_op(timing.disposal))?;
            writer.write_image_data(&pack_indices(frame.indices(), frame.width(), bits))?;
        }
        writer.finish()?;

        tracing::debug!(
            frames = frames.len(),
            colors = palette.len(),
            bits,
            loops = self.loops,
            "Wrote APNG"
        );
        Ok(())
    }
}

/// Frame delay in milliseconds as an fcTL fraction of seconds.
///
/// Delays beyond what a `u16` numerator holds fall back to coarser
/// denominators; anything past 65535 seconds is clamped.
pub fn delay_fraction(delay_ms: u32) -> (u16, u16) {
    if let Ok(ms) = u16::try_from(delay_ms) {
        return (ms, 1000);
    }
    if let Ok(centis) = u16::try_from(delay_ms / 10) {
        return (centis, 100);
    }
    (u16::try_from(delay_ms / 1000).unwrap_or(u16::MAX), 1)
}

fn dispose_op(disposal: Disposal) -> png::DisposeOp {
    match disposal {
        Disposal::None => png::DisposeOp::None,
        Disposal::Background => png::DisposeOp::Background,
        Disposal::Previous => png::DisposeOp::Previous,
    }
}
