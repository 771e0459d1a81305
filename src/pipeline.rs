//! File-level operations behind the CLI: decode, quantize, encode.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use median_cut::{CacheStats, Palette, QuantizedAnimation};
use serde::Serialize;

use crate::config::{Config, OutputFormat};
use crate::decode::load_frames;
use crate::encode::{validate, ApngEncoder, FrameEncoder, PngSequenceEncoder};
use crate::error::FramepalError;

/// Outcome of [`encode_files`].
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeSummary {
    pub frames: usize,
    pub width: usize,
    pub height: usize,
    /// Palette entries, transparent slot included
    pub colors: usize,
    pub transparent_index: Option<u8>,
    pub cache_stats: CacheStats,
    /// Every file written
    pub outputs: Vec<PathBuf>,
}

/// Palette as printed by `framepal palette --json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteReport {
    pub colors: Vec<String>,
    pub transparent_index: Option<u8>,
}

impl From<&Palette> for PaletteReport {
    fn from(palette: &Palette) -> Self {
        Self {
            colors: palette.colors().iter().map(|c| c.to_hex()).collect(),
            transparent_index: palette.transparent_index(),
        }
    }
}

/// Build the shared palette of the PNG files at `paths`.
pub fn palette_files(paths: &[PathBuf], config: &Config) -> Result<Palette, FramepalError> {
    let frames = load_frames(paths)?;
    Ok(config.quantizer()?.quantize(&frames)?)
}

/// Decode and quantize the PNG files at `paths` onto one shared palette.
pub fn quantize_files(
    paths: &[PathBuf],
    config: &Config,
) -> Result<QuantizedAnimation, FramepalError> {
    let frames = load_frames(paths)?;
    let animation = config
        .quantizer()?
        .quantize_frames(&frames, config.timing())?;
    tracing::info!(
        frames = animation.frames.len(),
        colors = animation.palette.len(),
        cache_hits = animation.cache_stats.hits,
        cache_misses = animation.cache_stats.misses,
        "Quantized frames"
    );
    Ok(animation)
}

/// Quantize the PNG files at `paths` and write them to `output` in the
/// configured format.
pub fn encode_files(
    paths: &[PathBuf],
    output: &Path,
    config: &Config,
) -> Result<EncodeSummary, FramepalError> {
    let animation = quantize_files(paths, config)?;
    let outputs = write_animation(&animation, output, config)?;

    let (width, height) = animation
        .frames
        .first()
        .map(|f| (f.width(), f.height()))
        .unwrap_or((0, 0));
    Ok(EncodeSummary {
        frames: animation.frames.len(),
        width,
        height,
        colors: animation.palette.len(),
        transparent_index: animation.palette.transparent_index(),
        cache_stats: animation.cache_stats,
        outputs,
    })
}

/// Write an already quantized animation; returns the files written.
pub fn write_animation(
    animation: &QuantizedAnimation,
    output: &Path,
    config: &Config,
) -> Result<Vec<PathBuf>, FramepalError> {
    let settings = &config.output;
    match settings.format {
        OutputFormat::Apng => {
            if settings.optimize {
                tracing::warn!("Optimization applies to frame sequences only, skipping");
            }
            validate(&animation.palette, &animation.frames)?;
            let file = File::create(output)?;
            let mut encoder = ApngEncoder::new(BufWriter::new(file), settings.loops);
            encoder.encode(&animation.palette, &animation.frames)?;
            encoder.into_inner().flush()?;
            tracing::info!(path = %output.display(), "Wrote animated PNG");
            Ok(vec![output.to_path_buf()])
        }
        OutputFormat::Frames => {
            let mut encoder =
                PngSequenceEncoder::new(output, settings.loops).optimize(settings.optimize);
            encoder.encode(&animation.palette, &animation.frames)?;
            tracing::info!(
                manifest = %encoder.manifest_path().display(),
                files = encoder.written().len(),
                "Wrote frame sequence"
            );
            Ok(encoder.written().to_vec())
        }
    }
}
