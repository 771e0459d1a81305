//! Per-frame PNG output with a JSON manifest.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use median_cut::{IndexedFrame, Palette};
use serde::{Deserialize, Serialize};

use super::pack::encode_indexed_png;
use super::{disposal_name, validate, FrameEncoder};
use crate::error::EncodeError;

/// Manifest written next to a PNG sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameManifest {
    pub width: u32,
    pub height: u32,
    /// Number of plays, 0 = forever
    pub loops: u32,
    /// Shared palette as hex colors
    pub palette: Vec<String>,
    pub transparent_index: Option<u8>,
    pub frames: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// File name relative to the manifest
    pub file: String,
    pub delay_ms: u32,
    pub disposal: String,
}

/// Writes `<stem>-NNN.png` per frame and `<stem>.json` into one directory.
pub struct PngSequenceEncoder {
    dir: PathBuf,
    stem: String,
    loops: u32,
    optimize: bool,
    written: Vec<PathBuf>,
}

impl PngSequenceEncoder {
    /// Derive directory and stem from `output`: `out/anim.png` writes
    /// `out/anim-000.png`, `out/anim-001.png`, ... and `out/anim.json`.
    pub fn new(output: &Path, loops: u32) -> Self {
        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let stem = output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "frame".to_string());
        Self {
            dir,
            stem,
            loops,
            optimize: false,
            written: Vec::new(),
        }
    }

    /// Re-compress every frame with oxipng.
    pub fn optimize(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }

    /// Paths written by the last [`encode`](FrameEncoder::encode), manifest last.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.stem))
    }

    fn frame_file_name(&self, index: usize) -> String {
        format!("{}-{index:03}.png", self.stem)
    }

    fn compress(&self, png_bytes: Vec<u8>) -> Vec<u8> {
        if !self.optimize {
            return png_bytes;
        }
        // Frames must keep the shared palette, so only recompress.
        let options = oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            palette_reduction: false,
            color_type_reduction: false,
            grayscale_reduction: false,
            ..Default::default()
        };
        match oxipng::optimize_from_memory(&png_bytes, &options) {
            Ok(optimized) => optimized,
            Err(e) => {
                tracing::warn!(error = %e, "oxipng failed, keeping unoptimized frame");
                png_bytes
            }
        }
    }
}

impl FrameEncoder for PngSequenceEncoder {
    fn encode(&mut self, palette: &Palette, frames: &[IndexedFrame]) -> Result<(), EncodeError> {
        let (width, height) = validate(palette, frames)?;
        std::fs::create_dir_all(&self.dir)?;
        self.written.clear();

        let mut entries = Vec::with_capacity(frames.len());
        for (index, frame) in frames.iter().enumerate() {
            let file = self.frame_file_name(index);
            let path = self.dir.join(&file);
            let bytes = self.compress(encode_indexed_png(palette, frame)?);
            std::fs::write(&path, &bytes)?;
            tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote frame");
            self.written.push(path);

            let timing = frame.timing();
            entries.push(ManifestEntry {
                file,
                delay_ms: timing.delay_ms,
                disposal: disposal_name(timing.disposal).to_string(),
            });
        }

        let manifest = FrameManifest {
            width,
            height,
            loops: self.loops,
            palette: palette.colors().iter().map(|c| c.to_hex()).collect(),
            transparent_index: palette.transparent_index(),
            frames: entries,
        };
        let manifest_path = self.manifest_path();
        let writer = BufWriter::new(File::create(&manifest_path)?);
        serde_json::to_writer_pretty(writer, &manifest)?;
        self.written.push(manifest_path);

        Ok(())
    }
}
