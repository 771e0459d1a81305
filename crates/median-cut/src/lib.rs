#![allow(clippy::module_inception)]

//! median-cut: shared-palette quantization for animated indexed images
//!
//! This library turns a sequence of full-color RGBA frames into one shared
//! palette of at most 256 colors and maps every pixel of every frame onto
//! it, keeping fully transparent pixels transparent.
//!
//! # Quick Start
//!
//! The [`MedianCutQuantizer`] builder is the primary entry point:
//!
//! ```
//! use median_cut::{Frame, FrameTiming, MedianCutQuantizer, Rgba8};
//!
//! let frames = [
//!     Frame::filled(2, 2, Rgba8::opaque(255, 0, 0)),
//!     Frame::filled(2, 2, Rgba8::opaque(0, 255, 0)),
//!     Frame::filled(2, 2, Rgba8::opaque(0, 0, 255)),
//! ];
//!
//! let animation = MedianCutQuantizer::new()
//!     .quantize_frames(&frames, FrameTiming::default())
//!     .unwrap();
//!
//! assert_eq!(animation.palette.len(), 3);
//! assert_eq!(animation.frames.len(), 3);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! frames (PixelSource)
//!     |
//!     v
//! build_histogram         sparse table from the ScratchPool, alpha-0
//!     |                   pixels only flag transparency
//!     v
//! partition               median cut into K buckets, K = room left in
//!     |                   the palette minus the transparent slot
//!     v
//! aggregate_into          Mode (heaviest color) or Mean (weighted average)
//!     |
//!     v
//! Palette  --->  FrameIndexer (per session, truncated-key cache)
//!                     |
//!                     v
//!                IndexedFrame (one u8 per pixel) ---> encoder
//! ```
//!
//! # Determinism
//!
//! Quantization is a pure function of the frames, the weighting, the
//! aggregation mode and the capacity. The scratch pool only affects how
//! often the histogram table is allocated.
//!
//! # Approximations
//!
//! Two shortcuts trade exactness for throughput and are part of the
//! contract:
//!
//! - Histogram collisions probe with a growing step instead of a full hash
//!   map.
//! - Frame emission caches palette lookups by a truncated color key
//!   ([`DEFAULT_KEY_BITS`] bits per channel), so colors differing only in
//!   their low bits share the index resolved for the first of them.

pub mod api;
pub mod color;
pub mod frame;
pub mod output;
pub mod palette;
pub mod quantize;
pub mod remap;


pub use api::{MedianCutQuantizer, QuantizeError, QuantizedAnimation};
pub use color::{ColorBucket, ColorSample, Rgba8};
pub use frame::{Frame, PixelSource, PixelWeight, Uniform};
pub use output::{Disposal, FrameTiming, IndexedFrame, DEFAULT_DELAY_MS};
pub use palette::{Palette, PaletteError, ParseColorError, MAX_PALETTE_SIZE};
pub use quantize::{
    aggregate_into, build_histogram, partition, representative, Aggregation, Histogram,
    ScratchPool,
};
pub use remap::{CacheStats, FrameIndexer, PaletteIndexCache, DEFAULT_KEY_BITS};
