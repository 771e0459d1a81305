//! Palette index resolution for frame emission
//!
//! [`FrameIndexer`] owns one encode session: it maps every pixel of every
//! frame onto a fixed [`Palette`](crate::Palette), memoizing lookups in a
//! [`PaletteIndexCache`] keyed by a truncated color.

mod index_cache;
mod indexer;

pub use index_cache::{CacheStats, PaletteIndexCache, DEFAULT_KEY_BITS};
pub use indexer::FrameIndexer;
