//! Output types
//!
//! An [`IndexedFrame`] is what the quantizer hands to an indexed-image
//! encoder: one palette index per pixel plus the frame's timing metadata.

mod indexed_frame;

pub use indexed_frame::{Disposal, FrameTiming, IndexedFrame, DEFAULT_DELAY_MS};
