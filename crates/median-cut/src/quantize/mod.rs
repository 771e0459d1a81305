//! The quantization pipeline
//!
//! ```text
//! frames --> build_histogram --> Histogram (dense ColorBucket)
//!                 |                    |
//!            ScratchPool          partition (median cut, K buckets)
//!          (sparse table)              |
//!                               aggregate_into (Mode | Mean)
//!                                      |
//!                                   Palette
//! ```
//!
//! Each stage is a plain function so tests can drive them independently;
//! [`MedianCutQuantizer`](crate::MedianCutQuantizer) chains them.

mod aggregate;
mod histogram;
mod median_cut;
mod pool;

pub use aggregate::{aggregate_into, representative, Aggregation};
pub use histogram::{build_histogram, Histogram};
pub use median_cut::partition;
pub use pool::{ScratchBuffer, ScratchPool};
