//! # unglow-core
//!
//! Converts images where a glow was rendered against black into images where
//! the glow lives in the alpha channel, so it composites over any background.
//!
//! The alpha of every pixel is inferred as `max(r, g, b)` and the colour is
//! un-premultiplied by it. Fully black pixels become fully transparent.
//!
//! ## Example
//!
//! ```no_run
//! use unglow_core::{run_batch, BatchOptions};
//!
//! let report = run_batch(&BatchOptions::default()).expect("batch failed");
//! println!("converted {} files", report.len());
//! ```

pub mod batch;
pub mod discover;
mod error;
pub mod pixel;
pub mod raster;

pub use batch::{run_batch, BatchOptions, BatchReport};
pub use discover::discover;
pub use error::{Error, Result};
pub use pixel::recover_alpha;
pub use raster::{recover_buffer, transform_image, WriteMode};
