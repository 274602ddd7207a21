//! Running the conversion over a whole directory.

use std::path::PathBuf;

use rayon::prelude::*;

use crate::discover::{discover, DEFAULT_PATTERN};
use crate::error::Result;
use crate::raster::{transform_image, WriteMode};

/// Directory converted when nothing else is configured.
pub const DEFAULT_DIRECTORY: &str = "assets/images/cards";

/// What to convert and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    pub directory: PathBuf,
    /// File name pattern inside `directory`, e.g. `*.png`
    pub pattern: String,
    pub write_mode: WriteMode,
    /// Convert files on a thread pool instead of one after another
    pub parallel: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            pattern: DEFAULT_PATTERN.to_string(),
            write_mode: WriteMode::default(),
            parallel: false,
        }
    }
}

/// Files converted by a successful batch.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub files: Vec<PathBuf>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Convert every matching file in place.
///
/// The first failure aborts the batch. Files converted before it stay
/// converted.
pub fn run_batch(options: &BatchOptions) -> Result<BatchReport> {
    let files = discover(&options.directory, &options.pattern)?;
    log::info!(
        "Found {} image(s) in {}",
        files.len(),
        options.directory.display()
    );

    let mode = options.write_mode;
    if options.parallel {
        files
            .par_iter()
            .try_for_each(|path| transform_image(path, mode).map(|_| ()))?;
    } else {
        for path in &files {
            transform_image(path, mode)?;
        }
    }

    log::info!("Converted {} image(s)", files.len());
    Ok(BatchReport { files })
}
