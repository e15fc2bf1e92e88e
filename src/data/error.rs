use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the data layer.
///
/// Missing expected files are deliberately *not* represented here: the VOC
/// convention treats them as diagnostics, collected and logged, never fatal.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset root {0} does not exist")]
    RootNotFound(PathBuf),

    #[error("reading split manifest {path}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("loading image {path}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
