use crate::capability::Capability;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort icon generation.
#[derive(Debug, Error)]
pub enum Error {
    /// A capability was left out of this build.
    #[error("required package {0} not available; rebuild with `--features {feature}`",
            feature = .0.feature())]
    MissingCapability(Capability),

    /// The input file does not exist.
    #[error("SVG file {} not found!", .0.display())]
    MissingInput(PathBuf),

    /// The input could not be parsed as SVG.
    #[error("failed to parse SVG file {}: {message}", path.display())]
    Svg {
        /// The SVG file.
        path: PathBuf,
        /// What the parser reported.
        message: String,
    },

    /// The rasterizer could not produce an image of the requested size.
    #[error("cannot rasterize at {size}x{size}")]
    Raster {
        /// The requested width and height, in pixels.
        size: u32,
    },

    /// An output file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// The output file.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },

    /// Any other I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
