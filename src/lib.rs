//! Library for generating application icons and web favicons from an SVG
//! logo.
//!
//! A run renders the logo into a fixed set of square PNG files, a
//! multi-resolution Windows icon (`favicon.ico`), and the PNGs from which a
//! macOS `.icns` bundle can be built with `iconutil`.
//!
//! ```no_run
//! use favicon_gen::{Generator, Options};
//!
//! let report = Generator::new(Options::default()).run()?;
//! for path in report.paths() {
//!     println!("wrote {}", path.display());
//! }
//! # Ok::<(), favicon_gen::Error>(())
//! ```
//!
//! See https://en.wikipedia.org/wiki/ICO_(file_format) for more information
//! about the icon container.

#![warn(missing_docs)]

pub mod capability;
mod error;
mod generator;
mod guide;
mod ico;
mod image;
#[cfg(feature = "pngio")]
mod pngio;
mod sizes;
#[cfg(feature = "svg")]
mod svg;

pub use capability::Capability;
pub use error::{Error, Result};
pub use generator::{Artifact, DEFAULT_INPUT, Generator, Options, Report};
pub use guide::{iconset_guide, write_iconset_guide};
pub use ico::{IconDir, IconDirEntry, MAX_ICON_SIZE};
pub use image::{Image, MAX_DATA_BYTES, PixelFormat};
pub use sizes::{ICNS_STAGING_SIZES, ICONSET_SLOTS, ICO_FILE_NAME, ICO_SIZES,
                IconsetSlot, PNG_TARGETS, staged_png_name};
#[cfg(feature = "svg")]
pub use svg::Rasterizer;
