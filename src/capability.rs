//! Rasterization capabilities and the fail-fast check that they were built in.

use crate::error::{Error, Result};
use std::fmt;

/// A rasterization capability the generator depends on.  Each one is backed
/// by an optional dependency and enabled by a cargo feature.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Capability {
    /// Rendering SVG documents into pixels (`resvg`, feature `svg`).
    SvgRasterizer,
    /// Encoding pixels as PNG and ICO files (`png`, feature `pngio`).
    PngEncoder,
}

/// Every capability, in the order they are checked.
pub const ALL: [Capability; 2] = [Capability::SvgRasterizer,
                                  Capability::PngEncoder];

impl Capability {
    /// Returns the name of the library that provides this capability.
    pub fn name(self) -> &'static str {
        match self {
            Capability::SvgRasterizer => "resvg",
            Capability::PngEncoder => "png",
        }
    }

    /// Returns the cargo feature that enables this capability.
    pub fn feature(self) -> &'static str {
        match self {
            Capability::SvgRasterizer => "svg",
            Capability::PngEncoder => "pngio",
        }
    }

    /// Returns true if this capability was compiled in.
    pub fn is_available(self) -> bool {
        match self {
            Capability::SvgRasterizer => cfg!(feature = "svg"),
            Capability::PngEncoder => cfg!(feature = "pngio"),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        out.write_str(self.name())
    }
}

/// Returns the capabilities this build lacks.
pub fn missing() -> Vec<Capability> {
    ALL.iter().copied().filter(|capability| !capability.is_available()).collect()
}

/// Fails with the first missing capability, if any.
pub fn require_all() -> Result<()> {
    match missing().first() {
        Some(&capability) => Err(Error::MissingCapability(capability)),
        None => Ok(()),
    }
}
