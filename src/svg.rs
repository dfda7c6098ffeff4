use crate::error::{Error, Result};
use crate::image::Image;
use resvg::{tiny_skia, usvg};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A parsed SVG document that can be rendered into square rasters.
pub struct Rasterizer {
    path: PathBuf,
    tree: usvg::Tree,
}

impl Rasterizer {
    /// Reads and parses the SVG file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Rasterizer> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        Rasterizer::from_data(path, &data)
    }

    /// Parses an in-memory SVG document.  `path` is used for resolving
    /// relative references and for error messages.
    pub fn from_data<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<Rasterizer> {
        let path = path.as_ref().to_path_buf();
        let mut options = usvg::Options::default();
        options.resources_dir = path.parent().map(Path::to_path_buf);
        Arc::make_mut(&mut options.fontdb).load_system_fonts();
        let tree = usvg::Tree::from_data(data, &options).map_err(|error| {
            Error::Svg {
                path: path.clone(),
                message: error.to_string(),
            }
        })?;
        let size = tree.size();
        log::debug!("parsed {} ({}x{})",
                    path.display(),
                    size.width(),
                    size.height());
        Ok(Rasterizer { path, tree })
    }

    /// Renders the document into a `size` by `size` RGBA image, stretching
    /// each axis independently so the document fills the square.
    pub fn render(&self, size: u32) -> Result<Image> {
        let mut pixmap = tiny_skia::Pixmap::new(size, size)
            .ok_or(Error::Raster { size })?;
        let document = self.tree.size();
        let transform = tiny_skia::Transform::from_scale(
            size as f32 / document.width(),
            size as f32 / document.height(),
        );
        resvg::render(&self.tree, transform, &mut pixmap.as_mut());
        log::trace!("rendered {} at {}x{}", self.path.display(), size, size);
        Image::from_premultiplied_rgba(size, size, pixmap.data())
            .ok_or(Error::Raster { size })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::PixelFormat;

    const HALF_RED: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10">
  <rect x="0" y="0" width="10" height="10" fill="#ff0000"/>
</svg>"##;

    #[test]
    fn render_stretches_to_square() {
        let rasterizer = Rasterizer::from_data("half.svg", HALF_RED)
            .expect("failed to parse SVG");
        let image = rasterizer.render(32).expect("failed to render");
        assert_eq!(image.pixel_format(), PixelFormat::RGBA);
        assert_eq!((image.width(), image.height()), (32, 32));
        let pixel = |x: usize, y: usize| {
            let offset = 4 * (y * 32 + x);
            image.data()[offset..offset + 4].to_vec()
        };
        assert_eq!(pixel(4, 28), vec![255, 0, 0, 255]);
        assert_eq!(pixel(28, 4), vec![0, 0, 0, 0]);
    }

    #[test]
    fn zero_size_is_a_raster_error() {
        let rasterizer = Rasterizer::from_data("half.svg", HALF_RED)
            .expect("failed to parse SVG");
        match rasterizer.render(0) {
            Err(Error::Raster { size: 0 }) => {}
            other => panic!("unexpected result: {:?}", other.err()),
        }
    }

    #[test]
    fn malformed_svg_is_reported_with_path() {
        match Rasterizer::from_data("broken.svg", b"<svg><rect") {
            Err(Error::Svg { path, .. }) => {
                assert_eq!(path, PathBuf::from("broken.svg"))
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("malformed SVG parsed"),
        }
    }
}
