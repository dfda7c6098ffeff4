use crate::capability;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

#[cfg(all(feature = "svg", feature = "pngio"))]
use crate::{ico::IconDir,
            image::Image,
            sizes::{self, ICNS_STAGING_SIZES, ICO_FILE_NAME, ICO_SIZES,
                    PNG_TARGETS},
            svg::Rasterizer};
#[cfg(all(feature = "svg", feature = "pngio"))]
use std::fs::{self, File};
#[cfg(all(feature = "svg", feature = "pngio"))]
use std::io::{BufWriter, Write};

/// The SVG read when no input is given.
pub const DEFAULT_INPUT: &str = "logo.svg";

/// Where to read the logo from and where to put the icons.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Options {
    /// The SVG logo.
    pub input: PathBuf,
    /// Directory receiving every generated file.
    pub output_dir: PathBuf,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
        }
    }
}

/// A file written during a run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Artifact {
    /// Where the file was written.
    pub path: PathBuf,
    /// The square pixel sizes it holds (one for a PNG, several for an ICO).
    pub sizes: Vec<u32>,
}

/// Everything a successful run wrote, in the order it was written.  A path
/// appears more than once if it was overwritten within the run.
#[derive(Clone, Debug, Default)]
pub struct Report {
    /// The artifacts written.
    pub artifacts: Vec<Artifact>,
}

impl Report {
    /// Returns the distinct paths written, in first-written order.
    pub fn paths(&self) -> Vec<&Path> {
        let mut paths: Vec<&Path> = Vec::new();
        for artifact in &self.artifacts {
            if !paths.contains(&artifact.path.as_path()) {
                paths.push(&artifact.path);
            }
        }
        paths
    }
}

/// Produces the icon set for one SVG logo.
pub struct Generator {
    options: Options,
}

impl Generator {
    /// Creates a generator for the given input and output locations.
    pub fn new(options: Options) -> Generator {
        Generator { options }
    }

    /// Returns the generator's options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Fails if a rasterization capability is missing from this build.
    pub fn check_capabilities(&self) -> Result<()> {
        capability::require_all()
    }

    /// Fails if the input SVG does not exist.
    pub fn check_input(&self) -> Result<()> {
        if self.options.input.exists() {
            Ok(())
        } else {
            Err(Error::MissingInput(self.options.input.clone()))
        }
    }

    /// Checks the preconditions, then writes every PNG and ICO artifact.
    /// Nothing is written unless both checks pass; any later failure aborts
    /// the rest of the run.
    pub fn run(&self) -> Result<Report> {
        self.check_capabilities()?;
        self.check_input()?;
        self.generate()
    }

    #[cfg(all(feature = "svg", feature = "pngio"))]
    fn generate(&self) -> Result<Report> {
        let rasterizer = Rasterizer::open(&self.options.input)?;
        fs::create_dir_all(&self.options.output_dir).map_err(|source| {
            Error::Write {
                path: self.options.output_dir.clone(),
                source,
            }
        })?;
        log::info!("Generating icons...");
        let mut report = Report::default();
        report.artifacts.extend(self.png_sweep(&rasterizer)?);
        report.artifacts.push(self.ico_assembly(&rasterizer)?);
        report.artifacts.extend(self.icns_staging(&rasterizer)?);
        log::info!("Icons generated successfully!");
        Ok(report)
    }

    #[cfg(not(all(feature = "svg", feature = "pngio")))]
    fn generate(&self) -> Result<Report> {
        capability::require_all().map(|()| Report::default())
    }

    /// Writes one PNG per entry of the primary size table, in table order.
    #[cfg(all(feature = "svg", feature = "pngio"))]
    pub fn png_sweep(&self, rasterizer: &Rasterizer) -> Result<Vec<Artifact>> {
        let mut artifacts = Vec::with_capacity(PNG_TARGETS.len());
        for &(name, size) in PNG_TARGETS {
            log::info!("  {} ({}x{})", name, size, size);
            let image = rasterizer.render(size)?;
            artifacts.push(self.write_png(name, &image)?);
        }
        Ok(artifacts)
    }

    /// Writes `favicon.ico`, embedding one image per ICO size.
    #[cfg(all(feature = "svg", feature = "pngio"))]
    pub fn ico_assembly(&self, rasterizer: &Rasterizer) -> Result<Artifact> {
        log::info!("  {}", ICO_FILE_NAME);
        let mut icon_dir = IconDir::new();
        for &size in &ICO_SIZES {
            let image = rasterizer.render(size)?;
            icon_dir.add_image(&image)?;
        }
        log::debug!("ico directory: {:?} ({} bytes)",
                    icon_dir.sizes(),
                    icon_dir.total_length());
        let path = self.options.output_dir.join(ICO_FILE_NAME);
        write_file(&path, |writer| icon_dir.write(writer))?;
        Ok(Artifact {
            path,
            sizes: ICO_SIZES.to_vec(),
        })
    }

    /// Writes the PNGs an `.iconset` directory is assembled from.
    #[cfg(all(feature = "svg", feature = "pngio"))]
    pub fn icns_staging(&self, rasterizer: &Rasterizer) -> Result<Vec<Artifact>> {
        let mut artifacts = Vec::with_capacity(ICNS_STAGING_SIZES.len());
        for &size in &ICNS_STAGING_SIZES {
            let name = sizes::staged_png_name(size);
            log::info!("  {} (for icon.icns)", name);
            let image = rasterizer.render(size)?;
            artifacts.push(self.write_png(&name, &image)?);
        }
        Ok(artifacts)
    }

    #[cfg(all(feature = "svg", feature = "pngio"))]
    fn write_png(&self, name: &str, image: &Image) -> Result<Artifact> {
        let path = self.options.output_dir.join(name);
        write_file(&path, |writer| image.write_png(writer))?;
        Ok(Artifact {
            path,
            sizes: vec![image.width()],
        })
    }
}

/// Creates (or truncates) `path` and fills it using `write`.
#[cfg(all(feature = "svg", feature = "pngio"))]
fn write_file<F>(path: &Path, write: F) -> Result<()>
    where F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>
{
    let wrap = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(wrap)?);
    write(&mut writer).map_err(wrap)?;
    writer.flush().map_err(wrap)?;
    Ok(())
}
