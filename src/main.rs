//! Renders `logo.svg` into the application icon and favicon set.
//!
//! ```shell
//! generate-icons
//! # writes icon_*.png, favicon-*.png, apple-touch-icon.png and favicon.ico
//! # into the current directory, then prints how to build icon.icns
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use favicon_gen::{DEFAULT_INPUT, Generator, Options};

mod logger;

#[derive(Parser, Debug)]
#[clap(name = "generate-icons", version, about)]
struct Cmd {
    /// SVG logo to render
    #[clap(long, value_name = "PATH", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Directory receiving the generated files
    #[clap(long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Iconset directory named in the printed ICNS instructions
    #[clap(long, value_name = "NAME", default_value = "icon.iconset")]
    iconset: String,

    /// Only report warnings and errors
    #[clap(short, long)]
    quiet: bool,
}

fn run(cmd: &Cmd) -> Result<()> {
    let generator = Generator::new(Options {
        input: cmd.input.clone(),
        output_dir: cmd.output_dir.clone(),
    });
    let report = generator.run()?;
    log::debug!("wrote {} files", report.paths().len());

    if !cmd.quiet {
        println!();
        favicon_gen::write_iconset_guide(std::io::stdout().lock(), &cmd.iconset)
            .context("failed to print ICNS instructions")?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cmd = Cmd::parse();
    if let Err(e) = logger::init_logger(cmd.quiet) {
        eprintln!("failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&cmd) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
