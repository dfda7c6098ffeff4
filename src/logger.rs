use std::io::IsTerminal;

use fern::colors::{Color, ColoredLevelConfig};
use log::{Level, LevelFilter};

/// Installs the console logger.  Progress messages (`info`) are printed as-is
/// so they read like plain output; other levels get a level prefix, coloured
/// only when stderr is a terminal.  `RUST_LOG` picks the level (default
/// info); `quiet` caps it at warn whatever `RUST_LOG` says.
pub fn init_logger(quiet: bool) -> Result<(), log::SetLoggerError> {
    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .debug(Color::Cyan)
        .warn(Color::Yellow)
        .error(Color::Red);
    let colored = std::io::stderr().is_terminal();

    let requested = std::env::var("RUST_LOG").ok().and_then(|value| parse_level(&value));
    let level = effective_level(requested, quiet);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            if record.level() == Level::Info {
                out.finish(format_args!("{}", message))
            } else if colored {
                out.finish(format_args!("{}: {}", colors.color(record.level()), message))
            } else {
                out.finish(format_args!("{}: {}", record.level(), message))
            }
        })
        .level(level)
        .chain(
            fern::Dispatch::new()
                .filter(|metadata| metadata.level() >= Level::Info)
                .chain(std::io::stdout()),
        )
        .chain(
            fern::Dispatch::new()
                .filter(|metadata| metadata.level() < Level::Info)
                .chain(std::io::stderr()),
        )
        .apply()
}

fn effective_level(requested: Option<LevelFilter>, quiet: bool) -> LevelFilter {
    let level = requested.unwrap_or(LevelFilter::Info);
    if quiet { level.min(LevelFilter::Warn) } else { level }
}

fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.to_lowercase().trim() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_level_ignores_case_and_padding() {
        assert_eq!(parse_level(" DEBUG "), Some(LevelFilter::Debug));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_level("verbose"), None);
    }

    #[test]
    fn quiet_caps_requested_level() {
        assert_eq!(effective_level(Some(LevelFilter::Info), true), LevelFilter::Warn);
        assert_eq!(effective_level(Some(LevelFilter::Trace), true), LevelFilter::Warn);
        assert_eq!(effective_level(Some(LevelFilter::Off), true), LevelFilter::Off);
        assert_eq!(effective_level(None, true), LevelFilter::Warn);
        assert_eq!(effective_level(None, false), LevelFilter::Info);
        assert_eq!(effective_level(Some(LevelFilter::Debug), false), LevelFilter::Debug);
    }
}
