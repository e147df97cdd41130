use clap::Parser;
use iced::Color;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::page_group::DisplayMode;

/// Fullscreen slideshow for PDF documents.
#[derive(Parser, Debug)]
#[command(name = "pdf-slideshow", about, version)]
pub struct Args {
    /// Path to the folder containing the file
    #[arg(long = "path", value_name = "DIR")]
    pub path: PathBuf,

    /// File name
    #[arg(long = "name", value_name = "FILE")]
    pub name: String,

    /// Show one page or two facing pages per screen
    #[arg(long, value_enum, default_value_t = DisplayMode::Single)]
    pub mode: DisplayMode,

    /// Share of the screen used for the pages
    #[arg(long, default_value_t = Config::DEFAULT_SCALE)]
    pub scale: f32,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("scale factor must be in (0, 1], got {0}")]
    Scale(f32),
    #[error("file name must not be empty")]
    EmptyName,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub document: PathBuf,
    pub mode: DisplayMode,
    pub scale: f32,
    pub zoom: f32,
    pub margin: u32,
    pub settle_delay: Duration,
    pub clock_period: Duration,
    pub clock_format: String,
    pub background: Color,
    pub canvas_background: Color,
    pub bar_background: Color,
}

impl Config {
    pub const DEFAULT_SCALE: f32 = 0.88;
    const ZOOM: f32 = 2.0;
    const MARGIN: u32 = 5;

    pub fn title(&self) -> &'static str {
        match self.mode {
            DisplayMode::Single => "PDF Slideshow",
            DisplayMode::Double => "PDF Slideshow Two Page",
        }
    }
}

impl TryFrom<Args> for Config {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        if !(args.scale > 0.0 && args.scale <= 1.0) {
            return Err(ConfigError::Scale(args.scale));
        }
        if args.name.is_empty() {
            return Err(ConfigError::EmptyName);
        }

        Ok(Self {
            document: args.path.join(&args.name),
            mode: args.mode,
            scale: args.scale,
            zoom: Self::ZOOM,
            margin: Self::MARGIN,
            settle_delay: Duration::from_millis(100),
            clock_period: Duration::from_secs(1),
            clock_format: "%H:%M:%S".to_string(),
            background: Color::from_rgb8(0x2f, 0x2f, 0x2f),
            canvas_background: Color::BLACK,
            bar_background: Color::from_rgb8(0x33, 0x33, 0x33),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("pdf-slideshow").chain(args.iter().copied()))
    }

    #[test]
    fn path_and_name_are_joined() {
        let args = parse(&["--path", "/slides", "--name", "talk.pdf"]).unwrap();
        let config = Config::try_from(args).unwrap();
        assert_eq!(config.document, PathBuf::from("/slides").join("talk.pdf"));
        assert_eq!(config.mode, DisplayMode::Single);
        assert_eq!(config.scale, 0.88);
        assert_eq!(config.title(), "PDF Slideshow");
    }

    #[test]
    fn double_mode_flag() {
        let args = parse(&["--path", ".", "--name", "a.pdf", "--mode", "double"]).unwrap();
        let config = Config::try_from(args).unwrap();
        assert_eq!(config.mode, DisplayMode::Double);
        assert_eq!(config.title(), "PDF Slideshow Two Page");
    }

    #[test]
    fn missing_name_is_a_usage_error() {
        let err = parse(&["--path", "."]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn scale_out_of_range_is_rejected() {
        let args = parse(&["--path", ".", "--name", "a.pdf", "--scale", "1.5"]).unwrap();
        assert_eq!(Config::try_from(args).unwrap_err(), ConfigError::Scale(1.5));
    }
}
