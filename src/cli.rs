//! CLI argument parser for standalone mode.
//!
//! Provides a command-line interface for turning algorithms into renderer
//! URLs, and optionally downloading them, without the daemon.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::{RenderOptions, Stage, TopColor};

/// Solve stage to highlight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StageArg {
    /// Whole cube, no stage mask
    None,
    /// Last layer
    #[default]
    Ll,
    /// Orientation of the last layer
    Oll,
    /// Corners of the last layer
    Coll,
}

impl From<StageArg> for Stage {
    fn from(arg: StageArg) -> Self {
        match arg {
            StageArg::None => Stage::None,
            StageArg::Ll => Stage::Ll,
            StageArg::Oll => Stage::Oll,
            StageArg::Coll => Stage::Coll,
        }
    }
}

/// Color of the top face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorArg {
    #[default]
    Yellow,
    White,
    Green,
    Blue,
    Red,
    Orange,
}

impl From<ColorArg> for TopColor {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Yellow => TopColor::Yellow,
            ColorArg::White => TopColor::White,
            ColorArg::Green => TopColor::Green,
            ColorArg::Blue => TopColor::Blue,
            ColorArg::Red => TopColor::Red,
            ColorArg::Orange => TopColor::Orange,
        }
    }
}

/// alg-to-img: render twisty-puzzle algorithms as images
#[derive(Parser, Debug)]
#[command(name = "alg-to-img")]
#[command(about = "Turn cube algorithms into VisualCube images, one per algorithm")]
#[command(version)]
pub struct Cli {
    /// Algorithm to render (repeatable)
    #[arg(short, long = "alg")]
    pub algs: Vec<String>,

    /// Read algorithms from a file, one per line ("-" for stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Puzzle order (2-7)
    #[arg(long, default_value = "3", value_parser = clap::value_parser!(u8).range(2..=7))]
    pub pzl: u8,

    /// Image size in pixels (128, 256, 512 or 1024)
    #[arg(long, default_value = "128", value_parser = parse_size)]
    pub size: u32,

    /// Stage to highlight
    #[arg(long, value_enum, default_value_t = StageArg::Ll)]
    pub stage: StageArg,

    /// Color of the top face
    #[arg(long, value_enum, default_value_t = ColorArg::Yellow)]
    pub top_color: ColorArg,

    /// Mirror algorithms left-to-right before rendering
    #[arg(long)]
    pub mirror: bool,

    /// Render the state the algorithm solves instead of the state it produces
    #[arg(long)]
    pub inverse: bool,

    /// Render an isometric view instead of the top-down plan view
    #[arg(long)]
    pub no_plan_view: bool,

    /// Download the images (alg.png for one, alg-imgs.zip for several)
    #[arg(long)]
    pub download: bool,

    /// Download directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Renderer endpoint
    #[arg(long)]
    pub renderer: Option<String>,

    /// Run in daemon mode (JSON-RPC over stdio)
    #[arg(long)]
    pub daemon: bool,
}

fn parse_size(s: &str) -> Result<u32, String> {
    let size: u32 = s.parse().map_err(|e| format!("{}", e))?;
    if crate::types::IMAGE_SIZES.contains(&size) {
        Ok(size)
    } else {
        Err(format!("size must be one of {:?}", crate::types::IMAGE_SIZES))
    }
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Returns true if running in CLI mode (not daemon mode).
    pub fn is_cli_mode(&self) -> bool {
        !self.daemon && (!self.algs.is_empty() || self.input.is_some())
    }

    /// Returns true if running in daemon mode.
    pub fn is_daemon_mode(&self) -> bool {
        self.daemon
    }

    /// Builds the render options selected on the command line.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            pzl: self.pzl,
            view: !self.no_plan_view,
            stage: self.stage.into(),
            size: self.size,
            inverse: self.inverse,
            mirror: self.mirror,
            top_color: self.top_color.into(),
        }
    }

    /// Returns the download directory, falling back to `default`.
    pub fn output_directory(&self, default: PathBuf) -> PathBuf {
        self.output.clone().unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("alg-to-img").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_mode_detection() {
        let cli = parse(&["-a", "R U R' U'"]);
        assert!(cli.is_cli_mode());
        assert!(!cli.is_daemon_mode());

        let cli = parse(&["--daemon"]);
        assert!(!cli.is_cli_mode());
        assert!(cli.is_daemon_mode());

        let cli = parse(&[]);
        assert!(!cli.is_cli_mode());
        assert!(!cli.is_daemon_mode());
    }

    #[test]
    fn defaults_match_render_options_defaults() {
        let cli = parse(&["-a", "R"]);
        assert_eq!(cli.render_options(), RenderOptions::default());
    }

    #[test]
    fn flags_map_to_options() {
        let cli = parse(&[
            "--alg",
            "R U",
            "--alg",
            "F2",
            "--pzl",
            "4",
            "--size",
            "512",
            "--stage",
            "coll",
            "--top-color",
            "green",
            "--mirror",
            "--inverse",
            "--no-plan-view",
        ]);
        let options = cli.render_options();

        assert_eq!(cli.algs, vec!["R U", "F2"]);
        assert_eq!(options.pzl, 4);
        assert_eq!(options.size, 512);
        assert_eq!(options.stage, Stage::Coll);
        assert_eq!(options.top_color, TopColor::Green);
        assert!(options.mirror);
        assert!(options.inverse);
        assert!(!options.view);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let args = |extra: &[&str]| {
            let mut argv = vec!["alg-to-img", "-a", "R"];
            argv.extend_from_slice(extra);
            Cli::try_parse_from(argv)
        };
        assert!(args(&["--pzl", "8"]).is_err());
        assert!(args(&["--pzl", "1"]).is_err());
        assert!(args(&["--size", "300"]).is_err());
        assert!(args(&["--stage", "f2l"]).is_err());
    }

    #[test]
    fn output_directory_default() {
        let cli = parse(&["-a", "R"]);
        assert_eq!(cli.output_directory(PathBuf::from("/tmp/x")), PathBuf::from("/tmp/x"));

        let cli = parse(&["-a", "R", "-o", "imgs"]);
        assert_eq!(cli.output_directory(PathBuf::from("/tmp/x")), PathBuf::from("imgs"));
    }

    #[test]
    fn input_file_enables_cli_mode() {
        let cli = parse(&["-i", "algs.txt"]);
        assert!(cli.is_cli_mode());
        assert_eq!(cli.input, Some(PathBuf::from("algs.txt")));
    }
}
