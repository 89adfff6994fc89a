use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_renderer::{RenderConfig, Vec3};
use std::path::PathBuf;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "Render a scene of spheres, planes and boxes by path tracing")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 960)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 540)]
    pub height: u32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value_t = 64)]
    pub samples: u32,

    /// Maximum number of bounces per path
    #[arg(long, default_value_t = 128)]
    pub max_depth: u32,

    /// Throughput luminance below which paths are terminated
    #[arg(long, default_value_t = 0.01)]
    pub luminance_cutoff: f32,

    /// Worker threads (defaults to the available hardware parallelism)
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,

    /// JSON scene description; the built-in reference scene when omitted
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Camera origin as x,y,z (overrides the scene's camera)
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    pub camera_origin: Option<Vec3>,

    /// Output image path; the format follows the extension
    #[arg(long, short = 'o', default_value = "output.png")]
    pub output: PathBuf,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Render settings taken from the arguments.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            samples_per_pixel: self.samples,
            max_depth: self.max_depth,
            luminance_cutoff: self.luminance_cutoff,
            threads: self.threads,
        }
    }
}

/// Parse "x,y,z" into a vector.
fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got '{s}'"));
    }

    let mut values = [0.0f32; 3];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .parse()
            .map_err(|e| format!("invalid component '{part}': {e}"))?;
    }
    Ok(Vec3::from_array(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["lumen"]).unwrap();
        assert_eq!(args.width, 960);
        assert_eq!(args.height, 540);
        assert_eq!(args.output, PathBuf::from("output.png"));
        assert!(args.scene.is_none());

        let config = args.render_config();
        assert_eq!(config.samples_per_pixel, 64);
        assert_eq!(config.max_depth, 128);
        assert_eq!(config.threads, None);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "lumen",
            "--width",
            "64",
            "-s",
            "8",
            "-j",
            "2",
            "--camera-origin",
            "0,1.5,-3",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.width, 64);
        assert_eq!(args.render_config().samples_per_pixel, 8);
        assert_eq!(args.render_config().threads, Some(2));
        assert_eq!(args.camera_origin, Some(Vec3::new(0.0, 1.5, -3.0)));
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }

    #[test]
    fn test_parse_vec3() {
        assert_eq!(parse_vec3("1, 2, 3"), Ok(Vec3::new(1.0, 2.0, 3.0)));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,a,3").is_err());
    }
}
