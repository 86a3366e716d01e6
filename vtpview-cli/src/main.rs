//! vtpview: interactive viewer for VTK XML point-cloud files
//!
//! Loads a `.vtp` point-cloud dataset, lifts its points to vertex
//! primitives, colors them by a chosen scalar field, and opens an
//! interactive window with orbit/pan/zoom controls.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use vtpview_core::VertexSet;
use vtpview_render::RenderConfig;

#[derive(Parser, Debug)]
#[command(
    name = "vtpview",
    version,
    about = "Interactive viewer for VTK XML point-cloud files"
)]
struct Args {
    /// Path to the .vtp point-cloud file
    file: PathBuf,

    /// Point-data field used for color mapping
    #[arg(long, default_value = "rho")]
    field: String,

    /// Point size in display pixels
    #[arg(long, default_value_t = 2.0)]
    point_size: f32,

    /// Background color as comma-separated R,G,B on a 0-1 scale
    #[arg(long, default_value = "0.7,0.7,0.7", value_parser = parse_rgb)]
    background: [f64; 3],
}

fn parse_rgb(s: &str) -> Result<[f64; 3], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected R,G,B, found '{}'", s));
    }
    let mut rgb = [0.0; 3];
    for (slot, part) in rgb.iter_mut().zip(&parts) {
        let value: f64 = part
            .trim()
            .parse()
            .map_err(|_| format!("invalid color component '{}'", part))?;
        if !(0.0..=1.0).contains(&value) {
            return Err(format!("color component {} is outside 0-1", value));
        }
        *slot = value;
    }
    Ok(rgb)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let cloud = vtpview_io::read_point_cloud(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;

    let mut set = VertexSet::from_cloud(&cloud);
    set.set_active_scalar(&args.field).with_context(|| {
        format!(
            "available fields: [{}]",
            cloud.field_names().collect::<Vec<_>>().join(", ")
        )
    })?;

    let config = RenderConfig {
        point_size: args.point_size,
        background: [
            args.background[0],
            args.background[1],
            args.background[2],
            1.0,
        ],
    };
    vtpview_viewer::show(&set, config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["vtpview", "cloud.vtp"]).unwrap();
        assert_eq!(args.file, PathBuf::from("cloud.vtp"));
        assert_eq!(args.field, "rho");
        assert_eq!(args.point_size, 2.0);
        assert_eq!(args.background, [0.7, 0.7, 0.7]);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "vtpview",
            "data/halo.vtp",
            "--field",
            "temp",
            "--point-size",
            "4.5",
            "--background",
            "0,0,0.1",
        ])
        .unwrap();
        assert_eq!(args.field, "temp");
        assert_eq!(args.point_size, 4.5);
        assert_eq!(args.background, [0.0, 0.0, 0.1]);
    }

    #[test]
    fn test_file_is_required() {
        assert!(Args::try_parse_from(["vtpview"]).is_err());
    }

    #[test]
    fn test_bad_background_rejected() {
        assert!(Args::try_parse_from(["vtpview", "c.vtp", "--background", "1,2"]).is_err());
        assert!(Args::try_parse_from(["vtpview", "c.vtp", "--background", "0,0,9"]).is_err());
        assert!(Args::try_parse_from(["vtpview", "c.vtp", "--background", "a,b,c"]).is_err());
    }
}
