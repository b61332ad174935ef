//! pinbed CLI - STL to pin-bed motion commands
//!
//! Drives the full pipeline: decode an STL mesh, normalize it, sample a
//! depth map, lay out the pins, and write the motion program.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use pinbed_depthmap::{pin_layout, DepthMap, Grid, TieBreak, DEFAULT_GRID_SIZE};
use pinbed_gcode::{plan_motion, write_program};
use pinbed_math::{angle_between, Plane, Point3, Vec3};
use pinbed_mesh::{read_stl, Mesh};

#[derive(Parser)]
#[command(name = "pinbed")]
#[command(about = "Convert a triangulated surface into pin-bed motion commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an STL mesh to a motion command program
    Convert {
        /// Input STL file (binary or ASCII)
        input: PathBuf,
        /// Output file for the motion program
        #[arg(short, long)]
        output: PathBuf,
        /// Pins per axis
        #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
        grid: usize,
        /// Sampling region as xmin,xmax,ymin,ymax
        /// (default: the normalized mesh's xy footprint)
        #[arg(long, value_parser = parse_region)]
        region: Option<Region>,
        /// Rotation about the z axis in radians, applied after filtering
        #[arg(long, default_value_t = 0.0)]
        rotate: f64,
        /// Resolve overlapping footprints by highest z instead of mesh order
        #[arg(long)]
        highest_z: bool,
    },
    /// Display information about an STL mesh
    Info {
        /// Input STL file
        input: PathBuf,
    },
}

#[derive(Debug, Clone, Copy)]
struct Region {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

fn parse_region(s: &str) -> std::result::Result<Region, String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| format!("region values must be numeric: {}", e))?;
    match parts[..] {
        [x_min, x_max, y_min, y_max] => Ok(Region {
            x_min,
            x_max,
            y_min,
            y_max,
        }),
        _ => Err(format!(
            "expected xmin,xmax,ymin,ymax (4 values), got {}",
            parts.len()
        )),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            grid,
            region,
            rotate,
            highest_z,
        } => convert(&input, &output, grid, region, rotate, highest_z),
        Commands::Info { input } => show_info(&input),
    }
}

fn convert(
    input: &PathBuf,
    output: &PathBuf,
    grid_n: usize,
    region: Option<Region>,
    rotate: f64,
    highest_z: bool,
) -> Result<()> {
    let mesh = read_stl(input).with_context(|| format!("reading {}", input.display()))?;
    println!("Loaded {} triangles from {}", mesh.len(), input.display());

    let mesh = mesh
        .translate_to_first_quadrant()
        .context("normalizing mesh")?
        .drop_upward_faces()
        .rotate_z(rotate);
    println!("{} downward-facing triangles after filtering", mesh.len());

    let region = match region {
        Some(r) => r,
        None => footprint(&mesh).context("deriving sampling region")?,
    };
    let grid = Grid::new(region.x_min, region.x_max, region.y_min, region.y_max, grid_n)?;

    let tie_break = if highest_z {
        TieBreak::HighestZ
    } else {
        TieBreak::FirstMatch
    };
    let map = DepthMap::generate(&mesh, grid, tie_break);

    let undetermined = map.cells().iter().filter(|c| c.is_undetermined()).count();
    if undetermined > 0 {
        println!(
            "{} of {} cells have no surface sample; their pins use the mean height",
            undetermined,
            map.cells().len()
        );
    }

    let pins = pin_layout(&map);
    let commands = plan_motion(&pins).context("planning pin motion")?;

    let file = File::create(output).with_context(|| format!("creating {}", output.display()))?;
    write_program(BufWriter::new(file), &commands)
        .with_context(|| format!("writing {}", output.display()))?;
    println!("Wrote {} commands to {}", commands.len(), output.display());

    Ok(())
}

/// The xy footprint of a normalized mesh.
fn footprint(mesh: &Mesh) -> Result<Region> {
    let min = mesh.aabb_min()?;
    let max = mesh.aabb_max()?;
    Ok(Region {
        x_min: min.x,
        x_max: max.x,
        y_min: min.y,
        y_max: max.y,
    })
}

fn show_info(input: &PathBuf) -> Result<()> {
    let mesh = read_stl(input).with_context(|| format!("reading {}", input.display()))?;
    println!("{}: {} triangles", input.display(), mesh.len());

    if mesh.is_empty() {
        return Ok(());
    }

    let min = mesh.aabb_min()?;
    let max = mesh.aabb_max()?;
    println!(
        "  bounds: x [{:.3}, {:.3}]  y [{:.3}, {:.3}]  z [{:.3}, {:.3}]",
        min.x, max.x, min.y, max.y, min.z, max.z
    );

    let downward = mesh
        .triangles()
        .iter()
        .filter(|t| t.normal().z <= 0.0)
        .count();
    println!(
        "  faces: {} downward, {} upward",
        downward,
        mesh.len() - downward
    );

    let points: Vec<Point3> = mesh.vertices().copied().collect();
    match Plane::best_fit(&points) {
        Ok(plane) => {
            let tilt = angle_between(&plane.normal, &Vec3::z())?;
            // The fitted normal's sign is arbitrary
            let tilt = tilt.min(std::f64::consts::PI - tilt);
            println!("  best-fit plane tilt: {:.2} deg", tilt.to_degrees());
        }
        Err(e) => println!("  best-fit plane: {}", e),
    }

    Ok(())
}
