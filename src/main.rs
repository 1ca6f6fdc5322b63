//! SR Copilot CLI - map resource inspection
//!
//! Resolves floor assets, inspects minimap masks and renders the tracking
//! debug view on desktop without a device attached.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use sr_copilot::map::{PngViewer, TrackingState, DEFAULT_FLOOR};
use sr_copilot::{MapError, MapResource, Settings};

#[derive(Parser)]
#[command(name = "src")]
#[command(about = "Inspect SR Copilot map resources")]
struct Args {
    /// Settings file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the asset paths of a plane
    Resolve {
        plane: String,
        #[arg(default_value = DEFAULT_FLOOR)]
        floor: String,
    },
    /// Print the circle mask of a minimap crop
    Mask {
        /// Minimap radius, defaults to the configured one
        #[arg(long)]
        radius: Option<u32>,
    },
    /// Render the tracking debug view
    Show {
        plane: String,
        #[arg(default_value = DEFAULT_FLOOR)]
        floor: String,
        #[arg(long)]
        x: f32,
        #[arg(long)]
        y: f32,
        #[arg(long, default_value_t = 0.0)]
        direction: f32,
        #[arg(long, default_value_t = 0.0)]
        rotation: f32,
    },
}

fn main() -> ExitCode {
    sr_copilot::init_logging();
    let args = Args::parse();

    let settings = match args.config {
        Some(ref path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    }
    .with_env_overrides();

    match run(args.command, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, settings: &Settings) -> Result<(), MapError> {
    let mut resource = MapResource::new(settings)?;

    match command {
        Command::Resolve { plane, floor } => {
            resource.set_plane(&plane, &floor)?;
            let basename = resource.assets_file_basename().to_string();
            println!("Plane:    {}", resource.plane());
            println!("World:    {}", resource.plane().world.short_name());
            println!("Floor:    {}", resource.floor());
            println!("Special:  {}", resource.is_special_plane());
            println!("Basename: {basename}");
            println!();
            println!("Assets:");
            let roots = resource.roots();
            println!("  - Floor:   {}", roots.srcmap_path(&format!("{basename}.png")).display());
            println!("  - Feature: {}", roots.local_path(&format!("{basename}.feat.png")).display());
            println!("  - Area:    {}", roots.local_path(&format!("{basename}.area.png")).display());
        }
        Command::Mask { radius } => {
            let radius = radius.unwrap_or(settings.minimap.radius);
            let size = radius * 2;
            let mask = resource.get_circle_mask(&image::GrayImage::new(size, size));
            let inside = mask.pixels().filter(|p| p[0] == 255).count();
            println!("Mask {size}x{size}: {inside} pixels inside");

            let remap = resource.rotation_remap_data();
            println!("Remap table: {0}x{0}", remap.diameter());
        }
        Command::Show {
            plane,
            floor,
            x,
            y,
            direction,
            rotation,
        } => {
            resource.set_plane(&plane, &floor)?;
            let tracking = TrackingState {
                position: (x, y),
                direction,
                rotation,
            };
            let mut viewer = PngViewer::new(&settings.debug.output_dir);
            resource.show_minimap(&mut viewer, &tracking)?;
            println!(
                "Wrote {}",
                viewer.frame_path(&settings.debug.window_name).display()
            );
        }
    }

    Ok(())
}
