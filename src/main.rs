//! Scene editor command-line tools.
//!
//! The interactive editor is driven by a host application that owns the
//! window and GPU. This binary works on save files directly:
//! - `init` writes the starting scene,
//! - `inspect` prints what a file holds,
//! - `slots` lists where each save slot lives.

use clap::Parser;
use scene_editor::app::EditorSession;
use scene_editor::cli::{Cli, Command};
use scene_editor::config::EditorConfig;
use scene_editor::scene::serialization::{load_scene_from_file, save_scene_to_file};
use scene_editor::scene::SceneState;
use std::path::Path;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => {
            log::info!("Loading config from {:?}", path);
            EditorConfig::load(path)?
        }
        None => EditorConfig::default(),
    };

    match cli.command {
        Command::Init { file, seed } => {
            let config = EditorConfig {
                rng_seed: seed.or(config.rng_seed),
                ..config
            };
            let session = EditorSession::new(config)?;
            save_scene_to_file(session.scene(), &file)?;
            log::info!(
                "Wrote {} objects to {:?}",
                session.scene().objects.len(),
                file
            );
        }
        Command::Inspect { file } => {
            let scene = load_scene_from_file(&file, config.asset_limits())?;
            print_scene(&file, &scene);
        }
        Command::Slots => {
            for slot in 1..=config.save_slots {
                if let Some(path) = config.slot_path(slot) {
                    let state = if path.exists() { "saved" } else { "empty" };
                    println!("{slot}: {} ({state})", path.display());
                }
            }
        }
    }
    Ok(())
}

fn print_scene(file: &Path, scene: &SceneState) {
    let camera = scene.camera;
    println!("{}", file.display());
    println!(
        "camera: distance {:.3}, yaw {:.1}, pitch {:.1}",
        camera.distance, camera.yaw_deg, camera.pitch_deg
    );
    println!("light spread: {:.3}", scene.light_spread());
    println!("objects: {}", scene.objects.len());
    for (index, object) in scene.objects.objects().iter().enumerate() {
        let role = match index {
            0 => "ground",
            1 | 2 => "light",
            _ => "object",
        };
        println!(
            "  [{index:4}] {role:6} mesh {:2} tex {:2} at ({:.2}, {:.2}, {:.2}) scale {:.3}",
            object.mesh_id,
            object.texture_id,
            object.position.x,
            object.position.y,
            object.position.z,
            object.scale
        );
    }
}
