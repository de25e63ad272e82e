/// SR3D Terminal Viewer
///
/// Renders meshes in the terminal with a free-flying camera.
/// Controls:
///   - WASD: Move
///   - Arrow Keys / Mouse: Look around
///   - Q/ESC: Quit
///
/// Logs go to stderr; set RUST_LOG and redirect (`2>sr3d.log`) to keep them.

use anyhow::Context;
use clap::Parser;
use log::info;
use sr3d_core::Camera;
use sr3d_terminal::{build_scene, AppConfig, ModelConfig, TerminalApp};
use std::path::{Path, PathBuf};

/// Config read from the working directory when --config is not given
const DEFAULT_CONFIG: &str = "sr3d.toml";

#[derive(Parser, Debug)]
#[command(name = "sr3d-terminal")]
#[command(about = "Software-rasterized 3D viewer for the terminal", long_about = None)]
struct Cli {
    /// Mesh file to show instead of the configured models
    mesh: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Uniform scale for the mesh given on the command line
    #[arg(short, long, default_value_t = 100.0)]
    scale: f32,

    /// Target frames per second
    #[arg(long)]
    fps: Option<u32>,
}

fn resolve_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => AppConfig::load(Path::new(DEFAULT_CONFIG))?,
        None => AppConfig::default(),
    };

    if let Some(mesh) = &cli.mesh {
        config.models = vec![ModelConfig {
            path: Some(mesh.clone()),
            scale: cli.scale,
            ..ModelConfig::default()
        }];
    } else if config.models.is_empty() {
        config.models.push(ModelConfig::default_cube());
    }

    if let Some(fps) = cli.fps {
        anyhow::ensure!(fps > 0, "--fps must be positive");
        config.display.target_fps = fps;
    }

    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    info!("loaded configuration: {} models", config.models.len());

    let (scene, root) = build_scene(&config.models).context("failed to build scene")?;
    let camera = Camera::from_config(&config.camera);

    let mut app = TerminalApp::new(scene, root, camera, config.display)?;
    app.run()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_mesh_argument_replaces_models() {
        let cli = Cli::parse_from(["sr3d-terminal", "teapot.obj", "--scale", "5", "--fps", "12"]);
        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.models.len(), 1);
        assert_eq!(config.models[0].path.as_deref(), Some(Path::new("teapot.obj")));
        assert_eq!(config.models[0].scale, 5.0);
        assert_eq!(config.display.target_fps, 12);
    }

    #[test]
    fn test_explicit_config_is_required_to_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let cli = Cli::parse_from(["sr3d-terminal", "--config", missing.to_str().unwrap()]);
        assert!(resolve_config(&cli).is_err());
    }

    #[test]
    fn test_config_without_models_gets_default_cube() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[camera]\nspeed = 10.0\n").unwrap();

        let cli = Cli::parse_from(["sr3d-terminal", "--config", file.path().to_str().unwrap()]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.camera.speed, 10.0);
        assert_eq!(config.models, vec![ModelConfig::default_cube()]);
    }
}
