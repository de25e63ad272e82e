/// Example: a small hierarchy of cubes and a polygon floor
///
/// Usage: cargo run --example orbits

use sr3d_core::{Camera, CameraConfig, Color, Mesh, Scene, Vec3};
use sr3d_terminal::{DisplayConfig, TerminalApp};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cube = Arc::new(Mesh::cube(1.0));
    let mut scene = Scene::new();
    let root = scene.add_group(None)?;

    // Floor first so everything else paints over it
    let floor = scene.add_polygon(
        Some(root),
        vec![
            Vec3::new(-300.0, -300.0, -80.0),
            Vec3::new(300.0, -300.0, -80.0),
            Vec3::new(300.0, 300.0, -80.0),
            Vec3::new(-300.0, 300.0, -80.0),
        ],
    )?;
    scene.set_color(floor, Color::from_rgb(40, 40, 40))?;

    let sun = scene.add_mesh_instance(Some(root), Arc::clone(&cube))?;
    scene.set_scale(sun, 60.0)?;
    scene.set_color(sun, Color::from_rgb(255, 200, 0))?;

    // The planet and its moon move together with their orbit group
    let orbit = scene.add_group(Some(root))?;
    scene.set_position(orbit, Vec3::new(120.0, 60.0, 0.0))?;
    scene.set_rotation(orbit, Vec3::new(0.0, 0.0, 0.5))?;

    let planet = scene.add_mesh_instance(Some(orbit), Arc::clone(&cube))?;
    scene.set_scale(planet, 25.0)?;
    scene.set_color(planet, Color::BLUE)?;

    let moon = scene.add_mesh_instance(Some(orbit), cube)?;
    scene.set_position(moon, Vec3::new(40.0, 0.0, 20.0))?;
    scene.set_scale(moon, 8.0)?;
    scene.set_color(moon, Color::WHITE)?;

    let camera = Camera::from_config(&CameraConfig {
        position: [0.0, -350.0, 60.0],
        pitch_degrees: -10.0,
        ..CameraConfig::default()
    });

    let mut app = TerminalApp::new(scene, root, camera, DisplayConfig::default())?;
    app.run()?;
    Ok(())
}
